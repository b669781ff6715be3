// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ModelCheck - clash detection and rule validation for building models
//!
//! This crate ties the clash engine, the rule engine and the MEP validators
//! together behind one configured [`ModelChecker`] session.

pub mod checker;
pub mod config;

pub use checker::ModelChecker;
pub use config::CheckConfig;

pub use modelcheck_clash as clash;
pub use modelcheck_model as model;
pub use modelcheck_rules as rules;

pub use modelcheck_clash::{ClashDetector, ClashElement, ClashReport, ClashResult};
pub use modelcheck_model::{CheckError, ElementId, Result, Severity};
pub use modelcheck_rules::{Rule, ValidationReport, Validator};
