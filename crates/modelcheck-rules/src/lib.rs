// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ModelCheck Rules
//!
//! Predicate-driven rule evaluation and the fixed-table MEP validators.
//!
//! ## Overview
//!
//! - **Rules**: named, severity-tagged predicates over any element type `T`
//! - **Validator**: evaluates rules in order and appends issues to one
//!   active [`ValidationReport`]
//! - **MEP**: connectivity, sizing and clearance validators, each with its
//!   own clearable issue list
//! - **Prioritization**: flattens issues of every kind into export records
//!   ranked by severity weight
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modelcheck_rules::{Rule, RuleEngine, Validator};
//! use modelcheck_model::Severity;
//! use serde_json::{json, Value};
//!
//! let min_height = Rule::new(
//!     "wall_min_height",
//!     "Minimum Wall Height",
//!     "Wall height must be at least 2400mm",
//!     "walls",
//!     Severity::Critical,
//!     |wall: &Value| wall["height"].as_f64().unwrap_or(0.0) >= 2400.0,
//! );
//!
//! let mut validator = Validator::new(RuleEngine::new());
//! validator.create_report("Office Building");
//! let issues = validator.validate_element(&json!({"height": 2000}), "wall_2", &[min_height])?;
//! assert_eq!(issues.len(), 1);
//! ```

pub mod mep;
pub mod priority;
pub mod report;
pub mod rule;
pub mod validator;

pub use mep::{
    ClearanceLimits, MepClearanceValidator, MepConnectivityValidator, MepIssue, MepIssueType,
    MepSizingValidator, MepValidator, SizingLimits,
};
pub use priority::{IssuePrioritizer, DEFAULT_TOP_ISSUES};
pub use report::{ValidationIssue, ValidationReport, ValidationReportDocument};
pub use rule::{evaluate_rules, Predicate, Rule, RuleEngine};
pub use validator::Validator;
