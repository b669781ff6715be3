// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ModelCheck Model - Shared vocabulary for BIM model checking
//!
//! This crate holds the types every checker agrees on: element identifiers,
//! severity tiers, issue locations, and the input records that the model
//! acquisition layer hands to the clash detector and the MEP validators.
//!
//! # Architecture
//!
//! - [`ElementId`] - Opaque element identifier (integer or string)
//! - [`Severity`] - Totally ordered severity tier shared by clashes and rules
//! - [`Location`] - Point in model space (millimeters)
//! - [`records`] - Typed input records, validated once at the boundary
//! - [`CheckError`] - The single error type of the workspace
//!
//! # Example
//!
//! ```ignore
//! use modelcheck_model::{ClashElementRecord, ElementId};
//!
//! let value = serde_json::json!({
//!     "id": 42,
//!     "bounding_box": {"min": {"x": 0, "y": 0, "z": 0}, "max": {"x": 1, "y": 1, "z": 1}}
//! });
//! let record = ClashElementRecord::from_value(&value)?;
//! assert_eq!(record.id, ElementId::Int(42));
//! ```

pub mod error;
pub mod export;
pub mod records;
pub mod types;

// Re-export all public types
pub use error::*;
pub use export::*;
pub use records::*;
pub use types::*;
