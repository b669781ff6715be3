// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ModelCheck Clash Detection
//!
//! Bounding-box clash detection for building models and the reporting that
//! turns raw detections into a coordination report.
//!
//! ## Overview
//!
//! - **Bounding volumes**: boundary-exclusive AABB overlap, overlap volume, center
//! - **Detection**: pairwise tests over an element set, severity by overlap volume
//! - **Broad phase**: sweep-and-prune candidate search with the same results as
//!   the naive double loop
//! - **Reporting**: ordered clash list, element adjacency multigraph,
//!   "most problematic" ranking, JSON export and a visualization graph
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modelcheck_clash::{BoundingVolume, ClashDetector, ClashElement, ClashReportBuilder};
//!
//! let elements = vec![
//!     ClashElement::new("duct_1", BoundingVolume::from_extents(0.0, 0.0, 0.0, 2000.0, 2000.0, 2000.0)?),
//!     ClashElement::new("beam_7", BoundingVolume::from_extents(1000.0, 1000.0, 1000.0, 3000.0, 3000.0, 3000.0)?),
//! ];
//!
//! let mut detector = ClashDetector::new();
//! let clashes = detector.check_all(&elements);
//!
//! let report = ClashReportBuilder::new("Level 3 MEP")
//!     .add_clashes(clashes)
//!     .set_elements_checked(elements.len())
//!     .build();
//! println!("{}", report.to_json()?);
//! ```

pub mod bounds;
pub mod broad;
pub mod builder;
pub mod detector;
pub mod graph;
pub mod options;
pub mod report;
pub mod result;

/// Cubic millimeters per cubic meter
pub const MM3_PER_M3: f64 = 1_000_000_000.0;

// Re-export nalgebra point type for convenience
pub use nalgebra::Point3;

// Re-export main types
pub use bounds::BoundingVolume;
pub use broad::{broad_phase_for, AllPairs, BroadPhase, SweepAndPrune};
pub use builder::ClashReportBuilder;
pub use detector::{ClashDetector, ClashElement};
pub use graph::{GraphEdge, GraphNode, VisualizationGraph};
pub use options::{BroadPhaseKind, DetectorOptions, SeverityThresholds};
pub use report::{
    ClashReport, ClashReportDocument, ClashSummary, ProblematicElement,
    DEFAULT_PROBLEMATIC_LIMIT,
};
pub use result::{ClashResult, ClashType};
