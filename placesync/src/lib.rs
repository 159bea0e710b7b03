//! PlaceSync - KiCad legacy schematic placement extraction
//!
//! This library reads the legacy eeschema text format (`.sch`), walks the
//! sheet hierarchy recursively, and resolves a flat map from component
//! reference ("R1", "U3") to schematic position and rotation, so a board
//! layout can mirror the schematic layout.
//!
//! # Quick Start
//!
//! ```no_run
//! use placesync::PlaceSyncCore;
//! use std::path::Path;
//!
//! let locations = PlaceSyncCore::resolve_locations(Path::new("design.sch")).unwrap();
//! for (reference, placement) in &locations {
//!     println!("{} at ({}, {}) rot {}", reference, placement.x, placement.y, placement.degrees);
//! }
//! ```
//!
//! # Features
//!
//! - **Hierarchy resolution**: referenced sub-sheets load eagerly and
//!   recursively, with cycle detection
//! - **Orientation**: legacy 2x2 transform matrices resolve to rotation
//!   angles
//! - **Board boundary**: a small trait ([`BoardComponent`]) is all a host
//!   application implements to receive placements

pub mod core;
pub mod parser;
pub mod placement;

// Re-export main types
pub use crate::core::{derive_schematic_path, PlaceSyncCore, PlaceSyncError};
pub use parser::schema::{Component, Schematic, Sheet};
pub use parser::{Rotation, SchParseError};
pub use placement::{
    apply_placements, ApplyReport, BoardComponent, Placement, MILS_TO_BOARD_UNITS,
};

/// Parse a schematic file and its hierarchy (convenience wrapper).
pub fn parse_schematic(path: &std::path::Path) -> Result<Schematic, PlaceSyncError> {
    Ok(Schematic::parse_file(path)?)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApplyReport, BoardComponent, Placement, PlaceSyncCore, PlaceSyncError, Schematic,
    };
}
