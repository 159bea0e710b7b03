//! Top-level "apply schematic placement to this board" operation.
//! No host-application dependencies; the board comes in through the
//! [`BoardComponent`] trait.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::parser::schema::Schematic;
use crate::parser::SchParseError;
use crate::placement::{apply_placements, ApplyReport, BoardComponent, Placement};

#[derive(Debug, thiserror::Error)]
pub enum PlaceSyncError {
    #[error("schematic file {0} does not exist")]
    MissingSchematic(PathBuf),
    #[error("parse error: {0}")]
    Parse(#[from] SchParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sibling schematic for a board file: same stem, `.sch` extension
/// (`project.kicad_pcb` -> `project.sch`).
pub fn derive_schematic_path(board_path: &Path) -> PathBuf {
    board_path.with_extension("sch")
}

/// Placement API used by plugins and the CLI.
pub struct PlaceSyncCore;

impl PlaceSyncCore {
    /// Resolve every placement in the hierarchy rooted at `sch_path`.
    ///
    /// Checks existence up front so a missing file is reported cleanly
    /// before any parsing starts.
    pub fn resolve_locations(
        sch_path: &Path,
    ) -> Result<HashMap<String, Placement>, PlaceSyncError> {
        if !sch_path.is_file() {
            return Err(PlaceSyncError::MissingSchematic(sch_path.to_path_buf()));
        }
        let schematic = Schematic::parse_file(sch_path)?;
        Ok(schematic.locations())
    }

    /// Mirror the schematic layout onto the board's components.
    ///
    /// The schematic path is derived from the board's own file path.
    /// Aborts before touching anything when the schematic is missing or
    /// fails to parse; placement mismatches are per-component warnings,
    /// collected in the report.
    pub fn apply_to_board<'a, C, I>(
        board_path: &Path,
        components: I,
    ) -> Result<ApplyReport, PlaceSyncError>
    where
        C: BoardComponent + 'a,
        I: IntoIterator<Item = &'a mut C>,
    {
        let sch_path = derive_schematic_path(board_path);
        let locations = Self::resolve_locations(&sch_path)?;
        Ok(apply_placements(components, &locations))
    }
}
