//! Flattening the sheet hierarchy into placements and pushing them onto
//! a board.
//!
//! The board itself belongs to the host application; all it has to offer
//! is a reference string and setters for absolute position and rotation,
//! captured by [`BoardComponent`]. Undo, redraw and persistence stay on
//! the host side.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parser::schema::Schematic;

/// Schematic mils (1/1000 inch) to board units: pcbnew stores nanometers,
/// and 1 mil = 25.4 um = 25400 nm.
pub const MILS_TO_BOARD_UNITS: f64 = 25.4 * 1000.0;

/// One resolved placement, keyed by reference in the flattened map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// Symbol name of the component ("Device:R").
    pub name: String,
    /// Position in schematic units (mils).
    pub x: i32,
    pub y: i32,
    /// Signed rotation in degrees: one of -90, 0, 90, 180.
    pub degrees: i32,
}

impl Schematic {
    /// Flatten the whole hierarchy into reference -> placement.
    ///
    /// Own components come first, then each sheet's subtree depth-first,
    /// in document order. References are assumed unique across the
    /// design; on a duplicate the later occurrence wins silently.
    pub fn locations(&self) -> HashMap<String, Placement> {
        let mut map = HashMap::new();
        self.collect_locations(&mut map);
        map
    }

    fn collect_locations(&self, map: &mut HashMap<String, Placement>) {
        for comp in &self.components {
            map.insert(
                comp.reference().to_string(),
                Placement {
                    name: comp.name().to_string(),
                    x: comp.position.x,
                    y: comp.position.y,
                    degrees: comp.orient.degrees(),
                },
            );
        }
        for sheet in &self.sheets {
            sheet.schematic.collect_locations(map);
        }
    }
}

/// A placed component on the host's board, as far as placement needs it.
///
/// Position is in the host's native length unit (nanometers), rotation
/// in decidegrees, both matching what pcbnew stores internally.
pub trait BoardComponent {
    fn reference(&self) -> &str;
    fn set_position(&mut self, x: i64, y: i64);
    fn set_orientation(&mut self, decidegrees: i32);
}

/// Outcome of one placement pass over a board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Components moved to their schematic position.
    pub placed: usize,
    /// Board references with no schematic placement, left untouched.
    pub skipped: Vec<String>,
}

/// Move every board component that has a resolved placement.
///
/// Board references missing from the map are skipped with a warning and
/// reported; placements with no matching board component are ignored.
/// Re-running with the same schematic is idempotent.
pub fn apply_placements<'a, C, I>(
    components: I,
    locations: &HashMap<String, Placement>,
) -> ApplyReport
where
    C: BoardComponent + 'a,
    I: IntoIterator<Item = &'a mut C>,
{
    let mut report = ApplyReport::default();

    for comp in components {
        let reference = comp.reference().to_string();
        match locations.get(&reference) {
            Some(placement) => {
                let x = (placement.x as f64 * MILS_TO_BOARD_UNITS) as i64;
                let y = (placement.y as f64 * MILS_TO_BOARD_UNITS) as i64;
                comp.set_position(x, y);
                comp.set_orientation(placement.degrees * 10);
                tracing::debug!(reference = %reference, x, y, "placed component");
                report.placed += 1;
            }
            None => {
                tracing::warn!(
                    reference = %reference,
                    "no schematic placement for board component, skipping"
                );
                report.skipped.push(reference);
            }
        }
    }

    report
}
