//! Symbol orientation from the legacy 2x2 transform matrix.
//!
//! Eeschema never writes an angle; it writes the linear transform applied
//! to the symbol. Only a handful of matrices can come out of the editor,
//! so a fixed table is both correct and fast.

use serde::{Deserialize, Serialize};

/// Signed rotation of a placed symbol, in the schematic's convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    RNeg90,
}

impl Rotation {
    /// Rotation in degrees: one of 0, 90, 180, -90.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::RNeg90 => -90,
        }
    }

    /// Map a transform matrix `[a, b, c, d]` to a rotation.
    ///
    /// Mirrored variants collapse onto the unmirrored angle; the board
    /// side only needs the rotation. `[0, 1, -1, 0]` shows up in old
    /// files and maps to 0. Anything else returns `None` and the caller
    /// decides the fallback.
    pub fn from_matrix(m: [i32; 4]) -> Option<Rotation> {
        match m {
            [1, 0, 0, -1] => Some(Rotation::R0),
            [1, 0, 0, 1] => Some(Rotation::R0),
            [-1, 0, 0, 1] => Some(Rotation::R180),
            [-1, 0, 0, -1] => Some(Rotation::R180),
            [0, 1, 1, 0] => Some(Rotation::RNeg90),
            [0, -1, -1, 0] => Some(Rotation::R90),
            [0, 1, -1, 0] => Some(Rotation::R0),
            _ => None,
        }
    }
}

/// Extract the four signed integers of a tab-prefixed transform line.
///
/// Returns `None` when the line is not exactly four integers, which the
/// component extractor treats the same as an unknown matrix.
pub fn parse_transform_line(line: &str) -> Option<[i32; 4]> {
    let mut values = [0i32; 4];
    let mut count = 0;
    for tok in line.split_whitespace() {
        if count == 4 {
            return None;
        }
        values[count] = tok.parse::<i32>().ok()?;
        count += 1;
    }
    if count == 4 {
        Some(values)
    } else {
        None
    }
}
