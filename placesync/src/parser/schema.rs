use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parser::orientation::Rotation;

/// One parsed schematic file, with every referenced sub-sheet already
/// loaded (see [`Sheet::schematic`]). Read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    pub path: PathBuf,
    /// False when the file lacked the "EESchema Schematic File" header;
    /// every other field is then empty.
    pub header_valid: bool,
    pub libs: Vec<String>,
    pub eelayer: Option<String>,
    pub description: Option<Description>,
    pub components: Vec<Component>,
    pub sheets: Vec<Sheet>,
    pub bitmaps: Vec<Bitmap>,
    pub texts: Vec<RawRecord>,
    pub wires: Vec<RawRecord>,
    pub entries: Vec<RawRecord>,
    pub connections: Vec<RawRecord>,
    pub no_connects: Vec<RawRecord>,
}

impl Schematic {
    pub(crate) fn empty(path: PathBuf, header_valid: bool) -> Self {
        Self {
            path,
            header_valid,
            libs: Vec::new(),
            eelayer: None,
            description: None,
            components: Vec::new(),
            sheets: Vec::new(),
            bitmaps: Vec::new(),
            texts: Vec::new(),
            wires: Vec::new(),
            entries: Vec::new(),
            connections: Vec::new(),
            no_connects: Vec::new(),
        }
    }
}

/// One placed symbol instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    pub labels: Label,
    pub unit: UnitSpec,
    pub position: Position,
    /// Alternate hierarchical-path references (multi-instance sheets).
    pub references: Vec<AltReference>,
    pub fields: Vec<ComponentField>,
    /// Rotation resolved from the legacy transform matrix line.
    pub orient: Rotation,
    /// Tab-prefixed legacy lines, kept verbatim. The second one is the
    /// transform matrix line.
    pub old_stuff: Vec<String>,
}

impl Component {
    /// Reference identifier ("R1", "U3"), the join key against the board.
    pub fn reference(&self) -> &str {
        &self.labels.reference
    }

    /// Symbol name as written in the L record (e.g. "Device:R").
    pub fn name(&self) -> &str {
        &self.labels.name
    }

    /// Field record with the given id, if present.
    pub fn field(&self, id: &str) -> Option<&ComponentField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// `L` record of a component block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub reference: String,
}

/// `U` record of a component block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitSpec {
    pub unit: String,
    pub convert: String,
    pub timestamp: String,
}

/// `P` record: position in schematic units (mils, 1/1000 inch).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// `AR` record: alternate reference for one hierarchical instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AltReference {
    pub path: String,
    pub reference: String,
    pub part: String,
}

/// `F` record of a component block. All fields are kept as written,
/// quotes included; use [`crate::parser::record::unquote`] for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentField {
    pub id: String,
    pub value: String,
    pub orientation: String,
    pub posx: String,
    pub posy: String,
    pub size: String,
    pub attributes: String,
    pub hjust: String,
    pub props: String,
    pub name: String,
}

/// One hierarchical sheet reference, child schematic included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub shape: SheetShape,
    pub unit_id: String,
    pub fields: Vec<SheetField>,
    /// Linked filename from the F1 field, quotes stripped.
    pub filename: String,
    /// Parent directory joined with `filename`.
    pub path: PathBuf,
    /// The referenced schematic, parsed eagerly.
    pub schematic: Schematic,
}

/// `S` record: sheet bounding box corners.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetShape {
    pub top_left_x: String,
    pub top_left_y: String,
    pub bottom_right_x: String,
    pub bottom_right_y: String,
}

/// `F<digit>` record of a sheet block (sheet pin or filename field).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetField {
    pub id: String,
    pub value: String,
    pub io_state: String,
    pub side: String,
    pub posx: String,
    pub posy: String,
    pub size: String,
}

/// `$Descr` block, stored raw. Not semantically parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Description {
    pub raw: Vec<String>,
}

/// `$Bitmap` block, stored raw. Not semantically parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bitmap {
    pub raw: Vec<String>,
}

/// An opaque one- or two-line record (Text, Wire, Entry, Connection, NoConn).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub desc: String,
    pub data: Option<String>,
}
