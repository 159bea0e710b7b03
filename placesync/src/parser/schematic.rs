//! Streaming parser for the legacy eeschema text format.
//!
//! A schematic file is line-oriented: a required header, `LIBS:` and
//! `EELAYER` preamble lines, `$Kind`/`$EndKind` blocks for descriptions,
//! components, sheets and bitmaps, and a few one- or two-line records in
//! between. Only components and sheets are parsed semantically; everything
//! else is kept raw. Sheet blocks link to further `.sch` files, which are
//! loaded eagerly and recursively, so parsing the root materializes the
//! whole design hierarchy.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::parser::orientation::{parse_transform_line, Rotation};
use crate::parser::record::{
    parse_alt_reference, parse_component_field, parse_label, parse_position, parse_sheet_field,
    parse_sheet_shape, parse_unit, tokenize, unquote,
};
use crate::parser::schema::{
    Bitmap, Component, Description, RawRecord, Schematic, Sheet,
};
use crate::parser::SchParseError;

/// Literal marker required on the first line of every schematic file.
const HEADER_MARKER: &str = "EESchema Schematic File";

impl Schematic {
    /// Parse a schematic file and, recursively, every sheet it references.
    ///
    /// Referenced files resolve relative to their parent's directory. A
    /// reference cycle fails with [`SchParseError::SheetCycle`]; an
    /// unreadable referenced file is fatal. A file whose header lacks the
    /// eeschema marker parses to an empty schematic with
    /// `header_valid == false` (a warning is logged, nothing is raised).
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Schematic, SchParseError> {
        let mut visiting = HashSet::new();
        parse_file_guarded(path.as_ref(), &mut visiting)
    }

    /// Parse schematic text from a reader. `path` stands in for the file
    /// location and anchors relative sheet resolution.
    pub fn parse_reader(
        reader: impl BufRead,
        path: impl Into<PathBuf>,
    ) -> Result<Schematic, SchParseError> {
        let path = path.into();
        let mut visiting = HashSet::new();
        visiting.insert(resolve(&path));
        parse_stream(reader, path, &mut visiting)
    }
}

/// Stable key for the cycle guard: canonical when the file exists,
/// the raw path otherwise.
fn resolve(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn parse_file_guarded(
    path: &Path,
    visiting: &mut HashSet<PathBuf>,
) -> Result<Schematic, SchParseError> {
    let key = resolve(path);
    if !visiting.insert(key.clone()) {
        return Err(SchParseError::SheetCycle(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let result = parse_stream(BufReader::new(file), path.to_path_buf(), visiting);
    visiting.remove(&key);
    result
}

fn parse_stream(
    reader: impl BufRead,
    path: PathBuf,
    visiting: &mut HashSet<PathBuf>,
) -> Result<Schematic, SchParseError> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };
    if !header.contains(HEADER_MARKER) {
        tracing::warn!(path = %path.display(), "not an eeschema schematic file, skipping");
        return Ok(Schematic::empty(path, false));
    }

    let mut sch = Schematic::empty(path, true);
    let mut block: Vec<String> = Vec::new();
    let mut in_block = false;

    while let Some(line) = lines.next() {
        let line = line?;

        if in_block {
            block.push(line);
            let last = block.last().map(String::as_str).unwrap_or("");
            if last.starts_with("$End") {
                in_block = false;
                dispatch_block(&mut sch, &block, visiting)?;
                block.clear();
            }
            continue;
        }

        if line.starts_with("LIBS:") {
            sch.libs.push(line);
        } else if line.starts_with("EELAYER END") {
            // terminator, nothing to keep
        } else if line.starts_with("EELAYER") {
            if sch.eelayer.is_none() {
                sch.eelayer = Some(line);
            }
        } else if line.starts_with('$') {
            block.clear();
            block.push(line);
            let first = block.last().map(String::as_str).unwrap_or("");
            if first.starts_with("$End") {
                // stray terminator like $EndSCHEMATC, nothing opened
                block.clear();
            } else {
                in_block = true;
            }
        } else if line.starts_with("Text") {
            let data = lines.next().transpose()?;
            sch.texts.push(RawRecord { desc: line, data });
        } else if line.starts_with("Wire") {
            let data = lines.next().transpose()?;
            sch.wires.push(RawRecord { desc: line, data });
        } else if line.starts_with("Entry") {
            let data = lines.next().transpose()?;
            sch.entries.push(RawRecord { desc: line, data });
        } else if line.starts_with("Connection") {
            sch.connections.push(RawRecord { desc: line, data: None });
        } else if line.starts_with("NoConn") {
            sch.no_connects.push(RawRecord { desc: line, data: None });
        }
    }

    if in_block {
        tracing::warn!(
            path = %sch.path.display(),
            "unterminated block at end of file, contents dropped"
        );
    }

    tracing::debug!(
        path = %sch.path.display(),
        components = sch.components.len(),
        sheets = sch.sheets.len(),
        "parsed schematic"
    );
    Ok(sch)
}

fn dispatch_block(
    sch: &mut Schematic,
    block: &[String],
    visiting: &mut HashSet<PathBuf>,
) -> Result<(), SchParseError> {
    let end = block.last().map(String::as_str).unwrap_or("");
    if end.starts_with("$EndDescr") {
        sch.description = Some(Description { raw: block.to_vec() });
    } else if end.starts_with("$EndComp") {
        sch.components.push(component_from_block(block)?);
    } else if end.starts_with("$EndSheet") {
        let parent = sch.path.clone();
        sch.sheets.push(sheet_from_block(block, &parent, visiting)?);
    } else if end.starts_with("$EndBitmap") {
        sch.bitmaps.push(Bitmap { raw: block.to_vec() });
    }
    // other $End markers close blocks this parser does not model
    Ok(())
}

/// Assemble one component from the raw lines of a `$Comp` block.
///
/// Last `L`/`U`/`P` wins on duplicates; `AR` and `F` accumulate in order.
/// Tab-prefixed lines are the old-format remnants; the second one carries
/// the transform matrix that fixes the orientation.
fn component_from_block(block: &[String]) -> Result<Component, SchParseError> {
    let mut component = Component::default();

    for line in block {
        if line.starts_with('\t') {
            component.old_stuff.push(line.clone());
            continue;
        }
        if line.starts_with('$') {
            continue;
        }
        let tokens = tokenize(line);
        let Some(kind) = tokens.first() else {
            return Err(SchParseError::EmptyRecord("component"));
        };
        match kind.as_str() {
            "L" => component.labels = parse_label(&tokens[1..]),
            "U" => component.unit = parse_unit(&tokens[1..]),
            "P" => component.position = parse_position(&tokens[1..])?,
            "AR" => component.references.push(parse_alt_reference(&tokens[1..])),
            "F" => component.fields.push(parse_component_field(&tokens[1..])),
            _ => {}
        }
    }

    let transform = component
        .old_stuff
        .get(1)
        .and_then(|line| parse_transform_line(line));
    component.orient = match transform {
        Some(matrix) => Rotation::from_matrix(matrix).unwrap_or_else(|| {
            tracing::warn!(
                reference = %component.labels.reference,
                ?matrix,
                "unknown transform matrix, assuming 0 degrees"
            );
            Rotation::R0
        }),
        None => {
            tracing::warn!(
                reference = %component.labels.reference,
                "component has no usable transform line, assuming 0 degrees"
            );
            Rotation::R0
        }
    };

    Ok(component)
}

/// Assemble one sheet from the raw lines of a `$Sheet` block and load the
/// schematic it links to.
fn sheet_from_block(
    block: &[String],
    parent: &Path,
    visiting: &mut HashSet<PathBuf>,
) -> Result<Sheet, SchParseError> {
    let mut shape = Default::default();
    let mut unit_id = String::new();
    let mut fields = Vec::new();
    let mut filename: Option<String> = None;

    for line in block {
        if line.starts_with('$') {
            continue;
        }
        let tokens = tokenize(line);
        let Some(kind) = tokens.first() else {
            return Err(SchParseError::EmptyRecord("sheet"));
        };
        match kind.as_str() {
            "S" => shape = parse_sheet_shape(&tokens[1..]),
            "U" => unit_id = tokens.get(1).cloned().unwrap_or_default(),
            k if is_sheet_field_id(k) => {
                let field = parse_sheet_field(&tokens);
                if field.id == "F1" {
                    filename = Some(unquote(&field.value).to_string());
                }
                fields.push(field);
            }
            _ => {}
        }
    }

    let filename = filename.ok_or(SchParseError::MissingSheetFilename)?;
    let path = parent
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&filename);
    let schematic = parse_file_guarded(&path, visiting)?;

    Ok(Sheet {
        shape,
        unit_id,
        fields,
        filename,
        path,
        schematic,
    })
}

/// `F` followed by digits: a sheet pin field line (`F0` name, `F1` linked
/// filename, `F2`+ pins).
fn is_sheet_field_id(token: &str) -> bool {
    let Some(rest) = token.strip_prefix('F') else {
        return false;
    };
    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
}
