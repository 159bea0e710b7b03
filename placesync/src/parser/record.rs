//! Line tokenization and per-kind record parsing.
//!
//! Legacy schematic records are positional: one line, whitespace-split
//! fields, double-quoted strings kept together as single tokens. Each
//! record kind maps its positional fields onto a named struct; missing
//! trailing fields default to the empty string.

use crate::parser::schema::{
    AltReference, ComponentField, Label, Position, SheetField, SheetShape, UnitSpec,
};
use crate::parser::SchParseError;

/// Split a record line into tokens.
///
/// Whitespace separates tokens except inside a double-quoted region; the
/// quotes stay part of the token, matching how the editor writes field
/// values. An unterminated quote runs to end of line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if in_quotes {
            current.push(ch);
            if ch == '"' {
                in_quotes = false;
            }
        } else if ch == '"' {
            current.push(ch);
            in_quotes = true;
        } else if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Strip one leading and one trailing double quote, if present.
pub fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Wrap a value in double quotes unless it already is.
pub fn ensure_quoted(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s.to_string()
    } else {
        format!("\"{s}\"")
    }
}

fn arg(args: &[String], index: usize) -> String {
    args.get(index).cloned().unwrap_or_default()
}

fn int_arg(args: &[String], index: usize, kind: &'static str) -> Result<i32, SchParseError> {
    let token = arg(args, index);
    token.parse::<i32>().map_err(|_| SchParseError::InvalidNumber {
        kind,
        token,
    })
}

/// `L name reference`
pub fn parse_label(args: &[String]) -> Label {
    Label {
        name: arg(args, 0),
        reference: arg(args, 1),
    }
}

/// `U unit convert timestamp`
pub fn parse_unit(args: &[String]) -> UnitSpec {
    UnitSpec {
        unit: arg(args, 0),
        convert: arg(args, 1),
        timestamp: arg(args, 2),
    }
}

/// `P posx posy` — the one record whose fields must be numeric, since
/// placement arithmetic runs on them.
pub fn parse_position(args: &[String]) -> Result<Position, SchParseError> {
    Ok(Position {
        x: int_arg(args, 0, "P")?,
        y: int_arg(args, 1, "P")?,
    })
}

/// `AR path reference part`
pub fn parse_alt_reference(args: &[String]) -> AltReference {
    AltReference {
        path: arg(args, 0),
        reference: arg(args, 1),
        part: arg(args, 2),
    }
}

/// `F id value orientation posx posy size attributes hjust props name`
pub fn parse_component_field(args: &[String]) -> ComponentField {
    ComponentField {
        id: arg(args, 0),
        value: arg(args, 1),
        orientation: arg(args, 2),
        posx: arg(args, 3),
        posy: arg(args, 4),
        size: arg(args, 5),
        attributes: arg(args, 6),
        hjust: arg(args, 7),
        props: arg(args, 8),
        name: arg(args, 9),
    }
}

/// `S top_left_x top_left_y bottom_right_x bottom_right_y`
pub fn parse_sheet_shape(args: &[String]) -> SheetShape {
    SheetShape {
        top_left_x: arg(args, 0),
        top_left_y: arg(args, 1),
        bottom_right_x: arg(args, 2),
        bottom_right_y: arg(args, 3),
    }
}

/// Sheet field line. Unlike component fields the id is fused into the
/// first token (`F1 "child.sch" 60`), so this takes the whole token list.
pub fn parse_sheet_field(tokens: &[String]) -> SheetField {
    SheetField {
        id: arg(tokens, 0),
        value: arg(tokens, 1),
        io_state: arg(tokens, 2),
        side: arg(tokens, 3),
        posx: arg(tokens, 4),
        posy: arg(tokens, 5),
        size: arg(tokens, 6),
    }
}
