//! End-to-end placement tests against a mock board.

use placesync::{apply_placements, BoardComponent, PlaceSyncCore, PlaceSyncError};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
struct MockComponent {
    reference: String,
    x: i64,
    y: i64,
    decidegrees: i32,
}

impl MockComponent {
    fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            x: -1,
            y: -1,
            decidegrees: -1,
        }
    }
}

impl BoardComponent for MockComponent {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_position(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    fn set_orientation(&mut self, decidegrees: i32) {
        self.decidegrees = decidegrees;
    }
}

const HEADER: &str = "EESchema Schematic File Version 2\n";

fn comp_block(reference: &str, x: i32, y: i32, transform: &str) -> String {
    format!(
        "$Comp\n\
         L Device:R {reference}\n\
         U 1 1 5D30A2A4\n\
         P {x} {y}\n\
         F 0 \"{reference}\" H 170 246 50  0000 L CNN\n\
         \t1    {x}  {y}\n\
         \t{transform}\n\
         $EndComp\n"
    )
}

#[test]
fn test_apply_converts_units_and_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let sch = format!(
        "{HEADER}{}{}",
        comp_block("R1", 100, 200, "1    0    0    -1"),
        comp_block("U3", 1000, 50, "0    -1   -1   0"),
    );
    std::fs::write(dir.path().join("demo.sch"), sch).unwrap();

    let mut board = vec![MockComponent::new("R1"), MockComponent::new("U3")];
    let report =
        PlaceSyncCore::apply_to_board(&dir.path().join("demo.kicad_pcb"), board.iter_mut())
            .unwrap();

    assert_eq!(report.placed, 2);
    assert!(report.skipped.is_empty());

    // 100 mils * 25.4 * 1000 = 2540000; 200 -> 5080000
    assert_eq!((board[0].x, board[0].y), (2_540_000, 5_080_000));
    assert_eq!(board[0].decidegrees, 0);

    assert_eq!((board[1].x, board[1].y), (25_400_000, 1_270_000));
    assert_eq!(board[1].decidegrees, 900);
}

#[test]
fn test_unmatched_board_reference_is_skipped_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let sch = format!("{HEADER}{}", comp_block("R1", 100, 200, "1    0    0    -1"));
    std::fs::write(dir.path().join("demo.sch"), sch).unwrap();

    let mut board = vec![MockComponent::new("R1"), MockComponent::new("R99")];
    let report =
        PlaceSyncCore::apply_to_board(&dir.path().join("demo.kicad_pcb"), board.iter_mut())
            .unwrap();

    assert_eq!(report.placed, 1);
    assert_eq!(report.skipped, vec!["R99".to_string()]);
    // untouched sentinel values
    assert_eq!(board[1], MockComponent::new("R99"));
}

#[test]
fn test_apply_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let sch = format!("{HEADER}{}", comp_block("R1", 100, 200, "-1   0    0    1"));
    std::fs::write(dir.path().join("demo.sch"), sch).unwrap();
    let board_path = dir.path().join("demo.kicad_pcb");

    let mut board = vec![MockComponent::new("R1")];
    PlaceSyncCore::apply_to_board(&board_path, board.iter_mut()).unwrap();
    let first = board.clone();
    PlaceSyncCore::apply_to_board(&board_path, board.iter_mut()).unwrap();

    assert_eq!(board, first);
    assert_eq!(board[0].decidegrees, 1800);
}

#[test]
fn test_missing_sibling_schematic_aborts_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = vec![MockComponent::new("R1")];

    let result =
        PlaceSyncCore::apply_to_board(&dir.path().join("demo.kicad_pcb"), board.iter_mut());

    assert!(matches!(result, Err(PlaceSyncError::MissingSchematic(_))));
    // nothing was applied
    assert_eq!(board[0], MockComponent::new("R1"));
}

#[test]
fn test_hierarchy_placements_reach_the_board() {
    let dir = tempfile::tempdir().unwrap();
    let root = format!(
        "{HEADER}{}$Sheet\n\
         S 600 1200 900 400\n\
         U 5D30AAAA\n\
         F0 \"sub\" 60\n\
         F1 \"child.sch\" 60\n\
         $EndSheet\n",
        comp_block("R1", 100, 200, "1    0    0    -1")
    );
    let child = format!("{HEADER}{}", comp_block("C5", 10, 20, "1    0    0    -1"));
    std::fs::write(dir.path().join("demo.sch"), root).unwrap();
    std::fs::write(dir.path().join("child.sch"), child).unwrap();

    let mut board = vec![MockComponent::new("C5")];
    let report =
        PlaceSyncCore::apply_to_board(&dir.path().join("demo.kicad_pcb"), board.iter_mut())
            .unwrap();

    assert_eq!(report.placed, 1);
    assert_eq!((board[0].x, board[0].y), (254_000, 508_000));
}

#[test]
fn test_apply_placements_directly() {
    let locations = {
        let dir = tempfile::tempdir().unwrap();
        let sch = format!("{HEADER}{}", comp_block("R1", 1, 1, "1    0    0    -1"));
        let path = dir.path().join("x.sch");
        std::fs::write(&path, sch).unwrap();
        PlaceSyncCore::resolve_locations(Path::new(&path)).unwrap()
    };

    let mut board = vec![MockComponent::new("R1")];
    let report = apply_placements(board.iter_mut(), &locations);
    assert_eq!(report.placed, 1);
    assert_eq!((board[0].x, board[0].y), (25_400, 25_400));
}
