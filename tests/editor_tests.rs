//! Placement controller tests - scenarios and layout invariants

use std::collections::HashSet;

use block_layout::core::{block_cells, get_shape, Editor, EditorPhase};
use block_layout::types::{
    in_bounds, BlockColor, BlockId, BlockKind, EditorAction, PlacedBlock, Rotation,
};

fn committed(id: u32, kind: BlockKind, x: i32, y: i32) -> PlacedBlock {
    PlacedBlock {
        offset_x: x,
        offset_y: y,
        ..PlacedBlock::new(BlockId(id), kind, BlockColor::Green)
    }
}

/// Check every layout invariant the controller promises.
fn assert_invariants(editor: &Editor) {
    let mut seen = HashSet::new();
    let mut ids = HashSet::new();
    for block in editor.blocks() {
        assert!(ids.insert(block.id), "duplicate id {}", block.id);
        assert!(block.id < editor.next_id(), "{} not below counter", block.id);
        for (x, y) in block_cells(block) {
            assert!(in_bounds(x, y), "{} leaves the grid at ({x},{y})", block.id);
            assert!(seen.insert((x, y)), "{} overlaps at ({x},{y})", block.id);
            assert_eq!(editor.grid().owner(x, y), Some(block.id));
        }
    }
    assert_eq!(editor.grid().occupied_count(), seen.len());

    if let Some(live) = editor.live() {
        assert!(!ids.contains(&live.id));
        assert_eq!(editor.phase(), EditorPhase::Selecting);
        for (x, y) in block_cells(live) {
            assert!(in_bounds(x, y));
        }
    } else {
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }
}

// ============== Scenario ==============

#[test]
fn test_straight_block_scenario() {
    let mut editor = Editor::new();

    // Place a 3-cell straight block at the origin.
    assert!(editor.begin_new(BlockKind::I3));
    assert!(editor.place());
    let first = editor.blocks()[0];
    assert_eq!(block_cells(&first).as_slice(), get_shape(BlockKind::I3));

    // Move by (10, 0) is a boundary violation.
    assert!(editor.select(first.id));
    assert!(!editor.move_by(10, 0));
    assert_eq!(*editor.live().unwrap(), first);
    assert!(editor.place());

    // A second block fully on top of the first cannot be placed.
    assert!(editor.begin_new(BlockKind::I3));
    assert!(!editor.place());
    assert_eq!(editor.blocks(), &[first]);
    assert!(editor.is_selecting());
    assert!(editor.delete());
    assert_invariants(&editor);
}

#[test]
fn test_rotation_blocked_on_every_kick() {
    let mut editor = Editor::new();
    // Leave only row 0 columns 0..=2 free: a horizontal I3 fits, nothing else.
    let mut blocks = vec![committed(1, BlockKind::I4, 3, 0)];
    for y in 1..7 {
        blocks.push(committed(10 + y as u32, BlockKind::I4, 0, y));
        blocks.push(committed(20 + y as u32, BlockKind::I3, 4, y));
    }
    editor.restore(blocks);
    assert_invariants(&editor);

    assert!(editor.begin_new(BlockKind::I3));
    let before = *editor.live().unwrap();
    for _ in 0..4 {
        assert!(!editor.rotate());
        assert_eq!(*editor.live().unwrap(), before);
    }
    assert!(editor.place());
    assert_eq!(editor.grid().occupied_count(), 49);
}

#[test]
fn test_rotation_kick_prefers_lowest_delta() {
    let mut editor = Editor::new();
    editor.restore(vec![committed(1, BlockKind::Domino, 0, 3)]);
    assert!(editor.begin_new(BlockKind::I3));
    assert!(editor.move_by(0, 2));

    // 90° in place covers (0,2) (0,3) (0,4): (0,3) is taken.
    assert!(editor.rotate());
    let live = *editor.live().unwrap();
    assert_eq!(live.rotation, Rotation::Deg90);
    // Negative dx leaves the grid; with dx = 0, dy = -4 and -3 start above
    // row 0, so (0, -2) is the first legal delta.
    let cells = block_cells(&live);
    assert!(cells.iter().all(|&(x, y)| in_bounds(x, y)));
    assert!(cells.iter().all(|&(x, y)| editor.grid().is_free(x, y)));
    assert_eq!((live.offset_x, live.offset_y), (0, 0));
}

// ============== Transitions ==============

#[test]
fn test_no_ops_without_selection() {
    let mut editor = Editor::new();
    for action in [
        EditorAction::MoveLeft,
        EditorAction::MoveDown,
        EditorAction::Rotate,
        EditorAction::Place,
        EditorAction::Delete,
        EditorAction::Deselect,
    ] {
        assert!(!editor.apply_action(action), "{action:?}");
    }
    assert_eq!(editor.next_id(), BlockId(0));
}

#[test]
fn test_picked_up_block_is_excluded_from_its_own_checks() {
    let mut editor = Editor::new();
    editor.restore(vec![committed(0, BlockKind::P5, 1, 1)]);
    assert!(editor.select_at(1, 3));
    assert!(editor.grid().is_free(1, 1));

    assert!(editor.rotate());
    assert!(editor.place());
    assert_eq!(editor.blocks()[0].rotation, Rotation::Deg90);
    assert_invariants(&editor);
}

#[test]
fn test_ids_stay_unique_after_restore() {
    let mut editor = Editor::new();
    editor.restore(vec![committed(41, BlockKind::O4, 0, 0), committed(7, BlockKind::O4, 3, 3)]);
    editor.begin_new(BlockKind::Domino);
    editor.move_by(0, 5);
    assert!(editor.place());
    assert_eq!(editor.blocks().last().unwrap().id, BlockId(42));
    assert_invariants(&editor);
}

// ============== Random action sequences ==============

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn random_action(rng: &mut XorShift) -> EditorAction {
    match rng.below(10) {
        0 => EditorAction::Begin(BlockKind::ALL[rng.below(BlockKind::ALL.len())]),
        1 => EditorAction::MoveLeft,
        2 => EditorAction::MoveRight,
        3 => EditorAction::MoveUp,
        4 => EditorAction::MoveDown,
        5 => EditorAction::Rotate,
        6 | 7 => EditorAction::Place,
        8 => EditorAction::Deselect,
        _ => EditorAction::NextColor,
    }
}

#[test]
fn test_invariants_hold_under_random_actions() {
    for seed in 1..=40u64 {
        let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut editor = Editor::new();

        for step in 0..400 {
            match rng.below(40) {
                0 => {
                    if let Some(id) = editor.blocks().first().map(|b| b.id) {
                        editor.delete_block(id);
                    }
                }
                1 => {
                    editor.select_at(rng.below(7) as i32, rng.below(7) as i32);
                }
                2 => {
                    editor.delete();
                }
                _ => {
                    editor.apply_action(random_action(&mut rng));
                }
            }
            assert_invariants(&editor);
            assert!(editor.blocks().len() <= 49 / 2, "seed {seed} step {step}");
        }
    }
}

#[test]
fn test_deselect_round_trips_committed_state() {
    let mut editor = Editor::new();
    editor.restore(vec![
        committed(0, BlockKind::S4, 0, 0),
        committed(1, BlockKind::U5, 3, 3),
        committed(2, BlockKind::X5, 0, 4),
    ]);
    let before = editor.blocks().to_vec();

    for id in 0..3 {
        assert!(editor.select(BlockId(id)));
        editor.rotate();
        editor.move_by(1, 1);
        assert!(editor.deselect());
        assert_eq!(editor.blocks(), before.as_slice());
    }
    assert_invariants(&editor);
}
