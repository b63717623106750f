use roomkit_core::{CatalogEntry, FurnitureCatalog, PlacementError};
use roomkit_planner::{EditKind, PlannerState, RoomPoint};
use std::sync::Arc;

fn catalog() -> Arc<FurnitureCatalog> {
    Arc::new(
        FurnitureCatalog::new()
            .with_entry("Table", CatalogEntry::new(2, 2))
            .with_entry("Bed", CatalogEntry::new(2, 3).with_initial_rotation(90))
            .with_entry("Lamp", CatalogEntry::new(1, 1)),
    )
}

#[test]
fn test_extreme_inputs_are_refused_without_panicking() {
    let mut state = PlannerState::new(catalog());
    assert!(matches!(
        state.add_item("Table", i32::MAX, 5),
        Err(PlacementError::OutOfBounds { .. })
    ));

    let id = state.add_item("Table", 5, 5).unwrap();
    assert!(matches!(
        state.move_item(id, RoomPoint::new(0, i32::MIN), None),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert!(matches!(
        state.move_item_to_cell(id, i32::MAX, i32::MIN),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert_eq!(state.item(id).unwrap().position, RoomPoint::new(-3, 3));
    assert_eq!(state.history().undo_depth(), 1);
}

#[test]
fn test_default_room_scenario() {
    let mut state = PlannerState::new(catalog());
    assert_eq!(state.geometry().rows(), 16);
    assert_eq!(state.geometry().columns(), 16);

    let first = state.add_item("Table", 5, 5).unwrap();
    assert_eq!(state.item(first).unwrap().position, RoomPoint::new(-3, 3));

    assert_eq!(
        state.add_item("Table", 5, 6),
        Err(PlacementError::Overlap {
            row: 5,
            col: 6,
            occupant: first
        })
    );

    state.move_item_to_cell(first, 10, 10).unwrap();
    assert_eq!(state.item(first).unwrap().position, RoomPoint::new(2, -2));

    assert!(matches!(
        state.add_item("Table", 1, 5),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert_eq!(state.item_count(), 1);
}

#[test]
fn test_border_rejections_leave_state_unchanged() {
    let mut state = PlannerState::new(catalog());
    let id = state.add_item("Lamp", 2, 2).unwrap();
    let before = state.snapshot();
    let depth = state.history().undo_depth();

    // Near edge: rows and columns 0 and 1 are border.
    for (row, col) in [(0, 5), (1, 5), (5, 0), (5, 1)] {
        assert!(state.add_item("Lamp", row, col).is_err());
    }
    // Far edge: the last two rows and columns are border, and a footprint
    // may not reach into them either.
    for (row, col) in [(14, 5), (15, 5), (5, 14), (5, 15)] {
        assert!(state.add_item("Lamp", row, col).is_err());
    }
    assert!(state.add_item("Table", 13, 5).is_err());
    assert!(state.add_item("Table", 5, 13).is_err());
    assert!(state.move_item_to_cell(id, 1, 1).is_err());
    assert!(state.move_item_to_cell(id, 16, 16).is_err());

    assert_eq!(state.snapshot(), before);
    assert_eq!(state.history().undo_depth(), depth);

    // The last interior cell is accepted.
    state.add_item("Lamp", 13, 13).unwrap();
    state.add_item("Table", 12, 2).unwrap();
}

#[test]
fn test_rotation_cycles_back() {
    let mut state = PlannerState::new(catalog());
    let id = state.add_item("Bed", 4, 4).unwrap();
    let original = state.item(id).unwrap().rotation;

    let seen: Vec<i32> = (0..4).map(|_| state.rotate_item(id).unwrap()).collect();
    assert_eq!(seen, vec![180, 270, 360, 90]);
    assert_eq!(state.item(id).unwrap().rotation, original);
    for rotation in seen {
        assert_eq!((rotation - 90).rem_euclid(90), 0);
    }
}

#[test]
fn test_remove_is_idempotent() {
    let mut state = PlannerState::new(catalog());
    let id = state.add_item("Lamp", 6, 6).unwrap();

    assert!(state.remove_item(id));
    let after_first = state.snapshot();
    let depth = state.history().undo_depth();

    assert!(!state.remove_item(id));
    assert_eq!(state.snapshot(), after_first);
    assert_eq!(state.history().undo_depth(), depth);
}

#[test]
fn test_history_round_trip() {
    let mut state = PlannerState::new(catalog());
    let initial = state.snapshot();

    let table = state.add_item("Table", 5, 5).unwrap();
    let lamp = state.add_item("Lamp", 9, 9).unwrap();
    state.rotate_item(table).unwrap();
    state.flip_item(lamp).unwrap();
    state.move_item(table, RoomPoint::new(0, 2), None).unwrap();
    state.resize_room(1500.0, 1200.0).unwrap();
    let edits = 6;
    let last = state.snapshot();

    for _ in 0..edits {
        assert!(state.undo());
    }
    assert!(!state.can_undo());
    assert_eq!(state.snapshot(), initial);

    for _ in 0..edits {
        assert!(state.redo());
    }
    assert!(!state.can_redo());
    assert_eq!(state.snapshot(), last);
}

#[test]
fn test_edit_after_undo_discards_redo() {
    let mut state = PlannerState::new(catalog());
    let id = state.add_item("Lamp", 5, 5).unwrap();
    state.move_item_to_cell(id, 6, 6).unwrap();

    assert!(state.undo());
    assert!(state.can_redo());

    state.flip_item(id).unwrap();
    assert!(!state.can_redo());
    assert_eq!(state.item(id).unwrap().position, RoomPoint::new(-3, 3));
    assert_eq!(
        state.history().entries().last().unwrap().kind,
        EditKind::ItemFlipped
    );
}

#[test]
fn test_rejected_edit_records_nothing() {
    let mut state = PlannerState::new(catalog());
    state.add_item("Table", 5, 5).unwrap();
    let len = state.history().len();

    assert!(state.add_item("Table", 6, 6).is_err());
    assert!(state.add_item("Sideboard", 8, 8).is_err());
    assert!(state.resize_room(0.0, 0.0).is_err());
    assert!(state.rotate_item(999).is_err());

    assert_eq!(state.history().len(), len);
}

#[test]
fn test_bounded_history() {
    let mut config = roomkit_settings::Config::default();
    config.history.max_depth = 3;
    let mut state = PlannerState::from_config(&config, catalog()).unwrap();
    let id = state.add_item("Lamp", 5, 5).unwrap();
    for _ in 0..5 {
        state.flip_item(id).unwrap();
    }

    let mut undone = 0;
    while state.undo() {
        undone += 1;
    }
    assert_eq!(undone, 2);
    assert_eq!(state.item_count(), 1);
}
