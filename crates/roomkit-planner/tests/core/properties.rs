use proptest::prelude::*;
use roomkit_core::{CatalogEntry, FurnitureCatalog, LayoutError, PlacementError};
use roomkit_planner::{parse_layout, GridCell, GridGeometry, PlannerState, Room, RoomPoint};
use roomkit_settings::GridSettings;
use std::sync::Arc;

const MODELS: [&str; 3] = ["Chair", "Desk", "Wardrobe"];

#[derive(Debug, Clone)]
enum Op {
    Add { model: usize, row: i32, col: i32 },
    Move { pick: usize, row: i32, col: i32 },
    Rotate { pick: usize },
    Flip { pick: usize },
    Remove { pick: usize },
    Undo,
    Redo,
}

/// Mostly cells near the default grid, sometimes any `i32` at all.
fn coordinate() -> impl Strategy<Value = i32> {
    prop_oneof![4 => -1i32..17, 1 => any::<i32>()]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..MODELS.len(), coordinate(), coordinate())
            .prop_map(|(model, row, col)| Op::Add { model, row, col }),
        3 => (any::<usize>(), coordinate(), coordinate())
            .prop_map(|(pick, row, col)| Op::Move { pick, row, col }),
        1 => any::<usize>().prop_map(|pick| Op::Rotate { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Flip { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn planner() -> PlannerState {
    let catalog = FurnitureCatalog::new()
        .with_entry("Chair", CatalogEntry::new(1, 1))
        .with_entry("Desk", CatalogEntry::new(3, 2).with_initial_rotation(180))
        .with_entry("Wardrobe", CatalogEntry::new(2, 4).with_initial_rotation(-90));
    PlannerState::new(Arc::new(catalog))
}

/// Id of the `pick`-th item, or an id that was never allocated.
fn pick_id(state: &PlannerState, pick: usize) -> u64 {
    let items = state.items();
    if items.is_empty() {
        u64::MAX
    } else {
        items[pick % items.len()].id
    }
}

fn apply(state: &mut PlannerState, op: &Op) {
    match *op {
        Op::Add { model, row, col } => {
            let _ = state.add_item(MODELS[model], row, col);
        }
        Op::Move { pick, row, col } => {
            let id = pick_id(state, pick);
            let _ = state.move_item_to_cell(id, row, col);
        }
        Op::Rotate { pick } => {
            let id = pick_id(state, pick);
            let _ = state.rotate_item(id);
        }
        Op::Flip { pick } => {
            let id = pick_id(state, pick);
            let _ = state.flip_item(id);
        }
        Op::Remove { pick } => {
            let id = pick_id(state, pick);
            state.remove_item(id);
        }
        Op::Undo => {
            state.undo();
        }
        Op::Redo => {
            state.redo();
        }
    }
}

proptest! {
    #[test]
    fn grid_and_room_mapping_are_inverse(
        width in 60.0f64..4000.0,
        height in 60.0f64..4000.0,
        row_frac in 0.0f64..1.0,
        col_frac in 0.0f64..1.0,
    ) {
        let room = Room::new(width, height).unwrap();
        let grid = GridGeometry::new(&room, &GridSettings::default());
        let row = (row_frac * grid.rows() as f64) as i32;
        let col = (col_frac * grid.columns() as f64) as i32;
        let cell = GridCell::new(row, col);

        let point = grid.to_room(cell).unwrap();
        prop_assert_eq!(grid.to_grid(point), Some(cell));
        prop_assert_eq!(grid.to_grid(point).and_then(|c| grid.to_room(c)), Some(point));
    }

    #[test]
    fn room_to_grid_round_trips_any_point(x in -200i32..200, y in -200i32..200) {
        let grid = GridGeometry::new(&Room::default(), &GridSettings::default());
        let point = RoomPoint::new(x, y);
        prop_assert_eq!(grid.to_grid(point).and_then(|c| grid.to_room(c)), Some(point));
    }

    #[test]
    fn mapping_any_i32_never_wraps(row in any::<i32>(), col in any::<i32>()) {
        let grid = GridGeometry::new(&Room::default(), &GridSettings::default());
        let cell = GridCell::new(row, col);
        if let Some(point) = grid.to_room(cell) {
            prop_assert_eq!(i64::from(point.x), i64::from(col) - 8);
            prop_assert_eq!(i64::from(point.y), 8 - i64::from(row));
            prop_assert_eq!(grid.to_grid(point), Some(cell));
        }
    }

    #[test]
    fn add_at_any_cell_is_checked(row in any::<i32>(), col in any::<i32>()) {
        let mut state = planner();
        let inside = (2..14).contains(&row) && (2..14).contains(&col);

        let result = state.add_item("Chair", row, col);
        if inside {
            prop_assert!(result.is_ok());
        } else {
            let is_out_of_bounds = matches!(result, Err(PlacementError::OutOfBounds { .. }));
            prop_assert!(is_out_of_bounds, "{:?} at ({}, {})", result, row, col);
            prop_assert_eq!(state.item_count(), 0);
        }
    }

    #[test]
    fn move_to_any_position_is_checked(x in any::<i32>(), y in any::<i32>()) {
        let mut state = planner();
        let id = state.add_item("Chair", 5, 5).unwrap();
        let row = 8 - i64::from(y);
        let col = i64::from(x) + 8;
        let inside = (2..14).contains(&row) && (2..14).contains(&col);

        let result = state.move_item(id, RoomPoint::new(x, y), None);
        prop_assert_eq!(result.is_ok(), inside, "{:?} to ({}, {})", result, x, y);
        if !inside {
            prop_assert_eq!(state.item(id).unwrap().position, RoomPoint::new(-3, 3));
        }
    }

    #[test]
    fn parse_layout_rejects_unbounded_fields(
        x in any::<i32>(),
        y in any::<i32>(),
        rotation in any::<i32>(),
        initial_rotation in any::<i32>(),
    ) {
        let raw = serde_json::json!({
            "room": {"width": 1000, "height": 1000},
            "items": [{
                "id": 1,
                "model_name": "Chair",
                "width": 1,
                "height": 1,
                "x": x,
                "y": y,
                "rotation": rotation,
                "initial_rotation": initial_rotation
            }]
        })
        .to_string();

        let in_range = |v: i32, limit: i32| v.unsigned_abs() <= limit.unsigned_abs();
        let valid = in_range(x, 1_000_000)
            && in_range(y, 1_000_000)
            && in_range(rotation, 3600)
            && in_range(initial_rotation, 3600)
            && (i64::from(rotation) - i64::from(initial_rotation)) % 90 == 0;

        match parse_layout(&raw) {
            Ok(_) => prop_assert!(valid),
            Err(e) => {
                prop_assert!(!valid, "rejected: {}", e);
                let is_malformed = matches!(e, LayoutError::Malformed { .. });
                prop_assert!(is_malformed);
            }
        }

        let mut state = planner();
        if state.load_layout_str(&raw).is_ok() {
            let rotated = state.rotate_item(1).unwrap();
            prop_assert_eq!((i64::from(rotated) - i64::from(initial_rotation)).rem_euclid(90), 0);
            let _ = state.move_item_to_cell(1, 5, 5);
            let _ = state.misplaced_items();
        }
    }

    #[test]
    fn random_edits_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut state = planner();
        for op in &ops {
            apply(&mut state, op);

            let occupancy = state.occupancy();
            prop_assert!(occupancy.overlapping_pairs().is_empty(), "overlap after {:?}", op);
            prop_assert!(state.misplaced_items().is_empty(), "out of bounds after {:?}", op);

            for item in state.items() {
                let rect = occupancy.footprint_of(item).unwrap();
                prop_assert_eq!(occupancy.first_occupant(&rect, None), Some(item.id));
                prop_assert!(!occupancy.is_occupied(&rect, Some(item.id)));
                prop_assert_eq!((item.rotation - item.initial_rotation).rem_euclid(90), 0);
                prop_assert!(item.relative_rotation() < 360);
            }
        }
    }

    #[test]
    fn ids_are_unique_and_never_reused(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut state = planner();
        let mut issued = std::collections::HashSet::new();
        for op in &ops {
            let before: Vec<u64> = state.items().iter().map(|i| i.id).collect();
            apply(&mut state, op);
            for item in state.items() {
                if !before.contains(&item.id) && matches!(op, Op::Add { .. }) {
                    prop_assert!(issued.insert(item.id), "id {} reused", item.id);
                }
            }
        }
    }
}
