use roomkit_core::{CatalogEntry, FurnitureCatalog, LayoutError};
use roomkit_planner::{parse_layout, ExportLayout, LayoutFile, PlannerState, RoomPoint};
use std::sync::Arc;

fn catalog() -> Arc<FurnitureCatalog> {
    Arc::new(
        FurnitureCatalog::new()
            .with_entry(
                "Sofa",
                CatalogEntry::new(3, 2)
                    .with_initial_rotation(90)
                    .with_file_location("/models/sofa/scene.gltf")
                    .with_render(0.01, 0.2),
            )
            .with_entry("Plant", CatalogEntry::new(1, 1)),
    )
}

#[test]
fn test_export_matches_renderer_contract() {
    let mut state = PlannerState::new(catalog());
    let sofa = state.add_item("Sofa", 4, 4).unwrap();
    state.rotate_item(sofa).unwrap();
    state.flip_item(sofa).unwrap();
    state.add_item("Plant", 10, 12).unwrap();

    let json = state.export_layout().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["roomWidth"], 1000.0);
    assert_eq!(value["roomHeight"], 1000.0);
    let items = value["furniturePositions"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    let first = &items[0];
    assert_eq!(first["model_name"], "Sofa");
    assert_eq!(first["file_location"], "/models/sofa/scene.gltf");
    assert_eq!(first["x"], -4);
    assert_eq!(first["y"], -4);
    assert_eq!(first["scaling_factor"], 0.01);
    assert_eq!(first["upwards"], 0.2);
    assert_eq!(first["initial_rotation"], 90);
    assert_eq!(first["rotation"], 180);
    assert_eq!(first["flipped"], true);

    let second = &items[1];
    assert_eq!(second["x"], 4);
    assert_eq!(second["y"], 2);
}

#[test]
fn test_export_parses_back() {
    let mut state = PlannerState::new(catalog());
    state.add_item("Plant", 6, 6).unwrap();

    let export = state.export_layout();
    let parsed: ExportLayout = serde_json::from_str(&export.to_json().unwrap()).unwrap();
    assert_eq!(parsed, export);
}

#[test]
fn test_layout_file_round_trip_through_planner() {
    let mut state = PlannerState::new(catalog());
    state.layout_name = "Den".to_string();
    let sofa = state.add_item("Sofa", 4, 4).unwrap();
    state.move_item(sofa, RoomPoint::new(1, 1), Some(true)).unwrap();
    state.resize_room(1300.0, 900.0).unwrap();

    let file = state.to_layout_file();
    let parsed = parse_layout(&file.to_json().unwrap()).unwrap();
    assert_eq!(parsed.metadata.name, "Den");
    assert_eq!(parsed.to_snapshot().unwrap(), state.snapshot());
}

#[test]
fn test_malformed_load_leaves_state_unchanged() {
    let mut state = PlannerState::new(catalog());
    let id = state.add_item("Plant", 5, 5).unwrap();
    state.rotate_item(id).unwrap();
    let before = state.snapshot();
    let undo_depth = state.history().undo_depth();

    let inputs = [
        "not json",
        "{}",
        r#"{"room": {"width": 1000, "height": 1000}, "items": 3}"#,
        r#"{"room": {"width": 1000, "height": 1000}, "items": [{"id": 1}]}"#,
        r#"{"room": {"width": -1, "height": 1000}, "items": []}"#,
        r#"{"room": {"width": 1000, "height": 1000}, "items": [
            {"id": 1, "model_name": "Plant", "width": 0, "height": 1, "x": 0, "y": 0}
        ]}"#,
        r#"{"room": {"width": 1000, "height": 1000}, "items": [
            {"id": 1, "model_name": "Plant", "width": 1, "height": 1, "x": 0, "y": 0, "rotation": 45}
        ]}"#,
        r#"{"room": {"width": 1000, "height": 1000}, "items": [
            {"id": 1, "model_name": "Plant", "width": 1, "height": 1, "x": 0, "y": 0, "rotation": -2147483648, "initial_rotation": 1}
        ]}"#,
        r#"{"room": {"width": 1000, "height": 1000}, "items": [
            {"id": 1, "model_name": "Plant", "width": 1, "height": 1, "x": 0, "y": -2147483648}
        ]}"#,
        r#"{"room": {"width": 1000, "height": 1000}, "items": [
            {"id": 1, "model_name": "Plant", "width": 1, "height": 1, "x": 0, "y": 0, "rotation": 2147483610}
        ]}"#,
    ];
    for raw in inputs {
        let err = state.load_layout_str(raw).unwrap_err();
        assert!(
            matches!(err, LayoutError::Malformed { .. }),
            "{raw} gave {err:?}"
        );
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.history().undo_depth(), undo_depth);
    }
}

#[test]
fn test_far_loaded_item_is_misplaced_not_fatal() {
    let mut state = PlannerState::new(catalog());
    state
        .load_layout_str(
            r#"{"room": {"width": 1000, "height": 1000}, "items": [
                {"id": 3, "model_name": "Plant", "width": 1, "height": 1, "x": 1000000, "y": -1000000, "rotation": 3600},
                {"id": 4, "model_name": "Plant", "width": 1, "height": 1, "x": -1000000, "y": 1000000}
            ]}"#,
        )
        .unwrap();

    assert_eq!(state.misplaced_items(), vec![3, 4]);
    assert_eq!(state.rotate_item(3).unwrap(), 90);
    state.move_item_to_cell(3, 5, 5).unwrap();
    assert_eq!(state.misplaced_items(), vec![4]);

    let value: serde_json::Value =
        serde_json::from_str(&state.export_layout().to_json().unwrap()).unwrap();
    assert_eq!(value["furniturePositions"][1]["y"], -1000000);
}

#[test]
fn test_loaded_layout_reseeds_history() {
    let mut state = PlannerState::new(catalog());
    state.add_item("Plant", 5, 5).unwrap();

    state
        .load_layout_str(
            r#"{
                "version": "1.0",
                "metadata": {"name": "Loft", "created": "2024-05-01T10:00:00Z", "modified": "2024-05-01T10:00:00Z"},
                "room": {"width": 1200, "height": 800},
                "items": [
                    {"id": 7, "model_name": "Sofa", "width": 3, "height": 2, "x": -2, "y": 1, "rotation": 90, "initial_rotation": 90}
                ]
            }"#,
        )
        .unwrap();

    assert_eq!(state.layout_name, "Loft");
    assert_eq!(state.room().width(), 1200.0);
    assert_eq!(state.item_count(), 1);
    assert!(!state.can_undo());
    assert!(!state.is_modified());

    // Edits on top of the loaded layout undo back to it.
    state.rotate_item(7).unwrap();
    assert!(state.undo());
    assert_eq!(state.item(7).unwrap().rotation, 90);
}

#[test]
fn test_layout_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("furniture_layout.json");

    let mut state = PlannerState::new(catalog());
    state.add_item("Sofa", 4, 4).unwrap();
    state.save_to_file(&path).unwrap();

    let loaded = LayoutFile::load_from_file(&path).unwrap();
    assert_eq!(loaded.items.len(), 1);
    assert_eq!(loaded.items[0].model_name, "Sofa");

    std::fs::write(&path, "{").unwrap();
    assert!(LayoutFile::load_from_file(&path).is_err());
    assert!(state.load_from_file(&path).is_err());
    assert_eq!(state.item_count(), 1);
}
