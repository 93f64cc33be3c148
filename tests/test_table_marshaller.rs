//! Integration tests for moving records in and out of control grids.
//!
//! Tests cover:
//! - Building grids with default controls per field kind
//! - Populating from saved records, including values that need coercion
//! - Collecting records back in schema order
//! - Routing user edits and rejecting ones that do not fit the control
//! - Adding and removing lift columns

mod common;

use liftspec::core::{FieldDescriptor, Schema};

use common::*;

fn sample_schema() -> anyhow::Result<Schema> {
    Ok(Schema::new(vec![
        FieldDescriptor::text("Name"),
        FieldDescriptor::numeric("Speed (m/s)"),
        FieldDescriptor::select("Kind", &["Passenger", "Freight"]),
        FieldDescriptor::boolean("Open-through"),
        FieldDescriptor::multi_select("Entrances", &["Front", "Rear", "Side"]),
    ])?)
}

#[test]
fn test_fresh_grid_collects_defaults() -> anyhow::Result<()> {
    let grid = Grid::build(sample_schema()?, 2);
    assert_eq!(grid.row_count(), 5);
    assert_eq!(grid.column_count(), 2);
    assert_eq!(Grid::column_header(1), "Lift 2");

    let records = grid.collect();
    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        vec!["Name", "Speed (m/s)", "Kind", "Open-through", "Entrances"]
    );
    assert_eq!(first.get("Name"), Some(&FieldValue::from("")));
    assert_eq!(first.get("Kind"), Some(&FieldValue::from("Passenger")));
    assert_eq!(first.get("Open-through"), Some(&FieldValue::Bool(false)));
    assert_eq!(first.get("Entrances"), Some(&FieldValue::List(Vec::new())));

    Ok(())
}

#[test]
fn test_populate_then_collect_keeps_values() -> anyhow::Result<()> {
    let mut grid = Grid::build(sample_schema()?, 2);
    let records = vec![
        EntityRecord::new()
            .with("Name", "A")
            .with("Speed (m/s)", "1.6")
            .with("Kind", "Freight")
            .with("Open-through", true)
            .with("Entrances", vec!["Front".to_string(), "Side".to_string()]),
        EntityRecord::new().with("Name", "B"),
    ];
    grid.populate(&records);

    let collected = grid.collect();
    assert_eq!(collected[0], records[0]);
    assert_eq!(collected[1].get("Name"), Some(&FieldValue::from("B")));
    assert_eq!(collected[1].get("Kind"), Some(&FieldValue::from("Passenger")));

    Ok(())
}

#[test]
fn test_populate_coerces_stored_values() -> anyhow::Result<()> {
    let mut grid = Grid::build(sample_schema()?, 1);
    let record: EntityRecord = serde_json::from_str(
        r#"{"Name": 42, "Speed (m/s)": 2.5, "Kind": "Unknown", "Open-through": "no", "Entrances": "Rear"}"#,
    )?;
    grid.populate(std::slice::from_ref(&record));

    assert_eq!(grid.cell(0, 0), Some(&Control::Text("42".into())));
    assert_eq!(grid.cell(1, 0), Some(&Control::Numeric("2.5".into())));
    // Unknown option leaves the default selection
    assert!(matches!(grid.cell(2, 0), Some(Control::Select { selected: 0, .. })));
    assert_eq!(grid.cell(3, 0), Some(&Control::Toggle(false)));
    assert!(matches!(
        grid.cell(4, 0),
        Some(Control::MultiSelect { checked, .. }) if checked == &vec![false, true, false]
    ));

    Ok(())
}

#[test]
fn test_extra_records_and_unknown_fields_are_ignored() -> anyhow::Result<()> {
    let mut grid = Grid::build(sample_schema()?, 1);
    let records = vec![
        EntityRecord::new().with("Name", "kept").with("Colour", "red"),
        EntityRecord::new().with("Name", "dropped"),
    ];
    grid.populate(&records);

    let collected = grid.collect();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].get("Name"), Some(&FieldValue::from("kept")));
    assert!(!collected[0].contains("Colour"));

    Ok(())
}

#[test]
fn test_edits_are_validated() -> anyhow::Result<()> {
    let mut grid = Grid::build(sample_schema()?, 1);

    assert!(grid.apply(0, 0, CellInput::Text("Main lift".into())));
    assert!(grid.apply(1, 0, CellInput::Text("1.".into())));
    assert!(!grid.apply(1, 0, CellInput::Text("1.x".into())));
    assert!(grid.apply(2, 0, CellInput::Choice(1)));
    assert!(!grid.apply(2, 0, CellInput::Choice(7)));
    assert!(grid.apply(3, 0, CellInput::Checked(true)));
    assert!(grid.apply(4, 0, CellInput::OptionChecked { index: 2, checked: true }));
    assert!(!grid.apply(4, 0, CellInput::OptionChecked { index: 3, checked: true }));
    // Wrong input type for the control
    assert!(!grid.apply(3, 0, CellInput::Text("yes".into())));
    // Out of range
    assert!(!grid.apply(9, 0, CellInput::Text("x".into())));
    assert!(!grid.apply(0, 4, CellInput::Text("x".into())));

    let record = grid.collect_column(0).expect("column 0 exists");
    assert_eq!(record.get("Name"), Some(&FieldValue::from("Main lift")));
    assert_eq!(record.get("Speed (m/s)"), Some(&FieldValue::from("1.")));
    assert_eq!(record.get("Kind"), Some(&FieldValue::from("Freight")));
    assert_eq!(record.get("Open-through"), Some(&FieldValue::Bool(true)));
    assert_eq!(
        record.get("Entrances"),
        Some(&FieldValue::List(vec!["Side".to_string()]))
    );

    Ok(())
}

#[test]
fn test_columns_grow_and_shrink_but_never_vanish() -> anyhow::Result<()> {
    let mut grid = Grid::build(sample_schema()?, 1);
    grid.add_column();
    assert_eq!(grid.column_count(), 2);
    assert!(grid.apply(0, 1, CellInput::Text("new".into())));

    assert!(grid.remove_column());
    assert_eq!(grid.column_count(), 1);

    // The removed lift no longer appears in the collected section
    let records = grid.collect();
    assert_eq!(records.len(), 1);
    assert!(
        records
            .iter()
            .all(|record| record.get("Name") != Some(&FieldValue::from("new")))
    );

    assert!(!grid.remove_column());
    assert_eq!(grid.column_count(), 1);
    assert_eq!(grid.collect().len(), 1);

    Ok(())
}

#[test]
fn test_step_schemas_match_field_tables() {
    let grid = Grid::build(StepId::LiftSystems.schema(), 1);
    assert_eq!(grid.row_count(), fields::LIFT_SYSTEM_FIELDS.len());
    assert!(grid.labels().any(|label| label == fields::STOPS_FIELD));

    let floors = StepId::Floors.schema();
    assert_eq!(
        floors.names().collect::<Vec<_>>(),
        vec!["Floor Name", "Height (m)", "Entrances"]
    );
}
