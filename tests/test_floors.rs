//! Integration tests for the floor levels step.
//!
//! Tests cover:
//! - Row generation from per-lift stop counts
//! - Defaulting and reporting invalid stop counts
//! - Showing previously saved floors
//! - The nested shape of the collected floors section

mod common;

use liftspec::core::wizard::{FloorRow, StopCountWarning};

use common::*;

#[test]
fn test_rows_follow_stop_counts() -> anyhow::Result<()> {
    let state = make_session("Rows", 2, &["2", "3"]);
    let floors = FloorsStep::open(&state)?;

    assert_eq!(floors.stops(), &[2, 3]);
    assert_eq!(floors.row_count(), 5);
    assert_eq!(floors.phase(), StepPhase::Unpopulated);

    let rows: Vec<FloorRow> = floors.rows().collect();
    assert_eq!(
        rows.iter().map(|r| (r.lift, r.floor, r.column)).collect::<Vec<_>>(),
        vec![(1, 1, 0), (1, 2, 1), (2, 1, 2), (2, 2, 3), (2, 3, 4)]
    );

    Ok(())
}

#[test]
fn test_invalid_stop_count_defaults_to_one() -> anyhow::Result<()> {
    let state = make_session("Defaults", 2, &["3", ""]);
    let floors = FloorsStep::open(&state)?;

    assert_eq!(floors.stops(), &[3, 1]);
    assert_eq!(floors.row_count(), 4);
    assert_eq!(
        floors.warnings(),
        &[StopCountWarning {
            lift: 2,
            given: String::new(),
        }]
    );
    assert_eq!(
        floors.warnings()[0].to_string(),
        "Invalid number of stops for Lift 2 (\"\"). Defaulting to 1 stop."
    );

    Ok(())
}

#[test]
fn test_every_kind_of_bad_stop_count_warns() -> anyhow::Result<()> {
    let mut state = make_session("Bad", 4, &["abc", "0", "2.5"]);
    let mut records = state
        .records(StepId::LiftSystems)
        .unwrap_or_default()
        .to_vec();
    // Fourth lift has no stops field at all
    records.push(EntityRecord::new().with("System Type", "Service Lift"));
    state.set_records(StepId::LiftSystems, records);

    let floors = FloorsStep::open(&state)?;
    assert_eq!(floors.stops(), &[1, 1, 1, 1]);
    let lifts: Vec<_> = floors.warnings().iter().map(|w| w.lift).collect();
    assert_eq!(lifts, vec![1, 2, 3, 4]);
    assert_eq!(floors.warnings()[0].given, "abc");

    Ok(())
}

#[test]
fn test_collect_nests_floors_by_lift() -> anyhow::Result<()> {
    let state = make_session("Collect", 2, &["2", "1"]);
    let mut floors = FloorsStep::open(&state)?;

    // Field 0 is Floor Name, 1 is Height (m), 2 is Entrances
    assert!(floors.edit(0, 0, CellInput::Text("Ground".into())));
    assert!(floors.edit(0, 1, CellInput::Text("0.0".into())));
    assert!(floors.edit(1, 0, CellInput::Text("First".into())));
    assert!(floors.edit(2, 2, CellInput::OptionChecked { index: 1, checked: true }));
    assert!(!floors.edit(0, 1, CellInput::Text("tall".into())));
    assert_eq!(floors.phase(), StepPhase::Populated);

    let lifts = floors.collect();
    assert_eq!(lifts.len(), 2);
    assert_eq!(lifts[0].lift, "Lift 1");
    assert_eq!(lifts[0].floors.len(), 2);
    assert_eq!(lifts[1].lift, "Lift 2");
    assert_eq!(lifts[1].floors.len(), 1);

    let ground = &lifts[0].floors[0];
    assert_eq!(
        ground.keys().collect::<Vec<_>>(),
        vec!["Floor", "Floor Name", "Height (m)", "Entrances"]
    );
    assert_eq!(ground.get("Floor"), Some(&FieldValue::from("1")));
    assert_eq!(ground.get("Height (m)"), Some(&FieldValue::from("0.0")));
    assert_eq!(lifts[0].floors[1].get("Floor"), Some(&FieldValue::from("2")));
    assert_eq!(
        lifts[1].floors[0].get("Entrances"),
        Some(&FieldValue::List(vec!["Rear".to_string()]))
    );

    let json = serde_json::to_value(&lifts)?;
    assert_eq!(json[0]["Lift 1"][1]["Floor Name"], "First");
    assert_eq!(json[1]["Lift 2"][0]["Floor"], "1");

    Ok(())
}

#[test]
fn test_saved_floors_are_shown_by_position() -> anyhow::Result<()> {
    let mut state = make_session("Saved", 2, &["2", "2"]);
    state.set_floors(vec![
        LiftFloors {
            lift: "Lift 1".into(),
            floors: vec![
                EntityRecord::new().with("Floor", "1").with("Floor Name", "Lobby"),
                EntityRecord::new().with("Floor", "2").with("Floor Name", "Office"),
                EntityRecord::new().with("Floor", "3").with("Floor Name", "Roof"),
            ],
        },
        LiftFloors {
            lift: "Lift 2".into(),
            floors: vec![
                EntityRecord::new()
                    .with("Floor Name", "Basement")
                    .with("Entrances", vec!["Front".to_string(), "Side".to_string()]),
            ],
        },
    ]);

    let floors = FloorsStep::open(&state)?;
    assert_eq!(floors.phase(), StepPhase::Populated);

    let lifts = floors.collect();
    let names: Vec<_> = lifts
        .iter()
        .flat_map(|lift| &lift.floors)
        .map(|floor| floor.get("Floor Name").map(FieldValue::to_text).unwrap_or_default())
        .collect();
    // Roof no longer fits in two stops; lift 2 floor 2 was never saved
    assert_eq!(names, vec!["Lobby", "Office", "Basement", ""]);
    assert_eq!(
        lifts[1].floors[0].get("Entrances"),
        Some(&FieldValue::List(vec!["Front".to_string(), "Side".to_string()]))
    );

    Ok(())
}

#[test]
fn test_commit_writes_the_floors_section() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    let state = make_session("Commit", 1, &["3"]);
    let floors = FloorsStep::open(&state)?;

    let handoff = floors
        .save_and_proceed(state, &store)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    assert_eq!(handoff.next, None);
    let saved = handoff.state.floors().unwrap_or_default();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].floors.len(), 3);

    let reloaded = store.load(&handoff.saved_to)?;
    assert_eq!(reloaded.floors(), handoff.state.floors());

    Ok(())
}
