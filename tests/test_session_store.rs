//! Integration tests for the JSON project store.
//!
//! Tests cover:
//! - Starting new projects and rejecting duplicate or unusable names
//! - Save/load cycles, including keys written by other tools
//! - Generated file names for unnamed projects
//! - Listing recent projects
//! - Malformed project files

mod common;

use std::{
    fs,
    time::{Duration, SystemTime},
};

use time::{Date, Month};

use common::*;

#[test]
fn test_new_project_writes_nothing_until_saved() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();

    let mut state = store.new_project("Tower A")?;
    assert_eq!(state.file_name(), Some("Tower A"));
    assert!(store.list_recent()?.is_empty());

    let path = store.save(&mut state)?;
    assert_eq!(path, store.root().join("Tower A.json"));
    assert!(path.exists());

    // The same name cannot be started twice, with or without the extension
    assert!(matches!(
        store.new_project("Tower A"),
        Err(StoreError::AlreadyExists(_))
    ));
    assert!(matches!(
        store.new_project("Tower A.json"),
        Err(StoreError::AlreadyExists(_))
    ));

    Ok(())
}

#[test]
fn test_unusable_names_are_rejected() {
    let (store, _temp_dir) = create_test_store();
    for name in ["", "   ", ".", "..", "a/b", "a\\b", ".json"] {
        assert!(
            matches!(store.new_project(name), Err(StoreError::InvalidName(_))),
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn test_save_and_load_round_trip() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    let mut state = make_session("Depot", 2, &["3", "5"]);
    state.set_floors(vec![LiftFloors {
        lift: "Lift 1".into(),
        floors: vec![EntityRecord::new().with("Floor", "1").with("Floor Name", "Ground")],
    }]);
    let path = store.save(&mut state)?;

    let loaded = store.load(&path)?;
    assert_eq!(loaded.file_name(), Some("Depot"));
    assert_eq!(loaded.records(StepId::BuildingSystems), state.records(StepId::BuildingSystems));
    assert_eq!(loaded.records(StepId::LiftSystems), state.records(StepId::LiftSystems));
    assert_eq!(loaded.floors(), state.floors());
    assert_eq!(loaded.entity_count(), Some(2));
    assert!(!loaded.has_section(StepId::LiftDrive));

    // Bare names are looked up in the store, paths are used as given
    assert_eq!(store.open("Depot")?.document(), loaded.document());
    assert_eq!(store.open(&path)?.document(), loaded.document());

    Ok(())
}

#[test]
fn test_saved_file_uses_section_keys() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    let mut state = make_session("Keys", 1, &["2"]);
    let path = store.save(&mut state)?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(json["FileName"], "Keys");
    assert_eq!(json["BuildingSystems"][0]["System Name"], "L1");
    assert_eq!(json["LiftSystems"][0]["Stops (pcs.)"], "2");
    assert_eq!(json["LiftSystems"][0]["Open-through"], true);
    assert!(json.get("Floors").is_none());

    Ok(())
}

#[test]
fn test_unknown_keys_are_preserved() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    fs::create_dir_all(store.root())?;
    let path = store.root().join("Legacy.json");
    fs::write(
        &path,
        r#"{"FileName":"Legacy","BuildingSystems":[{"Number":"1"}],"Revision":"C","Notes":["check shaft"]}"#,
    )?;

    let mut state = store.load(&path)?;
    state.set_records(StepId::LiftSystems, vec![make_lift_record("4")]);
    store.save(&mut state)?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(json["Revision"], "C");
    assert_eq!(json["Notes"][0], "check shaft");
    assert_eq!(json["LiftSystems"][0]["Stops (pcs.)"], "4");

    Ok(())
}

#[test]
fn test_generated_names_count_up() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    let date = Date::from_calendar_date(2024, Month::March, 5)?;

    let first = store.generate_file_name(date)?;
    assert_eq!(first, store.root().join("240305_LiftDesigner_1.json"));
    // Nothing written yet, so asking again gives the same name
    assert_eq!(store.generate_file_name(date)?, first);

    fs::create_dir_all(store.root())?;
    fs::write(&first, "{}")?;
    let second = store.generate_file_name(date)?;
    assert_eq!(second, store.root().join("240305_LiftDesigner_2.json"));

    Ok(())
}

#[test]
fn test_unnamed_state_keeps_its_generated_name() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    let mut state = SessionState::new(None);
    state.set_records(StepId::BuildingSystems, vec![make_building_record(1)]);

    let first = store.save(&mut state)?;
    let stem = first
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    assert!(stem.ends_with("_LiftDesigner_1"), "unexpected name {stem}");
    assert_eq!(state.file_name(), Some(stem.as_str()));

    // Later saves overwrite the same file instead of generating another
    state.set_records(StepId::LiftSystems, vec![make_lift_record("2")]);
    let second = store.save(&mut state)?;
    assert_eq!(first, second);
    assert_eq!(store.list_recent()?.len(), 1);

    Ok(())
}

#[test]
fn test_list_recent_sorts_by_modification() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    assert!(store.list_recent()?.is_empty(), "missing directory lists as empty");

    let mut older = make_session("Older", 1, &[]);
    let mut newer = make_session("Newer", 1, &[]);
    let older_path = store.save(&mut older)?;
    let newer_path = store.save(&mut newer)?;
    fs::write(store.root().join("notes.txt"), "not a project")?;

    let now = SystemTime::now();
    fs::File::options()
        .write(true)
        .open(&older_path)?
        .set_modified(now - Duration::from_secs(3600))?;
    fs::File::options()
        .write(true)
        .open(&newer_path)?
        .set_modified(now)?;

    let recent = store.list_recent()?;
    let names: Vec<_> = recent.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Newer", "Older"]);
    assert_eq!(recent[0].path, newer_path);
    let label = recent[0].modified_label();
    assert_eq!(label.len(), "2024-01-01 00:00:00".len());
    assert!(
        label
            .chars()
            .enumerate()
            .all(|(i, c)| match i {
                4 | 7 => c == '-',
                10 => c == ' ',
                13 | 16 => c == ':',
                _ => c.is_ascii_digit(),
            }),
        "unexpected timestamp {label}"
    );

    Ok(())
}

#[test]
fn test_malformed_file_is_reported() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store();
    fs::create_dir_all(store.root())?;
    let path = store.root().join("Broken.json");
    fs::write(&path, "{ not json")?;

    assert!(matches!(store.load(&path), Err(StoreError::Malformed { .. })));
    assert!(matches!(
        store.open("Missing"),
        Err(StoreError::Io { .. })
    ));

    Ok(())
}
