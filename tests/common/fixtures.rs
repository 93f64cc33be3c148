use liftspec::core::{EntityRecord, ProjectStore, SessionState, StepId, fields::STOPS_FIELD};

pub const TEST_PREFIX: &str = "LiftDesigner";

/// Creates a ProjectStore rooted in a fresh temporary directory.
/// Returns both the store and the temp directory (which must be kept alive).
pub fn create_test_store() -> (ProjectStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let store = ProjectStore::new(dir.path().join("Projects"), TEST_PREFIX);
    (store, dir)
}

/// Building systems record for lift `n` (1-based).
pub fn make_building_record(n: usize) -> EntityRecord {
    EntityRecord::new()
        .with("Number", n.to_string())
        .with("System Name", format!("L{n}"))
        .with("Building Part", "North Wing")
}

/// Lift systems record with the given stop count as typed by the user.
pub fn make_lift_record(stops: &str) -> EntityRecord {
    EntityRecord::new()
        .with("System Type", "Passenger Lift")
        .with("Load capacity (kg)", "1000")
        .with(STOPS_FIELD, stops)
        .with("Open-through", true)
}

/// A named session with `lifts` building records and one lift systems
/// record per entry of `stops`.
pub fn make_session(name: &str, lifts: usize, stops: &[&str]) -> SessionState {
    let mut state = SessionState::new(Some(name.to_string()));
    state.set_records(
        StepId::BuildingSystems,
        (1..=lifts).map(make_building_record).collect(),
    );
    if !stops.is_empty() {
        state.set_records(
            StepId::LiftSystems,
            stops.iter().map(|s| make_lift_record(s)).collect(),
        );
    }
    state
}
