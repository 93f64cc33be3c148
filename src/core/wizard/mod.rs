mod floors;

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::{
    fields,
    grid::{CellInput, Grid},
    project::{ProjectStore, SessionState, StoreError},
    schema::Schema,
};

pub use floors::{FloorRow, FloorsStep, StopCountWarning};

/// The wizard pages, in the order they are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepId {
    BuildingSystems,
    LiftSystems,
    LiftDrive,
    Forces,
    Compliance,
    Emergency,
    Floors,
}

impl StepId {
    pub const ALL: [StepId; 7] = [
        StepId::BuildingSystems,
        StepId::LiftSystems,
        StepId::LiftDrive,
        StepId::Forces,
        StepId::Compliance,
        StepId::Emergency,
        StepId::Floors,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            StepId::BuildingSystems => "Building System Information",
            StepId::LiftSystems => "Lift System Specifications",
            StepId::LiftDrive => "Lift Drive and Control Specifications",
            StepId::Forces => "Force Specifications",
            StepId::Compliance => "Lift Compliance and Safety Standards",
            StepId::Emergency => "Lift Emergency and Safety Systems",
            StepId::Floors => "Building Floor Levels",
        }
    }

    /// Key of this step's section in the project file.
    pub fn section_name(self) -> &'static str {
        match self {
            StepId::BuildingSystems => "BuildingSystems",
            StepId::LiftSystems => "LiftSystems",
            StepId::LiftDrive => "LiftDrive",
            StepId::Forces => "Forces",
            StepId::Compliance => "Compliance",
            StepId::Emergency => "Emergency",
            StepId::Floors => "Floors",
        }
    }

    pub fn schema(self) -> Schema {
        Schema::from_static(match self {
            StepId::BuildingSystems => fields::BUILDING_SYSTEM_FIELDS,
            StepId::LiftSystems => fields::LIFT_SYSTEM_FIELDS,
            StepId::LiftDrive => fields::LIFT_DRIVE_FIELDS,
            StepId::Forces => fields::FORCE_FIELDS,
            StepId::Compliance => fields::COMPLIANCE_FIELDS,
            StepId::Emergency => fields::EMERGENCY_FIELDS,
            StepId::Floors => fields::FLOOR_FIELDS,
        })
    }

    /// Section that must already be saved before this step can be built.
    pub fn prerequisite(self) -> Option<StepId> {
        match self {
            StepId::BuildingSystems => None,
            StepId::Floors => Some(StepId::LiftSystems),
            _ => Some(StepId::BuildingSystems),
        }
    }

    /// Only the first step decides how many lifts there are.
    pub fn allows_resize(self) -> bool {
        self == StepId::BuildingSystems
    }

    pub fn next(self) -> Option<StepId> {
        StepId::ALL.get(self.index() + 1).copied()
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.index() + 1, self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    Unpopulated,
    Populated,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("{step} needs the {} section to be saved first", .requires.section_name())]
    MissingPrerequisite { step: StepId, requires: StepId },
    #[error("{0} is not a table step")]
    NotATableStep(StepId),
    #[error("{0} has a fixed number of lifts")]
    FixedEntityCount(StepId),
}

/// A failed save. Carries the state back so the caller can retry.
#[derive(Debug, thiserror::Error)]
#[error("failed to save project: {source}")]
pub struct SaveFailed {
    pub state: SessionState,
    #[source]
    pub source: StoreError,
}

/// Result of a successful "Save and Proceed".
#[derive(Debug)]
pub struct Handoff {
    pub state: SessionState,
    pub saved_to: PathBuf,
    pub next: Option<StepId>,
}

pub trait WizardStep {
    fn id(&self) -> StepId;

    fn phase(&self) -> StepPhase;

    /// Write this step's collected section into `state`.
    fn commit(&self, state: &mut SessionState);

    /// Collect, store the section, persist, and hand the state on.
    fn save_and_proceed(
        &self,
        mut state: SessionState,
        store: &ProjectStore,
    ) -> Result<Handoff, SaveFailed> {
        self.commit(&mut state);
        match store.save(&mut state) {
            Ok(saved_to) => Ok(Handoff {
                state,
                saved_to,
                next: self.id().next(),
            }),
            Err(source) => Err(SaveFailed { state, source }),
        }
    }
}

fn require(step: StepId, state: &SessionState) -> Result<(), WizardError> {
    match step.prerequisite() {
        Some(requires) if !state.has_section(requires) => {
            Err(WizardError::MissingPrerequisite { step, requires })
        }
        _ => Ok(()),
    }
}

/// Any table step other than floors: one column per lift.
#[derive(Debug, Clone)]
pub struct GridStep {
    id: StepId,
    grid: Grid,
    phase: StepPhase,
}

impl GridStep {
    pub fn open(id: StepId, state: &SessionState) -> Result<Self, WizardError> {
        if id == StepId::Floors {
            return Err(WizardError::NotATableStep(id));
        }
        require(id, state)?;

        let existing = state.records(id);
        let lifts = match id {
            StepId::BuildingSystems => existing.map_or(0, <[_]>::len),
            _ => state.entity_count().unwrap_or(0),
        }
        .max(1);

        let mut grid = Grid::build(id.schema(), lifts);
        let phase = match existing {
            Some(records) => {
                if records.len() != lifts {
                    warn!(
                        step = id.section_name(),
                        saved = records.len(),
                        lifts,
                        "saved section does not match the number of lifts"
                    );
                }
                grid.populate(records);
                StepPhase::Populated
            }
            None => StepPhase::Unpopulated,
        };
        debug!(step = id.section_name(), lifts, ?phase, "opened step");
        Ok(Self { id, grid, phase })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn edit(&mut self, row: usize, col: usize, input: CellInput) -> bool {
        let accepted = self.grid.apply(row, col, input);
        if accepted {
            self.phase = StepPhase::Populated;
        }
        accepted
    }

    pub fn add_lift(&mut self) -> Result<(), WizardError> {
        if !self.id.allows_resize() {
            return Err(WizardError::FixedEntityCount(self.id));
        }
        self.grid.add_column();
        Ok(())
    }

    pub fn remove_lift(&mut self) -> Result<bool, WizardError> {
        if !self.id.allows_resize() {
            return Err(WizardError::FixedEntityCount(self.id));
        }
        Ok(self.grid.remove_column())
    }
}

impl WizardStep for GridStep {
    fn id(&self) -> StepId {
        self.id
    }

    fn phase(&self) -> StepPhase {
        self.phase
    }

    fn commit(&self, state: &mut SessionState) {
        state.set_records(self.id, self.grid.collect());
    }
}

/// Either kind of wizard page.
#[derive(Debug, Clone)]
pub enum StepPage {
    Grid(GridStep),
    Floors(FloorsStep),
}

impl StepPage {
    pub fn open(id: StepId, state: &SessionState) -> Result<Self, WizardError> {
        match id {
            StepId::Floors => FloorsStep::open(state).map(StepPage::Floors),
            other => GridStep::open(other, state).map(StepPage::Grid),
        }
    }

    pub fn step(&self) -> &dyn WizardStep {
        match self {
            StepPage::Grid(step) => step,
            StepPage::Floors(step) => step,
        }
    }
}

/// A saved section whose size no longer matches what its step would build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSection {
    pub step: StepId,
    pub saved: usize,
    pub expected: usize,
}

/// Sections left stale by later edits to the lift count or stop counts.
/// Nothing is reconciled; the caller decides what to do.
pub fn stale_sections(state: &SessionState) -> Vec<StaleSection> {
    let mut stale = Vec::new();
    let lifts = state.entity_count().unwrap_or(0).max(1);
    for step in &StepId::ALL[1..StepId::Floors.index()] {
        if let Some(records) = state.records(*step)
            && records.len() != lifts
        {
            stale.push(StaleSection {
                step: *step,
                saved: records.len(),
                expected: lifts,
            });
        }
    }
    if let (Some(saved), Ok(floors)) = (state.floors(), FloorsStep::open(state)) {
        let saved_floors: usize = saved.iter().map(|lift| lift.floors.len()).sum();
        let saved_counts = saved.iter().map(|lift| lift.floors.len());
        let expected_counts = floors.stops().iter().copied();
        if !saved_counts.eq(expected_counts) {
            stale.push(StaleSection {
                step: StepId::Floors,
                saved: saved_floors,
                expected: floors.row_count(),
            });
        }
    }
    stale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_run_in_declaration_order() {
        let mut step = StepId::BuildingSystems;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            assert!(next > step);
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, StepId::ALL);
    }

    #[test]
    fn display_matches_sidebar_labels() {
        assert_eq!(StepId::Forces.to_string(), "4. Force Specifications");
        assert_eq!(StepId::Floors.to_string(), "7. Building Floor Levels");
    }
}
