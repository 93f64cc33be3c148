mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from liftspec for tests
pub use liftspec::core::{
    CellInput, Control, EntityRecord, FieldValue, FloorsStep, Grid, GridStep, LiftFloors,
    ProjectStore, SessionState, StepId, StepPage, StepPhase, StoreError, WizardError, WizardStep,
    fields,
};
