pub mod fields;
pub mod grid;
pub mod project;
pub mod record;
pub mod schema;
pub mod wizard;

pub use grid::{CellInput, Control, Grid};
pub use project::{LiftFloors, ProjectDocument, ProjectStore, RecentProject, SessionState, StoreError};
pub use record::{EntityRecord, FieldValue};
pub use schema::{FieldDescriptor, FieldKind, Schema, SchemaError};
pub use wizard::{
    FloorsStep, GridStep, Handoff, SaveFailed, StepId, StepPage, StepPhase, WizardError,
    WizardStep,
};
