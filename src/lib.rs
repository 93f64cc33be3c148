pub mod config;
pub mod core;

pub use config::Config;
pub use core::{
    EntityRecord, FieldValue, Grid, GridStep, FloorsStep, ProjectStore, SessionState, StepId,
    StepPage, WizardStep,
};

#[cfg(feature = "gui")]
pub mod gui;
