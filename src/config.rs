use std::path::PathBuf;

use anyhow::Context;

use crate::core::ProjectStore;

pub const PROJECTS_DIR_ENV: &str = "LIFTSPEC_PROJECTS_DIR";
pub const DEFAULT_FILE_PREFIX: &str = "LiftDesigner";

/// Runtime settings. The projects directory defaults to
/// `~/LiftDesigner/Projects`; the CLI passes `--projects-dir` or the
/// `LIFTSPEC_PROJECTS_DIR` environment variable through `projects_dir`.
#[derive(Debug, Clone)]
pub struct Config {
    pub projects_dir: PathBuf,
    /// Middle part of generated file names, `<YYMMDD>_<prefix>_<n>.json`.
    pub file_prefix: String,
}

impl Config {
    pub fn resolve(projects_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let projects_dir = match projects_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .context("could not determine the home directory; pass --projects-dir")?
                .join("LiftDesigner")
                .join("Projects"),
        };
        Ok(Self {
            projects_dir,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        })
    }

    pub fn store(&self) -> ProjectStore {
        ProjectStore::new(&self.projects_dir, &self.file_prefix)
    }
}
