use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use tracing::{debug, info, warn};

use super::{ProjectDocument, SessionState};

const PROJECT_EXTENSION: &str = "json";

/// Date part of generated file names, `YYMMDD`.
const STAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year repr:last_two][month][day]");

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} is not a valid project file: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("a project named {0:?} already exists")]
    AlreadyExists(String),
    #[error("{0:?} is not a usable project name")]
    InvalidName(String),
    #[error("failed to encode project: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to format a timestamp: {0}")]
    Time(String),
}

impl StoreError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// One entry of the recent projects listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentProject {
    pub name: String,
    pub path: PathBuf,
    pub created: Option<OffsetDateTime>,
    pub modified: OffsetDateTime,
}

impl RecentProject {
    pub fn created_label(&self) -> String {
        self.created
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn modified_label(&self) -> String {
        format_timestamp(self.modified)
    }
}

/// `YYYY-MM-DD HH:MM:SS` in local time, falling back to UTC when the local
/// offset cannot be determined.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    at.to_offset(offset)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not format timestamp");
            String::new()
        })
}

/// Directory of JSON project files.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
    prefix: String,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        let file = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{name}.{PROJECT_EXTENSION}")
        };
        self.root.join(file)
    }

    /// Start an unsaved project. Nothing is written until the first save.
    pub fn new_project(&self, name: &str) -> Result<SessionState, StoreError> {
        let name = name.trim();
        let name = name.strip_suffix(".json").unwrap_or(name);
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        if self.path_for(name).exists() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        info!(project = name, "created new project");
        Ok(SessionState::new(Some(name.to_string())))
    }

    /// Load a project by name or by path. A bare name is looked up in the
    /// store first and only read from the working directory when the store
    /// has no such project.
    pub fn open(&self, name_or_path: impl AsRef<Path>) -> Result<SessionState, StoreError> {
        let given = name_or_path.as_ref();
        if given.components().count() == 1 {
            let stored = self.path_for(&given.to_string_lossy());
            if stored.exists() || !given.exists() {
                return self.load(stored);
            }
        }
        self.load(given)
    }

    /// Read a whole project file. The state is named after the file stem.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SessionState, StoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let mut document: ProjectDocument =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(stem) = path.file_stem() {
            document.file_name = Some(stem.to_string_lossy().into_owned());
        }
        info!(?path, "loaded project");
        Ok(SessionState::from_document(document))
    }

    /// Where `save` would write `state` right now.
    pub fn target_path(&self, state: &SessionState) -> Result<PathBuf, StoreError> {
        match state.file_name() {
            Some(name) => Ok(self.path_for(name)),
            None => self.generate_file_name(today()),
        }
    }

    /// Write the whole document, overwriting any previous file. An unnamed
    /// state takes the generated file stem as its name.
    pub fn save(&self, state: &mut SessionState) -> Result<PathBuf, StoreError> {
        let path = self.target_path(state)?;
        if state.file_name().is_none()
            && let Some(stem) = path.file_stem()
        {
            state.set_file_name(stem.to_string_lossy());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string(state.document()).map_err(StoreError::Encode)?;
        fs::write(&path, json).map_err(|e| StoreError::io(&path, e))?;
        info!(?path, revision = state.revision(), "saved project");
        Ok(path)
    }

    /// First unused `<YYMMDD>_<prefix>_<n>.json`, counting `n` from 1.
    pub fn generate_file_name(&self, date: Date) -> Result<PathBuf, StoreError> {
        let stamp = date
            .format(STAMP_FORMAT)
            .map_err(|e| StoreError::Time(e.to_string()))?;
        let mut n = 1u32;
        loop {
            let candidate = self
                .root
                .join(format!("{stamp}_{}_{n}.{PROJECT_EXTENSION}", self.prefix));
            if !candidate.exists() {
                debug!(?candidate, "generated project file name");
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// All project files, most recently modified first.
    pub fn list_recent(&self) -> Result<Vec<RecentProject>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.root, e)),
        };
        let mut projects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PROJECT_EXTENSION) {
                continue;
            }
            let metadata = entry.metadata().map_err(|e| StoreError::io(&path, e))?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().map_err(|e| StoreError::io(&path, e))?;
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            projects.push(RecentProject {
                name,
                created: metadata.created().ok().map(OffsetDateTime::from),
                modified: OffsetDateTime::from(modified),
                path,
            });
        }
        projects.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(projects)
    }
}

fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
