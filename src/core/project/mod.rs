mod store;

use std::{collections::BTreeMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::core::{record::EntityRecord, wizard::StepId};

pub use store::{ProjectStore, RecentProject, StoreError};

/// Floor records of one lift, saved as `{"Lift N": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftFloors {
    pub lift: String,
    pub floors: Vec<EntityRecord>,
}

impl Serialize for LiftFloors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.lift, &self.floors)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for LiftFloors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LiftFloorsVisitor;

        impl<'de> Visitor<'de> for LiftFloorsVisitor {
            type Value = LiftFloors;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with a single lift key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let Some((lift, floors)) = access.next_entry::<String, Vec<EntityRecord>>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if access.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom(format!(
                        "floor entry for {lift:?} has more than one key"
                    )));
                }
                Ok(LiftFloors { lift, floors })
            }
        }

        deserializer.deserialize_map(LiftFloorsVisitor)
    }
}

/// The saved project file.
///
/// Keys this crate does not know are kept in `extra` and written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(rename = "FileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(rename = "BuildingSystems", default, skip_serializing_if = "Option::is_none")]
    pub building_systems: Option<Vec<EntityRecord>>,
    #[serde(rename = "LiftSystems", default, skip_serializing_if = "Option::is_none")]
    pub lift_systems: Option<Vec<EntityRecord>>,
    #[serde(rename = "LiftDrive", default, skip_serializing_if = "Option::is_none")]
    pub lift_drive: Option<Vec<EntityRecord>>,
    #[serde(rename = "Forces", default, skip_serializing_if = "Option::is_none")]
    pub forces: Option<Vec<EntityRecord>>,
    #[serde(rename = "Compliance", default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Vec<EntityRecord>>,
    #[serde(rename = "Emergency", default, skip_serializing_if = "Option::is_none")]
    pub emergency: Option<Vec<EntityRecord>>,
    #[serde(rename = "Floors", default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<Vec<LiftFloors>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProjectDocument {
    fn records_slot(&mut self, step: StepId) -> Option<&mut Option<Vec<EntityRecord>>> {
        match step {
            StepId::BuildingSystems => Some(&mut self.building_systems),
            StepId::LiftSystems => Some(&mut self.lift_systems),
            StepId::LiftDrive => Some(&mut self.lift_drive),
            StepId::Forces => Some(&mut self.forces),
            StepId::Compliance => Some(&mut self.compliance),
            StepId::Emergency => Some(&mut self.emergency),
            StepId::Floors => None,
        }
    }

    /// Flat records of a table step. Always `None` for the floors step,
    /// whose section is nested; see [`ProjectDocument::floors`].
    pub fn records(&self, step: StepId) -> Option<&[EntityRecord]> {
        let records = match step {
            StepId::BuildingSystems => &self.building_systems,
            StepId::LiftSystems => &self.lift_systems,
            StepId::LiftDrive => &self.lift_drive,
            StepId::Forces => &self.forces,
            StepId::Compliance => &self.compliance,
            StepId::Emergency => &self.emergency,
            StepId::Floors => return None,
        };
        records.as_deref()
    }

    pub fn has_section(&self, step: StepId) -> bool {
        match step {
            StepId::Floors => self.floors.is_some(),
            other => self.records(other).is_some(),
        }
    }
}

/// In-memory project state handed from step to step.
///
/// `revision` counts section writes since the state was created or loaded;
/// it is not saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    document: ProjectDocument,
    revision: u64,
}

impl SessionState {
    pub fn new(file_name: Option<String>) -> Self {
        Self {
            document: ProjectDocument {
                file_name,
                ..ProjectDocument::default()
            },
            revision: 0,
        }
    }

    pub fn from_document(document: ProjectDocument) -> Self {
        Self {
            document,
            revision: 0,
        }
    }

    pub fn document(&self) -> &ProjectDocument {
        &self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn file_name(&self) -> Option<&str> {
        self.document.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.document.file_name = Some(name.into());
    }

    pub fn records(&self, step: StepId) -> Option<&[EntityRecord]> {
        self.document.records(step)
    }

    pub fn floors(&self) -> Option<&[LiftFloors]> {
        self.document.floors.as_deref()
    }

    pub fn has_section(&self, step: StepId) -> bool {
        self.document.has_section(step)
    }

    /// Number of lifts fixed by the building systems section.
    pub fn entity_count(&self) -> Option<usize> {
        self.records(StepId::BuildingSystems).map(<[_]>::len)
    }

    /// Overwrite the section of a table step. Ignored for the floors step.
    pub fn set_records(&mut self, step: StepId, records: Vec<EntityRecord>) {
        if let Some(slot) = self.document.records_slot(step) {
            *slot = Some(records);
            self.revision += 1;
        }
    }

    pub fn set_floors(&mut self, floors: Vec<LiftFloors>) {
        self.document.floors = Some(floors);
        self.revision += 1;
    }
}
