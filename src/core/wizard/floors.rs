use std::fmt;

use tracing::{debug, warn};

use super::{StepId, StepPhase, WizardError, WizardStep, require};
use crate::core::{
    fields::{FLOOR_NUMBER_FIELD, STOPS_FIELD},
    grid::{CellInput, Grid},
    project::{LiftFloors, SessionState},
    record::{EntityRecord, FieldValue},
};

/// Stop counts above this are treated as typing mistakes.
const MAX_STOPS: usize = 999;

/// A stop count that could not be used and was replaced by 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopCountWarning {
    /// 1-based lift number.
    pub lift: usize,
    pub given: String,
}

impl fmt::Display for StopCountWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid number of stops for Lift {} ({:?}). Defaulting to 1 stop.",
            self.lift, self.given
        )
    }
}

/// Position of one floor row in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRow {
    /// 1-based lift number.
    pub lift: usize,
    /// 1-based floor number within the lift.
    pub floor: usize,
    /// Grid column holding this floor.
    pub column: usize,
}

fn parse_stops(value: Option<&FieldValue>) -> Option<usize> {
    let count = match value? {
        FieldValue::Text(s) => {
            let s = s.trim();
            match s.parse::<usize>() {
                Ok(n) => n,
                Err(_) => whole_number(s.parse::<f64>().ok()?)?,
            }
        }
        FieldValue::Number(n) => match n.as_u64() {
            Some(n) => usize::try_from(n).ok()?,
            None => whole_number(n.as_f64()?)?,
        },
        FieldValue::Bool(_) | FieldValue::List(_) => return None,
    };
    (1..=MAX_STOPS).contains(&count).then_some(count)
}

fn whole_number(value: f64) -> Option<usize> {
    (value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= MAX_STOPS as f64)
        .then_some(value as usize)
}

/// The floors page: one grid column per floor, grouped by lift.
#[derive(Debug, Clone)]
pub struct FloorsStep {
    stops: Vec<usize>,
    grid: Grid,
    warnings: Vec<StopCountWarning>,
    phase: StepPhase,
}

impl FloorsStep {
    pub fn open(state: &SessionState) -> Result<Self, WizardError> {
        require(StepId::Floors, state)?;
        let lift_systems = state.records(StepId::LiftSystems).unwrap_or_default();

        let mut stops = Vec::with_capacity(lift_systems.len());
        let mut warnings = Vec::new();
        for (i, lift) in lift_systems.iter().enumerate() {
            let value = lift.get(STOPS_FIELD);
            match parse_stops(value) {
                Some(count) => stops.push(count),
                None => {
                    let warning = StopCountWarning {
                        lift: i + 1,
                        given: value.map(FieldValue::to_text).unwrap_or_default(),
                    };
                    warn!(lift = warning.lift, given = %warning.given, "invalid stop count, using 1");
                    warnings.push(warning);
                    stops.push(1);
                }
            }
        }

        let total: usize = stops.iter().sum();
        let mut step = Self {
            stops,
            grid: Grid::build(StepId::Floors.schema(), total),
            warnings,
            phase: StepPhase::Unpopulated,
        };
        if let Some(saved) = state.floors() {
            step.populate(saved);
            step.phase = StepPhase::Populated;
        }
        debug!(lifts = step.stops.len(), floors = total, "opened floors step");
        Ok(step)
    }

    /// Saved floors are matched by position: lift by lift, floor by floor.
    fn populate(&mut self, saved: &[LiftFloors]) {
        if saved.len() > self.stops.len() {
            warn!(
                saved = saved.len(),
                lifts = self.stops.len(),
                "saved floors for more lifts than configured, extra lifts ignored"
            );
        }
        let mut offset = 0;
        for (lift, stops) in saved.iter().zip(&self.stops) {
            for (floor, record) in lift.floors.iter().take(*stops).enumerate() {
                self.grid.populate_column(offset + floor, record);
            }
            offset += stops;
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Stop count per lift after defaulting.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    pub fn warnings(&self) -> &[StopCountWarning] {
        &self.warnings
    }

    pub fn row_count(&self) -> usize {
        self.grid.column_count()
    }

    pub fn rows(&self) -> impl Iterator<Item = FloorRow> + '_ {
        self.stops.iter().enumerate().scan(0usize, |offset, (lift, stops)| {
            let start = *offset;
            *offset += stops;
            Some((0..*stops).map(move |floor| FloorRow {
                lift: lift + 1,
                floor: floor + 1,
                column: start + floor,
            }))
        })
        .flatten()
    }

    /// Edit field `field` (index into the floor schema) of floor row `column`.
    pub fn edit(&mut self, column: usize, field: usize, input: CellInput) -> bool {
        let accepted = self.grid.apply(field, column, input);
        if accepted {
            self.phase = StepPhase::Populated;
        }
        accepted
    }

    pub fn collect(&self) -> Vec<LiftFloors> {
        self.rows()
            .fold(Vec::<LiftFloors>::new(), |mut lifts, row| {
                if lifts.len() < row.lift {
                    lifts.push(LiftFloors {
                        lift: format!("Lift {}", row.lift),
                        floors: Vec::new(),
                    });
                }
                let mut record =
                    EntityRecord::new().with(FLOOR_NUMBER_FIELD, row.floor.to_string());
                if let Some(fields) = self.grid.collect_column(row.column) {
                    for (name, value) in fields.iter() {
                        record.insert(name, value.clone());
                    }
                }
                if let Some(current) = lifts.last_mut() {
                    current.floors.push(record);
                }
                lifts
            })
    }
}

impl WizardStep for FloorsStep {
    fn id(&self) -> StepId {
        StepId::Floors
    }

    fn phase(&self) -> StepPhase {
        self.phase
    }

    fn commit(&self, state: &mut SessionState) {
        state.set_floors(self.collect());
    }
}
