//! Field tables for each wizard step.
//!
//! Names double as the JSON keys of the saved project, so they must not be
//! reworded without migrating existing files.

use super::schema::FieldDescriptor as F;

pub const CODE_BASIS: &[&str] = &["BS EN81"];

pub const BUILDING_SYSTEM_FIELDS: &[F] = &[
    F::numeric("Number"),
    F::text("System Name"),
    F::text("Building Part"),
    F::text("Building Section"),
    F::text("Grid Position"),
    F::text("Plan Code"),
    F::text("Drawing Number, Internal"),
    F::text("Factory Number"),
];

pub const SYSTEM_TYPES: &[&str] = &["Passenger Lift", "Service Lift", "Waste Lift", "Freight Lift"];
pub const SYSTEM_CATEGORIES: &[&str] = &["MR", "MRL"];
pub const GROUP_CONTROLS: &[&str] = &["Simplex", "Duplex", "Triplex", "Quadplex"];
pub const COUNTERWEIGHT_LOCATIONS: &[&str] = &["Rear (2)", "Left (3)", "Right (4)"];

pub const STOPS_FIELD: &str = "Stops (pcs.)";

pub const LIFT_SYSTEM_FIELDS: &[F] = &[
    F::select("System Type", SYSTEM_TYPES),
    F::select("System Category", SYSTEM_CATEGORIES),
    F::select("Code Basis", CODE_BASIS),
    F::select("Control / Group", GROUP_CONTROLS),
    F::select("Counterweight location", COUNTERWEIGHT_LOCATIONS),
    F::numeric("Load capacity (kg)"),
    F::numeric("Permissible number of persons (people)"),
    F::numeric("Speed (m/s)"),
    F::numeric("Acceleration (m/s²)"),
    F::numeric("Jerk (m/s³)"),
    F::numeric("Travel height (mm)"),
    F::numeric(STOPS_FIELD),
    F::numeric("Number of landing doors (pcs.)"),
    F::boolean("Open-through"),
    F::boolean("Adjacent access"),
    F::numeric("Cabin width (mm)"),
    F::numeric("Cabin depth (mm)"),
    F::numeric("Clear cabin height (mm)"),
    F::numeric("Structural cabin height (mm)"),
    F::numeric("Door width (mm)"),
    F::numeric("Door height (mm)"),
    F::numeric("Shaft width proposal (mm)"),
    F::numeric("Shaft width current planning (mm)"),
    F::numeric("Shaft depth proposal (mm)"),
    F::numeric("Shaft depth current planning (mm)"),
    F::numeric("Overhead proposal (mm)"),
    F::numeric("Overhead current planning (mm)"),
    F::numeric("Shaft pit proposal (mm)"),
    F::numeric("Shaft pit current planning (mm)"),
];

pub const LIFT_DRIVE_FIELDS: &[F] = &[
    F::text("Drive/Motor location"),
    F::text("Control / Operation panel location"),
    F::numeric("Number of trips per hour (1/h)"),
    F::text("Power network"),
    F::text("Drive/Motor type"),
    F::numeric("Duty cycle (motor) (%)"),
    F::numeric("Drive/Motor Power (kW)"),
    F::numeric("Connected rated power (kVA)"),
    F::numeric("Rated current (A)"),
    F::text("Starting current (factor ≈ 2) (A)"),
    F::text("Diversity factor"),
    F::numeric("Heat dissipation motor (kJ/h)"),
    F::boolean("Energy recovery"),
    F::numeric("Temperature machine room / shaft (°C)"),
];

pub const FORCE_FIELDS: &[F] = &[
    F::numeric("Force F1, F2 elevator rail segment (kN)"),
    F::numeric("Force F3, each buffer (kN)"),
    F::boolean("Counterweight safety gear"),
    F::numeric("Force F4, per counterweight rail segment (kN)"),
    F::numeric("Force F5, per counterweight buffer (kN)"),
    F::numeric("Force F6, static shaft door (kN)"),
    F::numeric("Force F7, static counterweight (kN)"),
    F::numeric("Force F8, static cabin (kN)"),
    F::numeric("Force Fx, cabin rail (kN)"),
    F::numeric("Force Fy, cabin rail (kN)"),
    F::numeric("Force Fx, counterweight rail (kN)"),
    F::numeric("Force Fy, counterweight rail (kN)"),
];

pub const COMPLIANCE_FIELDS: &[F] = &[
    F::boolean("EN81-70 Accessibility"),
    F::boolean("EN81-71 Vandalism"),
    F::boolean("EN81-72 Firefighter elevator"),
    F::boolean("EN81-73 Fire emergency return"),
    F::boolean("EN81-77 Seismic"),
    F::numeric("EN81-58 Fire protection class for landing doors"),
    F::boolean("EN81-76/BS 9999 Evacuation lift"),
];

pub const FIRE_RETURN_TYPES: &[&str] = &["Option 1", "Option 2", "Option 3"];
pub const EMERGENCY_POWER_TYPES: &[&str] = &["external battery"];
pub const ACCESS_CONTROLS: &[&str] = &["hall card reader"];
pub const EMERGENCY_CALLS: &[&str] = &["GSM"];

pub const EMERGENCY_FIELDS: &[F] = &[
    F::boolean("Smoke extraction"),
    F::select("Type of fire emergency return", FIRE_RETURN_TYPES),
    F::text("Main evacuation floor"),
    F::text("Alternate evacuation floor"),
    F::numeric("Permanent emergency power (A)"),
    F::numeric("Emergency power for evacuation (A)"),
    F::boolean("Sequence evacuation control"),
    F::select("Type of emergency power", EMERGENCY_POWER_TYPES),
    F::text("Building automation signals"),
    F::text("FCC signals from lift"),
    F::text("CCTV"),
    F::select("Access control", ACCESS_CONTROLS),
    F::select("Emergency call", EMERGENCY_CALLS),
    F::text("Design intention"),
];

pub const ENTRANCES: &[&str] = &["Front", "Rear", "Side"];

pub const FLOOR_NUMBER_FIELD: &str = "Floor";

/// Editable columns of one floor row. The floor number is derived, not edited.
pub const FLOOR_FIELDS: &[F] = &[
    F::text("Floor Name"),
    F::numeric("Height (m)"),
    F::multi_select("Entrances", ENTRANCES),
];
