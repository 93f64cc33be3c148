//! Table marshalling between entity records and a grid of typed controls.
//!
//! A [`Grid`] has one row per schema field and one data column per entity.
//! The label column is implicit: [`Grid::labels`] yields the field names.

use tracing::warn;

use super::{
    record::{EntityRecord, FieldValue},
    schema::{FieldKind, Schema},
};

/// A user edit addressed to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellInput {
    Text(String),
    Choice(usize),
    Checked(bool),
    OptionChecked { index: usize, checked: bool },
}

/// One interactive cell. Every variant exposes the same get/set capability
/// through [`Control::value`], [`Control::set_value`] and [`Control::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Text(String),
    Numeric(String),
    Select {
        options: &'static [&'static str],
        selected: usize,
    },
    Toggle(bool),
    MultiSelect {
        options: &'static [&'static str],
        checked: Vec<bool>,
    },
}

impl Control {
    /// Default control for a field kind.
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Control::Text(String::new()),
            FieldKind::Numeric => Control::Numeric(String::new()),
            FieldKind::Select(options) => Control::Select {
                options,
                selected: 0,
            },
            FieldKind::Boolean => Control::Toggle(false),
            FieldKind::MultiSelect(options) => Control::MultiSelect {
                options,
                checked: vec![false; options.len()],
            },
        }
    }

    pub fn value(&self) -> FieldValue {
        match self {
            Control::Text(s) | Control::Numeric(s) => FieldValue::Text(s.clone()),
            Control::Select { options, selected } => {
                FieldValue::Text(options.get(*selected).copied().unwrap_or_default().to_string())
            }
            Control::Toggle(on) => FieldValue::Bool(*on),
            Control::MultiSelect { options, checked } => FieldValue::List(
                options
                    .iter()
                    .zip(checked)
                    .filter(|(_, on)| **on)
                    .map(|(option, _)| option.to_string())
                    .collect(),
            ),
        }
    }

    /// Write a stored value, coercing it to the control's representation.
    /// A select value that matches no option leaves the selection unchanged.
    pub fn set_value(&mut self, value: &FieldValue) {
        match self {
            Control::Text(s) | Control::Numeric(s) => *s = value.to_text(),
            Control::Select { options, selected } => {
                let wanted = value.to_text();
                if let Some(index) = options.iter().position(|option| *option == wanted) {
                    *selected = index;
                }
            }
            Control::Toggle(on) => *on = value.is_truthy(),
            Control::MultiSelect { options, checked } => {
                let chosen: Vec<String> = match value {
                    FieldValue::List(items) => items.clone(),
                    other => vec![other.to_text()],
                };
                for (option, slot) in options.iter().zip(checked.iter_mut()) {
                    *slot = chosen.iter().any(|c| c == option);
                }
            }
        }
    }

    /// Apply a user edit. Returns `false` when the input does not fit the
    /// control, in which case the control is unchanged.
    pub fn apply(&mut self, input: CellInput) -> bool {
        match (self, input) {
            (Control::Text(s), CellInput::Text(text)) => {
                *s = text;
                true
            }
            (Control::Numeric(s), CellInput::Text(text)) => {
                if is_decimal_input(&text) {
                    *s = text;
                    true
                } else {
                    false
                }
            }
            (Control::Select { options, selected }, CellInput::Choice(index)) => {
                if index < options.len() {
                    *selected = index;
                    true
                } else {
                    false
                }
            }
            (Control::Toggle(on), CellInput::Checked(checked)) => {
                *on = checked;
                true
            }
            (Control::MultiSelect { checked: slots, .. }, CellInput::OptionChecked { index, checked }) => {
                match slots.get_mut(index) {
                    Some(slot) => {
                        *slot = checked;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

/// Whether `text` is a decimal number or a prefix a user could be typing on
/// the way to one (`""`, `"-"`, `"1."`, `"2e"`).
pub fn is_decimal_input(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    if matches!(chars.peek(), Some('+' | '-')) {
        chars.next();
    }
    let mut mantissa_digits = 0;
    let mut seen_point = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => mantissa_digits += 1,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        chars.next();
    }
    match chars.next() {
        None => true,
        Some('e' | 'E') if mantissa_digits > 0 => {
            if matches!(chars.peek(), Some('+' | '-')) {
                chars.next();
            }
            chars.all(|c| c.is_ascii_digit())
        }
        Some(_) => false,
    }
}

/// Grid of controls bound to a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    schema: Schema,
    // columns[entity][field]
    columns: Vec<Vec<Control>>,
}

impl Grid {
    pub fn build(schema: Schema, entity_count: usize) -> Self {
        let mut grid = Self {
            schema,
            columns: Vec::with_capacity(entity_count),
        };
        for _ in 0..entity_count {
            grid.push_column();
        }
        grid
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schema.names()
    }

    pub fn row_count(&self) -> usize {
        self.schema.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Header of data column `col`, 0-based.
    pub fn column_header(col: usize) -> String {
        format!("Lift {}", col + 1)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Control> {
        self.columns.get(col)?.get(row)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Control> {
        self.columns.get_mut(col)?.get_mut(row)
    }

    /// Route a user edit to one cell. Out-of-range cells reject the edit.
    pub fn apply(&mut self, row: usize, col: usize, input: CellInput) -> bool {
        self.cell_mut(row, col)
            .is_some_and(|control| control.apply(input))
    }

    pub fn add_column(&mut self) {
        self.push_column();
    }

    /// Drop the last data column. The final remaining column is never removed.
    pub fn remove_column(&mut self) -> bool {
        if self.columns.len() <= 1 {
            return false;
        }
        self.columns.pop();
        true
    }

    pub fn populate(&mut self, records: &[EntityRecord]) {
        if records.len() > self.columns.len() {
            warn!(
                records = records.len(),
                columns = self.columns.len(),
                "more records than grid columns, extra records ignored"
            );
        }
        for (col, record) in records.iter().enumerate().take(self.columns.len()) {
            self.populate_column(col, record);
        }
    }

    /// Write one record into column `col`. Unknown fields are ignored and
    /// absent fields keep their current value.
    pub fn populate_column(&mut self, col: usize, record: &EntityRecord) {
        let Some(column) = self.columns.get_mut(col) else {
            return;
        };
        for (field, control) in self.schema.fields().iter().zip(column.iter_mut()) {
            if let Some(value) = record.get(field.name) {
                control.set_value(value);
            }
        }
    }

    pub fn collect(&self) -> Vec<EntityRecord> {
        (0..self.columns.len())
            .filter_map(|col| self.collect_column(col))
            .collect()
    }

    pub fn collect_column(&self, col: usize) -> Option<EntityRecord> {
        let column = self.columns.get(col)?;
        Some(
            self.schema
                .names()
                .zip(column)
                .map(|(name, control)| (name, control.value()))
                .collect(),
        )
    }

    fn push_column(&mut self) {
        let column = self
            .schema
            .fields()
            .iter()
            .map(|field| Control::for_kind(field.kind))
            .collect();
        self.columns.push(column);
    }
}
