use std::{borrow::Cow, collections::HashSet};

/// Input kind of a single field, fixed when the schema is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Free text restricted to decimal numbers. Stored as a string.
    Numeric,
    Select(&'static [&'static str]),
    Boolean,
    /// Any subset of a small fixed set, stored as a list in option order.
    MultiSelect(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Numeric,
        }
    }

    pub const fn select(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::Select(options),
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Boolean,
        }
    }

    pub const fn multi_select(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::MultiSelect(options),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field {0:?} is declared more than once")]
    DuplicateField(&'static str),
    #[error("select field {0:?} has no options")]
    NoOptions(&'static str),
}

/// Ordered list of field descriptors. Row `i` of a grid is field `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Cow<'static, [FieldDescriptor]>,
}

impl Schema {
    /// Build a schema, rejecting duplicate names and option-less selects.
    pub fn new(fields: impl Into<Cow<'static, [FieldDescriptor]>>) -> Result<Self, SchemaError> {
        let fields = fields.into();
        let mut seen = HashSet::new();
        for field in fields.iter() {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField(field.name));
            }
            if let FieldKind::Select(options) = field.kind
                && options.is_empty()
            {
                return Err(SchemaError::NoOptions(field.name));
            }
        }
        Ok(Self { fields })
    }

    /// Wrap a static field table without validation. The step tables are
    /// checked by the unit tests below.
    pub(crate) const fn from_static(fields: &'static [FieldDescriptor]) -> Self {
        Self {
            fields: Cow::Borrowed(fields),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }
}
