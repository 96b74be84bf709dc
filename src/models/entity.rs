//! Schema-checked field access shared by every entity kind.

use super::coerce::coerce;
use super::schema::EntityKind;
use crate::errors::{MandrillResult, ModelError};
use crate::types::{FieldType, Params};
use serde_json::Value;

/// A schema-validated field container
///
/// Bulk ingestion through [`Entity::from_fields`] is permissive: unknown keys
/// are dropped and scalars are coerced. Direct access through [`Entity::get`]
/// and [`Entity::set`] is strict and rejects fields outside the schema.
pub trait Entity: Sized {
    /// Kind of entity
    const KIND: EntityKind;

    /// Wrap an already validated field map
    fn from_data(data: Params) -> Self;

    /// Stored fields
    fn data(&self) -> &Params;

    /// Mutable stored fields
    fn data_mut(&mut self) -> &mut Params;

    /// Build from a raw map, keeping and coercing only schema fields
    fn from_fields(raw: Params) -> Self {
        let mut data = Params::new();
        for (key, value) in raw {
            if let Some(ty) = Self::KIND.field_type(&key) {
                data.insert(key, coerce(value, ty));
            }
        }
        Self::from_data(data)
    }

    /// Kind of this entity
    fn kind(&self) -> EntityKind {
        Self::KIND
    }

    /// Read a field; `None` when the field is valid but unset
    fn get(&self, field: &str) -> MandrillResult<Option<&Value>> {
        check_field::<Self>(field)?;
        Ok(self.data().get(field))
    }

    /// Store a field verbatim
    fn set(&mut self, field: &str, value: Value) -> MandrillResult<()> {
        check_field::<Self>(field)?;
        self.data_mut().insert(field.to_string(), value);
        Ok(())
    }

    /// Append to a list field, creating the list on first use
    fn append_to_list(&mut self, field: &str, value: Value) -> MandrillResult<()> {
        check_field::<Self>(field)?;
        let slot = self
            .data_mut()
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        match slot {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            _ => Err(ModelError::NotAList {
                entity: Self::KIND.name(),
                field: field.to_string(),
            }
            .into()),
        }
    }

    /// Same as [`Entity::append_to_list`]; `key` is accepted and ignored
    ///
    /// No `{key: value}` pair is built. Callers that need one construct it
    /// themselves and pass it as `value`.
    fn append_to_list_keyed(&mut self, field: &str, _key: &str, value: Value) -> MandrillResult<()> {
        self.append_to_list(field, value)
    }

    /// Field map sent as the request payload
    fn fields(&self) -> Params {
        self.data().clone()
    }

    /// Declared type of a schema field
    fn field_type(field: &str) -> Option<FieldType> {
        Self::KIND.field_type(field)
    }

    /// String value of a field, if set to a string
    fn get_str(&self, field: &str) -> Option<&str> {
        self.data().get(field).and_then(Value::as_str)
    }
}

fn check_field<E: Entity>(field: &str) -> Result<(), ModelError> {
    if E::KIND.field_type(field).is_some() {
        Ok(())
    } else {
        Err(ModelError::UndefinedField {
            entity: E::KIND.name(),
            field: field.to_string(),
        })
    }
}

/// Declare an entity with no behaviour beyond its schema
macro_rules! entity {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            data: $crate::types::Params,
        }

        impl $name {
            /// Create an empty entity
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl $crate::models::Entity for $name {
            const KIND: $crate::models::EntityKind = $crate::models::EntityKind::$kind;

            fn from_data(data: $crate::types::Params) -> Self {
                Self { data }
            }

            fn data(&self) -> &$crate::types::Params {
                &self.data
            }

            fn data_mut(&mut self) -> &mut $crate::types::Params {
                &mut self.data
            }
        }
    };
}

pub(crate) use entity;
