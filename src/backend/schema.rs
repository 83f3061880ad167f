//! Response schema dialect for structured generation.
//!
//! The backend constrains structured output with its own schema language:
//! uppercase type tags, `properties`/`items`/`required`, and a `nullable`
//! flag on fields that may come back null. Shapes are declared by hand next
//! to the operations that use them; nothing here derives schemas from Rust
//! types.

use std::collections::BTreeMap;

use serde::Serialize;

/// Value type tags in the backend's schema dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    String,
    Number,
    Array,
    Object,
}

/// A declared response shape.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    /// Value type
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    /// Named fields of an OBJECT schema
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    /// Element shape of an ARRAY schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Required field names of an OBJECT schema
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Whether null is an acceptable value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
            nullable: None,
        }
    }

    /// A STRING value
    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// A NUMBER value
    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    /// An ARRAY of the given element shape
    pub fn array(items: Schema) -> Self {
        let mut schema = Self::of(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    /// An OBJECT shape; add fields with [`Schema::property`]
    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// Add a named field to an OBJECT shape
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark fields of an OBJECT shape as required
    pub fn required(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Allow null for this value
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }
}
