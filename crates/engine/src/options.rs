use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How far the corpus schema is normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaMode {
    /// `files` table only
    #[default]
    Flat,
    /// Definition lines stored as raw strings
    Definitions,
    /// Attribute names only
    Attributes,
    /// Attribute and value tables with their join tables
    AttributeValues,
}

impl SchemaMode {
    pub const fn stores_definitions(self) -> bool {
        matches!(self, Self::Definitions)
    }

    pub const fn stores_attributes(self) -> bool {
        matches!(self, Self::Attributes | Self::AttributeValues)
    }

    pub const fn stores_values(self) -> bool {
        matches!(self, Self::AttributeValues)
    }
}

impl FromStr for SchemaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "definitions" | "defs" => Ok(Self::Definitions),
            "attributes" | "attrs" => Ok(Self::Attributes),
            "attribute-values" | "attribute_values" | "normalized" => Ok(Self::AttributeValues),
            other => Err(format!("Unknown schema mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_mode() {
        assert_eq!("flat".parse::<SchemaMode>(), Ok(SchemaMode::Flat));
        assert_eq!("DEFS".parse::<SchemaMode>(), Ok(SchemaMode::Definitions));
        assert_eq!(
            "attribute-values".parse::<SchemaMode>(),
            Ok(SchemaMode::AttributeValues)
        );
        assert!("star".parse::<SchemaMode>().is_err());
    }

    #[test]
    fn test_schema_capabilities() {
        assert!(!SchemaMode::Flat.stores_attributes());
        assert!(SchemaMode::Definitions.stores_definitions());
        assert!(SchemaMode::Attributes.stores_attributes());
        assert!(!SchemaMode::Attributes.stores_values());
        assert!(SchemaMode::AttributeValues.stores_values());
    }
}
