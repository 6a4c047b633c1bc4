//! Place records
//!
//! JSON keys are PascalCase (`Name`, `Coordinates.Latitude`, `ContactInfo.Email`)
//! and the identifier is serialized as `ID`. Request bodies decode into
//! [`PlaceFields`]: every field may be omitted and unknown keys, `ID` included,
//! are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic position of a place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Typical spend at a place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceRange {
    pub min_price: f64,
    pub max_price: f64,
}

/// How to reach a place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// The mutable part of a place, as accepted on create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlaceFields {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub price_range: PriceRange,
    pub contact_info: ContactInfo,
}

impl PlaceFields {
    /// Fields with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Coordinates::new(latitude, longitude);
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, min_price: f64, max_price: f64) -> Self {
        self.price_range = PriceRange {
            min_price,
            max_price,
        };
        self
    }
}

/// A stored place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Store-assigned identifier
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub fields: PlaceFields,
}

impl Place {
    /// Build a freshly stored place with both timestamps set to `now`
    pub fn new(id: i64, fields: PlaceFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_body_decodes_with_zero_values() {
        let fields: PlaceFields = serde_json::from_value(json!({
            "Name": "Cafe X",
            "Coordinates": { "Latitude": 12.1, "Longitude": -1.2 }
        }))
        .unwrap();

        assert_eq!(fields.name, "Cafe X");
        assert_eq!(fields.coordinates, Coordinates::new(12.1, -1.2));
        assert_eq!(fields.price_range, PriceRange::default());
        assert!(fields.contact_info.email.is_empty());
    }

    #[test]
    fn test_body_id_is_ignored() {
        let fields: PlaceFields =
            serde_json::from_value(json!({ "ID": 99, "Name": "Bar" })).unwrap();
        assert_eq!(fields, PlaceFields::named("Bar"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_value::<PlaceFields>(json!({ "Name": 5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_place_serializes_flat_with_pascal_case_keys() {
        let place = Place::new(
            4,
            PlaceFields::named("Museo").with_price_range(0.0, 12.5),
            Utc::now(),
        );
        let value = serde_json::to_value(&place).unwrap();

        assert_eq!(value["ID"], 4);
        assert_eq!(value["Name"], "Museo");
        assert_eq!(value["PriceRange"]["MaxPrice"], 12.5);
        assert!(value.get("CreatedAt").is_some());
        assert!(value.get("fields").is_none());
    }
}
