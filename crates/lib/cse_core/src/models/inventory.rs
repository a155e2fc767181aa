//! Inventory domain models.
//!
//! Serialized field names follow the `inv_*` / `classification_*` column
//! names, which is what the management page script consumes.

use serde::{Deserialize, Serialize};

/// Vehicle classification (e.g. "Sedan", "Truck").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "classification_id")]
    pub id: i32,
    #[serde(rename = "classification_name")]
    pub name: String,
}

/// Inventory item joined with its classification name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "inv_id")]
    pub id: i32,
    #[serde(rename = "inv_make")]
    pub make: String,
    #[serde(rename = "inv_model")]
    pub model: String,
    #[serde(rename = "inv_year")]
    pub year: String,
    #[serde(rename = "inv_description")]
    pub description: String,
    #[serde(rename = "inv_image")]
    pub image: String,
    #[serde(rename = "inv_thumbnail")]
    pub thumbnail: String,
    /// Price in whole dollars.
    #[serde(rename = "inv_price")]
    pub price: i64,
    #[serde(rename = "inv_miles")]
    pub miles: i32,
    #[serde(rename = "inv_color")]
    pub color: String,
    pub classification_id: i32,
    pub classification_name: String,
}

impl Vehicle {
    /// "Make Model", as shown in titles and listings.
    pub fn name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Inventory item fields as written by the add and update forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: String,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub price: i64,
    pub miles: i32,
    pub color: String,
    pub classification_id: i32,
}
