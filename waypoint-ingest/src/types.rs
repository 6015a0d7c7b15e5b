use serde::{Deserialize, Serialize};

/// One destination in the catalog export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub city: Option<String>,
}

/// Raw itinerary CSV row, before time parsing and day grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRow {
    pub day: u32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    pub destination_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
}
