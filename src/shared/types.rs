use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Persisted records use camelCase keys so stores written by earlier
// front-ends stay readable.

/// One performed conversion, kept in the recents list (head = newest)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub category: String,
    pub from_value: f64,
    pub from_unit: String,
    pub to_value: f64,
    pub to_unit: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    pub fn new(category: &str, from_value: f64, from_unit: &str, to_value: f64, to_unit: &str) -> Self {
        Self {
            category: category.to_string(),
            from_value,
            from_unit: from_unit.to_string(),
            to_value,
            to_unit: to_unit.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Two records describe the same conversion when category, units and
    /// input value match; result and timestamp are ignored.
    pub fn same_conversion(&self, other: &ConversionRecord) -> bool {
        self.category == other.category
            && self.from_unit == other.from_unit
            && self.to_unit == other.to_unit
            && self.from_value == other.from_value
    }
}

/// A user-pinned (category, from, to) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: String,
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
}

impl FavoriteEntry {
    pub fn new(category: &str, from_unit: &str, to_unit: &str) -> Self {
        Self {
            id: Self::make_id(category, from_unit, to_unit),
            category: category.to_string(),
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
        }
    }

    /// `<category>:<fromUnit>:<toUnit>`
    pub fn make_id(category: &str, from_unit: &str, to_unit: &str) -> String {
        format!("{}:{}:{}", category, from_unit, to_unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value for the document `data-theme` attribute
    pub fn as_attr(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

// Rich Unit Data Transfer Object for unit selectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct UnitDTO {
    pub id: String,       // Unit id (e.g., "meter", "kelvin")
    pub label: String,    // Option text (e.g., "Meter (m)")
    pub symbol: String,
    pub category: String, // Category id (e.g., "length")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CategoryDTO {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub units: Vec<UnitDTO>,
}

/// A recents list row, already formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RecentEntryView {
    pub from_display: String, // "1 m"
    pub to_display: String,   // "3.281 ft"
    pub category_name: String,
    pub record: ConversionRecord,
}

/// Read-only state the presentation layer renders from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct SessionSnapshot {
    pub category: String,
    pub category_name: String,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: String,
    pub output_value: String,
    pub formula: String,
    pub trivia: Option<String>,
    pub unit_trivia: Option<String>, // fact about the source unit, if it has one
    pub theme: Theme,
    pub is_favorite: bool,
    pub recents: Vec<RecentEntryView>,
    pub favorites: Vec<FavoriteEntry>,
}
