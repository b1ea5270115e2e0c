//! Wine record and the persisted collection document.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized wine extracted from one catalog match.
///
/// Field names are the on-disk names used by earlier runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WineRecord {
    /// Catalog wine identifier (de-duplication key)
    pub id: u64,

    /// Wine name
    pub name: String,

    /// Vintage year, absent for non-vintage bottlings
    pub year: Option<i32>,

    /// Country name, via region -> country
    pub country: Option<String>,

    /// Region name
    pub region: Option<String>,

    /// Raw wine type code, see [`WineType`]
    pub wine_type_id: u32,

    /// Primary grape variety
    pub most_used_grapes: Option<String>,

    /// Winery name
    pub winery: Option<String>,

    /// Average rating on a 0-5 scale
    pub rating: Option<f64>,

    /// Price amount in the catalog's currency
    pub price: Option<f64>,

    /// Style name
    pub style: Option<String>,
}

impl WineRecord {
    /// Decoded wine type, `None` for codes the catalog added later.
    pub fn wine_type(&self) -> Option<WineType> {
        WineType::from_code(self.wine_type_id)
    }

    /// One-line save confirmation, e.g.
    /// `Saved wine: Barolo (2016) from Piemonte - Rating: 4.3/5`.
    pub fn summary_line(&self) -> String {
        format!(
            "Saved wine: {} ({}) from {} - Rating: {}/5",
            self.name,
            or_na(self.year),
            or_na(self.region.as_deref()),
            or_na(self.rating.map(format_rating)),
        )
    }
}

/// Ratings always keep a decimal point, as they appear in the file (`4.0`).
fn format_rating(rating: f64) -> String {
    format!("{rating:?}")
}

fn or_na<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Wine type codes used by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WineType {
    Red,
    White,
    Sparkling,
    Rose,
    Dessert,
    Fortified,
}

impl WineType {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Red),
            2 => Some(Self::White),
            3 => Some(Self::Sparkling),
            4 => Some(Self::Rose),
            7 => Some(Self::Dessert),
            24 => Some(Self::Fortified),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Red => 1,
            Self::White => 2,
            Self::Sparkling => 3,
            Self::Rose => 4,
            Self::Dessert => 7,
            Self::Fortified => 24,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::White => "white",
            Self::Sparkling => "sparkling",
            Self::Rose => "rose",
            Self::Dessert => "dessert",
            Self::Fortified => "fortified",
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The output file: `{ "wines": [ ... ] }` in insertion order.
///
/// Entries are kept as raw JSON so that records written by earlier runs
/// survive a rewrite untouched, whatever shape their optional fields have.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WineFile {
    #[serde(default)]
    pub wines: Vec<Value>,
}

impl WineFile {
    /// Identifiers of all stored entries; entries without a numeric `id`
    /// are kept but never match.
    pub fn ids(&self) -> HashSet<u64> {
        self.wines
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_u64))
            .collect()
    }

    pub fn push(&mut self, wine: &WineRecord) -> serde_json::Result<()> {
        self.wines.push(serde_json::to_value(wine)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_wine() -> WineRecord {
        WineRecord {
            id: 1138,
            name: "Barolo".to_string(),
            year: Some(2016),
            country: Some("Italy".to_string()),
            region: Some("Piemonte".to_string()),
            wine_type_id: 1,
            most_used_grapes: Some("Nebbiolo".to_string()),
            winery: Some("Cantina".to_string()),
            rating: Some(4.3),
            price: Some(129.9),
            style: Some("Italian Barolo".to_string()),
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            sample_wine().summary_line(),
            "Saved wine: Barolo (2016) from Piemonte - Rating: 4.3/5"
        );
    }

    #[test]
    fn test_summary_line_missing_values() {
        let wine = WineRecord {
            year: None,
            region: None,
            rating: None,
            ..sample_wine()
        };
        assert_eq!(
            wine.summary_line(),
            "Saved wine: Barolo (N/A) from N/A - Rating: N/A/5"
        );
    }

    #[test]
    fn test_summary_line_whole_rating() {
        let wine = WineRecord {
            rating: Some(4.0),
            ..sample_wine()
        };
        assert_eq!(
            wine.summary_line(),
            "Saved wine: Barolo (2016) from Piemonte - Rating: 4.0/5"
        );
    }

    #[test]
    fn test_wine_type_codes() {
        for code in [1, 2, 3, 4, 7, 24] {
            let wine_type = WineType::from_code(code).unwrap();
            assert_eq!(wine_type.code(), code);
        }
        assert_eq!(WineType::from_code(5), None);
        assert_eq!(WineType::from_code(24).unwrap().to_string(), "fortified");
    }

    #[test]
    fn test_legacy_record_with_nulls() {
        let json = r#"{
            "id": 7, "name": "Vinho", "year": null, "country": null,
            "region": null, "wine_type_id": 24, "most_used_grapes": null,
            "winery": null, "rating": null, "price": null, "style": null
        }"#;
        let wine: WineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(wine.wine_type(), Some(WineType::Fortified));
        assert!(wine.year.is_none());

        let value = serde_json::to_value(&wine).unwrap();
        assert!(value["region"].is_null());
    }

    #[test]
    fn test_wine_file_without_wines_key() {
        let file: WineFile = serde_json::from_str("{}").unwrap();
        assert!(file.wines.is_empty());
    }

    #[test]
    fn test_wine_file_keeps_foreign_entries() {
        let json = r#"{ "wines": [
            { "id": 1, "name": "Port", "year": "N.V.", "wine_type_id": 24 },
            { "name": "no id" },
            { "id": 2, "name": "Barolo", "year": 2016, "wine_type_id": 1 }
        ] }"#;
        let mut file: WineFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.ids(), HashSet::from([1, 2]));

        file.push(&sample_wine()).unwrap();
        assert_eq!(file.wines.len(), 4);
        assert_eq!(file.wines[0]["year"], "N.V.");
        assert!(file.ids().contains(&1138));
    }
}
