// src/services/extract.rs

//! Match → [`WineRecord`] extraction.
//!
//! Catalog matches are deeply nested and unevenly populated. Every optional
//! lookup goes through [`lookup`], which treats a missing key and an explicit
//! `null` alike, and each fallback rule is its own function over the wine
//! object so it can be tested without a full match.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::WineRecord;

/// Follow `path` through nested objects. `None` on any missing link or null.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}

fn lookup_str(value: &Value, path: &[&str]) -> Option<String> {
    lookup(value, path)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn lookup_f64(value: &Value, path: &[&str]) -> Option<f64> {
    lookup(value, path).and_then(Value::as_f64)
}

/// `name` of the first entry in the list at `path`.
fn first_name(value: &Value, path: &[&str]) -> Option<String> {
    lookup(value, path)
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(|entry| lookup_str(entry, &["name"]))
}

fn required<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value> {
    lookup(value, path).ok_or_else(|| AppError::missing(path.join(".")))
}

fn required_u64(value: &Value, path: &[&str]) -> Result<u64> {
    required(value, path)?
        .as_u64()
        .ok_or_else(|| AppError::missing(path.join(".")))
}

/// First grape of the wine's style.
pub fn style_grape(wine: &Value) -> Option<String> {
    first_name(wine, &["style", "grapes"])
}

/// First of the country's most-used grapes, reached via region → country.
pub fn country_grape(wine: &Value) -> Option<String> {
    first_name(wine, &["region", "country", "most_used_grapes"])
}

/// Style grape, falling back to the country's most-used grape.
pub fn primary_grape(wine: &Value) -> Option<String> {
    style_grape(wine).or_else(|| country_grape(wine))
}

pub fn country_name(wine: &Value) -> Option<String> {
    lookup_str(wine, &["region", "country", "name"])
}

pub fn region_name(wine: &Value) -> Option<String> {
    lookup_str(wine, &["region", "name"])
}

pub fn winery_name(wine: &Value) -> Option<String> {
    lookup_str(wine, &["winery", "name"])
}

pub fn style_name(wine: &Value) -> Option<String> {
    lookup_str(wine, &["style", "name"])
}

/// Vintage year. Numeric strings are accepted; non-vintage markers such as
/// `"N.V."` give `None`.
pub fn vintage_year(vintage: &Value) -> Option<i32> {
    match lookup(vintage, &["year"])? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn rating(vintage: &Value) -> Option<f64> {
    lookup_f64(vintage, &["statistics", "ratings_average"])
}

pub fn price(matched: &Value) -> Option<f64> {
    lookup_f64(matched, &["price", "amount"])
}

/// Map one catalog match to a [`WineRecord`].
///
/// Fails only when the wine id, name or type code is absent.
pub fn extract_wine(matched: &Value) -> Result<WineRecord> {
    let vintage = required(matched, &["vintage"])?;
    let wine = required(matched, &["vintage", "wine"])?;

    let id = required_u64(matched, &["vintage", "wine", "id"])?;
    let name = required(matched, &["vintage", "wine", "name"])?
        .as_str()
        .ok_or_else(|| AppError::missing("vintage.wine.name"))?
        .to_string();
    let wine_type_id = u32::try_from(required_u64(matched, &["vintage", "wine", "type_id"])?)
        .map_err(|_| AppError::missing("vintage.wine.type_id"))?;

    Ok(WineRecord {
        id,
        name,
        year: vintage_year(vintage),
        country: country_name(wine),
        region: region_name(wine),
        wine_type_id,
        most_used_grapes: primary_grape(wine),
        winery: winery_name(wine),
        rating: rating(vintage),
        price: price(matched),
        style: style_name(wine),
    })
}
