//! Pure normalizers: raw provider JSON in, flat row tables out.
//!
//! Each submodule declares the raw payload shape it accepts as serde structs
//! with optional fields, then maps it onto the row types in [`crate::models`]
//! with explicit defaults. Missing or empty source collections yield an
//! empty table; the column schema of every row type is stable regardless.
//!
//! Sentinels: text fields that describe a person or place default to
//! `"Unknown"`, plain attribute fields (dates, codes, venues) to `"N/A"`,
//! counters to zero.

pub mod matches;
pub mod odds;
pub mod performance;
pub mod players;
pub mod standings;
pub mod teams;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) const UNKNOWN: &str = "Unknown";
pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Deserialize `raw` into `T`, falling back to `T::default()` when the
/// payload does not have the expected shape. Shape mismatches are a
/// degraded-data condition, not an error.
pub(crate) fn parse_or_default<T>(raw: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    match T::deserialize(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(%err, "unexpected payload shape, treating as empty");
            T::default()
        }
    }
}

/// Title-case every whitespace-separated word: first letter uppercased,
/// the rest lowercased.
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_case_normalizes_words() {
        assert_eq!(title_case("mikel ARTETA"), "Mikel Arteta");
        assert_eq!(title_case("  spain "), "Spain");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn parse_or_default_degrades_to_default() {
        #[derive(Debug, Default, PartialEq, serde::Deserialize)]
        struct Shape {
            #[serde(default)]
            items: Vec<u32>,
        }

        assert_eq!(
            parse_or_default::<Shape>(&json!({"items": [1, 2]})),
            Shape { items: vec![1, 2] }
        );
        // Wrong shape entirely: empty table, not a panic.
        assert_eq!(parse_or_default::<Shape>(&json!("nope")), Shape::default());
    }
}
