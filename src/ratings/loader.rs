// JSON rating matrix source.
//
// Format:
//
//   {
//     "users": ["user_304", "user_388"],
//     "items": [
//       { "id": 2273, "ratings": [2, 5] },
//       { "id": "1241", "ratings": [null, 3] }
//     ]
//   }
//
// Item ids may be strings or integers; both are stored as strings. `null`
// marks a missing rating.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::matrix::RatingMatrix;

#[derive(Debug, Deserialize)]
struct MatrixFile {
    users: Vec<String>,
    items: Vec<ItemRow>,
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    id: ItemId,
    ratings: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemId {
    Number(i64),
    Text(String),
}

impl ItemId {
    fn into_string(self) -> String {
        match self {
            ItemId::Number(n) => n.to_string(),
            ItemId::Text(s) => s,
        }
    }
}

/// Parse a rating matrix from a JSON string and check the rating range.
pub fn from_json_str(json: &str, min: f64, max: f64) -> Result<RatingMatrix> {
    let file: MatrixFile = serde_json::from_str(json).context("Invalid rating matrix JSON")?;

    let mut items = Vec::with_capacity(file.items.len());
    let mut cells = Vec::with_capacity(file.items.len());
    for row in file.items {
        items.push(row.id.into_string());
        cells.push(row.ratings);
    }

    let matrix = RatingMatrix::new(items, file.users, cells)?;
    matrix.validate_range(min, max)?;
    Ok(matrix)
}

/// Read a rating matrix from a JSON file on disk.
pub fn load_file(path: &Path, min: f64, max: f64) -> Result<RatingMatrix> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rating matrix from {}", path.display()))?;
    let matrix = from_json_str(&json, min, max)
        .with_context(|| format!("Failed to load rating matrix from {}", path.display()))?;

    info!(
        path = %path.display(),
        items = matrix.item_count(),
        users = matrix.user_count(),
        "Rating matrix loaded"
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_item_ids_and_nulls() {
        let json = r#"{
            "users": ["a", "b"],
            "items": [
                { "id": 10, "ratings": [1, null] },
                { "id": "x", "ratings": [null, 4.5] }
            ]
        }"#;
        let m = from_json_str(json, 0.0, 5.0).unwrap();
        assert_eq!(m.items(), &["10".to_string(), "x".to_string()]);
        assert_eq!(m.rating("10", "b").unwrap(), None);
        assert_eq!(m.rating("x", "b").unwrap(), Some(4.5));
    }

    #[test]
    fn test_out_of_range_rating() {
        let json = r#"{ "users": ["a"], "items": [ { "id": 1, "ratings": [7] } ] }"#;
        let err = from_json_str(json, 0.0, 5.0).unwrap_err();
        assert!(err.to_string().contains("outside"), "got: {err}");
    }

    #[test]
    fn test_malformed_json() {
        assert!(from_json_str("{ not json", 0.0, 5.0).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = load_file(Path::new("/nonexistent/usercf/ratings.json"), 0.0, 5.0);
        assert!(result.is_err());
    }
}
