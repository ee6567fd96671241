/// The typed game record and wire-result decoding.
///
/// The gold-layer query returns a tabular JSON result with a column header
/// and positional rows. Decoding maps each row onto a `GameRecord`; rows
/// that do not fit (missing value, wrong type, unparseable date) are skipped
/// and counted rather than failing the whole load.

use crate::date::ReleaseDate;
use crate::error::LakeError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Column names the fixed query is expected to return, in canonical order.
pub const EXPECTED_COLUMNS: [&str; 5] = ["name", "rating", "metacritic", "released", "playtime"];

/// One game as returned by the gold-layer query.
///
/// # Examples
///
/// ```
/// use gamelake::{GameRecord, ReleaseDate};
///
/// let halo = GameRecord {
///     name: "Halo".to_string(),
///     rating: 4.5,
///     metacritic: 90,
///     released: ReleaseDate::parse("2001-11-15").unwrap(),
///     playtime: 10.0,
/// };
/// assert_eq!(halo.metacritic, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    pub rating: f64,
    pub metacritic: i32,
    pub released: ReleaseDate,
    pub playtime: f64,
}

/// Raw tabular result as the query engine returns it: a column header plus
/// positional rows of JSON values.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

/// Decode a wire result into records.
///
/// The header must contain exactly the five expected columns (any order).
/// Returns the decoded records plus the number of rows that were skipped.
pub fn decode_rows(result: &WireResult) -> Result<(Vec<GameRecord>, usize), LakeError> {
    if result.columns.len() != EXPECTED_COLUMNS.len() {
        return Err(LakeError::decode(format!(
            "expected {} columns, query returned {}: [{}]",
            EXPECTED_COLUMNS.len(),
            result.columns.len(),
            result.columns.join(", ")
        )));
    }

    let mut positions = [0usize; EXPECTED_COLUMNS.len()];
    for (slot, expected) in EXPECTED_COLUMNS.iter().enumerate() {
        positions[slot] = result
            .columns
            .iter()
            .position(|c| c == expected)
            .ok_or_else(|| {
                LakeError::decode(format!("query result is missing column '{}'", expected))
            })?;
    }

    let mut records = Vec::with_capacity(result.rows.len());
    let mut skipped = 0;
    for row in &result.rows {
        match decode_row(row, &positions) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    Ok((records, skipped))
}

fn decode_row(row: &[JsonValue], positions: &[usize; 5]) -> Option<GameRecord> {
    let name = row.get(positions[0])?.as_str()?.to_string();
    let rating = float_value(row.get(positions[1])?)?;
    let metacritic = int_value(row.get(positions[2])?)?;
    let released = ReleaseDate::parse(row.get(positions[3])?.as_str()?)?;
    let playtime = float_value(row.get(positions[4])?)?;

    Some(GameRecord {
        name,
        rating,
        metacritic,
        released,
        playtime,
    })
}

fn float_value(value: &JsonValue) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

/// Integer columns sometimes arrive as JSON floats (90.0); accept those too.
fn int_value(value: &JsonValue) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(columns: &[&str], rows: Vec<Vec<JsonValue>>) -> WireResult {
        WireResult {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn test_decode_well_formed_rows() {
        let result = wire(
            &["name", "rating", "metacritic", "released", "playtime"],
            vec![
                vec![json!("Halo"), json!(4.5), json!(90), json!("2001-11-15"), json!(10)],
                vec![json!("Halo 2"), json!(4.0), json!(85.0), json!("2004-11-09"), json!(12.5)],
            ],
        );

        let (records, skipped) = decode_rows(&result).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Halo");
        assert_eq!(records[0].metacritic, 90);
        // Integer-valued float is accepted for the metacritic column
        assert_eq!(records[1].metacritic, 85);
        assert_eq!(records[1].playtime, 12.5);
    }

    #[test]
    fn test_columns_may_arrive_in_any_order() {
        let result = wire(
            &["released", "playtime", "name", "metacritic", "rating"],
            vec![vec![
                json!("2001-11-15"),
                json!(10),
                json!("Halo"),
                json!(90),
                json!(4.5),
            ]],
        );

        let (records, _) = decode_rows(&result).unwrap();
        assert_eq!(records[0].name, "Halo");
        assert_eq!(records[0].rating, 4.5);
        assert_eq!(records[0].released, ReleaseDate::parse("2001-11-15").unwrap());
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let result = wire(
            &["name", "rating", "metacritic", "released", "playtime"],
            vec![
                vec![json!("Halo"), json!(4.5), json!(90), json!("2001-11-15"), json!(10)],
                // null name
                vec![json!(null), json!(4.0), json!(85), json!("2004-11-09"), json!(12)],
                // unparseable date
                vec![json!("Halo 3"), json!(4.3), json!(94), json!("someday"), json!(11)],
                // fractional metacritic
                vec![json!("Halo 4"), json!(3.9), json!(87.5), json!("2012-11-06"), json!(9)],
            ],
        );

        let (records, skipped) = decode_rows(&result).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 3);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let result = wire(
            &["name", "rating", "metacritic", "released"],
            vec![],
        );
        let err = decode_rows(&result).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Decode);
    }

    #[test]
    fn test_unexpected_column_is_fatal() {
        let result = wire(
            &["name", "rating", "metacritic", "released", "genre"],
            vec![],
        );
        let err = decode_rows(&result).unwrap_err();
        assert!(err.message.contains("missing column 'playtime'"));
    }

    #[test]
    fn test_record_serde() {
        let halo = GameRecord {
            name: "Halo".to_string(),
            rating: 4.5,
            metacritic: 90,
            released: ReleaseDate::parse("2001-11-15").unwrap(),
            playtime: 10.0,
        };
        let json = serde_json::to_string(&halo).unwrap();
        assert!(json.contains("\"released\":\"2001-11-15\""));
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, halo);
    }
}
