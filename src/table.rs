/// GameLake Table Implementation
///
/// A `GameTable` is an immutable, ordered collection of game records. It is
/// materialized once per process from the gold-layer query result and then
/// only ever read: views and aggregates are derived from it without copying
/// or mutating the underlying rows.
///
/// # Examples
///
/// ```
/// use gamelake::{GameRecord, GameTable, ReleaseDate};
///
/// let table = GameTable::new(vec![GameRecord {
///     name: "Halo".to_string(),
///     rating: 4.5,
///     metacritic: 90,
///     released: ReleaseDate::parse("2001-11-15").unwrap(),
///     playtime: 10.0,
/// }]);
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get(0).unwrap().name, "Halo");
/// ```

use crate::error::LakeError;
use crate::record::{self, GameRecord, WireResult, EXPECTED_COLUMNS};

/// Immutable ordered table of game records.
pub struct GameTable {
    records: Vec<GameRecord>,
}

impl GameTable {
    /// Create a table from already-decoded records. Row order is preserved
    /// and becomes the tie-break order for sorted projections.
    pub fn new(records: Vec<GameRecord>) -> Self {
        GameTable { records }
    }

    /// Decode a wire result into a table.
    ///
    /// Returns the table plus the number of rows that were skipped during
    /// decoding. A malformed header is fatal; malformed rows are not.
    pub fn from_wire(result: &WireResult) -> Result<(Self, usize), LakeError> {
        let (records, skipped) = record::decode_rows(result)?;
        Ok((GameTable::new(records), skipped))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GameRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.records.iter()
    }

    /// Export the whole table to CSV. See [`records_to_csv`].
    pub fn to_csv(&self) -> String {
        records_to_csv(&self.records)
    }

    /// Export the whole table to pretty-printed JSON. See [`records_to_json`].
    pub fn to_json(&self) -> Result<String, LakeError> {
        records_to_json(&self.records)
    }
}

impl std::fmt::Debug for GameTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GameTable {{ rows: {} }}", self.records.len())
    }
}

/// Render records as CSV with a header row.
///
/// Names containing commas, quotes, or newlines are properly escaped; the
/// numeric and date columns never need escaping.
pub fn records_to_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let mut result = String::new();
    result.push_str(&EXPECTED_COLUMNS.join(","));
    result.push('\n');

    for record in records {
        let name = if record.name.contains(',')
            || record.name.contains('"')
            || record.name.contains('\n')
        {
            format!("\"{}\"", record.name.replace('"', "\"\""))
        } else {
            record.name.clone()
        };
        result.push_str(&format!(
            "{},{},{},{},{}\n",
            name, record.rating, record.metacritic, record.released, record.playtime
        ));
    }
    result
}

/// Render records as a pretty-printed JSON array of objects.
pub fn records_to_json<'a, I>(records: I) -> Result<String, LakeError>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let rows: Vec<&GameRecord> = records.into_iter().collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
