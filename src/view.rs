/// GameLake View Implementation
///
/// Views are read-only derived subsets of a `GameTable`. A `FilteredView`
/// keeps a mapping from view indices to table indices and is recomputed on
/// every filter change; nothing here mutates the parent table, so the same
/// criteria over the same table always yield the same view.

use crate::record::GameRecord;
use crate::table::GameTable;
use serde::Serialize;
use std::cmp::Ordering;

/// User-supplied filter criteria for one interaction.
///
/// `search` matches as a case-insensitive substring of the game name (empty
/// matches everything); the metacritic bounds are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub metacritic_low: i32,
    pub metacritic_high: i32,
}

impl FilterCriteria {
    pub fn new(search: impl Into<String>, metacritic_low: i32, metacritic_high: i32) -> Self {
        FilterCriteria {
            search: search.into(),
            metacritic_low,
            metacritic_high,
        }
    }

    /// Criteria that match every row: empty search, full score range.
    pub fn all() -> Self {
        FilterCriteria::new("", 0, 100)
    }
}

/// A `FilteredView` selects the rows of the parent table satisfying the
/// filter criteria. Maintains a mapping from view indices to table indices,
/// in table order.
///
/// # Examples
///
/// ```
/// use gamelake::{FilterCriteria, FilteredView, GameRecord, GameTable, ReleaseDate};
///
/// let table = GameTable::new(vec![
///     GameRecord {
///         name: "Halo".to_string(),
///         rating: 4.5,
///         metacritic: 90,
///         released: ReleaseDate::parse("2001-11-15").unwrap(),
///         playtime: 10.0,
///     },
///     GameRecord {
///         name: "Portal".to_string(),
///         rating: 4.7,
///         metacritic: 90,
///         released: ReleaseDate::parse("2007-10-10").unwrap(),
///         playtime: 8.0,
///     },
/// ]);
///
/// let view = FilteredView::new(&table, &FilterCriteria::new("halo", 0, 100));
/// assert_eq!(view.len(), 1);
/// assert_eq!(view.get(0).unwrap().name, "Halo");
/// ```
pub struct FilteredView<'a> {
    table: &'a GameTable,
    /// view_to_table[view_index] = table_index, ascending
    view_to_table: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Build a view of `table` containing the rows matching `criteria`.
    pub fn new(table: &'a GameTable, criteria: &FilterCriteria) -> Self {
        let needle = criteria.search.to_lowercase();

        let view_to_table = table
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                (needle.is_empty() || record.name.to_lowercase().contains(&needle))
                    && record.metacritic >= criteria.metacritic_low
                    && record.metacritic <= criteria.metacritic_high
            })
            .map(|(index, _)| index)
            .collect();

        FilteredView {
            table,
            view_to_table,
        }
    }

    pub fn len(&self) -> usize {
        self.view_to_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_table.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a GameRecord> {
        let table_index = *self.view_to_table.get(index)?;
        self.table.get(table_index)
    }

    /// The matching records, in table order.
    pub fn records(&self) -> impl Iterator<Item = &'a GameRecord> + '_ {
        self.view_to_table
            .iter()
            .filter_map(|&index| self.table.get(index))
    }

    /// Summary statistics over the view. Every mean is `None` when the view
    /// is empty; no NaN ever leaves this function.
    pub fn summary(&self) -> Aggregates {
        let count = self.len();
        if count == 0 {
            return Aggregates {
                count: 0,
                mean_rating: None,
                mean_metacritic: None,
                mean_playtime: None,
            };
        }

        let mut rating_sum = 0.0;
        let mut metacritic_sum = 0.0;
        let mut playtime_sum = 0.0;
        for record in self.records() {
            rating_sum += record.rating;
            metacritic_sum += record.metacritic as f64;
            playtime_sum += record.playtime;
        }

        let n = count as f64;
        Aggregates {
            count,
            mean_rating: Some(rating_sum / n),
            mean_metacritic: Some(metacritic_sum / n),
            mean_playtime: Some(playtime_sum / n),
        }
    }

    /// The `n` highest-rated games, descending by rating. Equal ratings keep
    /// their table order (stable sort).
    pub fn top_by_rating(&self, n: usize) -> Vec<&'a GameRecord> {
        let mut rows: Vec<&GameRecord> = self.records().collect();
        rows.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
        rows.truncate(n);
        rows
    }

    /// All matching games in chronological release order (stable: same-day
    /// releases keep their table order).
    pub fn release_trend(&self) -> Vec<&'a GameRecord> {
        let mut rows: Vec<&GameRecord> = self.records().collect();
        rows.sort_by_key(|record| record.released);
        rows
    }
}

/// Summary statistics for a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub count: usize,
    pub mean_rating: Option<f64>,
    pub mean_metacritic: Option<f64>,
    pub mean_playtime: Option<f64>,
}
