/// JSON payload types for the dashboard API.
use crate::date::ReleaseDate;
use crate::error::LakeError;
use crate::record::GameRecord;
use crate::view::{Aggregates, FilterCriteria, FilteredView};
use serde::{Deserialize, Serialize};

/// How many games the top-rated chart shows.
pub const TOP_RATED_LIMIT: usize = 10;

/// Filter parameters accepted by the dashboard endpoints.
#[derive(Debug, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_low")]
    pub low: i32,
    #[serde(default = "default_high")]
    pub high: i32,
}

fn default_low() -> i32 {
    0
}

fn default_high() -> i32 {
    100
}

impl FilterParams {
    /// Validate the parameters and turn them into filter criteria.
    pub fn criteria(&self) -> Result<FilterCriteria, String> {
        if !(0..=100).contains(&self.low) || !(0..=100).contains(&self.high) {
            return Err("metacritic bounds must lie within 0..=100".to_string());
        }
        if self.low > self.high {
            return Err("low metacritic bound exceeds high bound".to_string());
        }
        Ok(FilterCriteria::new(self.search.clone(), self.low, self.high))
    }
}

/// One bar of the top-rated chart.
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub rating: f64,
}

/// One point of the chronological metacritic trend.
#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub released: ReleaseDate,
    pub metacritic: i32,
}

/// Everything one dashboard render needs: summary tiles, both charts, and
/// the filtered rows for the dataset explorer.
#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    pub summary: Aggregates,
    pub top_rated: Vec<ChartPoint>,
    pub trend: Vec<TrendPoint>,
    pub rows: Vec<GameRecord>,
}

impl DashboardPayload {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        DashboardPayload {
            summary: view.summary(),
            top_rated: view
                .top_by_rating(TOP_RATED_LIMIT)
                .into_iter()
                .map(|record| ChartPoint {
                    name: record.name.clone(),
                    rating: record.rating,
                })
                .collect(),
            trend: view
                .release_trend()
                .into_iter()
                .map(|record| TrendPoint {
                    released: record.released,
                    metacritic: record.metacritic,
                })
                .collect(),
            rows: view.records().cloned().collect(),
        }
    }
}

/// Error banner body: the message plus the configuration hint, if any.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&LakeError> for ErrorBody {
    fn from(err: &LakeError) -> Self {
        ErrorBody {
            message: err.message.clone(),
            hint: err.hint.clone(),
        }
    }
}
