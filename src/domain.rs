use derive_more::{Display, From};
use serde::Serialize;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Precipitation {
    pub precipitation: Option<f64>,
    pub date: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Station {
    pub station: String,
    pub id: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
    pub station: String,
}

/// Min/avg/max of `tobs` over a date range. Every field is `None` when no
/// rows fall inside the range.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TripStats {
    #[serde(rename = "Min")]
    pub min: Option<f64>,
    #[serde(rename = "Average")]
    pub average: Option<f64>,
    #[serde(rename = "Max")]
    pub max: Option<f64>,
}

/// Calendar date as stored in the dataset (`YYYY-MM-DD`). Not validated,
/// bounds compare as text.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub struct IsoDate(String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IsoDate {
    fn from(date: &str) -> Self {
        IsoDate(date.to_owned())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
