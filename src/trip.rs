use chrono::{Duration, NaiveDate};

use crate::domain::IsoDate;

/// Last day covered by the dataset. Treated as a fixed reference point.
pub const DATASET_END: &str = "2017-08-23";

/// Start date the trip routes fall back to under [`StartDatePolicy::Pinned`].
pub const PINNED_TRIP_START: &str = "2016-08-23";

pub const TOBS_WINDOW_DAYS: i64 = 365;

/// How trip routes treat the `start_date` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartDatePolicy {
    /// Discard the requested start and use [`PINNED_TRIP_START`].
    #[default]
    Pinned,
    /// Use the requested start verbatim.
    Requested,
}

impl StartDatePolicy {
    fn resolve(self, requested: IsoDate) -> IsoDate {
        match self {
            StartDatePolicy::Pinned => IsoDate::from(PINNED_TRIP_START),
            StartDatePolicy::Requested => requested,
        }
    }
}

/// Inclusive date range evaluated by the trip stats query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripWindow {
    pub start: IsoDate,
    pub end: IsoDate,
}

impl TripWindow {
    /// `/trip/<start>`: the end is always [`DATASET_END`].
    pub fn from_start(requested_start: IsoDate, policy: StartDatePolicy) -> TripWindow {
        TripWindow {
            start: policy.resolve(requested_start),
            end: IsoDate::from(DATASET_END),
        }
    }

    /// `/trip/<start>/<end>`: the end is honored.
    pub fn between(requested_start: IsoDate, end: IsoDate, policy: StartDatePolicy) -> TripWindow {
        TripWindow {
            start: policy.resolve(requested_start),
            end,
        }
    }
}

/// Exclusive lower bound for `/tobs`: one year before [`DATASET_END`].
pub fn tobs_window_start() -> IsoDate {
    let end = NaiveDate::parse_from_str(DATASET_END, "%Y-%m-%d")
        .expect("DATASET_END is a valid calendar date");
    let start = end - Duration::days(TOBS_WINDOW_DAYS);

    IsoDate::from(start.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tobs_window_starts_a_year_before_the_dataset_end() {
        assert_eq!(tobs_window_start(), IsoDate::from("2016-08-23"));
    }

    #[test]
    fn pinned_policy_discards_the_requested_start() {
        let window = TripWindow::from_start(IsoDate::from("2012-02-28"), StartDatePolicy::Pinned);

        assert_eq!(window.start, IsoDate::from(PINNED_TRIP_START));
        assert_eq!(window.end, IsoDate::from(DATASET_END));
    }

    #[test]
    fn requested_policy_keeps_the_requested_start() {
        let window = TripWindow::between(
            IsoDate::from("2012-02-28"),
            IsoDate::from("2012-03-05"),
            StartDatePolicy::Requested,
        );

        assert_eq!(window.start, IsoDate::from("2012-02-28"));
        assert_eq!(window.end, IsoDate::from("2012-03-05"));
    }

    #[test]
    fn range_route_honors_the_end_date() {
        let window = TripWindow::between(
            IsoDate::from("9999-01-01"),
            IsoDate::from("2016-08-24"),
            StartDatePolicy::Pinned,
        );

        assert_eq!(window.start, IsoDate::from("2016-08-23"));
        assert_eq!(window.end, IsoDate::from("2016-08-24"));
    }
}
