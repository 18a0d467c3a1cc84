//! Origin-destination search: query type and result filtering.

use chrono::NaiveDate;

use crate::domain::{CarType, StationId, TrainSchedule, clock_value};
use crate::tdx::{OdTrain, convert_od_train};

/// An origin-destination timetable search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: StationId,
    pub dest: StationId,
    pub date: NaiveDate,
    /// Earliest departure, `HH:MM`.
    pub start_time: String,
    pub car_type: CarType,
}

impl SearchQuery {
    /// Build a query from a car-type keyword in either language.
    pub fn new(
        origin: StationId,
        dest: StationId,
        date: NaiveDate,
        start_time: impl Into<String>,
        car_type_keyword: &str,
    ) -> Self {
        Self {
            origin,
            dest,
            date,
            start_time: start_time.into(),
            car_type: CarType::from_keyword(car_type_keyword),
        }
    }
}

/// Turn raw OD rows into search results.
///
/// Drops incomplete rows, then keeps departures at or after `start_time`,
/// applies the car-type filter, and sorts by departure time. The sort is
/// stable, so trains leaving at the same minute keep provider order.
pub fn filter_timetable(
    rows: &[OdTrain],
    start_time: &str,
    car_type: CarType,
) -> Vec<TrainSchedule> {
    let earliest = clock_value(start_time);

    let mut results: Vec<TrainSchedule> = rows
        .iter()
        .filter_map(convert_od_train)
        .filter(|t| t.departure_value() >= earliest)
        .filter(|t| car_type.accepts(t))
        .collect();

    results.sort_by(|a, b| a.dep_time.cmp(&b.dep_time));
    results
}
