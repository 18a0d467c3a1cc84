//! Conversion from TDX DTOs to view models.

use crate::domain::{Station, StationsByCity, TrainSchedule, clock_prefix};

use super::types::{LiveBoardEntry, OdTrain, StationRecord};

/// Convert live-board rows to schedules, keeping the provider's order.
pub fn convert_live_board(entries: Vec<LiveBoardEntry>) -> Vec<TrainSchedule> {
    entries
        .into_iter()
        .map(|raw| TrainSchedule {
            train_no: raw.train_no,
            train_type: raw.train_type_name.zh_tw,
            dep_time: clock_prefix(raw.scheduled_departure_time.as_deref()),
            arr_time: clock_prefix(raw.scheduled_arrival_time.as_deref()),
            destination: raw.ending_station_name.zh_tw,
            delay_minutes: raw.delay_time,
        })
        .collect()
}

/// Group stations by city, dropping any whose city is absent or blank.
pub fn group_stations_by_city(records: Vec<StationRecord>) -> StationsByCity {
    let mut by_city = StationsByCity::new();

    for record in records {
        let Some(city) = record.location_city.filter(|c| !c.trim().is_empty()) else {
            continue;
        };

        by_city
            .entry(city)
            .or_default()
            .push(Station::new(record.station_id, record.station_name.zh_tw));
    }

    by_city
}

/// Convert one OD timetable row.
///
/// Returns `None` if the row lacks train info or either stop time. Leaf
/// fields that are missing become empty strings (or the time placeholder).
/// The OD endpoint carries no delay data, so `delay_minutes` is 0.
pub fn convert_od_train(row: &OdTrain) -> Option<TrainSchedule> {
    let info = row.daily_train_info.as_ref()?;
    let origin = row.origin_stop_time.as_ref()?;
    let dest = row.destination_stop_time.as_ref()?;

    Some(TrainSchedule {
        train_no: info.train_no.clone().unwrap_or_default(),
        train_type: info
            .train_type_name
            .as_ref()
            .map(|n| n.zh_tw.clone())
            .unwrap_or_default(),
        dep_time: clock_prefix(origin.departure_time.as_deref()),
        arr_time: clock_prefix(dest.arrival_time.as_deref()),
        destination: info
            .ending_station_name
            .as_ref()
            .map(|n| n.zh_tw.clone())
            .unwrap_or_default(),
        delay_minutes: 0,
    })
}
