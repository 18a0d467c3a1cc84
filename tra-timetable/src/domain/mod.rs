//! Domain types for the TRA timetable client.
//!
//! These are the simplified view models handed to callers, plus the
//! validated inputs used to build queries.

mod alert;
mod car_type;
mod error;
mod favorite;
mod schedule;
mod station;

pub use alert::Alert;
pub use car_type::CarType;
pub use error::DomainError;
pub use favorite::FavoriteRoute;
pub use schedule::{
    PLACEHOLDER_TIME, TrainSchedule, clock_prefix, clock_value, display_train_type,
};
pub use station::{InvalidStationId, Station, StationId, StationsByCity};
