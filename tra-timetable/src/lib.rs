//! Taiwan Railway timetable access layer.
//!
//! Talks to the TDX open-data API on behalf of a timetable app: logs in
//! with OAuth2 client credentials, fetches live boards, origin-destination
//! timetables, service alerts and the station list, and serves them to a
//! local JSON front end.

pub mod config;
pub mod domain;
pub mod repository;
pub mod settings;
pub mod tdx;
pub mod web;
