//! Car-type search filter.
//!
//! Search screens pass a car-type keyword in either display language
//! ("Tze-Chiang" or "自強", and so on). The keyword is mapped onto a zh-TW
//! substring that is matched against the provider's train type name.

use super::TrainSchedule;

const TZE_CHIANG: &str = "自強";
const TAROKO: &str = "太魯閣";
const PUYUMA: &str = "普悠瑪";
const LOCAL: &str = "區間";

/// A parsed car-type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarType {
    /// "All" / "所有": no filtering.
    All,
    /// Tze-Chiang limited express.
    TzeChiang,
    /// Taroko or Puyuma tilting express, sold as the same premium class.
    Premium,
    /// Local and fast-local trains.
    Local,
    /// A keyword we don't recognise. Matches every train.
    Unrecognised,
}

impl CarType {
    /// Map a keyword in either language to a filter.
    ///
    /// Matching is by substring, so labels like "Puyuma/Taroko" work.
    pub fn from_keyword(keyword: &str) -> Self {
        let has = |needles: &[&str]| needles.iter().any(|n| keyword.contains(n));

        if has(&["All", "所有"]) {
            CarType::All
        } else if has(&["Tze-Chiang", TZE_CHIANG]) {
            CarType::TzeChiang
        } else if has(&["Puyuma", PUYUMA, "Taroko", TAROKO]) {
            CarType::Premium
        } else if has(&["Local", LOCAL]) {
            CarType::Local
        } else {
            CarType::Unrecognised
        }
    }

    /// The zh-TW substring searched for in train type names.
    fn needle(self) -> &'static str {
        match self {
            CarType::TzeChiang => TZE_CHIANG,
            CarType::Premium => TAROKO,
            CarType::Local => LOCAL,
            CarType::All | CarType::Unrecognised => "",
        }
    }

    /// Whether a train type name passes this filter.
    pub fn matches(self, train_type: &str) -> bool {
        match self {
            CarType::All => true,
            CarType::Premium => train_type.contains(TAROKO) || train_type.contains(PUYUMA),
            other => train_type.contains(other.needle()),
        }
    }

    /// Whether a schedule row passes this filter.
    pub fn accepts(self, train: &TrainSchedule) -> bool {
        self.matches(&train.train_type)
    }
}
