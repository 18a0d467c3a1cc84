//! Train schedule view model and clock-string helpers.

use serde::{Deserialize, Serialize};

/// Shown in place of a missing departure or arrival time.
pub const PLACEHOLDER_TIME: &str = "--:--";

/// One row on a board or in search results.
///
/// Times are `HH:MM` strings exactly as the provider reported them (first
/// five characters), so they sort lexically in clock order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSchedule {
    pub train_no: String,
    /// Raw zh-TW train type name, e.g. `自強(3000)(EMU3000 型電車)`.
    pub train_type: String,
    pub dep_time: String,
    pub arr_time: String,
    pub destination: String,
    /// Minutes late. Always 0 for timetable (OD) results.
    pub delay_minutes: i32,
}

impl TrainSchedule {
    /// Short display name for the train type.
    ///
    /// ```
    /// use tra_timetable::domain::TrainSchedule;
    ///
    /// let mut t = TrainSchedule {
    ///     train_no: "123".into(),
    ///     train_type: "區間車".into(),
    ///     dep_time: "08:00".into(),
    ///     arr_time: "09:00".into(),
    ///     destination: "基隆".into(),
    ///     delay_minutes: 0,
    /// };
    /// assert_eq!(t.display_type(), "區間車");
    ///
    /// t.train_type = "自強(3000)(EMU3000 型電車)".into();
    /// assert_eq!(t.display_type(), "自強3000");
    /// ```
    pub fn display_type(&self) -> String {
        display_train_type(&self.train_type)
    }

    /// Whether the train is reported late.
    pub fn is_delayed(&self) -> bool {
        self.delay_minutes > 0
    }

    /// Departure time as a number, e.g. `"09:15"` → `915`.
    pub fn departure_value(&self) -> u32 {
        clock_value(&self.dep_time)
    }
}

/// Clean up a provider train type name for display.
///
/// Order matters: `自強(3000)` must be checked before `自強`, and `區間快`
/// before `區間`.
pub fn display_train_type(raw: &str) -> String {
    const KNOWN: &[(&str, &str)] = &[
        ("自強(3000)", "自強3000"),
        ("自強", "自強"),
        ("區間快", "區間快"),
        ("區間", "區間車"),
        ("太魯閣", "太魯閣"),
        ("普悠瑪", "普悠瑪"),
    ];

    for (needle, display) in KNOWN {
        if raw.contains(needle) {
            return (*display).to_string();
        }
    }

    raw.split('(').next().unwrap_or_default().trim().to_string()
}

/// Truncate a provider timestamp to `HH:MM`, or the placeholder if absent.
///
/// Truncation is by character, not byte, so odd input never panics.
pub fn clock_prefix(raw: Option<&str>) -> String {
    match raw {
        Some(s) => s.chars().take(5).collect(),
        None => PLACEHOLDER_TIME.to_string(),
    }
}

/// Numeric value of a clock string with its colons removed.
///
/// `"08:00"` → `800`. Anything that is not all digits once colons are
/// stripped (including the placeholder) is 0.
pub fn clock_value(s: &str) -> u32 {
    let digits: String = s.chars().filter(|&c| c != ':').collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(train_type: &str, dep: &str, delay: i32) -> TrainSchedule {
        TrainSchedule {
            train_no: "1".into(),
            train_type: train_type.into(),
            dep_time: dep.into(),
            arr_time: PLACEHOLDER_TIME.into(),
            destination: "臺東".into(),
            delay_minutes: delay,
        }
    }

    #[test]
    fn display_type_prefix_rules() {
        assert_eq!(display_train_type("自強(3000)(EMU3000 型電車)"), "自強3000");
        assert_eq!(display_train_type("自強(推拉式自強號且無自行車車廂)"), "自強");
        assert_eq!(display_train_type("區間快"), "區間快");
        assert_eq!(display_train_type("區間"), "區間車");
        assert_eq!(display_train_type("太魯閣(騰雲座艙)"), "太魯閣");
        assert_eq!(display_train_type("普悠瑪(普悠瑪)"), "普悠瑪");
    }

    #[test]
    fn display_type_fallback_strips_parenthetical() {
        assert_eq!(display_train_type("莒光(無身障座位) "), "莒光");
        assert_eq!(display_train_type("  復興 "), "復興");
        assert_eq!(display_train_type(""), "");
    }

    #[test]
    fn clock_prefix_truncates() {
        assert_eq!(clock_prefix(Some("08:15:00")), "08:15");
        assert_eq!(clock_prefix(Some("08:15")), "08:15");
        assert_eq!(clock_prefix(Some("8")), "8");
        assert_eq!(clock_prefix(None), PLACEHOLDER_TIME);
    }

    #[test]
    fn clock_value_parses_digits() {
        assert_eq!(clock_value("08:00"), 800);
        assert_eq!(clock_value("23:59"), 2359);
        assert_eq!(clock_value("0800"), 800);
        assert_eq!(clock_value(PLACEHOLDER_TIME), 0);
        assert_eq!(clock_value(""), 0);
        assert_eq!(clock_value("ab:cd"), 0);
    }

    #[test]
    fn delay_flags() {
        assert!(schedule("區間", "08:00", 3).is_delayed());
        assert!(!schedule("區間", "08:00", 0).is_delayed());
        assert_eq!(schedule("區間", "09:15", 0).departure_value(), 915);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(schedule("區間", "08:00", 2)).unwrap();
        assert_eq!(json["trainNo"], "1");
        assert_eq!(json["depTime"], "08:00");
        assert_eq!(json["delayMinutes"], 2);
    }
}
