//! Service alerts.

use serde::{Deserialize, Serialize};

/// A TRA service alert (disruption, engineering work, notice).
///
/// Field names follow the provider's JSON so alerts can be decoded and
/// re-served without a separate DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Alert {
    #[serde(rename = "AlertID")]
    pub alert_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Option<String>,
    #[serde(default)]
    pub publish_time: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub alert_url: Option<String>,
}

impl Alert {
    /// Publish time formatted for display: `2025-01-01T08:30:00+08:00` →
    /// `2025-01-01 08:30`.
    pub fn display_time(&self) -> String {
        self.publish_time.replace('T', " ").chars().take(16).collect()
    }

    /// The effects text, if present and not blank.
    pub fn effects_text(&self) -> Option<&str> {
        self.effects.as_deref().filter(|e| !e.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> Alert {
        serde_json::from_str(
            r#"{
                "AlertID": "A1",
                "Title": "Delay",
                "Description": "Typhoon",
                "Effects": "  ",
                "PublishTime": "2025-01-01T08:30:00+08:00",
                "StartTime": "2025-01-01T08:00:00+08:00",
                "EndTime": "2025-01-02T08:00:00+08:00",
                "AlertUrl": null
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_provider_field_names() {
        let a = alert();
        assert_eq!(a.alert_id, "A1");
        assert_eq!(a.title, "Delay");
        assert_eq!(a.alert_url, None);
    }

    #[test]
    fn display_time_is_trimmed() {
        assert_eq!(alert().display_time(), "2025-01-01 08:30");
    }

    #[test]
    fn blank_effects_hidden() {
        let mut a = alert();
        assert_eq!(a.effects_text(), None);
        a.effects = Some("Southbound only".into());
        assert_eq!(a.effects_text(), Some("Southbound only"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let a: Alert = serde_json::from_str(r#"{"AlertID": "A2"}"#).unwrap();
        assert_eq!(a.title, "");
        assert_eq!(a.effects, None);
        assert_eq!(a.display_time(), "");
    }
}
