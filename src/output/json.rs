use tracing::error;

use crate::core::SessionView;

pub(crate) fn output_summary_json(views: &[SessionView]) -> String {
    serde_json::to_string_pretty(views).unwrap_or_else(|e| {
        error!("Failed to serialize JSON output: {}", e);
        "[]".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Session;
    use chrono::{TimeZone, Utc};

    #[test]
    fn json_rows_carry_utc_and_display_times() {
        let start = Utc.with_ymd_and_hms(2026, 10, 19, 16, 0, 0).unwrap();
        let views = vec![SessionView {
            session: Session {
                id: 1,
                project: "Alpha".to_string(),
                task: "write report".to_string(),
                start_time: start,
                end_time: None,
            },
            start: "10-19-2026 09:00:00".to_string(),
            end: "N/A".to_string(),
            duration: "RUNNING".to_string(),
        }];
        let json: serde_json::Value = serde_json::from_str(&output_summary_json(&views)).unwrap();
        let row = &json.as_array().unwrap()[0];
        assert_eq!(row["project"], "Alpha");
        assert_eq!(row["start_time"], "2026-10-19T16:00:00Z");
        assert_eq!(row["start"], "10-19-2026 09:00:00");
        assert_eq!(row["duration"], "RUNNING");
    }

    #[test]
    fn empty_list_is_empty_array() {
        assert_eq!(output_summary_json(&[]), "[]");
    }
}
