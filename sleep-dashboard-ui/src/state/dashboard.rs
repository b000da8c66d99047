//! Dashboard State
//!
//! Types shared by the page controller and the chart, plus the page's
//! three-way loading state.

/// Message shown whenever the sleep data request fails
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load sleep data. Please try again later.";

/// One night of sleep as returned by the API
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct SleepRecord {
    pub date: String,
    pub sleep_time: f64,
    pub awake_time: f64,
}

/// Body of `GET /api/sleep-data`
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct SleepDataResponse {
    pub sleep_data: Vec<SleepRecord>,
    #[serde(default)]
    pub avg_sleep_time: Option<f64>,
}

/// What the dashboard is currently showing
#[derive(Clone, Debug, PartialEq)]
pub enum PageState {
    Loading,
    Error(String),
    Loaded {
        records: Vec<SleepRecord>,
        average: Option<f64>,
    },
}

impl PageState {
    /// Loaded state with the average recomputed from the records,
    /// ignoring the server's `avg_sleep_time`.
    pub fn loaded(records: Vec<SleepRecord>) -> Self {
        let average = average_sleep_time(&records);
        PageState::Loaded { records, average }
    }

    pub fn failed() -> Self {
        PageState::Error(LOAD_ERROR_MESSAGE.to_string())
    }
}

/// Mean sleep time, or `None` for no records
pub fn average_sleep_time(records: &[SleepRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.sleep_time).sum();
    Some(sum / records.len() as f64)
}

/// Average line shown under the chart
pub fn average_label(average: Option<f64>) -> String {
    match average {
        Some(avg) => format!("Average Sleep Time: {:.2} hours", avg),
        None => "Average Sleep Time: N/A hours".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, sleep_time: f64) -> SleepRecord {
        SleepRecord {
            date: date.to_string(),
            sleep_time,
            awake_time: 24.0 - sleep_time,
        }
    }

    #[test]
    fn test_loaded_recomputes_average() {
        let state = PageState::loaded(vec![record("2024-01-01", 7.5), record("2024-01-02", 8.0)]);

        match state {
            PageState::Loaded { records, average } => {
                assert_eq!(records.len(), 2);
                assert_eq!(average, Some(7.75));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_loaded_empty_has_no_average() {
        assert_eq!(
            PageState::loaded(Vec::new()),
            PageState::Loaded {
                records: Vec::new(),
                average: None
            }
        );
    }

    #[test]
    fn test_client_average_ignores_server_value() {
        let body = r#"{
            "sleep_data": [
                {"date": "2024-01-01", "sleep_time": 6.0, "awake_time": 18.0},
                {"date": "2024-01-02", "sleep_time": 7.0, "awake_time": 17.0}
            ],
            "avg_sleep_time": 99.0
        }"#;
        let response: SleepDataResponse = serde_json::from_str(body).unwrap();

        match PageState::loaded(response.sleep_data) {
            PageState::Loaded { average, .. } => assert_eq!(average, Some(6.5)),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_null_average_deserializes() {
        let response: SleepDataResponse =
            serde_json::from_str(r#"{"sleep_data": [], "avg_sleep_time": null}"#).unwrap();
        assert!(response.sleep_data.is_empty());
        assert_eq!(response.avg_sleep_time, None);
    }

    #[test]
    fn test_average_label() {
        assert_eq!(average_label(Some(7.758)), "Average Sleep Time: 7.76 hours");
        assert_eq!(average_label(Some(8.0)), "Average Sleep Time: 8.00 hours");
        assert_eq!(average_label(None), "Average Sleep Time: N/A hours");
    }

    #[test]
    fn test_failed_state_message() {
        assert_eq!(
            PageState::failed(),
            PageState::Error("Failed to load sleep data. Please try again later.".to_string())
        );
    }
}
