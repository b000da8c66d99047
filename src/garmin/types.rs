//! Garmin Connect sleep payloads and the CSV rows built from them

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Header of the standard export, in column order
pub const SLEEP_COLUMNS: [&str; 8] = [
    "date",
    "total_sleep",
    "sleep_score",
    "start_time",
    "end_time",
    "resting_heart_rate",
    "avg_hrv",
    "sleep_quality",
];

/// Header of the detailed export, in column order
pub const DETAILED_COLUMNS: [&str; 22] = [
    "date",
    "total_sleep",
    "deep_sleep",
    "light_sleep",
    "rem_sleep",
    "awake_time",
    "sleep_score",
    "start_time",
    "end_time",
    "resting_heart_rate",
    "avg_stress",
    "body_battery_change",
    "avg_hrv",
    "awake_count",
    "sleep_quality",
    "average_respiration",
    "lowest_respiration",
    "highest_respiration",
    "restless_moments",
    "sleep_efficiency",
    "deep_sleep_percentage",
    "rem_sleep_percentage",
];

// ============================================
// RESPONSE PAYLOADS
// ============================================

/// Body of the daily sleep endpoint for one date
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepDataPayload {
    #[serde(rename = "dailySleepDTO")]
    pub daily_sleep_dto: Option<DailySleepDto>,
    pub resting_heart_rate: Option<f64>,
    pub avg_overnight_hrv: Option<f64>,
    pub body_battery_change: Option<f64>,
    pub restless_moments_count: Option<f64>,
}

/// Summary of one night's sleep
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySleepDto {
    pub sleep_time_seconds: Option<f64>,
    pub deep_sleep_seconds: Option<f64>,
    pub light_sleep_seconds: Option<f64>,
    pub rem_sleep_seconds: Option<f64>,
    pub awake_sleep_seconds: Option<f64>,
    /// Local wall-clock time encoded as epoch milliseconds
    pub sleep_start_timestamp_local: Option<i64>,
    pub sleep_end_timestamp_local: Option<i64>,
    pub sleep_scores: Option<SleepScores>,
    pub avg_sleep_stress: Option<f64>,
    pub awake_count: Option<f64>,
    pub average_respiration_value: Option<f64>,
    pub lowest_respiration_value: Option<f64>,
    pub highest_respiration_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SleepScores {
    pub overall: Option<OverallScore>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub value: Option<f64>,
    pub qualifier_key: Option<String>,
}

impl SleepDataPayload {
    /// Pair the payload with its date, or `None` when it holds no sleep summary
    pub fn into_night(self, date: NaiveDate) -> Option<Night> {
        let sleep = self.daily_sleep_dto?;

        Some(Night {
            date,
            sleep,
            resting_heart_rate: self.resting_heart_rate,
            avg_overnight_hrv: self.avg_overnight_hrv,
            body_battery_change: self.body_battery_change,
            restless_moments_count: self.restless_moments_count,
        })
    }
}

/// One date with a sleep summary
#[derive(Debug, Clone, PartialEq)]
pub struct Night {
    pub date: NaiveDate,
    pub sleep: DailySleepDto,
    pub resting_heart_rate: Option<f64>,
    pub avg_overnight_hrv: Option<f64>,
    pub body_battery_change: Option<f64>,
    pub restless_moments_count: Option<f64>,
}

impl Night {
    fn hours(seconds: Option<f64>) -> f64 {
        seconds.unwrap_or(0.0) / SECONDS_PER_HOUR
    }

    fn overall_score(&self) -> Option<&OverallScore> {
        self.sleep.sleep_scores.as_ref()?.overall.as_ref()
    }

    fn sleep_score(&self) -> Option<f64> {
        self.overall_score()?.value
    }

    fn sleep_quality(&self) -> Option<String> {
        self.overall_score()?.qualifier_key.clone()
    }

    fn start_time(&self) -> Option<String> {
        format_local_timestamp(self.sleep.sleep_start_timestamp_local)
    }

    fn end_time(&self) -> Option<String> {
        format_local_timestamp(self.sleep.sleep_end_timestamp_local)
    }
}

/// Format a local epoch-millisecond timestamp as wall-clock time
///
/// Zero counts as absent.
fn format_local_timestamp(millis: Option<i64>) -> Option<String> {
    let millis = millis.filter(|ms| *ms != 0)?;
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
}

/// `part / total` as a percentage, 0 when undefined
fn percentage(part: f64, total: f64) -> f64 {
    let value = part * 100.0 / total;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ============================================
// CSV ROWS
// ============================================

/// One line of the standard export
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SleepRow {
    pub date: String,
    pub total_sleep: f64,
    pub sleep_score: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub resting_heart_rate: Option<f64>,
    pub avg_hrv: Option<f64>,
    pub sleep_quality: Option<String>,
}

impl From<&Night> for SleepRow {
    fn from(night: &Night) -> Self {
        Self {
            date: night.date.format("%Y-%m-%d").to_string(),
            total_sleep: Night::hours(night.sleep.sleep_time_seconds),
            sleep_score: night.sleep_score(),
            start_time: night.start_time(),
            end_time: night.end_time(),
            resting_heart_rate: night.resting_heart_rate,
            avg_hrv: night.avg_overnight_hrv,
            sleep_quality: night.sleep_quality(),
        }
    }
}

/// One line of the detailed export, with stage breakdown and derived shares
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailedSleepRow {
    pub date: String,
    pub total_sleep: f64,
    pub deep_sleep: f64,
    pub light_sleep: f64,
    pub rem_sleep: f64,
    /// Time awake during the sleep window, not the dashboard's `24 - sleep`
    pub awake_time: f64,
    pub sleep_score: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub resting_heart_rate: Option<f64>,
    pub avg_stress: Option<f64>,
    pub body_battery_change: Option<f64>,
    pub avg_hrv: Option<f64>,
    pub awake_count: Option<f64>,
    pub sleep_quality: Option<String>,
    pub average_respiration: Option<f64>,
    pub lowest_respiration: Option<f64>,
    pub highest_respiration: Option<f64>,
    pub restless_moments: Option<f64>,
    pub sleep_efficiency: f64,
    pub deep_sleep_percentage: f64,
    pub rem_sleep_percentage: f64,
}

impl From<&Night> for DetailedSleepRow {
    fn from(night: &Night) -> Self {
        let sleep = &night.sleep;
        let total_sleep = Night::hours(sleep.sleep_time_seconds);
        let deep_sleep = Night::hours(sleep.deep_sleep_seconds);
        let light_sleep = Night::hours(sleep.light_sleep_seconds);
        let rem_sleep = Night::hours(sleep.rem_sleep_seconds);

        Self {
            date: night.date.format("%Y-%m-%d").to_string(),
            total_sleep,
            deep_sleep,
            light_sleep,
            rem_sleep,
            awake_time: Night::hours(sleep.awake_sleep_seconds),
            sleep_score: night.sleep_score(),
            start_time: night.start_time(),
            end_time: night.end_time(),
            resting_heart_rate: night.resting_heart_rate,
            avg_stress: sleep.avg_sleep_stress,
            body_battery_change: night.body_battery_change,
            avg_hrv: night.avg_overnight_hrv,
            awake_count: sleep.awake_count,
            sleep_quality: night.sleep_quality(),
            average_respiration: sleep.average_respiration_value,
            lowest_respiration: sleep.lowest_respiration_value,
            highest_respiration: sleep.highest_respiration_value,
            restless_moments: night.restless_moments_count,
            sleep_efficiency: percentage(deep_sleep + light_sleep + rem_sleep, total_sleep),
            deep_sleep_percentage: percentage(deep_sleep, total_sleep),
            rem_sleep_percentage: percentage(rem_sleep, total_sleep),
        }
    }
}
