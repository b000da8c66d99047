//! CSV Loader
//!
//! Reads the Garmin sleep export and turns each data row into a
//! [`SleepRecord`]. The first line of the input is always treated as the
//! header. Columns are looked up by header name and fall back to fixed
//! positions (date = 0, total sleep = 1) when the header does not name them.

use super::*;
use std::path::Path;

/// Header name of the date column in the Garmin export
pub const DEFAULT_DATE_COLUMN: &str = "date";

/// Header name of the total sleep hours column in the Garmin export
pub const DEFAULT_SLEEP_COLUMN: &str = "total_sleep";

const DATE_FALLBACK_POSITION: usize = 0;
const SLEEP_FALLBACK_POSITION: usize = 1;

/// Sleep CSV loader with configurable column names
#[derive(Debug, Clone)]
pub struct SleepCsvLoader {
    /// Header name holding the date label
    date_column: String,
    /// Header name holding total sleep hours
    sleep_column: String,
}

/// Resolved column positions for one input
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnMap {
    date: usize,
    sleep: usize,
}

impl Default for SleepCsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SleepCsvLoader {
    /// Create a loader for the standard Garmin export columns
    pub fn new() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            sleep_column: DEFAULT_SLEEP_COLUMN.to_string(),
        }
    }

    /// Set the header name of the date column
    pub fn with_date_column(mut self, name: &str) -> Self {
        self.date_column = name.to_string();
        self
    }

    /// Set the header name of the sleep hours column
    pub fn with_sleep_column(mut self, name: &str) -> Self {
        self.sleep_column = name.to_string();
        self
    }

    /// Read and parse the CSV file at `path`
    pub async fn load(&self, path: &Path) -> SleepDataResult<LoadReport> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SleepDataError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let report = self.parse_str(&content)?;

        tracing::debug!(
            path = %path.display(),
            rows = report.rows_read,
            records = report.records.len(),
            rejected = report.rejected.len(),
            flagged = report.flagged.len(),
            "Loaded sleep data"
        );

        Ok(report)
    }

    /// Parse CSV content already held in memory
    ///
    /// Input is read line by line: every non-blank physical line is one
    /// record, so a stray quote never spills into the following lines.
    pub fn parse_str(&self, content: &str) -> SleepDataResult<LoadReport> {
        let mut lines = content.lines().enumerate();

        let header = match lines.next() {
            Some((_, header_line)) => parse_line(header_line)?,
            None => csv::StringRecord::new(),
        };
        let columns = self.resolve_columns(&header);

        let mut report = LoadReport::default();

        for (index, raw_line) in lines {
            if raw_line.trim().is_empty() {
                continue;
            }

            let line = index + 1;
            report.rows_read += 1;

            let record = match parse_line(raw_line) {
                Ok(record) => record,
                Err(e) => {
                    let reason = format!("malformed row: {}", e);
                    tracing::warn!(line, reason = %reason, "Rejected sleep row");
                    report.rejected.push(RowIssue::new(line, "", reason));
                    continue;
                }
            };

            let date = record.get(columns.date).unwrap_or_default();
            let raw_sleep = record.get(columns.sleep).unwrap_or_default();

            let sleep_time = match parse_hours(raw_sleep) {
                Ok(hours) => hours,
                Err(reason) => {
                    tracing::warn!(line, date, reason = %reason, "Rejected sleep row");
                    report.rejected.push(RowIssue::new(line, date, reason));
                    continue;
                }
            };

            let sleep_record = SleepRecord::new(date, sleep_time);

            if !sleep_record.is_within_day() {
                let reason = format!(
                    "sleep hours {} outside 0-{}",
                    sleep_time, HOURS_PER_DAY
                );
                tracing::warn!(line, date, reason = %reason, "Flagged sleep row");
                report.flagged.push(RowIssue::new(line, date, reason));
            }

            report.records.push(sleep_record);
        }

        Ok(report)
    }

    /// Locate the date and sleep columns from the header fields
    fn resolve_columns(&self, headers: &csv::StringRecord) -> ColumnMap {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        };

        let date = find(&self.date_column).unwrap_or_else(|| {
            tracing::debug!(
                column = %self.date_column,
                "Date column not named in header, using position {}",
                DATE_FALLBACK_POSITION
            );
            DATE_FALLBACK_POSITION
        });

        let sleep = find(&self.sleep_column).unwrap_or_else(|| {
            tracing::debug!(
                column = %self.sleep_column,
                "Sleep column not named in header, using position {}",
                SLEEP_FALLBACK_POSITION
            );
            SLEEP_FALLBACK_POSITION
        });

        ColumnMap { date, sleep }
    }
}

/// Split one physical line into trimmed CSV fields
fn parse_line(line: &str) -> Result<csv::StringRecord, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Parse a sleep hours field, rejecting anything that is not a finite number
fn parse_hours(raw: &str) -> Result<f64, String> {
    if raw.is_empty() {
        return Err("missing sleep value".to_string());
    }

    match raw.parse::<f64>() {
        Ok(hours) if hours.is_finite() => Ok(hours),
        _ => Err(format!("sleep value '{}' is not a number", raw)),
    }
}

/// Parse sleep CSV content with the default Garmin column names
pub fn parse_sleep_csv(content: &str) -> SleepDataResult<LoadReport> {
    SleepCsvLoader::new().parse_str(content)
}

/// Load the sleep CSV at `path` with the default Garmin column names
pub async fn load_sleep_data(path: &Path) -> SleepDataResult<LoadReport> {
    SleepCsvLoader::new().load(path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARMIN_HEADER: &str =
        "date,total_sleep,sleep_score,start_time,end_time,resting_heart_rate,avg_hrv,sleep_quality";

    #[test]
    fn test_parse_two_rows() {
        let csv_data = format!(
            "{}\n2024-01-01,7.5,80,,,52,45,GOOD\n2024-01-02,8.0,85,,,50,48,EXCELLENT\n",
            GARMIN_HEADER
        );

        let report = parse_sleep_csv(&csv_data).unwrap();

        assert_eq!(
            report.records,
            vec![
                SleepRecord::new("2024-01-01", 7.5),
                SleepRecord::new("2024-01-02", 8.0),
            ]
        );
        assert_eq!(report.records[0].awake_time, 16.5);
        assert_eq!(report.records[1].awake_time, 16.0);
        assert_eq!(report.average(), Some(7.75));
        assert!(report.is_clean());
    }

    #[test]
    fn test_header_only() {
        let report = parse_sleep_csv(GARMIN_HEADER).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.average(), None);

        let report = parse_sleep_csv(&format!("{}\n", GARMIN_HEADER)).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.rows_read, 0);
    }

    #[test]
    fn test_empty_input() {
        let report = parse_sleep_csv("").unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.average(), None);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let csv_data = "date,total_sleep\n\n2024-01-01,6.0\n   \n\n2024-01-02,7.0\n\n";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.average(), Some(6.5));
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv_data = "date,total_sleep\r\n2024-01-01,6.25\r\n2024-01-02,7.75\r\n";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records[0].date, "2024-01-01");
        assert_eq!(report.records[1].sleep_time, 7.75);
        assert_eq!(report.average(), Some(7.0));
    }

    #[test]
    fn test_first_line_always_skipped() {
        // A data-looking first line is still the header
        let csv_data = "2024-01-01,9.0\n2024-01-02,7.0";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records, vec![SleepRecord::new("2024-01-02", 7.0)]);
    }

    #[test]
    fn test_columns_resolved_by_name() {
        let csv_data = "sleep_score,total_sleep,Date\n80,7.0,2024-03-01\n90,8.5,2024-03-02";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records[0], SleepRecord::new("2024-03-01", 7.0));
        assert_eq!(report.records[1], SleepRecord::new("2024-03-02", 8.5));
    }

    #[test]
    fn test_unnamed_columns_fall_back_to_position() {
        let csv_data = "day,hours,score\n2024-03-01,7.0,80";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records, vec![SleepRecord::new("2024-03-01", 7.0)]);
    }

    #[test]
    fn test_custom_column_names() {
        let csv_data = "night,asleep_hours\nMon,6.5\nTue,7.5";

        let loader = SleepCsvLoader::new()
            .with_date_column("night")
            .with_sleep_column("asleep_hours");
        let report = loader.parse_str(csv_data).unwrap();

        assert_eq!(report.records[0].date, "Mon");
        assert_eq!(report.average(), Some(7.0));
    }

    #[test]
    fn test_non_numeric_rows_rejected() {
        let csv_data = "date,total_sleep\n2024-01-01,7.0\n2024-01-02,abc\n2024-01-03,\n2024-01-04,NaN\n2024-01-05,9.0";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rows_read, 5);
        assert_eq!(report.average(), Some(8.0));

        let lines: Vec<usize> = report.rejected.iter().map(|issue| issue.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(report.rejected[0].date, "2024-01-02");
        assert_eq!(report.rejected[1].reason, "missing sleep value");
    }

    #[test]
    fn test_short_row_rejected() {
        let csv_data = "date,total_sleep\n2024-01-01";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
    }

    #[test]
    fn test_out_of_range_rows_flagged_but_kept() {
        let csv_data = "date,total_sleep\n2024-01-01,-1.0\n2024-01-02,25.0\n2024-01-03,8.0";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[0].awake_time, 25.0);
        assert_eq!(report.records[1].awake_time, -1.0);
        assert_eq!(report.flagged.len(), 2);
        assert_eq!(report.flagged[1].line, 3);
        assert!(report.rejected.is_empty());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_awake_time_invariant() {
        let csv_data = "date,total_sleep\n2024-01-01,6.123\n2024-01-02,0.1\n2024-01-03,23.9";

        let report = parse_sleep_csv(csv_data).unwrap();

        for record in &report.records {
            assert_eq!(record.awake_time, 24.0 - record.sleep_time);
        }
    }

    #[test]
    fn test_quoted_fields() {
        let csv_data = "date,total_sleep,sleep_quality\n\"Jan 1, 2024\",7.0,\"FAIR, restless\"";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records, vec![SleepRecord::new("Jan 1, 2024", 7.0)]);
    }

    #[test]
    fn test_duplicate_dates_kept_in_order() {
        let csv_data = "date,total_sleep\n2024-01-02,6.0\n2024-01-01,7.0\n2024-01-02,8.0";

        let report = parse_sleep_csv(csv_data).unwrap();

        let dates: Vec<&str> = report.records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-02", "2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_comma_only_row_rejected() {
        let csv_data = "date,total_sleep,sleep_score\n2024-01-01,7.0,80\n,,\n2024-01-03,8.0,90\n";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 3);
        assert_eq!(report.rejected[0].reason, "missing sleep value");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_unclosed_quote_stays_on_its_line() {
        let csv_data = "date,total_sleep,sleep_quality\n2024-01-01,7.0,\"FAIR\n2024-01-02,8.0,GOOD\n2024-01-03,6.0,GOOD\n";

        let report = parse_sleep_csv(csv_data).unwrap();

        let dates: Vec<&str> = report.records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.average(), Some(7.0));
    }

    #[test]
    fn test_quoted_header_newline_does_not_span_lines() {
        // The header is exactly the first physical line
        let csv_data = "date,\"total\nsleep\",score\n2024-01-01,7.0\n";

        let report = parse_sleep_csv(csv_data).unwrap();

        assert_eq!(report.records, vec![SleepRecord::new("2024-01-01", 7.0)]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garmin_sleep_data.csv");
        std::fs::write(&path, "date,total_sleep\n2024-01-01,7.5\n2024-01-02,8.0\n").unwrap();

        let report = load_sleep_data(&path).await.unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.average(), Some(7.75));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = load_sleep_data(&path).await.unwrap_err();

        match err {
            SleepDataError::Read { path: err_path, source } => {
                assert_eq!(err_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
