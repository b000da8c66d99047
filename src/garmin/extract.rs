//! Date-range extraction and CSV output

use super::{DetailedSleepRow, GarminResult, Night, SleepRow, SleepSource, DETAILED_COLUMNS, SLEEP_COLUMNS};
use chrono::{Duration, NaiveDate};
use std::io::Write;
use std::path::Path;

/// Days before the end date fetched when no start date is given
pub const DEFAULT_RANGE_DAYS: i64 = 7;

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Fill in missing bounds: `end` defaults to `today`, `start` to
    /// [`DEFAULT_RANGE_DAYS`] before `end`
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let end = end.unwrap_or(today);
        let start = start.unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS));
        Self { start, end }
    }

    /// Every date from start to end; empty when start is after end
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Which columns to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractFormat {
    /// Date, total sleep, score, times, heart rate, HRV and quality
    #[default]
    Standard,
    /// Standard columns plus sleep stages, stress, respiration and derived shares
    Detailed,
}

/// Outcome of fetching a date range
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Dates with a sleep summary, in date order
    pub nights: Vec<Night>,
    /// Dates Garmin returned no sleep summary for
    pub empty_days: Vec<NaiveDate>,
    /// Dates whose request failed, with the error text
    pub failed_days: Vec<(NaiveDate, String)>,
}

/// Fetch every date in `range` from `source`
///
/// A failed date is logged and skipped. Authentication failures and rate
/// limiting stop the run, since every later request would fail the same way.
pub async fn extract_sleep<S>(source: &S, range: DateRange) -> GarminResult<ExtractReport>
where
    S: SleepSource + ?Sized,
{
    tracing::info!(start = %range.start, end = %range.end, "Fetching sleep data");

    let mut report = ExtractReport::default();

    for date in range.days() {
        match source.fetch_sleep(date).await {
            Ok(payload) => match payload.into_night(date) {
                Some(night) => {
                    tracing::debug!(%date, "Fetched sleep summary");
                    report.nights.push(night);
                }
                None => {
                    tracing::info!(%date, "No sleep data");
                    report.empty_days.push(date);
                }
            },
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(%date, error = %e, "Failed to fetch sleep data");
                report.failed_days.push((date, e.to_string()));
            }
        }
    }

    tracing::info!(
        nights = report.nights.len(),
        empty = report.empty_days.len(),
        failed = report.failed_days.len(),
        "Finished fetching sleep data"
    );

    Ok(report)
}

/// Write `nights` as CSV; the header is written even when there are no rows
pub fn write_csv<W: Write>(writer: W, nights: &[Night], format: ExtractFormat) -> GarminResult<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    match format {
        ExtractFormat::Standard => {
            csv_writer.write_record(SLEEP_COLUMNS)?;
            for night in nights {
                csv_writer.serialize(SleepRow::from(night))?;
            }
        }
        ExtractFormat::Detailed => {
            csv_writer.write_record(DETAILED_COLUMNS)?;
            for night in nights {
                csv_writer.serialize(DetailedSleepRow::from(night))?;
            }
        }
    }

    csv_writer.flush()?;
    Ok(nights.len())
}

/// Write `nights` to `path`, creating parent directories as needed
pub fn write_csv_file(path: &Path, nights: &[Night], format: ExtractFormat) -> GarminResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let written = write_csv(file, nights, format)?;

    tracing::info!(path = %path.display(), rows = written, "Wrote sleep CSV");
    Ok(written)
}
