use std::path::{Path, PathBuf};
use chrono::Utc;
use tracing::debug;
use triage_core::{Order, RuleThresholds};

pub const REPORT_HEADER: [&str; 6] = ["ID", "Type", "Amount", "Flag", "Status", "Priority"];
pub const HIGH_VALUE_NOTE: [&str; 6] = ["", "", "", "", "Note", "High value order"];
pub const DEFAULT_FILE_PREFIX: &str = "orders_type_A";

/// Writes a single exported order to a report artifact
pub trait ReportWriter: Send + Sync {
    /// Returns the location of the written artifact
    fn export_order(&self, order: &Order, user_id: i64) -> Result<PathBuf, ExportError>;
}

/// CSV report writer.
///
/// Each export creates `{prefix}_{user_id}_{unix_seconds}.csv` inside the output
/// directory, truncating any file of the same name. Records use RFC 4180 quoting
/// and CRLF terminators.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    output_dir: PathBuf,
    file_prefix: String,
    note_threshold: f64,
    clock: fn() -> i64,
}

fn unix_seconds() -> i64 {
    Utc::now().timestamp()
}

impl CsvReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            note_threshold: RuleThresholds::default().high_value_note_amount,
            clock: unix_seconds,
        }
    }

    /// Replace the source of the timestamp used in artifact names
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_thresholds(mut self, thresholds: &RuleThresholds) -> Self {
        self.note_threshold = thresholds.high_value_note_amount;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn artifact_path(&self, user_id: i64, timestamp: i64) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}_{}.csv", self.file_prefix, user_id, timestamp))
    }
}

impl ReportWriter for CsvReportWriter {
    fn export_order(&self, order: &Order, user_id: i64) -> Result<PathBuf, ExportError> {
        let path = self.artifact_path(user_id, (self.clock)());

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_path(&path)?;

        writer.write_record(REPORT_HEADER)?;
        writer.write_record([
            order.id.to_string(),
            order.category.clone().unwrap_or_default(),
            format_amount(order.amount),
            order.flag_label().to_string(),
            order.status.to_string(),
            order.priority.to_string(),
        ])?;
        if order.amount > self.note_threshold {
            writer.write_record(HIGH_VALUE_NOTE)?;
        }
        writer.flush()?;

        debug!("Exported order {} to {}", order.id, path.display());
        Ok(path)
    }
}

/// Amount text as other report tooling expects it: shortest round-trip digits,
/// `100.0` rather than `100`, lowercase `nan`/`inf`, and exponents outside
/// `1e-4..1e16` written with a sign and two digits (`1e+16`, `1.5e-05`).
fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "nan".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if amount == 0.0 {
        return format!("{:?}", amount);
    }

    let scientific = format!("{:e}", amount);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..16).contains(&exponent) {
        format!("{:?}", amount)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
