use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::Submission;

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

const HEADERS: [&str; 12] = [
    "Type",
    "Name",
    "Email",
    "Phone",
    "Company",
    "Subject/Plan/Offer",
    "Service/Timeline",
    "Message",
    "Status",
    "Additional Info",
    "Date",
    "Time",
];

/// Failures while assembling an export. Nothing is handed out on error.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Fully rendered CSV document ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content_type: &'static str,
    pub rows: usize,
    pub body: String,
}

impl CsvExport {
    /// Write the rendered document in one call.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.body.as_bytes())?;
        Ok(())
    }
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("submissions-{}.csv", date.format("%Y-%m-%d"))
}

/// Render one header row plus one row per submission, in the order given.
pub fn export_csv<'a, I>(
    submissions: I,
    exported_at: DateTime<Utc>,
) -> Result<CsvExport, ExportError>
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    let mut rows = 0;
    for submission in submissions {
        writer.write_record(row(submission))?;
        rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    let body = String::from_utf8(bytes)?;

    Ok(CsvExport {
        filename: export_filename(exported_at.date_naive()),
        content_type: CSV_CONTENT_TYPE,
        rows,
        body,
    })
}

fn row(submission: &Submission) -> [String; 12] {
    [
        submission.kind().label().to_string(),
        submission.name.clone(),
        submission.email.clone(),
        submission.phone.clone().unwrap_or_default(),
        submission.company.clone().unwrap_or_default(),
        submission.headline().unwrap_or_default().to_string(),
        submission.service_or_timeline().unwrap_or_default().to_string(),
        submission.message.clone(),
        submission.status.label().to_string(),
        submission.additional_info(),
        submission.timestamp.format("%Y-%m-%d").to_string(),
        submission.timestamp.format("%H:%M:%S").to_string(),
    ]
}
