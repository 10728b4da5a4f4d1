//! CSV writer for parsed records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::record::MessageRecord;

const HEADER: [&str; 9] = [
    "Timestamp",
    "Sender",
    "Body",
    "Year",
    "Month",
    "MonthName",
    "DayOfWeek",
    "Hour",
    "Minute",
];

/// Writes records to `path` as `;`-delimited CSV.
///
/// Multi-line bodies are quoted, so every record stays one CSV row.
pub fn write_records_csv(records: &[MessageRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_to(records, file)
}

/// Same format as [`write_records_csv`], returned as a string.
pub fn to_records_csv(records: &[MessageRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_to<W: Write>(records: &[MessageRecord], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(build_row(record))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_row(record: &MessageRecord) -> [String; 9] {
    [
        record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.sender.clone(),
        record.body.clone(),
        record.year.to_string(),
        record.month.to_string(),
        record.month_name.clone(),
        record.day_of_week.to_string(),
        record.hour.to_string(),
        record.minute.to_string(),
    ]
}
