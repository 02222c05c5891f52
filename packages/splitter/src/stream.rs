//! Line-oriented record stream: one JSON object per line in and out.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::error::{Result, SplitterError};
use crate::filter::ReportFilter;
use crate::splitting::SplitStrategy;
use crate::types::{FilterOutcome, Record};

/// Counters for one processed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Records read.
    pub records_in: usize,
    /// Records written.
    pub records_out: usize,
    /// Input records replaced by derived records.
    pub split: usize,
    /// Input records tagged as unparsable.
    pub tagged: usize,
}

/// Run `filter` over every record of `input`, writing results to `output`.
///
/// Blank lines are skipped.
///
/// # Errors
/// Returns `InvalidRecord` for a line that is not a JSON object, and `Io` or
/// `Json` if reading or writing fails.
pub fn run_stream<S: SplitStrategy>(
    filter: &ReportFilter<S>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<StreamStats> {
    let mut stats = StreamStats::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(&line, index + 1)?;
        stats.records_in += 1;

        let outcome = filter.filter(&record);
        match &outcome {
            FilterOutcome::PassThrough => {}
            FilterOutcome::Tagged(_) => stats.tagged += 1,
            FilterOutcome::Split(_) => stats.split += 1,
        }

        for derived in outcome.into_records(record) {
            serde_json::to_writer(&mut output, &derived)?;
            output.write_all(b"\n")?;
            stats.records_out += 1;
        }
    }

    output.flush()?;
    Ok(stats)
}

fn parse_record(line: &str, line_number: usize) -> Result<Record> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(SplitterError::InvalidRecord {
            line: line_number,
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(SplitterError::InvalidRecord {
            line: line_number,
            reason: e.to_string(),
        }),
    }
}
