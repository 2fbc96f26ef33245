//! The conversion pipeline.
//!
//! Lines flow through parse -> elapsed time -> orientation decode ->
//! downsample. The whole input is converted in memory before anything is
//! written, so a bad line anywhere aborts the run with no output file.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use headtrack_common::clock::{Elapsed, LogClock};
use headtrack_common::config::HeadtrackConfig;
use headtrack_common::error::{HeadtrackError, HeadtrackResult};
use headtrack_log_model::output::{header_line, OutputRecord};
use headtrack_log_model::schema::{RawRecord, EXPECTED_TRAILING_FIELDS};

use crate::downsample::Downsampler;
use crate::writer::{derive_output_path, LogWriter};

/// Result of converting a whole log in memory.
#[derive(Debug, Clone, Default)]
pub struct ConvertedLog {
    /// Records kept by the downsampler, in input order.
    pub records: Vec<OutputRecord>,

    /// Number of data records read (excluding the header and blank lines).
    pub data_records: usize,

    /// Absolute timestamp of the first data record.
    pub epoch: Option<NaiveDateTime>,

    /// Elapsed time of the last data record, kept or not.
    pub last_elapsed: Elapsed,
}

impl ConvertedLog {
    /// The converted log as text: header, one line per record, trailing newline.
    pub fn render(&self) -> String {
        let mut output = header_line();
        output.push('\n');
        for record in &self.records {
            output.push_str(&record.to_line());
            output.push('\n');
        }
        output
    }

    pub fn is_empty(&self) -> bool {
        self.data_records == 0
    }
}

/// Convert the text of a log. The first line is the header and is skipped.
///
/// Empty lines at the end of the file are ignored. Any other line, blank
/// or not, must be a complete record.
pub fn convert_log(content: &str) -> HeadtrackResult<ConvertedLog> {
    let mut clock = LogClock::new();
    let mut downsampler = Downsampler::new();
    let mut log = ConvertedLog::default();
    let mut warned_width = false;

    let lines: Vec<&str> = content.lines().collect();
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |last| last + 1);

    for (index, line) in lines[..end].iter().copied().enumerate().skip(1) {
        let line_no = index + 1;
        let raw = RawRecord::parse(line, line_no)?;
        if !raw.has_expected_width() && !warned_width {
            warn!(
                line = line_no,
                trailing = raw.trailing.len(),
                expected = EXPECTED_TRAILING_FIELDS,
                "Unexpected number of trailing columns; passing them through as-is"
            );
            warned_width = true;
        }

        let elapsed = clock.observe(raw.timestamp, line_no)?;
        let record = OutputRecord::from_raw(&raw, elapsed, line_no)?;

        log.data_records += 1;
        log.last_elapsed = elapsed;

        if downsampler.accept(elapsed) {
            debug!(line = line_no, frame = raw.frame, elapsed = %elapsed, "Keeping record");
            log.records.push(record);
        }
    }

    log.epoch = clock.epoch();
    Ok(log)
}

/// Summary of a completed file conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub data_records: usize,
    pub records_written: usize,
    pub duration: Elapsed,
}

/// Read a log file into a converted log. Fails on an empty log.
pub fn load_log(input: &Path) -> HeadtrackResult<ConvertedLog> {
    if !input.exists() {
        return Err(HeadtrackError::FileNotFound {
            path: input.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(input)?;
    let log = convert_log(&content)?;
    if log.is_empty() {
        return Err(HeadtrackError::EmptyLog {
            path: input.to_path_buf(),
        });
    }
    Ok(log)
}

/// Convert `input` and write the result to `output`, or to the path
/// derived from the input name when `output` is `None`.
///
/// Nothing is written unless every line converts.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    config: &HeadtrackConfig,
) -> HeadtrackResult<ConversionReport> {
    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => derive_output_path(input, &config.output_suffix)?,
    };
    if same_file(input, &destination) {
        return Err(HeadtrackError::config(format!(
            "Output {} would overwrite the input",
            destination.display()
        )));
    }

    let log = load_log(input)?;
    debug!(
        data_records = log.data_records,
        kept = log.records.len(),
        "Converted in memory"
    );

    let mut writer = LogWriter::create(destination)?;
    writer.write_line(&header_line())?;
    for record in &log.records {
        writer.write_line(&record.to_line())?;
    }
    let records_written = writer.lines_written().saturating_sub(1) as usize;
    let output = writer.commit()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        data_records = log.data_records,
        records_written,
        "Conversion complete"
    );

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output,
        data_records: log.data_records,
        records_written,
        duration: log.last_elapsed,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\"frame\"\t\"timestamp\"\t\"original_position\"\t\"position\"\t\"delta_x\"\t\"delta_z\"\t\"left_rotation\"\t\"right_rotation\"\t\"base_opacity\"\t\"left_opacity\"\t\"right_opacity\"\t\"auto_tick\"\t\"auto_duration\"\t\"auto_spacing\"\t\"framerate\"\t\"A_button\"\t\"B_button\"\t\"right_trigger\"";

    fn line(frame: u32, timestamp: &str, left: &str) -> String {
        format!(
            "{frame}\t{timestamp}\t(0.0, 1.6, 0.0)\t(0.0, 1.6, 0.0)\t0\t0\t{left}\t(0.0, 0.0, 0.0, 1.0)\t1\t0\t0\tFalse\t5\t10\t60\tFalse\tFalse\t0"
        )
    }

    fn log_of(lines: &[String]) -> String {
        let mut content = HEADER.to_string();
        for l in lines {
            content.push('\n');
            content.push_str(l);
        }
        content
    }

    const IDENTITY: &str = "(0.0, 0.0, 0.0, 1.0)";

    #[test]
    fn test_half_second_steps_yield_one_record_per_second() {
        let content = log_of(&[
            line(1, "10-03-2016 14-22-10-000", IDENTITY),
            line(2, "10-03-2016 14-22-10-500", IDENTITY),
            line(3, "10-03-2016 14-22-11-000", IDENTITY),
        ]);
        let log = convert_log(&content).unwrap();

        assert_eq!(log.data_records, 3);
        assert_eq!(log.records.len(), 2);
        assert_eq!(log.records[0].fields()[1], "0");
        assert_eq!(log.records[1].fields()[1], "1");
        assert_eq!(log.records[1].frame, "3");
        assert_eq!(log.last_elapsed, Elapsed::from_secs(1));
    }

    #[test]
    fn test_first_record_is_elapsed_zero() {
        let content = log_of(&[line(40, "01-01-2017 00-00-00-999", IDENTITY)]);
        let log = convert_log(&content).unwrap();
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].fields()[1], "0");
        assert!(log.epoch.is_some());
    }

    #[test]
    fn test_render_has_header_and_trailing_newline() {
        let content = log_of(&[
            line(1, "10-03-2016 14-22-10-000", IDENTITY),
            line(2, "10-03-2016 14-22-12-250", IDENTITY),
        ]);
        let rendered = convert_log(&content).unwrap().render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], header_line());
        assert!(lines[2].starts_with("2\t2\t"));
        assert_eq!(lines[2].split('\t').count(), 24);
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_trailing_empty_lines_are_ignored() {
        let content = format!(
            "{}\n\n\n",
            log_of(&[
                line(1, "10-03-2016 14-22-10-000", IDENTITY),
                line(2, "10-03-2016 14-22-11-000", IDENTITY),
            ])
        );
        let log = convert_log(&content).unwrap();
        assert_eq!(log.data_records, 2);
        assert_eq!(log.records.len(), 2);
    }

    #[test]
    fn test_interior_empty_line_aborts() {
        let content = format!(
            "{}\n\n{}",
            log_of(&[line(1, "10-03-2016 14-22-10-000", IDENTITY)]),
            line(2, "10-03-2016 14-22-11-000", IDENTITY)
        );
        let err = convert_log(&content).unwrap_err();
        assert!(matches!(err, HeadtrackError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_interior_whitespace_line_aborts() {
        for blank in ["\t \t", "   \t "] {
            let content = format!(
                "{}\n{blank}\n\n{}",
                log_of(&[line(1, "10-03-2016 14-22-10-000", IDENTITY)]),
                line(2, "10-03-2016 14-22-11-000", IDENTITY)
            );
            let err = convert_log(&content).unwrap_err();
            assert!(
                matches!(err, HeadtrackError::MalformedRecord { line: 3, .. }),
                "{blank:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_trailing_whitespace_line_aborts() {
        let content = format!(
            "{}\n  \n",
            log_of(&[line(1, "10-03-2016 14-22-10-000", IDENTITY)])
        );
        let err = convert_log(&content).unwrap_err();
        assert!(matches!(err, HeadtrackError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_header_only_log_is_empty() {
        let log = convert_log(HEADER).unwrap();
        assert!(log.is_empty());
        assert!(log.records.is_empty());
        assert!(log.epoch.is_none());
    }

    #[test]
    fn test_malformed_orientation_aborts_with_line() {
        let content = log_of(&[
            line(1, "10-03-2016 14-22-10-000", IDENTITY),
            line(2, "10-03-2016 14-22-10-100", "(0.0, 0.0, 0.0, 1.0"),
        ]);
        let err = convert_log(&content).unwrap_err();
        assert!(matches!(err, HeadtrackError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_dropped_records_are_still_validated() {
        // Line 3 would be dropped by the downsampler but still fails the run.
        let content = log_of(&[
            line(1, "10-03-2016 14-22-10-000", IDENTITY),
            line(2, "10-03-2016 14-22-10-100", "(a, b, c, d)"),
            line(3, "10-03-2016 14-22-11-000", IDENTITY),
        ]);
        assert!(convert_log(&content).is_err());
    }

    #[test]
    fn test_bad_timestamp_aborts() {
        let content = log_of(&[
            line(1, "10-03-2016 14-22-10-000", IDENTITY),
            line(2, "2016/03/10 14:22:11", IDENTITY),
        ]);
        let err = convert_log(&content).unwrap_err();
        assert!(matches!(err, HeadtrackError::TimestampParse { line: 3, .. }));
    }

    #[test]
    fn test_short_line_aborts() {
        let content = format!("{HEADER}\n1\t10-03-2016 14-22-10-000\t(0, 0, 0)");
        let err = convert_log(&content).unwrap_err();
        assert!(matches!(err, HeadtrackError::MalformedRecord { line: 2, .. }));
    }
}
