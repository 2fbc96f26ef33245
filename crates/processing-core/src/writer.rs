//! Output destination naming and the all-or-nothing log writer.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use headtrack_common::error::{HeadtrackError, HeadtrackResult};

/// Extension of the sibling file written before the final rename.
const PARTIAL_EXTENSION: &str = "partial";

/// Destination of a converted log: the input file name up to its first
/// `.`, followed by `suffix`, in the input's directory.
///
/// `logs/session.2016.log` with `_elapsed.log` becomes `logs/session_elapsed.log`.
pub fn derive_output_path(input: &Path, suffix: &str) -> HeadtrackResult<PathBuf> {
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            HeadtrackError::config(format!(
                "Cannot derive an output name from {}",
                input.display()
            ))
        })?;

    let stem = file_name.split('.').next().unwrap_or(file_name);
    Ok(input.with_file_name(format!("{stem}{suffix}")))
}

/// Writes lines to a temporary sibling file and renames it into place on
/// [`commit`](LogWriter::commit).
///
/// Dropping an uncommitted writer deletes the temporary file, so a failed
/// run leaves neither a partial output nor the temporary behind.
pub struct LogWriter {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    partial_path: PathBuf,
    lines_written: u64,
}

impl LogWriter {
    /// Open the temporary file for `path`, creating parent directories.
    pub fn create(path: PathBuf) -> HeadtrackResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let partial_path = partial_path_for(&path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&partial_path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            partial_path,
            lines_written: 0,
        })
    }

    /// Write one line followed by `\n`.
    pub fn write_line(&mut self, line: &str) -> HeadtrackResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| HeadtrackError::config("Writer already committed"))?;
        writeln!(writer, "{line}")?;
        self.lines_written += 1;
        Ok(())
    }

    /// Flush, sync and move the file to its final path.
    pub fn commit(mut self) -> HeadtrackResult<PathBuf> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        std::fs::rename(&self.partial_path, &self.path)?;
        Ok(self.path.clone())
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        // A committed writer has already renamed its temporary file away.
        self.writer.take();
        if self.partial_path.exists() {
            let _ = std::fs::remove_file(&self.partial_path);
        }
    }
}

fn partial_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".");
    name.push(PARTIAL_EXTENSION);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("headtrack_test_writer_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_derive_output_path() {
        let cases = [
            ("session.log", "session_elapsed.log"),
            ("logs/session.2016.log", "logs/session_elapsed.log"),
            ("plain", "plain_elapsed.log"),
            ("/data/run1.txt", "/data/run1_elapsed.log"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                derive_output_path(Path::new(input), "_elapsed.log").unwrap(),
                PathBuf::from(expected)
            );
        }
    }

    #[test]
    fn test_derive_output_path_custom_suffix() {
        assert_eq!(
            derive_output_path(Path::new("a.log"), "_seconds.tsv").unwrap(),
            PathBuf::from("a_seconds.tsv")
        );
    }

    #[test]
    fn test_commit_moves_file_into_place() {
        let dir = scratch_dir("commit");
        let path = dir.join("out_elapsed.log");

        let mut writer = LogWriter::create(path.clone()).unwrap();
        writer.write_line("header").unwrap();
        writer.write_line("row").unwrap();
        assert_eq!(writer.lines_written(), 2);
        assert!(!path.exists());

        let written = writer.commit().unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "header\nrow\n");
        assert!(!partial_path_for(&path).exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_dropped_writer_leaves_nothing() {
        let dir = scratch_dir("drop");
        let path = dir.join("out_elapsed.log");

        {
            let mut writer = LogWriter::create(path.clone()).unwrap();
            writer.write_line("header").unwrap();
            assert!(partial_path_for(&path).exists());
        }

        assert!(!path.exists());
        assert!(!partial_path_for(&path).exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

        std::fs::remove_dir_all(&dir).ok();
    }
}
