//! Append-only CSV row log
//!
//! A [`RowLog`] owns the path of one log file. Each append serializes a row
//! into memory first and then issues a single write against the file opened
//! in append mode, so existing bytes are never touched and a failed
//! serialization never leaves a partial line behind.

use crate::core::error::{Error, Result};
use crate::core::types::Row;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Append-only CSV log backed by a single file
#[derive(Debug, Clone)]
pub struct RowLog {
    path: PathBuf,
    fsync: bool,
}

impl RowLog {
    /// Create a log for `path`. The file itself is created lazily on the
    /// first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fsync: false,
        }
    }

    /// Sync file contents to disk after every append
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `row` as one CSV line, creating the file if needed
    pub fn append(&self, row: &Row) -> Result<()> {
        let line = encode_row(row)?;

        debug!(path = %self.path.display(), fields = row.len(), "Opening log for append");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(&line)?;
        file.flush()?;
        if self.fsync {
            file.sync_all()?;
        }

        info!(path = %self.path.display(), bytes = line.len(), "Appended row");
        Ok(())
    }

    /// Read every row back. A log that has never been written reads as empty.
    pub fn read_all(&self) -> Result<Vec<Row>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        reader
            .records()
            .map(|record| record.map(Row::from).map_err(Error::from))
            .collect()
    }
}

/// Append a single row to the file at `path`
pub fn append_row(row: &Row, path: impl AsRef<Path>) -> Result<()> {
    RowLog::new(path.as_ref()).append(row)
}

/// Serialize one row with standard CSV quoting, terminated by CRLF
fn encode_row(row: &Row) -> Result<Vec<u8>> {
    if row.is_empty() {
        return Err(Error::invalid_input("cannot append a row with no fields"));
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    wtr.write_record(row.fields())?;
    wtr.into_inner().map_err(|e| Error::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(row: &Row) -> String {
        String::from_utf8(encode_row(row).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_fields_are_comma_joined() {
        let row = Row::new(["10", "4", "0.53", "100", "ok"]);
        assert_eq!(line(&row), "10,4,0.53,100,ok\r\n");
    }

    #[test]
    fn test_special_fields_are_quoted() {
        assert_eq!(line(&Row::new(["a,b", "c"])), "\"a,b\",c\r\n");
        assert_eq!(line(&Row::new(["say \"hi\""])), "\"say \"\"hi\"\"\"\r\n");
        assert_eq!(line(&Row::new(["two\nlines", "x"])), "\"two\nlines\",x\r\n");
    }

    #[test]
    fn test_empty_row_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let log = RowLog::new(dir.path().join("empty.csv"));

        let result = log.append(&Row::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!log.path().exists());
    }

    #[test]
    fn test_append_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.csv");
        assert!(!path.exists());

        append_row(&Row::new(["1", "2"]), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,2\r\n");
    }

    #[test]
    fn test_identical_appends_are_not_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let log = RowLog::new(dir.path().join("dup.csv"));
        let row = Row::new(["10", "4", "0.53", "100", "ok"]);

        log.append(&row).unwrap();
        log.append(&row).unwrap();

        assert_eq!(
            std::fs::read_to_string(log.path()).unwrap(),
            "10,4,0.53,100,ok\r\n10,4,0.53,100,ok\r\n"
        );
    }

    #[test]
    fn test_existing_contents_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.csv");
        std::fs::write(&path, "N,E,TIME\r\nno-newline").unwrap();

        RowLog::new(&path).with_fsync(true).append(&Row::new(["x"])).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "N,E,TIME\r\nno-newlinex\r\n");
    }

    #[test]
    fn test_missing_parent_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = RowLog::new(dir.path().join("missing").join("log.csv"));

        assert!(matches!(log.append(&Row::new(["1"])), Err(Error::Io(_))));
    }

    #[test]
    fn test_rows_from_crlf_log_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(&path, "1,2,3,4,5\r\n").unwrap();

        let log = RowLog::new(&path);
        log.append(&Row::new(["6", "7", "8", "9", "10"])).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, b"1,2,3,4,5\r\n6,7,8,9,10\r\n");
        assert_eq!(
            log.read_all().unwrap(),
            vec![Row::new(["1", "2", "3", "4", "5"]), Row::new(["6", "7", "8", "9", "10"])]
        );
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RowLog::new(dir.path()).read_all().is_err());
    }

    #[test]
    fn test_read_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = RowLog::new(dir.path().join("never.csv"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_rows_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = RowLog::new(dir.path().join("order.csv"));
        let rows: Vec<Row> = (0..10)
            .map(|i| Row::new([i.to_string(), format!("{}", i * 2), "ok".to_string()]))
            .collect();

        for row in &rows {
            log.append(row).unwrap();
        }

        assert_eq!(log.read_all().unwrap(), rows);
    }

    proptest! {
        #[test]
        fn prop_awkward_fields_survive_round_trip(
            fields in proptest::collection::vec("[a-z0-9,\"\n\r ]{1,12}", 1..6)
        ) {
            let dir = tempfile::tempdir().unwrap();
            let log = RowLog::new(dir.path().join("prop.csv"));
            let row = Row::from(fields);

            log.append(&row).unwrap();
            log.append(&row).unwrap();

            prop_assert_eq!(log.read_all().unwrap(), vec![row.clone(), row]);
        }
    }
}
