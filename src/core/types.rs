//! Core type definitions
//!
//! A [`Row`] is one ordered set of benchmark values; a [`Destination`] names
//! which throughput log receives it.

use crate::core::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Number of values a command-line row carries
pub const ROW_FIELDS: usize = 5;

/// One ordered set of benchmark values, written as a single CSV line.
///
/// Values are kept as text and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row(Vec<String>);

impl Row {
    /// Create a row from any sequence of displayable values
    pub fn new<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self(fields.into_iter().map(|f| f.to_string()).collect())
    }

    /// Fields in order
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the row has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the row, returning its fields
    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

impl From<csv::StringRecord> for Row {
    fn from(record: csv::StringRecord) -> Self {
        Self(record.iter().map(str::to_owned).collect())
    }
}

/// Which throughput log a row is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Runs executed on a CUDA device
    Cuda,
    /// Runs executed on the host CPU
    Cpu,
}

impl Destination {
    /// All destinations
    pub const ALL: [Destination; 2] = [Destination::Cuda, Destination::Cpu];

    /// Selector literal as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Cuda => "cuda",
            Destination::Cpu => "cpu",
        }
    }
}

impl FromStr for Destination {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cuda" => Ok(Destination::Cuda),
            "cpu" => Ok(Destination::Cpu),
            other => Err(Error::UnknownDestination(other.to_string())),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_parses_exact_literals() {
        assert_eq!("cuda".parse::<Destination>().unwrap(), Destination::Cuda);
        assert_eq!("cpu".parse::<Destination>().unwrap(), Destination::Cpu);
    }

    #[test]
    fn test_destination_rejects_other_values() {
        for bad in ["gpu", "CUDA", "Cpu", " cpu", ""] {
            match bad.parse::<Destination>() {
                Err(Error::UnknownDestination(value)) => assert_eq!(value, bad),
                other => panic!("Expected UnknownDestination for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_destination_display_matches_selector() {
        for dest in Destination::ALL {
            assert_eq!(dest.to_string().parse::<Destination>().unwrap(), dest);
        }
    }

    #[test]
    fn test_row_keeps_field_order() {
        let row = Row::new([10.to_string(), "4".into(), "0.53".into()]);
        assert_eq!(row.fields(), &["10", "4", "0.53"]);
        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_row_from_mixed_displayables() {
        let row = Row::new([1.5_f64]);
        assert_eq!(row.into_fields(), vec!["1.5".to_string()]);
    }
}
