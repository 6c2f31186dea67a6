//! The baseline log: for each queried path, the path on its own line,
//! followed by the raw `git check-attr -a` output and an empty line.
//!
//! ```text
//! a/b/g
//! a/b/g: test: a/b/g
//!
//! onoff
//! onoff: test: unset
//!
//! ```

use crate::error::BaselineError;
use anyhow::Context as _;
use anyhow::Result;
use bstr::BStr;
use bstr::BString;
use bstr::ByteSlice as _;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

/// The state git resolved for an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrState {
    Set,
    Unset,
    Unspecified,
    Value(BString),
}

impl AttrState {
    /// Interprets the `<info>` column of `git check-attr`.
    pub fn from_info(info: &[u8]) -> Self {
        match info {
            b"set" => AttrState::Set,
            b"unset" => AttrState::Unset,
            b"unspecified" => AttrState::Unspecified,
            _ => AttrState::Value(info.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: BString,
    pub state: AttrState,
}

/// One queried path and everything git reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub path: BString,
    pub assignments: Vec<Assignment>,
}

impl Record {
    /// Returns the state of `name`, `None` if git did not report it.
    pub fn get(&self, name: &str) -> Option<&AttrState> {
        self.assignments
            .iter()
            .find(|assignment| assignment.name == name)
            .map(|assignment| &assignment.state)
    }
}

/// Appends records to a baseline file. Every record is written with a single
/// unbuffered write, so an aborted run leaves only complete records behind.
pub struct BaselineWriter {
    path: PathBuf,
    file: std::fs::File,
    records_written: usize,
}

impl BaselineWriter {
    /// Opens `path` for appending, creating it if needed.
    pub fn open_append(path: &Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open baseline {}", path.display()))?;
        Ok(BaselineWriter {
            path: path.to_owned(),
            file,
            records_written: 0,
        })
    }

    pub fn append(&mut self, path: &str, check_attr_output: &[u8]) -> Result<()> {
        let mut record = Vec::with_capacity(path.len() + check_attr_output.len() + 3);
        record.extend_from_slice(path.as_bytes());
        record.push(b'\n');
        record.extend_from_slice(check_attr_output);
        if !check_attr_output.is_empty() && !check_attr_output.ends_with(b"\n") {
            record.push(b'\n');
        }
        record.push(b'\n');
        self.file
            .write_all(&record)
            .with_context(|| format!("Failed to append to baseline {}", self.path.display()))?;
        self.records_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records appended through this writer.
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

/// Iterates over the records of a baseline.
///
/// A last record that is not terminated by an empty line is incomplete and
/// is not returned.
pub struct Expectations<'a> {
    lines: bstr::Lines<'a>,
    line_number: usize,
}

impl<'a> Expectations<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Expectations {
            lines: input.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line)
    }
}

impl Iterator for Expectations<'_> {
    type Item = Result<Record, BaselineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.next_line()?;
        let mut assignments = Vec::new();
        loop {
            let line = self.next_line()?;
            if line.is_empty() {
                return Some(Ok(Record {
                    path: path.into(),
                    assignments,
                }));
            }
            let Some((_path, name, info)) = split_check_attr_line(line) else {
                return Some(Err(BaselineError::InvalidLine {
                    line_number: self.line_number,
                    line: line.to_str_lossy().into_owned(),
                }));
            };
            if !is_valid_attribute_name(name) {
                return Some(Err(BaselineError::InvalidAttributeName {
                    line_number: self.line_number,
                    name: name.to_str_lossy().into_owned(),
                }));
            }
            assignments.push(Assignment {
                name: name.into(),
                state: AttrState::from_info(info),
            });
        }
    }
}

/// Splits `<path>: <attr>: <info>` at the first two `": "` separators.
///
/// ```
/// use git_attr_fixture::baseline::split_check_attr_line;
///
/// let (path, attr, info) = split_check_attr_line(b" d : test: d").unwrap();
/// assert_eq!(path, " d ");
/// assert_eq!(attr, "test");
/// assert_eq!(info, "d");
/// assert!(split_check_attr_line(b"no separators").is_none());
/// ```
pub fn split_check_attr_line(line: &[u8]) -> Option<(&BStr, &BStr, &BStr)> {
    let mut tokens = line.splitn_str(3, ": ");
    let path = tokens.next()?;
    let attr = tokens.next()?;
    let info = tokens.next()?;
    Some((path.as_bstr(), attr.as_bstr(), info.as_bstr()))
}

/// Attribute names as git accepts them.
fn is_valid_attribute_name(name: &[u8]) -> bool {
    !name.is_empty()
        && !name.starts_with(b"-")
        && name
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// Parses all complete records of a baseline.
pub fn parse(input: &[u8]) -> Result<Vec<Record>, BaselineError> {
    Expectations::new(input).collect()
}

/// Reads and parses a baseline file.
pub fn read(path: &Path) -> Result<Vec<Record>> {
    let input = std::fs::read(path)
        .with_context(|| format!("Failed to read baseline {}", path.display()))?;
    let records =
        parse(&input).with_context(|| format!("Failed to parse baseline {}", path.display()))?;
    Ok(records)
}

/// Checks that `records` holds exactly one record per expected path, in order.
pub fn verify_paths(records: &[Record], expected_paths: &[&str]) -> Result<(), BaselineError> {
    if records.len() != expected_paths.len() {
        return Err(BaselineError::RecordCount {
            expected: expected_paths.len(),
            actual: records.len(),
        });
    }
    for (index, (record, expected)) in records.iter().zip(expected_paths).enumerate() {
        if record.path != *expected {
            return Err(BaselineError::PathMismatch {
                index,
                expected: expected.to_string(),
                actual: record.path.to_str_lossy().into_owned(),
            });
        }
    }
    Ok(())
}

/// JSON friendly form of [`Record`], used by `dump`.
#[derive(Debug, serde::Serialize)]
pub struct SerdeRecord {
    pub path: String,
    pub attributes: Vec<SerdeAssignment>,
}

#[derive(Debug, serde::Serialize)]
pub struct SerdeAssignment {
    pub name: String,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<&Record> for SerdeRecord {
    fn from(record: &Record) -> Self {
        SerdeRecord {
            path: record.path.to_str_lossy().into_owned(),
            attributes: record
                .assignments
                .iter()
                .map(|assignment| {
                    let (state, value) = match &assignment.state {
                        AttrState::Set => ("set", None),
                        AttrState::Unset => ("unset", None),
                        AttrState::Unspecified => ("unspecified", None),
                        AttrState::Value(value) => {
                            ("value", Some(value.to_str_lossy().into_owned()))
                        }
                    };
                    SerdeAssignment {
                        name: assignment.name.to_str_lossy().into_owned(),
                        state,
                        value,
                    }
                })
                .collect(),
        }
    }
}
