//! The literal content of the attributes fixture.
//!
//! The rules cover quoted patterns, macros, negation, assignment order within
//! a single line, directory scoped overrides and a directory wildcard. Not
//! every rule is queried: the `e"`, `a/i` and `A/e/F` rules only need to
//! parse. Leading blanks are stripped from patterns, so the ` e` path matches
//! nothing.

use anyhow::Context as _;
use anyhow::Result;
use std::io::Write as _;
use std::path::Path;

/// Directories created before any attributes file is written.
pub const DIRECTORIES: [&str; 3] = ["a/b/d", "a/c", "b"];

/// An attributes file, relative to the workspace root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributesFile {
    pub path: &'static str,
    pub lines: &'static [&'static str],
}

impl AttributesFile {
    /// The file content, one rule per line.
    pub fn contents(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }

    /// Writes the file below `root`. The file must not exist yet and is
    /// flushed and closed on return.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        let path = root.join(self.path);
        let file = std::fs::File::create_new(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        writer
            .write_all(self.contents().as_bytes())
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Attribute files tracked in the repository, shallowest first.
pub const TRACKED_ATTRIBUTES: [AttributesFile; 3] = [
    AttributesFile {
        path: ".gitattributes",
        lines: &[
            "[attr]notest !test",
            "\" d \"\ttest=d",
            " e\ttest=e",
            " e\"\ttest=e",
            "f\ttest=f",
            "a/i test=a/i",
            "onoff test -test",
            "offon -test test",
            "no notest",
            "A/e/F test=A/e/F",
        ],
    },
    AttributesFile {
        path: "a/.gitattributes",
        lines: &["g test=a/g", "b/g test=a/b/g"],
    },
    AttributesFile {
        path: "a/b/.gitattributes",
        lines: &["h test=a/b/h", "d/* test=a/b/d/*", "d/yes notest"],
    },
];

/// Passed to git as `core.attributesFile` when querying.
pub const EXTERNAL_ATTRIBUTES: AttributesFile = AttributesFile {
    path: "user.attributes",
    lines: &["global test=global"],
};

pub const COMMIT_MESSAGE: &str = "c1";

/// Paths to query, in baseline order.
pub const QUERY_PATHS: [&str; 14] = [
    " d ",
    " e",
    "f",
    "a/f",
    "a/g",
    "a/b/g",
    "b/g",
    "a/b/h",
    "a/b/d/g",
    "a/b/d/yes",
    "onoff",
    "offon",
    "no",
    "global",
];
