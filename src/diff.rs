//! Line-level diff entries and a reader for unified diff text.

use crate::core::{ChangeKind, Error, Result};

/// Marker of one diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffMarker {
    Added,
    Removed,
    Context,
}

impl DiffMarker {
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            '+' => Some(DiffMarker::Added),
            '-' => Some(DiffMarker::Removed),
            ' ' => Some(DiffMarker::Context),
            _ => None,
        }
    }

    pub fn matches(self, kind: ChangeKind) -> bool {
        matches!(
            (self, kind),
            (DiffMarker::Added, ChangeKind::Added) | (DiffMarker::Removed, ChangeKind::Removed)
        )
    }
}

/// One line of a parsed diff.
///
/// `added_line` is the line number in the new file, `removed_line` in the old
/// one; a line only present on one side has no number on the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub marker: DiffMarker,
    pub file: String,
    pub added_line: Option<u32>,
    pub removed_line: Option<u32>,
    pub content: String,
}

impl DiffEntry {
    pub fn added(file: impl Into<String>, line: u32, content: impl Into<String>) -> Self {
        Self {
            marker: DiffMarker::Added,
            file: file.into(),
            added_line: Some(line),
            removed_line: None,
            content: content.into(),
        }
    }

    pub fn removed(file: impl Into<String>, line: u32, content: impl Into<String>) -> Self {
        Self {
            marker: DiffMarker::Removed,
            file: file.into(),
            added_line: None,
            removed_line: Some(line),
            content: content.into(),
        }
    }

    /// Line number on the side of the diff described by `kind`.
    pub fn line_for(&self, kind: ChangeKind) -> Option<u32> {
        match kind {
            ChangeKind::Added => self.added_line,
            ChangeKind::Removed => self.removed_line,
        }
    }
}

/// Parse unified diff text (as produced by `git diff` or `diff -u`).
///
/// File names come from the `+++` header (or `---` for deletions) with the
/// conventional `a/`/`b/` prefixes removed.
pub fn parse_unified_diff(text: &str) -> Result<Vec<DiffEntry>> {
    let mut entries = Vec::new();
    let mut old_file = String::new();
    let mut file = String::new();
    let mut hunk = Hunk::default();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with('\\') {
            continue;
        }

        if hunk.is_open() {
            let mut chars = line.chars();
            // Some tools strip the leading space of empty context lines.
            let marker = chars
                .next()
                .map_or(Some(DiffMarker::Context), DiffMarker::from_prefix)
                .ok_or_else(|| Error::DiffSyntax {
                    line: i + 1,
                    message: format!("unexpected line inside hunk: {line:?}"),
                })?;
            entries.push(hunk.entry(marker, &file, chars.as_str()));
            continue;
        }

        if let Some(rest) = line.strip_prefix("--- ") {
            old_file = header_path(rest);
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            let path = header_path(rest);
            file = if path == "/dev/null" {
                old_file.clone()
            } else {
                path
            };
        } else if let Some(header) = line.strip_prefix("@@") {
            hunk = Hunk::parse(header).ok_or_else(|| Error::DiffSyntax {
                line: i + 1,
                message: format!("malformed hunk header {line:?}"),
            })?;
        }
    }

    Ok(entries)
}

/// Line counters of the hunk being read.
#[derive(Debug, Default)]
struct Hunk {
    old_line: u32,
    new_line: u32,
    old_remaining: u32,
    new_remaining: u32,
}

impl Hunk {
    /// `" -12,3 +14,5 @@ fn name"`
    fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split_whitespace();
        let (old_line, old_remaining) = parse_range(parts.next()?.strip_prefix('-')?)?;
        let (new_line, new_remaining) = parse_range(parts.next()?.strip_prefix('+')?)?;
        Some(Self {
            old_line,
            new_line,
            old_remaining,
            new_remaining,
        })
    }

    fn is_open(&self) -> bool {
        self.old_remaining > 0 || self.new_remaining > 0
    }

    fn entry(&mut self, marker: DiffMarker, file: &str, content: &str) -> DiffEntry {
        let (added_line, removed_line) = match marker {
            DiffMarker::Added => (Some(self.take_new()), None),
            DiffMarker::Removed => (None, Some(self.take_old())),
            DiffMarker::Context => (Some(self.take_new()), Some(self.take_old())),
        };
        DiffEntry {
            marker,
            file: file.to_string(),
            added_line,
            removed_line,
            content: content.to_string(),
        }
    }

    fn take_old(&mut self) -> u32 {
        let line = self.old_line;
        self.old_line = self.old_line.saturating_add(1);
        self.old_remaining = self.old_remaining.saturating_sub(1);
        line
    }

    fn take_new(&mut self) -> u32 {
        let line = self.new_line;
        self.new_line = self.new_line.saturating_add(1);
        self.new_remaining = self.new_remaining.saturating_sub(1);
        line
    }
}

/// `"12,3"` -> `(12, 3)`; a missing count means one line.
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

fn header_path(rest: &str) -> String {
    let path = rest.split('\t').next().unwrap_or(rest).trim();
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = indoc! {"
        diff --git a/src/Foo.java b/src/Foo.java
        index 3b18e51..a3c9b1d 100644
        --- a/src/Foo.java
        +++ b/src/Foo.java
        @@ -10,3 +10,4 @@ class Foo {
             int a = 1;
        -    int b = 2;
        +    int b = 3;
        +    int c = 4;
             return a;
        \\ No newline at end of file
    "};

    #[test]
    fn test_parse_hunk_lines() {
        let entries = parse_unified_diff(SAMPLE).unwrap();

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].marker, DiffMarker::Context);
        assert_eq!((entries[0].removed_line, entries[0].added_line), (Some(10), Some(10)));
        assert_eq!(entries[1], DiffEntry::removed("src/Foo.java", 11, "    int b = 2;"));
        assert_eq!(entries[2], DiffEntry::added("src/Foo.java", 11, "    int b = 3;"));
        assert_eq!(entries[3], DiffEntry::added("src/Foo.java", 12, "    int c = 4;"));
        assert_eq!((entries[4].removed_line, entries[4].added_line), (Some(12), Some(13)));
    }

    #[test]
    fn test_deleted_file_uses_old_name() {
        let text = indoc! {"
            --- a/Old.cs
            +++ /dev/null
            @@ -1,2 +0,0 @@
            -line one
            -line two
        "};
        let entries = parse_unified_diff(text).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.file == "Old.cs"));
        assert_eq!(entries[1].removed_line, Some(2));
    }

    #[test]
    fn test_multiple_files() {
        let text = indoc! {"
            --- a/A.java
            +++ b/A.java
            @@ -1 +1 @@
            -x
            +y
            --- a/B.java
            +++ b/B.java
            @@ -5,0 +6 @@
            +z
        "};
        let entries = parse_unified_diff(text).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2], DiffEntry::added("B.java", 6, "z"));
    }

    #[test]
    fn test_malformed_hunk_header() {
        let err = parse_unified_diff("@@ nonsense @@\n").unwrap_err();
        assert!(matches!(err, Error::DiffSyntax { line: 1, .. }));
    }

    #[test]
    fn test_hunk_at_last_line_number() {
        let text = "@@ -4294967295,2 +4294967295,2 @@\n-a\n-b\n+c\n+d\n";
        let entries = parse_unified_diff(text).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].removed_line, Some(u32::MAX));
        assert_eq!(entries[3].added_line, Some(u32::MAX));
    }

    #[test]
    fn test_marker_matches_change_kind() {
        assert!(DiffMarker::Added.matches(ChangeKind::Added));
        assert!(!DiffMarker::Context.matches(ChangeKind::Added));
        assert!(!DiffMarker::Added.matches(ChangeKind::Removed));
    }
}
