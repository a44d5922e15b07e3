//! Diff alignment: colors the PDG nodes whose line span overlaps a changed line.
//!
//! Marking never mutates the caller's graph. The returned graph shares its
//! edge structure with the input and only the touched node records differ.
//!
//! A changed line only reaches nodes of the file it was changed in. Nodes
//! without a `filepath` or `cluster` attribute, and diff lines without a
//! file header, are matched on line numbers alone.

use crate::core::{ChangeColor, ChangeKind, Result, SourceLanguage};
use crate::diff::DiffEntry;
use crate::graph::{Pdg, LABEL_ATTR};
use std::path::Path;

/// Mark the nodes touched by one side of the diff.
///
/// `language` is validated before anything else; an unsupported value fails
/// with [`crate::core::Error::UnsupportedLanguage`] and nothing is annotated.
pub fn mark_pdg_nodes(
    pdg: &Pdg,
    diff: &[DiffEntry],
    kind: ChangeKind,
    language: &str,
) -> Result<Pdg> {
    let language: SourceLanguage = language.parse()?;
    Ok(mark_nodes(pdg, diff, kind, language))
}

/// Mark with an already validated language.
pub fn mark_nodes(
    pdg: &Pdg,
    diff: &[DiffEntry],
    kind: ChangeKind,
    language: SourceLanguage,
) -> Pdg {
    let offset = language.line_offset();
    let changed_lines: Vec<(&str, i64)> = diff
        .iter()
        .filter(|entry| entry.marker.matches(kind))
        .filter_map(|entry| {
            entry
                .line_for(kind)
                .map(|line| (entry.file.as_str(), i64::from(line) - offset))
        })
        .collect();

    let mut marked = pdg.clone();
    let mut colored = 0usize;

    for idx in pdg.node_indices() {
        let Some(node) = pdg.node_at(idx) else {
            continue;
        };

        if node.is_structural() {
            let Some(cluster) = node.cluster() else {
                log::debug!("Structural node {} has no cluster", node.id());
                continue;
            };
            let label = format!("{} {}", node.label().unwrap_or_default(), cluster);
            marked.update_node(idx, |n| n.set_attr(LABEL_ATTR, label));
            continue;
        }

        let Some(span) = node.span() else {
            log::debug!(
                "Skipping node {} with unparsable span {:?}",
                node.id(),
                node.raw_span()
            );
            continue;
        };

        let node_file = node.file_path();
        if changed_lines.iter().any(|&(file, line)| {
            span.contains(line) && same_file(node_file.as_deref(), file)
        }) {
            marked.update_node(idx, |n| n.set_color(kind.color()));
            colored += 1;
        }
    }

    log::debug!(
        "Marked {} of {} nodes as {:?} ({} language, offset {})",
        colored,
        pdg.node_count(),
        kind,
        language,
        offset
    );
    marked
}

/// Whether a diff line of `diff_file` can touch a node of `node_file`.
///
/// Paths match when one ends with the other on component boundaries, so
/// `src/A.java` matches `A.java` but `B.java` does not match `AB.java`.
fn same_file(node_file: Option<&str>, diff_file: &str) -> bool {
    let Some(node_file) = node_file.filter(|f| !f.is_empty()) else {
        return true;
    };
    if diff_file.is_empty() {
        return true;
    }
    let (node_path, diff_path) = (Path::new(node_file), Path::new(diff_file));
    node_path.ends_with(diff_path) || diff_path.ends_with(node_path)
}

/// Apply the added and the removed pass to one graph.
///
/// Both passes run against `pdg`, so structural labels are suffixed once. A
/// node touched by both sides of the diff ends up with the removed color.
pub fn mark_all(pdg: &Pdg, diff: &[DiffEntry], language: SourceLanguage) -> Pdg {
    let mut marked = mark_nodes(pdg, diff, ChangeKind::Added, language);
    let removed = mark_nodes(pdg, diff, ChangeKind::Removed, language);

    for idx in pdg.node_indices() {
        let before = pdg.node_at(idx).and_then(|n| n.color());
        let after = removed.node_at(idx).and_then(|n| n.color());
        if after != before {
            marked.update_node(idx, |n| n.set_color(ChangeColor::Removed));
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    fn node_graph(span: &str) -> Pdg {
        node_graph_in("A.java", span)
    }

    fn node_graph_in(file: &str, span: &str) -> Pdg {
        let mut pdg = Pdg::new(true);
        pdg.add_node("n", [("label", "0:stmt"), ("span", span), ("cluster", file)]);
        pdg
    }

    fn color_of(pdg: &Pdg, id: &str) -> Option<String> {
        pdg.node(id).and_then(|n| n.color()).map(str::to_string)
    }

    #[test]
    fn test_java_overlap_marks_node() {
        let pdg = node_graph("10-12");
        let diff = vec![DiffEntry::added("A.java", 11, "x")];

        let marked = mark_pdg_nodes(&pdg, &diff, ChangeKind::Added, "java").unwrap();

        assert_eq!(color_of(&marked, "n").as_deref(), Some("green"));
        assert_eq!(color_of(&pdg, "n"), None, "original must stay untouched");
    }

    #[test]
    fn test_csharp_offset_shifts_lines() {
        let pdg = node_graph_in("A.cs", "10-12");

        let line = |n| vec![DiffEntry::added("A.cs", n, "x")];
        let marked = |n| {
            color_of(
                &mark_pdg_nodes(&pdg, &line(n), ChangeKind::Added, "csharp").unwrap(),
                "n",
            )
        };

        assert_eq!(marked(13).as_deref(), Some("green"));
        assert_eq!(marked(11).as_deref(), Some("green"));
        assert_eq!(marked(10), None);
        assert_eq!(marked(14), None);
    }

    #[test]
    fn test_removed_pass_uses_removed_line_numbers() {
        let pdg = node_graph("3-3");
        let diff = vec![
            DiffEntry::added("A.java", 3, "new"),
            DiffEntry::removed("A.java", 7, "old"),
        ];

        let marked = mark_pdg_nodes(&pdg, &diff, ChangeKind::Removed, "java").unwrap();
        assert_eq!(color_of(&marked, "n"), None);

        let diff = vec![DiffEntry::removed("A.java", 3, "old")];
        let marked = mark_pdg_nodes(&pdg, &diff, ChangeKind::Removed, "java").unwrap();
        assert_eq!(color_of(&marked, "n").as_deref(), Some("red"));
    }

    #[test]
    fn test_context_lines_never_mark() {
        let pdg = node_graph("1-5");
        let diff = crate::diff::parse_unified_diff("@@ -1,1 +1,1 @@\n ctx\n").unwrap();

        let marked = mark_pdg_nodes(&pdg, &diff, ChangeKind::Added, "java").unwrap();
        assert_eq!(color_of(&marked, "n"), None);
    }

    #[test]
    fn test_unsupported_language_fails_without_annotation() {
        let pdg = node_graph("1-1");
        let diff = vec![DiffEntry::added("A.java", 1, "x")];

        let err = mark_pdg_nodes(&pdg, &diff, ChangeKind::Added, "python").unwrap_err();

        assert!(matches!(err, Error::UnsupportedLanguage(ref l) if l == "python"));
        assert_eq!(color_of(&pdg, "n"), None);
    }

    #[test]
    fn test_structural_nodes_relabelled_not_colored() {
        let mut pdg = Pdg::new(true);
        pdg.add_node("entry", [("label", "Entry"), ("cluster", "Foo.bar")]);
        pdg.add_node("exit", [("label", "Exit"), ("cluster", "Foo.bar"), ("span", "1-9")]);
        let diff = vec![DiffEntry::added("Foo.java", 2, "x")];

        let marked = mark_pdg_nodes(&pdg, &diff, ChangeKind::Added, "java").unwrap();

        assert_eq!(marked.node("entry").unwrap().label(), Some("Entry Foo.bar"));
        assert_eq!(marked.node("exit").unwrap().label(), Some("Exit Foo.bar"));
        assert_eq!(color_of(&marked, "exit"), None);
        assert_eq!(pdg.node("entry").unwrap().label(), Some("Entry"));
    }

    #[test]
    fn test_malformed_span_is_skipped() {
        let pdg = node_graph("oops");
        let diff = vec![DiffEntry::added("A.java", 1, "x")];

        let marked = mark_pdg_nodes(&pdg, &diff, ChangeKind::Added, "java").unwrap();
        assert_eq!(color_of(&marked, "n"), None);
    }

    #[test]
    fn test_marked_copy_shares_edges() {
        let mut pdg = node_graph("1-1");
        pdg.add_edge("n", "m", [("type", "data")]);
        let diff = vec![DiffEntry::added("A.java", 1, "x")];

        let marked = mark_nodes(&pdg, &diff, ChangeKind::Added, SourceLanguage::Java);

        assert!(marked.shares_structure_with(&pdg));
        assert_eq!(marked.edge_count(), 1);
    }

    #[test]
    fn test_lines_of_other_files_do_not_mark() {
        let mut pdg = Pdg::new(true);
        pdg.add_node("a", [("label", "0:a"), ("span", "6-6"), ("filepath", "A.java")]);
        pdg.add_node("b", [("label", "0:b"), ("span", "6-6"), ("filepath", "src/B.java")]);
        let diff = crate::diff::parse_unified_diff(
            "--- a/src/B.java\n+++ b/src/B.java\n@@ -5,0 +6 @@\n+z\n",
        )
        .unwrap();

        let marked = mark_all(&pdg, &diff, SourceLanguage::Java);

        assert_eq!(color_of(&marked, "a"), None);
        assert_eq!(color_of(&marked, "b").as_deref(), Some("green"));
    }

    #[test]
    fn test_same_file_matches_on_components() {
        assert!(same_file(Some("src/main/A.java"), "main/A.java"));
        assert!(same_file(Some("A.java"), "src/A.java"));
        assert!(!same_file(Some("src/AB.java"), "B.java"));
        assert!(same_file(None, "B.java"));
        assert!(same_file(Some("A.java"), ""));
    }

    #[test]
    fn test_mark_all_colors_both_sides_once() {
        let mut pdg = Pdg::new(true);
        pdg.add_node("entry", [("label", "Entry"), ("cluster", "C.m")]);
        pdg.add_node("a", [("label", "0:a"), ("span", "2-2")]);
        pdg.add_node("r", [("label", "1:r"), ("span", "5-5")]);
        let diff = vec![
            DiffEntry::added("C.java", 2, "a"),
            DiffEntry::removed("C.java", 5, "r"),
        ];

        let marked = mark_all(&pdg, &diff, SourceLanguage::Java);

        assert_eq!(color_of(&marked, "a").as_deref(), Some("green"));
        assert_eq!(color_of(&marked, "r").as_deref(), Some("red"));
        assert_eq!(marked.node("entry").unwrap().label(), Some("Entry C.m"));
    }
}
