//! Tests for reading graphs in the shape the untangling tool writes them.

use indoc::indoc;
use pretty_assertions::assert_eq;
use untangle_eval::graph::dot::{parse_dot, to_dot};
use untangle_eval::Error;

const TOOL_OUTPUT: &str = indoc! {r#"
    // merged delta PDG
    digraph "merged_output" {
        graph [rankdir=TB];
        node [shape=box];
        edge [fontsize=8];
        subgraph "cluster_src/Foo.java" {
            label = "src/Foo.java";
            "src/Foo.java:m1" [label="Entry", cluster="src/Foo.java"];
            n1 [label="0:String s = \"a:b\";", span="4-4", community=0, cluster="src/Foo.java"];
        }
        /* the second statement was added by commit 2 */
        n2 [label=<<b>1:s.trim();</b>>, span="5-6", community="1", cluster="src/Foo.java"];
        "src/Foo.java:m1" -> n1 -> n2 [style=solid, label="ctrl"];
        n1:e -> n2:w [style=dotted];
        n2 -> n1 [dependence]
    }
"#};

#[test]
fn test_reads_tool_output() {
    let pdg = parse_dot(TOOL_OUTPUT).unwrap();

    assert!(pdg.is_directed());
    assert_eq!(pdg.name(), Some("merged_output"));
    assert_eq!(pdg.node_count(), 3);
    assert_eq!(pdg.edge_count(), 4);

    let n1 = pdg.node("n1").unwrap();
    assert_eq!(n1.label(), Some("0:String s = \"a:b\";"));
    assert_eq!(n1.span().map(|s| (s.start(), s.end())), Some((4, 4)));
    assert_eq!(n1.community(), Some("0"));

    let entry = pdg.node("src/Foo.java:m1").unwrap();
    assert!(entry.is_structural());

    let n2 = pdg.node("n2").unwrap();
    assert_eq!(n2.label(), Some("<b>1:s.trim();</b>"));
    assert_eq!(pdg.subgraphs().len(), 1);
}

#[test]
fn test_edge_attributes_and_bare_flags() {
    let pdg = parse_dot(TOOL_OUTPUT).unwrap();

    let edges: Vec<_> = pdg
        .edges()
        .map(|e| {
            (
                e.source.to_string(),
                e.target.to_string(),
                e.attributes.get("style").cloned(),
                e.attributes.get("dependence").cloned(),
            )
        })
        .collect();

    let expected: Vec<(String, String, Option<String>, Option<String>)> = vec![
        ("src/Foo.java:m1".into(), "n1".into(), Some("solid".into()), None),
        ("n1".into(), "n2".into(), Some("solid".into()), None),
        ("n1".into(), "n2".into(), Some("dotted".into()), None),
        ("n2".into(), "n1".into(), None, Some("true".into())),
    ];
    assert_eq!(edges, expected);
}

#[test]
fn test_render_and_reparse_preserves_graph() {
    let pdg = parse_dot(TOOL_OUTPUT).unwrap();

    let reparsed = parse_dot(&to_dot(&pdg)).unwrap();

    assert_eq!(reparsed.node_count(), pdg.node_count());
    for node in pdg.nodes() {
        assert_eq!(
            reparsed.node(node.id()).map(|n| n.attributes()),
            Some(node.attributes()),
            "attributes of {}",
            node.id()
        );
    }
    let edges = |g: &untangle_eval::Pdg| -> Vec<(String, String)> {
        g.edges()
            .map(|e| (e.source.to_string(), e.target.to_string()))
            .collect()
    };
    assert_eq!(edges(&reparsed), edges(&pdg));
    assert_eq!(reparsed.graph_attributes(), pdg.graph_attributes());
}

#[test]
fn test_syntax_error_reports_line() {
    let err = parse_dot("digraph {\n  a -> b\n  c [label=\n}").unwrap_err();

    match err {
        Error::DotSyntax { line, .. } => assert_eq!(line, 4),
        other => panic!("unexpected error {other:?}"),
    }
}
