//! Renders a [`Pdg`] back to DOT text.

use crate::graph::{Attributes, Pdg, Subgraph};

pub fn to_dot(pdg: &Pdg) -> String {
    let mut out = String::new();
    if pdg.is_strict() {
        out.push_str("strict ");
    }
    out.push_str(if pdg.is_directed() { "digraph" } else { "graph" });
    if let Some(name) = pdg.name() {
        out.push(' ');
        out.push_str(&quote(name));
    }
    out.push_str(" {\n");

    for (key, value) in pdg.graph_attributes() {
        out.push_str(&format!("    {}={};\n", quote(key), quote(value)));
    }
    if !pdg.node_defaults().is_empty() {
        out.push_str(&format!("    node{};\n", attr_list(pdg.node_defaults())));
    }
    if !pdg.edge_defaults().is_empty() {
        out.push_str(&format!("    edge{};\n", attr_list(pdg.edge_defaults())));
    }

    for subgraph in pdg.subgraphs() {
        write_subgraph(&mut out, subgraph, 1);
    }

    for node in pdg.nodes() {
        out.push_str(&format!(
            "    {}{};\n",
            quote(node.id()),
            attr_list(node.attributes())
        ));
    }

    let op = if pdg.is_directed() { "->" } else { "--" };
    for edge in pdg.edges() {
        out.push_str(&format!(
            "    {} {} {}{};\n",
            quote(edge.source),
            op,
            quote(edge.target),
            attr_list(edge.attributes)
        ));
    }

    out.push_str("}\n");
    out
}

fn write_subgraph(out: &mut String, subgraph: &Subgraph, depth: usize) {
    let indent = "    ".repeat(depth);
    match &subgraph.name {
        Some(name) => out.push_str(&format!("{indent}subgraph {} {{\n", quote(name))),
        None => out.push_str(&format!("{indent}{{\n")),
    }
    for (key, value) in &subgraph.attributes {
        out.push_str(&format!("{indent}    {}={};\n", quote(key), quote(value)));
    }
    for nested in &subgraph.subgraphs {
        write_subgraph(out, nested, depth + 1);
    }
    for member in &subgraph.members {
        out.push_str(&format!("{indent}    {};\n", quote(member)));
    }
    out.push_str(&format!("{indent}}}\n"));
}

fn attr_list(attrs: &Attributes) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = attrs
        .iter()
        .map(|(key, value)| format!("{}={}", quote(key), quote(value)))
        .collect();
    format!(" [{}]", pairs.join(", "))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}
