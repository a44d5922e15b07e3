//! Graphviz DOT reading and writing for PDG artifacts.

mod lexer;
mod parser;
mod writer;

pub use parser::parse_dot;
pub use writer::to_dot;

use crate::core::Result;
use crate::graph::Pdg;
use std::path::Path;

/// Read and parse a DOT file.
///
/// A missing file maps to [`crate::core::Error::MissingArtifact`]: upstream tools skip
/// writing a graph when they detect a single group.
pub fn read_dot(path: &Path) -> Result<Pdg> {
    let contents = crate::io::read_artifact(path)?;
    let pdg = parse_dot(&contents)?;
    log::debug!(
        "Parsed {} ({} nodes, {} edges)",
        path.display(),
        pdg.node_count(),
        pdg.edge_count()
    );
    Ok(pdg)
}

pub fn write_dot(path: &Path, pdg: &Pdg) -> Result<()> {
    crate::io::write_artifact(path, &to_dot(pdg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let err = read_dot(&dir.path().join("merged_output_wl_1.dot")).unwrap_err();
        assert!(err.is_missing_artifact());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.dot");
        let mut pdg = Pdg::new(true);
        pdg.add_node("a", [("label", "0:a")]);

        write_dot(&path, &pdg).unwrap();
        let back = read_dot(&path).unwrap();

        assert_eq!(back.node("a").unwrap().label(), Some("0:a"));
    }
}
