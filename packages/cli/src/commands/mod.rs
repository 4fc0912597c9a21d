pub mod build;
pub mod languages;
pub mod render;

pub use build::{build, BuildArgs};
pub use languages::{languages, LanguagesArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use jsonmodeler_model::ClassGraph;
use jsonmodeler_writer::OutputFile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read and validate a class graph in the JSON hand-off format
pub(crate) fn load_graph(path: &Path) -> Result<ClassGraph> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read model {}", path.display()))?;
    let graph = ClassGraph::from_json(&source)
        .with_context(|| format!("Invalid model {}", path.display()))?;
    debug!(path = %path.display(), classes = graph.len(), "loaded class graph");
    Ok(graph)
}

/// Write rendered files under `out_dir`, returning their paths
pub(crate) fn write_files(out_dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;

    files
        .iter()
        .map(|file| {
            let path = out_dir.join(&file.filename);
            fs::write(&path, &file.contents)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested/out");
        let files = vec![
            OutputFile::new("A.swift", "struct A {}\n"),
            OutputFile::new("B.swift", "struct B {}\n"),
        ];

        let written = write_files(&out_dir, &files).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(out_dir.join("B.swift")).unwrap(), "struct B {}\n");
    }

    #[test]
    fn test_load_graph_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{ "classes": [ { "name": "" } ] }"#).unwrap();

        let err = load_graph(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("model.json"));
    }
}
