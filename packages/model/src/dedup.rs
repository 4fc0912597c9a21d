use crate::class::ClassModel;
use crate::error::ModelResult;
use crate::graph::ClassGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// How classes discovered at different JSON paths are collapsed before
/// rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// One declaration per class in the graph, as inferred
    #[default]
    ByPath,
    /// Structurally-equal classes are merged into the first declared one
    ByShape,
}

impl ClassGraph {
    /// Apply a dedup policy, returning a new graph
    pub fn deduplicated(&self, policy: DedupPolicy) -> ModelResult<ClassGraph> {
        match policy {
            DedupPolicy::ByPath => Ok(self.clone()),
            DedupPolicy::ByShape => merge_by_shape(self.classes().to_vec()),
        }
    }
}

fn merge_by_shape(mut classes: Vec<ClassModel>) -> ModelResult<ClassGraph> {
    // Merging children can make their parents equal, so repeat until stable
    loop {
        let mut kept: Vec<ClassModel> = Vec::with_capacity(classes.len());
        let mut renames: HashMap<String, String> = HashMap::new();

        for class in classes.iter() {
            match kept.iter().find(|k| k.same_shape(class)) {
                Some(canonical) => {
                    renames.insert(class.name().to_string(), canonical.name().to_string());
                }
                None => kept.push(class.clone()),
            }
        }

        if renames.is_empty() {
            break;
        }

        debug!(merged = renames.len(), "merged structurally equal classes");
        classes = kept
            .iter()
            .map(|c| c.with_renamed_references(&renames))
            .collect();
    }

    ClassGraph::new(classes)
}
