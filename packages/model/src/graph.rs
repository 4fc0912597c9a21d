use crate::class::ClassModel;
use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Visiting order for [`ClassGraph::traverse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Parent first, then each nested class subtree in first-seen order
    DepthFirst,
    /// Level by level from the roots
    BreadthFirst,
}

/// The validated set of classes handed to writers.
///
/// Class names are unique, every class reference resolves, and the
/// reference graph is acyclic. The graph is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClassGraph", into = "RawClassGraph")]
pub struct ClassGraph {
    classes: Vec<ClassModel>,
    index: HashMap<String, usize>,
}

/// Hand-off format as produced by the inference stage
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawClassGraph {
    #[serde(default)]
    classes: Vec<ClassModel>,
}

impl TryFrom<RawClassGraph> for ClassGraph {
    type Error = ModelError;

    fn try_from(raw: RawClassGraph) -> ModelResult<Self> {
        ClassGraph::new(raw.classes)
    }
}

impl From<ClassGraph> for RawClassGraph {
    fn from(graph: ClassGraph) -> Self {
        RawClassGraph {
            classes: graph.classes,
        }
    }
}

impl ClassGraph {
    /// Validate and assemble a graph from classes in declaration order
    pub fn new(classes: Vec<ClassModel>) -> ModelResult<Self> {
        let mut index = HashMap::new();
        for (position, class) in classes.iter().enumerate() {
            class.validate()?;
            if index.insert(class.name().to_string(), position).is_some() {
                return Err(ModelError::DuplicateClass(class.name().to_string()));
            }
        }

        let graph = ClassGraph { classes, index };
        graph.check_references()?;
        graph.check_acyclic()?;

        debug!(classes = graph.classes.len(), "class graph validated");
        Ok(graph)
    }

    pub fn builder() -> ClassGraphBuilder {
        ClassGraphBuilder::default()
    }

    /// Parse the JSON hand-off format
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// All classes in declaration order
    pub fn classes(&self) -> &[ClassModel] {
        &self.classes
    }

    pub fn get(&self, name: &str) -> Option<&ClassModel> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes not referenced by any other class, in declaration order
    pub fn roots(&self) -> Vec<&ClassModel> {
        let referenced: HashSet<&str> = self
            .classes
            .iter()
            .flat_map(|c| c.nested_classes())
            .collect();

        self.classes
            .iter()
            .filter(|c| !referenced.contains(c.name()))
            .collect()
    }

    /// Visit every class exactly once, starting from the roots
    pub fn traverse(&self, order: Traversal) -> Vec<&ClassModel> {
        match order {
            Traversal::DepthFirst => {
                let mut visited = HashSet::new();
                let mut out = Vec::with_capacity(self.classes.len());
                for root in self.roots() {
                    self.visit_preorder(root, &mut visited, &mut out);
                }
                out
            }
            Traversal::BreadthFirst => {
                let mut visited = HashSet::new();
                let mut out = Vec::with_capacity(self.classes.len());
                let mut queue: VecDeque<&ClassModel> = VecDeque::new();
                for root in self.roots() {
                    if visited.insert(root.name()) {
                        queue.push_back(root);
                    }
                }
                while let Some(class) = queue.pop_front() {
                    out.push(class);
                    for nested in self.nested_of(class) {
                        if visited.insert(nested.name()) {
                            queue.push_back(nested);
                        }
                    }
                }
                out
            }
        }
    }

    /// Topological order: every class comes after all classes it references
    pub fn leaves_first(&self) -> Vec<&ClassModel> {
        let mut visited = HashSet::new();
        let mut out = Vec::with_capacity(self.classes.len());
        for root in self.roots() {
            self.visit_postorder(root, &mut visited, &mut out);
        }
        out
    }

    fn nested_of<'a>(&'a self, class: &'a ClassModel) -> impl Iterator<Item = &'a ClassModel> + 'a {
        class
            .nested_classes()
            .into_iter()
            .filter_map(move |name| self.get(name))
    }

    fn visit_preorder<'a>(
        &'a self,
        class: &'a ClassModel,
        visited: &mut HashSet<&'a str>,
        out: &mut Vec<&'a ClassModel>,
    ) {
        if !visited.insert(class.name()) {
            return;
        }
        out.push(class);
        for nested in self.nested_of(class) {
            self.visit_preorder(nested, visited, out);
        }
    }

    fn visit_postorder<'a>(
        &'a self,
        class: &'a ClassModel,
        visited: &mut HashSet<&'a str>,
        out: &mut Vec<&'a ClassModel>,
    ) {
        if !visited.insert(class.name()) {
            return;
        }
        for nested in self.nested_of(class) {
            self.visit_postorder(nested, visited, out);
        }
        out.push(class);
    }

    fn check_references(&self) -> ModelResult<()> {
        for class in &self.classes {
            for property in class.properties() {
                for target in property.ty.referenced_classes() {
                    if !self.contains(target) {
                        return Err(ModelError::UnresolvedReference {
                            class: class.name().to_string(),
                            property: property.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_acyclic(&self) -> ModelResult<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit<'a>(
            graph: &'a ClassGraph,
            class: &'a ClassModel,
            marks: &mut HashMap<&'a str, Mark>,
            path: &mut Vec<&'a str>,
        ) -> ModelResult<()> {
            match marks.get(class.name()) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    let start = path.iter().position(|n| *n == class.name()).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                    cycle.push(class.name().to_string());
                    return Err(ModelError::Cycle { path: cycle });
                }
                None => {}
            }

            marks.insert(class.name(), Mark::Visiting);
            path.push(class.name());
            for nested in graph.nested_of(class) {
                visit(graph, nested, marks, path)?;
            }
            path.pop();
            marks.insert(class.name(), Mark::Done);
            Ok(())
        }

        let mut marks = HashMap::new();
        let mut path = Vec::new();
        for class in &self.classes {
            visit(self, class, &mut marks, &mut path)?;
        }
        Ok(())
    }
}

/// Collects classes before validating them as a whole
#[derive(Debug, Clone, Default)]
pub struct ClassGraphBuilder {
    classes: Vec<ClassModel>,
}

impl ClassGraphBuilder {
    pub fn class(mut self, class: ClassModel) -> Self {
        self.classes.push(class);
        self
    }

    pub fn add_class(&mut self, class: ClassModel) -> &mut Self {
        self.classes.push(class);
        self
    }

    pub fn build(self) -> ModelResult<ClassGraph> {
        ClassGraph::new(self.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyType;

    fn class(name: &str, props: &[(&str, PropertyType)]) -> ClassModel {
        props
            .iter()
            .fold(ClassModel::builder(name), |b, (n, t)| b.property(*n, t.clone()))
            .build()
            .unwrap()
    }

    fn names(classes: &[&ClassModel]) -> Vec<String> {
        classes.iter().map(|c| c.name().to_string()).collect()
    }

    fn order_graph() -> ClassGraph {
        // Order -> Customer -> Address, Order -> Item
        ClassGraph::builder()
            .class(class(
                "Order",
                &[
                    ("customer", PropertyType::class("Customer")),
                    ("items", PropertyType::array(PropertyType::class("Item"))),
                ],
            ))
            .class(class("Customer", &[("address", PropertyType::class("Address"))]))
            .class(class("Item", &[("sku", PropertyType::String)]))
            .class(class("Address", &[("city", PropertyType::String)]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_roots() {
        let graph = order_graph();
        assert_eq!(names(&graph.roots()), vec!["Order"]);
    }

    #[test]
    fn test_depth_first_traversal() {
        let graph = order_graph();
        assert_eq!(
            names(&graph.traverse(Traversal::DepthFirst)),
            vec!["Order", "Customer", "Address", "Item"]
        );
    }

    #[test]
    fn test_breadth_first_traversal() {
        let graph = order_graph();
        assert_eq!(
            names(&graph.traverse(Traversal::BreadthFirst)),
            vec!["Order", "Customer", "Item", "Address"]
        );
    }

    #[test]
    fn test_leaves_first() {
        let graph = order_graph();
        assert_eq!(
            names(&graph.leaves_first()),
            vec!["Address", "Customer", "Item", "Order"]
        );
    }

    #[test]
    fn test_shared_child_visited_once() {
        let graph = ClassGraph::builder()
            .class(class(
                "Root",
                &[
                    ("a", PropertyType::class("Left")),
                    ("b", PropertyType::class("Right")),
                ],
            ))
            .class(class("Left", &[("s", PropertyType::class("Shared"))]))
            .class(class("Right", &[("s", PropertyType::class("Shared"))]))
            .class(class("Shared", &[]))
            .build()
            .unwrap();

        for order in [Traversal::DepthFirst, Traversal::BreadthFirst] {
            assert_eq!(graph.traverse(order).len(), 4);
        }
        assert_eq!(
            names(&graph.leaves_first()),
            vec!["Shared", "Left", "Right", "Root"]
        );
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let result = ClassGraph::builder()
            .class(class("A", &[]))
            .class(class("A", &[]))
            .build();
        assert_eq!(result, Err(ModelError::DuplicateClass("A".to_string())));
    }

    #[test]
    fn test_unresolved_reference_rejected() {
        let result = ClassGraph::builder()
            .class(class("A", &[("b", PropertyType::class("B"))]))
            .build();
        assert_eq!(
            result,
            Err(ModelError::UnresolvedReference {
                class: "A".to_string(),
                property: "b".to_string(),
                target: "B".to_string(),
            })
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let result = ClassGraph::builder()
            .class(class("A", &[("b", PropertyType::class("B"))]))
            .class(class("B", &[("a", PropertyType::optional(PropertyType::class("A")))]))
            .build();
        assert_eq!(
            result,
            Err(ModelError::Cycle {
                path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            })
        );
    }

    #[test]
    fn test_self_reference_rejected() {
        let result = ClassGraph::builder()
            .class(class("Node", &[("next", PropertyType::class("Node"))]))
            .build();
        assert!(matches!(result, Err(ModelError::Cycle { .. })));
    }

    #[test]
    fn test_empty_graph() {
        let graph = ClassGraph::builder().build().unwrap();
        assert!(graph.is_empty());
        assert!(graph.traverse(Traversal::DepthFirst).is_empty());
    }

    #[test]
    fn test_json_round_trip_validates() {
        let source = r#"{
            "classes": [
                { "name": "Person", "properties": [
                    { "name": "name", "type": "string" },
                    { "name": "pets", "type": { "array": { "class": "Pet" } } }
                ]},
                { "name": "Pet", "properties": [] }
            ]
        }"#;

        let graph = ClassGraph::from_json(source).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get("Person").unwrap().nested_classes(), vec!["Pet"]);

        let reparsed = ClassGraph::from_json(&graph.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, graph);

        let broken = r#"{ "classes": [ { "name": "A", "properties": [
            { "name": "b", "type": { "class": "Missing" } } ] } ] }"#;
        let err = ClassGraph::from_json(broken).unwrap_err();
        assert!(err.to_string().contains("undefined class 'Missing'"));
    }
}
