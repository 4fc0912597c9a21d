//! # JSONModeler class model
//!
//! Language-agnostic description of the model classes inferred from a JSON
//! sample. The inference stage builds a [`ClassGraph`]; writers only read it.
//!
//! ## Example
//!
//! ```rust
//! use jsonmodeler_model::{ClassGraph, ClassModel, PropertyType, Traversal};
//!
//! let graph = ClassGraph::builder()
//!     .class(
//!         ClassModel::builder("Person")
//!             .property("name", PropertyType::String)
//!             .property("address", PropertyType::class("Address"))
//!             .build()
//!             .unwrap(),
//!     )
//!     .class(
//!         ClassModel::builder("Address")
//!             .property("city", PropertyType::String)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let order: Vec<&str> = graph.leaves_first().iter().map(|c| c.name()).collect();
//! assert_eq!(order, vec!["Address", "Person"]);
//! assert_eq!(graph.traverse(Traversal::DepthFirst)[0].name(), "Person");
//! ```

pub mod class;
pub mod dedup;
pub mod error;
pub mod graph;
pub mod types;

pub use class::{ClassModel, ClassModelBuilder, Property};
pub use dedup::DedupPolicy;
pub use error::{ModelError, ModelResult};
pub use graph::{ClassGraph, ClassGraphBuilder, Traversal};
pub use types::PropertyType;
