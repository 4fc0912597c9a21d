//! # JSONModeler writers
//!
//! Render a [`ClassGraph`](jsonmodeler_model::ClassGraph) into model source
//! files for Swift, Objective-C and Java.
//!
//! ```rust
//! use jsonmodeler_model::{ClassGraph, ClassModel, PropertyType};
//! use jsonmodeler_writer::{Language, WriterRegistry, WritingOptions};
//!
//! let graph = ClassGraph::builder()
//!     .class(
//!         ClassModel::builder("Person")
//!             .property("name", PropertyType::String)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let registry = WriterRegistry::new();
//! let writer = registry.get(Language::Swift).unwrap();
//! let files = writer
//!     .render(&graph, &WritingOptions::default_for(Language::Swift))
//!     .unwrap();
//! assert_eq!(files[0].filename, "Person.swift");
//! ```

mod context;
mod error;
pub mod java;
mod language;
mod naming;
pub mod objc;
mod options;
mod registry;
pub mod swift;
mod writer;

pub use context::SourceBuffer;
pub use error::{ErrorKind, WriterError, WriterResult};
pub use java::JavaWriter;
pub use language::Language;
pub use naming::{camel_case, pascal_case};
pub use objc::ObjectiveCWriter;
pub use options::{
    AccessLevel, CommonOptions, FileLayout, JavaOptions, ObjectiveCOptions, SwiftOptions,
    SwiftTypeKind, WritingOptions,
};
pub use registry::WriterRegistry;
pub use swift::SwiftWriter;
pub use writer::{DeclarationOrder, OutputFile, OutputLanguageWriter, RenderBudget, TypeNames};

// Re-export the model so callers need a single dependency
pub use jsonmodeler_model as model;
