use thiserror::Error;

/// Errors raised while assembling or validating a class graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Class name must not be empty")]
    EmptyClassName,

    #[error("Property name must not be empty in class '{class}'")]
    EmptyPropertyName { class: String },

    #[error("Class '{0}' is declared more than once")]
    DuplicateClass(String),

    #[error("Property '{property}' is declared more than once in class '{class}'")]
    DuplicateProperty { class: String, property: String },

    #[error("Property '{property}' of class '{class}' references undefined class '{target}'")]
    UnresolvedReference {
        class: String,
        property: String,
        target: String,
    },

    #[error("Cyclic class reference: {}", path.join(" → "))]
    Cycle { path: Vec<String> },
}

pub type ModelResult<T> = Result<T, ModelError>;
