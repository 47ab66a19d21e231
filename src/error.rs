//! Errors raised while reading a specification or generating bindings.

/// Top-level error for parsing and generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The family name names the module and the family at run time.
    #[error("Inconsistent spec: family name is empty")]
    EmptyName,
    /// The document parsed, but contradicts itself.
    #[error("Inconsistent spec: operation {operation:?}: {source}")]
    Inconsistent {
        operation: String,
        #[source]
        source: Inconsistency,
    },
}

impl Error {
    pub(crate) fn inconsistent(operation: &str, source: Inconsistency) -> Self {
        Error::Inconsistent {
            operation: operation.to_string(),
            source,
        }
    }
}

/// A specification that is well-formed YAML but internally self-contradictory.
///
/// Generation stops at the first one rather than emit bindings with silently
/// missing fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Inconsistency {
    #[error("attributes {wanted:?} listed without an attribute set")]
    MissingAttributeSet { wanted: Vec<String> },
    #[error("attribute set {set:?} is not defined")]
    UnknownAttributeSet { set: String },
    #[error("found no attributes for set {set:?} in list {wanted:?}")]
    Unresolved { set: String, wanted: Vec<String> },
}
