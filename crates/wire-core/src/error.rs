//! Error types for wire-core
//!
//! Every variant is terminal: an error aborts the enclosing construction
//! request and surfaces to the caller with the path, kinds, key or
//! namespace needed to diagnose it. Nothing is caught and retried
//! internally.

/// Result type for wire-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by post-build hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the construction engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required path was absent for a strict-non-null target
    #[error("required path '{path}' is not present")]
    MissingPath { path: String },

    /// A `~type` name with no registry entry
    #[error("no registered type named '{name}'")]
    UnknownType { name: String },

    /// No constructor matches the coerced argument signature
    #[error("cannot find constructor of types [{args}] for {target}")]
    NoMatchingConstructor { args: String, target: String },

    /// An enum leaf named a variant the enum does not declare
    #[error("no variant named '{name}' in enum {target}")]
    UnknownEnumVariant { name: String, target: String },

    /// Reference key with fewer than two path segments
    #[error("expected reference key to have at least 2 parts in [{key}]")]
    ReferenceSyntax { key: String },

    /// No handler registered for a reference namespace
    #[error("cannot find reference handler named '{namespace}'")]
    UnknownNamespace { namespace: String },

    /// A handler resolved a strict-non-null primitive to null
    #[error(
        "primitive type {target} cannot resolve to null from handler \
         for reference key {key} sent to '{namespace}' handler"
    )]
    NullPrimitive {
        key: String,
        namespace: String,
        target: String,
    },

    /// A value kind that cannot be coerced in the requested context
    #[error("cannot use {found} where {expected} was required")]
    ValueKind { expected: String, found: String },

    /// Pair-list map input with an odd number of entries
    #[error("map list must have an even number of entries, got {len}")]
    OddPairList { len: usize },

    /// A constructor argument failed coercion
    #[error("cannot convert constructor argument at position {index}")]
    ConstructorArg {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// A pair-list element failed coercion
    #[error("cannot convert list entry at position {index}")]
    PairListElement {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// A map-route entry whose value failed coercion
    #[error("cannot convert value for key '{key}'")]
    MapEntry {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// A slot assignment rejected by the instance
    #[error("cannot assign slot '{slot}' on {type_name}: {detail}")]
    Assign {
        type_name: String,
        slot: String,
        detail: String,
    },

    /// A post-build hook raised during invocation
    #[error("post-build hook failed on {type_name}")]
    LifecycleHook {
        type_name: String,
        #[source]
        source: BoxError,
    },

    /// Tree error from wire-tree
    #[error(transparent)]
    Tree(#[from] wire_tree::Error),
}
