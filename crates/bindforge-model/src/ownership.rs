use serde::{Deserialize, Serialize};

/// How a function participates in the lifecycle of a resource.
///
/// The pairing between a `Constructs` and a `Releases` function is declared
/// explicitly through the `resource` field rather than inferred from symbol
/// names. Validation requires exactly one of each per handle type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OwnershipKind {
    /// Produces a new live handle for `resource`.
    Constructs { resource: String },
    /// Reads through a handle without taking ownership.
    Borrows,
    /// Mutates the resource behind a handle in place.
    Mutates,
    /// Consumes a live handle for `resource`. The handle is dead afterwards.
    Releases { resource: String },
    /// Pure computation; no resource involvement.
    Computes,
}

impl OwnershipKind {
    /// The handle type this function constructs or releases, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            OwnershipKind::Constructs { resource } | OwnershipKind::Releases { resource } => {
                Some(resource)
            }
            _ => None,
        }
    }
}

// ── Symbol derivation rules ──
//
// Every exported symbol name is derived from (resource, operation) by one of
// these four rules. Emitters and the model builder share them so the same
// convention holds across targets.

pub fn constructor_symbol(resource: &str) -> String {
    format!("{}_new", resource)
}

pub fn destructor_symbol(resource: &str) -> String {
    format!("{}_drop", resource)
}

pub fn accessor_symbol(resource: &str, field: &str) -> String {
    format!("{}_get_{}", resource, field)
}

pub fn mutator_symbol(resource: &str, verb: &str) -> String {
    format!("{}_{}", resource, verb)
}

/// Strip the `<resource>_` prefix from an exported symbol, yielding the local
/// operation name used by wrapper methods. Symbols that do not carry the
/// prefix are returned unchanged.
pub fn operation_name<'a>(resource: &str, symbol: &'a str) -> &'a str {
    symbol
        .strip_prefix(resource)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(symbol)
}

/// Lifecycle contract embedded in every emitted handle wrapper. The protocol
/// adds no runtime tracking; violating it is undefined behavior.
pub const HANDLE_CONTRACT: [&str; 3] = [
    "A value produced by the constructor stays live until it is passed to",
    "the destructor exactly once. Releasing it more than once, or using it",
    "after release, is undefined behavior; no runtime tracking is performed.",
];

/// Contract for owned strings: the raw pointer stays valid until the string
/// is released, which must happen exactly once.
pub const OWNED_STRING_CONTRACT: [&str; 2] = [
    "Owns its buffer. The pointer returned by the accessor stays valid until",
    "the string is released, which must happen exactly once.",
];

/// Contract for borrowed views: read-only, never released by the consumer.
pub const BORROWED_VIEW_CONTRACT: [&str; 2] = [
    "Read-only view into library-owned memory. The consumer must not release",
    "it; no release function applies to this value.",
];
