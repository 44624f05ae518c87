//! Error taxonomy of a generation run.
//!
//! Every unit-level variant carries the location of the declaration it came
//! from. A run never stops at the first error: all of them are collected in the
//! [`GenerationReport`](crate::GenerationReport).

use itertools::Itertools;

use crate::SourceLocation;

/// The interface (and place) a generated name was requested by
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Origin {
    pub interface: String,
    pub source_location: SourceLocation,
}

impl Origin {
    pub fn new(interface: impl Into<String>, source_location: SourceLocation) -> Self {
        Self {
            interface: interface.into(),
            source_location,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` ({})", self.interface, self.source_location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Structural defect found while scanning
    #[error("{source_location}: malformed declaration: {reason}")]
    MalformedDeclaration {
        source_location: SourceLocation,
        reason: String,
    },

    /// A type token that is empty or cannot be parsed
    #[error("{source_location}: unresolved type `{type_text}` in `{interface}`: {reason}")]
    UnresolvedType {
        source_location: SourceLocation,
        interface: String,
        type_text: String,
        reason: String,
    },

    /// Two methods of one interface share a name
    #[error(
        "{source_location}: duplicate method `{method}` in `{interface}` (first declared at {first})"
    )]
    DuplicateMethod {
        source_location: SourceLocation,
        interface: String,
        method: String,
        first: SourceLocation,
    },

    /// Generated names requested by more than one origin
    #[error("emission conflict: `{name}` is claimed by {}", .origins.iter().join(", "))]
    EmissionConflict { name: String, origins: Vec<Origin> },

    /// Rejected generator configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A JSON-lines record that cannot be decoded
    #[error("line {line}: {message}")]
    Jsonl { line: usize, message: String },
}

impl Error {
    /// Location of the first declaration involved in the error, if any
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Error::MalformedDeclaration {
                source_location, ..
            }
            | Error::UnresolvedType {
                source_location, ..
            }
            | Error::DuplicateMethod {
                source_location, ..
            } => Some(source_location),
            Error::EmissionConflict { origins, .. } => {
                origins.first().map(|origin| &origin.source_location)
            }
            Error::InvalidConfig(_) | Error::Jsonl { .. } => None,
        }
    }

    pub(crate) fn malformed(source_location: &SourceLocation, reason: impl Into<String>) -> Self {
        Error::MalformedDeclaration {
            source_location: source_location.clone(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
