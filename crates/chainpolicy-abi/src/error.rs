use thiserror::Error;

use crate::types::{ActorsVersion, NetworkVersion};

/// Errors surfaced by policy queries and overrides.
///
/// None of these are transient: the input is either valid for the selected
/// revision or it is not, so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unsupported actors version: {0}")]
    UnsupportedRevision(u32),

    #[error("Unsupported network version: {0}")]
    UnsupportedNetworkVersion(NetworkVersion),

    #[error("Invalid proof type {proof}: {context}")]
    InvalidProofType { proof: String, context: String },

    #[error("No supported proof types for actors {0}")]
    NoSupportedProofTypes(ActorsVersion),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl PolicyError {
    pub fn unsupported_revision(version: ActorsVersion) -> Self {
        PolicyError::UnsupportedRevision(version.number())
    }

    pub fn invalid_proof(proof: impl ToString, context: impl Into<String>) -> Self {
        PolicyError::InvalidProofType {
            proof: proof.to_string(),
            context: context.into(),
        }
    }
}
