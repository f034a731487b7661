//! Error taxonomy for the subnetting engine.
//!
//! Every failure is a local validation failure: a call either returns a full
//! result or exactly one [`SubnetError`], never a partial result.

use thiserror::Error;

/// Errors returned by parsing, network math and subnet allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    #[error("invalid address format '{input}': {reason}")]
    InvalidAddressFormat { input: String, reason: String },

    #[error("invalid subnet mask '{input}': {reason}")]
    InvalidMask { input: String, reason: String },

    #[error("invalid requirement '{input}': {reason}")]
    InvalidRequirement { input: String, reason: String },

    #[error("capacity exceeded for '{input}': {reason}")]
    CapacityExceeded { input: String, reason: String },
}

impl SubnetError {
    pub fn address(input: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidAddressFormat {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn mask(input: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidMask {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn requirement(input: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidRequirement {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn capacity(input: impl ToString, reason: impl ToString) -> Self {
        Self::CapacityExceeded {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Stable identifier for the error kind, used in JSON output.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddressFormat { .. } => "invalid_address_format",
            Self::InvalidMask { .. } => "invalid_mask",
            Self::InvalidRequirement { .. } => "invalid_requirement",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
        }
    }

    /// The offending input as given by the caller.
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidAddressFormat { input, .. }
            | Self::InvalidMask { input, .. }
            | Self::InvalidRequirement { input, .. }
            | Self::CapacityExceeded { input, .. } => input,
        }
    }

    /// Human readable reason, without the input.
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidAddressFormat { reason, .. }
            | Self::InvalidMask { reason, .. }
            | Self::InvalidRequirement { reason, .. }
            | Self::CapacityExceeded { reason, .. } => reason,
        }
    }
}
