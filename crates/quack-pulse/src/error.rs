//! Error types for pulse sequences.

use quack_ir::IrError;
use thiserror::Error;

/// Result type for pulse operations.
pub type PulseResult<T> = Result<T, PulseError>;

/// Errors that can occur while building or serializing a pulse sequence.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PulseError {
    /// A pulse targets a channel that was never declared.
    #[error("Pulse {pulse} references undeclared channel '{channel}'")]
    DanglingChannelReference {
        /// Index of the pulse in the sequence.
        pulse: usize,
        /// The missing channel label.
        channel: String,
    },

    /// Two register entries share a label.
    #[error("Duplicate qubit label '{0}' in register")]
    DuplicateQubitLabel(String),

    /// Two channel declarations share a label.
    #[error("Duplicate channel label '{0}'")]
    DuplicateChannelLabel(String),

    /// A qubit position is NaN or infinite.
    #[error("Qubit '{label}' has a non-finite position {position:?}")]
    NonFinitePosition {
        /// The qubit.
        label: String,
        /// Its position.
        position: [f64; 2],
    },

    /// A waveform parameter is out of its domain.
    #[error("Invalid {shape} waveform: {reason}")]
    InvalidWaveform {
        /// Waveform shape name.
        shape: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Register site spacing is not a positive finite distance.
    #[error("Qubit spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    /// The sequence has no qubits.
    #[error("Register is empty")]
    EmptyRegister,

    /// Coefficients could not be turned into a model.
    #[error("Invalid coefficients: {0}")]
    Coefficients(#[from] IrError),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PulseError {
    /// True for errors where the sequence refers to something it does not
    /// declare, or declares something twice.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            PulseError::DanglingChannelReference { .. }
                | PulseError::DuplicateQubitLabel(_)
                | PulseError::DuplicateChannelLabel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulseError::DanglingChannelReference {
            pulse: 2,
            channel: "ch9".into(),
        };
        assert_eq!(err.to_string(), "Pulse 2 references undeclared channel 'ch9'");
        assert!(err.is_reference_error());
        assert!(!PulseError::EmptyRegister.is_reference_error());
    }
}
