//! quack Pulse Sequences
//!
//! Hardware-oriented pulse descriptions for neutral-atom registers, and the
//! serializer that writes them.
//!
//! # Overview
//!
//! - [`Waveform`]: tagged envelope shapes (constant, ramp, Blackman)
//! - [`SequenceBuilder`] / [`PulseSequence`]: register positions, channel
//!   declarations and pulses, checked for dangling channel references and
//!   duplicate labels when built
//! - [`PulsePolicy`]: how an [`IsingModel`](quack_ir::IsingModel) becomes a
//!   register and a pulse list; [`GlobalSweepPolicy`] is the stock one
//!
//! # Example
//!
//! ```rust
//! use quack_compile::{Encoder, MisEncoder};
//! use quack_ir::Graph;
//! use quack_pulse::{GlobalSweepPolicy, from_ising};
//!
//! let model = MisEncoder::default().encode(&Graph::cycle(4)).unwrap();
//! let sequence = from_ising(&model, &GlobalSweepPolicy::new()).unwrap();
//!
//! assert_eq!(sequence.register().len(), 4);
//! let bytes = sequence.to_bytes().unwrap();
//! assert!(bytes.starts_with(b"{\"sequence_builder\":"));
//! ```

pub mod error;
pub mod policy;
pub mod sequence;
pub mod waveform;

pub use error::{PulseError, PulseResult};
pub use policy::{
    GlobalSweepPolicy, PulsePolicy, from_coefficients, from_ising, grid_position, qubit_label,
};
pub use sequence::{Channel, ChannelKind, Pulse, PulseSequence, SequenceBuilder};
pub use waveform::Waveform;
