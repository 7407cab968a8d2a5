//! Pulse sequences: register, channels and pulses.
//!
//! A [`PulseSequence`] is assembled with a [`SequenceBuilder`], which checks
//! the referential invariants once at [`build`](SequenceBuilder::build)
//! time:
//!
//! - qubit labels in the register are distinct
//! - channel labels are distinct
//! - every pulse targets a declared channel
//!
//! The serialized form is
//!
//! ```json
//! {"sequence_builder": {
//!     "channels": {"ch0": {"type": "rydberg_global"}},
//!     "pulses": [{"channel": "ch0", "amplitude": {..}, "detuning": {..}, "phase": 0.0}],
//!     "register": {"qubits": {"positions": {"q0": [0.0, 0.0]}}}
//! }}
//! ```
//!
//! Register and channel maps are written in declaration order.

use rustc_hash::FxHashSet;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

use crate::error::{PulseError, PulseResult};
use crate::waveform::Waveform;

/// Hardware channel families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Rydberg excitation, addressing the whole register.
    RydbergGlobal,
    /// Rydberg excitation, addressing individual qubits.
    RydbergLocal,
    /// Ground-state Raman, whole register.
    RamanGlobal,
    /// Ground-state Raman, individual qubits.
    RamanLocal,
    /// Microwave, whole register.
    MicrowaveGlobal,
}

impl ChannelKind {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::RydbergGlobal => "rydberg_global",
            ChannelKind::RydbergLocal => "rydberg_local",
            ChannelKind::RamanGlobal => "raman_global",
            ChannelKind::RamanLocal => "raman_local",
            ChannelKind::MicrowaveGlobal => "microwave_global",
        }
    }

    /// True for channels that address the whole register at once.
    pub fn is_global(self) -> bool {
        matches!(
            self,
            ChannelKind::RydbergGlobal | ChannelKind::RamanGlobal | ChannelKind::MicrowaveGlobal
        )
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A channel declaration as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel family.
    #[serde(rename = "type")]
    pub kind: ChannelKind,
}

/// One pulse on one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Label of the target channel.
    pub channel: String,
    /// Rabi-frequency envelope.
    pub amplitude: Waveform,
    /// Detuning envelope.
    pub detuning: Waveform,
    /// Phase in radians.
    #[serde(default)]
    pub phase: f64,
}

impl Pulse {
    /// Create a pulse with zero phase.
    pub fn new(channel: impl Into<String>, amplitude: Waveform, detuning: Waveform) -> Self {
        Self {
            channel: channel.into(),
            amplitude,
            detuning,
            phase: 0.0,
        }
    }

    /// Set the phase.
    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Length of the longer of the two envelopes.
    pub fn duration(&self) -> u32 {
        self.amplitude.duration().max(self.detuning.duration())
    }
}

/// Accumulates register, channels and pulses for a [`PulseSequence`].
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    register: Vec<(String, [f64; 2])>,
    channels: Vec<(String, ChannelKind)>,
    pulses: Vec<Pulse>,
}

impl SequenceBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The one-qubit example: `q0` at the origin, a global Rydberg channel
    /// `ch0`, and one pulse with a Blackman amplitude of area π and a
    /// detuning ramp from -5 to 5 over 1000 ns.
    pub fn single_qubit_demo() -> Self {
        Self::new()
            .qubit("q0", [0.0, 0.0])
            .channel("ch0", ChannelKind::RydbergGlobal)
            .pulse(Pulse::new(
                "ch0",
                Waveform::blackman(1000, PI),
                Waveform::ramp(1000, -5.0, 5.0),
            ))
    }

    /// Place a qubit.
    #[must_use]
    pub fn qubit(mut self, label: impl Into<String>, position: [f64; 2]) -> Self {
        self.register.push((label.into(), position));
        self
    }

    /// Declare a channel.
    #[must_use]
    pub fn channel(mut self, label: impl Into<String>, kind: ChannelKind) -> Self {
        self.channels.push((label.into(), kind));
        self
    }

    /// Append a pulse.
    #[must_use]
    pub fn pulse(mut self, pulse: Pulse) -> Self {
        self.pulses.push(pulse);
        self
    }

    /// Number of qubits placed so far.
    pub fn num_qubits(&self) -> usize {
        self.register.len()
    }

    /// Check the invariants and produce the sequence.
    pub fn build(self) -> PulseResult<PulseSequence> {
        let mut qubits = FxHashSet::default();
        for (label, position) in &self.register {
            if !qubits.insert(label.as_str()) {
                return Err(PulseError::DuplicateQubitLabel(label.clone()));
            }
            if !position.iter().all(|c| c.is_finite()) {
                return Err(PulseError::NonFinitePosition {
                    label: label.clone(),
                    position: *position,
                });
            }
        }

        let mut channels = FxHashSet::default();
        for (label, _) in &self.channels {
            if !channels.insert(label.as_str()) {
                return Err(PulseError::DuplicateChannelLabel(label.clone()));
            }
        }

        for (index, pulse) in self.pulses.iter().enumerate() {
            if !channels.contains(pulse.channel.as_str()) {
                return Err(PulseError::DanglingChannelReference {
                    pulse: index,
                    channel: pulse.channel.clone(),
                });
            }
            pulse.amplitude.validate()?;
            pulse.detuning.validate()?;
        }

        debug!(
            qubits = self.register.len(),
            channels = self.channels.len(),
            pulses = self.pulses.len(),
            "Built pulse sequence"
        );

        Ok(PulseSequence {
            register: self.register,
            channels: self.channels,
            pulses: self.pulses,
        })
    }
}

/// A validated pulse sequence. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseSequence {
    register: Vec<(String, [f64; 2])>,
    channels: Vec<(String, ChannelKind)>,
    pulses: Vec<Pulse>,
}

impl PulseSequence {
    /// Qubit labels and positions, in declaration order.
    pub fn register(&self) -> &[(String, [f64; 2])] {
        &self.register
    }

    /// Channel labels and kinds, in declaration order.
    pub fn channels(&self) -> &[(String, ChannelKind)] {
        &self.channels
    }

    /// Pulses in play order.
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Position of a qubit.
    pub fn position(&self, label: &str) -> Option<[f64; 2]> {
        self.register
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    /// Kind of a channel.
    pub fn channel(&self, label: &str) -> Option<ChannelKind> {
        self.channels
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, k)| *k)
    }

    /// Total duration if pulses play back to back.
    pub fn total_duration(&self) -> u64 {
        self.pulses.iter().map(|p| u64::from(p.duration())).sum()
    }

    /// Serialize to compact JSON bytes.
    pub fn to_bytes(&self) -> PulseResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> PulseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a serialized sequence.
    ///
    /// Register and channel entries keep their document order. Every entry
    /// reaches the builder checks, so a label repeated within one object is
    /// rejected rather than collapsed.
    pub fn from_json(source: &str) -> PulseResult<Self> {
        let wire: SequenceEnvelope = serde_json::from_str(source)?;
        let body = wire.sequence_builder;
        let builder = SequenceBuilder {
            register: body.register.qubits.positions,
            channels: body
                .channels
                .into_iter()
                .map(|(label, c)| (label, c.kind))
                .collect(),
            pulses: body.pulses,
        };
        builder.build()
    }
}

impl fmt::Display for PulseSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Register ({} qubits):", self.register.len())?;
        for (label, [x, y]) in &self.register {
            writeln!(f, "  {label}: ({x}, {y})")?;
        }
        writeln!(f, "Channels:")?;
        for (label, kind) in &self.channels {
            writeln!(f, "  {label}: {kind}")?;
        }
        write!(f, "Pulses:")?;
        for pulse in &self.pulses {
            write!(
                f,
                "\n  {}: amplitude {}, detuning {}, phase {}",
                pulse.channel, pulse.amplitude, pulse.detuning, pulse.phase
            )?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SequenceEnvelope {
    sequence_builder: SequenceBody,
}

#[derive(Deserialize)]
struct SequenceBody {
    #[serde(default, with = "quack_ir::wire::entries")]
    channels: Vec<(String, Channel)>,
    #[serde(default)]
    pulses: Vec<Pulse>,
    register: RegisterWire,
}

#[derive(Deserialize)]
struct RegisterWire {
    qubits: QubitsWire,
}

#[derive(Deserialize)]
struct QubitsWire {
    #[serde(with = "quack_ir::wire::entries")]
    positions: Vec<(String, [f64; 2])>,
}

struct OrderedChannels<'a>(&'a [(String, ChannelKind)]);

impl Serialize for OrderedChannels<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(l, k)| (l, Channel { kind: *k })))
    }
}

struct OrderedPositions<'a>(&'a [(String, [f64; 2])]);

impl Serialize for OrderedPositions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(l, p)| (l, p)))
    }
}

struct RegisterBody<'a>(&'a [(String, [f64; 2])]);

impl Serialize for RegisterBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut qubits = serializer.serialize_struct("Qubits", 1)?;
        qubits.serialize_field("positions", &OrderedPositions(self.0))?;
        qubits.end()
    }
}

struct RegisterOuter<'a>(&'a [(String, [f64; 2])]);

impl Serialize for RegisterOuter<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut register = serializer.serialize_struct("Register", 1)?;
        register.serialize_field("qubits", &RegisterBody(self.0))?;
        register.end()
    }
}

struct Body<'a>(&'a PulseSequence);

impl Serialize for Body<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("SequenceBuilder", 3)?;
        body.serialize_field("channels", &OrderedChannels(&self.0.channels))?;
        body.serialize_field("pulses", &self.0.pulses)?;
        body.serialize_field("register", &RegisterOuter(&self.0.register))?;
        body.end()
    }
}

impl Serialize for PulseSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("PulseSequence", 1)?;
        envelope.serialize_field("sequence_builder", &Body(self))?;
        envelope.end()
    }
}
