//! Mapping Ising coefficients to pulses.
//!
//! How `h` and `J` become waveform durations and levels depends on the
//! hardware and the annealing schedule, so it is left to a [`PulsePolicy`].
//! The sequence builder itself never looks at coefficients.

use std::f64::consts::PI;

use quack_ir::{IsingCoefficients, IsingModel};
use tracing::{debug, instrument};

use crate::error::{PulseError, PulseResult};
use crate::sequence::{ChannelKind, Pulse, PulseSequence, SequenceBuilder};
use crate::waveform::Waveform;

/// Turns an Ising model into a register layout and pulse list.
pub trait PulsePolicy: Send + Sync {
    /// Get the name of this policy.
    fn name(&self) -> &str;

    /// Lay out the register and schedule the pulses for `model`.
    fn plan(&self, model: &IsingModel) -> PulseResult<SequenceBuilder>;
}

/// Label of the qubit carrying `spin`.
pub fn qubit_label(spin: u32) -> String {
    format!("q{spin}")
}

/// Position of qubit `index` when `count` qubits fill a square grid
/// row by row.
pub fn grid_position(index: u32, count: u32, spacing: f64) -> [f64; 2] {
    let side = (f64::from(count.max(1))).sqrt().ceil() as u32;
    let (row, col) = (index / side, index % side);
    [f64::from(col) * spacing, f64::from(row) * spacing]
}

/// One global Rydberg pulse over the whole register: a Blackman amplitude
/// envelope with a linear detuning sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSweepPolicy {
    channel: String,
    spacing: f64,
    duration: u32,
    area: f64,
    detuning: (f64, f64),
}

impl Default for GlobalSweepPolicy {
    fn default() -> Self {
        Self {
            channel: "ch0".into(),
            spacing: 5.0,
            duration: 1000,
            area: PI,
            detuning: (-5.0, 5.0),
        }
    }
}

impl GlobalSweepPolicy {
    /// Default sweep: area π, detuning -5 to 5, 1000 ns, 5 µm grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance between neighbouring grid sites.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Pulse length in ns.
    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Integral of the amplitude envelope.
    #[must_use]
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    /// Detuning at the start and end of the sweep.
    #[must_use]
    pub fn with_detuning(mut self, start: f64, stop: f64) -> Self {
        self.detuning = (start, stop);
        self
    }

    /// Label of the declared channel.
    #[must_use]
    pub fn with_channel(mut self, label: impl Into<String>) -> Self {
        self.channel = label.into();
        self
    }
}

impl PulsePolicy for GlobalSweepPolicy {
    fn name(&self) -> &str {
        "global-sweep"
    }

    fn plan(&self, model: &IsingModel) -> PulseResult<SequenceBuilder> {
        let n = model.num_spins();
        if n == 0 {
            return Err(PulseError::EmptyRegister);
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(PulseError::InvalidSpacing(self.spacing));
        }

        let mut builder = SequenceBuilder::new();
        for spin in 0..n {
            builder = builder.qubit(qubit_label(spin), grid_position(spin, n, self.spacing));
        }

        let (start, stop) = self.detuning;
        Ok(builder
            .channel(self.channel.clone(), ChannelKind::RydbergGlobal)
            .pulse(Pulse::new(
                self.channel.clone(),
                Waveform::blackman(self.duration, self.area),
                Waveform::ramp(self.duration, start, stop),
            )))
    }
}

/// Build a pulse sequence for `model` under `policy`.
#[instrument(skip_all, fields(policy = policy.name(), spins = model.num_spins()))]
pub fn from_ising(model: &IsingModel, policy: &dyn PulsePolicy) -> PulseResult<PulseSequence> {
    let sequence = policy.plan(model)?.build()?;
    debug!(
        qubits = sequence.register().len(),
        pulses = sequence.pulses().len(),
        "Planned pulse sequence"
    );
    Ok(sequence)
}

/// Build a pulse sequence from a hand-authored coefficient set.
pub fn from_coefficients(
    coefficients: IsingCoefficients,
    policy: &dyn PulsePolicy,
) -> PulseResult<PulseSequence> {
    let model = IsingModel::try_from(coefficients)?;
    from_ising(&model, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_positions() {
        // 5 qubits fill a 3x3 grid row by row
        assert_eq!(grid_position(0, 5, 5.0), [0.0, 0.0]);
        assert_eq!(grid_position(2, 5, 5.0), [10.0, 0.0]);
        assert_eq!(grid_position(3, 5, 5.0), [0.0, 5.0]);
        assert_eq!(grid_position(0, 1, 4.0), [0.0, 0.0]);
        assert_eq!(grid_position(3, 4, 1.0), [1.0, 1.0]);
    }

    #[test]
    fn test_global_sweep_plan() {
        let model = IsingModel::empty(4);
        let seq = from_ising(&model, &GlobalSweepPolicy::new()).unwrap();

        assert_eq!(seq.register().len(), 4);
        assert_eq!(seq.position("q3"), Some([5.0, 5.0]));
        assert_eq!(seq.channels(), &[("ch0".to_string(), ChannelKind::RydbergGlobal)]);
        assert_eq!(seq.pulses().len(), 1);
        assert_eq!(seq.pulses()[0].amplitude, Waveform::blackman(1000, PI));
        assert_eq!(seq.pulses()[0].detuning, Waveform::ramp(1000, -5.0, 5.0));
    }

    #[test]
    fn test_custom_sweep() {
        let policy = GlobalSweepPolicy::new()
            .with_spacing(7.0)
            .with_duration(400)
            .with_detuning(-2.0, 3.0)
            .with_channel("rydberg");
        let seq = from_ising(&IsingModel::empty(2), &policy).unwrap();
        assert_eq!(seq.position("q1"), Some([7.0, 0.0]));
        assert_eq!(seq.pulses()[0].channel, "rydberg");
        assert_eq!(seq.total_duration(), 400);
    }

    #[test]
    fn test_empty_model_rejected() {
        assert!(matches!(
            from_ising(&IsingModel::empty(0), &GlobalSweepPolicy::new()),
            Err(PulseError::EmptyRegister)
        ));
    }

    #[test]
    fn test_invalid_policy_parameters_surface_at_build() {
        let policy = GlobalSweepPolicy::new().with_duration(0);
        assert!(matches!(
            from_ising(&IsingModel::empty(1), &policy),
            Err(PulseError::InvalidWaveform { .. })
        ));
    }

    #[test]
    fn test_non_positive_spacing_rejected() {
        for spacing in [0.0, -5.0, f64::NAN] {
            let policy = GlobalSweepPolicy::new().with_spacing(spacing);
            assert!(matches!(
                from_ising(&IsingModel::empty(3), &policy),
                Err(PulseError::InvalidSpacing(_))
            ));
        }
    }

    #[test]
    fn test_from_hand_authored_coefficients() {
        let coeffs = IsingCoefficients::new()
            .with_field(0, -1.0)
            .with_coupling(0, 2, 2.0);
        let seq = from_coefficients(coeffs, &GlobalSweepPolicy::new()).unwrap();
        assert_eq!(seq.register().len(), 3);

        let bad = IsingCoefficients::new().with_coupling(1, 1, 2.0);
        assert!(matches!(
            from_coefficients(bad, &GlobalSweepPolicy::new()),
            Err(PulseError::Coefficients(_))
        ));
    }
}
