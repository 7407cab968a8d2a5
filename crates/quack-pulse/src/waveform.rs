//! Waveform shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PulseError, PulseResult};

/// A time-dependent control envelope.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "ramp", "duration": 1000, "start": -5.0, "stop": 5.0}`.
/// Durations are in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Waveform {
    /// Flat level.
    Constant {
        /// Length in ns.
        duration: u32,
        /// Level.
        value: f64,
    },
    /// Linear interpolation from `start` to `stop`.
    Ramp {
        /// Length in ns.
        duration: u32,
        /// Level at t = 0.
        start: f64,
        /// Level at t = duration.
        stop: f64,
    },
    /// Blackman window scaled to a given integral.
    Blackman {
        /// Length in ns.
        duration: u32,
        /// Integral of the envelope.
        area: f64,
    },
}

impl Waveform {
    /// Constant waveform.
    pub fn constant(duration: u32, value: f64) -> Self {
        Waveform::Constant { duration, value }
    }

    /// Linear ramp.
    pub fn ramp(duration: u32, start: f64, stop: f64) -> Self {
        Waveform::Ramp {
            duration,
            start,
            stop,
        }
    }

    /// Blackman envelope with the given area.
    pub fn blackman(duration: u32, area: f64) -> Self {
        Waveform::Blackman { duration, area }
    }

    /// Shape name as written in the `type` tag.
    pub fn shape(&self) -> &'static str {
        match self {
            Waveform::Constant { .. } => "constant",
            Waveform::Ramp { .. } => "ramp",
            Waveform::Blackman { .. } => "blackman",
        }
    }

    /// Length in ns.
    pub fn duration(&self) -> u32 {
        match *self {
            Waveform::Constant { duration, .. }
            | Waveform::Ramp { duration, .. }
            | Waveform::Blackman { duration, .. } => duration,
        }
    }

    /// Check that the duration is non-zero and all levels are finite.
    pub fn validate(&self) -> PulseResult<()> {
        let invalid = |reason: String| PulseError::InvalidWaveform {
            shape: self.shape(),
            reason,
        };

        if self.duration() == 0 {
            return Err(invalid("duration must be positive".into()));
        }

        let levels = match *self {
            Waveform::Constant { value, .. } => vec![("value", value)],
            Waveform::Ramp { start, stop, .. } => vec![("start", start), ("stop", stop)],
            Waveform::Blackman { area, .. } => vec![("area", area)],
        };
        for (name, level) in levels {
            if !level.is_finite() {
                return Err(invalid(format!("{name} = {level} is not finite")));
            }
        }
        if let Waveform::Blackman { area, .. } = *self {
            if area < 0.0 {
                return Err(invalid(format!("area = {area} is negative")));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waveform::Constant { duration, value } => {
                write!(f, "constant({value}, {duration} ns)")
            }
            Waveform::Ramp {
                duration,
                start,
                stop,
            } => write!(f, "ramp({start} -> {stop}, {duration} ns)"),
            Waveform::Blackman { duration, area } => {
                write!(f, "blackman(area {area}, {duration} ns)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(Waveform::ramp(1000, -5.0, 5.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "ramp", "duration": 1000, "start": -5.0, "stop": 5.0})
        );

        let json = serde_json::to_value(Waveform::blackman(500, 1.5)).unwrap();
        assert_eq!(json["type"], "blackman");
        assert_eq!(json["area"], 1.5);
        assert!(json.get("start").is_none());
    }

    #[test]
    fn test_parse() {
        let w: Waveform =
            serde_json::from_str(r#"{"type": "constant", "duration": 10, "value": 0.5}"#).unwrap();
        assert_eq!(w, Waveform::constant(10, 0.5));
        let unknown = r#"{"type": "gaussian", "duration": 10}"#;
        assert!(serde_json::from_str::<Waveform>(unknown).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Waveform::ramp(1000, -5.0, 5.0).validate().is_ok());
        assert!(Waveform::constant(0, 1.0).validate().is_err());
        assert!(Waveform::ramp(10, f64::NAN, 1.0).validate().is_err());

        let err = Waveform::blackman(10, -1.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid blackman waveform: area = -1 is negative");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Waveform::ramp(1000, -5.0, 5.0).to_string(),
            "ramp(-5 -> 5, 1000 ns)"
        );
    }
}
