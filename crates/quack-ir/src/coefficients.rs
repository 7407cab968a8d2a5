//! Coefficient wire format.
//!
//! This is the hardware-facing contract:
//!
//! ```json
//! {"spins": 4, "h": {"0": -1.0, "1": -1.0}, "J": {"0,1": 2.0}}
//! ```
//!
//! `h` keys are spin indices, `J` keys are `"i,j"` with `i < j`. The
//! `spins` entry is optional on input; without it the spin count is
//! inferred as the highest referenced index plus one. Serializing an
//! [`IsingModel`] always writes `spins` and emits keys in ascending
//! numeric order. A key repeated within `h` or `J` is rejected like any
//! other duplicate write.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{IrError, IrResult};
use crate::ising::{IsingModel, IsingModelBuilder};
use crate::spin::{SpinId, SpinPair};

/// A coefficient set as it appears on the wire, or as authored by hand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IsingCoefficients {
    /// Explicit spin count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spins: Option<u32>,
    /// Fields keyed by stringified spin index, in document order.
    #[serde(default, with = "crate::wire::entries")]
    pub h: Vec<(String, f64)>,
    /// Couplings keyed by `"i,j"`, in document order.
    #[serde(rename = "J", default, with = "crate::wire::entries")]
    pub j: Vec<(String, f64)>,
}

impl IsingCoefficients {
    /// An empty coefficient set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the spin count.
    #[must_use]
    pub fn with_spins(mut self, spins: u32) -> Self {
        self.spins = Some(spins);
        self
    }

    /// Add a field.
    #[must_use]
    pub fn with_field(mut self, spin: u32, h: f64) -> Self {
        self.h.push((spin.to_string(), h));
        self
    }

    /// Add a coupling; the key is written in canonical order.
    #[must_use]
    pub fn with_coupling(mut self, a: u32, b: u32, j: f64) -> Self {
        self.j.push((format!("{},{}", a.min(b), a.max(b)), j));
        self
    }
}

impl From<&IsingModel> for IsingCoefficients {
    fn from(model: &IsingModel) -> Self {
        Self {
            spins: Some(model.num_spins()),
            h: model
                .sorted_fields()
                .into_iter()
                .map(|(s, h)| (s.0.to_string(), h))
                .collect(),
            j: model
                .sorted_interactions()
                .into_iter()
                .map(|(p, j)| (p.wire_key(), j))
                .collect(),
        }
    }
}

fn check_finite(key: &str, value: f64) -> IrResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(IrError::NonFiniteCoefficient {
            key: key.to_string(),
            value,
        })
    }
}

impl TryFrom<IsingCoefficients> for IsingModel {
    type Error = IrError;

    fn try_from(coeffs: IsingCoefficients) -> IrResult<Self> {
        let mut fields = Vec::with_capacity(coeffs.h.len());
        for &(ref key, h) in &coeffs.h {
            check_finite(key, h)?;
            fields.push((key.parse::<SpinId>()?, h));
        }

        let mut couplings = Vec::with_capacity(coeffs.j.len());
        for &(ref key, j) in &coeffs.j {
            check_finite(key, j)?;
            couplings.push((key.parse::<SpinPair>()?, j));
        }

        let num_spins = match coeffs.spins {
            Some(n) => n,
            None => {
                let highest = fields
                    .iter()
                    .map(|(s, _)| *s)
                    .chain(couplings.iter().map(|(p, _)| p.high()))
                    .max();
                match highest {
                    Some(spin) => spin.0.checked_add(1).ok_or(IrError::SpinOutOfRange {
                        spin,
                        num_spins: u32::MAX,
                    })?,
                    None => 0,
                }
            }
        };

        let mut builder = IsingModelBuilder::new(num_spins);
        for (spin, h) in fields {
            builder.set_field(spin, h)?;
        }
        for (pair, j) in couplings {
            builder.set_interaction(pair.low(), pair.high(), j)?;
        }
        Ok(builder.build())
    }
}

struct OrderedFields<'a>(&'a IsingModel);

impl Serialize for OrderedFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .sorted_fields()
                .into_iter()
                .map(|(s, h)| (s.0.to_string(), h)),
        )
    }
}

struct OrderedCouplings<'a>(&'a IsingModel);

impl Serialize for OrderedCouplings<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .sorted_interactions()
                .into_iter()
                .map(|(p, j)| (p.wire_key(), j)),
        )
    }
}

impl Serialize for IsingModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("IsingModel", 3)?;
        state.serialize_field("spins", &self.num_spins())?;
        state.serialize_field("h", &OrderedFields(self))?;
        state.serialize_field("J", &OrderedCouplings(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IsingModel {
        let mut b = IsingModelBuilder::new(12);
        b.set_field(0, -1.0).unwrap();
        b.set_field(10, -0.5).unwrap();
        b.set_field(2, -1.0).unwrap();
        b.set_interaction(2, 10, 2.0).unwrap();
        b.set_interaction(0, 1, 3.0).unwrap();
        b.build()
    }

    #[test]
    fn test_wire_shape() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(value["spins"], 12);
        assert_eq!(value["h"]["10"], -0.5);
        assert_eq!(value["J"]["2,10"], 2.0);
        assert_eq!(value["J"]["0,1"], 3.0);
    }

    #[test]
    fn test_keys_emitted_in_numeric_order() {
        let json = sample().to_json().unwrap();
        let h2 = json.find("\"2\":").unwrap();
        let h10 = json.find("\"10\":").unwrap();
        assert!(h2 < h10);
    }

    #[test]
    fn test_roundtrip() {
        let model = sample();
        let back = IsingModel::from_json(&model.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, model);
        assert_eq!(back.to_json().unwrap(), model.to_json().unwrap());
    }

    #[test]
    fn test_spin_count_inferred_without_spins_entry() {
        let model =
            IsingModel::from_json(r#"{"h": {"0": -1.0}, "J": {"1,4": 2.0}}"#).unwrap();
        assert_eq!(model.num_spins(), 5);

        let empty = IsingModel::from_json("{}").unwrap();
        assert_eq!(empty.num_spins(), 0);
    }

    #[test]
    fn test_hand_authored_coefficients() {
        let coeffs = IsingCoefficients::new()
            .with_field(0, -1.0)
            .with_coupling(3, 1, 0.5);
        let model = IsingModel::try_from(coeffs).unwrap();
        assert_eq!(model.num_spins(), 4);
        assert_eq!(model.interaction(1, 3), Some(0.5));
    }

    #[test]
    fn test_rejects_non_canonical_key() {
        let coeffs = IsingCoefficients {
            j: vec![("3,1".to_string(), 1.0)],
            ..Default::default()
        };
        assert!(matches!(
            IsingModel::try_from(coeffs),
            Err(IrError::InvalidCoefficientKey { .. })
        ));
    }

    #[test]
    fn test_rejects_index_beyond_declared_spins() {
        let coeffs = IsingCoefficients::new().with_spins(2).with_field(2, 1.0);
        assert!(matches!(
            IsingModel::try_from(coeffs),
            Err(IrError::SpinOutOfRange { num_spins: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_aliased_keys() {
        let coeffs = IsingCoefficients {
            h: vec![("1".to_string(), 1.0), ("01".to_string(), 2.0)],
            ..Default::default()
        };
        assert!(matches!(
            IsingModel::try_from(coeffs),
            Err(IrError::DuplicateField(SpinId(1)))
        ));
    }

    #[test]
    fn test_repeated_json_keys_rejected() {
        let err = IsingModel::from_json(r#"{"spins": 2, "J": {"0,1": 1.0, "0,1": 5.0}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::DuplicateInteraction {
                low: SpinId(0),
                high: SpinId(1)
            }
        ));

        let err = IsingModel::from_json(r#"{"h": {"0": -1.0, "0": 7.0}}"#).unwrap_err();
        assert!(matches!(err, IrError::DuplicateField(SpinId(0))));
    }

    #[test]
    fn test_repeated_coupling_in_builder_chain_rejected() {
        let coeffs = IsingCoefficients::new()
            .with_coupling(0, 1, 1.0)
            .with_coupling(1, 0, 2.0);
        assert!(matches!(
            IsingModel::try_from(coeffs),
            Err(IrError::DuplicateInteraction { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_value() {
        let coeffs = IsingCoefficients::new().with_field(0, f64::INFINITY);
        assert!(matches!(
            IsingModel::try_from(coeffs),
            Err(IrError::NonFiniteCoefficient { .. })
        ));
    }

    #[test]
    fn test_serde_deserialize_goes_through_validation() {
        let result: Result<IsingModel, _> = serde_json::from_str(r#"{"J": {"2,2": 1.0}}"#);
        assert!(result.is_err());
    }
}
