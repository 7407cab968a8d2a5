//! The Ising coefficient model.
//!
//! An [`IsingModel`] is the compiler's output: a spin count, site fields
//! `h_i` and pairwise couplings `J_ij`. Models are assembled through an
//! [`IsingModelBuilder`] and are immutable once built, so a half-written
//! model can never be observed by callers.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;

use crate::coefficients::IsingCoefficients;
use crate::error::{IrError, IrResult};
use crate::spin::{SpinId, SpinPair};

/// Spin count, sparse fields and sparse couplings.
///
/// All referenced spins are `< num_spins` and every coupling key is a
/// canonical [`SpinPair`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IsingCoefficients")]
pub struct IsingModel {
    num_spins: u32,
    interactions: FxHashMap<SpinPair, f64>,
    fields: FxHashMap<SpinId, f64>,
}

impl IsingModel {
    /// A valid model with `num_spins` spins and no coefficients.
    pub fn empty(num_spins: u32) -> Self {
        Self {
            num_spins,
            ..Self::default()
        }
    }

    /// Number of spins.
    pub fn num_spins(&self) -> u32 {
        self.num_spins
    }

    /// Couplings keyed by canonical pair.
    pub fn interactions(&self) -> &FxHashMap<SpinPair, f64> {
        &self.interactions
    }

    /// Fields keyed by spin.
    pub fn fields(&self) -> &FxHashMap<SpinId, f64> {
        &self.fields
    }

    /// Field on a spin, if set.
    pub fn field(&self, spin: impl Into<SpinId>) -> Option<f64> {
        self.fields.get(&spin.into()).copied()
    }

    /// Coupling between two spins in either order, if set.
    pub fn interaction(&self, a: impl Into<SpinId>, b: impl Into<SpinId>) -> Option<f64> {
        let pair = SpinPair::new(a, b).ok()?;
        self.interactions.get(&pair).copied()
    }

    /// Number of non-zero-keyed couplings.
    pub fn num_interactions(&self) -> usize {
        self.interactions.len()
    }

    /// Number of fields.
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// True when the model carries no coefficients at all.
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty() && self.fields.is_empty()
    }

    /// Fields in ascending spin order.
    pub fn sorted_fields(&self) -> Vec<(SpinId, f64)> {
        let mut v: Vec<_> = self.fields.iter().map(|(&s, &h)| (s, h)).collect();
        v.sort_by_key(|(s, _)| *s);
        v
    }

    /// Couplings in ascending pair order.
    pub fn sorted_interactions(&self) -> Vec<(SpinPair, f64)> {
        let mut v: Vec<_> = self.interactions.iter().map(|(&p, &j)| (p, j)).collect();
        v.sort_by_key(|(p, _)| *p);
        v
    }

    /// Serialize to the coefficient wire format.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to the coefficient wire format, pretty-printed.
    pub fn to_json_pretty(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from the coefficient wire format.
    pub fn from_json(source: &str) -> IrResult<Self> {
        let coeffs: IsingCoefficients = serde_json::from_str(source)?;
        IsingModel::try_from(coeffs)
    }
}

impl fmt::Display for IsingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ising model ({} spins, {} fields, {} couplings)",
            self.num_spins,
            self.fields.len(),
            self.interactions.len()
        )?;
        for (spin, h) in self.sorted_fields() {
            writeln!(f, "  h[{spin}] = {h}")?;
        }
        for (pair, j) in self.sorted_interactions() {
            writeln!(f, "  J[{}, {}] = {j}", pair.low(), pair.high())?;
        }
        Ok(())
    }
}

/// Incremental constructor for [`IsingModel`].
///
/// `set_*` methods refuse to overwrite an existing coefficient; `add_*`
/// methods accumulate onto it.
#[derive(Debug, Clone)]
pub struct IsingModelBuilder {
    model: IsingModel,
}

impl IsingModelBuilder {
    /// Start a model with `num_spins` spins.
    pub fn new(num_spins: u32) -> Self {
        Self {
            model: IsingModel::empty(num_spins),
        }
    }

    /// Number of spins of the model under construction.
    pub fn num_spins(&self) -> u32 {
        self.model.num_spins
    }

    fn check_spin(&self, spin: SpinId) -> IrResult<()> {
        if spin.0 >= self.model.num_spins {
            return Err(IrError::SpinOutOfRange {
                spin,
                num_spins: self.model.num_spins,
            });
        }
        Ok(())
    }

    fn check_pair(&self, a: SpinId, b: SpinId) -> IrResult<SpinPair> {
        self.check_spin(a)?;
        self.check_spin(b)?;
        SpinPair::new(a, b)
    }

    /// Set `h_spin`. Fails if it was already set.
    pub fn set_field(&mut self, spin: impl Into<SpinId>, h: f64) -> IrResult<&mut Self> {
        let spin = spin.into();
        self.check_spin(spin)?;
        if self.model.fields.contains_key(&spin) {
            return Err(IrError::DuplicateField(spin));
        }
        self.model.fields.insert(spin, h);
        Ok(self)
    }

    /// Add `h` onto `h_spin`.
    pub fn add_field(&mut self, spin: impl Into<SpinId>, h: f64) -> IrResult<&mut Self> {
        let spin = spin.into();
        self.check_spin(spin)?;
        *self.model.fields.entry(spin).or_insert(0.0) += h;
        Ok(self)
    }

    /// Set `J_ab`. Fails with [`IrError::DuplicateInteraction`] if the
    /// canonical pair already has a coupling.
    pub fn set_interaction(
        &mut self,
        a: impl Into<SpinId>,
        b: impl Into<SpinId>,
        j: f64,
    ) -> IrResult<&mut Self> {
        let pair = self.check_pair(a.into(), b.into())?;
        if self.model.interactions.contains_key(&pair) {
            return Err(IrError::DuplicateInteraction {
                low: pair.low(),
                high: pair.high(),
            });
        }
        self.model.interactions.insert(pair, j);
        Ok(self)
    }

    /// Add `j` onto `J_ab`.
    pub fn add_interaction(
        &mut self,
        a: impl Into<SpinId>,
        b: impl Into<SpinId>,
        j: f64,
    ) -> IrResult<&mut Self> {
        let pair = self.check_pair(a.into(), b.into())?;
        *self.model.interactions.entry(pair).or_insert(0.0) += j;
        Ok(self)
    }

    /// Finish the model.
    pub fn build(self) -> IsingModel {
        self.model
    }
}
