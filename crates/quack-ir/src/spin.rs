//! Spin identifiers and canonical spin-pair keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};

/// Index of a spin (one qubit / logical decision bit) in an Ising model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinId(pub u32);

impl SpinId {
    /// The raw index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SpinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl From<u32> for SpinId {
    fn from(id: u32) -> Self {
        SpinId(id)
    }
}

impl FromStr for SpinId {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        s.trim()
            .parse::<u32>()
            .map(SpinId)
            .map_err(|_| IrError::InvalidCoefficientKey {
                key: s.to_string(),
                reason: "expected a non-negative spin index",
            })
    }
}

/// An unordered pair of distinct spins, stored lower index first.
///
/// Every pairwise coefficient has exactly one storage location under
/// this key, whichever order the endpoints were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinPair {
    low: SpinId,
    high: SpinId,
}

impl SpinPair {
    /// Canonicalize `(a, b)` into `(min, max)`.
    pub fn new(a: impl Into<SpinId>, b: impl Into<SpinId>) -> IrResult<Self> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(IrError::SelfInteraction(a));
        }
        Ok(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    /// The lower spin.
    pub fn low(&self) -> SpinId {
        self.low
    }

    /// The higher spin.
    pub fn high(&self) -> SpinId {
        self.high
    }

    /// The `"i,j"` key used by the coefficient wire format.
    pub fn wire_key(&self) -> String {
        format!("{},{}", self.low.0, self.high.0)
    }
}

impl fmt::Display for SpinPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Parses a strict `"i,j"` wire key. Non-canonical keys (`i >= j`) are rejected.
impl FromStr for SpinPair {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        let (a, b) = parse_index_pair(s)?;
        if a >= b {
            return Err(IrError::InvalidCoefficientKey {
                key: s.to_string(),
                reason: "pair keys must list the lower index first",
            });
        }
        Ok(Self {
            low: SpinId(a),
            high: SpinId(b),
        })
    }
}

/// Split an `"i,j"` key into its two indices, in the order written.
pub fn parse_index_pair(key: &str) -> IrResult<(u32, u32)> {
    let invalid = |reason: &'static str| IrError::InvalidCoefficientKey {
        key: key.to_string(),
        reason,
    };

    let (a, b) = key
        .split_once(',')
        .ok_or_else(|| invalid("expected two indices separated by ','"))?;
    let a = a
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid("first index is not a non-negative integer"))?;
    let b = b
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid("second index is not a non-negative integer"))?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_canonical() {
        let forward = SpinPair::new(2, 5).unwrap();
        let backward = SpinPair::new(5, 2).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.low(), SpinId(2));
        assert_eq!(forward.high(), SpinId(5));
        assert_eq!(forward.wire_key(), "2,5");
    }

    #[test]
    fn test_pair_rejects_self_interaction() {
        assert!(matches!(
            SpinPair::new(3, 3),
            Err(IrError::SelfInteraction(SpinId(3)))
        ));
    }

    #[test]
    fn test_parse_wire_key() {
        let pair: SpinPair = "0, 3".parse().unwrap();
        assert_eq!(pair, SpinPair::new(0, 3).unwrap());

        assert!("3,0".parse::<SpinPair>().is_err());
        assert!("1,1".parse::<SpinPair>().is_err());
        assert!("1;2".parse::<SpinPair>().is_err());
        assert!("-1,2".parse::<SpinPair>().is_err());
    }

    #[test]
    fn test_spin_display() {
        assert_eq!(SpinId(7).to_string(), "s7");
        assert_eq!(SpinPair::new(4, 1).unwrap().to_string(), "(s1, s4)");
    }
}
