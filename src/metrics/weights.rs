use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far from 1.0 the weight sum may drift before it is rejected.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Malformed scoring configuration. Raised before any row is scored.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scoring weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },

    #[error("scoring weight '{name}' is not finite")]
    NonFinite { name: &'static str },
}

/// The five feature weights of the unicorn score, in feature-matrix order.
/// Weights must sum to 1.0 so the score stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreWeights {
    /// Valuation (M USD)
    pub valuation: f64,
    /// Revenue-to-funding ratio (capital efficiency)
    pub revenue_to_funding: f64,
    /// Profitability flag
    pub profitable: f64,
    /// Market share (%)
    pub market_share: f64,
    /// Valuation per employee
    pub valuation_per_employee: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            valuation: 0.30,
            revenue_to_funding: 0.25,
            profitable: 0.20,
            market_share: 0.15,
            valuation_per_employee: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.valuation
            + self.revenue_to_funding
            + self.profitable
            + self.market_share
            + self.valuation_per_employee
    }

    /// The weights as an array in feature-matrix order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.valuation,
            self.revenue_to_funding,
            self.profitable,
            self.market_share,
            self.valuation_per_employee,
        ]
    }

    /// Reject non-finite weights and sums away from 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const NAMES: [&str; 5] = [
            "valuation",
            "revenue_to_funding",
            "profitable",
            "market_share",
            "valuation_per_employee",
        ];
        for (value, name) in self.as_array().into_iter().zip(NAMES) {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!(ScoreWeights::default().validate().is_ok());
    }

    #[test]
    fn drifted_sum_is_rejected() {
        let w = ScoreWeights {
            valuation: 0.35,
            ..ScoreWeights::default()
        };
        match w.validate() {
            Err(ConfigError::WeightSum { sum }) => assert!((sum - 1.05).abs() < 1e-12),
            other => panic!("expected WeightSum, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let w = ScoreWeights {
            profitable: f64::NAN,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            w.validate(),
            Err(ConfigError::NonFinite { name: "profitable" })
        ));
    }

    #[test]
    fn override_file_shape_deserializes() {
        let json = r#"{
            "valuation": 0.2,
            "revenue_to_funding": 0.2,
            "profitable": 0.2,
            "market_share": 0.2,
            "valuation_per_employee": 0.2
        }"#;
        let w: ScoreWeights = serde_json::from_str(json).unwrap();
        assert!(w.validate().is_ok());
    }
}
