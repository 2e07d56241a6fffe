use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// The four figures taken from a company's financial statements.
///
/// The fields are public and the calculator accepts any values; the
/// non-negativity invariant is checked where input enters the system, through
/// [`FinancialInputs::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    /// Total revenue (IT).
    pub it: f64,
    /// Cost of sales (CV).
    pub cv: f64,
    /// Human capital: salaries and wages (HC).
    pub hc: f64,
    /// Capital employed: net assets (CE).
    pub ce: f64,
}

impl FinancialInputs {
    /// Builds a validated set of inputs. Every figure must be finite and >= 0.
    pub fn new(it: f64, cv: f64, hc: f64, ce: f64) -> Result<Self, CoreError> {
        let inputs = Self { it, cv, hc, ce };
        inputs.validate()?;
        Ok(inputs)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("total revenue (IT)", self.it),
            ("cost of sales (CV)", self.cv),
            ("human capital (HC)", self.hc),
            ("capital employed (CE)", self.ce),
        ] {
            if !value.is_finite() {
                return Err(CoreError::InvalidInput(
                    name.to_string(),
                    "must be a finite number".to_string(),
                ));
            }
            if value < 0.0 {
                return Err(CoreError::InvalidInput(
                    name.to_string(),
                    format!("must not be negative (got {value})"),
                ));
            }
        }
        Ok(())
    }
}

/// The derived intellectual-capital and profitability metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Value added, floored at zero.
    pub va: f64,
    /// Human capital efficiency.
    pub hce: f64,
    /// Structural capital efficiency.
    pub sce: f64,
    /// Intellectual capital efficiency (HCE + SCE). Intermediate value feeding
    /// the regressions; not one of the displayed metrics.
    pub ice: f64,
    /// Capital employed efficiency.
    pub cee: f64,
    /// Value added intellectual coefficient (ICE + CEE).
    pub vaic: f64,
    pub roa: f64,
    pub roe: f64,
}
