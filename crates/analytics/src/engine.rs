use crate::coefficients::sector_model;
use core_types::{FinancialInputs, IndicatorSet, Sector};

/// A stateless calculator for deriving VAIC and profitability metrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndicatorEngine {}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the indicator set.
    ///
    /// Total over every input: a zero denominator yields a zero ratio
    /// instead of an error, and value added and structural capital are
    /// floored at zero.
    ///
    /// # Arguments
    ///
    /// * `inputs` - The four financial statement figures.
    /// * `sector` - Selects the regression model used for ROA and ROE.
    pub fn calculate(&self, inputs: &FinancialInputs, sector: Sector) -> IndicatorSet {
        let va = if inputs.it >= inputs.cv {
            inputs.it - inputs.cv
        } else {
            0.0
        };
        let hce = safe_ratio(va, inputs.hc);
        let sc = if va >= inputs.hc { va - inputs.hc } else { 0.0 };
        let sce = safe_ratio(sc, va);
        let ice = hce + sce;
        let cee = safe_ratio(va, inputs.ce);
        let vaic = ice + cee;

        let model = sector_model(sector);
        let roa = model.roa.apply(ice, cee);
        let roe = model.roe.apply(ice, cee);

        tracing::debug!(?sector, va, vaic, roa, roe, "Indicators calculated.");

        IndicatorSet {
            va,
            hce,
            sce,
            ice,
            cee,
            vaic,
            roa,
            roe,
        }
    }
}

/// `numerator / denominator`, or zero when the denominator is zero.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
