use crate::engine::IndicatorEngine;
use core_types::{FinancialInputs, IndicatorSet, NavAction, Page, Sector};
use serde::Serialize;

/// Everything one dashboard user has entered and computed so far.
///
/// Owned by the caller and passed by reference; the indicators are only
/// replaced by [`SessionState::calculate`] and only cleared by
/// [`SessionState::reset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub inputs: FinancialInputs,
    pub sector: Sector,
    pub indicators: IndicatorSet,
    pub page: Page,
    /// Set by the first calculation, cleared by a reset. Zero results still
    /// count as calculated; only the export looks at `has_results`.
    pub calculated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores new inputs and sector, then recomputes the indicators.
    pub fn calculate(
        &mut self,
        engine: &IndicatorEngine,
        inputs: FinancialInputs,
        sector: Sector,
    ) -> &IndicatorSet {
        self.inputs = inputs;
        self.sector = sector;
        self.indicators = engine.calculate(&self.inputs, self.sector);
        self.calculated = true;
        self.page = self.page.transition(NavAction::Calculate);
        tracing::info!(sector = %self.sector, va = self.indicators.va, "Session recalculated.");
        &self.indicators
    }

    /// Clears inputs and results back to their defaults.
    pub fn reset(&mut self) {
        self.inputs = FinancialInputs::default();
        self.sector = Sector::default();
        self.indicators = IndicatorSet::default();
        self.calculated = false;
        self.page = self.page.transition(NavAction::Reset);
        tracing::info!("Session reset.");
    }

    pub fn navigate(&mut self, target: Page) {
        self.page = self.page.transition(NavAction::Open(target));
    }

    /// True once a calculation has produced a non-zero value added; the
    /// export is refused until then.
    pub fn has_results(&self) -> bool {
        self.indicators.va != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_then_reset() {
        let engine = IndicatorEngine::new();
        let mut session = SessionState::new();
        assert!(!session.has_results());
        assert!(!session.calculated);
        assert_eq!(session.page, Page::Home);

        let inputs = FinancialInputs::new(1000.0, 400.0, 300.0, 2000.0).unwrap();
        let va = session.calculate(&engine, inputs, Sector::Commercial).va;
        assert_eq!(va, 600.0);
        assert!(session.has_results());
        assert_eq!(session.page, Page::Indicators);
        assert_eq!(session.sector, Sector::Commercial);

        session.navigate(Page::Export);
        assert_eq!(session.page, Page::Export);

        session.reset();
        assert_eq!(session.inputs, FinancialInputs::default());
        assert_eq!(session.indicators, IndicatorSet::default());
        assert_eq!(session.sector, Sector::RealEstate);
        assert_eq!(session.page, Page::Indicators);
        assert!(!session.has_results());
        assert!(!session.calculated);
    }

    #[test]
    fn loss_making_inputs_do_not_count_as_results() {
        let engine = IndicatorEngine::new();
        let mut session = SessionState::new();
        let inputs = FinancialInputs::new(100.0, 400.0, 30.0, 200.0).unwrap();
        session.calculate(&engine, inputs, Sector::Primary);
        assert!(!session.has_results());
        assert!(session.calculated);
    }

    #[test]
    fn all_zero_inputs_are_still_a_calculation() {
        let engine = IndicatorEngine::new();
        let mut session = SessionState::new();
        session.calculate(&engine, FinancialInputs::default(), Sector::Commercial);
        assert!(session.calculated);
        assert!(!session.has_results());
        assert_eq!(session.indicators.roa, crate::coefficients::COMMERCIAL.roa.intercept);
    }
}
