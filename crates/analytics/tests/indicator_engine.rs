use analytics::IndicatorEngine;
use analytics::coefficients::{COMMERCIAL, PRIMARY, REAL_ESTATE};
use core_types::{FinancialInputs, IndicatorSet, Sector};
use quickcheck_macros::quickcheck;

fn inputs(it: f64, cv: f64, hc: f64, ce: f64) -> FinancialInputs {
    FinancialInputs { it, cv, hc, ce }
}

/// Amounts in cents so generated values are always finite and non-negative.
fn cents(it: u32, cv: u32, hc: u32, ce: u32) -> FinancialInputs {
    inputs(
        f64::from(it) / 100.0,
        f64::from(cv) / 100.0,
        f64::from(hc) / 100.0,
        f64::from(ce) / 100.0,
    )
}

fn sector_from(n: u8) -> Sector {
    Sector::ALL[usize::from(n) % Sector::ALL.len()]
}

#[test]
fn commercial_reference_scenario() {
    let engine = IndicatorEngine::new();
    let r = engine.calculate(&inputs(1000.0, 400.0, 300.0, 2000.0), Sector::Commercial);

    assert_eq!(r.va, 600.0);
    assert_eq!(r.hce, 2.0);
    assert_eq!(r.sce, 0.5);
    assert_eq!(r.ice, 2.5);
    assert_eq!(r.cee, 0.3);
    assert!((r.vaic - 2.8).abs() < 1e-12);

    let roa: f64 = 0.017000167 + 0.000090463 * 2.5 + 0.065590993 * 0.3;
    let roe: f64 = -0.15508027 + 0.00774242 * 2.5 + 0.930391243 * 0.3;
    assert_eq!(r.roa.to_bits(), roa.to_bits());
    assert_eq!(r.roe.to_bits(), roe.to_bits());
    assert!((r.roa - 0.036904).abs() < 1e-5);
    assert!((r.roe - 0.143393).abs() < 1e-5);
}

#[test]
fn primary_and_real_estate_use_their_own_coefficients() {
    let engine = IndicatorEngine::new();
    let data = inputs(1000.0, 400.0, 300.0, 2000.0);

    let primary = engine.calculate(&data, Sector::Primary);
    assert_eq!(primary.roa, 0.027048998 - 0.004791466 * 2.5 + 0.083361825 * 0.3);
    assert_eq!(primary.roe, 0.084135634 - 0.008724684 * 2.5 + 0.151617468 * 0.3);

    let real_estate = engine.calculate(&data, Sector::RealEstate);
    assert_eq!(real_estate.roa, -0.001171129 + 0.005704393 * 2.5 + 0.028213145 * 0.3);
    assert_eq!(real_estate.roe, 0.010838631 + 0.009842492 * 2.5 + 0.069439342 * 0.3);

    // The ratios themselves do not depend on the sector.
    assert_eq!(primary.vaic, real_estate.vaic);
}

#[test]
fn all_zero_inputs_give_sector_intercepts() {
    let engine = IndicatorEngine::new();
    for (sector, model) in [
        (Sector::Commercial, COMMERCIAL),
        (Sector::Primary, PRIMARY),
        (Sector::RealEstate, REAL_ESTATE),
    ] {
        let r = engine.calculate(&FinancialInputs::default(), sector);
        assert_eq!(r.va, 0.0);
        assert_eq!(r.hce, 0.0);
        assert_eq!(r.sce, 0.0);
        assert_eq!(r.cee, 0.0);
        assert_eq!(r.vaic, 0.0);
        assert_eq!(r.roa, model.roa.intercept);
        assert_eq!(r.roe, model.roe.intercept);
    }
}

#[test]
fn unknown_sector_label_falls_into_default_branch() {
    let engine = IndicatorEngine::new();
    let data = inputs(500.0, 100.0, 50.0, 800.0);
    let unknown = engine.calculate(&data, Sector::from_label_lenient("Inmobiliaria"));
    let real_estate = engine.calculate(&data, Sector::RealEstate);
    assert_eq!(unknown, real_estate);
}

#[test]
fn structural_capital_is_floored_when_salaries_exceed_value_added() {
    let engine = IndicatorEngine::new();
    let r = engine.calculate(&inputs(1000.0, 900.0, 250.0, 1000.0), Sector::Primary);
    assert_eq!(r.va, 100.0);
    assert_eq!(r.hce, 0.4);
    assert_eq!(r.sce, 0.0);
    assert_eq!(r.cee, 0.1);
}

#[test]
fn revenue_equal_to_costs_is_zero_value_added() {
    let engine = IndicatorEngine::new();
    let r = engine.calculate(&inputs(400.0, 400.0, 10.0, 10.0), Sector::Commercial);
    assert_eq!(r.va, 0.0);
    assert_eq!(r.vaic, 0.0);
}

#[quickcheck]
fn calculation_is_deterministic(it: u32, cv: u32, hc: u32, ce: u32, s: u8) -> bool {
    let engine = IndicatorEngine::new();
    let data = cents(it, cv, hc, ce);
    let a = engine.calculate(&data, sector_from(s));
    let b = engine.calculate(&data, sector_from(s));
    [a.va, a.hce, a.sce, a.ice, a.cee, a.vaic, a.roa, a.roe]
        .iter()
        .zip([b.va, b.hce, b.sce, b.ice, b.cee, b.vaic, b.roa, b.roe])
        .all(|(x, y)| x.to_bits() == y.to_bits())
}

#[quickcheck]
fn costs_above_revenue_zero_every_ratio(it: u32, extra: u16, hc: u32, ce: u32, s: u8) -> bool {
    let it = it / 2;
    let cv = it + u32::from(extra) + 1;
    let r = IndicatorEngine::new().calculate(&cents(it, cv, hc, ce), sector_from(s));
    r.va == 0.0 && r.hce == 0.0 && r.sce == 0.0 && r.cee == 0.0 && r.vaic == 0.0
}

#[quickcheck]
fn zero_denominators_give_zero_ratios(it: u32, cv: u32, s: u8) -> bool {
    let engine = IndicatorEngine::new();
    let no_salaries = engine.calculate(&cents(it, cv, 0, 1_000), sector_from(s));
    let no_capital = engine.calculate(&cents(it, cv, 1_000, 0), sector_from(s));
    no_salaries.hce == 0.0 && no_capital.cee == 0.0
}

#[quickcheck]
fn zero_value_added_means_zero_sce(x: u32, hc: u32, ce: u32, s: u8) -> bool {
    let r = IndicatorEngine::new().calculate(&cents(x, x, hc, ce), sector_from(s));
    r.va == 0.0 && r.sce == 0.0
}

#[quickcheck]
fn vaic_is_sum_of_efficiencies(it: u32, cv: u32, hc: u32, ce: u32, s: u8) -> bool {
    let r: IndicatorSet = IndicatorEngine::new().calculate(&cents(it, cv, hc, ce), sector_from(s));
    r.ice == r.hce + r.sce && r.vaic == r.hce + r.sce + r.cee
}

#[quickcheck]
fn value_added_and_ratios_are_never_negative(it: u32, cv: u32, hc: u32, ce: u32, s: u8) -> bool {
    let r = IndicatorEngine::new().calculate(&cents(it, cv, hc, ce), sector_from(s));
    r.va >= 0.0 && r.hce >= 0.0 && r.sce >= 0.0 && r.cee >= 0.0 && (0.0..=1.0).contains(&r.sce)
}
