use core_types::Sector;

/// One fitted linear model: `intercept + ice * ICE + cee * CEE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionCoefficients {
    pub intercept: f64,
    pub ice: f64,
    pub cee: f64,
}

impl RegressionCoefficients {
    /// Evaluates the model left to right.
    pub fn apply(&self, ice: f64, cee: f64) -> f64 {
        self.intercept + self.ice * ice + self.cee * cee
    }
}

/// The ROA and ROE models estimated for one sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorModel {
    pub roa: RegressionCoefficients,
    pub roe: RegressionCoefficients,
}

// Pre-computed by an external regression study over listed Ecuadorian
// companies. These are data, not derived values.

pub const COMMERCIAL: SectorModel = SectorModel {
    roa: RegressionCoefficients {
        intercept: 0.017000167,
        ice: 0.000090463,
        cee: 0.065590993,
    },
    roe: RegressionCoefficients {
        intercept: -0.15508027,
        ice: 0.00774242,
        cee: 0.930391243,
    },
};

pub const PRIMARY: SectorModel = SectorModel {
    roa: RegressionCoefficients {
        intercept: 0.027048998,
        ice: -0.004791466,
        cee: 0.083361825,
    },
    roe: RegressionCoefficients {
        intercept: 0.084135634,
        ice: -0.008724684,
        cee: 0.151617468,
    },
};

pub const REAL_ESTATE: SectorModel = SectorModel {
    roa: RegressionCoefficients {
        intercept: -0.001171129,
        ice: 0.005704393,
        cee: 0.028213145,
    },
    roe: RegressionCoefficients {
        intercept: 0.010838631,
        ice: 0.009842492,
        cee: 0.069439342,
    },
};

/// Selects the model for a sector. Exactly one branch applies.
pub fn sector_model(sector: Sector) -> &'static SectorModel {
    match sector {
        Sector::Commercial => &COMMERCIAL,
        Sector::Primary => &PRIMARY,
        Sector::RealEstate => &REAL_ESTATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negated_coefficient_matches_subtraction_bit_for_bit() {
        let ice = 2.345_678;
        let cee = 0.91;
        let via_table = PRIMARY.roa.apply(ice, cee);
        let written_out = 0.027048998 - 0.004791466 * ice + 0.083361825 * cee;
        assert_eq!(via_table.to_bits(), written_out.to_bits());
    }

    #[test]
    fn each_sector_has_its_own_model() {
        assert_eq!(sector_model(Sector::Commercial), &COMMERCIAL);
        assert_eq!(sector_model(Sector::Primary), &PRIMARY);
        assert_eq!(sector_model(Sector::RealEstate), &REAL_ESTATE);
        assert_ne!(COMMERCIAL, PRIMARY);
        assert_ne!(PRIMARY, REAL_ESTATE);
    }
}
