//! Data series behind the two dashboard charts.

use crate::summary::format_ratio;
use core_types::IndicatorSet;
use serde::Serialize;

/// Blue used for the radar fill and the ROA bar (`#1D4ED8`).
pub const BLUE: [u8; 3] = [0x1D, 0x4E, 0xD8];
/// Red used for the ROE bar (`#DC2626`).
pub const RED: [u8; 3] = [0xDC, 0x26, 0x26];

/// Headroom added above the largest radar value.
const RADIAL_PADDING: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub label: &'static str,
    pub value: f64,
}

/// The VAIC profile: one spoke per efficiency ratio plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarProfile {
    pub title: &'static str,
    pub axes: Vec<RadarAxis>,
    /// Upper bound of the radial axis; the lower bound is zero.
    pub radial_max: f64,
}

impl RadarProfile {
    pub fn from_indicators(indicators: &IndicatorSet) -> Self {
        let axes = vec![
            RadarAxis { label: "CEE", value: indicators.cee },
            RadarAxis { label: "HCE", value: indicators.hce },
            RadarAxis { label: "SCE", value: indicators.sce },
            RadarAxis { label: "VAIC", value: indicators.vaic },
        ];
        let largest = axes.iter().map(|a| a.value).fold(f64::MIN, f64::max);
        Self {
            title: "VAIC Profile - Intellectual Capital",
            axes,
            radial_max: largest + RADIAL_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    /// Value label printed next to the bar.
    pub text: String,
    pub color: [u8; 3],
}

/// Horizontal ROA vs ROE comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnComparison {
    pub title: &'static str,
    pub bars: Vec<Bar>,
}

impl ReturnComparison {
    pub fn from_indicators(indicators: &IndicatorSet) -> Self {
        Self {
            title: "Calculated ROA and ROE",
            bars: vec![
                Bar {
                    label: "ROA",
                    value: indicators.roa,
                    text: format_ratio(indicators.roa),
                    color: BLUE,
                },
                Bar {
                    label: "ROE",
                    value: indicators.roe,
                    text: format_ratio(indicators.roe),
                    color: RED,
                },
            ],
        }
    }

    /// The value range the horizontal axis must cover, always including zero.
    pub fn value_range(&self) -> (f64, f64) {
        let min = self.bars.iter().map(|b| b.value).fold(0.0, f64::min);
        let max = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        if max - min < f64::EPSILON {
            (-0.1, 0.1)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IndicatorSet {
        IndicatorSet {
            va: 600.0,
            hce: 2.0,
            sce: 0.5,
            ice: 2.5,
            cee: 0.3,
            vaic: 2.8,
            roa: 0.0369,
            roe: -0.12,
        }
    }

    #[test]
    fn radar_axes_are_in_display_order() {
        let radar = RadarProfile::from_indicators(&sample());
        let labels: Vec<_> = radar.axes.iter().map(|a| a.label).collect();
        assert_eq!(labels, ["CEE", "HCE", "SCE", "VAIC"]);
        let values: Vec<_> = radar.axes.iter().map(|a| a.value).collect();
        assert_eq!(values, [0.3, 2.0, 0.5, 2.8]);
        assert!((radar.radial_max - 3.3).abs() < 1e-12);
    }

    #[test]
    fn radar_of_empty_results_still_has_a_range() {
        let radar = RadarProfile::from_indicators(&IndicatorSet::default());
        assert_eq!(radar.radial_max, 0.5);
    }

    #[test]
    fn return_bars_carry_labels_and_colours() {
        let bars = ReturnComparison::from_indicators(&sample());
        assert_eq!(bars.bars[0].label, "ROA");
        assert_eq!(bars.bars[0].text, "0.0369");
        assert_eq!(bars.bars[0].color, BLUE);
        assert_eq!(bars.bars[1].text, "-0.1200");
        assert_eq!(bars.bars[1].color, RED);
        assert_eq!(bars.value_range(), (-0.12, 0.0369));
    }

    #[test]
    fn flat_return_range_is_widened() {
        let bars = ReturnComparison::from_indicators(&IndicatorSet::default());
        assert_eq!(bars.value_range(), (-0.1, 0.1));
    }
}
