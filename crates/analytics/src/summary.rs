use core_types::IndicatorSet;
use serde::Serialize;

/// One line of the summary table shown on the dashboard and in the PDF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
    /// Whether `value` is a currency amount (rendered with a `$` in the PDF).
    pub currency: bool,
}

/// The seven displayed indicators in their fixed order.
pub fn summary_rows(indicators: &IndicatorSet) -> Vec<SummaryRow> {
    let ratio = |label, value| SummaryRow {
        label,
        value: format_ratio(value),
        currency: false,
    };
    vec![
        SummaryRow {
            label: "Value Added (VA)",
            value: format_currency(indicators.va),
            currency: true,
        },
        ratio("Human Capital Efficiency (HCE)", indicators.hce),
        ratio("Structural Capital Efficiency (SCE)", indicators.sce),
        ratio("Capital Employed Efficiency (CEE)", indicators.cee),
        ratio("VAIC", indicators.vaic),
        ratio("ROA", indicators.roa),
        ratio("ROE", indicators.roe),
    ]
}

/// Four decimal places, the precision used for every ratio.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.4}")
}

/// Two decimal places with `,` thousands grouping, e.g. `1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    format!("{}{grouped}.{fraction}", if negative { "-" } else { "" })
}
