//! Server-rendered dashboard pages.

use analytics::{RadarProfile, ReturnComparison, SessionState, summary_rows};
use configuration::ChartSettings;
use core_types::{HelpSection, Page, Sector};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use reporter::{NOTHING_TO_EXPORT, radar_svg, returns_svg};

const STYLE: &str = r#"
body { background: #F5F7FB; color: #111827; font-family: sans-serif; margin: 0; }
main { max-width: 1100px; margin: 0 auto; padding: 24px; }
nav { display: flex; gap: 12px; padding: 16px 24px; background: #ffffff; border-bottom: 1px solid #E5E7EB; }
nav button, .primary { background: #1D4ED8; border: 2px solid #1E3A8A; border-radius: 10px; color: #fff; font-weight: bold; padding: 10px 18px; cursor: pointer; }
nav button.active { background: #1E3A8A; }
.secondary { background: #ffffff; border: 2px solid #1E3A8A; border-radius: 10px; color: #1E3A8A; font-weight: bold; padding: 10px 18px; cursor: pointer; }
.card { background: #fff; border: 1px solid #E5E7EB; border-radius: 16px; padding: 18px; margin-bottom: 16px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 12px; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); gap: 16px; }
.warning { background: #FEF3C7; border: 1px solid #F59E0B; border-radius: 10px; padding: 12px; }
.info { background: #E0F2FE; border: 1px solid #38BDF8; border-radius: 10px; padding: 12px; }
.formula { font-family: monospace; background: #F8FAFC; border: 1px solid #E5E7EB; border-radius: 10px; padding: 10px; }
.pill { display: inline-block; padding: 4px 10px; border-radius: 999px; border: 1px solid #E5E7EB; background: #F8FAFC; font-weight: 600; margin-right: 6px; }
table { border-collapse: collapse; width: 100%; }
td, th { border-bottom: 1px solid #E5E7EB; padding: 8px; text-align: left; }
td.value { font-weight: bold; text-align: right; }
"#;

/// Renders the page the session is on.
pub fn render(session: &SessionState, section: HelpSection, charts: &ChartSettings) -> Markup {
    let body = match session.page {
        Page::Home => home(),
        Page::Indicators => indicators(session, charts),
        Page::Export => export(session),
        Page::Help => help(section),
    };
    layout(session.page, body)
}

fn layout(active: Page, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "VAIC Dashboard - " (active.title()) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    @for page in Page::ALL {
                        form method="post" action="/navigate" {
                            input type="hidden" name="to" value=(page_id(page));
                            button type="submit" class=[(page == active).then_some("active")] {
                                (page.title())
                            }
                        }
                    }
                }
                main { (body) }
            }
        }
    }
}

fn page_id(page: Page) -> &'static str {
    match page {
        Page::Home => "home",
        Page::Indicators => "indicators",
        Page::Export => "export",
        Page::Help => "help",
    }
}

fn home() -> Markup {
    html! {
        h1 { "Intangible Indicators and Profitability Platform" }
        p {
            strong { "Research project: " }
            em { "Intangible metrics and profitability of companies listed on the Ecuadorian stock exchange" }
        }
        p {
            "This application calculates the main intellectual capital and profitability "
            "indicators of a company from four figures of its financial statements."
        }
        div.grid {
            div.card {
                h3 { "Intellectual capital indicators" }
                ul {
                    li { "Value Added (VA)" }
                    li { "Human Capital Efficiency (HCE)" }
                    li { "Structural Capital Efficiency (SCE)" }
                }
            }
            div.card {
                h3 { "Profitability indicators" }
                ul {
                    li { "Value Added Intellectual Coefficient (VAIC)" }
                    li { "Return on Assets (ROA)" }
                    li { "Return on Equity (ROE)" }
                }
            }
        }
        p { "Results can be visualised and exported to PDF." }
        div.info {
            "\u{201C}Knowledge has become the most important asset of today's economy.\u{201D} - Stewart, 1997"
        }
    }
}

fn indicators(session: &SessionState, charts: &ChartSettings) -> Markup {
    let inputs = &session.inputs;
    html! {
        h1 { "Calculated indicators" }
        form.card method="post" action="/calculate" {
            div.grid {
                (number_field("it", "Total revenue (IT)", inputs.it))
                (number_field("cv", "Cost of sales (CV)", inputs.cv))
                (number_field("hc", "Human capital (HC)", inputs.hc))
                (number_field("ce", "Capital employed (CE)", inputs.ce))
                label {
                    "Sector"
                    br;
                    select name="sector" {
                        @for sector in Sector::ALL {
                            option value=(sector.id()) selected[sector == session.sector] { (sector.label()) }
                        }
                    }
                }
            }
            p { button.primary type="submit" { "Calculate" } }
        }
        form method="post" action="/reset" {
            button.secondary type="submit" { "Reset" }
        }
        @if session.calculated {
            h2 { "Results" }
            (summary_table(session))
            h2 { "Visualisation" }
            (chart_panel(session, charts))
        } @else {
            p.info { "Enter the financial figures and press Calculate to see the indicators." }
        }
    }
}

fn number_field(name: &str, caption: &str, value: f64) -> Markup {
    html! {
        label {
            (caption)
            br;
            input type="number" name=(name) min="0" step="any" required value=(value.to_string());
        }
    }
}

fn summary_table(session: &SessionState) -> Markup {
    html! {
        table.card {
            tr { th { "Indicator" } th { "Value" } }
            @for row in summary_rows(&session.indicators) {
                tr {
                    td { (row.label) }
                    td.value {
                        @if row.currency { "$" }
                        (row.value)
                    }
                }
            }
        }
    }
}

/// Inline SVG charts, or a warning in their place when drawing fails.
fn chart_panel(session: &SessionState, charts: &ChartSettings) -> Markup {
    let radar = radar_svg(&RadarProfile::from_indicators(&session.indicators), charts);
    let returns = returns_svg(&ReturnComparison::from_indicators(&session.indicators), charts);
    match (radar, returns) {
        (Ok(radar), Ok(returns)) => html! {
            div.charts {
                div.card { (PreEscaped(radar)) }
                div.card { (PreEscaped(returns)) }
            }
        },
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Dashboard charts could not be drawn.");
            html! { p.warning { "Warning: charts could not be generated: " (e.to_string()) } }
        }
    }
}

fn export(session: &SessionState) -> Markup {
    html! {
        h1 { "Export results to PDF" }
        @if session.has_results() {
            div.card {
                h3 { "Calculated results" }
                p { "Sector: " strong { (session.sector.label()) } }
                (summary_table(session))
            }
            a.primary href="/export/pdf" download { "Download PDF report" }
        } @else {
            p.warning { (NOTHING_TO_EXPORT) }
        }
    }
}

fn help(section: HelpSection) -> Markup {
    html! {
        h1 { "Help sheet: intellectual capital, VAIC, ROA and ROE" }
        p { "A quick guide for lecturers and students: conceptual logic only, no econometric results." }
        p {
            @for s in HelpSection::ALL {
                a.pill href={ "/?section=" (s.id()) } {
                    @if s == section { strong { (s.title()) } } @else { (s.title()) }
                }
            }
        }
        div.card {
            @match section {
                HelpSection::Summary => { (help_summary()) }
                HelpSection::Glossary => { (help_glossary()) }
                HelpSection::Relationships => { (help_relationships()) }
                HelpSection::Notes => { (help_notes()) }
            }
        }
    }
}

fn help_summary() -> Markup {
    html! {
        h3 { "Purpose" }
        p {
            "Understand the components of the VAIC model (CEE, HCE, SCE), their definitions and "
            "formulas, and how they conceptually contribute to ROA and ROE."
        }
        h3 { "Central idea" }
        p {
            "The value added (VA) created by the company is shared between human capital (HC), "
            "structural capital (SC) and capital employed (CE). VAIC = CEE + HCE + SCE summarises how "
            "efficiently tangible and intangible resources become economic value."
        }
        h3 { "Key labels" }
        p {
            @for tag in ["VA", "HC", "SC", "CE", "CEE", "HCE / SCE"] {
                span.pill { (tag) }
            }
        }
    }
}

fn help_glossary() -> Markup {
    let terms: [(&str, &str, Option<&str>); 4] = [
        ("Value Added (VA)", "Wealth created by the company.", Some("VA = Total revenue - Cost of sales")),
        ("Human Capital (HC)", "Investment in people (wages and salaries).", None),
        (
            "Structural Capital (SC)",
            "Processes, patents, systems and organisational culture.",
            Some("SC = VA - HC"),
        ),
        ("Capital Employed (CE)", "Net book assets actually invested to produce.", None),
    ];
    let ratios = [
        ("CEE", "CEE = VA / CE", "Efficiency of asset use."),
        ("HCE", "HCE = VA / HC", "Efficiency of human capital."),
        ("SCE", "SCE = SC / VA", "Efficiency of structural capital."),
    ];
    html! {
        h3 { "Basic glossary" }
        @for (term, definition, formula) in terms {
            details {
                summary { (term) }
                p { strong { "Definition: " } (definition) }
                @if let Some(formula) = formula { div.formula { (formula) } }
            }
        }
        h3 { "VAIC indicators" }
        div.grid {
            @for (name, formula, caption) in ratios {
                div {
                    strong { (name) }
                    div.formula { (formula) }
                    small { (caption) }
                }
            }
        }
        p { strong { "Aggregate VAIC" } }
        div.formula { "VAIC = CEE + HCE + SCE" }
        h3 { "Profitability" }
        div.grid {
            div { strong { "ROA" } div.formula { "ROA = Net income / Total assets" } }
            div { strong { "ROE" } div.formula { "ROE = Net income / Equity" } }
        }
    }
}

fn help_relationships() -> Markup {
    let links = [
        ("CEE", "Efficient use of assets (CE) to generate VA. A better CEE usually lifts ROA and ROE."),
        ("HCE", "Talent productivity and innovation raise VA; drives ROA and, over time, ROE."),
        ("SCE", "Processes and systems that make performance repeatable; protects ROA and stabilises ROE."),
        ("VAIC", "Integrated sum of efficiencies; a greater capacity to turn resources into economic value."),
    ];
    html! {
        h3 { "Conceptual logic of influence" }
        @for (driver, explanation) in links {
            p { strong { (driver) " \u{2192} ROA / ROE" } }
            ul { li { (explanation) } }
        }
        p.info { "Note: this section explains conceptual relationships, not regression results." }
    }
}

fn help_notes() -> Markup {
    html! {
        h3 { "Notes and internal references" }
        p {
            "Definitions and formulas follow Pulic (2000, 2004) and the academic summaries that "
            "compute CEE, HCE, SCE and VAIC from financial statements. The tool is educational: "
            "it avoids reporting econometric results and focuses on the concepts."
        }
    }
}
