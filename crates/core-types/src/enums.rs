use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The economic sector whose regression coefficients drive ROA and ROE.
///
/// `RealEstate` doubles as the fallback branch: anything that is not
/// recognised as commercial or primary is evaluated with its coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Commercial,
    Primary,
    #[default]
    #[serde(alias = "real-estate", alias = "realestate")]
    RealEstate,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::RealEstate, Sector::Primary, Sector::Commercial];

    /// The canonical identifier used in forms, JSON and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            Sector::Commercial => "commercial",
            Sector::Primary => "primary",
            Sector::RealEstate => "real_estate",
        }
    }

    /// Human readable label for pages and the PDF.
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Commercial => "Commercial",
            Sector::Primary => "Primary",
            Sector::RealEstate => "Real Estate",
        }
    }

    /// Label safe to embed in a file name (no spaces).
    pub fn file_label(&self) -> &'static str {
        match self {
            Sector::Commercial => "Commercial",
            Sector::Primary => "Primary",
            Sector::RealEstate => "RealEstate",
        }
    }

    /// Parses a label, falling back to the default branch for anything unknown.
    pub fn from_label_lenient(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "commercial" => Ok(Sector::Commercial),
            "primary" => Ok(Sector::Primary),
            "realestate" => Ok(Sector::RealEstate),
            _ => Err(CoreError::UnknownLabel("sector", s.to_string())),
        }
    }
}

/// The pages of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Indicators,
    Export,
    Help,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Indicators, Page::Export, Page::Help];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Indicators => "Indicators",
            Page::Export => "Export",
            Page::Help => "Help",
        }
    }

    /// The navigation state machine.
    ///
    /// Every page is reachable from every other page. Calculating or
    /// resetting always lands on the indicators page, where the results live.
    pub fn transition(self, action: NavAction) -> Page {
        match action {
            NavAction::Open(target) => target,
            NavAction::Calculate | NavAction::Reset => Page::Indicators,
        }
    }
}

/// User actions that move the dashboard between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Open(Page),
    Calculate,
    Reset,
}

/// Sections of the help page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpSection {
    #[default]
    Summary,
    Glossary,
    Relationships,
    Notes,
}

impl HelpSection {
    pub const ALL: [HelpSection; 4] = [
        HelpSection::Summary,
        HelpSection::Glossary,
        HelpSection::Relationships,
        HelpSection::Notes,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            HelpSection::Summary => "summary",
            HelpSection::Glossary => "glossary",
            HelpSection::Relationships => "relationships",
            HelpSection::Notes => "notes",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HelpSection::Summary => "Summary",
            HelpSection::Glossary => "Glossary and Formulas",
            HelpSection::Relationships => "Relationship with ROA & ROE",
            HelpSection::Notes => "Notes",
        }
    }

    /// Unknown section names show the summary.
    pub fn from_label_lenient(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}
