use crate::config::WDI_FAMILY;
use crate::models::Mode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scale applied to a found value before it is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Identity,
    /// Divide by the given factor (100 for percent-as-integer, 1e6 for millions).
    Divide(f64),
}

impl Transform {
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Transform::Identity => v,
            Transform::Divide(d) => v / d,
        }
    }
}

/// Indicators the engine knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Gini,
    Gdp,
    GdpPerCapita,
    Unemployment,
}

/// Static description of one indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    /// Prefix of the router's action names.
    pub action: &'static str,
    /// Indicator code as it appears in the datafile.
    pub key: &'static str,
    pub family: &'static str,
    pub transform: Transform,
    pub modes: &'static [Mode],
}

const ALL_MODES: &[Mode] = &Mode::ALL;
const NO_COUNT: &[Mode] = &[
    Mode::Latest,
    Mode::ForYear,
    Mode::AvgForYear,
    Mode::MaxForYear,
    Mode::MinForYear,
];

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Gini,
        Indicator::Gdp,
        Indicator::GdpPerCapita,
        Indicator::Unemployment,
    ];

    pub fn entry(self) -> CatalogEntry {
        match self {
            Indicator::Gini => CatalogEntry {
                name: "Gini index",
                action: "gini",
                key: "SI.POV.GINI",
                family: WDI_FAMILY,
                transform: Transform::Divide(100.0),
                modes: ALL_MODES,
            },
            Indicator::Gdp => CatalogEntry {
                name: "GDP (current US$, millions)",
                action: "pib",
                key: "NY.GDP.MKTP.CD",
                family: WDI_FAMILY,
                transform: Transform::Divide(1_000_000.0),
                modes: NO_COUNT,
            },
            Indicator::GdpPerCapita => CatalogEntry {
                name: "GDP per capita (current US$)",
                action: "pibpc",
                key: "NY.GDP.PCAP.CD",
                family: WDI_FAMILY,
                transform: Transform::Identity,
                modes: NO_COUNT,
            },
            Indicator::Unemployment => CatalogEntry {
                name: "Unemployment rate (%)",
                action: "unemp",
                key: "SL.UEM.TOTL.NE.ZS",
                family: WDI_FAMILY,
                transform: Transform::Identity,
                modes: NO_COUNT,
            },
        }
    }

    pub fn supports(self, mode: Mode) -> bool {
        self.entry().modes.contains(&mode)
    }

    fn from_action_prefix(s: &str) -> Option<Indicator> {
        Indicator::ALL.into_iter().find(|i| i.entry().action == s)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry().action)
    }
}

/// A router action name resolved to an (indicator, mode) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub indicator: Indicator,
    pub mode: Mode,
}

impl Action {
    /// Every legal action, in catalog order.
    pub fn all() -> Vec<Action> {
        Indicator::ALL
            .into_iter()
            .flat_map(|indicator| {
                indicator
                    .entry()
                    .modes
                    .iter()
                    .map(move |&mode| Action { indicator, mode })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let (prefix, mode) = match name.split_once('-') {
            Some((p, suffix)) => (p, Mode::from_action_suffix(suffix)),
            None => (name, Some(Mode::Latest)),
        };
        let unknown = || UnknownAction(s.to_string());
        let indicator = Indicator::from_action_prefix(prefix).ok_or_else(unknown)?;
        let mode = mode.ok_or_else(unknown)?;
        if !indicator.supports(mode) {
            return Err(unknown());
        }
        Ok(Action { indicator, mode })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode.action_suffix() {
            Some(suffix) => write!(f, "{}-{}", self.indicator, suffix),
            None => write!(f, "{}", self.indicator),
        }
    }
}
