use crate::catalog::Indicator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which statistic a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Most recent populated value for one country.
    Latest,
    /// Value for one country in one year.
    ForYear,
    /// Mean of positive values across countries in one year.
    AvgForYear,
    /// Number of countries reporting any number in one year.
    CountForYear,
    /// Largest positive value across countries in one year.
    MaxForYear,
    /// Smallest positive value across countries in one year.
    MinForYear,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Latest,
        Mode::ForYear,
        Mode::AvgForYear,
        Mode::CountForYear,
        Mode::MaxForYear,
        Mode::MinForYear,
    ];

    /// Country-scoped modes need a country code.
    pub fn needs_country(self) -> bool {
        matches!(self, Mode::Latest | Mode::ForYear)
    }

    pub fn needs_year(self) -> bool {
        !matches!(self, Mode::Latest)
    }

    /// Suffix used in action names (`gini-avg`, `pib-year`, ...).
    pub fn action_suffix(self) -> Option<&'static str> {
        match self {
            Mode::Latest => None,
            Mode::ForYear => Some("year"),
            Mode::AvgForYear => Some("avg"),
            Mode::CountForYear => Some("count"),
            Mode::MaxForYear => Some("max"),
            Mode::MinForYear => Some("min"),
        }
    }

    pub fn from_action_suffix(s: &str) -> Option<Mode> {
        Mode::ALL
            .into_iter()
            .find(|m| m.action_suffix() == Some(s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Latest => "latest",
            Mode::ForYear => "for_year",
            Mode::AvgForYear => "avg_for_year",
            Mode::CountForYear => "count_for_year",
            Mode::MaxForYear => "max_for_year",
            Mode::MinForYear => "min_for_year",
        };
        f.write_str(s)
    }
}

/// A request as handed over by the router.
///
/// `year` is kept raw: validating it is part of answering the query, so a
/// malformed year must reach the engine rather than fail deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub indicator: Indicator,
    pub mode: Mode,
    #[serde(default)]
    pub country: Option<String>,
    /// Routers send the year either as a JSON number or as a string.
    #[serde(default, deserialize_with = "de_opt_year")]
    pub year: Option<String>,
}

impl Query {
    pub fn new(indicator: Indicator, mode: Mode) -> Self {
        Self {
            indicator,
            mode,
            country: None,
            year: None,
        }
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn year(mut self, year: impl ToString) -> Self {
        self.year = Some(year.to_string());
        self
    }
}

/// Serde helper: keep a year given as a string, integer or null as raw text.
fn de_opt_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a year as string or integer, or null")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(s.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// What a single cell holds once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Empty or whitespace only.
    Blank,
    /// A finite number.
    Number(f64),
    /// Anything else ("..", "N/A", labels).
    Text,
}

impl Cell {
    pub fn parse(raw: &str) -> Cell {
        let t = raw.trim();
        if t.is_empty() {
            return Cell::Blank;
        }
        match t.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text,
        }
    }

    pub fn number(self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(v),
            _ => None,
        }
    }
}
