//! Query façade: the single entry point a message router calls.
//!
//! An [`Engine`] owns an immutable [`EngineConfig`] and answers one
//! [`Query`] at a time. Every query opens the datafile afresh, scans it,
//! and closes it; nothing is cached between calls.
//!
//! Typical usage:
//! ```no_run
//! # use wdi_query::{Engine, EngineConfig, Indicator, Mode, Query};
//! let engine = Engine::new(EngineConfig::single("WDI_Data.csv"))?;
//! let gini = engine.query(&Query::new(Indicator::Gini, Mode::Latest).country("ESP"));
//! match gini {
//!     Ok(Some(v)) => println!("{v:.4}"),
//!     Ok(None) => println!("no data"),
//!     Err(e) => println!("cannot answer: {e}"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::catalog::{Action, CatalogEntry};
use crate::config::EngineConfig;
use crate::error::{QueryError, QueryResult, Response};
use crate::extract;
use crate::filter::RowFilter;
use crate::models::{Mode, Query};
use crate::storage::open_rows;
use anyhow::Result;
use encoding_rs::Encoding;

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    encoding: &'static Encoding,
}

/// Arguments that survived validation.
struct Checked<'q> {
    country: Option<&'q str>,
    year: Option<i32>,
}

fn parse_year(raw: Option<&str>) -> Result<i32, QueryError> {
    let raw = raw.ok_or(QueryError::InvalidYear(None))?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| QueryError::InvalidYear(Some(raw.to_string())))
}

fn check(query: &Query) -> Result<Checked<'_>, QueryError> {
    let country = match query.country.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => Some(c),
        _ if query.mode.needs_country() => return Err(QueryError::MissingCountry),
        _ => None,
    };
    let year = if query.mode.needs_year() {
        Some(parse_year(query.year.as_deref())?)
    } else {
        None
    };
    Ok(Checked { country, year })
}

impl Engine {
    /// Build an engine; fails when the configuration is unusable.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let encoding = config.text_encoding()?;
        Ok(Self { config, encoding })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Answer `query`. Found values come back already scaled by the
    /// indicator's unit transform; counts are never scaled.
    pub fn query(&self, query: &Query) -> QueryResult {
        let entry = query.indicator.entry();
        if !entry.modes.contains(&query.mode) {
            return Err(QueryError::UnsupportedMode {
                indicator: query.indicator.to_string(),
                mode: query.mode.to_string(),
            });
        }

        let dataset = self
            .config
            .dataset(entry.family)
            .ok_or_else(|| QueryError::UnknownDataset(entry.family.to_string()))?;
        let rows = open_rows(&dataset.path, self.encoding)?;
        let args = check(query)?;

        let raw = self.scan(rows, &entry, query.mode, &args)?;
        match raw {
            Some(v) if query.mode != Mode::CountForYear => Ok(Some(entry.transform.apply(v))),
            other => Ok(other),
        }
    }

    /// Same as [`Engine::query`], flattened into the router's record.
    pub fn respond(&self, query: &Query) -> Response {
        Response::from(self.query(query))
    }

    /// Run a named router action with its raw arguments.
    pub fn run_action(&self, action: Action, country: Option<&str>, year: Option<&str>) -> QueryResult {
        let query = Query {
            indicator: action.indicator,
            mode: action.mode,
            country: country.map(str::to_string),
            year: year.map(str::to_string),
        };
        self.query(&query)
    }

    fn scan<I>(
        &self,
        rows: I,
        entry: &CatalogEntry,
        mode: Mode,
        args: &Checked<'_>,
    ) -> Result<Option<f64>, QueryError>
    where
        I: IntoIterator<Item = Result<Vec<String>, QueryError>>,
    {
        let layout = &self.config.layout;
        let filter = RowFilter::new(entry.key, layout);
        let found = match (mode, args.country, args.year) {
            (Mode::Latest, Some(country), _) => {
                log::info!("Obtaining latest {} for country {}", entry.key, country);
                extract::latest(rows, &filter.country(country))?
            }
            (Mode::ForYear, Some(country), Some(year)) => {
                log::info!("Obtaining {} for country {} in year {}", entry.key, country, year);
                extract::value_for_year(rows, &filter.country(country), layout, year)?
            }
            (_, _, Some(year)) => {
                log::info!("Obtaining {} of {} for year {}", mode, entry.key, year);
                let filter = filter.excluding(&self.config.exclusions);
                let agg = extract::aggregate_for_year(rows, &filter, layout, year)?;
                log::debug!(
                    "{} rows reported, {} positive, sum {}",
                    agg.reported,
                    agg.contributing,
                    agg.sum
                );
                match mode {
                    Mode::CountForYear => Some(agg.reported as f64),
                    Mode::AvgForYear => agg.mean(),
                    Mode::MaxForYear => agg.max,
                    Mode::MinForYear => agg.min,
                    Mode::Latest | Mode::ForYear => None,
                }
            }
            _ => None,
        };
        match found {
            Some(v) => log::debug!("Found value: {v}"),
            None => log::debug!("Did not find value"),
        }
        Ok(found)
    }
}
