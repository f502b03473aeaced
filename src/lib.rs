//! wdi_query
//!
//! Point and aggregate queries over a wide World Bank WDI table (one row per
//! country and indicator, one column per year). Meant to sit behind a chat
//! or message router: the router hands over a [`Query`], the engine hands
//! back a number, "not found", or an [`ErrorKind`]. No user-facing text is
//! produced here.
//!
//! ### Features
//! - Latest populated value or value for a given year, per country
//! - Cross-country average, count, maximum and minimum for a year, with
//!   regional and income-group aggregates left out
//! - Built-in catalog (Gini, GDP, GDP per capita, unemployment) with unit scaling
//! - Legacy Mac Roman datafiles decoded correctly
//!
//! ### Example
//! ```no_run
//! use wdi_query::{Engine, EngineConfig, Indicator, Mode, Query, Response};
//!
//! let engine = Engine::new(EngineConfig::single("WDI_Data.csv"))?;
//! let q = Query::new(Indicator::Unemployment, Mode::AvgForYear).year(2015);
//! let r: Response = engine.respond(&q);
//! println!("{}", serde_json::to_string(&r)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod models;
pub mod stats;
pub mod storage;

pub use api::Engine;
pub use catalog::{Action, Indicator, Transform};
pub use config::{DatasetConfig, EngineConfig, TableLayout};
pub use error::{ErrorKind, QueryError, QueryResult, Response};
pub use models::{Mode, Query};
