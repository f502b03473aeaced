use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Outcome of one indicator query.
///
/// - `Ok(Some(v))`: the query resolved to a value (already unit-transformed).
/// - `Ok(None)`: the scan ran but no qualifying data existed ("not found").
/// - `Err(e)`: a precondition failed before the scan could run.
pub type QueryResult = Result<Option<f64>, QueryError>;

/// Precondition failures. Malformed cells are never reported here; they
/// degrade to "not found".
#[derive(Debug, Error)]
pub enum QueryError {
    /// The datafile does not exist or could not be read.
    #[error("dataset unavailable: {}", path.display())]
    DatasetUnavailable {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// No dataset is configured for the indicator's family.
    #[error("no dataset configured for family '{0}'")]
    UnknownDataset(String),

    /// A country-scoped mode was requested without a country.
    #[error("country required")]
    MissingCountry,

    /// The year was absent or did not parse as an integer.
    #[error("invalid year: {0:?}")]
    InvalidYear(Option<String>),

    /// The indicator does not support the requested mode.
    #[error("indicator {indicator} does not support {mode}")]
    UnsupportedMode { indicator: String, mode: String },
}

/// Machine-readable error category handed back to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DatasetUnavailable,
    MissingCountry,
    InvalidYear,
    UnsupportedMode,
}

impl QueryError {
    pub fn dataset_missing(path: impl Into<PathBuf>) -> Self {
        QueryError::DatasetUnavailable {
            path: path.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::DatasetUnavailable { .. } | QueryError::UnknownDataset(_) => {
                ErrorKind::DatasetUnavailable
            }
            QueryError::MissingCountry => ErrorKind::MissingCountry,
            QueryError::InvalidYear(_) => ErrorKind::InvalidYear,
            QueryError::UnsupportedMode { .. } => ErrorKind::UnsupportedMode,
        }
    }
}

/// The uniform `(ok, value, error)` record returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    pub value: Option<f64>,
    pub error: Option<ErrorKind>,
}

impl Response {
    pub fn is_not_found(&self) -> bool {
        !self.ok && self.error.is_none()
    }
}

impl From<QueryResult> for Response {
    fn from(r: QueryResult) -> Self {
        match r {
            Ok(Some(v)) => Response {
                ok: true,
                value: Some(v),
                error: None,
            },
            Ok(None) => Response {
                ok: false,
                value: None,
                error: None,
            },
            Err(e) => Response {
                ok: false,
                value: None,
                error: Some(e.kind()),
            },
        }
    }
}
