//! Engine configuration: where each dataset family lives, how the wide table
//! is laid out, which row identifiers are aggregates, and the file encoding.
//!
//! Loaded once (usually from JSON) and treated as immutable afterwards.

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Family name used by every built-in WDI indicator.
pub const WDI_FAMILY: &str = "wdi_csv";

/// World Bank aggregate rows (regions, income and lending groups, world).
const WDI_AGGREGATES: &[&str] = &[
    "AFE", "AFW", "ARB", "CEB", "CSS", "EAP", "EAR", "EAS", "ECA", "ECS", "EMU", "EUU", "FCS",
    "HIC", "HPC", "IBD", "IBT", "IDA", "IDB", "IDX", "INX", "LAC", "LCN", "LDC", "LIC", "LMC",
    "LMY", "LTE", "MEA", "MIC", "MNA", "NAC", "OED", "OSS", "PRE", "PSS", "PST", "SAS", "SSA",
    "SSF", "SST", "TEA", "TEC", "TLA", "TMN", "TSA", "TSS", "UMC", "WLD",
];

/// Location of one dataset family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

/// Fixed column positions of the wide table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub country_column: usize,
    pub identifier_column: usize,
    /// Column holding `base_year`; each following column is one year later.
    pub base_column: usize,
    pub base_year: i32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            country_column: 0,
            identifier_column: 1,
            base_column: 4,
            base_year: 1960,
        }
    }
}

impl TableLayout {
    /// Column index for `year`, or `None` when the year precedes the table.
    ///
    /// Years past the last column still yield an index; rows simply have no
    /// cell there, which reads as "value absent".
    pub fn year_column(&self, year: i32) -> Option<usize> {
        let col = self.base_column as i64 + (i64::from(year) - i64::from(self.base_year));
        usize::try_from(col).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub datasets: BTreeMap<String, DatasetConfig>,
    pub layout: TableLayout,
    pub exclusions: BTreeSet<String>,
    /// WHATWG encoding label of the datafiles.
    pub encoding: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            datasets: BTreeMap::new(),
            layout: TableLayout::default(),
            exclusions: WDI_AGGREGATES.iter().map(|s| s.to_string()).collect(),
            encoding: "macintosh".into(),
        }
    }
}

impl EngineConfig {
    /// Default layout with the WDI family pointing at `path`.
    pub fn single<P: Into<PathBuf>>(path: P) -> Self {
        let mut cfg = Self::default();
        cfg.datasets
            .insert(WDI_FAMILY.into(), DatasetConfig { path: path.into() });
        cfg
    }

    /// Load a JSON config file. Relative dataset paths are resolved against
    /// the config file's directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut cfg: EngineConfig = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            for ds in cfg.datasets.values_mut() {
                if ds.path.is_relative() {
                    ds.path = dir.join(&ds.path);
                }
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layout.identifier_column == self.layout.country_column {
            log::warn!("identifier and country share column {}", self.layout.country_column);
        }
        if self.layout.base_column <= self.layout.country_column.max(self.layout.identifier_column) {
            bail!(
                "base_column {} overlaps the key columns",
                self.layout.base_column
            );
        }
        self.text_encoding()?;
        Ok(())
    }

    pub fn text_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| anyhow::anyhow!("unknown encoding label '{}'", self.encoding))
    }

    pub fn dataset(&self, family: &str) -> Option<&DatasetConfig> {
        self.datasets.get(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn year_column_maps_from_base() {
        let l = TableLayout::default();
        assert_eq!(l.year_column(1960), Some(4));
        assert_eq!(l.year_column(2020), Some(64));
        assert_eq!(l.year_column(1957), Some(1));
        assert_eq!(l.year_column(1955), None);
    }

    #[test]
    fn default_excludes_world_and_regions() {
        let cfg = EngineConfig::default();
        assert!(cfg.exclusions.contains("WLD"));
        assert!(cfg.exclusions.contains("EUU"));
        assert!(!cfg.exclusions.contains("DEU"));
        assert_eq!(cfg.text_encoding().unwrap(), encoding_rs::MACINTOSH);
    }

    #[test]
    fn loads_json_and_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("databases.json");
        std::fs::write(
            &p,
            r#"{"datasets":{"wdi_csv":{"path":"WDI_Data.csv"}},"layout":{"base_year":1970},"exclusions":["WLD"]}"#,
        )
        .unwrap();
        let cfg = EngineConfig::from_path(&p).unwrap();
        assert_eq!(
            cfg.dataset(WDI_FAMILY).unwrap().path,
            dir.path().join("WDI_Data.csv")
        );
        assert_eq!(cfg.layout.base_year, 1970);
        assert_eq!(cfg.layout.base_column, 4);
        assert_eq!(cfg.exclusions.len(), 1);
        assert_eq!(cfg.encoding, "macintosh");
    }

    #[test]
    fn rejects_unknown_encoding() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("c.json");
        std::fs::write(&p, r#"{"encoding":"klingon"}"#).unwrap();
        assert!(EngineConfig::from_path(&p).is_err());
    }
}
