use crate::config::TableLayout;
use std::collections::BTreeSet;

/// Decides which rows a scan looks at.
///
/// The indicator key may sit in different columns across dataset variants,
/// so it matches when any cell equals the key.
#[derive(Debug, Clone, Copy)]
pub struct RowFilter<'a> {
    key: &'a str,
    country: Option<&'a str>,
    exclusions: Option<&'a BTreeSet<String>>,
    layout: &'a TableLayout,
}

impl<'a> RowFilter<'a> {
    pub fn new(key: &'a str, layout: &'a TableLayout) -> Self {
        Self {
            key,
            country: None,
            exclusions: None,
            layout,
        }
    }

    /// Restrict to rows whose country cell equals `country` exactly.
    pub fn country(mut self, country: &'a str) -> Self {
        self.country = Some(country);
        self
    }

    /// Skip rows whose identifier is in `exclusions` (aggregate scans).
    pub fn excluding(mut self, exclusions: &'a BTreeSet<String>) -> Self {
        self.exclusions = Some(exclusions);
        self
    }

    pub fn matches<S: AsRef<str>>(&self, row: &[S]) -> bool {
        if !row.iter().any(|c| c.as_ref() == self.key) {
            return false;
        }
        if let Some(country) = self.country {
            match row.get(self.layout.country_column) {
                Some(c) if c.as_ref() == country => {}
                _ => return false,
            }
        }
        if let Some(excl) = self.exclusions {
            if let Some(id) = row.get(self.layout.identifier_column) {
                if excl.contains(id.as_ref()) {
                    return false;
                }
            }
        }
        true
    }
}
