use serde::{Deserialize, Serialize};

/// A table row that belongs to a band.
pub trait HasBand {
    fn band_name(&self) -> &str;
}

/// Include/exclude policy on band names.
///
/// `None` disables an axis. An empty list is still a list: an empty
/// `include` keeps nothing and an empty `exclude` removes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandFilter {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl BandFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_active(&self) -> bool {
        self.include.is_some() || self.exclude.is_some()
    }

    /// Exclude is checked first, then include.
    pub fn allows(&self, band_name: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|name| name == band_name) {
                return false;
            }
        }
        match &self.include {
            Some(include) => include.iter().any(|name| name == band_name),
            None => true,
        }
    }

    /// Rows passing the policy, in table order.
    pub fn apply<'a, T: HasBand>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.allows(row.band_name())).collect()
    }
}
