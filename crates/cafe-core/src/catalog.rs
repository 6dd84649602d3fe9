//! The venue catalog: a fixed mapping from city name to venue names.
//!
//! A [`Catalog`] is built once at startup, either from the built-in dataset
//! ([`Catalog::builtin`]) or from a YAML file ([`Catalog::from_file`]), and
//! is never mutated afterwards. The API layer shares it behind an `Arc`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::query::CafeQuery;

/// Errors that can occur when building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse the catalog YAML.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The catalog contains no cities.
    #[error("catalog has no cities")]
    Empty,

    /// A city key is the empty string.
    #[error("catalog contains an empty city name")]
    EmptyCityName,
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Read-only mapping from city name to an ordered list of venue names.
///
/// City lookup is case-sensitive. Venue order is the order in which the
/// venues were listed and is preserved by every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cities: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Build a catalog from an existing city to venues mapping.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] if the mapping has no cities, or
    /// [`CatalogError::EmptyCityName`] if any city key is empty.
    pub fn new(cities: BTreeMap<String, Vec<String>>) -> Result<Self, CatalogError> {
        if cities.is_empty() {
            return Err(CatalogError::Empty);
        }
        if cities.contains_key("") {
            return Err(CatalogError::EmptyCityName);
        }
        Ok(Self { cities })
    }

    /// The dataset the service ships with.
    pub fn builtin() -> Self {
        let cities = [
            (
                "moscow",
                &[
                    "Мир кофе",
                    "Сладкоежка",
                    "Кофе и завтраки",
                    "Сытый студент",
                    "Вилка и ложка",
                ][..],
            ),
            ("tula", &["Кофе с собой", "Самовар", "Пряник"][..]),
        ]
        .into_iter()
        .map(|(city, venues)| {
            (
                city.to_owned(),
                venues.iter().map(|&v| v.to_owned()).collect(),
            )
        })
        .collect();

        Self { cities }
    }

    /// Parse a catalog from YAML: a mapping of city name to a list of
    /// venue names.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] on malformed input, or one of the
    /// validation errors described on [`Catalog::new`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let cities: BTreeMap<String, Vec<String>> = serde_yml::from_str(yaml)?;
        Self::new(cities)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Catalog::from_yaml_str`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            cities = catalog.city_count(),
            venues = catalog.venue_count(),
            "Catalog loaded from file"
        );
        Ok(catalog)
    }

    /// Whether `city` is a key of this catalog.
    pub fn contains_city(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    /// All venues of `city` in catalog order, or `None` for unknown cities.
    pub fn venues(&self, city: &str) -> Option<&[String]> {
        self.cities.get(city).map(Vec::as_slice)
    }

    /// City names in sorted order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    /// Number of cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Total number of venues across all cities.
    pub fn venue_count(&self) -> usize {
        self.cities.values().map(Vec::len).sum()
    }

    /// Run a validated query against this catalog.
    ///
    /// Keeps the venues of `query.city` whose name contains `query.search`
    /// case-insensitively, in catalog order, and truncates to `query.count`
    /// when one is given. An empty search matches every venue.
    pub fn search(&self, query: &CafeQuery) -> Vec<&str> {
        let Some(venues) = self.venues(&query.city) else {
            return Vec::new();
        };

        let needle = query.search.to_lowercase();
        let matches = venues
            .iter()
            .filter(|venue| venue.to_lowercase().contains(&needle))
            .map(String::as_str);

        match query.count {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        }
    }
}
