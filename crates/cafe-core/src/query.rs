//! Query parameter parsing and validation for the `/cafe` endpoint.
//!
//! Requests pass through two steps before the catalog is searched:
//!
//! 1. [`RawCafeParams::from_pairs`] picks `city`, `count` and `search` out
//!    of the decoded query string. Unknown keys are ignored and the first
//!    occurrence of a repeated key wins.
//! 2. [`CafeQuery::validate`] checks the raw strings against the catalog
//!    and produces a typed query, or a [`QueryError`] whose `Display`
//!    output is the exact response body sent to the client.

use std::num::ParseIntError;

use crate::catalog::Catalog;

/// Client input errors. Both map to `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// `city` is missing or not a catalog key.
    #[error("unknown city")]
    UnknownCity,

    /// `count` is present but is not an integer.
    #[error("incorrect count")]
    InvalidCount(#[from] ParseIntError),
}

/// Untyped query parameters as they arrived on the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCafeParams {
    /// Requested city, if any.
    pub city: Option<String>,
    /// Requested result limit, unparsed.
    pub count: Option<String>,
    /// Name substring filter.
    pub search: Option<String>,
}

impl RawCafeParams {
    /// Collect the known parameters from decoded key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "city" => &mut params.city,
                "count" => &mut params.count,
                "search" => &mut params.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// A validated `/cafe` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeQuery {
    /// A city known to the catalog.
    pub city: String,
    /// Maximum number of venues to return; `None` returns every match.
    pub count: Option<usize>,
    /// Case-insensitive name substring. Empty matches every venue.
    pub search: String,
}

impl CafeQuery {
    /// Validate raw parameters against `catalog`.
    ///
    /// The city is checked first, so a request that is wrong on both counts
    /// reports [`QueryError::UnknownCity`]. An empty `count` is treated as
    /// absent and a negative one as zero.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownCity`] when the city is missing or not
    /// in the catalog, and [`QueryError::InvalidCount`] when `count` does
    /// not parse as a 64-bit signed integer.
    pub fn validate(raw: RawCafeParams, catalog: &Catalog) -> Result<Self, QueryError> {
        let city = raw
            .city
            .filter(|city| catalog.contains_city(city))
            .ok_or(QueryError::UnknownCity)?;

        let count = match raw.count.as_deref() {
            None | Some("") => None,
            Some(count) => Some(parse_count(count)?),
        };

        Ok(Self {
            city,
            count,
            search: raw.search.unwrap_or_default(),
        })
    }
}

/// Parse a `count` value. Negative values clamp to zero.
fn parse_count(value: &str) -> Result<usize, QueryError> {
    let count: i64 = value.parse()?;
    Ok(usize::try_from(count.max(0)).unwrap_or(usize::MAX))
}

/// Format a result set as the response body: names joined by `,`.
///
/// An empty result set produces an empty string.
pub fn format_venues(venues: &[&str]) -> String {
    venues.join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawCafeParams {
        RawCafeParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn from_pairs_picks_known_keys() {
        let params = raw(&[
            ("city", "tula"),
            ("extra", "x"),
            ("count", "2"),
            ("search", "к"),
        ]);
        assert_eq!(params.city.as_deref(), Some("tula"));
        assert_eq!(params.count.as_deref(), Some("2"));
        assert_eq!(params.search.as_deref(), Some("к"));
    }

    #[test]
    fn from_pairs_first_occurrence_wins() {
        let params = raw(&[("city", "tula"), ("city", "moscow")]);
        assert_eq!(params.city.as_deref(), Some("tula"));
    }

    #[test]
    fn missing_city_is_unknown() {
        let result = CafeQuery::validate(raw(&[]), &Catalog::builtin());
        assert_eq!(result, Err(QueryError::UnknownCity));
    }

    #[test]
    fn unrecognized_city_is_unknown() {
        let catalog = Catalog::builtin();
        for city in ["omsk", "", "Moscow", " moscow"] {
            let result = CafeQuery::validate(raw(&[("city", city)]), &catalog);
            assert_eq!(result, Err(QueryError::UnknownCity), "city {city:?}");
        }
    }

    #[test]
    fn city_is_checked_before_count() {
        let result = CafeQuery::validate(
            raw(&[("city", "omsk"), ("count", "na")]),
            &Catalog::builtin(),
        );
        assert_eq!(result, Err(QueryError::UnknownCity));
    }

    #[test]
    fn non_integer_count_is_rejected() {
        let catalog = Catalog::builtin();
        for count in ["na", "1.5", " 2", "2 ", "+", "99999999999999999999"] {
            let params = raw(&[("city", "tula"), ("count", count)]);
            let result = CafeQuery::validate(params, &catalog);
            assert!(
                matches!(result, Err(QueryError::InvalidCount(_))),
                "count {count:?}"
            );
        }
    }

    #[test]
    fn error_messages_are_response_bodies() {
        assert_eq!(QueryError::UnknownCity.to_string(), "unknown city");
        let err = parse_count("na").unwrap_err();
        assert_eq!(err.to_string(), "incorrect count");
    }

    #[test]
    fn valid_query_defaults() {
        let catalog = Catalog::builtin();
        let query = CafeQuery::validate(raw(&[("city", "moscow")]), &catalog).unwrap();
        assert_eq!(query.city, "moscow");
        assert_eq!(query.count, None);
        assert_eq!(query.search, "");
    }

    #[test]
    fn empty_count_is_absent() {
        let query = CafeQuery::validate(
            raw(&[("city", "moscow"), ("count", "")]),
            &Catalog::builtin(),
        )
        .unwrap();
        assert_eq!(query.count, None);
    }

    #[test]
    fn signed_counts() {
        assert_eq!(parse_count("3").unwrap(), 3);
        assert_eq!(parse_count("+3").unwrap(), 3);
        assert_eq!(parse_count("0").unwrap(), 0);
        assert_eq!(parse_count("-5").unwrap(), 0);
    }

    #[test]
    fn format_joins_with_comma() {
        assert_eq!(format_venues(&["a", "b c", "d"]), "a,b c,d");
        assert_eq!(format_venues(&["solo"]), "solo");
        assert_eq!(format_venues(&[]), "");
    }
}
