//! Upstream Parameter Set
//!
//! The full set of query parameters sent to the data API, and the cache key
//! derived from it.

use crate::models::ValidQuery;

pub const API_KEY_PARAM: &str = "api-key";
pub const FORMAT_PARAM: &str = "format";
pub const OFFSET_PARAM: &str = "offset";
pub const LIMIT_PARAM: &str = "limit";
pub const STATE_FILTER_PARAM: &str = "filters[state_name]";
pub const YEAR_FILTER_PARAM: &str = "filters[fin_year]";

/// Ordered list of `(name, value)` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    pairs: Vec<(String, String)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the parameter set for a validated district query.
    pub fn for_query(api_key: &str, query: &ValidQuery) -> Self {
        let mut params = Self::new();
        params.push(API_KEY_PARAM, api_key);
        params.push(FORMAT_PARAM, "json");
        params.push(OFFSET_PARAM, &query.offset);
        params.push(LIMIT_PARAM, &query.limit);
        params.push(STATE_FILTER_PARAM, &query.state_name);
        params.push(YEAR_FILTER_PARAM, &query.fin_year);
        params
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Parameters in insertion order, as sent upstream.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    // == Cache Key ==
    /// Derives the cache fingerprint.
    ///
    /// Pairs are sorted by name and joined as `name=value` with `&`, so
    /// insertion order never matters. `%`, `&` and `=` inside names and
    /// values are percent-escaped; everything else is kept verbatim.
    pub fn cache_key(&self) -> String {
        let mut sorted: Vec<&(String, String)> = self.pairs.iter().collect();
        sorted.sort();

        sorted
            .iter()
            .map(|(name, value)| format!("{}={}", escape(name), escape(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}
