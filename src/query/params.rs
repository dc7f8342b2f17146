//! Query ⇄ URL parameter codec.
//!
//! Keys are `cat`, `q`, `sort` and `price` (`"<min>-<max>"`). Defaults are
//! omitted so shared links stay short, and the page number is never encoded.
//! Decoding is lenient: a malformed value falls back to its default instead
//! of failing the whole decode.

use super::{PriceRange, Query, SortKey};
use crate::catalogue::CategorySelection;
use std::collections::BTreeMap;
use tracing::debug;

pub const CATEGORY_KEY: &str = "cat";
pub const SEARCH_KEY: &str = "q";
pub const SORT_KEY: &str = "sort";
pub const PRICE_KEY: &str = "price";

/// Render order for query strings.
const KEY_ORDER: [&str; 4] = [CATEGORY_KEY, SEARCH_KEY, SORT_KEY, PRICE_KEY];

/// Flat string-keyed parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Parses a query string such as `?cat=Sarees&q=silk`.
    ///
    /// `+` decodes as a space. Pairs that fail to percent-decode are skipped;
    /// a repeated key keeps its last value.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut params = Self::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

            match (decode_component(key), decode_component(value)) {
                (Some(key), Some(value)) => params.insert(key, value),
                _ => debug!("Skipping undecodable query parameter: {}", pair),
            }
        }

        params
    }

    /// Renders a percent-encoded query string without the leading `?`.
    ///
    /// Known keys come first in a fixed order, any others follow sorted.
    pub fn to_query_string(&self) -> String {
        let known = KEY_ORDER.iter().filter_map(|k| self.values.get_key_value(*k));
        let others = self.values.iter().filter(|(k, _)| !KEY_ORDER.contains(&k.as_str()));

        known
            .chain(others)
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Encodes a query, omitting every value equal to its default.
pub fn encode(query: &Query, bounds: PriceRange) -> QueryParams {
    let mut params = QueryParams::new();

    if let Some(name) = query.category.name() {
        params.insert(CATEGORY_KEY, name);
    }

    if !query.search.is_empty() {
        params.insert(SEARCH_KEY, query.search.as_str());
    }

    if query.sort != SortKey::Relevance {
        params.insert(SORT_KEY, query.sort.as_str());
    }

    if query.price_range != bounds {
        params.insert(PRICE_KEY, query.price_range.to_string());
    }

    params
}

/// Decodes parameters into a query on page 1. Missing or malformed values
/// take their defaults; the default price range is the dataset bounds.
pub fn decode(params: &QueryParams, bounds: PriceRange) -> Query {
    let category = params.get(CATEGORY_KEY).map(CategorySelection::parse).unwrap_or_default();

    let search = params.get(SEARCH_KEY).unwrap_or_default().to_string();

    let sort = params.get(SORT_KEY).map(SortKey::parse_or_default).unwrap_or_default();

    let price_range = match params.get(PRICE_KEY) {
        Some(raw) => PriceRange::parse(raw).unwrap_or_else(|| {
            debug!("Ignoring malformed price range: {}", raw);
            bounds
        }),
        None => bounds,
    };

    Query { category, search, price_range, sort, page: 1 }
}
