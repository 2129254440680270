//! Query construction for paginated list endpoints.
//!
//! `ListQuery` replaces the original functional-option closures with an
//! explicit builder value: construction is inspectable and unit-testable
//! without executing callbacks, and serialization is deterministic.

use url::form_urlencoded::Serializer;

/// Typed option set for one list call.
///
/// Options are applied in the order the caller supplies them but serialized
/// in a fixed field order (filters, groupBy, filter\[result\], sort, limit)
/// so output is byte-for-byte deterministic.
///
/// A `next_url` fully replaces path and query construction for the call:
/// the server-issued cursor already encodes the filters and limit.
///
/// # Example
///
/// ```
/// use ascapi::ListQuery;
///
/// let query = ListQuery::new()
///     .filter("gameCenterDetails", ["gc-1", " gc-2 "])
///     .sort(["referenceName"])
///     .limit(50);
/// assert_eq!(
///     query.encode(),
///     "filter%5BgameCenterDetails%5D=gc-1%2Cgc-2&sort=referenceName&limit=50"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    filters: Vec<(String, Vec<String>)>,
    group_by: Vec<String>,
    result_filter: Option<String>,
    sort: Vec<String>,
    limit: Option<u32>,
    next_url: Option<String>,
}

impl ListQuery {
    /// Create an empty query (server defaults for everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of items to return.
    ///
    /// A limit of 0 is ignored, meaning "use the server default".
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.limit = Some(limit);
        }
        self
    }

    /// Add a named filter (`filter[name]=a,b,c`).
    ///
    /// Values are trimmed and blank entries dropped; a filter with no
    /// surviving values is omitted entirely.
    #[must_use]
    pub fn filter<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = normalize_ids(values);
        if !values.is_empty() {
            self.filters.push((name.to_string(), values));
        }
        self
    }

    /// Set the groupBy fields.
    #[must_use]
    pub fn group_by<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.group_by = normalize_ids(values);
        self
    }

    /// Set the result filter (`filter[result]=value`).
    #[must_use]
    pub fn result_filter(mut self, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() {
            self.result_filter = Some(value.to_string());
        }
        self
    }

    /// Set the sort keys.
    #[must_use]
    pub fn sort<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sort = normalize_ids(values);
        self
    }

    /// Use a server-issued next-page URL directly, replacing all other
    /// options for this call. Blank values are ignored.
    #[must_use]
    pub fn next_url(mut self, next: &str) -> Self {
        let next = next.trim();
        if !next.is_empty() {
            self.next_url = Some(next.to_string());
        }
        self
    }

    /// The next-page URL, if one was supplied.
    pub(crate) fn next_url_value(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Serialize to a canonically ordered, URL-encoded query string.
    ///
    /// Empty when no options are set. No network or I/O side effects.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = Serializer::new(String::new());

        for (name, values) in &self.filters {
            serializer.append_pair(&format!("filter[{name}]"), &values.join(","));
        }
        if !self.group_by.is_empty() {
            serializer.append_pair("groupBy", &self.group_by.join(","));
        }
        if let Some(result) = &self.result_filter {
            serializer.append_pair("filter[result]", result);
        }
        if !self.sort.is_empty() {
            serializer.append_pair("sort", &self.sort.join(","));
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }

        serializer.finish()
    }
}

/// Trim entries and drop blank ones, preserving order.
///
/// Shared by query construction and relationship batch bodies: blank or
/// whitespace-only IDs never reach the wire.
pub fn normalize_ids<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|value| {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
