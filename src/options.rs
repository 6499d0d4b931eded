use crate::QueryValue;

/// Per-call headers and query parameters.
///
/// Both lists keep insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Headers merged over the default `Content-Type: application/json`.
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the URL as `?key=value&...`.
    pub query: Vec<(String, QueryValue)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header. A later header with the same name wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Builds options from query parameters only.
    pub fn with_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        Self {
            headers: Vec::new(),
            query: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl From<()> for RequestOptions {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<&RequestOptions> for RequestOptions {
    fn from(options: &RequestOptions) -> Self {
        options.clone()
    }
}
