use url::form_urlencoded;

use crate::QueryValue;

/// Serializes query parameters into a `?k=v&...` suffix.
///
/// Values are stringified and form-urlencoded. Empty input yields `""`.
pub(crate) fn to_query_string(params: &[(String, QueryValue)]) -> String {
    if params.is_empty() {
        return String::new();
    }

    // Pairs are written after the leading `?`, which must not get a `&`.
    let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
    for (key, value) in params {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}

/// Joins base URL, path and query suffix verbatim.
pub(crate) fn build_url(base_url: &str, path: &str, params: &[(String, QueryValue)]) -> String {
    let query = to_query_string(params);
    let mut url = String::with_capacity(base_url.len() + path.len() + query.len());
    url.push_str(base_url);
    url.push_str(path);
    url.push_str(&query);
    url
}
