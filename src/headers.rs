use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::{JsonFetchError, Result};

/// Headers sent with every request.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Merges caller headers over `defaults`.
///
/// Names compare case-insensitively; the caller's value replaces the default
/// and a repeated caller header keeps its last value.
pub(crate) fn merge_headers(
    mut defaults: HeaderMap,
    custom: &[(String, String)],
) -> Result<HeaderMap> {
    for (name, value) in custom {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| JsonFetchError::InvalidHeader(format!("name '{name}': {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| JsonFetchError::InvalidHeader(format!("value for '{name}': {err}")))?;
        defaults.insert(name, value);
    }
    Ok(defaults)
}
