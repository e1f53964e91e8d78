use reqwest::Url;

use super::error::RemoteError;

/// One query parameter; `None` values are never serialized.
pub type QueryParam<'a> = (&'a str, Option<String>);

/// Join `path` onto `base` and append the defined query parameters.
///
/// `path` is taken verbatim (including any trailing slash the server
/// routes on); an empty query produces no `?`.
pub fn build_url(base: &Url, path: &str, query: &[QueryParam<'_>]) -> Result<Url, RemoteError> {
    let raw = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&raw).map_err(|e| RemoteError::invalid_url(&raw, e))?;

    let defined: Vec<(&str, &str)> = query
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
        .collect();

    if !defined.is_empty() {
        url.query_pairs_mut().extend_pairs(defined);
    }

    Ok(url)
}
