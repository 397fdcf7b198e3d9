//! Page lookup through an OpenSearch-style index.

use serde_json::Value;

use crate::error::Result;

/// External full-text search returning OpenSearch responses.
///
/// Implementations issue one request for one ranked result and return the
/// decoded JSON as is; shape checking happens in [`extract_url_from_response`].
pub trait SearchIndex {
    fn open_search(&self, query: &str) -> Result<Value>;
}

/// Extract the top result URL from an OpenSearch response.
///
/// The response is `[query, [titles], [descriptions], [urls]]`; the URL of
/// the top hit is the first element of the last array. Anything else is `None`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use ovm_harvester::coa::extract_url_from_response;
///
/// let response = json!(["Trutnov", ["Trutnov"], [""], ["https://cs.wikipedia.org/wiki/Trutnov"]]);
/// assert_eq!(
///     extract_url_from_response(&response).as_deref(),
///     Some("https://cs.wikipedia.org/wiki/Trutnov")
/// );
/// assert_eq!(extract_url_from_response(&json!({"error": "x"})), None);
/// ```
pub fn extract_url_from_response(json: &Value) -> Option<String> {
    json.as_array()?
        .last()?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_string)
}

/// Guess the wiki page for a name by trusting the top search hit.
pub fn guess_page<S: SearchIndex + ?Sized>(search: &S, name: &str) -> Result<Option<String>> {
    let response = search.open_search(name)?;
    let url = extract_url_from_response(&response);
    tracing::debug!(name, url = ?url, "Search resolved");
    Ok(url)
}
