use serde_json::Value;
use tracing::{debug, warn};

use super::{
    clean::{clean_markdown, normalize_title, normalize_url},
    error::SearchError,
    types::{CleanedResult, RawResult, SUMMARY_PLACEHOLDER, SearchEnvelope},
};

/// Pulls the results collection out of the response envelope.
///
/// An object-shaped `data` is read as an ordered sequence of
/// `(source, results)` pairs and the first pair wins; this is how the v2 API
/// groups hits (`web`, then `news`, then `images`). A list-shaped `data` is
/// the v1 layout and is the results collection itself.
pub fn extract_results(envelope: SearchEnvelope) -> Result<Vec<Value>, SearchError> {
    let results = match envelope.data {
        None => return Err(SearchError::EmptyEnvelope),
        Some(Value::Object(pairs)) => {
            let Some((source, first)) = pairs.into_iter().next() else {
                return Err(SearchError::EmptyEnvelope);
            };
            match first {
                Value::Array(items) => {
                    debug!(source = %source, count = items.len(), "Unwrapped results from envelope");
                    items
                }
                Value::Null => Vec::new(),
                other => {
                    return Err(SearchError::EnvelopeShape(format!(
                        "expected `{source}` to hold a list of results, found {}",
                        json_kind(&other)
                    )));
                }
            }
        }
        Some(Value::Array(items)) => {
            if items.is_empty() {
                return Err(SearchError::EmptyEnvelope);
            }
            items
        }
        Some(other) => {
            return Err(SearchError::EnvelopeShape(format!(
                "expected `data` to be an object or a list, found {}",
                json_kind(&other)
            )));
        }
    };

    if results.is_empty() {
        return Err(SearchError::EmptyResults);
    }
    Ok(results)
}

/// Decides which layout a hit uses. A `metadata` object marks a scraped
/// document; otherwise a `url` key marks a summary. Anything else is skipped.
pub fn classify(value: Value) -> Option<RawResult> {
    let has_metadata = value.get("metadata").is_some_and(Value::is_object);
    let has_url = value.get("url").is_some();

    let classified = if has_metadata {
        serde_json::from_value(value).map(RawResult::Document)
    } else if has_url {
        serde_json::from_value(value).map(RawResult::Summary)
    } else {
        return None;
    };

    match classified {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!(error = %err, "Skipping search result with unexpected field types");
            None
        }
    }
}

pub fn to_cleaned(raw: RawResult) -> CleanedResult {
    let (title, url, markdown) = match raw {
        RawResult::Document(document) => {
            let url = document.metadata.resolved_url().map(str::to_string);
            (document.metadata.title, url, document.markdown)
        }
        RawResult::Summary(summary) => {
            let description = summary
                .description
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string());
            (summary.title, summary.url, Some(description))
        }
    };

    CleanedResult {
        title: normalize_title(title.as_deref()),
        url: normalize_url(url.as_deref()),
        markdown: clean_markdown(markdown.as_deref().unwrap_or_default()),
    }
}

pub fn map_results(values: Vec<Value>) -> Vec<CleanedResult> {
    values
        .into_iter()
        .filter_map(classify)
        .map(to_cleaned)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
