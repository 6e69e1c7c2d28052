use thiserror::Error;

/// Why a search produced no cleaned results.
///
/// The `Display` text of each variant is the message reported back to the
/// calling agent, so it is kept stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Error during Firecrawl search: {0}")]
    Provider(String),

    #[error(
        "Error: Could not extract the results list from the raw response structure. Error: {0}"
    )]
    EnvelopeShape(String),

    #[error("Search completed, but no results were returned.")]
    EmptyEnvelope,

    #[error("Search completed, but the extracted list of results was empty.")]
    EmptyResults,
}

impl SearchError {
    /// True when the search itself worked but found nothing.
    pub fn is_empty_outcome(&self) -> bool {
        matches!(self, SearchError::EmptyEnvelope | SearchError::EmptyResults)
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_reported_text() {
        assert_eq!(
            SearchError::EmptyEnvelope.to_string(),
            "Search completed, but no results were returned."
        );
        assert_eq!(
            SearchError::EmptyResults.to_string(),
            "Search completed, but the extracted list of results was empty."
        );
        assert_eq!(
            SearchError::Provider("401 Unauthorized".to_string()).to_string(),
            "Error during Firecrawl search: 401 Unauthorized"
        );
        assert!(
            SearchError::EnvelopeShape("bad".to_string())
                .to_string()
                .ends_with("Error: bad")
        );
    }

    #[test]
    fn only_empty_variants_are_empty_outcomes() {
        assert!(SearchError::EmptyEnvelope.is_empty_outcome());
        assert!(SearchError::EmptyResults.is_empty_outcome());
        assert!(!SearchError::Provider(String::new()).is_empty_outcome());
        assert!(!SearchError::EnvelopeShape(String::new()).is_empty_outcome());
    }
}
