use std::sync::LazyLock;

use regex::Regex;

use super::types::{NO_TITLE, NO_URL};

static ESCAPES_AND_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\+|\n+").expect("valid escape regex"));

static LINKS_AND_URLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]+\]\([^\)]+\)|https?://[^\s]+").expect("valid link regex")
});

pub fn normalize_title(title: Option<&str>) -> String {
    non_empty(title.map(|value| value.replace('\u{a0}', " ")))
        .unwrap_or_else(|| NO_TITLE.to_string())
}

pub fn normalize_url(url: Option<&str>) -> String {
    non_empty(url.map(str::to_string)).unwrap_or_else(|| NO_URL.to_string())
}

/// Strips backslashes, newlines, markdown links and bare http(s) URLs.
pub fn clean_markdown(markdown: &str) -> String {
    let flattened = ESCAPES_AND_NEWLINES.replace_all(markdown, "");
    let unlinked = LINKS_AND_URLS.replace_all(flattened.trim(), "");
    unlinked.trim().to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
