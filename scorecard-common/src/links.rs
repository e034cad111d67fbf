//! Repository link extraction from free-text notes

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid url pattern"));

/// Punctuation that ends a sentence rather than a link
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ']', '}', '*'];

/// Return the first link-shaped substring of `text`
///
/// Sentence punctuation stuck to the end of the link is dropped, as is a
/// closing parenthesis with no opening partner inside the link. Matches
/// that do not parse as an http(s) URL with a host are skipped.
pub fn extract_repo_url(text: &str) -> Option<String> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| clean_candidate(m.as_str()))
        .next()
}

fn clean_candidate(candidate: &str) -> Option<String> {
    let mut url = candidate;
    loop {
        let trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
        let trimmed = if trimmed.ends_with(')') && !trimmed.contains('(') {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };
        if trimmed.len() == url.len() {
            break;
        }
        url = trimmed;
    }

    if is_web_link(url) {
        Some(url.to_string())
    } else {
        None
    }
}

fn is_web_link(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
