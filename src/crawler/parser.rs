//! HTML link extraction for the two discovery stages
//!
//! - Stage one keeps every `<a href>` whose raw `href` contains a path filter
//!   (schedule page → game pages).
//! - Stage two keeps the links of every element matching a CSS selector
//!   (game page → match-history stats links).
//!
//! All links are resolved against the page's `<base href>` when present,
//! otherwise against the page URL.

use crate::{HarvestError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Parses a second-stage CSS selector
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        HarvestError::MissingSelector(format!("invalid CSS selector '{}': {:?}", selector, e))
    })
}

/// Extracts absolute links from anchors whose `href` contains `needle`
///
/// Links keep document order; duplicates are kept, one per anchor.
///
/// # Example
///
/// ```
/// use riftcrawl::crawler::links_with_href_containing;
/// use url::Url;
///
/// let html = r#"<a href="/en_US/lck/matches/42">Game</a><a href="/news">News</a>"#;
/// let page = Url::parse("https://www.lolesports.com/en_US/lck/schedule").unwrap();
/// let links = links_with_href_containing(html, &page, "/matches/");
/// assert_eq!(links, vec!["https://www.lolesports.com/en_US/lck/matches/42"]);
/// ```
pub fn links_with_href_containing(html: &str, page_url: &Url, needle: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let base = document_base(&document, page_url);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.contains(needle))
        .filter_map(|href| resolve_link(href, &base))
        .collect()
}

/// Extracts absolute links from every element matching `selector`
///
/// An element contributes its own `href` when it is an anchor, followed by
/// the anchors it contains. Duplicates within one element are dropped;
/// duplicates across elements are kept.
pub fn links_in_selection(html: &str, page_url: &Url, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    let base = document_base(&document, page_url);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(selector) {
        let mut element_links: Vec<String> = Vec::new();

        let own = anchor_href(&element);
        let nested = element
            .select(&a_selector)
            .filter_map(|anchor| anchor.value().attr("href"));

        for href in own.into_iter().chain(nested) {
            if let Some(link) = resolve_link(href, &base) {
                if !element_links.contains(&link) {
                    element_links.push(link);
                }
            }
        }

        links.extend(element_links);
    }

    links
}

fn anchor_href<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    if element.value().name() == "a" {
        element.value().attr("href")
    } else {
        None
    }
}

/// Returns the URL relative links resolve against
fn document_base(document: &Html, page_url: &Url) -> Url {
    let Ok(base_selector) = Selector::parse("base[href]") else {
        return page_url.clone();
    };

    document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
