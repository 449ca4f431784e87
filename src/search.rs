//! Substring search over the portfolio content.
//!
//! The index is a flat list with one [`SearchEntry`] per article,
//! publication, and media item. It is rebuilt wholesale from each content
//! document and scanned linearly on every query: there is no tokenizing,
//! stemming, or ranking, just case-insensitive containment against the
//! title, description, and tag text.
//!
//! | Source | Description field | Tag text | Icon |
//! |---|---|---|---|
//! | `mediumArticles` | excerpt | tags joined with spaces | 📝 |
//! | `publications` | venue | publication type | 📚 |
//! | `media` | outlet | (none) | 📰 |
//!
//! Query outcomes are three-valued: an empty query hides the results panel,
//! a query with no matches shows an explicit "No results found" row, and
//! anything else lists the matches in index order.

use crate::content::{ContentDocument, ContentLoader, LoadTicket};
use maud::{Markup, html};
use serde::Serialize;
use std::fmt;

/// Maximum description length shown in a result row.
const RESULT_DESCRIPTION_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Article,
    Publication,
    Media,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Article => "Article",
            EntryKind::Publication => "Publication",
            EntryKind::Media => "Media",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EntryKind::Article => "📝",
            EntryKind::Publication => "📚",
            EntryKind::Media => "📰",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One searchable item, denormalized from the content document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: String,
    pub icon: &'static str,
}

impl SearchEntry {
    fn new(kind: EntryKind, title: &str, description: &str, url: &str, tags: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            tags,
            icon: kind.icon(),
        }
    }

    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.tags]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Empty query: the results panel is hidden.
    Hidden,
    /// Non-empty query with no matches.
    NoResults,
    Results(Vec<&'a SearchEntry>),
}

/// Trim and lowercase a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn build(doc: &ContentDocument) -> Self {
        let articles = doc.medium_articles.iter().map(|a| {
            SearchEntry::new(EntryKind::Article, &a.title, &a.excerpt, &a.url, a.tags.join(" "))
        });
        let publications = doc.publications.iter().map(|p| {
            SearchEntry::new(EntryKind::Publication, &p.title, &p.venue, &p.url, p.kind.clone())
        });
        let media = doc
            .media
            .iter()
            .map(|m| SearchEntry::new(EntryKind::Media, &m.title, &m.outlet, &m.url, String::new()));

        Self {
            entries: articles.chain(publications).chain(media).collect(),
        }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn query(&self, raw: &str) -> SearchOutcome<'_> {
        let needle = normalize_query(raw);
        if needle.is_empty() {
            return SearchOutcome::Hidden;
        }
        let hits: Vec<&SearchEntry> = self.entries.iter().filter(|e| e.matches(&needle)).collect();
        if hits.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Results(hits)
        }
    }

    /// JSON array consumed by the page script.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

/// Owns the index and applies content loads to it.
///
/// Overlapping loads follow [`ContentLoader`]: only the most recently
/// started load may replace the index.
#[derive(Debug, Default)]
pub struct SearchService {
    index: SearchIndex,
    loader: ContentLoader,
}

impl SearchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: &ContentDocument) -> Self {
        let mut service = Self::new();
        service.rebuild(doc);
        service
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Replace the whole index from `doc`.
    pub fn rebuild(&mut self, doc: &ContentDocument) {
        self.index = SearchIndex::build(doc);
        tracing::debug!(entries = self.index.len(), "rebuilt search index");
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    /// Apply a finished load. Returns false if the load was superseded.
    pub fn finish_load(&mut self, ticket: LoadTicket, doc: ContentDocument) -> bool {
        let Some(doc) = self.loader.complete(ticket, doc) else {
            return false;
        };
        let index = SearchIndex::build(doc);
        self.index = index;
        true
    }

    pub fn query(&self, raw: &str) -> SearchOutcome<'_> {
        self.index.query(raw)
    }
}

/// Visibility of the results dropdown. Hiding never clears the query, so
/// refocusing the input brings the same results back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPanel {
    query: String,
    visible: bool,
}

impl SearchPanel {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_input<'a>(&mut self, service: &'a SearchService, raw: &str) -> SearchOutcome<'a> {
        self.query = raw.to_string();
        let outcome = service.query(raw);
        self.visible = outcome != SearchOutcome::Hidden;
        outcome
    }

    pub fn on_focus(&mut self) {
        if !self.query.trim().is_empty() {
            self.visible = true;
        }
    }

    /// A click landed outside both the input and the results.
    pub fn on_outside_click(&mut self) {
        self.visible = false;
    }
}

/// Cut `text` to at most `max` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Markup for the results container's contents.
pub fn render_outcome(outcome: &SearchOutcome<'_>) -> Markup {
    match outcome {
        SearchOutcome::Hidden => html! {},
        SearchOutcome::NoResults => html! {
            div.search-result-empty { "No results found" }
        },
        SearchOutcome::Results(hits) => html! {
            @for hit in hits {
                a.search-result-item href=(hit.url) target="_blank" rel="noopener noreferrer" {
                    div.search-result-icon { (hit.icon) }
                    div.search-result-content {
                        div.search-result-title { (hit.title) }
                        div.search-result-meta {
                            (hit.kind) " • " (truncate_text(&hit.description, RESULT_DESCRIPTION_CHARS))
                        }
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_document;
    use proptest::prelude::*;

    fn titles<'a>(outcome: &SearchOutcome<'a>) -> Vec<&'a str> {
        match outcome {
            SearchOutcome::Results(hits) => hits.iter().map(|h| h.title.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn index_has_one_entry_per_item() {
        let doc = sample_document();
        let index = SearchIndex::build(&doc);
        assert_eq!(
            index.len(),
            doc.medium_articles.len() + doc.publications.len() + doc.media.len()
        );
        assert_eq!(index.entries()[0].kind, EntryKind::Article);
        assert_eq!(index.entries()[0].icon, "📝");
    }

    #[test]
    fn article_tags_are_joined() {
        let index = SearchIndex::build(&sample_document());
        assert_eq!(index.entries()[0].tags, "rust async");
    }

    #[test]
    fn empty_and_whitespace_queries_hide() {
        let index = SearchIndex::build(&sample_document());
        assert_eq!(index.query(""), SearchOutcome::Hidden);
        assert_eq!(index.query("   \t"), SearchOutcome::Hidden);
    }

    #[test]
    fn no_match_is_explicit() {
        let index = SearchIndex::build(&sample_document());
        assert_eq!(index.query("kubernetes"), SearchOutcome::NoResults);
    }

    #[test]
    fn matches_title_case_insensitively() {
        let index = SearchIndex::build(&sample_document());
        assert_eq!(titles(&index.query("  OWNERSHIP ")), vec!["Ownership in practice"]);
    }

    #[test]
    fn matches_description_and_tags() {
        let index = SearchIndex::build(&sample_document());
        // venue of a publication
        assert_eq!(titles(&index.query("icse")), vec!["Typed pipelines"]);
        // article tag
        assert_eq!(titles(&index.query("async")).len(), 1);
        // publication type used as tag text
        assert_eq!(titles(&index.query("journal")), vec!["Borrowing at scale"]);
    }

    #[test]
    fn empty_document_has_no_results() {
        let index = SearchIndex::build(&ContentDocument::default());
        assert!(index.is_empty());
        assert_eq!(index.query("a"), SearchOutcome::NoResults);
    }

    #[test]
    fn rebuild_replaces_all_entries() {
        let mut service = SearchService::from_document(&sample_document());
        assert!(matches!(service.query("ownership"), SearchOutcome::Results(_)));

        let mut next = ContentDocument::default();
        next.media.push(crate::content::MediaItem {
            title: "Radio interview".into(),
            outlet: "BBC".into(),
            ..Default::default()
        });
        service.rebuild(&next);

        assert_eq!(service.index().len(), 1);
        assert_eq!(service.query("ownership"), SearchOutcome::NoResults);
        assert_eq!(titles(&service.query("bbc")), vec!["Radio interview"]);
    }

    #[test]
    fn superseded_load_does_not_replace_index() {
        let mut service = SearchService::new();
        let slow = service.begin_load();
        let fast = service.begin_load();

        assert!(service.finish_load(fast, sample_document()));
        assert!(!service.finish_load(slow, ContentDocument::default()));
        assert!(!service.index().is_empty());
    }

    #[test]
    fn panel_visibility() {
        let service = SearchService::from_document(&sample_document());
        let mut panel = SearchPanel::default();

        panel.on_input(&service, "rust");
        assert!(panel.is_visible());

        panel.on_outside_click();
        assert!(!panel.is_visible());
        assert_eq!(panel.query(), "rust");

        panel.on_focus();
        assert!(panel.is_visible());

        panel.on_input(&service, "  ");
        assert!(!panel.is_visible());
        panel.on_focus();
        assert!(!panel.is_visible());
    }

    #[test]
    fn no_results_query_keeps_panel_visible() {
        let service = SearchService::from_document(&sample_document());
        let mut panel = SearchPanel::default();
        assert_eq!(panel.on_input(&service, "zzz"), SearchOutcome::NoResults);
        assert!(panel.is_visible());
    }

    #[test]
    fn render_results_open_new_context() {
        let index = SearchIndex::build(&sample_document());
        let html = render_outcome(&index.query("ownership")).into_string();
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("search-result-item"));
        assert!(html.contains("Article • "));
    }

    #[test]
    fn render_no_results_and_hidden() {
        assert!(
            render_outcome(&SearchOutcome::NoResults)
                .into_string()
                .contains("No results found")
        );
        assert_eq!(render_outcome(&SearchOutcome::Hidden).into_string(), "");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("ééééé", 2), "éé...");
    }

    #[test]
    fn index_serializes_for_page_script() {
        let json = SearchIndex::build(&sample_document()).to_json().unwrap();
        assert!(json.contains(r#""type":"Article""#));
        assert!(json.contains(r#""tags":"rust async""#));
    }

    proptest! {
        #[test]
        fn every_result_contains_query(query in "[a-z]{1,4}") {
            let index = SearchIndex::build(&sample_document());
            if let SearchOutcome::Results(hits) = index.query(&query) {
                for hit in hits {
                    let haystack = format!("{} {} {}", hit.title, hit.description, hit.tags).to_lowercase();
                    prop_assert!(haystack.contains(&query));
                }
            }
        }

        #[test]
        fn query_is_case_insensitive(query in "[a-zA-Z]{1,6}") {
            let index = SearchIndex::build(&sample_document());
            prop_assert_eq!(index.query(&query), index.query(&query.to_uppercase()));
        }
    }
}
