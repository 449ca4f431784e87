//! The portfolio content document and its loader.
//!
//! Everything the site shows comes from a single JSON file (by default
//! `assets/data/content.json` under the source directory). The document is
//! deserialized once and then only ever borrowed: renderers and the search
//! index read from it, nothing writes back.
//!
//! ## Tolerant Schema
//!
//! There is no schema validation beyond what serde does. Every collection
//! and string defaults to empty, so a document that omits `media` or a
//! publication without a `venue` still loads and simply renders an empty
//! section or blank field. Only IO failures and malformed JSON are errors.
//!
//! ```json
//! {
//!   "profile": { "avatar": "assets/me.jpg", "skills": [ ... ] },
//!   "journey": [ { "type": "experience", "role": "...", ... } ],
//!   "mediumArticles": [ { "title": "...", "tags": ["rust"], ... } ],
//!   "publications": [ ... ],
//!   "media": [ ... ],
//!   "socialStats": [ ... ],
//!   "followers": { "count": 12, "list": [ ... ] }
//! }
//! ```
//!
//! ## Overlapping Loads
//!
//! [`ContentLoader`] hands out a [`LoadTicket`] per load. Only the most
//! recently issued ticket may deliver a document; a slower, older load that
//! completes afterwards is discarded.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed content document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The full content document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDocument {
    pub profile: Profile,
    pub journey: Vec<JourneyEntry>,
    pub medium_articles: Vec<Article>,
    pub publications: Vec<Publication>,
    pub media: Vec<MediaItem>,
    pub social_stats: Vec<SocialStat>,
    /// Absent (rather than empty) means the followers widget is skipped.
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub skills: Vec<SkillCategory>,
    pub avatar: Option<String>,
}

/// A bento-grid card: one category with its skill chips.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkillCategory {
    pub category: String,
    pub description: String,
    /// CSS icon class, e.g. `"fa-solid fa-code"`.
    pub icon: String,
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JourneyKind {
    #[default]
    Experience,
    Education,
    /// Any other `type` value. Shown only on the combined timeline.
    #[serde(other)]
    Other,
}

impl JourneyKind {
    pub fn icon(self) -> &'static str {
        match self {
            JourneyKind::Education => "🎓",
            JourneyKind::Experience | JourneyKind::Other => "💼",
        }
    }
}

/// One timeline entry. `description` may contain Markdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JourneyEntry {
    #[serde(rename = "type")]
    pub kind: JourneyKind,
    pub role: String,
    pub organization: String,
    pub period: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub venue: String,
    pub date: String,
    /// Publication type, e.g. "Journal" or "Conference".
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaItem {
    pub title: String,
    pub outlet: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SocialStat {
    pub platform: String,
    /// Display string ("1.2k") or number; kept as written.
    #[serde(deserialize_with = "string_or_number")]
    pub count: String,
    pub icon: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Followers {
    #[serde(deserialize_with = "string_or_number")]
    pub count: String,
    pub list: Vec<Follower>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Follower {
    pub name: String,
    pub avatar: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Parse a content document from a JSON string.
pub fn parse_content(json: &str) -> Result<ContentDocument, ContentError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the content document at `path`.
pub fn load_content(path: &Path) -> Result<ContentDocument, ContentError> {
    let json = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let doc = parse_content(&json)?;
    tracing::debug!(
        articles = doc.medium_articles.len(),
        publications = doc.publications.len(),
        media = doc.media.len(),
        "loaded content document from {}",
        path.display()
    );
    Ok(doc)
}

/// Identifies one in-flight content load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Arbitrates overlapping loads: the latest-started load wins.
#[derive(Debug, Default)]
pub struct ContentLoader {
    issued: u64,
    current: Option<ContentDocument>,
}

impl ContentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load. Any earlier outstanding ticket becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Deliver a loaded document. Returns the accepted document, or `None`
    /// when `ticket` has been superseded by a newer load.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        doc: ContentDocument,
    ) -> Option<&ContentDocument> {
        if ticket.0 != self.issued {
            tracing::debug!(
                stale = ticket.0,
                latest = self.issued,
                "discarding superseded content load"
            );
            return None;
        }
        self.current = Some(doc);
        self.current.as_ref()
    }

    /// The most recently accepted document, if any.
    pub fn current(&self) -> Option<&ContentDocument> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_full_document() {
        let doc = parse_content(
            r#"{
                "profile": {"avatar": "me.jpg", "skills": [
                    {"category": "Languages", "description": "daily drivers", "icon": "fa-code",
                     "items": [{"name": "Rust", "icon": "fa-rust"}]}
                ]},
                "journey": [{"type": "education", "role": "MSc", "organization": "Uni",
                             "period": "2018-2020", "location": "Delft", "description": "Thesis"}],
                "mediumArticles": [{"title": "A", "date": "2024-01-05", "excerpt": "x",
                                    "tags": ["rust", "web"], "url": "https://a"}],
                "publications": [{"title": "P", "venue": "ICSE", "date": "2023-05-01",
                                  "type": "Conference", "url": "https://p"}],
                "media": [{"title": "M", "outlet": "Wired", "date": "2022-02-02", "url": "https://m"}],
                "socialStats": [{"platform": "GitHub", "count": 120, "icon": "🐙", "url": "https://g"}],
                "followers": {"count": 2, "list": [{"name": "Ann", "avatar": "a.png"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.profile.avatar.as_deref(), Some("me.jpg"));
        assert_eq!(doc.profile.skills[0].items[0].name, "Rust");
        assert_eq!(doc.journey[0].kind, JourneyKind::Education);
        assert_eq!(doc.medium_articles[0].tags, vec!["rust", "web"]);
        assert_eq!(doc.publications[0].kind, "Conference");
        assert_eq!(doc.media[0].outlet, "Wired");
        assert_eq!(doc.social_stats[0].count, "120");
        assert_eq!(doc.followers.as_ref().unwrap().list.len(), 1);
        assert_eq!(doc.followers.as_ref().unwrap().count, "2");
    }

    #[test]
    fn unknown_journey_type_keeps_document() {
        let doc = parse_content(
            r#"{
                "mediumArticles": [{"title": "A"}, {"title": "B"}, {"title": "C"}],
                "journey": [{"type": "volunteer", "role": "Mentor"}, {"type": "education"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.medium_articles.len(), 3);
        assert_eq!(doc.journey[0].kind, JourneyKind::Other);
        assert_eq!(doc.journey[0].role, "Mentor");
        assert_eq!(doc.journey[1].kind, JourneyKind::Education);
    }

    #[test]
    fn follower_count_may_be_text() {
        let doc = parse_content(
            r#"{"mediumArticles": [{"title": "A"}], "followers": {"count": "1.2k", "list": []}}"#,
        )
        .unwrap();
        assert_eq!(doc.followers.unwrap().count, "1.2k");
        assert_eq!(doc.medium_articles.len(), 1);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let doc = parse_content(r#"{"mediumArticles": [{"title": "Only title"}]}"#).unwrap();
        assert!(doc.profile.skills.is_empty());
        assert!(doc.publications.is_empty());
        assert!(doc.followers.is_none());
        assert_eq!(doc.medium_articles[0].title, "Only title");
        assert!(doc.medium_articles[0].tags.is_empty());
    }

    #[test]
    fn string_counts_are_kept_verbatim() {
        let doc = parse_content(r#"{"socialStats": [{"platform": "X", "count": "1.2k"}]}"#).unwrap();
        assert_eq!(doc.social_stats[0].count, "1.2k");
    }

    #[test]
    fn malformed_json_is_error() {
        let result = parse_content("{ not json");
        assert!(matches!(result, Err(ContentError::Json(_))));
    }

    #[test]
    fn load_content_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_content(&tmp.path().join("content.json"));
        assert!(matches!(result, Err(ContentError::Io { .. })));
    }

    #[test]
    fn load_content_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(&path, r#"{"media": [{"title": "On air"}]}"#).unwrap();
        let doc = load_content(&path).unwrap();
        assert_eq!(doc.media[0].title, "On air");
    }

    #[test]
    fn journey_icons() {
        assert_eq!(JourneyKind::Experience.icon(), "💼");
        assert_eq!(JourneyKind::Education.icon(), "🎓");
        assert_eq!(JourneyKind::Other.icon(), "💼");
    }

    // =========================================================================
    // ContentLoader tests
    // =========================================================================

    fn doc_with_article(title: &str) -> ContentDocument {
        ContentDocument {
            medium_articles: vec![Article {
                title: title.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn loader_accepts_latest_ticket() {
        let mut loader = ContentLoader::new();
        let ticket = loader.begin();
        assert!(loader.complete(ticket, doc_with_article("one")).is_some());
        assert_eq!(loader.current().unwrap().medium_articles[0].title, "one");
    }

    #[test]
    fn loader_discards_superseded_completion() {
        let mut loader = ContentLoader::new();
        let first = loader.begin();
        let second = loader.begin();

        assert!(loader.complete(second, doc_with_article("second")).is_some());
        // The older load finishing late must not clobber the newer document.
        assert!(loader.complete(first, doc_with_article("first")).is_none());
        assert_eq!(loader.current().unwrap().medium_articles[0].title, "second");
    }

    #[test]
    fn loader_stale_ticket_rejected_even_before_newer_completes() {
        let mut loader = ContentLoader::new();
        let first = loader.begin();
        let _second = loader.begin();
        assert!(loader.complete(first, doc_with_article("first")).is_none());
        assert!(loader.current().is_none());
    }
}
