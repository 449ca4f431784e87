//! HTML site generation.
//!
//! Loads `site.toml` and the content document from the source directory,
//! renders every section into its mount point, and writes a single static
//! page plus the search index next to it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html            # The portfolio page, CSS and script inlined
//! ├── search-index.json     # Entries for the navbar search
//! └── assets/               # Copied from the source directory
//!     └── img/...
//! ```
//!
//! ## Content Failures
//!
//! A missing or malformed content document does not fail the build. The
//! error is logged and the page is written with every content mount left
//! as an empty placeholder; theme, navigation and the profile picture still
//! work. Config errors, by contrast, abort the build.
//!
//! ## Personalization
//!
//! The stored theme and profile picture are read from the settings store
//! before rendering and baked into the page (`data-theme` on the root
//! element, the avatar `src`).
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Carousels, search, theme toggle, scroll spy, reveal

use crate::avatar::{ProfilePicture, resolve_avatar};
use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{ContentDocument, ContentError, JourneyKind, load_content};
use crate::navigation::MobileMenu;
use crate::page::{MountId, Mounts};
use crate::render;
use crate::search::SearchIndex;
use crate::settings::SettingsStore;
use crate::theme::{Theme, ThemeController};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// File name of the search index in the output directory.
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// Settings-store state that shapes the generated page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Personalization {
    pub theme: Theme,
    pub profile_picture: Option<String>,
}

impl Personalization {
    pub fn from_store<S: SettingsStore>(store: S) -> Self {
        let theme = ThemeController::init(store);
        let current = theme.theme();
        let picture = ProfilePicture::new(theme.into_store());
        Self {
            theme: current,
            profile_picture: picture.load(),
        }
    }
}

/// Item count for one filled mount.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport {
    pub mount: MountId,
    pub items: usize,
}

/// What a build produced, for CLI output.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub title: String,
    pub content_loaded: bool,
    pub sections: Vec<SectionReport>,
    pub search_entries: usize,
    /// Index URL as referenced from the page, with its content fingerprint.
    pub search_url: String,
    pub assets_copied: usize,
}

/// Result of `folio check`: config and content both parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub config_path: Option<PathBuf>,
    pub content_path: PathBuf,
    pub sections: Vec<SectionReport>,
}

/// Load and validate config and content without writing anything.
/// Unlike [`generate`], a broken content document is an error here.
pub fn check(source: &Path) -> Result<CheckReport, GenerateError> {
    let config = config::load_config(source)?;
    let content_path = source.join(&config.content_path);
    let doc = load_content(&content_path)?;
    let mounts = Mounts::from_layout(&config.layout.sections);
    let config_file = source.join(config::CONFIG_FILENAME);

    Ok(CheckReport {
        config_path: config_file.exists().then_some(config_file),
        content_path,
        sections: section_reports(&mounts, &doc, true),
    })
}

/// Load config and content, failing on either.
pub fn load_site(source: &Path) -> Result<(SiteConfig, ContentDocument), GenerateError> {
    let config = config::load_config(source)?;
    let doc = load_content(&source.join(&config.content_path))?;
    Ok((config, doc))
}

pub fn generate(
    source: &Path,
    output_dir: &Path,
    personal: &Personalization,
) -> Result<GenerateReport, GenerateError> {
    let config = config::load_config(source)?;

    let content_path = source.join(&config.content_path);
    let doc = match load_content(&content_path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::error!("Error loading content: {e}");
            None
        }
    };

    let mut mounts = Mounts::from_layout(&config.layout.sections);
    let content_avatar = doc.as_ref().and_then(|d| d.profile.avatar.as_deref());
    let avatar_src = resolve_avatar(
        personal.profile_picture.as_deref(),
        content_avatar,
        &config.site.author,
    );
    match &doc {
        Some(doc) => render::render_all(&mut mounts, doc, &config, &avatar_src),
        None => render::render_profile_avatar(
            mounts.slot_mut(MountId::ProfileAvatar),
            &avatar_src,
            &config.site.author,
        ),
    }
    render::render_qr_code(mounts.slot_mut(MountId::QrCode), &config.site.url);

    let index = doc.as_ref().map(SearchIndex::build).unwrap_or_default();
    let index_json = index.to_json()?;
    let search_url = format!("{}?v={}", SEARCH_INDEX_FILE, fingerprint(&index_json));

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(SEARCH_INDEX_FILE), &index_json)?;

    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    let page = render_page(&config, &mounts, personal.theme, &search_url, &css);
    fs::write(output_dir.join("index.html"), page.into_string())?;
    tracing::info!("Generated index.html");

    let assets_copied = copy_assets(source, output_dir, &content_path)?;

    let sections = match &doc {
        Some(doc) => section_reports(&mounts, doc, false),
        None => Vec::new(),
    };

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        title: config.site.title.clone(),
        content_loaded: doc.is_some(),
        sections,
        search_entries: index.len(),
        search_url,
        assets_copied,
    })
}

/// Short content hash used to bust caches of the search index.
pub fn fingerprint(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    digest.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

/// Copy `source/assets` into the output, skipping the content document
/// (already baked into the page). Returns the number of files copied.
fn copy_assets(source: &Path, output_dir: &Path, content_path: &Path) -> Result<usize, GenerateError> {
    let assets = source.join("assets");
    if !assets.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(&assets).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.path() != content_path {
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    tracing::debug!(copied, "copied assets");
    Ok(copied)
}

fn section_reports(mounts: &Mounts, doc: &ContentDocument, all: bool) -> Vec<SectionReport> {
    let journey_of = |kind: JourneyKind| doc.journey.iter().filter(|e| e.kind == kind).count();
    MountId::ALL
        .into_iter()
        .filter(|id| if all { mounts.has(*id) } else { mounts.slot(*id).is_some_and(|s| s.is_filled()) })
        .filter_map(|mount| {
            let items = match mount {
                MountId::ProfileAvatar | MountId::QrCode => 1,
                MountId::Skills => doc.profile.skills.len(),
                MountId::ExperienceTimeline => journey_of(JourneyKind::Experience),
                MountId::EducationTimeline => journey_of(JourneyKind::Education),
                MountId::JourneyTimeline => doc.journey.len(),
                MountId::ArticlesCarousel => doc.medium_articles.len(),
                MountId::PublicationsCarousel => doc.publications.len(),
                MountId::MediaCarousel => doc.media.len(),
                MountId::StatsGrid => doc.social_stats.len(),
                MountId::FollowersWidget => doc.followers.as_ref().map_or(0, |f| f.list.len()),
                MountId::SearchResults => return None,
            };
            Some(SectionReport { mount, items })
        })
        .collect()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Page sections in document order: anchor, nav label, heading, mounts.
const SECTIONS: &[(&str, &str, &[MountId])] = &[
    ("skills", "Skills", &[MountId::Skills]),
    (
        "journey",
        "Journey",
        &[
            MountId::ExperienceTimeline,
            MountId::EducationTimeline,
            MountId::JourneyTimeline,
        ],
    ),
    ("articles", "Articles", &[MountId::ArticlesCarousel]),
    ("publications", "Publications", &[MountId::PublicationsCarousel]),
    ("media", "Media", &[MountId::MediaCarousel]),
    (
        "community",
        "Community",
        &[MountId::StatsGrid, MountId::FollowersWidget, MountId::QrCode],
    ),
];

fn wrapper_class(id: MountId) -> &'static str {
    match id {
        MountId::Skills => "skills-container",
        MountId::ExperienceTimeline | MountId::EducationTimeline | MountId::JourneyTimeline => {
            "timeline"
        }
        MountId::StatsGrid => "stats-grid",
        MountId::FollowersWidget => "followers-widget",
        MountId::QrCode => "qr-code",
        MountId::SearchResults => "search-results",
        _ => "mount",
    }
}

fn timeline_heading(id: MountId) -> Option<&'static str> {
    match id {
        MountId::ExperienceTimeline => Some("Experience"),
        MountId::EducationTimeline => Some("Education"),
        _ => None,
    }
}

/// Renders one mount point. Absent from the layout means absent from the
/// page; unfilled means an empty placeholder carrying the id.
fn mount_point(mounts: &Mounts, id: MountId) -> Markup {
    let Some(slot) = mounts.slot(id) else {
        return html! {};
    };
    match (id.is_self_mounted(), slot.markup()) {
        (true, Some(markup)) => markup.clone(),
        (true, None) if id == MountId::ProfileAvatar => html! {},
        (true, None) => html! { div.carousel-track id=(id.id()) {} },
        (false, _) => html! {
            @if let Some(heading) = timeline_heading(id) {
                h3.timeline-heading { (heading) }
            }
            div class=(wrapper_class(id)) id=(id.id()) hidden[id == MountId::SearchResults] {
                (slot.render())
            }
        },
    }
}

/// Renders the base HTML document structure
fn base_document(config: &SiteConfig, theme: Theme, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.site.title) }
                @if !config.site.description.is_empty() {
                    meta name="description" content=(config.site.description);
                }
                @if !config.site.author.is_empty() {
                    meta name="author" content=(config.site.author);
                }
                @if !config.site.url.is_empty() {
                    link rel="canonical" href=(config.site.url);
                }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn navbar(config: &SiteConfig, mounts: &Mounts, theme: Theme) -> Markup {
    let menu = MobileMenu::default();
    html! {
        nav.navbar id="navbar" {
            div.nav-container {
                a.nav-logo href="#home" { (config.site.title) }
                ul.nav-menu id="navMenu" {
                    li { a.nav-link.active href="#home" { "Home" } }
                    @for (anchor, label, ids) in SECTIONS {
                        @if ids.iter().any(|id| mounts.has(*id)) {
                            li { a.nav-link href={ "#" (anchor) } { (label) } }
                        }
                    }
                }
                div.nav-actions {
                    div.search-box {
                        input.search-input id="searchInput" type="search"
                            placeholder="Search articles, publications..." autocomplete="off"
                            aria-label="Search";
                        (mount_point(mounts, MountId::SearchResults))
                    }
                    button.theme-toggle id="themeToggle" type="button" aria-label="Toggle theme" {
                        (theme.icon())
                    }
                    button.mobile-menu-toggle id="mobileMenuToggle" type="button"
                        aria-label="Toggle menu" aria-expanded="false" {
                        (menu.glyph())
                    }
                }
            }
        }
    }
}

fn render_page(
    config: &SiteConfig,
    mounts: &Mounts,
    theme: Theme,
    search_url: &str,
    css: &str,
) -> Markup {
    let nav = &config.navigation;
    let reveal = &config.reveal;

    let content = html! {
        (navbar(config, mounts, theme))
        main
            data-search-index=(search_url)
            data-header-offset=(nav.header_offset)
            data-scrolled-threshold=(nav.scrolled_threshold)
            data-active-offset=(nav.active_offset)
            data-reveal-threshold=(reveal.threshold)
            data-reveal-margin=(reveal.root_margin) {
            section.hero.section id="home" {
                (mount_point(mounts, MountId::ProfileAvatar))
                h1.hero-title { (config.site.title) }
                @if !config.site.description.is_empty() {
                    p.hero-subtitle { (config.site.description) }
                }
            }
            @for (anchor, label, ids) in SECTIONS {
                @if ids.iter().any(|id| mounts.has(*id)) {
                    section.section id=(anchor) {
                        h2.section-title.scroll-reveal { (label) }
                        @for id in *ids {
                            (mount_point(mounts, *id))
                        }
                    }
                }
            }
        }
        footer.footer {
            p { "© " (config.site.author) }
        }
        script { (PreEscaped(JS)) }
    };

    base_document(config, theme, css, content)
}

// ============================================================================
// Tests
// ============================================================================
