//! Section renderers.
//!
//! One function per page section. Each takes the slot for its mount point
//! as `Option<&mut Slot>` plus a shared borrow of the content it shows, and
//! fills the slot with maud markup. A `None` slot means the page layout has
//! no such section; the renderer returns without doing anything.
//!
//! Carousel sections go through [`render_carousel`], which emits the track
//! (carrying the mount id) together with its controls. An empty collection
//! still fills the slot with the bare track so the section stays in the page,
//! but no carousel is wired up for it.

use crate::carousel::{CarouselControls, CarouselOptions, render_carousel};
use crate::config::SiteConfig;
use crate::content::{
    Article, ContentDocument, Followers, JourneyEntry, JourneyKind, MediaItem, Publication,
    SkillCategory, SocialStat,
};
use crate::dates::format_date_short;
use crate::page::{MountId, Mounts, Slot};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

const QR_SIZE: u32 = 200;

pub const ARTICLES_CONTROLS: CarouselControls = CarouselControls {
    track: "articlesCarousel",
    prev: "articlesPrev",
    next: "articlesNext",
    indicators: "articlesIndicators",
};

pub const PUBLICATIONS_CONTROLS: CarouselControls = CarouselControls {
    track: "publicationsCarousel",
    prev: "publicationsPrev",
    next: "publicationsNext",
    indicators: "publicationsIndicators",
};

pub const MEDIA_CONTROLS: CarouselControls = CarouselControls {
    track: "mediaCarousel",
    prev: "mediaPrev",
    next: "mediaNext",
    indicators: "mediaIndicators",
};

/// Render every section of `doc` into whichever mounts the layout has.
///
/// `avatar_src` is the already-resolved profile picture (stored upload,
/// content avatar, or generated default).
pub fn render_all(mounts: &mut Mounts, doc: &ContentDocument, config: &SiteConfig, avatar_src: &str) {
    render_profile_avatar(mounts.slot_mut(MountId::ProfileAvatar), avatar_src, &config.site.author);
    render_skills(mounts.slot_mut(MountId::Skills), &doc.profile.skills);
    render_journey(mounts, &doc.journey);
    render_articles(
        mounts.slot_mut(MountId::ArticlesCarousel),
        &doc.medium_articles,
        &config.carousel.articles.options(),
    );
    render_publications(
        mounts.slot_mut(MountId::PublicationsCarousel),
        &doc.publications,
        &config.carousel.publications.options(),
    );
    render_media(
        mounts.slot_mut(MountId::MediaCarousel),
        &doc.media,
        &config.carousel.media.options(),
    );
    render_stats(mounts.slot_mut(MountId::StatsGrid), &doc.social_stats);
    render_followers(mounts.slot_mut(MountId::FollowersWidget), doc.followers.as_ref());
}

/// Convert a Markdown snippet to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

pub fn render_profile_avatar(slot: Option<&mut Slot>, src: &str, author: &str) {
    let Some(slot) = slot else { return };
    let alt = if author.is_empty() { "Profile picture" } else { author };
    slot.fill(html! {
        img.profile-avatar id=(MountId::ProfileAvatar.id()) src=(src) alt=(alt) title=(alt);
    });
}

/// SVG QR code of the site URL. Left empty when no URL is configured or the
/// URL is too long to encode.
pub fn render_qr_code(slot: Option<&mut Slot>, url: &str) {
    let Some(slot) = slot else { return };
    if url.is_empty() {
        return;
    }
    let code = match QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("Cannot encode {url} as a QR code: {e}");
            return;
        }
    };
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .dark_color(svg::Color("#0a0a0f"))
        .light_color(svg::Color("#ffffff"))
        .build();
    // Inline into HTML without the XML declaration.
    let image = image.find("<svg").map_or(image.as_str(), |i| &image[i..]);
    slot.fill(html! {
        div.qr-code-image role="img" aria-label={ "QR code for " (url) } {
            (PreEscaped(image))
        }
        p.qr-caption { a href=(url) target="_blank" rel="noopener" { (url) } }
    });
}

pub fn render_skills(slot: Option<&mut Slot>, skills: &[SkillCategory]) {
    let Some(slot) = slot else { return };
    slot.fill(html! {
        div.bento-grid {
            @for category in skills {
                div.bento-card.scroll-reveal {
                    div.bento-header {
                        i class={ (category.icon) " bento-icon" } {}
                        div.bento-title-group {
                            h3.bento-title { (category.category) }
                            p.bento-desc { (category.description) }
                        }
                    }
                    div.bento-content {
                        @for item in &category.items {
                            div.skill-chip {
                                i class=(item.icon) {}
                                span { (item.name) }
                            }
                        }
                    }
                }
            }
        }
    });
}

fn timeline_item(entry: &JourneyEntry) -> Markup {
    html! {
        div.timeline-item.scroll-reveal {
            div.timeline-marker { (entry.kind.icon()) }
            div.timeline-content {
                div.timeline-header {
                    h3.timeline-role { (entry.role) }
                    span.timeline-period { (entry.period) }
                }
                div.timeline-org {
                    (entry.organization)
                    @if !entry.location.is_empty() {
                        " · " span.timeline-location { (entry.location) }
                    }
                }
                @if !entry.description.is_empty() {
                    div.timeline-description { (PreEscaped(markdown_to_html(&entry.description))) }
                }
            }
        }
    }
}

fn timeline<'a>(entries: impl Iterator<Item = &'a JourneyEntry>) -> Markup {
    html! {
        @for entry in entries {
            (timeline_item(entry))
        }
    }
}

/// Fill the split experience/education timelines when the page has both,
/// otherwise the single combined timeline.
pub fn render_journey(mounts: &mut Mounts, journey: &[JourneyEntry]) {
    let of_kind = |kind: JourneyKind| journey.iter().filter(move |e| e.kind == kind);

    if let Some((experience, education)) =
        mounts.pair_mut(MountId::ExperienceTimeline, MountId::EducationTimeline)
    {
        experience.fill(timeline(of_kind(JourneyKind::Experience)));
        education.fill(timeline(of_kind(JourneyKind::Education)));
        return;
    }
    if let Some(slot) = mounts.slot_mut(MountId::JourneyTimeline) {
        slot.fill(timeline(journey.iter()));
    }
}

fn card_link(url: &str, label: &str) -> Markup {
    html! {
        a.card-link href=(url) target="_blank" rel="noopener noreferrer" { (label) }
    }
}

fn article_card(article: &Article) -> Markup {
    html! {
        article.content-card {
            div.card-header {
                h3.card-title { (article.title) }
                div.card-meta {
                    span { "📅 " (article.date) }
                }
            }
            div.card-body {
                p { (article.excerpt) }
            }
            div.card-footer {
                div.tag-list {
                    @for tag in &article.tags {
                        span.tag { (tag) }
                    }
                }
                (card_link(&article.url, "Read More →"))
            }
        }
    }
}

fn publication_card(publication: &Publication) -> Markup {
    html! {
        article.content-card {
            div.card-header {
                h3.card-title { (publication.title) }
                div.card-meta {
                    span { "📚 " (publication.venue) }
                    span { "📅 " (format_date_short(&publication.date)) }
                }
            }
            div.card-body {
                p.card-kind { (publication.kind) " Publication" }
            }
            div.card-footer {
                (card_link(&publication.url, "View Publication →"))
            }
        }
    }
}

fn media_card(item: &MediaItem) -> Markup {
    html! {
        article.content-card {
            div.card-header {
                h3.card-title { (item.title) }
                div.card-meta {
                    span { "📰 " (item.outlet) }
                    span { "📅 " (format_date_short(&item.date)) }
                }
            }
            div.card-footer {
                (card_link(&item.url, "Read Article →"))
            }
        }
    }
}

fn fill_carousel<T>(
    slot: Option<&mut Slot>,
    controls: &CarouselControls,
    options: &CarouselOptions,
    items: &[T],
    card: fn(&T) -> Markup,
) {
    let Some(slot) = slot else { return };
    let slides: Vec<Markup> = items.iter().map(card).collect();
    slot.fill(render_carousel(controls, options, &slides));
}

pub fn render_articles(slot: Option<&mut Slot>, articles: &[Article], options: &CarouselOptions) {
    fill_carousel(slot, &ARTICLES_CONTROLS, options, articles, article_card);
}

pub fn render_publications(
    slot: Option<&mut Slot>,
    publications: &[Publication],
    options: &CarouselOptions,
) {
    fill_carousel(slot, &PUBLICATIONS_CONTROLS, options, publications, publication_card);
}

pub fn render_media(slot: Option<&mut Slot>, media: &[MediaItem], options: &CarouselOptions) {
    fill_carousel(slot, &MEDIA_CONTROLS, options, media, media_card);
}

pub fn render_stats(slot: Option<&mut Slot>, stats: &[SocialStat]) {
    let Some(slot) = slot else { return };
    slot.fill(html! {
        @for stat in stats {
            a.stat-card.scroll-reveal href=(stat.url) target="_blank" rel="noopener noreferrer" {
                span.stat-icon { (stat.icon) }
                span.stat-count { (stat.count) }
                span.stat-platform { (stat.platform) }
            }
        }
    });
}

/// Skipped entirely when the document has no `followers` object.
pub fn render_followers(slot: Option<&mut Slot>, followers: Option<&Followers>) {
    let (Some(slot), Some(followers)) = (slot, followers) else {
        return;
    };
    slot.fill(html! {
        h3.followers-count { "Followers" }
        span.followers-label { "Followers (" (followers.count) ")" }
        div.follower-avatars {
            @for follower in &followers.list {
                img.follower-avatar src=(follower.avatar) alt=(follower.name) title=(follower.name) loading="lazy";
            }
        }
        button.btn-follow type="button" { "Follow" }
    });
}
