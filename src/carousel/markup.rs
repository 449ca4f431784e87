//! Server-rendered carousel markup.
//!
//! The generated page ships each carousel already in its initial state:
//! track translated to slide 0, first indicator active, and (for
//! non-looping carousels) the previous control disabled. The page script
//! reads the `data-*` options off the track and takes over from there.

use super::{Carousel, CarouselOptions, NullScheduler};
use maud::{Markup, html};

/// Element ids for one carousel's track and controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselControls {
    pub track: &'static str,
    pub prev: &'static str,
    pub next: &'static str,
    pub indicators: &'static str,
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Render a carousel over `slides`, in the initial frame of a [`Carousel`]
/// built with that slide count. With no slides the carousel is inert and
/// only the bare track is emitted: no controls, no `data-carousel` marker,
/// so nothing on the page instantiates a carousel for it.
pub fn render_carousel(
    controls: &CarouselControls,
    options: &CarouselOptions,
    slides: &[Markup],
) -> Markup {
    let carousel = Carousel::new(slides.len(), options.clone(), NullScheduler::default());
    let Some(frame) = carousel.frame() else {
        return html! {
            div.carousel-track id=(controls.track) {}
        };
    };
    let delay_ms = options.autoplay_delay.as_millis() as u64;

    html! {
        div.carousel {
            button.carousel-btn.carousel-prev id=(controls.prev) type="button"
                aria-label="Previous slide" disabled[frame.prev_disabled] { "‹" }
            div.carousel-viewport {
                div.carousel-track id=(controls.track) data-carousel
                    data-autoplay=(flag(options.autoplay))
                    data-autoplay-delay=(delay_ms)
                    data-loop=(flag(options.looping))
                    data-swipe=(flag(options.swipe))
                    data-prev=(controls.prev)
                    data-next=(controls.next)
                    data-indicators=(controls.indicators)
                    style={ "transform: " (frame.transform()) } {
                    @for slide in slides {
                        div.carousel-slide { (slide) }
                    }
                }
            }
            button.carousel-btn.carousel-next id=(controls.next) type="button"
                aria-label="Next slide" disabled[frame.next_disabled] { "›" }
            div.carousel-indicators id=(controls.indicators) {
                @for i in 0..slides.len() {
                    button.carousel-indicator.active[frame.is_active(i)] type="button"
                        aria-label={ "Go to slide " (i + 1) } data-slide=(i) {}
                }
            }
        }
    }
}
