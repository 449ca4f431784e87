//! Page mount points.
//!
//! The page template declares which sections it has by listing mount ids in
//! `[layout] sections`. They are resolved once into a [`Mounts`] table and
//! each renderer is handed `Option<&mut Slot>`: `None` means the page has no
//! such section and the renderer returns without doing anything.

use maud::{Markup, PreEscaped};
use std::collections::BTreeMap;

/// Every mount point a renderer knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MountId {
    ProfileAvatar,
    Skills,
    ExperienceTimeline,
    EducationTimeline,
    JourneyTimeline,
    ArticlesCarousel,
    PublicationsCarousel,
    MediaCarousel,
    StatsGrid,
    FollowersWidget,
    QrCode,
    SearchResults,
}

impl MountId {
    pub const ALL: [MountId; 12] = [
        MountId::ProfileAvatar,
        MountId::Skills,
        MountId::ExperienceTimeline,
        MountId::EducationTimeline,
        MountId::JourneyTimeline,
        MountId::ArticlesCarousel,
        MountId::PublicationsCarousel,
        MountId::MediaCarousel,
        MountId::StatsGrid,
        MountId::FollowersWidget,
        MountId::QrCode,
        MountId::SearchResults,
    ];

    /// The stock layout: split journey timelines, everything else present.
    pub const DEFAULT_LAYOUT: [MountId; 11] = [
        MountId::ProfileAvatar,
        MountId::Skills,
        MountId::ExperienceTimeline,
        MountId::EducationTimeline,
        MountId::ArticlesCarousel,
        MountId::PublicationsCarousel,
        MountId::MediaCarousel,
        MountId::StatsGrid,
        MountId::FollowersWidget,
        MountId::QrCode,
        MountId::SearchResults,
    ];

    /// Element id used in the generated HTML.
    pub fn id(self) -> &'static str {
        match self {
            MountId::ProfileAvatar => "profileAvatar",
            MountId::Skills => "skillsContainer",
            MountId::ExperienceTimeline => "experienceTimeline",
            MountId::EducationTimeline => "educationTimeline",
            MountId::JourneyTimeline => "journeyTimeline",
            MountId::ArticlesCarousel => "articlesCarousel",
            MountId::PublicationsCarousel => "publicationsCarousel",
            MountId::MediaCarousel => "mediaCarousel",
            MountId::StatsGrid => "statsGrid",
            MountId::FollowersWidget => "followersWidget",
            MountId::QrCode => "qrCode",
            MountId::SearchResults => "searchResults",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    /// Mounts whose renderer emits the element carrying the id itself (the
    /// avatar `img` and the carousel tracks) instead of filling a wrapper.
    pub fn is_self_mounted(self) -> bool {
        matches!(
            self,
            MountId::ProfileAvatar
                | MountId::ArticlesCarousel
                | MountId::PublicationsCarousel
                | MountId::MediaCarousel
        )
    }
}

/// Content of one mount point. Starts out holding the placeholder and is
/// overwritten by at most one renderer.
#[derive(Debug, Default)]
pub struct Slot {
    markup: Option<Markup>,
}

impl Slot {
    pub fn fill(&mut self, markup: Markup) {
        self.markup = Some(markup);
    }

    pub fn is_filled(&self) -> bool {
        self.markup.is_some()
    }

    pub fn markup(&self) -> Option<&Markup> {
        self.markup.as_ref()
    }

    /// Rendered content, or an empty fragment when nothing filled the slot.
    pub fn render(&self) -> Markup {
        match &self.markup {
            Some(m) => m.clone(),
            None => PreEscaped(String::new()),
        }
    }
}

/// The page's mount points, resolved once from the layout.
#[derive(Debug, Default)]
pub struct Mounts {
    slots: BTreeMap<MountId, Slot>,
}

impl Mounts {
    /// Resolve layout ids. Unknown ids are ignored here; config validation
    /// rejects them earlier.
    pub fn from_layout<S: AsRef<str>>(sections: &[S]) -> Self {
        let slots = sections
            .iter()
            .filter_map(|s| MountId::from_id(s.as_ref()))
            .map(|id| (id, Slot::default()))
            .collect();
        Self { slots }
    }

    pub fn with(ids: &[MountId]) -> Self {
        Self {
            slots: ids.iter().map(|id| (*id, Slot::default())).collect(),
        }
    }

    pub fn has(&self, id: MountId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn slot(&self, id: MountId) -> Option<&Slot> {
        self.slots.get(&id)
    }

    pub fn slot_mut(&mut self, id: MountId) -> Option<&mut Slot> {
        self.slots.get_mut(&id)
    }

    /// Two distinct slots at once, for renderers that fill a pair.
    pub fn pair_mut(&mut self, a: MountId, b: MountId) -> Option<(&mut Slot, &mut Slot)> {
        if a == b {
            return None;
        }
        let mut first = None;
        let mut second = None;
        for (id, slot) in self.slots.iter_mut() {
            if *id == a {
                first = Some(slot);
            } else if *id == b {
                second = Some(slot);
            }
        }
        Some((first?, second?))
    }

    pub fn filled(&self) -> impl Iterator<Item = MountId> + '_ {
        self.slots
            .iter()
            .filter(|(_, s)| s.is_filled())
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;

    #[test]
    fn ids_roundtrip() {
        for id in MountId::ALL {
            assert_eq!(MountId::from_id(id.id()), Some(id));
        }
        assert_eq!(MountId::from_id("nope"), None);
    }

    #[test]
    fn self_mounted_ids() {
        assert!(MountId::ProfileAvatar.is_self_mounted());
        assert!(MountId::MediaCarousel.is_self_mounted());
        assert!(!MountId::Skills.is_self_mounted());
    }

    #[test]
    fn from_layout_skips_unknown() {
        let mounts = Mounts::from_layout(&["statsGrid", "bogus"]);
        assert!(mounts.has(MountId::StatsGrid));
        assert!(!mounts.has(MountId::Skills));
    }

    #[test]
    fn slot_fill_and_render() {
        let mut mounts = Mounts::with(&[MountId::Skills]);
        assert_eq!(mounts.slot(MountId::Skills).unwrap().render().into_string(), "");
        mounts
            .slot_mut(MountId::Skills)
            .unwrap()
            .fill(html! { p { "hi" } });
        assert_eq!(
            mounts.slot(MountId::Skills).unwrap().render().into_string(),
            "<p>hi</p>"
        );
        assert_eq!(mounts.filled().collect::<Vec<_>>(), vec![MountId::Skills]);
    }

    #[test]
    fn pair_mut_requires_both() {
        let mut mounts = Mounts::with(&[MountId::ExperienceTimeline, MountId::EducationTimeline]);
        assert!(
            mounts
                .pair_mut(MountId::ExperienceTimeline, MountId::EducationTimeline)
                .is_some()
        );
        assert!(
            mounts
                .pair_mut(MountId::ExperienceTimeline, MountId::JourneyTimeline)
                .is_none()
        );
        assert!(
            mounts
                .pair_mut(MountId::ExperienceTimeline, MountId::ExperienceTimeline)
                .is_none()
        );
    }
}
