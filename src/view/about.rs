use chrono::NaiveDateTime;

use crate::live::LiveWindow;
use crate::md;
use crate::model::{AboutPage, CvEntry, CvSection, LinkTarget};
use crate::view::PageKind;

/// Year label shown in place of the stored year on the live entry.
pub const CURRENTLY: &str = "Currently";
/// Anchor id of the live entry, and the fragment the announcement links to.
pub const LIVE_ANCHOR: &str = "live-news-target";
/// Announcement text used when the entry has no label of its own.
pub const DEFAULT_LIVE_LABEL: &str = "Live Exhibition";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutView {
    /// Rendered markdown.
    pub bio: String,
    pub sections: Vec<SectionView>,
    /// Present only when a CV entry is live right now.
    pub live: Option<LiveAnnouncement>,
}

impl AboutView {
    /// The entry marked as live, if any.
    pub fn live_entry(&self) -> Option<&EntryView> {
        self.sections
            .iter()
            .flat_map(|section| &section.entries)
            .find(|entry| entry.anchor.is_some())
    }

    /// Whether `fragment` (with or without `#`) names an anchor on this page.
    pub fn has_anchor(&self, fragment: &str) -> bool {
        let fragment = fragment.trim_start_matches('#');
        !fragment.is_empty() && self.live_entry().and_then(|entry| entry.anchor) == Some(fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    /// Also the group key for the sticky heading.
    pub heading: String,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub year: String,
    pub title: String,
    pub info: String,
    /// Rendered markdown, empty when absent.
    pub details: String,
    pub link: Option<LinkView>,
    pub is_live: bool,
    pub anchor: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub href: String,
    pub text: String,
    pub target: LinkTarget,
}

/// Where an announcement may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayScope {
    ListPagesOnly,
}

/// Page-level banner pointing at the live CV entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveAnnouncement {
    pub label: String,
    /// Fragment on the about page.
    pub anchor: &'static str,
    pub target: LinkTarget,
    pub scope: DisplayScope,
}

impl LiveAnnouncement {
    fn for_entry(entry: &CvEntry) -> Self {
        let label = entry
            .live_label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(DEFAULT_LIVE_LABEL);

        Self {
            label: label.to_string(),
            anchor: LIVE_ANCHOR,
            target: LinkTarget::Same,
            scope: DisplayScope::ListPagesOnly,
        }
    }

    pub fn visible_on(&self, page: PageKind) -> bool {
        match self.scope {
            DisplayScope::ListPagesOnly => page == PageKind::List,
        }
    }
}

/// Position of the first live entry in document order, sections first.
pub fn find_live(cv: &[CvSection], now: NaiveDateTime) -> Option<(usize, usize)> {
    cv.iter().enumerate().find_map(|(s, section)| {
        section
            .entries
            .iter()
            .position(|entry| entry.is_live && LiveWindow::for_entry(entry).is_active(now))
            .map(|e| (s, e))
    })
}

/// The live announcement for `about`, without building the rest of the page.
pub fn announcement(about: &AboutPage, now: NaiveDateTime) -> Option<LiveAnnouncement> {
    find_live(&about.cv, now).map(|(s, e)| LiveAnnouncement::for_entry(&about.cv[s].entries[e]))
}

/// Maps the about record into its view model at a fixed instant.
pub struct AboutViewBuilder {
    now: NaiveDateTime,
}

impl AboutViewBuilder {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn build(&self, about: &AboutPage) -> AboutView {
        let live = find_live(&about.cv, self.now);

        let sections = about
            .cv
            .iter()
            .enumerate()
            .map(|(s, section)| SectionView {
                heading: section.heading.clone(),
                entries: section
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(e, entry)| entry_view(entry, live == Some((s, e))))
                    .collect(),
            })
            .collect();

        AboutView {
            bio: md::render(&about.bio),
            sections,
            live: live.map(|(s, e)| LiveAnnouncement::for_entry(&about.cv[s].entries[e])),
        }
    }
}

fn entry_view(entry: &CvEntry, live: bool) -> EntryView {
    let link = entry
        .link_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|href| LinkView {
            href: href.to_string(),
            text: entry
                .link_text
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or("Link")
                .to_string(),
            target: entry.target(),
        });

    EntryView {
        year: match live {
            true => CURRENTLY.to_string(),
            false => entry.year.clone(),
        },
        title: entry.title.clone(),
        info: entry.info.clone().unwrap_or_default(),
        details: md::render_opt(entry.details.as_deref()),
        link,
        is_live: live,
        anchor: live.then_some(LIVE_ANCHOR),
    }
}
