//! Page behaviour as explicit state machines.
//!
//! Nothing here touches a document. Every machine consumes [`Event`]s reported
//! by whatever hosts the page and answers with [`Effect`]s for it to apply.
//! Timed phases are requested through [`Effect::Schedule`]; the host feeds the
//! carried event back once the delay has passed, and machines drop the ones
//! that have gone stale in the meantime.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::view::about::LIVE_ANCHOR;
use crate::view::project::FigureMedia;
use crate::view::{AboutView, DetailView, ListItem, PageKind};

pub mod detail;
pub mod gallery;
pub mod heading;
pub mod marquee;
pub mod scroll;
pub mod video;

pub use detail::{DetailEvent, DetailInteractions};
pub use gallery::{GalleryEffect, GalleryEvent, GalleryListToggle, ViewMode};
pub use heading::{HeadingEffect, HeadingEvent, HeadingState, StickyHeading};
pub use marquee::MarqueeLayout;
pub use scroll::{MemoryStore, ScrollEffect, ScrollRestoration, SessionStore};
pub use video::{VideoEffect, VideoEvent, VideoTransport};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Heading(HeadingEvent),
    /// Natural width of the announcement content against the viewport.
    MarqueeMeasured {
        content_width: f64,
        viewport_width: f64,
    },
    Gallery(GalleryEvent),
    /// Event of the video in figure `index`.
    Video {
        index: usize,
        event: VideoEvent,
    },
    Detail(DetailEvent),
    /// A list item was followed to its detail page.
    ItemClicked {
        scroll_offset: f64,
    },
    RestoreDue,
    AnchorDue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Heading(HeadingEffect),
    /// Replace the announcement content.
    Marquee {
        layout: MarqueeLayout,
        content: String,
    },
    Gallery(GalleryEffect),
    Video {
        index: usize,
        effect: VideoEffect,
    },
    Scroll(ScrollEffect),
    HighlightCaption(usize),
    UnhighlightCaption(usize),
    /// Deliver `event` back to the controller after `after`.
    Schedule {
        after: Duration,
        event: Event,
    },
}

enum Page {
    List {
        gallery: GalleryListToggle,
        announcement: Option<String>,
        restore: ScrollRestoration,
    },
    Detail {
        detail: DetailInteractions,
        videos: BTreeMap<usize, VideoTransport>,
    },
    About {
        heading: StickyHeading,
        /// Fragment to scroll to once the CV is laid out.
        anchor: Option<&'static str>,
    },
}

/// Behaviour attached to one rendered page.
///
/// Owns the state machines that apply to its kind of page; events meant for
/// the others are dropped.
pub struct InteractionController {
    page: Page,
}

impl InteractionController {
    /// The project list. `announcement` is the markup of the live banner, if
    /// one is shown.
    pub fn for_list(
        items: &[ListItem],
        announcement: Option<String>,
        store: impl SessionStore + 'static,
        mobile: bool,
    ) -> Self {
        Self {
            page: Page::List {
                gallery: GalleryListToggle::new(items, mobile),
                announcement,
                restore: ScrollRestoration::new(store),
            },
        }
    }

    pub fn for_detail(view: &DetailView) -> Self {
        let videos = view
            .figures
            .iter()
            .enumerate()
            .filter(|(_, figure)| matches!(figure.media, FigureMedia::Video { .. }))
            .map(|(index, _)| (index, VideoTransport::new(index)))
            .collect();

        Self {
            page: Page::Detail {
                detail: DetailInteractions::new(view),
                videos,
            },
        }
    }

    /// The about page, opened with an optional URL `fragment`.
    pub fn for_about(view: &AboutView, fragment: Option<&str>) -> Self {
        let anchor = fragment
            .filter(|fragment| view.has_anchor(fragment))
            .map(|_| LIVE_ANCHOR);

        Self {
            page: Page::About {
                heading: StickyHeading::new(),
                anchor,
            },
        }
    }

    pub fn kind(&self) -> PageKind {
        match self.page {
            Page::List { .. } => PageKind::List,
            Page::Detail { .. } => PageKind::Detail,
            Page::About { .. } => PageKind::About,
        }
    }

    /// Effects to run once the page is in the document.
    pub fn attach(&self) -> Vec<Effect> {
        match &self.page {
            Page::List { restore, .. } if restore.is_pending() => vec![Effect::Schedule {
                after: scroll::RESTORE_DELAY,
                event: Event::RestoreDue,
            }],
            Page::About {
                anchor: Some(_), ..
            } => vec![Effect::Schedule {
                after: scroll::ANCHOR_DELAY,
                event: Event::AnchorDue,
            }],
            _ => vec![],
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let kind = self.kind();
        match (&mut self.page, event) {
            (Page::About { heading, .. }, Event::Heading(event)) => heading.handle(event),
            (Page::About { anchor, .. }, Event::AnchorDue) => match anchor.take() {
                Some(id) => vec![Effect::Scroll(ScrollEffect::IntoView {
                    id: id.to_string(),
                    smooth: true,
                })],
                None => vec![],
            },
            (
                Page::List {
                    announcement: Some(content),
                    ..
                },
                Event::MarqueeMeasured {
                    content_width,
                    viewport_width,
                },
            ) => {
                let layout = MarqueeLayout::measure(content_width, viewport_width);
                vec![Effect::Marquee {
                    layout,
                    content: layout.render(content),
                }]
            }
            (Page::List { gallery, .. }, Event::Gallery(event)) => gallery.handle(event),
            (Page::List { restore, .. }, Event::ItemClicked { scroll_offset }) => {
                restore.remember(scroll_offset);
                vec![]
            }
            (Page::List { restore, .. }, Event::RestoreDue) => restore
                .take()
                .map(|top| vec![Effect::Scroll(ScrollEffect::To { top })])
                .unwrap_or_default(),
            (Page::Detail { detail, .. }, Event::Detail(event)) => detail.handle(event),
            (Page::Detail { videos, .. }, Event::Video { index, event }) => {
                match videos.get_mut(&index) {
                    Some(video) => video.handle(event),
                    None => {
                        debug!(index, "no video transport for figure");
                        vec![]
                    }
                }
            }
            (_, event) => {
                debug!(page = ?kind, ?event, "event ignored");
                vec![]
            }
        }
    }

    pub fn heading(&self) -> Option<&StickyHeading> {
        match &self.page {
            Page::About { heading, .. } => Some(heading),
            _ => None,
        }
    }

    pub fn gallery(&self) -> Option<&GalleryListToggle> {
        match &self.page {
            Page::List { gallery, .. } => Some(gallery),
            _ => None,
        }
    }

    pub fn video(&self, index: usize) -> Option<&VideoTransport> {
        match &self.page {
            Page::Detail { videos, .. } => videos.get(&index),
            _ => None,
        }
    }
}
