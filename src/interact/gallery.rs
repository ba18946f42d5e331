use std::time::Duration;

use crate::interact::{Effect, Event};
use crate::view::project::{ListItem, MediaKind};

/// Length of the cross-fade between grid and list.
pub const TOGGLE_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    /// Label of the control that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ViewMode::Grid => "Index",
            ViewMode::List => "Gallery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    ToggleClicked,
    ToggleDue(u64),
    /// Mobile only: item entered the centred viewport band.
    ItemEntered(usize),
    /// Mobile only: item left the centred viewport band.
    ItemLeft(usize),
    PointerEntered(usize),
    PointerLeft(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEffect {
    FadeOut,
    FadeIn,
    /// Swap the container's state class.
    SetMode(ViewMode),
    SetToggleLabel(&'static str),
    MarkActive(usize),
    UnmarkActive(usize),
    ShowPreview(usize),
    HidePreview(usize),
    /// Start the item's inline video, muted, optionally from the beginning.
    PlayVideo { index: usize, restart: bool },
    /// Pause the item's inline video, optionally rewinding it.
    PauseVideo { index: usize, rewind: bool },
}

/// Grid/list switch of the home page, plus the per-item media behaviour that
/// depends on it.
#[derive(Debug)]
pub struct GalleryListToggle {
    mode: ViewMode,
    switching: bool,
    generation: u64,
    kinds: Vec<MediaKind>,
    mobile: bool,
}

impl GalleryListToggle {
    pub fn new(items: &[ListItem], mobile: bool) -> Self {
        Self {
            mode: ViewMode::Grid,
            switching: false,
            generation: 0,
            kinds: items.iter().map(|item| item.kind).collect(),
            mobile,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn handle(&mut self, event: GalleryEvent) -> Vec<Effect> {
        let effects = match event {
            GalleryEvent::ToggleClicked => {
                // a second click mid-fade would toggle twice
                if self.switching {
                    return vec![];
                }
                self.switching = true;
                self.generation += 1;
                return vec![
                    Effect::Gallery(GalleryEffect::FadeOut),
                    Effect::Schedule {
                        after: TOGGLE_DELAY,
                        event: Event::Gallery(GalleryEvent::ToggleDue(self.generation)),
                    },
                ];
            }
            GalleryEvent::ToggleDue(generation) => {
                if !self.switching || generation != self.generation {
                    return vec![];
                }
                self.switching = false;
                self.mode = self.mode.toggled();
                vec![
                    GalleryEffect::SetMode(self.mode),
                    GalleryEffect::SetToggleLabel(self.mode.toggle_label()),
                    GalleryEffect::FadeIn,
                ]
            }
            GalleryEvent::ItemEntered(index) if self.mobile && self.has(index) => {
                let mut effects = vec![GalleryEffect::MarkActive(index)];
                if self.mode == ViewMode::List && self.is_video(index) {
                    effects.push(GalleryEffect::PlayVideo {
                        index,
                        restart: false,
                    });
                }
                effects
            }
            GalleryEvent::ItemLeft(index) if self.mobile && self.has(index) => {
                let mut effects = vec![GalleryEffect::UnmarkActive(index)];
                if self.is_video(index) {
                    effects.push(GalleryEffect::PauseVideo {
                        index,
                        rewind: false,
                    });
                }
                effects
            }
            GalleryEvent::PointerEntered(index)
                if self.mode == ViewMode::List && self.has(index) =>
            {
                let mut effects = vec![GalleryEffect::ShowPreview(index)];
                if self.is_video(index) {
                    effects.push(GalleryEffect::PlayVideo {
                        index,
                        restart: true,
                    });
                }
                effects
            }
            GalleryEvent::PointerLeft(index) if self.mode == ViewMode::List && self.has(index) => {
                let mut effects = vec![GalleryEffect::HidePreview(index)];
                if self.is_video(index) {
                    effects.push(GalleryEffect::PauseVideo {
                        index,
                        rewind: true,
                    });
                }
                effects
            }
            _ => vec![],
        };

        effects.into_iter().map(Effect::Gallery).collect()
    }

    fn has(&self, index: usize) -> bool {
        index < self.kinds.len()
    }

    fn is_video(&self, index: usize) -> bool {
        self.kinds.get(index) == Some(&MediaKind::Video)
    }
}
