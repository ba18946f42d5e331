use crate::interact::{Effect, ScrollEffect};
use crate::view::DetailView;

/// Offset kept above the info block when jumping to it, in `rem`.
pub const INFO_OFFSET_REM: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    ThumbnailClicked(usize),
    ThumbnailHovered(usize),
    ThumbnailUnhovered(usize),
    TitleClicked,
    InfoClicked,
}

/// Thumbnail to figure navigation and caption highlighting on a project page.
#[derive(Debug)]
pub struct DetailInteractions {
    targets: Vec<String>,
    /// Caption number per thumbnail, `None` for uncaptioned items.
    captions: Vec<Option<usize>>,
}

impl DetailInteractions {
    pub fn new(view: &DetailView) -> Self {
        Self {
            targets: view.thumbnails.iter().map(|t| t.target.clone()).collect(),
            captions: view.thumbnails.iter().map(|t| t.number).collect(),
        }
    }

    pub fn handle(&self, event: DetailEvent) -> Vec<Effect> {
        match event {
            DetailEvent::ThumbnailClicked(index) => match self.targets.get(index) {
                Some(id) => vec![Effect::Scroll(ScrollEffect::IntoView {
                    id: id.clone(),
                    smooth: true,
                })],
                None => vec![],
            },
            DetailEvent::ThumbnailHovered(index) => self
                .caption(index)
                .map(|number| vec![Effect::HighlightCaption(number)])
                .unwrap_or_default(),
            DetailEvent::ThumbnailUnhovered(index) => self
                .caption(index)
                .map(|number| vec![Effect::UnhighlightCaption(number)])
                .unwrap_or_default(),
            DetailEvent::TitleClicked => vec![Effect::Scroll(ScrollEffect::Top { smooth: true })],
            DetailEvent::InfoClicked => vec![Effect::Scroll(ScrollEffect::Info {
                offset_rem: INFO_OFFSET_REM,
            })],
        }
    }

    fn caption(&self, index: usize) -> Option<usize> {
        self.captions.get(index).copied().flatten()
    }
}
