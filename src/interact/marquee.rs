/// Copies of the content in a looping marquee, enough to cover very wide
/// viewports without a visible seam.
pub const REPEATS: usize = 4;

/// Share of the viewport the content may use before it has to loop.
pub const AVAILABLE_FRACTION: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeLayout {
    /// Rendered once, not moving.
    Static,
    /// Content repeated and scrolling.
    Looping { repeats: usize },
}

impl MarqueeLayout {
    /// Pick a layout from the natural content width and the viewport width.
    pub fn measure(content_width: f64, viewport_width: f64) -> Self {
        if content_width > viewport_width * AVAILABLE_FRACTION {
            MarqueeLayout::Looping { repeats: REPEATS }
        } else {
            MarqueeLayout::Static
        }
    }

    pub fn is_looping(self) -> bool {
        matches!(self, MarqueeLayout::Looping { .. })
    }

    /// The content markup for this layout.
    pub fn render(self, fragment: &str) -> String {
        match self {
            MarqueeLayout::Static => fragment.to_string(),
            MarqueeLayout::Looping { repeats } => fragment.repeat(repeats),
        }
    }
}
