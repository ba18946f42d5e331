//! View models built from CMS records.
//!
//! Builders absorb every irregularity in the content (missing media, empty
//! captions, unknown slide kinds) so whatever consumes a view only ever sees a
//! complete, possibly empty, model.

pub mod about;
pub mod project;

pub use about::{AboutView, AboutViewBuilder, LiveAnnouncement};
pub use project::{DetailView, ListItem, ProjectViewBuilder};

/// The three kinds of page on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// The project gallery, also the home page.
    List,
    Detail,
    About,
}

/// How pages address each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// `/project-detail.html?project=<slug>`, for pages rendered on request.
    #[default]
    Query,
    /// `/project-detail/<slug>.html`, for pages written to disk ahead of time.
    Files,
}

impl LinkStyle {
    pub fn list(self) -> String {
        "/index.html".to_string()
    }

    pub fn about(self) -> String {
        "/about.html".to_string()
    }

    pub fn detail(self, slug: &str) -> String {
        let slug: String = url::form_urlencoded::byte_serialize(slug.as_bytes()).collect();
        match self {
            LinkStyle::Query => format!("/project-detail.html?project={slug}"),
            LinkStyle::Files => format!("/project-detail/{slug}.html"),
        }
    }

    /// Link to the about page, scrolled to `anchor`.
    pub fn about_anchor(self, anchor: &str) -> String {
        format!("{}#{anchor}", self.about())
    }
}
