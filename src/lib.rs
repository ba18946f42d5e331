#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod config;
mod error;
pub mod interact;
mod io;
pub mod live;
pub mod md;
pub mod media;
pub mod model;
pub mod page;
#[cfg(feature = "server")]
pub mod server;
pub mod source;
pub mod view;

use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Datelike, NaiveDateTime};
use console::style;
use indicatif::ProgressBar;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, warn};

pub use crate::config::{Config, Mode};
pub use crate::error::*;
use crate::media::MediaResolver;
use crate::page::{Layout, Page};
use crate::source::ContentSource;
use crate::view::about::announcement;
use crate::view::{AboutViewBuilder, LinkStyle, ProjectViewBuilder};

/// Address of a page on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The project list, also the home page.
    List,
    /// A project page. `None` when the request carried no slug at all.
    Detail(Option<String>),
    About,
}

impl Route {
    /// Where the page lives in a built site.
    pub fn file(&self) -> Utf8PathBuf {
        match self {
            Route::List => "index.html".into(),
            Route::About => "about.html".into(),
            Route::Detail(Some(slug)) => format!("project-detail/{slug}.html").into(),
            Route::Detail(None) => "project-detail.html".into(),
        }
    }
}

/// The portfolio: one content source, chosen at startup, and everything
/// needed to turn its records into pages.
pub struct Site {
    source: Box<dyn ContentSource>,
    resolver: MediaResolver,
    links: LinkStyle,
}

impl Site {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let source = source::from_config(config)?;
        Ok(Self::with_source(source, &config.api_base))
    }

    /// A site over an arbitrary source. Relative media URLs are resolved
    /// against `api_base`.
    pub fn with_source(source: Box<dyn ContentSource>, api_base: &str) -> Self {
        Self {
            source,
            resolver: MediaResolver::new(api_base),
            links: LinkStyle::Query,
        }
    }

    pub fn with_links(mut self, links: LinkStyle) -> Self {
        self.links = links;
        self
    }

    /// Render `route` as of now, local time.
    pub fn render(&self, route: &Route) -> Page {
        self.render_at(route, live::now())
    }

    pub fn render_at(&self, route: &Route, now: NaiveDateTime) -> Page {
        self.page(route, now, self.links)
    }

    fn page(&self, route: &Route, now: NaiveDateTime, links: LinkStyle) -> Page {
        let year = now.year();

        match route {
            Route::List => {
                let live = self
                    .source
                    .get_about()
                    .and_then(|about| announcement(&about, now));
                let mut projects = self.source.list_projects();
                // a built site only has files for these
                if links == LinkStyle::Files {
                    projects.retain(|project| is_file_safe(&project.slug));
                }
                let items = ProjectViewBuilder::new(&self.resolver).build_list(&projects);

                let layout = Layout {
                    links,
                    year,
                    announcement: live.as_ref(),
                };
                page::render_list(&items, &layout)
            }
            Route::Detail(slug) => {
                let view = slug
                    .as_deref()
                    .filter(|slug| !slug.is_empty())
                    .and_then(|slug| self.source.get_project_by_slug(slug))
                    .map(|project| ProjectViewBuilder::new(&self.resolver).build_detail(&project));

                let layout = Layout {
                    links,
                    year,
                    announcement: None,
                };
                page::render_detail(view.as_ref(), &layout)
            }
            Route::About => {
                let view = self
                    .source
                    .get_about()
                    .map(|about| AboutViewBuilder::new(now).build(&about));

                let layout = Layout {
                    links,
                    year,
                    announcement: view.as_ref().and_then(|view| view.live.as_ref()),
                };
                page::render_about(view.as_ref(), &layout)
            }
        }
    }

    /// Write the whole site to `dist`: public assets, the list and about
    /// pages, and one page per project. Live announcements are frozen at the
    /// time of the build. Returns the number of pages written.
    pub fn build(&self, dist: &Utf8Path, public: &Utf8Path) -> Result<usize, BuildError> {
        eprintln!(
            "Running {} in {} mode.",
            style("folio").red(),
            style("build").blue()
        );

        io::clear_dist(dist)?;
        io::copy_public(public, dist)?;

        let s = Instant::now();
        let now = live::now();

        let mut routes = vec![Route::List, Route::About];
        for project in self.source.list_projects() {
            if is_file_safe(&project.slug) {
                routes.push(Route::Detail(Some(project.slug)));
            } else {
                warn!(slug = %project.slug, "skipping project, slug can't be used as a file name");
            }
        }

        let pb = ProgressBar::new(routes.len() as u64).with_style(io::PROGRESS_STYLE.clone());
        pb.set_message("Rendering pages...");

        routes
            .par_iter()
            .try_for_each(|route| -> Result<_, BuildError> {
                let page = self.page(route, now, LinkStyle::Files);
                if !page.found {
                    warn!(path = %route.file(), "writing placeholder page");
                }

                io::write_page(dist, &route.file(), &page.html)?;
                pb.inc(1);

                Ok(())
            })?;

        pb.finish_with_message(format!("Rendered pages {}", io::as_overhead(s)));
        info!(pages = routes.len(), %dist, "build finished");

        Ok(routes.len())
    }
}

fn is_file_safe(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::model::{AboutPage, CvEntry, CvSection, ImageSlide, MediaRef, Project, Slide, Snapshot};
    use crate::source::SnapshotSource;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-06-10 15:00", "%Y-%m-%d %H:%M").unwrap()
    }

    fn snapshot() -> Snapshot {
        let project = |slug: &str, year: &str| Project {
            slug: slug.into(),
            title: slug.to_uppercase(),
            year: year.into(),
            thumbnail: Some(MediaRef::new("/uploads/t.png").into()),
            content: vec![Slide::Image(ImageSlide {
                caption: Some("Installation view".into()),
                image: Some(MediaRef::new("https://cdn/i.png").into()),
            })],
            ..Default::default()
        };

        Snapshot {
            about: Some(AboutPage {
                bio: "Works with *light*".into(),
                cv: vec![CvSection {
                    heading: "Exhibitions".into(),
                    entries: vec![CvEntry {
                        title: "Summer show".into(),
                        year: "2024".into(),
                        is_live: true,
                        live_start_date: Some("2024-06-01".into()),
                        live_end_date: Some("2024-06-30".into()),
                        ..Default::default()
                    }],
                }],
            }),
            projects: vec![project("tide", "2024"), project("dune", "2021"), project("../x", "2020")],
            meta: None,
        }
    }

    fn site() -> Site {
        Site::with_source(Box::new(SnapshotSource::preloaded(snapshot())), "http://cms")
    }

    #[test]
    fn test_list_page() {
        let page = site().render_at(&Route::List, now());
        assert!(page.found);
        assert!(page.html.contains("/project-detail.html?project=tide"));
        assert!(page.html.contains("http://cms/uploads/t.png"));
        assert!(page.html.contains("Live Exhibition"));
        assert!(page.html.contains("<span id=\"copyright-year\">2024</span>"));
    }

    #[test]
    fn test_announcement_expires() {
        let later = NaiveDateTime::parse_from_str("2024-07-01 00:00", "%Y-%m-%d %H:%M").unwrap();
        let page = site().render_at(&Route::List, later);
        assert!(!page.html.contains("live-exhibition-indicator"));
    }

    #[test]
    fn test_detail_page() {
        let site = site();
        let page = site.render_at(&Route::Detail(Some("dune".into())), now());
        assert!(page.found);
        assert!(page.html.contains("<h2 class=\"project-title\">DUNE, <span>2021</span></h2>"));
        assert!(!page.html.contains("live-exhibition-indicator"));

        assert!(!site.render_at(&Route::Detail(Some("nope".into())), now()).found);
        assert!(!site.render_at(&Route::Detail(Some(String::new())), now()).found);
        assert!(!site.render_at(&Route::Detail(None), now()).found);
    }

    #[test]
    fn test_about_page() {
        let page = site().render_at(&Route::About, now());
        assert!(page.found);
        assert!(page.html.contains("Works with <em>light</em>"));
        assert!(page.html.contains("id=\"live-news-target\""));

        let empty = Site::with_source(Box::new(SnapshotSource::preloaded(Snapshot::default())), "http://cms");
        assert!(!empty.render_at(&Route::About, now()).found);
        assert!(!empty.render_at(&Route::List, now()).found);
    }

    #[test]
    fn test_build_writes_every_page() {
        let root = Utf8PathBuf::from_path_buf(
            std::env::temp_dir().join(format!("folio-build-{}", std::process::id())),
        )
        .unwrap();
        let dist = root.join("dist");
        let public = root.join("public");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("style.css"), "body{}").unwrap();

        let written = site().build(&dist, &public).unwrap();
        assert_eq!(written, 4);

        assert!(dist.join("style.css").is_file());
        assert!(dist.join("about.html").is_file());
        assert!(dist.join("project-detail/dune.html").is_file());
        let index = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(index.contains("/project-detail/tide.html"));

        let links: Vec<&str> = index
            .split("href=\"/project-detail/")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert_eq!(links, ["tide.html", "dune.html"]);
        for link in links {
            assert!(dist.join("project-detail").join(link).is_file(), "{link}");
        }

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_route_files() {
        assert_eq!(Route::List.file(), "index.html");
        assert_eq!(Route::Detail(Some("tide".into())).file(), "project-detail/tide.html");
        assert!(is_file_safe("tide-2024"));
        assert!(!is_file_safe("../x"));
        assert!(!is_file_safe(""));
    }
}
