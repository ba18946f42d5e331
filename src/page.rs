//! HTML for the three pages.
//!
//! Markup is assembled with `format!`. Text fields from the CMS are escaped;
//! fields that already went through [`crate::md`] are inserted as is, the
//! content source is trusted.

use std::fmt::Write;

use crate::view::about::{EntryView, SectionView};
use crate::view::project::{FigureItem, FigureMedia, MediaKind, ThumbnailItem, ThumbnailMedia};
use crate::view::{AboutView, DetailView, LinkStyle, ListItem, LiveAnnouncement, PageKind};

const FULLSCREEN_ICON: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M8 3H3v5m13-5h5v5M3 16v5h5m13-5v5h-5"></path></svg>"#;

/// Stands in for media that resolved to nothing, so no `src` is ever empty.
const EMPTY_MEDIA: &str = "<div class=\"media-empty\"></div>";

/// A rendered page.
#[derive(Debug, Clone)]
pub struct Page {
    pub kind: PageKind,
    pub html: String,
    /// `false` when the page shows a not-found placeholder.
    pub found: bool,
}

/// Page chrome shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub links: LinkStyle,
    /// Copyright year.
    pub year: i32,
    pub announcement: Option<&'a LiveAnnouncement>,
}

impl Layout<'_> {
    fn wrap(&self, kind: PageKind, title: &str, body: &str) -> String {
        let body_class = match kind {
            PageKind::List => "list-page",
            PageKind::Detail => "project-detail-page",
            PageKind::About => "about-page",
        };

        let indicator = self
            .announcement
            .filter(|announcement| announcement.visible_on(kind))
            .map(|announcement| {
                format!(
                    "<div class=\"live-exhibition-indicator\"><div class=\"marquee-content\">{}</div></div>",
                    announcement_fragment(announcement, self.links)
                )
            })
            .unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/style.css\">\n</head>\n\
             <body class=\"{body_class}\">\n\
             <nav class=\"nav-wrapper\"><a href=\"{list}\">Projects</a><a href=\"{about}\">About</a></nav>\n\
             {indicator}\n<main>\n{body}\n</main>\n\
             <footer>&copy; <span id=\"copyright-year\">{year}</span></footer>\n\
             <script src=\"/script.js\" defer></script>\n</body>\n</html>\n",
            title = escape(title),
            list = self.links.list(),
            about = self.links.about(),
            year = self.year,
        )
    }
}

/// Dot plus link, the unit the marquee repeats.
pub fn announcement_fragment(announcement: &LiveAnnouncement, links: LinkStyle) -> String {
    format!(
        "<div class=\"breathing-dot\"></div><a href=\"{}\" target=\"{}\">{}</a>",
        links.about_anchor(announcement.anchor),
        announcement.target.as_str(),
        escape(&announcement.label),
    )
}

pub fn render_list(items: &[ListItem], layout: &Layout) -> Page {
    let body = match items.is_empty() {
        true => "<div class=\"container-projects\"><p>No projects found.</p></div>".to_string(),
        false => {
            let mut html = String::from("<div class=\"container-projects\">");
            for item in items {
                let media = match item.kind {
                    _ if item.thumbnail.is_empty() => EMPTY_MEDIA.to_string(),
                    MediaKind::Video => format!(
                        "<video src=\"{}\" muted loop autoplay playsinline></video>",
                        escape(&item.thumbnail)
                    ),
                    MediaKind::Image => format!(
                        "<img src=\"{}\" alt=\"{}\">",
                        escape(&item.thumbnail),
                        escape(&item.title)
                    ),
                };
                let _ = write!(
                    html,
                    "<a href=\"{}\" class=\"project\">{media}<h3>{}, <span>{}</span></h3></a>",
                    layout.links.detail(&item.slug),
                    escape(&item.title),
                    escape(&item.year),
                );
            }
            html.push_str("</div>");
            html
        }
    };

    Page {
        kind: PageKind::List,
        html: layout.wrap(PageKind::List, "Projects", &body),
        found: !items.is_empty(),
    }
}

pub fn render_detail(view: Option<&DetailView>, layout: &Layout) -> Page {
    let Some(view) = view else {
        return Page {
            kind: PageKind::Detail,
            html: layout.wrap(
                PageKind::Detail,
                "Not found",
                "<div class=\"project-container\"><p>Project not found.</p></div>",
            ),
            found: false,
        };
    };

    let mut figures = String::from("<div class=\"project-images\">");
    for figure in &view.figures {
        figures.push_str(&figure_html(figure, &view.title));
    }
    figures.push_str("</div>");

    let mut thumbnails = String::from("<div class=\"thumbnail-grid\">");
    for thumbnail in &view.thumbnails {
        thumbnails.push_str(&thumbnail_html(thumbnail));
    }
    thumbnails.push_str("</div>");

    let mut captions = String::new();
    if !view.captions.is_empty() {
        captions.push_str("<ol class=\"project-caption-list\">");
        for caption in &view.captions {
            let _ = write!(
                captions,
                "<li id=\"caption-{n}\"><span class=\"caption-number\">{n}.</span><span class=\"caption-text\">{}</span></li>",
                escape(&caption.text),
                n = caption.number,
            );
        }
        captions.push_str("</ol>");
    }

    let body = format!(
        "<div class=\"project-container\">\
         <h2 class=\"project-title\">{title}, <span>{year}</span></h2>\
         {figures}\
         <div class=\"project-info-content\">\
         <div class=\"project-description\"><span>Description</span><p>{description}</p></div>\
         <div class=\"project-material\"><span>Material</span><p>{material}</p></div>\
         <div class=\"project-thumbnails\" data-library=\"{variant}\"><span>{label}</span>{thumbnails}</div>\
         {captions}</div></div>",
        title = escape(&view.title),
        year = escape(&view.year),
        description = view.description,
        material = escape(&view.material),
        variant = view.media_label.as_str(),
        label = view.media_label.label(),
    );

    Page {
        kind: PageKind::Detail,
        html: layout.wrap(PageKind::Detail, &view.title, &body),
        found: true,
    }
}

fn figure_html(figure: &FigureItem, title: &str) -> String {
    let caption = figure
        .caption
        .as_deref()
        .map(|text| format!("<figcaption>{}</figcaption>", escape(text)))
        .unwrap_or_default();

    match &figure.media {
        FigureMedia::Image { src } | FigureMedia::Video { src } | FigureMedia::Vimeo { embed: src }
            if src.is_empty() =>
        {
            format!(
                "<figure><div id=\"{id}\" class=\"media-empty\"></div>{caption}</figure>",
                id = figure.id,
            )
        }
        FigureMedia::Image { src } => format!(
            "<figure><img id=\"{id}\" src=\"{src}\" alt=\"{alt} detail\">{caption}</figure>",
            id = figure.id,
            src = escape(src),
            alt = escape(title),
        ),
        FigureMedia::Video { src } => format!(
            "<figure class=\"video-container\">\
             <video id=\"{id}\" src=\"{src}\" playsinline autoplay muted loop></video>\
             <div class=\"video-controls\">\
             <button class=\"play-pause-btn\">Stop</button>\
             <button class=\"mute-btn\">Unmute</button>\
             <input type=\"range\" class=\"video-timeline\" value=\"0\" min=\"0\" step=\"0.1\">\
             <span class=\"video-duration\">0:00 / 0:00</span>\
             <button class=\"fullscreen-btn\" aria-label=\"Fullscreen\">{FULLSCREEN_ICON}</button>\
             </div>{caption}</figure>",
            id = figure.id,
            src = escape(src),
        ),
        FigureMedia::Vimeo { embed } => format!(
            "<figure class=\"video-container vimeo-container\">\
             <iframe id=\"{id}\" src=\"{src}\" frameborder=\"0\" allow=\"autoplay; fullscreen; picture-in-picture\"></iframe>\
             {caption}</figure>",
            id = figure.id,
            src = escape(embed),
        ),
    }
}

fn thumbnail_html(thumbnail: &ThumbnailItem) -> String {
    let target = &thumbnail.target;
    let media = match &thumbnail.media {
        ThumbnailMedia::Image { src } | ThumbnailMedia::Video { src } if src.is_empty() => {
            format!("<div class=\"media-empty\" data-target=\"{target}\"></div>")
        }
        ThumbnailMedia::Image { src } => format!(
            "<img src=\"{}\" alt=\"Thumbnail\" data-target=\"{target}\">",
            escape(src)
        ),
        ThumbnailMedia::Video { src } => format!(
            "<video src=\"{}\" muted loop autoplay playsinline data-target=\"{target}\"></video>",
            escape(src)
        ),
        ThumbnailMedia::VimeoPlaceholder => {
            format!("<div class=\"vimeo-thumb-placeholder\" data-target=\"{target}\">Vimeo</div>")
        }
    };

    let number = thumbnail
        .number
        .map(|n| format!("<span class=\"thumbnail-number\" data-caption=\"caption-{n}\">{n}</span>"))
        .unwrap_or_default();

    format!("<div class=\"thumbnail-wrapper\">{media}{number}</div>")
}

pub fn render_about(view: Option<&AboutView>, layout: &Layout) -> Page {
    let body = match view {
        Some(view) => {
            let mut cv = String::from("<div class=\"cv-container\">");
            for section in &view.sections {
                cv.push_str(&section_html(section));
            }
            cv.push_str("</div>");

            format!(
                "<div class=\"about-content\"><span class=\"h1-spacer\"></span>\
                 <span class=\"about-text\">{}</span>{cv}</div>\
                 <div id=\"fixed-cv-heading\"></div>",
                view.bio
            )
        }
        None => "<div class=\"about-content\"></div>".to_string(),
    };

    Page {
        kind: PageKind::About,
        html: layout.wrap(PageKind::About, "About", &body),
        found: view.is_some(),
    }
}

fn section_html(section: &SectionView) -> String {
    let heading = escape(&section.heading);
    let entries: String = section.entries.iter().map(entry_html).collect();
    format!(
        "<div class=\"cv-section\" data-heading=\"{heading}\"><h2 class=\"cv-heading\">{heading}</h2>{entries}</div>"
    )
}

fn entry_html(entry: &EntryView) -> String {
    let id = entry
        .anchor
        .map(|anchor| format!(" id=\"{anchor}\""))
        .unwrap_or_default();

    let dot = match entry.is_live {
        true => "<span class=\"breathing-dot cv-dot-spacer\"></span>",
        false => "",
    };

    let details = match entry.details.is_empty() {
        true => String::new(),
        false => format!("<span class=\"cv-info details\">{}</span>", entry.details),
    };

    let link = entry
        .link
        .as_ref()
        .map(|link| {
            format!(
                "<a href=\"{}\" target=\"{}\" class=\"cv-visit-link\">{}</a>",
                escape(&link.href),
                link.target.as_str(),
                escape(&link.text)
            )
        })
        .unwrap_or_default();

    format!(
        "<div class=\"cv-entry\"{id}><span class=\"cv-year\">{}</span>\
         <span class=\"cv-title\">{dot}{}</span><span class=\"cv-info\">{}</span>{details}{link}</div>",
        escape(&entry.year),
        escape(&entry.title),
        escape(&entry.info),
    )
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::media::MediaResolver;
    use crate::model::{AboutPage, CvEntry, CvSection, ImageSlide, MediaRef, Project, Slide, VideoSlide};
    use crate::view::{AboutViewBuilder, ProjectViewBuilder};

    fn layout(announcement: Option<&LiveAnnouncement>) -> Layout<'_> {
        Layout {
            links: LinkStyle::Files,
            year: 2024,
            announcement,
        }
    }

    fn about() -> AboutView {
        let now = NaiveDateTime::parse_from_str("2024-03-01 09:00", "%Y-%m-%d %H:%M").unwrap();
        AboutViewBuilder::new(now).build(&AboutPage {
            bio: "**Artist** based somewhere".into(),
            cv: vec![CvSection {
                heading: "Solo <Shows>".into(),
                entries: vec![CvEntry {
                    title: "Tide".into(),
                    year: "2024".into(),
                    is_live: true,
                    live_label: Some("On view now".into()),
                    ..Default::default()
                }],
            }],
        })
    }

    #[test]
    fn test_empty_list_placeholder() {
        let page = render_list(&[], &layout(None));
        assert!(!page.found);
        assert!(page.html.contains("<div class=\"container-projects\"><p>No projects found.</p></div>"));
        assert!(page.html.contains("<span id=\"copyright-year\">2024</span>"));
    }

    #[test]
    fn test_announcement_on_list_only() {
        let view = about();
        let announcement = view.live.as_ref();

        let list = render_list(&[], &layout(announcement));
        assert!(list.html.contains("live-exhibition-indicator"));
        assert!(list.html.contains(
            "<a href=\"/about.html#live-news-target\" target=\"_self\">On view now</a>"
        ));

        let about = render_about(Some(&view), &layout(announcement));
        assert!(!about.html.contains("live-exhibition-indicator"));
        let detail = render_detail(None, &layout(announcement));
        assert!(!detail.html.contains("live-exhibition-indicator"));
    }

    #[test]
    fn test_about_markup() {
        let view = about();
        let page = render_about(Some(&view), &layout(None));
        assert!(page.found);
        assert!(page.html.contains("<strong>Artist</strong> based somewhere"));
        assert!(page.html.contains("data-heading=\"Solo &lt;Shows&gt;\""));
        assert!(page.html.contains(
            "<div class=\"cv-entry\" id=\"live-news-target\"><span class=\"cv-year\">Currently</span>"
        ));
        assert!(page.html.contains("cv-dot-spacer"));

        let missing = render_about(None, &layout(None));
        assert!(!missing.found);
        assert!(missing.html.contains("<div class=\"about-content\"></div>"));
    }

    #[test]
    fn test_detail_markup() {
        let slide = |caption: &str| {
            Slide::Image(ImageSlide {
                caption: Some(caption.into()),
                image: Some(MediaRef::new("/a.png").into()),
            })
        };
        let project = Project {
            slug: "tide".into(),
            title: "Tide".into(),
            year: "2023".into(),
            content: vec![slide(""), slide("A & B")],
            ..Default::default()
        };
        let view = ProjectViewBuilder::new(&MediaResolver::new("http://h")).build_detail(&project);
        let page = render_detail(Some(&view), &layout(None));

        assert!(page.found);
        assert!(page.html.contains("<img id=\"project-item-1\" src=\"http://h/a.png\""));
        assert!(page.html.contains("<figcaption>A &amp; B</figcaption>"));
        assert!(page.html.contains("<span class=\"thumbnail-number\" data-caption=\"caption-1\">1</span>"));
        assert_eq!(page.html.matches("thumbnail-number").count(), 1);
        assert!(page.html.contains("<span>Image library</span>"));
        assert!(page.html.contains("<li id=\"caption-1\">"));
    }

    #[test]
    fn test_missing_media_has_no_src() {
        let project = Project {
            slug: "void".into(),
            title: "Void".into(),
            year: "2022".into(),
            thumbnail: None,
            content: vec![
                Slide::Image(ImageSlide::default()),
                Slide::Video(VideoSlide {
                    vimeo_url: Some("https://example.com/x".into()),
                    ..Default::default()
                }),
            ],
            ..Default::default()
        };
        let resolver = MediaResolver::new("http://h");
        let builder = ProjectViewBuilder::new(&resolver);

        let items = builder.build_list(std::slice::from_ref(&project));
        let list = render_list(&items, &layout(None));
        assert!(list.found);
        assert!(list.html.contains("class=\"project\"><div class=\"media-empty\"></div><h3>"));

        let view = builder.build_detail(&project);
        let detail = render_detail(Some(&view), &layout(None));
        assert!(detail.html.contains("<div id=\"project-item-1\" class=\"media-empty\"></div>"));
        assert!(detail.html.contains("<div id=\"project-item-2\" class=\"media-empty\"></div>"));
        assert!(detail.html.contains("<div class=\"media-empty\" data-target=\"project-item-1\"></div>"));

        for html in [&list.html, &detail.html] {
            assert!(!html.contains("src=\"\""));
            assert!(!html.contains("<iframe"));
        }
    }

    #[test]
    fn test_missing_project() {
        let page = render_detail(None, &layout(None));
        assert!(!page.found);
        assert!(page.html.contains("<p>Project not found.</p>"));
    }

    #[test]
    fn test_list_links_follow_style() {
        let item = ListItem {
            slug: "tide".into(),
            title: "Tide".into(),
            year: "2023".into(),
            thumbnail: "https://cdn/t.mp4".into(),
            kind: MediaKind::Video,
        };
        let page = render_list(std::slice::from_ref(&item), &layout(None));
        assert!(page.html.contains("<a href=\"/project-detail/tide.html\" class=\"project\">"));
        assert!(page.html.contains("<video src=\"https://cdn/t.mp4\""));
        assert!(page.html.contains("<h3>Tide, <span>2023</span></h3>"));
    }
}
