use std::sync::LazyLock;

use regex::Regex;

use crate::md;
use crate::media::MediaResolver;
use crate::model::{Project, Slide};

static VIMEO_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").unwrap());

const VIMEO_PLAYER: &str = "https://player.vimeo.com/video/";
const VIMEO_PARAMS: &str = "autoplay=1&loop=1&autopause=0&muted=1&title=0&byline=0&portrait=0";

/// What kind of element a piece of media needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// One tile on the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Detail-link key.
    pub slug: String,
    pub title: String,
    pub year: String,
    /// Resolved thumbnail, empty when the project has none.
    pub thumbnail: String,
    pub kind: MediaKind,
}

/// Main media element of a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FigureMedia {
    Image { src: String },
    Video { src: String },
    /// Empty `embed` when the Vimeo address had no recognizable id.
    Vimeo { embed: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureItem {
    /// Anchor id, `project-item-<n>` counting from one.
    pub id: String,
    pub media: FigureMedia,
    /// Caption as authored, `None` when empty or blank.
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailMedia {
    Image { src: String },
    Video { src: String },
    VimeoPlaceholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailItem {
    /// Id of the figure this thumbnail scrolls to.
    pub target: String,
    pub media: ThumbnailMedia,
    /// Visible number, present only for captioned items.
    pub number: Option<usize>,
}

/// Entry of the numbered caption list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionItem {
    pub number: usize,
    pub text: String,
    /// Index into [`DetailView::figures`].
    pub figure: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaLabelVariant {
    Image,
    ImageAndVideo,
}

impl MediaLabelVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaLabelVariant::Image => "image",
            MediaLabelVariant::ImageAndVideo => "image+video",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaLabelVariant::Image => "Image library",
            MediaLabelVariant::ImageAndVideo => "Image and Video library",
        }
    }
}

/// Everything the project detail page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub slug: String,
    pub title: String,
    pub year: String,
    /// Rendered markdown.
    pub description: String,
    pub material: String,
    pub figures: Vec<FigureItem>,
    /// Always the same length as `figures`.
    pub thumbnails: Vec<ThumbnailItem>,
    pub captions: Vec<CaptionItem>,
    pub media_label: MediaLabelVariant,
}

impl DetailView {
    /// Caption list entry for the figure at `index`, if it has one.
    pub fn caption_for(&self, index: usize) -> Option<&CaptionItem> {
        self.captions.iter().find(|caption| caption.figure == index)
    }
}

/// Maps raw project records into list and detail view models.
pub struct ProjectViewBuilder<'a> {
    resolver: &'a MediaResolver,
}

impl<'a> ProjectViewBuilder<'a> {
    pub fn new(resolver: &'a MediaResolver) -> Self {
        Self { resolver }
    }

    /// One list item per project, in source order. Sorting is the source's job.
    pub fn build_list(&self, projects: &[Project]) -> Vec<ListItem> {
        projects
            .iter()
            .map(|project| {
                let thumbnail = project.thumbnail.as_ref();
                ListItem {
                    slug: project.slug.clone(),
                    title: project.title.clone(),
                    year: project.year.clone(),
                    thumbnail: self.resolver.resolve(thumbnail),
                    kind: match thumbnail.is_some_and(|media| media.is_video()) {
                        true => MediaKind::Video,
                        false => MediaKind::Image,
                    },
                }
            })
            .collect()
    }

    pub fn build_detail(&self, project: &Project) -> DetailView {
        let mut figures = Vec::with_capacity(project.content.len());
        let mut thumbnails = Vec::with_capacity(project.content.len());
        let mut captions = Vec::new();

        for (index, slide) in project.content.iter().enumerate() {
            let id = format!("project-item-{}", index + 1);

            let (media, thumb) = match slide {
                Slide::Video(video) => match video.vimeo() {
                    Some(url) => {
                        let embed = vimeo_embed(url).unwrap_or_default();
                        (FigureMedia::Vimeo { embed }, ThumbnailMedia::VimeoPlaceholder)
                    }
                    None => {
                        let src = self.resolver.resolve(video.video.as_ref());
                        (
                            FigureMedia::Video { src: src.clone() },
                            ThumbnailMedia::Video { src },
                        )
                    }
                },
                Slide::Image(image) => {
                    let src = self.resolver.resolve(image.image.as_ref());
                    (
                        FigureMedia::Image { src: src.clone() },
                        ThumbnailMedia::Image { src },
                    )
                }
                Slide::Unknown => (
                    FigureMedia::Image { src: String::new() },
                    ThumbnailMedia::Image { src: String::new() },
                ),
            };

            let caption = slide
                .caption()
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string);

            let number = caption.as_ref().map(|text| {
                let number = captions.len() + 1;
                captions.push(CaptionItem {
                    number,
                    text: text.clone(),
                    figure: index,
                });
                number
            });

            thumbnails.push(ThumbnailItem {
                target: id.clone(),
                media: thumb,
                number,
            });
            figures.push(FigureItem { id, media, caption });
        }

        let has_video = project
            .content
            .iter()
            .any(|slide| matches!(slide, Slide::Video(_)));

        DetailView {
            slug: project.slug.clone(),
            title: project.title.clone(),
            year: project.year.clone(),
            description: md::render_opt(project.description.as_deref()),
            material: project.material.clone().unwrap_or_default(),
            figures,
            thumbnails,
            captions,
            media_label: match has_video {
                true => MediaLabelVariant::ImageAndVideo,
                false => MediaLabelVariant::Image,
            },
        }
    }
}

/// Numeric Vimeo id from any address containing `vimeo.com/<digits>`.
pub fn vimeo_id(url: &str) -> Option<&str> {
    VIMEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Player address for a Vimeo page, muted and looping.
pub fn vimeo_embed(url: &str) -> Option<String> {
    vimeo_id(url).map(|id| format!("{VIMEO_PLAYER}{id}?{VIMEO_PARAMS}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageSlide, MediaRef, VideoSlide};

    fn image(caption: &str, url: &str) -> Slide {
        Slide::Image(ImageSlide {
            caption: Some(caption.into()),
            image: Some(MediaRef::new(url).into()),
        })
    }

    fn vimeo(url: &str) -> Slide {
        Slide::Video(VideoSlide {
            vimeo_url: Some(url.into()),
            ..Default::default()
        })
    }

    fn project(content: Vec<Slide>) -> Project {
        Project {
            slug: "tide".into(),
            title: "Tide".into(),
            year: "2023".into(),
            description: Some("**bold** move".into()),
            thumbnail: Some(MediaRef::new("/uploads/t.mp4").with_mime("video/mp4").into()),
            content,
            ..Default::default()
        }
    }

    #[test]
    fn test_numbers_only_captioned_items() {
        let resolver = MediaResolver::new("http://h");
        let view = ProjectViewBuilder::new(&resolver).build_detail(&project(vec![
            image("x", "/a.png"),
            image("", "/b.png"),
            vimeo("https://vimeo.com/123"),
        ]));

        assert_eq!(view.figures.len(), 3);
        assert_eq!(view.thumbnails.len(), 3);

        let numbers: Vec<_> = view.thumbnails.iter().map(|t| t.number).collect();
        assert_eq!(numbers, [Some(1), None, None]);
        assert_eq!(view.captions.len(), 1);
        assert_eq!(view.captions[0].text, "x");
        assert_eq!(view.media_label, MediaLabelVariant::ImageAndVideo);
        assert_eq!(view.media_label.as_str(), "image+video");
    }

    #[test]
    fn test_numbers_skip_gaps() {
        let resolver = MediaResolver::new("http://h");
        let view = ProjectViewBuilder::new(&resolver).build_detail(&project(vec![
            image("   ", "/a.png"),
            image("first", "/b.png"),
            image("", "/c.png"),
            image("second", "/d.png"),
        ]));

        let numbers: Vec<_> = view.thumbnails.iter().map(|t| t.number).collect();
        assert_eq!(numbers, [None, Some(1), None, Some(2)]);
        assert_eq!(view.caption_for(3).map(|c| c.number), Some(2));
        assert_eq!(view.caption_for(0), None);
        assert_eq!(view.figures[0].caption, None);
        assert_eq!(view.media_label, MediaLabelVariant::Image);
    }

    #[test]
    fn test_figure_ids_follow_order() {
        let resolver = MediaResolver::new("http://h");
        let view = ProjectViewBuilder::new(&resolver)
            .build_detail(&project(vec![image("", "/a.png"), image("", "https://cdn/b.png")]));

        assert_eq!(view.figures[0].id, "project-item-1");
        assert_eq!(view.figures[1].id, "project-item-2");
        assert_eq!(view.thumbnails[1].target, "project-item-2");
        assert_eq!(
            view.figures[1].media,
            FigureMedia::Image {
                src: "https://cdn/b.png".into()
            }
        );
        assert_eq!(view.description, "<strong>bold</strong> move");
    }

    #[test]
    fn test_video_slides() {
        let resolver = MediaResolver::new("http://h");
        let local = Slide::Video(VideoSlide {
            caption: Some("clip".into()),
            video: Some(MediaRef::new("/uploads/v.mp4").into()),
            vimeo_url: None,
        });
        let view = ProjectViewBuilder::new(&resolver).build_detail(&project(vec![
            vimeo("https://vimeo.com/76979871"),
            vimeo("https://example.com/nothing"),
            local,
            Slide::Video(VideoSlide::default()),
        ]));

        assert_eq!(
            view.figures[0].media,
            FigureMedia::Vimeo {
                embed: format!("https://player.vimeo.com/video/76979871?{VIMEO_PARAMS}")
            }
        );
        assert_eq!(
            view.figures[1].media,
            FigureMedia::Vimeo {
                embed: String::new()
            }
        );
        assert_eq!(
            view.figures[2].media,
            FigureMedia::Video {
                src: "http://h/uploads/v.mp4".into()
            }
        );
        assert_eq!(view.thumbnails[2].number, Some(1));
        assert_eq!(
            view.figures[3].media,
            FigureMedia::Video { src: String::new() }
        );
        assert_eq!(view.thumbnails[0].media, ThumbnailMedia::VimeoPlaceholder);
    }

    #[test]
    fn test_unknown_slide_keeps_its_place() {
        let resolver = MediaResolver::new("http://h");
        let view = ProjectViewBuilder::new(&resolver).build_detail(&project(vec![
            Slide::Unknown,
            image("after", "/a.png"),
        ]));

        assert_eq!(view.figures.len(), 2);
        assert_eq!(view.figures[1].id, "project-item-2");
        assert_eq!(view.thumbnails[1].number, Some(1));
    }

    #[test]
    fn test_list_items() {
        let resolver = MediaResolver::new("http://h");
        let mut still = project(vec![]);
        still.slug = "still".into();
        still.thumbnail = Some(MediaRef::new("https://cdn/s.jpg").with_mime("image/jpeg").into());
        let mut bare = project(vec![]);
        bare.slug = "bare".into();
        bare.thumbnail = None;

        let items = ProjectViewBuilder::new(&resolver).build_list(&[project(vec![]), still, bare]);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, MediaKind::Video);
        assert_eq!(items[0].thumbnail, "http://h/uploads/t.mp4");
        assert_eq!(items[1].kind, MediaKind::Image);
        assert_eq!(items[1].slug, "still");
        assert_eq!(items[2].thumbnail, "");
        assert_eq!(items[2].kind, MediaKind::Image);
    }

    #[test]
    fn test_list_and_detail_agree() {
        let resolver = MediaResolver::new("http://h");
        let builder = ProjectViewBuilder::new(&resolver);
        let source = project(vec![image("x", "/a.png")]);

        let items = builder.build_list(std::slice::from_ref(&source));
        let detail = builder.build_detail(&source);

        assert_eq!(items[0].title, detail.title);
        assert_eq!(items[0].year, detail.year);
        assert_eq!(items[0].slug, detail.slug);
    }

    #[test]
    fn test_vimeo_id() {
        assert_eq!(vimeo_id("https://vimeo.com/123"), Some("123"));
        assert_eq!(vimeo_id("https://player.vimeo.com/video/99"), None);
        assert_eq!(vimeo_id("vimeo.com/42?h=abc"), Some("42"));
        assert_eq!(vimeo_id(""), None);
    }
}
