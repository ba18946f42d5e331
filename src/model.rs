//! Content records as they come out of the CMS.
//!
//! The CMS is loose about shapes: optional fields arrive as `null`, years may
//! be numbers or strings, media may be a single object or a list. The
//! deserializers here absorb those irregularities so the view builders only
//! ever see well-typed values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A portfolio project, addressed by its `slug`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default)]
    pub material: Option<String>,
    /// Markdown.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<MediaField>,
    /// Slides in render order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<Slide>,
}

/// One unit of project media, tagged by the CMS component name.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__component")]
pub enum Slide {
    #[serde(rename = "content.image-slide")]
    Image(ImageSlide),
    #[serde(rename = "content.video-slide")]
    Video(VideoSlide),
    /// A component this renderer doesn't know. Keeps its place in the
    /// sequence and renders as an empty image.
    #[serde(other)]
    Unknown,
}

impl Slide {
    pub fn caption(&self) -> Option<&str> {
        match self {
            Slide::Image(slide) => slide.caption.as_deref(),
            Slide::Video(slide) => slide.caption.as_deref(),
            Slide::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSlide {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image: Option<MediaField>,
}

/// Either a local upload or an external Vimeo video. Neither is fine too, the
/// slide just renders empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSlide {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub video: Option<MediaField>,
    #[serde(default)]
    pub vimeo_url: Option<String>,
}

impl VideoSlide {
    /// The Vimeo address, if one was actually filled in.
    pub fn vimeo(&self) -> Option<&str> {
        self.vimeo_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// A single media object. `url` is absolute or relative to the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub mime: Option<String>,
}

impl MediaRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Media fields can hold one object or a list of them; the first one is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MediaField {
    Many(Vec<MediaRef>),
    One(MediaRef),
}

impl MediaField {
    pub fn canonical(&self) -> Option<&MediaRef> {
        match self {
            MediaField::Many(list) => list.first(),
            MediaField::One(one) => Some(one),
        }
    }

    /// Whether the canonical media is a video, judged by its MIME type.
    pub fn is_video(&self) -> bool {
        self.canonical()
            .and_then(|media| media.mime.as_deref())
            .is_some_and(|mime| mime.starts_with("video"))
    }
}

impl From<MediaRef> for MediaField {
    fn from(value: MediaRef) -> Self {
        MediaField::One(value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AboutPage {
    /// Markdown.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cv: Vec<CvSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CvSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub heading: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<CvEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default)]
    pub info: Option<String>,
    /// Markdown.
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub link_target: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_live: bool,
    #[serde(default)]
    pub live_label: Option<String>,
    #[serde(default)]
    pub live_start_date: Option<String>,
    #[serde(default)]
    pub live_end_date: Option<String>,
}

impl CvEntry {
    pub fn target(&self) -> LinkTarget {
        self.link_target
            .as_deref()
            .map(LinkTarget::parse)
            .unwrap_or_default()
    }
}

/// Browsing context a link opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkTarget {
    /// `_self`
    Same,
    /// `_blank`
    #[default]
    New,
}

impl LinkTarget {
    pub fn parse(value: &str) -> Self {
        match value {
            "_self" => LinkTarget::Same,
            _ => LinkTarget::New,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkTarget::Same => "_self",
            LinkTarget::New => "_blank",
        }
    }
}

/// The consolidated document served in static mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub about: Option<AboutPage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// `None` when missing or unreadable; only ever informational.
    #[serde(rename = "generatedAt", default, deserialize_with = "lenient_timestamp")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|time| time.with_timezone(&Utc)))
}

/// Accept strings, numbers and booleans as text, `null` as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
