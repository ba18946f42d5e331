use crate::model::MediaField;

/// Turns media references into URLs a browser can load.
///
/// Snapshots bake absolute URLs at generation time, while the live CMS hands
/// out paths relative to its own origin. Both are handled here so callers
/// never need to know which mode is active.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    base: String,
}

impl MediaResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a media field into an absolute URL. An empty string means "no
    /// media" and must never be used as a path.
    pub fn resolve(&self, field: Option<&MediaField>) -> String {
        let Some(media) = field.and_then(MediaField::canonical) else {
            return String::new();
        };

        self.resolve_url(&media.url)
    }

    pub fn resolve_url(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }

        if is_absolute(url) {
            return url.to_string();
        }

        if url.starts_with('/') {
            format!("{}{}", self.base, url)
        } else {
            format!("{}/{}", self.base, url)
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}
