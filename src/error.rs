use thiserror::Error;

/// Failure while talking to a content backend. These never cross the
/// [`ContentSource`](crate::source::ContentSource) boundary: every strategy
/// logs them and answers with "nothing to render" instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Couldn't read the snapshot file.\n{0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Malformed JSON document.\n{0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid content API address.\n{0}")]
    Url(#[from] url::ParseError),

    #[cfg(feature = "live")]
    #[error("Request to the content API failed.\n{0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API answered with status {0}")]
    Status(u16),

    #[error("Content API envelope carried no data")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown content mode '{0}', expected 'static' or 'live'")]
    UnknownMode(String),

    #[error("Live mode was requested, but the crate was built without the `live` feature")]
    LiveUnavailable,

    #[error("Invalid content API base '{0}'.\n{1}")]
    ApiBase(String, url::ParseError),

    #[error("Couldn't set up the content API client.\n{0}")]
    Client(#[from] SourceError),
}

#[derive(Debug, Error)]
pub enum ClearError {
    #[error("Failed to remove the output directory.\n{0}")]
    RemoveError(std::io::Error),

    #[error("Failed to create the output directory.\n{0}")]
    CreateError(std::io::Error),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Error while clearing the output directory:\n{0}")]
    Clear(#[from] ClearError),

    #[error("Error while copying public assets:\n{0}")]
    CopyPublic(std::io::Error),

    #[error("Page '{0}':\n{1}")]
    Page(String, std::io::Error),
}

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Invalid configuration.\n{0}")]
    Config(#[from] ConfigError),

    #[error("Error while building the website.\n{0}")]
    Build(#[from] BuildError),

    #[cfg(feature = "server")]
    #[error("HTTP server failed.\n{0}")]
    Server(std::io::Error),
}
