use chrono::Utc;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::SourceError;
use crate::model::{AboutPage, Meta, Project};
use crate::source::ContentSource;

const ABOUT: &str = "api/about-page";
const PROJECTS: &str = "api/projects";

/// Queries the CMS directly, one request per call. Nothing is cached.
pub struct ApiSource {
    base: Url,
    client: Client,
    token: Option<String>,
}

/// Every CMS response wraps its payload in `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// The consolidated document written by the snapshot step. Records are kept
/// exactly as the CMS returned them.
#[derive(Debug, Serialize)]
pub struct RawSnapshot {
    pub about: Value,
    pub projects: Value,
    pub meta: Meta,
}

impl ApiSource {
    pub fn new(base: &str) -> Result<Self, SourceError> {
        let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;
        let client = Client::builder().build()?;

        Ok(Self {
            base,
            client,
            token: None,
        })
    }

    /// Send a bearer token with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SourceError> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn about_url(&self) -> Result<Url, SourceError> {
        self.endpoint(ABOUT, &[("populate[cv][populate]", "*")])
    }

    fn list_url(&self) -> Result<Url, SourceError> {
        self.endpoint(PROJECTS, &[("populate", "thumbnail"), ("sort", "year:desc")])
    }

    fn detail_url(&self, slug: &str) -> Result<Url, SourceError> {
        self.endpoint(
            PROJECTS,
            &[
                ("filters[slug][$eq]", slug),
                ("populate[content][populate]", "*"),
            ],
        )
    }

    fn snapshot_url(&self) -> Result<Url, SourceError> {
        self.endpoint(
            PROJECTS,
            &[
                ("populate[thumbnail]", "true"),
                ("populate[content][populate]", "*"),
                ("sort", "year:desc"),
                ("pagination[pageSize]", "100"),
            ],
        )
    }

    /// GET `url` and unwrap the envelope. A `null` payload is `Ok(None)`.
    fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, SourceError> {
        debug!(%url, "fetching from content API");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response.text()?;
        decode(&body)
    }

    /// Fetch, logging and swallowing any failure.
    fn fetch_quiet<T: DeserializeOwned>(&self, url: Result<Url, SourceError>) -> Option<T> {
        match url.and_then(|url| self.fetch(url)) {
            Ok(data) => data,
            Err(err) => {
                warn!("fetch API error: {err}");
                None
            }
        }
    }

    /// Pull the about page and every project into one document. Unlike the
    /// regular methods this fails loudly: a partial snapshot is worse than none.
    pub fn fetch_snapshot(&self) -> Result<RawSnapshot, SourceError> {
        let about = self.fetch::<Value>(self.about_url()?)?.unwrap_or(Value::Null);
        let projects = self
            .fetch::<Value>(self.snapshot_url()?)?
            .ok_or(SourceError::Empty)?;

        Ok(RawSnapshot {
            about,
            projects,
            meta: Meta {
                generated_at: Some(Utc::now()),
            },
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<Option<T>, SourceError> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

impl ContentSource for ApiSource {
    fn get_about(&self) -> Option<AboutPage> {
        self.fetch_quiet(self.about_url())
    }

    fn list_projects(&self) -> Vec<Project> {
        self.fetch_quiet(self.list_url()).unwrap_or_default()
    }

    fn get_project_by_slug(&self, slug: &str) -> Option<Project> {
        if slug.is_empty() {
            return None;
        }

        self.fetch_quiet::<Vec<Project>>(self.detail_url(slug))?
            .into_iter()
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_about_query() {
        let source = ApiSource::new("http://192.168.1.131:1337").unwrap();
        let url = source.about_url().unwrap();
        assert_eq!(url.path(), "/api/about-page");
        assert_eq!(pairs(&url), [pair("populate[cv][populate]", "*")]);
    }

    #[test]
    fn test_list_query() {
        let source = ApiSource::new("http://h/").unwrap();
        let url = source.list_url().unwrap();
        assert_eq!(url.path(), "/api/projects");
        assert_eq!(
            pairs(&url),
            [pair("populate", "thumbnail"), pair("sort", "year:desc")]
        );
    }

    #[test]
    fn test_detail_query_encodes_slug() {
        let source = ApiSource::new("http://h").unwrap();
        let url = source.detail_url("a&b").unwrap();
        assert_eq!(
            pairs(&url),
            [
                pair("filters[slug][$eq]", "a&b"),
                pair("populate[content][populate]", "*"),
            ]
        );
    }

    #[test]
    fn test_base_with_path() {
        let source = ApiSource::new("https://example.com/cms").unwrap();
        let url = source.list_url().unwrap();
        assert_eq!(url.path(), "/cms/api/projects");
    }

    #[test]
    fn test_decode_envelope() {
        let projects: Option<Vec<Project>> =
            decode(r#"{ "data": [{ "slug": "a", "title": "A", "year": 2021 }], "meta": {} }"#)
                .unwrap();
        assert_eq!(projects.unwrap()[0].year, "2021");

        let about: Option<AboutPage> = decode(r#"{ "data": null }"#).unwrap();
        assert!(about.is_none());

        assert!(decode::<AboutPage>("<html>").is_err());
    }

    #[test]
    fn test_unreachable_api_is_empty() {
        // port 9 (discard) on localhost is not expected to speak HTTP
        let source = ApiSource::new("http://127.0.0.1:9").unwrap();
        assert!(source.list_projects().is_empty());
        assert!(source.get_about().is_none());
        assert!(source.get_project_by_slug("").is_none());
    }
}
