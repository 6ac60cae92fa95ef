//! # Catalog Loading
//!
//! The spell and tag datasets are fetched once per session and kept as an immutable
//! [`Library`] snapshot afterwards. This is the only asynchronous part of the crate.
//!
//! A dataset comes from a [`DataSource`]: a local file, or an `http://` / `https://` URL.
//! Loading has two distinct failure modes:
//!
//! - [`FetchError`]: the body could not be obtained (transport failure, non-2xx status,
//!   unreadable file) or is not JSON at all.
//! - [`ValidationError`](crate::schema::ValidationError): the JSON parsed but does not
//!   have the dataset shape.
//!
//! Nothing is retried. A failed load is reported once and the caller decides what to show.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SagaConfig;
use crate::error::{FetchError, Result};
use crate::model::{sort_by_name, Spell};
use crate::schema;
use crate::tags::TagSet;

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched over HTTP, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Http(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        DataSource::parse(location)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(url) => f.write_str(url),
        }
    }
}

/// The validated spell dataset, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    spells: Vec<Spell>,
}

impl Catalog {
    pub fn new(mut spells: Vec<Spell>) -> Self {
        sort_by_name(&mut spells);
        Self { spells }
    }

    pub fn from_json(raw: &Value) -> std::result::Result<Self, schema::ValidationError> {
        schema::validate(raw).map(Self::new)
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn get(&self, spell_name: &str) -> Option<&Spell> {
        self.spells
            .binary_search_by(|s| s.spell_name.as_str().cmp(spell_name))
            .ok()
            .map(|i| &self.spells[i])
    }

    /// Distinct classes present, sorted. The options of the class filter.
    pub fn classes(&self) -> Vec<String> {
        distinct(self.spells.iter().map(|s| s.spell_class.as_str()))
    }

    /// Distinct schools present, sorted. The options of the school filter.
    pub fn schools(&self) -> Vec<String> {
        distinct(self.spells.iter().map(|s| s.school.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Everything loaded at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    pub catalog: Catalog,
    pub tags: TagSet,
}

/// Fetches and validates datasets.
#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl Loader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn from_config(config: &SagaConfig) -> Self {
        Self::new(Duration::from_secs(config.fetch_timeout_secs))
    }

    /// Reads the source and parses it as JSON, without checking its shape.
    pub async fn fetch_json(&self, source: &DataSource) -> std::result::Result<Value, FetchError> {
        let origin = source.to_string();
        let body = match source {
            DataSource::File(path) => {
                tracing::debug!(path = %path.display(), "reading dataset file");
                tokio::fs::read(path).await.map_err(|e| FetchError::Read {
                    path: origin.clone(),
                    source: e,
                })?
            }
            DataSource::Http(url) => {
                tracing::debug!(url = %url, "fetching dataset");
                let resp = self
                    .client
                    .get(url)
                    .timeout(self.timeout)
                    .send()
                    .await
                    .map_err(|e| FetchError::Transport {
                        url: url.clone(),
                        source: e,
                    })?;

                if !resp.status().is_success() {
                    return Err(FetchError::Status {
                        url: url.clone(),
                        status: resp.status().as_u16(),
                    });
                }

                resp.bytes()
                    .await
                    .map_err(|e| FetchError::Transport {
                        url: url.clone(),
                        source: e,
                    })?
                    .to_vec()
            }
        };

        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed { origin, source: e })
    }

    pub async fn load_spells(&self, source: &DataSource) -> Result<Catalog> {
        let raw = self.fetch_json(source).await?;
        let catalog = Catalog::from_json(&raw)?;
        tracing::info!(source = %source, count = catalog.len(), "loaded spell dataset");
        Ok(catalog)
    }

    pub async fn load_tags(&self, source: &DataSource) -> Result<TagSet> {
        let raw = self.fetch_json(source).await?;
        let tags = TagSet::from_json(&raw)?;
        tracing::info!(source = %source, count = tags.len(), "loaded tag dataset");
        Ok(tags)
    }

    /// Loads both datasets concurrently. Fails if either fails.
    pub async fn load_library(&self, spells: &DataSource, tags: &DataSource) -> Result<Library> {
        let (catalog, tags) = tokio::try_join!(self.load_spells(spells), self.load_tags(tags))?;
        Ok(Library { catalog, tags })
    }
}
