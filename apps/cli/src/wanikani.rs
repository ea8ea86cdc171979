//! WaniKani API client: paginated vocabulary retrieval.
//!
//! Fetches `vocabulary` and `kana_vocabulary` subjects for a set of levels
//! and converts them into `VocabItem`s, dropping anything the quiz cannot
//! use (no playable audio, no meanings).

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use kikitori_core::VocabItem;

const BASE_URL: &str = "https://api.wanikani.com/v2";
const PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from the WaniKani API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API returned a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A transport or decoding error occurred.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub struct WaniKaniClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Collection {
    data: Vec<Subject>,
    pages: Pages,
}

#[derive(Deserialize)]
struct Pages {
    next_url: Option<String>,
}

#[derive(Deserialize)]
struct Subject {
    id: i64,
    object: String,
    data: SubjectData,
}

#[derive(Deserialize)]
struct SubjectData {
    characters: String,
    level: u32,
    #[serde(default)]
    meanings: Vec<Meaning>,
    #[serde(default)]
    readings: Vec<Reading>,
    #[serde(default)]
    pronunciation_audios: Vec<Audio>,
}

#[derive(Deserialize)]
struct Meaning {
    meaning: String,
}

#[derive(Deserialize)]
struct Reading {
    reading: String,
}

#[derive(Deserialize)]
struct Audio {
    url: String,
    content_type: String,
}

impl WaniKaniClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch up to `limit` quizzable vocabulary items for the given levels.
    ///
    /// Follows the collection's `next_url` pagination until the limit is
    /// reached or the catalog is exhausted. Subjects without playable audio
    /// or without meanings are filtered out.
    pub async fn fetch_vocab_for_levels(
        &self,
        levels: &[u32],
        limit: usize,
    ) -> Result<Vec<VocabItem>, FetchError> {
        let lv = levels
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut next = Some(format!(
            "{}/subjects?types=vocabulary,kana_vocabulary&levels={}&per_page={}",
            self.base_url, lv, PAGE_SIZE
        ));
        let mut out = Vec::new();

        while let Some(url) = next {
            if out.len() >= limit {
                break;
            }
            debug!(%url, collected = out.len(), "fetching vocabulary page");

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }

            let page: Collection = response.json().await?;
            out.extend(page.data.into_iter().filter_map(to_vocab_item));
            next = page.pages.next_url;
        }

        out.truncate(limit);
        Ok(out)
    }
}

/// Convert an API subject into a quizzable item, or drop it.
fn to_vocab_item(subject: Subject) -> Option<VocabItem> {
    let audio_urls: Vec<String> = subject
        .data
        .pronunciation_audios
        .into_iter()
        .filter(|a| a.content_type.contains("mpeg") || a.url.ends_with(".mp3"))
        .map(|a| a.url)
        .collect();
    if audio_urls.is_empty() {
        return None;
    }

    let meanings: Vec<String> = subject
        .data
        .meanings
        .into_iter()
        .map(|m| m.meaning)
        .collect();
    if meanings.is_empty() {
        return None;
    }

    // Kana-only vocabulary has no reading entries; its surface form is the
    // reading.
    let readings = if subject.object == "kana_vocabulary" {
        vec![subject.data.characters.clone()]
    } else {
        subject
            .data
            .readings
            .into_iter()
            .map(|r| r.reading)
            .collect()
    };

    Some(VocabItem {
        id: subject.id,
        level: subject.data.level,
        characters: subject.data.characters,
        readings,
        meanings,
        audio_urls,
    })
}
