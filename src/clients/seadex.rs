use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::SeaDexConfig;
use crate::constants::seadex::USER_AGENT;
use crate::models::MediaFormat;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SeaDexEntry {
    #[serde(rename = "alID")]
    pub anilist_id: i32,

    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub comparison: String,
    #[serde(rename = "theoreticalBest", default)]
    pub theoretical_best: String,
    #[serde(default)]
    pub expand: SeaDexExpand,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SeaDexExpand {
    #[serde(default)]
    pub trs: Vec<SeaDexRelease>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SeaDexRelease {
    #[serde(rename = "releaseGroup", default)]
    pub release_group: String,
    #[serde(rename = "dualAudio", default)]
    pub dual_audio: bool,
    #[serde(rename = "isBest", default)]
    pub is_best: bool,
    #[serde(default)]
    pub tracker: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EntriesPage {
    #[serde(default)]
    items: Vec<SeaDexEntry>,
    #[serde(default)]
    page: u32,
    #[serde(rename = "totalPages", default = "default_total_pages")]
    total_pages: u32,
}

const fn default_total_pages() -> u32 {
    1
}

/// Title names for one `AniList` id from the community title list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnimeTitles {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub romaji: Option<String>,
}

/// One row of the community title list. Only the id and titles are
/// required; format and year are picked up when present.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TitleListing {
    #[serde(rename = "idAL", default)]
    pub anilist_id: Option<i32>,
    #[serde(default)]
    pub titles: AnimeTitles,
    #[serde(default)]
    pub format: serde_json::Value,
    #[serde(default, alias = "seasonYear")]
    pub year: serde_json::Value,
}

impl TitleListing {
    #[must_use]
    pub fn media_format(&self) -> Option<MediaFormat> {
        self.format.as_str().and_then(MediaFormat::parse)
    }

    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.year.as_i64().and_then(|y| i32::try_from(y).ok())
    }
}

#[derive(Clone)]
pub struct SeaDexClient {
    client: Client,
    api_url: String,
    title_mapping_url: String,
}

impl SeaDexClient {
    #[must_use]
    pub fn new(config: &SeaDexConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            title_mapping_url: config.title_mapping_url.clone(),
        }
    }

    fn entries_url(&self, page: u32) -> Result<Url> {
        let base_url = format!("{}/entries/records", self.api_url);
        let mut url = Url::parse(&base_url)?;

        url.query_pairs_mut()
            .append_pair("expand", "trs")
            .append_pair("page", &page.to_string());

        Ok(url)
    }

    async fn fetch_page(&self, page: u32) -> Result<EntriesPage> {
        let url = self.entries_url(page)?;
        debug!("Fetching SeaDex entries page {}", page);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let page: EntriesPage = response
            .json()
            .await
            .with_context(|| format!("Invalid SeaDex response for page {page}"))?;

        Ok(page)
    }

    /// Fetches every SeaDex entry with its torrents expanded.
    pub async fn fetch_entries(&self) -> Result<Vec<SeaDexEntry>> {
        let mut entries = Vec::new();
        let mut page = 1;

        loop {
            let response = self.fetch_page(page).await?;
            if response.items.is_empty() {
                break;
            }

            entries.extend(response.items);
            info!(
                "Fetched page {}/{}...",
                response.page.max(page),
                response.total_pages
            );

            if page >= response.total_pages {
                break;
            }
            page += 1;
        }

        info!("Total entries fetched: {}", entries.len());
        Ok(entries)
    }

    /// Downloads the community title list, keyed by `AniList` id.
    pub async fn fetch_title_mapping(&self) -> Result<HashMap<i32, TitleListing>> {
        let url = Url::parse(&self.title_mapping_url)?;
        debug!("Fetching title mapping from {}", url);

        let listings: Vec<TitleListing> = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Invalid title mapping response")?;

        Ok(index_titles(listings))
    }
}

#[must_use]
pub fn index_titles(listings: Vec<TitleListing>) -> HashMap<i32, TitleListing> {
    listings
        .into_iter()
        .filter_map(|listing| listing.anilist_id.map(|id| (id, listing)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_url() {
        let client = SeaDexClient::new(&SeaDexConfig::default());
        let url = client.entries_url(3).unwrap();
        assert_eq!(url.path(), "/api/collections/entries/records");
        assert!(url.as_str().contains("expand=trs"));
        assert!(url.as_str().contains("page=3"));
    }

    #[test]
    fn test_entry_with_expanded_torrents() {
        let json = r#"{
            "alID": 154587,
            "id": "abc",
            "notes": "Best is the BD remux",
            "comparison": "https://slow.pics/c/1,https://slow.pics/c/2",
            "theoreticalBest": "",
            "expand": {
                "trs": [
                    {"releaseGroup": "Vodes", "dualAudio": true, "isBest": true, "tracker": "Nyaa", "tags": ["Unmuxed"]},
                    {"releaseGroup": "SubsPlease", "isBest": false, "tracker": "AB"}
                ]
            }
        }"#;

        let entry: SeaDexEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.anilist_id, 154_587);
        assert_eq!(entry.expand.trs.len(), 2);
        assert!(entry.expand.trs[0].dual_audio);
        assert_eq!(entry.expand.trs[1].tracker.as_deref(), Some("AB"));
    }

    #[test]
    fn test_entry_without_expand() {
        let entry: SeaDexEntry = serde_json::from_str(r#"{"alID": 1}"#).unwrap();
        assert!(entry.expand.trs.is_empty());
    }

    #[test]
    fn test_title_listing_tolerates_odd_metadata() {
        let json = r#"[
            {"idAL": 1, "titles": {"english": "Cowboy Bebop", "romaji": "Cowboy Bebop"}, "format": "TV", "year": 1998},
            {"idAL": 2, "titles": {"romaji": "Tenki no Ko"}, "format": {"kind": "movie"}, "year": "2019"},
            {"idAL": null, "titles": {"romaji": "Unlinked"}}
        ]"#;

        let listings: Vec<TitleListing> = serde_json::from_str(json).unwrap();
        let index = index_titles(listings);

        assert_eq!(index.len(), 2);
        assert_eq!(index[&1].media_format(), Some(MediaFormat::Tv));
        assert_eq!(index[&1].release_year(), Some(1998));
        assert_eq!(index[&2].media_format(), None);
        assert_eq!(index[&2].release_year(), None);
        assert_eq!(index[&2].titles.english, None);
    }
}
