use std::time::Duration;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Remote report store: a GitHub repo's data/ directory
// ---------------------------------------------------------------------------

const DEFAULT_USER: &str = "rap4957";
const DEFAULT_REPO: &str = "particulate_chart";
const DEFAULT_BRANCH: &str = "main";

/// Failures talking to the remote store. Kept separate from
/// [`crate::data::normalize::NormalizeError`]: a fetch problem clears the
/// dataset, it never means the document itself was bad.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned an unexpected payload (not a file list)")]
    UnexpectedPayload,
}

/// One entry of the GitHub contents API response.
#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
}

/// Fetches report documents from a GitHub repository's `data/` directory.
pub struct GithubSource {
    user: String,
    repo: String,
    branch: String,
    client: reqwest::blocking::Client,
}

impl Default for GithubSource {
    fn default() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_REPO, DEFAULT_BRANCH)
    }
}

impl GithubSource {
    pub fn new(user: &str, repo: &str, branch: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("particulate-chart/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        GithubSource {
            user: user.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            client,
        }
    }

    /// List the `.json` report documents available in the store.
    ///
    /// The contents API answers with an object (rate limit, missing dir)
    /// instead of a list on error; surface that as [`FetchError::UnexpectedPayload`].
    pub fn list_documents(&self) -> Result<Vec<String>, FetchError> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/contents/data",
            self.user, self.repo
        );
        let payload: JsonValue = self.client.get(&url).send()?.error_for_status()?.json()?;

        let entries: Vec<ContentsEntry> =
            serde_json::from_value(payload).map_err(|_| FetchError::UnexpectedPayload)?;

        Ok(entries
            .into_iter()
            .map(|e| e.name)
            .filter(|name| name.ends_with(".json"))
            .collect())
    }

    /// Fetch one report document and decode its JSON text.
    pub fn fetch_document(&self, name: &str) -> Result<JsonValue, FetchError> {
        let url = format!(
            "https://raw.githubusercontent.com/{}/{}/refs/heads/{}/data/{}",
            self.user, self.repo, self.branch, name
        );
        log::info!("Fetching report document {url}");
        let document = self.client.get(&url).send()?.error_for_status()?.json()?;
        Ok(document)
    }
}
