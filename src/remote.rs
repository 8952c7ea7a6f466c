//! Client side of the remote person collection (`/persons`).

use crate::error::TransportError;
use crate::model::{Person, PersonDraft, PersonId, PersonPatch};

mod http_client;
mod persons;

/// The four operations the reconciliation layer needs from a collection
/// store. One call is one exchange: implementations never retry.
pub trait PersonStore: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<Person>, TransportError>;
    fn create(&self, draft: &PersonDraft) -> Result<Person, TransportError>;
    fn update(&self, id: &PersonId, patch: &PersonPatch) -> Result<Person, TransportError>;
    fn remove(&self, id: &PersonId) -> Result<(), TransportError>;
}

pub struct RemoteClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::blocking::Client::builder()
            .user_agent("phonebook")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[path = "tests/remote/remote_client_tests.rs"]
mod tests;
