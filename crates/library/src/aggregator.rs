//! Collection × streams composition.

use tracing::debug;

use gtrack_collection::CollectionStore;
use gtrack_streams::{StreamsClient, StreamsPage};

use crate::error::LibraryError;

/// Composes the local collection with the streaming client.
pub struct Library {
    store: CollectionStore,
    streams: StreamsClient,
}

impl Library {
    pub fn new(store: CollectionStore, streams: StreamsClient) -> Self {
        Self { store, streams }
    }

    /// Live streams for the given game names.
    ///
    /// Resolves names to provider ids, then fetches streams in one batched
    /// call. Zero resolved ids yields an empty page without a second
    /// request; empty input yields an empty page without any request.
    pub async fn streams_for_games(&self, names: &[String]) -> Result<StreamsPage, LibraryError> {
        let ids = self.streams.game_ids(names).await?;
        if ids.is_empty() {
            debug!(names = names.len(), "no provider ids resolved, skipping stream lookup");
            return Ok(StreamsPage::default());
        }
        Ok(self.streams.streams_by_game_ids(&ids).await?)
    }

    /// Live streams for every game currently in the collection.
    pub async fn streams_for_collection(&self) -> Result<StreamsPage, LibraryError> {
        let names: Vec<String> = self
            .store
            .entries()?
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        self.streams_for_games(&names).await
    }

    pub fn collection(&self) -> &CollectionStore {
        &self.store
    }

    pub fn streams(&self) -> &StreamsClient {
        &self.streams
    }
}
