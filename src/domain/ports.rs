use crate::domain::model::{NewSight, Sight, SightId};
use crate::utils::error::{FetchError, StoreError};
use async_trait::async_trait;

/// Byte-level storage underneath file-backed stores.
pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = std::io::Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = std::io::Result<()>> + Send;
}

/// Live source of sights for a zone.
///
/// A valid zone with nothing listed yields `Ok(vec![])`, never an error.
#[async_trait]
pub trait SightFetcher: Send + Sync {
    async fn fetch(&self, zone: &str) -> Result<Vec<NewSight>, FetchError>;
}

#[async_trait]
pub trait SightStore: Send + Sync {
    async fn clear_all(&self) -> Result<(), StoreError>;

    /// Persists unconditionally under a fresh id.
    async fn save(&self, sight: NewSight) -> Result<Sight, StoreError>;

    /// Saves each sight under a fresh id, yielding one result per input in
    /// input order. Records fail independently unless the backend says
    /// otherwise.
    async fn save_batch(&self, sights: Vec<NewSight>) -> Vec<Result<Sight, StoreError>> {
        let mut results = Vec::with_capacity(sights.len());
        for sight in sights {
            results.push(self.save(sight).await);
        }
        results
    }

    /// Persists under a fresh id, rejecting a sight whose zone and name
    /// are already stored.
    async fn insert(&self, sight: NewSight) -> Result<Sight, StoreError>;

    async fn find_by_zone(&self, zone: &str) -> Result<Vec<Sight>, StoreError>;
    async fn find_by_id(&self, id: &SightId) -> Result<Option<Sight>, StoreError>;
    async fn find_by_ids(&self, ids: &[SightId]) -> Result<Vec<Sight>, StoreError>;
}
