use crate::adapters::memory_store::{is_duplicate, select_by_ids};
use crate::domain::model::{NewSight, Sight, SightId};
use crate::domain::ports::{SightStore, Storage};
use crate::utils::error::StoreError;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Keeps the whole collection as one JSON array in a single document.
///
/// Every mutation reads and rewrites the whole document, so single-record
/// `save`/`insert` cost O(n) I/O each. `save_batch` pays that once per
/// batch, and a refresh issues one batch per zone: a crash mid-refresh
/// leaves the zones completed so far. The mutex serializes
/// read-modify-write cycles within this process.
pub struct JsonFileSightStore<S: Storage> {
    storage: S,
    document: String,
    lock: Mutex<()>,
}

impl<S: Storage> JsonFileSightStore<S> {
    pub fn new(storage: S, document: impl Into<String>) -> Self {
        Self {
            storage,
            document: document.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Sight>, StoreError> {
        match self.storage.read_file(&self.document).await? {
            Some(bytes) if !bytes.is_empty() => Ok(serde_json::from_slice(&bytes)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn persist(&self, sights: &[Sight]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(sights)?;
        tracing::debug!(
            document = %self.document,
            sights = sights.len(),
            bytes = bytes.len(),
            "Writing sight document"
        );
        self.storage.write_file(&self.document, &bytes).await?;
        Ok(())
    }
}

fn fail_all(count: usize, error: &StoreError) -> Vec<Result<Sight, StoreError>> {
    (0..count)
        .map(|_| Err(StoreError::Backend(error.to_string())))
        .collect()
}

#[async_trait]
impl<S: Storage> SightStore for JsonFileSightStore<S> {
    async fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.persist(&[]).await
    }

    async fn save(&self, sight: NewSight) -> Result<Sight, StoreError> {
        let _guard = self.lock.lock().await;
        let mut sights = self.load().await?;
        let saved = sight.into_sight(SightId::generate());
        sights.push(saved.clone());
        self.persist(&sights).await?;
        Ok(saved)
    }

    /// One read and one write for the whole batch. A failed read or write
    /// fails every record in it.
    async fn save_batch(&self, sights: Vec<NewSight>) -> Vec<Result<Sight, StoreError>> {
        if sights.is_empty() {
            return Vec::new();
        }

        let _guard = self.lock.lock().await;
        let count = sights.len();
        let mut stored = match self.load().await {
            Ok(stored) => stored,
            Err(e) => return fail_all(count, &e),
        };

        let saved: Vec<Sight> = sights
            .into_iter()
            .map(|sight| sight.into_sight(SightId::generate()))
            .collect();
        stored.extend(saved.iter().cloned());

        match self.persist(&stored).await {
            Ok(()) => saved.into_iter().map(Ok).collect(),
            Err(e) => fail_all(count, &e),
        }
    }

    async fn insert(&self, sight: NewSight) -> Result<Sight, StoreError> {
        let _guard = self.lock.lock().await;
        let mut sights = self.load().await?;
        if is_duplicate(&sights, &sight) {
            return Err(StoreError::Duplicate {
                zone: sight.zone,
                sight_name: sight.sight_name,
            });
        }
        let inserted = sight.into_sight(SightId::generate());
        sights.push(inserted.clone());
        self.persist(&sights).await?;
        Ok(inserted)
    }

    async fn find_by_zone(&self, zone: &str) -> Result<Vec<Sight>, StoreError> {
        let sights = self.load().await?;
        Ok(sights.into_iter().filter(|s| s.zone() == zone).collect())
    }

    async fn find_by_id(&self, id: &SightId) -> Result<Option<Sight>, StoreError> {
        let sights = self.load().await?;
        Ok(sights.into_iter().find(|s| &s.id == id))
    }

    async fn find_by_ids(&self, ids: &[SightId]) -> Result<Vec<Sight>, StoreError> {
        let sights = self.load().await?;
        Ok(select_by_ids(&sights, ids))
    }
}
