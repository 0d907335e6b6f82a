use crate::domain::model::{NewSight, Sight, SightId};
use crate::domain::ports::SightStore;
use crate::utils::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store. Lookups return insertion order.
#[derive(Debug, Default)]
pub struct InMemorySightStore {
    sights: RwLock<Vec<Sight>>,
}

impl InMemorySightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sights(sights: Vec<Sight>) -> Self {
        Self {
            sights: RwLock::new(sights),
        }
    }

    pub async fn len(&self) -> usize {
        self.sights.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sights.read().await.is_empty()
    }

    pub async fn snapshot(&self) -> Vec<Sight> {
        self.sights.read().await.clone()
    }
}

pub(crate) fn is_duplicate(existing: &[Sight], candidate: &NewSight) -> bool {
    existing
        .iter()
        .any(|s| s.details.zone == candidate.zone && s.details.sight_name == candidate.sight_name)
}

pub(crate) fn select_by_ids(sights: &[Sight], ids: &[SightId]) -> Vec<Sight> {
    let by_id: HashMap<&SightId, &Sight> = sights.iter().map(|s| (&s.id, s)).collect();
    ids.iter()
        .filter_map(|id| by_id.get(id).map(|s| (*s).clone()))
        .collect()
}

#[async_trait]
impl SightStore for InMemorySightStore {
    async fn clear_all(&self) -> Result<(), StoreError> {
        self.sights.write().await.clear();
        Ok(())
    }

    async fn save(&self, sight: NewSight) -> Result<Sight, StoreError> {
        let saved = sight.into_sight(SightId::generate());
        self.sights.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn insert(&self, sight: NewSight) -> Result<Sight, StoreError> {
        let mut sights = self.sights.write().await;
        if is_duplicate(&sights, &sight) {
            return Err(StoreError::Duplicate {
                zone: sight.zone,
                sight_name: sight.sight_name,
            });
        }
        let inserted = sight.into_sight(SightId::generate());
        sights.push(inserted.clone());
        Ok(inserted)
    }

    async fn find_by_zone(&self, zone: &str) -> Result<Vec<Sight>, StoreError> {
        Ok(self
            .sights
            .read()
            .await
            .iter()
            .filter(|s| s.zone() == zone)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &SightId) -> Result<Option<Sight>, StoreError> {
        Ok(self.sights.read().await.iter().find(|s| &s.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[SightId]) -> Result<Vec<Sight>, StoreError> {
        Ok(select_by_ids(&self.sights.read().await, ids))
    }
}
