use crate::core::zones::ZoneCatalog;
use crate::domain::model::{NewSight, Sight, SightId};
use crate::domain::ports::SightStore;
use crate::utils::error::{Result, SightError};
use std::sync::Arc;

/// Single-record operations: user submissions and lookups by id.
pub struct SightCatalog<S: SightStore> {
    store: Arc<S>,
    zones: ZoneCatalog,
}

impl<S: SightStore> SightCatalog<S> {
    pub fn new(store: Arc<S>, zones: ZoneCatalog) -> Self {
        Self { store, zones }
    }

    /// The zone must be a listed one and is stored in its suffixed form.
    pub async fn create(&self, mut sight: NewSight) -> Result<Sight> {
        if sight.sight_name.trim().is_empty() {
            return Err(SightError::invalid_argument("景點名稱不能為空"));
        }
        let zone = self.zones.normalize(&sight.zone)?;
        if !self.zones.contains(&zone) {
            return Err(SightError::invalid_argument(format!("未知的區域: {}", zone)));
        }
        sight.zone = zone;

        let created = self.store.insert(sight).await?;
        tracing::info!(id = %created.id, zone = created.zone(), "新增景點: {}", created.sight_name());
        Ok(created)
    }

    pub async fn get(&self, id: &SightId) -> Result<Sight> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| SightError::not_found(format!("sight {}", id)))
    }

    /// Returns the sights that exist, in request order. Unknown ids are skipped.
    pub async fn get_many(&self, ids: &[SightId]) -> Result<Vec<Sight>> {
        if ids.is_empty() {
            return Err(SightError::invalid_argument("id 清單不能為空"));
        }
        Ok(self.store.find_by_ids(ids).await?)
    }
}
