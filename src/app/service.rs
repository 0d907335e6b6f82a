use crate::core::catalog::SightCatalog;
use crate::core::query::{LiveQueryService, ZoneQueryService};
use crate::core::sync::{RefreshReport, SyncOrchestrator};
use crate::core::zones::ZoneCatalog;
use crate::domain::model::{NewSight, Sight, SightId};
use crate::domain::ports::{SightFetcher, SightStore};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub zones: ZoneCatalog,
    pub normalize_live_zone: bool,
}

/// Every sight operation over one fetcher and one store.
pub struct SightService<F: SightFetcher, S: SightStore> {
    sync: SyncOrchestrator<F, S>,
    zone_query: ZoneQueryService<S>,
    live_query: LiveQueryService<F>,
    catalog: SightCatalog<S>,
}

impl<F: SightFetcher, S: SightStore> SightService<F, S> {
    pub fn new(fetcher: F, store: S, options: ServiceOptions) -> Self {
        Self::from_shared(Arc::new(fetcher), Arc::new(store), options)
    }

    pub fn from_shared(fetcher: Arc<F>, store: Arc<S>, options: ServiceOptions) -> Self {
        let ServiceOptions {
            zones,
            normalize_live_zone,
        } = options;

        Self {
            sync: SyncOrchestrator::new(fetcher.clone(), store.clone(), zones.clone()),
            zone_query: ZoneQueryService::new(store.clone(), zones.clone()),
            catalog: SightCatalog::new(store, zones.clone()),
            live_query: LiveQueryService::new(fetcher, zones, normalize_live_zone),
        }
    }

    pub async fn refresh_all(&self) -> Result<RefreshReport> {
        self.sync.refresh_all().await
    }

    pub async fn sights_by_zone(&self, zone: &str) -> Result<Vec<Sight>> {
        self.zone_query.get_by_zone(zone).await
    }

    pub async fn sights_from_source(&self, zone: &str) -> Result<Vec<NewSight>> {
        self.live_query.get_by_zone(zone).await
    }

    pub async fn create(&self, sight: NewSight) -> Result<Sight> {
        self.catalog.create(sight).await
    }

    pub async fn get(&self, id: &SightId) -> Result<Sight> {
        self.catalog.get(id).await
    }

    pub async fn get_many(&self, ids: &[SightId]) -> Result<Vec<Sight>> {
        self.catalog.get_many(ids).await
    }
}
