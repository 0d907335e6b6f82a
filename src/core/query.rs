use crate::core::zones::ZoneCatalog;
use crate::domain::model::{NewSight, Sight};
use crate::domain::ports::{SightFetcher, SightStore};
use crate::utils::error::{Result, SightError};
use std::sync::Arc;

/// Reads persisted sights by zone.
pub struct ZoneQueryService<S: SightStore> {
    store: Arc<S>,
    zones: ZoneCatalog,
}

impl<S: SightStore> ZoneQueryService<S> {
    pub fn new(store: Arc<S>, zones: ZoneCatalog) -> Self {
        Self { store, zones }
    }

    /// Accepts `中正` and `中正區` alike. Blank input never reaches the store.
    pub async fn get_by_zone(&self, zone_input: &str) -> Result<Vec<Sight>> {
        let zone = self.zones.normalize(zone_input)?;

        let sights = self.store.find_by_zone(&zone).await?;
        if sights.is_empty() {
            return Err(SightError::not_found(format!("查無此區域資料: {}", zone)));
        }

        tracing::info!(zone = %zone, count = sights.len(), "從資料庫查詢到 {} 個景點", sights.len());
        Ok(sights)
    }
}

/// Asks the live source directly, bypassing the store.
pub struct LiveQueryService<F: SightFetcher> {
    fetcher: Arc<F>,
    zones: ZoneCatalog,
    normalize_zone: bool,
}

impl<F: SightFetcher> LiveQueryService<F> {
    /// With `normalize_zone` off the zone goes to the fetcher verbatim.
    pub fn new(fetcher: Arc<F>, zones: ZoneCatalog, normalize_zone: bool) -> Self {
        Self {
            fetcher,
            zones,
            normalize_zone,
        }
    }

    pub async fn get_by_zone(&self, zone_input: &str) -> Result<Vec<NewSight>> {
        let zone = if self.normalize_zone {
            self.zones.normalize(zone_input)?
        } else {
            zone_input.to_string()
        };

        let sights = self.fetcher.fetch(&zone).await?;
        tracing::info!(zone = %zone, count = sights.len(), "從網站爬取資料");
        if sights.is_empty() {
            return Err(SightError::not_found(format!("查無資料: {}", zone)));
        }
        Ok(sights)
    }
}
