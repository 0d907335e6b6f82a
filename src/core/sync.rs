use crate::core::zones::ZoneCatalog;
use crate::domain::model::NewSight;
use crate::domain::ports::{SightFetcher, SightStore};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// A single record that could not be persisted during a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub sight_name: String,
    pub error: String,
}

/// What happened to one zone during a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneOutcome {
    pub zone: String,
    pub fetched: usize,
    pub persisted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_records: Vec<RecordFailure>,
}

impl ZoneOutcome {
    fn fetch_failed(zone: &str, error: String) -> Self {
        Self {
            zone: zone.to_string(),
            fetched: 0,
            persisted: 0,
            fetch_error: Some(error),
            failed_records: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.fetch_error.is_none() && self.failed_records.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub zones: Vec<ZoneOutcome>,
}

impl RefreshReport {
    pub fn total_persisted(&self) -> usize {
        self.zones.iter().map(|z| z.persisted).sum()
    }

    pub fn total_fetched(&self) -> usize {
        self.zones.iter().map(|z| z.fetched).sum()
    }

    pub fn failed_zones(&self) -> Vec<&str> {
        self.zones
            .iter()
            .filter(|z| z.fetch_error.is_some())
            .map(|z| z.zone.as_str())
            .collect()
    }

    pub fn zone(&self, zone: &str) -> Option<&ZoneOutcome> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    pub fn is_clean(&self) -> bool {
        self.zones.iter().all(ZoneOutcome::is_clean)
    }

    pub fn summary(&self) -> String {
        let failed = self.failed_zones().len();
        let mut summary = format!(
            "persisted {} sights across {} zones",
            self.total_persisted(),
            self.zones.len()
        );
        if failed > 0 {
            summary.push_str(&format!(
                " ({} zone{} failed)",
                failed,
                if failed == 1 { "" } else { "s" }
            ));
        }
        summary
    }
}

/// Rebuilds the whole store from the live source, one zone at a time.
///
/// The store is cleared before repopulating and nothing guards readers in
/// between: a concurrent query can observe an empty or partial store.
pub struct SyncOrchestrator<F: SightFetcher, S: SightStore> {
    fetcher: Arc<F>,
    store: Arc<S>,
    zones: ZoneCatalog,
}

impl<F: SightFetcher, S: SightStore> SyncOrchestrator<F, S> {
    pub fn new(fetcher: Arc<F>, store: Arc<S>, zones: ZoneCatalog) -> Self {
        Self {
            fetcher,
            store,
            zones,
        }
    }

    pub fn zones(&self) -> &ZoneCatalog {
        &self.zones
    }

    /// Only a failed clear is returned as an error. Fetch and persist
    /// failures are logged and recorded in the report.
    pub async fn refresh_all(&self) -> Result<RefreshReport> {
        let started_at = Utc::now();

        self.store.clear_all().await?;
        tracing::info!("已清空資料庫舊有景點資料");
        tracing::info!(zones = self.zones.zones().len(), "開始爬取所有景點資料");

        let mut outcomes = Vec::with_capacity(self.zones.zones().len());
        for zone in self.zones.zones() {
            outcomes.push(self.refresh_zone(zone).await);
        }

        let report = RefreshReport {
            started_at,
            finished_at: Utc::now(),
            zones: outcomes,
        };
        tracing::info!(
            persisted = report.total_persisted(),
            fetched = report.total_fetched(),
            failed_zones = report.failed_zones().len(),
            "景點資料同步完成"
        );
        Ok(report)
    }

    async fn refresh_zone(&self, zone: &str) -> ZoneOutcome {
        let stored_zone = match self.zones.normalize(zone) {
            Ok(stored_zone) => stored_zone,
            Err(e) => {
                tracing::error!(zone, error = %e, "區域設定錯誤");
                return ZoneOutcome::fetch_failed(zone, e.to_string());
            }
        };

        let sights = match self.fetcher.fetch(zone).await {
            Ok(sights) => sights,
            Err(e) => {
                tracing::error!(zone, error = %e, "爬取 {} 區景點時發生錯誤", zone);
                return ZoneOutcome::fetch_failed(zone, e.to_string());
            }
        };

        let fetched = sights.len();
        let mut persisted = 0;
        let mut failed_records = Vec::new();

        let mut accepted = Vec::with_capacity(fetched);
        for mut sight in sights {
            match self.claim_zone(&mut sight, &stored_zone) {
                Ok(()) => accepted.push(sight),
                Err(error) => {
                    tracing::error!(zone, "略過區域不符的景點: {} ({})", sight.sight_name, error);
                    failed_records.push(RecordFailure {
                        sight_name: sight.sight_name,
                        error,
                    });
                }
            }
        }

        let names: Vec<String> = accepted.iter().map(|s| s.sight_name.clone()).collect();
        let results = self.store.save_batch(accepted).await;
        for (sight_name, result) in names.into_iter().zip(results) {
            match result {
                Ok(saved) => {
                    persisted += 1;
                    tracing::debug!(zone, id = %saved.id, "已保存景點: {}", sight_name);
                }
                Err(e) => {
                    tracing::error!(zone, error = %e, "保存景點時發生錯誤: {}", sight_name);
                    failed_records.push(RecordFailure {
                        sight_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            zone,
            fetched,
            persisted,
            "完成 {} 區的爬取並保存，共 {} 個景點",
            zone,
            persisted
        );

        ZoneOutcome {
            zone: zone.to_string(),
            fetched,
            persisted,
            fetch_error: None,
            failed_records,
        }
    }

    /// Stamps the suffixed zone being refreshed onto a fetched sight.
    ///
    /// A blank zone is taken to mean the requested one; a zone that
    /// normalizes to anything else is refused.
    fn claim_zone(
        &self,
        sight: &mut NewSight,
        stored_zone: &str,
    ) -> std::result::Result<(), String> {
        if !sight.zone.trim().is_empty() {
            let zone = self
                .zones
                .normalize(&sight.zone)
                .map_err(|e| e.to_string())?;
            if zone != stored_zone {
                return Err(format!(
                    "zone {} does not belong to {}",
                    sight.zone, stored_zone
                ));
            }
        }
        sight.zone = stored_zone.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemorySightStore;
    use crate::domain::model::{Sight, SightId};
    use crate::utils::error::{FetchError, SightError, StoreError};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use tokio::sync::Mutex;

    /// Fetcher with canned per-zone answers that logs every call into a
    /// shared journal.
    struct ScriptedFetcher {
        answers: HashMap<String, std::result::Result<Vec<NewSight>, u16>>,
        journal: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SightFetcher for ScriptedFetcher {
        async fn fetch(&self, zone: &str) -> std::result::Result<Vec<NewSight>, FetchError> {
            self.journal.lock().await.push(format!("fetch:{}", zone));
            match self.answers.get(zone) {
                Some(Ok(sights)) => Ok(sights.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    zone: zone.to_string(),
                    status: *status,
                }),
                None => Ok(Vec::new()),
            }
        }
    }

    /// In-memory store that can refuse specific sight names or the clear.
    struct JournalStore {
        inner: InMemorySightStore,
        journal: Arc<Mutex<Vec<String>>>,
        reject: HashSet<String>,
        fail_clear: bool,
    }

    #[async_trait]
    impl SightStore for JournalStore {
        async fn clear_all(&self) -> std::result::Result<(), StoreError> {
            self.journal.lock().await.push("clear".to_string());
            if self.fail_clear {
                return Err(StoreError::Backend("connection refused".to_string()));
            }
            self.inner.clear_all().await
        }

        async fn save(&self, sight: NewSight) -> std::result::Result<Sight, StoreError> {
            self.journal.lock().await.push(format!("save:{}", sight.sight_name));
            if self.reject.contains(&sight.sight_name) {
                return Err(StoreError::Backend("write rejected".to_string()));
            }
            self.inner.save(sight).await
        }

        async fn insert(&self, sight: NewSight) -> std::result::Result<Sight, StoreError> {
            self.inner.insert(sight).await
        }

        async fn find_by_zone(&self, zone: &str) -> std::result::Result<Vec<Sight>, StoreError> {
            self.inner.find_by_zone(zone).await
        }

        async fn find_by_id(&self, id: &SightId) -> std::result::Result<Option<Sight>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_ids(&self, ids: &[SightId]) -> std::result::Result<Vec<Sight>, StoreError> {
            self.inner.find_by_ids(ids).await
        }
    }

    fn sights(zone: &str, count: usize) -> Vec<NewSight> {
        (1..=count)
            .map(|i| NewSight::new(format!("{}景點{}", zone, i), format!("{}區", zone)))
            .collect()
    }

    struct Harness {
        orchestrator: SyncOrchestrator<ScriptedFetcher, JournalStore>,
        store: Arc<JournalStore>,
        journal: Arc<Mutex<Vec<String>>>,
    }

    fn harness(
        answers: HashMap<String, std::result::Result<Vec<NewSight>, u16>>,
        reject: &[&str],
        fail_clear: bool,
    ) -> Harness {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let fetcher = Arc::new(ScriptedFetcher {
            answers,
            journal: journal.clone(),
        });
        let store = Arc::new(JournalStore {
            inner: InMemorySightStore::new(),
            journal: journal.clone(),
            reject: reject.iter().map(|s| s.to_string()).collect(),
            fail_clear,
        });
        Harness {
            orchestrator: SyncOrchestrator::new(fetcher, store.clone(), ZoneCatalog::default()),
            store,
            journal,
        }
    }

    #[tokio::test]
    async fn test_clear_precedes_every_fetch() {
        let h = harness(HashMap::new(), &[], false);
        h.store.inner.save(NewSight::new("舊資料", "中正區")).await.unwrap();

        h.orchestrator.refresh_all().await.unwrap();

        let journal = h.journal.lock().await;
        assert_eq!(journal[0], "clear");
        assert_eq!(journal.iter().filter(|e| *e == "clear").count(), 1);
        let fetched: Vec<&str> = journal
            .iter()
            .filter_map(|e| e.strip_prefix("fetch:"))
            .collect();
        assert_eq!(fetched, vec!["中正", "仁愛", "信義", "中山", "安樂", "暖暖", "七堵"]);
        assert!(h.store.find_by_zone("中正區").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_zone_does_not_block_others() {
        let mut answers = HashMap::new();
        answers.insert("中正".to_string(), Ok(sights("中正", 3)));
        answers.insert("仁愛".to_string(), Ok(sights("仁愛", 2)));
        answers.insert("信義".to_string(), Ok(Vec::new()));
        answers.insert("中山".to_string(), Ok(sights("中山", 1)));
        answers.insert("安樂".to_string(), Ok(sights("安樂", 4)));
        answers.insert("暖暖".to_string(), Err(503));
        answers.insert("七堵".to_string(), Ok(sights("七堵", 2)));
        let h = harness(answers, &[], false);

        let report = h.orchestrator.refresh_all().await.unwrap();

        assert_eq!(report.total_persisted(), 12);
        assert_eq!(report.failed_zones(), vec!["暖暖"]);
        assert!(h.store.find_by_zone("暖暖區").await.unwrap().is_empty());
        assert_eq!(h.store.find_by_zone("安樂區").await.unwrap().len(), 4);

        let failed = report.zone("暖暖").unwrap();
        assert_eq!(failed.persisted, 0);
        assert!(failed.fetch_error.as_deref().unwrap().contains("503"));
        assert_eq!(report.zone("七堵").unwrap().persisted, 2);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_record_failure_is_skipped() {
        let mut answers = HashMap::new();
        answers.insert("中正".to_string(), Ok(sights("中正", 3)));
        answers.insert("仁愛".to_string(), Ok(sights("仁愛", 1)));
        let h = harness(answers, &["中正景點2"], false);

        let report = h.orchestrator.refresh_all().await.unwrap();

        let zhongzheng = report.zone("中正").unwrap();
        assert_eq!(zhongzheng.fetched, 3);
        assert_eq!(zhongzheng.persisted, 2);
        assert_eq!(zhongzheng.failed_records.len(), 1);
        assert_eq!(zhongzheng.failed_records[0].sight_name, "中正景點2");
        assert!(zhongzheng.fetch_error.is_none());

        let stored = h.store.find_by_zone("中正區").await.unwrap();
        let names: Vec<&str> = stored.iter().map(|s| s.sight_name()).collect();
        assert_eq!(names, vec!["中正景點1", "中正景點3"]);

        // the third record was still attempted after the failure
        let journal = h.journal.lock().await;
        let pos_2 = journal.iter().position(|e| e == "save:中正景點2").unwrap();
        let pos_3 = journal.iter().position(|e| e == "save:中正景點3").unwrap();
        assert!(pos_2 < pos_3);

        assert_eq!(report.zone("仁愛").unwrap().persisted, 1);
    }

    #[tokio::test]
    async fn test_bare_zone_labels_are_stored_suffixed() {
        let mut answers = HashMap::new();
        answers.insert(
            "中正".to_string(),
            Ok(vec![
                NewSight::new("和平島公園", "中正"),
                NewSight::new("正濱漁港", ""),
                NewSight::new("中正公園", "中正區"),
            ]),
        );
        let h = harness(answers, &[], false);

        let report = h.orchestrator.refresh_all().await.unwrap();

        assert!(report.is_clean());
        assert_eq!(report.zone("中正").unwrap().persisted, 3);
        let stored = h.store.find_by_zone("中正區").await.unwrap();
        let names: Vec<&str> = stored.iter().map(|s| s.sight_name()).collect();
        assert_eq!(names, vec!["和平島公園", "正濱漁港", "中正公園"]);
        assert!(h.store.find_by_zone("中正").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sight_from_another_zone_is_record_failure() {
        let mut answers = HashMap::new();
        answers.insert(
            "中正".to_string(),
            Ok(vec![
                NewSight::new("仙洞巖", "中山區"),
                NewSight::new("和平島公園", "中正區"),
            ]),
        );
        let h = harness(answers, &[], false);

        let report = h.orchestrator.refresh_all().await.unwrap();

        let zhongzheng = report.zone("中正").unwrap();
        assert_eq!(zhongzheng.fetched, 2);
        assert_eq!(zhongzheng.persisted, 1);
        assert_eq!(zhongzheng.failed_records[0].sight_name, "仙洞巖");
        assert!(zhongzheng.failed_records[0].error.contains("中山區"));
        assert!(h.store.find_by_zone("中山區").await.unwrap().is_empty());
        assert!(!h.journal.lock().await.contains(&"save:仙洞巖".to_string()));
    }

    #[tokio::test]
    async fn test_clear_failure_is_fatal() {
        let mut answers = HashMap::new();
        answers.insert("中正".to_string(), Ok(sights("中正", 3)));
        let h = harness(answers, &[], true);

        let result = h.orchestrator.refresh_all().await;

        assert!(matches!(result, Err(SightError::Store(StoreError::Backend(_)))));
        let journal = h.journal.lock().await;
        assert_eq!(journal.as_slice(), &["clear".to_string()]);
    }

    #[tokio::test]
    async fn test_store_assigns_fresh_ids() {
        let mut answers = HashMap::new();
        answers.insert("中山".to_string(), Ok(sights("中山", 2)));
        let h = harness(answers, &[], false);

        h.orchestrator.refresh_all().await.unwrap();

        let stored = h.store.find_by_zone("中山區").await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].id, stored[1].id);
        assert!(stored.iter().all(|s| !s.id.as_str().is_empty()));
    }

    #[tokio::test]
    async fn test_custom_zone_list() {
        let mut answers = HashMap::new();
        answers.insert("暖暖".to_string(), Ok(sights("暖暖", 2)));
        answers.insert("中正".to_string(), Ok(sights("中正", 5)));
        let journal = Arc::new(Mutex::new(Vec::new()));
        let fetcher = Arc::new(ScriptedFetcher {
            answers,
            journal: journal.clone(),
        });
        let store = Arc::new(InMemorySightStore::new());
        let zones = ZoneCatalog::new(vec!["暖暖".to_string()], "區");
        let orchestrator = SyncOrchestrator::new(fetcher, store.clone(), zones);

        let report = orchestrator.refresh_all().await.unwrap();

        assert_eq!(report.zones.len(), 1);
        assert_eq!(report.total_persisted(), 2);
        assert_eq!(journal.lock().await.as_slice(), &["fetch:暖暖".to_string()]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_report_summary() {
        let now = Utc::now();
        let report = RefreshReport {
            started_at: now,
            finished_at: now,
            zones: vec![
                ZoneOutcome {
                    zone: "中正".to_string(),
                    fetched: 3,
                    persisted: 3,
                    fetch_error: None,
                    failed_records: Vec::new(),
                },
                ZoneOutcome::fetch_failed("暖暖", "timeout".to_string()),
            ],
        };

        assert_eq!(
            report.summary(),
            "persisted 3 sights across 2 zones (1 zone failed)"
        );
    }
}
