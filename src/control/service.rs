//! Control service
//!
//! Owns the extraction engine, the live settings, the document source and
//! the delivery client, and turns control requests into replies. Transports
//! (stdio, tests) hold the service behind an `Arc` and call [`handle`].
//!
//! [`handle`]: ControlService::handle

use crate::config::ConfigPatch;
use crate::control::types::{ConfigReply, ControlReply, ControlRequest, ScrapeReply};
use crate::delivery::DeliveryClient;
use crate::error::Result;
use crate::extraction::ExtractionEngine;
use crate::settings::{Settings, SettingsStore};
use crate::source::DocumentSource;
use parking_lot::RwLock;
use tracing::{debug, error, info, instrument};

/// Request dispatcher shared by every control transport.
pub struct ControlService {
    engine: ExtractionEngine,
    source: Box<dyn DocumentSource>,
    delivery: DeliveryClient,
    store: SettingsStore,
    settings: RwLock<Settings>,
}

impl std::fmt::Debug for ControlService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlService")
            .field("engine", &self.engine)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ControlService {
    /// Build a service, loading persisted settings from `store`.
    pub fn new(
        source: Box<dyn DocumentSource>,
        delivery: DeliveryClient,
        store: SettingsStore,
    ) -> Result<Self> {
        let settings = store.load()?;
        debug!(path = %store.path().display(), "settings loaded");
        Ok(Self {
            engine: ExtractionEngine::new(),
            source,
            delivery,
            store,
            settings: RwLock::new(settings),
        })
    }

    /// Dispatch one request to its handler.
    pub async fn handle(&self, request: ControlRequest) -> ControlReply {
        match request {
            ControlRequest::Scrape => ControlReply::Scrape(self.scrape().await),
            ControlRequest::UpdateConfig { config } => {
                ControlReply::Config(self.update_config(config))
            }
            ControlRequest::GetConfig => ControlReply::Config(self.get_config()),
        }
    }

    /// Run one extraction over the current snapshot and push the result to
    /// the collector. Delivery failure still returns the extracted data.
    #[instrument(skip(self))]
    pub async fn scrape(&self) -> ScrapeReply {
        let page = match self.source.snapshot() {
            Ok(page) => page,
            Err(err) => {
                error!(%err, "document snapshot failed");
                return ScrapeReply::failed(err.to_string());
            }
        };
        let config = self.settings.read().config.clone();
        let result = match self.engine.run(&config, &page) {
            Ok(result) => result,
            Err(err) => return ScrapeReply::failed(err.to_string()),
        };
        match self.delivery.deliver(&result).await {
            Ok(server_response) => {
                info!(records = result.total_records(), "scrape delivered");
                ScrapeReply::delivered(result, server_response)
            }
            Err(err) => {
                error!(%err, "delivery failed, keeping extracted data");
                ScrapeReply::undelivered(result, err.to_string())
            }
        }
    }

    /// Merge a partial configuration onto the current one and persist the
    /// whole settings document. Persistence failure is logged; the merged
    /// configuration stays live either way.
    #[instrument(skip(self, patch))]
    pub fn update_config(&self, patch: ConfigPatch) -> ConfigReply {
        let snapshot = {
            let mut settings = self.settings.write();
            settings.config = settings.config.merge(patch);
            settings.clone()
        };
        if let Err(err) = self.store.save(&snapshot) {
            error!(%err, path = %self.store.path().display(), "settings save failed");
        } else {
            debug!("configuration updated and persisted");
        }
        ConfigReply::ok(snapshot.config)
    }

    /// Report the current configuration.
    pub fn get_config(&self) -> ConfigReply {
        ConfigReply::ok(self.settings.read().config.clone())
    }

    /// Snapshot of the live settings, for the scheduler and CLI.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Whether an extraction is currently running.
    pub fn is_busy(&self) -> bool {
        self.engine.is_busy()
    }
}
