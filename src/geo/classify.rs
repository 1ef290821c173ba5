//! Address classification.
//!
//! Each address is looked up independently under its own timeout. Lookups run
//! on spawned tasks bounded by a semaphore; every task carries the index of
//! its address so results can be put back in input order once all of them
//! have finished.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};

use crate::config::{DEFAULT_MAX_CONCURRENCY, HOME_COUNTRY, LOOKUP_TIMEOUT_SECS};
use crate::country::CountryCodeTable;
use crate::error_handling::{InfoType, LookupError, ProcessingStats};
use crate::initialization::init_semaphore;
use crate::netstat::Ipv4Token;

use super::resolver::GeoResolver;
use super::types::{Classification, GeoRecord, LookupEvent, LookupOutcome, ProgressSink};

/// Tunables for a classification pass.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    /// Country code treated as domestic
    pub home_country: String,
    /// Budget for a single resolver call
    pub lookup_timeout: Duration,
    /// Resolver calls allowed in flight at once
    pub max_concurrency: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            home_country: HOME_COUNTRY.to_string(),
            lookup_timeout: Duration::from_secs(LOOKUP_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Builds the classification for a resolved address.
pub fn classify(
    address: Ipv4Token,
    record: GeoRecord,
    home_country: &str,
    table: &CountryCodeTable,
) -> Classification {
    let country_name = table.label_for(&record.country_code).to_string();
    let is_foreign = record.country_code != home_country;
    Classification {
        address,
        country_name,
        is_foreign,
        country_code: record.country_code,
        description: record.description,
    }
}

/// Classifies addresses as domestic or foreign through a `GeoResolver`.
#[derive(Clone)]
pub struct GeoClassifier {
    resolver: Arc<dyn GeoResolver>,
    table: Arc<CountryCodeTable>,
    settings: Arc<ClassifierSettings>,
    stats: Arc<ProcessingStats>,
}

impl GeoClassifier {
    pub fn new(
        resolver: Arc<dyn GeoResolver>,
        table: Arc<CountryCodeTable>,
        settings: ClassifierSettings,
    ) -> Self {
        Self {
            resolver,
            table,
            settings: Arc::new(settings),
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Records failures into `stats` instead of a private tracker.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Looks up and classifies one address.
    ///
    /// The resolver call is cut off after `lookup_timeout`; a slow resolver
    /// yields `LookupError::Timeout` rather than blocking.
    pub async fn classify_one(&self, address: &Ipv4Token) -> Result<Classification, LookupError> {
        let timeout = self.settings.lookup_timeout;
        let record = match tokio::time::timeout(timeout, self.resolver.lookup(address, timeout))
            .await
        {
            Ok(result) => result?,
            Err(_) => return Err(LookupError::Timeout(timeout.as_secs())),
        };

        let classification = classify(
            address.clone(),
            record,
            &self.settings.home_country,
            &self.table,
        );
        if self.table.name_for(&classification.country_code).is_none() {
            self.stats.increment_info(InfoType::UnlistedCountryCode);
        }
        Ok(classification)
    }

    /// Classifies every address and returns one outcome per address, in
    /// input order.
    ///
    /// Failures are recorded in the stats and reported as
    /// `LookupOutcome::Skipped`; they never stop the batch.
    pub async fn classify_all(
        &self,
        addresses: &[Ipv4Token],
        progress: Arc<dyn ProgressSink>,
    ) -> Vec<LookupOutcome> {
        let semaphore = init_semaphore(self.settings.max_concurrency);
        let mut tasks = FuturesUnordered::new();

        for (index, address) in addresses.iter().enumerate() {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping address: {address}");
                    continue;
                }
            };

            let classifier = self.clone();
            let progress = Arc::clone(&progress);
            let address = address.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                progress.on_event(&LookupEvent::Started {
                    address: address.clone(),
                });
                classifier.classify_one(&address).await
            });
            tasks.push(async move { (index, handle.await) });
        }

        let mut slots: Vec<Option<LookupOutcome>> = vec![None; addresses.len()];
        while let Some((index, joined)) = tasks.next().await {
            let address = addresses[index].clone();
            let result = match joined {
                Ok(result) => result,
                Err(join_error) => {
                    warn!("Lookup task for {} panicked: {:?}", address, join_error);
                    Err(LookupError::Aborted(join_error.to_string()))
                }
            };

            let outcome = match result {
                Ok(classification) => {
                    debug!(
                        "{} -> {} ({})",
                        classification.address,
                        classification.country_code,
                        classification.country_name
                    );
                    progress.on_event(&LookupEvent::Classified(classification.clone()));
                    LookupOutcome::Classified(classification)
                }
                Err(reason) => {
                    debug!("Skipping {}: {}", address, reason);
                    self.stats.increment_error(reason.error_type());
                    progress.on_event(&LookupEvent::Skipped {
                        address: address.clone(),
                        reason: reason.clone(),
                    });
                    LookupOutcome::Skipped { address, reason }
                }
            };
            slots[index] = Some(outcome);
        }

        slots.into_iter().flatten().collect()
    }
}
