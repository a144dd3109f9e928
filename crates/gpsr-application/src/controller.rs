//! User-triggered operations over the shared session store.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{error, info};

use gpsr_core::command::{Category, CommandRecord};
use gpsr_core::error::{GpsrError, Result};
use gpsr_core::service::{CommandGenerator, Rephraser};
use gpsr_core::session::SessionStore;

/// Category rotation for batch generation; positions past the end fall
/// back to `Unspecified`.
const BATCH_CATEGORIES: [Category; 2] = [Category::People, Category::Objects];

/// Aggregate outcome of a batch operation.
///
/// Successful items keep their updates even when siblings fail.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: usize,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug)]
pub struct ItemFailure {
    pub index: usize,
    pub error: GpsrError,
}

impl BatchReport {
    fn new(attempted: usize) -> Self {
        Self {
            attempted,
            failures: Vec::new(),
        }
    }

    fn record_failure(&mut self, index: usize, error: GpsrError) {
        self.failures.push(ItemFailure { index, error });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives the four UI operations over the shared store.
///
/// This is the sole error boundary: per-item failures inside batch
/// operations are logged and recorded without aborting sibling items, and
/// a single-item failure leaves the targeted record untouched. The enable
/// gate is held for the duration of each operation and released on every
/// path via the store's RAII guard.
pub struct OperationController {
    store: Arc<SessionStore>,
    generator: Arc<dyn CommandGenerator>,
    rephraser: Arc<dyn Rephraser>,
}

impl OperationController {
    pub fn new(
        store: Arc<SessionStore>,
        generator: Arc<dyn CommandGenerator>,
        rephraser: Arc<dyn Rephraser>,
    ) -> Self {
        Self {
            store,
            generator,
            rephraser,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Clears the session and generates `count` fresh commands, shuffling
    /// the survivors before publishing. A failed slot is omitted from the
    /// published list, not retried and not left as a placeholder.
    pub async fn generate_batch(&self, count: usize) -> BatchReport {
        let _guard = self.store.begin_operation();
        self.store.clear().await;

        let mut report = BatchReport::new(count);
        let mut generated = Vec::with_capacity(count);
        for slot in 0..count {
            let category = BATCH_CATEGORIES.get(slot).copied().unwrap_or_default();
            match self.generator.generate(category).await {
                Ok(command) => {
                    info!(slot, %category, %command, "generated command");
                    generated.push(CommandRecord::new(command, category));
                }
                Err(err) => {
                    error!(slot, %err, "command generation failed");
                    report.record_failure(slot, err);
                }
            }
        }

        generated.shuffle(&mut rand::thread_rng());
        self.store.publish(generated).await;
        report
    }

    /// Generates a replacement for the record at `index`, keeping its
    /// category. The slot keeps its old record if generation fails.
    pub async fn regenerate(&self, index: usize) -> Result<()> {
        let _guard = self.store.begin_operation();
        let result = self.regenerate_item(index).await;
        if let Err(err) = &result {
            log_item_failure(index, err, "regenerate failed");
        }
        result
    }

    async fn regenerate_item(&self, index: usize) -> Result<()> {
        let old = self
            .store
            .get(index)
            .await
            .ok_or(GpsrError::NoSuchCommand(index))?;
        let command = self.generator.generate(old.kind).await?;
        info!(index, %command, "regenerated command");
        self.store
            .replace(index, CommandRecord::new(command, old.kind))
            .await
    }

    /// Replaces the phrasings of the record at `index` wholesale. On any
    /// failure the record keeps the phrasings it had.
    pub async fn rephrase(&self, index: usize) -> Result<()> {
        let _guard = self.store.begin_operation();
        let result = self.rephrase_item(index).await;
        if let Err(err) = &result {
            log_item_failure(index, err, "rephrase failed");
        }
        result
    }

    async fn rephrase_item(&self, index: usize) -> Result<()> {
        let record = self
            .store
            .get(index)
            .await
            .ok_or(GpsrError::NoSuchCommand(index))?;
        let phrasings = self.rephraser.rephrase(&record.command).await?;
        self.store.set_phrasings(index, phrasings).await
    }

    /// Rephrases every record in index order. One item's failure does not
    /// halt the remaining items, and successful updates are kept.
    pub async fn rephrase_all(&self) -> BatchReport {
        let _guard = self.store.begin_operation();
        let total = self.store.len().await;
        let mut report = BatchReport::new(total);
        for index in 0..total {
            match self.rephrase_item(index).await {
                Ok(()) => info!(index, total, "rephrased command"),
                Err(err) => {
                    log_item_failure(index, &err, "rephrase failed");
                    report.record_failure(index, err);
                }
            }
        }
        report
    }
}

/// Parse failures also log the full raw reply for diagnostics.
fn log_item_failure(index: usize, err: &GpsrError, what: &str) {
    if let GpsrError::Parse { reply, .. } = err {
        error!(index, %err, raw_reply = %reply, "{what}");
    } else {
        error!(index, %err, "{what}");
    }
}
