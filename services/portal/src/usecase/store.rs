use tracing::{error, info, warn};

use portal_domain::dataset::Dataset;

use crate::domain::repository::SlotStore;
use crate::domain::types::DATASET_SLOT;
use crate::error::StorageError;

// ── LoadDataset ──────────────────────────────────────────────────────────────

pub struct LoadDatasetUseCase<'a, S: SlotStore> {
    pub store: &'a S,
}

impl<S: SlotStore> LoadDatasetUseCase<'_, S> {
    /// Read the stored document. A missing, unreadable or corrupt document is
    /// replaced by the seed, which is persisted immediately.
    pub async fn execute(&self) -> Dataset {
        let stored = match self.store.get(DATASET_SLOT).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, "dataset slot unreadable");
                None
            }
        };

        match stored.map(|text| serde_json::from_str::<Dataset>(&text)) {
            Some(Ok(dataset)) => {
                info!(
                    accounts = dataset.accounts.len(),
                    employees = dataset.employees.len(),
                    requests = dataset.requests.len(),
                    "dataset loaded"
                );
                return dataset;
            }
            Some(Err(e)) => error!(error = %e, "stored dataset is corrupt, reseeding"),
            None => info!("no stored dataset, seeding defaults"),
        }

        let seed = Dataset::seed();
        if let Err(e) = (SaveDatasetUseCase { store: self.store })
            .execute(&seed)
            .await
        {
            warn!(error = %e, "seeded dataset could not be persisted");
        }
        seed
    }
}

// ── SaveDataset ──────────────────────────────────────────────────────────────

pub struct SaveDatasetUseCase<'a, S: SlotStore> {
    pub store: &'a S,
}

impl<S: SlotStore> SaveDatasetUseCase<'_, S> {
    /// Rewrite the whole document. The caller's in-memory copy is left as is
    /// on failure, so memory and storage may diverge until the next save.
    pub async fn execute(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let text = serde_json::to_string(dataset)?;
        self.store.set(DATASET_SLOT, &text).await
    }
}
