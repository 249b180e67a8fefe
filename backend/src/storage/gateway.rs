//! Typed persistence of the ledger collections.
//!
//! Each collection is stored whole, as one JSON array under its own key, so
//! a write is all-or-nothing per collection.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};

use super::traits::KeyValueStore;
use crate::domain::ledger::Ledger;
use crate::domain::sample_data;

/// The four persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Applications,
    Clients,
    Transactions,
    Gallery,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Applications,
        Collection::Clients,
        Collection::Transactions,
        Collection::Gallery,
    ];

    /// Storage key, unchanged from the original browser storage layout
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Applications => "loanApplications",
            Collection::Clients => "loanClients",
            Collection::Transactions => "loanTransactions",
            Collection::Gallery => "livestockGallery",
        }
    }
}

#[derive(Clone)]
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn save_collection<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)
            .with_context(|| format!("Failed to serialize {}", collection.key()))?;
        self.store
            .put_value(collection.key(), &json)
            .await
            .with_context(|| format!("Failed to write {}", collection.key()))
    }

    /// Write the named collections from `ledger`. Every collection is
    /// attempted even if an earlier one fails.
    pub async fn persist(&self, ledger: &Ledger, collections: &[Collection]) -> Result<()> {
        let mut failed = Vec::new();

        for collection in collections {
            let result = match collection {
                Collection::Applications => self.save_collection(*collection, ledger.applications()).await,
                Collection::Clients => self.save_collection(*collection, ledger.clients()).await,
                Collection::Transactions => self.save_collection(*collection, ledger.transactions()).await,
                Collection::Gallery => self.save_collection(*collection, ledger.gallery()).await,
            };
            if let Err(e) = result {
                error!("❌ {:#}", e);
                failed.push(collection.key());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Failed to persist {}", failed.join(", ")))
        }
    }

    /// Load the whole ledger.
    ///
    /// A collection that has never been stored is seeded with sample data
    /// when `seed` is set, and the seed is written back. A collection that is
    /// stored but unreadable starts empty and is left as is in storage.
    /// Only a failing store is an error.
    pub async fn load(&self, now: DateTime<Utc>, seed: bool) -> Result<Ledger> {
        let applications = self
            .load_or_seed(Collection::Applications, seed, || sample_data::sample_applications(now))
            .await?;
        let clients = self
            .load_or_seed(Collection::Clients, seed, || sample_data::sample_clients(now))
            .await?;
        let transactions = self
            .load_or_seed(Collection::Transactions, seed, || sample_data::sample_transactions(now))
            .await?;
        let gallery = self
            .load_or_seed(Collection::Gallery, seed, || sample_data::sample_gallery(now))
            .await?;

        let ledger = Ledger::from_parts(applications, clients, transactions, gallery);
        for problem in ledger.audit() {
            warn!("⚠️ Ledger inconsistency: {}", problem);
        }

        info!(
            "Loaded {} applications, {} clients, {} transactions, {} listings",
            ledger.applications().len(),
            ledger.clients().len(),
            ledger.transactions().len(),
            ledger.gallery().len()
        );
        Ok(ledger)
    }

    async fn load_or_seed<T, F>(&self, collection: Collection, seed: bool, sample: F) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let raw = self
            .store
            .get_value(collection.key())
            .await
            .with_context(|| format!("Failed to read {}", collection.key()))?;

        let Some(raw) = raw else {
            if !seed {
                return Ok(Vec::new());
            }
            let items = sample();
            info!("🌱 Seeding {} with {} sample records", collection.key(), items.len());
            if let Err(e) = self.save_collection(collection, &items).await {
                warn!("⚠️ Sample {} not saved: {:#}", collection.key(), e);
            }
            return Ok(items);
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                error!(
                    "❌ Stored {} could not be read, starting with none: {}",
                    collection.key(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}
