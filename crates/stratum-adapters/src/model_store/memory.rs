//! In-memory domain model store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use stratum_core::{
    application::{ApplicationError, ports::DomainModelStore},
    domain::App,
    error::StratumResult,
};

/// Thread-safe store keyed by app name.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    inner: Arc<RwLock<BTreeMap<String, App>>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `apps` already inserted. Later apps replace earlier ones
    /// of the same name.
    pub fn with_apps(apps: impl IntoIterator<Item = App>) -> StratumResult<Self> {
        let store = Self::new();
        for app in apps {
            store.insert(app)?;
        }
        Ok(store)
    }

    /// Insert or replace a model.
    pub fn insert(&self, app: App) -> StratumResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        inner.insert(app.name.clone(), app);
        Ok(())
    }

    pub fn remove(&self, name: &str) -> StratumResult<Option<App>> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        Ok(inner.remove(name))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainModelStore for InMemoryModelStore {
    fn load_app(&self, name: &str) -> StratumResult<App> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::ModelNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list_apps(&self) -> StratumResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.keys().cloned().collect())
    }
}

fn lock_poisoned() -> ApplicationError {
    ApplicationError::StoreAccess {
        reason: "model store lock poisoned".into(),
    }
}
