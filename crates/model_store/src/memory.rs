//! In-memory model archive
//!
//! Backs the store in tests and single-process deployments without a
//! database. Publish atomicity holds trivially: the version map and the
//! active marker change under one write lock.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use core_kernel::{DomainPort, ModelVersionId, PortError};
use domain_scoring::ModelParameters;

use crate::archive::ModelArchive;

#[derive(Default)]
struct Inner {
    versions: Vec<ModelVersionId>,
    parameters: HashMap<ModelVersionId, ModelParameters>,
    active: Option<ModelVersionId>,
}

/// HashMap-backed archive
#[derive(Default)]
pub struct InMemoryModelArchive {
    inner: RwLock<Inner>,
}

impl InMemoryModelArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryModelArchive {}

#[async_trait]
impl ModelArchive for InMemoryModelArchive {
    async fn publish(&self, parameters: &ModelParameters) -> Result<(), PortError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| PortError::internal("archive lock poisoned"))?;
        let version = parameters.version;
        if inner.parameters.insert(version, parameters.clone()).is_none() {
            inner.versions.push(version);
        }
        inner.active = Some(version);
        Ok(())
    }

    async fn fetch(
        &self,
        version: ModelVersionId,
    ) -> Result<Option<ModelParameters>, PortError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| PortError::internal("archive lock poisoned"))?;
        Ok(inner.parameters.get(&version).cloned())
    }

    async fn fetch_active(&self) -> Result<Option<ModelParameters>, PortError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| PortError::internal("archive lock poisoned"))?;
        Ok(inner
            .active
            .and_then(|version| inner.parameters.get(&version).cloned()))
    }

    async fn versions(&self) -> Result<Vec<ModelVersionId>, PortError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| PortError::internal("archive lock poisoned"))?;
        Ok(inner.versions.clone())
    }
}
