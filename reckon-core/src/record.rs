//! Persisted calculations.
//!
//! A [`CalculationRecord`] is a validated request plus its evaluated result,
//! an owner and timestamps. Records are kept behind the
//! [`CalculationRepository`] trait; [`InMemoryCalculationRepository`] is the
//! `DashMap`-backed implementation used by the HTTP server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::calculation::{CalculationError, CalculationKind, CalculationRequest};

pub type UserId = String;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Calculation not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A stored calculation owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: CalculationKind,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalculationRecord {
    /// Evaluate `request` and wrap it in a fresh record.
    pub fn new(user_id: impl Into<UserId>, request: CalculationRequest) -> RepositoryResult<Self> {
        let result = request.evaluate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            kind: request.kind(),
            inputs: request.into_inputs(),
            result,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge `update` into a copy of this record and re-evaluate it.
    ///
    /// `self` is left untouched when the merged pair fails validation or
    /// evaluation.
    pub fn apply(&self, update: CalculationUpdate) -> RepositoryResult<Self> {
        let kind = update.kind.unwrap_or(self.kind);
        let inputs = update.inputs.unwrap_or_else(|| self.inputs.clone());
        let request = CalculationRequest::new(kind, inputs)?;
        let result = request.evaluate()?;

        Ok(Self {
            kind: request.kind(),
            inputs: request.into_inputs(),
            result,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Partial update of a record; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationUpdate {
    pub kind: Option<CalculationKind>,
    pub inputs: Option<Vec<f64>>,
}

#[async_trait]
pub trait CalculationRepository: Send + Sync {
    async fn create(
        &self,
        user_id: &str,
        request: CalculationRequest,
    ) -> RepositoryResult<CalculationRecord>;

    async fn get(&self, id: Uuid) -> RepositoryResult<CalculationRecord>;

    /// Records owned by `user_id`, oldest first.
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<CalculationRecord>>;

    async fn update(
        &self,
        id: Uuid,
        update: CalculationUpdate,
    ) -> RepositoryResult<CalculationRecord>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    async fn count(&self) -> usize;
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryCalculationRepository {
    records: Arc<DashMap<Uuid, CalculationRecord>>,
}

impl InMemoryCalculationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn create(
        &self,
        user_id: &str,
        request: CalculationRequest,
    ) -> RepositoryResult<CalculationRecord> {
        let record = CalculationRecord::new(user_id, request)?;
        debug!(id = %record.id, user_id, kind = %record.kind, "calculation stored");
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<CalculationRecord> {
        self.records
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<CalculationRecord>> {
        let mut records: Vec<CalculationRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().is_owned_by(user_id))
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn update(
        &self,
        id: Uuid,
        update: CalculationUpdate,
    ) -> RepositoryResult<CalculationRecord> {
        let mut entry = self
            .records
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        let updated = entry.value().apply(update)?;
        *entry.value_mut() = updated.clone();
        debug!(%id, kind = %updated.kind, "calculation updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn count(&self) -> usize {
        self.records.len()
    }
}
