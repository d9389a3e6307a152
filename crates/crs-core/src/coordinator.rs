use std::sync::Arc;

use crs_index::IndexStore;
use crs_store::ObjectStore;
use crs_types::Record;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{CoordinatorError, CoordinatorResult};
use crate::saga::SagaPhase;

/// Outcome of a successful store-and-index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored {
    pub id: String,
    pub document_id: String,
}

/// Tracks the current saga phase and logs each transition.
struct Saga<'a> {
    op: &'static str,
    subject: &'a str,
    phase: SagaPhase,
}

impl<'a> Saga<'a> {
    fn begin(op: &'static str, subject: &'a str) -> Self {
        debug!(op, subject, phase = %SagaPhase::Validating, "saga started");
        Self {
            op,
            subject,
            phase: SagaPhase::Validating,
        }
    }

    fn advance(&mut self, next: SagaPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal saga transition {} -> {}",
            self.phase,
            next
        );
        debug!(op = self.op, subject = self.subject, from = %self.phase, to = %next, "saga phase");
        self.phase = next;
    }

    /// Move to `Failed` and hand back the error that caused it.
    fn fail<E: Into<CoordinatorError>>(&mut self, error: E) -> CoordinatorError {
        self.advance(SagaPhase::Failed);
        error.into()
    }
}

/// Orchestrates the object store and the index store.
///
/// Constructed once with its collaborators and shared by reference with
/// every request handler. Steps run sequentially; the coordinator holds no
/// locks and keeps no state of its own.
pub struct Coordinator {
    objects: Arc<dyn ObjectStore>,
    index: Arc<dyn IndexStore>,
}

impl Coordinator {
    pub fn new(objects: Arc<dyn ObjectStore>, index: Arc<dyn IndexStore>) -> Self {
        Self { objects, index }
    }

    pub fn objects(&self) -> &Arc<dyn ObjectStore> {
        &self.objects
    }

    pub fn index(&self) -> &Arc<dyn IndexStore> {
        &self.index
    }

    /// Persist a record and index it under `query_key`.
    ///
    /// If indexing fails, the freshly written record is deleted again and the
    /// indexing failure is returned. The outcome of that compensating delete
    /// is logged and otherwise discarded.
    pub async fn store_and_index(
        &self,
        document_id: &str,
        checksum: u32,
        payload: Vec<u8>,
        query_key: &str,
    ) -> CoordinatorResult<Stored> {
        let mut saga = Saga::begin("store_and_index", document_id);

        if document_id.is_empty() {
            return Err(saga.fail(CoordinatorError::InvalidInput("document id is empty".into())));
        }
        if query_key.is_empty() {
            return Err(saga.fail(CoordinatorError::InvalidInput("query key is empty".into())));
        }

        saga.advance(SagaPhase::Persisting);
        let id = match self.objects.store(document_id, checksum, payload).await {
            Ok(id) => id,
            Err(e) => return Err(saga.fail(e)),
        };

        saga.advance(SagaPhase::Indexing);
        match self.index.add(query_key, &id).await {
            Ok(()) => {
                saga.advance(SagaPhase::Succeeded);
                trace!(%id, document_id, query_key, "stored and indexed record");
                Ok(Stored {
                    id,
                    document_id: document_id.to_string(),
                })
            }
            Err(index_err) => {
                saga.advance(SagaPhase::Compensating);
                match self.objects.delete(&id).await {
                    Ok(()) => debug!(%id, "compensating delete succeeded"),
                    Err(e) => warn!(%id, error = %e, "compensating delete failed; record left orphaned"),
                }
                Err(saga.fail(index_err))
            }
        }
    }

    /// Delete a record and remove it from every named query.
    ///
    /// The record is deleted first. If the index sweep then fails, the record
    /// is already gone while some memberships remain.
    pub async fn delete_everywhere(&self, id: &str) -> CoordinatorResult<()> {
        if id.is_empty() {
            return Err(CoordinatorError::InvalidInput("record id is empty".into()));
        }
        debug!(id, "deleting record everywhere");
        self.objects.delete(id).await?;
        self.index.remove_from_all(id).await?;
        trace!(id, "deleted record and its index entries");
        Ok(())
    }

    /// Read a record by identifier.
    pub async fn get(&self, id: &str) -> CoordinatorResult<Option<Record>> {
        Ok(self.objects.get(id).await?)
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator").finish_non_exhaustive()
    }
}
