use crate::database::CatalogRepository;
use crate::domain::ProductTag;
use crate::services::reconcile::reconcile;
use derive_more::derive::Display;
use serde::Serialize;
use std::sync::Arc;

/// Which bulk half of a reconciliation actually landed before the other
/// half failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AppliedHalf {
    #[display("deletions")]
    Deletions,
    #[display("creations")]
    Creations,
}

#[derive(Debug, Display)]
pub enum TagSyncError {
    /// Nothing was applied; the product's pairings are unchanged.
    #[display("tag sync failed before any pairings changed: {_0}")]
    Storage(anyhow::Error),

    /// One bulk half landed and the other failed. The product's pairings are
    /// in an intermediate state the caller must not report as success.
    #[display("tag sync partially applied ({applied} went through): {error}")]
    Partial {
        applied: AppliedHalf,
        error: anyhow::Error,
    },
}

/// What a reconciliation actually changed, echoed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct TagSyncReport {
    pub deleted_pairing_ids: Vec<i64>,
    pub created_pairings: Vec<ProductTag>,
}

/// Sole owner of product_tags writes. Plans with [`reconcile`] and applies
/// the two bulk halves concurrently; they touch disjoint rows so neither
/// waits on the other.
pub struct TagSyncService {
    repo: Arc<dyn CatalogRepository>,
}

impl TagSyncService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Drives the product's persisted pairings to exactly `desired_tag_ids`.
    ///
    /// Idempotent: running it again with the same ids returns an empty report.
    /// Not atomic: if one bulk half fails after the other succeeded, that
    /// surfaces as [`TagSyncError::Partial`], never as success.
    pub async fn sync_product_tags(
        &self,
        product_id: i64,
        desired_tag_ids: &[i64],
    ) -> Result<TagSyncReport, TagSyncError> {
        let current = self
            .repo
            .get_pairings_for_product(product_id)
            .await
            .map_err(TagSyncError::Storage)?;

        let plan = reconcile(product_id, desired_tag_ids, &current);

        if plan.is_noop() {
            return Ok(TagSyncReport::default());
        }

        let (deleted, created) = tokio::join!(
            self.repo.delete_pairings(&plan.to_delete),
            self.repo.create_pairings(&plan.to_create),
        );

        match (deleted, created) {
            (Ok(_), Ok(created_pairings)) => Ok(TagSyncReport {
                deleted_pairing_ids: plan.to_delete,
                created_pairings,
            }),

            // creations failed after real deletions went through
            (Ok(_), Err(error)) if !plan.to_delete.is_empty() => Err(TagSyncError::Partial {
                applied: AppliedHalf::Deletions,
                error,
            }),

            // deletions failed after real creations went through
            (Err(error), Ok(created_pairings)) if !created_pairings.is_empty() => {
                Err(TagSyncError::Partial {
                    applied: AppliedHalf::Creations,
                    error,
                })
            }

            // the half that failed was the only one with work to do
            (Err(error), _) | (_, Err(error)) => Err(TagSyncError::Storage(error)),
        }
    }
}
