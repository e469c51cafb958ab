use crate::domain::{ProductTag, ProductTagDraft};
use std::collections::{BTreeSet, HashSet};

/// The minimal delta between a product's persisted tag pairings and the set
/// of tag ids a request wants it to have.
///
/// The two halves touch disjoint rows: `to_delete` names existing pairing ids,
/// `to_create` names pairings that do not exist yet. They can be applied in
/// either order, or at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcilePlan {
    pub to_delete: Vec<i64>,
    pub to_create: Vec<ProductTagDraft>,
}

impl ReconcilePlan {
    pub fn is_noop(&self) -> bool {
        self.to_delete.is_empty() && self.to_create.is_empty()
    }
}

/// Diffs desired tag ids against the currently persisted pairings.
///
/// Desired ids are treated as a set: duplicates in the request collapse to one
/// pairing. Duplicate persisted pairs are tolerated; they all survive while
/// their tag stays desired and are all deleted once it is not. Replanning
/// against the post-state always yields an empty plan.
pub fn reconcile(
    product_id: i64,
    desired_tag_ids: &[i64],
    current_pairings: &[ProductTag],
) -> ReconcilePlan {
    // BTreeSet dedupes and gives the create half a deterministic order
    let desired: BTreeSet<i64> = desired_tag_ids.iter().copied().collect();

    let current_tag_ids: HashSet<i64> = current_pairings.iter().map(|p| p.tag_id).collect();

    let to_create = desired
        .iter()
        .filter(|tag_id| !current_tag_ids.contains(tag_id))
        .map(|&tag_id| ProductTagDraft { product_id, tag_id })
        .collect();

    let to_delete = current_pairings
        .iter()
        .filter(|pairing| !desired.contains(&pairing.tag_id))
        .map(|pairing| pairing.id)
        .collect();

    ReconcilePlan {
        to_delete,
        to_create,
    }
}
