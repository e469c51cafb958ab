pub mod reconcile;
pub mod tag_sync;
