//! Persisted, observable keyed stores.
//!
//! Two stores share the machinery here: the favorites set (a JSON array of
//! full items) and the rating map (a JSON object keyed by
//! `"<name>|<brewery>"`). Both load eagerly, never fail to load, and write
//! through on every mutation. Consumers subscribe for change notifications
//! instead of polling.

pub mod favorites;
pub mod ratings;
pub mod record;
pub mod storage;

pub use favorites::{FavoriteChange, FavoriteSet};
pub use ratings::{RatingChange, RatingMap};
pub use record::JsonStore;
pub use storage::{FileStorage, MemoryStorage, Storage};
