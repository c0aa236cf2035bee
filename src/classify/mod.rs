//! Groups the sets container's children into storage sets and junk.

mod core;

pub use self::core::{Classification, Classifier, Column, FillState, StorageSet, sort_by_name};
