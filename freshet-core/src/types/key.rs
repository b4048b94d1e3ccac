//! Grouping keys for keyed aggregations

use std::fmt::Debug;
use std::hash::Hash;

/// A value records can be grouped by.
///
/// `Ord` is required because aggregate rows are always emitted in ascending
/// key order.
#[diagnostic::on_unimplemented(
    message = "Type must be `Clone + Eq + Hash + Ord + Debug + 'static` to be used as a grouping key"
)]
pub trait Key: Clone + Eq + Hash + Ord + Debug + 'static {}
impl<T: Clone + Eq + Hash + Ord + Debug + 'static> Key for T {}
