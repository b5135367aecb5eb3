//! An ordered set of integers backed by a doubly linked skip list.
//!
//! Every level keeps both a forward and a backward chain between two permanent
//! sentinels, so the set can be walked from either end. Nodes live in a dense
//! arena and link to each other through indices instead of pointers.
//!
//! ```
//! use skipset::SkipList;
//!
//! let mut list = SkipList::with_seed(4, 7).unwrap();
//! for value in [10, 20, 5, 15] {
//!     list.insert(value);
//! }
//!
//! assert!(list.search(15));
//! assert!(list.delete(20).is_ok());
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![5, 10, 15]);
//! ```
#![warn(
    // missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
pub mod config;
pub mod dump;
pub mod error;
mod internal;

pub use config::Config;
pub use dump::{Direction, Dump};
pub use error::SkipListError;
pub use internal::skiplist::{iter::Iter, SkipList};
pub use internal::utils::{CoinFlip, GeneratesLevel, DEFAULT_MAX_LEVELS, LEVEL_LIMIT};
