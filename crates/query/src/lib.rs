//! Athena Query Engine
//!
//! Predicate-based queries over an in-memory snapshot of records:
//! - **Count**: how many records satisfy a predicate
//! - **Filtered projection**: project every matching record, keeping input order
//! - **Two-argument predicates**: the predicate also receives a field derived
//!   from the record (e.g. the order fee)
//!
//! Queries are pure. Records are only borrowed for the duration of the call,
//! never copied, mutated or reordered.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use athena_query::{count_matching, predicates};
//!
//! let expensive = count_matching(&orders, |o| o.price >= dec!(1.70));
//! let expensive_sells = count_matching(
//!     &orders,
//!     predicates::all_of(predicates::price_at_least(dec!(1.70)), predicates::side_is(Side::Sell)),
//! );
//! ```

pub mod book;
pub mod error;
pub mod matching;
pub mod predicates;

pub use book::{audit_matching, count_matching_with_fee};
pub use error::{BoxError, QueryError, Result, Stage};
pub use matching::{
    count_matching, count_matching_with, matching, project_matching, try_count_matching,
    try_count_matching_with, try_project_matching,
};
