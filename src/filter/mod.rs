//! Row filtering for record batches
//!
//! Filters decide row admission only; they never merge or derive columns.
//! [`core`] holds the mask application and the [`BatchFilter`] trait,
//! [`expr`] evaluates column equality predicates and [`request`] implements
//! membership filtering on request numbers.

pub mod core;
pub mod expr;
pub mod request;

pub use self::core::{BatchFilter, filter_record_batch};
pub use self::expr::{Expr, ExpressionFilter};
pub use self::request::{
    RequestFilter, normalize_request_number, normalized_request_numbers, request_id_set,
};
