//! daylog - Personal log of dated entries
//!
//! Keeps entry metadata in a queryable record store and each entry's markdown
//! body in a separate path-addressed blob store, and keeps the two consistent
//! across creation and reads.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DaylogError;
