//! Generic utility primitives with zero domain knowledge.
//!
//! - `coerce` - Loose scalar parsing (booleans, integers, truthiness)
//! - `sanitize` - URL and path character filtering
//! - `validation` - Input validation helpers

pub mod coerce;
pub mod sanitize;
pub mod validation;
