//! Node model integration tests
//!
//! Tests are organized by behavior: typed access, placeholders, deferred
//! failures, mutation, equality, references and concurrent access.

mod empty_tests;
mod error_tests;
mod mutation_tests;
