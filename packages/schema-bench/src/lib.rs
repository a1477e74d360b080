/*
 * Schema Bench - Validation Library Benchmark Runner
 *
 * Layout:
 * - schema/     : Declarative validation library under measurement
 * - benchmark/  : Cases, guard, trials, comparison, reporting
 * - suites/     : Built-in test cases
 * - config/     : YAML run configuration
 *
 * Flow:
 * - Resolve every case for the selected library version
 * - Guard all fixtures before anything is timed
 * - Time each fixture, compare against a previous run, report
 */

// Crate-level lint configuration
#![allow(clippy::type_complexity)] // Boxed case closures
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::unnecessary_map_or)] // map_or style for compatibility

pub mod benchmark;
pub mod config;
pub mod schema;
pub mod suites;

pub use benchmark::{BenchmarkError, BenchmarkResult};
pub use schema::{Library, Schema, ValidationError};
