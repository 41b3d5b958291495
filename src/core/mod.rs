// logscope - core/mod.rs
//
// Core analytics layer: data model, aggregation engine, filtering,
// mock batch generation, export.
// Must NOT depend on: app or platform layers, or any I/O beyond
// writing to caller-supplied Write sinks.

pub mod engine;
pub mod export;
pub mod filter;
pub mod mock;
pub mod model;
