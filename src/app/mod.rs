// logscope - app/mod.rs
//
// Application layer: batch acquisition and report rendering.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod report;
pub mod source;
