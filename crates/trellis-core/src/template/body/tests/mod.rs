//! Tests for the body interpreter
//!
//! Organized by concern, mirroring the interpreter's tag kinds.

// Shared scope and runner
mod helpers;


mod render_loops;
mod render_sections;

// Error and edge case tests
mod errors;
