//! Host-side services used by the CLI.
//!
//! ARCHITECTURE
//! ============
//! Service modules own background work so the command handlers stay focused
//! on argument handling and output.

pub mod persistence;
