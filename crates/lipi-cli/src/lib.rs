//! Command implementations for the lipitool binary.

pub mod commands;
