//! Foundation types for the CV terminal.
//!
//! This crate contains the front-end-agnostic types shared by the terminal
//! core and its front ends: key events, configuration, and error types.

pub mod config;
pub mod error;
pub mod input;
