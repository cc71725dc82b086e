//! Linear Viewer - fetch, filter and sort Linear issues from the terminal.
//!
//! The library exposes the issue pipeline (fetch client, filter-sort engine,
//! branch names, view controller) for the binary and for integration tests.

pub mod actions;
pub mod branch;
pub mod browser;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod output;
pub mod queries;
pub mod types;
