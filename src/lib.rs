//! Core library for the `reqtime` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, request building and bounded dispatch,
//! latency aggregation, chart rendering, and the run/report orchestration.
//! The primary user-facing interface is the `reqtime` command-line
//! application.
pub mod app;
pub mod args;
pub mod charts;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
