//! # Preflight: Content Checks From the Command Line
//!
//! `preflight` analyzes the dependency graph of a content asset against a
//! registry snapshot, detects policy violations (editor-only content leaking
//! into shippable runtime references), and renders reports for humans
//! (Markdown, terminal trees) and tooling (JSON).
//!
//! The graph algorithms live in [`preflight_graph`]; this crate supplies the
//! snapshot loader, report assembly, terminal output, and the `preflight`
//! binary.

pub mod config;
pub mod output;
pub mod report;
pub mod snapshot;
