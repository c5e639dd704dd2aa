//! BIDASK — bid/ask bet statement parser and payoff calculator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod parser;
pub mod calculator;
pub mod render;
pub mod query;
pub mod storage;
pub mod dashboard;
