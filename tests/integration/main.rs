//! End-to-end tests: statement → parse → payoffs → rendering, and the
//! HTTP surface built on top.

mod pipeline;
mod http;
