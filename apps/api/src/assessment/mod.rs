pub mod benchmarks;
pub mod handlers;
pub mod questions;
pub mod scoring;
