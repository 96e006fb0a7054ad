//! HTTP transport

pub mod client;

pub use client::{HttpExecutor, HttpExecutorBuilder};
