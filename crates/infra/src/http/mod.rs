//! HTTP transport shared by every endpoint of a client

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
