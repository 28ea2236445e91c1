//! Async client for the chirpy HTTP API.

pub mod client;

pub use client::{Chirp, ChirpyClient, ClientError, ClientResult, User};
