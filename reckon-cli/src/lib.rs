//! Command-line client for Reckon.
//!
//! Local evaluation goes straight to `reckon-core`; everything else talks to a
//! running `reckon-http` server through [`api_client::ReckonClient`].

pub mod api_client;
pub mod config;
pub mod error;
