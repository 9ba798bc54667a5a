//! Okta directory integration: the users-API client and its retry policy.

mod client;
mod retry;

pub use client::{OktaClient, OktaError};
pub use retry::RetryPolicy;
