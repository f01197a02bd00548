//! REST backend adapter.
//!
//! - `client`: [`HttpPortalClient`], implementing every backend trait
//! - `wire`: request/response shapes and error-body parsing

mod client;
mod wire;

pub use client::HttpPortalClient;
