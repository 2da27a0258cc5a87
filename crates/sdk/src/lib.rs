//! Contract dashboard SDK.
//!
//! # Overview
//!
//! Server-side core of the contract dashboard: resolves the chain of a
//! contract page request, builds credentialed contract handles, probes the
//! contract for the features it exposes, and decides whether the requested
//! sub-page renders or redirects to the contract landing page.
//!
//! Use [`chain::ChainRegistry::embedded`] to build the chain index once,
//! then [`router::PageRouter::route`] per request and [`render::render`] on
//! the resulting plan.
//!
//! Capability detection is a selector-presence heuristic over the resolved
//! contract interface, see [`probe`].
//!
//! # Features
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `display` | yes | Enables [`std::fmt::Display`] implementation for chains, flags and page views. |
//! | `testing` | yes | Enables [`testing`] module. |
//!
//! # Testing
//!
//! [`testing`] module provides in-memory ABI resolvers and session
//! providers, so routing can be exercised without an RPC endpoint.

pub mod abi;
pub mod address;
pub mod chain;
pub mod error;
pub mod handle;
pub mod probe;
pub mod render;
pub mod router;
#[cfg(feature = "testing")]
pub mod testing;
