//! Storefront API Test Harness
//!
//! This crate provides the test-execution environment abstraction for the
//! Storefront suites: the same test body runs against an in-process mock
//! responder or a deployed backend, selected and managed at runtime.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  TestLifecycle (per test)                  │
//! │    setup_suite ── select default provider                  │
//! │    setup_class ── rebuild request spec                     │
//! │    setup_method ─ rebuild request spec + reset mock        │
//! │    teardown_* ─── reset / shutdown                         │
//! ├────────────────────────────────────────────────────────────┤
//! │  EnvironmentRegistry                                       │
//! │    active: Box<dyn ServerProvider> ──┬── MockServerProvider│
//! │    base_url: String                  └── RealServerProvider│
//! ├────────────────────────────────────────────────────────────┤
//! │  RequestSpec ── reqwest, verbatim paths, default headers   │
//! │  stubs / fixtures ── wiremock DSL + canned JSON            │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod fixtures;
pub mod lifecycle;
pub mod logging;
pub mod mock;
pub mod provider;
pub mod real;
pub mod registry;
pub mod request;
pub mod stubs;

pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use fixtures::FixtureDir;
pub use lifecycle::{LifecycleState, TestLifecycle};
pub use mock::MockServerProvider;
pub use provider::{EnvironmentDescriptor, ServerProvider};
pub use real::RealServerProvider;
pub use registry::EnvironmentRegistry;
pub use request::{ApiResponse, RequestSpec};
