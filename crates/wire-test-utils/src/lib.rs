//! Shared test fixtures for the config-wire workspace
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never
//! published.
//!
//! # Modules
//!
//! - [`beans`] — bean types implementing [`wire_core::Wired`] plus the
//!   registry that knows them all
//! - [`handlers`] — a recording reference handler double
//! - [`logging`] — tracing subscriber setup for test runs

pub mod beans;
pub mod handlers;
pub mod logging;

pub use beans::{
    BeanWithMap, ChildBean, EnumBean, FailingHookBean, FakeClient, Flavor, ParentBean, SimpleBean,
    TestBean, test_registry,
};
pub use handlers::{RecordingHandler, ResolveCall};
