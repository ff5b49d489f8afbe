//! Shared test utilities for the provis workspace.
//!
//! This crate provides the chef fixture set and scratch directories used
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] - paths into `test-fixtures/chef`
//! - [`workspace`] - [`TestWorkspace`] for writing ad-hoc sources

pub mod fixtures;
pub mod workspace;

pub use fixtures::{chef_fixture, fixture_paths, fixtures_dir};
pub use workspace::TestWorkspace;

/// Address of the `web.sharespost.com` fixture server
pub const WEB_IP: &str = "108.166.98.115";

/// Address of the `db.sharespost.com` fixture server
pub const DB_IP: &str = "51.51.51.51";

/// Address of the `demo.sharespost.com` fixture server
pub const DEMO_IP: &str = "52.52.52.52";
