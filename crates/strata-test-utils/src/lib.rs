//! Shared test utilities for the strata workspace.
//!
//! This crate provides on-disk application fixtures so integration tests do
//! not each hand-roll directory setup. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`app`]: [`TestApp`] builder for settings files under a temporary root

pub mod app;

pub use app::TestApp;
