//! ROI Engine library crate.
//!
//! This crate exposes the tiny-home rental return-on-investment
//! calculator and its API components as reusable modules.  External
//! applications may depend on the `roi_engine` crate and call
//! `engine::compute` directly, hold an `engine::Calculator` with their
//! own configuration, or embed the API via `api::build_router`.

pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;

pub use engine::{compute, Calculator};
pub use error::{Result, RoiError};
