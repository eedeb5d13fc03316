//! # unitroot-rs
//!
//! Stationarity and panel unit-root testing utilities for empirical
//! time-series work.
//!
//! - [`unitroot`]: the augmented Dickey-Fuller test with automatic lag
//!   selection and MacKinnon approximate p-values.
//! - [`classify`]: per-column stationarity classification of a series
//!   table, and sequential differencing up to a bound.
//! - [`panel`]: Maddala-Wu, Choi and Levin-Lin-Chu panel unit-root tests
//!   over a wide matrix of units, with a printable summary.

pub mod classify;
pub mod panel;
pub mod table;
pub mod unitroot;
