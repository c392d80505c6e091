//! Movieweb - personal movie lists and reviews
//!
//! This library crate wires configuration, store selection and sample data
//! together for the `movieweb` binary and for integration testing.

pub mod config;
pub mod seed;
pub mod store;
