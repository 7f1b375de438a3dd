//! Domain layer for pole-vault run-up & pole analysis
//!
//! Pure models and services. The only I/O boundary is the
//! [`repository::ReferenceDataRepository`] trait, implemented in the
//! infrastructure crate.

pub mod model;
pub mod repository;
pub mod service;
