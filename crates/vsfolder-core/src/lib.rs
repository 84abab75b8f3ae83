//! # vsfolder-core
//!
//! Core crate for vsphere-folder. Contains the inventory client trait,
//! inventory path and reference types, configuration schemas, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other vsphere-folder crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
