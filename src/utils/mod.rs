//! Utility modules: app directory and file persistence.

pub mod persistence;

pub use persistence::AppDirs;
