//! Filesystem utilities for smartcode.

pub mod atomic;

pub use atomic::atomic_write;
