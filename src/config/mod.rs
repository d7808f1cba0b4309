//! Configuration model for smartcode.
//!
//! Configuration is optional. It is read only from a file named with
//! `--config` (or `SMARTCODE_CONFIG`); without one, every setting takes its
//! default and the tool behaves as a plain `ollama run <model>` front end.
//! Unknown YAML fields are ignored for forward compatibility.

mod model;
mod operations;


pub use model::{Config, DEFAULT_COMMAND, DEFAULT_MODEL};
