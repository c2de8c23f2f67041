//! Observability for pagegate.
//! `tracing` crate with `EnvFilter`, configured through `PAGEGATE_LOG`.

pub mod setup;

pub use setup::init_tracing;
