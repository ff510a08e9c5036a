pub mod config;
pub mod sessions;
pub mod sync;
