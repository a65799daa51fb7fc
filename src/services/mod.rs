// src/services/mod.rs
pub mod prompt;
pub mod providers;
pub mod relay;
