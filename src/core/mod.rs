// src/core/mod.rs

pub mod engine;
pub mod merger;
pub mod orderer;
pub mod quantity;
pub mod scores;
pub mod types;
