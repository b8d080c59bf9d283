// src/lib.rs

pub mod board;
pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod persistence;
pub mod service;
pub use crate::core::engine::ShoprEngine;
pub use crate::core::scores::ScoreTable;
pub use crate::error::{ShoprError, ShoprResult};
