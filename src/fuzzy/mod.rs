// src/fuzzy/mod.rs

pub mod normalizer;
