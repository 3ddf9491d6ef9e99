// src/doc/mod.rs
pub mod client;
pub mod normalize;
