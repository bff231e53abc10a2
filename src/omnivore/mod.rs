//! Omnivore export module

mod export;

pub use export::*;
