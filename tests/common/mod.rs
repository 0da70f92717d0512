#![allow(dead_code)]

pub mod fixtures;
pub mod memory_store;
pub mod strategies;

pub use fixtures::*;
pub use memory_store::*;
pub use strategies::*;
