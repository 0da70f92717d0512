//! Query Builder Tests Module

pub mod builder;
