//! Shared helpers for lexspan tests.

pub mod data_gen;
