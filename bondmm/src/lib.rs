#![no_std]

pub mod admin;
pub mod common;
pub mod contract;
pub mod fixed_point;
pub mod oracle_adapter;
pub mod operations;
pub mod pool_core;
pub mod pricing;

pub use contract::{BondMmA, BondMmAClient};
pub use common::error::Error;

#[cfg(test)]
mod test;
