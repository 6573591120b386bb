#![no_std]

pub mod admin;
pub mod common;
pub mod contract;
pub mod error;

pub use contract::{AnchorOracle, AnchorOracleClient};
pub use error::Error;
