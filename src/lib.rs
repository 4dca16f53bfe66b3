#[macro_use]
mod derive;
mod arithmetic;
mod error;

pub mod bls12_381;
pub mod ff_ext;

#[cfg(test)]
pub mod tests;

pub use bls12_381::*;
pub use error::{Error, Result};

pub extern crate ff;
