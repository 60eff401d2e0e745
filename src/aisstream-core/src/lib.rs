#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Domain types, normalization and collaborator ports for tracking aisstream.io traffic around
//! a moving reference point.

mod domain;
mod error;
mod normalizer;
mod ports;

pub use domain::*;
pub use error::*;
pub use normalizer::*;
pub use ports::*;
