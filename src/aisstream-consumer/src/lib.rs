#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Implements a binary that keeps an aisstream.io subscription centered on our own position and
//! publishes every received report as a Signal K delta.

pub mod consumer;
pub mod emitter;
pub mod error;
pub mod position;
pub mod session;
pub mod settings;
pub mod sink;
pub mod startup;
pub mod tracker;
pub mod websocket;
