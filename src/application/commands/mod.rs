//! Text-transform commands and the adapter that makes them dispatchable

pub mod adapter;
pub mod cipher;

pub use adapter::{crypt_command, Transformed};
pub use cipher::{random_command, reverse, rot13, xor_block_chaining};
