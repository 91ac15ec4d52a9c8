//! Core interfaces and types.

pub mod block;
pub mod color;
pub mod input;
pub mod layout;
pub mod output;
pub mod terminal;
pub mod text;
