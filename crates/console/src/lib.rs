//! `foundrytrack-console` library crate.
//!
//! A line-oriented front end over the pattern registry: each input line is a
//! command, each command renders one screen. Re-exports its modules for
//! integration testing; the binary entrypoint lives in `main.rs`.

pub mod command;
pub mod config;
pub mod render;
pub mod shell;
