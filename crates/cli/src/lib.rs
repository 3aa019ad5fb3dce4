// crates/cli/src/lib.rs
// bitflags / windows-sys arrive in several versions through clap, ignore and rusqlite
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod census;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod options;
pub mod parsers;
pub mod presentation;
