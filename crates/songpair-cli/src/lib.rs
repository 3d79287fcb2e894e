//! SongPair CLI library.
//!
//! Command implementations shared by the `songpair` binary.

pub mod commands;
