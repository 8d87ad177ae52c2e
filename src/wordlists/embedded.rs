//! Embedded word lists
//!
//! Answer pool and extra accepted guesses, compiled into the binary at build time.

include!(concat!(env!("OUT_DIR"), "/answers.rs"));
include!(concat!(env!("OUT_DIR"), "/allowed.rs"));
