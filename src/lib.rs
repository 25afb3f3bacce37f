//! Shuttle - move AI coding sessions between tools
//!
//! Shuttle resumes a recorded AI coding-assistant session either in the tool
//! that recorded it or in a different one, translating trailing command-line
//! flags into the target tool's grammar along the way.

pub mod config;
pub mod forward;
pub mod resume;
pub mod sessions;
pub mod tools;
