//! Genre Linker: genre folders of symlinks for a Jellyfin library
//!
//! Fetches the media server catalog, matches local movie and show folders to
//! catalog items by title and year, and links each folder into one directory per
//! genre. Each genre directory can then be registered as a virtual library.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod matcher;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod server;
