//! Integration tests for genre-linker

mod support;

#[cfg(unix)]
mod clear_runs;
#[cfg(unix)]
mod create_runs;
mod library_sync;
