//! Orchestration of a stereogram run.
//!
//! A `StereoSession` owns the left/right pair, optionally registers it on a
//! feature picked in both photographs, and writes one file per requested
//! compositor. Files are never overwritten: each output takes the first
//! unused `{prefix}_{label}_{NNN}.{ext}` name in its store.
//!
//! The free-name scan is not atomic. Concurrent runs against one directory
//! may pick the same name, in which case one output is lost.

mod config;
mod error;
mod io;
mod session;
mod store;

pub use config::SessionConfig;
pub use error::{StereoError, StereoResult};
pub use io::{load_frame, save_frame};
pub use session::{SavedOutput, SessionReport, StereoPair, StereoSession};
pub use store::{FsStore, OutputStore, next_available_name, output_file_name};
