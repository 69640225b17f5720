//! Command-line stand-ins for the editor's text view and job runner

pub mod jobs;
pub mod surface;

pub use jobs::ForegroundJobRunner;
pub use surface::{DocumentSurface, parse_region};
