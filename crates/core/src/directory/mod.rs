//! Picking the directory a command runs in

pub mod resolver;

pub use resolver::{DirectoryResolver, directory_of, home_dir};
