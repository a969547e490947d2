mod config;
mod disk;
mod error;
mod format;
mod nodes;
mod resize;

pub use self::{config::DiskConfig, disk::Disk, error::DiskError};
