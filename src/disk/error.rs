use disk_ops::PrintError;
use disk_types::{PartitionError, PartitionTableError};
use external::CommandError;
use std::io;

/// Defines a variety of errors that may arise from reading and changing the partition
/// table of a disk.
#[rustfmt::skip]
#[derive(Debug, Fail)]
pub enum DiskError {
    #[fail(display = "{}", why)]
    InvalidTable { why: PartitionTableError },
    #[fail(display = "partition {} can only be expanded, not shrunk: {} sectors requested, {} in use", number, requested, current)]
    Shrink { number: u32, requested: u64, current: u64 },
    #[fail(display = "there is no partition to expand on {}", device)]
    NoPartitions { device: String },
    #[fail(display = "msdos table on {} already has four primary partitions", device)]
    PrimaryLimit { device: String },
    #[fail(display = "not enough free space on {}: required {} sectors; available {} sectors", device, required, available)]
    InsufficientSpace { device: String, required: u64, available: u64 },
    #[fail(display = "{}", why)]
    Command { why: CommandError },
    #[fail(display = "unable to read partition table of {}: {}", device, why)]
    Print { device: String, why: PrintError },
    #[fail(display = "partition table of {} is not valid: {}", device, why)]
    Layout { device: String, why: PartitionError },
    #[fail(display = "partition table of {} was changed, but could not be reloaded: {}", device, why)]
    LayoutChanged { device: String, why: Box<DiskError> },
    #[fail(display = "could not reload partition table of {}: {}", device, why)]
    TableReload { device: String, why: CommandError },
    #[fail(display = "could not list device partition nodes of {}: {}", device, why)]
    PartitionList { device: String, why: CommandError },
    #[fail(display = "invalid partition device pattern: {}", why)]
    Pattern { why: regex::Error },
    #[fail(display = "could not find partition device path for partition {} of {}", number, device)]
    PartitionNotFound { device: String, number: u32 },
    #[fail(display = "could not find file system for {} ({}), not resizing the file system", device, fs)]
    UnsupportedFileSystem { device: String, fs: String },
    #[fail(display = "unable to create temporary mount point: {}", why)]
    MountPoint { why: io::Error },
    #[fail(display = "unable to unmount {}: {}", target, why)]
    Unmount { target: String, why: CommandError },
    #[fail(display = "unable to unmount {} after growing failed ({}): {}", target, grow, why)]
    UnmountAfterGrow { target: String, why: CommandError, grow: CommandError },
}

impl DiskError {
    /// The output of the external command behind this error, if there was one.
    pub fn output(&self) -> Option<&str> {
        match *self {
            DiskError::Command { ref why }
            | DiskError::TableReload { ref why, .. }
            | DiskError::PartitionList { ref why, .. }
            | DiskError::Unmount { ref why, .. }
            | DiskError::UnmountAfterGrow { ref why, .. } => Some(why.output()),
            DiskError::LayoutChanged { ref why, .. } => why.output(),
            _ => None,
        }
    }

    /// True if the partition table on the disk was modified before the error occurred,
    /// leaving the in-memory layout unknown until the next successful reload.
    pub fn is_layout_changed(&self) -> bool {
        match *self {
            DiskError::LayoutChanged { .. } => true,
            _ => false,
        }
    }

    /// Errors which a later attempt at locating a partition node may not repeat.
    pub(crate) fn is_transient(&self) -> bool {
        match *self {
            DiskError::PartitionList { .. } | DiskError::PartitionNotFound { .. } => true,
            _ => false,
        }
    }
}

impl From<CommandError> for DiskError {
    fn from(why: CommandError) -> DiskError { DiskError::Command { why } }
}
