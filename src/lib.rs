//! Management of the partition table on a block device: reading its layout,
//! writing new tables, adding partitions, and growing the last partition along
//! with its file system.
//!
//! Every change is made through external tools (parted, partprobe, lsblk, and the
//! file system utilities), which are executed by a [`Runner`].

extern crate disk_types;
extern crate failure;
#[macro_use]
extern crate failure_derive;
extern crate fern;
#[macro_use]
extern crate log;
extern crate partitioner_disk_ops as disk_ops;
extern crate partitioner_external_commands as external;
extern crate regex;
extern crate tempdir;

mod disk;
mod logging;
#[cfg(test)]
mod testing;

pub use self::{
    disk::{Disk, DiskConfig, DiskError},
    logging::log,
};
pub use disk_types::{
    mib_to_sectors, FileSystem, Layout, Partition, PartitionError, PartitionTable,
    PartitionTableError, MEBIBYTE,
};
pub use external::{CommandError, Exec, Retry, Runner};
