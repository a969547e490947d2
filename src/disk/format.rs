use super::{Disk, DiskError};
use disk_types::FileSystem;
use external::{mkfs, Runner};

impl<R: Runner> Disk<R> {
    /// Creates a `file_system` on partition `number`, returning the output of the
    /// format tool. An empty `label` leaves the file system unlabeled.
    pub fn format_partition(
        &self,
        number: u32,
        file_system: FileSystem,
        label: &str,
    ) -> Result<String, DiskError> {
        let device = self.find_partition_device(number)?;
        mkfs(&self.config.runner, file_system, label, &device, &[]).map_err(|why| {
            error!("unable to format {}: {}", device, why);
            DiskError::from(why)
        })
    }
}
