//! Waiting on the kernel to catch up with changes to the partition table.

use super::{Disk, DiskError};
use external::{lsblk_types, partprobe, udevadm_settle, Retry, Runner};
use regex::Regex;

impl<R: Runner> Disk<R> {
    fn retry(&self) -> Retry {
        Retry::default().attempts(self.config.partition_tries).interval(self.config.retry_interval)
    }

    /// Asks the kernel to reread the partition table, retrying until it succeeds.
    pub fn reload_partition_table(&self) -> Result<(), DiskError> {
        let device = self.path();
        let runner = &self.config.runner;

        self.retry()
            .retry_until_ok(|attempt| {
                debug!(
                    "trying to reread the partition table of {} (try number {})",
                    device,
                    attempt + 1
                );

                match udevadm_settle(runner) {
                    Ok(output) => debug!("output of udevadm settle: {}", output),
                    Err(why) => debug!("udevadm settle failed: {}", why),
                }

                partprobe(runner, device).map(|output| debug!("output of partprobe: {}", output))
            })
            .map_err(|why| {
                debug!("error of partprobe: {}", why);
                DiskError::TableReload { device: device.into(), why }
            })
    }

    /// Finds the device node of partition `number`, such as `/dev/sda1`.
    ///
    /// The table is reread before each attempt, as the node may not exist until the
    /// kernel has processed the new table.
    pub fn find_partition_device(&self, number: u32) -> Result<String, DiskError> {
        let device = self.path();
        let runner = &self.config.runner;

        // The number must not be preceded by a digit, so that partition 1 does not
        // match the node of partition 11.
        let pattern = Regex::new(&format!(r"(?m)^(/\S*\D{})\s+part\s*$", number))
            .map_err(|why| DiskError::Pattern { why })?;

        self.retry().retry_while(
            |attempt| {
                self.reload_partition_table()?;

                debug!(
                    "trying to find the partition device {} of device {} (try number {})",
                    number,
                    device,
                    attempt + 1
                );

                let output = lsblk_types(runner, device).map_err(|why| {
                    debug!("error of lsblk: {}", why);
                    DiskError::PartitionList { device: device.into(), why }
                })?;
                debug!("output of lsblk: {}", output);

                pattern
                    .captures(&output)
                    .and_then(|captures| captures.get(1))
                    .map(|node| node.as_str().to_owned())
                    .ok_or_else(|| DiskError::PartitionNotFound { device: device.into(), number })
            },
            DiskError::is_transient,
        )
    }
}
