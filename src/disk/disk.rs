use super::{DiskConfig, DiskError};
use disk_ops::{
    get_last_sector, get_partition_table_label, get_partitions, get_sector_size, PartedCall,
};
use disk_types::{
    mib_to_sectors, validate_layout, FileSystem, Layout, Partition, PartitionTable,
};
use external::{Exec, Runner};
use std::fmt;

/// A block device, and the last partition table layout read from it.
///
/// Every change to the table is followed by a reload, so the layout is never
/// trusted across a write. Operations take `&mut self`; a device should be managed
/// through a single `Disk`.
pub struct Disk<R = Exec> {
    device:            String,
    layout:            Option<Layout>,
    pub(crate) config: DiskConfig<R>,
}

impl Disk<Exec> {
    /// A disk at `device` that executes real commands with the default settings.
    pub fn new<S: Into<String>>(device: S) -> Self { Disk::with_config(device, DiskConfig::default()) }
}

impl<R: Runner> Disk<R> {
    pub fn with_config<S: Into<String>>(device: S, config: DiskConfig<R>) -> Self {
        Disk { device: device.into(), layout: None, config }
    }

    /// The path of the block device, ie: `/dev/sda`.
    pub fn path(&self) -> &str { &self.device }

    /// The layout that was last read, if any has been read yet.
    pub fn layout(&self) -> Option<&Layout> { self.layout.as_ref() }

    /// The size of each logical sector in bytes, or 0 if the table was not read yet.
    pub fn sector_size(&self) -> u64 { self.layout.as_ref().map_or(0, |l| l.sector_size) }

    /// The index of the last sector, or 0 if the table was not read yet.
    pub fn last_sector(&self) -> u64 { self.layout.as_ref().map_or(0, |l| l.last_sector) }

    pub fn label(&self) -> Option<PartitionTable> { self.layout.as_ref().map(|l| l.label) }

    pub fn partitions(&self) -> &[Partition] {
        self.layout.as_ref().map_or(&[], |l| l.partitions.as_slice())
    }

    pub fn runner(&self) -> &R { &self.config.runner }

    /// Reads the partition table from the device, replacing the cached layout.
    ///
    /// The cached layout is only replaced once the whole table has been read.
    pub fn reload(&mut self) -> Result<&Layout, DiskError> {
        let layout = self.read_layout()?;
        Ok(self.layout.insert(layout))
    }

    /// Free sectors after the last partition on the disk.
    pub fn free_space(&mut self) -> Result<u64, DiskError> {
        self.ensure_loaded().map(Layout::free_space)
    }

    /// True if at least `min_space` MiB are free after the last partition.
    pub fn check_free_space_mib(&mut self, min_space: u64) -> bool {
        match self.ensure_loaded() {
            Ok(layout) => layout.free_space() >= mib_to_sectors(min_space, layout.sector_size),
            Err(why) => {
                warn!("could not calculate free space of {}: {}", self.device, why);
                false
            }
        }
    }

    /// Writes a new, empty partition table of the `label` type, which must be either
    /// `msdos` or `gpt`. Returns the output of the table tool.
    pub fn new_partition_table(&mut self, label: &str) -> Result<String, DiskError> {
        let table = label.parse::<PartitionTable>().map_err(|why| DiskError::InvalidTable { why })?;

        info!("writing {} table on {}", table, self.device);
        let mut pc = PartedCall::new(&self.device, &self.config.runner);
        pc.set_partition_table_label(table);
        pc.wipe_table(true);
        let output = pc.write_changes()?;

        self.reload_after_write()?;
        Ok(output)
    }

    /// Creates a partition of `size` MiB after the last partition, returning its
    /// number. A `size` of 0 takes all of the remaining free space, leaving parted to
    /// find where the usable space ends.
    ///
    /// If the partition was written but the table could not be reloaded afterwards,
    /// a `DiskError::LayoutChanged` is returned.
    pub fn add_partition(
        &mut self,
        size: u64,
        file_system: FileSystem,
        label: &str,
    ) -> Result<u32, DiskError> {
        let device = self.device.clone();
        let (table, partition) = {
            let layout = self.ensure_loaded()?;

            // Every partition is created as a primary partition on msdos tables.
            if layout.label == PartitionTable::Msdos
                && layout.partitions.iter().filter(|part| part.number <= 4).count() >= 4
            {
                return Err(DiskError::PrimaryLimit { device });
            }

            let available = layout.free_space();
            let sectors = if size == 0 { 0 } else { mib_to_sectors(size, layout.sector_size) };

            if available == 0 || sectors > available || (size != 0 && sectors == 0) {
                return Err(DiskError::InsufficientSpace { device, required: sectors, available });
            }

            let number = layout.next_number();
            let start = layout.next_start();
            (layout.label, Partition::new(number, start, sectors, label, Some(file_system)))
        };

        match partition.size {
            0 => info!(
                "creating partition {} on {} from sector {} to the end of the disk",
                partition.number, device, partition.start
            ),
            size => info!(
                "creating partition {} on {}: {} sectors from sector {}",
                partition.number, device, size, partition.start
            ),
        }

        let mut pc = PartedCall::new(&self.device, &self.config.runner);
        pc.set_partition_table_label(table);
        pc.create_partition(partition.clone());
        let output = pc.write_changes().map_err(|why| {
            error!("failed creating partition on {}: {}", device, why);
            why
        })?;
        debug!("partitioner output: {}", output);

        self.reload_after_write()?;
        Ok(partition.number)
    }

    /// Grows the last partition to `size` MiB, and then grows the file system on it.
    /// A `size` of 0 grows the partition to the end of the usable space, as parted
    /// determines it.
    ///
    /// The partition is deleted and recreated at the same start sector in a single
    /// commit. Partitions are never shrunk.
    pub fn expand_last_partition(&mut self, size: u64) -> Result<(), DiskError> {
        let device = self.device.clone();
        let (table, partition) = {
            let layout = self.ensure_loaded()?;
            let last = layout
                .last_partition()
                .ok_or_else(|| DiskError::NoPartitions { device: device.clone() })?;

            let sectors = if size == 0 {
                0
            } else {
                let sectors = mib_to_sectors(size, layout.sector_size);
                if sectors < last.size {
                    return Err(DiskError::Shrink {
                        number:    last.number,
                        requested: sectors,
                        current:   last.size,
                    });
                }

                // The partition keeps its start, so it must also fit before the end.
                let available =
                    layout.free_space_without_last().min(layout.last_sector - last.start + 1);
                if sectors > available {
                    return Err(DiskError::InsufficientSpace { device, required: sectors, available });
                }

                sectors
            };

            let mut partition = last.clone();
            partition.size = sectors;
            (layout.label, partition)
        };

        match partition.size {
            0 => info!(
                "expanding partition {} on {} to the end of the disk",
                partition.number, device
            ),
            size => info!("expanding partition {} on {} to {} sectors", partition.number, device, size),
        }

        let number = partition.number;
        let mut pc = PartedCall::new(&self.device, &self.config.runner);
        pc.set_partition_table_label(table);
        pc.delete_partition(number);
        pc.create_partition(partition);
        pc.write_changes()?;

        self.reload_after_write()?;
        let device = self.find_partition_device(number)?;
        self.expand_filesystem(&device)
    }

    /// Loads the layout if it has not been read yet.
    fn ensure_loaded(&mut self) -> Result<&Layout, DiskError> {
        let layout = match self.layout.take() {
            Some(layout) => layout,
            None => self.read_layout().map_err(|why| {
                error!("failed analyzing disk {}: {}", self.device, why);
                why
            })?,
        };

        Ok(self.layout.insert(layout))
    }

    /// Discards the cached layout after a write, and reads it again.
    fn reload_after_write(&mut self) -> Result<(), DiskError> {
        self.layout = None;
        match self.reload() {
            Ok(_) => Ok(()),
            Err(why) => {
                error!("failed analyzing disk {} after writing to it: {}", self.device, why);
                Err(DiskError::LayoutChanged { device: self.device.clone(), why: Box::new(why) })
            }
        }
    }

    fn read_layout(&self) -> Result<Layout, DiskError> {
        let print = PartedCall::new(&self.device, &self.config.runner).print()?;
        let device = || self.device.clone();

        let sector_size =
            get_sector_size(&print).map_err(|why| DiskError::Print { device: device(), why })?;
        let last_sector =
            get_last_sector(&print).map_err(|why| DiskError::Print { device: device(), why })?;
        let label = get_partition_table_label(&print)
            .map_err(|why| DiskError::Print { device: device(), why })?;
        let mut partitions =
            get_partitions(&print).map_err(|why| DiskError::Print { device: device(), why })?;

        partitions.sort_by_key(|part| part.start);

        // Primary msdos partitions which overlap their successor are extended partitions.
        let is_extended = |part: &Partition| label == PartitionTable::Msdos && part.number <= 4;
        validate_layout(&partitions, last_sector, is_extended)
            .map_err(|why| DiskError::Layout { device: device(), why })?;

        Ok(Layout { sector_size, last_sector, label, partitions })
    }
}

impl<R> fmt::Display for Disk<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.device) }
}
