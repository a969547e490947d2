use crate::{
    partition::Partition,
    sector::first_aligned_sector,
    table::PartitionTable,
};

/// A snapshot of a device's partition table, as it was last read from the disk.
///
/// A layout only exists once the table has been read, so a loaded device always has
/// a non-zero sector size and last sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// The size of each logical sector, in bytes.
    pub sector_size: u64,
    /// The index of the last sector on the device (the sector count minus one).
    pub last_sector: u64,
    /// The type of partition table on the device.
    pub label:       PartitionTable,
    /// Partitions, ordered by their start sector.
    pub partitions:  Vec<Partition>,
}

impl Layout {
    /// Free sectors after the last partition.
    ///
    /// Without any partitions, the first partition is assumed to start at the 1 MiB
    /// boundary.
    pub fn free_space(&self) -> u64 { self.free_space_after(self.partitions.last()) }

    /// Free sectors after the second-to-last partition, which is the space the last
    /// partition could grow into.
    pub fn free_space_without_last(&self) -> u64 {
        let len = self.partitions.len();
        self.free_space_after(if len > 1 { self.partitions.get(len - 2) } else { None })
    }

    /// The sector where a new partition will be created.
    pub fn next_start(&self) -> u64 {
        self.partitions
            .last()
            .map_or_else(|| first_aligned_sector(self.sector_size), |part| part.start + part.size)
    }

    /// The number that a new partition will receive: one more than the highest
    /// number in use, so that gaps left by deleted partitions are not reused.
    pub fn next_number(&self) -> u32 {
        self.partitions.iter().map(|part| part.number).max().map_or(1, |number| number + 1)
    }

    pub fn last_partition(&self) -> Option<&Partition> { self.partitions.last() }

    fn free_space_after(&self, partition: Option<&Partition>) -> u64 {
        let used = match partition {
            Some(part) => (part.start + part.size).saturating_sub(1),
            None => first_aligned_sector(self.sector_size) - 1,
        };

        self.last_sector.saturating_sub(used)
    }
}
