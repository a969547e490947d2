use crate::fs::FileSystem;

/// A partition as it is recorded in a partition table.
///
/// All positions are measured in sectors of the parent device.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// The 1-based number that the table tool assigned to this partition.
    pub number:      u32,
    /// The sector where this partition begins.
    pub start:       u64,
    /// The number of sectors that this partition spans.
    pub size:        u64,
    /// The partition name (GPT) which is used as its label.
    pub label:       String,
    /// The file system this partition was created for, which may not match what it
    /// is actually formatted with.
    pub file_system: Option<FileSystem>,
}

/// A reason why a partition, or a list of partitions, is not a valid layout.
#[derive(Debug, Fail, PartialEq)]
pub enum PartitionError {
    #[fail(display = "partition {} has no sectors", number)]
    Empty { number: u32 },
    #[fail(display = "partition {} ends at sector {}, beyond the last sector {}", number, end, last)]
    OutOfBounds { number: u32, end: u64, last: u64 },
    #[fail(display = "partition {} overlaps partition {}", first, second)]
    Overlap { first: u32, second: u32 },
}

impl Partition {
    pub fn new<S: Into<String>>(
        number: u32,
        start: u64,
        size: u64,
        label: S,
        file_system: Option<FileSystem>,
    ) -> Self {
        Partition { number, start, size, label: label.into(), file_system }
    }

    /// The last sector that belongs to this partition.
    pub fn end(&self) -> u64 { (self.start + self.size).saturating_sub(1) }

    /// True if there is an overlap in sectors between both partitions.
    pub fn overlaps(&self, other: &Partition) -> bool {
        !(other.end() < self.start || other.start > self.end())
    }
}

/// Checks that partitions hold sectors, fit on the device, and do not overlap their
/// successor. The list must already be ordered by start sector.
///
/// Extended msdos partitions are the exception to the overlap rule: they contain
/// the logical partitions that follow them, so they are expected to overlap.
pub fn validate_layout(
    partitions: &[Partition],
    last_sector: u64,
    is_container: impl Fn(&Partition) -> bool,
) -> Result<(), PartitionError> {
    for part in partitions {
        if part.size == 0 {
            return Err(PartitionError::Empty { number: part.number });
        }

        if part.end() > last_sector {
            return Err(PartitionError::OutOfBounds {
                number: part.number,
                end:    part.end(),
                last:   last_sector,
            });
        }
    }

    for pair in partitions.windows(2) {
        if pair[0].overlaps(&pair[1]) && !is_container(&pair[0]) {
            return Err(PartitionError::Overlap {
                first:  pair[0].number,
                second: pair[1].number,
            });
        }
    }

    Ok(())
}
