//! Parsing of `parted --machine unit s print` output.
//!
//! The machine-readable format looks like this:
//!
//! ```text
//! BYT;
//! /dev/sda:2097152s:scsi:512:512:gpt:ATA QEMU HARDDISK:;
//! 1:2048s:206847s:204800s:ext4:root:;
//! ```

use disk_types::{Partition, PartitionTable, PartitionTableError};

/// A problem with the output of `parted print`.
#[derive(Debug, Fail, PartialEq)]
pub enum PrintError {
    #[fail(display = "parted output lacks a device line")]
    NoDevice,
    #[fail(display = "invalid {} in parted output: '{}'", field, value)]
    Field { field: &'static str, value: String },
    #[fail(display = "{}", why)]
    Label { why: PartitionTableError },
}

/// The size of each logical sector of the device, in bytes.
pub fn get_sector_size(print: &str) -> Result<u64, PrintError> {
    let fields = device_fields(print)?;
    let value = fields.get(3).cloned().unwrap_or_default();
    match value.parse::<u64>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(PrintError::Field { field: "sector size", value: value.into() }),
    }
}

/// The index of the last sector on the device.
pub fn get_last_sector(print: &str) -> Result<u64, PrintError> {
    let fields = device_fields(print)?;
    let value = fields.get(1).cloned().unwrap_or_default();
    match sectors(value) {
        Some(count) if count > 0 => Ok(count - 1),
        _ => Err(PrintError::Field { field: "device size", value: value.into() }),
    }
}

/// The type of partition table on the device.
pub fn get_partition_table_label(print: &str) -> Result<PartitionTable, PrintError> {
    let fields = device_fields(print)?;
    fields
        .get(5)
        .cloned()
        .unwrap_or_default()
        .parse::<PartitionTable>()
        .map_err(|why| PrintError::Label { why })
}

/// Partitions on the device, in the order parted lists them.
pub fn get_partitions(print: &str) -> Result<Vec<Partition>, PrintError> {
    print
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .map(parse_partition)
        .collect()
}

fn parse_partition(line: &str) -> Result<Partition, PrintError> {
    let fields: Vec<&str> = line.trim_end_matches(';').split(':').collect();
    let field = |index: usize| fields.get(index).cloned().unwrap_or_default();

    let number = field(0)
        .parse::<u32>()
        .map_err(|_| PrintError::Field { field: "partition number", value: line.into() })?;
    let start = sectors(field(1))
        .ok_or_else(|| PrintError::Field { field: "partition start", value: line.into() })?;
    let size = sectors(field(3))
        .ok_or_else(|| PrintError::Field { field: "partition size", value: line.into() })?;

    Ok(Partition::new(number, start, size, field(5), field(4).parse().ok()))
}

fn device_fields(print: &str) -> Result<Vec<&str>, PrintError> {
    print
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('/'))
        .map(|line| line.trim_end_matches(';').split(':').collect())
        .ok_or(PrintError::NoDevice)
}

fn sectors(value: &str) -> Option<u64> {
    if value.ends_with('s') { value[..value.len() - 1].parse::<u64>().ok() } else { None }
}
