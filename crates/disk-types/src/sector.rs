/// The number of bytes in a mebibyte.
pub const MEBIBYTE: u64 = 1_048_576;

/// Converts a size in mebibytes into a number of sectors of `sector_size` bytes.
///
/// The division truncates, so the result is a floor: a size that is not a whole
/// number of sectors loses the remainder, exactly as parted counts it. Sizes too
/// large to express in bytes saturate at `u64::MAX` sectors.
pub fn mib_to_sectors(size: u64, sector_size: u64) -> u64 {
    size.checked_mul(MEBIBYTE).map_or(u64::MAX, |bytes| bytes / sector_size)
}

/// The sector where the first partition of an empty table starts: the 1 MiB
/// boundary.
pub fn first_aligned_sector(sector_size: u64) -> u64 { mib_to_sectors(1, sector_size) }
