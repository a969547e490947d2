use std::{fmt, str::FromStr};

/// Describes a file system format, such as ext4 or fat32.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum FileSystem {
    Btrfs,
    Ext2,
    Ext3,
    Ext4,
    Fat16,
    Fat32,
    Swap,
    Xfs,
}

impl FileSystem {
    /// True if the file system belongs to the ext family, which is grown offline.
    pub fn is_ext(self) -> bool {
        match self {
            FileSystem::Ext2 | FileSystem::Ext3 | FileSystem::Ext4 => true,
            _ => false,
        }
    }

    /// The name that `mount -t` expects for this file system.
    pub fn mount_type(self) -> &'static str {
        match self {
            FileSystem::Fat16 | FileSystem::Fat32 => "vfat",
            FileSystem::Swap => "swap",
            fs => fs.into(),
        }
    }
}

impl FromStr for FileSystem {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let type_ = match string.to_lowercase().as_str() {
            "btrfs" => FileSystem::Btrfs,
            "ext2" => FileSystem::Ext2,
            "ext3" => FileSystem::Ext3,
            "ext4" => FileSystem::Ext4,
            "fat16" => FileSystem::Fat16,
            // blkid reports every FAT variant as vfat.
            "fat32" | "vfat" => FileSystem::Fat32,
            "swap" | "linux-swap(v1)" => FileSystem::Swap,
            "xfs" => FileSystem::Xfs,
            _ => return Err("invalid file system name"),
        };
        Ok(type_)
    }
}

/// The names here are the ones parted accepts as a `mkpart` file system type.
impl From<FileSystem> for &'static str {
    fn from(val: FileSystem) -> Self {
        match val {
            FileSystem::Btrfs => "btrfs",
            FileSystem::Ext2 => "ext2",
            FileSystem::Ext3 => "ext3",
            FileSystem::Ext4 => "ext4",
            FileSystem::Fat16 => "fat16",
            FileSystem::Fat32 => "fat32",
            FileSystem::Swap => "linux-swap(v1)",
            FileSystem::Xfs => "xfs",
        }
    }
}

impl fmt::Display for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let str: &'static str = (*self).into();
        f.write_str(str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_system_names() {
        assert_eq!("ext4".parse::<FileSystem>(), Ok(FileSystem::Ext4));
        assert_eq!("XFS".parse::<FileSystem>(), Ok(FileSystem::Xfs));
        assert_eq!("vfat".parse::<FileSystem>(), Ok(FileSystem::Fat32));
        assert_eq!("linux-swap(v1)".parse::<FileSystem>(), Ok(FileSystem::Swap));
        assert!("ntfs".parse::<FileSystem>().is_err());
        assert!("".parse::<FileSystem>().is_err());
    }

    #[test]
    fn file_system_families() {
        assert!(FileSystem::Ext3.is_ext());
        assert!(!FileSystem::Xfs.is_ext());
        assert_eq!(FileSystem::Fat16.mount_type(), "vfat");
        assert_eq!(FileSystem::Xfs.mount_type(), "xfs");
        assert_eq!(FileSystem::Swap.to_string(), "linux-swap(v1)");
    }
}
