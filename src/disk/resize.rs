use super::{Disk, DiskError};
use disk_types::FileSystem;
use external::{blkid_type, e2fsck, mount, resize2fs, umount, xfs_growfs, Runner};
use std::{fs, path::PathBuf};
use tempdir::TempDir;

/// A temporary directory to mount a file system on, which is removed when dropped.
///
/// Unlike `TempDir`, the directory is not removed recursively, so the contents of a
/// file system that failed to unmount are left untouched.
struct MountPoint {
    path: PathBuf,
}

impl MountPoint {
    fn new(root: Option<&PathBuf>, prefix: &str) -> Result<Self, DiskError> {
        let tempdir = match root {
            Some(root) => TempDir::new_in(root, prefix),
            None => TempDir::new(prefix),
        };

        tempdir
            .map(|tempdir| MountPoint { path: tempdir.into_path() })
            .map_err(|why| DiskError::MountPoint { why })
    }

    fn target(&self) -> String { self.path.to_string_lossy().into_owned() }
}

impl Drop for MountPoint {
    fn drop(&mut self) {
        if let Err(why) = fs::remove_dir(&self.path) {
            warn!("failed to remove temporary mount point {}: {}", self.path.display(), why);
        }
    }
}

impl<R: Runner> Disk<R> {
    /// Grows the file system on the partition at `device` to fill the partition.
    ///
    /// Only ext2, ext3, ext4, and xfs file systems can be grown.
    pub fn expand_filesystem(&self, device: &str) -> Result<(), DiskError> {
        let runner = &self.config.runner;
        let detected = blkid_type(runner, device);

        match detected.as_ref().and_then(|kind| kind.parse::<FileSystem>().ok()) {
            Some(kind) if kind.is_ext() => {
                e2fsck(runner, device)?;
                resize2fs(runner, device)?;
                Ok(())
            }
            Some(FileSystem::Xfs) => self.grow_xfs(device),
            _ => Err(DiskError::UnsupportedFileSystem {
                device: device.into(),
                fs:     detected.unwrap_or_else(|| "none".into()),
            }),
        }
    }

    /// XFS can only be grown while it is mounted.
    fn grow_xfs(&self, device: &str) -> Result<(), DiskError> {
        let runner = &self.config.runner;
        let mount_point = MountPoint::new(self.config.mount_root.as_ref(), self.config.temp_prefix)?;
        let target = mount_point.target();

        info!("temporarily mounting {} to {}", device, target);
        mount(runner, FileSystem::Xfs.mount_type(), device, &target)?;

        match xfs_growfs(runner, &target) {
            Ok(_) => umount(runner, &target)
                .map(|_| ())
                .map_err(|why| DiskError::Unmount { target, why }),
            // Try to unmount, so that the file system is not left mounted.
            Err(grow) => match umount(runner, &target) {
                Ok(_) => Err(DiskError::Command { why: grow }),
                Err(why) => Err(DiskError::UnmountAfterGrow { target, why, grow }),
            },
        }
    }
}
