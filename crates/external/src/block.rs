use self::FileSystem::*;
use super::{CommandError, Runner};
use disk_types::FileSystem;

/// Obtains the file system type of a block device via blkid.
///
/// Returns `None` if blkid could not identify the device.
pub fn blkid_type<R: Runner + ?Sized>(runner: &R, device: &str) -> Option<String> {
    match runner.run("blkid", &[device, "-s", "TYPE", "-o", "value"]) {
        Ok(output) => {
            let kind = output.trim();
            if kind.is_empty() { None } else { Some(kind.to_owned()) }
        }
        Err(why) => {
            debug!("blkid could not probe {}: {}", device, why);
            None
        }
    }
}

/// Checks & repairs an ext file system without prompting.
pub fn e2fsck<R: Runner + ?Sized>(runner: &R, device: &str) -> Result<String, CommandError> {
    info!("checking file system on {}", device);
    runner.run("e2fsck", &["-fy", device])
}

/// Grows an ext file system to the size of its partition.
pub fn resize2fs<R: Runner + ?Sized>(runner: &R, device: &str) -> Result<String, CommandError> {
    info!("growing ext file system on {}", device);
    runner.run("resize2fs", &[device])
}

/// Grows the XFS file system mounted at `target`.
pub fn xfs_growfs<R: Runner + ?Sized>(runner: &R, target: &str) -> Result<String, CommandError> {
    info!("growing xfs file system mounted at {}", target);
    runner.run("xfs_growfs", &[target])
}

pub fn mount<R: Runner + ?Sized>(
    runner: &R,
    fs: &str,
    device: &str,
    target: &str,
) -> Result<String, CommandError> {
    info!("mounting {} to {}", device, target);
    runner.run("mount", &["-t", fs, device, target])
}

pub fn umount<R: Runner + ?Sized>(runner: &R, target: &str) -> Result<String, CommandError> {
    info!("unmounting {}", target);
    runner.run("umount", &[target])
}

/// Waits for udev to finish processing pending device events.
pub fn udevadm_settle<R: Runner + ?Sized>(runner: &R) -> Result<String, CommandError> {
    runner.run("udevadm", &["settle"])
}

/// Asks the kernel to reread the partition table of `device`.
pub fn partprobe<R: Runner + ?Sized>(runner: &R, device: &str) -> Result<String, CommandError> {
    runner.run("partprobe", &[device])
}

/// Lists the block devices on `device` as `<path> <type>` lines, without headers.
pub fn lsblk_types<R: Runner + ?Sized>(runner: &R, device: &str) -> Result<String, CommandError> {
    runner.run("lsblk", &["-ltnpo", "name,type", device])
}

/// Formats the supplied `device` with the file system specified.
///
/// `custom_opts` are passed to the format tool ahead of the device path.
pub fn mkfs<R: Runner + ?Sized>(
    runner: &R,
    kind: FileSystem,
    label: &str,
    device: &str,
    custom_opts: &[&str],
) -> Result<String, CommandError> {
    let (cmd, args, label_flag): (&'static str, &'static [&'static str], &'static str) =
        match kind {
            Btrfs => ("mkfs.btrfs", &["-f"], "-L"),
            Ext2 => ("mkfs.ext2", &["-F", "-q"], "-L"),
            Ext3 => ("mkfs.ext3", &["-F", "-q"], "-L"),
            Ext4 => ("mkfs.ext4", &["-F", "-q"], "-L"),
            Fat16 => ("mkfs.fat", &["-F", "16"], "-n"),
            Fat32 => ("mkfs.fat", &["-F", "32"], "-n"),
            Swap => ("mkswap", &["-f"], "-L"),
            Xfs => ("mkfs.xfs", &["-f"], "-L"),
        };

    let mut arguments: Vec<&str> = args.to_vec();
    if !label.is_empty() {
        arguments.push(label_flag);
        arguments.push(label);
    }
    arguments.extend_from_slice(custom_opts);
    arguments.push(device);

    info!("formatting {} with {}", device, kind);
    runner.run(cmd, &arguments)
}
