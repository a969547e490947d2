use disk_types::{Partition, PartitionTable};
use external::{CommandError, Runner};

/// Stages edits to the partition table of a device, which are all applied by a
/// single parted invocation in `write_changes`.
///
/// Staged operations run in a fixed order: the new label (when wiping), then
/// deletions, then creations. A partition can therefore be deleted and recreated
/// with a new geometry in one transaction.
#[derive(new)]
pub struct PartedCall<'a, R: Runner + ?Sized + 'a> {
    device:    &'a str,
    runner:    &'a R,
    #[new(default)]
    label:     Option<PartitionTable>,
    #[new(default)]
    wipe:      bool,
    #[new(default)]
    deletions: Vec<u32>,
    #[new(default)]
    creations: Vec<Partition>,
}

impl<'a, R: Runner + ?Sized + 'a> PartedCall<'a, R> {
    /// Dumps the partition table of the device in parted's machine-readable format.
    pub fn print(&self) -> Result<String, CommandError> {
        debug!("printing partition table of {}", self.device);
        self.runner.run("parted", &["--script", "--machine", "--", self.device, "unit", "s", "print"])
    }

    /// The type of table that the device has, or should have after wiping.
    pub fn set_partition_table_label(&mut self, label: PartitionTable) { self.label = Some(label); }

    /// Replaces the existing table with an empty one of the label's type.
    pub fn wipe_table(&mut self, wipe: bool) { self.wipe = wipe; }

    pub fn create_partition(&mut self, partition: Partition) { self.creations.push(partition); }

    pub fn delete_partition(&mut self, number: u32) { self.deletions.push(number); }

    /// Arguments for the parted invocation which applies the staged operations.
    pub fn arguments(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--script".into(),
            "--machine".into(),
            "--".into(),
            self.device.into(),
            "unit".into(),
            "s".into(),
        ];

        if self.wipe {
            match self.label {
                Some(label) => {
                    args.push("mklabel".into());
                    args.push(label.as_str().into());
                }
                None => warn!("not wiping {}: no partition table label was given", self.device),
            }
        }

        for number in &self.deletions {
            args.push("rm".into());
            args.push(number.to_string());
        }

        for partition in &self.creations {
            self.mkpart(partition, &mut args);
        }

        args
    }

    /// Commits all staged operations to the disk, returning the output of parted.
    pub fn write_changes(self) -> Result<String, CommandError> {
        let args = self.arguments();
        info!("committing changes to {}: {:?}", self.device, &args[6..]);

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run("parted", &args)
    }

    fn mkpart(&self, partition: &Partition, args: &mut Vec<String>) {
        args.push("mkpart".into());

        // msdos has no partition names, but requires the partition type instead.
        // Extended and logical partitions are never created, so an msdos table
        // holds at most four partitions made here.
        match self.label {
            Some(PartitionTable::Msdos) => args.push("primary".into()),
            _ if partition.label.is_empty() => args.push(format!("part{}", partition.number)),
            _ => args.push(partition.label.clone()),
        }

        if let Some(fs) = partition.file_system {
            args.push(fs.to_string());
        }

        args.push(format!("{}s", partition.start));
        args.push(if partition.size == 0 {
            "100%".into()
        } else {
            format!("{}s", partition.end())
        });
    }
}
