use external::{Exec, Runner};
use std::path::PathBuf;

/// Settings which a `Disk` is constructed with.
///
/// `DiskConfig::default()` executes real commands, makes 11 attempts one second apart
/// while waiting on partition device nodes, and creates temporary mount points in the
/// system's temporary directory.
#[derive(Debug, Clone)]
pub struct DiskConfig<R = Exec> {
    /// Executes every external command that the disk requires.
    pub runner:          R,
    /// Retries made while waiting on the kernel to show a partition, so that up to
    /// `partition_tries + 1` attempts are made.
    pub partition_tries: u64,
    /// Milliseconds to wait between those attempts.
    pub retry_interval:  u64,
    /// Where temporary mount points are created, if not the system's temporary
    /// directory.
    pub mount_root:      Option<PathBuf>,
    /// Prefix for the names of temporary mount points.
    pub temp_prefix:     &'static str,
}

impl Default for DiskConfig<Exec> {
    fn default() -> Self { DiskConfig::with_runner(Exec) }
}

impl<R: Runner> DiskConfig<R> {
    /// The default configuration, with commands executed by `runner` instead.
    pub fn with_runner(runner: R) -> Self {
        DiskConfig {
            runner,
            partition_tries: 10,
            retry_interval: 1000,
            mount_root: None,
            temp_prefix: "partitioner",
        }
    }

    pub fn partition_tries(mut self, tries: u64) -> Self {
        self.partition_tries = tries;
        self
    }

    pub fn retry_interval(mut self, interval: u64) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn mount_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.mount_root = Some(root.into());
        self
    }
}
