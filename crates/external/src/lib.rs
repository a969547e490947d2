//! A collection of external commands used throughout the program.
//!
//! Every command goes through a [`Runner`], so that callers may substitute the
//! process-spawning [`Exec`] with their own implementation.

extern crate disk_types;
extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate smart_default;

pub mod block;
pub mod retry;

pub use self::{block::*, retry::Retry};

use std::{
    io,
    process::{Command, Stdio},
};

/// Executes external commands, returning their output.
pub trait Runner {
    /// Run `cmd` with `args`. The combined stdout and stderr of the command is
    /// returned on success, and carried by the error on failure.
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError>;
}

impl<'a, R: Runner + ?Sized> Runner for &'a R {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError> {
        (**self).run(cmd, args)
    }
}

impl<R: Runner + ?Sized> Runner for Box<R> {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError> {
        (**self).run(cmd, args)
    }
}

/// An external command which could not be executed, or which exited unsuccessfully.
#[derive(Debug, Fail)]
pub enum CommandError {
    #[fail(display = "failed to spawn {}: {}", cmd, why)]
    Spawn { cmd: String, why: io::Error },
    #[fail(display = "{} failed with status {}: {}", cmd, status, output)]
    Failed { cmd: String, status: String, output: String },
}

impl CommandError {
    /// An error for a command that ran and exited with a failing status.
    pub fn failed<C: Into<String>, O: Into<String>>(cmd: C, status: &str, output: O) -> Self {
        CommandError::Failed { cmd: cmd.into(), status: status.into(), output: output.into() }
    }

    /// The output that the command produced before it failed.
    pub fn output(&self) -> &str {
        match *self {
            CommandError::Spawn { .. } => "",
            CommandError::Failed { ref output, .. } => output,
        }
    }
}

/// Runs commands as child processes of this one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exec;

impl Runner for Exec {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError> {
        info!("executing {} with {:?}", cmd, args);

        let output = Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|why| CommandError::Spawn { cmd: cmd.into(), why })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            let status = match output.status.code() {
                Some(code) => format!("{} ({})", code, io::Error::from_raw_os_error(code)),
                None => "unknown".into(),
            };

            Err(CommandError::failed(cmd, &status, combined))
        }
    }
}
