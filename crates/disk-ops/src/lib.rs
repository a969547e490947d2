//! A collection of tools for reading and modifying partition tables with parted.

#[macro_use]
extern crate derive_new;
extern crate disk_types;
extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;
extern crate partitioner_external_commands as external;

mod parted;
mod print;

pub use self::{parted::*, print::*};
