//! Types for partition tables, partitions, file systems, and sectors.

extern crate failure;
#[macro_use]
extern crate failure_derive;

mod fs;
mod layout;
mod partition;
mod sector;
mod table;

pub use self::{fs::*, layout::*, partition::*, sector::*, table::*};
