mod container;
mod create;
mod distro;
mod monitor;

pub use container::{ContainerColumn, ContainerRow, ListSnapshot, parse_list_output};
pub use create::{
    CreateOutcome, CreateOutcomeKind, CreateRejection, CreateRequest, CreateSettings, run_create,
    start_create,
};
pub use distro::{Distro, DistroCatalog};
pub use monitor::{ListMonitor, ListSettings, poll_list, start_list_monitor};
