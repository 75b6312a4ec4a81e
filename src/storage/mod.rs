//!  Storage is organized through [task_storage::TaskStorageImpl].
//!  The basic idea is:
//!   - There is a tasks directory picked by the user.
//!   - Every project is a directory inside it.
//!   - Every task is a `<task>.json` file inside its project, holding a JSON array of records.
//!   - A task file is rewritten as a whole whenever a record is added.

pub mod entities;
pub mod error;
pub mod names;
pub mod task_storage;
