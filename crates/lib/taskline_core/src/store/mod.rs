//! Project and task storage queries.
//!
//! All functions take the pool explicitly; there is no ambient connection
//! state. Resource ids arrive as strings from the HTTP layer — a string that
//! does not parse as a UUID is treated as "not found" rather than an error,
//! so probing with garbage ids gets the same response as probing with
//! well-formed unknown ids.

pub mod projects;
pub mod tasks;
