//! A file-based transactional table format.
//!
//! Each table is a directory with a commit timeline under `.meta` and JSON data files under
//! partition directories. Writes become visible atomically when their commit file lands;
//! reads replay completed commits in instant order.

pub mod config;
pub mod error;
pub(crate) mod file_layout;
pub(crate) mod index;
pub mod options;
pub mod snapshot;
pub mod timeline;
pub(crate) mod validator;
pub mod writer;
