//! Validation source strategies.
//!
//! Only the filesystem strategy exists; documentation always lives on disk.

pub mod fs;
