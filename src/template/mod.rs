//! Template processing engine
//!
//! This module contains the per-entry template processing components:
//! - `operation`: Defines operations to be performed on template entries
//! - `processor`: Turns template files and directories into operations

pub mod operation;
pub mod processor;
