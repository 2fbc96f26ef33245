//! Headtrack Log Model
//!
//! Defines the data contracts of a head-tracking log conversion:
//! - **Schema:** The fixed tab-delimited input layout, decoded into named fields
//! - **Orientation:** Quaternion literals and their Euler-angle decomposition
//! - **Output:** Converted rows and the header of the elapsed-time log
//!
//! This crate does no file I/O. Inputs are borrowed lines; outputs are rows.

pub mod orientation;
pub mod output;
pub mod schema;

pub use orientation::*;
pub use output::*;
pub use schema::*;
