//! Headtrack Processing Core
//!
//! Turns a per-frame head-tracking log into an elapsed-time log:
//! - **Convert:** Parse lines, normalize timestamps, decode orientations
//! - **Downsample:** Keep one record per whole elapsed second
//! - **Write:** Name the destination and write it all-or-nothing
//! - **Summary:** Describe a log without writing it
//!
//! Everything except [`writer`] and [`convert::convert_file`] is pure
//! computation over in-memory text.

pub mod convert;
pub mod downsample;
pub mod summary;
pub mod writer;

pub use convert::{convert_file, convert_log, load_log, ConversionReport, ConvertedLog};
pub use downsample::Downsampler;
pub use summary::LogSummary;
