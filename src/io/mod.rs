//! Input/output operations and error handling

/// Command-line parsing and command execution
pub mod cli;
/// Bucketing constants and output defaults
pub mod configuration;
/// Error types and context propagation
pub mod error;
/// Image decoding and grayscale export
pub mod image;
/// Progress display for frame sequences
pub mod progress;
