//! Error types and context management for extraction and metric operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::metrics::field::FieldRole;

/// Main error type for all heatmap operations
#[derive(Debug)]
pub enum HeatmapError {
    /// Failed to decode an image from the filesystem
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Two fields, or two frames of a sequence, differ in dimensions
    ShapeMismatch {
        /// Shape of the reference field (rows, cols)
        expected: (usize, usize),
        /// Shape of the offending field (rows, cols)
        found: (usize, usize),
        /// Frame index within a temporal sequence, when known
        frame: Option<usize>,
        /// Side of the comparison whose shape disagrees, when known
        field: Option<FieldRole>,
        /// File the offending field was loaded from, when known
        path: Option<PathBuf>,
    },

    /// A field's total mass is zero so a ratio would be undefined
    DegenerateField {
        /// Which field has zero mass
        field: FieldRole,
    },

    /// Temporal aggregation was asked to average zero frames
    EmptySequence,

    /// Input data doesn't meet the operation's requirements
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for HeatmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::ShapeMismatch {
                expected,
                found,
                frame,
                field,
                path,
            } => {
                write!(
                    f,
                    "Shape mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )?;
                if let Some(role) = field {
                    write!(f, " in {role}")?;
                }
                if let Some(path) = path {
                    write!(f, " '{}'", path.display())?;
                }
                if let Some(index) = frame {
                    write!(f, " (frame {index})")?;
                }
                Ok(())
            }
            Self::DegenerateField { field } => {
                write!(
                    f,
                    "Degenerate field: {field} has zero total mass, ratio is undefined"
                )
            }
            Self::EmptySequence => write!(f, "Cannot aggregate an empty frame sequence"),
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for HeatmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for heatmap results
pub type Result<T> = std::result::Result<T, HeatmapError>;

impl HeatmapError {
    /// Side of the comparison an error is attributed to, if any
    pub const fn field_role(&self) -> Option<FieldRole> {
        match self {
            Self::ShapeMismatch { field, .. } => *field,
            Self::DegenerateField { field } => Some(*field),
            _ => None,
        }
    }
}

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Frame index within a temporal sequence
    pub frame: Option<usize>,
    /// Side of the comparison the error belongs to
    pub field: Option<FieldRole>,
    /// File the offending data came from
    pub path: Option<PathBuf>,
}

/// Enriches error messages with sequence position and file information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the frame index
    ///
    /// # Errors
    ///
    /// Propagates the original error with the frame context applied
    fn with_frame(self, frame: usize) -> Result<T>;

    /// Add just the side of the comparison
    ///
    /// # Errors
    ///
    /// Propagates the original error with the field context applied
    fn with_field(self, field: FieldRole) -> Result<T>;

    /// Add just the source file
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path context applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<HeatmapError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only shape errors carry context slots; existing values win
            if let HeatmapError::ShapeMismatch {
                frame, field, path, ..
            } = &mut error
            {
                *frame = frame.or(context.frame);
                *field = field.or(context.field);
                if path.is_none() {
                    *path = context.path;
                }
            }
            error
        })
    }

    fn with_frame(self, frame: usize) -> Result<T> {
        self.with_context(ErrorContext {
            frame: Some(frame),
            ..ErrorContext::default()
        })
    }

    fn with_field(self, field: FieldRole) -> Result<T> {
        self.with_context(ErrorContext {
            field: Some(field),
            ..ErrorContext::default()
        })
    }

    fn with_path(self, path: &Path) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            ..ErrorContext::default()
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> HeatmapError {
    HeatmapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a shape mismatch error without frame context
pub const fn shape_mismatch(expected: (usize, usize), found: (usize, usize)) -> HeatmapError {
    HeatmapError::ShapeMismatch {
        expected,
        found,
        frame: None,
        field: None,
        path: None,
    }
}
