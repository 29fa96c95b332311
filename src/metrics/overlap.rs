//! Overlap ratios between a gaze field and a saliency field
//!
//! With `I` the elementwise intersection of the clamped fields:
//!
//! - coverage = sum(I) / sum(Hu)
//! - outside gaze = sum(Hu - I) / sum(Hu)
//! - unseen saliency = sum(Hu - I) / sum(Hs)
//!
//! Coverage and outside gaze always add up to one. Unseen saliency is
//! unbounded since it divides by the other field's mass.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use ndarray::Zip;

use crate::io::error::{HeatmapError, Result, WithContext, invalid_parameter};
use crate::metrics::field::{FieldRole, IntensityField};

/// How the pointwise intersection of two intensities is formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionRule {
    /// Elementwise minimum; a logical AND on binary fields
    #[default]
    Minimum,
    /// Elementwise product
    Product,
    /// AND of the IEEE-754 bit patterns
    ///
    /// Only meaningful for reproducing figures produced by tools that applied
    /// an integer bitwise AND to float arrays. Equals `Minimum` on {0, 1}.
    Bitwise,
}

impl IntersectionRule {
    /// Intersect two intensities
    pub const fn apply(self, gaze: f64, saliency: f64) -> f64 {
        match self {
            Self::Minimum => gaze.min(saliency),
            Self::Product => gaze * saliency,
            Self::Bitwise => f64::from_bits(gaze.to_bits() & saliency.to_bits()),
        }
    }

    /// Name accepted on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minimum => "min",
            Self::Product => "product",
            Self::Bitwise => "bitwise",
        }
    }
}

impl fmt::Display for IntersectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntersectionRule {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "min" | "minimum" => Ok(Self::Minimum),
            "product" | "mul" => Ok(Self::Product),
            "bitwise" | "and" => Ok(Self::Bitwise),
            _ => Err(invalid_parameter(
                "intersection",
                &s,
                &"expected one of: min, product, bitwise",
            )),
        }
    }
}

/// Which fields are clamped into [0,1] before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// Clamp both fields
    #[default]
    Symmetric,
    /// Clamp only the gaze field and trust the saliency field's range
    GazeOnly,
}

/// Parameters of a metric computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricConfig {
    /// Pointwise intersection rule
    pub intersection: IntersectionRule,
    /// Range clamping applied to the inputs
    pub clamp: ClampPolicy,
}

/// The three overlap ratios for one comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapMetrics {
    /// Fraction of gaze mass inside predicted salient regions
    pub coverage: f64,
    /// Fraction of gaze mass outside all predicted salient regions
    pub outside_gaze: f64,
    /// Uncovered gaze mass relative to total saliency mass
    pub unseen_saliency: f64,
}

impl OverlapMetrics {
    /// Ratios as a (coverage, outside gaze, unseen saliency) tuple
    pub const fn as_tuple(&self) -> (f64, f64, f64) {
        (self.coverage, self.outside_gaze, self.unseen_saliency)
    }
}

// Masses gathered in a single pass so that identical fields sum identically
#[derive(Debug, Default)]
struct Masses {
    gaze: f64,
    saliency: f64,
    intersection: f64,
    uncovered: f64,
}

/// Compute overlap metrics with the default configuration
///
/// # Errors
///
/// Returns an error if:
/// - The fields differ in shape
/// - Either field has zero total mass after clamping
/// - Either field's mass is not finite
pub fn metrics(gaze: &IntensityField, saliency: &IntensityField) -> Result<OverlapMetrics> {
    metrics_with(MetricConfig::default(), gaze, saliency)
}

/// Compute overlap metrics with an explicit configuration
///
/// # Errors
///
/// Returns an error if:
/// - The fields differ in shape
/// - Either field has zero total mass after clamping
/// - Either field's mass is not finite
pub fn metrics_with(
    config: MetricConfig,
    gaze: &IntensityField,
    saliency: &IntensityField,
) -> Result<OverlapMetrics> {
    gaze.ensure_same_shape(saliency).with_field(FieldRole::Saliency)?;

    let gaze = gaze.clamped();
    let saliency = match config.clamp {
        ClampPolicy::Symmetric => Cow::Owned(saliency.clamped()),
        ClampPolicy::GazeOnly => Cow::Borrowed(saliency),
    };

    let masses = Zip::from(gaze.values()).and(saliency.values()).fold(
        Masses::default(),
        |mut acc, &hu, &hs| {
            let intersection = config.intersection.apply(hu, hs);
            acc.gaze += hu;
            acc.saliency += hs;
            acc.intersection += intersection;
            acc.uncovered += hu - intersection;
            acc
        },
    );

    check_mass(FieldRole::Gaze, masses.gaze)?;
    check_mass(FieldRole::Saliency, masses.saliency)?;

    tracing::debug!(
        "Masses: gaze={:.6} saliency={:.6} intersection={:.6} ({})",
        masses.gaze,
        masses.saliency,
        masses.intersection,
        config.intersection
    );

    Ok(OverlapMetrics {
        coverage: masses.intersection / masses.gaze,
        outside_gaze: masses.uncovered / masses.gaze,
        unseen_saliency: masses.uncovered / masses.saliency,
    })
}

/// Elementwise intersection of two same-shape fields, without clamping
///
/// # Errors
///
/// Returns `ShapeMismatch` when the fields differ in shape
pub fn intersection(
    rule: IntersectionRule,
    gaze: &IntensityField,
    saliency: &IntensityField,
) -> Result<IntensityField> {
    gaze.ensure_same_shape(saliency)?;

    let values = Zip::from(gaze.values())
        .and(saliency.values())
        .map_collect(|&hu, &hs| rule.apply(hu, hs));

    Ok(IntensityField::new(values))
}

#[allow(clippy::float_cmp)]
fn check_mass(field: FieldRole, mass: f64) -> Result<()> {
    if !mass.is_finite() {
        return Err(HeatmapError::InvalidSourceData {
            reason: format!("{field} has non-finite total mass {mass}"),
        });
    }
    if mass == 0.0 {
        return Err(HeatmapError::DegenerateField { field });
    }
    Ok(())
}
