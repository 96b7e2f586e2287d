pub use crate::geom::ExponentBoundExceeded;
pub use crate::path::DegenerateInput;

use crate::geometry_builder::Count;

/// The strip tessellator's result type.
pub type TessellationResult = Result<Count, TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    InvalidVertex,
    TooManyVertices,
}

#[cfg(feature = "std")]
impl core::fmt::Display for GeometryBuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GeometryBuilderError::InvalidVertex => {
                std::write!(f, "Invalid vertex")
            },
            GeometryBuilderError::TooManyVertices => {
                std::write!(f, "Too many vertices")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GeometryBuilderError {}

/// The strip tessellator's error enumeration.
///
/// A negative or non-finite tolerance is not an error: curves are then considered
/// flat enough and not subdivided. Reaching the maximum flattening depth is not an
/// error either.
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    /// The input doesn't describe a well formed path.
    DegenerateInput(DegenerateInput),
    /// A conic needs more quadratic segments than allowed by the options, and the
    /// options ask for this to be reported.
    ExponentBoundExceeded(ExponentBoundExceeded),
    GeometryBuilder(GeometryBuilderError),
}

#[cfg(feature = "std")]
impl core::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TessellationError::DegenerateInput(e) => {
                std::write!(f, "Degenerate input: {e}")
            },
            TessellationError::ExponentBoundExceeded(e) => {
                std::write!(f, "Exponent bound exceeded: {e}")
            },
            TessellationError::GeometryBuilder(e) => {
                std::write!(f, "Geometry builder error: {e}")
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TessellationError {}

impl core::convert::From<DegenerateInput> for TessellationError {
    fn from(value: DegenerateInput) -> Self {
        Self::DegenerateInput(value)
    }
}

impl core::convert::From<ExponentBoundExceeded> for TessellationError {
    fn from(value: ExponentBoundExceeded) -> Self {
        Self::ExponentBoundExceeded(value)
    }
}

impl core::convert::From<GeometryBuilderError> for TessellationError {
    fn from(value: GeometryBuilderError) -> Self {
        Self::GeometryBuilder(value)
    }
}
