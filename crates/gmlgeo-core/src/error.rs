use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Linearization of curve segment type '{0}' is not implemented")]
    UnsupportedSegmentKind(String),

    #[error("Cubic spline control points must be ordered on the x-axis, either ascending or descending")]
    UnorderedControlPoints,

    #[error("Cubic spline linearization requires 2-dimensional control points, got {0} dimensions")]
    UnsupportedDimension(usize),

    #[error("Cubic spline linearization with a max error criterion requires a positive max number of points")]
    PointCountUnderdetermined,

    #[error("At least 2 interpolation points are required, got {0}")]
    InvalidPointCount(usize),

    #[error("Invalid linearization criterion: {0}")]
    InvalidCriterion(String),

    #[error("The given points are collinear, no circle can be fitted through them")]
    CollinearPoints,

    #[error("Singular linear system: {0}")]
    SingularSystem(String),

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown validator id: {0}")]
    UnknownValidator(u32),
}

pub type Result<T> = std::result::Result<T, GeoError>;
