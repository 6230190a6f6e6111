use thiserror::Error;

/// Top-level error type for the cable geometry engine.
#[derive(Debug, Error)]
pub enum CableError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Material(#[from] MaterialError),
}

impl CableError {
    /// Returns `true` for errors caused by invalid numeric input
    /// (non-positive radii, zero subdivisions, out-of-range amounts, ...).
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Geometry(
                GeometryError::InvalidInput(_)
                    | GeometryError::ParameterOutOfRange { .. }
                    | GeometryError::Degenerate(_)
            )
        )
    }

    /// Returns `true` if the error is an unrecognized color or stripe name.
    #[must_use]
    pub fn is_invalid_color(&self) -> bool {
        matches!(self, Self::Material(MaterialError::InvalidColor(_)))
    }
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the scene arena.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),
}

/// Errors related to material and color lookup.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("\"{0}\" is not a valid colour")]
    InvalidColor(String),

    #[error("unknown material: {0}")]
    UnknownMaterial(String),
}

/// Convenience type alias for results using [`CableError`].
pub type Result<T> = std::result::Result<T, CableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_invalid_input() {
        let err: CableError = GeometryError::InvalidInput("radius".into()).into();
        assert!(err.is_invalid_input());
        assert!(!err.is_invalid_color());
    }

    #[test]
    fn classifies_invalid_color() {
        let err: CableError = MaterialError::InvalidColor("mauve".into()).into();
        assert!(err.is_invalid_color());
        assert!(!err.is_invalid_input());
        assert_eq!(err.to_string(), "\"mauve\" is not a valid colour");
    }
}
