pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroDimension { width: usize, height: usize },
    ZeroSamples { outer: usize, inner: usize },
    NonPositive { name: &'static str, value: f64 },
    NonFinite { name: &'static str, value: f64 },
    ViewerInsideTorus { viewer_distance: f64, extent: f64 },
    EmptyPalette,
    Usage(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "canvas must be non-empty (got {width}x{height})")
            }
            Self::ZeroSamples { outer, inner } => write!(
                f,
                "torus sweeps need at least one sample each (outer={outer}, inner={inner})"
            ),
            Self::NonPositive { name, value } => {
                write!(f, "{name} must be finite and positive (got {value})")
            }
            Self::NonFinite { name, value } => write!(f, "{name} must be finite (got {value})"),
            Self::ViewerInsideTorus {
                viewer_distance,
                extent,
            } => write!(
                f,
                "viewer distance {viewer_distance} must exceed the torus extent {extent}"
            ),
            Self::EmptyPalette => f.write_str("shading palette is empty"),
            Self::Usage(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}
