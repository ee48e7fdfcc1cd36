use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Keyframe '{keyframe}' is missing '{field}' declared on the other keyframe")]
    MissingKeyframeField {
        keyframe: &'static str,
        field: &'static str,
    },

    #[error("Keyframe '{keyframe}' has a non-finite '{field}'")]
    NonFiniteKeyframe {
        keyframe: &'static str,
        field: &'static str,
    },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid easing curve: {0}")]
    InvalidEasing(String),

    #[error("Interpolation map needs at least two breakpoints, got {0}")]
    TooFewBreakpoints(usize),

    #[error("Breakpoint {index} input {input} is outside [0, 1]")]
    BreakpointOutOfRange { index: usize, input: f64 },

    #[error("Breakpoint {index} input {input} does not increase past {previous}")]
    NonMonotonicBreakpoints {
        index: usize,
        input: f64,
        previous: f64,
    },

    #[error("Invalid viewport margin: {0}")]
    InvalidMargin(String),

    #[error("Invalid scroll offset: {0}")]
    InvalidScrollOffset(String),

    #[error("Invalid scroll range: {0}")]
    InvalidScrollRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
