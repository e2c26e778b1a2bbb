use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XsecError {
    #[error("x = {x} is outside the profile ({min} to {max})")]
    OutOfRange { x: f64, min: f64, max: f64 },

    #[error("division by zero computing {0}")]
    DivisionByZero(&'static str),

    #[error("{0} is not a finite number")]
    NotFinite(&'static str),

    #[error("a profile needs at least two points, got {0}")]
    TooFewPoints(usize),

    #[error("both banks must be picked first")]
    NoSection,
}
