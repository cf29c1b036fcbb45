use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    #[error("Ring requires at least 3 distinct positions, got {0}")]
    RingTooFewPoints(usize),

    #[error("Line requires at least 2 positions, got {0}")]
    LineTooFewPoints(usize),

    #[error("Polygon hole ring must be closed")]
    HoleNotClosed,
}
