use crate::geometry::{Point, Segment};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("vertex {0} is not in the graph")]
    VertexNotInGraph(Point),

    #[error("vertex {0} is already in the graph")]
    DuplicateVertex(Point),

    #[error("refusing to add a self-loop at {0}")]
    SelfLoop(Point),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    InsufficientVertices(usize),

    #[error("duplicate polygon vertex {0}")]
    DuplicatePoint(Point),

    #[error("collinear or degenerate polygon at vertex {0}")]
    CollinearVertices(Point),

    #[error("polygon edges {0} and {1} intersect")]
    SelfIntersection(Segment, Segment),

    #[error("coordinate {0} is outside the supported range")]
    CoordinateOutOfRange(Point),

    #[error("Triangulation error: {0}")]
    Triangulation(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LocatorError>;
