pub mod error;
pub mod geometry;
pub mod graph;
pub mod hierarchy;
pub mod io;
pub mod locator;
pub mod trace;
pub mod triangulator;
pub mod utils;
pub mod validate;
pub mod wasm;

pub use error::{LocatorError, Result};
pub use geometry::{Point, Segment};
pub use locator::{LocatorOptions, PointLocator};
pub use trace::{LogTracer, NullTracer, RecordingTracer, TraceEvent, Tracer};
