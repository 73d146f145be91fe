//! Construction tracing.
//!
//! The builder reports what it does through a [`Tracer`] handed in by the
//! caller. The default [`NullTracer`] compiles to nothing; [`LogTracer`]
//! forwards every event to the `log` facade at trace level.

use crate::geometry::Point;
use crate::hierarchy::TriangleId;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// Polygon was given clockwise and has been reversed.
    Reversed,
    TriangleAdded {
        id: TriangleId,
        vertices: [Point; 3],
        is_inside: bool,
    },
    Pocket([Point; 3]),
    HullPush(Point),
    HullPop(Point),
    /// An outer corner (0, 1 or 2) is stitched to the hull vertex.
    CornerSees { corner: usize, hull_vertex: Point },
    InitialTriangulation { triangles: usize, edges: usize },
    RoundStarted { round: usize, independent_set: usize },
    Retriangulated { vertex: Point, old: usize, new: usize },
    ChildLinked { parent: TriangleId, child: TriangleId },
    RoundFinished { round: usize, vertices_left: usize },
    Root(TriangleId),
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Reversed => write!(f, "polygon was clockwise, reversed"),
            TraceEvent::TriangleAdded { id, vertices: [a, b, c], is_inside } => {
                write!(f, "adding triangle #{id} {a} {b} {c} (inside: {is_inside})")
            }
            TraceEvent::Pocket([a, b, c]) => write!(f, "{a} {b} {c} is a pocket"),
            TraceEvent::HullPush(p) => write!(f, "pushing {p} to convex hull"),
            TraceEvent::HullPop(p) => write!(f, "popping {p} from convex hull"),
            TraceEvent::CornerSees { corner, hull_vertex } => {
                write!(f, "{hull_vertex} sees outer corner {corner}")
            }
            TraceEvent::InitialTriangulation { triangles, edges } => {
                write!(f, "initial triangulation: {triangles} triangles, {edges} edges")
            }
            TraceEvent::RoundStarted { round, independent_set } => {
                write!(f, "round {round}: independent set of size {independent_set}")
            }
            TraceEvent::Retriangulated { vertex, old, new } => {
                write!(f, "retriangulated star of {vertex}: {old} old, {new} new")
            }
            TraceEvent::ChildLinked { parent, child } => {
                write!(f, "triangle #{child} is a child of #{parent}")
            }
            TraceEvent::RoundFinished { round, vertices_left } => {
                write!(f, "round {round} done, {vertices_left} vertices left")
            }
            TraceEvent::Root(id) => write!(f, "got top triangle #{id}"),
        }
    }
}

pub trait Tracer {
    fn trace(&mut self, _event: TraceEvent) {}
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace(&mut self, event: TraceEvent) {
        (**self).trace(event)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {}

/// Forwards events to `log::trace!` under the `geo_kirkpatrick` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&mut self, event: TraceEvent) {
        log::trace!(target: "geo_kirkpatrick", "{event}");
    }
}

/// Keeps every event; handy for inspecting a construction after the fact.
#[derive(Clone, Debug, Default)]
pub struct RecordingTracer {
    pub events: Vec<TraceEvent>,
}

impl Tracer for RecordingTracer {
    fn trace(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
