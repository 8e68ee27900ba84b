use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Stable identity of a vertex. Two vertices with equal ids in different graph copies
/// are the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Stable identity of an edge, allocated from a counter independent of [`VertexId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl Display for VertexId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "V{}", self.0)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "E{}", self.0)
    }
}

/// Reference to either kind of graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl From<VertexId> for ElementRef {
    fn from(id: VertexId) -> Self {
        Self::Vertex(id)
    }
}

impl From<EdgeId> for ElementRef {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

/// Monotonic allocator for vertex and edge ids.
///
/// Counters only move forward. The single way to rewind them is [`IdAllocator::reset`],
/// which callers invoke when a new document is started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_vertex: u32,
    next_edge: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_vertex(&mut self) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        id
    }

    pub fn next_edge(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        id
    }

    /// Makes sure `id` is never handed out again.
    pub fn observe_vertex(&mut self, id: VertexId) {
        if id.0 >= self.next_vertex {
            self.next_vertex = id.0 + 1;
        }
    }

    /// Makes sure `id` is never handed out again.
    pub fn observe_edge(&mut self, id: EdgeId) {
        if id.0 >= self.next_edge {
            self.next_edge = id.0 + 1;
        }
    }

    /// Id the next created vertex will get.
    pub fn peek_vertex(&self) -> VertexId {
        VertexId(self.next_vertex)
    }

    /// Id the next created edge will get.
    pub fn peek_edge(&self) -> EdgeId {
        EdgeId(self.next_edge)
    }

    /// Raises each counter to at least the one in `other`.
    pub fn merge(&mut self, other: &IdAllocator) {
        self.next_vertex = self.next_vertex.max(other.next_vertex);
        self.next_edge = self.next_edge.max(other.next_edge);
    }

    pub fn reset(&mut self) {
        self.next_vertex = 0;
        self.next_edge = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_independent_and_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_vertex(), VertexId(0));
        assert_eq!(ids.next_vertex(), VertexId(1));
        assert_eq!(ids.next_edge(), EdgeId(0));
        assert_eq!(ids.next_vertex(), VertexId(2));
        assert_eq!(ids.next_edge(), EdgeId(1));
    }

    #[test]
    fn observe_never_moves_backwards() {
        let mut ids = IdAllocator::new();
        ids.observe_vertex(VertexId(7));
        assert_eq!(ids.peek_vertex(), VertexId(8));
        ids.observe_vertex(VertexId(3));
        assert_eq!(ids.peek_vertex(), VertexId(8));

        ids.observe_edge(EdgeId(0));
        assert_eq!(ids.next_edge(), EdgeId(1));
    }

    #[test]
    fn merge_keeps_the_higher_counter() {
        let mut ahead = IdAllocator::new();
        ahead.observe_vertex(VertexId(5));
        let mut other = IdAllocator::new();
        other.observe_edge(EdgeId(2));

        other.merge(&ahead);
        assert_eq!(other.peek_vertex(), VertexId(6));
        assert_eq!(other.peek_edge(), EdgeId(3));

        ahead.merge(&IdAllocator::new());
        assert_eq!(ahead.peek_vertex(), VertexId(6));
    }

    #[test]
    fn reset_rewinds_both_counters() {
        let mut ids = IdAllocator::new();
        ids.next_vertex();
        ids.next_edge();
        ids.reset();
        assert_eq!(ids.next_vertex(), VertexId(0));
        assert_eq!(ids.next_edge(), EdgeId(0));
    }
}
