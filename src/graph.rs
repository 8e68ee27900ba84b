use std::collections::HashMap;

use egui::{Pos2, Vec2};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::{
    Edge, EdgeId, ElementRef, ElementState, GraphError, IdAllocator, StateEvent, Vertex, VertexId,
};

type Arena = StableGraph<Vertex, Edge, Directed, u32>;

/// Outgoing-edge index and degree tables derived from the edge collection.
///
/// For an undirected edge "outgoing" means incident, and it counts once into the
/// in-degree and once into the out-degree of each endpoint (once in total for a loop).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Adjacency {
    out_edges: HashMap<VertexId, Vec<EdgeId>>,
    in_degree: HashMap<VertexId, usize>,
    out_degree: HashMap<VertexId, usize>,
}

impl Adjacency {
    fn build<'a>(vertices: &[VertexId], edges: impl Iterator<Item = &'a Edge>) -> Self {
        let mut adj = Self::default();
        for v in vertices {
            adj.add_vertex(*v);
        }
        for e in edges {
            adj.add_edge(e);
        }
        adj
    }

    fn add_vertex(&mut self, v: VertexId) {
        self.out_edges.insert(v, Vec::new());
        self.in_degree.insert(v, 0);
        self.out_degree.insert(v, 0);
    }

    fn add_edge(&mut self, e: &Edge) {
        let (start, end) = e.endpoints();
        if e.directed() {
            self.push_out(start, e.id());
            self.bump_in(end);
            return;
        }

        self.push_out(start, e.id());
        self.bump_in(start);
        if start != end {
            self.push_out(end, e.id());
            self.bump_in(end);
        }
    }

    fn push_out(&mut self, v: VertexId, e: EdgeId) {
        self.out_edges.entry(v).or_default().push(e);
        *self.out_degree.entry(v).or_default() += 1;
    }

    fn bump_in(&mut self, v: VertexId) {
        *self.in_degree.entry(v).or_default() += 1;
    }
}

/// Graph of [`Vertex`] and [`Edge`] elements addressed by their stable ids.
///
/// Elements live in a [`petgraph::stable_graph::StableGraph`] arena; ids are resolved to
/// arena indices through lookup tables, and insertion order is tracked separately for
/// deterministic iteration. Directed and undirected edges can be mixed and parallel
/// edges are permitted. Self-loops are governed by the graph's self-loop policy.
///
/// Cloning a graph is a deep copy that preserves ids; see [`Graph::copy`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(into = "GraphSnapshot", try_from = "GraphSnapshot")]
pub struct Graph {
    g: Arena,

    vertex_order: Vec<VertexId>,
    edge_order: Vec<EdgeId>,
    vertex_index: HashMap<VertexId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,

    adjacency: Adjacency,

    ids: IdAllocator,
    allow_self_loops: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Graph {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.allow_self_loops == other.allow_self_loops
            && self.vertex_order == other.vertex_order
            && self.edge_order == other.edge_order
            && self.vertices().eq(other.vertices())
            && self.edges().eq(other.edges())
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            g: Arena::default(),
            vertex_order: Vec::default(),
            edge_order: Vec::default(),
            vertex_index: HashMap::default(),
            edge_index: HashMap::default(),
            adjacency: Adjacency::default(),
            ids: IdAllocator::default(),
            allow_self_loops: false,
        }
    }

    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }

    pub fn allow_self_loops(&self) -> bool {
        self.allow_self_loops
    }

    /// Changes the self-loop policy. Existing loops are kept.
    pub fn set_allow_self_loops(&mut self, allow: bool) {
        self.allow_self_loops = allow;
    }

    /// Full deep copy: new vertex and edge instances with identical ids and fields,
    /// sharing nothing with `self`. The outgoing-edge index and degree tables are
    /// rebuilt from the copied edges.
    ///
    /// # Panics
    ///
    /// Panics if an edge references a vertex that is not part of the graph. That can
    /// only happen if the graph's own invariants were broken.
    pub fn copy(&self) -> Self {
        let mut copy = Self {
            ids: self.ids.clone(),
            allow_self_loops: self.allow_self_loops,
            ..Self::new()
        };

        for v in self.vertices() {
            copy.attach_vertex(v.clone());
        }
        for e in self.edges() {
            copy.attach_edge(e.clone());
        }
        copy.rebuild_adjacency();

        copy
    }

    /// Serializable representation of the graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self.vertices().cloned().collect(),
            edges: self.edges().cloned().collect(),
            ids: self.ids.clone(),
            allow_self_loops: self.allow_self_loops,
        }
    }

    /// Creates a vertex at `location` with the next unused id.
    pub fn add_vertex(&mut self, location: Pos2) -> VertexId {
        let id = self.ids.next_vertex();
        self.attach_vertex(Vertex::new(id, location));
        self.adjacency.add_vertex(id);
        id
    }

    /// Creates a labeled vertex at `location` with the next unused id.
    pub fn add_vertex_with_label(&mut self, location: Pos2, label: impl Into<String>) -> VertexId {
        let id = self.add_vertex(location);
        if let Some(v) = self.vertex_mut(id) {
            v.set_label(label);
        }
        id
    }

    /// Inserts an already built vertex keeping its id. The id allocator is advanced so
    /// the id is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if the id is taken.
    pub fn insert_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GraphError> {
        let id = vertex.id();
        if self.vertex_index.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }

        self.ids.observe_vertex(id);
        self.attach_vertex(vertex);
        self.adjacency.add_vertex(id);
        Ok(id)
    }

    /// Creates an edge between `start` and `end` with the next unused edge id.
    ///
    /// # Errors
    ///
    /// Fails if either endpoint is missing, or if `start == end` and the graph does not
    /// allow self-loops.
    pub fn add_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        directed: bool,
    ) -> Result<EdgeId, GraphError> {
        self.check_endpoints(start, end)?;

        let id = self.ids.next_edge();
        let edge = Edge::new(id, start, end, directed);
        self.adjacency.add_edge(&edge);
        self.attach_edge(edge);
        Ok(id)
    }

    /// Inserts an already built edge keeping its id.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate id, a missing endpoint or a disallowed self-loop.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        let id = edge.id();
        if self.edge_index.contains_key(&id) {
            return Err(GraphError::DuplicateEdge(id));
        }
        self.check_endpoints(edge.start(), edge.end())?;

        self.ids.observe_edge(id);
        self.adjacency.add_edge(&edge);
        self.attach_edge(edge);
        Ok(id)
    }

    /// Removes a vertex together with every edge incident to it. Returns the removed
    /// vertex and edges, edges in insertion order.
    ///
    /// Degree tables and the outgoing-edge index are rebuilt once, after all removals.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if the vertex does not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<(Vertex, Vec<Edge>), GraphError> {
        let idx = *self
            .vertex_index
            .get(&id)
            .ok_or(GraphError::UnknownVertex(id))?;

        let incident = self
            .edges()
            .filter(|e| e.touches(id))
            .map(Edge::id)
            .collect::<Vec<_>>();

        let mut removed = Vec::with_capacity(incident.len());
        for e in &incident {
            if let Some(e_idx) = self.edge_index.remove(e) {
                removed.extend(self.g.remove_edge(e_idx));
            }
        }
        self.edge_order.retain(|e| !incident.contains(e));

        let vertex = self
            .g
            .remove_node(idx)
            .ok_or(GraphError::UnknownVertex(id))?;
        self.vertex_index.remove(&id);
        self.vertex_order.retain(|v| *v != id);

        self.rebuild_adjacency();

        Ok((vertex, removed))
    }

    /// Removes a single edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownEdge`] if the edge does not exist.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        let idx = self
            .edge_index
            .remove(&id)
            .ok_or(GraphError::UnknownEdge(id))?;
        let edge = self.g.remove_edge(idx).ok_or(GraphError::UnknownEdge(id))?;
        self.edge_order.retain(|e| *e != id);

        self.rebuild_adjacency();

        Ok(edge)
    }

    /// Removes every element and rewinds both id counters. This is the "new document"
    /// action; the self-loop policy is kept.
    pub fn clear(&mut self) {
        *self = Self::new().with_self_loops(self.allow_self_loops);
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Makes sure no id handed out by `ids` is allocated again by this graph.
    pub fn reserve_ids(&mut self, ids: &IdAllocator) {
        self.ids.merge(ids);
    }

    /// Rewinds the id counters as far back as the current elements allow: on an empty
    /// graph the next ids are 0 again.
    pub fn reset_ids(&mut self) {
        self.ids.reset();
        for v in &self.vertex_order {
            self.ids.observe_vertex(*v);
        }
        for e in &self.edge_order {
            self.ids.observe_edge(*e);
        }
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertex_index
            .get(&id)
            .and_then(|idx| self.g.node_weight(*idx))
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertex_index
            .get(&id)
            .and_then(|idx| self.g.node_weight_mut(*idx))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index
            .get(&id)
            .and_then(|idx| self.g.edge_weight(*idx))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edge_index
            .get(&id)
            .and_then(|idx| self.g.edge_weight_mut(*idx))
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex_index.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_index.contains_key(&id)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertex_order.iter().filter_map(|id| self.vertex(*id))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter().filter_map(|id| self.edge(*id))
    }

    /// Mutable access to all vertices in arena order.
    pub fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> {
        self.g.node_weights_mut()
    }

    /// Mutable access to all edges in arena order.
    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.g.edge_weights_mut()
    }

    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.vertex_order
    }

    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edge_order
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_order.is_empty()
    }

    /// Edges that can be traversed starting at `v`: directed edges starting at `v`
    /// and undirected edges incident to it, in insertion order.
    pub fn out_edges(&self, v: VertexId) -> Option<&[EdgeId]> {
        self.adjacency.out_edges.get(&v).map(Vec::as_slice)
    }

    pub fn in_degree(&self, v: VertexId) -> Option<usize> {
        self.adjacency.in_degree.get(&v).copied()
    }

    pub fn out_degree(&self, v: VertexId) -> Option<usize> {
        self.adjacency.out_degree.get(&v).copied()
    }

    /// All edges with `a` as one endpoint and `b` as the other, regardless of
    /// direction. Parallel edges are all returned, in insertion order.
    pub fn edges_between(&self, a: VertexId, b: VertexId) -> Vec<&Edge> {
        self.edges()
            .filter(|e| {
                let (start, end) = e.endpoints();
                (start == a && end == b) || (start == b && end == a)
            })
            .collect()
    }

    /// Edges that lead from `a` to `b` when walking the graph: directed `a -> b` edges
    /// and undirected edges between the two.
    pub fn edges_from_to(&self, a: VertexId, b: VertexId) -> Vec<&Edge> {
        self.edges()
            .filter(|e| e.leaves(a) && e.other_end(a) == Some(b))
            .collect()
    }

    /// Endpoint of `edge` opposite to `v`.
    ///
    /// # Errors
    ///
    /// Fails if the edge does not exist or `v` is not one of its endpoints.
    pub fn other_end(&self, edge: EdgeId, v: VertexId) -> Result<VertexId, GraphError> {
        let e = self.edge(edge).ok_or(GraphError::UnknownEdge(edge))?;
        e.other_end(v)
            .ok_or(GraphError::NotAnEndpoint { edge, vertex: v })
    }

    /// Moves a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if the vertex does not exist.
    pub fn set_location(&mut self, id: VertexId, location: Pos2) -> Result<(), GraphError> {
        let v = self.vertex_mut(id).ok_or(GraphError::UnknownVertex(id))?;
        v.set_location(location);
        Ok(())
    }

    /// Sets the state of a vertex or an edge.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist.
    pub fn set_state(&mut self, element: ElementRef, state: ElementState) -> Result<(), GraphError> {
        match element {
            ElementRef::Vertex(id) => self
                .vertex_mut(id)
                .ok_or(GraphError::UnknownVertex(id))?
                .set_state(state),
            ElementRef::Edge(id) => self
                .edge_mut(id)
                .ok_or(GraphError::UnknownEdge(id))?
                .set_state(state),
        }
        Ok(())
    }

    /// Attaches an algorithm annotation: the label addition of a vertex or the
    /// override label of an edge.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist.
    pub fn annotate(&mut self, element: ElementRef, text: &str) -> Result<(), GraphError> {
        match element {
            ElementRef::Vertex(id) => self
                .vertex_mut(id)
                .ok_or(GraphError::UnknownVertex(id))?
                .set_label_addition(text),
            ElementRef::Edge(id) => self
                .edge_mut(id)
                .ok_or(GraphError::UnknownEdge(id))?
                .set_label(Some(text.to_string())),
        }
        Ok(())
    }

    /// Applies one playback step: the new state and, if present, the annotation.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist; nothing is changed in that case.
    pub fn apply(&mut self, event: &StateEvent) -> Result<(), GraphError> {
        self.set_state(event.element, event.state)?;
        if let Some(text) = &event.annotation {
            self.annotate(event.element, text)?;
        }
        Ok(())
    }

    /// Sets every vertex back to [`ElementState::Unvisited`]. Edges are left alone,
    /// see [`Graph::reset_edge_states`].
    pub fn reset_states(&mut self) {
        for v in self.vertices_mut() {
            v.set_state(ElementState::Unvisited);
        }
    }

    pub fn reset_edge_states(&mut self) {
        for e in self.edges_mut() {
            e.set_state(ElementState::Unvisited);
        }
    }

    pub fn reset_all_states(&mut self) {
        self.reset_states();
        self.reset_edge_states();
    }

    pub fn picked_vertices(&self) -> Vec<VertexId> {
        self.vertices()
            .filter(|v| v.picked())
            .map(Vertex::id)
            .collect()
    }

    pub fn picked_edges(&self) -> Vec<EdgeId> {
        self.edges().filter(|e| e.picked()).map(Edge::id).collect()
    }

    /// Flips the picked flag of an element and returns the new value.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist.
    pub fn toggle_pick(&mut self, element: ElementRef) -> Result<bool, GraphError> {
        let picked = match element {
            ElementRef::Vertex(id) => {
                let v = self.vertex_mut(id).ok_or(GraphError::UnknownVertex(id))?;
                v.set_picked(!v.picked());
                v.picked()
            }
            ElementRef::Edge(id) => {
                let e = self.edge_mut(id).ok_or(GraphError::UnknownEdge(id))?;
                e.set_picked(!e.picked());
                e.picked()
            }
        };
        Ok(picked)
    }

    pub fn clear_picks(&mut self) {
        for v in self.vertices_mut() {
            v.set_picked(false);
        }
        for e in self.edges_mut() {
            e.set_picked(false);
        }
    }

    /// Finds the topmost vertex whose disc of `radius` contains `pos`.
    /// Later vertices are drawn on top, so they win.
    pub fn vertex_at(&self, pos: Pos2, radius: f32) -> Option<VertexId> {
        self.vertex_order
            .iter()
            .rev()
            .filter_map(|id| self.vertex(*id))
            .find(|v| v.location().distance_sq(pos) <= radius * radius)
            .map(Vertex::id)
    }

    /// Finds the topmost edge passing within `tolerance` of `pos`. Straight edges are
    /// tested as segments, loops as a circle of `vertex_radius` sitting on top of the
    /// vertex.
    pub fn edge_at(&self, pos: Pos2, vertex_radius: f32, tolerance: f32) -> Option<EdgeId> {
        self.edge_order
            .iter()
            .rev()
            .filter_map(|id| self.edge(*id))
            .find(|e| {
                let (Some(start), Some(end)) = (self.vertex(e.start()), self.vertex(e.end()))
                else {
                    return false;
                };
                if e.is_loop() {
                    let center = start.location() - Vec2::new(0., vertex_radius);
                    return (center.distance(pos) - vertex_radius).abs() <= tolerance;
                }
                distance_to_segment(pos, start.location(), end.location()) <= tolerance
            })
            .map(Edge::id)
    }

    fn check_endpoints(&self, start: VertexId, end: VertexId) -> Result<(), GraphError> {
        if !self.contains_vertex(start) {
            return Err(GraphError::UnknownVertex(start));
        }
        if !self.contains_vertex(end) {
            return Err(GraphError::UnknownVertex(end));
        }
        if start == end && !self.allow_self_loops {
            return Err(GraphError::SelfLoop(start));
        }
        Ok(())
    }

    fn attach_vertex(&mut self, vertex: Vertex) {
        let id = vertex.id();
        let idx = self.g.add_node(vertex);
        self.vertex_index.insert(id, idx);
        self.vertex_order.push(id);
    }

    fn attach_edge(&mut self, edge: Edge) {
        let (Some(&start), Some(&end)) = (
            self.vertex_index.get(&edge.start()),
            self.vertex_index.get(&edge.end()),
        ) else {
            panic!(
                "edge {} references a vertex missing from the graph ({} -> {})",
                edge.id(),
                edge.start(),
                edge.end()
            );
        };

        let id = edge.id();
        let idx = self.g.add_edge(start, end, edge);
        self.edge_index.insert(id, idx);
        self.edge_order.push(id);
    }

    fn rebuild_adjacency(&mut self) {
        let adjacency = Adjacency::build(&self.vertex_order, self.edges());
        self.adjacency = adjacency;
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0. {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0., 1.);
    p.distance(a + ab * t)
}

/// Serializable form of a [`Graph`]: ordered elements plus id counters and the
/// self-loop policy. Restoring validates every edge endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub ids: IdAllocator,
    #[serde(default)]
    pub allow_self_loops: bool,
}

impl From<Graph> for GraphSnapshot {
    fn from(g: Graph) -> Self {
        g.snapshot()
    }
}

impl TryFrom<GraphSnapshot> for Graph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        let mut g = Graph::new().with_self_loops(snapshot.allow_self_loops);
        g.ids = snapshot.ids;
        for v in snapshot.vertices {
            g.insert_vertex(v)?;
        }
        for e in snapshot.edges {
            g.insert_edge(e)?;
        }
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Graph, [VertexId; 3]) {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::new(0., 0.));
        let b = g.add_vertex(Pos2::new(100., 0.));
        let c = g.add_vertex(Pos2::new(0., 100.));
        g.add_edge(a, b, true).unwrap();
        g.add_edge(b, c, false).unwrap();
        g.add_edge(c, a, true).unwrap();
        (g, [a, b, c])
    }

    fn assert_consistent(g: &Graph) {
        let expected = Adjacency::build(&g.vertex_order, g.edges());
        assert_eq!(g.adjacency, expected, "derived tables went stale");
        assert_eq!(g.g.node_count(), g.vertex_order.len());
        assert_eq!(g.g.edge_count(), g.edge_order.len());
        for e in g.edges() {
            assert!(g.contains_vertex(e.start()));
            assert!(g.contains_vertex(e.end()));
        }
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut g = Graph::new();
        let ids = (0..10)
            .map(|i| g.add_vertex(Pos2::new(i as f32, 0.)))
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        g.remove_vertex(ids[9]).unwrap();
        let next = g.add_vertex(Pos2::ZERO);
        assert_eq!(next, VertexId(10), "removed ids must not be reused");
    }

    #[test]
    fn clear_resets_counters() {
        let (mut g, _) = triangle();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.add_vertex(Pos2::ZERO), VertexId(0));
    }

    #[test]
    fn reset_ids_rewinds_to_lowest_safe_value() {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        let b = g.add_vertex(Pos2::ZERO);
        g.remove_vertex(b).unwrap();
        g.reset_ids();
        assert_eq!(g.add_vertex(Pos2::ZERO), VertexId(a.0 + 1));
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut newer = Graph::new();
        for _ in 0..4 {
            newer.add_vertex(Pos2::ZERO);
        }
        let mut older = Graph::new();
        older.add_vertex(Pos2::ZERO);

        older.reserve_ids(newer.ids());
        assert_eq!(older.add_vertex(Pos2::ZERO), VertexId(4));
        assert_eq!(older.vertex_count(), 2);
    }

    #[test]
    fn degrees_follow_edge_direction() {
        let (g, [a, b, c]) = triangle();
        assert_consistent(&g);

        // a->b directed, b-c undirected, c->a directed
        assert_eq!(g.out_degree(a), Some(1));
        assert_eq!(g.in_degree(a), Some(1));
        assert_eq!(g.out_degree(b), Some(1));
        assert_eq!(g.in_degree(b), Some(2));
        assert_eq!(g.out_degree(c), Some(2));
        assert_eq!(g.in_degree(c), Some(1));

        assert_eq!(g.out_edges(b), Some(&[EdgeId(1)][..]));
        assert_eq!(g.out_edges(c), Some(&[EdgeId(1), EdgeId(2)][..]));
    }

    #[test]
    fn self_loops_follow_policy() {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        assert_eq!(g.add_edge(a, a, true), Err(GraphError::SelfLoop(a)));
        assert_eq!(g.edge_count(), 0);

        g.set_allow_self_loops(true);
        let e = g.add_edge(a, a, false).unwrap();
        assert_eq!(g.out_edges(a), Some(&[e][..]));
        assert_eq!(g.in_degree(a), Some(1));
        assert_eq!(g.out_degree(a), Some(1));
        assert_consistent(&g);
    }

    #[test]
    fn add_edge_rejects_missing_endpoint() {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        let ghost = VertexId(42);
        assert_eq!(
            g.add_edge(a, ghost, true),
            Err(GraphError::UnknownVertex(ghost))
        );
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.ids().peek_edge(), EdgeId(0));
    }

    #[test]
    fn remove_vertex_drops_incident_edges_and_updates_degrees() {
        let (mut g, [a, b, c]) = triangle();
        let (removed, edges) = g.remove_vertex(a).unwrap();
        assert_eq!(removed.id(), a);
        assert_eq!(
            edges.iter().map(Edge::id).collect::<Vec<_>>(),
            vec![EdgeId(0), EdgeId(2)]
        );

        assert_eq!(g.edge_count(), 1);
        // b lost the incoming a->b, c lost the outgoing c->a
        assert_eq!(g.in_degree(b), Some(1));
        assert_eq!(g.out_degree(c), Some(1));
        assert_eq!(g.out_degree(a), None);
        assert_consistent(&g);
    }

    #[test]
    fn remove_unknown_vertex_fails() {
        let (mut g, _) = triangle();
        assert_eq!(
            g.remove_vertex(VertexId(99)).unwrap_err(),
            GraphError::UnknownVertex(VertexId(99))
        );
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn edges_between_returns_parallel_edges() {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        let b = g.add_vertex(Pos2::new(1., 1.));
        let e1 = g.add_edge(a, b, true).unwrap();
        let back = g.add_edge(b, a, true).unwrap();
        let e2 = g.add_edge(a, b, true).unwrap();

        let between = g.edges_between(a, b).iter().map(|e| e.id()).collect::<Vec<_>>();
        assert_eq!(between, vec![e1, back, e2]);

        let walk = g.edges_from_to(a, b).iter().map(|e| e.id()).collect::<Vec<_>>();
        assert_eq!(walk, vec![e1, e2]);
    }

    #[test]
    fn other_end_reports_non_endpoint() {
        let (g, [a, b, c]) = triangle();
        assert_eq!(g.other_end(EdgeId(0), a), Ok(b));
        assert_eq!(
            g.other_end(EdgeId(0), c),
            Err(GraphError::NotAnEndpoint {
                edge: EdgeId(0),
                vertex: c
            })
        );
    }

    #[test]
    fn copy_is_deep_and_id_preserving() {
        let (mut g, [a, b, _]) = triangle();
        g.edge_mut(EdgeId(0)).unwrap().set_weight(2.5);
        g.set_state(ElementRef::Vertex(b), ElementState::Visited)
            .unwrap();

        let mut copy = g.copy();
        assert_eq!(copy, g);
        assert_consistent(&copy);

        copy.set_state(ElementRef::Vertex(a), ElementState::Active)
            .unwrap();
        copy.set_location(a, Pos2::new(7., 7.)).unwrap();
        copy.remove_vertex(b).unwrap();

        assert_eq!(g.vertex(a).unwrap().state(), ElementState::Unvisited);
        assert_eq!(g.vertex(a).unwrap().location(), Pos2::ZERO);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn copy_keeps_insertion_order_after_slot_reuse() {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        let b = g.add_vertex(Pos2::ZERO);
        g.remove_vertex(a).unwrap();
        // the arena reuses a's slot for c
        let c = g.add_vertex(Pos2::ZERO);
        assert_eq!(g.vertex_ids(), &[b, c]);
        assert_eq!(g.copy().vertex_ids(), &[b, c]);
    }

    #[test]
    fn reset_states_touches_vertices_only() {
        let (mut g, [a, _, _]) = triangle();
        g.set_state(ElementRef::Vertex(a), ElementState::Active)
            .unwrap();
        g.set_state(ElementRef::Edge(EdgeId(0)), ElementState::Visited)
            .unwrap();

        g.reset_states();
        assert_eq!(g.vertex(a).unwrap().state(), ElementState::Unvisited);
        assert_eq!(g.edge(EdgeId(0)).unwrap().state(), ElementState::Visited);

        g.reset_all_states();
        assert_eq!(g.edge(EdgeId(0)).unwrap().state(), ElementState::Unvisited);
    }

    #[test]
    fn hit_testing_prefers_topmost() {
        let mut g = Graph::new();
        let _a = g.add_vertex(Pos2::new(50., 50.));
        let b = g.add_vertex(Pos2::new(60., 50.));
        assert_eq!(g.vertex_at(Pos2::new(55., 50.), 20.), Some(b));
        assert_eq!(g.vertex_at(Pos2::new(200., 200.), 20.), None);
    }

    #[test]
    fn edge_hit_testing_uses_segment_distance() {
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::new(0., 0.));
        let b = g.add_vertex(Pos2::new(100., 0.));
        let e = g.add_edge(a, b, false).unwrap();
        assert_eq!(g.edge_at(Pos2::new(50., 3.), 20., 5.), Some(e));
        assert_eq!(g.edge_at(Pos2::new(50., 30.), 20., 5.), None);
        assert_eq!(g.edge_at(Pos2::new(130., 0.), 20., 5.), None);
    }

    #[test]
    fn snapshot_restore_rejects_dangling_edges() {
        let (g, _) = triangle();
        let mut snapshot = g.snapshot();
        snapshot.vertices.remove(0);
        assert!(matches!(
            Graph::try_from(snapshot),
            Err(GraphError::UnknownVertex(_))
        ));
    }

    #[test]
    fn insert_advances_allocator() {
        let mut g = Graph::new();
        g.insert_vertex(Vertex::restore(VertexId(5), Pos2::ZERO))
            .unwrap();
        assert_eq!(g.add_vertex(Pos2::ZERO), VertexId(6));
        assert_eq!(
            g.insert_vertex(Vertex::restore(VertexId(5), Pos2::ZERO)),
            Err(GraphError::DuplicateVertex(VertexId(5)))
        );
    }
}
