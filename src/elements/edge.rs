use std::cmp::Ordering;

use egui::Color32;
use serde::{Deserialize, Serialize};

use super::{EdgeId, ElementState, VertexId};

pub const DEFAULT_WEIGHT: f64 = 1.0;
pub const DEFAULT_CAPACITY: f64 = 1.0;

/// Stores properties of an edge.
///
/// Endpoints and directedness are fixed at creation, so the degree bookkeeping of the
/// owning graph can never go stale. Weight, capacities and annotations can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,

    weight: f64,
    min_capacity: f64,
    max_capacity: f64,

    start: VertexId,
    end: VertexId,
    directed: bool,

    state: ElementState,
    color: Option<Color32>,
    /// Replaces the default weight/capacity label when set.
    label: Option<String>,
    picked: bool,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, start: VertexId, end: VertexId, directed: bool) -> Self {
        Self {
            id,
            weight: DEFAULT_WEIGHT,
            min_capacity: DEFAULT_CAPACITY,
            max_capacity: DEFAULT_CAPACITY,
            start,
            end,
            directed,
            state: ElementState::default(),
            color: None,
            label: None,
            picked: false,
        }
    }

    /// Builds an edge with a given id, for restoring persisted graphs.
    pub fn restore(id: EdgeId, start: VertexId, end: VertexId, directed: bool) -> Self {
        Self::new(id, start, end, directed)
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.start, self.end)
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `v` is one of the two endpoints.
    pub fn touches(&self, v: VertexId) -> bool {
        self.start == v || self.end == v
    }

    /// Returns the opposite endpoint of `v`, or `None` if `v` is not an endpoint.
    pub fn other_end(&self, v: VertexId) -> Option<VertexId> {
        if self.start == v {
            Some(self.end)
        } else if self.end == v {
            Some(self.start)
        } else {
            None
        }
    }

    /// Listing order of edges: by id.
    pub fn cmp_by_id(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }

    /// Returns true if the edge can be traversed starting at `v`.
    pub fn leaves(&self, v: VertexId) -> bool {
        if self.directed {
            self.start == v
        } else {
            self.touches(v)
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn min_capacity(&self) -> f64 {
        self.min_capacity
    }

    pub fn set_min_capacity(&mut self, capacity: f64) {
        self.min_capacity = capacity;
    }

    pub fn max_capacity(&self) -> f64 {
        self.max_capacity
    }

    pub fn set_max_capacity(&mut self, capacity: f64) {
        self.max_capacity = capacity;
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    pub fn set_state(&mut self, state: ElementState) {
        self.state = state;
    }

    pub fn color(&self) -> Option<Color32> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color32>) {
        self.color = color;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn picked(&self) -> bool {
        self.picked
    }

    pub fn set_picked(&mut self, picked: bool) {
        self.picked = picked;
    }
}
