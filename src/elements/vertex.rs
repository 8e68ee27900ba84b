use std::cmp::Ordering;

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use super::{ElementState, VertexId};

/// Stores properties of a vertex.
///
/// The id is fixed at creation time; everything else may change while the vertex
/// lives in a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    id: VertexId,

    label: String,
    /// Algorithm annotation shown below the label, e.g. a computed distance.
    label_addition: String,

    location: Pos2,
    state: ElementState,

    /// If `color` is None the state color is used.
    color: Option<Color32>,
    picked: bool,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, location: Pos2) -> Self {
        Self {
            id,
            label: String::new(),
            label_addition: String::new(),
            location,
            state: ElementState::default(),
            color: None,
            picked: false,
        }
    }

    /// Builds a vertex with a given id, for restoring persisted graphs.
    pub fn restore(id: VertexId, location: Pos2) -> Self {
        Self::new(id, location)
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Label to show in listings: the label itself or `v<id>` if it is empty.
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            format!("v{}", self.id.0)
        } else {
            self.label.clone()
        }
    }

    /// Listing order of vertices: by display name, ties broken by id.
    pub fn cmp_by_label(&self, other: &Self) -> Ordering {
        self.display_name()
            .cmp(&other.display_name())
            .then(self.id.cmp(&other.id))
    }

    pub fn label_addition(&self) -> &str {
        &self.label_addition
    }

    pub fn set_label_addition(&mut self, addition: impl Into<String>) {
        self.label_addition = addition.into();
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn set_location(&mut self, location: Pos2) {
        self.location = location;
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

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn picked(&self) -> bool {
        self.picked
    }

    pub fn set_picked(&mut self, picked: bool) {
        self.picked = picked;
    }
}
