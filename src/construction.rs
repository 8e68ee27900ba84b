use egui::{Pos2, Vec2};
use log::debug;

use crate::{
    EdgeId, EdgePreview, ElementRef, Graph, GraphError, SettingsConstruction, SettingsLayout,
    VertexId,
};

/// What the user asked for with a pointer press. Hosts map their modifier keys or
/// tool palette onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Create a vertex on empty canvas.
    Place,
    /// Drag an edge out of the pressed vertex.
    DrawEdge { directed: bool },
    /// Toggle the picked flag of the pressed element.
    Select,
    /// Drag the pressed vertex around.
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { pos: Pos2, gesture: Gesture },
    Drag { pos: Pos2 },
    Release { pos: Pos2 },
}

/// Edge being dragged out of `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdge {
    pub start: VertexId,
    pub directed: bool,
    /// Pointer position of the press, a release at the same point never commits.
    pub press: Pos2,
    pub preview: EdgePreview,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    DrawingEdge(PendingEdge),
    MovingVertex {
        vertex: VertexId,
        /// Vertex center minus the press position.
        offset: Vec2,
    },
}

/// What handling a pointer event did to the graph. Gesture-level non-events, like an
/// edge released over empty canvas, are reported here and never as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    VertexCreated(VertexId),
    EdgeStarted { start: VertexId, directed: bool },
    PreviewUpdated,
    EdgeCreated(EdgeId),
    EdgeCancelled,
    Toggled { element: ElementRef, picked: bool },
    VertexMoved(VertexId),
    MoveFinished(VertexId),
    /// Editing is disabled and the gesture would have changed the graph.
    Rejected,
}

/// Elements removed by [`ConstructionMachine::delete_picked`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deleted {
    pub vertices: Vec<VertexId>,
    /// Picked edges and edges incident to deleted vertices.
    pub edges: Vec<EdgeId>,
}

impl Deleted {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

/// Pointer-driven editing of a [`Graph`].
///
/// ```text
/// IDLE --press DrawEdge on vertex--> DRAWING_EDGE --release--> IDLE
/// IDLE --press Move on vertex------> MOVING_VERTEX --release--> IDLE
/// ```
///
/// While disabled only [`Gesture::Select`] does anything.
#[derive(Debug, Clone)]
pub struct ConstructionMachine {
    state: EditState,
    enabled: bool,
    settings: SettingsConstruction,
}

impl Default for ConstructionMachine {
    fn default() -> Self {
        Self::new(SettingsConstruction::default())
    }
}

impl ConstructionMachine {
    pub fn new(settings: SettingsConstruction) -> Self {
        Self {
            state: EditState::Idle,
            enabled: true,
            settings,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables editing. Disabling abandons any gesture in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
        }
        self.enabled = enabled;
    }

    pub fn settings(&self) -> &SettingsConstruction {
        &self.settings
    }

    /// Transient edge feedback, present only while an edge is dragged.
    pub fn preview(&self) -> Option<&EdgePreview> {
        match &self.state {
            EditState::DrawingEdge(pending) => Some(&pending.preview),
            _ => None,
        }
    }

    /// Drops any gesture in progress and returns to idle.
    pub fn cancel(&mut self) {
        if self.state != EditState::Idle {
            debug!("construction gesture abandoned");
        }
        self.state = EditState::Idle;
    }

    /// Feeds one pointer event.
    ///
    /// # Errors
    ///
    /// Only model invariant violations are returned, e.g. the start vertex of a
    /// pending edge vanished behind the machine's back. A self-loop refused by the
    /// graph's policy cancels the edge instead.
    pub fn handle(
        &mut self,
        g: &mut Graph,
        layout: &SettingsLayout,
        event: PointerEvent,
    ) -> Result<Outcome, GraphError> {
        match event {
            PointerEvent::Press { pos, gesture } => self.press(g, layout, pos, gesture),
            PointerEvent::Drag { pos } => self.drag(g, pos),
            PointerEvent::Release { pos } => self.release(g, layout, pos),
        }
    }

    /// Removes every picked vertex with its incident edges, then every picked edge
    /// that is left. A pending gesture is abandoned first.
    ///
    /// # Errors
    ///
    /// Propagates graph errors, which indicate a broken model.
    pub fn delete_picked(&mut self, g: &mut Graph) -> Result<Deleted, GraphError> {
        self.cancel();
        if !self.enabled {
            debug!("delete ignored: editing is disabled");
            return Ok(Deleted::default());
        }

        let mut deleted = Deleted::default();
        for v in g.picked_vertices() {
            let (_, edges) = g.remove_vertex(v)?;
            deleted.vertices.push(v);
            deleted.edges.extend(edges.iter().map(|e| e.id()));
        }
        for e in g.picked_edges() {
            g.remove_edge(e)?;
            deleted.edges.push(e);
        }

        Ok(deleted)
    }

    fn press(
        &mut self,
        g: &mut Graph,
        layout: &SettingsLayout,
        pos: Pos2,
        gesture: Gesture,
    ) -> Result<Outcome, GraphError> {
        // a press without the matching release abandons the old gesture
        self.cancel();

        let hit = g.vertex_at(pos, layout.vertex_radius);

        if gesture == Gesture::Select {
            let element = match hit {
                Some(v) => ElementRef::Vertex(v),
                None => match g.edge_at(pos, layout.vertex_radius, self.settings.edge_hit_tolerance) {
                    Some(e) => ElementRef::Edge(e),
                    None => return Ok(Outcome::Nothing),
                },
            };
            let picked = g.toggle_pick(element)?;
            return Ok(Outcome::Toggled { element, picked });
        }

        if !self.enabled {
            return Ok(Outcome::Rejected);
        }

        match (gesture, hit) {
            (Gesture::Place, None) => Ok(Outcome::VertexCreated(g.add_vertex(pos))),
            (Gesture::DrawEdge { directed }, Some(start)) => {
                let from = g
                    .vertex(start)
                    .ok_or(GraphError::UnknownVertex(start))?
                    .location();
                self.state = EditState::DrawingEdge(PendingEdge {
                    start,
                    directed,
                    press: pos,
                    preview: EdgePreview::new(from, pos, directed),
                });
                Ok(Outcome::EdgeStarted { start, directed })
            }
            (Gesture::Move, Some(vertex)) => {
                let location = g
                    .vertex(vertex)
                    .ok_or(GraphError::UnknownVertex(vertex))?
                    .location();
                self.state = EditState::MovingVertex {
                    vertex,
                    offset: location - pos,
                };
                Ok(Outcome::Nothing)
            }
            _ => Ok(Outcome::Nothing),
        }
    }

    fn drag(&mut self, g: &mut Graph, pos: Pos2) -> Result<Outcome, GraphError> {
        match &mut self.state {
            EditState::Idle => Ok(Outcome::Nothing),
            EditState::DrawingEdge(pending) => {
                let from = g
                    .vertex(pending.start)
                    .ok_or(GraphError::UnknownVertex(pending.start))?
                    .location();
                pending.preview = EdgePreview::new(from, pos, pending.directed);
                Ok(Outcome::PreviewUpdated)
            }
            EditState::MovingVertex { vertex, offset } => {
                g.set_location(*vertex, pos + *offset)?;
                Ok(Outcome::VertexMoved(*vertex))
            }
        }
    }

    fn release(
        &mut self,
        g: &mut Graph,
        layout: &SettingsLayout,
        pos: Pos2,
    ) -> Result<Outcome, GraphError> {
        match std::mem::take(&mut self.state) {
            EditState::Idle => Ok(Outcome::Nothing),
            EditState::MovingVertex { vertex, .. } => Ok(Outcome::MoveFinished(vertex)),
            EditState::DrawingEdge(pending) => {
                if pos == pending.press {
                    debug!("edge from {} cancelled: pointer did not move", pending.start);
                    return Ok(Outcome::EdgeCancelled);
                }
                let Some(end) = g.vertex_at(pos, layout.vertex_radius) else {
                    debug!("edge from {} cancelled: released over empty canvas", pending.start);
                    return Ok(Outcome::EdgeCancelled);
                };

                match g.add_edge(pending.start, end, pending.directed) {
                    Ok(id) => Ok(Outcome::EdgeCreated(id)),
                    Err(GraphError::SelfLoop(v)) => {
                        debug!("edge cancelled: self-loops on {v} are not allowed");
                        Ok(Outcome::EdgeCancelled)
                    }
                    Err(err) => Err(err),
                }
            }
        }
    }
}
