use egui::Pos2;

use crate::style::{edge_visuals, vertex_visuals, Visuals};
use crate::{EdgeId, EdgePreview, ElementState, Graph, SettingsStyle, VertexId};

#[derive(Debug, Clone, PartialEq)]
pub struct SceneVertex {
    pub id: VertexId,
    pub location: Pos2,
    pub state: ElementState,
    pub picked: bool,
    pub visuals: Visuals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    pub id: EdgeId,
    pub start: Pos2,
    pub end: Pos2,
    pub directed: bool,
    pub is_loop: bool,
    pub state: ElementState,
    pub picked: bool,
    pub visuals: Visuals,
}

/// Render layer: what the renderer paints, in drawing order. It is rebuilt from the
/// displayed graph and never written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    vertices: Vec<SceneVertex>,
    edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn build(g: &Graph, style: &SettingsStyle) -> Self {
        let vertices = g
            .vertices()
            .map(|v| SceneVertex {
                id: v.id(),
                location: v.location(),
                state: v.state(),
                picked: v.picked(),
                visuals: vertex_visuals(v, style),
            })
            .collect();

        let edges = g
            .edges()
            .filter_map(|e| {
                let start = g.vertex(e.start())?.location();
                let end = g.vertex(e.end())?.location();
                Some(SceneEdge {
                    id: e.id(),
                    start,
                    end,
                    directed: e.directed(),
                    is_loop: e.is_loop(),
                    state: e.state(),
                    picked: e.picked(),
                    visuals: edge_visuals(e, style),
                })
            })
            .collect();

        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[SceneVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> Option<&SceneVertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&SceneEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Paints a [`Scene`]. Edges are handed over first, then vertices, then the edge
/// preview if an edge is being dragged.
pub trait Renderer {
    fn edge(&mut self, edge: &SceneEdge);
    fn vertex(&mut self, vertex: &SceneVertex, radius: f32);
    fn preview(&mut self, preview: &EdgePreview);
}
