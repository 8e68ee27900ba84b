use serde::{Deserialize, Serialize};

use crate::{EdgeId, ElementRef, Mode, VertexId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexCreate {
    pub id: VertexId,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexMove {
    pub id: VertexId,
    pub new_pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadEdgeCreate {
    pub id: EdgeId,
    pub start: VertexId,
    pub end: VertexId,
    pub directed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPick {
    pub element: ElementRef,
    pub picked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadDelete {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadModeChange {
    pub mode: Mode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadResultInstall {
    pub vertices: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadViewportResize {
    pub size: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPlaybackStep {
    pub cursor: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    VertexCreate(PayloadVertexCreate),
    VertexMove(PayloadVertexMove),
    EdgeCreate(PayloadEdgeCreate),
    Pick(PayloadPick),
    Delete(PayloadDelete),
    ModeChange(PayloadModeChange),
    ResultInstall(PayloadResultInstall),
    ViewportResize(PayloadViewportResize),
    PlaybackStep(PayloadPlaybackStep),
}
