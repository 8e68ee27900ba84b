use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::ElementState;

/// Geometry used by bounds correction and vertex hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsLayout {
    /// Radius of a drawn vertex.
    pub vertex_radius: f32,

    /// Free space kept between the outermost vertex and the viewport border.
    pub padding: f32,
}

impl Default for SettingsLayout {
    fn default() -> Self {
        Self {
            vertex_radius: 20.,
            padding: 10.,
        }
    }
}

impl SettingsLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertex_radius(mut self, radius: f32) -> Self {
        self.vertex_radius = radius;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Distance between a vertex center and the viewport border after correction.
    pub fn inset(&self) -> f32 {
        self.padding + self.vertex_radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsConstruction {
    /// Whether an edge may start and end at the same vertex.
    pub allow_self_loops: bool,

    /// Max distance from an edge for a select gesture to pick it.
    pub edge_hit_tolerance: f32,
}

impl Default for SettingsConstruction {
    fn default() -> Self {
        Self {
            allow_self_loops: false,
            edge_hit_tolerance: 5.,
        }
    }
}

impl SettingsConstruction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }

    pub fn with_edge_hit_tolerance(mut self, tolerance: f32) -> Self {
        self.edge_hit_tolerance = tolerance;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsStyle {
    pub unvisited: Color32,
    pub active: Color32,
    pub visited: Color32,
    pub finished_relevant: Color32,
    pub finished_not_relevant: Color32,

    /// Fill of picked vertices, overrides any other colour.
    pub picked: Color32,

    /// Quantities shown in the default edge label.
    pub edge_label_weight: bool,
    pub edge_label_min_capacity: bool,
    pub edge_label_max_capacity: bool,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            unvisited: Color32::from_rgb(224, 255, 255),
            active: Color32::from_rgb(255, 200, 120),
            visited: Color32::from_rgb(0xFF, 0x44, 0x44),
            finished_relevant: Color32::from_rgb(144, 238, 144),
            finished_not_relevant: Color32::from_rgb(211, 211, 211),
            picked: Color32::YELLOW,
            edge_label_weight: true,
            edge_label_min_capacity: false,
            edge_label_max_capacity: false,
        }
    }
}

impl SettingsStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state_color(mut self, state: ElementState, color: Color32) -> Self {
        *self.state_color_mut(state) = color;
        self
    }

    pub fn with_picked_color(mut self, color: Color32) -> Self {
        self.picked = color;
        self
    }

    /// Selects which quantities make up the default edge label.
    pub fn with_edge_label(mut self, weight: bool, min_capacity: bool, max_capacity: bool) -> Self {
        self.edge_label_weight = weight;
        self.edge_label_min_capacity = min_capacity;
        self.edge_label_max_capacity = max_capacity;
        self
    }

    pub fn state_color(&self, state: ElementState) -> Color32 {
        match state {
            ElementState::Unvisited => self.unvisited,
            ElementState::Active => self.active,
            ElementState::Visited => self.visited,
            ElementState::FinishedAndRelevant => self.finished_relevant,
            ElementState::FinishedAndNotRelevant => self.finished_not_relevant,
        }
    }

    fn state_color_mut(&mut self, state: ElementState) -> &mut Color32 {
        match state {
            ElementState::Unvisited => &mut self.unvisited,
            ElementState::Active => &mut self.active,
            ElementState::Visited => &mut self.visited,
            ElementState::FinishedAndRelevant => &mut self.finished_relevant,
            ElementState::FinishedAndNotRelevant => &mut self.finished_not_relevant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsPlayback {
    /// Time between two steps while autoplay is running.
    pub step_interval_ms: u64,
}

impl Default for SettingsPlayback {
    fn default() -> Self {
        Self {
            step_interval_ms: 1000,
        }
    }
}

impl SettingsPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_interval_ms(mut self, ms: u64) -> Self {
        self.step_interval_ms = ms;
        self
    }
}

/// All settings the presentation controller needs, grouped for persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub layout: SettingsLayout,
    pub construction: SettingsConstruction,
    pub style: SettingsStyle,
    pub playback: SettingsPlayback,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: SettingsLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_construction(mut self, construction: SettingsConstruction) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_style(mut self, style: SettingsStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_playback(mut self, playback: SettingsPlayback) -> Self {
        self.playback = playback;
        self
    }
}
