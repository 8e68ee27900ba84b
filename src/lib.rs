mod bounds;
mod construction;
mod elements;
mod errors;
mod graph;
mod playback;
mod presenter;
mod preview;
mod requirements;
mod scene;
mod settings;

pub mod style;

pub use self::bounds::{clamp_rect, correct_graph, correct_location, graph_rect, Correction};
pub use self::construction::{
    ConstructionMachine, Deleted, EditState, Gesture, Outcome, PendingEdge, PointerEvent,
};
pub use self::elements::{
    Edge, EdgeId, ElementRef, ElementState, IdAllocator, Vertex, VertexId, DEFAULT_CAPACITY,
    DEFAULT_WEIGHT,
};
pub use self::errors::{GraphError, RequirementError};
pub use self::graph::{Graph, GraphSnapshot};
pub use self::playback::{Playback, StateEvent};
pub use self::presenter::{Displayed, Mode, Presenter};
pub use self::preview::EdgePreview;
pub use self::requirements::{
    Requirement, RequirementField, RequirementForm, RequirementKind, NONE_OPTION,
};
pub use self::scene::{Renderer, Scene, SceneEdge, SceneVertex};
pub use self::settings::{
    Settings, SettingsConstruction, SettingsLayout, SettingsPlayback, SettingsStyle,
};

#[cfg(feature = "events")]
pub mod events;
