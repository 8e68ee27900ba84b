use egui::Vec2;
use instant::Instant;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::bounds::{correct_graph, Correction};
use crate::construction::{ConstructionMachine, Deleted, EditState, Outcome, PointerEvent};
use crate::scene::{Renderer, Scene};
use crate::{Graph, GraphError, Playback, Settings, StateEvent};

#[cfg(feature = "events")]
use crate::events::{
    Event, EventSink, PayloadDelete, PayloadEdgeCreate, PayloadModeChange, PayloadPick,
    PayloadPlaybackStep, PayloadResultInstall, PayloadVertexCreate, PayloadVertexMove,
    PayloadViewportResize,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// The construction graph is shown and can be edited.
    #[default]
    Construction,
    /// The result graph is shown read-only, for algorithm playback.
    Visualization,
}

/// Which slot the displayed graph comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displayed {
    Construction,
    Result,
}

/// Result slot. `Aliased` means there is no independent result and the construction
/// graph stands in for it.
#[derive(Debug, Clone)]
enum ResultSlot {
    Aliased,
    Independent(Graph),
}

fn slot<'a>(construction: &'a Graph, result: &'a ResultSlot, which: Displayed) -> &'a Graph {
    match (which, result) {
        (Displayed::Result, ResultSlot::Independent(g)) => g,
        _ => construction,
    }
}

fn slot_mut<'a>(
    construction: &'a mut Graph,
    result: &'a mut ResultSlot,
    which: Displayed,
) -> &'a mut Graph {
    match (which, result) {
        (Displayed::Result, ResultSlot::Independent(g)) => g,
        _ => construction,
    }
}

/// Owns the construction graph and the result graph and decides which one is shown.
///
/// Accessors handing out an owned graph return a deep copy, and the only borrow
/// handed out ([`Presenter::displayed_graph`]) is read-only; the two slots are never
/// shared with each other. After each operation the displayed graph
/// is bounds-corrected against the last known viewport and the [`Scene`] is rebuilt.
pub struct Presenter {
    construction: Graph,
    result: ResultSlot,
    displayed: Displayed,
    mode: Mode,

    viewport: Option<Vec2>,
    scene: Scene,
    editor: ConstructionMachine,
    playback: Option<Playback>,

    settings: Settings,

    #[cfg(feature = "events")]
    events_sink: Option<Box<dyn EventSink>>,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Presenter {
    pub fn new(settings: Settings) -> Self {
        let construction = Graph::new().with_self_loops(settings.construction.allow_self_loops);
        let editor = ConstructionMachine::new(settings.construction.clone());
        let scene = Scene::build(&construction, &settings.style);

        Self {
            construction,
            result: ResultSlot::Aliased,
            displayed: Displayed::Construction,
            mode: Mode::Construction,
            viewport: None,
            scene,
            editor,
            playback: None,
            settings,

            #[cfg(feature = "events")]
            events_sink: None,
        }
    }

    #[cfg(feature = "events")]
    /// Supply a sink that will receive controller events.
    /// Works with `crossbeam::channel::Sender<Event>`, closures wrapped in
    /// [`crate::events::FnSink`], or custom implementations.
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events_sink = Some(Box::new(sink));
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn displayed(&self) -> Displayed {
        self.displayed
    }

    pub fn viewport(&self) -> Option<Vec2> {
        self.viewport
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn edit_state(&self) -> &EditState {
        self.editor.state()
    }

    pub fn editing_enabled(&self) -> bool {
        self.editor.enabled()
    }

    pub fn playback(&self) -> Option<&Playback> {
        self.playback.as_ref()
    }

    /// Deep copy of the construction graph.
    pub fn graph(&self) -> Graph {
        self.construction.copy()
    }

    /// Deep copy of the installed result, `None` while the result slot is aliased to
    /// the construction graph.
    pub fn result_graph(&self) -> Option<Graph> {
        match &self.result {
            ResultSlot::Aliased => None,
            ResultSlot::Independent(g) => Some(g.copy()),
        }
    }

    pub fn has_result(&self) -> bool {
        matches!(self.result, ResultSlot::Independent(_))
    }

    /// Graph currently on screen, read-only.
    pub fn displayed_graph(&self) -> &Graph {
        slot(&self.construction, &self.result, self.displayed)
    }

    /// Changes the self-loop policy of the construction graph and of future edits.
    pub fn set_allow_self_loops(&mut self, allow: bool) {
        self.settings.construction.allow_self_loops = allow;
        self.construction.set_allow_self_loops(allow);
    }

    /// Displays the construction graph.
    pub fn show_construction(&mut self) {
        self.displayed = Displayed::Construction;
        self.sync_editor();
        self.refresh();
    }

    /// Deep-copies `g` into the result slot and displays it. The construction graph
    /// is not touched. Any running playback is dropped.
    pub fn install_result(&mut self, g: &Graph) {
        self.result = ResultSlot::Independent(g.copy());
        self.playback = None;
        self.displayed = Displayed::Result;
        self.sync_editor();
        self.refresh();

        info!(
            "result installed: {} vertices, {} edges",
            g.vertex_count(),
            g.edge_count()
        );
        #[cfg(feature = "events")]
        self.publish_event(Event::ResultInstall(PayloadResultInstall {
            vertices: g.vertex_count(),
            edges: g.edge_count(),
        }));
    }

    /// Drops the independent result; the result slot aliases the construction graph
    /// again.
    pub fn reset_result(&mut self) {
        self.result = ResultSlot::Aliased;
        self.playback = None;
        self.sync_editor();
        self.sync_scene();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Construction => {
                self.reset_result();
                self.show_construction();
            }
            Mode::Visualization => {
                self.displayed = Displayed::Result;
                self.sync_editor();
                self.refresh();
            }
        }

        info!("mode switched to {mode:?}");
        #[cfg(feature = "events")]
        self.publish_event(Event::ModeChange(PayloadModeChange { mode }));
    }

    /// Deep-copies `g` into the construction slot and displays it. Switches to
    /// construction mode first if needed.
    ///
    /// Id counters never move backwards here and the self-loop policy comes from the
    /// settings, not from `g`.
    pub fn replace_construction(&mut self, g: &Graph) {
        if self.mode != Mode::Construction {
            self.set_mode(Mode::Construction);
        }
        self.editor.cancel();
        let issued = self.construction.ids().clone();
        self.construction = g.copy();
        self.construction.reserve_ids(&issued);
        self.construction
            .set_allow_self_loops(self.settings.construction.allow_self_loops);
        self.reset_result();
        self.show_construction();

        info!(
            "construction graph replaced: {} vertices, {} edges",
            g.vertex_count(),
            g.edge_count()
        );
    }

    /// Starts over with an empty construction graph and rewound id counters.
    pub fn new_document(&mut self) {
        if self.mode != Mode::Construction {
            self.set_mode(Mode::Construction);
        }
        self.editor.cancel();
        self.construction.clear();
        self.construction
            .set_allow_self_loops(self.settings.construction.allow_self_loops);
        self.reset_result();
        self.show_construction();

        info!("new document");
    }

    /// Stores the new viewport size and corrects the displayed graph, then the other
    /// one if it is a different graph.
    pub fn on_viewport_resize(&mut self, size: Vec2) {
        self.viewport = Some(size);

        self.correct(self.displayed);
        if self.has_result() {
            let other = match self.displayed {
                Displayed::Construction => Displayed::Result,
                Displayed::Result => Displayed::Construction,
            };
            self.correct(other);
        }
        self.sync_scene();

        #[cfg(feature = "events")]
        self.publish_event(Event::ViewportResize(PayloadViewportResize {
            size: size.into(),
        }));
    }

    /// Feeds a pointer event to the construction state machine acting on the
    /// displayed graph.
    ///
    /// # Errors
    ///
    /// Only model invariant violations are returned, see [`ConstructionMachine::handle`].
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Outcome, GraphError> {
        let g = slot_mut(&mut self.construction, &mut self.result, self.displayed);
        let outcome = self.editor.handle(g, &self.settings.layout, event)?;

        match outcome {
            Outcome::Nothing | Outcome::Rejected => return Ok(outcome),
            Outcome::VertexCreated(_) | Outcome::MoveFinished(_) => self.refresh(),
            _ => self.sync_scene(),
        }

        #[cfg(feature = "events")]
        self.publish_outcome(outcome);

        Ok(outcome)
    }

    /// Deletes every picked element of the displayed graph.
    ///
    /// # Errors
    ///
    /// Propagates graph errors, which indicate a broken model.
    pub fn delete_picked(&mut self) -> Result<Deleted, GraphError> {
        let g = slot_mut(&mut self.construction, &mut self.result, self.displayed);
        let deleted = self.editor.delete_picked(g)?;
        if deleted.is_empty() {
            return Ok(deleted);
        }
        self.sync_scene();

        #[cfg(feature = "events")]
        self.publish_event(Event::Delete(PayloadDelete {
            vertices: deleted.vertices.clone(),
            edges: deleted.edges.clone(),
        }));

        Ok(deleted)
    }

    /// Resets every vertex of the construction graph to unvisited.
    pub fn reset_vertex_states(&mut self) {
        self.construction.reset_states();
        self.sync_scene();
    }

    /// Prepares playback of `events` over the result graph. Without an installed
    /// result a copy of the construction graph is installed first.
    pub fn start_playback(&mut self, events: Vec<StateEvent>) {
        if !self.has_result() {
            let g = self.construction.copy();
            self.install_result(&g);
        }
        let base = slot(&self.construction, &self.result, Displayed::Result).copy();
        self.playback = Some(Playback::new(base, events, &self.settings.playback));
    }

    /// # Errors
    ///
    /// See [`Playback::step_forward`].
    pub fn step_forward(&mut self) -> Result<bool, GraphError> {
        self.with_playback(|p, g| p.step_forward(g))
    }

    /// # Errors
    ///
    /// See [`Playback::step_back`].
    pub fn step_back(&mut self) -> Result<bool, GraphError> {
        self.with_playback(|p, g| p.step_back(g))
    }

    /// # Errors
    ///
    /// See [`Playback::seek`].
    pub fn seek(&mut self, target: usize) -> Result<bool, GraphError> {
        self.with_playback(|p, g| p.seek(g, target).map(|()| true))
    }

    /// # Errors
    ///
    /// See [`Playback::rewind`].
    pub fn rewind(&mut self) -> Result<bool, GraphError> {
        self.with_playback(|p, g| p.rewind(g).map(|()| true))
    }

    pub fn play(&mut self, now: Instant) {
        if let Some(p) = self.playback.as_mut() {
            p.play(now);
        }
    }

    pub fn pause(&mut self) {
        if let Some(p) = self.playback.as_mut() {
            p.pause();
        }
    }

    /// Advances autoplay. Returns whether any step was applied.
    ///
    /// # Errors
    ///
    /// See [`Playback::tick`].
    pub fn tick(&mut self, now: Instant) -> Result<bool, GraphError> {
        self.with_playback(|p, g| p.tick(g, now).map(|steps| steps > 0))
    }

    /// Hands the scene and the current edge preview to `renderer`.
    pub fn render(&self, renderer: &mut impl Renderer) {
        for e in self.scene.edges() {
            renderer.edge(e);
        }
        for v in self.scene.vertices() {
            renderer.vertex(v, self.settings.layout.vertex_radius);
        }
        if let Some(preview) = self.editor.preview() {
            renderer.preview(preview);
        }
    }

    /// Runs `f` on the playback and the result graph, then re-syncs the scene when
    /// `f` reports a change.
    fn with_playback<F>(&mut self, f: F) -> Result<bool, GraphError>
    where
        F: FnOnce(&mut Playback, &mut Graph) -> Result<bool, GraphError>,
    {
        let (Some(playback), ResultSlot::Independent(g)) = (self.playback.as_mut(), &mut self.result)
        else {
            debug!("playback request ignored: nothing to play");
            return Ok(false);
        };

        let changed = f(playback, g)?;
        if changed {
            self.sync_scene();

            #[cfg(feature = "events")]
            {
                if let Some(p) = &self.playback {
                    self.publish_event(Event::PlaybackStep(PayloadPlaybackStep {
                        cursor: p.cursor(),
                        len: p.len(),
                    }));
                }
            }
        }
        Ok(changed)
    }

    /// Editing is possible only in construction mode while the construction graph
    /// is on screen.
    fn sync_editor(&mut self) {
        let shows_construction = self.displayed == Displayed::Construction || !self.has_result();
        self.editor
            .set_enabled(self.mode == Mode::Construction && shows_construction);
    }

    fn correct(&mut self, which: Displayed) {
        let g = slot_mut(&mut self.construction, &mut self.result, which);
        if let Correction::Applied { moved } = correct_graph(g, self.viewport, &self.settings.layout)
        {
            if moved > 0 {
                debug!("bounds correction moved {moved} vertices of the {which:?} graph");
            }
        }
    }

    fn refresh(&mut self) {
        self.correct(self.displayed);
        self.sync_scene();
    }

    fn sync_scene(&mut self) {
        let scene = Scene::build(self.displayed_graph(), &self.settings.style);
        self.scene = scene;
    }

    #[cfg(feature = "events")]
    fn publish_outcome(&self, outcome: Outcome) {
        let g = self.displayed_graph();
        let event = match outcome {
            Outcome::VertexCreated(id) => g.vertex(id).map(|v| {
                Event::VertexCreate(PayloadVertexCreate {
                    id,
                    pos: v.location().into(),
                })
            }),
            Outcome::VertexMoved(id) => g.vertex(id).map(|v| {
                Event::VertexMove(PayloadVertexMove {
                    id,
                    new_pos: v.location().into(),
                })
            }),
            Outcome::EdgeCreated(id) => g.edge(id).map(|e| {
                Event::EdgeCreate(PayloadEdgeCreate {
                    id,
                    start: e.start(),
                    end: e.end(),
                    directed: e.directed(),
                })
            }),
            Outcome::Toggled { element, picked } => {
                Some(Event::Pick(PayloadPick { element, picked }))
            }
            _ => None,
        };

        if let Some(event) = event {
            self.publish_event(event);
        }
    }

    #[cfg(feature = "events")]
    fn publish_event(&self, event: Event) {
        if let Some(sink) = &self.events_sink {
            sink.send(event);
        }
    }
}
