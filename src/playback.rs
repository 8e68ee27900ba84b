use std::time::Duration;

use instant::Instant;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{ElementRef, ElementState, Graph, GraphError, SettingsPlayback};

/// One step of an algorithm run: an element enters `state`, optionally with an
/// annotation (a vertex's label addition or an edge's override label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEvent {
    pub element: ElementRef,
    pub state: ElementState,
    #[serde(default)]
    pub annotation: Option<String>,
}

impl StateEvent {
    pub fn new(element: impl Into<ElementRef>, state: ElementState) -> Self {
        Self {
            element: element.into(),
            state,
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// Replays an ordered list of [`StateEvent`]s over a graph, one at a time.
///
/// The cursor counts applied events. Going backwards starts over from the base graph
/// the playback was created with, keeping whatever vertex positions the displayed
/// graph has at that moment.
#[derive(Debug, Clone)]
pub struct Playback {
    base: Graph,
    events: Vec<StateEvent>,
    cursor: usize,

    playing: bool,
    interval: Duration,
    last_step: Option<Instant>,
}

impl Playback {
    pub fn new(base: Graph, events: Vec<StateEvent>, settings: &SettingsPlayback) -> Self {
        Self {
            base,
            events,
            cursor: 0,
            playing: false,
            interval: Duration::from_millis(settings.step_interval_ms),
            last_step: None,
        }
    }

    pub fn events(&self) -> &[StateEvent] {
        &self.events
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Applies the next event to `g`. Returns `false` when there is nothing left.
    ///
    /// # Errors
    ///
    /// Fails if the event names an element missing from `g`; the cursor stays put.
    pub fn step_forward(&mut self, g: &mut Graph) -> Result<bool, GraphError> {
        let Some(event) = self.events.get(self.cursor) else {
            return Ok(false);
        };
        g.apply(event)?;
        self.cursor += 1;
        trace!("playback step {}/{}: {:?}", self.cursor, self.events.len(), event);
        Ok(true)
    }

    /// Undoes the last applied event. Returns `false` at the beginning.
    ///
    /// # Errors
    ///
    /// See [`Playback::seek`].
    pub fn step_back(&mut self, g: &mut Graph) -> Result<bool, GraphError> {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.seek(g, self.cursor - 1)?;
        Ok(true)
    }

    /// Brings `g` to the state after `target` events, clamped to the event count.
    ///
    /// # Errors
    ///
    /// Fails if an event names an element missing from the graph. `g` and the cursor
    /// are left untouched in that case.
    pub fn seek(&mut self, g: &mut Graph, target: usize) -> Result<(), GraphError> {
        let target = target.min(self.events.len());

        let (mut scratch, from) = if target >= self.cursor {
            (g.copy(), self.cursor)
        } else {
            let mut fresh = self.base.copy();
            for v in fresh.vertices_mut() {
                if let Some(current) = g.vertex(v.id()) {
                    v.set_location(current.location());
                }
            }
            (fresh, 0)
        };

        for event in &self.events[from..target] {
            scratch.apply(event)?;
        }

        *g = scratch;
        self.cursor = target;
        trace!("playback seek to {}/{}", self.cursor, self.events.len());
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Playback::seek`].
    pub fn rewind(&mut self, g: &mut Graph) -> Result<(), GraphError> {
        self.pause();
        self.seek(g, 0)
    }

    /// Starts autoplay; the first step happens one interval after `now`.
    pub fn play(&mut self, now: Instant) {
        if self.is_finished() {
            return;
        }
        self.playing = true;
        self.last_step = Some(now);
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.last_step = None;
    }

    /// Advances autoplay to `now`, applying one event per elapsed interval. Returns
    /// the number of applied events. Autoplay stops at the end of the list.
    ///
    /// # Errors
    ///
    /// See [`Playback::step_forward`]. Autoplay is paused on error.
    pub fn tick(&mut self, g: &mut Graph, now: Instant) -> Result<usize, GraphError> {
        if !self.playing {
            return Ok(0);
        }
        let Some(mut last) = self.last_step else {
            self.last_step = Some(now);
            return Ok(0);
        };

        let mut steps = 0;
        while !self.is_finished() && now.duration_since(last) >= self.interval {
            if let Err(err) = self.step_forward(g) {
                self.pause();
                return Err(err);
            }
            last += self.interval;
            steps += 1;
        }

        self.last_step = Some(last);
        if self.is_finished() {
            self.pause();
        }
        Ok(steps)
    }
}
