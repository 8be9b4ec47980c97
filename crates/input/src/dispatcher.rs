use burnout_common::{Direction, GridExtent, GridRect};
use burnout_kernel::{BoundsPolicy, EntityState, MoveEvent, ObstacleSet, ViewportTracker, resolve};
use burnout_render::Renderer;

use crate::keymap::{KeyEvent, KeyMap};
use crate::source::InputSource;

/// Result of handling one key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The key code is not bound to any direction.
    Ignored,
    /// The candidate cell holds an obstacle.
    Blocked { direction: Direction, candidate: GridRect },
    /// The candidate cell is off the map and the bounds policy rejects it.
    OutOfBounds { direction: Direction, candidate: GridRect },
    /// The candidate cell or the scrolled offset does not fit in `i32`.
    Overflow { direction: Direction },
    /// The move was committed.
    Moved(MoveEvent),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Anything that consumes key-down events.
pub trait KeyHandler {
    fn on_key_down(&mut self, event: KeyEvent) -> MoveOutcome;
}

/// Counts of outcomes over a drained input source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub moved: usize,
    pub blocked: usize,
    pub out_of_bounds: usize,
    pub overflowed: usize,
    pub ignored: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::Ignored => self.ignored += 1,
            MoveOutcome::Blocked { .. } => self.blocked += 1,
            MoveOutcome::OutOfBounds { .. } => self.out_of_bounds += 1,
            MoveOutcome::Overflow { .. } => self.overflowed += 1,
            MoveOutcome::Moved(_) => self.moved += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.moved + self.blocked + self.out_of_bounds + self.overflowed + self.ignored
    }
}

/// Turns key-down events into avatar moves.
///
/// Owns the avatar state and the obstacle set exclusively once attached.
/// Every event is a single synchronous transition: match the key, resolve
/// the candidate, test it, then either leave everything untouched or commit
/// and notify the renderer.
#[derive(Debug)]
pub struct InputDispatcher<R> {
    keymap: KeyMap,
    obstacles: ObstacleSet,
    state: EntityState,
    viewport: ViewportTracker,
    bounds: BoundsPolicy,
    map: GridExtent,
    renderer: R,
}

impl<R: Renderer> InputDispatcher<R> {
    /// Attach a dispatcher to a fully built obstacle set and avatar state.
    /// Moves are unbounded until [`with_bounds`](Self::with_bounds) says otherwise.
    pub fn new(
        keymap: KeyMap,
        obstacles: ObstacleSet,
        state: EntityState,
        viewport: ViewportTracker,
        renderer: R,
    ) -> Self {
        let shadowed = keymap.shadowed();
        if !shadowed.is_empty() {
            tracing::warn!(
                ?shadowed,
                "duplicate key codes: these directions are unreachable"
            );
        }
        Self {
            keymap,
            obstacles,
            state,
            viewport,
            bounds: BoundsPolicy::Unbounded,
            map: GridExtent::new(0, 0),
            renderer,
        }
    }

    /// Check candidates against `map` under `policy`.
    pub fn with_bounds(mut self, policy: BoundsPolicy, map: GridExtent) -> Self {
        self.bounds = policy;
        self.map = map;
        self
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn state(&self) -> &EntityState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn block_size(&self) -> i32 {
        self.viewport.block_size()
    }

    /// Take the retained move history, leaving position and offset as they are.
    pub fn drain_history(&mut self) -> Vec<MoveEvent> {
        self.state.drain_history()
    }

    /// Give back the renderer, dropping the session state.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Move one cell in `direction` if nothing is in the way.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let Some(candidate) = resolve(direction, &self.state.position()) else {
            tracing::debug!(%direction, "move leaves the representable grid");
            return MoveOutcome::Overflow { direction };
        };

        if self.obstacles.blocks(&candidate) {
            tracing::debug!(%direction, %candidate, "move blocked");
            return MoveOutcome::Blocked {
                direction,
                candidate,
            };
        }
        if !self.bounds.admits(&self.map, &candidate) {
            tracing::debug!(%direction, %candidate, "move leaves the map");
            return MoveOutcome::OutOfBounds {
                direction,
                candidate,
            };
        }

        let Some(event) = self.state.commit(direction, candidate, &self.viewport) else {
            tracing::debug!(%direction, %candidate, "camera offset would overflow");
            return MoveOutcome::Overflow { direction };
        };
        self.renderer
            .set_entity_position(event.to, self.viewport.block_size());
        self.renderer.set_world_offset(event.offset);
        tracing::debug!(
            %direction,
            to = %event.to,
            offset_x = event.offset.x,
            offset_y = event.offset.y,
            "moved"
        );
        MoveOutcome::Moved(event)
    }

    /// Drain `source`, handling each event to completion before reading the next.
    pub fn run<S: InputSource + ?Sized>(&mut self, source: &mut S) -> RunSummary {
        let _span = tracing::info_span!("dispatch_run").entered();
        let mut summary = RunSummary::default();
        while let Some(event) = source.next_key_down() {
            let outcome = self.on_key_down(event);
            summary.record(&outcome);
        }
        tracing::info!(
            moved = summary.moved,
            blocked = summary.blocked,
            out_of_bounds = summary.out_of_bounds,
            overflowed = summary.overflowed,
            ignored = summary.ignored,
            "input drained"
        );
        summary
    }
}

impl<R: Renderer> KeyHandler for InputDispatcher<R> {
    fn on_key_down(&mut self, event: KeyEvent) -> MoveOutcome {
        match self.keymap.direction_for(event.code) {
            Some(direction) => self.step(direction),
            None => {
                tracing::trace!(code = %event.code, "unmapped key ignored");
                MoveOutcome::Ignored
            }
        }
    }
}
