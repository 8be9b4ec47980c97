use burnout_common::{Block, GridExtent, GridRect};
use burnout_input::{InputDispatcher, InputSource, KeyEvent, KeyHandler, MoveOutcome, RunSummary};
use burnout_kernel::{BoundsPolicy, EntityState, MoveEvent, ObstacleSet, ViewportTracker};
use burnout_render::{Renderer, SceneLayout};

use crate::config::{AvatarConfig, ControlsConfig, GameConfig, MapConfig};
use crate::error::SetupError;

/// Entry point for building a game.
///
/// ```text
/// define_map -> define_block* -> define_avatar -> [render_map] -> define_controls
/// ```
pub struct GameController;

impl GameController {
    /// Validate the map settings and open the block registration stage.
    pub fn define_map(map: MapConfig) -> Result<Setup<Blocks>, SetupError> {
        if map.block_size <= 0 {
            return Err(SetupError::NonPositiveBlockSize(map.block_size));
        }
        check_extent("map", map.map)?;
        check_extent("view", map.view)?;
        tracing::info!(
            block_size = map.block_size,
            rows = map.map.rows,
            cols = map.map.cols,
            bounds = ?map.bounds,
            "map defined"
        );
        Ok(Setup {
            map,
            stage: Blocks { blocks: Vec::new() },
        })
    }

    /// Run every stage from a loaded layout, mounting the scene on `renderer`.
    pub fn from_config<R: Renderer>(
        config: GameConfig,
        mut renderer: R,
    ) -> Result<Game<R>, SetupError> {
        let mut setup = Self::define_map(config.map)?;
        for block in config.blocks {
            setup.define_block(block)?;
        }
        let setup = setup.define_avatar(config.avatar)?;
        setup.render_map(&mut renderer);
        Ok(setup.define_controls(config.controls, renderer))
    }
}

fn check_extent(what: &'static str, extent: GridExtent) -> Result<(), SetupError> {
    if extent.is_empty() {
        return Err(SetupError::EmptyExtent {
            what,
            rows: extent.rows,
            cols: extent.cols,
        });
    }
    Ok(())
}

fn check_unit(what: &'static str, rect: GridRect) -> Result<(), SetupError> {
    if !rect.is_unit() {
        return Err(SetupError::NotUnitCell { what, rect });
    }
    Ok(())
}

/// A setup stage. Which operations exist depends on `S`.
pub struct Setup<S> {
    map: MapConfig,
    stage: S,
}

/// Blocks are still being registered.
pub struct Blocks {
    blocks: Vec<Block>,
}

/// The avatar is placed; the obstacle set is frozen.
pub struct AvatarPlaced {
    blocks: Vec<Block>,
    obstacles: ObstacleSet,
    state: EntityState,
}

impl<S> Setup<S> {
    pub fn map(&self) -> &MapConfig {
        &self.map
    }
}

impl Setup<Blocks> {
    /// Register a block. Collidable blocks become obstacles.
    pub fn define_block(&mut self, block: Block) -> Result<&mut Self, SetupError> {
        check_unit("block", block.position)?;
        tracing::debug!(
            position = %block.position,
            collidable = block.collidable,
            "block registered"
        );
        self.stage.blocks.push(block);
        Ok(self)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.stage.blocks
    }

    /// Place the avatar and freeze the obstacle set.
    ///
    /// A map that rejects out-of-bounds moves must also start the avatar on
    /// the map, otherwise no move could ever be accepted.
    pub fn define_avatar(self, avatar: AvatarConfig) -> Result<Setup<AvatarPlaced>, SetupError> {
        check_unit("avatar", avatar.position)?;
        if self.map.bounds == BoundsPolicy::Reject && !self.map.map.contains(&avatar.position) {
            return Err(SetupError::AvatarOffMap {
                rect: avatar.position,
            });
        }
        let blocks = self.stage.blocks;
        let obstacles: ObstacleSet = blocks
            .iter()
            .filter(|b| b.collidable)
            .map(|b| b.position)
            .collect();
        if obstacles.blocks(&avatar.position) {
            tracing::warn!(position = %avatar.position, "avatar starts on an obstacle");
        }
        tracing::info!(
            blocks = blocks.len(),
            obstacles = obstacles.len(),
            start = %avatar.position,
            "avatar defined"
        );
        Ok(Setup {
            map: self.map,
            stage: AvatarPlaced {
                blocks,
                obstacles,
                state: EntityState::new(avatar.position),
            },
        })
    }
}

impl Setup<AvatarPlaced> {
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.stage.obstacles
    }

    pub fn state(&self) -> &EntityState {
        &self.stage.state
    }

    /// The initial scene as a renderer sees it.
    pub fn scene(&self) -> SceneLayout {
        SceneLayout {
            block_size: self.map.block_size,
            map: self.map.map,
            view: self.map.view,
            blocks: self.stage.blocks.clone(),
            avatar: self.stage.state.position(),
            developer: self.map.developer,
        }
    }

    /// Mount the initial scene on `renderer`.
    pub fn render_map<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.mount(&self.scene());
    }

    /// Attach the input dispatcher. Without a keyboard map the game is inert:
    /// it holds its state but never handles input.
    pub fn define_controls<R: Renderer>(self, controls: ControlsConfig, renderer: R) -> Game<R> {
        let AvatarPlaced {
            obstacles, state, ..
        } = self.stage;
        match controls.keyboard {
            Some(keymap) => {
                let dispatcher = InputDispatcher::new(
                    keymap,
                    obstacles,
                    state,
                    ViewportTracker::new(self.map.block_size),
                    renderer,
                )
                .with_bounds(self.map.bounds, self.map.map);
                tracing::info!(?keymap, "keyboard controls attached");
                Game {
                    inner: GameInner::Controlled(dispatcher),
                }
            }
            None => {
                tracing::warn!("no keyboard controls configured; input is ignored");
                Game {
                    inner: GameInner::Inert {
                        obstacles,
                        state,
                        renderer,
                    },
                }
            }
        }
    }
}

/// A running game session.
pub struct Game<R> {
    inner: GameInner<R>,
}

enum GameInner<R> {
    Controlled(InputDispatcher<R>),
    Inert {
        obstacles: ObstacleSet,
        state: EntityState,
        renderer: R,
    },
}

impl<R: Renderer> Game<R> {
    /// True when a keyboard map was configured.
    pub fn is_controlled(&self) -> bool {
        matches!(self.inner, GameInner::Controlled(_))
    }

    pub fn state(&self) -> &EntityState {
        match &self.inner {
            GameInner::Controlled(d) => d.state(),
            GameInner::Inert { state, .. } => state,
        }
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        match &self.inner {
            GameInner::Controlled(d) => d.obstacles(),
            GameInner::Inert { obstacles, .. } => obstacles,
        }
    }

    pub fn renderer(&self) -> &R {
        match &self.inner {
            GameInner::Controlled(d) => d.renderer(),
            GameInner::Inert { renderer, .. } => renderer,
        }
    }

    /// Take the retained move history. An inert game never records moves.
    pub fn drain_history(&mut self) -> Vec<MoveEvent> {
        match &mut self.inner {
            GameInner::Controlled(d) => d.drain_history(),
            GameInner::Inert { state, .. } => state.drain_history(),
        }
    }

    pub fn into_renderer(self) -> R {
        match self.inner {
            GameInner::Controlled(d) => d.into_renderer(),
            GameInner::Inert { renderer, .. } => renderer,
        }
    }

    /// Handle one key-down event. An inert game ignores everything.
    pub fn handle_key(&mut self, event: KeyEvent) -> MoveOutcome {
        match &mut self.inner {
            GameInner::Controlled(d) => d.on_key_down(event),
            GameInner::Inert { .. } => MoveOutcome::Ignored,
        }
    }

    /// Feed `source` to the dispatcher. An inert game has no handler
    /// registered, so the source is left untouched.
    pub fn run<S: InputSource + ?Sized>(&mut self, source: &mut S) -> RunSummary {
        match &mut self.inner {
            GameInner::Controlled(d) => d.run(source),
            GameInner::Inert { .. } => RunSummary::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burnout_common::CameraOffset;
    use burnout_input::{KeyCode, KeyMap, ScriptedInput};
    use burnout_render::DebugTextRenderer;

    fn map_config() -> MapConfig {
        MapConfig {
            block_size: 10,
            map: GridExtent::new(30, 30),
            view: GridExtent::new(15, 15),
            bounds: BoundsPolicy::Unbounded,
            developer: false,
        }
    }

    fn game(start: (i32, i32), controls: ControlsConfig) -> Game<DebugTextRenderer> {
        let mut setup = GameController::define_map(map_config()).unwrap();
        setup
            .define_block(Block::obstacle(5, 5))
            .unwrap()
            .define_block(Block::decoration(3, 3))
            .unwrap();
        let setup = setup.define_avatar(AvatarConfig::at(start.0, start.1)).unwrap();
        let mut renderer = DebugTextRenderer::new();
        setup.render_map(&mut renderer);
        setup.define_controls(controls, renderer)
    }

    #[test]
    fn only_collidable_blocks_become_obstacles() {
        let g = game((0, 0), ControlsConfig::keyboard(KeyMap::arrows()));
        assert_eq!(g.obstacles().rects(), &[GridRect::unit(5, 5)]);
    }

    #[test]
    fn blocked_then_accepted_scenario() {
        let mut g = game((4, 5), ControlsConfig::keyboard(KeyMap::arrows()));
        let outcome = g.handle_key(KeyEvent::new(KeyCode::ARROW_DOWN));
        assert!(matches!(outcome, MoveOutcome::Blocked { .. }));
        assert_eq!(g.state().position(), GridRect::unit(4, 5));
        assert_eq!(g.state().camera_offset(), CameraOffset::ZERO);
        assert_eq!(g.renderer().updates(), 0);

        let mut g = game((3, 5), ControlsConfig::keyboard(KeyMap::arrows()));
        assert!(g.handle_key(KeyEvent::new(KeyCode::ARROW_DOWN)).is_moved());
        assert_eq!(g.state().position().row_start, 4);
        assert_eq!(g.state().camera_offset().y, -10);
        assert_eq!(g.renderer().updates(), 1);
        assert_eq!(g.renderer().offset(), CameraOffset::new(0, -10));
    }

    #[test]
    fn missing_keyboard_map_leaves_game_inert() {
        let mut g = game((3, 5), ControlsConfig::default());
        assert!(!g.is_controlled());
        assert_eq!(
            g.handle_key(KeyEvent::new(KeyCode::ARROW_DOWN)),
            MoveOutcome::Ignored
        );
        let mut input = ScriptedInput::new([KeyCode::ARROW_UP]);
        assert_eq!(g.run(&mut input), RunSummary::default());
        assert_eq!(input.len(), 1);
        assert_eq!(g.state().position(), GridRect::unit(3, 5));
        assert_eq!(g.renderer().updates(), 0);
    }

    #[test]
    fn render_map_mounts_initial_scene() {
        let g = game((1, 1), ControlsConfig::default());
        let frame = g.into_renderer().frame();
        let rows: Vec<&str> = frame.lines().skip(1).collect();
        assert_eq!(rows.len(), 15);
        assert_eq!(&rows[1][..2], ".@");
        assert_eq!(&rows[3][3..4], "+");
        assert_eq!(&rows[5][5..6], "#");
    }

    #[test]
    fn rejects_non_positive_block_size() {
        let mut cfg = map_config();
        cfg.block_size = 0;
        assert_eq!(
            GameController::define_map(cfg).err(),
            Some(SetupError::NonPositiveBlockSize(0))
        );
    }

    #[test]
    fn rejects_empty_view() {
        let mut cfg = map_config();
        cfg.view = GridExtent::new(0, 4);
        assert!(matches!(
            GameController::define_map(cfg),
            Err(SetupError::EmptyExtent { what: "view", .. })
        ));
    }

    #[test]
    fn rejects_multi_cell_block_and_avatar() {
        let mut setup = GameController::define_map(map_config()).unwrap();
        let wide = Block {
            position: GridRect::new(0, 0, 1, 2).unwrap(),
            collidable: true,
            class_name: None,
        };
        assert!(matches!(
            setup.define_block(wide),
            Err(SetupError::NotUnitCell { what: "block", .. })
        ));
        assert!(setup.blocks().is_empty());

        let tall = AvatarConfig {
            position: GridRect::new(0, 0, 2, 1).unwrap(),
            class_name: None,
        };
        assert!(matches!(
            setup.define_avatar(tall),
            Err(SetupError::NotUnitCell { what: "avatar", .. })
        ));
    }

    #[test]
    fn rejects_avatar_off_map_under_reject_bounds() {
        let reject = MapConfig {
            map: GridExtent::new(10, 10),
            bounds: BoundsPolicy::Reject,
            ..map_config()
        };
        for (row, col) in [(-5, -5), (10, 0), (0, 10)] {
            let setup = GameController::define_map(reject.clone()).unwrap();
            assert_eq!(
                setup.define_avatar(AvatarConfig::at(row, col)).err(),
                Some(SetupError::AvatarOffMap {
                    rect: GridRect::unit(row, col)
                })
            );
        }

        let setup = GameController::define_map(reject).unwrap();
        assert!(setup.define_avatar(AvatarConfig::at(9, 9)).is_ok());

        let unbounded = GameController::define_map(map_config()).unwrap();
        assert!(unbounded.define_avatar(AvatarConfig::at(-5, -5)).is_ok());
    }

    #[test]
    fn original_grid_lines_reach_the_last_row_under_reject() {
        let json = r#"{
            "blockSize": 10,
            "map": {"rows": 30, "cols": 30},
            "view": {"rows": 15, "cols": 15},
            "bounds": "reject",
            "blocks": [{
                "collision": true,
                "position": {"rowStart": 30, "columnStart": 29, "rowEnd": 31, "columnEnd": 30}
            }],
            "avatar": {
                "position": {"rowStart": 30, "columnStart": 30, "rowEnd": 31, "columnEnd": 31}
            },
            "controls": {"keyboard": {"up": 38, "down": 40, "left": 37, "right": 39}}
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        let mut g = GameController::from_config(config, DebugTextRenderer::new()).unwrap();
        assert_eq!(g.state().position(), GridRect::unit(29, 29));
        assert_eq!(g.obstacles().rects(), &[GridRect::unit(29, 28)]);

        assert!(matches!(
            g.handle_key(KeyEvent::new(KeyCode::ARROW_DOWN)),
            MoveOutcome::OutOfBounds { .. }
        ));
        assert!(matches!(
            g.handle_key(KeyEvent::new(KeyCode::ARROW_RIGHT)),
            MoveOutcome::OutOfBounds { .. }
        ));
        assert!(matches!(
            g.handle_key(KeyEvent::new(KeyCode::ARROW_LEFT)),
            MoveOutcome::Blocked { .. }
        ));
        assert!(g.handle_key(KeyEvent::new(KeyCode::ARROW_UP)).is_moved());
        assert_eq!(g.state().position(), GridRect::unit(28, 29));
    }

    #[test]
    fn avatar_at_last_representable_row_does_not_panic() {
        let mut setup = GameController::define_map(map_config()).unwrap();
        setup.define_block(Block::obstacle(0, 0)).unwrap();
        let setup = setup
            .define_avatar(AvatarConfig {
                position: GridRect::new(i32::MAX - 1, 0, i32::MAX, 1).unwrap(),
                class_name: None,
            })
            .unwrap();
        let mut g = setup.define_controls(
            ControlsConfig::keyboard(KeyMap::arrows()),
            DebugTextRenderer::new(),
        );
        assert_eq!(
            g.handle_key(KeyEvent::new(KeyCode::ARROW_DOWN)),
            MoveOutcome::Overflow {
                direction: burnout_common::Direction::Down
            }
        );
        assert_eq!(g.renderer().updates(), 0);
    }

    #[test]
    fn max_block_size_refuses_second_scroll() {
        let config = GameConfig {
            map: MapConfig {
                block_size: i32::MAX,
                ..map_config()
            },
            blocks: Vec::new(),
            avatar: AvatarConfig::at(5, 5),
            controls: ControlsConfig::keyboard(KeyMap::arrows()),
        };
        let mut g = GameController::from_config(config, DebugTextRenderer::new()).unwrap();
        let summary = g.run(&mut ScriptedInput::new([KeyCode::ARROW_UP, KeyCode::ARROW_UP]));
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.overflowed, 1);
        assert_eq!(g.state().camera_offset(), CameraOffset::new(0, i32::MAX));
        assert!(g.renderer().frame().starts_with("offset=(0, 2147483647)"));
    }

    #[test]
    fn game_drains_history() {
        let mut g = game((2, 2), ControlsConfig::keyboard(KeyMap::arrows()));
        g.handle_key(KeyEvent::new(KeyCode::ARROW_UP));
        g.handle_key(KeyEvent::new(KeyCode::ARROW_LEFT));
        assert_eq!(g.state().history().len(), 2);
        let events = g.drain_history();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].to, GridRect::unit(1, 1));
        assert!(g.state().history().is_empty());
        assert_eq!(g.state().position(), GridRect::unit(1, 1));
    }

    #[test]
    fn developer_flag_reaches_the_renderer() {
        let config = GameConfig {
            map: MapConfig {
                developer: true,
                ..map_config()
            },
            blocks: Vec::new(),
            avatar: AvatarConfig::at(0, 0),
            controls: ControlsConfig::default(),
        };
        let g = GameController::from_config(config, DebugTextRenderer::new()).unwrap();
        let frame = g.renderer().frame();
        let rows: Vec<&str> = frame.lines().skip(1).collect();
        assert_eq!(rows.len(), 17);
        assert_eq!(rows[0], format!("+{}+", "-".repeat(15)));
        assert!(rows[1].starts_with("|@"));
    }

    #[test]
    fn from_config_wires_every_stage() {
        let config = GameConfig {
            map: MapConfig {
                bounds: BoundsPolicy::Reject,
                ..map_config()
            },
            blocks: vec![Block::obstacle(0, 1)],
            avatar: AvatarConfig::at(0, 0),
            controls: ControlsConfig::keyboard(KeyMap::wasd()),
        };
        let mut g = GameController::from_config(config, DebugTextRenderer::new()).unwrap();
        assert!(g.is_controlled());

        let mut input = ScriptedInput::new([KeyCode::W, KeyCode::D, KeyCode::S, KeyCode::D]);
        let summary = g.run(&mut input);
        assert_eq!(summary.out_of_bounds, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.moved, 2);
        assert_eq!(g.state().position(), GridRect::unit(1, 1));
        assert_eq!(g.state().camera_offset(), CameraOffset::new(-10, -10));
        assert!(g.into_renderer().frame().contains("avatar=[1..2, 1..2]"));
    }

    #[test]
    fn setup_exposes_frozen_state() {
        let mut setup = GameController::define_map(map_config()).unwrap();
        setup.define_block(Block::obstacle(2, 2)).unwrap();
        let setup = setup.define_avatar(AvatarConfig::at(7, 7)).unwrap();
        assert_eq!(setup.obstacles().len(), 1);
        assert_eq!(setup.state().position(), GridRect::unit(7, 7));
        assert_eq!(setup.scene().blocks.len(), 1);
        assert_eq!(setup.map().block_size, 10);
    }
}
