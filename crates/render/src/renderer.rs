use burnout_common::{Block, CameraOffset, GridExtent, GridRect};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Pixel placement of a grid region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    /// Convert a grid region to pixels. Rows run down the y axis; values
    /// saturate at the `i32` range.
    pub fn from_rect(rect: GridRect, block_size: i32) -> Self {
        Self {
            x: rect.col_start.saturating_mul(block_size),
            y: rect.row_start.saturating_mul(block_size),
            width: rect.cols().saturating_mul(block_size),
            height: rect.rows().saturating_mul(block_size),
        }
    }
}

/// Everything a renderer needs to build the initial scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLayout {
    pub block_size: i32,
    pub map: GridExtent,
    pub view: GridExtent,
    pub blocks: Vec<Block>,
    pub avatar: GridRect,
    /// Outline the view window when drawing.
    pub developer: bool,
}

/// Renderer-agnostic interface. All visual backends implement this trait.
///
/// The movement core calls `set_entity_position` followed by
/// `set_world_offset` once per accepted move. Rejected and ignored input
/// never reaches the renderer.
pub trait Renderer {
    /// Build the initial scene. Called at most once, before any move.
    fn mount(&mut self, _scene: &SceneLayout) {}

    /// Place the avatar at `position`.
    fn set_entity_position(&mut self, position: GridRect, block_size: i32);

    /// Apply the accumulated camera offset to the world.
    fn set_world_offset(&mut self, offset: CameraOffset);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn mount(&mut self, scene: &SceneLayout) {
        (**self).mount(scene)
    }

    fn set_entity_position(&mut self, position: GridRect, block_size: i32) {
        (**self).set_entity_position(position, block_size)
    }

    fn set_world_offset(&mut self, offset: CameraOffset) {
        (**self).set_world_offset(offset)
    }
}

/// ASCII renderer for the CLI, logs and tests.
///
/// Draws the view window over the map: `@` avatar, `#` obstacle,
/// `+` decoration, `.` empty map cell, blank outside the map. A scene
/// mounted in developer mode gets a `+--+` / `|` border around the window
/// so cells past the map edge stay visible as blanks inside it.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    scene: Option<SceneLayout>,
    /// Leading corner -> collidable.
    cells: HashMap<(i32, i32), bool>,
    avatar: Option<GridRect>,
    placement: Option<Placement>,
    offset: CameraOffset,
    updates: usize,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avatar(&self) -> Option<GridRect> {
        self.avatar
    }

    /// Pixel placement from the last position update.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn offset(&self) -> CameraOffset {
        self.offset
    }

    /// Number of `set_entity_position` calls received.
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Render the visible window as text.
    pub fn frame(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "offset=({}, {})", self.offset.x, self.offset.y);
        if let Some(avatar) = self.avatar {
            let _ = write!(out, " avatar={avatar}");
        }
        out.push('\n');

        let Some(scene) = &self.scene else {
            return out;
        };
        let block_size = scene.block_size.max(1);
        let origin_row = (self.offset.y / block_size).saturating_neg();
        let origin_col = (self.offset.x / block_size).saturating_neg();
        let avatar = self.avatar.map(|a| a.leading_corner());
        let rule = scene.developer.then(|| {
            let width = usize::try_from(scene.view.cols).unwrap_or(0);
            format!("+{}+\n", "-".repeat(width))
        });

        if let Some(rule) = &rule {
            out.push_str(rule);
        }
        for row in origin_row..origin_row.saturating_add(scene.view.rows) {
            if scene.developer {
                out.push('|');
            }
            for col in origin_col..origin_col.saturating_add(scene.view.cols) {
                let ch = if avatar == Some((row, col)) {
                    '@'
                } else if let Some(&collidable) = self.cells.get(&(row, col)) {
                    if collidable { '#' } else { '+' }
                } else if scene.map.contains(&GridRect::unit(row, col)) {
                    '.'
                } else {
                    ' '
                };
                out.push(ch);
            }
            if scene.developer {
                out.push('|');
            }
            out.push('\n');
        }
        if let Some(rule) = &rule {
            out.push_str(rule);
        }
        out
    }
}

impl Renderer for DebugTextRenderer {
    fn mount(&mut self, scene: &SceneLayout) {
        self.cells.clear();
        for block in &scene.blocks {
            let collidable = self
                .cells
                .entry(block.position.leading_corner())
                .or_insert(false);
            *collidable |= block.collidable;
        }
        self.avatar = Some(scene.avatar);
        self.placement = Some(Placement::from_rect(scene.avatar, scene.block_size));
        self.scene = Some(scene.clone());
        tracing::debug!(
            blocks = scene.blocks.len(),
            rows = scene.map.rows,
            cols = scene.map.cols,
            developer = scene.developer,
            "scene mounted"
        );
    }

    fn set_entity_position(&mut self, position: GridRect, block_size: i32) {
        self.avatar = Some(position);
        self.placement = Some(Placement::from_rect(position, block_size));
        self.updates += 1;
    }

    fn set_world_offset(&mut self, offset: CameraOffset) {
        self.offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneLayout {
        SceneLayout {
            block_size: 10,
            map: GridExtent::new(4, 4),
            view: GridExtent::new(3, 3),
            blocks: vec![Block::obstacle(0, 2), Block::decoration(1, 0)],
            avatar: GridRect::unit(1, 1),
            developer: false,
        }
    }

    #[test]
    fn placement_scales_by_block_size() {
        let p = Placement::from_rect(GridRect::unit(2, 3), 10);
        assert_eq!(
            p,
            Placement {
                x: 30,
                y: 20,
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn unmounted_frame_is_header_only() {
        let r = DebugTextRenderer::new();
        assert_eq!(r.frame(), "offset=(0, 0)\n");
    }

    #[test]
    fn mounted_frame_draws_view_window() {
        let mut r = DebugTextRenderer::new();
        r.mount(&scene());
        let frame = r.frame();
        let rows: Vec<&str> = frame.lines().skip(1).collect();
        assert_eq!(rows, vec!["..#", "+@.", "..."]);
        assert_eq!(r.updates(), 0);
    }

    #[test]
    fn offset_scrolls_the_window() {
        let mut r = DebugTextRenderer::new();
        r.mount(&scene());
        // Avatar walked right twice: world scrolls left by two blocks.
        r.set_entity_position(GridRect::unit(1, 3), 10);
        r.set_world_offset(CameraOffset::new(-20, 0));
        let frame = r.frame();
        let rows: Vec<&str> = frame.lines().skip(1).collect();
        assert_eq!(rows, vec!["#. ", ".@ ", ".. "]);
        assert!(frame.starts_with("offset=(-20, 0) avatar=[1..2, 3..4]"));
        assert_eq!(r.updates(), 1);
    }

    #[test]
    fn duplicate_block_keeps_collidable_marker() {
        let mut layout = scene();
        layout.blocks.push(Block::decoration(0, 2));
        let mut r = DebugTextRenderer::new();
        r.mount(&layout);
        assert!(r.frame().lines().nth(1).unwrap().ends_with('#'));
    }

    #[test]
    fn renders_through_mutable_reference() {
        fn step<R: Renderer>(mut renderer: R) {
            renderer.set_entity_position(GridRect::unit(0, 0), 4);
            renderer.set_world_offset(CameraOffset::new(4, 0));
        }

        let mut r = DebugTextRenderer::new();
        step(&mut r);
        assert_eq!(r.offset(), CameraOffset::new(4, 0));
        assert_eq!(r.placement().map(|p| p.width), Some(4));
    }

    #[test]
    fn developer_mode_frames_the_view() {
        let mut layout = scene();
        layout.developer = true;
        let mut r = DebugTextRenderer::new();
        r.mount(&layout);
        r.set_entity_position(GridRect::unit(1, 3), 10);
        r.set_world_offset(CameraOffset::new(-20, 0));
        let frame = r.frame();
        let rows: Vec<&str> = frame.lines().skip(1).collect();
        assert_eq!(rows, vec!["+---+", "|#. |", "|.@ |", "|.. |", "+---+"]);
    }

    #[test]
    fn placement_saturates_at_extreme_cells() {
        let p = Placement::from_rect(GridRect::unit(i32::MAX - 1, 0), i32::MAX);
        assert_eq!(p.y, i32::MAX);
        assert_eq!(p.height, i32::MAX);
    }
}
