//! Game view - flattens the sprite scene and HUD into a framebuffer
//!
//! Grid cells are two characters wide to get a roughly square aspect. The
//! grid is drawn with y flipped (row 0 of the playfield is the bottom), and
//! the camera shake offset shifts every sprite before projection.

use crate::core::Game;
use crate::term::scene::{CueLine, ScoreFeed, SpriteKind, TermScene};
use crate::types::{BlockColor, BASE_ROWS, GRID_HEIGHT, GRID_WIDTH};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

/// A single terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Fixed-size framebuffer of styled character cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }
}

/// Playfield offset inside the framebuffer (the border sits at column and
/// row zero)
const FIELD_X: u16 = 1;
const FIELD_Y: u16 = 1;
const FIELD_COLS: u16 = GRID_WIDTH as u16 * 2;
const FIELD_ROWS: u16 = GRID_HEIGHT as u16;
const HUD_X: u16 = FIELD_X + FIELD_COLS + 3;

/// Framebuffer size the view is laid out for
pub const VIEW_WIDTH: u16 = HUD_X + 20;
pub const VIEW_HEIGHT: u16 = FIELD_Y + FIELD_ROWS + 2;

#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn render(
        &self,
        game: &Game,
        scene: &TermScene,
        cursor: (i8, i8),
        cue: &CueLine,
        feed: &ScoreFeed,
        fb: &mut FrameBuffer,
    ) {
        fb.clear();
        self.draw_border(fb);
        self.draw_sprites(scene, fb);
        self.draw_cursor(cursor, fb);
        self.draw_hud(game, cue, feed, fb);
    }

    /// Project grid coordinates to the framebuffer; None when off the
    /// visible field (refill entries start above it)
    fn project(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * 2.0).round() as i32 + FIELD_X as i32;
        let row = (GRID_HEIGHT as f32 - 1.0 - y).round() as i32 + FIELD_Y as i32;
        let in_field = col >= FIELD_X as i32
            && col < (FIELD_X + FIELD_COLS) as i32
            && row >= FIELD_Y as i32
            && row < (FIELD_Y + FIELD_ROWS) as i32;
        in_field.then_some((col as u16, row as u16))
    }

    fn draw_border(&self, fb: &mut FrameBuffer) {
        let style = CellStyle {
            fg: Rgb::new(120, 120, 140),
            ..CellStyle::default()
        };
        let right = FIELD_X + FIELD_COLS;
        let bottom = FIELD_Y + FIELD_ROWS;

        for col in FIELD_X - 1..=right {
            fb.put_char(col, FIELD_Y - 1, '─', style);
            fb.put_char(col, bottom, '─', style);
        }
        for row in FIELD_Y - 1..=bottom {
            fb.put_char(FIELD_X - 1, row, '│', style);
            fb.put_char(right, row, '│', style);
        }
        fb.put_char(FIELD_X - 1, FIELD_Y - 1, '┌', style);
        fb.put_char(right, FIELD_Y - 1, '┐', style);
        fb.put_char(FIELD_X - 1, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        // Tick marks where the headroom starts: drops above this line are
        // stacking toward game over
        let danger_row = FIELD_Y + (GRID_HEIGHT - BASE_ROWS) as u16 - 1;
        fb.put_char(FIELD_X - 1, danger_row, '├', style);
        fb.put_char(right, danger_row, '┤', style);
    }

    fn draw_sprites(&self, scene: &TermScene, fb: &mut FrameBuffer) {
        let (cam_x, cam_y) = scene.camera();
        for sprite in scene.sprites() {
            let Some((col, row)) = self.project(sprite.x + cam_x, sprite.y + cam_y) else {
                continue;
            };
            let fg = color_rgb(sprite.color);
            let style = CellStyle {
                fg,
                bg: Rgb::default(),
                bold: sprite.special || sprite.highlight,
                dim: sprite.opacity < 0.5,
            };

            match sprite.kind {
                SpriteKind::Block => {
                    let glyph = block_glyph(sprite);
                    fb.put_char(col, row, glyph, style);
                    fb.put_char(col + 1, row, glyph, style);
                }
                SpriteKind::Particle => {
                    fb.put_char(col, row, '·', style);
                }
            }
        }
    }

    fn draw_cursor(&self, cursor: (i8, i8), fb: &mut FrameBuffer) {
        let Some((col, row)) = self.project(cursor.0 as f32, cursor.1 as f32) else {
            return;
        };
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        // Bracket the two-character cell; on the edges the brackets land on
        // the border columns
        fb.put_char(col.saturating_sub(1), row, '[', style);
        fb.put_char(col + 2, row, ']', style);
    }

    fn draw_hud(&self, game: &Game, cue: &CueLine, feed: &ScoreFeed, fb: &mut FrameBuffer) {
        let label = CellStyle {
            fg: Rgb::new(150, 150, 160),
            ..CellStyle::default()
        };
        let value = CellStyle {
            fg: Rgb::new(240, 240, 240),
            bold: true,
            ..CellStyle::default()
        };

        fb.put_str(HUD_X, FIELD_Y, "SCORE", label);
        fb.put_str(HUD_X + 7, FIELD_Y, &game.score().to_string(), value);
        fb.put_str(HUD_X, FIELD_Y + 1, "LEVEL", label);
        fb.put_str(HUD_X + 7, FIELD_Y + 1, &game.level().to_string(), value);

        if let Some(points) = feed.last_award() {
            let pop = CellStyle {
                fg: Rgb::new(120, 230, 120),
                bold: true,
                ..CellStyle::default()
            };
            fb.put_str(HUD_X, FIELD_Y + 3, &format!("+{}", points), pop);
        }
        if let Some(event) = cue.current() {
            fb.put_str(HUD_X, FIELD_Y + 4, event.as_str(), label);
        }

        if game.is_game_over() {
            let banner = CellStyle {
                fg: Rgb::new(240, 90, 90),
                bold: true,
                ..CellStyle::default()
            };
            fb.put_str(HUD_X, FIELD_Y + 6, "GAME OVER", banner);
            if let Some(final_score) = feed.final_score() {
                fb.put_str(HUD_X, FIELD_Y + 7, &format!("final {}", final_score), label);
            }
            fb.put_str(HUD_X, FIELD_Y + 8, "r to restart", label);
        } else if game.is_processing() {
            fb.put_str(HUD_X, FIELD_Y + 6, "...", label);
        }

        fb.put_str(
            FIELD_X - 1,
            FIELD_Y + FIELD_ROWS + 1,
            "arrows move · space swap · q quit",
            label,
        );
    }
}

fn color_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Red => Rgb::new(235, 80, 80),
        BlockColor::Green => Rgb::new(90, 210, 110),
        BlockColor::Blue => Rgb::new(90, 140, 240),
        BlockColor::Yellow => Rgb::new(235, 210, 80),
        BlockColor::Purple => Rgb::new(180, 100, 230),
        BlockColor::Cyan => Rgb::new(80, 210, 220),
    }
}

fn block_glyph(sprite: &crate::term::scene::Sprite) -> char {
    if sprite.scale < 0.35 {
        '░'
    } else if sprite.scale < 0.7 {
        '▒'
    } else if sprite.special {
        '▓'
    } else {
        '█'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Renderer;

    fn non_blank_cells(fb: &FrameBuffer) -> usize {
        (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get(x, y).is_some_and(|c| c.ch != ' '))
            .count()
    }

    #[test]
    fn test_block_sprite_lands_in_field() {
        let mut scene = TermScene::new();
        scene.create_block(0.0, 0.0, BlockColor::Red, false);

        let view = GameView;
        let game = Game::new(1);
        let mut fb = FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT);
        view.render(
            &game,
            &scene,
            (0, 0),
            &CueLine::default(),
            &ScoreFeed::default(),
            &mut fb,
        );

        // Base-row left cell projects to the bottom-left of the field
        let row = FIELD_Y + FIELD_ROWS - 1;
        assert_eq!(fb.get(FIELD_X, row).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(FIELD_X + 1, row).map(|c| c.ch), Some('█'));
    }

    #[test]
    fn test_sprites_above_the_field_are_clipped() {
        let mut scene = TermScene::new();
        scene.create_block(3.0, GRID_HEIGHT as f32 + 2.0, BlockColor::Blue, false);

        let view = GameView;
        let game = Game::new(1);
        let mut fb = FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT);
        view.render(
            &game,
            &scene,
            (0, 0),
            &CueLine::default(),
            &ScoreFeed::default(),
            &mut fb,
        );
        let baseline = non_blank_cells(&fb);

        // Moving the sprite into the field adds glyphs
        let mut inside = TermScene::new();
        inside.create_block(3.0, 3.0, BlockColor::Blue, false);
        view.render(
            &game,
            &inside,
            (0, 0),
            &CueLine::default(),
            &ScoreFeed::default(),
            &mut fb,
        );
        assert!(non_blank_cells(&fb) > baseline);
    }

    #[test]
    fn test_framebuffer_bounds_are_safe() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_char(100, 100, 'X', CellStyle::default());
        fb.put_str(3, 0, "overflow", CellStyle::default());
        assert_eq!(fb.get(100, 100), None);
        assert_eq!(fb.get(3, 0).map(|c| c.ch), Some('o'));
    }
}
