//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::{CubeSnapshot, GameSnapshot};
use crate::core::TargetHighlight;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{HighlightState, Position};

const FLOOR_BG: Rgb = Rgb::new(30, 34, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal renderer for the dice board.
///
/// Board cells are drawn `cell_w x cell_h` characters large. When the board
/// does not fit the viewport at that size the view falls back to 2x1 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps cells roughly square with typical glyph aspect.
        Self { cell_w: 4, cell_h: 2 }
    }
}

/// Resolved placement of the board frame inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    cell_w: u16,
    cell_h: u16,
}

impl Layout {
    /// Top-left terminal coordinate of board cell `pos`.
    fn cell_origin(&self, pos: Position) -> (u16, u16) {
        (
            self.x + 1 + pos.x.max(0) as u16 * self.cell_w,
            self.y + 1 + pos.y.max(0) as u16 * self.cell_h,
        )
    }

    fn cell_center(&self, pos: Position) -> (u16, u16) {
        let (px, py) = self.cell_origin(pos);
        (px + self.cell_w / 2, py + self.cell_h / 2)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::new(' ', Style::new(Rgb::new(220, 220, 220), PANEL_BG)));

        let layout = self.layout(snap, viewport);
        let border = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.w - 2,
            layout.h - 2,
            ' ',
            Style::new(FLOOR_BG, FLOOR_BG),
        );
        draw_border(fb, layout.x, layout.y, layout.w, layout.h, border);

        // Grid dots.
        let dot = Style::new(Rgb::new(90, 90, 100), FLOOR_BG).dim();
        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                let (cx, cy) = layout.cell_center(Position::new(x, y));
                fb.put_char(cx, cy, '·', dot);
            }
        }

        for target in &snap.targets {
            let style = highlight_style(target_state(snap, target));
            self.fill_cell(fb, &layout, target.position, style);
            let (cx, cy) = layout.cell_center(target.position);
            fb.put_char(cx, cy, digit(target.value), style);
        }

        if let Some(hint) = snap.hint {
            let (px, py) = layout.cell_origin(hint.target.position);
            fb.put_char(px, py, '*', Style::new(Rgb::new(255, 120, 200), FLOOR_BG).bold());
        }

        self.draw_cube(fb, &layout, &snap.cube);
        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.won {
            draw_overlay_text(fb, &layout, "YOU WIN");
        } else if !snap.active {
            draw_overlay_text(fb, &layout, "STOPPED");
        }

        draw_help(fb, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let cols = snap.width.max(1) as u16;
        let rows = snap.height.max(1) as u16;

        let fits = |cw: u16, ch: u16| cols * cw + 2 <= viewport.width && rows * ch + 3 <= viewport.height;
        let (cell_w, cell_h) = if fits(self.cell_w, self.cell_h) {
            (self.cell_w, self.cell_h)
        } else {
            (2, 1)
        };

        let w = cols * cell_w + 2;
        let h = rows * cell_h + 2;
        // Leave room on the right for the side panel when possible.
        let x = viewport.width.saturating_sub(w + 20) / 2;
        let y = viewport.height.saturating_sub(h + 1) / 2;
        Layout {
            x,
            y,
            w,
            h,
            cell_w,
            cell_h,
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &Layout, pos: Position, style: Style) {
        let (px, py) = layout.cell_origin(pos);
        fb.fill_rect(px, py, layout.cell_w, layout.cell_h, ' ', style);
    }

    fn draw_cube(&self, fb: &mut FrameBuffer, layout: &Layout, cube: &CubeSnapshot) {
        let face = Style::new(Rgb::new(20, 20, 20), Rgb::new(235, 235, 225)).bold();
        self.fill_cell(fb, layout, cube.position, face);

        let (cx, cy) = layout.cell_center(cube.position);
        fb.put_char(cx, cy, digit(cube.orientation.top()), face);

        if let Some(roll) = cube.rolling {
            let arrow = Style::new(Rgb::new(200, 40, 40), Rgb::new(235, 235, 225)).bold();
            fb.put_char(cx.saturating_sub(1), cy, roll.direction.arrow(), arrow);

            // Shade the destination once the die is past the tipping point.
            if roll.fraction >= 0.5 {
                let dest = cube.position.step(roll.direction);
                let (dx, dy) = layout.cell_origin(dest);
                let shade = Style::new(Rgb::new(150, 150, 140), FLOOR_BG).dim();
                fb.put_char(dx, dy, '░', shade);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: &Layout) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();
        let o = snap.cube.orientation;

        let mut y = layout.y;
        fb.put_str(panel_x, y, "TOP", label);
        fb.put_u32(panel_x + 7, y, o.top() as u32, value);
        y += 1;
        fb.put_str(panel_x, y, "BOTTOM", dim);
        fb.put_u32(panel_x + 7, y, o.bottom() as u32, dim);
        y += 1;

        let faces = [('L', o.left()), ('R', o.right()), ('F', o.front()), ('B', o.back())];
        for (i, (name, v)) in faces.into_iter().enumerate() {
            let x = panel_x + i as u16 * 3;
            fb.put_char(x, y, name, dim);
            fb.put_char(x + 1, y, digit(v), dim);
        }
        y += 2;

        fb.put_str(panel_x, y, "COLLECTED", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.collected.len() as u32, value);
        fb.put_char(panel_x + 1, y, '/', value);
        fb.put_u32(panel_x + 2, y, snap.target_count as u32, value);
        for (i, v) in snap.collected.iter().enumerate() {
            fb.put_char(panel_x + 5 + i as u16 * 2, y, digit(*v), highlight_style(HighlightState::Collected));
        }
        y += 2;

        // Smallest value still missing, and where it sits on the die.
        let next = snap
            .targets
            .iter()
            .map(|t| t.value)
            .filter(|v| !snap.collected.contains(v))
            .min();
        if let Some(v) = next {
            fb.put_str(panel_x, y, "NEXT", label);
            fb.put_char(panel_x + 5, y, digit(v), value);
            if let Some(face) = o.face_of(v) {
                fb.put_str(panel_x + 7, y, face.as_str(), dim);
            }
            y += 2;
        }

        fb.put_str(panel_x, y, "MOVES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.move_count, value);
        y += 2;

        if let Some(hint) = snap.hint {
            fb.put_str(panel_x, y, "HINT", label);
            y += 1;
            fb.put_char(panel_x, y, hint.next.arrow(), value);
            fb.put_char(panel_x + 2, y, '(', dim);
            fb.put_u32(panel_x + 3, y, hint.rolls as u32, dim);
            let close = panel_x + 3 + if hint.rolls >= 10 { 2 } else { 1 };
            fb.put_char(close, y, ')', dim);
        }
    }
}

/// Collected values always show as collected, whatever order they were
/// picked up in.
fn target_state(snap: &GameSnapshot, target: &TargetHighlight) -> HighlightState {
    if snap.collected.contains(&target.value) {
        HighlightState::Collected
    } else {
        target.state
    }
}

fn highlight_style(state: HighlightState) -> Style {
    match state {
        HighlightState::Collected => Style::new(Rgb::new(110, 200, 120), Rgb::new(30, 60, 35)).dim(),
        HighlightState::Current => Style::new(Rgb::new(20, 20, 20), Rgb::new(240, 200, 70)).bold(),
        HighlightState::Future => Style::new(Rgb::new(220, 230, 255), Rgb::new(50, 70, 130)),
    }
}

fn digit(v: u8) -> char {
    char::from_digit(v as u32, 10).unwrap_or('?')
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '╭', style);
    fb.put_char(right, y, '╮', style);
    fb.put_char(x, bottom, '╰', style);
    fb.put_char(right, bottom, '╯', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &Layout, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = layout.x.saturating_add(layout.w.saturating_sub(text_w) / 2);
    let y = layout.y.saturating_add(layout.h / 2);
    fb.put_str(x, y, text, Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold());
}

fn draw_help(fb: &mut FrameBuffer, viewport: Viewport) {
    const HELP: &str = "arrows/wasd roll  r restart  n new  ? hint  q quit";
    if viewport.height < 2 {
        return;
    }
    fb.put_str(0, viewport.height - 1, HELP, Style::new(Rgb::new(140, 140, 140), PANEL_BG).dim());
}
