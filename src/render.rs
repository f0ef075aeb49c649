use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

use crate::game::Game;
use crate::geometry::Rect;
use crate::session::SessionState;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const PANEL: Rgb = Rgb(220, 195, 120);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

/// Terminal pixels: one per column horizontally, two per row vertically.
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(color(top)))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(color(top)))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(color(bot)))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── 3x5 bitmap glyphs ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
fn letter(ch: char) -> Option<[u8; 15]> {
    Some(match ch {
        'A' => [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'D' => [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0],
        'E' => [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1],
        'N' => [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1],
        'P' => [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0],
        'R' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'S' => [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0],
        'T' => [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0],
        'U' => [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
        _ => return None,
    })
}

fn glyph(ch: char) -> Option<[u8; 15]> {
    match ch.to_digit(10) {
        Some(d) => Some(DIGITS[d as usize]),
        None => letter(ch),
    }
}

fn draw_glyph(buf: &mut PixelBuf, x: i32, y: i32, glyph: &[u8; 15], fg: Rgb) {
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, SHADOW);
                buf.set(px, py, fg);
            }
        }
    }
}

/// Draws `text` centered on `cx`, 3px per glyph plus 1px spacing.
fn draw_text(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb) {
    let total_w = text.chars().count() as i32 * 4 - 1;
    let start_x = cx - total_w / 2;
    for (i, ch) in text.chars().enumerate() {
        if let Some(g) = glyph(ch) {
            draw_glyph(buf, start_x + i as i32 * 4, y, &g, fg);
        }
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Maps world units onto terminal pixels.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub units_per_pixel: f32,
}

impl Projection {
    fn px(&self, v: f32) -> i32 {
        (v / self.units_per_pixel).floor() as i32
    }

    /// Pixel rect covering `r`, at least one pixel in each direction.
    fn rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x0 = self.px(r.left());
        let y0 = self.px(r.top());
        let x1 = self.px(r.right()).max(x0 + 1);
        let y1 = self.px(r.bottom()).max(y0 + 1);
        (x0, y0, x1 - x0, y1 - y0)
    }

    pub fn buffer_size(&self, world_w: f32, world_h: f32) -> (usize, usize) {
        let w = (world_w / self.units_per_pixel).round().max(1.0) as usize;
        // Even height so every terminal row holds two pixels.
        let h = ((world_h / self.units_per_pixel).round().max(2.0) as usize) & !1;
        (w, h)
    }
}

pub fn draw(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    draw_sky(game, proj, buf);
    draw_obstacles(game, proj, buf);
    draw_ground(game, proj, buf);
    draw_bird(game, proj, buf);

    let (sx, sy) = game.viewport().score_anchor();
    draw_text(
        buf,
        proj.px(sx),
        (proj.px(sy) - 2).max(1),
        &game.score().to_string(),
        WHITE,
    );

    match game.state() {
        SessionState::NotStarted => {
            let v = game.viewport();
            draw_text(buf, proj.px(v.width() / 2.0), proj.px(v.height() / 3.0), "ENTER", WHITE);
        }
        SessionState::Paused => draw_paused(game, proj, buf),
        SessionState::Running | SessionState::Ended => {}
    }
    if game.restart_visible() {
        draw_restart(game, proj, buf);
    }
}

fn draw_sky(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    let (x0, y0, w, h) = proj.rect(&game.viewport().background());
    for y in 0..h {
        let t = ((y * 256) / h.max(1)) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in 0..w {
            buf.set(x0 + x, y0 + y, c);
        }
    }
}

fn draw_obstacles(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    for obstacle in game.obstacles().iter() {
        let (ux, uy, uw, uh) = proj.rect(&obstacle.upper());
        let (lx, ly, lw, lh) = proj.rect(&obstacle.lower());
        for x in 0..uw {
            let c = pipe_shade(x, uw);
            for y in uy..uy + uh {
                buf.set(ux + x, y, c);
            }
        }
        for x in 0..lw {
            let c = pipe_shade(x, lw);
            for y in ly..ly + lh {
                buf.set(lx + x, y, c);
            }
        }
        // Caps: one dark row on each barrier's gap edge, one pixel wider.
        for x in -1..=uw {
            buf.set(ux + x, uy + uh - 1, CAP_DARK);
            buf.set(lx + x, ly, CAP_DARK);
        }
    }
}

fn draw_ground(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    for strip in game.ground().strips() {
        let (gx, gy, gw, gh) = proj.rect(strip);
        for x in gx..gx + gw {
            let local = x - gx;
            buf.set(x, gy, if (local / 3) % 2 == 0 { GRASS } else { GRASS_LIGHT });
            buf.set(x, gy + 1, GRASS);
            for y in (gy + 2)..(gy + gh) {
                let stripe = (local + (y - gy) * 2) % 12 < 6;
                buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }
}

fn draw_bird(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    let bird = game.bird();
    let (x, y, w, h) = proj.rect(&bird.rect());
    buf.fill_rect(x, y, w, h, BIRD_Y);
    buf.fill_rect(x, y, w, 1, BIRD_HI);

    let wing_y = y + h / 2 + bird.wing_frame() as i32 - 1;
    buf.fill_rect(x, wing_y.clamp(y, y + h - 1), (w / 2).max(1), 1, BIRD_WING);

    buf.set(x + w - 1, y, BIRD_EYE);
    buf.fill_rect(x + w, y + h / 2, 1, (h / 2).max(1), BIRD_BEAK);
}

fn draw_paused(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    let (w, h) = buf.size();
    for y in 0..h {
        for x in 0..w {
            let c = buf.get(x, y);
            buf.set(x as i32, y as i32, c.dim());
        }
    }
    let v = game.viewport();
    draw_text(buf, proj.px(v.width() / 2.0), proj.px(v.height() / 3.0), "PAUSED", WHITE);
}

fn draw_restart(game: &Game, proj: &Projection, buf: &mut PixelBuf) {
    let control = game.viewport().restart_control();
    let (_, _, w, h) = proj.rect(&control);
    // Large enough for the label even on tiny terminals.
    let w = w.max(31);
    let h = h.max(9);
    let x = proj.px(control.center().0) - w / 2;
    let y = proj.px(control.center().1) - h / 2;
    buf.fill_rect(x - 1, y - 1, w + 2, h + 2, SHADOW);
    buf.fill_rect(x, y, w, h, DIRT);
    buf.fill_rect(x + 1, y + 1, w - 2, h - 2, PANEL);
    draw_text(buf, x + w / 2, y + (h - 5) / 2, "RESTART", WHITE);
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}
