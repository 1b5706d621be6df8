//! Celebration particles shown when a game is won.
//!
//! Particles live in normalized coordinates (0.0..1.0 on both axes, y down)
//! so a burst does not need to know the terminal size; they are scaled to the
//! target area when drawn.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    Frame,
};

const GRAVITY: f32 = 0.0015;
const GLYPHS: [&str; 5] = ["*", "•", "+", "▪", "✦"];

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub color: Color,
    pub glyph: &'static str,
    pub ticks_left: u32,
}

pub struct Confetti {
    particles: Vec<Particle>,
    lifetime: u32,
    rng: StdRng,
}

impl Confetti {
    /// `lifetime` is how many ticks each particle survives.
    pub fn new(lifetime: u32) -> Self {
        Confetti {
            particles: Vec::new(),
            lifetime,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(lifetime: u32, seed: u64) -> Self {
        Confetti {
            particles: Vec::new(),
            lifetime,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn `count` particles along the top edge, colours drawn from
    /// `palette`.
    pub fn burst(&mut self, count: usize, palette: &[Color]) {
        if palette.is_empty() || self.lifetime == 0 {
            return;
        }

        for _ in 0..count {
            let color = palette[self.rng.random_range(0..palette.len())];
            let glyph = GLYPHS[self.rng.random_range(0..GLYPHS.len())];
            // Stagger lifetimes so the burst thins out instead of vanishing at once
            let ticks_left = self.rng.random_range(self.lifetime / 2..=self.lifetime).max(1);
            self.particles.push(Particle {
                x: self.rng.random_range(0.0..1.0),
                y: self.rng.random_range(-0.15..0.0),
                vx: self.rng.random_range(-0.006..0.006),
                vy: self.rng.random_range(0.0..0.012),
                color,
                glyph,
                ticks_left,
            });
        }
    }

    /// Advance one frame and drop expired or fallen particles.
    pub fn tick(&mut self) {
        for p in &mut self.particles {
            p.vy += GRAVITY;
            p.x += p.vx;
            p.y += p.vy;
            p.ticks_left = p.ticks_left.saturating_sub(1);
        }
        self.particles.retain(|p| p.ticks_left > 0 && p.y < 1.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Draw the live particles over whatever is already in `area`.
pub fn render(frame: &mut Frame, confetti: &Confetti, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let buf = frame.buffer_mut();
    for p in confetti.particles() {
        if !(0.0..1.0).contains(&p.x) || !(0.0..1.0).contains(&p.y) {
            continue;
        }
        let x = area.x + (p.x * area.width as f32) as u16;
        let y = area.y + (p.y * area.height as f32) as u16;
        buf.set_string(x, y, p.glyph, Style::default().fg(p.color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    const PALETTE: [Color; 2] = [Color::Red, Color::Yellow];

    #[test]
    fn test_burst_spawns_requested_count() {
        let mut confetti = Confetti::with_seed(40, 7);
        assert!(!confetti.is_active());
        confetti.burst(25, &PALETTE);
        assert_eq!(confetti.particles().len(), 25);
        assert!(confetti
            .particles()
            .iter()
            .all(|p| PALETTE.contains(&p.color) && p.ticks_left >= 20 && p.ticks_left <= 40));
    }

    #[test]
    fn test_particles_fall() {
        let mut confetti = Confetti::with_seed(40, 1);
        confetti.burst(10, &PALETTE);
        let before: Vec<f32> = confetti.particles().iter().map(|p| p.y).collect();
        confetti.tick();
        for (p, y0) in confetti.particles().iter().zip(before) {
            assert!(p.y > y0);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut confetti = Confetti::with_seed(10, 3);
        confetti.burst(50, &PALETTE);
        for _ in 0..10 {
            confetti.tick();
        }
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_empty_palette_or_zero_lifetime_spawns_nothing() {
        let mut confetti = Confetti::with_seed(10, 3);
        confetti.burst(10, &[]);
        assert!(!confetti.is_active());

        let mut confetti = Confetti::with_seed(0, 3);
        confetti.burst(10, &PALETTE);
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_clear() {
        let mut confetti = Confetti::with_seed(10, 3);
        confetti.burst(5, &PALETTE);
        confetti.clear();
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_render_stays_inside_area() {
        let mut confetti = Confetti::with_seed(60, 11);
        confetti.burst(200, &PALETTE);
        for _ in 0..5 {
            confetti.tick();
        }

        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let area = Rect::new(5, 2, 10, 5);
        terminal
            .draw(|f| render(f, &confetti, area))
            .unwrap();

        let buffer = terminal.backend().buffer();
        for y in 0..10u16 {
            for x in 0..20u16 {
                let inside = x >= 5 && x < 15 && y >= 2 && y < 7;
                if !inside {
                    assert_eq!(buffer[(x, y)].symbol(), " ", "particle drawn at ({x}, {y})");
                }
            }
        }
    }
}
