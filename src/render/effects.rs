//! Cosmetic animations layered over the board.
//!
//! None of this feeds back into the game; the host advances it once per
//! rendered frame.

use rand::Rng;
use std::f32::consts::TAU;
use std::time::Instant;

use crate::game::Position;
use crate::game::config::{CELL_SIZE, EAT_FLASH_DURATION, GRID_CELLS};

const PARTICLE_COUNT: usize = 10;
const FADE_PER_FRAME: f32 = 0.05;

/// One spark of the collision explosion, in position units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub opacity: f32,
}

impl Particle {
    /// Grid cell the particle is over, if inside the arena
    pub fn cell(&self) -> Option<(i32, i32)> {
        let col = (self.x / CELL_SIZE as f32).floor() as i32;
        let row = (self.y / CELL_SIZE as f32).floor() as i32;
        let in_grid = (0..GRID_CELLS).contains(&col) && (0..GRID_CELLS).contains(&row);
        in_grid.then_some((col, row))
    }
}

/// Burst of particles flying out of the head after a collision
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    particles: Vec<Particle>,
}

impl Explosion {
    pub fn new<R: Rng + ?Sized>(origin: Position, rng: &mut R) -> Self {
        let cx = (origin.x + CELL_SIZE / 2) as f32;
        let cy = (origin.y + CELL_SIZE / 2) as f32;

        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(5.0f32..15.0);
                Particle {
                    x: cx,
                    y: cy,
                    vx: angle.cos() * speed,
                    vy: angle.sin() * speed,
                    opacity: 1.0,
                }
            })
            .collect();

        Self { particles }
    }

    /// Move every particle one frame and drop the faded ones
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.opacity -= FADE_PER_FRAME;
        }
        self.particles.retain(|particle| particle.opacity > 0.0);
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[derive(Debug, Default)]
pub struct Effects {
    explosion: Option<Explosion>,
    eat_flash_until: Option<Instant>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_fruit_eaten(&mut self, now: Instant) {
        self.eat_flash_until = Some(now + EAT_FLASH_DURATION);
    }

    pub fn is_eating(&self, now: Instant) -> bool {
        self.eat_flash_until.is_some_and(|until| now < until)
    }

    pub fn explode<R: Rng + ?Sized>(&mut self, origin: Position, rng: &mut R) {
        self.explosion = Some(Explosion::new(origin, rng));
    }

    pub fn explosion(&self) -> Option<&Explosion> {
        self.explosion.as_ref()
    }

    /// Advance animations by one rendered frame
    pub fn advance_frame(&mut self) {
        if let Some(explosion) = self.explosion.as_mut() {
            explosion.advance();
            if explosion.is_finished() {
                self.explosion = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.explosion = None;
        self.eat_flash_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    #[test]
    fn test_explosion_starts_at_head_center() {
        let mut rng = StdRng::seed_from_u64(9);
        let explosion = Explosion::new(Position::new(300, 300), &mut rng);

        assert_eq!(explosion.particles().len(), 10);
        for particle in explosion.particles() {
            assert_eq!((particle.x, particle.y), (310.0, 310.0));
            assert_eq!(particle.cell(), Some((15, 15)));
            let speed = particle.vx.hypot(particle.vy);
            assert!((5.0..15.0 + 1e-3).contains(&speed));
        }
    }

    #[test]
    fn test_explosion_fades_out() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut explosion = Explosion::new(Position::new(300, 300), &mut rng);

        for _ in 0..10 {
            explosion.advance();
        }
        assert!(!explosion.is_finished());
        assert!(explosion.particles().iter().all(|p| p.opacity < 0.6));

        for _ in 0..15 {
            explosion.advance();
        }
        assert!(explosion.is_finished());
    }

    #[test]
    fn test_particle_outside_arena_has_no_cell() {
        let particle = Particle {
            x: -3.0,
            y: 50.0,
            vx: 0.0,
            vy: 0.0,
            opacity: 1.0,
        };
        assert_eq!(particle.cell(), None);
    }

    #[test]
    fn test_effects_lifecycle() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut effects = Effects::new();
        let now = Instant::now();

        assert!(!effects.is_eating(now));
        effects.on_fruit_eaten(now);
        assert!(effects.is_eating(now + Duration::from_millis(299)));
        assert!(!effects.is_eating(now + Duration::from_millis(300)));

        effects.explode(Position::new(0, 0), &mut rng);
        assert!(effects.explosion().is_some());
        for _ in 0..25 {
            effects.advance_frame();
        }
        assert!(effects.explosion().is_none());

        effects.on_fruit_eaten(now);
        effects.clear();
        assert!(!effects.is_eating(now));
    }
}
