//! Time-boxed celebration: a radial particle burst plus a floating
//! score popup, advanced per tick and cleaned up at the end.

use crate::display::container::{Container, DisplayObject};
use crate::display::graphics::{Graphics, TextAnchor};
use crate::foundation::core::Rgb;
use crate::foundation::rng::SeededRng;

/// Particles per burst.
pub const PARTICLE_COUNT: usize = 12;
/// Effect duration in ticks.
pub const EFFECT_DURATION: u64 = 70;

const PARTICLE_COLORS: [Rgb; 6] = [
    Rgb(0xFFB200),
    Rgb(0xFF6B35),
    Rgb(0x34C759),
    Rgb(0x0A84FF),
    Rgb(0xFFD700),
    Rgb(0xFF69B4),
];

/// Effect completion reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectEvent {
    /// The effect ran its full duration and cleaned up.
    Completed,
}

#[derive(Clone, Copy, Debug)]
struct Particle {
    vx: f64,
    vy: f64,
    gravity: f64,
    fade_rate: f32,
}

/// Particle burst + floating `+N` text played at a node on completion.
///
/// The effect owns only motion state; its drawables live in the
/// celebration container the scene passes to [`CelebrationEffect::play`]
/// and [`CelebrationEffect::update`]. Randomness comes from an owned
/// [`SeededRng`] so replays are identical for a given journey.
#[derive(Clone, Debug)]
pub struct CelebrationEffect {
    particles: Vec<Particle>,
    has_points_text: bool,
    frame: u64,
    active: bool,
    rng: SeededRng,
}

impl CelebrationEffect {
    /// New idle effect drawing randomness from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            has_points_text: false,
            frame: 0,
            active: false,
            rng: SeededRng::new(seed),
        }
    }

    /// Whether a burst is currently in flight.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a burst at (x, y), discarding any in-flight run first.
    /// Spawns [`PARTICLE_COUNT`] particles and, when `points > 0`, a
    /// floating `+points` text.
    pub fn play(&mut self, container: &mut Container, x: f64, y: f64, points: u32) {
        self.cleanup(container);
        container.x = x;
        container.y = y;
        self.frame = 0;
        self.active = true;

        for i in 0..PARTICLE_COUNT {
            let angle = std::f64::consts::TAU * i as f64 / PARTICLE_COUNT as f64
                + (self.rng.next_f64() - 0.5) * 0.5;
            let speed = 2.0 + self.rng.next_f64() * 3.0;
            let size = 3.0 + self.rng.next_f64() * 4.0;

            let mut g = Graphics::with_label("particle");
            if self.rng.next_bool() {
                g.fill_circle(0.0, 0.0, size, PARTICLE_COLORS[i % PARTICLE_COLORS.len()], 1.0);
            } else {
                g.fill_star(
                    0.0,
                    0.0,
                    4,
                    size,
                    size * 0.4,
                    PARTICLE_COLORS[i % PARTICLE_COLORS.len()],
                    1.0,
                );
            }
            container.add_graphics(g);

            self.particles.push(Particle {
                vx: angle.cos() * speed,
                vy: angle.sin() * speed - 2.0,
                gravity: 0.08,
                fade_rate: 0.015 + self.rng.next_f64() as f32 * 0.01,
            });
        }

        if points > 0 {
            let mut t = Graphics::with_label("points");
            t.y = -30.0;
            t.text(
                format!("+{points}"),
                0.0,
                0.0,
                22.0,
                Rgb(0xFFB200),
                TextAnchor::Center,
            );
            container.add_graphics(t);
            self.has_points_text = true;
        }
    }

    /// Advance one tick: integrate particle motion, gravity, fade and
    /// shrink; float the points text. Emits [`EffectEvent::Completed`]
    /// once when the duration elapses, after destroying all transient
    /// children.
    pub fn update(&mut self, container: &mut Container) -> Option<EffectEvent> {
        if !self.active {
            return None;
        }
        self.frame += 1;

        let shrink = (1.0 - self.frame as f64 / EFFECT_DURATION as f64).max(0.0);
        for (particle, child) in self.particles.iter_mut().zip(container.children_mut()) {
            let DisplayObject::Graphics(g) = child else {
                continue;
            };
            g.x += particle.vx;
            g.y += particle.vy;
            particle.vy += particle.gravity;
            g.alpha = (g.alpha - particle.fade_rate).max(0.0);
            g.set_scale(shrink);
        }

        if self.has_points_text
            && let Some(t) = container.child_graphics_mut("points")
        {
            t.y -= 1.2;
            if self.frame > EFFECT_DURATION / 2 {
                t.alpha = (t.alpha - 0.04).max(0.0);
            }
        }

        if self.frame >= EFFECT_DURATION {
            self.active = false;
            self.cleanup(container);
            return Some(EffectEvent::Completed);
        }
        None
    }

    fn cleanup(&mut self, container: &mut Container) {
        container.take_children();
        self.particles.clear();
        self.has_points_text = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/celebration.rs"]
mod tests;
