//! Static starfield with per-star twinkle.
//!
//! Stars never move; the only animation is an opacity oscillation driven by a
//! per-star phase advancing at a random speed.

use std::f64::consts::TAU;

use crate::components::effects::clock::LoadTier;
use crate::components::effects::pool::{Bounds, Fate, Pool};
use crate::components::effects::rng::RandomSource;
use crate::components::effects::surface::Layer;

use super::theme::StarStyle;

/// A single fixed star.
#[derive(Clone, Debug)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	base_alpha: f64,
	phase: f64,
	speed: f64,
}

impl Star {
	fn spawned(style: &StarStyle, rng: &mut RandomSource, bounds: Bounds) -> Self {
		Self {
			x: rng.range(0.0, bounds.width),
			y: rng.range(0.0, bounds.height),
			size: rng.range(style.size_min, style.size_max),
			base_alpha: rng.range(style.alpha_min, style.alpha_max),
			phase: rng.range(0.0, TAU),
			speed: rng.range(style.twinkle_min, style.twinkle_max),
		}
	}

	fn step(&mut self, dt: f64) -> Fate {
		self.phase += self.speed * dt;
		if self.phase > TAU {
			self.phase -= TAU;
		}
		Fate::Keep
	}

	/// Current twinkled opacity in `[0, base_alpha]`.
	pub fn twinkle(&self) -> f64 {
		self.base_alpha * (0.5 + 0.5 * self.phase.sin())
	}

	#[cfg(test)]
	fn phase(&self) -> f64 {
		self.phase
	}

	#[cfg(test)]
	fn base_alpha(&self) -> f64 {
		self.base_alpha
	}
}

/// The starfield pool.
pub struct StarField {
	pool: Pool<Star>,
	style: StarStyle,
}

impl StarField {
	pub fn new(style: StarStyle, tier: LoadTier, bounds: Bounds, rng: &mut RandomSource) -> Self {
		let count = style.counts.count_for(tier);
		let pool = Pool::new(count, bounds, |b| Star::spawned(&style, rng, b));
		Self { pool, style }
	}

	pub fn advance(&mut self, dt: f64) {
		// Stars never leave the canvas; the respawn arm is unreachable.
		self.pool.advance(|star, _| star.step(dt), |_, _| {});
	}

	pub fn stars(&self) -> &[Star] {
		self.pool.members()
	}

	pub fn draw(&self, layer: &Layer) {
		layer.clear();
		let ctx = layer.ctx();
		for star in self.pool.members() {
			ctx.set_fill_style_str(&self.style.color.with_alpha(star.twinkle()).to_css());
			ctx.begin_path();
			let _ = ctx.arc(star.x, star.y, star.size, 0.0, TAU);
			ctx.fill();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::midnight::theme::MidnightTheme;

	const DT: f64 = 0.016;

	#[test]
	fn twinkle_stays_within_base_opacity() {
		let theme = MidnightTheme::eve();
		let mut rng = RandomSource::seeded(41);
		let bounds = Bounds::new(800.0, 600.0);
		let mut field = StarField::new(theme.stars, LoadTier::Reduced, bounds, &mut rng);

		for _ in 0..2_000 {
			field.advance(DT);
			for star in field.stars() {
				let alpha = star.twinkle();
				assert!(alpha >= 0.0 && alpha <= star.base_alpha() + 1e-12);
			}
		}
	}

	#[test]
	fn phase_wraps_instead_of_growing() {
		let theme = MidnightTheme::eve();
		let mut rng = RandomSource::seeded(42);
		let bounds = Bounds::new(800.0, 600.0);
		let mut field = StarField::new(theme.stars, LoadTier::Reduced, bounds, &mut rng);

		for _ in 0..100_000 {
			field.advance(DT);
		}
		for star in field.stars() {
			assert!(star.phase() <= TAU + 1e-9);
		}
	}

	#[test]
	fn stars_hold_position() {
		let theme = MidnightTheme::eve();
		let mut rng = RandomSource::seeded(43);
		let bounds = Bounds::new(800.0, 600.0);
		let mut field = StarField::new(theme.stars, LoadTier::Reduced, bounds, &mut rng);
		let before: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.x, s.y)).collect();
		for _ in 0..500 {
			field.advance(DT);
		}
		let after: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.x, s.y)).collect();
		assert_eq!(before, after);
	}
}
