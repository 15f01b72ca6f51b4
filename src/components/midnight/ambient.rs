//! Ambient tropical drift: sparkles, blossoms, and confetti floating upward.
//!
//! Each particle fixes one of three glyph variants at respawn and keeps it
//! for that life; the variants only differ in how they draw.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::components::effects::clock::LoadTier;
use crate::components::effects::color::Color;
use crate::components::effects::pool::{Bounds, Fate, Pool, RECYCLE_MARGIN};
use crate::components::effects::rng::RandomSource;
use crate::components::effects::surface::Layer;

use super::theme::AmbientStyle;

/// Mutually exclusive draw variants, chosen at respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
	/// Four-point star polygon.
	Sparkle,
	/// Five-petal blossom.
	Blossom,
	/// Rotating rectangle.
	Confetti,
}

/// A single drifting particle.
#[derive(Clone, Debug)]
pub struct Drifter {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub glyph: Glyph,
	color: Color,
	alpha: f64,
	rise: f64,
	wobble_phase: f64,
	wobble_freq: f64,
	rotation: f64,
	spin: f64,
}

impl Drifter {
	fn randomized(style: &AmbientStyle, rng: &mut RandomSource, bounds: Bounds, y: f64) -> Self {
		let roll = rng.range(0.0, 1.0);
		let glyph = if roll < style.sparkle_chance {
			Glyph::Sparkle
		} else if roll < style.sparkle_chance + style.blossom_chance {
			Glyph::Blossom
		} else {
			Glyph::Confetti
		};
		Self {
			x: rng.range(0.0, bounds.width),
			y,
			size: rng.range(style.size_min, style.size_max),
			glyph,
			color: style.palette.random(rng),
			alpha: rng.range(style.alpha_min, style.alpha_max),
			rise: rng.range(style.rise_min, style.rise_max),
			wobble_phase: rng.range(0.0, TAU),
			wobble_freq: rng.range(style.wobble_freq_min, style.wobble_freq_max),
			rotation: rng.range(0.0, TAU),
			spin: rng.range(-style.spin_max, style.spin_max),
		}
	}

	fn scattered(style: &AmbientStyle, rng: &mut RandomSource, bounds: Bounds) -> Self {
		let y = rng.range(0.0, bounds.height + RECYCLE_MARGIN);
		Self::randomized(style, rng, bounds, y)
	}

	fn below_bottom(style: &AmbientStyle, rng: &mut RandomSource, bounds: Bounds) -> Self {
		let y = rng.range(bounds.height + 10.0, bounds.height + RECYCLE_MARGIN);
		Self::randomized(style, rng, bounds, y)
	}

	fn step(&mut self, dt: f64, time: f64, style: &AmbientStyle, _bounds: Bounds) -> Fate {
		self.x +=
			(time * self.wobble_freq + self.wobble_phase).sin() * style.wobble_amp * dt * 60.0;
		self.y -= self.rise * dt * 60.0;
		self.rotation += self.spin * dt;
		if self.y < -RECYCLE_MARGIN {
			Fate::Recycle
		} else {
			Fate::Keep
		}
	}
}

/// The ambient drift pool.
pub struct AmbientDrift {
	pool: Pool<Drifter>,
	style: AmbientStyle,
}

impl AmbientDrift {
	pub fn new(
		style: AmbientStyle,
		tier: LoadTier,
		bounds: Bounds,
		rng: &mut RandomSource,
	) -> Self {
		let count = style.counts.count_for(tier);
		let pool = Pool::new(count, bounds, |b| Drifter::scattered(&style, rng, b));
		Self { pool, style }
	}

	pub fn advance(&mut self, dt: f64, time: f64, rng: &mut RandomSource) {
		let style = &self.style;
		self.pool.advance(
			|drifter, b| drifter.step(dt, time, style, b),
			|drifter, b| *drifter = Drifter::below_bottom(style, rng, b),
		);
	}

	pub fn drifters(&self) -> &[Drifter] {
		self.pool.members()
	}

	pub fn draw(&self, layer: &Layer) {
		layer.clear();
		let ctx = layer.ctx();
		for drifter in self.pool.members() {
			draw_drifter(ctx, drifter);
		}
		ctx.set_global_alpha(1.0);
	}
}

fn draw_drifter(ctx: &CanvasRenderingContext2d, drifter: &Drifter) {
	ctx.save();
	let _ = ctx.translate(drifter.x, drifter.y);
	let _ = ctx.rotate(drifter.rotation);
	ctx.set_global_alpha(drifter.alpha);
	ctx.set_fill_style_str(&drifter.color.to_css());
	match drifter.glyph {
		Glyph::Sparkle => draw_sparkle(ctx, drifter.size),
		Glyph::Blossom => draw_blossom(ctx, drifter.size),
		Glyph::Confetti => {
			ctx.fill_rect(
				-drifter.size / 2.0,
				-drifter.size / 4.0,
				drifter.size,
				drifter.size / 2.0,
			);
		}
	}
	ctx.restore();
}

fn draw_sparkle(ctx: &CanvasRenderingContext2d, size: f64) {
	let points = 4;
	ctx.begin_path();
	for i in 0..(points * 2) {
		let radius = if i % 2 == 0 { size } else { size * 0.35 };
		let angle = i as f64 * TAU / (points * 2) as f64;
		let (x, y) = (angle.cos() * radius, angle.sin() * radius);
		if i == 0 {
			ctx.move_to(x, y);
		} else {
			ctx.line_to(x, y);
		}
	}
	ctx.close_path();
	ctx.fill();
}

fn draw_blossom(ctx: &CanvasRenderingContext2d, size: f64) {
	let petals = 5;
	for i in 0..petals {
		let angle = i as f64 * TAU / petals as f64;
		ctx.begin_path();
		let _ = ctx.ellipse(
			angle.cos() * size * 0.5,
			angle.sin() * size * 0.5,
			size * 0.5,
			size * 0.28,
			angle,
			0.0,
			TAU,
		);
		ctx.fill();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::midnight::theme::MidnightTheme;

	const DT: f64 = 0.016;

	#[test]
	fn risen_drifters_respawn_below_the_bottom() {
		let theme = MidnightTheme::eve();
		let mut rng = RandomSource::seeded(51);
		let bounds = Bounds::new(800.0, 600.0);
		let mut drift = AmbientDrift::new(theme.ambient, LoadTier::Reduced, bounds, &mut rng);

		let mut time = 0.0;
		for _ in 0..20_000 {
			drift.advance(DT, time, &mut rng);
			time += DT;
		}
		for drifter in drift.drifters() {
			assert!(drifter.y >= -RECYCLE_MARGIN);
		}
	}

	#[test]
	fn glyph_is_fixed_between_respawns() {
		let theme = MidnightTheme::eve();
		let mut rng = RandomSource::seeded(52);
		let bounds = Bounds::new(800.0, 600.0);
		let mut drift = AmbientDrift::new(theme.ambient, LoadTier::Reduced, bounds, &mut rng);

		let glyphs: Vec<Glyph> = drift.drifters().iter().map(|d| d.glyph).collect();
		// A few frames well short of any recycle leave every glyph untouched.
		for i in 0..10 {
			drift.advance(DT, i as f64 * DT, &mut rng);
		}
		let after: Vec<Glyph> = drift.drifters().iter().map(|d| d.glyph).collect();
		assert_eq!(glyphs, after);
	}

	#[test]
	fn all_variants_appear() {
		let theme = MidnightTheme::eve();
		let mut rng = RandomSource::seeded(53);
		let bounds = Bounds::new(800.0, 600.0);
		let drift = AmbientDrift::new(theme.ambient, LoadTier::Normal, bounds, &mut rng);
		let has = |g: Glyph| drift.drifters().iter().any(|d| d.glyph == g);
		assert!(has(Glyph::Sparkle));
		assert!(has(Glyph::Blossom));
		assert!(has(Glyph::Confetti));
	}
}
