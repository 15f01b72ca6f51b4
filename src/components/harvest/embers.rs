//! Rising embers with flicker and a soft radial glow.
//!
//! An ember's rendered opacity is its base opacity × remaining life × a
//! flicker term that never exceeds 1, so the life scalar always bounds what
//! reaches the canvas.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::components::effects::clock::LoadTier;
use crate::components::effects::pool::{Bounds, Fate, Pool, RECYCLE_MARGIN};
use crate::components::effects::rng::RandomSource;
use crate::components::effects::surface::Layer;

use super::theme::EmberStyle;

/// A single rising ember.
#[derive(Clone, Debug)]
pub struct Ember {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	/// Remaining life in `[0, 1]`; decays linearly.
	pub life: f64,
	rise: f64,
	drift: f64,
	decay: f64,
	base_alpha: f64,
	flicker_phase: f64,
	flicker_speed: f64,
}

impl Ember {
	fn spawned(style: &EmberStyle, rng: &mut RandomSource, bounds: Bounds) -> Self {
		Self {
			x: rng.range(0.0, bounds.width),
			y: rng.range(bounds.height - 30.0, bounds.height + RECYCLE_MARGIN * 0.5),
			size: rng.range(style.size_min, style.size_max),
			life: 1.0,
			rise: rng.range(style.rise_min, style.rise_max),
			drift: rng.range(-style.drift_max, style.drift_max),
			decay: rng.range(style.decay_min, style.decay_max),
			base_alpha: rng.range(style.alpha_min, style.alpha_max),
			flicker_phase: rng.range(0.0, TAU),
			flicker_speed: rng.range(style.flicker_speed_min, style.flicker_speed_max),
		}
	}

	fn step(&mut self, dt: f64, style: &EmberStyle, _bounds: Bounds) -> Fate {
		self.flicker_phase += self.flicker_speed * dt;
		self.x += (self.drift + self.flicker_phase.sin() * style.wobble) * dt * 60.0;
		self.y -= self.rise * dt * 60.0;
		self.life -= self.decay * dt * 60.0;

		if self.life <= 0.0 || self.y < -RECYCLE_MARGIN {
			Fate::Recycle
		} else {
			Fate::Keep
		}
	}

	/// Opacity as rendered: always within `[0, base_alpha × life]`.
	pub fn opacity(&self) -> f64 {
		let flicker = 0.6 + 0.4 * self.flicker_phase.sin();
		(self.base_alpha * self.life.max(0.0) * flicker).max(0.0)
	}

	#[cfg(test)]
	fn opacity_bound(&self) -> f64 {
		self.base_alpha * self.life.max(0.0)
	}
}

/// The ember pool.
pub struct EmberField {
	pool: Pool<Ember>,
	style: EmberStyle,
}

impl EmberField {
	pub fn new(style: EmberStyle, tier: LoadTier, bounds: Bounds, rng: &mut RandomSource) -> Self {
		let count = style.counts.count_for(tier);
		let pool = Pool::new(count, bounds, |b| Ember::spawned(&style, rng, b));
		Self { pool, style }
	}

	pub fn advance(&mut self, dt: f64, rng: &mut RandomSource) {
		let style = &self.style;
		self.pool.advance(
			|ember, b| ember.step(dt, style, b),
			|ember, b| *ember = Ember::spawned(style, rng, b),
		);
	}

	pub fn embers(&self) -> &[Ember] {
		self.pool.members()
	}

	pub fn draw(&self, layer: &Layer) {
		layer.clear();
		let ctx = layer.ctx();
		for ember in self.pool.members() {
			draw_ember(ctx, ember, &self.style);
		}
	}
}

fn draw_ember(ctx: &CanvasRenderingContext2d, ember: &Ember, style: &EmberStyle) {
	let alpha = ember.opacity();
	if alpha <= 0.0 {
		return;
	}
	let glow_radius = ember.size * 3.0;
	let gradient = ctx
		.create_radial_gradient(ember.x, ember.y, 0.0, ember.x, ember.y, glow_radius)
		.unwrap();
	gradient
		.add_color_stop(0.0, &style.core.with_alpha(alpha).to_css())
		.unwrap();
	gradient
		.add_color_stop(0.35, &style.glow.with_alpha(alpha * 0.5).to_css())
		.unwrap();
	gradient
		.add_color_stop(1.0, &style.glow.with_alpha(0.0).to_css())
		.unwrap();
	ctx.begin_path();
	let _ = ctx.arc(ember.x, ember.y, glow_radius, 0.0, TAU);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::harvest::theme::HarvestTheme;

	const DT: f64 = 0.016;

	#[test]
	fn opacity_never_exceeds_life_bound() {
		let theme = HarvestTheme::dusk();
		let mut rng = RandomSource::seeded(21);
		let bounds = Bounds::new(640.0, 480.0);
		let mut field = EmberField::new(theme.embers, LoadTier::Normal, bounds, &mut rng);

		for _ in 0..5_000 {
			field.advance(DT, &mut rng);
			for ember in field.embers() {
				assert!(ember.opacity() <= ember.opacity_bound() + 1e-12);
			}
		}
	}

	#[test]
	fn burned_out_embers_restart_at_the_bottom() {
		let theme = HarvestTheme::dusk();
		let mut rng = RandomSource::seeded(22);
		let bounds = Bounds::new(640.0, 480.0);
		let mut field = EmberField::new(theme.embers, LoadTier::Reduced, bounds, &mut rng);

		// Far past the longest possible life (decay >= 0.002/tick).
		for _ in 0..2_000 {
			field.advance(DT, &mut rng);
		}
		for ember in field.embers() {
			assert!(ember.life > 0.0);
			assert!(ember.y >= -RECYCLE_MARGIN);
		}
	}
}
