//! Falling leaves with depth parallax and wind sway.
//!
//! Each leaf carries a depth scalar in `(0, 1]` that scales both its motion
//! and its opacity, so far leaves drift slowly and faintly behind near ones.
//! The pool depth-sorts before every draw to keep the occlusion order right.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::components::effects::clock::{Countdown, LoadTier};
use crate::components::effects::color::Color;
use crate::components::effects::pool::{Bounds, Fate, Pool, RECYCLE_MARGIN};
use crate::components::effects::rng::{RandomSource, approach, ease_factor};
use crate::components::effects::surface::Layer;

use super::theme::{LeafStyle, WindStyle};

/// Ambient wind shared by the whole pool: a smoothed value easing toward a
/// gust target that re-randomizes on a countdown.
pub struct WindField {
	style: WindStyle,
	ambient: f64,
	gust_target: f64,
	gust: Countdown,
}

impl WindField {
	pub fn new(style: WindStyle, rng: &mut RandomSource) -> Self {
		let first = rng.range(style.gust_secs_min, style.gust_secs_max);
		Self {
			style,
			ambient: 0.0,
			gust_target: 0.0,
			gust: Countdown::new(first),
		}
	}

	pub fn update(&mut self, dt: f64, rng: &mut RandomSource) {
		if self.gust.tick(dt) {
			self.gust_target = rng.range(-self.style.max_gust, self.style.max_gust);
			self.gust
				.rearm(rng.range(self.style.gust_secs_min, self.style.gust_secs_max));
		}
		self.ambient = approach(
			self.ambient,
			self.gust_target,
			ease_factor(self.style.ease_speed, dt),
		);
	}

	/// Current smoothed wind value, in pixels per tick.
	pub fn ambient(&self) -> f64 {
		self.ambient
	}
}

/// A single falling leaf.
#[derive(Clone, Debug)]
pub struct Leaf {
	pub x: f64,
	pub y: f64,
	pub depth: f64,
	pub size: f64,
	pub color: Color,
	pub rotation: f64,
	spin: f64,
	sway_phase: f64,
	sway_freq: f64,
	drift: f64,
	fall: f64,
}

impl Leaf {
	fn randomized(style: &LeafStyle, rng: &mut RandomSource, bounds: Bounds, y: f64) -> Self {
		Self {
			x: rng.range(-RECYCLE_MARGIN, bounds.width + RECYCLE_MARGIN),
			y,
			depth: rng.range(style.depth_min, 1.0),
			size: rng.range(style.size_min, style.size_max),
			color: style.palette.random(rng),
			rotation: rng.range(0.0, TAU),
			spin: rng.range(-style.spin_max, style.spin_max),
			sway_phase: rng.range(0.0, TAU),
			sway_freq: rng.range(style.sway_freq_min, style.sway_freq_max),
			drift: rng.range(-style.drift_max, style.drift_max),
			fall: rng.range(style.fall_min, style.fall_max),
		}
	}

	/// Initial spawn: scattered over the whole canvas so the scene starts
	/// full rather than raining in from the top.
	fn scattered(style: &LeafStyle, rng: &mut RandomSource, bounds: Bounds) -> Self {
		let y = rng.range(-RECYCLE_MARGIN, bounds.height);
		Self::randomized(style, rng, bounds, y)
	}

	/// Recycle spawn: just above the top edge.
	fn at_top(style: &LeafStyle, rng: &mut RandomSource, bounds: Bounds) -> Self {
		let y = rng.range(-RECYCLE_MARGIN, -10.0);
		Self::randomized(style, rng, bounds, y)
	}

	fn step(&mut self, dt: f64, time: f64, wind: f64, style: &LeafStyle, bounds: Bounds) -> Fate {
		let sway = (time * self.sway_freq + self.sway_phase).sin() * style.sway_amp;
		let turbulence = (time * 0.7 + self.sway_phase * 1.3).cos() * style.turbulence;
		self.x += (self.drift + sway + wind + turbulence) * self.depth * dt * 60.0;
		self.y += (self.fall + style.gravity) * self.depth * dt * 60.0;
		self.rotation += self.spin * dt;

		let off_bottom = self.y > bounds.height + RECYCLE_MARGIN;
		let off_side = self.x < -RECYCLE_MARGIN || self.x > bounds.width + RECYCLE_MARGIN;
		if off_bottom || off_side {
			Fate::Recycle
		} else {
			Fate::Keep
		}
	}
}

/// The falling-leaf pool.
pub struct LeafDrift {
	pool: Pool<Leaf>,
	style: LeafStyle,
}

impl LeafDrift {
	pub fn new(style: LeafStyle, tier: LoadTier, bounds: Bounds, rng: &mut RandomSource) -> Self {
		let count = style.counts.count_for(tier);
		let pool = Pool::new(count, bounds, |b| Leaf::scattered(&style, rng, b));
		Self { pool, style }
	}

	pub fn advance(&mut self, dt: f64, time: f64, wind: f64, rng: &mut RandomSource) {
		let style = &self.style;
		self.pool.advance(
			|leaf, b| leaf.step(dt, time, wind, style, b),
			|leaf, b| *leaf = Leaf::at_top(style, rng, b),
		);
	}

	pub fn leaves(&self) -> &[Leaf] {
		self.pool.members()
	}

	pub fn draw(&mut self, layer: &Layer) {
		layer.clear();
		// Far leaves first so near ones occlude them.
		self.pool.sort_by(|leaf| leaf.depth);
		let ctx = layer.ctx();
		for leaf in self.pool.members() {
			draw_leaf(ctx, leaf);
		}
		ctx.set_global_alpha(1.0);
	}
}

fn draw_leaf(ctx: &CanvasRenderingContext2d, leaf: &Leaf) {
	ctx.save();
	let _ = ctx.translate(leaf.x, leaf.y);
	let _ = ctx.rotate(leaf.rotation);
	ctx.set_global_alpha(0.4 + 0.6 * leaf.depth);
	ctx.set_fill_style_str(&leaf.color.to_css());
	ctx.begin_path();
	let _ = ctx.ellipse(0.0, 0.0, leaf.size, leaf.size * 0.55, 0.0, 0.0, TAU);
	ctx.fill();
	// Stem hint along the major axis.
	ctx.set_stroke_style_str(&leaf.color.with_alpha(0.6).to_css());
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(-leaf.size, 0.0);
	ctx.line_to(leaf.size * 0.7, 0.0);
	ctx.stroke();
	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::harvest::theme::HarvestTheme;

	const DT: f64 = 0.016;

	#[test]
	fn fallen_leaves_respawn_above_the_top() {
		let theme = HarvestTheme::dusk();
		let mut rng = RandomSource::seeded(3);
		let bounds = Bounds::new(640.0, 480.0);
		let mut drift = LeafDrift::new(theme.leaves, LoadTier::Reduced, bounds, &mut rng);

		// Long enough for every leaf to cross the bottom at least once.
		let mut time = 0.0;
		for _ in 0..12_000 {
			drift.advance(DT, time, 0.0, &mut rng);
			time += DT;
		}
		for leaf in drift.leaves() {
			assert!(leaf.y <= bounds.height + RECYCLE_MARGIN);
			assert!(leaf.x >= -RECYCLE_MARGIN && leaf.x <= bounds.width + RECYCLE_MARGIN);
			assert!(leaf.depth >= 0.35 && leaf.depth <= 1.0);
		}
	}

	#[test]
	fn tier_selects_pool_size() {
		let theme = HarvestTheme::dusk();
		let mut rng = RandomSource::seeded(5);
		let bounds = Bounds::new(640.0, 480.0);
		let normal = LeafDrift::new(theme.leaves.clone(), LoadTier::Normal, bounds, &mut rng);
		let reduced = LeafDrift::new(theme.leaves.clone(), LoadTier::Reduced, bounds, &mut rng);
		assert_eq!(normal.leaves().len(), theme.leaves.counts.normal);
		assert_eq!(reduced.leaves().len(), theme.leaves.counts.reduced);
	}

	#[test]
	fn gusts_only_retarget_on_expiry() {
		let theme = HarvestTheme::dusk();
		let mut rng = RandomSource::seeded(9);
		let mut wind = WindField::new(theme.wind.clone(), &mut rng);
		let first_target = wind.gust_target;
		// Well inside the first gust window nothing retargets.
		wind.update(0.5, &mut rng);
		assert_eq!(wind.gust_target, first_target);
		// Crossing the window picks a new target within bounds.
		wind.update(10.0, &mut rng);
		assert!(wind.gust_target.abs() <= theme.wind.max_gust);
		assert!(wind.ambient().abs() <= theme.wind.max_gust);
	}
}
