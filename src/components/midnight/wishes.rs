//! Shooting-star wishes.
//!
//! A wish launches from the clicked point at an upward-biased random angle
//! and constant speed, streams a capped trail, and starts fading once it
//! climbs past a configured fraction of the canvas. Wishes are finite: gone
//! at zero opacity or once they exit the canvas, never recycled. The typed
//! text rides along as opaque payload.

use std::f64::consts::{FRAC_PI_2, TAU};

use web_sys::CanvasRenderingContext2d;

use crate::components::effects::pool::{Bounds, RECYCLE_MARGIN};
use crate::components::effects::rng::RandomSource;
use crate::components::effects::surface::Layer;

use super::theme::WishStyle;

/// One in-flight wish.
#[derive(Clone, Debug)]
pub struct Wish {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub alpha: f64,
	vx: f64,
	vy: f64,
	trail: Vec<(f64, f64)>,
}

impl Wish {
	/// Advance one frame; false once faded or out of bounds.
	fn step(&mut self, dt: f64, style: &WishStyle, bounds: Bounds) -> bool {
		self.trail.insert(0, (self.x, self.y));
		self.trail.truncate(style.trail_len);
		self.x += self.vx * dt * 60.0;
		self.y += self.vy * dt * 60.0;
		if self.y < bounds.height * style.fade_fraction {
			self.alpha -= style.fade_rate * dt * 60.0;
		}
		let inside = self.x > -RECYCLE_MARGIN
			&& self.x < bounds.width + RECYCLE_MARGIN
			&& self.y > -RECYCLE_MARGIN;
		self.alpha > 0.0 && inside
	}

	/// Recent positions, newest first.
	pub fn trail(&self) -> &[(f64, f64)] {
		&self.trail
	}
}

/// All in-flight wishes.
pub struct WishTrails {
	style: WishStyle,
	wishes: Vec<Wish>,
}

impl WishTrails {
	pub fn new(style: WishStyle) -> Self {
		Self {
			style,
			wishes: Vec::new(),
		}
	}

	/// Launch a wish from the clicked point. Empty or whitespace-only text
	/// creates nothing; reports whether a wish was launched.
	pub fn add_wish(&mut self, text: &str, x: f64, y: f64, rng: &mut RandomSource) -> bool {
		let text = text.trim();
		if text.is_empty() {
			return false;
		}
		let angle = -FRAC_PI_2 + rng.range(-self.style.spread, self.style.spread);
		self.wishes.push(Wish {
			text: text.to_string(),
			x,
			y,
			alpha: 1.0,
			vx: angle.cos() * self.style.speed,
			vy: angle.sin() * self.style.speed,
			trail: Vec::new(),
		});
		true
	}

	/// Advance every wish, dropping the finished.
	pub fn advance(&mut self, dt: f64, bounds: Bounds) {
		let style = &self.style;
		self.wishes.retain_mut(|wish| wish.step(dt, style, bounds));
	}

	pub fn wishes(&self) -> &[Wish] {
		&self.wishes
	}

	pub fn draw(&self, layer: &Layer) {
		layer.clear();
		let ctx = layer.ctx();
		ctx.set_line_cap("round");
		for wish in &self.wishes {
			draw_wish(ctx, wish, &self.style);
		}
	}
}

fn draw_wish(ctx: &CanvasRenderingContext2d, wish: &Wish, style: &WishStyle) {
	let trail = wish.trail();
	let mut prev = (wish.x, wish.y);
	for (i, &(tx, ty)) in trail.iter().enumerate() {
		let fade = 1.0 - i as f64 / (trail.len() as f64 + 1.0);
		ctx.set_stroke_style_str(&style.color.with_alpha(wish.alpha * fade * 0.7).to_css());
		ctx.set_line_width(2.0 * fade + 0.5);
		ctx.begin_path();
		ctx.move_to(prev.0, prev.1);
		ctx.line_to(tx, ty);
		ctx.stroke();
		prev = (tx, ty);
	}
	ctx.set_fill_style_str(&style.color.with_alpha(wish.alpha).to_css());
	ctx.begin_path();
	let _ = ctx.arc(wish.x, wish.y, 2.5, 0.0, TAU);
	ctx.fill();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::midnight::theme::MidnightTheme;

	const DT: f64 = 0.016;

	fn style() -> WishStyle {
		MidnightTheme::eve().wishes
	}

	#[test]
	fn blank_text_launches_nothing() {
		let mut rng = RandomSource::seeded(71);
		let mut trails = WishTrails::new(style());
		assert!(!trails.add_wish("", 100.0, 500.0, &mut rng));
		assert!(!trails.add_wish("  \n ", 100.0, 500.0, &mut rng));
		assert!(trails.wishes().is_empty());
	}

	#[test]
	fn fade_begins_only_above_the_threshold() {
		let style = style();
		let bounds = Bounds::new(800.0, 600.0);
		let mut rng = RandomSource::seeded(72);
		let mut trails = WishTrails::new(style.clone());

		// Launched near the bottom, well below the fade line.
		assert!(trails.add_wish("peace", 400.0, 580.0, &mut rng));
		trails.advance(DT, bounds);
		assert!((trails.wishes()[0].alpha - 1.0).abs() < 1e-12);

		// Climb until the wish crosses the fade line; opacity then decays.
		let fade_line = bounds.height * style.fade_fraction;
		for _ in 0..10_000 {
			trails.advance(DT, bounds);
			if trails.wishes().is_empty() {
				break;
			}
			let wish = &trails.wishes()[0];
			if wish.y < fade_line {
				assert!(wish.alpha < 1.0);
				break;
			}
			assert!((wish.alpha - 1.0).abs() < 1e-12);
		}
	}

	#[test]
	fn wishes_are_removed_permanently() {
		let bounds = Bounds::new(800.0, 600.0);
		let mut rng = RandomSource::seeded(73);
		let mut trails = WishTrails::new(style());
		assert!(trails.add_wish("health", 400.0, 580.0, &mut rng));

		// Long enough to climb out and fade entirely.
		for _ in 0..20_000 {
			trails.advance(DT, bounds);
		}
		assert!(trails.wishes().is_empty());
	}

	#[test]
	fn wish_text_is_trimmed_payload() {
		let mut rng = RandomSource::seeded(74);
		let mut trails = WishTrails::new(style());
		assert!(trails.add_wish("  a bright year  ", 10.0, 590.0, &mut rng));
		assert_eq!(trails.wishes()[0].text, "a bright year");
	}

	#[test]
	fn rapid_wishes_keep_click_order() {
		let mut rng = RandomSource::seeded(75);
		let mut trails = WishTrails::new(style());
		assert!(trails.add_wish("first", 100.0, 590.0, &mut rng));
		assert!(trails.add_wish("second", 200.0, 590.0, &mut rng));
		let texts: Vec<&str> = trails.wishes().iter().map(|w| w.text.as_str()).collect();
		assert_eq!(texts, ["first", "second"]);
	}
}
