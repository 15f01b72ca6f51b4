//! Firework bursts: ballistic sparks with fading trails.
//!
//! A burst is created atomically at one origin — a ring of evenly spaced
//! sparks sharing a primary color plus a smaller random-angle filler set —
//! and is dropped from the show exactly when its last spark fades out.
//! Sparks are finite: they die and are removed, never recycled.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::components::effects::clock::Countdown;
use crate::components::effects::color::Color;
use crate::components::effects::pool::Bounds;
use crate::components::effects::rng::RandomSource;
use crate::components::effects::surface::Layer;

use super::theme::FireworkStyle;

/// One ballistic spark.
#[derive(Clone, Debug)]
pub struct Spark {
	pub x: f64,
	pub y: f64,
	pub color: Color,
	pub alpha: f64,
	vx: f64,
	vy: f64,
	fade: f64,
	trail: Vec<(f64, f64)>,
}

impl Spark {
	fn new(x: f64, y: f64, angle: f64, speed: f64, color: Color, fade: f64) -> Self {
		Self {
			x,
			y,
			color,
			alpha: 1.0,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			fade,
			trail: Vec::new(),
		}
	}

	/// Advance one frame; false once fully faded.
	fn step(&mut self, dt: f64, style: &FireworkStyle) -> bool {
		self.trail.insert(0, (self.x, self.y));
		self.trail.truncate(style.trail_len);
		self.vx *= style.friction;
		self.vy = self.vy * style.friction + style.gravity * dt * 60.0;
		self.x += self.vx * dt * 60.0;
		self.y += self.vy * dt * 60.0;
		self.alpha -= self.fade * dt * 60.0;
		self.alpha > 0.0
	}

	/// Recent positions, newest first.
	pub fn trail(&self) -> &[(f64, f64)] {
		&self.trail
	}
}

/// A transient group of sparks spawned together from one origin.
pub struct Burst {
	sparks: Vec<Spark>,
}

impl Burst {
	/// Generate the full spark set for an explosion at `(x, y)`.
	pub fn launch(x: f64, y: f64, style: &FireworkStyle, rng: &mut RandomSource) -> Self {
		let primary = style.palette.random(rng);
		let mut sparks = Vec::with_capacity(style.ring_count + style.filler_count);
		for i in 0..style.ring_count {
			let angle = i as f64 / style.ring_count as f64 * TAU
				+ rng.range(-style.ring_jitter, style.ring_jitter);
			let speed = rng.range(style.speed_min, style.speed_max);
			let fade = rng.range(style.fade_min, style.fade_max);
			sparks.push(Spark::new(x, y, angle, speed, primary, fade));
		}
		for _ in 0..style.filler_count {
			let angle = rng.range(0.0, TAU);
			let speed =
				rng.range(style.speed_min, style.speed_max) * style.filler_speed_scale;
			let fade = rng.range(style.fade_min, style.fade_max);
			let color = style.palette.random(rng);
			sparks.push(Spark::new(x, y, angle, speed, color, fade));
		}
		Self { sparks }
	}

	/// Step every spark, dropping the dead. A no-op once the burst is spent.
	pub fn advance(&mut self, dt: f64, style: &FireworkStyle) {
		self.sparks.retain_mut(|spark| spark.step(dt, style));
	}

	/// Dead and evictable: every spark has faded.
	pub fn is_spent(&self) -> bool {
		self.sparks.is_empty()
	}

	pub fn sparks(&self) -> &[Spark] {
		&self.sparks
	}
}

struct AutoLaunch {
	window: Countdown,
	next: Countdown,
}

/// Owns all live bursts plus the auto-launch policy.
pub struct FireworkShow {
	style: FireworkStyle,
	bursts: Vec<Burst>,
	auto: Option<AutoLaunch>,
}

impl FireworkShow {
	pub fn new(style: FireworkStyle) -> Self {
		Self {
			style,
			bursts: Vec::new(),
			auto: None,
		}
	}

	/// Fire a burst at an explicit point.
	pub fn launch_at(&mut self, x: f64, y: f64, rng: &mut RandomSource) {
		self.bursts.push(Burst::launch(x, y, &self.style, rng));
	}

	/// Fire a burst somewhere in the upper canvas.
	pub fn launch_random(&mut self, bounds: Bounds, rng: &mut RandomSource) {
		let x = rng.range(bounds.width * 0.15, bounds.width * 0.85);
		let y = rng.range(bounds.height * 0.1, bounds.height * 0.5);
		self.launch_at(x, y, rng);
	}

	/// Begin firing random bursts at random intervals for the configured
	/// window, after which the show stops on its own.
	pub fn start_auto(&mut self, rng: &mut RandomSource) {
		let first = rng.range(self.style.auto_interval_min, self.style.auto_interval_max);
		self.auto = Some(AutoLaunch {
			window: Countdown::new(self.style.auto_window),
			next: Countdown::new(first),
		});
	}

	/// Cancel auto-launch; live bursts keep fading.
	pub fn stop_auto(&mut self) {
		self.auto = None;
	}

	pub fn auto_active(&self) -> bool {
		self.auto.is_some()
	}

	/// Advance the auto-launch policy and every live burst, evicting spent
	/// bursts.
	pub fn advance(&mut self, dt: f64, bounds: Bounds, rng: &mut RandomSource) {
		let mut stop = false;
		let mut launch = false;
		if let Some(auto) = &mut self.auto {
			if auto.window.tick(dt) {
				stop = true;
			} else if auto.next.tick(dt) {
				launch = true;
				let interval =
					rng.range(self.style.auto_interval_min, self.style.auto_interval_max);
				auto.next.rearm(interval);
			}
		}
		if stop {
			self.auto = None;
		}
		if launch {
			self.launch_random(bounds, rng);
		}

		for burst in &mut self.bursts {
			burst.advance(dt, &self.style);
		}
		self.bursts.retain(|burst| !burst.is_spent());
	}

	pub fn bursts(&self) -> &[Burst] {
		&self.bursts
	}

	pub fn draw(&self, layer: &Layer) {
		layer.clear();
		let ctx = layer.ctx();
		ctx.set_line_cap("round");
		for burst in &self.bursts {
			for spark in burst.sparks() {
				draw_spark(ctx, spark);
			}
		}
	}
}

fn draw_spark(ctx: &CanvasRenderingContext2d, spark: &Spark) {
	// Trail, newest segment brightest.
	let trail = spark.trail();
	let mut prev = (spark.x, spark.y);
	for (i, &(tx, ty)) in trail.iter().enumerate() {
		let fade = 1.0 - i as f64 / (trail.len() as f64 + 1.0);
		let alpha = (spark.alpha * fade * 0.6).max(0.0);
		ctx.set_stroke_style_str(&spark.color.with_alpha(alpha).to_css());
		ctx.set_line_width(1.5);
		ctx.begin_path();
		ctx.move_to(prev.0, prev.1);
		ctx.line_to(tx, ty);
		ctx.stroke();
		prev = (tx, ty);
	}
	// Head.
	ctx.set_fill_style_str(&spark.color.with_alpha(spark.alpha.max(0.0)).to_css());
	ctx.begin_path();
	let _ = ctx.arc(spark.x, spark.y, 2.0, 0.0, TAU);
	ctx.fill();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::midnight::theme::MidnightTheme;

	const DT: f64 = 0.016;

	fn style() -> FireworkStyle {
		MidnightTheme::eve().fireworks
	}

	#[test]
	fn burst_spark_count_is_ring_plus_filler() {
		let style = style();
		let mut rng = RandomSource::seeded(61);
		let burst = Burst::launch(400.0, 200.0, &style, &mut rng);
		assert_eq!(burst.sparks().len(), style.ring_count + style.filler_count);
	}

	#[test]
	fn burst_dies_when_every_spark_fades() {
		let style = style();
		let mut rng = RandomSource::seeded(62);
		let mut burst = Burst::launch(400.0, 200.0, &style, &mut rng);

		// Slowest possible fade bounds the lifetime.
		let max_steps = (1.0 / (style.fade_min * DT * 60.0)).ceil() as usize + 1;
		let mut steps = 0;
		while !burst.is_spent() {
			burst.advance(DT, &style);
			steps += 1;
			assert!(steps <= max_steps);
		}

		// Advancing a spent burst stays a no-op.
		burst.advance(DT, &style);
		assert!(burst.is_spent());
		assert!(burst.sparks().is_empty());
	}

	#[test]
	fn gravity_pulls_and_friction_damps() {
		let style = style();
		let mut rng = RandomSource::seeded(63);
		let mut burst = Burst::launch(0.0, 0.0, &style, &mut rng);
		let before: Vec<(f64, f64)> = burst.sparks().iter().map(|s| (s.vx, s.vy)).collect();
		for _ in 0..30 {
			burst.advance(DT, &style);
		}
		for (spark, (vx0, vy0)) in burst.sparks().iter().zip(before) {
			// Upward sparks arc over; horizontal speed only ever bleeds off.
			if vy0 <= 0.0 {
				assert!(spark.vy > vy0);
			}
			assert!(spark.vx.abs() <= vx0.abs());
		}
	}

	#[test]
	fn auto_launch_fires_within_its_window_then_stops() {
		let style = style();
		let mut rng = RandomSource::seeded(64);
		let bounds = Bounds::new(800.0, 600.0);
		let mut show = FireworkShow::new(style.clone());

		show.start_auto(&mut rng);
		assert!(show.auto_active());

		// Two seconds in, at least one burst has fired.
		let mut fired = 0;
		for _ in 0..125 {
			let before = show.bursts().len();
			show.advance(DT, bounds, &mut rng);
			if show.bursts().len() > before {
				fired += 1;
			}
		}
		assert!(fired >= 1);

		// Run past the window plus the longest burst lifetime: the show is
		// over and stays over.
		let settle = ((style.auto_window + 3.0) / DT) as usize;
		for _ in 0..settle {
			show.advance(DT, bounds, &mut rng);
		}
		assert!(!show.auto_active());
		assert!(show.bursts().is_empty());
		show.advance(DT, bounds, &mut rng);
		assert!(show.bursts().is_empty());
	}

	#[test]
	fn stop_auto_cancels_immediately() {
		let style = style();
		let mut rng = RandomSource::seeded(65);
		let mut show = FireworkShow::new(style);
		show.start_auto(&mut rng);
		show.stop_auto();
		assert!(!show.auto_active());
		let bounds = Bounds::new(800.0, 600.0);
		for _ in 0..500 {
			show.advance(DT, bounds, &mut rng);
		}
		assert!(show.bursts().is_empty());
	}

	#[test]
	fn manual_launch_is_independent_of_auto() {
		let style = style();
		let mut rng = RandomSource::seeded(66);
		let mut show = FireworkShow::new(style);
		show.launch_at(100.0, 100.0, &mut rng);
		show.launch_at(200.0, 150.0, &mut rng);
		assert_eq!(show.bursts().len(), 2);
	}
}
