//! The procedural gratitude tree.
//!
//! The trunk-and-branch structure is never materialized: every draw re-traces
//! the recursion from scratch with a per-structure seed, so the silhouette is
//! stable across frames and re-randomizes only when the seed does (resize).
//! User-added gratitude leaves are the only retained state; they grow in by
//! exponential approach and persist for the page session.

use std::f64::consts::{FRAC_PI_2, TAU};

use web_sys::CanvasRenderingContext2d;

use crate::components::effects::color::Color;
use crate::components::effects::pool::Bounds;
use crate::components::effects::rng::{RandomSource, approach, ease_factor};
use crate::components::effects::surface::Layer;

use super::theme::TreeStyle;

/// Hard recursion cap. Thresholds normally stop the recursion well before
/// this; the cap guards against misconfigured falloff factors.
pub const MAX_BRANCH_DEPTH: u32 = 10;

/// Depth bound implied by a geometric length falloff: the recursion cannot
/// go deeper than `log(min_length / start_length) / log(falloff)` levels.
pub fn depth_bound(start_length: f64, min_length: f64, falloff: f64) -> u32 {
	if !(falloff > 0.0 && falloff < 1.0) || min_length <= 0.0 || start_length <= min_length {
		return 0;
	}
	((min_length / start_length).ln() / falloff.ln()).ceil() as u32
}

/// One traced branch segment. Terminal segments end in a leaf glyph.
#[derive(Clone, Copy, Debug)]
pub struct BranchSegment {
	pub x0: f64,
	pub y0: f64,
	pub x1: f64,
	pub y1: f64,
	pub thickness: f64,
	pub depth: u32,
	pub terminal: bool,
}

/// Recursively trace the branch structure, feeding segments to `emit` in
/// draw order. Structure is deterministic for a given random source.
#[allow(clippy::too_many_arguments)]
pub fn trace_branch(
	style: &TreeStyle,
	rng: &mut RandomSource,
	x: f64,
	y: f64,
	length: f64,
	angle: f64,
	thickness: f64,
	depth: u32,
	cap: u32,
	emit: &mut impl FnMut(BranchSegment),
) {
	let x1 = x + angle.cos() * length;
	let y1 = y + angle.sin() * length;
	let terminal =
		length < style.min_length || thickness < style.min_thickness || depth >= cap;
	emit(BranchSegment {
		x0: x,
		y0: y,
		x1,
		y1,
		thickness,
		depth,
		terminal,
	});
	if terminal {
		return;
	}

	let child_length = length * style.length_falloff;
	let child_thickness = thickness * style.thickness_falloff;
	let left = angle - style.branch_angle + rng.range(-style.jitter, style.jitter);
	let right = angle + style.branch_angle + rng.range(-style.jitter, style.jitter);
	trace_branch(
		style,
		rng,
		x1,
		y1,
		child_length,
		left,
		child_thickness,
		depth + 1,
		cap,
		emit,
	);
	trace_branch(
		style,
		rng,
		x1,
		y1,
		child_length,
		right,
		child_thickness,
		depth + 1,
		cap,
		emit,
	);
	if rng.chance(style.filler_chance) {
		let filler = angle + rng.range(-style.branch_angle, style.branch_angle);
		trace_branch(
			style,
			rng,
			x1,
			y1,
			child_length * 0.7,
			filler,
			child_thickness * 0.7,
			depth + 1,
			cap,
			emit,
		);
	}
}

/// A user-submitted gratitude leaf, easing from nothing toward its target
/// size and opacity.
#[derive(Clone, Debug)]
pub struct GratitudeLeaf {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub alpha: f64,
	pub target_size: f64,
	pub target_alpha: f64,
	pub color: Color,
	pub phase: f64,
}

/// Tree renderer plus the session's gratitude leaves.
pub struct GratitudeTree {
	style: TreeStyle,
	structure_seed: u64,
	leaves: Vec<GratitudeLeaf>,
}

impl GratitudeTree {
	pub fn new(style: TreeStyle, rng: &mut RandomSource) -> Self {
		Self {
			style,
			structure_seed: rng.fork_seed(),
			leaves: Vec::new(),
		}
	}

	/// Re-randomize the branch structure (called on resize).
	pub fn reseed(&mut self, rng: &mut RandomSource) {
		self.structure_seed = rng.fork_seed();
	}

	/// Append a gratitude leaf at the clicked point. Empty or whitespace-only
	/// text creates nothing; reports whether a leaf was added.
	pub fn add_leaf(&mut self, text: &str, x: f64, y: f64, rng: &mut RandomSource) -> bool {
		let text = text.trim();
		if text.is_empty() {
			return false;
		}
		self.leaves.push(GratitudeLeaf {
			text: text.to_string(),
			x,
			y,
			size: 0.0,
			alpha: 0.0,
			target_size: rng.range(self.style.grown_size_min, self.style.grown_size_max),
			target_alpha: rng.range(self.style.grown_alpha_min, self.style.grown_alpha_max),
			color: self.style.leaf_palette.random(rng),
			phase: rng.range(0.0, TAU),
		});
		true
	}

	/// Ease every gratitude leaf toward its grown state.
	pub fn tick(&mut self, dt: f64) {
		let factor = ease_factor(self.style.grow_speed, dt);
		for leaf in &mut self.leaves {
			leaf.size = approach(leaf.size, leaf.target_size, factor);
			leaf.alpha = approach(leaf.alpha, leaf.target_alpha, factor);
		}
	}

	pub fn leaves(&self) -> &[GratitudeLeaf] {
		&self.leaves
	}

	pub fn draw(&self, layer: &Layer, bounds: Bounds, time: f64) {
		layer.clear();
		let ctx = layer.ctx();
		let trunk_length = bounds.height * self.style.trunk_fraction;
		let cap =
			depth_bound(trunk_length, self.style.min_length, self.style.length_falloff)
				.min(MAX_BRANCH_DEPTH);

		let mut structure = RandomSource::seeded(self.structure_seed);
		let mut segments = Vec::new();
		trace_branch(
			&self.style,
			&mut structure,
			bounds.width / 2.0,
			bounds.height,
			trunk_length,
			-FRAC_PI_2,
			self.style.trunk_thickness,
			0,
			cap,
			&mut |segment| segments.push(segment),
		);

		ctx.set_line_cap("round");
		ctx.set_stroke_style_str(&self.style.bark.to_css());
		for segment in &segments {
			ctx.set_line_width(segment.thickness);
			ctx.begin_path();
			ctx.move_to(segment.x0, segment.y0);
			ctx.line_to(segment.x1, segment.y1);
			ctx.stroke();
		}

		// Glyph presentation rides a derived seed so the canopy holds still
		// between frames and re-randomizes with the structure.
		let mut glyphs = RandomSource::seeded(self.structure_seed ^ 0x9e37_79b9);
		for segment in segments.iter().filter(|s| s.terminal) {
			draw_glyph(ctx, &self.style, &mut glyphs, segment.x1, segment.y1);
		}

		for leaf in &self.leaves {
			draw_gratitude_leaf(ctx, leaf, time);
		}
	}
}

fn draw_glyph(
	ctx: &CanvasRenderingContext2d,
	style: &TreeStyle,
	rng: &mut RandomSource,
	x: f64,
	y: f64,
) {
	let radius = rng.range(style.glyph_min, style.glyph_max);
	let color = style.leaf_palette.random(rng);
	ctx.set_global_alpha(rng.range(0.5, 0.9));
	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, TAU);
	ctx.fill();
	ctx.set_global_alpha(1.0);
}

fn draw_gratitude_leaf(ctx: &CanvasRenderingContext2d, leaf: &GratitudeLeaf, time: f64) {
	if leaf.alpha <= 0.01 {
		return;
	}
	let sway = (time * 0.8 + leaf.phase).sin() * 2.0;
	ctx.save();
	let _ = ctx.translate(leaf.x + sway, leaf.y);
	ctx.set_global_alpha(leaf.alpha);
	ctx.set_fill_style_str(&leaf.color.to_css());
	ctx.begin_path();
	let _ = ctx.ellipse(0.0, 0.0, leaf.size, leaf.size * 0.7, 0.4, 0.0, TAU);
	ctx.fill();
	if leaf.size > 8.0 {
		ctx.set_fill_style_str("rgba(255, 248, 230, 0.9)");
		ctx.set_font("11px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&leaf.text, 0.0, leaf.size + 14.0);
	}
	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::harvest::theme::HarvestTheme;

	const DT: f64 = 0.016;

	fn style() -> TreeStyle {
		HarvestTheme::dusk().tree
	}

	#[test]
	fn recursion_depth_is_bounded() {
		let style = style();
		let trunk = 480.0 * style.trunk_fraction;
		let bound = depth_bound(trunk, style.min_length, style.length_falloff);
		assert!(bound > 0 && bound <= MAX_BRANCH_DEPTH);

		let mut rng = RandomSource::seeded(17);
		let mut max_depth = 0;
		let mut segments = 0usize;
		trace_branch(
			&style,
			&mut rng,
			320.0,
			480.0,
			trunk,
			-FRAC_PI_2,
			style.trunk_thickness,
			0,
			bound.min(MAX_BRANCH_DEPTH),
			&mut |segment| {
				max_depth = max_depth.max(segment.depth);
				segments += 1;
			},
		);
		assert!(max_depth <= bound);
		assert!(segments > 1);
	}

	#[test]
	fn pathological_falloff_still_terminates() {
		let mut style = style();
		// A falloff this close to 1 barely shrinks anything, so the length
		// and thickness thresholds are useless; the explicit cap has to stop
		// the recursion.
		style.length_falloff = 0.999;
		style.thickness_falloff = 0.999;
		let implied = depth_bound(100.0, style.min_length, style.length_falloff);
		assert!(implied > MAX_BRANCH_DEPTH);

		let cap = implied.min(MAX_BRANCH_DEPTH);
		let mut rng = RandomSource::seeded(1);
		let mut max_depth = 0;
		trace_branch(
			&style,
			&mut rng,
			0.0,
			0.0,
			100.0,
			-FRAC_PI_2,
			style.trunk_thickness,
			0,
			cap,
			&mut |segment| max_depth = max_depth.max(segment.depth),
		);
		assert_eq!(max_depth, MAX_BRANCH_DEPTH);
	}

	#[test]
	fn added_leaf_grows_without_overshoot() {
		let mut rng = RandomSource::seeded(31);
		let mut tree = GratitudeTree::new(style(), &mut rng);
		assert!(tree.add_leaf("Family", 120.0, 200.0, &mut rng));
		assert_eq!(tree.leaves().len(), 1);

		tree.tick(DT);
		let leaf = &tree.leaves()[0];
		assert!(leaf.size > 0.0 && leaf.size < leaf.target_size);
		assert!(leaf.alpha > 0.0 && leaf.alpha < leaf.target_alpha);

		for _ in 0..10_000 {
			tree.tick(DT);
		}
		let leaf = &tree.leaves()[0];
		assert!(leaf.size <= leaf.target_size);
		assert!(leaf.alpha <= leaf.target_alpha);
		assert!((leaf.size - leaf.target_size).abs() < 0.01);
	}

	#[test]
	fn blank_text_creates_nothing() {
		let mut rng = RandomSource::seeded(32);
		let mut tree = GratitudeTree::new(style(), &mut rng);
		assert!(!tree.add_leaf("", 10.0, 10.0, &mut rng));
		assert!(!tree.add_leaf("   \t ", 10.0, 10.0, &mut rng));
		assert!(tree.leaves().is_empty());
	}

	#[test]
	fn leaf_text_is_trimmed_payload() {
		let mut rng = RandomSource::seeded(33);
		let mut tree = GratitudeTree::new(style(), &mut rng);
		assert!(tree.add_leaf("  good health  ", 10.0, 10.0, &mut rng));
		assert_eq!(tree.leaves()[0].text, "good health");
	}
}
