//! Visual styling for the harvest scene.
//!
//! One style struct per particle system, the way each visual concern gets its
//! own configuration block. All motion constants are pixels per tick at a
//! nominal 60 fps; phase speeds are radians per second.

use crate::components::effects::clock::TierCounts;
use crate::components::effects::color::{Color, Palette};

/// Falling-leaf styling and physics constants.
#[derive(Clone, Debug)]
pub struct LeafStyle {
	pub counts: TierCounts,
	pub size_min: f64,
	pub size_max: f64,
	/// Base fall speed band, scaled by depth.
	pub fall_min: f64,
	pub fall_max: f64,
	/// Constant downward pull added to every leaf's fall speed.
	pub gravity: f64,
	/// Base horizontal drift band (either direction).
	pub drift_max: f64,
	/// Amplitude of the per-leaf sway oscillation.
	pub sway_amp: f64,
	pub sway_freq_min: f64,
	pub sway_freq_max: f64,
	/// Amplitude of the slow shared turbulence term.
	pub turbulence: f64,
	/// Rotation speed band in radians per second (either direction).
	pub spin_max: f64,
	/// Nearest-plane depth is 1.0; this is the farthest plane.
	pub depth_min: f64,
	pub palette: Palette,
}

/// Wind gust behavior shared by the whole leaf pool.
#[derive(Clone, Debug)]
pub struct WindStyle {
	/// Strongest gust in either direction.
	pub max_gust: f64,
	pub gust_secs_min: f64,
	pub gust_secs_max: f64,
	/// Exponential smoothing speed toward the gust target.
	pub ease_speed: f64,
}

/// Rising-ember styling.
#[derive(Clone, Debug)]
pub struct EmberStyle {
	pub counts: TierCounts,
	pub size_min: f64,
	pub size_max: f64,
	pub rise_min: f64,
	pub rise_max: f64,
	/// Horizontal drift band (either direction).
	pub drift_max: f64,
	/// Flicker-driven horizontal wobble amplitude.
	pub wobble: f64,
	pub flicker_speed_min: f64,
	pub flicker_speed_max: f64,
	/// Linear life decay band, life units per tick.
	pub decay_min: f64,
	pub decay_max: f64,
	pub alpha_min: f64,
	pub alpha_max: f64,
	/// Outer glow color.
	pub glow: Color,
	/// Bright center color.
	pub core: Color,
}

/// Procedural tree shape and gratitude-leaf styling.
#[derive(Clone, Debug)]
pub struct TreeStyle {
	/// Trunk length as a fraction of canvas height.
	pub trunk_fraction: f64,
	pub trunk_thickness: f64,
	/// Child branches fork at `angle ± branch_angle`.
	pub branch_angle: f64,
	pub length_falloff: f64,
	pub thickness_falloff: f64,
	pub min_length: f64,
	pub min_thickness: f64,
	/// Per-call random angular jitter.
	pub jitter: f64,
	/// Probability of a third, smaller filler branch.
	pub filler_chance: f64,
	pub bark: Color,
	pub leaf_palette: Palette,
	/// Terminal glyph radius band.
	pub glyph_min: f64,
	pub glyph_max: f64,
	/// Gratitude-leaf target size band.
	pub grown_size_min: f64,
	pub grown_size_max: f64,
	pub grown_alpha_min: f64,
	pub grown_alpha_max: f64,
	/// Exponential approach speed for the grow-in animation, per second.
	pub grow_speed: f64,
}

/// Complete harvest-scene theme.
#[derive(Clone, Debug)]
pub struct HarvestTheme {
	pub leaves: LeafStyle,
	pub wind: WindStyle,
	pub embers: EmberStyle,
	pub tree: TreeStyle,
}

impl HarvestTheme {
	/// Warm late-autumn dusk, the scene's only shipped look.
	pub fn dusk() -> Self {
		Self {
			leaves: LeafStyle {
				counts: TierCounts::new(40, 14),
				size_min: 6.0,
				size_max: 14.0,
				fall_min: 0.5,
				fall_max: 1.3,
				gravity: 0.2,
				drift_max: 0.3,
				sway_amp: 0.5,
				sway_freq_min: 0.6,
				sway_freq_max: 1.8,
				turbulence: 0.15,
				spin_max: 1.4,
				depth_min: 0.35,
				palette: Palette::new(vec![
					Color::rgb(166, 60, 26),  // Rust red
					Color::rgb(196, 98, 26),  // Burnt orange
					Color::rgb(214, 140, 38), // Amber
					Color::rgb(224, 176, 66), // Goldenrod
					Color::rgb(140, 74, 32),  // Chestnut
					Color::rgb(110, 52, 28),  // Russet
				]),
			},
			wind: WindStyle {
				max_gust: 0.6,
				gust_secs_min: 2.0,
				gust_secs_max: 6.0,
				ease_speed: 1.2,
			},
			embers: EmberStyle {
				counts: TierCounts::new(24, 8),
				size_min: 1.5,
				size_max: 3.5,
				rise_min: 0.6,
				rise_max: 1.6,
				drift_max: 0.2,
				wobble: 0.3,
				flicker_speed_min: 3.0,
				flicker_speed_max: 9.0,
				decay_min: 0.002,
				decay_max: 0.005,
				alpha_min: 0.5,
				alpha_max: 0.9,
				glow: Color::rgb(226, 110, 40),
				core: Color::rgb(255, 214, 140),
			},
			tree: TreeStyle {
				trunk_fraction: 0.22,
				trunk_thickness: 12.0,
				branch_angle: 0.45,
				length_falloff: 0.72,
				thickness_falloff: 0.7,
				min_length: 8.0,
				min_thickness: 1.2,
				jitter: 0.12,
				filler_chance: 0.25,
				bark: Color::rgb(74, 48, 34),
				leaf_palette: Palette::new(vec![
					Color::rgb(186, 82, 30),  // Ember orange
					Color::rgb(212, 130, 40), // Harvest gold
					Color::rgb(158, 52, 32),  // Deep red
					Color::rgb(226, 186, 84), // Pale gold
				]),
				glyph_min: 2.5,
				glyph_max: 5.0,
				grown_size_min: 10.0,
				grown_size_max: 18.0,
				grown_alpha_min: 0.75,
				grown_alpha_max: 0.95,
				grow_speed: 4.0,
			},
		}
	}
}

impl Default for HarvestTheme {
	fn default() -> Self {
		Self::dusk()
	}
}
