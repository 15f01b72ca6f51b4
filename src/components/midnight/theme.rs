//! Visual styling for the midnight scene.
//!
//! Motion constants are pixels per tick at a nominal 60 fps; phase speeds are
//! radians per second.

use crate::components::effects::clock::TierCounts;
use crate::components::effects::color::{Color, Palette};

/// Twinkling starfield styling.
#[derive(Clone, Debug)]
pub struct StarStyle {
	pub counts: TierCounts,
	pub size_min: f64,
	pub size_max: f64,
	pub alpha_min: f64,
	pub alpha_max: f64,
	pub twinkle_min: f64,
	pub twinkle_max: f64,
	pub color: Color,
}

/// Ambient drifting-particle styling.
#[derive(Clone, Debug)]
pub struct AmbientStyle {
	pub counts: TierCounts,
	pub rise_min: f64,
	pub rise_max: f64,
	pub wobble_amp: f64,
	pub wobble_freq_min: f64,
	pub wobble_freq_max: f64,
	pub size_min: f64,
	pub size_max: f64,
	pub alpha_min: f64,
	pub alpha_max: f64,
	/// Rotation speed band for confetti, radians per second.
	pub spin_max: f64,
	/// Probability a respawn becomes a sparkle; then a blossom; the rest are
	/// confetti.
	pub sparkle_chance: f64,
	pub blossom_chance: f64,
	pub palette: Palette,
}

/// Firework burst styling and spark physics.
#[derive(Clone, Debug)]
pub struct FireworkStyle {
	/// Evenly spaced sparks in the main ring.
	pub ring_count: usize,
	/// Additional fully-random-angle sparks for fill texture.
	pub filler_count: usize,
	/// Per-spark angular jitter on the ring.
	pub ring_jitter: f64,
	pub speed_min: f64,
	pub speed_max: f64,
	/// Filler sparks launch slower than the ring.
	pub filler_speed_scale: f64,
	/// Downward pull per tick.
	pub gravity: f64,
	/// Velocity damping factor per tick.
	pub friction: f64,
	/// Linear opacity fade band per tick.
	pub fade_min: f64,
	pub fade_max: f64,
	pub trail_len: usize,
	pub palette: Palette,
	pub auto_interval_min: f64,
	pub auto_interval_max: f64,
	/// Total auto-launch window in seconds.
	pub auto_window: f64,
}

/// Shooting-star wish styling.
#[derive(Clone, Debug)]
pub struct WishStyle {
	pub speed: f64,
	/// Angular spread around straight up, radians.
	pub spread: f64,
	pub trail_len: usize,
	/// A wish starts fading once above this fraction of canvas height.
	pub fade_fraction: f64,
	/// Linear opacity fade per tick once fading.
	pub fade_rate: f64,
	pub color: Color,
}

/// Complete midnight-scene theme.
#[derive(Clone, Debug)]
pub struct MidnightTheme {
	pub stars: StarStyle,
	pub ambient: AmbientStyle,
	pub fireworks: FireworkStyle,
	pub wishes: WishStyle,
}

impl MidnightTheme {
	/// New year's eve over a warm tropical night.
	pub fn eve() -> Self {
		Self {
			stars: StarStyle {
				counts: TierCounts::new(120, 50),
				size_min: 0.5,
				size_max: 1.8,
				alpha_min: 0.3,
				alpha_max: 0.9,
				twinkle_min: 0.8,
				twinkle_max: 3.5,
				color: Color::rgb(235, 240, 255),
			},
			ambient: AmbientStyle {
				counts: TierCounts::new(30, 10),
				rise_min: 0.2,
				rise_max: 0.8,
				wobble_amp: 0.4,
				wobble_freq_min: 0.5,
				wobble_freq_max: 1.6,
				size_min: 3.0,
				size_max: 8.0,
				alpha_min: 0.25,
				alpha_max: 0.7,
				spin_max: 2.0,
				sparkle_chance: 0.4,
				blossom_chance: 0.3,
				palette: Palette::new(vec![
					Color::rgb(255, 183, 77),  // Mango
					Color::rgb(244, 143, 177), // Hibiscus pink
					Color::rgb(129, 212, 250), // Lagoon blue
					Color::rgb(255, 241, 118), // Sunlit yellow
					Color::rgb(174, 213, 129), // Palm green
				]),
			},
			fireworks: FireworkStyle {
				ring_count: 24,
				filler_count: 10,
				ring_jitter: 0.06,
				speed_min: 1.6,
				speed_max: 3.4,
				filler_speed_scale: 0.7,
				gravity: 0.035,
				friction: 0.985,
				fade_min: 0.008,
				fade_max: 0.014,
				trail_len: 6,
				palette: Palette::new(vec![
					Color::rgb(255, 82, 82),   // Scarlet
					Color::rgb(255, 171, 64),  // Amber
					Color::rgb(255, 238, 88),  // Gold
					Color::rgb(105, 240, 174), // Spring green
					Color::rgb(64, 196, 255),  // Sky blue
					Color::rgb(179, 136, 255), // Violet
					Color::rgb(255, 128, 171), // Rose
					Color::rgb(255, 255, 255), // White
				]),
				auto_interval_min: 0.4,
				auto_interval_max: 1.4,
				auto_window: 20.0,
			},
			wishes: WishStyle {
				speed: 4.0,
				spread: 0.35,
				trail_len: 10,
				fade_fraction: 0.45,
				fade_rate: 0.02,
				color: Color::rgb(255, 249, 196),
			},
		}
	}
}

impl Default for MidnightTheme {
	fn default() -> Self {
		Self::eve()
	}
}
