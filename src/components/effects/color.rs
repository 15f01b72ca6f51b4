//! Color representation and curated palettes for particle rendering.

use super::rng::RandomSource;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A fixed set of colors a particle variant draws from at respawn.
#[derive(Clone, Debug)]
pub struct Palette {
	pub colors: Vec<Color>,
}

impl Palette {
	pub fn new(colors: Vec<Color>) -> Self {
		Self { colors }
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	/// Uniformly random member of the palette.
	pub fn random(&self, rng: &mut RandomSource) -> Color {
		self.colors[rng.index(self.colors.len())]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_forms() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(10, 20, 30, 0.5).to_css(), "rgba(10, 20, 30, 0.5)");
	}

	#[test]
	fn palette_random_is_a_member() {
		let palette = Palette::new(vec![
			Color::rgb(1, 2, 3),
			Color::rgb(4, 5, 6),
			Color::rgb(7, 8, 9),
		]);
		let mut rng = RandomSource::seeded(11);
		for _ in 0..50 {
			let c = palette.random(&mut rng);
			assert!(palette.colors.contains(&c));
		}
	}
}
