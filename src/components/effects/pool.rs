//! Fixed-capacity recycling pools.
//!
//! A pool owns an ordered collection of one particle variant. Members that
//! drift past the recycle boundary are reset to a fresh spawn state in place;
//! the pool never grows or shrinks mid-flight. Count changes (degradation
//! tiers) only take effect when a pool is next constructed.

/// Canvas extent a pool spawns and recycles within, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Off-screen slack before a particle recycles, so resets happen out of view
/// rather than popping at the visible edge.
pub const RECYCLE_MARGIN: f64 = 80.0;

/// What a particle's step decided about its own fate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
	Keep,
	Recycle,
}

/// Ordered, fixed-size collection of one particle variant.
///
/// Order is render order only; variants that need depth occlusion sort before
/// drawing via [`Pool::sort_by`].
pub struct Pool<P> {
	members: Vec<P>,
	bounds: Bounds,
}

impl<P> Pool<P> {
	/// Create `count` members via the spawn closure.
	pub fn new(count: usize, bounds: Bounds, mut spawn: impl FnMut(Bounds) -> P) -> Self {
		let mut members = Vec::with_capacity(count);
		for _ in 0..count {
			members.push(spawn(bounds));
		}
		Self { members, bounds }
	}

	/// Step every member; members reporting [`Fate::Recycle`] are respawned
	/// in place rather than removed.
	pub fn advance(
		&mut self,
		mut step: impl FnMut(&mut P, Bounds) -> Fate,
		mut respawn: impl FnMut(&mut P, Bounds),
	) {
		for member in &mut self.members {
			if step(member, self.bounds) == Fate::Recycle {
				respawn(member, self.bounds);
			}
		}
	}

	/// Re-order members by an ascending render key.
	pub fn sort_by(&mut self, key: impl Fn(&P) -> f64) {
		self.members.sort_by(|a, b| key(a).total_cmp(&key(b)));
	}

	pub fn members(&self) -> &[P] {
		&self.members
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Faller {
		y: f64,
	}

	fn spawn(_: Bounds) -> Faller {
		Faller { y: -10.0 }
	}

	fn step(p: &mut Faller, b: Bounds) -> Fate {
		p.y += 50.0;
		if p.y > b.height + RECYCLE_MARGIN {
			Fate::Recycle
		} else {
			Fate::Keep
		}
	}

	#[test]
	fn recycled_member_returns_to_spawn_state() {
		let mut pool = Pool::new(8, Bounds::new(400.0, 300.0), spawn);
		for _ in 0..20 {
			pool.advance(step, |p, _| *p = Faller { y: -10.0 });
		}
		// Every member is either inside the recycle boundary or freshly
		// respawned; none continued past it.
		for p in pool.members() {
			assert!(p.y <= 300.0 + RECYCLE_MARGIN);
		}
	}

	#[test]
	fn pool_size_is_fixed() {
		let mut pool = Pool::new(5, Bounds::new(100.0, 100.0), spawn);
		for _ in 0..100 {
			pool.advance(step, |p, _| *p = Faller { y: -10.0 });
		}
		assert_eq!(pool.len(), 5);
	}

	#[test]
	fn sort_orders_ascending() {
		let mut next = 0.0;
		let mut pool = Pool::new(4, Bounds::new(10.0, 10.0), |_| {
			next += 10.0;
			Faller { y: next }
		});
		pool.sort_by(|p| -p.y);
		let keys: Vec<f64> = pool.members().iter().map(|p| p.y).collect();
		assert_eq!(keys, [40.0, 30.0, 20.0, 10.0]);
	}
}
