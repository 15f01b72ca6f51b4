//! Shared particle toolkit.
//!
//! Everything the scene components have in common: a seeded random source,
//! colors and palettes, the recycling pool, frame-delta timers, the load
//! tier, and canvas layer binding. The per-scene particle variants live next
//! to their scenes under `harvest` and `midnight`.

pub mod clock;
pub mod color;
pub mod pool;
pub mod rng;
pub mod surface;
