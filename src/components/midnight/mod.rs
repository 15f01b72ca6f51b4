//! The midnight greeting scene.
//!
//! A new-year sky: twinkling starfield, ambient tropical drift, firework
//! bursts, and shooting-star wishes launched from visitor clicks:
//!
//! - stars and ambient particles live in fixed-size recycling pools
//! - bursts and wishes are transient, dropped once fully faded
//! - an auto-launch show fires random bursts for a bounded window
//!
//! Each system owns one canvas layer; a page that omits a layer simply goes
//! without that effect.

mod ambient;
mod component;
mod fireworks;
mod stars;
pub mod theme;
mod wishes;

pub use component::MidnightGreeting;
pub use fireworks::{Burst, FireworkShow};
pub use theme::MidnightTheme;
pub use wishes::WishTrails;
