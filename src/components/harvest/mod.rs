//! The harvest greeting scene.
//!
//! Falling autumn leaves with depth parallax, rising embers, and a
//! procedurally traced gratitude tree. Visitors type a gratitude and click
//! the tree to hang it as a leaf that grows in over a few frames:
//!
//! - leaves and embers live in fixed-size recycling pools
//! - the tree is re-traced from a stable seed every frame
//! - gratitude leaves persist for the page session
//!
//! Each system owns one canvas layer; a page that omits a layer simply goes
//! without that effect.

mod component;
mod embers;
mod leaves;
pub mod theme;
mod tree;

pub use component::HarvestGreeting;
pub use theme::HarvestTheme;
pub use tree::{GratitudeTree, depth_bound};
