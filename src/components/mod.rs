//! Scene components and the shared particle toolkit.

use web_sys::{Document, Window};

use self::effects::clock::LoadTier;
use self::effects::pool::Bounds;

pub mod effects;
pub mod harvest;
pub mod midnight;

/// Current window inner size as scene bounds.
pub(crate) fn viewport_bounds(window: &Window) -> Bounds {
	Bounds::new(
		window.inner_width().unwrap().as_f64().unwrap(),
		window.inner_height().unwrap().as_f64().unwrap(),
	)
}

/// Select the visual load tier from tab visibility and motion preference.
///
/// `force` (from scene config) overrides both signals when present.
pub(crate) fn current_tier(window: &Window, document: &Document, force: Option<bool>) -> LoadTier {
	if let Some(forced) = force {
		return if forced {
			LoadTier::Reduced
		} else {
			LoadTier::Normal
		};
	}
	let prefers_reduced = window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.map(|query| query.matches())
		.unwrap_or(false);
	if document.hidden() || prefers_reduced {
		LoadTier::Reduced
	} else {
		LoadTier::Normal
	}
}
