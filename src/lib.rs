//! festive-canvas: animated particle greeting scenes on HTML canvas.
//!
//! This crate provides WASM-based single-page holiday greetings built from
//! small per-frame particle simulations: falling leaves, rising embers, a
//! procedural gratitude tree, a twinkling starfield, firework bursts, and
//! shooting-star wishes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::harvest::HarvestGreeting;
pub use components::midnight::MidnightGreeting;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("festive-canvas: logging initialized");
}

/// Which greeting the page shows.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
	/// Gratitude tree with falling leaves and embers.
	#[default]
	Harvest,
	/// New-year sky with fireworks and wishes.
	Midnight,
}

/// Page-supplied scene selection and overrides.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct SceneConfig {
	#[serde(default)]
	pub scene: SceneKind,
	/// Force the reduced load tier on (`true`) or off (`false`); absent means
	/// follow tab visibility and the motion preference.
	#[serde(default)]
	pub reduced_motion: Option<bool>,
}

/// Load scene configuration from a script element with id="scene-config".
/// Expected format: JSON with { scene: "harvest" | "midnight", ... }
fn load_scene_config() -> Option<SceneConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("scene-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SceneConfig>(&json_text) {
		Ok(config) => {
			info!("festive-canvas: configured scene {:?}", config.scene);
			Some(config)
		}
		Err(e) => {
			warn!("festive-canvas: failed to parse scene config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads scene configuration from the DOM and mounts the selected greeting.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_scene_config().unwrap_or_default();
	let title = match config.scene {
		SceneKind::Harvest => "Give Thanks",
		SceneKind::Midnight => "Happy New Year",
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{match config.scene {
			SceneKind::Harvest => {
				view! { <HarvestGreeting reduce_override=config.reduced_motion /> }.into_any()
			}
			SceneKind::Midnight => {
				view! { <MidnightGreeting reduce_override=config.reduced_motion /> }.into_any()
			}
		}}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scene_config_parses() {
		let config: SceneConfig =
			serde_json::from_str(r#"{"scene": "midnight", "reduced_motion": true}"#).unwrap();
		assert_eq!(config.scene, SceneKind::Midnight);
		assert_eq!(config.reduced_motion, Some(true));
	}

	#[test]
	fn scene_config_defaults() {
		let config: SceneConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.scene, SceneKind::Harvest);
		assert_eq!(config.reduced_motion, None);
	}
}
