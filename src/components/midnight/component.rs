//! Leptos component wiring the midnight scene to its canvas layers.
//!
//! Four stacked canvases: stars, ambient drift, fireworks, wishes. Clicking
//! launches the typed wish as a shooting star from the clicked point, or a
//! firework burst when the input is empty. An auto-launch show runs for a
//! bounded window at mount and can be toggled from the overlay.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use crate::components::{current_tier, viewport_bounds};
use crate::components::effects::clock::{FrameClock, LoadTier};
use crate::components::effects::pool::Bounds;
use crate::components::effects::rng::RandomSource;
use crate::components::effects::surface::Layer;

use super::ambient::AmbientDrift;
use super::fireworks::FireworkShow;
use super::stars::StarField;
use super::theme::MidnightTheme;
use super::wishes::WishTrails;

/// Simulation step per animation frame, nominal 60 fps.
const FRAME_DT: f64 = 0.016;

/// Bundles the midnight systems with their layers and shared state.
struct MidnightContext {
	rng: RandomSource,
	clock: FrameClock,
	theme: MidnightTheme,
	tier: LoadTier,
	bounds: Bounds,
	stars: Option<(StarField, Layer)>,
	ambient: Option<(AmbientDrift, Layer)>,
	fireworks: Option<(FireworkShow, Layer)>,
	wishes: Option<(WishTrails, Layer)>,
}

impl MidnightContext {
	fn new(
		document: &Document,
		theme: MidnightTheme,
		bounds: Bounds,
		tier: LoadTier,
		seed: u64,
	) -> Self {
		let mut rng = RandomSource::seeded(seed);

		let stars = Layer::bind(document, "midnight-stars").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(
				StarField::new(theme.stars.clone(), tier, bounds, &mut rng),
				layer,
			)
		});
		let ambient = Layer::bind(document, "midnight-ambient").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(
				AmbientDrift::new(theme.ambient.clone(), tier, bounds, &mut rng),
				layer,
			)
		});
		let fireworks = Layer::bind(document, "midnight-fireworks").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(FireworkShow::new(theme.fireworks.clone()), layer)
		});
		let wishes = Layer::bind(document, "midnight-wishes").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(WishTrails::new(theme.wishes.clone()), layer)
		});

		let mut ctx = Self {
			rng,
			clock: FrameClock::default(),
			theme,
			tier,
			bounds,
			stars,
			ambient,
			fireworks,
			wishes,
		};
		// The page opens on a short celebratory volley.
		if let Some((show, _)) = &mut ctx.fireworks {
			show.start_auto(&mut ctx.rng);
		}
		ctx
	}

	/// Advance and redraw every bound system, in back-to-front layer order.
	fn frame(&mut self, dt: f64) {
		self.clock.advance(dt);

		if let Some((field, layer)) = &mut self.stars {
			field.advance(dt);
			field.draw(layer);
		}
		if let Some((drift, layer)) = &mut self.ambient {
			drift.advance(dt, self.clock.time, &mut self.rng);
			drift.draw(layer);
		}
		if let Some((show, layer)) = &mut self.fireworks {
			show.advance(dt, self.bounds, &mut self.rng);
			show.draw(layer);
		}
		if let Some((trails, layer)) = &mut self.wishes {
			trails.advance(dt, self.bounds);
			trails.draw(layer);
		}
	}

	/// Resize every layer; pools rebuild at the current tier's target count,
	/// transient collections (bursts, wishes) carry over.
	fn resize(&mut self, bounds: Bounds) {
		self.bounds = bounds;
		if let Some((field, layer)) = &mut self.stars {
			layer.resize(bounds.width, bounds.height);
			*field = StarField::new(self.theme.stars.clone(), self.tier, bounds, &mut self.rng);
		}
		if let Some((drift, layer)) = &mut self.ambient {
			layer.resize(bounds.width, bounds.height);
			*drift =
				AmbientDrift::new(self.theme.ambient.clone(), self.tier, bounds, &mut self.rng);
		}
		if let Some((_, layer)) = &self.fireworks {
			layer.resize(bounds.width, bounds.height);
		}
		if let Some((_, layer)) = &self.wishes {
			layer.resize(bounds.width, bounds.height);
		}
	}

	fn set_tier(&mut self, tier: LoadTier) {
		self.tier = tier;
	}

	/// Launch the typed wish from the clicked point; reports whether a wish
	/// was created (blank text creates nothing).
	fn add_wish(&mut self, text: &str, x: f64, y: f64) -> bool {
		match &mut self.wishes {
			Some((trails, _)) => trails.add_wish(text, x, y, &mut self.rng),
			None => false,
		}
	}

	fn launch_firework(&mut self, x: f64, y: f64) {
		if let Some((show, _)) = &mut self.fireworks {
			show.launch_at(x, y, &mut self.rng);
		}
	}

	fn toggle_auto(&mut self) {
		if let Some((show, _)) = &mut self.fireworks {
			if show.auto_active() {
				show.stop_auto();
			} else {
				show.start_auto(&mut self.rng);
			}
		}
	}
}

/// Renders the new-year greeting: starfield, drifting sparkle, firework
/// bursts, and click-launched shooting-star wishes.
#[component]
pub fn MidnightGreeting(#[prop(default = None)] reduce_override: Option<bool>) -> impl IntoView {
	let message = RwSignal::new(String::new());
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<MidnightContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let visibility_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, visibility_cb_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		visibility_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(_canvas) = canvas_ref.get() else {
			return;
		};
		let window: Window = web_sys::window().unwrap();
		let document = window.document().unwrap();
		let bounds = viewport_bounds(&window);

		*context_init.borrow_mut() = Some(MidnightContext::new(
			&document,
			MidnightTheme::default(),
			bounds,
			current_tier(&window, &document, reduce_override),
			js_sys::Date::now() as u64,
		));

		let context_resize = context_init.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.resize(viewport_bounds(&win));
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let context_vis = context_init.clone();
		*visibility_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let doc = win.document().unwrap();
			if let Some(ref mut c) = *context_vis.borrow_mut() {
				c.set_tier(current_tier(&win, &doc, reduce_override));
			}
		}));
		if let Some(ref cb) = *visibility_cb_init.borrow() {
			let _ = document
				.add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.frame(FRAME_DT);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			// A typed wish rides a shooting star; otherwise the click is a
			// firework.
			if c.add_wish(&message.get_untracked(), x, y) {
				message.set(String::new());
			} else {
				c.launch_firework(x, y);
			}
		}
	};

	let context_btn = context.clone();
	let on_toggle_show = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_btn.borrow_mut() {
			c.toggle_auto();
		}
	};

	view! {
		<div class="greeting-scene midnight-scene">
			<canvas id="midnight-stars" class="scene-layer" />
			<canvas id="midnight-ambient" class="scene-layer" />
			<canvas id="midnight-fireworks" class="scene-layer" />
			<canvas
				id="midnight-wishes"
				class="scene-layer"
				node_ref=canvas_ref
				on:mousedown=on_mousedown
			/>
			<div class="scene-overlay">
				<h1>"Happy New Year"</h1>
				<p class="subtitle">
					"Type a wish and click the sky to send it. An empty click is a firework."
				</p>
				<input
					type="text"
					placeholder="This year I wish..."
					prop:value=message
					on:input=move |ev| message.set(event_target_value(&ev))
				/>
				<button on:click=on_toggle_show>"Toggle the show"</button>
			</div>
		</div>
	}
}
