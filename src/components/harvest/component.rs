//! Leptos component wiring the harvest scene to its canvas layers.
//!
//! The component renders three stacked canvases (leaves, embers, tree) plus a
//! text overlay, binds each particle system to its layer by element id, and
//! drives everything from a `requestAnimationFrame` loop. Clicking the tree
//! hangs the typed gratitude at the clicked point.

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

use super::embers::EmberField;
use super::leaves::{LeafDrift, WindField};
use super::theme::HarvestTheme;
use super::tree::GratitudeTree;

/// Simulation step per animation frame, nominal 60 fps.
const FRAME_DT: f64 = 0.016;

/// Bundles the harvest systems with their layers and shared state.
struct HarvestContext {
	rng: RandomSource,
	clock: FrameClock,
	theme: HarvestTheme,
	tier: LoadTier,
	bounds: Bounds,
	wind: WindField,
	leaves: Option<(LeafDrift, Layer)>,
	embers: Option<(EmberField, Layer)>,
	tree: Option<(GratitudeTree, Layer)>,
}

impl HarvestContext {
	fn new(
		document: &Document,
		theme: HarvestTheme,
		bounds: Bounds,
		tier: LoadTier,
		seed: u64,
	) -> Self {
		let mut rng = RandomSource::seeded(seed);
		let wind = WindField::new(theme.wind.clone(), &mut rng);

		let leaves = Layer::bind(document, "harvest-leaves").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(
				LeafDrift::new(theme.leaves.clone(), tier, bounds, &mut rng),
				layer,
			)
		});
		let embers = Layer::bind(document, "harvest-embers").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(
				EmberField::new(theme.embers.clone(), tier, bounds, &mut rng),
				layer,
			)
		});
		let tree = Layer::bind(document, "harvest-tree").map(|layer| {
			layer.resize(bounds.width, bounds.height);
			(GratitudeTree::new(theme.tree.clone(), &mut rng), layer)
		});

		Self {
			rng,
			clock: FrameClock::default(),
			theme,
			tier,
			bounds,
			wind,
			leaves,
			embers,
			tree,
		}
	}

	/// Advance and redraw every bound system, in back-to-front layer order.
	fn frame(&mut self, dt: f64) {
		self.clock.advance(dt);
		self.wind.update(dt, &mut self.rng);

		if let Some((drift, layer)) = &mut self.leaves {
			drift.advance(dt, self.clock.time, self.wind.ambient(), &mut self.rng);
			drift.draw(layer);
		}
		if let Some((field, layer)) = &mut self.embers {
			field.advance(dt, &mut self.rng);
			field.draw(layer);
		}
		if let Some((tree, layer)) = &mut self.tree {
			tree.tick(dt);
			tree.draw(layer, self.bounds, self.clock.time);
		}
	}

	/// Resize every layer and rebuild the pools. This is the point where the
	/// current load tier's target counts take effect.
	fn resize(&mut self, bounds: Bounds) {
		self.bounds = bounds;
		if let Some((drift, layer)) = &mut self.leaves {
			layer.resize(bounds.width, bounds.height);
			*drift = LeafDrift::new(self.theme.leaves.clone(), self.tier, bounds, &mut self.rng);
		}
		if let Some((field, layer)) = &mut self.embers {
			layer.resize(bounds.width, bounds.height);
			*field = EmberField::new(self.theme.embers.clone(), self.tier, bounds, &mut self.rng);
		}
		if let Some((tree, layer)) = &mut self.tree {
			layer.resize(bounds.width, bounds.height);
			tree.reseed(&mut self.rng);
		}
	}

	fn set_tier(&mut self, tier: LoadTier) {
		self.tier = tier;
	}

	fn add_gratitude_leaf(&mut self, text: &str, x: f64, y: f64) {
		if let Some((tree, _)) = &mut self.tree {
			tree.add_leaf(text, x, y, &mut self.rng);
		}
	}
}

/// Renders the gratitude-tree greeting: falling leaves and embers behind a
/// procedurally drawn tree that collects the visitor's gratitudes.
#[component]
pub fn HarvestGreeting(#[prop(default = None)] reduce_override: Option<bool>) -> impl IntoView {
	let message = RwSignal::new(String::new());
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<HarvestContext>>> = Rc::new(RefCell::new(None));
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

		*context_init.borrow_mut() = Some(HarvestContext::new(
			&document,
			HarvestTheme::default(),
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
			c.add_gratitude_leaf(&message.get_untracked(), x, y);
		}
	};

	view! {
		<div class="greeting-scene harvest-scene">
			<canvas id="harvest-leaves" class="scene-layer" />
			<canvas id="harvest-embers" class="scene-layer" />
			<canvas
				id="harvest-tree"
				class="scene-layer"
				node_ref=canvas_ref
				on:mousedown=on_mousedown
			/>
			<div class="scene-overlay">
				<h1>"Give Thanks"</h1>
				<p class="subtitle">"Type a gratitude, then click the tree to hang it."</p>
				<input
					type="text"
					placeholder="I'm thankful for..."
					prop:value=message
					on:input=move |ev| message.set(event_target_value(&ev))
				/>
			</div>
		</div>
	}
}
