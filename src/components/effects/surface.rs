//! Canvas layer binding.
//!
//! Each particle system draws to exactly one layer, located by a stable
//! element id the host page provides. A missing or mis-typed element disables
//! only that system; the rest of the scene carries on.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// One exclusively-owned canvas surface and its 2d context.
pub struct Layer {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl Layer {
	/// Bind the canvas with the given id, or `None` if the page does not
	/// provide one.
	pub fn bind(document: &Document, id: &str) -> Option<Self> {
		let Some(element) = document.get_element_by_id(id) else {
			warn!("festive-canvas: no element #{id}, effect disabled");
			return None;
		};
		let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
			warn!("festive-canvas: #{id} is not a canvas, effect disabled");
			return None;
		};
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()??
			.dyn_into()
			.ok()?;
		Some(Self { canvas, ctx })
	}

	/// Match the backing store to the given pixel size.
	pub fn resize(&self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	/// Clear to transparent; the page CSS owns the backdrop.
	pub fn clear(&self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	pub fn ctx(&self) -> &CanvasRenderingContext2d {
		&self.ctx
	}
}
