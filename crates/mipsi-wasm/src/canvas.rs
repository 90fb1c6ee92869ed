//! `<canvas>` drawing surface.

use mipsi_core::{BootstrapError, BootstrapResult, Color, DrawingSurface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use crate::dom::js_error;

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_element(id: &str, element: Element) -> BootstrapResult<Self> {
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BootstrapError::ElementType {
                id: id.to_string(),
                expected: "canvas",
            })?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| BootstrapError::Host(js_error(e)))?
            .ok_or_else(|| BootstrapError::Host(format!("`#{id}` has no 2d context")))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BootstrapError::Host(format!("`#{id}` 2d context has wrong type")))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl DrawingSurface for CanvasSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_fill_style(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.ctx
            .fill_rect(f64::from(x), f64::from(y), f64::from(width), f64::from(height));
    }
}
