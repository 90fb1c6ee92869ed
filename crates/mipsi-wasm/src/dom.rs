//! Browser `UiHost`: element lookup, input values, alerts, click listeners.

use mipsi_core::{BootstrapError, BootstrapResult, ClickHandler, UiHost};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::canvas::CanvasSurface;

/// Stringify a thrown JS value for logging and error messages.
pub(crate) fn js_error(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> BootstrapResult<Self> {
        let window = web_sys::window().ok_or_else(|| BootstrapError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| BootstrapError::Host("no document".into()))?;
        Ok(Self { window, document })
    }

    /// Base URI of the document, used to resolve the module path.
    pub fn base_uri(&self) -> Option<String> {
        self.document.base_uri().ok().flatten()
    }

    fn element(&self, id: &str) -> BootstrapResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| BootstrapError::ElementNotFound { id: id.to_string() })
    }
}

impl UiHost for WebHost {
    type Surface = CanvasSurface;

    fn surface(&self, id: &str) -> BootstrapResult<CanvasSurface> {
        CanvasSurface::from_element(id, self.element(id)?)
    }

    fn input_value(&self, id: &str) -> BootstrapResult<String> {
        let element = self.element(id)?;
        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(textarea.value());
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        Err(BootstrapError::ElementType {
            id: id.to_string(),
            expected: "textarea or input",
        })
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {}", js_error(e));
        }
    }

    fn on_click(&self, id: &str, mut handler: ClickHandler) -> BootstrapResult<()> {
        let element = self.element(id)?;
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler());
        element
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(|e| BootstrapError::Host(js_error(e)))?;
        // Bound for the page's lifetime.
        listener.forget();
        Ok(())
    }

    fn set_status(&self, id: &str, message: &str) -> BootstrapResult<()> {
        self.element(id)?.set_text_content(Some(message));
        Ok(())
    }
}
