//! Browser bridge: exports the page editor to JavaScript.
//!
//! `PageEditor` wraps an [`EngineCore`] and carries out its actions. Saves go
//! to the JS function handed in at construction, called with
//! `(pageId, content)`. The call is never awaited by the editor: if it returns
//! a promise, a detached task watches it only to log a rejection. Every other
//! action is returned to the host as a JSON array of events.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use js_sys::{Function, Promise};
use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

use crate::doc::{self, Element, PartialElement};
use crate::engine::{Action, EngineCore, TextPreset};
use crate::geometry::{Format, Point, Size};
use crate::input::{Button, Key, Modifiers};
use crate::layers::LayerCommand;

/// Install the console logger and panic hook. Call once at start-up.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already set: {e}")));
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn button_from_js(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

/// Host-facing form of a non-save action.
fn event_json(action: &Action) -> Option<Value> {
    match action {
        Action::Save(_) => None,
        Action::SelectionChanged(id) => Some(json!({ "event": "selectionChanged", "id": id })),
        Action::EditTextRequested { id, text } => Some(json!({ "event": "editText", "id": id, "text": text })),
        Action::EditTextFinished { id } => Some(json!({ "event": "editTextFinished", "id": id })),
        Action::SetCursor(cursor) => Some(json!({ "event": "cursor", "cursor": cursor })),
        Action::RenderNeeded => Some(json!({ "event": "render" })),
    }
}

/// Interactive editor for one album page, bound to a DOM surface element.
#[wasm_bindgen]
pub struct PageEditor {
    core: EngineCore,
    surface: HtmlElement,
    save: Function,
}

#[wasm_bindgen]
impl PageEditor {
    /// Create an editor for an album in `width_cm` x `height_cm`, fitted to a
    /// container of the given pixel size.
    ///
    /// # Errors
    ///
    /// Fails if the surface element rejects its style.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width_cm: f64,
        height_cm: f64,
        container_width: f64,
        container_height: f64,
        surface: HtmlElement,
        save: Function,
    ) -> Result<PageEditor, JsValue> {
        let core = EngineCore::new(Format::new(width_cm, height_cm), Size::new(container_width, container_height));
        surface.style().set_property("transform-origin", "top left")?;
        let editor = Self { core, surface, save };
        editor.apply_transform()?;
        Ok(editor)
    }

    // --- Page lifecycle ---

    /// Switch to another page. In-flight saves of the previous page are left alone.
    ///
    /// # Errors
    ///
    /// Fails if the surface transform cannot be applied.
    #[wasm_bindgen(js_name = openPage)]
    pub fn open_page(&mut self, page_id: String, content: &str) -> Result<String, JsValue> {
        let actions = self.core.open_page(page_id, content);
        self.process(actions)
    }

    /// Serialized element list of the active page.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn content(&self) -> Result<String, JsValue> {
        doc::serialize(self.core.elements()).map_err(js_err)
    }

    pub fn selection(&self) -> Option<String> {
        self.core.selection().cloned()
    }

    // --- Sidebar ---

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = addHeadline)]
    pub fn add_headline(&mut self) -> Result<String, JsValue> {
        let actions = self.core.insert_text(TextPreset::Headline);
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = addBodyText)]
    pub fn add_body_text(&mut self) -> Result<String, JsValue> {
        let actions = self.core.insert_text(TextPreset::Body);
        self.process(actions)
    }

    /// Place a photo dropped at surface pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = dropPhoto)]
    pub fn drop_photo(&mut self, src: String, x: f64, y: f64) -> Result<String, JsValue> {
        let actions = self.core.drop_photo(src, Point::new(x, y));
        self.process(actions)
    }

    /// Merge a JSON partial (camelCase element fields) into an element.
    ///
    /// # Errors
    ///
    /// Fails if `partial` is not a valid partial element.
    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, partial: &str) -> Result<String, JsValue> {
        let partial: PartialElement = serde_json::from_str(partial).map_err(js_err)?;
        let actions = self.core.update_element(id, &partial);
        self.process(actions)
    }

    // --- Layer panel ---

    /// Layer rows as JSON, top first.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn layers(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.layers()).map_err(js_err)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = raiseLayer)]
    pub fn raise_layer(&mut self, id: String) -> Result<String, JsValue> {
        let actions = self.core.apply_layer_command(&LayerCommand::Raise(id));
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = lowerLayer)]
    pub fn lower_layer(&mut self, id: String) -> Result<String, JsValue> {
        let actions = self.core.apply_layer_command(&LayerCommand::Lower(id));
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = removeElement)]
    pub fn remove_element(&mut self, id: String) -> Result<String, JsValue> {
        let actions = self.core.apply_layer_command(&LayerCommand::Delete(id));
        self.process(actions)
    }

    // --- Input events ---

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_down(Point::new(x, y), button_from_js(button), Modifiers::default());
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_move(Point::new(x, y), Modifiers::default());
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_up(Point::new(x, y), button_from_js(button), Modifiers::default());
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        let actions = self.core.on_double_click(Point::new(x, y));
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: String) -> Result<String, JsValue> {
        let actions = self.core.on_key_down(&Key(key), Modifiers::default());
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = textInput)]
    pub fn text_input(&mut self, text: &str) -> Result<String, JsValue> {
        let actions = self.core.on_text_input(text);
        self.process(actions)
    }

    /// # Errors
    ///
    /// Fails if an action cannot be carried out.
    #[wasm_bindgen(js_name = textBlur)]
    pub fn text_blur(&mut self) -> Result<String, JsValue> {
        let actions = self.core.on_text_blur();
        self.process(actions)
    }

    // --- Viewport ---

    /// # Errors
    ///
    /// Fails if the surface transform cannot be applied.
    pub fn resize(&mut self, container_width: f64, container_height: f64) -> Result<f64, JsValue> {
        let zoom = self.core.set_container(Size::new(container_width, container_height));
        self.apply_transform()?;
        Ok(zoom)
    }

    /// # Errors
    ///
    /// Fails if the surface transform cannot be applied.
    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Result<f64, JsValue> {
        let zoom = self.core.viewport.zoom_in();
        self.apply_transform()?;
        Ok(zoom)
    }

    /// # Errors
    ///
    /// Fails if the surface transform cannot be applied.
    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<f64, JsValue> {
        let zoom = self.core.viewport.zoom_out();
        self.apply_transform()?;
        Ok(zoom)
    }

    /// # Errors
    ///
    /// Fails if the surface transform cannot be applied.
    #[wasm_bindgen(js_name = fitToScreen)]
    pub fn fit_to_screen(&mut self) -> Result<f64, JsValue> {
        let zoom = self.core.viewport.fit();
        self.apply_transform()?;
        Ok(zoom)
    }

    #[wasm_bindgen(js_name = zoomPercent)]
    pub fn zoom_percent(&self) -> i64 {
        self.core.viewport.percent()
    }

    /// Display list for the host to draw, as JSON.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    #[wasm_bindgen(js_name = renderPlan)]
    pub fn render_plan(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.render_plan()).map_err(js_err)
    }
}

impl PageEditor {
    fn apply_transform(&self) -> Result<(), JsValue> {
        self.surface.style().set_property("transform", &self.core.viewport.css_transform())
    }

    /// Carry out saves and hand every other action back as JSON events.
    fn process(&self, actions: Vec<Action>) -> Result<String, JsValue> {
        let mut events = Vec::new();
        for action in &actions {
            if let Action::Save(elements) = action {
                self.dispatch_save(elements)?;
            } else if let Some(event) = event_json(action) {
                events.push(event);
            }
        }
        serde_json::to_string(&events).map_err(js_err)
    }

    fn dispatch_save(&self, elements: &[Element]) -> Result<(), JsValue> {
        let Some(page_id) = self.core.page_id() else {
            log::warn!("save requested with no open page");
            return Ok(());
        };
        let content = doc::serialize(elements).map_err(js_err)?;
        log::debug!("saving page {page_id} ({} elements)", elements.len());
        let result = match self.save.call2(&JsValue::NULL, &JsValue::from_str(page_id), &JsValue::from_str(&content)) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("save hook threw for page {page_id}: {e:?}");
                return Ok(());
            }
        };
        if let Ok(promise) = result.dyn_into::<Promise>() {
            let page_id = page_id.to_owned();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("save failed for page {page_id}: {e:?}");
                }
            });
        }
        Ok(())
    }
}
