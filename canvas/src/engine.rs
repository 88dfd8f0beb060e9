//! Editor engine: the interaction state machine wired to the element store.
//!
//! `EngineCore` owns everything the editing surface needs (the active page's
//! elements, the viewport and the interaction state) and is driven by one
//! method per host event. Handlers never perform I/O. They return a list of
//! [`Action`]s and the host carries them out: [`Action::Save`] is the save
//! hook and always carries the full element list, so the host can serialize
//! it and fire it at the persistence collaborator without waiting for the
//! result.
//!
//! Pointer positions are surface pixels relative to the top-left corner of the
//! zoomed page. They are divided by the zoom before touching geometry, so a
//! drag maps 1:1 to on-screen motion at any zoom level.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::consts::{DROP_PHOTO_HEIGHT, DROP_PHOTO_WIDTH};
use crate::doc::{Element, ElementBody, ElementId, ElementStore, FontWeight, PartialElement, PhotoBody, TextBody};
use crate::geometry::{Format, Point, Rect, Size, to_reference};
use crate::hit::{self, HitPart, ResizeAnchor};
use crate::input::{
    Button, DragMode, InteractionState, Key, Modifiers, UiState, move_rect, panel_placement, resize_rect,
};
use crate::layers::{LayerCommand, LayerEntry, layer_entries};
use crate::render::{RenderPlan, build_plan};
use crate::viewport::Viewport;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Persist this full element list as the page content.
    Save(Vec<Element>),
    /// The selected element changed.
    SelectionChanged(Option<ElementId>),
    /// Swap the text element's body for an editable field seeded with `text`.
    EditTextRequested { id: ElementId, text: String },
    /// Text editing for `id` ended; restore the static body.
    EditTextFinished { id: ElementId },
    /// Change the pointer cursor to this CSS cursor name.
    SetCursor(&'static str),
    RenderNeeded,
}

/// Text insert presets offered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPreset {
    Headline,
    Body,
}

impl TextPreset {
    fn body(self) -> TextBody {
        match self {
            Self::Headline => {
                let mut body = TextBody::new("Headline", 36.0);
                body.font_weight = FontWeight::Bold;
                body
            }
            Self::Body => TextBody::new("Double-click to edit", 16.0),
        }
    }

    fn rect(self) -> Rect {
        match self {
            Self::Headline => Rect::new(150.0, 40.0, 400.0, 60.0),
            Self::Body => Rect::new(200.0, 120.0, 300.0, 100.0),
        }
    }
}

/// CSS cursor for a pointer hovering over `part`.
fn cursor_for(part: Option<HitPart>) -> &'static str {
    match part {
        None => "default",
        Some(HitPart::Body) => "move",
        Some(HitPart::ResizeHandle(anchor)) => match anchor {
            ResizeAnchor::N | ResizeAnchor::S => "ns-resize",
            ResizeAnchor::E | ResizeAnchor::W => "ew-resize",
            ResizeAnchor::Ne | ResizeAnchor::Sw => "nesw-resize",
            ResizeAnchor::Nw | ResizeAnchor::Se => "nwse-resize",
        },
    }
}

/// Core engine state. Free of browser types so it can be tested natively.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub doc: ElementStore,
    pub viewport: Viewport,
    pub state: InteractionState,
    pub ui: UiState,
    page_id: Option<String>,
}

impl EngineCore {
    /// Create an engine for an album printed in `format`, shown in a
    /// container of `container` pixels.
    #[must_use]
    pub fn new(format: Format, container: Size) -> Self {
        Self {
            doc: ElementStore::new(),
            viewport: Viewport::new(container, format),
            state: InteractionState::Idle,
            ui: UiState::default(),
            page_id: None,
        }
    }

    // --- Page lifecycle ---

    /// Make `page_id` the active page, loading its content string.
    ///
    /// Any gesture or selection on the previous page is dropped. Saves already
    /// handed to the host are not awaited.
    pub fn open_page(&mut self, page_id: impl Into<String>, content: &str) -> Vec<Action> {
        let page_id = page_id.into();
        self.doc = ElementStore::load(content);
        self.state = InteractionState::Idle;
        log::debug!("opened page {page_id} with {} elements", self.doc.len());
        self.page_id = Some(page_id);
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// The id of the active page, if one is open.
    #[must_use]
    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    // --- Element store operations ---

    /// Add an element, select it, and save.
    pub fn add_element(&mut self, element: Element) -> Vec<Action> {
        if self.state.is_editing() {
            let mut actions = self.commit_text();
            actions.extend(self.add_element(element));
            return actions;
        }
        let id = self.doc.add(element);
        log::debug!("added element {id}");
        self.state = InteractionState::Selected { id: id.clone() };
        vec![self.save(), Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    /// Insert a text element from a sidebar preset.
    pub fn insert_text(&mut self, preset: TextPreset) -> Vec<Action> {
        let z = self.doc.next_z_index();
        self.add_element(Element::new(ElementBody::Text(preset.body()), preset.rect(), z))
    }

    /// Drop a photo centred on `screen_pt`.
    pub fn drop_photo(&mut self, src: impl Into<String>, screen_pt: Point) -> Vec<Action> {
        let center = to_reference(screen_pt, self.viewport.zoom());
        let rect = Rect::new(
            center.x - DROP_PHOTO_WIDTH * 0.5,
            center.y - DROP_PHOTO_HEIGHT * 0.5,
            DROP_PHOTO_WIDTH,
            DROP_PHOTO_HEIGHT,
        );
        let z = self.doc.next_z_index();
        self.add_element(Element::new(ElementBody::Photo(PhotoBody { src: src.into() }), rect, z))
    }

    /// Merge `partial` into an element and save. A missing id changes
    /// nothing but the unchanged list is still saved.
    pub fn update_element(&mut self, id: &str, partial: &PartialElement) -> Vec<Action> {
        if !self.doc.update(id, partial) {
            log::debug!("update for unknown element {id}");
        }
        vec![self.save(), Action::RenderNeeded]
    }

    /// Delete an element and save. Clears the selection if it pointed there.
    pub fn remove_element(&mut self, id: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.doc.remove(id).is_none() {
            log::debug!("remove for unknown element {id}");
        }
        if self.state.element_id().is_some_and(|sel| sel == id) {
            if self.state.is_editing() {
                actions.push(Action::EditTextFinished { id: id.to_owned() });
            }
            self.state = InteractionState::Idle;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(self.save());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Shift an element's z-order by `delta` (clamped at 1) and save.
    /// Unknown ids are ignored.
    pub fn reorder_z(&mut self, id: &str, delta: i64) -> Vec<Action> {
        match self.doc.reorder_z(id, delta) {
            Some(_) => vec![self.save(), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Delete whatever is selected.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.state.element_id().cloned() {
            Some(id) => self.remove_element(&id),
            None => Vec::new(),
        }
    }

    /// Run a layer panel command.
    pub fn apply_layer_command(&mut self, command: &LayerCommand) -> Vec<Action> {
        match command {
            LayerCommand::Raise(id) => self.reorder_z(id, 1),
            LayerCommand::Lower(id) => self.reorder_z(id, -1),
            LayerCommand::Delete(id) => self.remove_element(id),
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let zoom = self.viewport.zoom();
        let ref_pt = to_reference(screen_pt, zoom);
        let mut actions = Vec::new();

        if let InteractionState::EditingText { id } = &self.state {
            let still_inside = self.doc.get(id).is_some_and(|el| hit::body_contains(el, ref_pt));
            if still_inside {
                return actions;
            }
            actions.extend(self.commit_text());
        }

        let previous = self.state.element_id().cloned();
        let selected = previous.as_deref();
        let Some(hit) = hit::hit_test(ref_pt, &self.doc, zoom, selected) else {
            self.state = InteractionState::Idle;
            if previous.is_some() {
                actions.push(Action::SelectionChanged(None));
            }
            actions.push(Action::RenderNeeded);
            return actions;
        };

        let Some(el) = self.doc.get(&hit.element_id) else {
            return actions;
        };
        let mode = match hit.part {
            HitPart::Body => DragMode::Move,
            HitPart::ResizeHandle(anchor) => DragMode::Resize(anchor),
        };
        self.ui.panel = panel_placement(el.visual_rect().bottom(), self.viewport.content_height());
        self.state = InteractionState::Dragging {
            id: hit.element_id.clone(),
            mode,
            start_screen: screen_pt,
            orig: el.rect(),
            scale: el.scale,
        };
        log::debug!("drag {mode:?} on {}", hit.element_id);

        if previous.as_ref() != Some(&hit.element_id) {
            actions.push(Action::SelectionChanged(Some(hit.element_id)));
        }
        actions.push(Action::SetCursor(cursor_for(Some(hit.part))));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let zoom = self.viewport.zoom();
        let InteractionState::Dragging { id, mode, start_screen, orig, scale } = &self.state else {
            if self.state.is_editing() {
                return Vec::new();
            }
            let ref_pt = to_reference(screen_pt, zoom);
            let selected = self.state.element_id().map(String::as_str);
            let part = hit::hit_test(ref_pt, &self.doc, zoom, selected).map(|h| h.part);
            return vec![Action::SetCursor(cursor_for(part))];
        };

        let delta = to_reference(screen_pt.sub(*start_screen), zoom);
        let rect = match mode {
            DragMode::Move => move_rect(*orig, delta),
            DragMode::Resize(anchor) => resize_rect(*orig, *anchor, delta, *scale),
        };
        let id = id.clone();
        self.doc.update(&id, &PartialElement::geometry(rect));
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let InteractionState::Dragging { id, .. } = &self.state else {
            return Vec::new();
        };
        self.state = InteractionState::Selected { id: id.clone() };
        vec![self.save(), Action::RenderNeeded]
    }

    /// Enter text editing if a text element is under the pointer.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.state.is_dragging() || self.state.is_editing() {
            return Vec::new();
        }
        let ref_pt = to_reference(screen_pt, self.viewport.zoom());
        let Some(hit) = hit::hit_test(ref_pt, &self.doc, self.viewport.zoom(), None) else {
            return Vec::new();
        };
        let Some(body) = self.doc.get(&hit.element_id).and_then(Element::text) else {
            return Vec::new();
        };
        let text = body.text.clone();
        let id = hit.element_id;
        log::debug!("editing text of {id}");
        let mut actions = Vec::new();
        if self.state.element_id() != Some(&id) {
            actions.push(Action::SelectionChanged(Some(id.clone())));
        }
        self.state = InteractionState::EditingText { id: id.clone() };
        actions.push(Action::EditTextRequested { id, text });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Text editing ---

    /// Live update from the editable field. Not saved until the edit ends.
    pub fn on_text_input(&mut self, text: &str) -> Vec<Action> {
        let InteractionState::EditingText { id } = &self.state else {
            return Vec::new();
        };
        let partial = PartialElement { text: Some(text.to_owned()), ..Default::default() };
        let id = id.clone();
        self.doc.update(&id, &partial);
        vec![Action::RenderNeeded]
    }

    /// The editable field lost focus: commit the text.
    pub fn on_text_blur(&mut self) -> Vec<Action> {
        self.commit_text()
    }

    fn commit_text(&mut self) -> Vec<Action> {
        let InteractionState::EditingText { id } = &self.state else {
            return Vec::new();
        };
        let id = id.clone();
        self.state = InteractionState::Selected { id: id.clone() };
        vec![self.save(), Action::EditTextFinished { id }, Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if self.state.is_editing() {
            if key.is_escape() {
                return self.commit_text();
            }
            return Vec::new();
        }
        if key.is_delete() {
            return self.delete_selected();
        }
        if key.is_escape() && self.state.element_id().is_some() {
            self.state = InteractionState::Idle;
            return vec![Action::SelectionChanged(None), Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Viewport ---

    /// The container was resized; refit the page.
    pub fn set_container(&mut self, container: Size) -> f64 {
        self.viewport.resize(container);
        self.viewport.zoom()
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.state.element_id()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.doc.elements()
    }

    /// Layer panel rows, top first.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerEntry> {
        layer_entries(&self.doc)
    }

    /// Display list for the current frame.
    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        build_plan(&self.doc, &self.viewport, &self.state, &self.ui)
    }

    fn save(&self) -> Action {
        Action::Save(self.doc.snapshot())
    }
}
