//! Canvas interaction engine.
//!
//! Turns pointer and keyboard events into store mutations. Exactly one
//! gesture is in progress at a time, tracked by [`InteractionState`]; every
//! gesture ends on pointer-up, pointer-leave or Escape.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::camera::WHEEL_ZOOM_SENSITIVITY;
use crate::elements::{Connector, Element, ElementId, ElementKind, ElementPatch};
use crate::input::{InputState, Key, KeyEvent, MouseButton, PointerEvent};
use crate::selection::{HANDLE_HIT_TOLERANCE, ResizeHandle, apply_resize, hit_test_handles};
use crate::store::Store;
use crate::tools::ToolKind;

/// Tunables for pointer interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Resize handle hit tolerance in screen pixels.
    pub handle_tolerance: f64,
    /// Scale change per wheel pixel while zooming.
    pub wheel_zoom_sensitivity: f64,
    /// Return to the select tool after placing an element.
    pub revert_tool_after_place: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            revert_tool_after_place: true,
        }
    }
}

/// The gesture in progress. Pointer positions are in screen coordinates
/// unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning {
        last: Point,
    },
    DraggingElement {
        id: ElementId,
        last: Point,
    },
    Resizing {
        id: ElementId,
        handle: ResizeHandle,
        start_geometry: Rect,
        start_pointer: Point,
    },
    DrawingConnector {
        source: ElementId,
        /// Live pointer in world coordinates.
        pointer: Point,
    },
}

/// Observable mode, including placement which is derived from the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Panning,
    DraggingElement(ElementId),
    Resizing(ElementId, ResizeHandle),
    DrawingConnector(ElementId),
    Placing(ElementKind),
}

/// Interprets input against a [`Store`].
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    state: InteractionState,
    input: InputState,
    config: InteractionConfig,
    /// Text element whose content is being edited in place.
    editing_text: Option<ElementId>,
    /// An external text field has keyboard focus.
    text_input_focused: bool,
    /// Screen position of the left press that may become a placement click.
    press_origin: Option<Point>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Current mode as seen by the renderer.
    pub fn mode(&self, store: &Store) -> InteractionMode {
        match self.state {
            InteractionState::Idle => match store.tool().placeable() {
                Some(kind) => InteractionMode::Placing(kind),
                None => InteractionMode::Idle,
            },
            InteractionState::Panning { .. } => InteractionMode::Panning,
            InteractionState::DraggingElement { id, .. } => InteractionMode::DraggingElement(id),
            InteractionState::Resizing { id, handle, .. } => InteractionMode::Resizing(id, handle),
            InteractionState::DrawingConnector { source, .. } => {
                InteractionMode::DrawingConnector(source)
            }
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_busy(&self) -> bool {
        self.state != InteractionState::Idle
    }

    /// Abort the gesture in progress. Changes already applied are kept.
    pub fn cancel(&mut self) {
        if self.state != InteractionState::Idle {
            log::debug!("Gesture cancelled: {:?}", self.state);
        }
        self.state = InteractionState::Idle;
        self.press_origin = None;
    }

    // --- Text editing ---

    /// Start in-place editing of a text element.
    pub fn begin_text_edit(&mut self, store: &Store, id: ElementId) -> bool {
        match store.element(id) {
            Some(el) if el.kind() == ElementKind::Text => {
                self.editing_text = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn end_text_edit(&mut self) {
        self.editing_text = None;
    }

    pub fn editing_text(&self) -> Option<ElementId> {
        self.editing_text
    }

    /// Report keyboard focus of an external text field (property panel).
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    fn keyboard_captured(&self) -> bool {
        self.text_input_focused || self.editing_text.is_some()
    }

    // --- Pointer ---

    /// Dispatch a raw pointer event.
    pub fn handle_pointer_event(&mut self, store: &mut Store, event: &PointerEvent) {
        self.input.handle_pointer_event(event);
        match *event {
            PointerEvent::Down { position, button } => self.handle_press(store, position, button),
            PointerEvent::Move { position } => self.handle_drag(store, position),
            PointerEvent::Up { position, .. } => self.handle_release(store, position),
            PointerEvent::Leave => self.handle_leave(),
            PointerEvent::Wheel {
                delta, modifiers, ..
            } => self.handle_wheel(store, delta, modifiers.zoom()),
        }
    }

    /// Pointer pressed at a screen position.
    pub fn handle_press(&mut self, store: &mut Store, position: Point, button: MouseButton) {
        // A press always starts a fresh gesture.
        self.cancel();
        let world = store.viewport().screen_to_world(position);

        if let Some(editing) = self.editing_text {
            let on_editing = store.element(editing).is_some_and(|el| el.hit_test(world));
            if on_editing {
                return;
            }
            self.end_text_edit();
        }

        let tool = store.tool();
        if button == MouseButton::Middle || tool == ToolKind::Pan || self.input.space_held() {
            self.state = InteractionState::Panning { last: position };
            log::debug!("Panning from {:?}", position);
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        match tool {
            ToolKind::Select => self.press_select(store, position, world),
            ToolKind::Connector => {
                if let Some(source) = store.element_at(world).map(|el| el.id) {
                    self.state = InteractionState::DrawingConnector {
                        source,
                        pointer: world,
                    };
                    log::debug!("Drawing connector from {}", source);
                }
            }
            ToolKind::Place(_) => {
                self.press_origin = Some(position);
            }
            ToolKind::Pan => {}
        }
    }

    fn press_select(&mut self, store: &mut Store, position: Point, world: Point) {
        if self.input.is_double_click() {
            let text = store
                .element_at(world)
                .filter(|el| el.kind() == ElementKind::Text)
                .map(|el| el.id);
            if let Some(id) = text {
                self.editing_text = Some(id);
                store.select_element(Some(id));
                return;
            }
        }

        // Handles of the selected element win over element bodies.
        let tolerance = self.config.handle_tolerance / store.scale();
        let handle_hit = store.selected_ids().iter().find_map(|&id| {
            let el = store.element(id)?;
            let handle = hit_test_handles(el.bounds(), world, tolerance)?;
            Some((id, handle, el.bounds()))
        });
        if let Some((id, handle, start_geometry)) = handle_hit {
            self.state = InteractionState::Resizing {
                id,
                handle,
                start_geometry,
                start_pointer: position,
            };
            log::debug!("Resizing {} by {:?}", id, handle);
            return;
        }

        match store.element_at(world).map(|el| el.id) {
            Some(id) => {
                store.select_element(Some(id));
                self.state = InteractionState::DraggingElement { id, last: position };
                log::debug!("Dragging {}", id);
            }
            None => store.select_element(None),
        }
    }

    /// Pointer moved to a screen position.
    pub fn handle_drag(&mut self, store: &mut Store, position: Point) {
        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::Panning { last } => {
                let delta = position - *last;
                *last = position;
                store.pan_by(delta);
            }
            InteractionState::DraggingElement { id, last } => {
                let delta = store.viewport().screen_delta_to_world(position - *last);
                *last = position;
                let id = *id;
                let Some(el) = store.element(id) else {
                    log::debug!("Drag target {} is gone", id);
                    return;
                };
                let patch = ElementPatch::position(el.x + delta.x, el.y + delta.y);
                store.update_element(id, patch, true);
            }
            InteractionState::Resizing {
                id,
                handle,
                start_geometry,
                start_pointer,
            } => {
                let delta: Vec2 = store.viewport().screen_delta_to_world(position - *start_pointer);
                let geometry = apply_resize(*start_geometry, *handle, delta);
                if !store.update_element(*id, ElementPatch::geometry(geometry), true) {
                    log::debug!("Resize target {} is gone", id);
                }
            }
            InteractionState::DrawingConnector { pointer, .. } => {
                *pointer = store.viewport().screen_to_world(position);
            }
        }
    }

    /// Pointer released at a screen position.
    pub fn handle_release(&mut self, store: &mut Store, position: Point) {
        let state = std::mem::take(&mut self.state);
        let press_origin = self.press_origin.take();
        let world = store.viewport().screen_to_world(position);

        match state {
            InteractionState::DrawingConnector { source, .. } => {
                let target = store.element_at(world).map(|el| el.id);
                match target {
                    Some(target)
                        if target != source
                            && store.tool() == ToolKind::Connector
                            && store.element(source).is_some() =>
                    {
                        log::debug!("Connecting {} to {}", source, target);
                        store.add_connector(Connector::new(source, target));
                    }
                    _ => log::debug!("Connector from {} dropped", source),
                }
            }
            InteractionState::Idle => {
                if let (Some(kind), Some(_)) = (store.tool().placeable(), press_origin) {
                    self.place(store, kind, world);
                }
            }
            _ => {}
        }
    }

    fn place(&mut self, store: &mut Store, kind: ElementKind, world: Point) {
        let element = Element::centered_at(kind, world);
        log::debug!("Placing {} at {:?}", kind, world);
        store.add_element(element);
        if self.config.revert_tool_after_place {
            store.set_tool(ToolKind::Select);
        }
    }

    /// Pointer left the canvas: the gesture ends as if released, creating nothing.
    pub fn handle_leave(&mut self) {
        self.cancel();
    }

    /// Wheel input.
    pub fn handle_wheel(&mut self, store: &mut Store, delta: Vec2, zoom_modifier: bool) {
        store.apply_wheel(delta, zoom_modifier, self.config.wheel_zoom_sensitivity);
    }

    // --- Keyboard ---

    /// Handle a key event. Returns true if the canvas consumed it.
    pub fn handle_key(&mut self, store: &mut Store, event: &KeyEvent) -> bool {
        // Presses typed into a text field never reach the canvas key state;
        // releases always do so nothing stays held.
        match event {
            KeyEvent::Pressed(key) if self.keyboard_captured() && !key.is_modifier() => {}
            _ => self.input.handle_key_event(event),
        }
        let KeyEvent::Pressed(key) = event else {
            return false;
        };

        if self.editing_text.is_some() {
            if matches!(key, Key::Escape | Key::Enter) {
                self.end_text_edit();
                return true;
            }
            return false;
        }
        if self.keyboard_captured() {
            return false;
        }

        match key {
            Key::Escape => {
                self.cancel();
                true
            }
            k if k.is_delete() => {
                let selected = store.selected_ids().to_vec();
                if selected.is_empty() {
                    return false;
                }
                self.cancel();
                for id in selected {
                    store.remove_element(id);
                }
                true
            }
            Key::Space => true,
            Key::Char(c) => {
                if self.input.modifiers.zoom() {
                    return false;
                }
                match ToolKind::from_shortcut(&c.to_string()) {
                    Some(tool) => {
                        if tool != store.tool() {
                            self.cancel();
                        }
                        store.set_tool(tool);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    // --- Previews ---

    /// Outline of the element the active placement tool would create.
    pub fn ghost(&self, store: &Store) -> Option<Rect> {
        if self.is_busy() || !self.input.pointer_inside {
            return None;
        }
        let kind = store.tool().placeable()?;
        let center = store.viewport().screen_to_world(self.input.pointer_position);
        Some(Rect::from_center_size(center, kind.default_size()))
    }

    /// Rubber-band line of a connector being drawn, in world coordinates.
    pub fn connector_preview(&self, store: &Store) -> Option<(Point, Point)> {
        match self.state {
            InteractionState::DrawingConnector { source, pointer } => {
                let from = store.element(source)?.center();
                Some((from, pointer))
            }
            _ => None,
        }
    }

    /// CSS-style cursor for a screen position.
    pub fn cursor(&self, store: &Store, position: Point) -> &'static str {
        match self.state {
            InteractionState::Panning { .. } | InteractionState::DraggingElement { .. } => {
                return "grabbing";
            }
            InteractionState::Resizing { handle, .. } => return handle.cursor(),
            InteractionState::DrawingConnector { .. } => return "crosshair",
            InteractionState::Idle => {}
        }
        let world = store.viewport().screen_to_world(position);
        match store.tool() {
            ToolKind::Pan => "grab",
            ToolKind::Connector | ToolKind::Place(_) => "crosshair",
            ToolKind::Select => {
                let tolerance = self.config.handle_tolerance / store.scale();
                let handle = store.selected_ids().iter().find_map(|&id| {
                    hit_test_handles(store.element(id)?.bounds(), world, tolerance)
                });
                match handle {
                    Some(handle) => handle.cursor(),
                    None if store.element_at(world).is_some() => "move",
                    None => "default",
                }
            }
        }
    }
}
