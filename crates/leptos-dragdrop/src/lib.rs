//! Leptos DragDrop Utilities
//!
//! Mouse-driven move and resize for absolutely positioned frames.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Frame geometry in desktop pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Grip used to resize a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeEdge {
    Right,
    Bottom,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize(ResizeEdge),
}

/// In-progress gesture (mousedown seen, maybe not yet past the threshold)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub mode: DragMode,
    pub start_x: i32,
    pub start_y: i32,
    /// Frame rect when the gesture began
    pub origin: Rect,
    /// Threshold crossed
    pub started: bool,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

/// Compute the frame rect for a pointer delta.
///
/// Moves are clamped so the frame stays inside `bounds`; resizes never go
/// below `min` and never past the right/bottom edge of `bounds`.
pub fn apply_drag(mode: DragMode, origin: Rect, dx: f64, dy: f64, bounds: Option<Size>, min: Size) -> Rect {
    match mode {
        DragMode::Move => {
            let mut x = origin.x + dx;
            let mut y = origin.y + dy;
            if let Some(b) = bounds {
                x = x.clamp(0.0, (b.width - origin.width).max(0.0));
                y = y.clamp(0.0, (b.height - origin.height).max(0.0));
            }
            Rect { x, y, ..origin }
        }
        DragMode::Resize(edge) => {
            let (grow_w, grow_h) = match edge {
                ResizeEdge::Right => (true, false),
                ResizeEdge::Bottom => (false, true),
                ResizeEdge::BottomRight => (true, true),
            };
            let mut width = if grow_w { origin.width + dx } else { origin.width };
            let mut height = if grow_h { origin.height + dy } else { origin.height };
            width = width.max(min.width);
            height = height.max(min.height);
            if let Some(b) = bounds {
                width = width.min((b.width - origin.x).max(min.width));
                height = height.min((b.height - origin.y).max(min.height));
            }
            Rect { width, height, ..origin }
        }
    }
}

/// Drag state signals for one frame
#[derive(Clone, Copy)]
pub struct DragSignals {
    pub rect: RwSignal<Rect>,
    pub session: RwSignal<Option<DragSession>>,
}

impl DragSignals {
    pub fn is_dragging(&self) -> bool {
        self.session.with(|s| s.map_or(false, |s| s.started))
    }
}

pub fn create_drag_signals(initial: Rect) -> DragSignals {
    DragSignals {
        rect: RwSignal::new(initial),
        session: RwSignal::new(None),
    }
}

/// Create mousedown handler for a drag handle or resize grip.
/// Records a pending gesture with the start position.
pub fn make_on_mousedown(drag: DragSignals, mode: DragMode) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if mode == DragMode::Move {
            // Ignore if target is a control inside the handle
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
            }
        } else {
            ev.stop_propagation();
            ev.prevent_default();
        }
        drag.session.set(Some(DragSession {
            mode,
            start_x: ev.client_x(),
            start_y: ev.client_y(),
            origin: drag.rect.get_untracked(),
            started: false,
        }));
    }
}

/// Document-level listeners for one frame; removed when dropped
pub struct DragListeners {
    on_move: Closure<dyn FnMut(web_sys::MouseEvent)>,
    on_up: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl Drop for DragListeners {
    fn drop(&mut self) {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            let _ = doc.remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
            let _ = doc.remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
        }
    }
}

/// Bind global mousemove/mouseup handlers that drive `drag`.
///
/// `bounds` is queried on every move so the frame follows viewport resizes.
pub fn bind_global_listeners<B>(drag: DragSignals, bounds: B, min: Size) -> DragListeners
where
    B: Fn() -> Option<Size> + 'static,
{
    let on_move = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(mut session) = drag.session.try_get_untracked().flatten() else {
            return;
        };
        let dx = ev.client_x() - session.start_x;
        let dy = ev.client_y() - session.start_y;

        if !session.started {
            if !exceeds_threshold(dx, dy) {
                return;
            }
            session.started = true;
            drag.session.set(Some(session));
        }

        ev.prevent_default();
        let next = apply_drag(session.mode, session.origin, dx as f64, dy as f64, bounds(), min);
        drag.rect.set(next);
    });

    let on_up = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        if drag.session.try_get_untracked().flatten().is_some() {
            drag.session.set(None);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref());
    }

    DragListeners { on_move, on_up }
}
