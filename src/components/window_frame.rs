//! Window Frame Component
//!
//! Draggable, resizable chrome around one app instance. Geometry lives here;
//! membership, focus and minimized state live in the window manager.

use leptos::prelude::*;
use leptos_dragdrop::{
    bind_global_listeners, create_drag_signals, make_on_mousedown, DragMode, Rect, ResizeEdge, Size,
};

use crate::apps::{AppId, AppSurface};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::window_manager::{WindowId, BASE_Z_INDEX};

/// Element the frames are positioned in and clamped to
pub const DESKTOP_AREA_ID: &str = "desktop-area";

const DEFAULT_SIZE: Size = Size { width: 800.0, height: 600.0 };
const MIN_SIZE: Size = Size { width: 400.0, height: 300.0 };
const CASCADE_ORIGIN: (f64, f64) = (100.0, 60.0);
const CASCADE_STEP: f64 = 30.0;
const CASCADE_SLOTS: u32 = 8;

/// Where a new window appears: staggered so frames don't stack exactly
pub fn initial_rect(id: WindowId) -> Rect {
    let slot = (id.seq().saturating_sub(1) % CASCADE_SLOTS) as f64;
    Rect::new(
        CASCADE_ORIGIN.0 + slot * CASCADE_STEP,
        CASCADE_ORIGIN.1 + slot * CASCADE_STEP,
        DEFAULT_SIZE.width,
        DEFAULT_SIZE.height,
    )
}

pub fn frame_style(rect: Rect, maximized: bool, minimized: bool, z_index: u32) -> String {
    if minimized {
        return format!("display: none; z-index: {};", z_index);
    }
    if maximized {
        return format!("left: 0; top: 0; width: 100%; height: 100%; z-index: {};", z_index);
    }
    format!(
        "left: {}px; top: {}px; width: {}px; height: {}px; z-index: {};",
        rect.x, rect.y, rect.width, rect.height, z_index
    )
}

fn desktop_bounds() -> Option<Size> {
    let area = web_sys::window()?.document()?.get_element_by_id(DESKTOP_AREA_ID)?;
    Some(Size {
        width: area.client_width() as f64,
        height: area.client_height() as f64,
    })
}

#[component]
pub fn WindowFrame(id: WindowId, app_id: AppId) -> impl IntoView {
    let store = use_app_store();
    let drag = create_drag_signals(initial_rect(id));
    let maximized = RwSignal::new(false);
    // Listeners go away with this frame's owner
    let _listeners = StoredValue::new_local(bind_global_listeners(drag, desktop_bounds, MIN_SIZE));

    let meta = app_id.meta();
    let is_minimized = move || store.windows().with(|wm| wm.get(id).map_or(true, |w| w.is_minimized));
    let is_focused = move || store.windows().with(|wm| wm.is_focused(id));
    let z_index = move || store.windows().with(|wm| wm.z_index(id).unwrap_or(BASE_Z_INDEX));

    let style = move || frame_style(drag.rect.get(), maximized.get(), is_minimized(), z_index());

    let on_frame_mousedown = move |_| {
        if !store.windows().with_untracked(|wm| wm.is_focused(id)) {
            store.windows().update(|wm| {
                wm.focus(id);
            });
        }
    };

    let start_move = make_on_mousedown(drag, DragMode::Move);
    let on_header_mousedown = move |ev: web_sys::MouseEvent| {
        if !maximized.get_untracked() {
            start_move(ev);
        }
    };

    let minimize = move |_| {
        store.windows().update(|wm| {
            wm.minimize(id);
        });
    };
    let toggle_maximize = move |_| maximized.update(|m| *m = !*m);
    let close = move |_| {
        store.windows().update(|wm| {
            wm.close(id);
        });
        tracing::debug!(window = %id, "window closed");
    };

    view! {
        <div
            class="window-frame"
            class:focused=is_focused
            class:maximized=move || maximized.get()
            class:dragging=move || drag.is_dragging()
            style=style
            on:mousedown=on_frame_mousedown
        >
            <div class="window-header" on:mousedown=on_header_mousedown>
                <div class="window-title">
                    <span class="window-icon">{meta.icon}</span>
                    <span>{meta.title}</span>
                </div>
                <div class="window-controls">
                    <button class="window-btn" title="Minimizar" on:click=minimize>"─"</button>
                    <button class="window-btn" title="Maximizar" on:click=toggle_maximize>
                        {move || if maximized.get() { "❐" } else { "□" }}
                    </button>
                    <button class="window-btn close" title="Fechar" on:click=close>"✕"</button>
                </div>
            </div>
            <div class="window-body">
                <AppSurface app_id=app_id />
            </div>
            <Show when=move || !maximized.get()>
                <div class="resize-grip right" on:mousedown=make_on_mousedown(drag, DragMode::Resize(ResizeEdge::Right))></div>
                <div class="resize-grip bottom" on:mousedown=make_on_mousedown(drag, DragMode::Resize(ResizeEdge::Bottom))></div>
                <div class="resize-grip corner" on:mousedown=make_on_mousedown(drag, DragMode::Resize(ResizeEdge::BottomRight))></div>
            </Show>
        </div>
    }
}
