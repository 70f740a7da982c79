//! Window Manager
//!
//! In-memory collection of open application windows plus a focus stack.
//! The stack orders every open window by recency (last = most recent); the
//! focused window is always the most recent *visible* one, so it is also the
//! topmost in stacking order.
//!
//! Position and size are not tracked here; each window frame owns its own
//! geometry. Operations on unknown ids are no-ops.

use std::fmt;

use crate::apps::AppId;

/// z-index of the bottom-most window
pub const BASE_Z_INDEX: u32 = 40;

/// Opaque window handle, unique for the lifetime of a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    /// Opening sequence number, starting at 1
    pub fn seq(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon: &'static str,
    pub is_minimized: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowManager {
    /// Opening order
    windows: Vec<WindowState>,
    /// Recency order, most recent last
    stack: Vec<WindowId>,
    focused: Option<WindowId>,
    next_id: u32,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new window for `app_id` and focus it
    pub fn open(&mut self, app_id: AppId) -> WindowId {
        self.next_id += 1;
        let id = WindowId(self.next_id);
        let meta = app_id.meta();

        self.windows.push(WindowState {
            id,
            app_id,
            title: meta.title.to_string(),
            icon: meta.icon,
            is_minimized: false,
        });
        self.stack.push(id);
        self.focused = Some(id);
        id
    }

    /// Remove a window. Returns false when `id` is unknown.
    pub fn close(&mut self, id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() == before {
            return false;
        }
        self.stack.retain(|w| *w != id);
        if self.focused == Some(id) {
            self.focused = self.top_visible();
        }
        true
    }

    /// Hide a window; focus passes to the next visible one
    pub fn minimize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.is_minimized = true;
        if self.focused == Some(id) {
            self.focused = self.top_visible();
        }
        true
    }

    /// Show a window (if hidden) and focus it
    pub fn restore(&mut self, id: WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.is_minimized = false;
        self.raise(id);
        true
    }

    /// Raise a visible window. Minimized windows must be restored instead.
    pub fn focus(&mut self, id: WindowId) -> bool {
        match self.get(id) {
            Some(window) if !window.is_minimized => {
                self.raise(id);
                true
            }
            _ => false,
        }
    }

    /// Taskbar click: restore a hidden window, minimize the focused one,
    /// otherwise focus
    pub fn toggle_from_taskbar(&mut self, id: WindowId) -> bool {
        match self.get(id) {
            None => false,
            Some(w) if w.is_minimized => self.restore(id),
            Some(_) if self.focused == Some(id) => self.minimize(id),
            Some(_) => self.focus(id),
        }
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn is_focused(&self, id: WindowId) -> bool {
        self.focused == Some(id)
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// All open windows in opening order
    pub fn windows(&self) -> &[WindowState] {
        &self.windows
    }

    /// Non-minimized windows in opening order
    pub fn visible(&self) -> impl Iterator<Item = &WindowState> {
        self.windows.iter().filter(|w| !w.is_minimized)
    }

    /// Stacking level; higher is closer to the viewer
    pub fn z_index(&self, id: WindowId) -> Option<u32> {
        self.stack
            .iter()
            .position(|w| *w == id)
            .map(|pos| BASE_Z_INDEX + pos as u32)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowState> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn raise(&mut self, id: WindowId) {
        self.stack.retain(|w| *w != id);
        self.stack.push(id);
        self.focused = Some(id);
    }

    fn top_visible(&self) -> Option<WindowId> {
        self.stack
            .iter()
            .rev()
            .copied()
            .find(|id| self.get(*id).map_or(false, |w| !w.is_minimized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn visible_ids(wm: &WindowManager) -> BTreeSet<WindowId> {
        wm.visible().map(|w| w.id).collect()
    }

    #[test]
    fn test_open_assigns_unique_ids_and_focus() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::Terminal);
        let b = wm.open(AppId::Terminal);

        assert_ne!(a, b);
        assert_eq!(wm.len(), 2);
        assert_eq!(wm.focused(), Some(b));
        assert_eq!(wm.get(a).unwrap().title, "Terminal");
        assert!(!wm.get(a).unwrap().is_minimized);
    }

    #[test]
    fn test_close_focused_moves_focus_to_previous() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);
        let c = wm.open(AppId::Terminal);

        assert!(wm.close(c));
        assert_eq!(wm.focused(), Some(b));
        assert!(wm.close(b));
        assert_eq!(wm.focused(), Some(a));
        assert!(wm.close(a));
        assert_eq!(wm.focused(), None);
        assert!(wm.is_empty());
    }

    #[test]
    fn test_close_unfocused_keeps_focus() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);

        assert!(wm.close(a));
        assert_eq!(wm.focused(), Some(b));
    }

    #[test]
    fn test_close_twice_is_safe() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::Word);
        assert!(wm.close(a));
        assert!(!wm.close(a));
        assert!(wm.is_empty());
    }

    #[test]
    fn test_close_focus_follows_recency() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);
        let c = wm.open(AppId::Terminal);

        wm.focus(a);
        wm.focus(c);
        wm.close(c);
        assert_eq!(wm.focused(), Some(a));
        assert!(wm.get(b).is_some());
    }

    #[test]
    fn test_minimize_passes_focus() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::Excel);
        let b = wm.open(AppId::Ide);

        assert!(wm.minimize(b));
        assert!(wm.get(b).unwrap().is_minimized);
        assert_eq!(wm.focused(), Some(a));

        assert!(wm.minimize(a));
        assert_eq!(wm.focused(), None);
        assert_eq!(visible_ids(&wm).len(), 0);
    }

    #[test]
    fn test_closing_skips_minimized_windows_for_focus() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);
        let c = wm.open(AppId::Terminal);

        wm.minimize(b);
        wm.focus(c);
        wm.close(c);
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn test_restore_focuses_and_raises() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);

        wm.minimize(a);
        assert!(wm.restore(a));
        assert!(!wm.get(a).unwrap().is_minimized);
        assert_eq!(wm.focused(), Some(a));
        assert!(wm.z_index(a).unwrap() > wm.z_index(b).unwrap());
    }

    #[test]
    fn test_restore_visible_window_only_focuses() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let _b = wm.open(AppId::Browser);
        let before = visible_ids(&wm);

        assert!(wm.restore(a));
        assert_eq!(visible_ids(&wm), before);
        assert_eq!(wm.focused(), Some(a));
        assert_eq!(wm.len(), 2);
    }

    #[test]
    fn test_focus_does_not_change_membership() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);

        assert!(wm.focus(a));
        assert_eq!(wm.len(), 2);
        assert_eq!(wm.windows()[0].id, a);
        assert_eq!(wm.windows()[1].id, b);
        assert!(wm.is_focused(a));
    }

    #[test]
    fn test_focus_on_minimized_is_noop() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);
        wm.minimize(a);

        assert!(!wm.focus(a));
        assert_eq!(wm.focused(), Some(b));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::Terminal);
        let ghost = WindowId(999);

        assert!(!wm.close(ghost));
        assert!(!wm.minimize(ghost));
        assert!(!wm.restore(ghost));
        assert!(!wm.focus(ghost));
        assert!(!wm.toggle_from_taskbar(ghost));
        assert_eq!(wm.z_index(ghost), None);
        assert_eq!(wm.focused(), Some(a));
        assert_eq!(wm.len(), 1);
    }

    #[test]
    fn test_focused_window_is_topmost() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::TextEditor);
        let b = wm.open(AppId::Browser);
        let c = wm.open(AppId::Terminal);
        wm.focus(b);

        let top = [a, b, c].into_iter().max_by_key(|id| wm.z_index(*id).unwrap()).unwrap();
        assert_eq!(top, b);
        assert_eq!(wm.z_index(a), Some(BASE_Z_INDEX));
    }

    #[test]
    fn test_taskbar_toggle_cycle() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppId::Chrome);
        let b = wm.open(AppId::Word);

        // unfocused -> focus
        assert!(wm.toggle_from_taskbar(a));
        assert_eq!(wm.focused(), Some(a));
        // focused -> minimize
        assert!(wm.toggle_from_taskbar(a));
        assert!(wm.get(a).unwrap().is_minimized);
        assert_eq!(wm.focused(), Some(b));
        // minimized -> restore
        assert!(wm.toggle_from_taskbar(a));
        assert!(!wm.get(a).unwrap().is_minimized);
        assert_eq!(wm.focused(), Some(a));
    }

    /// Visible set == opened - closed - (minimized and not restored)
    #[test]
    fn test_visible_set_matches_model_over_random_ops() {
        let mut wm = WindowManager::new();
        let mut opened: Vec<WindowId> = Vec::new();
        let mut closed: BTreeSet<WindowId> = BTreeSet::new();
        let mut hidden: BTreeSet<WindowId> = BTreeSet::new();

        // Small LCG keeps the sequence deterministic
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move |bound: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % bound
        };

        for _ in 0..2_000 {
            let op = next(4);
            if op == 0 || opened.is_empty() {
                let app = AppId::ALL[next(AppId::ALL.len() as u64) as usize];
                opened.push(wm.open(app));
                continue;
            }
            // Occasionally target an id that was never issued
            let id = if next(10) == 0 {
                WindowId(u32::MAX)
            } else {
                opened[next(opened.len() as u64) as usize]
            };
            match op {
                1 => {
                    wm.close(id);
                    if opened.contains(&id) {
                        closed.insert(id);
                        hidden.remove(&id);
                    }
                }
                2 => {
                    if wm.minimize(id) {
                        hidden.insert(id);
                    }
                }
                _ => {
                    if wm.restore(id) {
                        hidden.remove(&id);
                    }
                }
            }

            let expected: BTreeSet<WindowId> = opened
                .iter()
                .copied()
                .filter(|id| !closed.contains(id) && !hidden.contains(id))
                .collect();
            assert_eq!(visible_ids(&wm), expected);

            if let Some(focused) = wm.focused() {
                assert!(expected.contains(&focused));
                let top = expected.iter().max_by_key(|id| wm.z_index(**id).unwrap()).copied();
                assert_eq!(top, Some(focused));
            } else {
                assert!(expected.is_empty());
            }
        }
    }
}
