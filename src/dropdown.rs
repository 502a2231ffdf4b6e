// Dropdown menu controller with outside-click dismissal
//
// Pointer-down events are broadcast through a PointerHub. The dropdown
// subscribes once when it is mounted and holds the returned guard; dropping
// the controller drops the guard, which removes the listener.

use ratatui::layout::{Position, Rect};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut(Position)>;

#[derive(Default)]
struct HubInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    /// Ids whose guards were dropped while listeners were being dispatched
    removed: RefCell<Vec<u64>>,
}

impl HubInner {
    fn remove(&self, id: u64) {
        match self.listeners.try_borrow_mut() {
            Ok(mut listeners) => listeners.retain(|(lid, _)| *lid != id),
            Err(_) => self.removed.borrow_mut().push(id),
        }
    }
}

/// Global pointer-down broadcaster for the UI thread
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<HubInner>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for the lifetime of the returned guard
    pub fn subscribe(&self, listener: impl FnMut(Position) + 'static) -> PointerSubscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));

        PointerSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver a pointer-down to every listener
    ///
    /// Guards dropped by a listener take effect once delivery finishes.
    pub fn dispatch(&self, position: Position) {
        let mut listeners = self.inner.listeners.borrow_mut();
        for (_, listener) in listeners.iter_mut() {
            listener(position);
        }

        let removed = std::mem::take(&mut *self.inner.removed.borrow_mut());
        if !removed.is_empty() {
            tracing::debug!("Removing {} listeners dropped during dispatch", removed.len());
            listeners.retain(|(id, _)| !removed.contains(id));
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// Removes its listener from the hub when dropped
pub struct PointerSubscription {
    id: u64,
    hub: Weak<HubInner>,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(self.id);
        }
    }
}

/// Entries in the account menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    EditProfile,
    ChangePassword,
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [
        MenuItem::EditProfile,
        MenuItem::ChangePassword,
        MenuItem::Logout,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::EditProfile => "Edit Profile",
            MenuItem::ChangePassword => "Change Password",
            MenuItem::Logout => "Logout",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MenuItem::EditProfile => "✎",
            MenuItem::ChangePassword => "🔒",
            MenuItem::Logout => "⏻",
        }
    }
}

/// Open/closed state of the account menu
pub struct DropdownController {
    open: Rc<Cell<bool>>,
    bounds: Rc<Cell<Rect>>,
    highlighted: usize,
    _subscription: PointerSubscription,
}

impl DropdownController {
    /// Create the controller and install its outside-click listener
    pub fn mount(hub: &PointerHub) -> Self {
        let open = Rc::new(Cell::new(false));
        let bounds = Rc::new(Cell::new(Rect::default()));

        let listener_open = Rc::clone(&open);
        let listener_bounds = Rc::clone(&bounds);
        let subscription = hub.subscribe(move |position| {
            if listener_open.get() && !listener_bounds.get().contains(position) {
                tracing::debug!("Pointer down outside menu, closing");
                listener_open.set(false);
            }
        });

        Self {
            open,
            bounds,
            highlighted: 0,
            _subscription: subscription,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&mut self) {
        let open = !self.open.get();
        self.open.set(open);
        if open {
            self.highlighted = 0;
        }
    }

    pub fn close(&mut self) {
        self.open.set(false);
    }

    /// Container bounds (trigger plus menu), refreshed on every layout pass
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    pub fn highlighted_item(&self) -> MenuItem {
        MenuItem::ALL[self.highlighted % MenuItem::ALL.len()]
    }

    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % MenuItem::ALL.len();
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = (self.highlighted + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    /// Run the item's action, then close whatever the action returned
    pub fn select_item<T>(&mut self, item: MenuItem, action: impl FnOnce(MenuItem) -> T) -> T {
        let result = action(item);
        self.close();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> (PointerHub, DropdownController) {
        let hub = PointerHub::new();
        let dropdown = DropdownController::mount(&hub);
        dropdown.set_bounds(Rect::new(60, 0, 20, 6));
        (hub, dropdown)
    }

    #[test]
    fn test_toggle_flips_state() {
        let (_hub, mut dropdown) = mounted();
        assert!(!dropdown.is_open());
        dropdown.toggle();
        assert!(dropdown.is_open());
        dropdown.toggle();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_outside_click_closes_once() {
        let (hub, mut dropdown) = mounted();
        dropdown.toggle();

        hub.dispatch(Position::new(5, 5));
        assert!(!dropdown.is_open());

        // Further outside clicks while closed do nothing
        hub.dispatch(Position::new(5, 5));
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_inside_click_keeps_open() {
        let (hub, mut dropdown) = mounted();
        dropdown.toggle();
        hub.dispatch(Position::new(65, 3));
        assert!(dropdown.is_open());
    }

    #[test]
    fn test_listener_installed_once_and_released_on_drop() {
        let hub = PointerHub::new();
        let mut dropdown = DropdownController::mount(&hub);
        assert_eq!(hub.listener_count(), 1);

        for _ in 0..5 {
            dropdown.toggle();
        }
        assert_eq!(hub.listener_count(), 1);

        drop(dropdown);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(Position::new(0, 0));
    }

    #[test]
    fn test_guard_dropped_during_dispatch_is_removed_after() {
        let hub = PointerHub::new();
        let inner_guard = Rc::new(RefCell::new(Some(hub.subscribe(|_| {}))));

        let held = Rc::clone(&inner_guard);
        let _outer = hub.subscribe(move |_| {
            held.borrow_mut().take();
        });
        assert_eq!(hub.listener_count(), 2);

        hub.dispatch(Position::new(1, 1));
        assert!(inner_guard.borrow().is_none());
        assert_eq!(hub.listener_count(), 1);

        // Later dispatches keep working
        hub.dispatch(Position::new(2, 2));
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_select_item_closes_even_when_action_fails() {
        let (_hub, mut dropdown) = mounted();
        dropdown.toggle();
        let result: Result<(), &str> = dropdown.select_item(MenuItem::Logout, |_| Err("offline"));
        assert!(result.is_err());
        assert!(!dropdown.is_open());

        dropdown.toggle();
        let chosen = dropdown.select_item(MenuItem::EditProfile, |item| item);
        assert_eq!(chosen, MenuItem::EditProfile);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_highlight_wraps() {
        let (_hub, mut dropdown) = mounted();
        dropdown.toggle();
        assert_eq!(dropdown.highlighted_item(), MenuItem::EditProfile);
        dropdown.highlight_prev();
        assert_eq!(dropdown.highlighted_item(), MenuItem::Logout);
        dropdown.highlight_next();
        dropdown.highlight_next();
        assert_eq!(dropdown.highlighted_item(), MenuItem::ChangePassword);
    }
}
