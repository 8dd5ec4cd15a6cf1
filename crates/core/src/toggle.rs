//! Open/closed overlays that lock background scrolling.
//!
//! The cart panel and the mobile navigation menu both take over the screen
//! while open. [`PageOverlays`] tracks both and derives the
//! `body-no-scroll` lock from them, so it holds until the last one closes.

/// Class put on `<body>` while any overlay is open.
pub const BODY_NO_SCROLL_CLASS: &str = "body-no-scroll";

/// Class put on an overlay's elements while it is open.
pub const ACTIVE_CLASS: &str = "active";

/// Which overlay a transition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    CartPanel,
    NavMenu,
}

/// Page-level overlay state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageOverlays {
    cart_open: bool,
    nav_open: bool,
}

impl PageOverlays {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an overlay. Returns its new open state.
    ///
    /// Used by the cart icon, the close button and the backdrop, and by the
    /// hamburger.
    pub fn toggle(&mut self, kind: OverlayKind) -> bool {
        let open = self.open_mut(kind);
        *open = !*open;
        *open
    }

    /// Close an overlay. Returns whether it was open.
    ///
    /// Clicking a nav link closes the menu this way.
    pub fn close(&mut self, kind: OverlayKind) -> bool {
        std::mem::replace(self.open_mut(kind), false)
    }

    #[must_use]
    pub const fn is_open(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::CartPanel => self.cart_open,
            OverlayKind::NavMenu => self.nav_open,
        }
    }

    /// Whether background scrolling must be blocked.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.cart_open || self.nav_open
    }

    const fn open_mut(&mut self, kind: OverlayKind) -> &mut bool {
        match kind {
            OverlayKind::CartPanel => &mut self.cart_open,
            OverlayKind::NavMenu => &mut self.nav_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let overlays = PageOverlays::new();
        assert!(!overlays.is_open(OverlayKind::CartPanel));
        assert!(!overlays.is_open(OverlayKind::NavMenu));
        assert!(!overlays.scroll_locked());
    }

    #[test]
    fn test_toggle_cart_locks_scroll() {
        let mut overlays = PageOverlays::new();

        assert!(overlays.toggle(OverlayKind::CartPanel));
        assert!(overlays.scroll_locked());

        assert!(!overlays.toggle(OverlayKind::CartPanel));
        assert!(!overlays.scroll_locked());
    }

    #[test]
    fn test_lock_held_until_last_overlay_closes() {
        let mut overlays = PageOverlays::new();
        overlays.toggle(OverlayKind::NavMenu);
        overlays.toggle(OverlayKind::CartPanel);

        overlays.toggle(OverlayKind::CartPanel);
        assert!(overlays.scroll_locked());

        assert!(overlays.close(OverlayKind::NavMenu));
        assert!(!overlays.scroll_locked());
    }

    #[test]
    fn test_close_when_already_closed() {
        let mut overlays = PageOverlays::new();
        assert!(!overlays.close(OverlayKind::NavMenu));
        assert!(!overlays.is_open(OverlayKind::NavMenu));
    }
}
