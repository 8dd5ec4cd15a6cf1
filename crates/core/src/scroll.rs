//! Scroll-derived page state.
//!
//! [`ScrollReactor`] turns a single vertical scroll offset into the four
//! independent UI states the page reacts to: header style, back-to-top
//! button visibility, the active navigation link and the parallax offset of
//! the hero image.

use serde::Serialize;

/// Thresholds and factors for [`ScrollReactor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Header switches to [`HeaderStyle::Scrolled`] strictly above this offset.
    pub header_threshold: f64,
    /// Back-to-top becomes visible strictly above this offset.
    pub back_to_top_threshold: f64,
    /// Subtracted from each section's top; matches the CSS `scroll-padding-top`.
    pub section_correction: f64,
    /// Hero image translation per pixel scrolled.
    pub parallax_factor: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold: 50.0,
            back_to_top_threshold: 300.0,
            section_correction: 70.0,
            parallax_factor: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    Top,
    Scrolled,
}

impl HeaderStyle {
    /// Class toggled on the `<header>` element.
    pub const SCROLLED_CLASS: &'static str = "scrolled";

    #[must_use]
    pub const fn is_scrolled(self) -> bool {
        matches!(self, Self::Scrolled)
    }
}

/// Back-to-top button state, applied as a visibility + opacity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackToTop {
    Hidden,
    Visible,
}

impl BackToTop {
    /// CSS `visibility` value.
    #[must_use]
    pub const fn visibility(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }

    /// CSS `opacity` value.
    #[must_use]
    pub const fn opacity(self) -> &'static str {
        match self {
            Self::Hidden => "0",
            Self::Visible => "1",
        }
    }
}

/// A page section the navigation can point at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAnchor {
    /// The section's element ID (the nav link's `href` without `#`).
    pub id: String,
    /// Offset of the section's top edge from the top of the document.
    pub top: f64,
}

impl SectionAnchor {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// Which navigation link is highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ActiveLink {
    /// Above every section; the `href="#"` home link is active.
    Home,
    /// The section with this ID is active.
    Section(String),
}

impl ActiveLink {
    /// Whether a nav link with `href` should carry the `active` class.
    #[must_use]
    pub fn matches_href(&self, href: &str) -> bool {
        match self {
            Self::Home => href == "#",
            Self::Section(id) => href.strip_prefix('#').unwrap_or(href) == id,
        }
    }
}

/// Everything the page derives from one scroll offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollState {
    pub header: HeaderStyle,
    pub back_to_top: BackToTop,
    pub active_link: ActiveLink,
    /// Vertical translation of the parallax image, in pixels. Unbounded.
    pub parallax_offset: f64,
}

/// Derives [`ScrollState`] from a scroll offset and the page's sections.
#[derive(Debug, Clone, Default)]
pub struct ScrollReactor {
    config: ScrollConfig,
    sections: Vec<SectionAnchor>,
}

impl ScrollReactor {
    /// Create a reactor over sections ordered top to bottom.
    #[must_use]
    pub const fn new(config: ScrollConfig, sections: Vec<SectionAnchor>) -> Self {
        Self { config, sections }
    }

    /// Replace the section list, e.g. after a layout change.
    pub fn set_sections(&mut self, sections: Vec<SectionAnchor>) {
        self.sections = sections;
    }

    /// Compute every derived state for `offset`.
    #[must_use]
    pub fn react(&self, offset: f64) -> ScrollState {
        ScrollState {
            header: self.header_style(offset),
            back_to_top: self.back_to_top(offset),
            active_link: self.active_link(offset),
            parallax_offset: self.parallax_offset(offset),
        }
    }

    #[must_use]
    pub fn header_style(&self, offset: f64) -> HeaderStyle {
        if offset > self.config.header_threshold {
            HeaderStyle::Scrolled
        } else {
            HeaderStyle::Top
        }
    }

    #[must_use]
    pub fn back_to_top(&self, offset: f64) -> BackToTop {
        if offset > self.config.back_to_top_threshold {
            BackToTop::Visible
        } else {
            BackToTop::Hidden
        }
    }

    /// The last section whose corrected top is at or above `offset`.
    ///
    /// Sections are in document order, so the last qualifying one wins.
    #[must_use]
    pub fn active_link(&self, offset: f64) -> ActiveLink {
        self.sections
            .iter()
            .rfind(|section| section.top - self.config.section_correction <= offset)
            .map_or(ActiveLink::Home, |section| {
                ActiveLink::Section(section.id.clone())
            })
    }

    #[must_use]
    pub fn parallax_offset(&self, offset: f64) -> f64 {
        offset * self.config.parallax_factor
    }
}
