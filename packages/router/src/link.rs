//! Clicks on links, as reported by the host's event source.

/// The mouse button that triggered a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Usually the wheel or middle button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
}

/// A click on an element, reduced to what the router needs to decide whether to take it over.
///
/// ```rust
/// # use wayfinder_router::link::{LinkClick, MouseButton};
/// let click = LinkClick::routed("/users/7");
/// assert_eq!(click.intercept_target(), Some("/users/7"));
///
/// // opening in a new tab stays with the host
/// assert_eq!(click.clone().with_modifier(true).intercept_target(), None);
/// assert_eq!(click.with_button(MouseButton::Auxiliary).intercept_target(), None);
///
/// // plain links are never intercepted
/// assert_eq!(LinkClick::plain("/users/7").intercept_target(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkClick {
    /// The `href` of the clicked element, if it has one.
    pub href: Option<String>,
    /// Whether the element opted into client side routing (a `data-route` attribute).
    pub routed: bool,
    /// The button used to click.
    pub button: MouseButton,
    /// Whether a modifier key (ctrl, meta, shift or alt) was held.
    pub modified: bool,
}

impl LinkClick {
    /// A primary button click on an element marked for client side routing.
    pub fn routed(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            routed: true,
            ..Default::default()
        }
    }

    /// A primary button click on an ordinary link.
    pub fn plain(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Set the button used to click.
    pub fn with_button(self, button: MouseButton) -> Self {
        Self { button, ..self }
    }

    /// Set whether a modifier key was held.
    pub fn with_modifier(self, modified: bool) -> Self {
        Self { modified, ..self }
    }

    /// The `href` the router should navigate to, or [`None`] if the click belongs to the host.
    ///
    /// External targets are not filtered here; the router does that.
    pub fn intercept_target(&self) -> Option<&str> {
        if !self.routed || self.modified || self.button != MouseButton::Primary {
            return None;
        }

        self.href.as_deref().filter(|href| !href.is_empty())
    }
}
