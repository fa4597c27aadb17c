// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal overlays: presentation styles, options, and the modal entry type.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::entry::{ContentFactory, EntryId, OnDismiss, Screen, TypeTag};

/// How a modal is layered over the content beneath it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModalStyle {
    /// A partial-height overlay sheet.
    Sheet,
    /// A full-screen cover.
    FullScreen,
}

/// A resting height the rendering layer may offer for a sheet.
///
/// Purely advisory: the engine records detents and hands them to the
/// rendering collaborator untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Detent {
    /// Roughly half the available height.
    Medium,
    /// The full available height.
    Large,
    /// A fraction of the available height in `0.0..=1.0`.
    Fraction(f64),
    /// An absolute height in the rendering layer's units.
    Height(f64),
}

/// Visibility preference for auxiliary chrome such as a drag indicator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Let the rendering layer decide.
    #[default]
    Automatic,
    /// Always shown.
    Visible,
    /// Always hidden.
    Hidden,
}

/// Presentation options attached to a modal at creation time.
///
/// # Example
///
/// ```
/// use switchback_nav::{Detent, PresentOptions, Visibility};
///
/// let opts = PresentOptions::new()
///     .with_detents([Detent::Medium, Detent::Large])
///     .with_drag_indicator(Visibility::Visible);
/// assert_eq!(opts.detents(), &[Detent::Medium, Detent::Large]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresentOptions {
    detents: Vec<Detent>,
    drag_indicator: Visibility,
}

impl PresentOptions {
    /// Creates options with no detents and automatic chrome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the detents offered to the rendering layer.
    #[must_use]
    pub fn with_detents(mut self, detents: impl IntoIterator<Item = Detent>) -> Self {
        self.detents = detents.into_iter().collect();
        self
    }

    /// Sets the drag-indicator visibility preference.
    #[must_use]
    pub fn with_drag_indicator(mut self, visibility: Visibility) -> Self {
        self.drag_indicator = visibility;
        self
    }

    /// Returns the detents, empty if the rendering layer should use its default.
    #[must_use]
    pub fn detents(&self) -> &[Detent] {
        &self.detents
    }

    /// Returns the drag-indicator preference.
    #[must_use]
    pub fn drag_indicator(&self) -> Visibility {
        self.drag_indicator
    }
}

/// An entry presented as an overlay, owning its own nested screen stack.
///
/// The nested stack itself lives in the [`Navigator`], keyed by this modal's
/// id; it is created empty at presentation time and discarded atomically with
/// the modal.
///
/// [`Navigator`]: crate::Navigator
pub struct Modal<V> {
    screen: Screen<V>,
    style: ModalStyle,
    options: PresentOptions,
}

impl<V: 'static> Modal<V> {
    pub(crate) fn new(screen: Screen<V>, style: ModalStyle, options: PresentOptions) -> Self {
        Self {
            screen,
            style,
            options,
        }
    }

    /// Returns this modal's id.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.screen.id()
    }

    /// Returns this modal's type tag.
    #[must_use]
    pub fn tag(&self) -> &TypeTag {
        self.screen.tag()
    }

    /// Returns how this modal is layered.
    #[must_use]
    pub fn style(&self) -> ModalStyle {
        self.style
    }

    /// Returns the presentation options attached at creation.
    #[must_use]
    pub fn options(&self) -> &PresentOptions {
        &self.options
    }

    /// Produces the modal root's renderable content.
    #[must_use]
    pub fn make_content(&self) -> V {
        self.screen.make_content()
    }

    pub(crate) fn fire_on_dismiss(&mut self) {
        self.screen.fire_on_dismiss();
    }
}

impl<V: 'static> fmt::Debug for Modal<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modal")
            .field("screen", &self.screen)
            .field("style", &self.style)
            .field("options", &self.options)
            .finish()
    }
}

/// Everything needed to present one modal.
///
/// Built with [`ModalRequest::sheet`] or [`ModalRequest::full_screen`] and
/// refined with the `with_*` setters, then handed to
/// [`Navigator::present`](crate::Navigator::present).
///
/// # Example
///
/// ```
/// use switchback_nav::{Detent, ModalRequest, PresentOptions};
///
/// let request = ModalRequest::sheet("Filters", || "filter panel")
///     .with_options(PresentOptions::new().with_detents([Detent::Medium]))
///     .with_on_dismiss(|| println!("filters closed"));
/// ```
pub struct ModalRequest<V> {
    pub(crate) tag: TypeTag,
    pub(crate) factory: ContentFactory<V>,
    pub(crate) style: ModalStyle,
    pub(crate) options: PresentOptions,
    pub(crate) on_dismiss: Option<OnDismiss>,
}

impl<V: 'static> ModalRequest<V> {
    /// Starts a request for an overlay sheet.
    #[must_use]
    pub fn sheet(tag: impl Into<TypeTag>, factory: impl Fn() -> V + 'static) -> Self {
        Self::with_style(tag, factory, ModalStyle::Sheet)
    }

    /// Starts a request for a full-screen cover.
    #[must_use]
    pub fn full_screen(tag: impl Into<TypeTag>, factory: impl Fn() -> V + 'static) -> Self {
        Self::with_style(tag, factory, ModalStyle::FullScreen)
    }

    fn with_style(
        tag: impl Into<TypeTag>,
        factory: impl Fn() -> V + 'static,
        style: ModalStyle,
    ) -> Self {
        Self {
            tag: tag.into(),
            factory: Box::new(factory),
            style,
            options: PresentOptions::default(),
            on_dismiss: None,
        }
    }

    /// Attaches presentation options.
    #[must_use]
    pub fn with_options(mut self, options: PresentOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches a completion callback, invoked exactly once when the modal
    /// is removed.
    #[must_use]
    pub fn with_on_dismiss(mut self, on_dismiss: impl FnOnce() + 'static) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }
}

impl<V: 'static> fmt::Debug for ModalRequest<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalRequest")
            .field("tag", &self.tag)
            .field("style", &self.style)
            .field("options", &self.options)
            .field("has_on_dismiss", &self.on_dismiss.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder_round_trip() {
        let opts = PresentOptions::new()
            .with_detents([Detent::Medium, Detent::Fraction(0.8)])
            .with_drag_indicator(Visibility::Hidden);
        assert_eq!(opts.detents(), &[Detent::Medium, Detent::Fraction(0.8)]);
        assert_eq!(opts.drag_indicator(), Visibility::Hidden);
    }

    #[test]
    fn request_carries_style_and_tag() {
        let req = ModalRequest::full_screen("Login", || 1_u8);
        assert_eq!(req.style, ModalStyle::FullScreen);
        assert_eq!(req.tag.as_str(), "Login");
        assert!(req.on_dismiss.is_none());
    }
}
