// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigable entries: identifiers, type tags, and pushed screens.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Identifies one navigable entry for the lifetime of its [`Navigator`].
///
/// Ids are allocated from a per-engine monotonic counter and are never
/// reused, so a stale id held by the rendering layer can never alias a
/// newer entry.
///
/// [`Navigator`]: crate::Navigator
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl EntryId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the underlying counter value of this id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntryId").field(&self.0).finish()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A caller-supplied comparable tag attached to every entry at creation.
///
/// Dismiss-to targeting matches on tags, so they should be stable names for
/// *kinds* of screens ("Settings", "ProductDetail"), not per-instance
/// values. Static strings are stored without allocating.
///
/// # Example
///
/// ```
/// use switchback_nav::TypeTag;
///
/// let a = TypeTag::new("Settings");
/// let b = TypeTag::new(String::from("Settings"));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Settings");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// Creates a tag from a static string or an owned one.
    #[must_use]
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.0).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TypeTag {
    fn from(tag: &'static str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

/// The content factory carried by every entry.
///
/// Invoked lazily by the rendering layer, possibly several times; it must be
/// idempotent and free of side effects.
pub type ContentFactory<V> = Box<dyn Fn() -> V>;

/// A completion callback, invoked at most once when its entry is removed.
pub type OnDismiss = Box<dyn FnOnce()>;

/// One pushed navigable unit on a screen stack.
///
/// A screen owns its content factory and an optional completion callback.
/// The callback is moved out when it fires, which makes "at most once" a
/// structural guarantee rather than a bookkeeping convention.
pub struct Screen<V> {
    id: EntryId,
    tag: TypeTag,
    factory: ContentFactory<V>,
    on_dismiss: Option<OnDismiss>,
}

impl<V: 'static> Screen<V> {
    pub(crate) fn new(
        id: EntryId,
        tag: TypeTag,
        factory: ContentFactory<V>,
        on_dismiss: Option<OnDismiss>,
    ) -> Self {
        Self {
            id,
            tag,
            factory,
            on_dismiss,
        }
    }

    /// Returns this screen's id.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Returns this screen's type tag.
    #[must_use]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Produces the screen's renderable content.
    ///
    /// The factory is idempotent; the rendering layer may call this as often
    /// as it rebuilds.
    #[must_use]
    pub fn make_content(&self) -> V {
        (self.factory)()
    }

    /// Fires the completion callback if it has not fired yet.
    pub(crate) fn fire_on_dismiss(&mut self) {
        if let Some(cb) = self.on_dismiss.take() {
            cb();
        }
    }
}

impl<V: 'static> fmt::Debug for Screen<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("has_on_dismiss", &self.on_dismiss.is_some())
            .finish_non_exhaustive()
    }
}
