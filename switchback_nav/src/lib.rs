// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switchback Nav: a navigation-state engine for declarative UIs.
//!
//! This crate tracks what screens and modal overlays are currently visible,
//! in what order they were added, and lets a caller request structured
//! transitions — "push a screen", "present an overlay", "dismiss back to
//! screen X" — without manually reconciling several independent visual
//! stacks.
//!
//! The core type is [`Navigator`], which owns:
//!
//! - A **root stack** of pushed [`Screen`]s.
//! - A **modal stack** of presented [`Modal`]s (sheets or full-screen
//!   covers), each owning its own nested screen stack.
//! - A single chronological **history** log of [`HistoryRecord`]s unifying
//!   all containers, the source of truth for "what happened most recently".
//! - A **suppression set** that keeps completion callbacks from firing twice
//!   when an explicit removal and the rendering layer's own reactive diffing
//!   observe the same structural change.
//!
//! The crate does not render anything and does not assume any particular UI
//! framework. The rendering layer is an external collaborator: it draws the
//! tops of the observable stacks, builds content lazily through each entry's
//! idempotent factory, and reports gesture-driven shrinkage back through
//! [`Navigator::sync_root`] / [`Navigator::sync_modal_screens`].
//!
//! ## Pushing and dismissing
//!
//! ```rust
//! use switchback_nav::Navigator;
//!
//! let mut nav = Navigator::new();
//! nav.register_root("Home");
//!
//! nav.push("List", || "list screen");
//! nav.push_with("Detail", || "detail screen", || println!("detail closed"));
//!
//! assert_eq!(nav.root_stack().len(), 2);
//!
//! // Pops "Detail" and fires its completion callback exactly once.
//! nav.dismiss_push();
//! assert_eq!(nav.root_stack().len(), 1);
//! ```
//!
//! ## Modals route pushes
//!
//! While a modal is open, pushes land in its nested stack; the unified
//! [`Navigator::dismiss`] always removes whatever happened most recently:
//!
//! ```rust
//! use switchback_nav::{ModalRequest, Navigator, PresentationStyle};
//!
//! let mut nav = Navigator::new();
//! nav.push("List", || "list");
//! nav.present(ModalRequest::sheet("Compose", || "compose"), PresentationStyle::Stack);
//! nav.push("Attachments", || "attachments"); // inside the modal
//!
//! nav.dismiss(); // pops "Attachments"
//! nav.dismiss(); // dismisses the "Compose" modal
//! nav.dismiss(); // pops "List"
//! assert!(nav.history().is_empty());
//! ```
//!
//! ## Dismiss-to and policies
//!
//! [`Navigator::dismiss_to_with`] resolves a [`TypeTag`] against history
//! ([`TargetResolution::Root`] picks the oldest occurrence,
//! [`TargetResolution::Recent`] the most recent, skipping the current top
//! when another match exists) and removes everything above the target. A
//! [`DismissalPolicy`] selects which removed entries' callbacks fire: every
//! one (`All`), only the screen being left (`Topmost`), or only the screen
//! adjacent to the destination (`Landing`).
//!
//! ```rust
//! use switchback_nav::{DismissalPolicy, Navigator, TargetResolution};
//!
//! let mut nav = Navigator::new();
//! nav.register_root("Root");
//! for tag in ["A", "B", "C"] {
//!     nav.push(tag, move || tag);
//! }
//!
//! nav.dismiss_to_with("A", TargetResolution::Root, DismissalPolicy::All);
//! assert_eq!(nav.root_stack().len(), 1);
//! assert_eq!(nav.history().len(), 2); // Root marker + A
//! ```
//!
//! ## Diagnostics
//!
//! No operation is fatal: dismissing to an absent tag, reporting a
//! non-shrinking sync, or popping from an empty stack are advisory no-ops,
//! reported through the [`log`] facade rather than returned as errors.
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature (default) is
//! only forwarded for dependants that prefer building with the standard
//! library.

#![no_std]

extern crate alloc;

mod entry;
mod history;
mod modal;
mod navigator;
mod policy;

pub use entry::{ContentFactory, EntryId, OnDismiss, Screen, TypeTag};
pub use history::{HistoryRecord, Location, RecordKind, TargetResolution};
pub use modal::{Detent, Modal, ModalRequest, ModalStyle, PresentOptions, Visibility};
pub use navigator::{Navigator, NavigatorDefaults};
pub use policy::{DismissalPolicy, PresentationStyle};
