// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation engine: containers, routing, and dismissal.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use log::{debug, info, warn};

use crate::entry::{ContentFactory, EntryId, OnDismiss, Screen, TypeTag};
use crate::history::{
    HistoryRecord, Location, RecordKind, ResolvedTarget, TargetResolution, resolve_target,
};
use crate::modal::{Modal, ModalRequest, ModalStyle};
use crate::policy::{DismissalPolicy, PresentationStyle};

/// Per-engine default modes, applied by the short-form dismiss operations.
///
/// The `Default` value is `Topmost` dismissal everywhere and `Recent` target
/// resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigatorDefaults {
    /// Policy used by [`Navigator::dismiss_to`].
    pub dismissal: DismissalPolicy,
    /// Policy used by [`Navigator::dismiss_modal`].
    pub modal_dismissal: DismissalPolicy,
    /// Resolution mode used by [`Navigator::dismiss_to`].
    pub resolution: TargetResolution,
}

/// A navigation-state engine for one visual region.
///
/// The navigator owns four containers — a root screen stack, a modal stack,
/// a nested screen stack per open modal — and a single chronological history
/// log that unifies them. Callers request structured transitions (`push`,
/// `present`, the `dismiss*` family) and the rendering layer observes the
/// resulting state through the read accessors; the engine never calls into
/// the rendering layer except through entry completion callbacks.
///
/// All operations complete synchronously before returning; a navigator is
/// only ever mutated from one logical thread (UI event handlers plus the
/// rendering layer's change-detection callback). Completion callbacks run
/// while the engine is mid-operation and must not re-enter the owning
/// navigator; use [`Registry::perform`] for cross-region dispatch instead.
///
/// [`Registry::perform`]: ../switchback_registry/struct.Registry.html#method.perform
///
/// # Example
///
/// ```
/// use switchback_nav::{ModalRequest, Navigator, PresentationStyle};
///
/// let mut nav = Navigator::new();
/// nav.register_root("Home");
///
/// nav.push("ProductList", || "list of products");
/// nav.present(
///     ModalRequest::sheet("Checkout", || "checkout flow"),
///     PresentationStyle::Stack,
/// );
/// nav.push("Payment", || "payment form"); // routed into the modal
///
/// assert_eq!(nav.root_stack().len(), 1);
/// assert_eq!(nav.modal_stack().len(), 1);
/// let checkout = nav.top_modal().unwrap().id();
/// assert_eq!(nav.modal_screens(checkout).unwrap().len(), 1);
///
/// // Unified dismiss pops whatever happened most recently.
/// nav.dismiss();
/// assert!(nav.modal_screens(checkout).unwrap().is_empty());
/// ```
pub struct Navigator<V> {
    next_id: u64,
    root_stack: Vec<Screen<V>>,
    modal_stack: Vec<Modal<V>>,
    modal_screens: HashMap<EntryId, Vec<Screen<V>>>,
    history: Vec<HistoryRecord>,
    /// Ids whose next reactive-diff removal report must not re-fire the
    /// callback. Populated by dismiss-to, consumed by the `sync_*` paths.
    suppressed: HashSet<EntryId>,
    defaults: NavigatorDefaults,
    revision: u64,
}

impl<V: 'static> Default for Navigator<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> Navigator<V> {
    /// Creates an empty navigator with [`NavigatorDefaults::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(NavigatorDefaults::default())
    }

    /// Creates an empty navigator with the given default modes.
    #[must_use]
    pub fn with_defaults(defaults: NavigatorDefaults) -> Self {
        Self {
            next_id: 0,
            root_stack: Vec::new(),
            modal_stack: Vec::new(),
            modal_screens: HashMap::new(),
            history: Vec::new(),
            suppressed: HashSet::new(),
            defaults,
            revision: 0,
        }
    }

    /// Returns the default modes this navigator was configured with.
    #[must_use]
    pub fn defaults(&self) -> NavigatorDefaults {
        self.defaults
    }

    /// Returns a counter that increments on every observable mutation.
    ///
    /// The rendering layer can compare revisions to decide whether anything
    /// needs redrawing.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn alloc_id(&mut self) -> EntryId {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- read surface ---------------------------------------------------

    /// The base screen stack, in navigation order.
    #[must_use]
    pub fn root_stack(&self) -> &[Screen<V>] {
        &self.root_stack
    }

    /// Currently open modals, in presentation order.
    #[must_use]
    pub fn modal_stack(&self) -> &[Modal<V>] {
        &self.modal_stack
    }

    /// The nested screen stack of an open modal, or `None` if the modal is
    /// not currently presented.
    #[must_use]
    pub fn modal_screens(&self, modal: EntryId) -> Option<&[Screen<V>]> {
        self.modal_screens.get(&modal).map(Vec::as_slice)
    }

    /// The unified chronological history log.
    #[must_use]
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// The most recently presented modal, if any.
    #[must_use]
    pub fn top_modal(&self) -> Option<&Modal<V>> {
        self.modal_stack.last()
    }

    /// The most recently presented sheet-style modal, if any.
    ///
    /// Mirrors the binding a rendering layer typically keeps per overlay
    /// style.
    #[must_use]
    pub fn top_sheet(&self) -> Option<&Modal<V>> {
        self.top_of_style(ModalStyle::Sheet)
    }

    /// The most recently presented full-screen modal, if any.
    #[must_use]
    pub fn top_full_screen(&self) -> Option<&Modal<V>> {
        self.top_of_style(ModalStyle::FullScreen)
    }

    fn top_of_style(&self, style: ModalStyle) -> Option<&Modal<V>> {
        self.modal_stack
            .iter()
            .rev()
            .find(|modal| modal.style() == style)
    }

    // --- roots and pushes -----------------------------------------------

    /// Records the region's root view in history so dismiss-to can land on
    /// it.
    ///
    /// Idempotent per tag: re-registering an already-present root is a
    /// logged no-op, so a region that re-mounts keeps a single marker.
    pub fn register_root(&mut self, tag: impl Into<TypeTag>) {
        let tag = tag.into();
        if self
            .history
            .iter()
            .any(|record| record.location == Location::Root && record.tag == tag)
        {
            debug!("root {tag} already registered");
            return;
        }
        let id = self.alloc_id();
        info!("registering root {tag}");
        self.history.push(HistoryRecord {
            id,
            tag,
            kind: RecordKind::Push,
            location: Location::Root,
        });
        self.bump();
    }

    /// Pushes a screen onto the current context.
    ///
    /// The current context is the topmost modal's nested stack when a modal
    /// is open, the root stack otherwise. No callback fires on push.
    pub fn push(&mut self, tag: impl Into<TypeTag>, factory: impl Fn() -> V + 'static) {
        self.push_inner(tag.into(), Box::new(factory), None);
    }

    /// Like [`push`](Self::push), with a completion callback invoked exactly
    /// once when the screen is removed.
    pub fn push_with(
        &mut self,
        tag: impl Into<TypeTag>,
        factory: impl Fn() -> V + 'static,
        on_dismiss: impl FnOnce() + 'static,
    ) {
        self.push_inner(tag.into(), Box::new(factory), Some(Box::new(on_dismiss)));
    }

    fn push_inner(
        &mut self,
        tag: TypeTag,
        factory: ContentFactory<V>,
        on_dismiss: Option<OnDismiss>,
    ) {
        let id = self.alloc_id();
        if let Some(modal_id) = self.modal_stack.last().map(Modal::id) {
            // Defensive: a top modal whose nested stack is gone is stale
            // context; fall back to the root.
            if let Some(stack) = self.modal_screens.get_mut(&modal_id) {
                let index = stack.len();
                stack.push(Screen::new(id, tag.clone(), factory, on_dismiss));
                debug!("pushed {tag} [modal {modal_id}]");
                self.history.push(HistoryRecord {
                    id,
                    tag,
                    kind: RecordKind::Push,
                    location: Location::ModalPush {
                        modal: modal_id,
                        index,
                    },
                });
                self.bump();
                return;
            }
            warn!("top modal {modal_id} is no longer mounted; pushing {tag} to root");
        }
        let index = self.root_stack.len();
        self.root_stack
            .push(Screen::new(id, tag.clone(), factory, on_dismiss));
        debug!("pushed {tag} [root]");
        self.history.push(HistoryRecord {
            id,
            tag,
            kind: RecordKind::Push,
            location: Location::RootPush(index),
        });
        self.bump();
    }

    // --- modals ----------------------------------------------------------

    /// Presents a modal.
    ///
    /// `ReplaceLast` pops the current top modal first and `ReplaceAll` pops
    /// every modal (most recently presented first); replaced modals fire
    /// their completion callbacks and their nested stacks are discarded.
    /// The newly presented modal itself fires nothing.
    pub fn present(&mut self, request: ModalRequest<V>, style: PresentationStyle) {
        match style {
            PresentationStyle::Stack => {}
            PresentationStyle::ReplaceLast => {
                if let Some(mut removed) = self.modal_stack.pop() {
                    info!("replacing top modal {}", removed.id());
                    removed.fire_on_dismiss();
                    self.discard_modal_state(removed.id());
                }
            }
            PresentationStyle::ReplaceAll => {
                while let Some(mut removed) = self.modal_stack.pop() {
                    info!("replace-all: dismissing modal {}", removed.id());
                    removed.fire_on_dismiss();
                    self.discard_modal_state(removed.id());
                }
            }
        }

        let id = self.alloc_id();
        let ModalRequest {
            tag,
            factory,
            style: modal_style,
            options,
            on_dismiss,
        } = request;
        let modal = Modal::new(
            Screen::new(id, tag.clone(), factory, on_dismiss),
            modal_style,
            options,
        );
        self.modal_screens.insert(id, Vec::new());
        let index = self.modal_stack.len();
        self.modal_stack.push(modal);
        info!("presented {modal_style:?} {tag} ({id}) at index {index}");
        self.history.push(HistoryRecord {
            id,
            tag,
            kind: RecordKind::Modal,
            location: Location::ModalTop(index),
        });
        self.bump();
    }

    /// Drops a closed modal's nested stack and prunes history records for
    /// the modal and its structurally discarded children.
    fn discard_modal_state(&mut self, modal_id: EntryId) {
        let nested = self.modal_screens.remove(&modal_id).unwrap_or_default();
        self.history.retain(|record| {
            record.id != modal_id && !nested.iter().any(|screen| screen.id() == record.id)
        });
    }

    /// Pops the top modal using the configured default policy.
    pub fn dismiss_modal(&mut self) {
        self.dismiss_modal_with(self.defaults.modal_dismissal);
    }

    /// Pops the top modal.
    ///
    /// The modal's nested screens form the removal batch (closest to the
    /// top first, the modal root last); `policy` decides per position
    /// whether each nested callback fires. The modal root's own callback
    /// fires under `All` and `Landing` always, and under `Topmost` only when
    /// there were no nested screens — with nested screens present, the
    /// topmost element of the batch was a nested screen, not the modal.
    pub fn dismiss_modal_with(&mut self, policy: DismissalPolicy) {
        let Some(mut removed) = self.modal_stack.pop() else {
            debug!("dismiss_modal: no modal presented");
            return;
        };
        let removed_id = removed.id();
        let mut nested = self.modal_screens.remove(&removed_id).unwrap_or_default();
        let had_nested = !nested.is_empty();
        let count = nested.len();

        info!("dismissed modal {removed_id} ({policy:?})");
        if policy != DismissalPolicy::Landing {
            for (position, screen) in nested.iter_mut().rev().enumerate() {
                if policy.applies(position, count) {
                    debug!("firing nested {} [modal {removed_id}]", screen.tag());
                    screen.fire_on_dismiss();
                }
            }
        }

        match policy {
            DismissalPolicy::All | DismissalPolicy::Landing => removed.fire_on_dismiss(),
            DismissalPolicy::Topmost => {
                if !had_nested {
                    removed.fire_on_dismiss();
                }
            }
        }

        self.history.retain(|record| {
            record.id != removed_id && !nested.iter().any(|screen| screen.id() == record.id)
        });
        self.bump();
    }

    // --- pops ------------------------------------------------------------

    /// Pops the top screen of the current context and fires its callback.
    ///
    /// Single-entry removal has no policy ambiguity: the callback always
    /// fires. No-op when the context's stack is empty.
    pub fn dismiss_push(&mut self) {
        if let Some(modal_id) = self.modal_stack.last().map(Modal::id) {
            let Some(stack) = self.modal_screens.get_mut(&modal_id) else {
                warn!("dismiss_push: top modal {modal_id} has no nested stack");
                return;
            };
            let Some(mut removed) = stack.pop() else {
                debug!("dismiss_push: nothing pushed in modal {modal_id}");
                return;
            };
            info!("dismissed {} [modal {modal_id}]", removed.tag());
            removed.fire_on_dismiss();
            let id = removed.id();
            self.history.retain(|record| record.id != id);
            self.bump();
        } else {
            let Some(mut removed) = self.root_stack.pop() else {
                debug!("dismiss_push: root stack is empty");
                return;
            };
            info!("dismissed {} [root]", removed.tag());
            removed.fire_on_dismiss();
            let id = removed.id();
            self.history.retain(|record| record.id != id);
            self.bump();
        }
    }

    /// Dismisses whatever happened most recently.
    ///
    /// Routes on the last history record: a modal record delegates to
    /// [`dismiss_modal`](Self::dismiss_modal), a push record to
    /// [`dismiss_push`](Self::dismiss_push). No-op on empty history or when
    /// only the root marker remains.
    pub fn dismiss(&mut self) {
        let Some(last) = self.history.last() else {
            debug!("dismiss: history is empty");
            return;
        };
        let (kind, location) = (last.kind(), last.location());
        match kind {
            RecordKind::Modal => self.dismiss_modal(),
            RecordKind::Push if location == Location::Root => {
                debug!("dismiss: only the root remains");
            }
            RecordKind::Push => self.dismiss_push(),
        }
    }

    // --- dismiss-to -------------------------------------------------------

    /// Navigates back to `tag` using the configured default modes.
    pub fn dismiss_to(&mut self, tag: impl Into<TypeTag>) {
        let NavigatorDefaults {
            dismissal,
            resolution,
            ..
        } = self.defaults;
        self.dismiss_to_with(tag, resolution, dismissal);
    }

    /// Navigates back to the history record matching `tag`, removing every
    /// entry above it.
    ///
    /// Targets are resolved per [`TargetResolution`]; an absent tag and an
    /// already-at-target resolution are advisory no-ops reported through the
    /// diagnostic channel. The removal batch is processed closest-to-top
    /// first with `policy` deciding per position whether each callback
    /// fires; records whose location has gone stale underneath us are
    /// skipped. Root-push and nested-push removals are marked in the
    /// suppression set so a reactive-diff echo of the same removal does not
    /// fire twice; modal removals destroy their nested stacks structurally
    /// and mark nothing. Finally, history is truncated to the target
    /// inclusive.
    pub fn dismiss_to_with(
        &mut self,
        tag: impl Into<TypeTag>,
        resolution: TargetResolution,
        policy: DismissalPolicy,
    ) {
        let tag = tag.into();
        if self.history.is_empty() {
            warn!("dismiss_to {tag}: history is empty");
            return;
        }
        let target = match resolve_target(&self.history, &tag, resolution) {
            ResolvedTarget::At(index) => index,
            ResolvedTarget::AlreadyAtTarget => {
                debug!("dismiss_to {tag}: already at target");
                return;
            }
            ResolvedTarget::NotFound => {
                warn!("dismiss_to {tag}: tag not present in history");
                return;
            }
        };

        let to_remove: Vec<HistoryRecord> = self.history[target + 1..].to_vec();
        let count = to_remove.len();
        info!("dismiss_to {tag} ({resolution:?}, {policy:?}): removing {count} entries");

        for (position, record) in to_remove.iter().rev().enumerate() {
            let fire = policy.applies(position, count);
            match record.location() {
                Location::Root => {
                    // The root marker is never removed.
                }
                Location::RootPush(index) => {
                    if !stack_holds(&self.root_stack, index, record.id()) {
                        debug!("dismiss_to: stale root location for {}", record.id());
                        continue;
                    }
                    self.suppressed.insert(record.id());
                    let mut removed = self.root_stack.remove(index);
                    // The shared removal path consumes the mark instead of
                    // firing; the policy decision below is ours alone.
                    self.reactive_removal(&mut removed, "root");
                    if fire {
                        debug!("dismiss_to: firing {} [root]", removed.tag());
                        removed.fire_on_dismiss();
                    }
                }
                Location::ModalTop(index) => {
                    if self
                        .modal_stack
                        .get(index)
                        .is_none_or(|modal| modal.id() != record.id())
                    {
                        debug!("dismiss_to: stale modal location for {}", record.id());
                        continue;
                    }
                    let mut removed = self.modal_stack.remove(index);
                    if fire {
                        debug!("dismiss_to: firing modal {}", removed.id());
                        removed.fire_on_dismiss();
                    }
                    // Nested children die with the modal structurally, not
                    // through diffing; they are not marked suppressed.
                    self.modal_screens.remove(&removed.id());
                }
                Location::ModalPush { modal, index } => {
                    let Some(stack) = self.modal_screens.get_mut(&modal) else {
                        debug!("dismiss_to: nested stack for modal {modal} is gone");
                        continue;
                    };
                    if !stack_holds(stack, index, record.id()) {
                        debug!("dismiss_to: stale nested location for {}", record.id());
                        continue;
                    }
                    self.suppressed.insert(record.id());
                    let mut removed = stack.remove(index);
                    self.reactive_removal(&mut removed, "modal");
                    if fire {
                        debug!("dismiss_to: firing {} [modal {modal}]", removed.tag());
                        removed.fire_on_dismiss();
                    }
                }
            }
        }

        self.history.truncate(target + 1);
        self.bump();
    }

    // --- reactive-diff reports -------------------------------------------

    /// Reports that the rendering layer observed the root stack shrink to
    /// `observed_len` (for example through a back-swipe gesture).
    ///
    /// Entries above the observed length are popped closest-to-top first.
    /// Each either consumes its suppression mark — the removal was already
    /// handled by dismiss-to — or fires its completion callback. Reports
    /// that do not shrink the stack are ignored.
    pub fn sync_root(&mut self, observed_len: usize) {
        let mut changed = false;
        while self.root_stack.len() > observed_len {
            if let Some(mut removed) = self.root_stack.pop() {
                self.reactive_removal(&mut removed, "root");
                changed = true;
            }
        }
        if changed {
            self.bump();
        }
    }

    /// Reports that the rendering layer observed `modal`'s nested stack
    /// shrink to `observed_len`.
    ///
    /// Same contract as [`sync_root`](Self::sync_root). A report for a modal
    /// that is no longer open is logged and ignored.
    pub fn sync_modal_screens(&mut self, modal: EntryId, observed_len: usize) {
        let Some(stack) = self.modal_screens.get_mut(&modal) else {
            debug!("sync: modal {modal} is no longer open");
            return;
        };
        let mut removed_screens = Vec::new();
        while stack.len() > observed_len {
            if let Some(removed) = stack.pop() {
                removed_screens.push(removed);
            }
        }
        if removed_screens.is_empty() {
            return;
        }
        for mut removed in removed_screens {
            self.reactive_removal(&mut removed, "modal");
        }
        self.bump();
    }

    /// The shared removal path: every screen leaving a stack passes through
    /// here, whether the removal originated internally (dismiss-to) or from
    /// the rendering layer's reactive diff (`sync_*`).
    ///
    /// Prunes the screen's history record, then either consumes the
    /// suppression mark — the originating operation owns the callback
    /// decision — or fires the callback.
    fn reactive_removal(&mut self, removed: &mut Screen<V>, context: &str) {
        let id = removed.id();
        self.history.retain(|record| record.id != id);
        if self.suppressed.remove(&id) {
            debug!("suppressed reactive pop of {} [{context}]", removed.tag());
        } else {
            info!("reactive pop: {} [{context}]", removed.tag());
            removed.fire_on_dismiss();
        }
    }

    // --- reset ------------------------------------------------------------

    /// Clears all containers, history, and suppression marks.
    ///
    /// Remaining entries are dropped without firing their callbacks.
    pub fn reset(&mut self) {
        self.root_stack.clear();
        self.modal_stack.clear();
        self.modal_screens.clear();
        self.history.clear();
        self.suppressed.clear();
        self.bump();
        info!("navigator reset");
    }
}

/// Whether `stack[index]` exists and still is the entry the record was made
/// for.
fn stack_holds<V: 'static>(stack: &[Screen<V>], index: usize, id: EntryId) -> bool {
    stack.get(index).is_some_and(|screen| screen.id() == id)
}

impl<V: 'static> fmt::Debug for Navigator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("root_stack", &self.root_stack)
            .field("modal_stack", &self.modal_stack)
            .field("modal_screens", &self.modal_screens)
            .field("history", &self.history)
            .field("suppressed", &self.suppressed)
            .field("defaults", &self.defaults)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
