//! The editor: history, interaction state and the pointer protocol.

use super::input::{PointerEvent, PointerPhase};
use super::overlay::{CursorHint, DashedOutline};
use super::state::{Action, InteractionState, StateKind};
use crate::camera::{Camera, Viewport};
use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, ElementKind, FixedMetrics, TextMeasure};
use crate::error::{EditorError, EditorResult};
use crate::hit::{Handle, Hit, HitTester, HitZone, elements_in_band};
use crate::history::{CommitOp, SnapshotStore};
use crate::snapshot::Snapshot;
use crate::transform::{
    MoveAnchor, ResizeAnchor, apply_move, apply_resize, canonicalize, capture_move,
    capture_resize, is_resizable,
};
use kurbo::{Point, Rect};

/// Keyboard-level commands a host can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Undo,
    Redo,
    DeleteSelection,
    DuplicateSelection,
    /// Drop the current selection.
    Cancel,
    SelectAll,
}

/// Interactive editor core.
///
/// Owns the undo history and the live interaction state. Pointer positions
/// are mapped through the injected [`Viewport`]; text blocks are laid out
/// with the injected [`TextMeasure`].
pub struct Editor<V: Viewport = Camera, M: TextMeasure = FixedMetrics> {
    history: SnapshotStore,
    state: InteractionState,
    viewport: V,
    measure: M,
    config: EditorConfig,
    hit_tester: HitTester,
    /// Last hit under the pointer while no gesture was running.
    hover: Option<Hit>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl Editor {
    /// An editor with an identity camera and fixed text metrics.
    pub fn with_config(config: EditorConfig) -> Self {
        Self::new(
            SnapshotStore::from_config(&config),
            Camera::new(),
            FixedMetrics::default(),
            config,
        )
    }
}

impl<V: Viewport, M: TextMeasure> Editor<V, M> {
    /// Create an idle editor over an existing history.
    pub fn new(history: SnapshotStore, viewport: V, measure: M, config: EditorConfig) -> Self {
        Self {
            history,
            state: InteractionState::None,
            viewport,
            measure,
            hit_tester: HitTester::from_config(&config),
            config,
            hover: None,
        }
    }

    /// The snapshot to render.
    pub fn snapshot(&self) -> &Snapshot {
        self.history.current()
    }

    /// The undo history.
    pub fn history(&self) -> &SnapshotStore {
        &self.history
    }

    /// The live interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The editor configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The client-to-scene mapper.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the mapper, e.g. to pan or zoom a camera.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Ids of the settled selection; empty outside Selected states.
    pub fn selected_ids(&self) -> &[ElementId] {
        self.state.selected_ids()
    }

    /// The rubber band while area selecting.
    pub fn rubber_band(&self) -> Option<Rect> {
        self.state.rubber_band()
    }

    /// Outlines for the current selection. Handles are only shown for a
    /// single selection.
    pub fn overlays(&self) -> Vec<DashedOutline> {
        let ids = self.state.selected_ids();
        let single = ids.len() == 1;
        ids.iter()
            .filter_map(|id| self.history.current().get(*id))
            .map(|element| DashedOutline::around(element, self.config.outline_padding, single))
            .collect()
    }

    /// Cursor hint for the host.
    pub fn cursor(&self) -> CursorHint {
        match &self.state {
            InteractionState::ReadyToMove { .. } | InteractionState::Moving { .. } => {
                CursorHint::Move
            }
            InteractionState::ReadyToResize { anchor } | InteractionState::Resizing { anchor } => {
                CursorHint::for_zone(Some(HitZone::Handle(anchor.handle)), true)
            }
            InteractionState::AreaSelecting { .. } => CursorHint::Default,
            InteractionState::None
            | InteractionState::SingleSelected { .. }
            | InteractionState::MultiSelected { .. } => {
                let resizable = match (self.hover, &self.state) {
                    (
                        Some(Hit {
                            id,
                            zone: HitZone::Handle(handle),
                        }),
                        InteractionState::SingleSelected { id: selected },
                    ) if id == *selected => self
                        .history
                        .current()
                        .get(id)
                        .is_some_and(|element| is_resizable(element, handle)),
                    _ => false,
                };
                CursorHint::for_zone(self.hover.map(|hit| hit.zone), resizable)
            }
        }
    }

    /// Feed one pointer event through the gesture protocol.
    ///
    /// Non-primary pointers and events that make no sense in the current
    /// state (a move or up with no gesture running, a second down) are
    /// ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EditorResult<()> {
        if !event.is_primary {
            log::debug!("ignoring non-primary pointer {:?}", event.phase);
            return Ok(());
        }

        let point = self.viewport.to_scene(event.client);
        match event.phase {
            PointerPhase::Down => self.pointer_down(point)?,
            PointerPhase::Move => self.pointer_move(point)?,
            PointerPhase::Up => self.pointer_up(point)?,
        }

        if !self.state.is_gesture() {
            self.hover = self.hit_tester.hit_scan(self.history.current(), point);
        }
        Ok(())
    }

    fn pointer_down(&mut self, point: Point) -> EditorResult<()> {
        if self.state.is_gesture() {
            log::debug!("ignoring pointer down during {:?}", self.state.kind());
            return Ok(());
        }

        let Some(hit) = self.hit_tester.hit_scan(self.history.current(), point) else {
            return self.prepare_drag_select(point);
        };

        let selected = self.state.selected_ids().to_vec();
        if !selected.contains(&hit.id) {
            return self.prepare_move(&[hit.id], point);
        }

        if let HitZone::Handle(handle) = hit.zone {
            if self.state.kind() == StateKind::SingleSelected
                && is_resizable(self.element(hit.id)?, handle)
            {
                return self.prepare_resize(hit.id, handle);
            }
        }
        self.prepare_move(&selected, point)
    }

    fn pointer_move(&mut self, point: Point) -> EditorResult<()> {
        match self.state.kind() {
            StateKind::ReadyToMove => self.start_move(point),
            StateKind::Moving => self.continue_move(point),
            StateKind::ReadyToResize => self.start_resize(point),
            StateKind::Resizing => self.continue_resize(point),
            StateKind::AreaSelecting => self.drag_select(point),
            StateKind::None | StateKind::SingleSelected | StateKind::MultiSelected => Ok(()),
        }
    }

    fn pointer_up(&mut self, point: Point) -> EditorResult<()> {
        match &self.state {
            InteractionState::ReadyToMove { anchors } | InteractionState::Moving { anchors } => {
                let ids = anchors.iter().map(MoveAnchor::id).collect();
                self.select(ids)
            }
            InteractionState::ReadyToResize { anchor } => {
                let id = anchor.id;
                self.select(vec![id])
            }
            InteractionState::Resizing { anchor } => {
                let id = anchor.id;
                if anchor.kind == ElementKind::Rectangle {
                    self.flip_then_select_rectangle(id)
                } else {
                    self.select(vec![id])
                }
            }
            InteractionState::AreaSelecting { .. } => self.finish_area_select(point),
            settled => {
                log::debug!("ignoring pointer up in {:?}", settled.kind());
                Ok(())
            }
        }
    }

    fn prepare_drag_select(&mut self, origin: Point) -> EditorResult<()> {
        self.transition(
            Action::PrepareDragSelect,
            InteractionState::AreaSelecting {
                origin,
                current: origin,
            },
        )
    }

    fn drag_select(&mut self, current: Point) -> EditorResult<()> {
        let InteractionState::AreaSelecting { origin, .. } = self.state else {
            return Err(self.rejected(Action::DragSelect));
        };
        self.transition(
            Action::DragSelect,
            InteractionState::AreaSelecting { origin, current },
        )
    }

    fn finish_area_select(&mut self, end: Point) -> EditorResult<()> {
        let InteractionState::AreaSelecting { origin, .. } = self.state else {
            return Err(self.rejected(Action::SelectMultipleElements));
        };
        let ids = elements_in_band(self.history.current(), origin, end);
        self.select(ids)
    }

    fn prepare_move(&mut self, ids: &[ElementId], pointer: Point) -> EditorResult<()> {
        Action::PrepareMove.check(self.state.kind())?;
        let anchors = ids
            .iter()
            .map(|id| self.element(*id).map(|element| capture_move(element, pointer)))
            .collect::<EditorResult<Vec<_>>>()?;
        self.transition(Action::PrepareMove, InteractionState::ReadyToMove { anchors })
    }

    fn start_move(&mut self, pointer: Point) -> EditorResult<()> {
        let InteractionState::ReadyToMove { anchors } = &self.state else {
            return Err(self.rejected(Action::StartMove));
        };
        let next = self.moved_snapshot(anchors, pointer)?;
        let anchors = anchors.clone();

        self.history.commit(CommitOp::Clone)?;
        self.transition(Action::StartMove, InteractionState::Moving { anchors })?;
        self.history.replace(next);
        Ok(())
    }

    fn continue_move(&mut self, pointer: Point) -> EditorResult<()> {
        let InteractionState::Moving { anchors } = &self.state else {
            return Err(self.rejected(Action::ContinueMove));
        };
        let next = self.moved_snapshot(anchors, pointer)?;
        self.history.replace(next);
        Ok(())
    }

    /// The current snapshot with every anchored element following `pointer`.
    fn moved_snapshot(&self, anchors: &[MoveAnchor], pointer: Point) -> EditorResult<Snapshot> {
        let mut next = self.history.current().clone();
        for anchor in anchors {
            let live = self.element(anchor.id())?;
            next.set(apply_move(anchor, live, pointer, &self.measure)?);
        }
        Ok(next)
    }

    fn prepare_resize(&mut self, id: ElementId, handle: Handle) -> EditorResult<()> {
        Action::PrepareResize.check(self.state.kind())?;
        let anchor = capture_resize(self.element(id)?, handle)?;
        self.transition(Action::PrepareResize, InteractionState::ReadyToResize { anchor })
    }

    fn start_resize(&mut self, pointer: Point) -> EditorResult<()> {
        let InteractionState::ReadyToResize { anchor } = self.state else {
            return Err(self.rejected(Action::StartResize));
        };
        let resized = self.resized_element(&anchor, pointer)?;

        self.history.commit(CommitOp::Clone)?;
        self.transition(Action::StartResize, InteractionState::Resizing { anchor })?;
        self.history.replace_element(resized)
    }

    fn continue_resize(&mut self, pointer: Point) -> EditorResult<()> {
        let InteractionState::Resizing { anchor } = self.state else {
            return Err(self.rejected(Action::ContinueResize));
        };
        let resized = self.resized_element(&anchor, pointer)?;
        self.history.replace_element(resized)
    }

    fn resized_element(&self, anchor: &ResizeAnchor, pointer: Point) -> EditorResult<Element> {
        apply_resize(
            anchor,
            self.element(anchor.id)?,
            pointer,
            self.config.min_image_size,
        )
    }

    fn flip_then_select_rectangle(&mut self, id: ElementId) -> EditorResult<()> {
        Action::FlipThenSelectRectangle.check(self.state.kind())?;
        let canonical = canonicalize(self.element(id)?);
        self.history.replace_element(canonical)?;
        self.transition(
            Action::FlipThenSelectRectangle,
            InteractionState::SingleSelected { id },
        )
    }

    /// Settle into a selected state for `ids`, or idle when there are none.
    fn select(&mut self, ids: Vec<ElementId>) -> EditorResult<()> {
        match ids.as_slice() {
            [] => self.transition(Action::Reset, InteractionState::None),
            [id] => {
                let id = *id;
                self.transition(
                    Action::SelectSingleElement,
                    InteractionState::SingleSelected { id },
                )
            }
            _ => self.transition(
                Action::SelectMultipleElements,
                InteractionState::MultiSelected { ids },
            ),
        }
    }

    /// Drop the selection or abandon a gesture, returning to idle.
    ///
    /// Geometry already written by an abandoned gesture stays in history. A
    /// rectangle abandoned mid-resize is canonicalized first, as on release.
    pub fn reset(&mut self) -> EditorResult<()> {
        Action::Reset.check(self.state.kind())?;
        if let InteractionState::Resizing { anchor } = self.state {
            if anchor.kind == ElementKind::Rectangle {
                let canonical = canonicalize(self.element(anchor.id)?);
                self.history.replace_element(canonical)?;
            }
        }
        self.transition(Action::Reset, InteractionState::None)
    }

    /// Delete the selected elements as one history entry.
    pub fn remove_selected(&mut self) -> EditorResult<()> {
        Action::RemoveSelectedElements.check(self.state.kind())?;
        let ids = self.state.selected_ids().to_vec();
        self.history.commit(CommitOp::RemoveElements(ids))?;
        self.transition(Action::RemoveSelectedElements, InteractionState::None)
    }

    /// Copy the selection, offset by the configured duplicate offset, as one
    /// history entry. The copies become the new selection.
    pub fn duplicate_selected(&mut self) -> EditorResult<Vec<ElementId>> {
        let action = if self.state.kind() == StateKind::MultiSelected {
            Action::DuplicateSelectedMultipleElements
        } else {
            Action::DuplicateSelectedSingleElements
        };
        action.check(self.state.kind())?;

        let offset = self.config.duplicate_offset;
        let copies = self
            .state
            .selected_ids()
            .iter()
            .map(|id| self.element(*id).map(|element| element.translated(offset)))
            .collect::<EditorResult<Vec<_>>>()?;
        let ids = self.history.commit(CommitOp::AddElements(copies))?;

        let next = match ids.as_slice() {
            [id] => InteractionState::SingleSelected { id: *id },
            _ => InteractionState::MultiSelected { ids: ids.clone() },
        };
        self.transition(action, next)?;
        Ok(ids)
    }

    /// Append elements as one history entry, returning their new ids.
    ///
    /// Ignored while a gesture is running, so a gesture never spans two
    /// history entries.
    pub fn add_elements(&mut self, elements: Vec<Element>) -> EditorResult<Vec<ElementId>> {
        if self.state.is_gesture() {
            log::debug!("ignoring add during {:?}", self.state.kind());
            return Ok(Vec::new());
        }
        self.history.commit(CommitOp::AddElements(elements))
    }

    /// Step history back. Ignored while a gesture is running.
    pub fn undo(&mut self) -> bool {
        if self.state.is_gesture() {
            log::debug!("ignoring undo during {:?}", self.state.kind());
            return false;
        }
        let changed = self.history.undo();
        if changed {
            self.reconcile_selection();
        }
        changed
    }

    /// Step history forward. Ignored while a gesture is running.
    pub fn redo(&mut self) -> bool {
        if self.state.is_gesture() {
            log::debug!("ignoring redo during {:?}", self.state.kind());
            return false;
        }
        let changed = self.history.redo();
        if changed {
            self.reconcile_selection();
        }
        changed
    }

    /// Run a keyboard command. Returns whether anything changed.
    ///
    /// Commands other than undo/redo are ignored while a gesture is running,
    /// and selection commands do nothing without a selection.
    pub fn execute(&mut self, command: EditorCommand) -> EditorResult<bool> {
        match command {
            EditorCommand::Undo => return Ok(self.undo()),
            EditorCommand::Redo => return Ok(self.redo()),
            _ => {}
        }
        if self.state.is_gesture() {
            log::debug!("ignoring {command:?} during {:?}", self.state.kind());
            return Ok(false);
        }

        let has_selection = !self.state.selected_ids().is_empty();
        match command {
            EditorCommand::DeleteSelection if has_selection => {
                self.remove_selected().map(|()| true)
            }
            EditorCommand::DuplicateSelection if has_selection => {
                self.duplicate_selected().map(|_| true)
            }
            EditorCommand::Cancel if has_selection => self.reset().map(|()| true),
            EditorCommand::SelectAll => self.select_all(),
            _ => Ok(false),
        }
    }

    /// Run a rubber band around the whole scene.
    fn select_all(&mut self) -> EditorResult<bool> {
        let band = self
            .history
            .current()
            .iter()
            .map(Element::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
            .unwrap_or(Rect::ZERO);
        let (origin, end) = (Point::new(band.x0, band.y0), Point::new(band.x1, band.y1));

        self.prepare_drag_select(origin)?;
        self.drag_select(end)?;
        self.finish_area_select(end)?;
        Ok(!self.state.selected_ids().is_empty())
    }

    /// Drop the interaction if history moved out from under it.
    fn reconcile_selection(&mut self) {
        let snapshot = self.history.current();
        if let Some(stale) = self
            .state
            .referenced_ids()
            .into_iter()
            .find(|id| !snapshot.contains(*id))
        {
            log::warn!(
                "{stale} vanished from history while {:?}, resetting",
                self.state.kind()
            );
            self.state = InteractionState::None;
        }
        if self.hover.is_some_and(|hit| !snapshot.contains(hit.id)) {
            self.hover = None;
        }
    }

    fn transition(&mut self, action: Action, next: InteractionState) -> EditorResult<()> {
        let from = self.state.kind();
        action.check(from)?;
        let to = next.kind();
        if from == to {
            log::trace!("{action:?}: stays {to:?}");
        } else {
            log::debug!("{action:?}: {from:?} -> {to:?}");
        }
        self.state = next;
        Ok(())
    }

    fn rejected(&self, action: Action) -> EditorError {
        EditorError::InvalidTransition {
            action,
            from: self.state.kind(),
        }
    }

    fn element(&self, id: ElementId) -> EditorResult<&Element> {
        self.history
            .current()
            .get(id)
            .ok_or(EditorError::StaleElement(id))
    }
}
