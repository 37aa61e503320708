//! Interaction states and the guarded transition table.

use crate::elements::ElementId;
use crate::error::{EditorError, EditorResult};
use crate::transform::{MoveAnchor, ResizeAnchor};
use kurbo::{Point, Rect};

/// The live interaction, carrying only what the next event needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// Idle, nothing selected.
    #[default]
    None,
    /// Rubber band being dragged from `origin` to `current`.
    AreaSelecting { origin: Point, current: Point },
    /// Pointer is down on an element; no movement yet.
    ReadyToMove { anchors: Vec<MoveAnchor> },
    /// Elements are following the pointer.
    Moving { anchors: Vec<MoveAnchor> },
    /// Pointer is down on a handle; no movement yet.
    ReadyToResize { anchor: ResizeAnchor },
    /// A handle is following the pointer.
    Resizing { anchor: ResizeAnchor },
    SingleSelected { id: ElementId },
    MultiSelected { ids: Vec<ElementId> },
}

impl InteractionState {
    /// Fieldless discriminant of this state.
    pub fn kind(&self) -> StateKind {
        match self {
            InteractionState::None => StateKind::None,
            InteractionState::AreaSelecting { .. } => StateKind::AreaSelecting,
            InteractionState::ReadyToMove { .. } => StateKind::ReadyToMove,
            InteractionState::Moving { .. } => StateKind::Moving,
            InteractionState::ReadyToResize { .. } => StateKind::ReadyToResize,
            InteractionState::Resizing { .. } => StateKind::Resizing,
            InteractionState::SingleSelected { .. } => StateKind::SingleSelected,
            InteractionState::MultiSelected { .. } => StateKind::MultiSelected,
        }
    }

    /// Every element id this state refers to.
    pub fn referenced_ids(&self) -> Vec<ElementId> {
        match self {
            InteractionState::None | InteractionState::AreaSelecting { .. } => Vec::new(),
            InteractionState::ReadyToMove { anchors } | InteractionState::Moving { anchors } => {
                anchors.iter().map(MoveAnchor::id).collect()
            }
            InteractionState::ReadyToResize { anchor } | InteractionState::Resizing { anchor } => {
                vec![anchor.id]
            }
            InteractionState::SingleSelected { id } => vec![*id],
            InteractionState::MultiSelected { ids } => ids.clone(),
        }
    }

    /// Ids of the settled selection (Selected states only).
    pub fn selected_ids(&self) -> &[ElementId] {
        match self {
            InteractionState::SingleSelected { id } => std::slice::from_ref(id),
            InteractionState::MultiSelected { ids } => ids,
            _ => &[],
        }
    }

    /// The rubber band while area selecting.
    pub fn rubber_band(&self) -> Option<Rect> {
        match self {
            InteractionState::AreaSelecting { origin, current } => {
                Some(Rect::from_points(*origin, *current))
            }
            _ => None,
        }
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_gesture(&self) -> bool {
        self.kind().is_gesture()
    }
}

/// Fieldless mirror of [`InteractionState`] used by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    None,
    AreaSelecting,
    ReadyToMove,
    Moving,
    ReadyToResize,
    Resizing,
    SingleSelected,
    MultiSelected,
}

impl StateKind {
    /// Whether the pointer is down in this state.
    pub fn is_gesture(self) -> bool {
        matches!(
            self,
            StateKind::AreaSelecting
                | StateKind::ReadyToMove
                | StateKind::Moving
                | StateKind::ReadyToResize
                | StateKind::Resizing
        )
    }
}

/// State machine actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PrepareDragSelect,
    DragSelect,
    PrepareMove,
    StartMove,
    ContinueMove,
    PrepareResize,
    StartResize,
    ContinueResize,
    SelectSingleElement,
    SelectMultipleElements,
    FlipThenSelectRectangle,
    Reset,
    RemoveSelectedElements,
    DuplicateSelectedSingleElements,
    DuplicateSelectedMultipleElements,
}

impl Action {
    /// States this action may be taken from.
    pub fn allowed_from(self) -> &'static [StateKind] {
        use StateKind::*;
        match self {
            Action::PrepareDragSelect | Action::PrepareMove => {
                &[None, SingleSelected, MultiSelected]
            }
            Action::DragSelect => &[AreaSelecting],
            Action::StartMove => &[ReadyToMove],
            Action::ContinueMove => &[Moving],
            Action::PrepareResize => &[SingleSelected],
            Action::StartResize => &[ReadyToResize],
            Action::ContinueResize => &[Resizing],
            Action::SelectSingleElement => {
                &[ReadyToMove, Moving, ReadyToResize, Resizing, AreaSelecting]
            }
            Action::SelectMultipleElements => &[ReadyToMove, Moving, AreaSelecting],
            Action::FlipThenSelectRectangle => &[Resizing],
            Action::Reset => &[
                AreaSelecting,
                ReadyToMove,
                Moving,
                ReadyToResize,
                Resizing,
                SingleSelected,
                MultiSelected,
            ],
            Action::RemoveSelectedElements => &[SingleSelected, MultiSelected],
            Action::DuplicateSelectedSingleElements => &[SingleSelected],
            Action::DuplicateSelectedMultipleElements => &[MultiSelected],
        }
    }

    /// Reject the action unless `from` is in its allowed set.
    pub fn check(self, from: StateKind) -> EditorResult<()> {
        if self.allowed_from().contains(&from) {
            Ok(())
        } else {
            Err(EditorError::InvalidTransition { action: self, from })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 15] = [
        Action::PrepareDragSelect,
        Action::DragSelect,
        Action::PrepareMove,
        Action::StartMove,
        Action::ContinueMove,
        Action::PrepareResize,
        Action::StartResize,
        Action::ContinueResize,
        Action::SelectSingleElement,
        Action::SelectMultipleElements,
        Action::FlipThenSelectRectangle,
        Action::Reset,
        Action::RemoveSelectedElements,
        Action::DuplicateSelectedSingleElements,
        Action::DuplicateSelectedMultipleElements,
    ];

    const ALL_STATES: [StateKind; 8] = [
        StateKind::None,
        StateKind::AreaSelecting,
        StateKind::ReadyToMove,
        StateKind::Moving,
        StateKind::ReadyToResize,
        StateKind::Resizing,
        StateKind::SingleSelected,
        StateKind::MultiSelected,
    ];

    #[test]
    fn test_check_matches_table() {
        for action in ALL_ACTIONS {
            for from in ALL_STATES {
                let allowed = action.allowed_from().contains(&from);
                assert_eq!(action.check(from).is_ok(), allowed, "{action:?} from {from:?}");
            }
        }
    }

    #[test]
    fn test_rejections_name_action_and_state() {
        let err = Action::StartResize.check(StateKind::None).unwrap_err();
        assert!(matches!(
            err,
            EditorError::InvalidTransition {
                action: Action::StartResize,
                from: StateKind::None,
            }
        ));
        assert!(Action::PrepareResize.check(StateKind::MultiSelected).is_err());
        assert!(Action::FlipThenSelectRectangle.check(StateKind::Moving).is_err());
    }

    #[test]
    fn test_reset_from_every_non_idle_state() {
        for from in ALL_STATES {
            assert_eq!(Action::Reset.check(from).is_ok(), from != StateKind::None);
        }
    }

    #[test]
    fn test_selected_ids() {
        let single = InteractionState::SingleSelected { id: ElementId(3) };
        assert_eq!(single.selected_ids(), &[ElementId(3)]);
        let multi = InteractionState::MultiSelected {
            ids: vec![ElementId(1), ElementId(2)],
        };
        assert_eq!(multi.referenced_ids(), vec![ElementId(1), ElementId(2)]);
        assert!(InteractionState::None.selected_ids().is_empty());
    }

    #[test]
    fn test_rubber_band() {
        let state = InteractionState::AreaSelecting {
            origin: Point::new(100.0, 100.0),
            current: Point::new(20.0, 150.0),
        };
        assert_eq!(state.rubber_band(), Some(Rect::new(20.0, 100.0, 100.0, 150.0)));
        assert!(state.is_gesture());
        assert!(InteractionState::None.rubber_band().is_none());
    }
}
