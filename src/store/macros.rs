//! Macros for wiring histories into host action types.

/// Implement [`CheckpointRoute`](crate::store::CheckpointRoute) for an enum
/// whose variant wraps a [`CheckpointAction`](crate::effects::CheckpointAction).
///
/// # Example
///
/// ```
/// use checkpoint_undo::checkpoint_route;
/// use checkpoint_undo::effects::CheckpointAction;
/// use checkpoint_undo::store::CheckpointRoute;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Action {
///     Rename(String),
///     Checkpoint(CheckpointAction),
/// }
///
/// checkpoint_route!(Action::Checkpoint);
///
/// let action = Action::checkpoint(CheckpointAction::Undo);
/// assert_eq!(action.extract_checkpoint(), Some(&CheckpointAction::Undo));
/// assert_eq!(Action::Rename("x".into()).extract_checkpoint(), None);
/// ```
#[macro_export]
macro_rules! checkpoint_route {
    ($action:ident :: $variant:ident) => {
        impl $crate::store::CheckpointRoute for $action {
            fn checkpoint(action: $crate::effects::CheckpointAction) -> Self {
                $action::$variant(action)
            }

            fn extract_checkpoint(&self) -> Option<&$crate::effects::CheckpointAction> {
                match self {
                    $action::$variant(action) => Some(action),
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}
