use hbfs_core::Snapshot;

/// Observed effect of one action on the avatar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionProbe<A> {
    pub action: A,
    /// The avatar moved after one application.
    pub moves_on_first: bool,
    /// The avatar is away from its start after two consecutive applications.
    pub moves_on_repeat: bool,
}

impl<A> ActionProbe<A> {
    /// The forward model shows no effect of the action on the avatar at all.
    pub fn is_inert(&self) -> bool {
        !self.moves_on_first && !self.moves_on_repeat
    }
}

/// Apply each action once and twice from `snapshot` and report whether the avatar moved.
///
/// Some environments only apply movement after a turn-in-place or a warm-up step; the
/// repeat column exposes those.
pub fn probe_forward_model<S: Snapshot>(snapshot: &S, actions: &[S::Action]) -> Vec<ActionProbe<S::Action>> {
    let start = snapshot.avatar_position();
    actions
        .iter()
        .map(|&action| {
            let mut once = snapshot.clone();
            once.advance(action);
            let moves_on_first = once.avatar_position() != start;

            let mut twice = once;
            if !twice.is_terminal() {
                twice.advance(action);
            }
            let moves_on_repeat = twice.avatar_position() != start;

            ActionProbe {
                action,
                moves_on_first,
                moves_on_repeat,
            }
        })
        .collect()
}
