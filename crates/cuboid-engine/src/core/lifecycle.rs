/// Driver lifecycle.
///
/// `Uninitialized → Initialized → Rendering → Terminated`. Setup failure goes
/// straight to `Terminated`; there is no way back out of `Terminated`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Initialized,
    Rendering,
    Terminated,
}

impl Lifecycle {
    /// Whether `self → next` is a legal transition.
    pub fn can_transition(self, next: Lifecycle) -> bool {
        use Lifecycle::*;
        matches!(
            (self, next),
            (Uninitialized, Initialized)
                | (Uninitialized, Terminated)
                | (Initialized, Rendering)
                | (Initialized, Terminated)
                | (Rendering, Terminated)
        )
    }

    /// Moves to `next` if legal; returns whether the state changed.
    pub fn transition(&mut self, next: Lifecycle) -> bool {
        if *self == next {
            return false;
        }
        if !self.can_transition(next) {
            log::warn!("ignoring lifecycle transition {self:?} -> {next:?}");
            return false;
        }
        log::info!("lifecycle: {self:?} -> {next:?}");
        *self = next;
        true
    }

    #[inline]
    pub fn is_terminated(self) -> bool {
        self == Lifecycle::Terminated
    }
}
