// Page-lifecycle policy for auto-mounted layers. Pure so it can be tested
// on the host.

use bubble_core::MountState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHideAction {
    /// The page enters the back/forward cache and comes back as it left.
    Keep,
    Teardown,
}

/// Only a running layer holds anything a page exit has to release.
#[inline]
pub fn needs_pagehide_listener(state: MountState) -> bool {
    state == MountState::Running
}

#[inline]
pub fn pagehide_action(persisted: bool) -> PageHideAction {
    if persisted {
        PageHideAction::Keep
    } else {
        PageHideAction::Teardown
    }
}
