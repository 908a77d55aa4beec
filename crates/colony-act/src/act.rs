use colony_core::{Blackboard, TickContext, WorldMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActStatus {
    Running,
    Success,
    Fail,
}

impl ActStatus {
    pub fn is_terminal(self) -> bool {
        self != ActStatus::Running
    }

    pub fn from_bool(ok: bool) -> Self {
        if ok {
            ActStatus::Success
        } else {
            ActStatus::Fail
        }
    }
}

/// A node of a creature's behavior tree.
///
/// Lifecycle: `initialize` once, `tick` until the status is terminal, and
/// `on_canceled` if the owner discards the node before that. Composites own
/// their children exclusively.
pub trait Act<W>: 'static
where
    W: WorldMut + 'static,
{
    fn name(&self) -> &str;

    /// Rewind to the first step. Calling it again before the first tick is a no-op.
    fn initialize(&mut self);

    /// Advance by exactly one logical step.
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus;

    /// Release anything this node holds. May be called after a terminal
    /// status, so implementations must tolerate repeated calls.
    fn on_canceled(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    /// The child ticked most recently, if this node has children.
    fn last_ticked_child(&self) -> Option<&dyn Act<W>> {
        None
    }
}

/// Name of the deepest node on the `last_ticked_child` chain starting at `act`.
pub fn describe_chain<W>(act: &dyn Act<W>) -> &str
where
    W: WorldMut + 'static,
{
    let mut node = act;
    while let Some(child) = node.last_ticked_child() {
        node = child;
    }
    node.name()
}
