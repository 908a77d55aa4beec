use colony_core::{Blackboard, TickContext, WorldMut};

use crate::act::{Act, ActStatus};

/// Adapts a resumable step function into an act.
///
/// The function receives a `step` counter it owns: `0` on the first tick after
/// `initialize`, and whatever value it left behind on later ticks. Switching on
/// it gives an explicit state machine in place of a coroutine body.
pub struct Wrap<F> {
    name: String,
    step: usize,
    run: F,
}

impl<F> Wrap<F> {
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            step: 0,
            run,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

impl<F, W> Act<W> for Wrap<F>
where
    F: FnMut(&mut usize, &TickContext, W::Agent, &mut W, &mut Blackboard) -> ActStatus + 'static,
    W: WorldMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.step = 0;
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus {
        (self.run)(&mut self.step, ctx, agent, world, blackboard)
    }
}

/// One-shot act: runs its function on the first tick and reports the result.
///
/// There is no running state. Later ticks repeat the first outcome without
/// calling the function again, until the act is re-initialized.
pub struct Do<F> {
    name: String,
    run: F,
    outcome: Option<ActStatus>,
}

impl<F> Do<F> {
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
            outcome: None,
        }
    }
}

impl<F, W> Act<W> for Do<F>
where
    F: FnMut(&TickContext, W::Agent, &mut W, &mut Blackboard) -> bool + 'static,
    W: WorldMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.outcome = None;
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let outcome = ActStatus::from_bool((self.run)(ctx, agent, world, blackboard));
        self.outcome = Some(outcome);
        outcome
    }
}

/// Read-only predicate leaf.
pub struct Condition<F> {
    name: String,
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(name: impl Into<String>, cond: F) -> Self {
        Self {
            name: name.into(),
            cond,
        }
    }
}

impl<F, W> Act<W> for Condition<F>
where
    F: FnMut(&TickContext, W::Agent, &W, &Blackboard) -> bool + 'static,
    W: WorldMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {}

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus {
        ActStatus::from_bool((self.cond)(ctx, agent, &*world, &*blackboard))
    }
}

/// Stays `Running` until `seconds` of tick time have passed, then succeeds.
#[derive(Debug, Clone)]
pub struct Wait {
    name: String,
    seconds: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(name: impl Into<String>, seconds: f32) -> Self {
        Self {
            name: name.into(),
            seconds: seconds.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn remaining_seconds(&self) -> f32 {
        (self.seconds - self.elapsed).max(0.0)
    }
}

impl<W> Act<W> for Wait
where
    W: WorldMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.elapsed = 0.0;
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> ActStatus {
        self.elapsed += ctx.dt_seconds.max(0.0);
        if self.elapsed >= self.seconds {
            ActStatus::Success
        } else {
            ActStatus::Running
        }
    }
}
