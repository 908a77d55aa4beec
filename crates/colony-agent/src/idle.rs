//! What a creature does when it has nothing to do.

use colony_act::{Act, ActStatus, Sequence, Wait};
use colony_core::{Blackboard, DeterministicRng, TickContext};
use colony_task::{ActTask, TaskHandle, TaskInfo, TaskPriority};

use crate::config::SchedulerConfig;
use crate::world::CreatureWorld;

const IDLE_STREAM: u64 = 0x1D1E;

/// Produces a fallback task for a creature with no queued or pooled work.
pub trait IdleBehavior<W>: 'static
where
    W: CreatureWorld + 'static,
{
    fn idle_task(&mut self, ctx: &TickContext, agent: W::Agent, world: &W) -> Option<TaskHandle<W>>;
}

/// Get out of liquid first, panic while burning, otherwise mill about.
#[derive(Debug, Clone)]
pub struct DefaultIdle {
    pub wander_seconds: f32,
    pub wander_radius: f32,
    pub swim_limit_seconds: f32,
}

impl Default for DefaultIdle {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}

impl DefaultIdle {
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            wander_seconds: config.wander_seconds,
            wander_radius: config.wander_radius,
            swim_limit_seconds: 10.0,
        }
    }
}

fn idle_info(name: &str) -> TaskInfo {
    TaskInfo::new(name)
        .with_priority(TaskPriority::Eventually)
        .with_reassign_on_death(false)
}

impl<W> IdleBehavior<W> for DefaultIdle
where
    W: CreatureWorld + 'static,
{
    fn idle_task(&mut self, ctx: &TickContext, agent: W::Agent, world: &W) -> Option<TaskHandle<W>> {
        if world.in_liquid(agent) {
            let act = FindLand::new("Find land", self.swim_limit_seconds);
            return Some(TaskHandle::new(ActTask::<W>::once(idle_info("Find land"), Box::new(act))));
        }

        if world.on_fire(agent) {
            let act = Wander::new("Run around", self.wander_seconds * 2.0, self.wander_radius);
            return Some(TaskHandle::new(ActTask::<W>::once(idle_info("Freak out!"), Box::new(act))));
        }

        let jitter = ctx.rng_for_agent(agent, IDLE_STREAM).range_f32(-0.25, 0.25);
        let seconds = (self.wander_seconds + jitter).max(0.0);
        let act: Sequence<W> = Sequence::named(
            "Look interesting",
            vec![
                Box::new(Wander::new("Wander", seconds, self.wander_radius)) as Box<dyn Act<W>>,
                Box::new(Wait::new("Look around", 0.5)),
            ],
        );
        Some(TaskHandle::new(ActTask::<W>::once(idle_info("Look interesting"), Box::new(act))))
    }
}

/// Moves randomly within `radius` for `seconds`, then succeeds.
#[derive(Debug, Clone)]
pub struct Wander {
    name: String,
    seconds: f32,
    radius: f32,
    elapsed: f32,
}

impl Wander {
    pub fn new(name: impl Into<String>, seconds: f32, radius: f32) -> Self {
        Self {
            name: name.into(),
            seconds: seconds.max(0.0),
            radius,
            elapsed: 0.0,
        }
    }
}

impl<W> Act<W> for Wander
where
    W: CreatureWorld + 'static,
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
        agent: W::Agent,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> ActStatus {
        world.wander(agent, self.radius);
        self.elapsed += ctx.dt_seconds.max(0.0);
        if self.elapsed >= self.seconds {
            ActStatus::Success
        } else {
            ActStatus::Running
        }
    }
}

/// Swims until out of liquid; fails if that takes longer than `limit_seconds`.
#[derive(Debug, Clone)]
pub struct FindLand {
    name: String,
    limit_seconds: f32,
    elapsed: f32,
}

impl FindLand {
    pub fn new(name: impl Into<String>, limit_seconds: f32) -> Self {
        Self {
            name: name.into(),
            limit_seconds,
            elapsed: 0.0,
        }
    }
}

impl<W> Act<W> for FindLand
where
    W: CreatureWorld + 'static,
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
        agent: W::Agent,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> ActStatus {
        if !world.in_liquid(agent) {
            return ActStatus::Success;
        }
        if self.elapsed >= self.limit_seconds {
            return ActStatus::Fail;
        }
        world.swim_toward_land(agent);
        self.elapsed += ctx.dt_seconds.max(0.0);
        ActStatus::Running
    }
}
