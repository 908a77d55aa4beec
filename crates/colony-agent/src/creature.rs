use colony_act::{describe_chain, ActStatus};
use colony_core::{AgentId, Blackboard, TickContext, Timer};
use colony_task::{TaskHandle, TaskPool, TaskPriority};
use tracing::{debug, info};

use crate::config::SchedulerConfig;
use crate::describe::Description;
use crate::error::{Result, SchedulerError};
use crate::idle::{DefaultIdle, IdleBehavior};
use crate::ledger::{note, TaskLedger};
use crate::world::CreatureWorld;

/// One creature's scheduler: its ledger, blackboard and idle fallback.
pub struct Creature<W>
where
    W: CreatureWorld + 'static,
{
    pub agent: W::Agent,
    pub config: SchedulerConfig,
    pub blackboard: Blackboard,
    pub ledger: TaskLedger<W>,
    idle: Box<dyn IdleBehavior<W>>,
    preempt_timer: Timer,
    preempt_due: bool,
    removed: bool,
}

impl<W> Creature<W>
where
    W: CreatureWorld + 'static,
{
    pub fn new(agent: W::Agent) -> Self {
        Self::with_config(agent, SchedulerConfig::default())
    }

    pub fn with_config(agent: W::Agent, config: SchedulerConfig) -> Self {
        Self {
            agent,
            idle: Box::new(DefaultIdle::from_config(&config)),
            preempt_timer: Timer::new(config.preempt_interval_seconds),
            preempt_due: false,
            config,
            blackboard: Blackboard::new(),
            ledger: TaskLedger::new(),
            removed: false,
        }
    }

    pub fn with_idle(mut self, idle: impl IdleBehavior<W>) -> Self {
        self.idle = Box::new(idle);
        self
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    fn ensure_present(&self) -> Result<()> {
        if self.removed {
            return Err(SchedulerError::AgentRemoved {
                agent: self.agent.stable_id(),
            });
        }
        Ok(())
    }

    pub fn current_task(&self) -> Option<&TaskHandle<W>> {
        self.ledger.current_task()
    }

    pub fn describe(&self) -> Description {
        self.ledger.describe()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.ledger.set_message(message);
    }

    /// Queue `task` for this creature. `Ok(false)` if it already holds it.
    pub fn assign_task(&mut self, task: TaskHandle<W>, ctx: &TickContext, world: &mut W) -> Result<bool> {
        self.ensure_present()?;
        Ok(self
            .ledger
            .assign_task(task, ctx, self.agent, world, &mut self.blackboard)?)
    }

    pub fn remove_task(&mut self, task: &TaskHandle<W>, ctx: &TickContext, world: &mut W) -> Result<()> {
        self.ensure_present()?;
        self.ledger
            .remove_task(task, ctx, self.agent, world, &mut self.blackboard);
        Ok(())
    }

    pub fn change_task(&mut self, task: Option<TaskHandle<W>>, ctx: &TickContext, world: &mut W) -> Result<()> {
        self.ensure_present()?;
        self.ledger
            .change_task(task, ctx, self.agent, world, &mut self.blackboard);
        Ok(())
    }

    /// Player cancellation of the active task. Player-controlled creatures
    /// withdraw it from the pool too, so nobody else picks it up.
    pub fn cancel_current_task(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        pool: &mut dyn TaskPool<W>,
    ) -> Result<bool> {
        self.ensure_present()?;
        let Some(task) = self.ledger.current_task().cloned() else {
            return Ok(false);
        };
        if world.is_player_controlled(self.agent) {
            pool.cancel_task(&task);
        }
        info!(agent = self.agent.stable_id(), task = %task.name(), "task cancelled");
        self.ledger
            .change_task(None, ctx, self.agent, world, &mut self.blackboard);
        Ok(true)
    }

    /// Take the creature out of the simulation. Its active task goes back to
    /// the pool when the task allows it and the creature was the player's;
    /// everything it held is unassigned. Later calls fail with `AgentRemoved`.
    pub fn remove(&mut self, ctx: &TickContext, world: &mut W, pool: &mut dyn TaskPool<W>) -> Result<()> {
        self.ensure_present()?;
        let agent = self.agent;

        if let Some(task) = self.ledger.current_task().cloned() {
            if task.reassign_on_death()
                && !task.is_cancelled()
                && !task.is_spent()
                && world.is_player_controlled(agent)
            {
                pool.add_task(task.clone());
                info!(agent = agent.stable_id(), task = %task.name(), "returned task to pool");
            }
        }

        self.ledger
            .release_all(ctx, agent, world, &mut self.blackboard);
        self.removed = true;
        info!(agent = agent.stable_id(), "creature removed");
        Ok(())
    }

    /// Run one scheduling step and tick the active act.
    ///
    /// Returns the act's status, or `None` if nothing ran this tick.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W, pool: &mut dyn TaskPool<W>) -> Option<ActStatus> {
        if self.removed {
            return None;
        }
        let agent = self.agent;

        if let Some(task) = self.ledger.current_task().cloned() {
            if task.is_cancelled() {
                debug!(agent = agent.stable_id(), task = %task.name(), "active task was cancelled");
                note(&mut self.blackboard, ctx, agent, "task.purge", Some(&task.name()));
                self.ledger
                    .change_task(None, ctx, agent, world, &mut self.blackboard);
            }
        }

        let expired = self
            .ledger
            .expire_failures(ctx.now, self.config.failure_retention());
        if expired > 0 {
            debug!(agent = agent.stable_id(), expired, "failure records expired");
        }

        if self.ledger.current_task().is_some() && self.preempt_timer.update(ctx.dt_seconds) {
            self.preempt_due = true;
        }

        if self.config.should_think(ctx.tick) {
            self.ledger
                .purge_bad_tasks(ctx, agent, world, &mut self.blackboard);

            if self.preempt_due {
                self.preempt_due = false;
                self.preempt(ctx, world, pool);
            }

            if self.ledger.is_idle() {
                self.pick_work(ctx, world, pool);
            }
        }

        if self.ledger.current_task().is_some() && self.ledger.current_act().is_none() {
            self.ledger
                .recover_act(ctx, agent, world, &mut self.blackboard);
        }

        self.run_act(ctx, world)
    }

    fn preempt(&mut self, ctx: &TickContext, world: &mut W, pool: &mut dyn TaskPool<W>) {
        let agent = self.agent;
        let Some(current) = self.ledger.current_task().cloned() else {
            return;
        };

        if let Some(item) = world.consume_beneficial_item(agent) {
            debug!(agent = agent.stable_id(), item = %item, "consumed item");
        }

        let mut next = self.ledger.first_preemptor(current.priority(), agent, world);

        if next.is_none() && world.is_player_controlled(agent) && !world.is_incapacitated(agent) {
            if let Some(floor) = current.priority().raised() {
                let failures = self.ledger.failures();
                next = pool.get_best_task_except(agent, world, floor, &|t| failures.was_failed(&t.name()));
            }
        }

        let Some(next) = next else {
            return;
        };

        info!(
            agent = agent.stable_id(),
            from = %current.name(),
            to = %next.name(),
            "task preempted"
        );
        note(&mut self.blackboard, ctx, agent, "task.preempt", Some(&current.name()));

        if current.should_retry(agent, world) {
            self.ledger
                .reassign_current_task(ctx, agent, world, &mut self.blackboard);
        }
        self.ledger
            .change_task(Some(next), ctx, agent, world, &mut self.blackboard);
    }

    fn pick_work(&mut self, ctx: &TickContext, world: &mut W, pool: &mut dyn TaskPool<W>) {
        let agent = self.agent;

        let mut next = self.ledger.best_queued_task(agent, world);

        if next.is_none() && world.is_player_controlled(agent) && !world.is_incapacitated(agent) {
            let failures = self.ledger.failures();
            next = pool.get_best_task_except(agent, world, TaskPriority::Eventually, &|t| {
                failures.was_failed(&t.name())
            });
        }

        if next.is_none() {
            next = self.idle.idle_task(ctx, agent, world);
            if let Some(task) = &next {
                note(&mut self.blackboard, ctx, agent, "task.idle", Some(&task.name()));
            }
        }

        if let Some(task) = next {
            self.preempt_timer.reset();
            self.preempt_due = false;
            self.ledger
                .change_task(Some(task), ctx, agent, world, &mut self.blackboard);
        }
    }

    fn run_act(&mut self, ctx: &TickContext, world: &mut W) -> Option<ActStatus> {
        let agent = self.agent;
        let status = self
            .ledger
            .current_act_mut()?
            .tick(ctx, agent, world, &mut self.blackboard);

        let task = self.ledger.current_task().cloned()?;
        let name = task.name();

        // Completion wins over whatever the act reported.
        if task.is_complete(world) {
            task.mark_succeeded();
            info!(agent = agent.stable_id(), task = %name, "task complete");
            note(&mut self.blackboard, ctx, agent, "task.complete", Some(&name));
            self.ledger
                .change_task(None, ctx, agent, world, &mut self.blackboard);
            return Some(status);
        }

        match status {
            ActStatus::Running => {}
            ActStatus::Success => {
                task.mark_succeeded();
                debug!(agent = agent.stable_id(), task = %name, "task script succeeded");
                note(&mut self.blackboard, ctx, agent, "task.complete", Some(&name));
                self.ledger
                    .change_task(None, ctx, agent, world, &mut self.blackboard);
            }
            ActStatus::Fail => {
                let failed_act = self
                    .ledger
                    .current_act()
                    .map(|act| describe_chain(act).to_string())
                    .unwrap_or_else(|| name.clone());
                info!(agent = agent.stable_id(), task = %name, act = %failed_act, "task failed");
                self.ledger.set_last_failed_act(failed_act);
                self.ledger.record_failure(&name, ctx.now);
                note(&mut self.blackboard, ctx, agent, "task.fail", Some(&name));

                if task.should_retry(agent, world) && !self.ledger.has_task_with_name(&task) {
                    note(&mut self.blackboard, ctx, agent, "task.retry", Some(&name));
                    self.ledger
                        .reassign_current_task(ctx, agent, world, &mut self.blackboard);
                } else {
                    self.ledger
                        .change_task(None, ctx, agent, world, &mut self.blackboard);
                }
            }
        }

        Some(status)
    }
}

/// Tick every creature in stable-id order so runs are reproducible.
pub fn tick_creatures<W>(ctx: &TickContext, world: &mut W, pool: &mut dyn TaskPool<W>, creatures: &mut [Creature<W>])
where
    W: CreatureWorld + 'static,
{
    creatures.sort_by_key(|c| c.agent.stable_id());
    for creature in creatures.iter_mut() {
        creature.tick(ctx, world, pool);
    }
}
