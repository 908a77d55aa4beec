//! A creature's private bookkeeping: queued tasks, the active task and its
//! act, and recent failures.
//!
//! Every transition that starts or stops holding a task fires exactly one
//! `on_assign` / `on_unassign` on it.

use colony_act::{describe_chain, Act};
use colony_core::{AgentId, BbKey, Blackboard, SimDuration, SimTime, TickContext};
use colony_task::{TaskError, TaskHandle, TaskPriority};
use colony_tools::trace::{emit, TraceEvent};
use tracing::{debug, warn};

use crate::describe::{Description, Diagnostics};
use crate::failures::FailedTasks;
use crate::world::CreatureWorld;

/// Set by movement acts when no route exists; stale once the active task changes.
pub const NO_PATH: BbKey<bool> = BbKey::new(0xC010_7A5C_0000_0001);

pub struct TaskLedger<W>
where
    W: CreatureWorld + 'static,
{
    current_task: Option<TaskHandle<W>>,
    current_act: Option<Box<dyn Act<W>>>,
    tasks: Vec<TaskHandle<W>>,
    failures: FailedTasks,
    diagnostics: Diagnostics,
}

impl<W> Default for TaskLedger<W>
where
    W: CreatureWorld + 'static,
{
    fn default() -> Self {
        Self {
            current_task: None,
            current_act: None,
            tasks: Vec::new(),
            failures: FailedTasks::new(),
            diagnostics: Diagnostics::default(),
        }
    }
}

pub(crate) fn note<A: AgentId>(
    blackboard: &mut Blackboard,
    ctx: &TickContext,
    agent: A,
    tag: &'static str,
    task: Option<&str>,
) {
    let mut event = TraceEvent::new(ctx.tick, tag).with_agent(agent.stable_id());
    if let Some(task) = task {
        event = event.with_task(task);
    }
    emit(blackboard, event);
}

impl<W> TaskLedger<W>
where
    W: CreatureWorld + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_task(&self) -> Option<&TaskHandle<W>> {
        self.current_task.as_ref()
    }

    pub fn current_act(&self) -> Option<&dyn Act<W>> {
        self.current_act.as_deref()
    }

    pub(crate) fn current_act_mut(&mut self) -> Option<&mut Box<dyn Act<W>>> {
        self.current_act.as_mut()
    }

    pub fn queued(&self) -> &[TaskHandle<W>] {
        &self.tasks
    }

    pub fn failures(&self) -> &FailedTasks {
        &self.failures
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_idle(&self) -> bool {
        self.current_task.is_none()
    }

    /// Whether a task with this name is queued.
    pub fn has_task_with_name(&self, task: &TaskHandle<W>) -> bool {
        self.tasks.iter().any(|t| t.same_task(task))
    }

    fn is_current(&self, task: &TaskHandle<W>) -> bool {
        self.current_task.as_ref().is_some_and(|t| t.same_task(task))
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.diagnostics.last_message = Some(message.into());
    }

    pub(crate) fn set_last_failed_act(&mut self, name: impl Into<String>) {
        self.diagnostics.last_failed_act = Some(name.into());
    }

    /// Queue `task`. Returns `Ok(false)` if it is already queued or active.
    pub fn assign_task(
        &mut self,
        task: TaskHandle<W>,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<bool, TaskError> {
        if task.is_cancelled() {
            return Err(TaskError::Cancelled { name: task.name() });
        }
        if self.has_task_with_name(&task) || self.is_current(&task) {
            return Ok(false);
        }

        let name = task.name();
        task.assign(agent, world);
        self.tasks.push(task);
        debug!(agent = agent.stable_id(), task = %name, "task queued");
        note(blackboard, ctx, agent, "task.assign", Some(&name));
        Ok(true)
    }

    /// Drop `task` from the queue, or stop it if it is the active task.
    pub fn remove_task(
        &mut self,
        task: &TaskHandle<W>,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if self.is_current(task) {
            self.change_task(None, ctx, agent, world, blackboard);
        }
        if let Some(queued) = self.take_queued(task) {
            queued.unassign(agent, world);
            note(blackboard, ctx, agent, "task.unassign", Some(&queued.name()));
        }
    }

    fn take_queued(&mut self, task: &TaskHandle<W>) -> Option<TaskHandle<W>> {
        let index = self.tasks.iter().position(|t| t.same_task(task))?;
        Some(self.tasks.remove(index))
    }

    /// Make `next` the active task, or go idle with `None`.
    ///
    /// The previous task is unassigned and its act canceled. If `next` cannot
    /// produce a script the attempt counts as a failure and the creature stays
    /// idle.
    pub fn change_task(
        &mut self,
        next: Option<TaskHandle<W>>,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        blackboard.erase(NO_PATH);

        if let Some(previous) = self.current_task.take() {
            previous.unassign(agent, world);
            note(blackboard, ctx, agent, "task.unassign", Some(&previous.name()));
        }
        self.cancel_act(ctx, agent, world, blackboard);

        let Some(task) = next else {
            note(blackboard, ctx, agent, "task.change", None);
            return;
        };

        let task = match self.take_queued(&task) {
            Some(queued) => queued,
            None => {
                task.assign(agent, world);
                task
            }
        };

        let name = task.name();
        match task.create_script(agent, world) {
            Some(mut act) => {
                act.initialize();
                debug!(agent = agent.stable_id(), task = %name, act = act.name(), "task started");
                self.current_task = Some(task);
                self.current_act = Some(act);
                note(blackboard, ctx, agent, "task.change", Some(&name));
            }
            None => {
                warn!(agent = agent.stable_id(), task = %name, "task produced no script");
                self.failures.record(&name, ctx.now);
                self.set_last_failed_act(name.clone());
                task.unassign(agent, world);
                note(blackboard, ctx, agent, "task.script_failed", Some(&name));
            }
        }
    }

    /// Cancel the running act but keep the task; the next tick rebuilds the
    /// act from the task's script.
    pub fn invalidate_act(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.cancel_act(ctx, agent, world, blackboard);
    }

    fn cancel_act(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(mut act) = self.current_act.take() {
            act.on_canceled(ctx, agent, world, blackboard);
        }
    }

    /// Rebuild the act for an active task that has lost it. Returns false if
    /// the task could not produce one, in which case the creature goes idle.
    pub(crate) fn recover_act(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool {
        let Some(task) = self.current_task.clone() else {
            return false;
        };
        if self.current_act.is_some() {
            return true;
        }

        let name = task.name();
        match task.create_script(agent, world) {
            Some(mut act) => {
                act.initialize();
                warn!(agent = agent.stable_id(), task = %name, "recovered missing act");
                self.current_act = Some(act);
                note(blackboard, ctx, agent, "task.recover", Some(&name));
                true
            }
            None => {
                warn!(agent = agent.stable_id(), task = %name, "could not recover act, dropping task");
                self.change_task(None, ctx, agent, world, blackboard);
                false
            }
        }
    }

    /// Put the active task back in the queue and go idle.
    pub fn reassign_current_task(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        let Some(task) = self.current_task.clone() else {
            return;
        };
        self.change_task(None, ctx, agent, world, blackboard);
        if let Err(err) = self.assign_task(task, ctx, agent, world, blackboard) {
            debug!(agent = agent.stable_id(), %err, "task not requeued");
        }
    }

    /// Queued tasks at or above `min_priority` that are currently feasible.
    pub fn count_feasible_tasks(&self, min_priority: TaskPriority, agent: W::Agent, world: &W) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.priority() >= min_priority && t.is_feasible(agent, world).is_feasible())
            .count()
    }

    /// Highest-priority feasible queued task not recently failed, cheapest
    /// first among equals, queue order breaking remaining ties.
    pub fn best_queued_task(&self, agent: W::Agent, world: &W) -> Option<TaskHandle<W>> {
        let mut best: Option<(TaskPriority, f32, &TaskHandle<W>)> = None;
        for task in &self.tasks {
            if self.failures.was_failed(&task.name()) || !task.is_feasible(agent, world).is_feasible() {
                continue;
            }
            let priority = task.priority();
            let cost = task.compute_cost(agent, world);
            let better = match best {
                None => true,
                Some((best_priority, best_cost, _)) => {
                    priority > best_priority || (priority == best_priority && cost < best_cost)
                }
            };
            if better {
                best = Some((priority, cost, task));
            }
        }
        best.map(|(_, _, task)| task.clone())
    }

    /// First queued task strictly above `priority` that is feasible and not
    /// recently failed.
    pub fn first_preemptor(&self, priority: TaskPriority, agent: W::Agent, world: &W) -> Option<TaskHandle<W>> {
        self.tasks
            .iter()
            .find(|t| {
                t.priority() > priority
                    && !self.failures.was_failed(&t.name())
                    && t.is_feasible(agent, world).is_feasible()
            })
            .cloned()
    }

    pub fn was_failed(&self, task: &TaskHandle<W>) -> bool {
        self.failures.was_failed(&task.name())
    }

    pub(crate) fn record_failure(&mut self, name: &str, now: SimTime) -> bool {
        self.failures.record(name, now)
    }

    pub fn expire_failures(&mut self, now: SimTime, retention: SimDuration) -> usize {
        self.failures.expire(now, retention)
    }

    /// Unassign and drop queued tasks that ask to be deleted. Returns how many.
    pub fn purge_bad_tasks(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> usize {
        let (bad, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.should_delete(agent, world));
        self.tasks = keep;

        for task in &bad {
            let name = task.name();
            task.unassign(agent, world);
            debug!(agent = agent.stable_id(), task = %name, "purged task");
            note(blackboard, ctx, agent, "task.purge", Some(&name));
        }
        bad.len()
    }

    /// Stop the active task and unassign everything queued.
    pub fn release_all(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.change_task(None, ctx, agent, world, blackboard);
        for task in std::mem::take(&mut self.tasks) {
            task.unassign(agent, world);
            note(blackboard, ctx, agent, "task.unassign", Some(&task.name()));
        }
    }

    pub fn describe(&self) -> Description {
        Description {
            task: self.current_task.as_ref().map(|t| t.name()),
            action: self.current_act.as_deref().map(|act| describe_chain(act).to_string()),
            last_failed: self.diagnostics.last_failed_act.clone(),
            message: self.diagnostics.last_message.clone(),
        }
    }
}
