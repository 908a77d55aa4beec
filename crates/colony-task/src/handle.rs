use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use colony_act::Act;

use crate::task::{Feasibility, Task, TaskCategory, TaskInfo, TaskPriority, TaskWorld};

/// Cost reported for creatures that cannot perform a task at all.
pub const INFEASIBLE_COST: f32 = f32::MAX;

struct TaskCell<W>
where
    W: TaskWorld + 'static,
{
    task: RefCell<Box<dyn Task<W>>>,
    assignees: RefCell<Vec<W::Agent>>,
    cancelled: Cell<bool>,
    succeeded: Cell<bool>,
}

/// Shared reference to a task, held by the pool and by creature ledgers.
///
/// The handle records which creatures currently hold the task. That set only
/// changes through [`assign`](Self::assign) / [`unassign`](Self::unassign),
/// which also fire the task's hooks, so the pool can enforce
/// `max_assignable` without seeing any ledger.
///
/// Handles compare equal when the task names match.
pub struct TaskHandle<W>
where
    W: TaskWorld + 'static,
{
    inner: Rc<TaskCell<W>>,
}

impl<W> Clone for TaskHandle<W>
where
    W: TaskWorld + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<W> TaskHandle<W>
where
    W: TaskWorld + 'static,
{
    pub fn new(task: impl Task<W>) -> Self {
        Self::from_box(Box::new(task))
    }

    pub fn from_box(task: Box<dyn Task<W>>) -> Self {
        Self {
            inner: Rc::new(TaskCell {
                task: RefCell::new(task),
                assignees: RefCell::new(Vec::new()),
                cancelled: Cell::new(false),
                succeeded: Cell::new(false),
            }),
        }
    }

    pub fn info(&self) -> Ref<'_, TaskInfo> {
        Ref::map(self.inner.task.borrow(), |t| t.info())
    }

    pub fn name(&self) -> String {
        self.info().name.clone()
    }

    pub fn priority(&self) -> TaskPriority {
        self.info().priority
    }

    /// Escalate or demote at runtime (e.g. hunger turning critical).
    pub fn set_priority(&self, priority: TaskPriority) {
        self.inner.task.borrow_mut().info_mut().priority = priority;
    }

    pub fn category(&self) -> TaskCategory {
        self.info().category
    }

    pub fn max_assignable(&self) -> usize {
        self.info().max_assignable
    }

    pub fn reassign_on_death(&self) -> bool {
        self.info().reassign_on_death
    }

    /// Same job: identical handle or identical name.
    pub fn same_task(&self, other: &TaskHandle<W>) -> bool {
        self.ptr_eq(other) || self.info().name == other.info().name
    }

    pub fn ptr_eq(&self, other: &TaskHandle<W>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    pub fn mark_cancelled(&self) {
        self.inner.cancelled.set(true);
    }

    pub fn has_succeeded(&self) -> bool {
        self.inner.succeeded.get()
    }

    pub fn mark_succeeded(&self) {
        self.inner.succeeded.set(true);
    }

    /// Done for good: completed in the world, succeeded once and not
    /// repeatable, or unable to script again.
    pub fn is_finished(&self, world: &W) -> bool {
        self.is_complete(world) || self.is_spent() || (self.has_succeeded() && !self.info().repeatable)
    }

    pub fn is_spent(&self) -> bool {
        self.inner.task.borrow().is_spent()
    }

    pub fn assignees(&self) -> Vec<W::Agent> {
        self.inner.assignees.borrow().clone()
    }

    pub fn assignee_count(&self) -> usize {
        self.inner.assignees.borrow().len()
    }

    pub fn is_assigned_to(&self, agent: W::Agent) -> bool {
        self.inner.assignees.borrow().contains(&agent)
    }

    pub fn has_free_slot(&self) -> bool {
        self.assignee_count() < self.max_assignable()
    }

    /// Dead creatures and cancelled tasks are never feasible.
    pub fn is_feasible(&self, agent: W::Agent, world: &W) -> Feasibility {
        if self.is_cancelled() || !world.is_alive(agent) {
            return Feasibility::Infeasible;
        }
        self.inner.task.borrow().is_feasible(agent, world)
    }

    pub fn compute_cost(&self, agent: W::Agent, world: &W) -> f32 {
        if !world.is_alive(agent) {
            return INFEASIBLE_COST;
        }
        let cost = self.inner.task.borrow().compute_cost(agent, world);
        if cost.is_nan() {
            INFEASIBLE_COST
        } else {
            cost
        }
    }

    pub fn create_script(&self, agent: W::Agent, world: &W) -> Option<Box<dyn Act<W>>> {
        if self.is_cancelled() {
            return None;
        }
        self.inner.task.borrow_mut().create_script(agent, world)
    }

    pub fn is_complete(&self, world: &W) -> bool {
        self.inner.task.borrow().is_complete(world)
    }

    pub fn should_delete(&self, agent: W::Agent, world: &W) -> bool {
        self.is_cancelled() || self.inner.task.borrow().should_delete(agent, world)
    }

    pub fn should_retry(&self, agent: W::Agent, world: &W) -> bool {
        !self.is_cancelled() && self.inner.task.borrow().should_retry(agent, world)
    }

    /// Fire `on_assign` and record `agent` as a holder.
    pub fn assign(&self, agent: W::Agent, world: &mut W) {
        self.inner.task.borrow_mut().on_assign(agent, world);
        let mut assignees = self.inner.assignees.borrow_mut();
        if !assignees.contains(&agent) {
            assignees.push(agent);
        }
    }

    /// Fire `on_unassign` and forget `agent`. Unknown agents leave the holder set alone.
    pub fn unassign(&self, agent: W::Agent, world: &mut W) {
        self.inner.task.borrow_mut().on_unassign(agent, world);
        self.inner.assignees.borrow_mut().retain(|a| *a != agent);
    }
}

impl<W> PartialEq for TaskHandle<W>
where
    W: TaskWorld + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.same_task(other)
    }
}

impl<W> fmt::Debug for TaskHandle<W>
where
    W: TaskWorld + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info();
        f.debug_struct("TaskHandle")
            .field("name", &info.name)
            .field("priority", &info.priority)
            .field("assignees", &self.inner.assignees.borrow())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
