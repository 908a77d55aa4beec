use tracing::debug;

use crate::handle::TaskHandle;
use crate::task::{TaskPriority, TaskWorld};

/// The colony-wide pool of unclaimed or reclaimable work.
///
/// This is the only structure several creatures' scheduling passes touch. It
/// owns cross-creature policy: `max_assignable` is enforced here.
pub trait TaskPool<W>
where
    W: TaskWorld + 'static,
{
    /// Best task `agent` could take with priority at or above `min_priority`.
    ///
    /// Does not claim it; the caller claims by activating the task, which
    /// records the assignment on the handle.
    fn get_best_task(
        &mut self,
        agent: W::Agent,
        world: &W,
        min_priority: TaskPriority,
    ) -> Option<TaskHandle<W>> {
        self.get_best_task_except(agent, world, min_priority, &|_| false)
    }

    /// Like [`TaskPool::get_best_task`], ignoring tasks for which `skip` holds.
    /// Creatures use this to pass over work they recently failed.
    fn get_best_task_except(
        &mut self,
        agent: W::Agent,
        world: &W,
        min_priority: TaskPriority,
        skip: &dyn Fn(&TaskHandle<W>) -> bool,
    ) -> Option<TaskHandle<W>>;

    /// Offer a task. Returns false if the same job is already pooled.
    fn add_task(&mut self, task: TaskHandle<W>) -> bool;

    /// Withdraw a task everywhere: it leaves the pool and is marked cancelled
    /// so every ledger holding it drops it.
    fn cancel_task(&mut self, task: &TaskHandle<W>) -> bool;

    fn has_task(&self, task: &TaskHandle<W>) -> bool;
}

/// Reference pool: an insertion-ordered list of task handles.
pub struct TaskManager<W>
where
    W: TaskWorld + 'static,
{
    tasks: Vec<TaskHandle<W>>,
}

impl<W> Default for TaskManager<W>
where
    W: TaskWorld + 'static,
{
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<W> TaskManager<W>
where
    W: TaskWorld + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskHandle<W>> {
        self.tasks.iter()
    }

    /// Whether `agent` could claim `task` right now, ignoring priority.
    pub fn is_claimable(&self, task: &TaskHandle<W>, agent: W::Agent, world: &W) -> bool {
        !task.is_cancelled()
            && !task.is_finished(world)
            && !task.is_assigned_to(agent)
            && task.has_free_slot()
            && world.can_perform(agent, task.category())
            && task.is_feasible(agent, world).is_feasible()
    }

    /// Drop tasks that are cancelled or finished. Returns how many were removed.
    pub fn retain_live(&mut self, world: &W) -> usize {
        let before = self.tasks.len();
        self.tasks
            .retain(|task| !task.is_cancelled() && !task.is_finished(world));
        let removed = before - self.tasks.len();
        if removed > 0 {
            debug!(removed, remaining = self.tasks.len(), "pruned task pool");
        }
        removed
    }
}

impl<W> TaskPool<W> for TaskManager<W>
where
    W: TaskWorld + 'static,
{
    fn get_best_task_except(
        &mut self,
        agent: W::Agent,
        world: &W,
        min_priority: TaskPriority,
        skip: &dyn Fn(&TaskHandle<W>) -> bool,
    ) -> Option<TaskHandle<W>> {
        let mut best: Option<(TaskPriority, f32, &TaskHandle<W>)> = None;

        for task in self.tasks.iter() {
            let priority = task.priority();
            if priority < min_priority || skip(task) || !self.is_claimable(task, agent, world) {
                continue;
            }

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

    fn add_task(&mut self, task: TaskHandle<W>) -> bool {
        if self.tasks.iter().any(|t| t.same_task(&task)) {
            return false;
        }
        debug!(task = %task.name(), priority = ?task.priority(), "task pooled");
        self.tasks.push(task);
        true
    }

    fn cancel_task(&mut self, task: &TaskHandle<W>) -> bool {
        task.mark_cancelled();
        for pooled in self.tasks.iter().filter(|t| t.same_task(task)) {
            pooled.mark_cancelled();
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.same_task(task));
        let removed = before != self.tasks.len();
        debug!(task = %task.name(), removed, "task cancelled");
        removed
    }

    fn has_task(&self, task: &TaskHandle<W>) -> bool {
        self.tasks.iter().any(|t| t.same_task(task))
    }
}
