use colony_act::Act;
use colony_core::WorldMut;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Urgency of a task. Ordered: `Eventually < Low < Medium < High < Urgent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskPriority {
    Eventually,
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// The next level up, or `None` at `Urgent`.
    pub fn raised(self) -> Option<Self> {
        match self {
            TaskPriority::Eventually => Some(TaskPriority::Low),
            TaskPriority::Low => Some(TaskPriority::Medium),
            TaskPriority::Medium => Some(TaskPriority::High),
            TaskPriority::High => Some(TaskPriority::Urgent),
            TaskPriority::Urgent => None,
        }
    }
}

/// Kind of work, used to match tasks against what a creature is able to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskCategory {
    #[default]
    Other,
    Dig,
    Chop,
    Harvest,
    Gather,
    Build,
    Craft,
    Cook,
    Research,
    Guard,
    Attack,
    Survival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    Infeasible,
}

impl Feasibility {
    pub fn is_feasible(self) -> bool {
        self == Feasibility::Feasible
    }

    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Feasibility::Feasible
        } else {
            Feasibility::Infeasible
        }
    }
}

/// Scheduling data every task carries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskInfo {
    /// Identity: two tasks with the same name are the same job.
    pub name: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    /// How many creatures may hold the task at once.
    pub max_assignable: usize,
    /// Retry after a failed attempt instead of abandoning it.
    pub auto_retry: bool,
    /// Return to the global pool if the holder dies.
    pub reassign_on_death: bool,
    /// Keep offering the task after a successful attempt until `is_complete` says so.
    pub repeatable: bool,
}

impl TaskInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: TaskPriority::Medium,
            category: TaskCategory::Other,
            max_assignable: 1,
            auto_retry: false,
            reassign_on_death: true,
            repeatable: false,
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_max_assignable(mut self, max: usize) -> Self {
        self.max_assignable = max.max(1);
        self
    }

    pub fn with_auto_retry(mut self, auto_retry: bool) -> Self {
        self.auto_retry = auto_retry;
        self
    }

    pub fn with_reassign_on_death(mut self, reassign: bool) -> Self {
        self.reassign_on_death = reassign;
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

/// World queries tasks and the pool rely on.
pub trait TaskWorld: WorldMut {
    /// False for dead or removed creatures; such agents never find a task feasible.
    fn is_alive(&self, agent: Self::Agent) -> bool;

    fn can_perform(&self, _agent: Self::Agent, _category: TaskCategory) -> bool {
        true
    }
}

/// A unit of work a creature can be assigned.
///
/// Query methods must be side-effect free and cheap: the scheduler calls them
/// for every queued task on every pass. Only `create_script`, `on_assign` and
/// `on_unassign` may change state.
pub trait Task<W>: 'static
where
    W: TaskWorld + 'static,
{
    fn info(&self) -> &TaskInfo;

    fn info_mut(&mut self) -> &mut TaskInfo;

    fn is_feasible(&self, agent: W::Agent, world: &W) -> Feasibility;

    /// Lower is better. Return a huge value rather than panicking on bad state.
    fn compute_cost(&self, _agent: W::Agent, _world: &W) -> f32 {
        1.0
    }

    /// Build the behavior that performs this task, or `None` if its
    /// preconditions no longer hold.
    fn create_script(&mut self, agent: W::Agent, world: &W) -> Option<Box<dyn Act<W>>>;

    /// Completion detected from the world, independent of any act's status.
    fn is_complete(&self, _world: &W) -> bool {
        false
    }

    /// Permanently invalid for this creature (e.g. the target is gone).
    fn should_delete(&self, _agent: W::Agent, _world: &W) -> bool {
        false
    }

    fn should_retry(&self, _agent: W::Agent, _world: &W) -> bool {
        self.info().auto_retry
    }

    /// Can never produce another script, for anyone.
    fn is_spent(&self) -> bool {
        false
    }

    fn on_assign(&mut self, _agent: W::Agent, _world: &mut W) {}

    fn on_unassign(&mut self, _agent: W::Agent, _world: &mut W) {}
}
