#![allow(dead_code)]

use std::collections::BTreeSet;

use colony_act::{Act, Wait};
use colony_core::{WorldMut, WorldView};
use colony_task::{Feasibility, Task, TaskCategory, TaskHandle, TaskInfo, TaskPriority, TaskWorld};

#[derive(Debug, Default)]
pub struct Yard {
    pub dead: BTreeSet<u64>,
    pub woodcutters: Option<BTreeSet<u64>>,
    pub assigned: Vec<(String, u64)>,
    pub unassigned: Vec<(String, u64)>,
    pub done: BTreeSet<String>,
}

impl WorldView for Yard {
    type Agent = u64;
}

impl WorldMut for Yard {}

impl TaskWorld for Yard {
    fn is_alive(&self, agent: u64) -> bool {
        !self.dead.contains(&agent)
    }

    fn can_perform(&self, agent: u64, category: TaskCategory) -> bool {
        match (&self.woodcutters, category) {
            (Some(allowed), TaskCategory::Chop) => allowed.contains(&agent),
            _ => true,
        }
    }
}

/// Configurable task used across the pool tests.
pub struct Job {
    pub info: TaskInfo,
    pub cost: f32,
    pub feasible: bool,
}

impl Job {
    pub fn new(name: &str, priority: TaskPriority, cost: f32) -> Self {
        Self {
            info: TaskInfo::new(name).with_priority(priority),
            cost,
            feasible: true,
        }
    }

    pub fn infeasible(mut self) -> Self {
        self.feasible = false;
        self
    }

    pub fn with_info(mut self, f: impl FnOnce(TaskInfo) -> TaskInfo) -> Self {
        self.info = f(self.info);
        self
    }

    pub fn handle(self) -> TaskHandle<Yard> {
        TaskHandle::new(self)
    }
}

impl Task<Yard> for Job {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TaskInfo {
        &mut self.info
    }

    fn is_feasible(&self, _agent: u64, _world: &Yard) -> Feasibility {
        Feasibility::from_bool(self.feasible)
    }

    fn compute_cost(&self, _agent: u64, _world: &Yard) -> f32 {
        self.cost
    }

    fn create_script(&mut self, _agent: u64, _world: &Yard) -> Option<Box<dyn Act<Yard>>> {
        Some(Box::new(Wait::new(self.info.name.clone(), 1.0)))
    }

    fn is_complete(&self, world: &Yard) -> bool {
        world.done.contains(&self.info.name)
    }

    fn on_assign(&mut self, agent: u64, world: &mut Yard) {
        world.assigned.push((self.info.name.clone(), agent));
    }

    fn on_unassign(&mut self, agent: u64, world: &mut Yard) {
        world.unassigned.push((self.info.name.clone(), agent));
    }
}
