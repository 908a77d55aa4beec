#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use colony_act::{Act, ActStatus};
use colony_agent::{Creature, CreatureWorld, IdleBehavior};
use colony_core::{Blackboard, SimTime, TickContext, WorldMut, WorldView};
use colony_task::{Feasibility, Task, TaskHandle, TaskInfo, TaskPriority, TaskWorld};
use colony_tools::trace::{TraceLog, TRACE_LOG};

#[derive(Debug, Default)]
pub struct Camp {
    pub dead: BTreeSet<u64>,
    pub wild: BTreeSet<u64>,
    pub striking: BTreeSet<u64>,
    pub swimming: BTreeSet<u64>,
    pub burning: BTreeSet<u64>,
    pub potions: BTreeMap<u64, u32>,
    pub consumed: Vec<(u64, String)>,
    pub assigned: Vec<(String, u64)>,
    pub unassigned: Vec<(String, u64)>,
    pub canceled: Vec<String>,
    pub done: BTreeSet<String>,
}

impl Camp {
    pub fn assigned_count(&self, name: &str) -> usize {
        self.assigned.iter().filter(|(n, _)| n == name).count()
    }

    pub fn unassigned_count(&self, name: &str) -> usize {
        self.unassigned.iter().filter(|(n, _)| n == name).count()
    }
}

impl WorldView for Camp {
    type Agent = u64;
}

impl WorldMut for Camp {}

impl TaskWorld for Camp {
    fn is_alive(&self, agent: u64) -> bool {
        !self.dead.contains(&agent)
    }
}

impl CreatureWorld for Camp {
    fn is_player_controlled(&self, agent: u64) -> bool {
        !self.wild.contains(&agent)
    }

    fn is_incapacitated(&self, agent: u64) -> bool {
        self.striking.contains(&agent)
    }

    fn in_liquid(&self, agent: u64) -> bool {
        self.swimming.contains(&agent)
    }

    fn on_fire(&self, agent: u64) -> bool {
        self.burning.contains(&agent)
    }

    fn consume_beneficial_item(&mut self, agent: u64) -> Option<String> {
        let left = self.potions.get_mut(&agent)?;
        if *left == 0 {
            return None;
        }
        *left -= 1;
        self.consumed.push((agent, "Potion".to_string()));
        Some("Potion".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Succeed on the n-th tick.
    Succeed(u32),
    /// Fail on the n-th tick.
    Fail(u32),
    Forever,
    /// Mark the job done in the world and report failure in the same tick.
    FailCompleting,
    NoScript,
}

pub struct Script {
    name: String,
    outcome: Outcome,
    ticks: u32,
}

impl Script {
    pub fn new(name: &str, outcome: Outcome) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            ticks: 0,
        }
    }
}

impl Act<Camp> for Script {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.ticks = 0;
    }

    fn tick(&mut self, _ctx: &TickContext, _agent: u64, world: &mut Camp, _bb: &mut Blackboard) -> ActStatus {
        self.ticks += 1;
        match self.outcome {
            Outcome::Succeed(n) if self.ticks >= n => ActStatus::Success,
            Outcome::Fail(n) if self.ticks >= n => ActStatus::Fail,
            Outcome::FailCompleting => {
                world.done.insert(self.name.clone());
                ActStatus::Fail
            }
            _ => ActStatus::Running,
        }
    }

    fn on_canceled(&mut self, _ctx: &TickContext, _agent: u64, world: &mut Camp, _bb: &mut Blackboard) {
        world.canceled.push(self.name.clone());
    }
}

pub struct Chore {
    pub info: TaskInfo,
    pub outcome: Outcome,
    pub cost: f32,
    pub feasible: bool,
    pub delete: bool,
}

impl Chore {
    pub fn new(name: &str, priority: TaskPriority, outcome: Outcome) -> Self {
        Self {
            info: TaskInfo::new(name).with_priority(priority),
            outcome,
            cost: 1.0,
            feasible: true,
            delete: false,
        }
    }

    pub fn cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn infeasible(mut self) -> Self {
        self.feasible = false;
        self
    }

    pub fn doomed(mut self) -> Self {
        self.delete = true;
        self
    }

    pub fn retrying(mut self) -> Self {
        self.info = self.info.with_auto_retry(true);
        self
    }

    pub fn with_info(mut self, f: impl FnOnce(TaskInfo) -> TaskInfo) -> Self {
        self.info = f(self.info);
        self
    }

    pub fn handle(self) -> TaskHandle<Camp> {
        TaskHandle::new(self)
    }
}

impl Task<Camp> for Chore {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TaskInfo {
        &mut self.info
    }

    fn is_feasible(&self, _agent: u64, _world: &Camp) -> Feasibility {
        Feasibility::from_bool(self.feasible)
    }

    fn compute_cost(&self, _agent: u64, _world: &Camp) -> f32 {
        self.cost
    }

    fn create_script(&mut self, _agent: u64, _world: &Camp) -> Option<Box<dyn Act<Camp>>> {
        if self.outcome == Outcome::NoScript {
            return None;
        }
        Some(Box::new(Script {
            name: self.info.name.clone(),
            outcome: self.outcome,
            ticks: 0,
        }))
    }

    fn is_complete(&self, world: &Camp) -> bool {
        world.done.contains(&self.info.name)
    }

    fn should_delete(&self, _agent: u64, _world: &Camp) -> bool {
        self.delete
    }

    fn on_assign(&mut self, agent: u64, world: &mut Camp) {
        world.assigned.push((self.info.name.clone(), agent));
    }

    fn on_unassign(&mut self, agent: u64, world: &mut Camp) {
        world.unassigned.push((self.info.name.clone(), agent));
    }
}

/// Leaves the creature idle instead of inventing busywork.
pub struct NoIdle;

impl IdleBehavior<Camp> for NoIdle {
    fn idle_task(&mut self, _ctx: &TickContext, _agent: u64, _world: &Camp) -> Option<TaskHandle<Camp>> {
        None
    }
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1, SimTime::from_millis(tick * 100), 7)
}

pub fn ctx_at(tick: u64, millis: u64) -> TickContext {
    TickContext::new(tick, 0.1, SimTime::from_millis(millis), 7)
}

pub fn traced(agent: u64) -> Creature<Camp> {
    let mut creature = Creature::new(agent);
    creature.blackboard.set(TRACE_LOG, TraceLog::default());
    creature
}

pub fn busy(agent: u64) -> Creature<Camp> {
    traced(agent).with_idle(NoIdle)
}

pub fn current_name(creature: &Creature<Camp>) -> Option<String> {
    creature.current_task().map(|t| t.name())
}

pub fn trace(creature: &Creature<Camp>) -> &TraceLog {
    creature
        .blackboard
        .get(TRACE_LOG)
        .expect("trace log installed")
}
