//! Work the demo colony knows how to do.

use colony_act::{Act, ActStatus, Sequence};
use colony_agent::NO_PATH;
use colony_core::{Blackboard, TickContext};
use colony_task::{Feasibility, Task, TaskCategory, TaskHandle, TaskInfo, TaskPriority};

use crate::world::{CreatureId, DemoWorld, Item, Tile};

pub const SATISFY_HUNGER: &str = "Satisfy hunger";

/// Walks one tile per tick. Fails if the creature is gone or the target is water.
pub struct WalkTo {
    name: String,
    target: Tile,
}

impl WalkTo {
    pub fn new(name: impl Into<String>, target: Tile) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

impl Act<DemoWorld> for WalkTo {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {}

    fn tick(&mut self, _ctx: &TickContext, agent: CreatureId, world: &mut DemoWorld, bb: &mut Blackboard) -> ActStatus {
        if self.target.is_water() {
            bb.set(NO_PATH, true);
            return ActStatus::Fail;
        }
        match world.move_toward(agent, self.target) {
            Some(true) => ActStatus::Success,
            Some(false) => ActStatus::Running,
            None => ActStatus::Fail,
        }
    }
}

/// A few swings, then the tree drops a log into the chopper's inventory.
pub struct Fell {
    tree: u32,
    swings: u32,
    left: u32,
}

impl Fell {
    pub fn new(tree: u32, swings: u32) -> Self {
        Self {
            tree,
            swings,
            left: swings,
        }
    }
}

impl Act<DemoWorld> for Fell {
    fn name(&self) -> &str {
        "Chop"
    }

    fn initialize(&mut self) {
        self.left = self.swings;
    }

    fn tick(&mut self, _ctx: &TickContext, agent: CreatureId, world: &mut DemoWorld, _bb: &mut Blackboard) -> ActStatus {
        let Some(tree) = world.trees.get_mut(&self.tree) else {
            return ActStatus::Fail;
        };
        if tree.chopped {
            return ActStatus::Fail;
        }
        if self.left > 0 {
            self.left -= 1;
            return ActStatus::Running;
        }
        tree.chopped = true;
        match world.creature_mut(agent) {
            Some(creature) => {
                creature.inventory.push(Item::Wood);
                ActStatus::Success
            }
            None => ActStatus::Fail,
        }
    }
}

pub struct Deposit;

impl Act<DemoWorld> for Deposit {
    fn name(&self) -> &str {
        "Stock wood"
    }

    fn initialize(&mut self) {}

    fn tick(&mut self, _ctx: &TickContext, agent: CreatureId, world: &mut DemoWorld, _bb: &mut Blackboard) -> ActStatus {
        let stocked = world
            .creature_mut(agent)
            .is_some_and(|c| c.take(Item::Wood));
        if stocked {
            world.wood_stocked += 1;
        }
        ActStatus::from_bool(stocked)
    }
}

pub struct Eat;

impl Act<DemoWorld> for Eat {
    fn name(&self) -> &str {
        "Eat"
    }

    fn initialize(&mut self) {}

    fn tick(&mut self, _ctx: &TickContext, agent: CreatureId, world: &mut DemoWorld, _bb: &mut Blackboard) -> ActStatus {
        if world.food == 0 {
            return ActStatus::Fail;
        }
        let Some(creature) = world.creature_mut(agent) else {
            return ActStatus::Fail;
        };
        creature.stats.hunger = 0.0;
        world.food -= 1;
        ActStatus::Success
    }
}

pub struct ChopTree {
    info: TaskInfo,
    tree: u32,
}

impl ChopTree {
    pub fn new(tree: u32) -> Self {
        Self {
            info: TaskInfo::new(format!("Chop Tree #{tree}"))
                .with_category(TaskCategory::Chop)
                .with_priority(TaskPriority::Medium),
            tree,
        }
    }

    pub fn handle(tree: u32) -> TaskHandle<DemoWorld> {
        TaskHandle::new(Self::new(tree))
    }
}

impl Task<DemoWorld> for ChopTree {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TaskInfo {
        &mut self.info
    }

    fn is_feasible(&self, _agent: CreatureId, world: &DemoWorld) -> Feasibility {
        Feasibility::from_bool(world.trees.get(&self.tree).is_some_and(|t| !t.chopped))
    }

    fn compute_cost(&self, agent: CreatureId, world: &DemoWorld) -> f32 {
        match (world.creature(agent), world.trees.get(&self.tree)) {
            (Some(creature), Some(tree)) => creature.position.distance(tree.position) as f32,
            _ => f32::MAX,
        }
    }

    fn create_script(&mut self, _agent: CreatureId, world: &DemoWorld) -> Option<Box<dyn Act<DemoWorld>>> {
        let tree = world.trees.get(&self.tree)?;
        Some(Box::new(Sequence::named(
            "Chop tree",
            vec![
                Box::new(WalkTo::new("Walk to tree", tree.position)) as Box<dyn Act<DemoWorld>>,
                Box::new(Fell::new(self.tree, 5)),
            ],
        )))
    }

    fn is_complete(&self, world: &DemoWorld) -> bool {
        world.trees.get(&self.tree).is_some_and(|t| t.chopped)
    }

    fn should_delete(&self, _agent: CreatureId, world: &DemoWorld) -> bool {
        !world.trees.contains_key(&self.tree)
    }
}

/// Carry a held log to the stockpile. One per creature, never pooled.
pub struct HaulWood {
    info: TaskInfo,
    hauler: CreatureId,
}

impl HaulWood {
    pub fn handle(hauler: CreatureId) -> TaskHandle<DemoWorld> {
        TaskHandle::new(Self {
            info: TaskInfo::new(format!("Haul wood ({hauler})"))
                .with_category(TaskCategory::Gather)
                .with_priority(TaskPriority::Low)
                .with_auto_retry(true)
                .with_reassign_on_death(false),
            hauler,
        })
    }
}

impl Task<DemoWorld> for HaulWood {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TaskInfo {
        &mut self.info
    }

    fn is_feasible(&self, agent: CreatureId, world: &DemoWorld) -> Feasibility {
        Feasibility::from_bool(agent == self.hauler && world.creature(agent).is_some_and(|c| c.holds(Item::Wood)))
    }

    fn create_script(&mut self, _agent: CreatureId, world: &DemoWorld) -> Option<Box<dyn Act<DemoWorld>>> {
        Some(Box::new(Sequence::named(
            "Haul",
            vec![
                Box::new(WalkTo::new("Walk to stockpile", world.stockpile)) as Box<dyn Act<DemoWorld>>,
                Box::new(Deposit),
            ],
        )))
    }

    fn is_complete(&self, world: &DemoWorld) -> bool {
        !world.creature(self.hauler).is_some_and(|c| c.holds(Item::Wood))
    }

    fn should_delete(&self, _agent: CreatureId, world: &DemoWorld) -> bool {
        self.is_complete(world)
    }
}

pub struct SatisfyHunger {
    info: TaskInfo,
}

impl SatisfyHunger {
    pub fn handle(priority: TaskPriority) -> TaskHandle<DemoWorld> {
        TaskHandle::new(Self {
            info: TaskInfo::new(SATISFY_HUNGER)
                .with_category(TaskCategory::Survival)
                .with_priority(priority)
                .with_auto_retry(true)
                .with_reassign_on_death(false),
        })
    }
}

impl Task<DemoWorld> for SatisfyHunger {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TaskInfo {
        &mut self.info
    }

    fn is_feasible(&self, _agent: CreatureId, world: &DemoWorld) -> Feasibility {
        Feasibility::from_bool(world.food > 0)
    }

    fn create_script(&mut self, _agent: CreatureId, world: &DemoWorld) -> Option<Box<dyn Act<DemoWorld>>> {
        Some(Box::new(Sequence::named(
            "Find food",
            vec![
                Box::new(WalkTo::new("Walk to stockpile", world.stockpile)) as Box<dyn Act<DemoWorld>>,
                Box::new(Eat),
            ],
        )))
    }
}
