use anyhow::Result;
use colony_agent::{tick_creatures, Creature, DefaultIdle};
use colony_core::{SimTime, TickContext};
use colony_task::{TaskManager, TaskPool};
use colony_tools::trace::{TraceEvent, TraceLog, TRACE_LOG};
use tracing::{debug, info};

use crate::hunger::HungerSystem;
use crate::jobs::{ChopTree, HaulWood};
use crate::scenario::ScenarioConfig;
use crate::world::{CreatureId, CreatureState, DemoWorld, Faction, Item, Tile, Tree};

const FIELD_WIDTH: i32 = 16;
const FIELD_HEIGHT: i32 = 8;

pub struct Simulation {
    pub world: DemoWorld,
    pub pool: TaskManager<DemoWorld>,
    pub creatures: Vec<Creature<DemoWorld>>,
    hunger: HungerSystem,
    ctx: TickContext,
    starved: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u64,
    pub trees_left: usize,
    pub wood_stocked: u32,
    pub food_left: u32,
    pub starved: usize,
    pub pooled_tasks: usize,
}

impl Simulation {
    pub fn new(scenario: &ScenarioConfig) -> Self {
        let mut world = DemoWorld::new(scenario.seed);
        world.food = scenario.food;
        world.stockpile = Tile::new(FIELD_WIDTH / 2, 0);

        let mut pool = TaskManager::new();
        for index in 0..scenario.trees {
            let id = index as u32 + 1;
            let position = world.random_land_tile(FIELD_WIDTH, FIELD_HEIGHT);
            world.trees.insert(
                id,
                Tree {
                    position,
                    chopped: false,
                },
            );
            pool.add_task(ChopTree::handle(id));
        }

        let mut creatures = Vec::new();
        let population = scenario.colonists + scenario.wild_creatures;
        for index in 0..population {
            let id = index as CreatureId + 1;
            let (name, faction) = if index < scenario.colonists {
                (format!("Colonist {id}"), Faction::Colony)
            } else {
                (format!("Beast {id}"), Faction::Wild)
            };
            let mut state = CreatureState::new(name, faction, Tile::new(index as i32, 0));
            if faction == Faction::Colony {
                state.inventory.extend((0..scenario.potions).map(|_| Item::Potion));
            }
            world.creatures.insert(id, state);

            let mut creature = Creature::with_config(id, scenario.scheduler.clone())
                .with_idle(DefaultIdle::from_config(&scenario.scheduler));
            if scenario.trace {
                creature.blackboard.set(TRACE_LOG, TraceLog::default());
            }
            creatures.push(creature);
        }

        info!(
            trees = scenario.trees,
            colonists = scenario.colonists,
            wild = scenario.wild_creatures,
            "scenario ready"
        );

        Self {
            world,
            pool,
            creatures,
            hunger: HungerSystem::new(scenario.hunger.clone()),
            ctx: TickContext::new(0, scenario.dt_seconds, SimTime::START, scenario.seed),
            starved: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.ctx.tick
    }

    pub fn step(&mut self) -> Result<()> {
        let ctx = self.ctx;

        self.starved += self
            .hunger
            .update(&ctx, &mut self.world, &mut self.pool, &mut self.creatures)?;
        self.queue_hauling()?;

        tick_creatures(&ctx, &mut self.world, &mut self.pool, &mut self.creatures);

        let pruned = self.pool.retain_live(&self.world);
        if pruned > 0 {
            debug!(tick = ctx.tick, pruned, "pool pruned");
        }
        self.world.cool_down(ctx.dt_seconds);
        self.ctx = ctx.next();
        Ok(())
    }

    /// Anyone carrying a log gets a haul job for it.
    fn queue_hauling(&mut self) -> Result<()> {
        for creature in self.creatures.iter_mut().filter(|c| !c.is_removed()) {
            let carrying = self
                .world
                .creature(creature.agent)
                .is_some_and(|c| c.holds(Item::Wood));
            if !carrying {
                continue;
            }
            let haul = HaulWood::handle(creature.agent);
            let held = creature.current_task().is_some_and(|t| t.same_task(&haul))
                || creature.ledger.has_task_with_name(&haul);
            if !held {
                creature.assign_task(haul, &self.ctx, &mut self.world)?;
            }
        }
        Ok(())
    }

    pub fn report(&self) -> String {
        let mut lines = vec![format!("-- tick {} --", self.ctx.tick)];
        for creature in &self.creatures {
            let name = self
                .world
                .creature(creature.agent)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            if creature.is_removed() {
                lines.push(format!("{name}: gone"));
                continue;
            }
            let description = creature.describe().to_string().replace('\n', " | ");
            lines.push(format!("{name}: {description}"));
        }
        lines.join("\n")
    }

    pub fn summary(&self) -> Summary {
        Summary {
            ticks: self.ctx.tick,
            trees_left: self.world.trees_left(),
            wood_stocked: self.world.wood_stocked,
            food_left: self.world.food,
            starved: self.starved,
            pooled_tasks: self.pool.len(),
        }
    }

    /// Every creature's trace events, ordered by tick then creature.
    pub fn trace_events(&self) -> Vec<TraceEvent> {
        let mut events: Vec<TraceEvent> = self
            .creatures
            .iter()
            .filter_map(|c| c.blackboard.get(TRACE_LOG))
            .flat_map(|log| log.events.iter().cloned())
            .collect();
        events.sort_by_key(|e| (e.tick, e.agent));
        events
    }
}
