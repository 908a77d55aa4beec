use anyhow::Result;
use colony_agent::Creature;
use colony_core::TickContext;
use colony_task::{TaskHandle, TaskPool, TaskPriority};
use tracing::{info, warn};

use crate::jobs::{SatisfyHunger, SATISFY_HUNGER};
use crate::scenario::HungerConfig;
use crate::world::DemoWorld;

/// Raises hunger, queues meals, escalates them when starving, and removes
/// creatures that starve.
pub struct HungerSystem {
    config: HungerConfig,
}

fn held_meal(creature: &Creature<DemoWorld>) -> Option<TaskHandle<DemoWorld>> {
    creature
        .current_task()
        .into_iter()
        .chain(creature.ledger.queued())
        .find(|t| t.name() == SATISFY_HUNGER)
        .cloned()
}

impl HungerSystem {
    pub fn new(config: HungerConfig) -> Self {
        Self { config }
    }

    /// Returns how many creatures starved this tick.
    pub fn update(
        &self,
        ctx: &TickContext,
        world: &mut DemoWorld,
        pool: &mut dyn TaskPool<DemoWorld>,
        creatures: &mut [Creature<DemoWorld>],
    ) -> Result<usize> {
        let mut starved = 0;
        for creature in creatures.iter_mut().filter(|c| !c.is_removed()) {
            let agent = creature.agent;
            let Some(state) = world.creature_mut(agent) else {
                continue;
            };
            state.stats.hunger += self.config.per_second * ctx.dt_seconds;
            let hunger = state.stats.hunger;

            if hunger >= 1.0 {
                state.stats.alive = false;
                warn!(agent, name = %state.name, "creature starved");
                creature.remove(ctx, world, pool)?;
                starved += 1;
                continue;
            }

            if hunger >= self.config.starving_at {
                match held_meal(creature) {
                    Some(meal) if meal.priority() < TaskPriority::Urgent => {
                        meal.set_priority(TaskPriority::Urgent);
                        info!(agent, "meal escalated to urgent");
                    }
                    Some(_) => {}
                    None => {
                        creature.assign_task(SatisfyHunger::handle(TaskPriority::Urgent), ctx, world)?;
                    }
                }
                creature.set_message("Starving!");
            } else if hunger >= self.config.hungry_at && held_meal(creature).is_none() {
                creature.assign_task(SatisfyHunger::handle(TaskPriority::Medium), ctx, world)?;
                creature.set_message("Hungry");
            }
        }
        Ok(starved)
    }
}
