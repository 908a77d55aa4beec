//! The demo colony: a strip of land above a river, some trees and a stockpile.
//!
//! Each creature's state owns its stats, position and inventory directly.

use std::collections::BTreeMap;

use colony_agent::CreatureWorld;
use colony_core::{DeterministicRng, SplitMix64, WorldMut, WorldView};
use colony_task::{TaskCategory, TaskWorld};

pub type CreatureId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Tile) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// One orthogonal step toward `target`, x first.
    pub fn step_toward(self, target: Tile) -> Tile {
        if self.x != target.x {
            Tile::new(self.x + (target.x - self.x).signum(), self.y)
        } else {
            Tile::new(self.x, self.y + (target.y - self.y).signum())
        }
    }

    /// Rows below zero are river.
    pub fn is_water(self) -> bool {
        self.y < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Colony,
    Wild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Wood,
    Potion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// 0 is sated, 1 is dead.
    pub hunger: f32,
    pub alive: bool,
    pub on_strike: bool,
    pub burning_seconds: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hunger: 0.0,
            alive: true,
            on_strike: false,
            burning_seconds: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatureState {
    pub name: String,
    pub faction: Faction,
    pub position: Tile,
    pub stats: Stats,
    pub inventory: Vec<Item>,
    pub can_chop: bool,
}

impl CreatureState {
    pub fn new(name: impl Into<String>, faction: Faction, position: Tile) -> Self {
        Self {
            name: name.into(),
            faction,
            position,
            stats: Stats::default(),
            inventory: Vec::new(),
            can_chop: faction == Faction::Colony,
        }
    }

    pub fn holds(&self, item: Item) -> bool {
        self.inventory.contains(&item)
    }

    pub fn take(&mut self, item: Item) -> bool {
        match self.inventory.iter().position(|i| *i == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    pub position: Tile,
    pub chopped: bool,
}

pub struct DemoWorld {
    pub creatures: BTreeMap<CreatureId, CreatureState>,
    pub trees: BTreeMap<u32, Tree>,
    pub stockpile: Tile,
    pub wood_stocked: u32,
    pub food: u32,
    rng: SplitMix64,
}

impl DemoWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            creatures: BTreeMap::new(),
            trees: BTreeMap::new(),
            stockpile: Tile::new(0, 0),
            wood_stocked: 0,
            food: 0,
            rng: SplitMix64::new(seed),
        }
    }

    pub fn creature(&self, id: CreatureId) -> Option<&CreatureState> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut CreatureState> {
        self.creatures.get_mut(&id)
    }

    /// Move one tile toward `target`. Returns whether the creature stands on it.
    pub fn move_toward(&mut self, id: CreatureId, target: Tile) -> Option<bool> {
        let creature = self.creatures.get_mut(&id)?;
        if creature.position != target {
            creature.position = creature.position.step_toward(target);
        }
        Some(creature.position == target)
    }

    pub fn trees_left(&self) -> usize {
        self.trees.values().filter(|t| !t.chopped).count()
    }

    pub fn random_land_tile(&mut self, width: i32, height: i32) -> Tile {
        let x = (self.rng.next_u32() % width.max(1) as u32) as i32;
        let y = (self.rng.next_u32() % height.max(1) as u32) as i32;
        Tile::new(x, y)
    }

    /// Burning counts down; creatures that never put it out keep panicking until it does.
    pub fn cool_down(&mut self, dt_seconds: f32) {
        for creature in self.creatures.values_mut() {
            creature.stats.burning_seconds = (creature.stats.burning_seconds - dt_seconds).max(0.0);
        }
    }
}

impl WorldView for DemoWorld {
    type Agent = CreatureId;
}

impl WorldMut for DemoWorld {}

impl TaskWorld for DemoWorld {
    fn is_alive(&self, agent: CreatureId) -> bool {
        self.creature(agent).is_some_and(|c| c.stats.alive)
    }

    fn can_perform(&self, agent: CreatureId, category: TaskCategory) -> bool {
        match category {
            TaskCategory::Chop => self.creature(agent).is_some_and(|c| c.can_chop),
            _ => true,
        }
    }
}

impl CreatureWorld for DemoWorld {
    fn is_player_controlled(&self, agent: CreatureId) -> bool {
        self.creature(agent)
            .is_some_and(|c| c.faction == Faction::Colony)
    }

    fn is_incapacitated(&self, agent: CreatureId) -> bool {
        self.creature(agent).is_some_and(|c| c.stats.on_strike)
    }

    fn in_liquid(&self, agent: CreatureId) -> bool {
        self.creature(agent).is_some_and(|c| c.position.is_water())
    }

    fn on_fire(&self, agent: CreatureId) -> bool {
        self.creature(agent)
            .is_some_and(|c| c.stats.burning_seconds > 0.0)
    }

    fn consume_beneficial_item(&mut self, agent: CreatureId) -> Option<String> {
        let creature = self.creatures.get_mut(&agent)?;
        if creature.stats.burning_seconds <= 0.0 || !creature.take(Item::Potion) {
            return None;
        }
        creature.stats.burning_seconds = 0.0;
        Some("Potion".to_string())
    }

    fn wander(&mut self, agent: CreatureId, radius: f32) {
        let roll = self.rng.next_u32() % 4;
        let Some(creature) = self.creatures.get_mut(&agent) else {
            return;
        };
        let here = creature.position;
        let next = match roll {
            0 => Tile::new(here.x + 1, here.y),
            1 => Tile::new(here.x - 1, here.y),
            2 => Tile::new(here.x, here.y + 1),
            _ => Tile::new(here.x, here.y - 1),
        };
        let limit = radius.max(1.0) as u32;
        if !next.is_water() && next.distance(self.stockpile) <= limit * 4 {
            creature.position = next;
        }
    }

    fn swim_toward_land(&mut self, agent: CreatureId) {
        if let Some(creature) = self.creatures.get_mut(&agent) {
            creature.position.y += 1;
        }
    }
}
