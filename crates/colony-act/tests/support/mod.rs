#![allow(dead_code)]

use colony_act::{Act, ActStatus};
use colony_core::{Blackboard, SimTime, TickContext, WorldMut, WorldView};

#[derive(Debug, Default)]
pub struct RecordingWorld {
    pub ticked: Vec<&'static str>,
    pub canceled: Vec<&'static str>,
    pub flag: bool,
}

impl WorldView for RecordingWorld {
    type Agent = u64;
}

impl WorldMut for RecordingWorld {}

/// Leaf that replays a fixed list of statuses, repeating the last one.
pub struct Scripted {
    name: &'static str,
    script: Vec<ActStatus>,
    cursor: usize,
}

impl Scripted {
    pub fn new(name: &'static str, script: Vec<ActStatus>) -> Self {
        Self {
            name,
            script,
            cursor: 0,
        }
    }

    pub fn boxed(name: &'static str, script: Vec<ActStatus>) -> Box<dyn Act<RecordingWorld>> {
        Box::new(Self::new(name, script))
    }
}

impl Act<RecordingWorld> for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn initialize(&mut self) {
        self.cursor = 0;
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut RecordingWorld,
        _blackboard: &mut Blackboard,
    ) -> ActStatus {
        world.ticked.push(self.name);
        let status = self.script[self.cursor.min(self.script.len() - 1)];
        self.cursor += 1;
        status
    }

    fn on_canceled(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut RecordingWorld,
        _blackboard: &mut Blackboard,
    ) {
        world.canceled.push(self.name);
    }
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1, SimTime::from_millis(tick * 100), 7)
}

pub fn run(
    act: &mut dyn Act<RecordingWorld>,
    world: &mut RecordingWorld,
    ticks: u64,
) -> Vec<ActStatus> {
    let mut bb = Blackboard::new();
    (0..ticks).map(|t| act.tick(&ctx(t), 1, world, &mut bb)).collect()
}
