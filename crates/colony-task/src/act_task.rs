use colony_act::Act;

use crate::task::{Feasibility, Task, TaskInfo, TaskWorld};

type ActFactory<W> = Box<dyn FnMut(<W as colony_core::WorldView>::Agent, &W) -> Box<dyn Act<W>>>;

enum Source<W>
where
    W: TaskWorld + 'static,
{
    Factory(ActFactory<W>),
    Once(Option<Box<dyn Act<W>>>),
}

/// A task that is nothing more than a behavior to run.
///
/// Always feasible for a living creature. Built either from a factory (a fresh
/// act per activation, so retries work) or from a single act instance, which
/// can be scripted only once. A spent single-act task asks to be deleted and
/// never goes back to the pool when its holder dies.
pub struct ActTask<W>
where
    W: TaskWorld + 'static,
{
    info: TaskInfo,
    source: Source<W>,
}

impl<W> ActTask<W>
where
    W: TaskWorld + 'static,
{
    pub fn new(
        info: TaskInfo,
        make: impl FnMut(W::Agent, &W) -> Box<dyn Act<W>> + 'static,
    ) -> Self {
        Self {
            info,
            source: Source::Factory(Box::new(make)),
        }
    }

    pub fn once(info: TaskInfo, act: Box<dyn Act<W>>) -> Self {
        Self {
            info: info.with_reassign_on_death(false),
            source: Source::Once(Some(act)),
        }
    }
}

impl<W> Task<W> for ActTask<W>
where
    W: TaskWorld + 'static,
{
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TaskInfo {
        &mut self.info
    }

    fn is_feasible(&self, _agent: W::Agent, _world: &W) -> Feasibility {
        match &self.source {
            Source::Factory(_) => Feasibility::Feasible,
            Source::Once(act) => Feasibility::from_bool(act.is_some()),
        }
    }

    fn create_script(&mut self, agent: W::Agent, world: &W) -> Option<Box<dyn Act<W>>> {
        match &mut self.source {
            Source::Factory(make) => Some(make(agent, world)),
            Source::Once(act) => act.take(),
        }
    }

    fn should_delete(&self, _agent: W::Agent, _world: &W) -> bool {
        self.is_spent()
    }

    fn is_spent(&self) -> bool {
        matches!(self.source, Source::Once(None))
    }
}
