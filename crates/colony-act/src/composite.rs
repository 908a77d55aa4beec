use colony_core::{Blackboard, TickContext, WorldMut};

use crate::act::{Act, ActStatus};

/// Runs children in order, one child step per tick.
///
/// Fails as soon as a child fails (later children never run) and succeeds when
/// the last child succeeds. A child succeeding before the end yields `Running`
/// for that tick. An empty sequence fails.
pub struct Sequence<W>
where
    W: WorldMut + 'static,
{
    name: String,
    children: Vec<Box<dyn Act<W>>>,
    index: usize,
    last_ticked: Option<usize>,
}

impl<W> Sequence<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn Act<W>>>) -> Self {
        Self::named("Sequence", children)
    }

    pub fn named(name: impl Into<String>, children: Vec<Box<dyn Act<W>>>) -> Self {
        Self {
            name: name.into(),
            children,
            index: 0,
            last_ticked: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }
}

impl<W> Act<W> for Sequence<W>
where
    W: WorldMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.index = 0;
        self.last_ticked = None;
        for child in self.children.iter_mut() {
            child.initialize();
        }
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus {
        if self.children.is_empty() {
            return ActStatus::Fail;
        }
        if self.index >= self.children.len() {
            return ActStatus::Success;
        }

        let status = self.children[self.index].tick(ctx, agent, world, blackboard);
        self.last_ticked = Some(self.index);
        match status {
            ActStatus::Running => ActStatus::Running,
            ActStatus::Fail => ActStatus::Fail,
            ActStatus::Success => {
                self.index += 1;
                if self.index >= self.children.len() {
                    ActStatus::Success
                } else {
                    ActStatus::Running
                }
            }
        }
    }

    fn on_canceled(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.on_canceled(ctx, agent, world, blackboard);
        }
    }

    fn last_ticked_child(&self) -> Option<&dyn Act<W>> {
        self.last_ticked.map(|i| self.children[i].as_ref())
    }
}

/// Tries children in order, one child step per tick, until one succeeds.
///
/// Succeeds with the first successful child; a failing child hands over to the
/// next one on the following tick. Fails when every child failed, or when empty.
pub struct Select<W>
where
    W: WorldMut + 'static,
{
    name: String,
    children: Vec<Box<dyn Act<W>>>,
    index: usize,
    last_ticked: Option<usize>,
}

impl<W> Select<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn Act<W>>>) -> Self {
        Self::named("Select", children)
    }

    pub fn named(name: impl Into<String>, children: Vec<Box<dyn Act<W>>>) -> Self {
        Self {
            name: name.into(),
            children,
            index: 0,
            last_ticked: None,
        }
    }
}

impl<W> Act<W> for Select<W>
where
    W: WorldMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.index = 0;
        self.last_ticked = None;
        for child in self.children.iter_mut() {
            child.initialize();
        }
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus {
        if self.index >= self.children.len() {
            return ActStatus::Fail;
        }

        let status = self.children[self.index].tick(ctx, agent, world, blackboard);
        self.last_ticked = Some(self.index);
        match status {
            ActStatus::Running => ActStatus::Running,
            ActStatus::Success => ActStatus::Success,
            ActStatus::Fail => {
                self.index += 1;
                if self.index >= self.children.len() {
                    ActStatus::Fail
                } else {
                    ActStatus::Running
                }
            }
        }
    }

    fn on_canceled(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.on_canceled(ctx, agent, world, blackboard);
        }
    }

    fn last_ticked_child(&self) -> Option<&dyn Act<W>> {
        self.last_ticked.map(|i| self.children[i].as_ref())
    }
}

/// Runs `child` only while `predicate` holds.
///
/// The predicate is checked before every child tick; once it is false the
/// child is canceled and the domain fails.
pub struct Domain<W, F>
where
    W: WorldMut + 'static,
{
    name: String,
    predicate: F,
    child: Box<dyn Act<W>>,
    ticked: bool,
}

impl<W, F> Domain<W, F>
where
    W: WorldMut + 'static,
    F: FnMut(&TickContext, W::Agent, &W, &Blackboard) -> bool + 'static,
{
    pub fn new(name: impl Into<String>, predicate: F, child: Box<dyn Act<W>>) -> Self {
        Self {
            name: name.into(),
            predicate,
            child,
            ticked: false,
        }
    }
}

impl<W, F> Act<W> for Domain<W, F>
where
    W: WorldMut + 'static,
    F: FnMut(&TickContext, W::Agent, &W, &Blackboard) -> bool + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.ticked = false;
        self.child.initialize();
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActStatus {
        if !(self.predicate)(ctx, agent, &*world, &*blackboard) {
            if self.ticked {
                self.child.on_canceled(ctx, agent, world, blackboard);
            }
            return ActStatus::Fail;
        }

        self.ticked = true;
        self.child.tick(ctx, agent, world, blackboard)
    }

    fn on_canceled(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.child.on_canceled(ctx, agent, world, blackboard);
    }

    fn last_ticked_child(&self) -> Option<&dyn Act<W>> {
        self.ticked.then(|| self.child.as_ref())
    }
}
