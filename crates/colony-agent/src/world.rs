use colony_task::TaskWorld;

/// What the scheduling loop needs to know about a creature beyond its tasks.
///
/// Movement helpers are no-ops by default; worlds with a pathing layer
/// override them so idle acts actually move the creature.
pub trait CreatureWorld: TaskWorld {
    /// Member of the primary controllable faction, i.e. may use the global pool.
    fn is_player_controlled(&self, agent: Self::Agent) -> bool;

    /// On strike, unconscious, or otherwise unwilling to take pooled work.
    fn is_incapacitated(&self, _agent: Self::Agent) -> bool {
        false
    }

    fn in_liquid(&self, _agent: Self::Agent) -> bool {
        false
    }

    fn on_fire(&self, _agent: Self::Agent) -> bool {
        false
    }

    /// Use one held item that helps right now (e.g. a potion). Returns its name.
    fn consume_beneficial_item(&mut self, _agent: Self::Agent) -> Option<String> {
        None
    }

    fn wander(&mut self, _agent: Self::Agent, _radius: f32) {}

    fn swim_toward_land(&mut self, _agent: Self::Agent) {}
}
