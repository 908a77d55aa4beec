mod support;

use colony_agent::{tick_creatures, Creature, SchedulerConfig};
use colony_task::{TaskManager, TaskPool, TaskPriority};
use support::{busy, ctx, current_name, Camp, Chore, NoIdle, Outcome};

#[test]
fn idle_creature_takes_highest_priority_then_cheapest() {
    let mut world = Camp::default();
    let mut pool: TaskManager<Camp> = TaskManager::new();
    let mut creature = busy(1);

    let a = Chore::new("A", TaskPriority::Medium, Outcome::Forever).cost(5.0).handle();
    let b = Chore::new("B", TaskPriority::Medium, Outcome::Forever).cost(3.0).handle();
    let c = Chore::new("C", TaskPriority::High, Outcome::Forever).cost(100.0).handle();
    for task in [&a, &b, &c] {
        creature.assign_task(task.clone(), &ctx(0), &mut world).unwrap();
    }

    creature.tick(&ctx(0), &mut world, &mut pool);
    assert_eq!(current_name(&creature).as_deref(), Some("C"));
    assert_eq!(creature.ledger.queued().len(), 2);

    creature.remove_task(&c, &ctx(1), &mut world).unwrap();
    assert!(creature.current_task().is_none());

    creature.tick(&ctx(1), &mut world, &mut pool);
    assert_eq!(current_name(&creature).as_deref(), Some("B"));
}

#[test]
fn infeasible_queued_tasks_are_skipped() {
    let mut world = Camp::default();
    let mut pool: TaskManager<Camp> = TaskManager::new();
    let mut creature = busy(1);

    let blocked = Chore::new("Blocked", TaskPriority::Urgent, Outcome::Forever).infeasible().handle();
    let open = Chore::new("Open", TaskPriority::Low, Outcome::Forever).handle();
    creature.assign_task(blocked, &ctx(0), &mut world).unwrap();
    creature.assign_task(open, &ctx(0), &mut world).unwrap();

    creature.tick(&ctx(0), &mut world, &mut pool);
    assert_eq!(current_name(&creature).as_deref(), Some("Open"));
}

#[test]
fn assigning_twice_keeps_a_single_entry() {
    let mut world = Camp::default();
    let mut pool: TaskManager<Camp> = TaskManager::new();
    let mut creature = busy(1);
    let haul = Chore::new("Haul", TaskPriority::Medium, Outcome::Forever).handle();

    assert!(creature.assign_task(haul.clone(), &ctx(0), &mut world).unwrap());
    assert!(!creature.assign_task(haul.clone(), &ctx(0), &mut world).unwrap());
    assert_eq!(creature.ledger.queued().len(), 1);
    assert_eq!(world.assigned_count("Haul"), 1);

    creature.tick(&ctx(0), &mut world, &mut pool);
    assert_eq!(current_name(&creature).as_deref(), Some("Haul"));
    assert!(!creature.assign_task(haul, &ctx(1), &mut world).unwrap());
    assert!(creature.ledger.queued().is_empty());
    assert_eq!(world.assigned_count("Haul"), 1);
}

#[test]
fn removing_a_queued_task_unassigns_it_once() {
    let mut world = Camp::default();
    let mut creature = busy(1);
    let haul = Chore::new("Haul", TaskPriority::Medium, Outcome::Forever).handle();

    creature.assign_task(haul.clone(), &ctx(0), &mut world).unwrap();
    creature.remove_task(&haul, &ctx(0), &mut world).unwrap();
    creature.remove_task(&haul, &ctx(0), &mut world).unwrap();

    assert!(creature.ledger.queued().is_empty());
    assert_eq!(world.unassigned_count("Haul"), 1);
    assert!(!haul.is_assigned_to(1));
}

#[test]
fn feasible_count_respects_priority_floor() {
    let mut world = Camp::default();
    let mut creature = busy(1);
    for chore in [
        Chore::new("Mid", TaskPriority::Medium, Outcome::Forever),
        Chore::new("Stuck", TaskPriority::High, Outcome::Forever).infeasible(),
        Chore::new("Small", TaskPriority::Low, Outcome::Forever),
    ] {
        creature.assign_task(chore.handle(), &ctx(0), &mut world).unwrap();
    }

    assert_eq!(creature.ledger.count_feasible_tasks(TaskPriority::Eventually, 1, &world), 2);
    assert_eq!(creature.ledger.count_feasible_tasks(TaskPriority::Medium, 1, &world), 1);
    assert_eq!(creature.ledger.count_feasible_tasks(TaskPriority::Urgent, 1, &world), 0);
}

#[test]
fn creatures_claim_pool_work_in_stable_id_order() {
    let mut world = Camp::default();
    let mut pool: TaskManager<Camp> = TaskManager::new();
    pool.add_task(Chore::new("Low job", TaskPriority::Low, Outcome::Forever).handle());
    pool.add_task(Chore::new("High job", TaskPriority::High, Outcome::Forever).handle());
    pool.add_task(Chore::new("Mid job", TaskPriority::Medium, Outcome::Forever).handle());

    let mut creatures = vec![busy(3), busy(1), busy(2)];
    tick_creatures(&ctx(0), &mut world, &mut pool, &mut creatures);

    let claimed: Vec<_> = creatures
        .iter()
        .map(|c| (c.agent, current_name(c).unwrap_or_default()))
        .collect();
    assert_eq!(
        claimed,
        vec![
            (1, "High job".to_string()),
            (2, "Mid job".to_string()),
            (3, "Low job".to_string()),
        ]
    );
}

#[test]
fn thinking_is_decimated_but_acts_still_tick() {
    let mut world = Camp::default();
    let mut pool: TaskManager<Camp> = TaskManager::new();
    let config = SchedulerConfig {
        think_every_ticks: 2,
        ..SchedulerConfig::default()
    };
    let mut creature = Creature::with_config(1, config).with_idle(NoIdle);
    creature
        .assign_task(
            Chore::new("Dig", TaskPriority::Medium, Outcome::Succeed(2)).handle(),
            &ctx(1),
            &mut world,
        )
        .unwrap();

    assert_eq!(creature.tick(&ctx(1), &mut world, &mut pool), None);
    assert!(creature.current_task().is_none());

    assert!(creature.tick(&ctx(2), &mut world, &mut pool).is_some());
    assert_eq!(current_name(&creature).as_deref(), Some("Dig"));

    // Odd tick: no decision step, but the act still advances and finishes.
    creature.tick(&ctx(3), &mut world, &mut pool);
    assert!(creature.current_task().is_none());
}
