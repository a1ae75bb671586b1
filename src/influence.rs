use std::fmt;

use crate::individual::{Behavior, InfluentialIndividual};
use crate::population::PopulationUnit;
use crate::rng::RandomSource;
use crate::world::{Position, World};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    TechIncreased(f64),
    HealthImproved,
    AggressionChanged,
    Migrated { from: Position, to: Position },
    BeliefFounded,
    ConflictSparked,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::TechIncreased(amount) => write!(f, "tech increased by {amount}"),
            Effect::HealthImproved => f.write_str("health improved"),
            Effect::AggressionChanged => f.write_str("aggressiveness changed"),
            Effect::Migrated { .. } => f.write_str("migration occurred"),
            Effect::BeliefFounded => f.write_str("founded a new belief system"),
            Effect::ConflictSparked => f.write_str("sparked conflict"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InfluenceOutcome {
    /// The archetype has no scripted behaviour; nothing is logged.
    NoBehavior,
    Failed,
    Succeeded(Vec<Effect>),
}

impl InfluenceOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, InfluenceOutcome::Succeeded(_))
    }
}

/// Looks up the individual's archetype and applies its behaviour to `population`.
pub fn attempt_influence(
    individual: &InfluentialIndividual,
    population: &mut PopulationUnit,
    world: &World,
    year: u64,
    rng: &mut dyn RandomSource,
) -> InfluenceOutcome {
    match individual.archetype().behavior() {
        Some(behavior) => apply_behavior(individual, behavior, population, world, year, rng),
        None => InfluenceOutcome::NoBehavior,
    }
}

/// One success draw, then each probabilistic effect draws independently.
/// Writes exactly one history entry.
pub fn apply_behavior(
    individual: &InfluentialIndividual,
    behavior: &Behavior,
    population: &mut PopulationUnit,
    world: &World,
    year: u64,
    rng: &mut dyn RandomSource,
) -> InfluenceOutcome {
    if !rng.chance(behavior.influence_chance()) {
        population.record(
            year,
            format!("{} attempted to enact change but failed.", individual.title()),
        );
        return InfluenceOutcome::Failed;
    }

    let mut effects = Vec::new();
    if let Some(amount) = behavior.tech_boost {
        population.raise_technology(amount);
        effects.push(Effect::TechIncreased(amount));
    }
    if let Some(amount) = behavior.health_boost {
        population.improve_health(amount);
        effects.push(Effect::HealthImproved);
    }
    if let Some(amount) = behavior.aggression_boost {
        population.raise_aggressiveness(amount);
        effects.push(Effect::AggressionChanged);
    }
    if let Some(chance) = behavior.migration_chance {
        if rng.chance(chance) {
            let from = population.position();
            let to = world.clamp(from.x as i64 + rng.step(), from.y as i64 + rng.step());
            population.relocate(to);
            effects.push(Effect::Migrated { from, to });
        }
    }
    if behavior.religion_founding {
        effects.push(Effect::BeliefFounded);
    }
    if let Some(likelihood) = behavior.war_likelihood {
        if rng.chance(likelihood) {
            effects.push(Effect::ConflictSparked);
        }
    }

    let applied = effects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    population.record(
        year,
        format!(
            "{} succeeded in their influence: {applied}.",
            individual.title()
        ),
    );
    InfluenceOutcome::Succeeded(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::Archetype;
    use crate::rng::ScriptedRandom;

    fn world() -> World {
        World::generate(10, 10, 0.7, &mut ScriptedRandom::constant(0.3))
    }

    fn tribe(position: Position) -> PopulationUnit {
        PopulationUnit::new("Stonewalkers", position, 150, 0.5)
    }

    #[test]
    fn inventor_success_raises_technology() {
        let world = world();
        let mut pop = tribe(Position::new(5, 5));
        let inventor = InfluentialIndividual::new("Arin", Archetype::Inventor, pop.name());
        let outcome =
            attempt_influence(&inventor, &mut pop, &world, 7, &mut ScriptedRandom::constant(0.1));
        assert_eq!(outcome, InfluenceOutcome::Succeeded(vec![Effect::TechIncreased(0.15)]));
        assert!((pop.technology() - 0.25).abs() < 1e-9);
        let last = pop.history().last().unwrap();
        assert_eq!(last.year, 7);
        assert_eq!(
            last.description,
            "Arin the Inventor succeeded in their influence: tech increased by 0.15."
        );
    }

    #[test]
    fn zero_influence_chance_never_changes_state() {
        let world = world();
        let behavior = Behavior {
            tech_boost: Some(1.0),
            health_boost: Some(1.0),
            aggression_boost: Some(1.0),
            migration_chance: Some(1.0),
            religion_founding: true,
            war_likelihood: Some(1.0),
            influence_chance: Some(0.0),
            description: "never works",
        };
        let individual = InfluentialIndividual::new("Zila", Archetype::Tyrant, "Stonewalkers");
        for draw in [0.0, 0.25, 0.5, 0.999] {
            let mut pop = tribe(Position::new(2, 2)).with_health(0.5);
            let outcome = apply_behavior(
                &individual,
                &behavior,
                &mut pop,
                &world,
                1,
                &mut ScriptedRandom::constant(draw),
            );
            assert_eq!(outcome, InfluenceOutcome::Failed);
            assert_eq!(pop.technology(), 0.1);
            assert_eq!(pop.health(), 0.5);
            assert_eq!(pop.aggressiveness(), 0.5);
            assert_eq!(pop.position(), Position::new(2, 2));
            assert_eq!(pop.history().len(), 1);
            assert_eq!(
                pop.history()[0].description,
                "Zila the Tyrant attempted to enact change but failed."
            );
        }
    }

    #[test]
    fn unscripted_archetype_is_a_no_op() {
        let world = world();
        let mut pop = tribe(Position::new(2, 2));
        let bard = InfluentialIndividual::new("Lio", Archetype::Storyteller, pop.name());
        let outcome =
            attempt_influence(&bard, &mut pop, &world, 1, &mut ScriptedRandom::constant(0.0));
        assert_eq!(outcome, InfluenceOutcome::NoBehavior);
        assert!(pop.history().is_empty());
    }

    #[test]
    fn explorer_migration_is_clamped_at_the_corner() {
        let world = world();
        let mut pop = tribe(Position::new(0, 0));
        let explorer = InfluentialIndividual::new("Saren", Archetype::Explorer, pop.name());
        // success, migration, x step (-1), y step (-1)
        let mut rng = ScriptedRandom::new(vec![0.1, 0.1, 0.2, 0.2]);
        let outcome = attempt_influence(&explorer, &mut pop, &world, 1, &mut rng);
        assert_eq!(
            outcome,
            InfluenceOutcome::Succeeded(vec![Effect::Migrated {
                from: Position::new(0, 0),
                to: Position::new(0, 0),
            }])
        );
        assert_eq!(pop.position(), Position::new(0, 0));
    }

    #[test]
    fn explorer_moves_diagonally() {
        let world = world();
        let mut pop = tribe(Position::new(4, 4));
        let explorer = InfluentialIndividual::new("Saren", Archetype::Explorer, pop.name());
        let mut rng = ScriptedRandom::new(vec![0.1, 0.1, 0.9, 0.2]);
        attempt_influence(&explorer, &mut pop, &world, 1, &mut rng);
        assert_eq!(pop.position(), Position::new(5, 3));
    }

    #[test]
    fn warrior_reports_every_applied_effect() {
        let world = world();
        let mut pop = tribe(Position::new(1, 1));
        let warrior = InfluentialIndividual::new("Tharn", Archetype::Warrior, pop.name());
        let outcome =
            attempt_influence(&warrior, &mut pop, &world, 3, &mut ScriptedRandom::constant(0.1));
        assert!(outcome.succeeded());
        assert!((pop.aggressiveness() - 0.7).abs() < 1e-9);
        assert_eq!(
            pop.history().last().unwrap().description,
            "Tharn the Warrior succeeded in their influence: aggressiveness changed, sparked conflict."
        );
    }

    #[test]
    fn prophet_founds_belief_without_state_change() {
        let world = world();
        let mut pop = tribe(Position::new(1, 1));
        let prophet = InfluentialIndividual::new("Yura", Archetype::Prophet, pop.name());
        let outcome =
            attempt_influence(&prophet, &mut pop, &world, 3, &mut ScriptedRandom::constant(0.2));
        assert_eq!(outcome, InfluenceOutcome::Succeeded(vec![Effect::BeliefFounded]));
        assert_eq!(pop.technology(), 0.1);
    }
}
