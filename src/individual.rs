use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::rng::RandomSource;

pub const NAME_POOL: [&str; 11] = [
    "Arin", "Mira", "Kotan", "Zila", "Tharn", "Elya", "Droven", "Saren", "Lio", "Yura", "Chall",
];

pub const DEFAULT_INFLUENCE_CHANCE: f64 = 0.4;
pub const GENERIC_ACTION: &str = "Took action";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Archetype {
    Inventor,
    Warrior,
    Prophet,
    Explorer,
    Reformer,
    Builder,
    Healer,
    Philosopher,
    Trader,
    Diplomat,
    Tyrant,
    Peacemaker,
    Artist,
    Heretic,
    Nomad,
    General,
    Sage,
    Visionary,
    Witch,
    Strategist,
    Agronomist,
    Engineer,
    Matriarch,
    Outcast,
    MerchantPrince,
    Lawmaker,
    Seer,
    Renegade,
    Storyteller,
    Beastmaster,
    ShadowPriest,
    Envoy,
}

impl Archetype {
    pub const ALL: [Archetype; 32] = [
        Archetype::Inventor,
        Archetype::Warrior,
        Archetype::Prophet,
        Archetype::Explorer,
        Archetype::Reformer,
        Archetype::Builder,
        Archetype::Healer,
        Archetype::Philosopher,
        Archetype::Trader,
        Archetype::Diplomat,
        Archetype::Tyrant,
        Archetype::Peacemaker,
        Archetype::Artist,
        Archetype::Heretic,
        Archetype::Nomad,
        Archetype::General,
        Archetype::Sage,
        Archetype::Visionary,
        Archetype::Witch,
        Archetype::Strategist,
        Archetype::Agronomist,
        Archetype::Engineer,
        Archetype::Matriarch,
        Archetype::Outcast,
        Archetype::MerchantPrince,
        Archetype::Lawmaker,
        Archetype::Seer,
        Archetype::Renegade,
        Archetype::Storyteller,
        Archetype::Beastmaster,
        Archetype::ShadowPriest,
        Archetype::Envoy,
    ];

    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.pick_index(Self::ALL.len())]
    }

    /// Scripted behaviour, if this archetype has one.
    pub fn behavior(self) -> Option<&'static Behavior> {
        match self {
            Archetype::Inventor => Some(&INVENTOR),
            Archetype::Warrior => Some(&WARRIOR),
            Archetype::Prophet => Some(&PROPHET),
            Archetype::Explorer => Some(&EXPLORER),
            Archetype::Healer => Some(&HEALER),
            _ => None,
        }
    }

    pub fn action_description(self) -> &'static str {
        self.behavior()
            .map(|behavior| behavior.description)
            .unwrap_or(GENERIC_ACTION)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Behavior {
    pub tech_boost: Option<f64>,
    pub health_boost: Option<f64>,
    pub aggression_boost: Option<f64>,
    pub migration_chance: Option<f64>,
    pub religion_founding: bool,
    pub war_likelihood: Option<f64>,
    pub influence_chance: Option<f64>,
    pub description: &'static str,
}

impl Behavior {
    pub fn influence_chance(&self) -> f64 {
        self.influence_chance.unwrap_or(DEFAULT_INFLUENCE_CHANCE)
    }
}

const INVENTOR: Behavior = Behavior {
    tech_boost: Some(0.15),
    health_boost: None,
    aggression_boost: None,
    migration_chance: None,
    religion_founding: false,
    war_likelihood: None,
    influence_chance: Some(0.5),
    description: "Tries to introduce a new tool or invention",
};

const WARRIOR: Behavior = Behavior {
    tech_boost: None,
    health_boost: None,
    aggression_boost: Some(0.2),
    migration_chance: None,
    religion_founding: false,
    war_likelihood: Some(0.25),
    influence_chance: Some(0.4),
    description: "Attempts to lead the population into battle",
};

const PROPHET: Behavior = Behavior {
    tech_boost: None,
    health_boost: None,
    aggression_boost: None,
    migration_chance: None,
    religion_founding: true,
    war_likelihood: None,
    influence_chance: Some(0.6),
    description: "Claims to receive visions and tries to start a religion",
};

const EXPLORER: Behavior = Behavior {
    tech_boost: None,
    health_boost: None,
    aggression_boost: None,
    migration_chance: Some(0.4),
    religion_founding: false,
    war_likelihood: None,
    influence_chance: Some(0.5),
    description: "Encourages exploration of new lands",
};

const HEALER: Behavior = Behavior {
    tech_boost: None,
    health_boost: Some(0.2),
    aggression_boost: None,
    migration_chance: None,
    religion_founding: false,
    war_likelihood: None,
    influence_chance: Some(0.6),
    description: "Improves well-being and medicine",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub year: u64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluentialIndividual {
    id: Uuid,
    name: String,
    archetype: Archetype,
    origin: String,
    actions: Vec<Action>,
}

impl InfluentialIndividual {
    pub fn new(name: impl Into<String>, archetype: Archetype, origin: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            archetype,
            origin: origin.into(),
            actions: Vec::new(),
        }
    }

    /// Draws a name from [`NAME_POOL`]; repeats are expected.
    pub fn spawn(archetype: Archetype, origin: &str, rng: &mut dyn RandomSource) -> Self {
        let name = NAME_POOL[rng.pick_index(NAME_POOL.len())];
        Self::new(name, archetype, origin)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// "Mira the Inventor"
    pub fn title(&self) -> String {
        format!("{} the {}", self.name, self.archetype)
    }

    pub fn perform(&mut self, year: u64, description: impl Into<String>) {
        self.actions.push(Action {
            year,
            description: description.into(),
        });
    }
}
