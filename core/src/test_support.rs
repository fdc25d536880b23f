//! Test fixtures shared by unit tests

use hashbrown::HashMap;

use crate::ability::{Attack, AttackOutcome, AttackResolver};
use crate::entity::{Actor, Combatant, EntityId, PlayState, ResourceKind};

#[derive(Debug, Clone)]
pub struct Mob {
    pub id: EntityId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
}

impl Mob {
    pub fn new(id: EntityId, name: &str, hp: i32, max_hp: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            hp,
            max_hp,
        }
    }
}

impl Combatant for Mob {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn current_health(&self) -> i32 {
        self.hp
    }

    fn max_health(&self) -> i32 {
        self.max_hp
    }

    fn apply_damage(&mut self, damage: i32) -> i32 {
        self.hp -= damage;
        damage
    }
}

#[derive(Debug, Clone)]
pub struct Hero {
    pub id: EntityId,
    pub state: PlayState,
    pub hp: i32,
    pub max_hp: i32,
    /// Mana and stamina pools; health is `hp`/`max_hp`
    pub resources: HashMap<ResourceKind, (i32, i32)>,
    pub levels: HashMap<String, u32>,
    pub passives: Vec<String>,
}

impl Hero {
    /// A standing hero with 100/100 in every pool who knows `abilities` at level 1
    pub fn knowing(abilities: &[&str]) -> Self {
        let mut resources = HashMap::new();
        resources.insert(ResourceKind::Mp, (100, 100));
        resources.insert(ResourceKind::Sp, (100, 100));
        Self {
            id: 1,
            state: PlayState::Standing,
            hp: 100,
            max_hp: 100,
            resources,
            levels: abilities.iter().map(|id| (id.to_string(), 1)).collect(),
            passives: Vec::new(),
        }
    }

    pub fn with_pool(mut self, kind: ResourceKind, current: i32, max: i32) -> Self {
        if kind == ResourceKind::Hp {
            self.hp = current;
            self.max_hp = max;
        } else {
            self.resources.insert(kind, (current, max));
        }
        self
    }
}

impl Combatant for Hero {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        "Hero"
    }

    fn current_health(&self) -> i32 {
        self.hp
    }

    fn max_health(&self) -> i32 {
        self.max_hp
    }

    fn apply_damage(&mut self, damage: i32) -> i32 {
        self.hp -= damage;
        damage
    }
}

impl Actor for Hero {
    fn play_state(&self) -> PlayState {
        self.state
    }

    fn resource(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Hp => self.hp,
            _ => self.resources.get(&kind).map_or(0, |(current, _)| *current),
        }
    }

    fn max_resource(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Hp => self.max_hp,
            _ => self.resources.get(&kind).map_or(0, |(_, max)| *max),
        }
    }

    fn set_resource(&mut self, kind: ResourceKind, value: i32) {
        match kind {
            ResourceKind::Hp => self.hp = value,
            _ => self.resources.entry(kind).or_insert((0, 0)).0 = value,
        }
    }

    fn cooldown_level(&self, ability_id: &str) -> Option<u32> {
        self.levels.get(ability_id).copied()
    }

    fn has_passive(&self, name: &str) -> bool {
        self.passives.iter().any(|p| p == name)
    }
}

/// Resolver that records every attack and answers with a fixed outcome
#[derive(Debug)]
pub struct RecordingResolver {
    pub outcome: AttackOutcome,
    pub attacks: Vec<(Attack, EntityId, EntityId)>,
}

impl RecordingResolver {
    pub fn answering(outcome: AttackOutcome) -> Self {
        Self {
            outcome,
            attacks: Vec::new(),
        }
    }

    pub fn landing() -> Self {
        Self::answering(AttackOutcome::landed(50))
    }
}

impl AttackResolver for RecordingResolver {
    fn resolve_attack(
        &mut self,
        attack: &Attack,
        actor: &dyn Actor,
        target: &mut dyn Combatant,
    ) -> AttackOutcome {
        self.attacks.push((attack.clone(), actor.id(), target.id()));
        self.outcome
    }
}
