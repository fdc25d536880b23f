//! Practice world for the REPL
//!
//! One hero and any number of training dummies. Damage is a flat
//! `potency / 10`; there is no battle system behind it.

use hashbrown::HashMap;
use solace_core::{
    Actor, Attack, AttackOutcome, AttackResolver, Combatant, CommandRegistry, EntityId, PlayState,
    ResourceKind,
};

pub const HERO_ID: EntityId = 1;

#[derive(Debug, Clone)]
pub struct Hero {
    pub state: PlayState,
    hp: i32,
    max_hp: i32,
    /// Mana and stamina; health lives in `hp`/`max_hp`
    pools: HashMap<ResourceKind, (i32, i32)>,
    levels: HashMap<String, u32>,
    passives: Vec<String>,
}

impl Hero {
    pub fn new() -> Self {
        let pools = [ResourceKind::Mp, ResourceKind::Sp]
            .into_iter()
            .map(|kind| (kind, (100, 100)))
            .collect();
        Self {
            state: PlayState::Standing,
            hp: 100,
            max_hp: 100,
            pools,
            levels: HashMap::new(),
            passives: Vec::new(),
        }
    }

    /// Learn every registered ability the hero doesn't know yet at level 1
    pub fn learn_all(&mut self, registry: &CommandRegistry) {
        for ability in registry.abilities() {
            self.levels.entry(ability.id().to_string()).or_insert(1);
        }
    }

    pub fn learn(&mut self, ability_id: &str, level: u32) {
        if level == 0 {
            self.levels.remove(ability_id);
        } else {
            self.levels.insert(ability_id.to_string(), level);
        }
    }

    pub fn add_passive(&mut self, name: &str) {
        if !self.has_passive(name) {
            self.passives.push(name.to_string());
        }
    }

    /// Resources come back one point per tick
    pub fn regenerate(&mut self, ticks: u64) {
        let amount = i32::try_from(ticks).unwrap_or(i32::MAX);
        for (current, max) in self.pools.values_mut() {
            *current = current.saturating_add(amount).min(*max);
        }
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Combatant for Hero {
    fn id(&self) -> EntityId {
        HERO_ID
    }

    fn name(&self) -> &str {
        "You"
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
            _ => self.pools.get(&kind).map_or(0, |&(current, _)| current),
        }
    }

    fn max_resource(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Hp => self.max_hp,
            _ => self.pools.get(&kind).map_or(0, |&(_, max)| max),
        }
    }

    fn set_resource(&mut self, kind: ResourceKind, value: i32) {
        match kind {
            ResourceKind::Hp => self.hp = value,
            _ => self.pools.entry(kind).or_insert((0, 0)).0 = value,
        }
    }

    fn cooldown_level(&self, ability_id: &str) -> Option<u32> {
        self.levels.get(ability_id).copied()
    }

    fn has_passive(&self, name: &str) -> bool {
        self.passives.iter().any(|p| p == name)
    }
}

/// A training dummy
#[derive(Debug, Clone)]
pub struct Dummy {
    id: EntityId,
    name: String,
    hp: i32,
    max_hp: i32,
}

impl Combatant for Dummy {
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
        let dealt = damage.min(self.hp.max(0));
        self.hp -= dealt;
        dealt
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub hero: Hero,
    targets: Vec<Dummy>,
    next_id: EntityId,
}

impl World {
    pub fn new(hero: Hero) -> Self {
        Self {
            hero,
            targets: Vec::new(),
            next_id: HERO_ID + 1,
        }
    }

    pub fn spawn(&mut self, name: &str, hp: i32, max_hp: i32) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Dummy {
            id,
            name: name.to_string(),
            hp,
            max_hp,
        });
        id
    }

    pub fn targets(&self) -> &[Dummy] {
        &self.targets
    }

    /// Index of the first target whose name starts with `name` (case-insensitive)
    pub fn find_target(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.targets
            .iter()
            .position(|t| t.name.to_lowercase() == name)
            .or_else(|| {
                self.targets
                    .iter()
                    .position(|t| t.name.to_lowercase().starts_with(&name))
            })
    }

    pub fn target(&self, index: usize) -> Option<&Dummy> {
        self.targets.get(index)
    }

    /// Borrow the hero and a target at the same time
    pub fn hero_and_target(&mut self, index: Option<usize>) -> (&mut Hero, Option<&mut Dummy>) {
        let target = match index {
            Some(i) => self.targets.get_mut(i),
            None => None,
        };
        (&mut self.hero, target)
    }
}

/// Lands on anything still alive for a tenth of the attack's potency
#[derive(Debug, Default)]
pub struct PotencyResolver;

impl AttackResolver for PotencyResolver {
    fn resolve_attack(
        &mut self,
        attack: &Attack,
        _actor: &dyn Actor,
        target: &mut dyn Combatant,
    ) -> AttackOutcome {
        if target.is_dead() {
            return AttackOutcome::missed();
        }
        let damage = i32::try_from(attack.potency / 10).unwrap_or(i32::MAX);
        AttackOutcome::landed(target.apply_damage(damage))
    }
}

/// Turn `{r}`-style colour tags into ANSI escapes. Unknown tags are dropped.
pub fn render_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '{' {
            out.push(c);
            continue;
        }
        let mut lookahead = chars.clone();
        match (lookahead.next(), lookahead.next()) {
            (Some(code), Some('}')) => {
                out.push_str(ansi(code));
                chars = lookahead;
            }
            _ => out.push(c),
        }
    }
    out
}

fn ansi(code: char) -> &'static str {
    match code {
        'r' => "\x1b[31m",
        'R' => "\x1b[1;31m",
        'g' => "\x1b[32m",
        'G' => "\x1b[1;32m",
        'y' => "\x1b[33m",
        'Y' => "\x1b[1;33m",
        'm' => "\x1b[35m",
        'M' => "\x1b[1;35m",
        'x' => "\x1b[0m",
        _ => "",
    }
}
