//! Tick based cooldown tracking

use hashbrown::HashMap;

use crate::entity::EntityId;

/// Game time, in ticks since the tracker was created
pub type Tick = u64;

/// Key for a running timed cooldown
///
/// A cooldown is unique per (actor, ability) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CooldownKey {
    pub actor: EntityId,
    pub ability_id: String,
}

impl CooldownKey {
    pub fn new(actor: EntityId, ability_id: &str) -> Self {
        Self {
            actor,
            ability_id: ability_id.to_string(),
        }
    }
}

/// A timed cooldown that finished during `advance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownReady {
    pub actor: EntityId,
    pub ability_id: String,
    pub at: Tick,
}

/// Tracks timed cooldowns, global cooldowns and combo actions per actor.
#[derive(Debug, Clone)]
pub struct CooldownTracker {
    now: Tick,
    gcd_ticks: Tick,
    ready_at: HashMap<CooldownKey, Tick>,
    gcd_until: HashMap<EntityId, Tick>,
    combo_action: HashMap<EntityId, String>,
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CooldownTracker {
    pub fn new(gcd_ticks: Tick) -> Self {
        Self {
            now: 0,
            gcd_ticks,
            ready_at: HashMap::new(),
            gcd_until: HashMap::new(),
            combo_action: HashMap::new(),
        }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn gcd_ticks(&self) -> Tick {
        self.gcd_ticks
    }

    // ─── Timed cooldowns ────────────────────────────────────────────────────

    /// Put `ability_id` on cooldown for `actor`, restarting any running one
    pub fn start(&mut self, actor: EntityId, ability_id: &str, ticks: Tick) {
        if ticks == 0 {
            return;
        }
        tracing::debug!(actor, ability = ability_id, ticks, "Cooldown started");
        self.ready_at
            .insert(CooldownKey::new(actor, ability_id), self.now + ticks);
    }

    pub fn is_on_cooldown(&self, actor: EntityId, ability_id: &str) -> bool {
        self.remaining(actor, ability_id).is_some()
    }

    /// Ticks left before the ability is ready, `None` when it is ready
    pub fn remaining(&self, actor: EntityId, ability_id: &str) -> Option<Tick> {
        self.ready_at
            .get(&CooldownKey::new(actor, ability_id))
            .filter(|&&at| at > self.now)
            .map(|at| at - self.now)
    }

    /// Running cooldowns of `actor` as (ability id, remaining ticks), sorted by id
    pub fn active_for(&self, actor: EntityId) -> Vec<(&str, Tick)> {
        let mut active: Vec<(&str, Tick)> = self
            .ready_at
            .iter()
            .filter(|&(key, &at)| key.actor == actor && at > self.now)
            .map(|(key, at)| (key.ability_id.as_str(), at - self.now))
            .collect();
        active.sort_by(|a, b| a.0.cmp(b.0));
        active
    }

    // ─── Global cooldown ────────────────────────────────────────────────────

    pub fn start_gcd(&mut self, actor: EntityId) {
        if self.gcd_ticks == 0 {
            return;
        }
        self.gcd_until.insert(actor, self.now + self.gcd_ticks);
    }

    pub fn is_on_gcd(&self, actor: EntityId) -> bool {
        self.gcd_until.get(&actor).is_some_and(|&until| until > self.now)
    }

    // ─── Combos ─────────────────────────────────────────────────────────────

    pub fn set_combo_action(&mut self, actor: EntityId, ability_id: &str) {
        self.combo_action.insert(actor, ability_id.to_string());
    }

    /// Last global-cooldown ability `actor` used successfully
    pub fn combo_action(&self, actor: EntityId) -> Option<&str> {
        self.combo_action.get(&actor).map(String::as_str)
    }

    // ─── Time ───────────────────────────────────────────────────────────────

    /// Move time forward and collect the cooldowns that became ready,
    /// ordered by expiry tick, then actor, then ability id.
    pub fn advance(&mut self, ticks: Tick) -> Vec<CooldownReady> {
        self.now += ticks;
        let now = self.now;

        let mut ready: Vec<CooldownReady> = self
            .ready_at
            .iter()
            .filter(|&(_, &at)| at <= now)
            .map(|(key, &at)| CooldownReady {
                actor: key.actor,
                ability_id: key.ability_id.clone(),
                at,
            })
            .collect();
        self.ready_at.retain(|_, at| *at > now);
        self.gcd_until.retain(|_, until| *until > now);

        ready.sort_by(|a, b| {
            (a.at, a.actor, &a.ability_id).cmp(&(b.at, b.actor, &b.ability_id))
        });
        ready
    }

    /// Forget all state for `actor` (e.g. when they leave the game)
    pub fn clear_actor(&mut self, actor: EntityId) {
        self.ready_at.retain(|key, _| key.actor != actor);
        self.gcd_until.remove(&actor);
        self.combo_action.remove(&actor);
    }
}
