//! Resource costs paid before an ability executes

use solace_types::{CostMode, ResourceCostDefinition};

use crate::entity::{Actor, ResourceKind};

/// Passive that discounts magic point costs by ten percent
pub const METAMAGICAL: &str = "metamagical";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub mode: CostMode,
    pub amount: u32,
}

impl ResourceCost {
    /// Cost as a percentage of the actor's maximum pool
    pub fn percent(resource: ResourceKind, amount: u32) -> Self {
        Self {
            resource,
            mode: CostMode::Percent,
            amount,
        }
    }

    pub fn flat(resource: ResourceKind, amount: u32) -> Self {
        Self {
            resource,
            mode: CostMode::Flat,
            amount,
        }
    }

    /// Amount this cost takes from `actor`, before passive discounts
    pub fn cost_for(&self, actor: &dyn Actor) -> i32 {
        let amount = i32::try_from(self.amount).unwrap_or(i32::MAX);
        match self.mode {
            CostMode::Flat => amount,
            CostMode::Percent => {
                let max = i64::from(actor.max_resource(self.resource));
                i32::try_from(max * i64::from(amount) / 100).unwrap_or(i32::MAX)
            }
        }
    }

    pub fn can_withdraw(&self, actor: &dyn Actor) -> bool {
        actor.resource(self.resource) >= self.cost_for(actor)
    }

    /// Take the cost from the actor's pool. Does nothing if it cannot be paid.
    pub fn withdraw(&self, actor: &mut dyn Actor) {
        if !self.can_withdraw(&*actor) {
            return;
        }
        let mut cost = self.cost_for(&*actor);
        if self.resource == ResourceKind::Mp && actor.has_passive(METAMAGICAL) {
            cost = (0.9 * f64::from(cost)) as i32;
        }
        let remaining = actor.resource(self.resource) - cost;
        actor.set_resource(self.resource, remaining);
    }

    pub fn insufficient_message(&self) -> String {
        let color = match self.resource {
            ResourceKind::Hp => "{r}",
            ResourceKind::Mp => "{m}",
            ResourceKind::Sp => "{y}",
        };
        format!("Not enough {color}{}{{x}}.", self.resource.label())
    }
}

impl From<&ResourceCostDefinition> for ResourceCost {
    fn from(def: &ResourceCostDefinition) -> Self {
        Self {
            resource: def.resource,
            mode: def.mode,
            amount: def.amount,
        }
    }
}
