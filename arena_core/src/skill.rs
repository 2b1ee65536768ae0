//! Skills - once-per-battle special attacks that bypass armor

use crate::unit::Combatant;
use serde::{Deserialize, Serialize};

/// The skill attached to a unit class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    FuryPunch,
    HardShot,
    FireballShot,
}

/// Result of trying to use a skill
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillOutcome {
    /// The skill landed for the given damage
    Applied { damage: f64 },
    /// The user could not pay the stamina cost; nothing changed
    InsufficientStamina,
    /// The skill was already used this battle; nothing changed
    AlreadyUsed,
}

impl Skill {
    pub fn name(&self) -> &'static str {
        match self {
            Skill::FuryPunch => "Свирепый пинок",
            Skill::HardShot => "Мощный укол",
            Skill::FireballShot => "Метеоритный удар",
        }
    }

    pub fn stamina_cost(&self) -> f64 {
        match self {
            Skill::FuryPunch => 6.0,
            Skill::HardShot => 5.0,
            Skill::FireballShot => 15.0,
        }
    }

    pub fn damage(&self) -> f64 {
        match self {
            Skill::FuryPunch => 12.0,
            Skill::HardShot => 15.0,
            Skill::FireballShot => 30.0,
        }
    }

    /// Apply the skill from `user` to `target`
    ///
    /// Does not track once-per-battle usage; [`Combatant::use_skill`] does.
    pub fn apply(&self, user: &mut Combatant, target: &mut Combatant) -> SkillOutcome {
        if user.stamina < self.stamina_cost() {
            return SkillOutcome::InsufficientStamina;
        }

        user.stamina -= self.stamina_cost();
        target.hp -= self.damage();
        SkillOutcome::Applied {
            damage: self.damage(),
        }
    }
}
