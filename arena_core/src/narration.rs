//! Narration - user-facing text for every engine event
//!
//! Templates use `{placeholder}` substitution. The default set is Russian;
//! any key can be overridden from a TOML `[templates]` table.

use crate::arena::BattleOutcome;
use crate::config::{self, ConfigError};
use crate::skill::SkillOutcome;
use crate::unit::{ActionOutcome, AttackOutcome, Combatant};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Event types that produce narration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrationKey {
    EquipWeapon,
    EquipArmor,
    AttackBlocked,
    AttackHit,
    AttackInsufficientStamina,
    SkillUsed,
    SkillAlreadyUsed,
    SkillInsufficientStamina,
    BattleDraw,
    BattlePlayerWins,
    BattlePlayerLoses,
}

impl NarrationKey {
    pub fn all() -> &'static [NarrationKey] {
        &[
            NarrationKey::EquipWeapon,
            NarrationKey::EquipArmor,
            NarrationKey::AttackBlocked,
            NarrationKey::AttackHit,
            NarrationKey::AttackInsufficientStamina,
            NarrationKey::SkillUsed,
            NarrationKey::SkillAlreadyUsed,
            NarrationKey::SkillInsufficientStamina,
            NarrationKey::BattleDraw,
            NarrationKey::BattlePlayerWins,
            NarrationKey::BattlePlayerLoses,
        ]
    }

    /// Key as written in template files
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrationKey::EquipWeapon => "equip_weapon",
            NarrationKey::EquipArmor => "equip_armor",
            NarrationKey::AttackBlocked => "attack_blocked",
            NarrationKey::AttackHit => "attack_hit",
            NarrationKey::AttackInsufficientStamina => "attack_insufficient_stamina",
            NarrationKey::SkillUsed => "skill_used",
            NarrationKey::SkillAlreadyUsed => "skill_already_used",
            NarrationKey::SkillInsufficientStamina => "skill_insufficient_stamina",
            NarrationKey::BattleDraw => "battle_draw",
            NarrationKey::BattlePlayerWins => "battle_player_wins",
            NarrationKey::BattlePlayerLoses => "battle_player_loses",
        }
    }

    pub fn from_key(key: &str) -> Option<NarrationKey> {
        Self::all().iter().copied().find(|k| k.as_str() == key)
    }

    fn russian(&self) -> &'static str {
        match self {
            NarrationKey::EquipWeapon => "{unit} экипирован оружием {weapon}",
            NarrationKey::EquipArmor => "{unit} экипирован броней {armor}",
            NarrationKey::AttackBlocked => {
                "{unit} используя {weapon} наносит удар, но {target_armor} соперника его останавливает."
            }
            NarrationKey::AttackHit => {
                "{unit} используя {weapon} пробивает {target_armor} соперника и наносит {damage} урона."
            }
            NarrationKey::AttackInsufficientStamina => {
                "{unit} попытался использовать {weapon}, но у него не хватило выносливости."
            }
            NarrationKey::SkillUsed => "{unit} использует {skill} и наносит {damage} урона.",
            NarrationKey::SkillAlreadyUsed => "Навык использован",
            NarrationKey::SkillInsufficientStamina => {
                "{unit} попытался использовать {skill}, но у него не хватило выносливости."
            }
            NarrationKey::BattleDraw => "Ничья.",
            NarrationKey::BattlePlayerWins => "Игрок выиграл битву.",
            NarrationKey::BattlePlayerLoses => "Игрок проиграл битву.",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TemplatesFile {
    templates: HashMap<String, String>,
}

/// Renders engine outcomes with a template set
#[derive(Debug, Clone)]
pub struct Narrator {
    templates: HashMap<NarrationKey, String>,
}

impl Default for Narrator {
    fn default() -> Self {
        Self::russian()
    }
}

impl Narrator {
    pub fn russian() -> Self {
        let templates = NarrationKey::all()
            .iter()
            .map(|k| (*k, k.russian().to_string()))
            .collect();
        Narrator { templates }
    }

    pub fn english() -> Self {
        let toml = include_str!("../config/narration_en.toml");
        Self::from_toml_str(toml).unwrap_or_else(|e| {
            tracing::error!("Bundled English narration is invalid: {}", e);
            Self::russian()
        })
    }

    /// Parse overrides from TOML; keys not present keep the Russian default
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: TemplatesFile = config::parse_toml(content)?;
        let mut narrator = Self::russian();
        for (key, template) in file.templates {
            let key = NarrationKey::from_key(&key).ok_or_else(|| {
                ConfigError::ValidationError(format!("unknown narration key '{}'", key))
            })?;
            narrator.templates.insert(key, template);
        }
        Ok(narrator)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn template(&self, key: NarrationKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.russian())
    }

    /// Fill a template's placeholders
    ///
    /// The template is scanned once, so inserted values are copied verbatim
    /// even when they contain `{...}` themselves. Unknown placeholders are kept.
    pub fn render(&self, key: NarrationKey, values: &[(&str, &str)]) -> String {
        let template = self.template(key);
        let mut text = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };
            let name = &after[..close];
            match values.iter().find(|(placeholder, _)| *placeholder == name) {
                Some((_, value)) => text.push_str(value),
                None => text.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }
        text.push_str(rest);
        text
    }

    pub fn equip_weapon(&self, unit: &Combatant) -> String {
        self.render(
            NarrationKey::EquipWeapon,
            &[("unit", unit.name.as_str()), ("weapon", unit.weapon_name().unwrap_or("-"))],
        )
    }

    pub fn equip_armor(&self, unit: &Combatant) -> String {
        self.render(
            NarrationKey::EquipArmor,
            &[("unit", unit.name.as_str()), ("armor", unit.armor_name().unwrap_or("-"))],
        )
    }

    pub fn attack(&self, attacker: &Combatant, target: &Combatant, outcome: &AttackOutcome) -> String {
        let weapon = attacker.weapon_name().unwrap_or("-");
        let target_armor = target.armor_name().unwrap_or("-");
        let (key, damage, absorbed) = match outcome {
            AttackOutcome::Hit { damage, absorbed } => {
                (NarrationKey::AttackHit, format_amount(*damage), format_amount(*absorbed))
            }
            AttackOutcome::Blocked => {
                (NarrationKey::AttackBlocked, format_amount(0.0), format_amount(0.0))
            }
            AttackOutcome::InsufficientStamina => (
                NarrationKey::AttackInsufficientStamina,
                format_amount(0.0),
                format_amount(0.0),
            ),
        };
        self.render(
            key,
            &[
                ("unit", attacker.name.as_str()),
                ("target", target.name.as_str()),
                ("weapon", weapon),
                ("target_armor", target_armor),
                ("damage", damage.as_str()),
                ("absorbed", absorbed.as_str()),
            ],
        )
    }

    pub fn skill(&self, user: &Combatant, target: &Combatant, outcome: &SkillOutcome) -> String {
        let skill = user.skill().name();
        let (key, damage) = match outcome {
            SkillOutcome::Applied { damage } => (NarrationKey::SkillUsed, format_amount(*damage)),
            SkillOutcome::InsufficientStamina => {
                (NarrationKey::SkillInsufficientStamina, format_amount(0.0))
            }
            SkillOutcome::AlreadyUsed => (NarrationKey::SkillAlreadyUsed, format_amount(0.0)),
        };
        self.render(
            key,
            &[
                ("unit", user.name.as_str()),
                ("target", target.name.as_str()),
                ("skill", skill),
                ("damage", damage.as_str()),
            ],
        )
    }

    pub fn action(&self, actor: &Combatant, target: &Combatant, outcome: &ActionOutcome) -> String {
        match outcome {
            ActionOutcome::Attack(attack) => self.attack(actor, target, attack),
            ActionOutcome::Skill(skill) => self.skill(actor, target, skill),
        }
    }

    pub fn battle_outcome(&self, outcome: BattleOutcome) -> String {
        let key = match outcome {
            BattleOutcome::Draw => NarrationKey::BattleDraw,
            BattleOutcome::PlayerWins => NarrationKey::BattlePlayerWins,
            BattleOutcome::PlayerLoses => NarrationKey::BattlePlayerLoses,
        };
        self.template(key).to_string()
    }
}

/// Amounts are shown with one decimal
fn format_amount(value: f64) -> String {
    format!("{:.1}", value)
}
