//! Combatant - a unit instance taking part in a battle

use crate::classes::UnitClass;
use crate::config::ArenaConstants;
use crate::equipment::{Armor, Weapon};
use crate::error::ArenaError;
use crate::skill::{Skill, SkillOutcome};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who decides what a combatant does on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Acts only when told to
    Player,
    /// Picks its own action (occasional skill, otherwise basic attack)
    Autonomous,
}

/// Result of a basic attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Damage got through; `absorbed` is the part the armor took
    Hit { damage: f64, absorbed: f64 },
    /// Armor absorbed the whole hit; no stamina was spent on either side
    Blocked,
    /// Attacker could not pay the weapon's stamina cost; nothing changed
    InsufficientStamina,
}

/// What a combatant ended up doing on its turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    Attack(AttackOutcome),
    Skill(SkillOutcome),
}

/// Round to one decimal place, the precision used for damage and display
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A unit instance with mutable health and stamina
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub unit_class: Arc<UnitClass>,
    /// Current health; may drop below zero
    pub hp: f64,
    pub stamina: f64,
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
    /// Set on the first skill attempt and never cleared
    pub skill_used: bool,
    pub behavior: Behavior,
}

impl Combatant {
    /// Create a unit at full health and stamina, with nothing equipped
    pub fn new(name: impl Into<String>, unit_class: Arc<UnitClass>, behavior: Behavior) -> Self {
        Combatant {
            name: name.into(),
            hp: unit_class.max_health,
            stamina: unit_class.max_stamina,
            unit_class,
            weapon: None,
            armor: None,
            skill_used: false,
            behavior,
        }
    }

    pub fn player(name: impl Into<String>, unit_class: Arc<UnitClass>) -> Self {
        Self::new(name, unit_class, Behavior::Player)
    }

    /// Equip a weapon, returning whatever was equipped before
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    /// Equip armor, returning whatever was equipped before
    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.armor.replace(armor)
    }

    pub fn weapon_name(&self) -> Option<&str> {
        self.weapon.as_ref().map(|w| w.name.as_str())
    }

    pub fn armor_name(&self) -> Option<&str> {
        self.armor.as_ref().map(|a| a.name.as_str())
    }

    pub fn skill(&self) -> Skill {
        self.unit_class.skill
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_equipped(&self) -> bool {
        self.weapon.is_some() && self.armor.is_some()
    }

    /// Subtract `amount` from health if positive, returning the new health
    pub fn take_damage(&mut self, amount: f64) -> Option<f64> {
        if amount > 0.0 {
            self.hp -= amount;
            Some(self.hp)
        } else {
            None
        }
    }

    /// Restore stamina, never going past the class maximum
    pub fn regenerate(&mut self, amount: f64) {
        self.stamina = (self.stamina + amount).min(self.unit_class.max_stamina);
    }

    /// Strike `target` with the equipped weapon
    ///
    /// Damage is `roll * attack` minus the target's `defence * armor`:
    /// - mitigation covers the whole roll: blocked, no stamina spent
    /// - target can pay its armor cost: mitigated damage, target pays the cost
    /// - target is too tired: full damage
    ///
    /// The attacker pays the weapon's per-hit cost whenever damage gets through.
    pub fn basic_attack(
        &mut self,
        target: &mut Combatant,
        rng: &mut impl Rng,
    ) -> Result<AttackOutcome, ArenaError> {
        let weapon = self.weapon.as_ref().ok_or_else(|| {
            ArenaError::precondition(format!("{} has no weapon equipped", self.name))
        })?;
        let armor = target.armor.as_ref().ok_or_else(|| {
            ArenaError::precondition(format!("{} has no armor equipped", target.name))
        })?;

        if self.stamina <= weapon.stamina_per_hit {
            return Ok(AttackOutcome::InsufficientStamina);
        }

        let hit_cost = weapon.stamina_per_hit;
        let raw = weapon.roll_damage(rng) * self.unit_class.attack;
        let mitigation = armor.defence * target.unit_class.armor;
        let armor_cost = armor.stamina_per_turn;

        if mitigation >= raw {
            return Ok(AttackOutcome::Blocked);
        }

        let (damage, absorbed) = if target.stamina > armor_cost {
            target.stamina -= armor_cost;
            (round_tenth(raw - mitigation), mitigation)
        } else {
            (round_tenth(raw), 0.0)
        };

        self.stamina -= hit_cost;
        target.take_damage(damage);

        Ok(AttackOutcome::Hit { damage, absorbed })
    }

    /// Use the class skill, at most once per battle
    pub fn use_skill(&mut self, target: &mut Combatant) -> SkillOutcome {
        if self.skill_used {
            return SkillOutcome::AlreadyUsed;
        }
        self.skill_used = true;
        let skill = self.skill();
        skill.apply(self, target)
    }

    /// Whether an autonomous unit is in a position to consider its skill
    fn can_trigger_skill(&self) -> bool {
        !self.skill_used && self.stamina >= self.skill().stamina_cost()
    }

    /// Act on this unit's own initiative
    ///
    /// Autonomous units roll `[0, 100)` against the trigger chance before
    /// falling back to a basic attack; players always attack.
    pub fn take_turn(
        &mut self,
        target: &mut Combatant,
        constants: &ArenaConstants,
        rng: &mut impl Rng,
    ) -> Result<ActionOutcome, ArenaError> {
        if self.behavior == Behavior::Autonomous
            && self.can_trigger_skill()
            && rng.gen_range(0.0..100.0) < constants.skill_trigger_percent
        {
            return Ok(ActionOutcome::Skill(self.use_skill(target)));
        }
        self.basic_attack(target, rng).map(ActionOutcome::Attack)
    }

    /// Display snapshot with values rounded to one decimal
    pub fn status(&self) -> UnitStatus {
        UnitStatus {
            name: self.name.clone(),
            class_name: self.unit_class.name.clone(),
            image: self.unit_class.image.clone(),
            hp: round_tenth(self.hp),
            max_hp: self.unit_class.max_health,
            stamina: round_tenth(self.stamina),
            max_stamina: self.unit_class.max_stamina,
            weapon: self.weapon_name().map(str::to_string),
            armor: self.armor_name().map(str::to_string),
            skill: self.skill().name().to_string(),
            skill_used: self.skill_used,
        }
    }
}

/// Read-only view of a combatant for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub name: String,
    pub class_name: String,
    pub image: String,
    pub hp: f64,
    pub max_hp: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub skill: String,
    pub skill_used: bool,
}

impl UnitStatus {
    pub fn hp_percent(&self) -> f64 {
        if self.max_hp > 0.0 {
            (self.hp / self.max_hp * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn stamina_percent(&self) -> f64 {
        if self.max_stamina > 0.0 {
            (self.stamina / self.max_stamina * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::UnitClass;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_weapon(damage: f64, stamina_per_hit: f64) -> Weapon {
        Weapon {
            name: "палка".to_string(),
            min_damage: damage,
            max_damage: damage,
            stamina_per_hit,
        }
    }

    fn armor(defence: f64, stamina_per_turn: f64) -> Armor {
        Armor {
            name: "кожаная броня".to_string(),
            defence,
            stamina_per_turn,
        }
    }

    fn equipped(name: &str, class: UnitClass, weapon: Weapon, armor: Armor) -> Combatant {
        let mut unit = Combatant::player(name, Arc::new(class));
        unit.equip_weapon(weapon);
        unit.equip_armor(armor);
        unit
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_new_unit_starts_full() {
        let unit = Combatant::player("Герой", Arc::new(UnitClass::warrior()));
        assert!((unit.hp - 60.0).abs() < f64::EPSILON);
        assert!((unit.stamina - 30.0).abs() < f64::EPSILON);
        assert!(!unit.skill_used);
        assert!(!unit.is_equipped());
    }

    #[test]
    fn test_equip_round_trip_and_overwrite() {
        let mut unit = Combatant::player("Герой", Arc::new(UnitClass::warrior()));
        assert!(unit.equip_weapon(fixed_weapon(3.0, 1.0)).is_none());
        assert_eq!(unit.weapon_name(), Some("палка"));

        let mut axe = fixed_weapon(4.0, 1.7);
        axe.name = "топорик".to_string();
        let previous = unit.equip_weapon(axe);
        assert_eq!(previous.map(|w| w.name), Some("палка".to_string()));
        assert_eq!(unit.weapon_name(), Some("топорик"));
    }

    #[test]
    fn test_mitigated_hit() {
        // raw = 5.0 * 0.8 = 4.0, mitigation = 1.0 * 1.0 = 1.0
        let mut attacker = equipped("Герой", UnitClass::warrior(), fixed_weapon(5.0, 2.0), armor(1.0, 1.0));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.6));

        let outcome = attacker.basic_attack(&mut target, &mut rng()).unwrap();

        match outcome {
            AttackOutcome::Hit { damage, absorbed } => {
                assert!((damage - 3.0).abs() < 1e-9);
                assert!((absorbed - 1.0).abs() < 1e-9);
            }
            other => panic!("expected a hit, got {:?}", other),
        }
        assert!((target.hp - 47.0).abs() < 1e-9);
        assert!((target.stamina - 23.4).abs() < 1e-9);
        assert!((attacker.stamina - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_blocked_hit_spends_no_stamina() {
        // raw = 2.0 * 0.8 = 1.6, mitigation = 2.0 * 1.0 = 2.0
        let mut attacker = equipped("Герой", UnitClass::warrior(), fixed_weapon(2.0, 2.0), armor(1.0, 1.0));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(2.0, 1.6));

        let outcome = attacker.basic_attack(&mut target, &mut rng()).unwrap();

        assert_eq!(outcome, AttackOutcome::Blocked);
        assert!((attacker.stamina - 30.0).abs() < f64::EPSILON);
        assert!((target.stamina - 25.0).abs() < f64::EPSILON);
        assert!((target.hp - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tired_target_takes_full_damage() {
        let mut attacker = equipped("Герой", UnitClass::warrior(), fixed_weapon(5.0, 2.0), armor(1.0, 1.0));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.6));
        target.stamina = 1.6;

        let outcome = attacker.basic_attack(&mut target, &mut rng()).unwrap();

        assert_eq!(outcome, AttackOutcome::Hit { damage: 4.0, absorbed: 0.0 });
        assert!((target.hp - 46.0).abs() < 1e-9);
        assert!((target.stamina - 1.6).abs() < f64::EPSILON);
        assert!((attacker.stamina - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigation_uses_defender_armor_cost() {
        // Attacker armor cost 5.0 must not be charged to the defender
        let mut attacker = equipped("Герой", UnitClass::warrior(), fixed_weapon(5.0, 2.0), armor(1.0, 5.0));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 0.5));

        attacker.basic_attack(&mut target, &mut rng()).unwrap();
        assert!((target.stamina - 24.5).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_stamina_attack() {
        let mut attacker = equipped("Герой", UnitClass::warrior(), fixed_weapon(5.0, 2.0), armor(1.0, 1.0));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.6));
        attacker.stamina = 2.0;

        let outcome = attacker.basic_attack(&mut target, &mut rng()).unwrap();

        assert_eq!(outcome, AttackOutcome::InsufficientStamina);
        assert!((attacker.stamina - 2.0).abs() < f64::EPSILON);
        assert!((target.hp - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attack_without_equipment_is_precondition() {
        let mut attacker = Combatant::player("Герой", Arc::new(UnitClass::warrior()));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.6));
        assert!(matches!(
            attacker.basic_attack(&mut target, &mut rng()),
            Err(ArenaError::Precondition(_))
        ));
    }

    #[test]
    fn test_damage_is_rounded() {
        // raw = 3.33 * 1.5 = 4.995, mitigation = 0.1 * 1.2 = 0.12 -> 4.875 -> 4.9
        let mut attacker = equipped("Вор", UnitClass::thief(), fixed_weapon(3.33, 1.0), armor(0.1, 0.6));
        let mut target = equipped("Воин", UnitClass::warrior(), fixed_weapon(1.0, 1.0), armor(0.1, 0.6));

        let outcome = attacker.basic_attack(&mut target, &mut rng()).unwrap();
        assert_eq!(outcome, AttackOutcome::Hit { damage: 4.9, absorbed: 0.1 * 1.2 });
    }

    #[test]
    fn test_take_damage_ignores_non_positive() {
        let mut unit = Combatant::player("Герой", Arc::new(UnitClass::mage()));
        assert_eq!(unit.take_damage(0.0), None);
        assert_eq!(unit.take_damage(-3.0), None);
        assert_eq!(unit.take_damage(10.0), Some(20.0));
        // Health is not clamped at zero
        assert_eq!(unit.take_damage(25.0), Some(-5.0));
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_skill_only_once() {
        let mut user = Combatant::player("Вор", Arc::new(UnitClass::thief()));
        let mut target = Combatant::player("Маг", Arc::new(UnitClass::mage()));

        assert_eq!(user.use_skill(&mut target), SkillOutcome::Applied { damage: 15.0 });
        assert_eq!(user.use_skill(&mut target), SkillOutcome::AlreadyUsed);
        assert!((target.hp - 15.0).abs() < f64::EPSILON);
        assert!((user.stamina - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_skill_still_marks_used() {
        let mut user = Combatant::player("Маг", Arc::new(UnitClass::mage()));
        let mut target = Combatant::player("Воин", Arc::new(UnitClass::warrior()));
        user.stamina = 3.0;

        assert_eq!(user.use_skill(&mut target), SkillOutcome::InsufficientStamina);
        assert!(user.skill_used);

        user.stamina = 50.0;
        assert_eq!(user.use_skill(&mut target), SkillOutcome::AlreadyUsed);
        assert!((target.hp - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_regenerate_clamps_at_max() {
        let mut unit = Combatant::player("Герой", Arc::new(UnitClass::thief()));
        unit.regenerate(1.0);
        assert!((unit.stamina - 25.0).abs() < f64::EPSILON);

        unit.stamina = 24.5;
        unit.regenerate(1.0);
        assert!((unit.stamina - 25.0).abs() < f64::EPSILON);

        unit.stamina = 10.0;
        unit.regenerate(1.0);
        assert!((unit.stamina - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_autonomous_always_triggers_at_full_chance() {
        let constants = ArenaConstants {
            skill_trigger_percent: 100.0,
            ..Default::default()
        };
        let mut enemy = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));
        enemy.behavior = Behavior::Autonomous;
        let mut target = equipped("Герой", UnitClass::warrior(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));

        let first = enemy.take_turn(&mut target, &constants, &mut rng()).unwrap();
        assert_eq!(first, ActionOutcome::Skill(SkillOutcome::Applied { damage: 15.0 }));

        // Skill is spent, so the next turn is a basic attack
        let second = enemy.take_turn(&mut target, &constants, &mut rng()).unwrap();
        assert!(matches!(second, ActionOutcome::Attack(_)));
    }

    #[test]
    fn test_default_trigger_chance_is_strict_threshold() {
        use rand::rngs::mock::StepRng;

        let constants = ArenaConstants::default();
        let fresh = || {
            let mut enemy =
                equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));
            enemy.behavior = Behavior::Autonomous;
            let target =
                equipped("Герой", UnitClass::warrior(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));
            (enemy, target)
        };

        // Constant generators: the [0, 100) draw lands near 5 and near 15
        let mut low = StepRng::new(u64::MAX / 20, 0);
        let mut high = StepRng::new(u64::MAX / 20 * 3, 0);

        let (mut enemy, mut target) = fresh();
        let outcome = enemy.take_turn(&mut target, &constants, &mut low).unwrap();
        assert_eq!(outcome, ActionOutcome::Skill(SkillOutcome::Applied { damage: 15.0 }));

        let (mut enemy, mut target) = fresh();
        let outcome = enemy.take_turn(&mut target, &constants, &mut high).unwrap();
        assert!(matches!(outcome, ActionOutcome::Attack(_)));
        assert!(!enemy.skill_used);

        // A zero draw never beats a zero chance
        let never = ArenaConstants {
            skill_trigger_percent: 0.0,
            ..Default::default()
        };
        let (mut enemy, mut target) = fresh();
        let outcome = enemy.take_turn(&mut target, &never, &mut StepRng::new(0, 0)).unwrap();
        assert!(matches!(outcome, ActionOutcome::Attack(_)));
    }

    #[test]
    fn test_autonomous_skips_skill_without_stamina() {
        let constants = ArenaConstants {
            skill_trigger_percent: 100.0,
            ..Default::default()
        };
        let mut enemy = equipped("Враг", UnitClass::mage(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));
        enemy.behavior = Behavior::Autonomous;
        enemy.stamina = 14.0;
        let mut target = equipped("Герой", UnitClass::warrior(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));

        let outcome = enemy.take_turn(&mut target, &constants, &mut rng()).unwrap();
        assert!(matches!(outcome, ActionOutcome::Attack(_)));
        assert!(!enemy.skill_used);
    }

    #[test]
    fn test_player_never_triggers_skill() {
        let constants = ArenaConstants {
            skill_trigger_percent: 100.0,
            ..Default::default()
        };
        let mut player = equipped("Герой", UnitClass::warrior(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));
        let mut target = equipped("Враг", UnitClass::thief(), fixed_weapon(1.0, 1.0), armor(1.0, 1.0));

        let outcome = player.take_turn(&mut target, &constants, &mut rng()).unwrap();
        assert!(matches!(outcome, ActionOutcome::Attack(_)));
        assert!(!player.skill_used);
    }

    #[test]
    fn test_status_rounds_values() {
        let mut unit = Combatant::player("Герой", Arc::new(UnitClass::warrior()));
        unit.hp = 41.26;
        unit.stamina = 12.04;
        let status = unit.status();
        assert!((status.hp - 41.3).abs() < 1e-9);
        assert!((status.stamina - 12.0).abs() < 1e-9);
        assert_eq!(status.skill, "Свирепый пинок");
        assert!((status.hp_percent() - 41.3 / 60.0 * 100.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_regeneration_never_exceeds_max(start in 0.0f64..=25.0, amount in 0.0f64..10.0) {
            let mut unit = Combatant::player("Герой", Arc::new(UnitClass::thief()));
            unit.stamina = start;
            unit.regenerate(amount);
            prop_assert!(unit.stamina <= unit.unit_class.max_stamina);
            prop_assert!(unit.stamina >= start);
        }

        #[test]
        fn prop_hit_damage_bounded_by_roll(seed in any::<u64>(), defence in 0.0f64..5.0) {
            let weapon = Weapon {
                name: "топорик".to_string(),
                min_damage: 2.5,
                max_damage: 4.1,
                stamina_per_hit: 1.7,
            };
            let mut attacker = equipped("Вор", UnitClass::thief(), weapon, armor(1.0, 1.0));
            let mut target = equipped("Воин", UnitClass::warrior(), fixed_weapon(1.0, 1.0), armor(defence, 1.8));
            let mut rng = StdRng::seed_from_u64(seed);

            match attacker.basic_attack(&mut target, &mut rng).unwrap() {
                AttackOutcome::Hit { damage, .. } => {
                    prop_assert!(damage >= 0.0);
                    prop_assert!(damage <= round_tenth(4.1 * 1.5));
                    prop_assert!((target.hp - (60.0 - damage)).abs() < 1e-9);
                }
                AttackOutcome::Blocked => {
                    prop_assert!((attacker.stamina - 25.0).abs() < f64::EPSILON);
                    prop_assert!((target.stamina - 30.0).abs() < f64::EPSILON);
                }
                AttackOutcome::InsufficientStamina => prop_assert!(false, "full stamina attacker"),
            }
        }
    }
}
