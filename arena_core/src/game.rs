//! Game - the entry point front-ends use to build units and sessions

use crate::arena::BattleSession;
use crate::classes::ClassRegistry;
use crate::config::ArenaConstants;
use crate::equipment::EquipmentCatalog;
use crate::error::ArenaError;
use crate::narration::Narrator;
use crate::unit::{Behavior, Combatant};
use std::sync::Arc;

/// Shared, read-only game data plus the factories built on it
#[derive(Debug, Clone)]
pub struct Game {
    catalog: Arc<EquipmentCatalog>,
    classes: Arc<ClassRegistry>,
    narrator: Arc<Narrator>,
    constants: ArenaConstants,
}

impl Game {
    pub fn new(
        catalog: EquipmentCatalog,
        classes: ClassRegistry,
        narrator: Narrator,
        constants: ArenaConstants,
    ) -> Self {
        Game {
            catalog: Arc::new(catalog),
            classes: Arc::new(classes),
            narrator: Arc::new(narrator),
            constants,
        }
    }

    /// Game using only the data bundled with the crate
    pub fn builtin() -> Self {
        Self::new(
            EquipmentCatalog::builtin(),
            ClassRegistry::with_defaults(),
            Narrator::russian(),
            ArenaConstants::builtin(),
        )
    }

    /// Build a unit of `class_name` and equip it by item names
    pub fn create_combatant(
        &self,
        name: &str,
        class_name: &str,
        weapon_name: &str,
        armor_name: &str,
        behavior: Behavior,
    ) -> Result<Combatant, ArenaError> {
        let unit_class = self.classes.get(class_name)?;
        let mut unit = Combatant::new(name, unit_class, behavior);
        let weapon = self.equip_weapon(&mut unit, weapon_name)?;
        let armor = self.equip_armor(&mut unit, armor_name)?;
        tracing::debug!("{}; {}", weapon, armor);
        Ok(unit)
    }

    pub fn create_player(
        &self,
        name: &str,
        class_name: &str,
        weapon_name: &str,
        armor_name: &str,
    ) -> Result<Combatant, ArenaError> {
        self.create_combatant(name, class_name, weapon_name, armor_name, Behavior::Player)
    }

    pub fn create_enemy(
        &self,
        name: &str,
        class_name: &str,
        weapon_name: &str,
        armor_name: &str,
    ) -> Result<Combatant, ArenaError> {
        self.create_combatant(name, class_name, weapon_name, armor_name, Behavior::Autonomous)
    }

    /// Equip a catalog weapon, returning the confirmation narration
    pub fn equip_weapon(&self, unit: &mut Combatant, weapon_name: &str) -> Result<String, ArenaError> {
        let weapon = self.catalog.weapon(weapon_name)?.clone();
        unit.equip_weapon(weapon);
        Ok(self.narrator.equip_weapon(unit))
    }

    /// Equip a catalog armor, returning the confirmation narration
    pub fn equip_armor(&self, unit: &mut Combatant, armor_name: &str) -> Result<String, ArenaError> {
        let armor = self.catalog.armor(armor_name)?.clone();
        unit.equip_armor(armor);
        Ok(self.narrator.equip_armor(unit))
    }

    pub fn new_session(&self) -> BattleSession {
        BattleSession::new(self.constants.clone(), Arc::clone(&self.narrator))
    }

    pub fn seeded_session(&self, seed: u64) -> BattleSession {
        BattleSession::seeded(self.constants.clone(), Arc::clone(&self.narrator), seed)
    }

    pub fn list_class_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.classes.names()
    }

    pub fn list_weapon_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.catalog.weapon_names()
    }

    pub fn list_armor_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.catalog.armor_names()
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntryKind;

    #[test]
    fn test_lists_follow_catalog_order() {
        let game = Game::builtin();
        assert_eq!(game.list_class_names().collect::<Vec<_>>(), vec!["Вор", "Воин", "Маг"]);
        assert_eq!(game.list_weapon_names().count(), 3);
        assert_eq!(game.list_armor_names().next(), Some("футболка"));
    }

    #[test]
    fn test_create_player_is_equipped() {
        let game = Game::builtin();
        let hero = game.create_player("Артур", "Воин", "топорик", "панцирь").unwrap();

        assert_eq!(hero.behavior, Behavior::Player);
        assert_eq!(hero.weapon_name(), Some("топорик"));
        assert_eq!(hero.armor_name(), Some("панцирь"));
        assert!((hero.hp - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_create_enemy_is_autonomous() {
        let game = Game::builtin();
        let foe = game.create_enemy("Мордред", "Вор", "ножик", "футболка").unwrap();
        assert_eq!(foe.behavior, Behavior::Autonomous);
    }

    #[test]
    fn test_unknown_names_are_not_found() {
        let game = Game::builtin();
        assert!(matches!(
            game.create_player("Артур", "Паладин", "топорик", "панцирь"),
            Err(ArenaError::NotFound { kind: EntryKind::UnitClass, .. })
        ));
        assert!(matches!(
            game.create_player("Артур", "Воин", "лук", "панцирь"),
            Err(ArenaError::NotFound { kind: EntryKind::Weapon, .. })
        ));
        assert!(matches!(
            game.create_player("Артур", "Воин", "топорик", "мантия"),
            Err(ArenaError::NotFound { kind: EntryKind::Armor, .. })
        ));
    }

    #[test]
    fn test_equip_returns_narration() {
        let game = Game::builtin();
        let mut hero = game.create_player("Артур", "Маг", "ножик", "футболка").unwrap();

        let text = game.equip_weapon(&mut hero, "палка").unwrap();
        assert_eq!(text, "Артур экипирован оружием палка");
        assert_eq!(hero.weapon_name(), Some("палка"));

        let text = game.equip_armor(&mut hero, "кожаная броня").unwrap();
        assert_eq!(text, "Артур экипирован броней кожаная броня");
    }

    #[test]
    fn test_session_runs_with_created_units() {
        let game = Game::builtin();
        let hero = game.create_player("Артур", "Воин", "палка", "панцирь").unwrap();
        let foe = game.create_enemy("Мордред", "Вор", "ножик", "футболка").unwrap();

        let mut session = game.seeded_session(1);
        session.start_battle(hero, foe).unwrap();
        assert!(!session.player_hit().unwrap().is_empty());
    }
}
