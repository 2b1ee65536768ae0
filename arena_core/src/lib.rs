//! arena_core - Turn-based two-unit battle engine
//!
//! This library provides:
//! - EquipmentCatalog: Weapons and armors loaded from a data file
//! - ClassRegistry: Unit archetypes and their skills
//! - Combatant: A unit instance with health, stamina and equipment
//! - BattleSession: Turn sequencing, regeneration and end detection
//! - Narrator: Localizable text for every battle event

pub mod arena;
pub mod classes;
pub mod config;
pub mod equipment;
pub mod error;
pub mod game;
pub mod narration;
pub mod prelude;
pub mod skill;
pub mod unit;

// Re-export core types for convenience
pub use arena::{BattleOutcome, BattlePhase, BattleSession, BattleStatus};
pub use classes::{ClassRegistry, UnitClass};
pub use config::{ArenaConstants, ConfigError};
pub use equipment::{Armor, EquipmentCatalog, Weapon};
pub use error::{ArenaError, EntryKind};
pub use game::Game;
pub use narration::{NarrationKey, Narrator};
pub use skill::{Skill, SkillOutcome};
pub use unit::{ActionOutcome, AttackOutcome, Behavior, Combatant, UnitStatus};
