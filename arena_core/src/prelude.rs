//! Prelude module for convenient imports
//!
//! ```rust
//! use arena_core::prelude::*;
//! ```

// Battle
pub use crate::arena::{BattleOutcome, BattlePhase, BattleSession, BattleStatus};
pub use crate::game::Game;

// Units
pub use crate::classes::{ClassRegistry, UnitClass};
pub use crate::skill::{Skill, SkillOutcome};
pub use crate::unit::{ActionOutcome, AttackOutcome, Behavior, Combatant, UnitStatus};

// Data
pub use crate::config::ArenaConstants;
pub use crate::equipment::{Armor, EquipmentCatalog, Weapon};
pub use crate::narration::Narrator;

// Errors
pub use crate::error::ArenaError;
