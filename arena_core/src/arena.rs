//! Battle session - turn sequencing, stamina regeneration and end detection

use crate::config::ArenaConstants;
use crate::error::ArenaError;
use crate::narration::Narrator;
use crate::unit::{Combatant, UnitStatus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a finished battle ended, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Draw,
    PlayerWins,
    PlayerLoses,
}

impl BattleOutcome {
    /// Decide the outcome from both health values, or `None` while both live
    pub fn from_health(player_hp: f64, enemy_hp: f64) -> Option<BattleOutcome> {
        match (player_hp > 0.0, enemy_hp > 0.0) {
            (true, true) => None,
            (false, false) => Some(BattleOutcome::Draw),
            (true, false) => Some(BattleOutcome::PlayerWins),
            (false, true) => Some(BattleOutcome::PlayerLoses),
        }
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    NotStarted,
    Running,
    Ended(BattleOutcome),
}

/// Snapshot of a session for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleStatus {
    pub phase: BattlePhase,
    /// Terminal narration once the battle has ended
    pub result: Option<String>,
    pub round: u32,
    pub player: Option<UnitStatus>,
    pub enemy: Option<UnitStatus>,
}

/// One battle between a player-driven unit and an autonomous opponent
///
/// Every player action is followed by a round: both units regenerate stamina,
/// then the opponent acts. End conditions are checked before any action.
pub struct BattleSession<R: Rng = ChaCha8Rng> {
    constants: ArenaConstants,
    narrator: Arc<Narrator>,
    rng: R,
    player: Option<Combatant>,
    enemy: Option<Combatant>,
    phase: BattlePhase,
    battle_result: String,
    round: u32,
    log: Vec<String>,
}

impl BattleSession<ChaCha8Rng> {
    /// Session with an entropy-seeded random source
    pub fn new(constants: ArenaConstants, narrator: Arc<Narrator>) -> Self {
        Self::with_rng(constants, narrator, ChaCha8Rng::from_entropy())
    }

    /// Session with a reproducible random source
    pub fn seeded(constants: ArenaConstants, narrator: Arc<Narrator>, seed: u64) -> Self {
        Self::with_rng(constants, narrator, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BattleSession<R> {
    pub fn with_rng(constants: ArenaConstants, narrator: Arc<Narrator>, rng: R) -> Self {
        BattleSession {
            constants,
            narrator,
            rng,
            player: None,
            enemy: None,
            phase: BattlePhase::NotStarted,
            battle_result: String::new(),
            round: 0,
            log: Vec::new(),
        }
    }

    /// Put two fully equipped units into the arena
    ///
    /// Starting again replaces whatever battle was in progress.
    pub fn start_battle(&mut self, player: Combatant, enemy: Combatant) -> Result<(), ArenaError> {
        for unit in [&player, &enemy] {
            if !unit.is_equipped() {
                return Err(ArenaError::precondition(format!(
                    "{} must have a weapon and armor equipped",
                    unit.name
                )));
            }
        }

        if self.phase == BattlePhase::Running {
            tracing::warn!("Starting a new battle while another one is still running");
        }
        tracing::info!(
            "Battle started: {} ({}) vs {} ({})",
            player.name,
            player.unit_class.name,
            enemy.name,
            enemy.unit_class.name
        );

        self.player = Some(player);
        self.enemy = Some(enemy);
        self.phase = BattlePhase::Running;
        self.battle_result.clear();
        self.round = 0;
        self.log.clear();
        Ok(())
    }

    /// Player strikes with the equipped weapon, then the round resolves
    pub fn player_hit(&mut self) -> Result<String, ArenaError> {
        self.player_action(|player, enemy, rng, narrator| {
            let outcome = player.basic_attack(enemy, rng)?;
            Ok(narrator.attack(player, enemy, &outcome))
        })
    }

    /// Player uses the class skill, then the round resolves
    pub fn player_use_skill(&mut self) -> Result<String, ArenaError> {
        self.player_action(|player, enemy, _rng, narrator| {
            let outcome = player.use_skill(enemy);
            Ok(narrator.skill(player, enemy, &outcome))
        })
    }

    /// Player passes; stamina regenerates and the opponent acts
    pub fn advance_turn(&mut self) -> Result<String, ArenaError> {
        self.ensure_started()?;
        if let Some(result) = self.check_end() {
            return Ok(result);
        }
        self.resolve_round()
    }

    /// Forget the current battle; the next action needs `start_battle` again
    pub fn reset(&mut self) {
        tracing::debug!("Battle session reset");
        self.player = None;
        self.enemy = None;
        self.phase = BattlePhase::NotStarted;
        self.battle_result.clear();
        self.round = 0;
        self.log.clear();
    }

    pub fn battle_status(&self) -> BattleStatus {
        BattleStatus {
            phase: self.phase,
            result: self.result().map(str::to_string),
            round: self.round,
            player: self.player.as_ref().map(Combatant::status),
            enemy: self.enemy.as_ref().map(Combatant::status),
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == BattlePhase::Running
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Terminal narration, once the battle has ended
    pub fn result(&self) -> Option<&str> {
        self.outcome().map(|_| self.battle_result.as_str())
    }

    pub fn enemy(&self) -> Option<&Combatant> {
        self.enemy.as_ref()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Every narration line produced since the battle started
    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn ensure_started(&self) -> Result<(), ArenaError> {
        if self.phase == BattlePhase::NotStarted {
            return Err(ArenaError::precondition("battle has not been started"));
        }
        Ok(())
    }

    /// End the battle if either side is down; returns the terminal narration
    fn check_end(&mut self) -> Option<String> {
        if let BattlePhase::Ended(_) = self.phase {
            return Some(self.battle_result.clone());
        }

        let (player, enemy) = (self.player.as_ref()?, self.enemy.as_ref()?);
        let outcome = BattleOutcome::from_health(player.hp, enemy.hp)?;

        self.phase = BattlePhase::Ended(outcome);
        self.battle_result = self.narrator.battle_outcome(outcome);
        self.log.push(self.battle_result.clone());
        tracing::info!("Battle ended after {} rounds: {:?}", self.round, outcome);
        Some(self.battle_result.clone())
    }

    fn player_action<F>(&mut self, act: F) -> Result<String, ArenaError>
    where
        F: FnOnce(&mut Combatant, &mut Combatant, &mut R, &Narrator) -> Result<String, ArenaError>,
    {
        self.ensure_started()?;
        if let Some(result) = self.check_end() {
            return Ok(result);
        }

        let (Some(player), Some(enemy)) = (self.player.as_mut(), self.enemy.as_mut()) else {
            return Err(ArenaError::precondition("battle has no combatants"));
        };
        let text = act(player, enemy, &mut self.rng, self.narrator.as_ref())?;
        tracing::debug!("Player action: {}", text);
        self.log.push(text.clone());

        let next = self.advance_turn()?;
        Ok(format!("{}\n{}", text, next))
    }

    /// Regenerate both units, then let the opponent act
    fn resolve_round(&mut self) -> Result<String, ArenaError> {
        let (Some(player), Some(enemy)) = (self.player.as_mut(), self.enemy.as_mut()) else {
            return Err(ArenaError::precondition("battle has no combatants"));
        };

        self.round += 1;
        player.regenerate(self.constants.stamina_per_round);
        enemy.regenerate(self.constants.stamina_per_round);
        tracing::debug!(
            player_stamina = player.stamina,
            enemy_stamina = enemy.stamina,
            "Stamina regenerated"
        );

        let outcome = enemy.take_turn(player, &self.constants, &mut self.rng)?;
        let text = self.narrator.action(enemy, player, &outcome);
        tracing::debug!(
            round = self.round,
            player_hp = player.hp,
            enemy_hp = enemy.hp,
            "Enemy action: {}",
            text
        );
        self.log.push(text.clone());
        Ok(text)
    }
}
