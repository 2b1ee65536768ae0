//! Application state

use arena_core::{ArenaError, BattleSession, BattleStatus, Combatant, Game, UnitClass};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ChooseHero,
    ChooseEnemy,
    Fight,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::ChooseHero => "Choose your hero",
            Screen::ChooseEnemy => "Choose your opponent",
            Screen::Fight => "Fight",
        }
    }
}

/// Form field with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Class,
    Weapon,
    Armor,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Class, Field::Weapon, Field::Armor]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Class => "Class",
            Field::Weapon => "Weapon",
            Field::Armor => "Armor",
        }
    }

    fn next(self) -> Field {
        match self {
            Field::Name => Field::Class,
            Field::Class => Field::Weapon,
            Field::Weapon => Field::Armor,
            Field::Armor => Field::Name,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Name => Field::Armor,
            Field::Class => Field::Name,
            Field::Weapon => Field::Class,
            Field::Armor => Field::Weapon,
        }
    }
}

/// Hero selection form
#[derive(Debug, Clone, Default)]
pub struct HeroForm {
    pub name: String,
    pub class_index: usize,
    pub weapon_index: usize,
    pub armor_index: usize,
    pub focus: Option<Field>,
}

impl HeroForm {
    pub fn focused(&self) -> Field {
        self.focus.unwrap_or(Field::Name)
    }
}

pub struct App {
    pub game: Game,
    pub screen: Screen,
    pub form: HeroForm,
    pub class_names: Vec<String>,
    pub weapon_names: Vec<String>,
    pub armor_names: Vec<String>,
    /// Hero picked on the first screen, waiting for an opponent
    pub pending_player: Option<Combatant>,
    pub session: BattleSession,
    pub combat_log: Vec<String>,
    pub log_scroll: usize,
    pub error: Option<String>,
    pub should_quit: bool,
    /// Rolls the opponent pre-selection
    pub rng: ChaCha8Rng,
    seed: Option<u64>,
    battles_started: u64,
}

impl App {
    pub fn new(game: Game, seed: Option<u64>) -> Self {
        let class_names = game.list_class_names().map(str::to_string).collect();
        let weapon_names = game.list_weapon_names().map(str::to_string).collect();
        let armor_names = game.list_armor_names().map(str::to_string).collect();
        let session = Self::make_session(&game, seed, 0);
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        App {
            game,
            screen: Screen::ChooseHero,
            form: HeroForm::default(),
            class_names,
            weapon_names,
            armor_names,
            pending_player: None,
            session,
            combat_log: Vec::new(),
            log_scroll: 0,
            error: None,
            should_quit: false,
            rng,
            seed,
            battles_started: 0,
        }
    }

    fn make_session(game: &Game, seed: Option<u64>, battle: u64) -> BattleSession {
        match seed {
            Some(seed) => game.seeded_session(seed.wrapping_add(battle)),
            None => game.new_session(),
        }
    }

    pub fn status(&self) -> BattleStatus {
        self.session.battle_status()
    }

    /// Class currently selected in the form
    pub fn selected_class(&self) -> Option<UnitClass> {
        let name = self.class_names.get(self.form.class_index)?;
        self.game.classes().get(name).ok().map(|c| (*c).clone())
    }

    pub fn on_up(&mut self) {
        match self.screen {
            Screen::Fight => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => self.form.focus = Some(self.form.focused().prev()),
        }
    }

    pub fn on_down(&mut self) {
        match self.screen {
            Screen::Fight => {
                if self.log_scroll + 1 < self.combat_log.len() {
                    self.log_scroll += 1;
                }
            }
            _ => self.form.focus = Some(self.form.focused().next()),
        }
    }

    pub fn on_left(&mut self) {
        self.cycle_option(false);
    }

    pub fn on_right(&mut self) {
        self.cycle_option(true);
    }

    fn cycle_option(&mut self, forward: bool) {
        if self.screen == Screen::Fight {
            return;
        }
        let (index, len) = match self.form.focused() {
            Field::Name => return,
            Field::Class => (&mut self.form.class_index, self.class_names.len()),
            Field::Weapon => (&mut self.form.weapon_index, self.weapon_names.len()),
            Field::Armor => (&mut self.form.armor_index, self.armor_names.len()),
        };
        if len == 0 {
            return;
        }
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    pub fn on_char(&mut self, c: char) {
        if self.screen != Screen::Fight && self.form.focused() == Field::Name {
            self.form.name.push(c);
        }
    }

    pub fn on_backspace(&mut self) {
        if self.screen != Screen::Fight && self.form.focused() == Field::Name {
            self.form.name.pop();
        }
    }

    /// Confirm the current form
    pub fn on_enter(&mut self) {
        match self.screen {
            Screen::ChooseHero => {
                if let Some(player) = self.build_unit(true) {
                    self.pending_player = Some(player);
                    self.form = self.random_form();
                    self.screen = Screen::ChooseEnemy;
                }
            }
            Screen::ChooseEnemy => {
                if let Some(enemy) = self.build_unit(false) {
                    self.start_fight(enemy);
                }
            }
            Screen::Fight => {}
        }
    }

    /// Opponent form with a random class and kit
    fn random_form(&mut self) -> HeroForm {
        let mut pick = |len: usize| if len == 0 { 0 } else { self.rng.gen_range(0..len) };
        HeroForm {
            class_index: pick(self.class_names.len()),
            weapon_index: pick(self.weapon_names.len()),
            armor_index: pick(self.armor_names.len()),
            ..HeroForm::default()
        }
    }

    fn build_unit(&mut self, is_player: bool) -> Option<Combatant> {
        let name = self.form.name.trim();
        if name.is_empty() {
            self.error = Some("Enter a name first".to_string());
            return None;
        }
        let pick = |names: &[String], index: usize| names.get(index).cloned().unwrap_or_default();
        let class = pick(&self.class_names, self.form.class_index);
        let weapon = pick(&self.weapon_names, self.form.weapon_index);
        let armor = pick(&self.armor_names, self.form.armor_index);

        let result = if is_player {
            self.game.create_player(name, &class, &weapon, &armor)
        } else {
            self.game.create_enemy(name, &class, &weapon, &armor)
        };
        match result {
            Ok(unit) => {
                self.error = None;
                Some(unit)
            }
            Err(e) => {
                tracing::warn!("Could not create unit: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn start_fight(&mut self, enemy: Combatant) {
        let Some(player) = self.pending_player.take() else {
            self.screen = Screen::ChooseHero;
            return;
        };
        self.session = Self::make_session(&self.game, self.seed, self.battles_started);
        self.battles_started += 1;

        match self.session.start_battle(player, enemy) {
            Ok(()) => {
                self.combat_log.clear();
                self.log_scroll = 0;
                self.error = None;
                self.screen = Screen::Fight;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.screen = Screen::ChooseHero;
            }
        }
    }

    pub fn hit(&mut self) {
        self.act(BattleSession::player_hit);
    }

    pub fn use_skill(&mut self) {
        self.act(BattleSession::player_use_skill);
    }

    pub fn pass_turn(&mut self) {
        self.act(BattleSession::advance_turn);
    }

    /// Run a battle action and copy the session's new log entries under a round header
    ///
    /// Once the battle is over the log is final; further presses add nothing.
    fn act(&mut self, action: fn(&mut BattleSession) -> Result<String, ArenaError>) {
        if self.screen != Screen::Fight || self.session.outcome().is_some() {
            return;
        }
        let seen = self.session.log().len();
        match action(&mut self.session) {
            Ok(_) => {
                let new_lines = self.session.log().get(seen..).unwrap_or_default();
                self.combat_log.push(format!("━━━ Round {} ━━━", self.session.round()));
                self.combat_log
                    .extend(new_lines.iter().flat_map(|entry| entry.lines()).map(str::to_string));
                self.log_scroll = self.combat_log.len().saturating_sub(1);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Leave the arena and pick new fighters
    pub fn end_fight(&mut self) {
        self.session.reset();
        self.pending_player = None;
        self.form = HeroForm::default();
        self.combat_log.clear();
        self.log_scroll = 0;
        self.screen = Screen::ChooseHero;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
