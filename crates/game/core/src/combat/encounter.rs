//! Turn-based encounter state machine.
//!
//! ```text
//! NotStarted ──start──▶ PlayerTurn ──action──▶ EnemyTurn ──▶ PlayerTurn ...
//!                            │                    │
//!                            ├──▶ Won             └──▶ Lost
//!                            └──▶ Fled
//! ```
//!
//! The encounter owns no creatures. Each call borrows the player and the
//! room's monsters, so the same machine drives single and multi-enemy fights.
//! Failed actions return an error and leave every piece of state untouched.

use crate::actor::{Combatant, Monster, Player};
use crate::config::GameConfig;
use crate::event::{EnemyStatus, GameEvent};
use crate::rng::RollSource;

use super::error::CombatError;
use super::flee::attempt_flee;
use super::magic::magic_damage;
use super::result::{apply_attack, resolve_attack};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterState {
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Won,
    Lost,
    Fled,
}

impl EncounterState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Fled)
    }
}

/// One player decision. Targets index the living enemies, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Attack(Option<usize>),
    Magic(Option<usize>),
    UseItem(usize),
    Defend,
    Flee,
    Status,
}

impl PlayerAction {
    /// Whether a successful action ends the player's turn.
    pub fn consumes_turn(self) -> bool {
        !matches!(self, Self::Status)
    }
}

/// Outcome of one [`Encounter::act`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub events: Vec<GameEvent>,
    pub state: EncounterState,
    pub turn_consumed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    state: EncounterState,
    turn: u32,
    defending: bool,
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Encounter {
    pub fn new() -> Self {
        Self {
            state: EncounterState::NotStarted,
            turn: 0,
            defending: false,
        }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    /// Full player turns started so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// NotStarted → PlayerTurn.
    pub fn start(&mut self, enemies: &[Monster]) -> Result<GameEvent, CombatError> {
        if self.state != EncounterState::NotStarted {
            return Err(CombatError::NotPlayerTurn { state: self.state });
        }
        let names: Vec<String> = enemies
            .iter()
            .filter(|m| m.is_alive())
            .map(|m| m.name().to_owned())
            .collect();
        if names.is_empty() {
            return Err(CombatError::NoEnemies);
        }

        self.state = EncounterState::PlayerTurn;
        self.turn = 1;
        tracing::info!(enemies = ?names, "encounter started");
        Ok(GameEvent::EncounterStarted { enemies: names })
    }

    /// Performs one player action and, if it ended the turn, the enemy phase.
    pub fn act(
        &mut self,
        action: PlayerAction,
        player: &mut Player,
        enemies: &mut [Monster],
        config: &GameConfig,
        rolls: &mut (impl RollSource + ?Sized),
    ) -> Result<TurnReport, CombatError> {
        if self.state != EncounterState::PlayerTurn {
            return Err(CombatError::NotPlayerTurn { state: self.state });
        }

        let mut events = Vec::new();
        match action {
            PlayerAction::Attack(target) => {
                let index = select_target(enemies, target)?;
                let enemy = &mut enemies[index];
                let result = resolve_attack(&*player, &*enemy, &config.combat, rolls);
                apply_attack(enemy, &result);
                events.push(GameEvent::PlayerAttacked {
                    target: enemy.name().to_owned(),
                    result,
                    remaining: enemy.stats().health(),
                });
                if !enemy.is_alive() {
                    events.push(GameEvent::EnemyDefeated {
                        enemy: enemy.name().to_owned(),
                    });
                }
            }
            PlayerAction::Magic(target) => {
                let index = select_target(enemies, target)?;
                let cost = config.combat.magic_mana_cost;
                let available = player
                    .mana()
                    .map(|pool| pool.current())
                    .ok_or(CombatError::NoManaPool)?;
                let spent = player
                    .use_mana(cost, &config.progression)
                    .ok_or(CombatError::InsufficientMana {
                        required: cost,
                        available,
                    })?;

                let damage = magic_damage(player.stats().attack_power(), &config.combat);
                let enemy = &mut enemies[index];
                enemy.stats_mut().take_damage(damage);
                events.push(GameEvent::SpellCast {
                    target: enemy.name().to_owned(),
                    damage,
                    remaining: enemy.stats().health(),
                    mana_left: available - spent.amount,
                });
                if let (Some(increase), Some(pool)) = (spent.growth, player.mana()) {
                    events.push(GameEvent::ManaGrew {
                        increase,
                        max: pool.max(),
                    });
                }
                if !enemy.is_alive() {
                    events.push(GameEvent::EnemyDefeated {
                        enemy: enemy.name().to_owned(),
                    });
                }
            }
            PlayerAction::UseItem(slot) => {
                let used = player.use_item(slot)?;
                events.push(GameEvent::ItemUsed(used));
            }
            PlayerAction::Defend => {
                self.defending = true;
                events.push(GameEvent::Defending);
            }
            PlayerAction::Flee => {
                let strongest = enemies
                    .iter()
                    .filter(|m| m.is_alive())
                    .map(|m| m.stats().health())
                    .max()
                    .unwrap_or(0);
                if attempt_flee(player.stats().health(), strongest, &config.combat, rolls) {
                    self.state = EncounterState::Fled;
                    self.defending = false;
                    tracing::info!(turn = self.turn, "player fled");
                    events.push(GameEvent::FleeSucceeded);
                    return Ok(self.report(events, true));
                }
                events.push(GameEvent::FleeFailed);
            }
            PlayerAction::Status => {
                events.push(GameEvent::CombatStatus {
                    turn: self.turn,
                    player_health: player.stats().health(),
                    player_max_health: player.stats().max_health(),
                    mana: player.mana().map(|pool| (pool.current(), pool.max())),
                    enemies: living(enemies).map(EnemyStatus::of).collect(),
                });
                return Ok(self.report(events, false));
            }
        }

        if living(enemies).next().is_none() {
            self.state = EncounterState::Won;
            self.defending = false;
            tracing::info!(turn = self.turn, "encounter won");
            events.push(GameEvent::EncounterWon { turns: self.turn });
            return Ok(self.report(events, true));
        }

        self.enemy_phase(player, enemies, config, rolls, &mut events);
        Ok(self.report(events, true))
    }

    fn enemy_phase(
        &mut self,
        player: &mut Player,
        enemies: &[Monster],
        config: &GameConfig,
        rolls: &mut (impl RollSource + ?Sized),
        events: &mut Vec<GameEvent>,
    ) {
        self.state = EncounterState::EnemyTurn;

        for enemy in enemies.iter().filter(|m| m.is_alive()) {
            let mut result = resolve_attack(enemy, &*player, &config.combat, rolls);
            if self.defending && result.connected() {
                result = result.guarded(config.combat.defend_reduction);
                self.defending = false;
            }
            apply_attack(player, &result);
            events.push(GameEvent::EnemyAttacked {
                enemy: enemy.name().to_owned(),
                result,
                player_health: player.stats().health(),
            });

            if !player.is_alive() {
                self.state = EncounterState::Lost;
                self.defending = false;
                tracing::info!(turn = self.turn, killer = enemy.name(), "player defeated");
                events.push(GameEvent::PlayerDefeated {
                    by: enemy.name().to_owned(),
                });
                return;
            }
        }

        // A stance that met only dodges expires with the phase.
        self.defending = false;
        self.turn += 1;
        self.state = EncounterState::PlayerTurn;
    }

    fn report(&self, events: Vec<GameEvent>, turn_consumed: bool) -> TurnReport {
        TurnReport {
            events,
            state: self.state,
            turn_consumed,
        }
    }
}

fn living(enemies: &[Monster]) -> impl Iterator<Item = &Monster> {
    enemies.iter().filter(|m| m.is_alive())
}

/// Maps a living-enemy index to a slot in `enemies`.
fn select_target(enemies: &[Monster], target: Option<usize>) -> Result<usize, CombatError> {
    let alive: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_alive())
        .map(|(slot, _)| slot)
        .collect();

    match (target, alive.as_slice()) {
        (_, []) => Err(CombatError::NoEnemies),
        (None, [only]) => Ok(*only),
        (None, _) => Err(CombatError::TargetRequired { alive: alive.len() }),
        (Some(index), slots) => slots
            .get(index)
            .copied()
            .ok_or(CombatError::InvalidTarget {
                index,
                alive: slots.len(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::MonsterTier;
    use crate::config::CombatRules;
    use crate::inventory::Inventory;
    use crate::rng::ScriptedRolls;
    use crate::stats::{CreatureStats, Progression};

    fn config() -> GameConfig {
        GameConfig::default().with_combat(CombatRules {
            monster_damage_per_level: 0,
            ..CombatRules::deterministic()
        })
    }

    fn grunt(health: u32, attack: u32) -> Monster {
        Monster::new(
            "grunt",
            CreatureStats::new("Grunt", health, attack),
            MonsterTier::Weak,
            5,
        )
    }

    fn fighter() -> Player {
        let config = config();
        Player::new(
            CreatureStats::new("Hero", 120, 15),
            None,
            Progression::new(&config.progression),
            Inventory::new(config.inventory_size),
        )
    }

    fn started(enemies: &[Monster]) -> Encounter {
        let mut encounter = Encounter::new();
        encounter.start(enemies).unwrap();
        encounter
    }

    #[test]
    fn cannot_act_before_start() {
        let mut encounter = Encounter::new();
        let mut enemies = vec![grunt(30, 5)];
        let err = encounter
            .act(
                PlayerAction::Defend,
                &mut fighter(),
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap_err();
        assert!(matches!(err, CombatError::NotPlayerTurn { .. }));
    }

    #[test]
    fn start_requires_living_enemy() {
        let mut dead = grunt(1, 1);
        dead.stats_mut().take_damage(1);
        assert_eq!(
            Encounter::new().start(&[dead]),
            Err(CombatError::NoEnemies)
        );
    }

    #[test]
    fn status_does_not_consume_turn() {
        let mut enemies = vec![grunt(30, 5)];
        let mut encounter = started(&enemies);
        let mut player = fighter();

        let report = encounter
            .act(
                PlayerAction::Status,
                &mut player,
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap();
        assert!(!report.turn_consumed);
        assert_eq!(report.state, EncounterState::PlayerTurn);
        assert_eq!(encounter.turn(), 1);
        assert_eq!(player.stats().health(), 120);
    }

    #[test]
    fn defend_halves_next_hit() {
        let mut enemies = vec![grunt(300, 10)];
        let mut encounter = started(&enemies);
        let mut player = fighter();
        let mut rolls = ScriptedRolls::constant(0.5);

        encounter
            .act(PlayerAction::Defend, &mut player, &mut enemies, &config(), &mut rolls)
            .unwrap();
        assert_eq!(player.stats().health(), 115);
        assert!(!encounter.is_defending());

        encounter
            .act(PlayerAction::Attack(None), &mut player, &mut enemies, &config(), &mut rolls)
            .unwrap();
        assert_eq!(player.stats().health(), 105);
        assert_eq!(encounter.turn(), 3);
    }

    #[test]
    fn multiple_enemies_require_target() {
        let mut enemies = vec![grunt(30, 5), grunt(30, 5)];
        let mut encounter = started(&enemies);
        let mut player = fighter();
        let mut rolls = ScriptedRolls::constant(0.5);

        let err = encounter
            .act(PlayerAction::Attack(None), &mut player, &mut enemies, &config(), &mut rolls)
            .unwrap_err();
        assert_eq!(err, CombatError::TargetRequired { alive: 2 });

        let err = encounter
            .act(PlayerAction::Attack(Some(2)), &mut player, &mut enemies, &config(), &mut rolls)
            .unwrap_err();
        assert_eq!(err, CombatError::InvalidTarget { index: 2, alive: 2 });
        assert_eq!(encounter.state(), EncounterState::PlayerTurn);

        // both grunts strike back
        let report = encounter
            .act(PlayerAction::Attack(Some(1)), &mut player, &mut enemies, &config(), &mut rolls)
            .unwrap();
        assert_eq!(enemies[1].stats().health(), 15);
        assert_eq!(player.stats().health(), 110);
        let strikes = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyAttacked { .. }))
            .count();
        assert_eq!(strikes, 2);
    }

    #[test]
    fn target_indexes_skip_the_dead() {
        let mut enemies = vec![grunt(10, 1), grunt(30, 1)];
        enemies[0].stats_mut().take_damage(10);
        let mut encounter = started(&enemies);
        let mut player = fighter();

        encounter
            .act(
                PlayerAction::Attack(None),
                &mut player,
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap();
        assert_eq!(enemies[1].stats().health(), 15);
    }

    #[test]
    fn magic_without_mana_keeps_turn() {
        let config = config();
        let mut player = Player::mage("Merlin", &config);
        player.use_mana(90, &config.progression).unwrap();
        let mut enemies = vec![grunt(30, 5)];
        let mut encounter = started(&enemies);

        let err = encounter
            .act(
                PlayerAction::Magic(None),
                &mut player,
                &mut enemies,
                &config,
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap_err();
        assert_eq!(
            err,
            CombatError::InsufficientMana {
                required: 20,
                available: 10
            }
        );
        assert_eq!(encounter.turn(), 1);
        assert_eq!(player.stats().health(), 80);
    }

    #[test]
    fn warrior_cannot_cast() {
        let mut enemies = vec![grunt(30, 5)];
        let mut encounter = started(&enemies);
        let err = encounter
            .act(
                PlayerAction::Magic(None),
                &mut fighter(),
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap_err();
        assert_eq!(err, CombatError::NoManaPool);
    }

    #[test]
    fn magic_bypasses_defense() {
        let config = config();
        let mut player = Player::mage("Merlin", &config);
        let mut enemies = vec![Monster::new(
            "golem",
            CreatureStats::new("Golem", 100, 1).with_defense(50),
            MonsterTier::Weak,
            1,
        )];
        let mut encounter = started(&enemies);

        let report = encounter
            .act(
                PlayerAction::Magic(None),
                &mut player,
                &mut enemies,
                &config,
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap();
        assert_eq!(enemies[0].stats().health(), 85);
        assert_eq!(player.mana().unwrap().current(), 80);
        assert!(matches!(
            report.events[0],
            GameEvent::SpellCast { damage: 15, mana_left: 80, .. }
        ));
    }

    #[test]
    fn failed_item_use_keeps_turn() {
        let mut enemies = vec![grunt(30, 5)];
        let mut encounter = started(&enemies);
        let mut player = fighter();

        let err = encounter
            .act(
                PlayerAction::UseItem(3),
                &mut player,
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap_err();
        assert!(matches!(err, CombatError::Item(_)));
        assert_eq!(player.stats().health(), 120);
        assert_eq!(encounter.state(), EncounterState::PlayerTurn);
    }

    #[test]
    fn failed_flee_gives_enemy_a_turn() {
        let config = GameConfig::default().with_combat(CombatRules {
            flee_base_chance: 0.0,
            flee_penalty: 0.0,
            monster_damage_per_level: 0,
            ..CombatRules::deterministic()
        });
        let mut enemies = vec![grunt(30, 5)];
        let mut encounter = started(&enemies);
        let mut player = fighter();

        let report = encounter
            .act(
                PlayerAction::Flee,
                &mut player,
                &mut enemies,
                &config,
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap();
        assert_eq!(report.state, EncounterState::PlayerTurn);
        assert_eq!(report.events[0], GameEvent::FleeFailed);
        assert_eq!(player.stats().health(), 115);
    }

    #[test]
    fn player_death_ends_in_lost() {
        let mut enemies = vec![grunt(500, 200)];
        let mut encounter = started(&enemies);
        let mut player = fighter();

        let report = encounter
            .act(
                PlayerAction::Defend,
                &mut player,
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap();
        assert_eq!(player.stats().health(), 20);
        assert_eq!(report.state, EncounterState::PlayerTurn);

        let report = encounter
            .act(
                PlayerAction::Attack(None),
                &mut player,
                &mut enemies,
                &config(),
                &mut ScriptedRolls::constant(0.5),
            )
            .unwrap();
        assert_eq!(report.state, EncounterState::Lost);
        assert!(!player.is_alive());
        assert!(matches!(
            report.events.last(),
            Some(GameEvent::PlayerDefeated { .. })
        ));
    }
}
