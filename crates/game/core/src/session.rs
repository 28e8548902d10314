//! Game session: the command surface a controller drives.
//!
//! A [`GameSession`] owns the player, the dungeon and the active encounter.
//! Every operation returns the [`GameEvent`]s it produced, or an error that
//! left the session unchanged. Rendering and input are the caller's concern.
//!
//! # Terminal states
//!
//! - [`SessionStatus::PlayerDied`]: the player's health reached zero
//! - [`SessionStatus::PlayerQuit`]: [`GameSession::quit`] was called
//! - [`SessionStatus::DungeonCompleted`]: every room that held creatures is cleared
//!
//! A completed dungeon still lets the player pick up the spoils lying in the
//! final room: [`GameSession::loot`], [`GameSession::look`] and
//! [`GameSession::quit`] keep working until the player leaves.

use crate::actor::{Combatant, Player};
use crate::combat::{CombatError, Encounter, EncounterState, PlayerAction};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::event::{GameEvent, StatusView};
use crate::inventory::InventoryError;
use crate::item::Item;
use crate::rng::{RollSource, SeededRolls};
use crate::room::{Direction, Dungeon, Room, RoomError, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    PlayerDied,
    PlayerQuit,
    DungeonCompleted,
}

/// Which floor items to pick up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LootSelection {
    All,
    Index(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error("there is no exit to the {direction}")]
    NoExit { direction: Direction },

    #[error("{count} enemies block your way")]
    EnemiesBlockExit { count: usize },

    #[error("there is nothing to fight here")]
    NotInCombat,

    #[error("there is nothing to pick up")]
    NothingToLoot,

    #[error("inventory is full ({capacity} items)")]
    InventoryFull { capacity: usize },

    #[error("invalid selection {index} ({len} available)")]
    InvalidSelection { index: usize, len: usize },

    #[error("the dungeon has no rooms")]
    EmptyDungeon,

    #[error("the game is over ({0})")]
    GameOver(SessionStatus),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            Self::Inventory(err) => err.severity(),
            Self::Room(err) => err.severity(),
            Self::NoExit { .. } | Self::InvalidSelection { .. } => ErrorSeverity::Validation,
            Self::EnemiesBlockExit { .. }
            | Self::NotInCombat
            | Self::NothingToLoot
            | Self::InventoryFull { .. } => ErrorSeverity::Recoverable,
            Self::EmptyDungeon => ErrorSeverity::Fatal,
            Self::GameOver(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Combat(err) => err.error_code(),
            Self::Inventory(err) => err.error_code(),
            Self::Room(err) => err.error_code(),
            Self::NoExit { .. } => "SESSION_NO_EXIT",
            Self::EnemiesBlockExit { .. } => "SESSION_ENEMIES_BLOCK_EXIT",
            Self::NotInCombat => "SESSION_NOT_IN_COMBAT",
            Self::NothingToLoot => "SESSION_NOTHING_TO_LOOT",
            Self::InventoryFull { .. } => "SESSION_INVENTORY_FULL",
            Self::InvalidSelection { .. } => "SESSION_INVALID_SELECTION",
            Self::EmptyDungeon => "SESSION_EMPTY_DUNGEON",
            Self::GameOver(_) => "SESSION_GAME_OVER",
        }
    }
}

pub type SessionResult = Result<Vec<GameEvent>, SessionError>;

#[derive(Debug)]
pub struct GameSession<R = SeededRolls> {
    config: GameConfig,
    dungeon: Dungeon,
    player: Player,
    current: RoomId,
    encounter: Option<Encounter>,
    status: SessionStatus,
    /// Set after a successful flee; allows one move past living enemies.
    escape_ready: bool,
    /// Set when the player quits a completed dungeon.
    departed: bool,
    rolls: R,
}

impl<R: RollSource> GameSession<R> {
    /// Places `player` at the dungeon's start room. Call [`GameSession::begin`]
    /// to enter it.
    pub fn new(
        player: Player,
        dungeon: Dungeon,
        config: GameConfig,
        rolls: R,
    ) -> Result<Self, SessionError> {
        let current = dungeon.start().ok_or(SessionError::EmptyDungeon)?;
        Ok(Self {
            config,
            dungeon,
            player,
            current,
            encounter: None,
            status: SessionStatus::InProgress,
            escape_ready: false,
            departed: false,
            rolls,
        })
    }

    /// Enters the start room.
    pub fn begin(&mut self) -> SessionResult {
        self.ensure_active()?;
        tracing::info!(player = self.player.name(), "session started");
        self.enter_current()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn current_room_id(&self) -> RoomId {
        self.current
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.dungeon.room(self.current)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::InProgress
    }

    /// Items are still on the floor of the room where the dungeon was completed.
    pub fn spoils_pending(&self) -> bool {
        self.status == SessionStatus::DungeonCompleted
            && !self.departed
            && self.current_room().is_some_and(|room| !room.floor().is_empty())
    }

    /// True while the player can still act: the game runs, or spoils wait.
    pub fn accepts_commands(&self) -> bool {
        !self.is_over() || self.spoils_pending()
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// True while an unfinished encounter is running.
    pub fn in_combat(&self) -> bool {
        self.encounter.as_ref().is_some_and(|e| !e.is_finished())
    }

    pub fn look(&self) -> SessionResult {
        let room = self.room()?;
        Ok(vec![GameEvent::RoomDescribed(room.view())])
    }

    /// Character sheet, or the combat summary during a fight. Never costs a turn.
    pub fn status_report(&mut self) -> SessionResult {
        if self.in_combat() && !self.is_over() {
            return self.fight(PlayerAction::Status);
        }
        Ok(vec![GameEvent::PlayerStatus(StatusView::of(&self.player))])
    }

    pub fn move_to(&mut self, direction: Direction) -> SessionResult {
        self.ensure_active()?;
        let count = self.room()?.living_enemies();
        if count > 0 && !self.escape_ready {
            return Err(SessionError::EnemiesBlockExit { count });
        }
        let next = self
            .dungeon
            .neighbor(self.current, direction)
            .ok_or(SessionError::NoExit { direction })?;

        let mut events = vec![self.room_mut()?.leave()];
        tracing::debug!(from = %self.current, to = %next, %direction, "player moved");
        self.current = next;
        self.encounter = None;
        self.escape_ready = false;
        events.extend(self.enter_current()?);
        Ok(events)
    }

    pub fn attack(&mut self, target: Option<usize>) -> SessionResult {
        self.fight(PlayerAction::Attack(target))
    }

    pub fn cast_magic(&mut self, target: Option<usize>) -> SessionResult {
        self.fight(PlayerAction::Magic(target))
    }

    pub fn defend(&mut self) -> SessionResult {
        self.fight(PlayerAction::Defend)
    }

    pub fn flee(&mut self) -> SessionResult {
        self.fight(PlayerAction::Flee)
    }

    /// Uses an inventory item. During combat this costs the turn.
    ///
    /// Right after a successful flee the item is used without re-engaging.
    pub fn use_item(&mut self, index: usize) -> SessionResult {
        self.ensure_active()?;
        if self.room()?.has_living_enemies() && !self.escape_ready {
            return self.fight(PlayerAction::UseItem(index));
        }
        let used = self.player.use_item(index)?;
        Ok(vec![GameEvent::ItemUsed(used)])
    }

    pub fn rest(&mut self) -> SessionResult {
        self.ensure_active()?;
        let room = self
            .dungeon
            .room_mut(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?;
        Ok(vec![room.rest(&mut self.player)?])
    }

    /// Moves floor items into the inventory.
    ///
    /// Items that do not fit stay on the floor in their original order.
    /// Also allowed once the dungeon is completed.
    pub fn loot(&mut self, selection: LootSelection) -> SessionResult {
        if !self.spoils_pending() {
            self.ensure_active()?;
        }
        let capacity = self.player.inventory().capacity();
        let room = self
            .dungeon
            .room_mut(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?;

        let count = room.living_enemies();
        if count > 0 {
            return Err(RoomError::EnemiesPresent { count }.into());
        }
        if room.floor().is_empty() {
            return Err(SessionError::NothingToLoot);
        }

        let mut events = Vec::new();
        match selection {
            LootSelection::Index(index) => {
                let len = room.floor().len();
                let item = room
                    .take_floor_item(index)
                    .ok_or(SessionError::InvalidSelection { index, len })?;
                let name = item.to_string();
                if let Err(err) = self.player.inventory_mut().add(item) {
                    if let Some(item) = err.into_rejected_item() {
                        room.return_floor_item(index, item);
                    }
                    return Err(SessionError::InventoryFull { capacity });
                }
                events.push(GameEvent::ItemLooted { item: name });
            }
            LootSelection::All => {
                let mut kept: Vec<Item> = Vec::new();
                while let Some(item) = room.take_floor_item(0) {
                    let name = item.to_string();
                    match self.player.inventory_mut().add(item) {
                        Ok(()) => events.push(GameEvent::ItemLooted { item: name }),
                        Err(err) => kept.extend(err.into_rejected_item()),
                    }
                }
                let left = kept.len();
                room.drop_on_floor(kept);
                if events.is_empty() {
                    return Err(SessionError::InventoryFull { capacity });
                }
                if left > 0 {
                    events.push(GameEvent::LootLeftBehind { count: left });
                }
            }
        }

        room.mark_looted_if_empty();
        Ok(events)
    }

    /// Ends the game, or walks away from the spoils of a completed dungeon.
    pub fn quit(&mut self) -> SessionResult {
        if self.spoils_pending() {
            self.departed = true;
            tracing::info!("player left the spoils behind");
            return Ok(vec![GameEvent::PlayerQuit]);
        }
        self.ensure_active()?;
        self.status = SessionStatus::PlayerQuit;
        tracing::info!("player quit");
        Ok(vec![GameEvent::PlayerQuit])
    }

    fn fight(&mut self, action: PlayerAction) -> SessionResult {
        self.ensure_active()?;
        let room = self
            .dungeon
            .room_mut(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?;
        if !room.has_living_enemies() {
            return Err(SessionError::NotInCombat);
        }

        let mut events = Vec::new();
        let encounter = match self.encounter.take() {
            Some(encounter) if !encounter.is_finished() => encounter,
            _ => {
                let mut encounter = Encounter::new();
                events.push(encounter.start(room.creatures())?);
                self.escape_ready = false;
                encounter
            }
        };
        let encounter = self.encounter.insert(encounter);

        let report = encounter.act(
            action,
            &mut self.player,
            room.creatures_mut(),
            &self.config,
            &mut self.rolls,
        )?;
        events.extend(report.events);

        match report.state {
            EncounterState::Won => events.extend(self.claim_victory()?),
            EncounterState::Lost => {
                self.status = SessionStatus::PlayerDied;
            }
            EncounterState::Fled => self.escape_ready = true,
            _ => {}
        }
        Ok(events)
    }

    /// Experience, loot and clearing after a won encounter.
    fn claim_victory(&mut self) -> SessionResult {
        let room = self
            .dungeon
            .room_mut(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?;

        let mut events = Vec::new();
        let mut experience = 0;
        let mut spoils = Vec::new();
        for monster in room
            .creatures_mut()
            .iter_mut()
            .filter(|m| !m.is_alive() && !m.spoils_claimed())
        {
            experience += monster.experience_reward();
            monster.drop_loot(&mut self.rolls);
            let items = monster.claim_spoils();
            if !items.is_empty() {
                events.push(GameEvent::LootDropped {
                    enemy: monster.name().to_owned(),
                    items: items.iter().map(ToString::to_string).collect(),
                });
            }
            spoils.extend(items);
        }
        room.drop_on_floor(spoils);

        let levels = self
            .player
            .gain_experience(experience, &self.config.progression);
        events.push(GameEvent::ExperienceGained {
            amount: experience,
            experience: self.player.progression().experience(),
            to_next_level: self.player.progression().to_next_level(),
        });
        events.extend(levels.into_iter().map(GameEvent::LevelledUp));

        if room.check_cleared() {
            events.push(GameEvent::RoomCleared {
                name: room.name().to_owned(),
            });
        }
        if self.dungeon.is_complete() {
            self.status = SessionStatus::DungeonCompleted;
            tracing::info!("dungeon completed");
            events.push(GameEvent::DungeonCompleted);
        }
        Ok(events)
    }

    fn enter_current(&mut self) -> SessionResult {
        let room = self
            .dungeon
            .room_mut(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?;
        let mut events = room.enter(&mut self.player);

        if !self.player.is_alive() {
            self.status = SessionStatus::PlayerDied;
            events.push(GameEvent::PlayerDefeated {
                by: format!("the trap in {}", room.name()),
            });
            return Ok(events);
        }

        if room.has_living_enemies() {
            let mut encounter = Encounter::new();
            events.push(encounter.start(room.creatures())?);
            self.encounter = Some(encounter);
        }
        Ok(events)
    }

    fn room(&self) -> Result<&Room, SessionError> {
        Ok(self
            .dungeon
            .room(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?)
    }

    fn room_mut(&mut self) -> Result<&mut Room, SessionError> {
        Ok(self
            .dungeon
            .room_mut(self.current)
            .ok_or(RoomError::UnknownRoom(self.current))?)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::InProgress => Ok(()),
            status => Err(SessionError::GameOver(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Monster, MonsterTier};
    use crate::config::CombatRules;
    use crate::item::Item;
    use crate::loot::LootTable;
    use crate::room::RoomKind;
    use crate::rng::ScriptedRolls;
    use crate::stats::CreatureStats;

    fn config() -> GameConfig {
        GameConfig::default().with_combat(CombatRules {
            monster_damage_per_level: 0,
            ..CombatRules::deterministic()
        })
    }

    fn rat() -> Monster {
        Monster::new("rat", CreatureStats::new("Rat", 10, 2), MonsterTier::Weak, 30)
    }

    /// Camp (start) --north--> Den (one rat) --east--> Alcove (rest)
    fn session() -> GameSession<ScriptedRolls> {
        let config = config();
        let mut dungeon = Dungeon::new();
        let camp = dungeon.add_room(Room::treasure("Camp", "", 0));
        let den = dungeon.add_room(Room::combat("Den", "").with_creature(rat()));
        let alcove = dungeon.add_room(Room::resting("Alcove", "", 40, 30));
        dungeon.connect_bidirectional(camp, Direction::North, den).unwrap();
        dungeon.connect_bidirectional(den, Direction::East, alcove).unwrap();

        let player = Player::warrior("Conan", &config);
        let mut session =
            GameSession::new(player, dungeon, config, ScriptedRolls::constant(0.99)).unwrap();
        session.begin().unwrap();
        session
    }

    #[test]
    fn entering_a_guarded_room_starts_combat() {
        let mut session = session();
        let events = session.move_to(Direction::North).unwrap();
        assert!(session.in_combat());
        assert!(matches!(events.last(), Some(GameEvent::EncounterStarted { .. })));
    }

    #[test]
    fn enemies_block_movement() {
        let mut session = session();
        session.move_to(Direction::North).unwrap();
        assert_eq!(
            session.move_to(Direction::East),
            Err(SessionError::EnemiesBlockExit { count: 1 })
        );
    }

    #[test]
    fn missing_exit_is_reported() {
        let mut session = session();
        assert_eq!(
            session.move_to(Direction::West),
            Err(SessionError::NoExit {
                direction: Direction::West
            })
        );
    }

    #[test]
    fn victory_grants_experience_and_clears_room() {
        let mut session = session();
        session.move_to(Direction::North).unwrap();

        let events = session.attack(None).unwrap();
        assert!(events.contains(&GameEvent::EncounterWon { turns: 1 }));
        assert!(events.contains(&GameEvent::RoomCleared { name: "Den".into() }));
        assert_eq!(session.player().level(), 2);
        assert_eq!(session.status(), SessionStatus::DungeonCompleted);
        assert_eq!(
            session.move_to(Direction::East),
            Err(SessionError::GameOver(SessionStatus::DungeonCompleted))
        );
    }

    #[test]
    fn flee_allows_one_escape_move() {
        let mut config = config();
        config.combat.flee_base_chance = 1.0;
        config.combat.flee_penalty = 0.0;
        let mut dungeon = Dungeon::new();
        let camp = dungeon.add_room(Room::resting("Camp", "", 10, 0));
        let den = dungeon.add_room(Room::combat("Den", "").with_creature(rat()));
        dungeon.connect_bidirectional(camp, Direction::North, den).unwrap();
        let player = Player::warrior("Conan", &config);
        let mut session =
            GameSession::new(player, dungeon, config, ScriptedRolls::constant(0.5)).unwrap();
        session.begin().unwrap();
        session.move_to(Direction::North).unwrap();

        let events = session.flee().unwrap();
        assert_eq!(events, vec![GameEvent::FleeSucceeded]);
        assert_eq!(session.player().stats().health(), 120);

        let events = session.move_to(Direction::South).unwrap();
        assert_eq!(
            events[0],
            GameEvent::RoomLeft {
                name: "Den".into(),
                fled: true
            }
        );
    }

    #[test]
    fn status_during_combat_is_free() {
        let mut session = session();
        session.move_to(Direction::North).unwrap();

        let events = session.status_report().unwrap();
        assert!(matches!(events[0], GameEvent::CombatStatus { turn: 1, .. }));
        assert_eq!(session.encounter().unwrap().turn(), 1);
        assert!(session.in_combat());

        session.attack(None).unwrap();
        assert!(matches!(
            session.status_report().unwrap()[0],
            GameEvent::PlayerStatus(_)
        ));
    }

    #[test]
    fn rest_is_refused_outside_rest_rooms() {
        let mut session = session();
        assert_eq!(
            session.rest(),
            Err(SessionError::Room(RoomError::NotRestRoom))
        );
    }

    #[test]
    fn defend_outside_combat_fails() {
        let mut session = session();
        assert_eq!(session.defend(), Err(SessionError::NotInCombat));
    }

    #[test]
    fn quit_is_terminal() {
        let mut session = session();
        assert_eq!(session.quit().unwrap(), vec![GameEvent::PlayerQuit]);
        assert!(session.is_over());
        assert!(session.look().is_ok());
        assert_eq!(
            session.defend(),
            Err(SessionError::GameOver(SessionStatus::PlayerQuit))
        );
    }

    fn potion(name: &str) -> Item {
        Item::potion(name, "", 10)
    }

    fn looted(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, GameEvent::ItemLooted { .. }))
            .count()
    }

    /// A single guarded room whose rat always drops three potions.
    fn lair() -> GameSession<ScriptedRolls> {
        let config = config();
        let table = LootTable::new()
            .with(potion("Red"), 1.0)
            .with(potion("Blue"), 1.0)
            .with(potion("Green"), 1.0);
        let mut dungeon = Dungeon::new();
        dungeon.add_room(Room::combat("Lair", "").with_creature(rat().with_loot_table(table)));

        let player = Player::warrior("Conan", &config);
        // 0.0 opens the drop gate and every draw; crits are disabled by the rules
        let mut session =
            GameSession::new(player, dungeon, config, ScriptedRolls::constant(0.0)).unwrap();
        session.begin().unwrap();
        session
    }

    /// Start room is an untrapped treasure room holding `floor`.
    fn vault(inventory_size: usize, floor: &[&str]) -> GameSession<ScriptedRolls> {
        let mut config = config();
        config.inventory_size = inventory_size;
        let room = floor
            .iter()
            .fold(Room::treasure("Vault", "", 0), |room, name| {
                room.with_floor_item(potion(name))
            });
        let mut dungeon = Dungeon::new();
        dungeon.add_room(room);

        let player = Player::warrior("Conan", &config);
        let mut session =
            GameSession::new(player, dungeon, config, ScriptedRolls::constant(0.99)).unwrap();
        session.begin().unwrap();
        session
    }

    fn floor_names(session: &GameSession<ScriptedRolls>) -> Vec<String> {
        session
            .current_room()
            .unwrap()
            .floor()
            .iter()
            .map(|item| item.name().to_owned())
            .collect()
    }

    #[test]
    fn final_room_spoils_can_be_looted_after_completion() {
        let mut session = lair();

        let events = session.attack(None).unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::LootDropped { items, .. } if items.len() == 3
        )));
        assert!(events.contains(&GameEvent::DungeonCompleted));
        assert_eq!(session.status(), SessionStatus::DungeonCompleted);
        assert!(session.spoils_pending());
        assert!(session.accepts_commands());

        let events = session.loot(LootSelection::Index(1)).unwrap();
        assert_eq!(looted(&events), 1);
        assert_eq!(floor_names(&session), ["Red", "Green"]);
        assert_eq!(
            session.use_item(0),
            Err(SessionError::GameOver(SessionStatus::DungeonCompleted))
        );

        let events = session.loot(LootSelection::All).unwrap();
        assert_eq!(looted(&events), 2);
        assert_eq!(session.player().inventory().len(), 3);
        assert!(!session.spoils_pending());
        assert!(!session.accepts_commands());
        assert_eq!(
            session.loot(LootSelection::All),
            Err(SessionError::GameOver(SessionStatus::DungeonCompleted))
        );
    }

    #[test]
    fn quitting_walks_away_from_spoils() {
        let mut session = lair();
        session.attack(None).unwrap();

        assert_eq!(session.quit().unwrap(), vec![GameEvent::PlayerQuit]);
        assert_eq!(session.status(), SessionStatus::DungeonCompleted);
        assert!(!session.accepts_commands());
        assert_eq!(floor_names(&session).len(), 3);
        assert_eq!(
            session.loot(LootSelection::All),
            Err(SessionError::GameOver(SessionStatus::DungeonCompleted))
        );
    }

    #[test]
    fn loot_is_refused_while_the_guardian_lives() {
        let mut session = lair();
        assert_eq!(
            session.loot(LootSelection::All),
            Err(SessionError::Room(RoomError::EnemiesPresent { count: 1 }))
        );
    }

    #[test]
    fn full_inventory_leaves_loot_on_the_floor() {
        let mut session = vault(2, &["Red", "Blue", "Green"]);

        let events = session.loot(LootSelection::Index(2)).unwrap();
        assert_eq!(looted(&events), 1);

        let events = session.loot(LootSelection::All).unwrap();
        assert_eq!(looted(&events), 1);
        assert_eq!(events.last(), Some(&GameEvent::LootLeftBehind { count: 1 }));
        assert_eq!(floor_names(&session), ["Blue"]);

        assert_eq!(
            session.loot(LootSelection::Index(0)),
            Err(SessionError::InventoryFull { capacity: 2 })
        );
        assert_eq!(
            session.loot(LootSelection::All),
            Err(SessionError::InventoryFull { capacity: 2 })
        );
        assert_eq!(floor_names(&session), ["Blue"]);
        assert!(matches!(
            session.current_room().unwrap().kind(),
            RoomKind::Treasure { looted: false, .. }
        ));
    }

    #[test]
    fn emptying_a_treasure_floor_marks_it_looted() {
        let mut session = vault(20, &["Red", "Blue"]);
        assert_eq!(
            session.loot(LootSelection::Index(5)),
            Err(SessionError::InvalidSelection { index: 5, len: 2 })
        );

        let events = session.loot(LootSelection::All).unwrap();
        assert_eq!(looted(&events), 2);
        assert!(matches!(
            session.current_room().unwrap().kind(),
            RoomKind::Treasure { looted: true, .. }
        ));
        assert_eq!(session.loot(LootSelection::All), Err(SessionError::NothingToLoot));
    }

    #[test]
    fn deadly_trap_ends_the_game() {
        let config = config();
        let mut dungeon = Dungeon::new();
        let camp = dungeon.add_room(Room::resting("Camp", "", 10, 0));
        let pit = dungeon.add_room(Room::treasure("Pit", "", 500).with_floor_item(potion("Red")));
        dungeon.connect_bidirectional(camp, Direction::North, pit).unwrap();
        let player = Player::warrior("Conan", &config);
        let mut session =
            GameSession::new(player, dungeon, config, ScriptedRolls::constant(0.99)).unwrap();
        session.begin().unwrap();

        let events = session.move_to(Direction::North).unwrap();
        assert!(events.contains(&GameEvent::TrapSprung { damage: 120 }));
        assert!(matches!(events.last(), Some(GameEvent::PlayerDefeated { .. })));
        assert_eq!(session.status(), SessionStatus::PlayerDied);
        assert!(!session.player().is_alive());
        assert!(!session.accepts_commands());

        let over = Err(SessionError::GameOver(SessionStatus::PlayerDied));
        assert_eq!(session.move_to(Direction::South), over);
        assert_eq!(session.loot(LootSelection::All), over);
        assert_eq!(session.rest(), over);
        assert_eq!(session.quit(), over);
    }

    #[test]
    fn item_use_after_fleeing_keeps_the_escape_open() {
        let mut config = config();
        config.combat.flee_base_chance = 1.0;
        config.combat.flee_penalty = 0.0;
        let mut dungeon = Dungeon::new();
        let camp = dungeon.add_room(Room::resting("Camp", "", 10, 0));
        let den = dungeon.add_room(Room::combat("Den", "").with_creature(rat()));
        dungeon.connect_bidirectional(camp, Direction::North, den).unwrap();
        let mut player = Player::warrior("Conan", &config);
        player.inventory_mut().add(potion("Red")).unwrap();
        let mut session =
            GameSession::new(player, dungeon, config, ScriptedRolls::constant(0.5)).unwrap();
        session.begin().unwrap();
        session.move_to(Direction::North).unwrap();
        session.flee().unwrap();

        let events = session.use_item(0).unwrap();
        assert!(matches!(events.as_slice(), [GameEvent::ItemUsed(_)]));
        assert!(!session.in_combat());

        let events = session.move_to(Direction::South).unwrap();
        assert_eq!(
            events[0],
            GameEvent::RoomLeft {
                name: "Den".into(),
                fled: true
            }
        );
    }
}
