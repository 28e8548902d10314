//! Rooms and their per-variant behaviour.
//!
//! # Room lifecycle
//!
//! ```text
//! Unvisited ──enter──▶ Visited ──all creatures dead──▶ Cleared
//! ```
//!
//! Variant sub-states:
//! - combat: `combat_initiated` once entered with living creatures
//! - rest: unused → used (single rest)
//! - treasure: trap armed → sprung on first entry; looted once the floor empties

pub mod graph;

pub use graph::{Direction, Dungeon, Exits, RoomId};

use bitflags::bitflags;

use crate::actor::{Combatant, Monster, Player};
use crate::error::{ErrorSeverity, GameError};
use crate::event::{EnemyStatus, GameEvent, RoomView};
use crate::item::Item;

bitflags! {
    /// Exploration state shared by every room variant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct RoomFlags: u8 {
        const VISITED = 1 << 0;
        const CLEARED = 1 << 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomKind {
    Combat {
        combat_initiated: bool,
    },
    Rest {
        heal_amount: u32,
        mana_restore: u32,
        used: bool,
    },
    Treasure {
        looted: bool,
        trapped: bool,
        trap_damage: u32,
    },
}

impl RoomKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Combat { .. } => "combat",
            Self::Rest { .. } => "rest",
            Self::Treasure { .. } => "treasure",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("there is nowhere to rest here")]
    NotRestRoom,

    #[error("you have already rested here")]
    AlreadyRested,

    #[error("{count} enemies still stand in your way")]
    EnemiesPresent { count: usize },

    #[error("no room {0} in this dungeon")]
    UnknownRoom(RoomId),
}

impl GameError for RoomError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotRestRoom | Self::AlreadyRested | Self::EnemiesPresent { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownRoom(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotRestRoom => "ROOM_NOT_REST_ROOM",
            Self::AlreadyRested => "ROOM_ALREADY_RESTED",
            Self::EnemiesPresent { .. } => "ROOM_ENEMIES_PRESENT",
            Self::UnknownRoom(_) => "ROOM_UNKNOWN",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    name: String,
    description: String,
    kind: RoomKind,
    flags: RoomFlags,
    floor: Vec<Item>,
    creatures: Vec<Monster>,
    exits: Exits,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            flags: RoomFlags::empty(),
            floor: Vec::new(),
            creatures: Vec::new(),
            exits: Exits::default(),
        }
    }

    pub fn combat(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            RoomKind::Combat {
                combat_initiated: false,
            },
        )
    }

    /// A rest room usable once.
    pub fn resting(
        name: impl Into<String>,
        description: impl Into<String>,
        heal_amount: u32,
        mana_restore: u32,
    ) -> Self {
        Self::new(
            name,
            description,
            RoomKind::Rest {
                heal_amount,
                mana_restore,
                used: false,
            },
        )
    }

    /// A treasure room, trapped when `trap_damage` is non-zero.
    pub fn treasure(name: impl Into<String>, description: impl Into<String>, trap_damage: u32) -> Self {
        Self::new(
            name,
            description,
            RoomKind::Treasure {
                looted: false,
                trapped: trap_damage > 0,
                trap_damage,
            },
        )
    }

    pub fn with_creature(mut self, monster: Monster) -> Self {
        self.creatures.push(monster);
        self
    }

    pub fn with_floor_item(mut self, item: Item) -> Self {
        self.floor.push(item);
        self
    }

    pub fn add_creature(&mut self, monster: Monster) {
        self.creatures.push(monster);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &RoomKind {
        &self.kind
    }

    pub fn flags(&self) -> RoomFlags {
        self.flags
    }

    pub fn is_visited(&self) -> bool {
        self.flags.contains(RoomFlags::VISITED)
    }

    pub fn is_cleared(&self) -> bool {
        self.flags.contains(RoomFlags::CLEARED)
    }

    pub fn exits(&self) -> &Exits {
        &self.exits
    }

    pub(crate) fn exits_mut(&mut self) -> &mut Exits {
        &mut self.exits
    }

    /// Every creature placed here, dead or alive.
    pub fn creatures(&self) -> &[Monster] {
        &self.creatures
    }

    pub fn creatures_mut(&mut self) -> &mut [Monster] {
        &mut self.creatures
    }

    pub fn living_enemies(&self) -> usize {
        self.creatures.iter().filter(|m| m.is_alive()).count()
    }

    pub fn has_living_enemies(&self) -> bool {
        self.creatures.iter().any(Monster::is_alive)
    }

    pub fn floor(&self) -> &[Item] {
        &self.floor
    }

    pub fn drop_on_floor(&mut self, items: impl IntoIterator<Item = Item>) {
        self.floor.extend(items);
    }

    pub fn take_floor_item(&mut self, index: usize) -> Option<Item> {
        (index < self.floor.len()).then(|| self.floor.remove(index))
    }

    /// Puts an item back where it was taken from.
    pub fn return_floor_item(&mut self, index: usize, item: Item) {
        let index = index.min(self.floor.len());
        self.floor.insert(index, item);
    }

    /// Marks a treasure room looted once its floor is empty.
    pub fn mark_looted_if_empty(&mut self) {
        if !self.floor.is_empty() {
            return;
        }
        if let RoomKind::Treasure { looted, .. } = &mut self.kind {
            *looted = true;
        }
    }

    /// Player walks in.
    pub fn enter(&mut self, player: &mut Player) -> Vec<GameEvent> {
        let first_visit = !self.is_visited();
        self.flags.insert(RoomFlags::VISITED);

        let mut events = vec![GameEvent::RoomEntered {
            name: self.name.clone(),
            description: self.description.clone(),
            first_visit,
        }];

        let living = self.has_living_enemies();
        match &mut self.kind {
            RoomKind::Combat { combat_initiated } if living => {
                *combat_initiated = true;
            }
            RoomKind::Treasure {
                trapped,
                trap_damage,
                ..
            } if *trapped => {
                *trapped = false;
                let damage = player.stats_mut().take_damage(*trap_damage);
                tracing::info!(room = %self.name, damage, "trap sprung");
                events.push(GameEvent::TrapSprung { damage });
            }
            _ => {}
        }
        events
    }

    /// Player walks out. Leaving living enemies behind counts as fleeing.
    pub fn leave(&mut self) -> GameEvent {
        let fled = matches!(self.kind, RoomKind::Combat { .. }) && self.has_living_enemies();
        self.mark_looted_if_empty();
        GameEvent::RoomLeft {
            name: self.name.clone(),
            fled,
        }
    }

    /// Marks the room cleared once it had creatures and all are dead.
    ///
    /// Returns true only on the transition.
    pub fn check_cleared(&mut self) -> bool {
        if self.is_cleared() || self.creatures.is_empty() || self.has_living_enemies() {
            return false;
        }
        self.flags.insert(RoomFlags::CLEARED);
        tracing::info!(room = %self.name, "room cleared");
        true
    }

    /// Single-use heal and mana restore.
    pub fn rest(&mut self, player: &mut Player) -> Result<GameEvent, RoomError> {
        let count = self.living_enemies();
        if count > 0 {
            return Err(RoomError::EnemiesPresent { count });
        }
        let RoomKind::Rest {
            heal_amount,
            mana_restore,
            used,
        } = &mut self.kind
        else {
            return Err(RoomError::NotRestRoom);
        };
        if *used {
            return Err(RoomError::AlreadyRested);
        }

        *used = true;
        let healed = player.stats_mut().heal(*heal_amount);
        let mana_restored = player
            .mana_mut()
            .map(|pool| pool.restore(*mana_restore))
            .unwrap_or(0);
        tracing::info!(room = %self.name, healed, mana_restored, "player rested");
        Ok(GameEvent::Rested {
            healed,
            mana_restored,
        })
    }

    pub fn view(&self) -> RoomView {
        RoomView {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind.label(),
            exits: self.exits.directions(),
            enemies: self
                .creatures
                .iter()
                .filter(|m| m.is_alive())
                .map(EnemyStatus::of)
                .collect(),
            floor: self.floor.iter().map(ToString::to_string).collect(),
            cleared: self.is_cleared(),
        }
    }
}
