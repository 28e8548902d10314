//! Narration events.
//!
//! Every session operation returns the events it produced. Their `Display`
//! form is a one-line, human-readable description; structured views
//! ([`RoomView`], [`StatusView`]) carry the data a client needs to lay out
//! richer screens.

use core::fmt;

use crate::actor::player::ItemUse;
use crate::actor::{Combatant, Monster, Player};
use crate::combat::{AttackOutcome, AttackResult};
use crate::room::Direction;
use crate::stats::LevelUp;

/// Health line for one enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyStatus {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub level: u32,
}

impl EnemyStatus {
    pub fn of(monster: &Monster) -> Self {
        Self {
            name: monster.name().to_owned(),
            health: monster.stats().health(),
            max_health: monster.stats().max_health(),
            level: monster.level(),
        }
    }
}

/// What the player sees when looking around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomView {
    pub name: String,
    pub description: String,
    pub kind: &'static str,
    pub exits: Vec<Direction>,
    pub enemies: Vec<EnemyStatus>,
    pub floor: Vec<String>,
    pub cleared: bool,
}

/// Character sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub health_percent: u32,
    pub attack: u32,
    pub defense: u32,
    pub mana: Option<(u32, u32)>,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub inventory: Vec<String>,
    pub inventory_size: usize,
}

impl StatusView {
    pub fn of(player: &Player) -> Self {
        Self {
            name: player.name().to_owned(),
            level: player.level(),
            health: player.stats().health(),
            max_health: player.stats().max_health(),
            health_percent: player.stats().health_percent(),
            attack: player.effective_attack(),
            defense: player.effective_defense(),
            mana: player.mana().map(|pool| (pool.current(), pool.max())),
            experience: player.progression().experience(),
            experience_to_next_level: player.progression().to_next_level(),
            inventory: player
                .inventory()
                .items()
                .iter()
                .map(ToString::to_string)
                .collect(),
            inventory_size: player.inventory().capacity(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    // Exploration
    RoomEntered {
        name: String,
        description: String,
        first_visit: bool,
    },
    RoomLeft {
        name: String,
        fled: bool,
    },
    TrapSprung {
        damage: u32,
    },
    RoomCleared {
        name: String,
    },
    Rested {
        healed: u32,
        mana_restored: u32,
    },
    ItemLooted {
        item: String,
    },
    LootLeftBehind {
        count: usize,
    },
    RoomDescribed(RoomView),
    PlayerStatus(StatusView),

    // Combat
    EncounterStarted {
        enemies: Vec<String>,
    },
    PlayerAttacked {
        target: String,
        result: AttackResult,
        remaining: u32,
    },
    SpellCast {
        target: String,
        damage: u32,
        remaining: u32,
        mana_left: u32,
    },
    ManaGrew {
        increase: u32,
        max: u32,
    },
    ItemUsed(ItemUse),
    Defending,
    EnemyAttacked {
        enemy: String,
        result: AttackResult,
        player_health: u32,
    },
    EnemyDefeated {
        enemy: String,
    },
    FleeSucceeded,
    FleeFailed,
    CombatStatus {
        turn: u32,
        player_health: u32,
        player_max_health: u32,
        mana: Option<(u32, u32)>,
        enemies: Vec<EnemyStatus>,
    },
    EncounterWon {
        turns: u32,
    },
    PlayerDefeated {
        by: String,
    },

    // Rewards
    ExperienceGained {
        amount: u32,
        experience: u32,
        to_next_level: u32,
    },
    LevelledUp(LevelUp),
    LootDropped {
        enemy: String,
        items: Vec<String>,
    },

    // Lifecycle
    DungeonCompleted,
    PlayerQuit,
}

impl GameEvent {
    /// True for enemy actions, which clients may pace.
    pub fn is_enemy_action(&self) -> bool {
        matches!(self, Self::EnemyAttacked { .. })
    }
}

/// Writes one swing. `enemy` is the monster on either side of it.
fn strike(
    f: &mut fmt::Formatter<'_>,
    enemy: &str,
    by_player: bool,
    result: &AttackResult,
) -> fmt::Result {
    let damage = result.damage;
    let written = match (result.outcome, by_player) {
        (AttackOutcome::Dodged, true) => write!(f, "{enemy} dodges your attack!"),
        (AttackOutcome::Dodged, false) => write!(f, "You dodge {enemy}'s attack!"),
        (AttackOutcome::Hit, true) => write!(f, "You hit {enemy} for {damage} damage"),
        (AttackOutcome::Hit, false) => write!(f, "{enemy} hits you for {damage} damage"),
        (AttackOutcome::Critical, true) => {
            write!(f, "Critical hit! You hit {enemy} for {damage} damage")
        }
        (AttackOutcome::Critical, false) => {
            write!(f, "Critical hit! {enemy} hits you for {damage} damage")
        }
    };
    written?;
    if result.blocked > 0 {
        write!(f, " ({} blocked)", result.blocked)?;
    }
    Ok(())
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomEntered {
                name,
                description,
                first_visit,
            } => {
                if *first_visit {
                    write!(f, "You discover {name}. {description}")
                } else {
                    write!(f, "You return to {name}.")
                }
            }
            Self::RoomLeft { name, fled: true } => write!(f, "You flee from {name}!"),
            Self::RoomLeft { name, fled: false } => write!(f, "You leave {name}."),
            Self::TrapSprung { damage } => {
                write!(f, "A trap springs! You take {damage} damage.")
            }
            Self::RoomCleared { name } => write!(f, "{name} is now clear."),
            Self::Rested {
                healed,
                mana_restored,
            } => {
                write!(f, "You rest and recover {healed} HP")?;
                if *mana_restored > 0 {
                    write!(f, " and {mana_restored} mana")?;
                }
                f.write_str(".")
            }
            Self::ItemLooted { item } => write!(f, "You pick up {item}."),
            Self::LootLeftBehind { count } => {
                write!(f, "Your inventory is full; {count} item(s) left behind.")
            }
            Self::RoomDescribed(view) => {
                write!(f, "{} ({}): {}", view.name, view.kind, view.description)
            }
            Self::PlayerStatus(view) => write!(
                f,
                "{} - level {} - HP {}/{}",
                view.name, view.level, view.health, view.max_health
            ),
            Self::EncounterStarted { enemies } => {
                write!(f, "Combat begins against {}!", enemies.join(", "))
            }
            Self::PlayerAttacked {
                target,
                result,
                remaining,
            } => {
                strike(f, target, true, result)?;
                if result.connected() {
                    write!(f, " ({remaining} HP left)")?;
                }
                Ok(())
            }
            Self::SpellCast {
                target,
                damage,
                remaining,
                mana_left,
            } => write!(
                f,
                "Your spell strikes {target} for {damage} damage ({remaining} HP left, {mana_left} mana left)"
            ),
            Self::ManaGrew { increase, max } => {
                write!(f, "Your practice pays off: max mana +{increase} (now {max}).")
            }
            Self::ItemUsed(used) => match used {
                ItemUse::Healed { item, amount } => {
                    write!(f, "You drink {item} and recover {amount} HP.")
                }
                ItemUse::Equipped { item } => write!(f, "You equip {item}."),
                ItemUse::Unequipped { item } => write!(f, "You unequip {item}."),
                ItemUse::Inspected { item, quantity } => {
                    write!(f, "{item} x{quantity}: a crafting material.")
                }
            },
            Self::Defending => f.write_str("You raise your guard."),
            Self::EnemyAttacked {
                enemy,
                result,
                player_health,
            } => {
                strike(f, enemy, false, result)?;
                if result.connected() {
                    write!(f, " ({player_health} HP left)")?;
                }
                Ok(())
            }
            Self::EnemyDefeated { enemy } => write!(f, "{enemy} is defeated!"),
            Self::FleeSucceeded => f.write_str("You escape!"),
            Self::FleeFailed => f.write_str("You fail to escape!"),
            Self::CombatStatus {
                turn,
                player_health,
                player_max_health,
                enemies,
                ..
            } => {
                write!(f, "Turn {turn} - HP {player_health}/{player_max_health}")?;
                for enemy in enemies {
                    write!(f, " | {} {}/{}", enemy.name, enemy.health, enemy.max_health)?;
                }
                Ok(())
            }
            Self::EncounterWon { turns } => write!(f, "Victory after {turns} turn(s)!"),
            Self::PlayerDefeated { by } => write!(f, "You have been slain by {by}."),
            Self::ExperienceGained {
                amount,
                experience,
                to_next_level,
            } => write!(f, "You gain {amount} XP ({experience}/{to_next_level})."),
            Self::LevelledUp(gains) => {
                write!(
                    f,
                    "Level up! You are now level {} (+{} HP, +{} attack",
                    gains.level, gains.health_gain, gains.attack_gain
                )?;
                if let Some(mana) = gains.mana_gain {
                    write!(f, ", +{mana} mana")?;
                }
                f.write_str(")")
            }
            Self::LootDropped { enemy, items } => {
                write!(f, "{enemy} dropped: {}", items.join(", "))
            }
            Self::DungeonCompleted => f.write_str("Every foe has fallen. The dungeon is conquered!"),
            Self::PlayerQuit => f.write_str("You leave the dungeon."),
        }
    }
}
