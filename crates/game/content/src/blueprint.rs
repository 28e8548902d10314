//! Dungeon layouts as data.
//!
//! A [`DungeonBlueprint`] names its rooms, the creature type identifiers that
//! populate them, the items on their floors and the passages between them.
//! [`DungeonBlueprint::build`] turns it into a live [`Dungeon`], resolving
//! creatures through any [`CreatureFactory`].
//!
//! # RON format
//!
//! ```ron
//! (
//!     start: "Dungeon Entrance",
//!     rooms: [
//!         (name: "Dungeon Entrance", description: "...", kind: Combat, creatures: ["goblin"]),
//!         (name: "Resting Alcove", description: "...", kind: Rest(heal_amount: Some(40))),
//!     ],
//!     passages: [(from: "Dungeon Entrance", direction: north, to: "Resting Alcove")],
//! )
//! ```

use std::collections::HashSet;

use game_core::{
    CreatureFactory, Direction, Dungeon, ErrorSeverity, GameError, Item, RestRules, Room,
    RoomError, RoomId,
};

use crate::bestiary;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BlueprintError {
    #[error("blueprint has no rooms")]
    NoRooms,

    #[error("room '{0}' is declared twice")]
    DuplicateRoom(String),

    #[error("unknown room '{0}'")]
    UnknownRoom(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

impl GameError for BlueprintError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Room(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRooms => "BLUEPRINT_NO_ROOMS",
            Self::DuplicateRoom(_) => "BLUEPRINT_DUPLICATE_ROOM",
            Self::UnknownRoom(_) => "BLUEPRINT_UNKNOWN_ROOM",
            Self::Room(err) => err.error_code(),
        }
    }
}

/// Item placed on a room floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSpec {
    Potion {
        name: String,
        description: String,
        heal_amount: u32,
    },
    Weapon {
        name: String,
        description: String,
        damage_bonus: u32,
        weapon_type: String,
    },
    Armor {
        name: String,
        description: String,
        defense_bonus: u32,
        armor_type: String,
    },
    Material {
        name: String,
        description: String,
        quantity: u32,
    },
}

impl ItemSpec {
    pub fn to_item(&self) -> Item {
        match self {
            Self::Potion {
                name,
                description,
                heal_amount,
            } => Item::potion(name, description, *heal_amount),
            Self::Weapon {
                name,
                description,
                damage_bonus,
                weapon_type,
            } => Item::weapon(name, description, *damage_bonus, weapon_type),
            Self::Armor {
                name,
                description,
                defense_bonus,
                armor_type,
            } => Item::armor(name, description, *defense_bonus, armor_type),
            Self::Material {
                name,
                description,
                quantity,
            } => Item::material(name, description, *quantity),
        }
    }
}

/// Room behavior. Missing rest amounts fall back to [`RestRules`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomSpec {
    Combat,
    Rest {
        #[cfg_attr(feature = "serde", serde(default))]
        heal_amount: Option<u32>,
        #[cfg_attr(feature = "serde", serde(default))]
        mana_restore: Option<u32>,
    },
    Treasure {
        #[cfg_attr(feature = "serde", serde(default))]
        trap_damage: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomBlueprint {
    pub name: String,
    pub description: String,
    pub kind: RoomSpec,
    /// Creature type identifiers, one entry per creature.
    #[cfg_attr(feature = "serde", serde(default))]
    pub creatures: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub floor: Vec<ItemSpec>,
}

impl RoomBlueprint {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: RoomSpec) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            creatures: Vec::new(),
            floor: Vec::new(),
        }
    }

    pub fn with_creatures(mut self, type_id: &str, count: usize) -> Self {
        self.creatures
            .extend(std::iter::repeat_n(type_id.to_owned(), count));
        self
    }

    pub fn with_floor_item(mut self, item: ItemSpec) -> Self {
        self.floor.push(item);
        self
    }
}

/// Connection between two rooms, walkable both ways unless `one_way`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passage {
    pub from: String,
    pub direction: Direction,
    pub to: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub one_way: bool,
}

impl Passage {
    pub fn new(from: impl Into<String>, direction: Direction, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            direction,
            to: to.into(),
            one_way: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonBlueprint {
    /// Start room name; defaults to the first room.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<String>,
    pub rooms: Vec<RoomBlueprint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passages: Vec<Passage>,
}

impl DungeonBlueprint {
    /// Five-room layout around the Hall of Shadows.
    ///
    /// ```text
    ///                 Boss Chamber
    ///                      |
    /// Treasury --- Hall of Shadows --- Resting Alcove
    ///                      |
    ///              Dungeon Entrance (start)
    /// ```
    pub fn standard() -> Self {
        const ENTRANCE: &str = "Dungeon Entrance";
        const HALL: &str = "Hall of Shadows";
        const ALCOVE: &str = "Resting Alcove";
        const TREASURY: &str = "Treasury";
        const BOSS: &str = "Boss Chamber";

        Self {
            start: Some(ENTRANCE.to_owned()),
            rooms: vec![
                RoomBlueprint::new(
                    ENTRANCE,
                    "A massive door opens onto a dark, damp corridor.",
                    RoomSpec::Combat,
                )
                .with_creatures(bestiary::GOBLIN, 1),
                RoomBlueprint::new(
                    HALL,
                    "Flickering torches dimly light the stone walls.",
                    RoomSpec::Combat,
                )
                .with_creatures(bestiary::SKELETON, 2),
                RoomBlueprint::new(
                    ALCOVE,
                    "A small alcove with an abandoned campfire.",
                    RoomSpec::Rest {
                        heal_amount: Some(40),
                        mana_restore: Some(30),
                    },
                ),
                RoomBlueprint::new(
                    TREASURY,
                    "Chests overflowing with riches glitter in the gloom.",
                    RoomSpec::Treasure { trap_damage: 15 },
                )
                .with_floor_item(ItemSpec::Weapon {
                    name: "Enchanted Sword".into(),
                    description: "A powerful magic blade".into(),
                    damage_bonus: 25,
                    weapon_type: "sword".into(),
                })
                .with_floor_item(ItemSpec::Armor {
                    name: "Plate Armor".into(),
                    description: "Heavy, sturdy armor".into(),
                    defense_bonus: 20,
                    armor_type: "heavy".into(),
                })
                .with_floor_item(ItemSpec::Potion {
                    name: "Major Potion".into(),
                    description: "Restores 100 HP".into(),
                    heal_amount: 100,
                }),
                RoomBlueprint::new(
                    BOSS,
                    "A vast circular hall. At its center, an imposing creature awaits...",
                    RoomSpec::Combat,
                )
                .with_creatures(bestiary::DRAGON, 1),
            ],
            passages: vec![
                Passage::new(ENTRANCE, Direction::North, HALL),
                Passage::new(HALL, Direction::East, ALCOVE),
                Passage::new(HALL, Direction::West, TREASURY),
                Passage::new(HALL, Direction::North, BOSS),
            ],
        }
    }

    /// Builds the dungeon.
    ///
    /// Creature identifiers the factory does not know are skipped with a
    /// warning; structural problems (duplicate names, dangling passages) fail.
    pub fn build(
        &self,
        factory: &(impl CreatureFactory + ?Sized),
        rest: &RestRules,
    ) -> Result<Dungeon, BlueprintError> {
        if self.rooms.is_empty() {
            return Err(BlueprintError::NoRooms);
        }

        let mut seen = HashSet::new();
        let mut dungeon = Dungeon::new();
        for blueprint in &self.rooms {
            if !seen.insert(blueprint.name.as_str()) {
                return Err(BlueprintError::DuplicateRoom(blueprint.name.clone()));
            }
            dungeon.add_room(build_room(blueprint, factory, rest));
        }

        for passage in &self.passages {
            let from = lookup(&dungeon, &passage.from)?;
            let to = lookup(&dungeon, &passage.to)?;
            if passage.one_way {
                dungeon.connect(from, passage.direction, to)?;
            } else {
                dungeon.connect_bidirectional(from, passage.direction, to)?;
            }
        }

        if let Some(start) = &self.start {
            let id = lookup(&dungeon, start)?;
            dungeon.set_start(id)?;
        }

        tracing::info!(
            rooms = dungeon.len(),
            passages = self.passages.len(),
            "dungeon built"
        );
        Ok(dungeon)
    }
}

fn build_room(
    blueprint: &RoomBlueprint,
    factory: &(impl CreatureFactory + ?Sized),
    rest: &RestRules,
) -> Room {
    let name = blueprint.name.as_str();
    let description = blueprint.description.as_str();
    let mut room = match blueprint.kind {
        RoomSpec::Combat => Room::combat(name, description),
        RoomSpec::Rest {
            heal_amount,
            mana_restore,
        } => Room::resting(
            name,
            description,
            heal_amount.unwrap_or(rest.heal_amount),
            mana_restore.unwrap_or(rest.mana_restore),
        ),
        RoomSpec::Treasure { trap_damage } => Room::treasure(name, description, trap_damage),
    };

    for type_id in &blueprint.creatures {
        match factory.create(type_id) {
            Ok(monster) => room.add_creature(monster),
            Err(err) => tracing::warn!(room = name, %err, "creature skipped"),
        }
    }
    room.drop_on_floor(blueprint.floor.iter().map(ItemSpec::to_item));
    room
}

fn lookup(dungeon: &Dungeon, name: &str) -> Result<RoomId, BlueprintError> {
    dungeon
        .find(name)
        .ok_or_else(|| BlueprintError::UnknownRoom(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bestiary::default_registry;
    use game_core::{CreatureRegistry, RoomKind};

    fn standard() -> Dungeon {
        DungeonBlueprint::standard()
            .build(&default_registry(), &RestRules::default())
            .unwrap()
    }

    #[test]
    fn standard_layout_is_wired_both_ways() {
        let dungeon = standard();
        let entrance = dungeon.start().unwrap();
        assert_eq!(dungeon.room(entrance).unwrap().name(), "Dungeon Entrance");

        let hall = dungeon.neighbor(entrance, Direction::North).unwrap();
        assert_eq!(dungeon.neighbor(hall, Direction::South), Some(entrance));
        for (direction, name) in [
            (Direction::East, "Resting Alcove"),
            (Direction::West, "Treasury"),
            (Direction::North, "Boss Chamber"),
        ] {
            let id = dungeon.neighbor(hall, direction).unwrap();
            assert_eq!(dungeon.room(id).unwrap().name(), name);
        }
    }

    #[test]
    fn standard_population() {
        let dungeon = standard();
        let count = |name: &str| {
            dungeon
                .room(dungeon.find(name).unwrap())
                .unwrap()
                .creatures()
                .len()
        };
        assert_eq!(count("Dungeon Entrance"), 1);
        assert_eq!(count("Hall of Shadows"), 2);
        assert_eq!(count("Boss Chamber"), 1);

        let treasury = dungeon.room(dungeon.find("Treasury").unwrap()).unwrap();
        assert_eq!(treasury.floor().len(), 3);
        assert!(matches!(
            treasury.kind(),
            RoomKind::Treasure {
                trapped: true,
                trap_damage: 15,
                ..
            }
        ));
    }

    #[test]
    fn unknown_creatures_are_skipped() {
        let blueprint = DungeonBlueprint {
            start: None,
            rooms: vec![
                RoomBlueprint::new("Pit", "", RoomSpec::Combat)
                    .with_creatures("kobold", 2)
                    .with_creatures(bestiary::SKELETON, 1),
            ],
            passages: Vec::new(),
        };
        let dungeon = blueprint
            .build(&default_registry(), &RestRules::default())
            .unwrap();
        assert_eq!(dungeon.room(RoomId(0)).unwrap().creatures().len(), 1);
    }

    #[test]
    fn rest_amounts_fall_back_to_rules() {
        let blueprint = DungeonBlueprint {
            start: None,
            rooms: vec![RoomBlueprint::new(
                "Camp",
                "",
                RoomSpec::Rest {
                    heal_amount: None,
                    mana_restore: Some(5),
                },
            )],
            passages: Vec::new(),
        };
        let rules = RestRules {
            heal_amount: 12,
            mana_restore: 99,
        };
        let dungeon = blueprint.build(&CreatureRegistry::new(), &rules).unwrap();
        assert!(matches!(
            dungeon.room(RoomId(0)).unwrap().kind(),
            RoomKind::Rest {
                heal_amount: 12,
                mana_restore: 5,
                used: false
            }
        ));
    }

    #[test]
    fn structural_errors_fail() {
        let mut blueprint = DungeonBlueprint::standard();
        blueprint.passages.push(Passage::new("Hall of Shadows", Direction::South, "Cellar"));
        assert_eq!(
            blueprint.build(&default_registry(), &RestRules::default()),
            Err(BlueprintError::UnknownRoom("Cellar".into()))
        );

        let mut blueprint = DungeonBlueprint::standard();
        blueprint.rooms.push(RoomBlueprint::new("Treasury", "", RoomSpec::Combat));
        assert_eq!(
            blueprint.build(&default_registry(), &RestRules::default()),
            Err(BlueprintError::DuplicateRoom("Treasury".into()))
        );

        let empty = DungeonBlueprint {
            start: None,
            rooms: Vec::new(),
            passages: Vec::new(),
        };
        assert_eq!(
            empty.build(&default_registry(), &RestRules::default()),
            Err(BlueprintError::NoRooms)
        );
    }
}
