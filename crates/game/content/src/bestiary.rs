//! Built-in creatures and their loot tables.
//!
//! | id         | tier   | HP  | ATK | level | defense | XP  |
//! |------------|--------|-----|-----|-------|---------|-----|
//! | `skeleton` | weak   | 50  | 8   | 1     | 0       | 10  |
//! | `goblin`   | medium | 75  | 12  | 2     | 0       | 50  |
//! | `dragon`   | boss   | 200 | 25  | 3     | 5       | 150 |

use game_core::{CreatureRegistry, CreatureStats, Item, LootTable, Monster, MonsterTier};

pub const SKELETON: &str = "skeleton";
pub const GOBLIN: &str = "goblin";
pub const DRAGON: &str = "dragon";

pub fn skeleton() -> Monster {
    let loot = LootTable::new()
        .with(
            Item::weapon("Rusty Sword", "An old blade worn by time", 8, "sword"),
            0.40,
        )
        .with(
            Item::weapon("Ancient Bow", "A worm-eaten wooden bow", 6, "bow"),
            0.30,
        )
        .with(
            Item::armor("Cracked Helmet", "A helmet in poor shape", 5, "head"),
            0.35,
        )
        .with(
            Item::armor("Chipped Shield", "A small battered shield", 4, "shield"),
            0.25,
        )
        .with(
            Item::potion("Small Health Potion", "Restores 20 HP", 20),
            0.50,
        )
        .with(Item::material("Bone", "Common crafting material", 1), 0.60)
        .with(Item::material("Bone Dust", "Faintly magical powder", 1), 0.45);

    Monster::new(
        SKELETON,
        CreatureStats::new("Skeleton", 50, 8),
        MonsterTier::Weak,
        10,
    )
    .with_loot_table(loot)
}

pub fn goblin() -> Monster {
    let loot = LootTable::new()
        .with(
            Item::weapon("Poisoned Dagger", "A dagger coated in poison", 15, "dagger"),
            0.50,
        )
        .with(
            Item::weapon("Studded Club", "A crude but dangerous club", 12, "club"),
            0.45,
        )
        .with(
            Item::armor("Reinforced Leather Vest", "Light yet sturdy", 12, "light"),
            0.40,
        )
        .with(
            Item::armor("Stolen Gloves", "Fine gloves of dubious origin", 8, "hands"),
            0.35,
        )
        .with(
            Item::weapon("War Axe", "A well-honed goblin axe", 18, "axe"),
            0.25,
        )
        .with(Item::potion("Health Potion", "Restores 50 HP", 50), 0.45)
        .with(
            Item::potion("Medium Health Potion", "Restores 35 HP", 35),
            0.40,
        )
        .with(Item::material("Goblin Hide", "Tough leather", 1), 0.50)
        .with(Item::material("Goblin Tooth", "Rare material", 1), 0.30);

    Monster::new(
        GOBLIN,
        CreatureStats::new("Goblin", 75, 12).with_level(2),
        MonsterTier::Medium,
        50,
    )
    .with_loot_table(loot)
}

pub fn dragon() -> Monster {
    let loot = LootTable::new()
        .with(
            Item::weapon("Dragon Fang", "A dagger forged from a dragon's tooth", 35, "dagger"),
            0.60,
        )
        .with(
            Item::weapon("Draconic Claw", "Sharp claws torn from the beast", 32, "claws"),
            0.45,
        )
        .with(
            Item::armor("Dragon Scales", "Legendary impenetrable armor", 40, "heavy"),
            0.50,
        )
        .with(
            Item::armor("Dragon Helm", "A helmet forged in flame", 28, "head"),
            0.35,
        )
        .with(
            Item::weapon("Eternal Breath", "A staff steeped in dragon essence", 40, "staff"),
            0.20,
        )
        .with(
            Item::potion("Dragon Elixir", "Fully restores health", u32::MAX),
            0.40,
        )
        .with(Item::potion("Dragon Blood", "Pure magical essence", 75), 0.30)
        .with(
            Item::material("Dragon Heart", "An extremely rare legendary material", 1),
            0.15,
        )
        .with(
            Item::material("Flame Crystal", "A gem infused with dragonfire", 1),
            0.25,
        );

    Monster::new(
        DRAGON,
        CreatureStats::new("Ancient Dragon", 200, 25)
            .with_level(3)
            .with_defense(5),
        MonsterTier::Boss,
        150,
    )
    .with_loot_table(loot)
}

/// Registry with every built-in creature.
pub fn default_registry() -> CreatureRegistry {
    CreatureRegistry::new()
        .with(SKELETON, skeleton)
        .with(GOBLIN, goblin)
        .with(DRAGON, dragon)
}
