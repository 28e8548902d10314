//! Item variants.
//!
//! Items are plain values owned by exactly one container at a time (a player's
//! inventory, a monster's loot holding area or a room floor). Moving an item is
//! always a move of the value, never a clone.
//!
//! Serialized items carry a `"type"` discriminant followed by the variant
//! payload, e.g. `{"type":"potion","name":..,"heal_amount":30,"consumed":false}`.

/// Discriminant of [`Item`], used for filtering and display.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Potion,
    Weapon,
    Armor,
    Material,
}

/// Single-use healing item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    pub name: String,
    pub description: String,
    pub heal_amount: u32,
    pub consumed: bool,
}

/// Equippable item raising attack power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub description: String,
    pub damage_bonus: u32,
    pub weapon_type: String,
    pub equipped: bool,
}

/// Equippable item raising defense.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub description: String,
    pub defense_bonus: u32,
    pub armor_type: String,
    pub equipped: bool,
}

/// Crafting material stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub name: String,
    pub description: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Item {
    Potion(Potion),
    Weapon(Weapon),
    Armor(Armor),
    Material(Material),
}

impl Item {
    pub fn potion(name: impl Into<String>, description: impl Into<String>, heal_amount: u32) -> Self {
        Self::Potion(Potion {
            name: name.into(),
            description: description.into(),
            heal_amount,
            consumed: false,
        })
    }

    pub fn weapon(
        name: impl Into<String>,
        description: impl Into<String>,
        damage_bonus: u32,
        weapon_type: impl Into<String>,
    ) -> Self {
        Self::Weapon(Weapon {
            name: name.into(),
            description: description.into(),
            damage_bonus,
            weapon_type: weapon_type.into(),
            equipped: false,
        })
    }

    pub fn armor(
        name: impl Into<String>,
        description: impl Into<String>,
        defense_bonus: u32,
        armor_type: impl Into<String>,
    ) -> Self {
        Self::Armor(Armor {
            name: name.into(),
            description: description.into(),
            defense_bonus,
            armor_type: armor_type.into(),
            equipped: false,
        })
    }

    pub fn material(name: impl Into<String>, description: impl Into<String>, quantity: u32) -> Self {
        Self::Material(Material {
            name: name.into(),
            description: description.into(),
            quantity,
        })
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Potion(_) => ItemKind::Potion,
            Self::Weapon(_) => ItemKind::Weapon,
            Self::Armor(_) => ItemKind::Armor,
            Self::Material(_) => ItemKind::Material,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Potion(p) => &p.name,
            Self::Weapon(w) => &w.name,
            Self::Armor(a) => &a.name,
            Self::Material(m) => &m.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Potion(p) => &p.description,
            Self::Weapon(w) => &w.description,
            Self::Armor(a) => &a.description,
            Self::Material(m) => &m.description,
        }
    }

    pub fn is_equipped(&self) -> bool {
        match self {
            Self::Weapon(w) => w.equipped,
            Self::Armor(a) => a.equipped,
            Self::Potion(_) | Self::Material(_) => false,
        }
    }

    /// Attack bonus contributed while equipped.
    pub fn active_damage_bonus(&self) -> u32 {
        match self {
            Self::Weapon(w) if w.equipped => w.damage_bonus,
            _ => 0,
        }
    }

    /// Defense bonus contributed while equipped.
    pub fn active_defense_bonus(&self) -> u32 {
        match self {
            Self::Armor(a) if a.equipped => a.defense_bonus,
            _ => 0,
        }
    }

    /// Case-insensitive substring match on the item name.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name().to_lowercase().contains(&query.to_lowercase())
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Potion(p) if p.consumed => write!(f, "{} (consumed)", p.name),
            Self::Potion(p) => write!(f, "{} (+{} HP)", p.name, p.heal_amount),
            Self::Weapon(w) => {
                write!(f, "{} ({}, +{} ATK)", w.name, w.weapon_type, w.damage_bonus)?;
                if w.equipped {
                    f.write_str(" [equipped]")?;
                }
                Ok(())
            }
            Self::Armor(a) => {
                write!(f, "{} ({}, +{} DEF)", a.name, a.armor_type, a.defense_bonus)?;
                if a.equipped {
                    f.write_str(" [equipped]")?;
                }
                Ok(())
            }
            Self::Material(m) => write!(f, "{} x{}", m.name, m.quantity),
        }
    }
}
