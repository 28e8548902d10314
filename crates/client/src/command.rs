//! Player input parsing.
//!
//! Commands accept English and French words. Numbers typed by the player are
//! 1-based and converted to 0-based indices here.

use std::str::FromStr;

use game_core::{Direction, ErrorSeverity, GameError, LootSelection};

/// Reference to an inventory item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemRef {
    Index(usize),
    Name(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Look,
    Go(Direction),
    Attack(Option<usize>),
    Magic(Option<usize>),
    Use(ItemRef),
    Defend,
    Flee,
    Status,
    Inventory,
    Loot(LootSelection),
    Rest,
    Save,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("type a command (help lists them)")]
    Empty,

    #[error("unknown command: {0} (type help)")]
    Unknown(String),

    #[error("{command} needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("{command}: cannot understand '{value}'")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "COMMAND_EMPTY",
            Self::Unknown(_) => "COMMAND_UNKNOWN",
            Self::MissingArgument { .. } => "COMMAND_MISSING_ARGUMENT",
            Self::InvalidArgument { .. } => "COMMAND_INVALID_ARGUMENT",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Err(CommandError::Empty);
        }
        let arg = (!rest.is_empty()).then_some(rest);

        let command = match word.to_lowercase().as_str() {
            "look" | "l" | "regarder" | "voir" => Self::Look,
            "go" | "move" | "aller" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "go",
                    expected: "a direction",
                })?;
                Self::Go(value.parse().map_err(|_| CommandError::InvalidArgument {
                    command: "go",
                    value: value.to_owned(),
                })?)
            }
            "attack" | "a" | "attaquer" => Self::Attack(target("attack", arg)?),
            "magic" | "m" | "cast" | "magie" | "sort" => Self::Magic(target("magic", arg)?),
            "use" | "u" | "utiliser" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "use",
                    expected: "an item number or name",
                })?;
                Self::Use(match value.parse::<usize>() {
                    Ok(number) => ItemRef::Index(index("use", number, value)?),
                    Err(_) => ItemRef::Name(value.to_owned()),
                })
            }
            "defend" | "d" | "defendre" | "défendre" => Self::Defend,
            "flee" | "f" | "run" | "fuir" => Self::Flee,
            "status" | "stats" | "statut" | "etat" | "état" => Self::Status,
            "inventory" | "i" | "inv" | "inventaire" => Self::Inventory,
            "loot" | "take" | "ramasser" | "piller" => match arg {
                None | Some("all") | Some("tout") => Self::Loot(LootSelection::All),
                Some(value) => Self::Loot(LootSelection::Index(number("loot", value)?)),
            },
            "rest" | "repos" | "reposer" => Self::Rest,
            "save" | "sauvegarder" => Self::Save,
            "help" | "h" | "?" | "aide" => Self::Help,
            "quit" | "q" | "exit" | "quitter" => Self::Quit,
            other => match other.parse::<Direction>() {
                Ok(direction) if arg.is_none() => Self::Go(direction),
                _ => return Err(CommandError::Unknown(word.to_owned())),
            },
        };
        Ok(command)
    }
}

fn target(command: &'static str, arg: Option<&str>) -> Result<Option<usize>, CommandError> {
    arg.map(|value| number(command, value)).transpose()
}

fn number(command: &'static str, value: &str) -> Result<usize, CommandError> {
    let parsed = value
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidArgument {
            command,
            value: value.to_owned(),
        })?;
    index(command, parsed, value)
}

fn index(command: &'static str, number: usize, value: &str) -> Result<usize, CommandError> {
    number
        .checked_sub(1)
        .ok_or_else(|| CommandError::InvalidArgument {
            command,
            value: value.to_owned(),
        })
}

pub const HELP: &str = "\
Commands:
  look | l                 describe the room
  go <dir> | n s e w       move (north, south, east, west)
  attack | a [n]           attack enemy n
  magic | m [n]            cast a spell at enemy n (costs mana)
  use <n|name>             use an inventory item
  defend | d               halve the next hit you take
  flee | f                 try to escape the fight
  status                   show your character or the fight
  inventory | i            list your items
  loot [n|all]             pick up items from the floor
  rest                     recover in a rest room
  save                     save your character
  help | h                 this list
  quit | q                 leave the dungeon";
