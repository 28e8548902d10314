//! Interactive read/print loop around a [`GameSession`].
//!
//! # Architecture
//!
//! ```text
//! input line ─→ Command::from_str ─→ GameSession op ─→ Vec<GameEvent> ─→ render
//! ```
//!
//! The app never decides game outcomes; it only translates text to session
//! operations and events back to text. Input and output are generic so the
//! whole loop can be driven from a script in tests.

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use game_content::{ContentFactory, DungeonBlueprint, default_registry};
use game_core::{
    Archetype, Combatant, Dungeon, GameConfig, GameError, GameEvent, GameSession, Player,
    SeededRolls, SessionError, SessionStatus,
};
use runtime::{AUTOSAVE_SLOT, PLAYER_SLOT, SaveRepository};

use crate::command::{Command, HELP, ItemRef};
use crate::render;

/// Balance rules and the dungeon to play.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub dungeon: Dungeon,
}

impl Content {
    /// Built-in rules and the standard layout.
    pub fn builtin() -> Result<Self> {
        let config = GameConfig::default();
        let dungeon = DungeonBlueprint::standard()
            .build(&default_registry(), &config.rest)
            .context("built-in dungeon is invalid")?;
        Ok(Self { config, dungeon })
    }

    /// Loads content from `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let factory = ContentFactory::new(data_dir);
        let config = factory.load_config()?;
        let dungeon = factory.build_dungeon(&default_registry(), &config)?;
        Ok(Self { config, dungeon })
    }

    /// Loads from `data_dir` when given, falling back to built-in content.
    pub fn load_or_builtin(data_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = data_dir {
            match Self::load(dir) {
                Ok(content) => return Ok(content),
                Err(err) => tracing::warn!(
                    dir = %dir.display(),
                    "content unavailable, using built-in content: {err:#}"
                ),
            }
        }
        Self::builtin()
    }
}

pub struct App<I, O> {
    input: I,
    output: O,
    content: Content,
    saves: Box<dyn SaveRepository>,
    seed: u64,
    pacing: Duration,
}

impl<I: BufRead, O: Write> App<I, O> {
    pub fn new(
        input: I,
        output: O,
        content: Content,
        saves: Box<dyn SaveRepository>,
        seed: u64,
    ) -> Self {
        Self {
            input,
            output,
            content,
            saves,
            seed,
            pacing: Duration::ZERO,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Runs the start menu and the game loop until a terminal state.
    ///
    /// End of input counts as quitting.
    pub fn run(mut self) -> Result<SessionStatus> {
        writeln!(self.output, "=== DUNGEON ===")?;
        let Some(player) = self.choose_player()? else {
            return Ok(SessionStatus::PlayerQuit);
        };

        tracing::info!(player = player.name(), seed = self.seed, "game starting");
        let mut session = GameSession::new(
            player,
            self.content.dungeon.clone(),
            self.content.config.clone(),
            SeededRolls::new(self.seed),
        )?;
        let events = session.begin()?;
        render::write_events(&mut self.output, &events, self.pacing)?;
        self.play(&mut session)
    }

    fn play(&mut self, session: &mut GameSession) -> Result<SessionStatus> {
        while session.accepts_commands() {
            let Some(line) = self.read_line("> ")? else {
                session.quit()?;
                break;
            };
            let command = match Command::from_str(&line) {
                Ok(command) => command,
                Err(err) => {
                    tracing::debug!(code = err.error_code(), "unparsed input");
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            tracing::debug!(?command, "command");

            match self.execute(session, command)? {
                Ok(events) => {
                    render::write_events(&mut self.output, &events, self.pacing)?;
                    if events
                        .iter()
                        .any(|event| matches!(event, GameEvent::EncounterWon { .. }))
                    {
                        self.autosave(session.player());
                    }
                    if session.spoils_pending() {
                        writeln!(self.output, "Spoils remain here: loot them, or quit to leave.")?;
                    }
                }
                Err(err) => {
                    tracing::debug!(
                        %err,
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        "command refused"
                    );
                    writeln!(self.output, "{err}")?;
                }
            }
        }

        let status = session.status();
        let farewell = match status {
            SessionStatus::PlayerDied => "Game over.",
            SessionStatus::DungeonCompleted => "You have conquered the dungeon!",
            SessionStatus::PlayerQuit | SessionStatus::InProgress => "Farewell, adventurer.",
        };
        writeln!(self.output, "{farewell}")?;
        tracing::info!(%status, "game ended");
        Ok(status)
    }

    /// Outer error: the console failed. Inner error: the move was refused.
    fn execute(
        &mut self,
        session: &mut GameSession,
        command: Command,
    ) -> Result<Result<Vec<GameEvent>, SessionError>> {
        let result = match command {
            Command::Look => session.look(),
            Command::Go(direction) => session.move_to(direction),
            Command::Attack(target) => session.attack(target),
            Command::Magic(target) => session.cast_magic(target),
            Command::Use(item) => {
                let index = match item {
                    ItemRef::Index(index) => Some(index),
                    ItemRef::Name(name) => session.player().inventory().position_by_name(&name),
                };
                match index {
                    Some(index) => session.use_item(index),
                    None => {
                        writeln!(self.output, "You carry nothing like that.")?;
                        Ok(Vec::new())
                    }
                }
            }
            Command::Defend => session.defend(),
            Command::Flee => session.flee(),
            Command::Status => session.status_report(),
            Command::Inventory => {
                render::write_inventory(&mut self.output, session.player())?;
                Ok(Vec::new())
            }
            Command::Loot(selection) => session.loot(selection),
            Command::Rest => session.rest(),
            Command::Save => {
                match self.saves.save_player(PLAYER_SLOT, session.player()) {
                    Ok(()) => writeln!(self.output, "Game saved.")?,
                    Err(err) => {
                        tracing::error!(%err, code = err.error_code(), "save failed");
                        writeln!(self.output, "Could not save: {err}")?;
                    }
                }
                Ok(Vec::new())
            }
            Command::Help => {
                writeln!(self.output, "{HELP}")?;
                Ok(Vec::new())
            }
            Command::Quit => session.quit(),
        };
        Ok(result)
    }

    fn autosave(&self, player: &Player) {
        if let Err(err) = self.saves.save_player(AUTOSAVE_SLOT, player) {
            tracing::error!(%err, "autosave failed");
        }
    }

    fn choose_player(&mut self) -> Result<Option<Player>> {
        loop {
            writeln!(self.output, "1. New game")?;
            writeln!(self.output, "2. Load game")?;
            let Some(choice) = self.read_line("Choice: ")? else {
                return Ok(None);
            };
            match choice.as_str() {
                "1" | "new" | "nouveau" => return self.new_player(),
                "2" | "load" | "charger" => {
                    if let Some(player) = self.load_player()? {
                        return Ok(Some(player));
                    }
                    return self.new_player();
                }
                _ => writeln!(self.output, "Please choose 1 or 2.")?,
            }
        }
    }

    /// Loads the saved player; any failure falls back to a new game.
    fn load_player(&mut self) -> Result<Option<Player>> {
        match self.saves.load_player(PLAYER_SLOT) {
            Ok(Some(player)) => {
                writeln!(
                    self.output,
                    "Welcome back, {} (level {}).",
                    player.name(),
                    player.level()
                )?;
                Ok(Some(player))
            }
            Ok(None) => {
                writeln!(self.output, "No saved game found. Starting a new one.")?;
                Ok(None)
            }
            Err(err) => {
                tracing::error!(
                    %err,
                    code = err.error_code(),
                    recoverable = err.severity().is_recoverable(),
                    "cannot load saved game"
                );
                writeln!(
                    self.output,
                    "The saved game could not be read ({err}). Starting a new one."
                )?;
                Ok(None)
            }
        }
    }

    fn new_player(&mut self) -> Result<Option<Player>> {
        let Some(name) = self.read_line("Your name: ")? else {
            return Ok(None);
        };
        let name = if name.is_empty() { "Hero".to_owned() } else { name };

        loop {
            let Some(class) = self.read_line("Class (warrior/mage): ")? else {
                return Ok(None);
            };
            match Archetype::from_str(&class) {
                Ok(archetype) => {
                    let player = archetype.create(name, &self.content.config);
                    writeln!(
                        self.output,
                        "{} the {archetype} enters the dungeon.",
                        player.name()
                    )?;
                    return Ok(Some(player));
                }
                Err(_) => writeln!(self.output, "Unknown class '{class}'.")?,
            }
        }
    }

    /// Prompts and reads one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}
