//! Text rendering of narration events and views.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use game_core::{GameEvent, Player, RoomView, StatusView};

/// Prints events in order, pausing `pacing` before each enemy action.
pub fn write_events(
    out: &mut impl Write,
    events: &[GameEvent],
    pacing: Duration,
) -> io::Result<()> {
    for event in events {
        if event.is_enemy_action() && !pacing.is_zero() {
            out.flush()?;
            thread::sleep(pacing);
        }
        match event {
            GameEvent::RoomDescribed(view) => write_room(out, view)?,
            GameEvent::PlayerStatus(view) => write_status(out, view)?,
            GameEvent::CombatStatus { mana, enemies, .. } => {
                writeln!(out, "{event}")?;
                if let Some((current, max)) = mana {
                    writeln!(out, "  Mana {current}/{max}")?;
                }
                for (number, enemy) in enemies.iter().enumerate() {
                    writeln!(
                        out,
                        "  {}. {} (level {}) {}/{} HP",
                        number + 1,
                        enemy.name,
                        enemy.level,
                        enemy.health,
                        enemy.max_health
                    )?;
                }
            }
            GameEvent::LootDropped { enemy, items } => {
                writeln!(out, "{enemy} dropped:")?;
                for item in items {
                    writeln!(out, "  - {item}")?;
                }
            }
            _ => writeln!(out, "{event}")?,
        }
    }
    Ok(())
}

pub fn write_room(out: &mut impl Write, view: &RoomView) -> io::Result<()> {
    writeln!(out, "== {} ==", view.name)?;
    writeln!(out, "{}", view.description)?;

    if !view.enemies.is_empty() {
        writeln!(out, "Enemies:")?;
        for (number, enemy) in view.enemies.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} (level {}) {}/{} HP",
                number + 1,
                enemy.name,
                enemy.level,
                enemy.health,
                enemy.max_health
            )?;
        }
    } else if view.cleared {
        writeln!(out, "The room is quiet.")?;
    }

    if !view.floor.is_empty() {
        writeln!(out, "On the floor:")?;
        for (number, item) in view.floor.iter().enumerate() {
            writeln!(out, "  {}. {item}", number + 1)?;
        }
    }

    let exits: Vec<String> = view.exits.iter().map(ToString::to_string).collect();
    if exits.is_empty() {
        writeln!(out, "There is no way out.")
    } else {
        writeln!(out, "Exits: {}", exits.join(", "))
    }
}

pub fn write_status(out: &mut impl Write, view: &StatusView) -> io::Result<()> {
    writeln!(out, "{} - level {}", view.name, view.level)?;
    writeln!(
        out,
        "  HP      {}/{} ({}%)",
        view.health, view.max_health, view.health_percent
    )?;
    if let Some((current, max)) = view.mana {
        writeln!(out, "  Mana    {current}/{max}")?;
    }
    writeln!(out, "  Attack  {}", view.attack)?;
    writeln!(out, "  Defense {}", view.defense)?;
    writeln!(
        out,
        "  XP      {}/{}",
        view.experience, view.experience_to_next_level
    )?;
    writeln!(
        out,
        "  Items   {}/{}",
        view.inventory.len(),
        view.inventory_size
    )
}

pub fn write_inventory(out: &mut impl Write, player: &Player) -> io::Result<()> {
    let inventory = player.inventory();
    writeln!(
        out,
        "Inventory ({}/{}):",
        inventory.len(),
        inventory.capacity()
    )?;
    if inventory.is_empty() {
        return writeln!(out, "  (empty)");
    }
    for (number, item) in inventory.items().iter().enumerate() {
        writeln!(out, "  {}. {item}", number + 1)?;
    }
    Ok(())
}
