use std::io::Cursor;
use std::path::Path;

use dungeon_client::{App, Content};
use game_content::{DungeonBlueprint, ItemSpec, RoomBlueprint, RoomSpec, default_registry};
use game_core::{GameConfig, SessionStatus};
use runtime::{
    AUTOSAVE_SLOT, FileSaveRepository, InMemorySaveRepository, PLAYER_SLOT, SaveRepository,
};

fn play(script: &str, content: Content, saves: Box<dyn SaveRepository>) -> (SessionStatus, String) {
    let mut output = Vec::new();
    let status = App::new(Cursor::new(script.to_owned()), &mut output, content, saves, 42)
        .run()
        .expect("console I/O should not fail");
    (status, String::from_utf8(output).expect("utf-8 output"))
}

/// One skeleton, nothing else.
fn crypt() -> Content {
    crypt_with(
        RoomBlueprint::new("Crypt", "Bones everywhere.", RoomSpec::Combat)
            .with_creatures("skeleton", 1),
    )
}

fn crypt_with(room: RoomBlueprint) -> Content {
    let config = GameConfig::default();
    let blueprint = DungeonBlueprint {
        start: None,
        rooms: vec![room],
        passages: Vec::new(),
    };
    let dungeon = blueprint
        .build(&default_registry(), &config.rest)
        .expect("crypt builds");
    Content { config, dungeon }
}

#[test]
fn help_unknown_and_blocked_exit_then_quit() {
    let script = "1\nConan\nwarrior\nhelp\ndance\nnorth\nquit\n";
    let (status, out) = play(
        script,
        Content::builtin().unwrap(),
        Box::new(InMemorySaveRepository::new()),
    );

    println!("{out}");
    assert_eq!(status, SessionStatus::PlayerQuit);
    assert!(out.contains("Conan the warrior enters the dungeon."));
    assert!(out.contains("You discover Dungeon Entrance."));
    assert!(out.contains("Commands:"));
    assert!(out.contains("unknown command: dance"));
    assert!(out.contains("enemies block your way"));
    assert!(out.trim_end().ends_with("Farewell, adventurer."));
}

#[test]
fn end_of_input_quits_at_any_prompt() {
    for script in ["", "1\n", "1\nConan\n", "1\nConan\nwarrior\n"] {
        let (status, _) = play(
            script,
            Content::builtin().unwrap(),
            Box::new(InMemorySaveRepository::new()),
        );
        assert_eq!(status, SessionStatus::PlayerQuit, "script {script:?}");
    }
}

#[test]
fn class_prompt_repeats_and_name_defaults() {
    let (_, out) = play(
        "7\n1\n\nbard\nMAGE\nstatus\nquit\n",
        Content::builtin().unwrap(),
        Box::new(InMemorySaveRepository::new()),
    );
    assert!(out.contains("Please choose 1 or 2."));
    assert!(out.contains("Unknown class 'bard'."));
    assert!(out.contains("Hero the mage enters the dungeon."));
    assert!(out.contains("Mana 100/100"));
}

#[test]
fn loading_without_a_save_starts_a_new_game() {
    let (status, out) = play(
        "2\nMerlin\nmage\nq\n",
        Content::builtin().unwrap(),
        Box::new(InMemorySaveRepository::new()),
    );
    assert_eq!(status, SessionStatus::PlayerQuit);
    assert!(out.contains("No saved game found."));
    assert!(out.contains("Merlin the mage enters the dungeon."));
}

#[test]
fn saved_player_is_loaded_in_the_next_run() {
    let dir = tempfile::tempdir().unwrap();

    let (_, out) = play(
        "1\nConan\nwarrior\nsave\nquit\n",
        Content::builtin().unwrap(),
        Box::new(FileSaveRepository::new(dir.path()).unwrap()),
    );
    assert!(out.contains("Game saved."));

    let saves = FileSaveRepository::new(dir.path()).unwrap();
    assert!(saves.exists(PLAYER_SLOT));
    assert!(!saves.exists(AUTOSAVE_SLOT));

    let (status, out) = play(
        "2\ninventory\nquit\n",
        Content::builtin().unwrap(),
        Box::new(saves),
    );
    assert_eq!(status, SessionStatus::PlayerQuit);
    assert!(out.contains("Welcome back, Conan (level 1)."));
    assert!(out.contains("Inventory (2/20):"));
}

#[test]
fn corrupt_save_falls_back_to_a_new_game() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("player.json"), "{ not json").unwrap();

    let (_, out) = play(
        "2\nConan\nwarrior\nquit\n",
        Content::builtin().unwrap(),
        Box::new(FileSaveRepository::new(dir.path()).unwrap()),
    );
    assert!(out.contains("could not be read"));
    assert!(out.contains("Conan the warrior enters the dungeon."));
}

#[test]
fn clearing_the_last_room_autosaves_and_completes() {
    let dir = tempfile::tempdir().unwrap();
    let mut script = String::from("1\nConan\nwarrior\nuse lantern\n");
    script.push_str(&"attack\n".repeat(12));

    let (status, out) = play(
        &script,
        crypt(),
        Box::new(FileSaveRepository::new(dir.path()).unwrap()),
    );

    println!("{out}");
    assert_eq!(status, SessionStatus::DungeonCompleted);
    assert!(out.contains("You carry nothing like that."));
    assert!(out.contains("Victory after"));
    assert!(out.trim_end().ends_with("You have conquered the dungeon!"));

    let saves = FileSaveRepository::new(dir.path()).unwrap();
    let player = saves
        .load_player(AUTOSAVE_SLOT)
        .unwrap()
        .expect("autosave written after the victory");
    assert_eq!(player.progression().experience(), 10);
}

#[test]
fn content_loads_shipped_data_or_falls_back() {
    let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    let content = Content::load(&shipped).expect("shipped content loads");
    assert_eq!(content.dungeon.len(), 5);

    let fallback = Content::load_or_builtin(Some(Path::new("/nonexistent/dungeon-data"))).unwrap();
    assert_eq!(fallback.config, GameConfig::default());
    assert_eq!(fallback.dungeon, content.dungeon);
}

#[test]
fn spoils_can_be_looted_after_the_final_victory() {
    let room = RoomBlueprint::new("Crypt", "Bones everywhere.", RoomSpec::Combat)
        .with_creatures("skeleton", 1)
        .with_floor_item(ItemSpec::Material {
            name: "Golden Idol".into(),
            description: "Heavy and cold.".into(),
            quantity: 1,
        });
    let mut script = String::from("1\nConan\nwarrior\nloot\n");
    script.push_str(&"attack\n".repeat(12));
    script.push_str("loot all\nlook\n");

    let (status, out) = play(
        &script,
        crypt_with(room),
        Box::new(InMemorySaveRepository::new()),
    );

    println!("{out}");
    assert_eq!(status, SessionStatus::DungeonCompleted);
    assert!(out.contains("Spoils remain here"));
    assert!(out.contains("You pick up Golden Idol."));
    // The loop ends once the floor is empty, before `look` is read.
    assert!(out.trim_end().ends_with("You have conquered the dungeon!"));
}
