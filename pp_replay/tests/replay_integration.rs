/// Integration tests for replaying script files
use std::path::Path;

use pokerlib::{
    game::round::RoundError,
    table::{TableError, TableEvent},
};
use pp_replay::{Script, ScriptError, replay};

fn script_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts").join(name)
}

#[test]
fn test_three_handed_script() {
    let script = Script::from_path(&script_path("three_handed.json")).unwrap();
    assert_eq!(script.config.table_id, 7);
    assert_eq!(script.decks.len(), 1);

    let replay = replay(script).unwrap();

    // Bob's second call came while carol was to act.
    assert_eq!(replay.rejections.len(), 1);
    assert_eq!(replay.rejections[0].index, 3);
    assert_eq!(replay.rejections[0].error, TableError::Round(RoundError::OutOfTurn));

    let events: Vec<&TableEvent> = replay.notifications.iter().filter_map(|n| n.broadcast()).collect();
    assert!(events.contains(&&TableEvent::PotAwarded {
        tier: 0,
        amount: 70,
        winners: vec![1],
    }));
    assert_eq!(
        events.last(),
        Some(&&TableEvent::PlayerLeft {
            player: 3,
            seat: 2,
            stack: 140,
        })
    );

    let stacks: Vec<_> = replay.table.players().map(|p| (p.id, p.stack)).collect();
    assert_eq!(stacks, vec![(1, 190), (2, 120)]);
}

#[test]
fn test_missing_script() {
    assert!(matches!(
        Script::from_path(&script_path("missing.json")),
        Err(ScriptError::Io(_))
    ));
}

#[test]
fn test_malformed_script() {
    assert!(matches!(
        Script::from_reader(r#"{"players": [{"id": "one"}]}"#.as_bytes()),
        Err(ScriptError::Parse(_))
    ));
}
