//! Tests for the session state machine and its persistence.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_marks::{
    GameSetup, MemoryStore, MoveResult, Outcome, Player, PlayerKind, Record, RecordStore, Seat,
    Session, Symbol,
};

fn sym(text: &str) -> Symbol {
    Symbol::new(text).expect("valid symbol")
}

/// Two humans on a grid of the given size, X first.
fn humans(rows: usize, cols: usize) -> GameSetup {
    GameSetup::new(
        rows,
        cols,
        Player::human("Alice", sym("X")),
        Player::human("Bob", sym("O")),
        sym("X"),
    )
    .expect("valid setup")
}

fn play(session: &mut Session<MemoryStore>, positions: &[usize]) -> MoveResult {
    let mut last = MoveResult::Ignored;
    for &position in positions {
        last = session.apply_move(position);
        assert_ne!(last, MoveResult::Ignored, "move {} was rejected", position);
    }
    last
}

#[test]
fn test_turns_alternate() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    assert_eq!(session.current_player().name(), "Alice");
    assert_eq!(session.apply_move(1), MoveResult::Continued);
    assert_eq!(session.current_player().name(), "Bob");
    assert_eq!(session.apply_move(2), MoveResult::Continued);
    assert_eq!(session.current_player().name(), "Alice");
    assert_eq!(session.status_line(), "Turn: Alice (X)");
}

#[test]
fn test_second_player_can_start() {
    let setup = GameSetup::new(
        3,
        3,
        Player::human("Alice", sym("X")),
        Player::human("Bob", sym("O")),
        sym("O"),
    )
    .expect("valid setup");
    let session = Session::new(setup, MemoryStore::new());
    assert_eq!(session.current_seat(), Seat::B);
}

#[test]
fn test_illegal_move_keeps_turn() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    session.apply_move(5);
    let grid_before = session.grid().clone();

    assert_eq!(session.apply_move(5), MoveResult::Ignored);
    assert_eq!(session.apply_move(0), MoveResult::Ignored);
    assert_eq!(session.apply_move(10), MoveResult::Ignored);

    assert_eq!(session.grid(), &grid_before);
    assert_eq!(session.current_player().name(), "Bob");
    assert_eq!(session.store().save_count(), 1);
}

#[test]
fn test_top_row_wins() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    // X: 1, 2, 3; O: 4, 5
    assert_eq!(play(&mut session, &[1, 4, 2, 5, 3]), MoveResult::Won);
    assert_eq!(session.outcome(), Outcome::Won(Seat::A));
    assert_eq!(session.winner().map(Player::name), Some("Alice"));
    assert_eq!(session.status_line(), "Alice wins!");
}

#[test]
fn test_classic_draw() {
    // X O X / X O O / O X X
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    let result = play(&mut session, &[1, 2, 3, 5, 4, 6, 8, 7, 9]);
    assert_eq!(result, MoveResult::Drawn);
    assert_eq!(session.outcome(), Outcome::Drawn);
    assert!(session.winner().is_none());
    assert_eq!(session.status_line(), "Draw!");
}

#[test]
fn test_terminal_session_rejects_moves() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    play(&mut session, &[1, 4, 2, 5, 3]);
    let grid_before = session.grid().clone();
    let saves_before = session.store().save_count();

    assert_eq!(session.apply_move(9), MoveResult::Ignored);
    assert_eq!(session.grid(), &grid_before);
    assert_eq!(session.outcome(), Outcome::Won(Seat::A));
    assert_eq!(session.store().save_count(), saves_before);
}

#[test]
fn test_terminal_move_is_not_saved() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    play(&mut session, &[1, 4, 2, 5]);
    let saved = session.store().contents().map(str::to_string);
    assert_eq!(session.apply_move(3), MoveResult::Won);
    assert_eq!(session.store().contents().map(str::to_string), saved);
}

#[test]
fn test_persisted_record_round_trips() {
    let mut session = Session::new(humans(2, 4), MemoryStore::new());
    play(&mut session, &[1, 6, 3]);

    let store = MemoryStore::with_contents(
        session
            .store()
            .contents()
            .expect("session saved")
            .to_string(),
    );
    let resumed = Session::resume(humans(3, 3), store);

    assert_eq!(resumed.grid(), session.grid());
    assert_eq!(resumed.player_a(), session.player_a());
    assert_eq!(resumed.player_b(), session.player_b());
    assert_eq!(resumed.current_player().symbol(), session.current_player().symbol());
    assert_eq!(resumed.outcome(), Outcome::InProgress);
}

#[test]
fn test_resumed_bot_keeps_its_turn() {
    let mut session = Session::new(GameSetup::default(), MemoryStore::new());
    assert_eq!(session.apply_move(5), MoveResult::Continued);
    assert!(session.awaiting_automated());

    let store = MemoryStore::with_contents(
        session
            .store()
            .contents()
            .expect("session saved")
            .to_string(),
    );
    let mut resumed = Session::resume(humans(3, 3), store);

    assert_eq!(resumed.player_b().kind(), PlayerKind::Automated);
    assert_eq!(resumed.player_b(), session.player_b());
    assert!(resumed.awaiting_automated());

    let mut rng = StdRng::seed_from_u64(11);
    assert_eq!(resumed.play_automated(&mut rng), MoveResult::Continued);
    assert_eq!(resumed.grid().legal_positions().len(), 7);
}

#[test]
fn test_resume_without_record_starts_fresh() {
    let session = Session::resume(humans(4, 4), MemoryStore::new());
    assert_eq!(session.grid().len(), 16);
    assert_eq!(session.current_player().name(), "Alice");
}

#[test]
fn test_resume_corrupt_record_starts_fresh_and_discards() {
    let session = Session::resume(humans(3, 3), MemoryStore::with_contents("{ not json"));
    assert_eq!(session.grid().legal_positions().len(), 9);
    assert!(!session.store().exists());
}

#[test]
fn test_resume_recomputes_terminal_outcome() {
    let record = Record {
        y_size: 1,
        x_size: 3,
        grid: vec![vec!["O".into(), "O".into(), "O".into()]],
        player1: strictly_marks::PlayerRecord {
            name: "Alice".into(),
            symbol: "X".into(),
            kind: Default::default(),
        },
        player2: strictly_marks::PlayerRecord {
            name: "Bob".into(),
            symbol: "O".into(),
            kind: Default::default(),
        },
        current_player: "X".into(),
    };
    let store = MemoryStore::with_contents(record.to_json().expect("serializable"));
    let session = Session::resume(humans(3, 3), store);
    assert_eq!(session.outcome(), Outcome::Won(Seat::B));
    assert!(session.is_over());
}

#[test]
fn test_new_session_discards_record() {
    let mut first = Session::new(humans(3, 3), MemoryStore::new());
    first.apply_move(1);
    let contents = first.store().contents().expect("saved").to_string();

    let session = Session::new(humans(3, 3), MemoryStore::with_contents(contents));
    assert!(!session.store().exists());
    assert_eq!(session.grid().legal_positions().len(), 9);
}

#[test]
fn test_restart_resets_to_setup() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    play(&mut session, &[1, 4, 2, 5, 3]);
    session.restart();
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.grid().legal_positions().len(), 9);
    assert_eq!(session.current_player().name(), "Alice");
    assert!(!session.store().exists());
}

#[test]
fn test_write_failure_is_not_fatal() {
    let mut session = Session::new(humans(3, 3), MemoryStore::failing());
    assert_eq!(session.apply_move(1), MoveResult::Continued);
    assert!(session.last_persist_failed());
    assert_eq!(session.apply_move(2), MoveResult::Continued);
    assert_eq!(session.current_player().name(), "Alice");
}

#[test]
fn test_automated_player_moves_when_polled() {
    let mut session = Session::new(GameSetup::default(), MemoryStore::new());
    let mut rng = StdRng::seed_from_u64(3);

    // Human to move: polling does nothing.
    assert!(!session.awaiting_automated());
    assert_eq!(session.play_automated(&mut rng), MoveResult::Ignored);

    assert_eq!(session.apply_move(5), MoveResult::Continued);
    assert!(session.awaiting_automated());
    assert_eq!(session.play_automated(&mut rng), MoveResult::Continued);
    assert_eq!(session.grid().legal_positions().len(), 7);
    assert!(!session.awaiting_automated());
}

#[test]
fn test_automated_player_takes_last_cell() {
    let setup = GameSetup::new(
        3,
        3,
        Player::automated("Bot", sym("X")),
        Player::human("Alice", sym("O")),
        sym("X"),
    )
    .expect("valid setup");
    let mut session = Session::new(setup, MemoryStore::new());
    // X O X / X O O / O X _ leaves only position 9, with the bot to move.
    play(&mut session, &[1, 2, 3, 5, 4, 6, 8, 7]);
    assert!(session.awaiting_automated());
    assert_eq!(session.grid().legal_positions(), vec![9]);

    let mut rng = StdRng::seed_from_u64(99);
    assert_eq!(session.play_automated(&mut rng), MoveResult::Drawn);
    assert!(session.grid().is_full());
}

#[test]
fn test_two_bots_finish_a_game() {
    let setup = GameSetup::new(
        4,
        5,
        Player::automated("Left", sym("L")),
        Player::automated("Right", sym("R")),
        sym("L"),
    )
    .expect("valid setup");
    let mut session = Session::new(setup, MemoryStore::new());
    let mut rng = StdRng::seed_from_u64(2024);

    let mut moves = 0;
    while session.awaiting_automated() {
        assert_ne!(session.play_automated(&mut rng), MoveResult::Ignored);
        moves += 1;
        assert!(moves <= 20);
    }
    assert!(session.is_over());
}

#[test]
fn test_to_record_matches_store() {
    let mut session = Session::new(humans(3, 3), MemoryStore::new());
    play(&mut session, &[9, 1]);
    let stored = match session.store().load() {
        strictly_marks::Loaded::Found(record) => record,
        other => panic!("expected stored record, got {:?}", other),
    };
    assert_eq!(stored, session.to_record());
    assert_eq!(stored.current_player, "X");
}
