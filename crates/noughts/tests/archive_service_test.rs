//! Tests for sessions, replay and summaries against a real database.

use tempfile::NamedTempFile;

use noughts::{ArchiveService, MatchRepository, MatchResult};
use noughts_engine::{Board, Cell, Difficulty, GameOutcome, Side};

fn setup_archive() -> (NamedTempFile, ArchiveService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = MatchRepository::open(db_path).expect("Failed to open repository");
    (db_file, ArchiveService::new(repo))
}

#[test]
fn test_session_game_replays_move_by_move() {
    let (_db, archive) = setup_archive();
    let mut session = archive.start_session(Difficulty::Hard, Side::X);
    let game_id = session.game_id().expect("Match should be recorded");

    // Human always takes the lowest free cell.
    while !session.game().is_over() {
        if session.is_human_turn() {
            let index = session.game().board().legal_moves()[0];
            session.human_move(index).expect("legal");
        } else {
            session.computer_move().expect("computer move");
        }
    }
    let history = session.game().history().to_vec();

    let frames = archive.replay(game_id).expect("Replay failed");
    assert_eq!(frames.len(), history.len() + 1);
    assert_eq!(frames[0].board(), &Board::new());
    assert_eq!(*frames[0].side(), None);

    for (i, frame) in frames.iter().enumerate().skip(1) {
        assert_eq!(*frame.move_number(), i as i32);
        assert_eq!(*frame.cell(), Some(history[i - 1]));
        let side = if i % 2 == 1 { Side::X } else { Side::O };
        assert_eq!(*frame.side(), Some(side));
        assert_eq!(frame.board().get(history[i - 1]), Some(Cell::Occupied(side)));
    }
    let last = frames.last().expect("frames");
    assert_eq!(last.board(), session.game().board());

    // Minimax never loses, so the human cannot have won.
    let stored = archive
        .repository()
        .get_game(game_id)
        .expect("Query failed")
        .expect("Game missing");
    let result = stored.result().expect("Parse failed");
    assert!(matches!(result, Some(MatchResult::Won(Side::O)) | Some(MatchResult::Tie)));
    assert_eq!(MatchResult::from_outcome(session.game().outcome()), result);
}

#[test]
fn test_abandoned_session_records_quit() {
    let (_db, archive) = setup_archive();
    let mut session = archive.start_session(Difficulty::Easy, Side::O);
    let game_id = session.game_id().expect("Match should be recorded");
    let (_, outcome) = session.computer_move().expect("computer opens");
    assert_eq!(outcome, GameOutcome::InProgress);
    session.abandon();

    let stored = archive
        .repository()
        .get_game(game_id)
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(stored.result().expect("Parse failed"), Some(MatchResult::Quit));
    assert_eq!(archive.replay(game_id).expect("Replay failed").len(), 2);
}

#[test]
fn test_replay_unknown_game_fails() {
    let (_db, archive) = setup_archive();
    assert!(archive.replay(404).is_err());
}

#[test]
fn test_replay_of_game_without_moves() {
    let (_db, archive) = setup_archive();
    let game = archive
        .repository()
        .create_game(Difficulty::Hard, Side::X)
        .expect("Create failed");
    let frames = archive.replay(*game.id()).expect("Replay failed");
    assert_eq!(frames.len(), 1);
    assert_eq!(*frames[0].move_number(), 0);
}

#[test]
fn test_summary_counts_from_human_side() {
    let (_db, archive) = setup_archive();
    let repo = archive.repository();

    let human_win = repo.create_game(Difficulty::Easy, Side::X).expect("Create failed");
    repo.record_outcome(*human_win.id(), MatchResult::Won(Side::X)).expect("Record failed");

    let computer_win = repo.create_game(Difficulty::Hard, Side::O).expect("Create failed");
    repo.record_outcome(*computer_win.id(), MatchResult::Won(Side::X)).expect("Record failed");

    let tie = repo.create_game(Difficulty::Hard, Side::X).expect("Create failed");
    repo.record_outcome(*tie.id(), MatchResult::Tie).expect("Record failed");

    let quit = repo.create_game(Difficulty::Medium, Side::X).expect("Create failed");
    repo.record_outcome(*quit.id(), MatchResult::Quit).expect("Record failed");

    repo.create_game(Difficulty::Medium, Side::O).expect("Create failed");

    let summary = archive.summary().expect("Summary failed");
    assert_eq!(*summary.total_games(), 5);
    assert_eq!(*summary.human_wins(), 1);
    assert_eq!(*summary.computer_wins(), 1);
    assert_eq!(*summary.ties(), 1);
    assert_eq!(*summary.unfinished(), 2);
    assert!((summary.win_rate() - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_summary_empty_archive() {
    let (_db, archive) = setup_archive();
    let summary = archive.summary().expect("Summary failed");
    assert_eq!(*summary.total_games(), 0);
    assert_eq!(summary.win_rate(), 0.0);
}
