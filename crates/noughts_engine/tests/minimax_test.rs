//! Tests for minimax move selection and full-game scenarios.

use noughts_engine::{
    Board, Cell, Difficulty, EngineError, Game, GameOutcome, MoveSelector, Side, best_move,
    check_winner, create_board, score_moves,
};

/// Builds a board by marking the given cells, ignoring turn order.
fn board_with(x: &[usize], o: &[usize]) -> Board {
    let mut board = create_board();
    for &i in x {
        board.apply_move(i, Side::X).expect("free cell");
    }
    for &i in o {
        board.apply_move(i, Side::O).expect("free cell");
    }
    board
}

#[test]
fn test_best_move_is_deterministic() {
    let empty = create_board();
    let first = best_move(&empty, Side::O).expect("moves available");
    for _ in 0..3 {
        assert_eq!(best_move(&empty, Side::O), Ok(first));
    }

    let symmetric = board_with(&[0, 8], &[4]);
    let first = best_move(&symmetric, Side::O).expect("moves available");
    assert_eq!(best_move(&symmetric, Side::O), Ok(first));
}

#[test]
fn test_o_avoids_forced_loss_against_opposite_corners() {
    // X _ _ / _ O _ / _ _ X
    let board = board_with(&[0, 8], &[4]);
    let chosen = best_move(&board, Side::O).expect("moves available");

    let mut after = board.clone();
    after.apply_move(chosen, Side::O).expect("legal");

    // No X reply may lead to a forced X win.
    for reply in score_moves(&after, Side::X).expect("game continues") {
        assert!(reply.score >= 0, "X reply {} forces a win", reply.position);
    }

    // Corners lose to a fork; the first edge is the expected pick.
    assert_eq!(chosen, 1);
    let scores = score_moves(&board, Side::O).expect("moves available");
    let corner_scores: Vec<i8> = scores
        .iter()
        .filter(|m| m.position == 2 || m.position == 6)
        .map(|m| m.score)
        .collect();
    assert_eq!(corner_scores, vec![-1, -1]);
}

#[test]
fn test_scenario_centre_opening_gets_single_reply() {
    let mut game = Game::new();
    game.play(4).expect("legal");
    let reply = best_move(game.board(), Side::O).expect("moves available");
    game.play(reply).expect("legal");

    let board = game.board();
    assert_eq!(board.get(4), Some(Cell::Occupied(Side::X)));
    assert_eq!(board.count(Side::O), 1);
    assert_eq!(board.count(Side::X), 1);
    // Corners hold against the centre; 0 is the first of them.
    assert_eq!(reply, 0);
}

#[test]
fn test_scenario_x_completes_top_row() {
    // X X _ / O O _ / _ _ _
    let mut board = board_with(&[0, 1], &[3, 4]);
    let chosen = best_move(&board, Side::X).expect("moves available");
    assert_eq!(chosen, 2);
    board.apply_move(chosen, Side::X).expect("legal");
    assert!(check_winner(&board, Side::X));
}

#[test]
fn test_hard_never_loses_as_o() {
    // Every X line of play against the hard selector ends in a tie or an O win.
    fn explore(game: &Game) {
        match game.outcome() {
            GameOutcome::Win(side) => {
                assert_eq!(side, Side::O, "X beat minimax: {:?}", game.history());
                return;
            }
            GameOutcome::Tie => return,
            GameOutcome::InProgress => {}
        }
        for index in game.board().legal_moves() {
            let mut next = game.clone();
            next.play(index).expect("legal");
            if !next.is_over() {
                let reply = best_move(next.board(), Side::O).expect("moves available");
                next.play(reply).expect("legal");
            }
            explore(&next);
        }
    }
    explore(&Game::new());
}

#[test]
fn test_hard_selectors_draw_each_other() {
    let mut game = Game::new();
    let mut x = MoveSelector::seeded(Difficulty::Hard, 11);
    let mut o = MoveSelector::seeded(Difficulty::Hard, 12);
    while !game.is_over() {
        let side = game.to_move();
        let pick = match side {
            Side::X => x.select(game.board(), side),
            Side::O => o.select(game.board(), side),
        }
        .expect("moves available");
        game.play(pick).expect("legal");
    }
    assert_eq!(game.outcome(), GameOutcome::Tie);
    assert_eq!(game.play(0), Err(EngineError::GameOver));
}
