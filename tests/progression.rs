// Level progression scenarios driven through the public API with the
// headless collaborators, so they run under `cargo test` on the host.

use silla_vibe::game::{
    GameController, GamePhase, MemoryRepository, RecordingAudio, RecordingRenderer, Timing,
};
use silla_vibe::highscores::ScoreStore;

type Game = GameController<RecordingRenderer, RecordingAudio, MemoryRepository>;

fn new_game(repo: MemoryRepository) -> Game {
    GameController::new(
        RecordingRenderer::new(),
        RecordingAudio::default(),
        repo,
        2024,
        Timing::default(),
    )
}

/// Play back the current sequence and reproduce it
fn clear_level(game: &mut Game) {
    game.run_pending();
    assert_eq!(game.phase(), GamePhase::AwaitingInput);
    for tile in game.state().sequence.clone() {
        game.click(tile);
    }
    game.run_pending();
    assert_eq!(game.phase(), GamePhase::LevelSuccess);
}

/// Play back the current sequence and miss the first tile
fn fail_level(game: &mut Game) {
    game.run_pending();
    let tiles = game.state().tile_count();
    let wrong = (game.state().sequence[0] + 1) % tiles;
    game.click(wrong);
    game.run_pending();
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn level_one_to_two_reuses_grid() {
    let mut game = new_game(MemoryRepository::new());
    game.start();
    assert_eq!(game.state().grid_size, 2);
    assert_eq!(game.state().tile_count(), 4);
    assert_eq!(game.state().sequence.len(), 4);

    clear_level(&mut game);
    game.next_level();

    assert_eq!(game.level(), 2);
    assert_eq!(game.state().sequence.len(), 4);
    assert_eq!(game.renderer().grids_built, vec![2]);
    assert_eq!(game.renderer().level, (1, 2));
}

#[test]
fn level_eleven_rebuilds_grid() {
    let mut game = new_game(MemoryRepository::new());
    game.start();
    for _ in 1..11 {
        clear_level(&mut game);
        game.next_level();
    }

    assert_eq!(game.level(), 11);
    assert_eq!(game.state().grid_size, 3);
    assert_eq!(game.state().sequence.len(), 6);
    assert!(game.state().sequence.iter().all(|&t| t < 9));
    assert_eq!(game.renderer().grids_built, vec![2, 3]);
    assert_eq!(game.renderer().level, (2, 1));
}

#[test]
fn failing_at_level_23_persists_score() {
    let repo = MemoryRepository::new();
    let mut game = new_game(repo.clone());
    game.start();
    for _ in 1..23 {
        clear_level(&mut game);
        game.next_level();
    }
    assert_eq!(game.level(), 23);
    fail_level(&mut game);

    assert_eq!(repo.raw().as_deref(), Some("[23]"));
    assert_eq!(game.renderer().scores, vec!["Stage 3 - Level 3".to_string()]);
    assert_eq!(
        game.renderer().message,
        "Failed! Game over at Stage 3 - Level 3."
    );
    assert_eq!(game.renderer().grids_built, vec![2, 3, 4]);
}

#[test]
fn scores_survive_a_new_session() {
    let repo = MemoryRepository::new();
    let mut game = new_game(repo.clone());

    for runs in 0..3 {
        game.start();
        for _ in 0..runs {
            clear_level(&mut game);
            game.next_level();
        }
        fail_level(&mut game);
    }
    assert_eq!(game.scores().top_scores(), vec![3, 2, 1]);

    let next_session = new_game(repo.clone());
    assert_eq!(
        next_session.renderer().scores,
        vec![
            "Stage 1 - Level 3".to_string(),
            "Stage 1 - Level 2".to_string(),
            "Stage 1 - Level 1".to_string(),
        ]
    );
    assert_eq!(ScoreStore::load(repo).len(), 3);
}

#[test]
fn corrupt_history_starts_empty() {
    let game = new_game(MemoryRepository::with_raw("scores: lots"));
    assert!(game.scores().is_empty());
    assert!(game.renderer().scores.is_empty());
    assert_eq!(game.phase(), GamePhase::NotStarted);
}

#[test]
fn restart_after_game_over_resets_level() {
    let mut game = new_game(MemoryRepository::new());
    game.start();
    clear_level(&mut game);
    game.next_level();
    fail_level(&mut game);
    assert!(game.renderer().start_enabled);

    game.start();
    assert_eq!(game.level(), 1);
    assert_eq!(game.phase(), GamePhase::ShowingSequence);
    assert!(!game.renderer().start_enabled);
    assert!(!game.renderer().next_level_visible);
    assert_eq!(game.renderer().level, (1, 1));
}
