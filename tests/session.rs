mod common;

use std::time::Duration;

use maze_escape::{
    carve, reachable_from, Adversary, Difficulty, GameState, LossReason, Phase, Pos, Session,
    TerrainGrid, Tile,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use common::{corridor, path_keys, ManualClock, ScriptedConsole};

const LIMIT: Duration = Duration::from_secs(60);

fn state(grid: TerrainGrid, player: Pos, exit: Pos) -> GameState {
    GameState {
        grid,
        player,
        exit,
        adversary: None,
        time_left: LIMIT,
        phase: Phase::Playing,
    }
}

fn session(state: GameState, clock: &ManualClock) -> Session<ManualClock> {
    Session::from_state(state, LIMIT, ChaCha8Rng::seed_from_u64(0), clock.clone())
}

#[test]
fn reaching_the_exit_wins_on_that_turn_and_not_before() {
    let start = Pos::new(1, 1);
    let mut grid = carve(5, 5, start, &mut ChaCha8Rng::seed_from_u64(17)).unwrap();
    let farthest = *reachable_from(&grid, start, |t| t != Tile::Wall)
        .last()
        .unwrap();
    grid.set(farthest, Tile::Exit);
    let keys = path_keys(&grid, start, farthest).unwrap();
    assert!(keys.len() >= 2);

    let clock = ManualClock::default();
    let mut game = session(state(grid, start, farthest), &clock);
    let mut console = ScriptedConsole::with_keys(&keys);

    for _ in 1..keys.len() {
        assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    }
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Won);
    assert_eq!(game.state().player, farthest);
    assert_eq!(game.turns(), keys.len() as u64);
}

#[test]
fn timeout_is_checked_before_reading_a_command() {
    let clock = ManualClock::default();
    let grid = corridor(7);
    let mut game = Session::from_state(
        state(grid, Pos::new(1, 1), Pos::new(5, 1)),
        Duration::from_secs(5),
        ChaCha8Rng::seed_from_u64(0),
        clock.clone(),
    );
    let mut console = ScriptedConsole::with_keys("dddd");

    clock.set(Duration::from_secs(6));
    assert_eq!(
        game.turn(&mut console).unwrap(),
        Phase::Lost(LossReason::Timeout)
    );
    assert_eq!(console.keys.len(), 4, "a command was consumed");
    assert!(console.frames.is_empty());
    assert_eq!(game.state().player, Pos::new(1, 1));

    // finished sessions stay finished
    assert_eq!(
        game.turn(&mut console).unwrap(),
        Phase::Lost(LossReason::Timeout)
    );
    assert_eq!(console.keys.len(), 4);
}

#[test]
fn a_slow_move_still_counts_and_is_charged_at_the_next_turn() {
    let clock = ManualClock::default();
    let mut grid = corridor(7);
    grid.set(Pos::new(5, 1), Tile::Exit);
    let mut game = Session::from_state(
        state(grid, Pos::new(3, 1), Pos::new(5, 1)),
        Duration::from_secs(5),
        ChaCha8Rng::seed_from_u64(0),
        clock.clone(),
    );
    let mut console = ScriptedConsole::with_keys("dd").timed(&clock, Duration::from_secs(4));

    // 4s pass while waiting for the key; the move lands
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    assert_eq!(game.state().player, Pos::new(4, 1));
    assert_eq!(game.time_left(), Duration::from_secs(1));

    // another 4s: over the limit, but only noticed at the next boundary
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Won);
    assert_eq!(console.frames.len(), 2);
    assert_eq!(console.frames[1].time_left, Duration::from_secs(1));
}

#[test]
fn the_wait_shows_up_at_the_next_boundary() {
    let clock = ManualClock::default();
    let mut game = Session::from_state(
        state(corridor(7), Pos::new(1, 1), Pos::new(5, 1)),
        Duration::from_secs(5),
        ChaCha8Rng::seed_from_u64(0),
        clock.clone(),
    );
    let mut console = ScriptedConsole::with_keys("xx").timed(&clock, Duration::from_secs(6));
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    assert_eq!(
        game.turn(&mut console).unwrap(),
        Phase::Lost(LossReason::Timeout)
    );
    assert_eq!(console.keys.len(), 1);
}

#[test]
fn adversary_landing_on_the_player_captures_that_turn() {
    let clock = ManualClock::default();
    let mut initial = state(corridor(7), Pos::new(1, 1), Pos::new(5, 1));
    initial.adversary = Some(Adversary::new(Pos::new(3, 1)));
    let mut game = session(initial, &clock);
    let mut console = ScriptedConsole::with_keys("d");

    assert_eq!(
        game.turn(&mut console).unwrap(),
        Phase::Lost(LossReason::Captured)
    );
    assert_eq!(game.state().player, Pos::new(2, 1));
    assert_eq!(game.state().adversary.map(|a| a.pos), Some(Pos::new(2, 1)));
}

#[test]
fn waiting_gives_the_adversary_a_free_step() {
    let clock = ManualClock::default();
    let mut initial = state(corridor(9), Pos::new(1, 1), Pos::new(7, 1));
    initial.adversary = Some(Adversary::new(Pos::new(6, 1)));
    let mut game = session(initial, &clock);
    let mut console = ScriptedConsole::with_keys("?");

    assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    assert_eq!(game.state().player, Pos::new(1, 1));
    assert_eq!(game.state().adversary.map(|a| a.pos), Some(Pos::new(5, 1)));
}

#[test]
fn power_up_skips_exactly_one_pursuit_step() {
    let clock = ManualClock::default();
    let mut grid = corridor(11);
    grid.set(Pos::new(2, 1), Tile::PowerUp);
    let mut initial = state(grid, Pos::new(1, 1), Pos::new(9, 1));
    initial.adversary = Some(Adversary::new(Pos::new(8, 1)));
    let mut game = session(initial, &clock);
    let mut console = ScriptedConsole::with_keys("d..");

    let adversary_at = |game: &Session<ManualClock>| game.state().adversary.map(|a| a.pos.x);

    game.turn(&mut console).unwrap();
    assert_eq!(game.state().player, Pos::new(2, 1));
    assert_eq!(game.state().grid.tile(Pos::new(2, 1)), Tile::Floor);
    assert_eq!(adversary_at(&game), Some(8), "frozen adversary moved");

    game.turn(&mut console).unwrap();
    assert_eq!(adversary_at(&game), Some(7));
    game.turn(&mut console).unwrap();
    assert_eq!(adversary_at(&game), Some(6));
}

#[test]
fn gates_open_once_and_stay_open() {
    let clock = ManualClock::default();
    let mut grid = corridor(7);
    grid.set(Pos::new(2, 1), Tile::Gate);
    grid.set(Pos::new(5, 1), Tile::Exit);
    let mut game = session(state(grid, Pos::new(1, 1), Pos::new(5, 1)), &clock);
    let mut console = ScriptedConsole::with_keys("ddadddd").solving();
    console.answers.push_back("not a number".to_string());

    // malformed answer: blocked, gate intact, turn used
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    assert_eq!(game.state().player, Pos::new(1, 1));
    assert_eq!(game.state().grid.tile(Pos::new(2, 1)), Tile::Gate);

    // correct answer opens it
    game.turn(&mut console).unwrap();
    assert_eq!(game.state().player, Pos::new(2, 1));
    assert_eq!(game.state().grid.tile(Pos::new(2, 1)), Tile::Floor);
    assert_eq!(console.prompts.len(), 2);

    // back and through again without another puzzle
    game.turn(&mut console).unwrap();
    game.turn(&mut console).unwrap();
    assert_eq!(game.state().player, Pos::new(2, 1));
    assert_eq!(console.prompts.len(), 2);

    assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Playing);
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Won);
}

#[test]
fn walking_into_the_border_is_a_no_op() {
    let clock = ManualClock::default();
    let mut grid = TerrainGrid::filled(3, 3, Tile::Floor);
    grid.set(Pos::new(2, 2), Tile::Exit);
    let mut game = session(state(grid, Pos::new(0, 0), Pos::new(2, 2)), &clock);
    let mut console = ScriptedConsole::with_keys("wa");
    game.turn(&mut console).unwrap();
    game.turn(&mut console).unwrap();
    assert_eq!(game.state().player, Pos::new(0, 0));
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn quitting_ends_the_session() {
    let clock = ManualClock::default();
    let mut game = session(state(corridor(5), Pos::new(1, 1), Pos::new(3, 1)), &clock);
    let mut console = ScriptedConsole::with_keys("E");
    assert_eq!(game.turn(&mut console).unwrap(), Phase::Exited);
}

#[test]
fn solving_player_escapes_a_generated_maze() {
    for difficulty in Difficulty::ALL {
        let clock = ManualClock::default();
        let config = difficulty.session_config().without_adversary();
        let game = Session::start(&config, 2024, clock.clone()).unwrap();
        let start = game.state().player;
        let exit = game.state().exit;
        let keys = path_keys(&game.state().grid, start, exit).unwrap();

        let mut console = ScriptedConsole::with_keys(&keys)
            .solving()
            .timed(&clock, Duration::from_millis(10));
        let outcome = game.run(&mut console).unwrap();
        assert_eq!(outcome.phase, Phase::Won, "{difficulty}");
        assert_eq!(outcome.turns, keys.len() as u64);
        assert!(!console.prompts.is_empty(), "exit was not behind a gate");
        assert_eq!(console.frames.last().map(|f| f.player), Some(exit));
    }
}

#[test]
fn same_seed_same_session() {
    let config = Difficulty::Medium.session_config();
    let clock = ManualClock::default();
    let a = Session::start(&config, 99, clock.clone()).unwrap();
    let b = Session::start(&config, 99, clock.clone()).unwrap();
    assert_eq!(a.state().grid, b.state().grid);
    assert_eq!(a.state().exit, b.state().exit);
    assert_eq!(a.state().adversary, b.state().adversary);
}
