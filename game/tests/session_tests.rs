use engine::HeadlessRunner;
use flappy::avatar::{Avatar, FLAP_IMPULSE, GRAVITY};
use flappy::geometry::Playfield;
use flappy::obstacle::Obstacle;
use flappy::obstacle_stream::{INITIAL_SPAWN_INTERVAL_MS, ObstacleStream};
use flappy::phase::GamePhase;
use flappy::session::{Command, FlappyLogic, GameEvent, GameSession, TickInput};

fn playing_without_pipes(avatar: Avatar, high_score: u32) -> GameSession {
    let stream = ObstacleStream::empty(Playfield::DEFAULT, 0);
    GameSession::from_parts(GamePhase::Playing, avatar, stream, high_score, 1)
}

/// Menu session whose pipes are one already behind the bird and one right on top of it.
fn doomed_session() -> GameSession {
    let stream = ObstacleStream::with_obstacles(
        Playfield::DEFAULT,
        0,
        vec![
            Obstacle::with_gap(-10.0, 200.0, 700.0),
            Obstacle::with_gap(75.0, 500.0, 700.0),
        ],
    );
    GameSession::from_parts(GamePhase::Menu, Avatar::new(), stream, 0, 9)
}

fn gaps(session: &GameSession) -> Vec<f32> {
    session
        .stream()
        .obstacles()
        .iter()
        .map(|o| o.gap_top())
        .collect()
}

#[test]
fn new_session_waits_in_the_menu() {
    let session = GameSession::new(7, 1, 0);
    assert_eq!(session.phase(), GamePhase::Menu);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 7);
    assert_eq!(session.avatar(), &Avatar::new());
    assert_eq!(session.stream().obstacles().len(), 2);
}

#[test]
fn menu_ticks_do_not_simulate() {
    let mut session = GameSession::new(0, 1, 0);
    let before = session.clone();

    for t in 1..30 {
        session.tick(t * 16, &[]);
    }

    assert_eq!(session.phase(), GamePhase::Menu);
    assert_eq!(session.avatar(), before.avatar());
    assert_eq!(session.stream(), before.stream());
    assert!(session.events().is_empty());
}

#[test]
fn action_from_menu_starts_play_and_advances_the_same_tick() {
    let mut session = GameSession::new(0, 1, 0);
    session.tick(16, &[Command::Action]);

    assert_eq!(session.phase(), GamePhase::Playing);
    assert!(session.events().is_empty(), "starting does not flap");
    assert_eq!(session.avatar().velocity_y(), GRAVITY);
    assert_eq!(session.avatar().y(), 325.0 + GRAVITY);
}

#[test]
fn action_while_playing_flaps() {
    let mut session = GameSession::new(0, 1, 0);
    session.tick(16, &[Command::Action]);
    let y = session.avatar().y();

    session.tick(32, &[Command::Action]);

    assert_eq!(session.events(), &[GameEvent::Flap]);
    assert_eq!(session.avatar().velocity_y(), FLAP_IMPULSE + GRAVITY);
    assert_eq!(session.avatar().y(), y + FLAP_IMPULSE + GRAVITY);
}

#[test]
fn quit_is_left_to_the_adapter() {
    let mut session = GameSession::new(0, 1, 0);
    session.tick(16, &[Command::Quit]);
    assert_eq!(session.phase(), GamePhase::Menu);
    assert!(session.events().is_empty());
}

#[test]
fn hitting_the_floor_ends_the_run() {
    let mut session = playing_without_pipes(Avatar::at(75.0, 640.0).with_velocity(10.0), 3);

    session.tick(32, &[]);

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.events(), &[GameEvent::Hit]);
    assert_eq!(session.high_score(), 3, "a worse run keeps the old high score");
}

#[test]
fn game_over_freezes_the_world_until_restart() {
    let mut session = playing_without_pipes(Avatar::at(75.0, 660.0).with_velocity(10.0), 0);
    session.tick(32, &[]);
    assert_eq!(session.phase(), GamePhase::GameOver);

    let frozen = session.clone();
    session.tick(48, &[]);
    assert_eq!(session.avatar(), frozen.avatar());
    assert!(session.events().is_empty());
}

#[test]
fn immediate_collision_scores_then_ends_with_new_high_score() {
    let mut session = doomed_session();

    session.tick(16, &[Command::Action]);

    assert_eq!(session.score(), 1);
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.high_score(), 1);
    assert_eq!(session.events(), &[GameEvent::Point, GameEvent::Hit]);
}

#[test]
fn restart_resets_the_run_but_keeps_the_high_score() {
    let mut session = doomed_session();
    session.tick(16, &[Command::Action]);
    assert_eq!(session.phase(), GamePhase::GameOver);

    session.tick(5_000, &[Command::Action]);

    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 1);
    assert!(session.events().is_empty(), "restart does not flap");
    assert_eq!(session.avatar().y(), 325.0 + GRAVITY);
    assert_eq!(session.stream().obstacles().len(), 2);
    assert_eq!(session.stream().spawn_interval_ms(), INITIAL_SPAWN_INTERVAL_MS);
    assert_eq!(session.stream().last_spawn_ms(), 5_000);
}

#[test]
fn assembled_session_starts_from_the_given_parts() {
    let avatar = Avatar::at(75.0, 100.0).with_velocity(-2.0);
    let session = playing_without_pipes(avatar, 4);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.avatar(), &avatar);
    assert!(session.stream().obstacles().is_empty());
    assert_eq!(session.score(), 0);
    assert_eq!(session.best_score(), 4);
}

#[test]
fn waiting_in_the_menu_does_not_bunch_up_pipes() {
    let mut session = GameSession::new(0, 1, 0);
    session.tick(3_000, &[]);
    session.tick(3_016, &[Command::Action]);

    let xs: Vec<f32> = session.stream().obstacles().iter().map(|o| o.x()).collect();
    assert_eq!(xs, vec![995.0, 1395.0], "no spawn on the first tick of a run");
    assert_eq!(session.stream().last_spawn_ms(), 3_016);

    session.tick(3_016 + INITIAL_SPAWN_INTERVAL_MS, &[]);
    assert_eq!(session.stream().obstacles().len(), 2);
    session.tick(3_017 + INITIAL_SPAWN_INTERVAL_MS, &[]);
    assert_eq!(session.stream().obstacles().len(), 3);
}

#[test]
fn same_seed_gives_same_gaps() {
    let a = GameSession::new(0, 1234, 0);
    let b = GameSession::new(0, 1234, 0);
    assert_eq!(gaps(&a), gaps(&b));
}

#[test]
fn headless_runner_drives_a_session_until_the_bird_falls() {
    let mut runner = HeadlessRunner::new(FlappyLogic::new(5).with_high_score(2));
    runner.step(TickInput::action(16));
    assert_eq!(runner.state().phase(), GamePhase::Playing);

    let frames = runner.run_until(
        200,
        |frame, _| TickInput::idle(frame as u64 * 16),
        |session| session.phase() == GamePhase::GameOver,
    );

    assert!(frames < 200, "an idle bird should hit the floor quickly");
    let session = runner.state();
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 2);
    assert!(session.avatar().bottom() >= 700.0);
}
