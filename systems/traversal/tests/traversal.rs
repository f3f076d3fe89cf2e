use anyhow::Result as AnyResult;
use maze_crawler_core::{
    CellClass, Command, Direction, Event, ModifierCategory, MoveRejection, Phase, Position, Route,
    RouteError, SessionOutcome, TraversalState,
};
use maze_crawler_system_pathfinding::find_route;
use maze_crawler_system_traversal::{
    run, Frame, FrameSink, ScriptedCommands, Session, TraversalController,
};
use maze_crawler_world::Grid;

fn grid(rows: Vec<Vec<i32>>) -> Grid {
    Grid::from_rows(rows).expect("valid grid")
}

fn interactive(rows: Vec<Vec<i32>>, start: Position, goal: Position) -> TraversalController {
    let session = Session::new(grid(rows), start, goal).expect("endpoints inside grid");
    let mut controller = TraversalController::new(session, Route::empty());
    controller.replay(&mut Vec::new()).expect("empty route");
    assert_eq!(controller.phase(), Phase::Interactive);
    controller
}

fn move_command(direction: Direction) -> Command {
    Command::Move { direction }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<(Phase, Option<Position>, TraversalState, Vec<Event>)>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()> {
        self.frames
            .push((frame.phase, frame.cursor, frame.state, frame.events.to_vec()));
        Ok(())
    }
}

#[test]
fn start_equal_to_goal_finishes_right_after_replay() {
    let maze = grid(vec![vec![0, 0], vec![0, 0]]);
    let start = Position::new(1, 0);
    let route = find_route(&maze, start, start).expect("trivial route");
    let session = Session::new(maze, start, start).expect("endpoints inside grid");
    let mut controller = TraversalController::new(session, route);
    let mut events = Vec::new();

    controller.replay(&mut events).expect("route inside grid");

    let replayed = events
        .iter()
        .filter(|event| matches!(event, Event::RouteStepReplayed { .. }))
        .count();
    assert_eq!(replayed, 1, "exactly one modifier step expected");
    assert_eq!(controller.session().state().score(), 1);
    assert_eq!(controller.phase(), Phase::Finished);
    assert_eq!(controller.outcome(), Some(SessionOutcome::GoalReached));
    assert_eq!(
        events,
        vec![
            Event::RouteStepReplayed {
                position: start,
                cell: CellClass::Empty,
                outcome: maze_crawler_system_modifiers::evaluate(
                    TraversalState::default(),
                    CellClass::Empty
                ),
            },
            Event::PhaseChanged {
                phase: Phase::Interactive
            },
            Event::PhaseChanged {
                phase: Phase::Finished
            },
            Event::Finished {
                outcome: SessionOutcome::GoalReached,
                score: 1
            },
        ]
    );
}

#[test]
fn unreachable_goal_still_reaches_interactive_phase() {
    let maze = grid(vec![
        vec![0, 0, 0],
        vec![1, 1, 1],
        vec![0, 3, 0],
    ]);
    let start = Position::new(0, 0);
    let goal = Position::new(2, 1);
    let route = match find_route(&maze, start, goal) {
        Err(RouteError::NoRouteFound { .. }) => Route::empty(),
        other => panic!("expected no route, got {other:?}"),
    };
    let session = Session::new(maze, start, goal).expect("endpoints inside grid");
    let mut controller = TraversalController::new(session, route);
    let mut events = Vec::new();

    controller.replay(&mut events).expect("empty route");

    assert_eq!(
        events,
        vec![Event::PhaseChanged {
            phase: Phase::Interactive
        }]
    );
    assert_eq!(controller.phase(), Phase::Interactive);
    assert_eq!(controller.session().state(), TraversalState::default());
}

#[test]
fn replay_score_counts_neutral_cells_only() {
    let maze = grid(vec![vec![2, 4, 0, -6, 0, 5, -7, 3]]);
    let start = Position::new(0, 0);
    let goal = Position::new(0, 7);
    let route = find_route(&maze, start, goal).expect("straight corridor");
    let neutral = route
        .positions()
        .iter()
        .filter(|position| maze.classify(**position).expect("inside").is_neutral())
        .count();
    let session = Session::new(maze, start, goal).expect("endpoints inside grid");
    let mut controller = TraversalController::new(session, route);
    let mut events = Vec::new();

    controller.replay(&mut events).expect("route inside grid");

    assert_eq!(neutral, 4);
    assert_eq!(controller.session().state().score(), 4);
    assert_eq!(controller.session().state().sensing_radius(), 1);
    assert_eq!(controller.session().state().step_size(), 1);
    let boosters = events
        .iter()
        .filter(|event| {
            matches!(event, Event::RouteStepReplayed { outcome, .. }
                if outcome.effect.category() == ModifierCategory::Booster)
        })
        .count();
    assert_eq!(boosters, 2);
    for column in 0..8 {
        assert_eq!(
            controller.session().grid().classify(Position::new(0, column)),
            Ok(CellClass::Trail)
        );
    }
}

#[test]
fn manual_moves_onto_non_empty_cells_change_nothing() {
    // Replay may walk across boosters, hurdles and trail; manual moves may not.
    // The two rules differ on purpose.
    for blocker in [1, 2, 3, 4, 5, -6, -7, 8, 9, -2] {
        let mut controller = interactive(
            vec![vec![0, blocker, 0]],
            Position::new(0, 0),
            Position::new(0, 2),
        );
        let before_state = controller.session().state();
        let before_grid = controller.session().grid().clone();
        let mut events = Vec::new();

        controller.handle(move_command(Direction::Right), &mut events);

        assert_eq!(
            events,
            vec![Event::MoveRejected {
                direction: Direction::Right,
                reason: MoveRejection::Blocked(CellClass::from_code(blocker)),
            }],
            "blocker {blocker}"
        );
        assert_eq!(controller.session().agent(), Position::new(0, 0));
        assert_eq!(controller.session().state(), before_state);
        assert_eq!(controller.session().grid(), &before_grid);
        assert_eq!(controller.session().facing(), Direction::Up);
        assert_eq!(controller.phase(), Phase::Interactive);
    }
}

#[test]
fn out_of_bounds_moves_are_rejected() {
    let mut controller = interactive(vec![vec![0, 0]], Position::new(0, 0), Position::new(0, 1));
    let mut events = Vec::new();

    controller.handle(move_command(Direction::Up), &mut events);
    controller.handle(move_command(Direction::Left), &mut events);
    controller.handle(move_command(Direction::Down), &mut events);

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|event| matches!(
        event,
        Event::MoveRejected {
            reason: MoveRejection::OutOfBounds,
            ..
        }
    )));
    assert_eq!(controller.session().agent(), Position::new(0, 0));
}

#[test]
fn accepted_moves_trail_score_and_reach_goal() {
    let mut controller = interactive(
        vec![vec![0, 0, 1], vec![1, 0, 0]],
        Position::new(0, 0),
        Position::new(1, 2),
    );
    let mut events = Vec::new();

    controller.handle(move_command(Direction::Right), &mut events);
    controller.handle(move_command(Direction::Down), &mut events);
    assert_eq!(controller.phase(), Phase::Interactive);
    controller.handle(move_command(Direction::Right), &mut events);

    assert_eq!(controller.session().agent(), Position::new(1, 2));
    assert_eq!(controller.session().state().score(), 3);
    assert_eq!(controller.phase(), Phase::Finished);
    assert_eq!(controller.outcome(), Some(SessionOutcome::GoalReached));
    assert_eq!(
        controller.session().grid().classify(Position::new(1, 1)),
        Ok(CellClass::Trail)
    );

    let mut late = Vec::new();
    controller.handle(move_command(Direction::Left), &mut late);
    assert!(late.is_empty(), "finished sessions ignore commands");
}

#[test]
fn trail_blocks_backtracking() {
    let mut controller = interactive(
        vec![vec![0, 0, 0, 0]],
        Position::new(0, 0),
        Position::new(0, 3),
    );
    let mut events = Vec::new();
    controller.handle(move_command(Direction::Right), &mut events);
    controller.handle(move_command(Direction::Right), &mut events);
    assert_eq!(controller.session().agent(), Position::new(0, 2));
    events.clear();

    controller.handle(move_command(Direction::Left), &mut events);

    assert_eq!(
        events,
        vec![Event::MoveRejected {
            direction: Direction::Left,
            reason: MoveRejection::Blocked(CellClass::Trail),
        }]
    );
    assert_eq!(controller.session().agent(), Position::new(0, 2));
    assert_eq!(controller.phase(), Phase::Interactive);
}

#[test]
fn start_cell_stays_enterable_without_a_replayed_route() {
    let mut controller = interactive(
        vec![vec![0, 0, 0]],
        Position::new(0, 0),
        Position::new(0, 2),
    );
    let mut events = Vec::new();
    controller.handle(move_command(Direction::Right), &mut events);
    events.clear();

    controller.handle(move_command(Direction::Left), &mut events);

    assert!(
        matches!(
            events.as_slice(),
            [Event::AgentMoved { to, cell: CellClass::Empty, .. }] if *to == Position::new(0, 0)
        ),
        "only replay marks the start cell, got {events:?}"
    );
    assert_eq!(controller.session().agent(), Position::new(0, 0));
    assert_eq!(
        controller.session().grid().classify(Position::new(0, 0)),
        Ok(CellClass::Trail)
    );
}

#[test]
fn unrecognized_tokens_do_not_consume_a_step() {
    let mut controller = interactive(vec![vec![0, 0]], Position::new(0, 0), Position::new(0, 1));
    let mut events = Vec::new();

    controller.handle_token("jump", &mut events);

    assert_eq!(
        events,
        vec![Event::CommandUnrecognized {
            token: "jump".to_owned()
        }]
    );
    assert_eq!(controller.session().state(), TraversalState::default());
    assert_eq!(controller.phase(), Phase::Interactive);
}

#[test]
fn run_presents_every_step_and_stops_at_goal() {
    let maze = grid(vec![vec![0, 0, 0], vec![0, 0, 0]]);
    let start = Position::new(0, 0);
    let goal = Position::new(1, 2);
    let session = Session::new(maze, start, goal).expect("endpoints inside grid");
    let route = Route::from_positions(vec![Position::new(0, 0), Position::new(0, 1)]);
    let mut controller = TraversalController::new(session, route);
    let mut source = ScriptedCommands::new(["x", "s", "d", "d", "q", "q"]);
    let mut sink = RecordingSink::default();

    let log = run(&mut controller, &mut source, &mut sink).expect("session runs");

    // Initial frame, two replay steps, the replay-exhausted frame, then four tokens.
    assert_eq!(sink.frames.len(), 1 + 2 + 1 + 4);
    assert_eq!(sink.frames[1].1, Some(Position::new(0, 0)));
    assert_eq!(sink.frames[2].1, Some(Position::new(0, 1)));
    assert_eq!(source.remaining(), 2, "input after the goal is left unread");
    assert_eq!(controller.outcome(), Some(SessionOutcome::GoalReached));
    assert_eq!(
        log.last(),
        Some(&Event::Finished {
            outcome: SessionOutcome::GoalReached,
            score: 5
        })
    );
}

#[test]
fn run_treats_exhausted_input_as_quit() {
    let maze = grid(vec![vec![0, 0, 0]]);
    let session =
        Session::new(maze, Position::new(0, 0), Position::new(0, 2)).expect("inside grid");
    let mut controller = TraversalController::new(session, Route::empty());
    let mut source = ScriptedCommands::new(Vec::<String>::new());
    let mut sink = RecordingSink::default();

    let log = run(&mut controller, &mut source, &mut sink).expect("session runs");

    assert_eq!(controller.outcome(), Some(SessionOutcome::InputExhausted));
    assert!(log.contains(&Event::Finished {
        outcome: SessionOutcome::InputExhausted,
        score: 0
    }));
}
