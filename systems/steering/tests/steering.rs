use torus_snake_core::{CellCoord, CollisionCause, Command, Event, Heading, SessionConfig};
use torus_snake_system_steering::Steering;
use torus_snake_world::{self as world, World};

fn started() -> Event {
    Event::SessionStarted {
        head: CellCoord::new(7, 10),
        heading: Heading::Right,
    }
}

#[test]
fn intents_are_ignored_before_a_session_starts() {
    let mut steering = Steering::new();
    let mut commands = Vec::new();

    steering.handle(&[], &[Heading::Up], &mut commands);

    assert!(commands.is_empty());
    assert!(!steering.is_live());
}

#[test]
fn latest_perpendicular_intent_wins() {
    let mut steering = Steering::new();
    let mut commands = Vec::new();

    steering.handle(
        &[started()],
        &[Heading::Up, Heading::Down, Heading::Left],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::SetHeading {
            heading: Heading::Down
        }],
        "Left reverses the current heading, so the latest usable intent is Down",
    );
}

#[test]
fn axis_tracking_follows_accepted_heading_changes() {
    let mut steering = Steering::new();
    let mut commands = Vec::new();

    steering.handle(
        &[
            started(),
            Event::HeadingChanged {
                from: Heading::Right,
                to: Heading::Up,
            },
        ],
        &[Heading::Down],
        &mut commands,
    );
    assert!(commands.is_empty());

    steering.handle(&[], &[Heading::Left], &mut commands);
    assert_eq!(
        commands,
        vec![Command::SetHeading {
            heading: Heading::Left
        }]
    );
}

#[test]
fn game_over_stops_forwarding_until_the_next_session() {
    let mut steering = Steering::new();
    let mut commands = Vec::new();

    steering.handle(
        &[
            started(),
            Event::GameOver {
                cause: CollisionCause::Obstacle,
                at: CellCoord::new(8, 10),
                score: 0,
            },
        ],
        &[Heading::Up],
        &mut commands,
    );
    assert!(commands.is_empty());

    steering.handle(&[started()], &[Heading::Up], &mut commands);
    assert_eq!(
        commands,
        vec![Command::SetHeading {
            heading: Heading::Up
        }]
    );
}

#[test]
fn double_tap_cannot_fold_the_snake_onto_its_neck() {
    let mut world = World::new(SessionConfig::default().with_seed(12)).expect("valid config");
    let mut steering = Steering::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::Reset { seed: Some(12) }, &mut events);

    let mut commands = Vec::new();
    steering.handle(&events, &[Heading::Up, Heading::Left], &mut commands);
    events.clear();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(world.heading(), Heading::Up);
}
