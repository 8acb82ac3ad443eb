use torus_snake_core::{
    CellCoord, CellKind, CollisionCause, Command, Event, Heading, Layout, SessionConfig,
};
use torus_snake_system_scoreboard::{
    leaderboard, MemoryStore, RankOrder, RankedScore, ScoreStore, Scoreboard,
};
use torus_snake_world::{self as world, World};

fn game_over(score: u32) -> Event {
    Event::GameOver {
        cause: CollisionCause::Obstacle,
        at: CellCoord::new(8, 10),
        score,
    }
}

fn ranked(store: &MemoryStore, order: RankOrder) -> Vec<(u64, u32)> {
    leaderboard(store, order)
        .into_iter()
        .map(|entry| (entry.timestamp_ms, entry.score))
        .collect()
}

#[test]
fn game_over_from_the_world_is_recorded() {
    let layout = Layout {
        body: vec![
            CellCoord::new(7, 10),
            CellCoord::new(6, 10),
            CellCoord::new(5, 10),
        ],
        heading: Heading::Right,
        items: vec![
            (CellCoord::new(8, 10), CellKind::Apple),
            (CellCoord::new(9, 10), CellKind::Obstacle),
        ],
    };
    let mut world = World::from_layout(SessionConfig::default().with_seed(3), layout)
        .expect("layout is valid");
    let mut events = Vec::new();
    world::apply(&mut world, Command::Step, &mut events);
    world::apply(&mut world, Command::Step, &mut events);
    assert!(world.is_over());

    let mut scoreboard = Scoreboard::new();
    let mut store = MemoryStore::new();
    let recorded = scoreboard
        .handle(&events, 1_700_000_000_000, &mut store)
        .expect("memory store never fails");

    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].score, 1);
    assert_eq!(store.get("score_1700000000000"), Some(1));
}

#[test]
fn events_without_game_over_store_nothing() {
    let mut scoreboard = Scoreboard::new();
    let mut store = MemoryStore::new();
    let events = [
        Event::SessionStarted {
            head: CellCoord::new(7, 10),
            heading: Heading::Right,
        },
        Event::PowerUpExpired,
    ];

    let recorded = scoreboard
        .handle(&events, 42, &mut store)
        .expect("memory store never fails");

    assert!(recorded.is_empty());
    assert!(store.is_empty());
}

#[test]
fn colliding_timestamps_are_bumped_to_unique_keys() {
    let mut scoreboard = Scoreboard::new();
    let mut store = MemoryStore::new();

    let _ = scoreboard
        .handle(&[game_over(4), game_over(7)], 1_000, &mut store)
        .expect("memory store never fails");
    let _ = scoreboard
        .handle(&[game_over(2)], 900, &mut store)
        .expect("memory store never fails");

    assert_eq!(store.len(), 3);
    assert_eq!(store.get("score_1000"), Some(4));
    assert_eq!(store.get("score_1001"), Some(7));
    assert_eq!(store.get("score_1002"), Some(2));
}

#[test]
fn score_order_breaks_ties_by_recency() {
    let mut store = MemoryStore::new();
    store.put("score_10".to_owned(), 3).expect("infallible");
    store.put("score_20".to_owned(), 9).expect("infallible");
    store.put("score_30".to_owned(), 3).expect("infallible");

    assert_eq!(
        ranked(&store, RankOrder::Score),
        vec![(20, 9), (30, 3), (10, 3)]
    );
    assert_eq!(
        ranked(&store, RankOrder::Recent),
        vec![(30, 3), (20, 9), (10, 3)]
    );
}

#[test]
fn ranks_are_one_based_and_malformed_keys_are_skipped() {
    let mut store = MemoryStore::new();
    store.put("score_5".to_owned(), 1).expect("infallible");
    store.put("settings".to_owned(), 99).expect("infallible");
    store.put("score_later".to_owned(), 50).expect("infallible");

    assert_eq!(
        leaderboard(&store, RankOrder::Score),
        vec![RankedScore {
            rank: 1,
            timestamp_ms: 5,
            score: 1,
        }]
    );
}
