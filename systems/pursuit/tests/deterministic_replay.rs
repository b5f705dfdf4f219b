use std::time::Duration;

use adventure_core::{Command, Direction, Event, HeldDirections};
use adventure_system_player_control::PlayerControl;
use adventure_system_pursuit::{Config, Pursuit};
use adventure_world::{self as world, query, World};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
struct FrameRecord {
    player: Vec2,
    enemy: Vec2,
    enemy_velocity: Vec2,
    events: Vec<Event>,
}

fn run_frame(
    world: &mut World,
    control: &mut PlayerControl,
    pursuit: &mut Pursuit,
    held: HeldDirections,
    dt: Duration,
) -> FrameRecord {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);

    let mut commands = Vec::new();
    control.handle(&events, held, &query::player(world), &mut commands);
    for command in commands.drain(..) {
        world::apply(world, command, &mut events);
    }

    let player = query::player(world);
    pursuit.handle(&events, &query::enemy(world), player.position, &mut commands);
    for command in commands.drain(..) {
        world::apply(world, command, &mut events);
    }

    let enemy = query::enemy(world);
    FrameRecord {
        player: player.position,
        enemy: enemy.position,
        enemy_velocity: enemy.velocity,
        events,
    }
}

fn replay(script: &[(HeldDirections, u32)]) -> Vec<FrameRecord> {
    let mut world = World::new();
    let mut control = PlayerControl::default();
    let mut pursuit = Pursuit::default();
    let dt = Duration::from_micros(16_667);

    let mut records = Vec::new();
    for (held, frames) in script {
        for _ in 0..*frames {
            records.push(run_frame(
                &mut world,
                &mut control,
                &mut pursuit,
                *held,
                dt,
            ));
        }
    }
    records
}

fn script() -> Vec<(HeldDirections, u32)> {
    vec![
        (HeldDirections::NONE, 30),
        (HeldDirections::NONE.with(Direction::East), 240),
        (
            HeldDirections::NONE
                .with(Direction::South)
                .with(Direction::East),
            180,
        ),
        (HeldDirections::NONE.with(Direction::West), 120),
        (HeldDirections::NONE, 300),
    ]
}

#[test]
fn identical_input_replays_identically() {
    let first = replay(&script());
    let second = replay(&script());

    assert_eq!(first.len(), 870);
    assert_eq!(first, second);
}

#[test]
fn enemy_velocity_tracks_the_player_after_it_moves() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::MovePlayer {
            destination: Vec2::new(121.0, 121.0),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );

    let mut pursuit = Pursuit::new(Config::new(200.0, 40.0));
    let mut commands = Vec::new();
    pursuit.handle(
        &events,
        &query::enemy(&world),
        query::player(&world).position,
        &mut commands,
    );
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let velocity = query::enemy(&world).velocity;
    let expected = Vec2::new(1.0, 1.0).normalize() * 40.0;
    assert!((velocity - expected).length() < 1e-3, "{velocity:?}");
}

#[test]
fn idle_player_in_range_is_approached() {
    let records = replay(&[(HeldDirections::NONE, 60)]);

    let first = records.first().expect("at least one frame");
    let last = records.last().expect("at least one frame");
    let start_distance = first.player.distance(Vec2::new(120.0, 120.0));
    let end_distance = last.player.distance(last.enemy);

    assert!(end_distance < start_distance);
    assert!(records
        .iter()
        .all(|record| (record.enemy_velocity.length() - 40.0).abs() < 1e-3));
}

#[test]
fn enemy_idles_once_the_player_escapes() {
    // Head south into the open field first; the wall blocks row 5 to the east.
    let records = replay(&[
        (HeldDirections::NONE.with(Direction::South), 180),
        (HeldDirections::NONE.with(Direction::East), 360),
        (HeldDirections::NONE, 60),
    ]);

    let last = records.last().expect("at least one frame");
    assert!(last.player.distance(last.enemy) >= 200.0);
    assert_eq!(last.enemy_velocity, Vec2::ZERO);
}
