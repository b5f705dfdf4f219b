//! Per-frame orchestration between the pure systems and the world.

use std::time::Duration;

use adventure_core::{Command, Event};
use adventure_rendering::{
    ActorPresentation, FrameInput, Scene, SpriteKey, TileMapPresentation, Viewport,
};
use adventure_system_bootstrap::Bootstrap;
use adventure_system_player_control::PlayerControl;
use adventure_system_pursuit::Pursuit;
use adventure_world::{self as world, query, World};
use anyhow::{Context, Result};
use glam::Vec2;
use tracing::debug;

/// Size of the visible world region, equal to the window size.
pub(crate) const VIEW_SIZE: Vec2 = Vec2::new(800.0, 608.0);

const PLAYER_SCALE: f32 = 0.1;
const ENEMY_SCALE: f32 = 0.2;

/// Owns the world and the systems that drive it between frames.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    player_control: PlayerControl,
    pursuit: Pursuit,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            player_control: PlayerControl::default(),
            pursuit: Pursuit::default(),
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Builds the scene shown on the first frame.
    pub(crate) fn initial_scene(&self, bootstrap: &Bootstrap) -> Result<Scene> {
        let tile_map = bootstrap.tile_map(&self.world);
        let tile_map = TileMapPresentation::new(
            tile_map.columns(),
            tile_map.rows(),
            tile_map.tile_size() as f32,
            tile_map.tiles().map(|(_, kind)| kind).collect(),
        )
        .context("failed to describe the tile map")?;

        let player = bootstrap.player(&self.world);
        let enemy = bootstrap.enemy(&self.world);

        Ok(Scene::new(
            tile_map,
            ActorPresentation::new(SpriteKey::Player, player.position, PLAYER_SCALE),
            ActorPresentation::new(SpriteKey::Enemy, enemy.position, ENEMY_SCALE),
            Viewport::centered_on(player.center(), VIEW_SIZE),
        ))
    }

    /// Runs one frame: clock, player, enemy, then the camera.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.events.clear();

        if let Some(extent) = input.player_extent {
            world::apply(
                &mut self.world,
                Command::ConfigurePlayerExtent { extent },
                &mut self.events,
            );
        }

        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        self.player_control.handle(
            &self.events,
            input.held_directions,
            &query::player(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        let was_chasing = self.pursuit.is_chasing();
        let player = query::player(&self.world);
        self.pursuit.handle(
            &self.events,
            &query::enemy(&self.world),
            player.position,
            &mut self.commands,
        );
        self.flush_commands();

        if was_chasing != self.pursuit.is_chasing() {
            let enemy = query::enemy(&self.world);
            if self.pursuit.is_chasing() {
                debug!(enemy = ?enemy.position, player = ?player.position, "enemy started chasing");
            } else {
                debug!(enemy = ?enemy.position, player = ?player.position, "enemy stopped chasing");
            }
        }

        for event in &self.events {
            match event {
                Event::PlayerBlocked { attempted } => {
                    debug!(attempted = ?attempted, "player move blocked");
                }
                Event::EnemyBlocked { attempted } => {
                    debug!(attempted = ?attempted, "enemy move blocked");
                }
                _ => {}
            }
        }

        scene.player.position = player.position;
        scene.enemy.position = query::enemy(&self.world).position;
        scene.viewport = scene.viewport.recentered(player.center());
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_core::{Direction, HeldDirections};

    fn session_and_scene() -> (Session, Scene) {
        let session = Session::new(World::new());
        let scene = session
            .initial_scene(&Bootstrap)
            .expect("level describes a valid tile map");
        (session, scene)
    }

    fn input(held: HeldDirections) -> FrameInput {
        FrameInput {
            held_directions: held,
            player_extent: None,
        }
    }

    #[test]
    fn initial_scene_frames_the_spawn_points() {
        let (_, scene) = session_and_scene();

        assert_eq!(scene.tile_map.columns(), 50);
        assert_eq!(scene.tile_map.rows(), 38);
        assert_eq!(scene.player.position, Vec2::new(64.0, 64.0));
        assert_eq!(scene.player.scale, 0.1);
        assert_eq!(scene.enemy.position, Vec2::new(120.0, 120.0));
        assert_eq!(scene.enemy.scale, 0.2);
        assert_eq!(scene.viewport.center(), Vec2::new(80.0, 80.0));
        assert_eq!(scene.viewport.size(), VIEW_SIZE);
    }

    #[test]
    fn held_key_moves_player_and_camera_together() {
        let (mut session, mut scene) = session_and_scene();

        session.advance(
            Duration::from_millis(100),
            input(HeldDirections::NONE.with(Direction::East)),
            &mut scene,
        );

        assert_eq!(scene.player.position, Vec2::new(74.0, 64.0));
        assert_eq!(scene.viewport.center(), Vec2::new(90.0, 80.0));
    }

    #[test]
    fn enemy_moves_toward_a_nearby_player() {
        let (mut session, mut scene) = session_and_scene();
        let before = scene.enemy.position.distance(scene.player.position);

        session.advance(
            Duration::from_millis(100),
            input(HeldDirections::NONE),
            &mut scene,
        );

        let after = scene.enemy.position.distance(scene.player.position);
        assert!(after < before);
        assert!(session.pursuit.is_chasing());
    }

    #[test]
    fn reported_sprite_extent_recenters_the_camera() {
        let (mut session, mut scene) = session_and_scene();

        session.advance(
            Duration::ZERO,
            FrameInput {
                held_directions: HeldDirections::NONE,
                player_extent: Some(Vec2::new(20.0, 30.0)),
            },
            &mut scene,
        );

        assert_eq!(query::player(&session.world).extent, Vec2::new(20.0, 30.0));
        assert_eq!(scene.viewport.center(), Vec2::new(74.0, 79.0));
        assert_eq!(
            session.events.first(),
            Some(&Event::PlayerExtentConfigured {
                extent: Vec2::new(20.0, 30.0)
            })
        );

        session.advance(
            Duration::ZERO,
            FrameInput {
                held_directions: HeldDirections::NONE,
                player_extent: Some(Vec2::new(20.0, 30.0)),
            },
            &mut scene,
        );
        assert!(!session
            .events
            .iter()
            .any(|event| matches!(event, Event::PlayerExtentConfigured { .. })));
    }

    #[test]
    fn every_frame_ticks_the_world_once() {
        let (mut session, mut scene) = session_and_scene();

        for _ in 0..5 {
            session.advance(
                Duration::from_millis(16),
                input(HeldDirections::NONE),
                &mut scene,
            );
        }

        assert_eq!(query::tick_index(&session.world), 5);
    }
}
