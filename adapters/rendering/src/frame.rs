use glam::Vec2;

use crate::{Color, Scene, SpriteKey};

/// Radius of the circle drawn when textures are unavailable.
pub const FALLBACK_CIRCLE_RADIUS: f32 = 50.0;

const FALLBACK_CIRCLE_TOP_LEFT: Vec2 = Vec2::new(200.0, 200.0);

/// Backend-agnostic drawing primitive, executed in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Draws a texture with its top-left corner at `position`.
    Sprite {
        /// Texture to draw.
        key: SpriteKey,
        /// World-space top-left corner.
        position: Vec2,
        /// Uniform scale applied to the texture size.
        scale: f32,
    },
    /// Draws a filled circle.
    Circle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
}

/// Lists the draw commands for a frame: tiles row-major, then the player,
/// then the enemy.
#[must_use]
pub fn compose_frame(scene: &Scene) -> Vec<DrawCommand> {
    let tile_map = &scene.tile_map;
    let tile_count = tile_map.columns() as usize * tile_map.rows() as usize;
    let mut commands = Vec::with_capacity(tile_count + 2);

    commands.extend(tile_map.iter().map(|(coord, kind)| DrawCommand::Sprite {
        key: SpriteKey::for_tile(kind),
        position: tile_map.tile_origin(coord),
        scale: 1.0,
    }));

    for actor in [&scene.player, &scene.enemy] {
        commands.push(DrawCommand::Sprite {
            key: actor.sprite,
            position: actor.position,
            scale: actor.scale,
        });
    }

    commands
}

/// Frame drawn in screen space while textures are unavailable.
#[must_use]
pub fn fallback_frame() -> Vec<DrawCommand> {
    vec![DrawCommand::Circle {
        center: FALLBACK_CIRCLE_TOP_LEFT + Vec2::splat(FALLBACK_CIRCLE_RADIUS),
        radius: FALLBACK_CIRCLE_RADIUS,
        color: Color::RED,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActorPresentation, TileMapPresentation, Viewport};
    use adventure_core::TileKind;

    fn scene() -> Scene {
        let tiles = vec![
            TileKind::Wall,
            TileKind::Wall,
            TileKind::Wall,
            TileKind::Wall,
            TileKind::Grass,
            TileKind::Wall,
        ];
        let tile_map = TileMapPresentation::new(3, 2, 16.0, tiles).expect("valid tile map");

        Scene::new(
            tile_map,
            ActorPresentation::new(SpriteKey::Player, Vec2::new(64.0, 64.0), 0.1),
            ActorPresentation::new(SpriteKey::Enemy, Vec2::new(120.0, 120.0), 0.2),
            Viewport::centered_on(Vec2::new(80.0, 80.0), Vec2::new(800.0, 608.0)),
        )
    }

    #[test]
    fn tiles_precede_player_then_enemy() {
        let commands = compose_frame(&scene());

        assert_eq!(commands.len(), 8);
        assert_eq!(
            commands[4],
            DrawCommand::Sprite {
                key: SpriteKey::Grass,
                position: Vec2::new(16.0, 16.0),
                scale: 1.0,
            }
        );
        assert_eq!(
            commands[6],
            DrawCommand::Sprite {
                key: SpriteKey::Player,
                position: Vec2::new(64.0, 64.0),
                scale: 0.1,
            }
        );
        assert_eq!(
            commands[7],
            DrawCommand::Sprite {
                key: SpriteKey::Enemy,
                position: Vec2::new(120.0, 120.0),
                scale: 0.2,
            }
        );
    }

    #[test]
    fn tiles_are_drawn_row_major() {
        let positions: Vec<Vec2> = compose_frame(&scene())
            .into_iter()
            .take(6)
            .filter_map(|command| match command {
                DrawCommand::Sprite { position, .. } => Some(position),
                DrawCommand::Circle { .. } => None,
            })
            .collect();

        assert_eq!(
            positions,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(16.0, 0.0),
                Vec2::new(32.0, 0.0),
                Vec2::new(0.0, 16.0),
                Vec2::new(16.0, 16.0),
                Vec2::new(32.0, 16.0),
            ]
        );
    }

    #[test]
    fn fallback_frame_is_a_single_red_circle() {
        let commands = fallback_frame();

        assert_eq!(
            commands,
            vec![DrawCommand::Circle {
                center: Vec2::new(250.0, 250.0),
                radius: 50.0,
                color: Color::RED,
            }]
        );
        assert!(commands
            .iter()
            .all(|command| !matches!(command, DrawCommand::Sprite { .. })));
    }
}
