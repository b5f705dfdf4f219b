use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use adventure_rendering::{Color, SpriteKey};
use anyhow::{ensure, Context, Result};
use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};

use crate::to_macroquad_color;

/// Locations of the four textures on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    /// Texture drawn for grass tiles.
    pub grass: PathBuf,
    /// Texture drawn for wall tiles.
    pub wall: PathBuf,
    /// Texture drawn for the player.
    pub player: PathBuf,
    /// Texture drawn for the enemy.
    pub enemy: PathBuf,
}

impl AssetPaths {
    /// Resolves the default file names inside `root`.
    #[must_use]
    pub fn in_directory(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            grass: root.join("grass.png"),
            wall: root.join("wall.png"),
            player: root.join("player.png"),
            enemy: root.join("enemy.png"),
        }
    }

    /// Path of the texture associated with `key`.
    #[must_use]
    pub fn path(&self, key: SpriteKey) -> &Path {
        match key {
            SpriteKey::Grass => &self.grass,
            SpriteKey::Wall => &self.wall,
            SpriteKey::Player => &self.player,
            SpriteKey::Enemy => &self.enemy,
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_directory("assets")
    }
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecodedImage {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) rgba: Vec<u8>,
}

/// Textures for every [`SpriteKey`], loaded once at startup.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads every texture from disk, failing on the first one that is missing
    /// or cannot be decoded.
    pub(crate) fn load(paths: &AssetPaths) -> Result<Self> {
        Self::load_with(paths, default_loader)
    }

    /// Rendered size of `key`'s texture before scaling.
    #[must_use]
    pub(crate) fn texture_size(&self, key: SpriteKey) -> Option<Vec2> {
        self.textures
            .get(&key)
            .map(|texture| Vec2::new(texture.width(), texture.height()))
    }

    /// Draws `key` with its top-left corner at `position`.
    pub(crate) fn draw(&self, key: SpriteKey, position: Vec2, scale: f32) -> Result<()> {
        let texture = *self
            .textures
            .get(&key)
            .with_context(|| format!("sprite {key:?} missing from atlas"))?;

        let dest_size = MacroquadVec2::new(texture.width() * scale, texture.height() * scale);
        let params = DrawTextureParams {
            dest_size: Some(dest_size),
            ..DrawTextureParams::default()
        };

        texture::draw_texture_ex(
            texture,
            position.x,
            position.y,
            to_macroquad_color(Color::WHITE),
            params,
        );

        Ok(())
    }

    fn load_with(
        paths: &AssetPaths,
        mut loader: impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(SpriteKey::ALL.len());
        for key in SpriteKey::ALL {
            let path = paths.path(key);
            let texture = loader(key, path).with_context(|| {
                format!("failed to load sprite {key:?} from {}", path.display())
            })?;
            let _ = textures.insert(key, texture);
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let image = decode_image(path)?;
    Ok(Texture2D::from_rgba8(image.width, image.height, &image.rgba))
}

pub(crate) fn decode_image(path: &Path) -> Result<DecodedImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("failed to open image at {}", path.display()))?;
    let decoded = reader
        .decode()
        .with_context(|| format!("failed to decode image at {}", path.display()))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    ensure!(
        width > 0 && height > 0,
        "image at {} has no pixels",
        path.display()
    );
    let width = u16::try_from(width)
        .with_context(|| format!("image at {} is wider than {} px", path.display(), u16::MAX))?;
    let height = u16::try_from(height)
        .with_context(|| format!("image at {} is taller than {} px", path.display(), u16::MAX))?;

    Ok(DecodedImage {
        width,
        height,
        rgba: decoded.into_raw(),
    })
}
