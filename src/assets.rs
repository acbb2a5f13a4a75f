//! Named sprite registry
//!
//! Decoding and uploading images is the platform's job, behind `ImageLoader`.
//! The game only keeps a name, a size and an opaque handle per sprite. A
//! sprite's name is its file's base name without the extension
//! (`assets/sprites/ship.png` -> `ship`).

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque handle to a texture owned by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub u32);

/// What a loader hands back for a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub handle: AssetHandle,
    pub width: u32,
    pub height: u32,
}

/// A registered sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    pub handle: AssetHandle,
    pub width: u32,
    pub height: u32,
}

/// Sprites the play screen draws
pub const GAME_SPRITES: [&str; 5] = ["ship", "shipguns", "shipthruster", "bullet", "asteroid"];
/// Sprites the menu screens draw
pub const MENU_SPRITES: [&str; 2] = ["title", "credits"];

/// Default on-disk locations, in load order
pub const SPRITE_PATHS: [&str; 7] = [
    "assets/sprites/ship.png",
    "assets/sprites/shipguns.png",
    "assets/sprites/shipthruster.png",
    "assets/sprites/bullet.png",
    "assets/sprites/asteroid.png",
    "assets/sprites/title.png",
    "assets/sprites/credits.png",
];

#[derive(Debug)]
pub enum AssetError {
    /// The platform loader failed to decode or upload the image
    Load { path: PathBuf, reason: String },
    /// No usable base name could be derived from the path
    InvalidPath { path: PathBuf },
    /// A sprite with this name is already registered
    Duplicate { name: String },
    /// A sprite the game needs was never loaded
    Missing { name: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path, reason } => {
                write!(f, "couldn't load image '{}': {}", path.display(), reason)
            }
            Self::InvalidPath { path } => {
                write!(f, "no sprite name in path '{}'", path.display())
            }
            Self::Duplicate { name } => write!(f, "sprite '{}' already loaded", name),
            Self::Missing { name } => write!(f, "sprite '{}' was never loaded", name),
        }
    }
}

impl std::error::Error for AssetError {}

/// Platform-side image decoding and texture upload
pub trait ImageLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedImage, AssetError>;
}

/// Loader for headless runs: hands out sequential handles and a fixed size
/// without touching the filesystem.
#[derive(Debug, Clone)]
pub struct PlaceholderLoader {
    next: u32,
    pub width: u32,
    pub height: u32,
}

impl PlaceholderLoader {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            next: 0,
            width,
            height,
        }
    }
}

impl ImageLoader for PlaceholderLoader {
    fn load(&mut self, _path: &Path) -> Result<LoadedImage, AssetError> {
        let handle = AssetHandle(self.next);
        self.next += 1;
        Ok(LoadedImage {
            handle,
            width: self.width,
            height: self.height,
        })
    }
}

/// Sprite name for a path: file stem, without directory or extension
pub fn sprite_name(path: &Path) -> Option<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    sprites: Vec<Sprite>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one image through `loader` and register it under its base name
    pub fn load_by_path<L: ImageLoader + ?Sized>(
        &mut self,
        loader: &mut L,
        path: impl AsRef<Path>,
    ) -> Result<AssetHandle, AssetError> {
        let path = path.as_ref();
        let name = sprite_name(path).ok_or_else(|| AssetError::InvalidPath {
            path: path.to_path_buf(),
        })?;
        if self.fetch_by_name(name).is_some() {
            return Err(AssetError::Duplicate {
                name: name.to_string(),
            });
        }

        let image = loader.load(path)?;
        log::debug!(
            "Loaded sprite '{}' ({}x{}) from {}",
            name,
            image.width,
            image.height,
            path.display()
        );
        self.sprites.push(Sprite {
            name: name.to_string(),
            handle: image.handle,
            width: image.width,
            height: image.height,
        });
        Ok(image.handle)
    }

    /// Load every path in order, stopping at the first failure
    pub fn load_all<L, P>(&mut self, loader: &mut L, paths: &[P]) -> Result<(), AssetError>
    where
        L: ImageLoader + ?Sized,
        P: AsRef<Path>,
    {
        for path in paths {
            self.load_by_path(loader, path)?;
        }
        log::info!("Loaded {} sprites", self.sprites.len());
        Ok(())
    }

    pub fn fetch_by_name(&self, name: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.name == name)
    }

    /// Fail if any of `names` is not registered
    pub fn ensure_loaded(&self, names: &[&str]) -> Result<(), AssetError> {
        match names.iter().find(|n| self.fetch_by_name(n).is_none()) {
            Some(name) => Err(AssetError::Missing {
                name: (*name).to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLoader;

    impl ImageLoader for FailingLoader {
        fn load(&mut self, path: &Path) -> Result<LoadedImage, AssetError> {
            Err(AssetError::Load {
                path: path.to_path_buf(),
                reason: "corrupt".to_string(),
            })
        }
    }

    #[test]
    fn test_sprite_name_from_path() {
        assert_eq!(sprite_name(Path::new("assets/sprites/ship.png")), Some("ship"));
        assert_eq!(sprite_name(Path::new("shipguns.png")), Some("shipguns"));
        assert_eq!(sprite_name(Path::new("a/b/asteroid")), Some("asteroid"));
        assert_eq!(sprite_name(Path::new("")), None);
    }

    #[test]
    fn test_load_and_fetch() {
        let mut loader = PlaceholderLoader::new(16, 16);
        let mut assets = AssetRegistry::new();
        assets.load_all(&mut loader, &SPRITE_PATHS).unwrap();

        assert_eq!(assets.len(), SPRITE_PATHS.len());
        let ship = assets.fetch_by_name("ship").unwrap();
        assert_eq!(ship.handle, AssetHandle(0));
        assert_eq!((ship.width, ship.height), (16, 16));
        assert_eq!(assets.fetch_by_name("credits").unwrap().handle, AssetHandle(6));
        assert!(assets.fetch_by_name("ship.png").is_none());
        assert!(assets.ensure_loaded(&GAME_SPRITES).is_ok());
        assert!(assets.ensure_loaded(&MENU_SPRITES).is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut loader = PlaceholderLoader::new(8, 8);
        let mut assets = AssetRegistry::new();
        assets.load_by_path(&mut loader, "a/ship.png").unwrap();
        let err = assets.load_by_path(&mut loader, "b/ship.bmp").unwrap_err();
        assert!(matches!(err, AssetError::Duplicate { ref name } if name == "ship"));
        assert_eq!(assets.len(), 1);
    }

    #[test]
    fn test_loader_failure_propagates() {
        let mut assets = AssetRegistry::new();
        let err = assets
            .load_by_path(&mut FailingLoader, "assets/sprites/bullet.png")
            .unwrap_err();
        assert!(err.to_string().contains("bullet.png"));
        assert!(assets.is_empty());
    }

    #[test]
    fn test_ensure_loaded_reports_missing() {
        let mut loader = PlaceholderLoader::new(8, 8);
        let mut assets = AssetRegistry::new();
        assets.load_by_path(&mut loader, "ship.png").unwrap();
        let err = assets.ensure_loaded(&GAME_SPRITES).unwrap_err();
        assert!(matches!(err, AssetError::Missing { ref name } if name == "shipguns"));
    }
}
