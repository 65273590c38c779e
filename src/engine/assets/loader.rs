// Asset loading functionality

use super::AssetError;
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

/// Environment variable overriding the asset root
pub const ASSET_ROOT_ENV: &str = "SPRITE_ANIMATOR_ASSETS";

/// Asset root used when the environment does not name one
pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// Image file extensions the loader accepts
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Asset loader responsible for finding and decoding asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Create a loader rooted at `$SPRITE_ANIMATOR_ASSETS`, or `assets`
    pub fn from_env() -> Self {
        let root = std::env::var(ASSET_ROOT_ENV).unwrap_or_else(|_| DEFAULT_ASSET_ROOT.to_string());
        info!("Asset root: {}", root);
        Self::new(root)
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        let bytes = std::fs::read(&path).map_err(AssetError::Io)?;
        Ok(bytes)
    }

    /// Load and decode an image file
    pub fn load_image(&self, name: &str) -> Result<image::DynamicImage> {
        if !Self::is_image(name) {
            return Err(AssetError::LoadError(format!("{} is not a supported image", name)).into());
        }

        let bytes = self.load_bytes(name)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadError(format!("Failed to decode {}: {}", name, e)))?;

        Ok(image)
    }

    fn is_image(name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("stand/1all.png");

        assert_eq!(path, PathBuf::from("/game/assets/stand/1all.png"));
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let loader = AssetLoader::new("/definitely/not/here");
        let err = loader.load_bytes("stand/1all.png").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_unreadable_asset_is_io_error() {
        // A directory exists but cannot be read as a file
        let dir = std::env::temp_dir().join("sprite-animator-loader-io");
        std::fs::create_dir_all(dir.join("sheet.png")).unwrap();

        let loader = AssetLoader::new(&dir);
        let err = loader.load_bytes("sheet.png").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::Io(_))
        ));
    }

    #[test]
    fn test_image_extensions() {
        assert!(AssetLoader::is_image("walk/2all.png"));
        assert!(AssetLoader::is_image("walk/2all.JPG"));
        assert!(!AssetLoader::is_image("walk/2all.txt"));
        assert!(!AssetLoader::is_image("walk/2all"));
    }

    #[test]
    fn test_non_image_rejected_before_reading() {
        let loader = AssetLoader::new(".");
        let err = loader.load_image("Cargo.toml").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::LoadError(_))
        ));
    }

    #[test]
    fn test_decodes_png_from_disk() {
        let dir = std::env::temp_dir().join("sprite-animator-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let sheet = image::RgbaImage::new(12, 4);
        sheet.save(dir.join("sheet.png")).unwrap();

        let loader = AssetLoader::new(&dir);
        let decoded = loader.load_image("sheet.png").unwrap();
        assert_eq!(image::GenericImageView::dimensions(&decoded), (12, 4));
    }
}
