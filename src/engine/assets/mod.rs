// Asset loading
//
// Resolves sprite-sheet files under an asset root and decodes them into
// images ready for upload.

mod loader;

pub use loader::AssetLoader;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Invalid sprite sheet {name}: {reason}")]
    InvalidSheet { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("stand/1all.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: stand/1all.png");

        let err = AssetError::InvalidSheet {
            name: "walk".to_string(),
            reason: "zero frames".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid sprite sheet walk: zero frames");
    }
}
