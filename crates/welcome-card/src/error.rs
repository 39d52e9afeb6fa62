use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ComposeError>;

#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    #[error("background image not found: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("failed to load background image {}: {source}", .path.display())]
    Background {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read avatar: {0}")]
    AvatarFetch(String),

    #[error("failed to encode welcome image: {0}")]
    Encode(#[from] image::ImageError),
}

impl ComposeError {
    pub fn avatar_fetch(msg: impl Into<String>) -> Self {
        Self::AvatarFetch(msg.into())
    }
}
