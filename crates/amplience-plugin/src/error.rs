//! Error types for amplience-plugin

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config error from amplience-config
    #[error(transparent)]
    Config(#[from] amplience_config::Error),

    /// Render error from amplience-render
    #[error(transparent)]
    Render(#[from] amplience_render::Error),
}

impl Error {
    /// The underlying config error, looking through render errors.
    pub fn config_error(&self) -> Option<&amplience_config::Error> {
        match self {
            Error::Config(err) | Error::Render(amplience_render::Error::Config(err)) => Some(err),
            Error::Render(_) => None,
        }
    }
}
