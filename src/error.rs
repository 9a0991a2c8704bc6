use thiserror::Error;

/// Fault raised while a session is playing
///
/// The sink has already been forced idle and released when this is returned.
#[derive(Debug, Error)]
pub enum PlaybackError<E> {
    #[error("output sink fault: {0:?}")]
    Sink(E),
}

/// Failure of a by-name playback request
#[derive(Debug, Error)]
pub enum SessionError<A, E> {
    /// The name does not match any built-in effect
    #[error("unknown effect")]
    UnknownEffect,
    /// The output line could not be acquired; nothing was played
    #[error("output line unavailable: {0:?}")]
    SinkUnavailable(A),
    /// The session started and then failed
    #[error("{0}")]
    Playback(PlaybackError<E>),
}

impl<A, E> From<PlaybackError<E>> for SessionError<A, E> {
    fn from(err: PlaybackError<E>) -> Self {
        Self::Playback(err)
    }
}
