//! Media element abstraction
//!
//! Abstracts the single streaming audio element (browser `<audio>`, native
//! player, ...) that the playback controller drives.

/// Single-stream media element
///
/// Commands are fire-and-forget: the element reports progress, metadata and
/// end-of-track asynchronously as [`crate::MediaEvent`]s. Only the
/// [`crate::PlaybackController`] may call these methods.
#[cfg_attr(test, mockall::automock)]
pub trait MediaElement: Send {
    /// Replace the source and start loading it
    ///
    /// Duration is unknown until the element reports metadata for the new source.
    fn load(&mut self, url: &str);

    /// Start or resume output
    fn play(&mut self);

    /// Pause output, keeping position
    fn pause(&mut self);

    /// Jump to an absolute position
    fn seek(&mut self, position_secs: f64);

    /// Set output level (0.0 - 1.0)
    fn set_volume(&mut self, volume: f64);
}
