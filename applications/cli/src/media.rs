//! Terminal stand-in for an audio element
//!
//! Makes no sound. It remembers what it was told and logs each command, and the
//! shell drives its notifications by hand (`tick`, `end`).

use cadenza_playback::MediaElement;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct SimulatedMediaElement {
    source: Option<String>,
    playing: bool,
    position: f64,
    volume: f64,
}

impl SimulatedMediaElement {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaElement for SimulatedMediaElement {
    fn load(&mut self, url: &str) {
        info!(url = %url, "Loading source");
        self.source = Some(url.to_string());
        self.position = 0.0;
    }

    fn play(&mut self) {
        if self.playing {
            debug!("Play while already playing");
        }
        self.playing = true;
        info!(source = ?self.source, position = self.position, "Playing");
    }

    fn pause(&mut self) {
        if !self.playing {
            debug!("Pause while already paused");
        }
        self.playing = false;
        info!(source = ?self.source, position = self.position, "Paused");
    }

    fn seek(&mut self, position_secs: f64) {
        self.position = position_secs;
        info!(position = position_secs, "Seeked");
    }

    fn set_volume(&mut self, volume: f64) {
        info!(from = self.volume, to = volume, "Volume set");
        self.volume = volume;
    }
}
