use crate::interact::Effect;

pub const LABEL_PLAYING: &str = "Stop";
pub const LABEL_PAUSED: &str = "Play";
pub const LABEL_MUTED: &str = "Unmute";
pub const LABEL_UNMUTED: &str = "Mute";

#[derive(Debug, Clone, PartialEq)]
pub enum VideoEvent {
    /// The element started playing, whoever asked for it.
    Played,
    /// The element paused, whoever asked for it.
    Paused,
    PlayClicked,
    MuteClicked,
    FullscreenClicked,
    FullscreenChanged(bool),
    MetadataLoaded { duration: f64 },
    TimeUpdate(f64),
    /// The scrub control was moved to this position.
    Scrubbed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenIcon {
    Enter,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoEffect {
    SetPlayLabel(&'static str),
    Play,
    Pause,
    SetMuted(bool),
    SetMuteLabel(&'static str),
    EnterFullscreen,
    ExitFullscreen,
    SetNativeControls(bool),
    SetFullscreenIcon(FullscreenIcon),
    SetTimelineMax(f64),
    SetTimeline(f64),
    Seek(f64),
    SetTimeText(String),
}

/// Custom transport controls for one inline video.
///
/// Videos start autoplaying and muted. The play label follows the element's
/// own play/pause events rather than the button, so changes made elsewhere
/// (native fullscreen controls, the browser) keep it in sync.
#[derive(Debug, Clone)]
pub struct VideoTransport {
    index: usize,
    playing: bool,
    muted: bool,
    fullscreen: bool,
    position: f64,
    duration: Option<f64>,
}

impl VideoTransport {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            playing: true,
            muted: true,
            fullscreen: false,
            position: 0.0,
            duration: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn handle(&mut self, event: VideoEvent) -> Vec<Effect> {
        let effects = match event {
            VideoEvent::Played => {
                self.playing = true;
                vec![VideoEffect::SetPlayLabel(LABEL_PLAYING)]
            }
            VideoEvent::Paused => {
                self.playing = false;
                vec![VideoEffect::SetPlayLabel(LABEL_PAUSED)]
            }
            VideoEvent::PlayClicked => match self.playing {
                true => vec![VideoEffect::Pause],
                false => vec![VideoEffect::Play],
            },
            VideoEvent::MuteClicked => {
                self.muted = !self.muted;
                let label = if self.muted { LABEL_MUTED } else { LABEL_UNMUTED };
                vec![VideoEffect::SetMuted(self.muted), VideoEffect::SetMuteLabel(label)]
            }
            VideoEvent::FullscreenClicked => match self.fullscreen {
                true => vec![VideoEffect::ExitFullscreen],
                false => vec![VideoEffect::EnterFullscreen],
            },
            VideoEvent::FullscreenChanged(fullscreen) => {
                self.fullscreen = fullscreen;
                let icon = match fullscreen {
                    true => FullscreenIcon::Exit,
                    false => FullscreenIcon::Enter,
                };
                vec![
                    VideoEffect::SetNativeControls(fullscreen),
                    VideoEffect::SetFullscreenIcon(icon),
                ]
            }
            VideoEvent::MetadataLoaded { duration } => {
                if !(duration.is_finite() && duration > 0.0) {
                    return vec![];
                }
                self.duration = Some(duration);
                vec![
                    VideoEffect::SetTimelineMax(duration),
                    VideoEffect::SetTimeText(self.time_text()),
                ]
            }
            VideoEvent::TimeUpdate(position) => {
                self.position = position;
                vec![
                    VideoEffect::SetTimeline(position),
                    VideoEffect::SetTimeText(self.time_text()),
                ]
            }
            VideoEvent::Scrubbed(position) => {
                let position = if position.is_nan() { 0.0 } else { position };
                let upper = self.duration.unwrap_or(f64::MAX);
                self.position = position.clamp(0.0, upper);
                vec![
                    VideoEffect::Seek(self.position),
                    VideoEffect::SetTimeText(self.time_text()),
                ]
            }
        };

        effects
            .into_iter()
            .map(|effect| Effect::Video {
                index: self.index,
                effect,
            })
            .collect()
    }

    fn time_text(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.position),
            format_time(self.duration.unwrap_or(0.0))
        )
    }
}

/// `m:ss`, with `0:00` for anything that isn't a usable number of seconds.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let seconds = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{seconds:02}")
}
