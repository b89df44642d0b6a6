use std::path::PathBuf;

use serde::Serialize;

use crate::env::virtual_host::VirtualHost;
use crate::foundation::error::{FuzzError, FuzzResult};
use crate::fuzz::component::{AnimationState, FuzzyText, MountState, MountToken};
use crate::fuzz::layout::LayoutMetrics;
use crate::fuzz::profile::MotionProfile;
use crate::render::encode::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
use crate::render::frame::FrameRGBA;
use crate::scene::scenario::{PointerCue, Scenario};
use crate::text::backend::TextBackend;

/// Steps a [`FuzzyText`] through a scenario one display refresh at a time.
///
/// Each tick delivers font readiness and due pointer cues, then runs every frame callback the
/// component scheduled, then captures the visible surface.
pub struct Playback<'a> {
    scenario: &'a Scenario,
    component: FuzzyText,
    host: VirtualHost,
    token: MountToken,
    cues: Vec<PointerCue>,
    fonts_delivered: bool,
    next_cue: usize,
    tick: u64,
}

impl std::fmt::Debug for Playback<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playback")
            .field("component", &self.component)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl<'a> Playback<'a> {
    /// Validate the scenario and mount the component.
    pub fn new(scenario: &'a Scenario, text: &mut dyn TextBackend) -> FuzzResult<Self> {
        scenario.validate()?;
        let mut host = VirtualHost::new().with_origin(scenario.surface_origin);
        let fonts_delivered = scenario.fonts_ready_at_ms == 0;
        host.set_fonts_ready(fonts_delivered);

        let mut component =
            FuzzyText::with_seed(scenario.config.clone(), scenario.host_env(), scenario.seed);
        let token = component.mount(&mut host, text);

        // Stable, so cues sharing a timestamp keep their listed order.
        let mut cues = scenario.pointer.clone();
        cues.sort_by_key(|cue| cue.at_ms);
        Ok(Self {
            scenario,
            component,
            host,
            token,
            cues,
            fonts_delivered,
            next_cue: 0,
            tick: 0,
        })
    }

    /// Advance one refresh; returns the visible surface if one exists.
    pub fn step(&mut self, text: &mut dyn TextBackend) -> Option<FrameRGBA> {
        let now = self.scenario.tick_ms(self.tick);
        self.tick += 1;

        if !self.fonts_delivered && now >= self.scenario.fonts_ready_at_ms as f64 {
            self.fonts_delivered = true;
            self.host.set_fonts_ready(true);
            self.component
                .on_fonts_ready(self.token, &mut self.host, text);
        }

        while let Some(cue) = self.cues.get(self.next_cue) {
            if cue.at_ms as f64 > now {
                break;
            }
            self.next_cue += 1;
            let event = cue.action.to_event();
            if self.host.has_listener(event.listener_kind()) {
                self.component.on_pointer(&event, &self.host);
            }
        }

        for handle in self.host.take_due_frames() {
            self.component.on_frame(handle, now, &mut self.host);
        }

        self.component.surface().map(|s| s.to_frame())
    }

    /// The driven component.
    pub fn component(&self) -> &FuzzyText {
        &self.component
    }

    /// The virtual host.
    pub fn host(&self) -> &VirtualHost {
        &self.host
    }

    /// Release the mount.
    pub fn finish(mut self) {
        self.component.teardown(self.token, &mut self.host);
    }
}

fn fill_blank_frames(frames: Vec<Option<FrameRGBA>>) -> FuzzResult<Vec<FrameRGBA>> {
    let (width, height) = frames
        .iter()
        .flatten()
        .map(|f| (f.width, f.height))
        .next()
        .ok_or_else(|| {
            FuzzError::font("nothing was rendered: no usable font, layout, or surface")
        })?;
    Ok(frames
        .into_iter()
        .map(|f| {
            f.unwrap_or_else(|| FrameRGBA {
                width,
                height,
                data: vec![0; width as usize * height as usize * 4],
                premultiplied: true,
            })
        })
        .collect())
}

/// Capture every refresh tick of the scenario.
///
/// Ticks before the surface exists (fonts still loading) become transparent frames of the eventual
/// size. Returns **premultiplied** RGBA8 frames.
#[tracing::instrument(level = "debug", skip_all, fields(text = %scenario.config.text))]
pub fn render_frames(
    scenario: &Scenario,
    text: &mut dyn TextBackend,
) -> FuzzResult<Vec<FrameRGBA>> {
    let mut playback = Playback::new(scenario, text)?;
    let count = scenario.frame_count();
    let mut frames = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        frames.push(playback.step(text));
    }
    playback.finish();
    fill_blank_frames(frames)
}

/// The frame visible at `time_ms`.
pub fn render_frame_at(
    scenario: &Scenario,
    time_ms: f64,
    text: &mut dyn TextBackend,
) -> FuzzResult<FrameRGBA> {
    if !time_ms.is_finite() || time_ms < 0.0 || time_ms > scenario.duration_ms as f64 {
        return Err(FuzzError::validation(format!(
            "time_ms must be within 0..={}, got {time_ms}",
            scenario.duration_ms
        )));
    }
    let mut playback = Playback::new(scenario, text)?;
    let target = scenario.tick_at(time_ms);
    let mut last = None;
    for _ in 0..=target {
        last = playback.step(text);
    }
    let size = playback.component().layout().map(|l| l.surface);
    playback.finish();
    match (last, size) {
        (Some(frame), _) => Ok(frame),
        (None, Some(size)) => Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data: vec![0; size.rgba8_len()],
            premultiplied: true,
        }),
        (None, None) => Err(FuzzError::font(
            "nothing was rendered: no usable font, layout, or surface",
        )),
    }
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Output path.
    pub out_path: PathBuf,
    /// Replace an existing file.
    pub overwrite: bool,
}

/// Render the scenario and encode it as MP4 through system `ffmpeg`.
///
/// Frames are padded to even dimensions and flattened onto the scenario background.
#[tracing::instrument(level = "debug", skip_all, fields(out = %opts.out_path.display()))]
pub fn render_to_mp4(
    scenario: &Scenario,
    opts: RenderToMp4Opts,
    text: &mut dyn TextBackend,
) -> FuzzResult<()> {
    if !is_ffmpeg_on_path() {
        return Err(FuzzError::encode(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }
    let frames = render_frames(scenario, text)?;
    let Some(first) = frames.first().map(FrameRGBA::pad_to_even) else {
        return Err(FuzzError::validation("scenario produced no frames"));
    };

    let mut enc = FfmpegEncoder::new(EncodeConfig {
        width: first.width,
        height: first.height,
        fps: scenario.fps,
        out_path: opts.out_path,
        overwrite: opts.overwrite,
        background: scenario.background_rgba()?,
    })?;
    for frame in &frames {
        enc.encode_frame(&frame.pad_to_even())?;
    }
    enc.finish()
}

/// What a mount resolved to, for `inspect`.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Rendered text.
    pub text: String,
    /// Lifecycle state after mounting.
    pub state: MountState,
    /// Surface element classes.
    pub css_class: String,
    /// `font` shorthand as configured.
    pub declared_font: String,
    /// `font` shorthand after resolution.
    pub resolved_font: Option<String>,
    /// Whether the reduced-resource profile applies.
    pub reduced_resource: bool,
    /// Selected motion profile.
    pub profile: MotionProfile,
    /// Layout, when the mount initialized.
    pub layout: Option<LayoutMetrics>,
    /// Loop bookkeeping after the first tick.
    pub animation: Option<AnimationState>,
}

/// Mount the scenario with fonts ready, run one tick, and report the result.
pub fn inspect(scenario: &Scenario, text: &mut dyn TextBackend) -> FuzzResult<InspectReport> {
    let mut ready = scenario.clone();
    ready.fonts_ready_at_ms = 0;
    let mut playback = Playback::new(&ready, text)?;
    playback.step(text);

    let c = playback.component();
    let report = InspectReport {
        text: c.config().text.clone(),
        state: c.state(),
        css_class: c.config().css_class(),
        declared_font: c.config().font_shorthand(),
        resolved_font: c.style().map(|s| s.font_shorthand()),
        reduced_resource: c.env().viewport.reduced_resource(),
        profile: c.profile(),
        layout: c.layout().copied(),
        animation: c.animation_state(),
    };
    playback.finish();
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
