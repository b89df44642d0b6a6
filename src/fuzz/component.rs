use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use serde::Serialize;

use crate::env::host::{FrameHandle, Host, ListenerId, ListenerKind, PointerEvent};
use crate::env::viewport::HostEnv;
use crate::foundation::core::{IRect, Point};
use crate::fuzz::config::{RenderConfig, ResolvedStyle};
use crate::fuzz::jitter;
use crate::fuzz::layout::LayoutMetrics;
use crate::fuzz::profile::MotionProfile;
use crate::raster::bitmap::Bitmap;
use crate::raster::surface::{DrawingSurface, PixmapSurface};
use crate::text::backend::TextBackend;

/// Identifies one mount. Notifications and teardowns carrying an older token are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountToken(u64);

impl MountToken {
    /// Mount generation.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What a frame callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Strips were redrawn and the next frame scheduled.
    Drawn,
    /// Too soon after the last draw; only the next frame was scheduled.
    Throttled,
    /// Not the pending callback of a running mount.
    Ignored,
}

/// Lifecycle position of a [`FuzzyText`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountState {
    /// Not mounted.
    Detached,
    /// Mounted, waiting for fonts before initializing.
    AwaitingFonts,
    /// Initialization failed; nothing is drawn.
    Inert,
    /// Animating.
    Running,
}

/// Snapshot of the animation loop bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnimationState {
    /// Pointer or touch is over the text.
    pub hovering: bool,
    /// A frame callback is scheduled.
    pub frame_pending: bool,
    /// Attached listeners.
    pub listeners: usize,
    /// Timestamp of the last draw.
    pub last_draw_ms: Option<f64>,
    /// Draws since mount.
    pub draws: u64,
}

struct Running {
    style: ResolvedStyle,
    layout: LayoutMetrics,
    offscreen: Bitmap,
    surface: PixmapSurface,
    profile: MotionProfile,
    hovering: bool,
    pending_frame: Option<FrameHandle>,
    listeners: Vec<ListenerId>,
    last_draw_ms: Option<f64>,
    draws: u64,
    last_offsets: Vec<i32>,
}

enum Phase {
    Detached,
    AwaitingFonts,
    Inert,
    Running(Box<Running>),
}

/// Text whose rows jitter horizontally every frame, harder while hovered.
///
/// The component is driven by its host: [`mount`](Self::mount) starts a generation,
/// [`on_fonts_ready`](Self::on_fonts_ready), [`on_frame`](Self::on_frame), and
/// [`on_pointer`](Self::on_pointer) are invoked from the host's loop, and
/// [`teardown`](Self::teardown) releases everything the mount acquired. Environment failures never
/// surface as errors; the mount goes [`MountState::Inert`] instead.
pub struct FuzzyText {
    config: RenderConfig,
    env: HostEnv,
    rng: StdRng,
    generation: u64,
    phase: Phase,
}

impl std::fmt::Debug for FuzzyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyText")
            .field("config", &self.config)
            .field("env", &self.env)
            .field("generation", &self.generation)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl FuzzyText {
    /// Detached component seeded from OS entropy.
    pub fn new(config: RenderConfig, env: HostEnv) -> Self {
        Self::with_rng(config, env, StdRng::from_entropy())
    }

    /// Detached component with deterministic jitter.
    pub fn with_seed(config: RenderConfig, env: HostEnv, seed: u64) -> Self {
        Self::with_rng(config, env, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RenderConfig, env: HostEnv, rng: StdRng) -> Self {
        Self {
            config,
            env,
            rng,
            generation: 0,
            phase: Phase::Detached,
        }
    }

    /// Start a new mount, releasing the current one first.
    ///
    /// Initialization runs immediately when the host reports fonts ready; otherwise it waits for
    /// [`on_fonts_ready`](Self::on_fonts_ready) with the returned token.
    #[tracing::instrument(level = "debug", skip_all, fields(text = %self.config.text))]
    pub fn mount(&mut self, host: &mut dyn Host, text: &mut dyn TextBackend) -> MountToken {
        self.release(host);
        self.generation += 1;
        self.phase = Phase::AwaitingFonts;
        if host.fonts_ready() {
            self.initialize(host, text);
        } else {
            tracing::debug!(generation = self.generation, "waiting for fonts");
        }
        MountToken(self.generation)
    }

    /// Resume a mount that was waiting for fonts.
    pub fn on_fonts_ready(
        &mut self,
        token: MountToken,
        host: &mut dyn Host,
        text: &mut dyn TextBackend,
    ) {
        if token.0 != self.generation || !matches!(self.phase, Phase::AwaitingFonts) {
            tracing::debug!(
                token = token.0,
                generation = self.generation,
                "ignoring stale fonts-ready notification"
            );
            return;
        }
        self.initialize(host, text);
    }

    fn initialize(&mut self, host: &mut dyn Host, text: &mut dyn TextBackend) {
        self.phase = match self.try_initialize(host, text) {
            Some(running) => Phase::Running(Box::new(running)),
            None => Phase::Inert,
        };
    }

    #[tracing::instrument(level = "debug", skip_all, fields(generation = self.generation))]
    fn try_initialize(
        &mut self,
        host: &mut dyn Host,
        text: &mut dyn TextBackend,
    ) -> Option<Running> {
        let style = match self.config.resolve(&self.env) {
            Ok(style) => style,
            Err(err) => {
                tracing::debug!(%err, "style did not resolve; nothing will be drawn");
                return None;
            }
        };
        let req = style.request(&self.config.text);

        let Some(metrics) = text.measure(&req) else {
            tracing::debug!(family = %style.family, "text measurement unavailable");
            return None;
        };
        let Some(layout) = LayoutMetrics::compute(metrics, style.size_px) else {
            tracing::debug!(?metrics, "measured text has no usable extent");
            return None;
        };
        let Some(offscreen) = text.rasterize(&req, &layout) else {
            tracing::debug!(size = ?layout.offscreen, "off-screen raster unavailable");
            return None;
        };
        let Some(mut surface) = host.allocate_surface(layout.surface) else {
            tracing::debug!(size = ?layout.surface, "no drawing context for visible surface");
            return None;
        };
        surface.translate(layout.horizontal_margin, layout.vertical_margin);

        let listeners = if self.config.enable_hover {
            ListenerKind::ALL
                .iter()
                .map(|kind| host.add_listener(*kind))
                .collect()
        } else {
            Vec::new()
        };
        let pending_frame = Some(host.request_frame());

        tracing::debug!(
            surface = ?layout.surface,
            font = %style.font_shorthand(),
            "fuzzy text initialized"
        );
        Some(Running {
            style,
            layout,
            offscreen,
            surface,
            profile: MotionProfile::for_viewport(&self.env.viewport),
            hovering: false,
            pending_frame,
            listeners,
            last_draw_ms: None,
            draws: 0,
            last_offsets: Vec::new(),
        })
    }

    /// Display-refresh callback.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        host: &mut dyn Host,
    ) -> FrameOutcome {
        let Self {
            config, rng, phase, ..
        } = self;
        let Phase::Running(run) = phase else {
            return FrameOutcome::Ignored;
        };
        if run.pending_frame != Some(handle) {
            return FrameOutcome::Ignored;
        }
        run.pending_frame = None;

        if !run.profile.should_draw(run.last_draw_ms, timestamp_ms) {
            run.pending_frame = Some(host.request_frame());
            return FrameOutcome::Throttled;
        }

        let clear = jitter::clear_rect(&run.layout, config, &run.profile);
        run.surface.clear_rect(clear);

        let intensity = jitter::active_intensity(config, run.hovering, &run.profile);
        let width = run.layout.offscreen.width as i32;
        let height = run.layout.offscreen.height as i32;
        let step = run.profile.line_step.max(1) as i32;

        run.last_offsets.clear();
        let mut y = 0;
        while y < height {
            let rows = step.min(height - y);
            let dx = jitter::line_offset(intensity, run.profile.fuzz_range, rng.gen_range(0.0..1.0));
            run.surface
                .draw_image(&run.offscreen, IRect::new(0, y, width, rows), dx, y);
            run.last_offsets.push(dx);
            y += step;
        }

        run.last_draw_ms = Some(timestamp_ms);
        run.draws += 1;
        run.pending_frame = Some(host.request_frame());
        FrameOutcome::Drawn
    }

    /// Pointer/touch input from a listener this mount attached.
    pub fn on_pointer(&mut self, event: &PointerEvent, host: &dyn Host) {
        if !self.config.enable_hover {
            return;
        }
        let Phase::Running(run) = &mut self.phase else {
            return;
        };

        let client = match event {
            PointerEvent::Move { client } => Some(*client),
            PointerEvent::TouchMove { touches } => match touches.first() {
                Some(p) => Some(*p),
                None => return,
            },
            PointerEvent::Leave | PointerEvent::TouchEnd => None,
        };

        run.hovering = match client {
            Some(client) => {
                let origin = host.surface_origin();
                let local = Point::new(client.x - origin.x, client.y - origin.y);
                run.layout.hit_rect.contains(local)
            }
            None => false,
        };
    }

    /// Replace the configuration, remounting when it changed.
    pub fn update(
        &mut self,
        config: RenderConfig,
        host: &mut dyn Host,
        text: &mut dyn TextBackend,
    ) -> MountToken {
        if config == self.config {
            return MountToken(self.generation);
        }
        self.config = config;
        if matches!(self.phase, Phase::Detached) {
            return MountToken(self.generation);
        }
        self.mount(host, text)
    }

    /// Replace the environment, remounting when the resolved style or motion profile changed.
    pub fn set_env(
        &mut self,
        env: HostEnv,
        host: &mut dyn Host,
        text: &mut dyn TextBackend,
    ) -> MountToken {
        let style_changed = self.config.resolve(&self.env).ok() != self.config.resolve(&env).ok();
        let profile_changed = MotionProfile::for_viewport(&self.env.viewport)
            != MotionProfile::for_viewport(&env.viewport);
        self.env = env;
        if matches!(self.phase, Phase::Detached) || !(style_changed || profile_changed) {
            return MountToken(self.generation);
        }
        self.mount(host, text)
    }

    /// Cancel the pending frame and detach listeners.
    ///
    /// Safe to call any number of times; a token from an earlier mount is ignored.
    pub fn teardown(&mut self, token: MountToken, host: &mut dyn Host) {
        if token.0 != self.generation {
            tracing::debug!(
                token = token.0,
                generation = self.generation,
                "ignoring teardown for a superseded mount"
            );
            return;
        }
        self.release(host);
    }

    fn release(&mut self, host: &mut dyn Host) {
        if let Phase::Running(run) = std::mem::replace(&mut self.phase, Phase::Detached) {
            if let Some(handle) = run.pending_frame {
                host.cancel_frame(handle);
            }
            for id in run.listeners {
                host.remove_listener(id);
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MountState {
        match self.phase {
            Phase::Detached => MountState::Detached,
            Phase::AwaitingFonts => MountState::AwaitingFonts,
            Phase::Inert => MountState::Inert,
            Phase::Running(_) => MountState::Running,
        }
    }

    /// Token of the latest mount.
    pub fn token(&self) -> MountToken {
        MountToken(self.generation)
    }

    /// Current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current environment.
    pub fn env(&self) -> &HostEnv {
        &self.env
    }

    /// Profile the current environment selects.
    pub fn profile(&self) -> MotionProfile {
        MotionProfile::for_viewport(&self.env.viewport)
    }

    fn running(&self) -> Option<&Running> {
        match &self.phase {
            Phase::Running(run) => Some(run),
            _ => None,
        }
    }

    /// Resolved style of the running mount.
    pub fn style(&self) -> Option<&ResolvedStyle> {
        self.running().map(|r| &r.style)
    }

    /// Layout of the running mount.
    pub fn layout(&self) -> Option<&LayoutMetrics> {
        self.running().map(|r| &r.layout)
    }

    /// Off-screen raster of the running mount.
    pub fn offscreen(&self) -> Option<&Bitmap> {
        self.running().map(|r| &r.offscreen)
    }

    /// Visible surface of the running mount.
    pub fn surface(&self) -> Option<&PixmapSurface> {
        self.running().map(|r| &r.surface)
    }

    /// Whether the pointer is over the text.
    pub fn is_hovering(&self) -> bool {
        self.running().is_some_and(|r| r.hovering)
    }

    /// The scheduled frame callback, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.running().and_then(|r| r.pending_frame)
    }

    /// Per-strip offsets of the last draw, top to bottom.
    pub fn last_offsets(&self) -> &[i32] {
        self.running()
            .map(|r| r.last_offsets.as_slice())
            .unwrap_or_default()
    }

    /// Loop bookkeeping of the running mount.
    pub fn animation_state(&self) -> Option<AnimationState> {
        self.running().map(|r| AnimationState {
            hovering: r.hovering,
            frame_pending: r.pending_frame.is_some(),
            listeners: r.listeners.len(),
            last_draw_ms: r.last_draw_ms,
            draws: r.draws,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fuzz/component.rs"]
mod tests;
