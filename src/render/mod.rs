//! Offline output: captured frames, PNG/MP4 writers, and the scenario playback pipeline.

pub(crate) mod encode;
pub(crate) mod frame;
pub(crate) mod pipeline;
