//! JSON scenario files: a [`RenderConfig`](crate::RenderConfig) plus the environment, fonts,
//! timeline, and pointer cues used to drive it offline.

pub(crate) mod scenario;
