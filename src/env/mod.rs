//! The component's surroundings: viewport facts, the [`host::Host`] capability trait (frame
//! scheduling, listener registration, surface allocation), and a deterministic
//! [`virtual_host::VirtualHost`].

pub(crate) mod host;
pub(crate) mod viewport;
pub(crate) mod virtual_host;
