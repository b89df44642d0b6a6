//! Static image asset maintenance.

pub(crate) mod webp;
