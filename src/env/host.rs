use crate::foundation::core::{PixelSize, Point};
use crate::raster::surface::PixmapSurface;

/// Cancellable handle for one scheduled display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for one registered input listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Input listeners the renderer attaches when hover is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    /// Pointer moved over the surface.
    PointerMove,
    /// Pointer left the surface.
    PointerLeave,
    /// Touch moved over the surface.
    TouchMove,
    /// Touch ended.
    TouchEnd,
}

impl ListenerKind {
    /// Every kind, in attachment order.
    pub const ALL: [Self; 4] = [
        Self::PointerMove,
        Self::PointerLeave,
        Self::TouchMove,
        Self::TouchEnd,
    ];
}

/// Input delivered to the renderer, in client (page) coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to `client`.
    Move {
        /// Pointer position.
        client: Point,
    },
    /// Pointer left the surface.
    Leave,
    /// Active touches moved; only the first is considered.
    TouchMove {
        /// Touch positions.
        touches: Vec<Point>,
    },
    /// All touches ended.
    TouchEnd,
}

impl PointerEvent {
    /// The listener kind that receives this event.
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            Self::Move { .. } => ListenerKind::PointerMove,
            Self::Leave => ListenerKind::PointerLeave,
            Self::TouchMove { .. } => ListenerKind::TouchMove,
            Self::TouchEnd => ListenerKind::TouchEnd,
        }
    }
}

/// Capabilities the renderer borrows from its host environment.
///
/// Everything here is single-threaded and cooperative: the host invokes the renderer's callbacks
/// (`on_fonts_ready`, `on_frame`, `on_pointer`) from its own loop.
pub trait Host {
    /// Whether font assets have finished loading.
    fn fonts_ready(&self) -> bool;

    /// Schedule one callback for the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled callback; unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Attach an input listener to the surface element.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Detach a listener; unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);

    /// On-screen origin of the surface element in client coordinates.
    fn surface_origin(&self) -> Point;

    /// Allocate the visible surface and its 2D context; `None` when unavailable.
    fn allocate_surface(&mut self, size: PixelSize) -> Option<PixmapSurface> {
        PixmapSurface::allocate(size)
    }
}
