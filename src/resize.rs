//! Pointer-driven container resizing.
//!
//! ```text
//! Idle --down on handle--> Active --move--> Active (emits Resized)
//!   ^                        |
//!   +------up / cancel-------+
//! ```
//!
//! Global pointer capture is scoped: [`PointerCapture::capture`] runs once on
//! `Idle -> Active` and returns a guard. The guard lives inside the active
//! state, so it is dropped exactly once on whichever exit happens first:
//! pointer-up, pointer-cancel, [`ResizeSession::cancel`], or dropping the
//! session itself.

use crate::constraint::{Extent, Point};

/// Source of global pointer capture.
///
/// The returned guard must undo everything the capture did (listener
/// registration, cursor and text-selection overrides) when dropped.
pub trait PointerCapture {
    type Guard;

    fn capture(&mut self) -> Self::Guard;
}

/// No-op capture for callers that route events themselves.
impl PointerCapture for () {
    type Guard = ();

    fn capture(&mut self) -> Self::Guard {}
}

/// What a pointer-down landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerTarget {
    /// The container's resize affordance.
    ResizeHandle,
    Elsewhere,
}

/// Pointer input delivered to the session.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEvent {
    Down {
        pointer_id: u32,
        position: Point,
        target: PointerTarget,
    },
    Move {
        pointer_id: u32,
        position: Point,
    },
    Up {
        pointer_id: u32,
        position: Point,
    },
    /// The platform aborted the gesture. Ends any session regardless of
    /// pointer id.
    Cancel { pointer_id: u32 },
}

/// Observable lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizePhase {
    Idle,
    Active {
        pointer_id: u32,
        start_pointer: Point,
        start_container: Extent,
    },
}

/// Why an event changed nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeNoopReason {
    /// Move, up, or cancel with no drag in progress.
    IdleWithoutActiveDrag,
    /// Pointer-down away from the resize handle.
    OutsideHandle,
    /// Move or up from a pointer other than the one driving the drag.
    PointerMismatch,
}

/// Result of feeding one event to the session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResizeEffect {
    /// `Idle -> Active`; capture acquired.
    Started,
    /// Pointer-down while already active: the drag re-anchors at the new
    /// pointer and current container, keeping the existing capture.
    Restarted,
    /// Proposed container size for one move.
    Resized(Extent),
    /// `Active -> Idle` via pointer-up; capture released.
    Ended,
    /// `Active -> Idle` via cancel; capture released.
    Canceled,
    Noop(ResizeNoopReason),
}

struct ActiveDrag<G> {
    pointer_id: u32,
    start_pointer: Point,
    start_container: Extent,
    _guard: G,
}

/// Drag-resize state machine.
pub struct ResizeSession<C: PointerCapture> {
    capture: C,
    floor: Extent,
    active: Option<ActiveDrag<C::Guard>>,
}

impl<C: PointerCapture> ResizeSession<C> {
    /// Idle session. Proposed sizes never go below `floor` on either axis.
    pub fn new(capture: C, floor: Extent) -> Self {
        Self {
            capture,
            floor: floor.sanitized(),
            active: None,
        }
    }

    pub fn phase(&self) -> ResizePhase {
        match &self.active {
            None => ResizePhase::Idle,
            Some(drag) => ResizePhase::Active {
                pointer_id: drag.pointer_id,
                start_pointer: drag.start_pointer,
                start_container: drag.start_container,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn floor(&self) -> Extent {
        self.floor
    }

    /// The capture source, e.g. for inspecting listener state.
    pub fn capture_source(&self) -> &C {
        &self.capture
    }

    /// Feed one pointer event. `container` is the container size right now;
    /// it is only read on pointer-down.
    pub fn handle(&mut self, event: PointerEvent, container: Extent) -> ResizeEffect {
        match event {
            PointerEvent::Down {
                pointer_id,
                position,
                target,
            } => {
                if target != PointerTarget::ResizeHandle {
                    return ResizeEffect::Noop(ResizeNoopReason::OutsideHandle);
                }
                if let Some(drag) = &mut self.active {
                    drag.pointer_id = pointer_id;
                    drag.start_pointer = position;
                    drag.start_container = container;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(pointer_id, "resize session restarted");
                    return ResizeEffect::Restarted;
                }
                let guard = self.capture.capture();
                self.active = Some(ActiveDrag {
                    pointer_id,
                    start_pointer: position,
                    start_container: container,
                    _guard: guard,
                });
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    pointer_id,
                    width = container.width,
                    height = container.height,
                    "resize session started"
                );
                ResizeEffect::Started
            }
            PointerEvent::Move {
                pointer_id,
                position,
            } => {
                let Some(drag) = &self.active else {
                    return ResizeEffect::Noop(ResizeNoopReason::IdleWithoutActiveDrag);
                };
                if drag.pointer_id != pointer_id {
                    return ResizeEffect::Noop(ResizeNoopReason::PointerMismatch);
                }
                let (dx, dy) = position.delta_from(drag.start_pointer);
                let proposed = Extent::new(
                    drag.start_container.width + dx,
                    drag.start_container.height + dy,
                );
                ResizeEffect::Resized(proposed.clamp_min(self.floor))
            }
            PointerEvent::Up { pointer_id, .. } => match &self.active {
                None => ResizeEffect::Noop(ResizeNoopReason::IdleWithoutActiveDrag),
                Some(drag) if drag.pointer_id != pointer_id => {
                    ResizeEffect::Noop(ResizeNoopReason::PointerMismatch)
                }
                Some(_) => {
                    self.release();
                    ResizeEffect::Ended
                }
            },
            PointerEvent::Cancel { .. } => {
                if self.cancel() {
                    ResizeEffect::Canceled
                } else {
                    ResizeEffect::Noop(ResizeNoopReason::IdleWithoutActiveDrag)
                }
            }
        }
    }

    /// Abort any active drag. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.active.is_some();
        self.release();
        was_active
    }

    fn release(&mut self) {
        if self.active.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("resize session ended");
        }
    }
}

impl<C: PointerCapture + core::fmt::Debug> core::fmt::Debug for ResizeSession<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeSession")
            .field("capture", &self.capture)
            .field("floor", &self.floor)
            .field("phase", &self.phase())
            .finish()
    }
}
