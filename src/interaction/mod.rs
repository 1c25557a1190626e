//! Pointer/wheel gesture interpretation.
//!
//! Raw DOM-style events are translated into [`Viewport`] operations:
//! single-touch drag pans, two-finger pinch zooms at the midpoint, and
//! wheel events route on modifier keys. The machine is a tagged state
//! enum, so illegal combinations such as pinching with one pointer are
//! unrepresentable. Mouse pointers never enter the machine; native
//! scroll/drag handling keeps them.

use serde::{Deserialize, Serialize};

use crate::core::viewport::Viewport;

/// Pan deltas at or below this magnitude are treated as sensor jitter.
pub const PAN_DEADZONE_PX: f64 = 0.5;
/// Pinch distance ratio (log scale) required to trigger a zoom step.
pub const PINCH_LOG_THRESHOLD: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    Mouse,
    Touch,
    Pen,
}

/// DOM-style pointer event, with `x`/`y` already translated into
/// content-relative pixels by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer_id: i64,
    pub pointer_type: PointerType,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Cursor x in content-relative pixels.
    pub x: f64,
    pub ctrl: bool,
    pub shift: bool,
    pub delta_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedPointer {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

impl TrackedPointer {
    fn from_event(event: PointerEvent) -> Self {
        Self {
            id: event.pointer_id,
            x: event.x,
            y: event.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    Panning {
        pointer: TrackedPointer,
    },
    Pinching {
        first: TrackedPointer,
        second: TrackedPointer,
        /// Finger distance at the last zoom step (or pinch start).
        ref_distance: f64,
        /// Viewport density at the last zoom step (or pinch start).
        ref_density: f64,
    },
}

/// Translates pointer/wheel events into viewport mutations.
///
/// All handlers run synchronously to completion; abandoning a gesture is
/// simply releasing all pointers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureInterpreter {
    state: GestureState,
}

impl Default for GestureState {
    fn default() -> Self {
        GestureState::Idle
    }
}

impl GestureInterpreter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent, viewport: &mut Viewport) {
        if event.pointer_type == PointerType::Mouse {
            return;
        }

        self.state = match self.state {
            GestureState::Idle => GestureState::Panning {
                pointer: TrackedPointer::from_event(event),
            },
            GestureState::Panning { pointer } if pointer.id != event.pointer_id => {
                let second = TrackedPointer::from_event(event);
                GestureState::Pinching {
                    first: pointer,
                    ref_distance: distance(pointer, second),
                    ref_density: viewport.pixels_per_ms(),
                    second,
                }
            }
            // Re-down of the tracked pointer re-anchors the pan; a third
            // pointer is ignored.
            GestureState::Panning { .. } => GestureState::Panning {
                pointer: TrackedPointer::from_event(event),
            },
            pinching @ GestureState::Pinching { .. } => pinching,
        };
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent, viewport: &mut Viewport) {
        if event.pointer_type == PointerType::Mouse {
            return;
        }

        match &mut self.state {
            GestureState::Idle => {}
            GestureState::Panning { pointer } => {
                if pointer.id != event.pointer_id {
                    return;
                }
                let delta_x = event.x - pointer.x;
                if delta_x.abs() > PAN_DEADZONE_PX {
                    viewport.scroll_by(-delta_x);
                }
                *pointer = TrackedPointer::from_event(event);
            }
            GestureState::Pinching {
                first,
                second,
                ref_distance,
                ref_density,
            } => {
                if first.id == event.pointer_id {
                    *first = TrackedPointer::from_event(event);
                } else if second.id == event.pointer_id {
                    *second = TrackedPointer::from_event(event);
                } else {
                    return;
                }

                let current = distance(*first, *second);
                if current <= 0.0 || *ref_distance <= 0.0 {
                    return;
                }

                // Resolve the focal time against the density the user is
                // looking at, before any override from this move applies.
                let mid_x = (first.x + second.x) / 2.0;
                let focus = viewport.scale().px_to_time(mid_x);

                // Continuous density between discrete steps keeps the
                // chart tracking the fingers instead of jumping.
                let ratio = current / *ref_distance;
                viewport.set_pixels_per_ms(*ref_density * ratio);

                if ratio.ln().abs() >= PINCH_LOG_THRESHOLD {
                    let stepped = if ratio > 1.0 {
                        viewport.zoom_in(Some(focus))
                    } else {
                        viewport.zoom_out(Some(focus))
                    };
                    if !stepped {
                        // At the end of the catalog: drop the override so
                        // the density cannot drift unbounded.
                        viewport.snap_to_catalog();
                    }
                    *ref_distance = current;
                    *ref_density = viewport.pixels_per_ms();
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent, viewport: &mut Viewport) {
        if event.pointer_type == PointerType::Mouse {
            return;
        }

        self.state = match self.state {
            GestureState::Idle => GestureState::Idle,
            GestureState::Panning { pointer } => {
                if pointer.id == event.pointer_id {
                    GestureState::Idle
                } else {
                    GestureState::Panning { pointer }
                }
            }
            GestureState::Pinching { first, second, .. } => {
                if first.id == event.pointer_id || second.id == event.pointer_id {
                    viewport.snap_to_catalog();
                    let survivor = if first.id == event.pointer_id {
                        second
                    } else {
                        first
                    };
                    GestureState::Panning { pointer: survivor }
                } else {
                    self.state
                }
            }
        };
    }

    /// Wheel routing is stateless: `ctrl` zooms at the cursor, `shift`
    /// pans by the wheel delta, unmodified wheel is reserved for native
    /// vertical scroll.
    pub fn on_wheel(&mut self, event: WheelEvent, viewport: &mut Viewport) {
        if event.ctrl {
            if !event.delta_y.is_finite() || event.delta_y == 0.0 {
                return;
            }
            let focus = viewport.scale().px_to_time(event.x);
            if event.delta_y < 0.0 {
                viewport.zoom_in(Some(focus));
            } else {
                viewport.zoom_out(Some(focus));
            }
        } else if event.shift {
            viewport.scroll_by(event.delta_y);
        }
    }
}

fn distance(a: TrackedPointer, b: TrackedPointer) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
