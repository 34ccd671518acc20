use std::cell::Cell;
use std::rc::Rc;

pub const MIN_RATIO: f32 = 20.0;
pub const MAX_RATIO: f32 = 80.0;
pub const DEFAULT_RATIO: f32 = 35.0;

/// Tracks global pointer listeners (pointer-move and pointer-release
/// observed outside the divider) held by drag gestures.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    attached: Rc<Cell<usize>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self) -> ListenerGuard {
        self.attached.set(self.attached.get() + 1);
        log::trace!("global pointer listeners attached ({})", self.attached.get());
        ListenerGuard {
            attached: Rc::clone(&self.attached),
        }
    }

    pub fn attached(&self) -> usize {
        self.attached.get()
    }
}

/// Detaches its listeners when dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    attached: Rc<Cell<usize>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.attached.set(self.attached.get().saturating_sub(1));
        log::trace!("global pointer listeners detached ({})", self.attached.get());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerPhase {
    Idle,
    Resizing,
}

#[derive(Debug)]
enum DividerState {
    Idle,
    Resizing { _listeners: ListenerGuard },
}

/// Draggable divider between the list pane and the detail pane.
///
/// `ratio` is the list pane width as a percentage of the container.
#[derive(Debug)]
pub struct SplitPaneController {
    ratio: f32,
    state: DividerState,
    listeners: ListenerRegistry,
}

pub fn accepts_ratio(ratio: f32) -> bool {
    (MIN_RATIO..=MAX_RATIO).contains(&ratio)
}

/// Pointer position as a percentage of the container width.
///
/// Computed in `f64` so a pointer sitting exactly on a range edge lands on it.
pub fn position_from_pointer(pointer_x: f32, container_left: f32, container_width: f32) -> Option<f64> {
    if !(container_width > 0.0) {
        return None;
    }
    let offset = f64::from(pointer_x) - f64::from(container_left);
    Some(offset * 100.0 / f64::from(container_width))
}

fn accepts_position(position: f64) -> bool {
    (f64::from(MIN_RATIO)..=f64::from(MAX_RATIO)).contains(&position)
}

impl SplitPaneController {
    pub fn new(initial_ratio: f32, listeners: ListenerRegistry) -> Self {
        let ratio = if accepts_ratio(initial_ratio) {
            initial_ratio
        } else {
            DEFAULT_RATIO
        };
        Self {
            ratio,
            state: DividerState::Idle,
            listeners,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn phase(&self) -> DividerPhase {
        match self.state {
            DividerState::Idle => DividerPhase::Idle,
            DividerState::Resizing { .. } => DividerPhase::Resizing,
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.phase() == DividerPhase::Resizing
    }

    /// Pointer pressed on the divider: `idle -> resizing`.
    pub fn press(&mut self) {
        if let DividerState::Idle = self.state {
            self.state = DividerState::Resizing {
                _listeners: self.listeners.attach(),
            };
        }
    }

    /// Returns true when the ratio changed. Positions outside
    /// [`MIN_RATIO`, `MAX_RATIO`] are rejected, not clamped.
    pub fn pointer_moved(&mut self, pointer_x: f32, container_left: f32, container_width: f32) -> bool {
        if !self.is_resizing() {
            return false;
        }
        match position_from_pointer(pointer_x, container_left, container_width) {
            Some(position) if accepts_position(position) => {
                self.ratio = position as f32;
                true
            }
            _ => false,
        }
    }

    /// Any release ends the drag: `resizing -> idle`.
    pub fn release(&mut self) {
        self.state = DividerState::Idle;
    }
}
