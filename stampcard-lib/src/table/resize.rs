//! Column resize gesture state.

use crate::config::MIN_COLUMN_WIDTH;

/// Cursor the host should show while the pointer is captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Horizontal resize cursor, shown for the whole drag.
    ColumnResize,
}

/// An in-progress resize drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeDrag {
    /// Column being resized.
    pub column: String,
    /// Pointer X where the drag started.
    pub start_x: i32,
    /// Column width when the drag started.
    pub start_width: u32,
}

impl ResizeDrag {
    /// Width for the pointer at `x`, never below [`MIN_COLUMN_WIDTH`].
    pub fn width_at(&self, x: i32) -> u32 {
        let delta = i64::from(x) - i64::from(self.start_x);
        let width = (i64::from(self.start_width) + delta).max(i64::from(MIN_COLUMN_WIDTH));
        u32::try_from(width).unwrap_or(u32::MAX)
    }
}

/// Resize state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing(ResizeDrag),
}

impl ResizeState {
    pub fn is_resizing(&self) -> bool {
        matches!(self, ResizeState::Resizing(_))
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<&ResizeDrag> {
        match self {
            ResizeState::Resizing(drag) => Some(drag),
            ResizeState::Idle => None,
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        if self.is_resizing() {
            CursorStyle::ColumnResize
        } else {
            CursorStyle::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_pointer_delta() {
        let drag = ResizeDrag {
            column: "name".into(),
            start_x: 100,
            start_width: 200,
        };
        assert_eq!(drag.width_at(150), 250);
        assert_eq!(drag.width_at(60), 160);
    }

    #[test]
    fn width_never_drops_below_floor() {
        let drag = ResizeDrag {
            column: "name".into(),
            start_x: 500,
            start_width: 150,
        };
        assert_eq!(drag.width_at(0), MIN_COLUMN_WIDTH);
        assert_eq!(drag.width_at(i32::MIN), MIN_COLUMN_WIDTH);
    }
}
