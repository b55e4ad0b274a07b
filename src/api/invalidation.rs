use serde::{Deserialize, Serialize};

/// Ordered repaint classes for one chart.
///
/// Higher levels imply every lower one: a data change also relayouts and
/// repaints the cursor layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    /// Hover marker only; geometry is reused.
    Cursor,
    /// Viewport changed; samples and domain are reused.
    Layout,
    /// Strategy, lap count or domain source changed.
    Data,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}
