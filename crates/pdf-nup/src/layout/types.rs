//! Layout data types for N-up composition
//!
//! These types sit between the pure slot geometry and the sinks that
//! actually paint sheets (preview images or a PDF writer).

/// A rectangular area in points, origin at the bottom-left of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// True if the two rectangles share interior area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// A placement region on a sheet for exactly one source page
pub type Slot = Rect;

/// Slot geometry for one sheet configuration.
///
/// Slots are stored in fill order: left to right along the bottom row,
/// then the next row up.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Sheet width in points
    pub sheet_width_pt: f32,
    /// Sheet height in points
    pub sheet_height_pt: f32,
    /// Slots in fill order
    pub slots: Vec<Slot>,
}

impl LayoutPlan {
    /// Number of pages placed on each sheet
    pub fn pages_per_sheet(&self) -> usize {
        self.slots.len()
    }
}

/// One page assigned to one slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAssignment {
    /// Position of the slot in fill order
    pub slot_index: usize,
    /// Source page index placed into the slot
    pub page_index: usize,
}

/// The pages that land on one output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetAssignment {
    /// Zero-based sheet number
    pub sheet_index: usize,
    /// Occupied slots, in fill order
    pub slots: Vec<SlotAssignment>,
    /// Slots left empty (only ever non-zero on the last sheet)
    pub empty_slots: usize,
}
