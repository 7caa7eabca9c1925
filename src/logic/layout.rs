//! Layout calculation logic
//!
//! Pure functions for list geometry: how many account rows fit, which row a
//! mouse position lands on, and where a centered dialog goes.

use ratatui::layout::Rect;

/// Terminal lines per account row (title + code line, detail + gauge line)
pub const ROW_HEIGHT: u16 = 2;

/// Number of whole account rows that fit in a list area
///
/// # Examples
/// ```
/// use authtui::logic::layout::rows_that_fit;
///
/// assert_eq!(rows_that_fit(10), 5);
/// assert_eq!(rows_that_fit(5), 2);
/// assert_eq!(rows_that_fit(0), 0);
/// ```
pub fn rows_that_fit(height: u16) -> usize {
    (height / ROW_HEIGHT) as usize
}

/// Keep the cursor inside the scroll window
///
/// Returns the new offset (index of the first rendered visible row).
pub fn scroll_offset(cursor: usize, capacity: usize, current: usize) -> usize {
    if capacity == 0 {
        return cursor;
    }
    if cursor < current {
        cursor
    } else if cursor >= current + capacity {
        cursor + 1 - capacity
    } else {
        current
    }
}

/// Map a terminal cell to a visible row index
///
/// `area` is the inner list area (borders excluded) and `offset` the current
/// scroll offset. Positions outside the area, or below the last row, miss.
///
/// # Examples
/// ```
/// use authtui::logic::layout::row_at;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(1, 1, 40, 10);
/// assert_eq!(row_at(area, 0, 4, 5, 1), Some(0));
/// assert_eq!(row_at(area, 0, 4, 5, 3), Some(1));
/// assert_eq!(row_at(area, 2, 4, 5, 3), Some(3));
/// assert_eq!(row_at(area, 0, 2, 5, 9), None);
/// assert_eq!(row_at(area, 0, 4, 0, 3), None);
/// ```
pub fn row_at(area: Rect, offset: usize, visible_count: usize, column: u16, row: u16) -> Option<usize> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    if !inside {
        return None;
    }

    let index = offset + ((row - area.y) / ROW_HEIGHT) as usize;
    (index < visible_count).then_some(index)
}

/// Area of the given visible row, if it is on screen
pub fn row_area(area: Rect, offset: usize, index: usize) -> Option<Rect> {
    let slot = index.checked_sub(offset)?;
    let y = area.y as usize + slot * ROW_HEIGHT as usize;
    if y + ROW_HEIGHT as usize > (area.y + area.height) as usize {
        return None;
    }
    Some(Rect::new(area.x, y as u16, area.width, ROW_HEIGHT))
}

/// Fixed-size rectangle centered in `area`, clamped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
