/// Lightbox open/closed state and the index of the displayed image

/// Direction of a lightbox step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightboxState {
    is_open: bool,
    /// Always within `0..count` once the lightbox has been opened
    current_index: usize,
}

impl LightboxState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Open at `requested`, wrapping past either end.
    ///
    /// Returns `false` (and stays closed) when there is nothing to show.
    pub fn open(&mut self, requested: isize, count: usize) -> bool {
        let Some(index) = wrap_index(requested, count) else {
            return false;
        };

        self.current_index = index;
        self.is_open = true;
        true
    }

    /// Close the lightbox; closing twice is fine
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Step one image in `direction`. Ignored while closed.
    pub fn navigate(&mut self, direction: Direction, count: usize) -> bool {
        if !self.is_open {
            return false;
        }
        let requested = self.current_index as isize + direction.offset();
        self.open(requested, count)
    }
}

/// Stepping before the first image lands on the last one and stepping past
/// the last lands on the first
fn wrap_index(requested: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let index = if requested < 0 {
        count - 1
    } else if requested as usize >= count {
        0
    } else {
        requested as usize
    };
    Some(index)
}
