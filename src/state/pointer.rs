use super::data::Position;

/// Latest pointer position, last write wins
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Position,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, position: Position) {
        self.position = position;
    }

    pub fn current_position(&self) -> Position {
        self.position
    }
}
