//! Read-only view of a game, handed to renderers after every change.

use std::time::Duration;

use super::fruit::Fruit;
use super::state::{GameState, Phase, Position};

/// Role of a snake segment, for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    Head,
    Body,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    pub role: SegmentRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Segments head-first
    pub segments: Vec<Segment>,
    pub fruit: Fruit,
    pub score: u32,
    pub fruits_eaten: u32,
    pub bonus_active: bool,
    pub phase: Phase,
    pub interval: Duration,
}

impl GameState {
    /// Capture the renderer-facing view of this state
    pub fn snapshot(&self) -> Snapshot {
        let last = self.snake.len() - 1;
        let segments = self
            .snake
            .body
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let role = if index == 0 {
                    SegmentRole::Head
                } else if index == last {
                    SegmentRole::Tail
                } else {
                    SegmentRole::Body
                };
                Segment { position, role }
            })
            .collect();

        Snapshot {
            segments,
            fruit: self.fruit,
            score: self.score,
            fruits_eaten: self.fruits_eaten,
            bonus_active: self.bonus_active,
            phase: self.phase,
            interval: self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::fruit::FruitKind;
    use crate::game::state::Snake;

    fn state_with_length(length: usize) -> GameState {
        GameState::new(
            Snake::new(Position::new(160, 200), Direction::Right, length),
            Fruit::new(Position::new(400, 400), FruitKind::Berry),
            Duration::from_millis(200),
        )
    }

    #[test]
    fn test_segment_roles() {
        let snapshot = state_with_length(4).snapshot();
        let roles: Vec<SegmentRole> = snapshot.segments.iter().map(|s| s.role).collect();

        assert_eq!(
            roles,
            vec![
                SegmentRole::Head,
                SegmentRole::Body,
                SegmentRole::Body,
                SegmentRole::Tail
            ]
        );
        assert_eq!(snapshot.segments[0].position, Position::new(160, 200));
        assert_eq!(snapshot.fruit.kind, FruitKind::Berry);
    }

    #[test]
    fn test_single_segment_is_head() {
        let snapshot = state_with_length(1).snapshot();
        assert_eq!(snapshot.segments.len(), 1);
        assert_eq!(snapshot.segments[0].role, SegmentRole::Head);
    }
}
