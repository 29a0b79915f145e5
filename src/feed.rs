//! Live position feed
//!
//! The animator publishes the three body positions every frame; other page
//! components (the sign-up modal's glows) read the latest value. Last write
//! wins and no history is kept.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use crate::consts::ORB_COUNT;

/// Output port for per-frame body positions
pub trait PositionSink {
    fn publish(&self, positions: [Vec2; ORB_COUNT]);
}

/// Writer side of the feed, owned by the animator
#[derive(Debug, Clone, Default)]
pub struct LiveFeed {
    latest: Rc<Cell<Option<[Vec2; ORB_COUNT]>>>,
}

/// Read-only view of the feed handed to consumers
#[derive(Debug, Clone)]
pub struct FeedReader {
    latest: Rc<Cell<Option<[Vec2; ORB_COUNT]>>>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reader(&self) -> FeedReader {
        FeedReader {
            latest: Rc::clone(&self.latest),
        }
    }
}

impl PositionSink for LiveFeed {
    fn publish(&self, positions: [Vec2; ORB_COUNT]) {
        self.latest.set(Some(positions));
    }
}

impl FeedReader {
    /// Most recent positions, `None` before the first frame
    pub fn latest(&self) -> Option<[Vec2; ORB_COUNT]> {
        self.latest.get()
    }

    /// Positions flattened as x0, y0, x1, y1, x2, y2 (empty before the first frame)
    pub fn flattened(&self) -> Vec<f32> {
        self.latest()
            .map(|ps| ps.iter().flat_map(|p| [p.x, p.y]).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let feed = LiveFeed::new();
        let reader = feed.reader();
        assert_eq!(reader.latest(), None);
        assert!(reader.flattened().is_empty());

        feed.publish([Vec2::ZERO, Vec2::ONE, Vec2::new(2.0, 3.0)]);
        feed.publish([Vec2::ONE, Vec2::new(4.0, 5.0), Vec2::new(6.0, 7.0)]);

        assert_eq!(reader.latest(), Some([Vec2::ONE, Vec2::new(4.0, 5.0), Vec2::new(6.0, 7.0)]));
        assert_eq!(reader.flattened(), vec![1.0, 1.0, 4.0, 5.0, 6.0, 7.0]);
    }
}
