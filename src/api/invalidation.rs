use serde::{Deserialize, Serialize};

/// Input that changed since the last drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    Series,
    Viewport,
    Selection,
    Style,
    Status,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Series => 1 << 0,
            Self::Viewport => 1 << 1,
            Self::Selection => 1 << 2,
            Self::Style => 1 << 3,
            Self::Status => 1 << 4,
        }
    }
}

/// Bitmask of pending invalidation topics.
///
/// The frame scheduler only redraws while this is non-empty, so an idle chart
/// costs nothing per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Series.bit()
        | InvalidationTopic::Viewport.bit()
        | InvalidationTopic::Selection.bit()
        | InvalidationTopic::Style.bit()
        | InvalidationTopic::Status.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationTopic, InvalidationTopics};

    #[test]
    fn topics_accumulate() {
        let topics = InvalidationTopics::none()
            .with_topic(InvalidationTopic::Series)
            .with_topic(InvalidationTopic::Selection);
        assert!(topics.contains_topic(InvalidationTopic::Series));
        assert!(topics.contains_topic(InvalidationTopic::Selection));
        assert!(!topics.contains_topic(InvalidationTopic::Style));
        assert!(!topics.is_none());
        assert!(InvalidationTopics::all().contains_topic(InvalidationTopic::Status));
    }
}
