use std::fmt;

/// Names of the five digits of a hand.
///
/// The declaration order is significant: profile merges walk fingers in
/// this order, so later fingers never affect earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandFinger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl HandFinger {
    /// Every finger, in enum order.
    pub const ALL: [HandFinger; 5] = [
        HandFinger::Thumb,
        HandFinger::Index,
        HandFinger::Middle,
        HandFinger::Ring,
        HandFinger::Pinky,
    ];

    #[inline]
    pub fn iter() -> impl Iterator<Item = HandFinger> {
        Self::ALL.into_iter()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HandFinger::Thumb => "Thumb",
            HandFinger::Index => "Index",
            HandFinger::Middle => "Middle",
            HandFinger::Ring => "Ring",
            HandFinger::Pinky => "Pinky",
        }
    }
}

impl fmt::Display for HandFinger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
