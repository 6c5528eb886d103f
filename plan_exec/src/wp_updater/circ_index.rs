//! Index arithmetic over a closed path of fixed length

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Index arithmetic for a closed path of `len` waypoints, where index `len - 1` is followed by
/// index `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircIndex {
    len: usize
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CircIndex {
    /// Create a new indexer, `None` if `len` is zero.
    pub fn new(len: usize) -> Option<Self> {
        match len {
            0 => None,
            _ => Some(Self { len })
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Index following `index`.
    pub fn advance(&self, index: usize) -> usize {
        (index + 1) % self.len
    }

    /// Number of forward steps needed to reach `to` from `from`.
    ///
    /// This is never negative: a target behind `from` is reached by going all the way around.
    pub fn forward_dist(&self, from: usize, to: usize) -> usize {
        if to > from {
            to - from
        }
        else if to == from {
            0
        }
        else {
            self.len - from + to
        }
    }

    /// Iterate over `count` indices starting from (and including) `start`.
    pub fn window(&self, start: usize, count: usize) -> impl Iterator<Item = usize> {
        let len = self.len;
        (0..count).map(move |k| (start + k) % len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_len() {
        assert!(CircIndex::new(0).is_none());
    }

    #[test]
    fn test_advance() {
        let ci = CircIndex::new(500).unwrap();

        assert_eq!(ci.advance(0), 1);
        assert_eq!(ci.advance(498), 499);
        assert_eq!(ci.advance(499), 0);

        let single = CircIndex::new(1).unwrap();
        assert_eq!(single.advance(0), 0);
    }

    #[test]
    fn test_forward_dist() {
        let ci = CircIndex::new(500).unwrap();

        assert_eq!(ci.forward_dist(470, 490), 20);
        assert_eq!(ci.forward_dist(470, 10), 40);
        assert_eq!(ci.forward_dist(10, 470), 460);

        for i in (0..500).step_by(37) {
            assert_eq!(ci.forward_dist(i, i), 0);

            for j in (0..500).step_by(41) {
                if i != j {
                    assert_eq!(ci.forward_dist(i, j) + ci.forward_dist(j, i), 500);
                }
            }
        }
    }

    #[test]
    fn test_window_wraps() {
        let ci = CircIndex::new(10).unwrap();

        let w: Vec<usize> = ci.window(7, 5).collect();
        assert_eq!(w, vec![7, 8, 9, 0, 1]);

        assert_eq!(ci.window(3, 0).count(), 0);
    }
}
