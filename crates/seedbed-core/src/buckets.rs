//! Progress-announcement milestone tracking.

/// Tracks which population milestones ("buckets") have been announced
/// during one seeding episode and which is due next.
///
/// The bucket list is a strictly ascending set of player counts, e.g.
/// `[10, 20, 30]`. Within an episode the cursor only ever moves forward:
/// `prev_announced` never decreases, and once the last bucket has fired
/// the sequencer stays quiet until [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSequencer {
    buckets: Vec<u32>,
    prev_announced: u32,
    next_bucket: Option<u32>,
    last_bucket_done: bool,
}

impl BucketSequencer {
    /// Creates a sequencer over a strictly ascending bucket list. An
    /// empty list is valid and never announces.
    pub fn new(buckets: Vec<u32>) -> Self {
        let next_bucket = buckets.first().copied();
        Self {
            buckets,
            prev_announced: 0,
            next_bucket,
            last_bucket_done: false,
        }
    }

    /// The largest bucket not exceeding `total_players`, or `None` while
    /// the count is still below the smallest bucket.
    pub fn catch_up_bucket(&self, total_players: u32) -> Option<u32> {
        self.buckets
            .iter()
            .rev()
            .find(|&&bucket| bucket <= total_players)
            .copied()
    }

    /// Re-aims the cursor after the population may have moved several
    /// buckets at once (typically on re-entry after the post-seed
    /// buffer). Jumps `next_bucket` forward to the catch-up bucket so one
    /// announcement covers the ground gained, instead of replaying every
    /// smaller milestone. Never moves the cursor backwards; a bucket that
    /// already fired stays fired.
    pub fn resync(&mut self, total_players: u32) {
        let Some(caught_up) = self.catch_up_bucket(total_players) else {
            return;
        };
        if let Some(next) = self.next_bucket {
            if caught_up > next {
                self.next_bucket = Some(caught_up);
            }
        }
    }

    /// Whether an announcement is due at this player count.
    pub fn should_announce(&self, total_players: u32) -> bool {
        let Some(next) = self.next_bucket else {
            return false;
        };
        !self.last_bucket_done
            && total_players > self.prev_announced
            && total_players >= next
    }

    /// Fires the pending announcement if one is due, advancing the
    /// cursor. Returns the bucket that fired.
    pub fn try_announce(&mut self, total_players: u32) -> Option<u32> {
        if !self.should_announce(total_players) {
            return None;
        }
        let bucket = self.next_bucket?;
        self.prev_announced = bucket;
        if Some(&bucket) == self.buckets.last() {
            self.last_bucket_done = true;
        } else {
            self.next_bucket =
                self.buckets.iter().copied().find(|&b| b > bucket);
        }
        Some(bucket)
    }

    /// Rewinds to the initial cursor for a new seeding episode.
    pub fn reset(&mut self) {
        self.prev_announced = 0;
        self.next_bucket = self.buckets.first().copied();
        self.last_bucket_done = false;
    }

    pub fn prev_announced(&self) -> u32 {
        self.prev_announced
    }

    pub fn next_bucket(&self) -> Option<u32> {
        self.next_bucket
    }

    pub fn last_bucket_done(&self) -> bool {
        self.last_bucket_done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_up_lands_on_largest_passed_bucket() {
        let seq = BucketSequencer::new(vec![10, 20, 30, 40]);
        assert_eq!(seq.catch_up_bucket(37), Some(30));
        assert_eq!(seq.catch_up_bucket(11), Some(10));
        assert_eq!(seq.catch_up_bucket(20), Some(20));
        assert_eq!(seq.catch_up_bucket(21), Some(20));
        assert_eq!(seq.catch_up_bucket(30), Some(30));
    }

    #[test]
    fn test_catch_up_below_smallest_is_none() {
        let seq = BucketSequencer::new(vec![10, 20, 30, 40]);
        assert_eq!(seq.catch_up_bucket(3), None);
    }

    #[test]
    fn test_catch_up_beyond_largest_clamps() {
        let seq = BucketSequencer::new(vec![10, 20, 30]);
        assert_eq!(seq.catch_up_bucket(34), Some(30));
        assert_eq!(seq.catch_up_bucket(500), Some(30));
    }

    #[test]
    fn test_empty_bucket_list_never_announces() {
        let mut seq = BucketSequencer::new(vec![]);
        assert_eq!(seq.catch_up_bucket(100), None);
        assert!(!seq.should_announce(100));
        assert_eq!(seq.try_announce(100), None);
    }

    #[test]
    fn test_boundary_count_reaches_bucket() {
        let mut seq = BucketSequencer::new(vec![10, 20]);
        assert!(!seq.should_announce(9));
        assert!(seq.should_announce(10));
        assert_eq!(seq.try_announce(10), Some(10));
    }

    #[test]
    fn test_growing_population_announces_each_bucket_once() {
        let mut seq = BucketSequencer::new(vec![10, 20, 30]);
        let mut fired = Vec::new();

        for total in [5u32, 12, 12, 25, 31, 35, 40] {
            seq.resync(total);
            if let Some(bucket) = seq.try_announce(total) {
                fired.push((total, bucket));
            }
        }

        assert_eq!(fired, vec![(12, 10), (25, 20), (31, 30)]);
        assert!(seq.last_bucket_done());
    }

    #[test]
    fn test_resync_skips_straight_to_relevant_milestone() {
        // Population came back at 37 after a buffered re-entry; the
        // smaller milestones must not be replayed one by one.
        let mut seq = BucketSequencer::new(vec![10, 20, 30, 40]);
        seq.resync(37);
        assert_eq!(seq.next_bucket(), Some(30));
        assert_eq!(seq.try_announce(37), Some(30));
        // Still one milestone left.
        assert!(!seq.last_bucket_done());
        assert_eq!(seq.next_bucket(), Some(40));
        assert_eq!(seq.try_announce(41), Some(40));
        assert!(seq.last_bucket_done());
    }

    #[test]
    fn test_resync_never_rewinds_past_a_fired_bucket() {
        let mut seq = BucketSequencer::new(vec![10, 20, 30]);
        seq.resync(12);
        assert_eq!(seq.try_announce(12), Some(10));

        // Same population next tick: the catch-up bucket (10) is behind
        // the cursor now and must not re-arm it.
        seq.resync(12);
        assert_eq!(seq.next_bucket(), Some(20));
        assert_eq!(seq.try_announce(12), None);
    }

    #[test]
    fn test_quiet_after_last_bucket_until_reset() {
        let mut seq = BucketSequencer::new(vec![10]);
        assert_eq!(seq.try_announce(15), Some(10));
        assert_eq!(seq.try_announce(50), None);
        assert_eq!(seq.try_announce(100), None);

        seq.reset();
        assert_eq!(seq.prev_announced(), 0);
        assert_eq!(seq.next_bucket(), Some(10));
        assert!(!seq.last_bucket_done());
        assert_eq!(seq.try_announce(15), Some(10));
    }

    #[test]
    fn test_prev_announced_is_monotonic() {
        let mut seq = BucketSequencer::new(vec![10, 20, 30]);
        let mut history = Vec::new();
        for total in [12u32, 8, 25, 14, 31] {
            seq.resync(total);
            seq.try_announce(total);
            history.push(seq.prev_announced());
        }
        let mut sorted = history.clone();
        sorted.sort_unstable();
        assert_eq!(history, sorted);
    }
}
