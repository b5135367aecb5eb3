use core::fmt;

use log::{debug, trace, warn};

use crate::config::Config;
use crate::dump::Direction;
use crate::error::SkipListError;
use crate::internal::utils::{
    CoinFlip, GeneratesLevel, Link, Node, NodeArena, NodeId, DEFAULT_MAX_LEVELS, HEAD, TAIL,
};

/// An ordered set of distinct integers.
///
/// Level 0 links every value between the head and tail sentinels, each higher
/// level links a random subset of the level below it. Every level is doubly
/// linked, so the set can be searched and walked from both ends.
pub struct SkipList<G = CoinFlip> {
    nodes: NodeArena,
    /// Highest level holding at least one value, 0 when empty.
    level: usize,
    max_levels: usize,
    len: usize,
    generator: G,
}

impl SkipList<CoinFlip> {
    /// Instantiates an empty [SkipList](SkipList) whose nodes may reach level
    /// `max_levels`, sampling levels from an entropy seeded generator.
    pub fn new(max_levels: usize) -> Result<Self, SkipListError> {
        Self::from_config(Config::default().with_max_levels(max_levels))
    }

    /// Like [new](SkipList::new), but level sampling is reproducible.
    pub fn with_seed(max_levels: usize, seed: u64) -> Result<Self, SkipListError> {
        Self::from_config(
            Config::default()
                .with_max_levels(max_levels)
                .with_seed(seed),
        )
    }

    pub fn from_config(config: Config) -> Result<Self, SkipListError> {
        let generator = match config.seed {
            Some(seed) => CoinFlip::seeded(seed),
            None => CoinFlip::from_entropy(),
        };

        SkipList::with_generator(config.max_levels, generator)
    }
}

impl Default for SkipList<CoinFlip> {
    fn default() -> Self {
        SkipList::build(DEFAULT_MAX_LEVELS, CoinFlip::from_entropy())
    }
}

impl<G> SkipList<G> {
    fn build(max_levels: usize, generator: G) -> Self {
        let mut nodes = NodeArena::new();
        let bounds = Link {
            prev: HEAD,
            next: TAIL,
        };

        // Sentinel values are never compared, the descent stops on the ids.
        nodes.alloc(Node::new(i64::MIN, max_levels, bounds));
        nodes.alloc(Node::new(i64::MAX, max_levels, bounds));

        SkipList {
            nodes,
            level: 0,
            max_levels,
            len: 0,
            generator,
        }
    }

    /// Gets the number of values in the [SkipList](SkipList).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len < 1
    }

    /// Highest level currently occupied by a value.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Highest level a value may ever be linked at.
    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Searches for `value`, descending from the highest occupied level and
    /// returning as soon as any level links to it.
    pub fn search(&self, value: i64) -> bool {
        let mut curr = HEAD;

        for level in (0..=self.level).rev() {
            let mut next = self.nodes.next(curr, level);

            while next != TAIL && self.nodes[next].value < value {
                curr = next;
                next = self.nodes.next(curr, level);
            }

            if next != TAIL && self.nodes[next].value == value {
                return true;
            }
        }

        false
    }

    pub fn contains(&self, value: i64) -> bool {
        self.search(value)
    }

    /// The smallest value in the list.
    pub fn first(&self) -> Option<i64> {
        let first = self.nodes.next(HEAD, 0);

        (first != TAIL).then(|| self.nodes[first].value)
    }

    /// The largest value in the list.
    pub fn last(&self) -> Option<i64> {
        let last = self.nodes.prev(TAIL, 0);

        (last != HEAD).then(|| self.nodes[last].value)
    }

    /// Drops every value, leaving the sentinels linked to each other.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);

        for sentinel in [HEAD, TAIL] {
            self.nodes[sentinel].levels.iter_mut().for_each(|link| {
                *link = Link {
                    prev: HEAD,
                    next: TAIL,
                }
            });
        }

        self.level = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> iter::Iter<'_> {
        iter::Iter::from_arena(&self.nodes, self.len)
    }

    /// Records, for every level, the rightmost node below `value` walking
    /// forward from the head and the leftmost node above `value` walking
    /// backward from the tail. Levels above `self.level` point at the
    /// sentinels themselves.
    fn find(&self, value: i64) -> SearchResult {
        let mut forward = vec![HEAD; self.max_levels + 1];
        let mut backward = vec![TAIL; self.max_levels + 1];

        let mut curr = HEAD;
        for level in (0..=self.level).rev() {
            loop {
                let next = self.nodes.next(curr, level);
                if next == TAIL || self.nodes[next].value >= value {
                    break;
                }
                curr = next;
            }
            forward[level] = curr;
        }

        let candidate = self.nodes.next(curr, 0);

        let mut curr = TAIL;
        for level in (0..=self.level).rev() {
            loop {
                let prev = self.nodes.prev(curr, level);
                if prev == HEAD || self.nodes[prev].value <= value {
                    break;
                }
                curr = prev;
            }
            backward[level] = curr;
        }

        let target =
            (candidate != TAIL && self.nodes[candidate].value == value).then_some(candidate);

        SearchResult {
            forward,
            backward,
            target,
        }
    }

    /// Splices `node` between `forward[i]` and `backward[i]` on each of its levels.
    fn link_node(&mut self, node: NodeId, forward: &[NodeId], backward: &[NodeId]) {
        for level in 0..self.nodes[node].height() {
            let (before, after) = (forward[level], backward[level]);

            let link = Link {
                prev: self.nodes.prev(after, level),
                next: self.nodes.next(before, level),
            };
            self.nodes[node].levels[level] = link;

            self.nodes.set_next(before, level, node);
            self.nodes.set_prev(after, level, node);
        }
    }

    /// Bypasses `node` on each of its levels using its own recorded links.
    fn unlink_node(&mut self, node: NodeId, forward: &[NodeId], backward: &[NodeId]) {
        for level in 0..self.nodes[node].height() {
            let Link { prev, next } = self.nodes[node].levels[level];

            self.nodes.set_next(forward[level], level, next);
            self.nodes.set_prev(backward[level], level, prev);
        }
    }

    fn shrink_level(&mut self) {
        let old_level = self.level;

        while self.level > 0 && self.nodes.next(HEAD, self.level) == TAIL {
            self.level -= 1;
        }

        if self.level != old_level {
            trace!("lowering level from {} to {}", old_level, self.level);
        }
    }

    /// Walks the values linked at `level`, starting next to the sentinel the
    /// direction starts from.
    pub(crate) fn walk(
        &self,
        level: usize,
        direction: Direction,
    ) -> impl Iterator<Item = i64> + '_ {
        let (start, end) = match direction {
            Direction::Forward => (HEAD, TAIL),
            Direction::Backward => (TAIL, HEAD),
        };

        let step = move |id: NodeId| match direction {
            Direction::Forward => self.nodes.next(id, level),
            Direction::Backward => self.nodes.prev(id, level),
        };

        core::iter::successors(Some(step(start)), move |&id| Some(step(id)))
            .take_while(move |&id| id != end)
            .map(move |id| self.nodes[id].value)
    }

    /// Verifies the structural invariants of the list: strictly increasing
    /// levels, level containment, sentinel coverage, the accuracy of `level`
    /// and `len`, and next/prev symmetry on every level.
    pub fn check_invariants(&self) -> Result<(), SkipListError> {
        let corrupted = |level: usize, reason: String| SkipListError::Corrupted { level, reason };

        for sentinel in [HEAD, TAIL] {
            if self.nodes[sentinel].top_level() != self.max_levels {
                return Err(corrupted(
                    self.nodes[sentinel].top_level(),
                    format!("sentinel {:?} does not span every level", sentinel),
                ));
            }
        }

        // an upper bound on any chain, so a cycle cannot loop forever
        let limit = self.nodes.occupied();
        let mut in_base = Vec::new();
        let mut heights = Vec::new();

        for level in 0..=self.max_levels {
            let mut prev = HEAD;
            let mut last: Option<i64> = None;
            let mut count = 0;

            loop {
                let next = self.nodes.next(prev, level);

                if self.nodes.prev(next, level) != prev {
                    return Err(corrupted(
                        level,
                        format!("{:?} -> {:?} has no matching backward link", prev, next),
                    ));
                }

                if next == TAIL {
                    break;
                }

                count += 1;
                if count > limit {
                    return Err(corrupted(level, "chain never reaches the tail".into()));
                }

                let node = &self.nodes[next];

                if node.height() <= level {
                    return Err(corrupted(
                        level,
                        format!("value {} is linked above its height", node.value),
                    ));
                }

                if last.is_some_and(|last| node.value <= last) {
                    return Err(corrupted(
                        level,
                        format!("value {} breaks the ordering", node.value),
                    ));
                }

                if level == 0 {
                    if in_base.len() <= next.0 {
                        in_base.resize(next.0 + 1, false);
                    }
                    in_base[next.0] = true;
                    heights.push(node.height());
                } else if !in_base.get(next.0).copied().unwrap_or(false) {
                    return Err(corrupted(
                        level,
                        format!("value {} is missing from level 0", node.value),
                    ));
                }

                last = Some(node.value);
                prev = next;
            }

            let expected = heights.iter().filter(|height| **height > level).count();
            if count != expected {
                return Err(corrupted(
                    level,
                    format!("{} values linked, {} expected", count, expected),
                ));
            }

            if level > self.level && count > 0 {
                return Err(corrupted(level, "occupied above the list level".into()));
            }

            if level == self.level && level > 0 && count == 0 {
                return Err(corrupted(level, "list level is empty".into()));
            }
        }

        if heights.len() != self.len {
            return Err(corrupted(
                0,
                format!("{} values linked, length is {}", heights.len(), self.len),
            ));
        }

        Ok(())
    }
}

impl<G> SkipList<G>
where
    G: GeneratesLevel,
{
    /// Instantiates an empty [SkipList](SkipList) drawing node levels from
    /// `generator`.
    pub fn with_generator(max_levels: usize, generator: G) -> Result<Self, SkipListError> {
        Config::default().with_max_levels(max_levels).validate()?;

        debug!("creating skip list with {} levels", max_levels);

        Ok(SkipList::build(max_levels, generator))
    }

    /// Inserts `value`, returning `false` if it was already present.
    pub fn insert(&mut self, value: i64) -> bool {
        let SearchResult {
            mut forward,
            mut backward,
            target,
        } = self.find(value);

        if target.is_some() {
            return false;
        }

        let new_level = self.generator.gen_level(self.max_levels);

        if new_level > self.level {
            for level in self.level + 1..=new_level {
                forward[level] = HEAD;
                backward[level] = TAIL;
            }

            trace!("raising level from {} to {}", self.level, new_level);
            self.level = new_level;
        }

        let node = self.nodes.alloc(Node::new(
            value,
            new_level,
            Link {
                prev: HEAD,
                next: TAIL,
            },
        ));

        self.link_node(node, &forward, &backward);
        self.len += 1;

        true
    }

    /// Removes `value` from every level it is linked at.
    ///
    /// An absent value is reported through the log and the returned error,
    /// and leaves the list untouched.
    pub fn delete(&mut self, value: i64) -> Result<(), SkipListError> {
        if !self.search(value) {
            return Err(not_found(value));
        }

        let SearchResult {
            forward,
            backward,
            target,
        } = self.find(value);

        let Some(node) = target else {
            return Err(not_found(value));
        };

        self.unlink_node(node, &forward, &backward);
        self.nodes.release(node);
        self.len -= 1;

        self.shrink_level();

        Ok(())
    }

    pub fn pop_first(&mut self) -> Option<i64> {
        let value = self.first()?;

        self.delete(value).ok().map(|_| value)
    }

    pub fn pop_last(&mut self) -> Option<i64> {
        let value = self.last()?;

        self.delete(value).ok().map(|_| value)
    }
}

fn not_found(value: i64) -> SkipListError {
    let err = SkipListError::NotFound(value);
    warn!("{}", err);
    err
}

struct SearchResult {
    forward: Vec<NodeId>,
    backward: Vec<NodeId>,
    target: Option<NodeId>,
}

impl<G> fmt::Debug for SkipList<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<G: GeneratesLevel> Extend<i64> for SkipList<G> {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| {
            self.insert(value);
        });
    }
}

impl FromIterator<i64> for SkipList<CoinFlip> {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}

pub(crate) mod iter {
    use crate::internal::utils::{NodeArena, NodeId, HEAD, TAIL};

    use super::SkipList;

    /// Walks the values of a [SkipList](SkipList) in ascending order, or in
    /// descending order from the back.
    pub struct Iter<'a> {
        nodes: &'a NodeArena,
        front: NodeId,
        back: NodeId,
        remaining: usize,
    }

    impl<'a> Iter<'a> {
        pub(crate) fn from_arena(nodes: &'a NodeArena, len: usize) -> Self {
            Iter {
                nodes,
                front: nodes.next(HEAD, 0),
                back: nodes.prev(TAIL, 0),
                remaining: len,
            }
        }
    }

    impl<'a> Iterator for Iter<'a> {
        type Item = i64;

        fn next(&mut self) -> Option<Self::Item> {
            if self.remaining == 0 {
                return None;
            }

            let value = self.nodes[self.front].value;
            self.front = self.nodes.next(self.front, 0);
            self.remaining -= 1;

            Some(value)
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.remaining, Some(self.remaining))
        }
    }

    impl<'a> DoubleEndedIterator for Iter<'a> {
        fn next_back(&mut self) -> Option<Self::Item> {
            if self.remaining == 0 {
                return None;
            }

            let value = self.nodes[self.back].value;
            self.back = self.nodes.prev(self.back, 0);
            self.remaining -= 1;

            Some(value)
        }
    }

    impl<'a> ExactSizeIterator for Iter<'a> {}

    impl<'a, G> IntoIterator for &'a SkipList<G> {
        type Item = i64;
        type IntoIter = Iter<'a>;

        fn into_iter(self) -> Self::IntoIter {
            self.iter()
        }
    }
}
