use std::collections::{HashSet, VecDeque};

/// A de-duplicated FIFO queue of arc-revision tasks.
///
/// Each item pairs the level of the node whose domain is being revised (the
/// operand) with the level it is revised against (the context). Pushing an
/// arc already in the queue is a no-op, so propagation never processes the
/// same arc twice per wave.
#[derive(Debug, Default)]
pub struct ArcQueue {
    queue: VecDeque<(usize, usize)>,
    queue_members: HashSet<(usize, usize)>,
}

impl ArcQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, operand: usize, context: usize) {
        if self.queue_members.insert((operand, context)) {
            self.queue.push_back((operand, context));
        }
    }

    pub fn pop_front(&mut self) -> Option<(usize, usize)> {
        let item = self.queue.pop_front()?;
        self.queue_members.remove(&item);
        Some(item)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.queue_members.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_are_deduplicated_while_queued() {
        let mut queue = ArcQueue::new();
        queue.push_back(1, 0);
        queue.push_back(1, 0);
        queue.push_back(2, 0);

        assert_eq!(queue.pop_front(), Some((1, 0)));
        assert_eq!(queue.pop_front(), Some((2, 0)));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn popped_arcs_may_be_requeued() {
        let mut queue = ArcQueue::new();
        queue.push_back(1, 0);
        assert_eq!(queue.pop_front(), Some((1, 0)));
        queue.push_back(1, 0);
        assert_eq!(queue.pop_front(), Some((1, 0)));
    }
}
