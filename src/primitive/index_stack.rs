use std::{fmt, ops::Index, slice::Iter};

const ABSENT: usize = usize::MAX;

/// A set of small integers stored as a dense stack with a reverse index.
///
/// * `push` -- *O(1)*, a no-op for a member
/// * `remove` -- *O(1)*, by swapping with the last element
/// * `contains` -- *O(1)*
///
/// The order of elements is not stable under `remove`.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct IndexedStack {
    stack: Vec<usize>,
    index: Vec<usize>,
}

impl fmt::Debug for IndexedStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexedStack{:?}", self.stack)
    }
}

impl Index<usize> for IndexedStack {
    type Output = usize;
    #[inline]
    fn index(&self, i: usize) -> &usize {
        &self.stack[i]
    }
}

impl IndexedStack {
    /// make an empty stack for elements in `0..universe`.
    pub fn new(universe: usize) -> Self {
        IndexedStack {
            stack: Vec::with_capacity(universe),
            index: vec![ABSENT; universe],
        }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
    #[inline]
    pub fn contains(&self, e: usize) -> bool {
        self.index[e] != ABSENT
    }
    /// add `e` and return `true` if it wasn't a member.
    #[inline]
    pub fn push(&mut self, e: usize) -> bool {
        if self.index[e] != ABSENT {
            return false;
        }
        self.index[e] = self.stack.len();
        self.stack.push(e);
        true
    }
    /// remove `e` and return `true` if it was a member.
    #[inline]
    pub fn remove(&mut self, e: usize) -> bool {
        let i = self.index[e];
        if i == ABSENT {
            return false;
        }
        self.index[e] = ABSENT;
        let last = self.stack.pop().unwrap_or(e);
        if last != e {
            self.stack[i] = last;
            self.index[last] = i;
        }
        true
    }
    /// remove and return the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<usize> {
        let e = self.stack.pop()?;
        self.index[e] = ABSENT;
        Some(e)
    }
    pub fn clear(&mut self) {
        for e in self.stack.drain(..) {
            self.index[e] = ABSENT;
        }
    }
    pub fn iter(&self) -> Iter<'_, usize> {
        self.stack.iter()
    }
    pub fn as_slice(&self) -> &[usize] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove() {
        let mut s = IndexedStack::new(8);
        assert!(s.push(3));
        assert!(s.push(5));
        assert!(s.push(1));
        assert!(!s.push(5));
        assert_eq!(s.len(), 3);
        assert!(s.remove(3));
        assert!(!s.remove(3));
        assert!(!s.contains(3));
        // 1 was moved to the hole
        assert_eq!(s[0], 1);
        assert_eq!(s.as_slice(), &[1, 5]);
        assert!(s.iter().all(|e| s.contains(*e)));
    }

    #[test]
    fn test_remove_last_and_clear() {
        let mut s = IndexedStack::new(4);
        s.push(0);
        s.push(2);
        assert!(s.remove(2));
        assert_eq!(s.as_slice(), &[0]);
        assert_eq!(s.pop(), Some(0));
        assert!(s.is_empty());
        s.push(1);
        s.push(3);
        s.clear();
        assert!(s.is_empty());
        assert!(!s.contains(1));
        assert!(s.push(3));
    }
}
