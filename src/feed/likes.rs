//! Liked-ID set
//!
//! Client-local favorites. Membership is independent of what the pager has
//! loaded: ids are never evicted, even after a reload.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Likes {
    ids: HashSet<i64>,
}

impl Likes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns true if it is now liked
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<i64> for Likes {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores() {
        let mut likes: Likes = [1, 2].into_iter().collect();
        let before = likes.clone();

        assert!(likes.toggle(7));
        assert!(likes.contains(7));
        assert!(!likes.toggle(7));

        assert_eq!(likes, before);
    }

    #[test]
    fn test_unlike_existing() {
        let mut likes: Likes = [3].into_iter().collect();
        assert!(!likes.toggle(3));
        assert!(likes.is_empty());
    }
}
