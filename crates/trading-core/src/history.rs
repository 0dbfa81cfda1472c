//! One-level snapshot used by the replace protocol.

/// State paired with the copy taken before the latest accepted update.
///
/// A plain update saves the current state and then mutates it. A replacing
/// update restores the saved copy first, so any number of consecutive
/// replaces all start from the state before the original update.
#[derive(Debug, Clone, Default)]
pub struct Rollback<S> {
    current: S,
    saved: S,
}

impl<S: Clone> Rollback<S> {
    pub fn new(state: S) -> Self {
        Self {
            saved: state.clone(),
            current: state,
        }
    }

    /// Prepare the state for an update and hand it out for mutation.
    pub fn begin(&mut self, replace: bool) -> &mut S {
        if replace {
            self.current.clone_from(&self.saved);
        } else {
            self.saved.clone_from(&self.current);
        }
        &mut self.current
    }

    /// State after the latest update.
    #[inline]
    pub fn current(&self) -> &S {
        &self.current
    }

    /// State before the latest accepted update.
    #[inline]
    pub fn saved(&self) -> &S {
        &self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_restores_snapshot() {
        let mut state = Rollback::new(0);

        *state.begin(false) += 1;
        *state.begin(false) += 10;
        assert_eq!(*state.current(), 11);

        *state.begin(true) += 100;
        assert_eq!(*state.current(), 101);
    }

    #[test]
    fn test_consecutive_replaces_are_idempotent() {
        let mut state = Rollback::new(vec![1]);
        state.begin(false).push(2);

        state.begin(true).push(3);
        state.begin(true).push(4);

        assert_eq!(state.current(), &vec![1, 4]);
        assert_eq!(state.saved(), &vec![1]);
    }
}
