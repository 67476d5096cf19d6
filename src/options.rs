/// How the alternating tree is grown during one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    BreadthFirst,
    /// Iterative depth-first growth using an explicit stack.
    DepthFirst,
}

/// Solver configuration.
///
/// `perfect` forces every vertex of the smaller side to be matched, even
/// through negative edges. With `perfect(false)` negative edges are dropped
/// instead and may leave vertices unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub(crate) perfect: bool,
    pub(crate) strategy: Strategy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            perfect: true,
            strategy: Strategy::default(),
        }
    }
}

impl Options {
    pub fn perfect(mut self, perfect: bool) -> Self {
        self.perfect = perfect;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn is_perfect(&self) -> bool {
        self.perfect
    }

    pub fn search_strategy(&self) -> Strategy {
        self.strategy
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_to_perfect_breadth_first() {
        let options = Options::default();
        assert!(options.is_perfect());
        assert_eq!(options.search_strategy(), Strategy::BreadthFirst);
    }

    #[test]
    fn setters_chain() {
        let options = Options::default()
            .perfect(false)
            .strategy(Strategy::DepthFirst);
        assert!(!options.is_perfect());
        assert_eq!(options.search_strategy(), Strategy::DepthFirst);
    }
}
