use std::hint::black_box;

/// Deliberate CPU cost attached to an endpoint, for load testing.
///
/// Each iteration snapshots the process environment and throws it away.
#[derive(Debug, Clone, Copy)]
pub struct ArtificialLoad {
    iterations: u32,
}

impl ArtificialLoad {
    pub fn new(iterations: u32) -> Self {
        ArtificialLoad { iterations }
    }

    /// Burns the configured iterations and returns how many ran.
    pub fn apply(&self) -> u32 {
        let mut done = 0;
        for _ in 0..self.iterations {
            black_box(std::env::vars_os().count());
            done += 1;
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_every_iteration() {
        assert_eq!(ArtificialLoad::new(25).apply(), 25);
        assert_eq!(ArtificialLoad::new(0).apply(), 0);
    }
}
