use euclid::default::Point2D;
use graphwalk::{GraphConfig, GraphSession, NodeKey};

pub(crate) struct TestHarness {
    pub(crate) session: GraphSession,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        Self {
            session: GraphSession::with_seed(GraphConfig::default(), 0x5eed)
                .expect("default config is valid"),
        }
    }

    /// Place nodes left to right on a grid that always satisfies spacing.
    pub(crate) fn with_nodes(count: usize) -> Self {
        let mut harness = Self::new();
        for index in 0..count {
            harness.add_node(Self::grid_point(index));
        }
        harness
    }

    pub(crate) fn grid_point(index: usize) -> (i32, i32) {
        let column = i32::try_from(index % 5).unwrap();
        let row = i32::try_from(index / 5).unwrap();
        (60 + column * 120, 60 + row * 120)
    }

    pub(crate) fn add_node(&mut self, (x, y): (i32, i32)) -> NodeKey {
        self.session
            .add_node_at(Point2D::new(x, y))
            .expect("grid point should be placeable")
    }

    pub(crate) fn link(&mut self, edges: &[(NodeKey, NodeKey)]) {
        for &(a, b) in edges {
            assert!(self.session.add_edge(a, b), "edge {a}-{b} should be new");
        }
    }
}
