use super::Grid;

/// Augmented travel matrices: one square matrix per matrix group, rows are real services followed
/// by depot nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatrixAttributes {
    /// Travel time per matrix group.
    pub time: Vec<Grid<f64>>,
    /// Travel distance per matrix group.
    pub distance: Vec<Grid<f64>>,
    /// Raw point index of every depot node, in node order.
    pub depot_points: Vec<usize>,
    /// Matrix row of vehicle start node.
    pub start_node: Vec<usize>,
    /// Matrix row of vehicle end node.
    pub end_node: Vec<usize>,
}

impl MatrixAttributes {
    /// Returns dimension of augmented matrices or zero if there are none.
    pub fn dimension(&self) -> usize {
        self.time.first().map_or(0, |matrix| matrix.rows())
    }

    /// Returns amount of depot nodes.
    pub fn num_depots(&self) -> usize {
        self.depot_points.len()
    }
}
