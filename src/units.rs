/// Number of cells along one side of a square grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridSize(pub usize);

impl GridSize {
    #[inline(always)]
    pub fn nodes(&self) -> NodesCount {
        NodesCount(self.0 * self.0)
    }

    /// Number of open passages in a perfect maze over a grid of this size.
    #[inline(always)]
    pub fn edges_of_spanning_tree(&self) -> EdgesCount {
        EdgesCount(self.nodes().0.saturating_sub(1))
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);
