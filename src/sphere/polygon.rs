use super::{Loop, Point};

/// A region on the unit sphere made of one or more loops.
///
/// Loops are outer boundaries and holes in any order, each oriented with
/// its own interior on the smaller side. Containment is the even-odd fold
/// over the loops, so a hole inside an outer boundary cancels it and the
/// disjoint parts of a multi-polygon union.
#[derive(Clone, Debug)]
pub struct Polygon {
    loops: Vec<Loop>,
}

impl Polygon {
    pub fn new(loops: Vec<Loop>) -> Self {
        Polygon { loops }
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn contains(&self, point: Point) -> bool {
        self.loops
            .iter()
            .fold(false, |inside, l| inside != l.contains(point))
    }
}
