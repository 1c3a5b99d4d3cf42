mod test_graph;

use crate::core::PointSet;

/// Fixed seed shared by the deterministic clustering tests.
pub const SEED: u64 = 128;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Right triangle with legs 3 and 4: pairwise distances 4, 3 and 5.
pub fn triangle_points() -> PointSet {
    PointSet::new(vec![vec![0.0, 0.0], vec![4.0, 0.0], vec![0.0, 3.0]]).unwrap()
}

/// Two tight pairs far apart from each other.
pub fn paired_blobs() -> PointSet {
    PointSet::new(vec![
        vec![0.0, 0.0],
        vec![0.1, 0.0],
        vec![5.0, 5.0],
        vec![5.1, 5.0],
    ])
    .unwrap()
}
