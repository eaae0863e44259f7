use cartgrid::{
    topology::VirtualCollective,
    types::{Decomposition, DimPartitioner, EntityType, IndexType},
    GlobalGridBuilder,
};

/// Print the decomposition of a grid over 12 processes without starting MPI
fn main() {
    let builder = GlobalGridBuilder::new_with_num_cells(
        &[0.0, 0.0, 0.0],
        &[1.0, 1.0, 2.0],
        &[false, false, true],
        &[32, 32, 64],
    )
    .partitioner(DimPartitioner::Uniform);

    for comm in VirtualCollective::members(12) {
        let grid = builder.create_global_grid(&comm).unwrap();
        let owned = grid.index_space(EntityType::Node, Decomposition::Own, IndexType::Global);
        let neighbours = (0..3)
            .map(|d| {
                let mut offsets = [0, 0, 0];
                offsets[d] = -1;
                let low = grid.neighbor_rank(&offsets);
                offsets[d] = 1;
                let high = grid.neighbor_rank(&offsets);
                (low, high)
            })
            .collect::<Vec<_>>();
        println!(
            "rank {:2} at {:?}: nodes {owned}, neighbours {neighbours:?}",
            grid.block_id(),
            (0..3).map(|d| grid.dim_block_id(d)).collect::<Vec<_>>(),
        );
    }
}
