use cartgrid::{
    create_global_grid,
    types::{Dim, DimPartitioner, EntityType},
};
use mpi::{
    collective::SystemOperation,
    environment::Universe,
    traits::{Communicator, CommunicatorCollectives},
};

/// Check the decomposition of a 3D grid over all processes
fn grid_test<C: Communicator>(comm: &C, periodic: [bool; 3]) {
    let partitioner = DimPartitioner::Uniform;

    let cell_size = 0.23;
    let global_num_cell = [101, 85, 99];
    let low_corner = [1.2, 3.3, -2.8];
    let high_corner = [
        low_corner[0] + cell_size * global_num_cell[0] as f64,
        low_corner[1] + cell_size * global_num_cell[1] as f64,
        low_corner[2] + cell_size * global_num_cell[2] as f64,
    ];
    let grid = create_global_grid(
        comm,
        &partitioner,
        &periodic,
        &low_corner,
        &high_corner,
        cell_size,
    )
    .unwrap();

    // Domain
    for d in 0..3 {
        assert_eq!(grid.domain().low_corner(d), low_corner[d]);
        assert_eq!(grid.domain().high_corner(d), high_corner[d]);
        assert_eq!(grid.domain().is_periodic(d), periodic[d]);
        assert_eq!(grid.cell_size(d), cell_size);
    }

    // Entity counts
    for d in 0..3 {
        assert_eq!(grid.global_num_entity(EntityType::Cell, d), global_num_cell[d]);
        let nodes = grid.global_num_entity(EntityType::Node, d);
        if periodic[d] {
            assert_eq!(nodes, global_num_cell[d]);
        } else {
            assert_eq!(nodes, global_num_cell[d] + 1);
        }
    }

    // The process grid matches the Cartesian communicator
    assert_eq!(grid.total_num_block(), comm.size() as usize);
    assert_eq!(grid.block_id(), comm.rank() as usize);
    let ranks_per_dim = partitioner
        .ranks_per_dimension(comm.size() as usize, &global_num_cell)
        .unwrap();
    let layout = grid.topology().get_layout();
    for d in 0..3 {
        assert_eq!(layout.periods[d], periodic[d]);
        assert_eq!(layout.coords[d] as usize, grid.dim_block_id(d));
        assert_eq!(grid.dim_num_block(d), ranks_per_dim[d]);
    }

    // Owned cells tile each axis
    for d in 0..3 {
        let mut local = vec![0u64; grid.dim_num_block(d)];
        local[grid.dim_block_id(d)] = grid.owned_num_cell(d) as u64;
        let mut cells_per_block = vec![0u64; grid.dim_num_block(d)];
        comm.all_reduce_into(&local[..], &mut cells_per_block[..], SystemOperation::max());
        let offset = cells_per_block[..grid.dim_block_id(d)].iter().sum::<u64>();
        let total = cells_per_block.iter().sum::<u64>();
        assert_eq!(grid.global_offset(d) as u64, offset);
        assert_eq!(grid.global_num_entity(EntityType::Cell, d) as u64, total);
    }

    // Block ranks
    for d in [Dim::I, Dim::J, Dim::K] {
        let n = grid.dim_num_block(d) as i64;
        let mut below = [0, 0, 0];
        let mut last = [0, 0, 0];
        let mut above = [0, 0, 0];
        below[d] = -1;
        last[d] = n - 1;
        above[d] = n;
        if periodic[d] {
            assert_eq!(grid.block_rank(&below), grid.block_rank(&last));
            assert_eq!(grid.block_rank(&above), grid.block_rank(&[0, 0, 0]));
        } else {
            assert_eq!(grid.block_rank(&below), None);
            assert_eq!(grid.block_rank(&above), None);
        }
    }
}

/// Run tests
fn main() {
    let universe: Universe = mpi::initialize().unwrap();
    let world = universe.world();

    if world.rank() == 0 {
        println!("Testing periodic grid");
    }
    grid_test(&world, [true, true, true]);
    if world.rank() == 0 {
        println!("Testing non-periodic grid");
    }
    grid_test(&world, [false, false, false]);
}
