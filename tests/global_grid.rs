//! Decomposition of a 3D grid over collectives of different sizes
use cartgrid::{
    create_global_grid,
    error::{GridError, PartitionError},
    topology::{RowMajorTopology, VirtualCollective},
    types::{Dim, DimPartitioner, EntityType},
    GlobalGrid,
};
use paste::paste;
use std::collections::HashSet;

const CELL_SIZE: f64 = 0.23;
const GLOBAL_NUM_CELL: [usize; 3] = [101, 85, 99];
const LOW_CORNER: [f64; 3] = [1.2, 3.3, -2.8];

fn high_corner() -> [f64; 3] {
    [
        LOW_CORNER[0] + CELL_SIZE * GLOBAL_NUM_CELL[0] as f64,
        LOW_CORNER[1] + CELL_SIZE * GLOBAL_NUM_CELL[1] as f64,
        LOW_CORNER[2] + CELL_SIZE * GLOBAL_NUM_CELL[2] as f64,
    ]
}

/// The grid seen by every process of a collective
fn create_grids(
    size: usize,
    partitioner: &DimPartitioner,
    periodic: [bool; 3],
) -> Vec<GlobalGrid<f64, RowMajorTopology>> {
    VirtualCollective::members(size)
        .map(|comm| {
            create_global_grid(
                &comm,
                partitioner,
                &periodic,
                &LOW_CORNER,
                &high_corner(),
                CELL_SIZE,
            )
            .unwrap()
        })
        .collect()
}

fn grid_test(size: usize, periodic: [bool; 3]) {
    let grids = create_grids(size, &DimPartitioner::Uniform, periodic);
    let ranks_per_dim = DimPartitioner::Uniform
        .ranks_per_dimension(size, &GLOBAL_NUM_CELL)
        .unwrap();

    for (rank, grid) in grids.iter().enumerate() {
        // Domain
        for d in 0..3 {
            assert_eq!(grid.domain().low_corner(d), LOW_CORNER[d]);
            assert_eq!(grid.domain().high_corner(d), high_corner()[d]);
            assert_eq!(grid.domain().is_periodic(d), periodic[d]);
            assert_eq!(grid.cell_size(d), CELL_SIZE);
        }

        // Entity counts
        for d in 0..3 {
            assert_eq!(grid.global_num_entity(EntityType::Cell, d), GLOBAL_NUM_CELL[d]);
            let expected = if periodic[d] {
                GLOBAL_NUM_CELL[d]
            } else {
                GLOBAL_NUM_CELL[d] + 1
            };
            assert_eq!(grid.global_num_entity(EntityType::Node, d), expected);
            assert_eq!(grid.global_num_entity(EntityType::Face(d), d), expected);
        }

        // Process grid
        assert_eq!(grid.total_num_block(), size);
        assert_eq!(grid.block_id(), rank);
        for d in 0..3 {
            assert_eq!(grid.dim_num_block(d), ranks_per_dim[d]);
            assert!(grid.dim_block_id(d) < grid.dim_num_block(d));
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

    // Every process has its own coordinates
    let coords = grids
        .iter()
        .map(|g| (g.dim_block_id(0), g.dim_block_id(1), g.dim_block_id(2)))
        .collect::<HashSet<_>>();
    assert_eq!(coords.len(), size);

    // Owned cells tile each axis
    for d in 0..3 {
        let mut cells_per_block = vec![0; ranks_per_dim[d]];
        for g in &grids {
            cells_per_block[g.dim_block_id(d)] = g.owned_num_cell(d);
        }
        assert_eq!(cells_per_block.iter().sum::<usize>(), GLOBAL_NUM_CELL[d]);
        for g in &grids {
            let offset = cells_per_block[..g.dim_block_id(d)].iter().sum::<usize>();
            assert_eq!(g.global_offset(d), offset);
        }
        let max = cells_per_block.iter().max().unwrap();
        let min = cells_per_block.iter().min().unwrap();
        assert!(max - min <= 1);
    }
}

fn manual_matches_uniform(size: usize, periodic: [bool; 3]) {
    let ranks_per_dim = DimPartitioner::Uniform
        .ranks_per_dimension(size, &GLOBAL_NUM_CELL)
        .unwrap();
    let uniform = create_grids(size, &DimPartitioner::Uniform, periodic);
    let manual = create_grids(size, &DimPartitioner::Manual(ranks_per_dim), periodic);
    for (u, m) in uniform.iter().zip(&manual) {
        assert_eq!(u.block_id(), m.block_id());
        for d in 0..3 {
            assert_eq!(u.ownership_window(d), m.ownership_window(d));
            assert_eq!(u.dim_block_id(d), m.dim_block_id(d));
            assert_eq!(u.dim_num_block(d), m.dim_num_block(d));
        }
    }
}

macro_rules! grid_tests {
    ($($size:literal),*) => {
        $(
            paste! {
                #[test]
                fn [<test_periodic_grid_ $size _processes>]() {
                    grid_test($size, [true, true, true]);
                }

                #[test]
                fn [<test_non_periodic_grid_ $size _processes>]() {
                    grid_test($size, [false, false, false]);
                }

                #[test]
                fn [<test_mixed_periodicity_grid_ $size _processes>]() {
                    grid_test($size, [true, false, true]);
                }

                #[test]
                fn [<test_manual_matches_uniform_ $size _processes>]() {
                    manual_matches_uniform($size, [false, true, false]);
                }
            }
        )*
    };
}

grid_tests!(1, 2, 3, 4, 5, 6, 8, 12, 16, 27);

#[test]
fn test_manual_partition_mismatch() {
    for comm in VirtualCollective::members(4) {
        let result = create_global_grid(
            &comm,
            &DimPartitioner::Manual(vec![2, 2, 2]),
            &[true, true, true],
            &LOW_CORNER,
            &high_corner(),
            CELL_SIZE,
        );
        assert!(matches!(
            result,
            Err(GridError::Partition(PartitionError::ProductMismatch {
                product: 8,
                size: 4,
                ..
            }))
        ));
    }
}

#[test]
fn test_too_many_processes() {
    let comm = VirtualCollective::new(7, 0);
    let result = create_global_grid(
        &comm,
        &DimPartitioner::Uniform,
        &[false, false],
        &[0.0, 0.0],
        &[1.0, 1.0],
        0.5,
    );
    assert!(matches!(
        result,
        Err(GridError::Partition(PartitionError::Unsatisfiable { size: 7, .. }))
    ));
}
