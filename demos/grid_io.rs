use cartgrid::{
    io::DecompositionSummary,
    traits::{ConvertToSerializable, RONExport, RONImport},
    types::DimPartitioner,
    GlobalGridBuilder,
};
use mpi::{
    environment::Universe,
    traits::{Communicator, CommunicatorCollectives},
};

/// Save the decomposition of a grid and read it back
fn main() {
    let universe: Universe = mpi::initialize().unwrap();
    let comm = universe.world();

    let grid = GlobalGridBuilder::new(&[0.0, 0.0], &[4.0, 2.0], &[true, false], 0.1)
        .partitioner(DimPartitioner::Manual(vec![2, 2]))
        .create_global_grid(&comm)
        .unwrap();

    grid.export_as_ron("_decomposition.ron").unwrap();
    comm.barrier();

    let summary = DecompositionSummary::<f64>::import_from_ron(
        "_decomposition.ron",
        comm.rank() as usize,
        comm.size() as usize,
    )
    .unwrap();
    assert_eq!(summary, grid.to_serializable());
    println!(
        "[{}] owns cells {:?} starting at {:?}",
        comm.rank(),
        summary.owned_num_cell,
        summary.global_offset
    );
}
