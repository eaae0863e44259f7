//! Arrangement of the processes of a collective over the axes of a grid
use crate::{error::PartitionError, types::DimPartitioner};
use itertools::Itertools;
use num::rational::Ratio;
use std::cmp::Ordering;

impl DimPartitioner {
    /// Number of processes along each axis
    ///
    /// The product of the returned values is always `comm_size`.
    pub fn ranks_per_dimension(
        &self,
        comm_size: usize,
        global_num_cell: &[usize],
    ) -> Result<Vec<usize>, PartitionError> {
        if comm_size == 0 {
            return Err(PartitionError::EmptyCollective);
        }
        if let Some(axis) = global_num_cell.iter().position(|n| *n == 0) {
            return Err(PartitionError::EmptyAxis(axis));
        }
        match self {
            DimPartitioner::Uniform => uniform_ranks(comm_size, global_num_cell),
            DimPartitioner::Manual(ranks) => manual_ranks(comm_size, global_num_cell, ranks),
        }
    }
}

fn manual_ranks(
    comm_size: usize,
    global_num_cell: &[usize],
    ranks: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    if ranks.len() != global_num_cell.len() {
        return Err(PartitionError::DimensionMismatch {
            expected: global_num_cell.len(),
            found: ranks.len(),
        });
    }
    if let Some(axis) = ranks.iter().position(|r| *r == 0) {
        return Err(PartitionError::ZeroRanks(axis));
    }
    let product = ranks.iter().product::<usize>();
    if product != comm_size {
        return Err(PartitionError::ProductMismatch {
            ranks: ranks.to_vec(),
            product,
            size: comm_size,
        });
    }
    Ok(ranks.to_vec())
}

/// Cells per process along each axis of a candidate arrangement
fn cells_per_rank(global_num_cell: &[usize], ranks: &[usize]) -> Vec<Ratio<u64>> {
    global_num_cell
        .iter()
        .zip(ranks)
        .map(|(c, r)| Ratio::new(*c as u64, *r as u64))
        .collect()
}

/// Order candidate arrangements from best to worst
///
/// The best arrangement has the smallest spread between the largest and smallest
/// cells per process, then the fewest cells on the most loaded axis. Remaining
/// ties go to the arrangement with more processes on lower axes.
fn compare_candidates(global_num_cell: &[usize], a: &[usize], b: &[usize]) -> Ordering {
    let score = |ranks: &[usize]| {
        let load = cells_per_rank(global_num_cell, ranks);
        let (lo, hi) = load
            .iter()
            .minmax()
            .into_option()
            .map(|(lo, hi)| (*lo, *hi))
            .unwrap_or((Ratio::from_integer(1), Ratio::from_integer(1)));
        (hi / lo, hi)
    };
    score(a).cmp(&score(b)).then_with(|| b.cmp(a))
}

/// Every ordered way to write `n` as a product with one factor per entry of `bounds`
///
/// Each factor is at most its bound.
fn factorizations(n: usize, bounds: &[usize]) -> Vec<Vec<usize>> {
    match bounds.split_first() {
        None => {
            if n == 1 {
                vec![vec![]]
            } else {
                vec![]
            }
        }
        Some((bound, rest)) => {
            let mut out = vec![];
            for f in (1..=n.min(*bound)).filter(|f| n % f == 0) {
                for mut tail in factorizations(n / f, rest) {
                    tail.insert(0, f);
                    out.push(tail);
                }
            }
            out
        }
    }
}

fn uniform_ranks(
    comm_size: usize,
    global_num_cell: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    factorizations(comm_size, global_num_cell)
        .into_iter()
        .min_by(|a, b| compare_candidates(global_num_cell, a, b))
        .ok_or_else(|| PartitionError::Unsatisfiable {
            size: comm_size,
            cells: global_num_cell.to_vec(),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_uniform_product() {
        let cells = [101, 85, 99];
        for size in 1..=64 {
            let ranks = DimPartitioner::Uniform
                .ranks_per_dimension(size, &cells)
                .unwrap();
            assert_eq!(ranks.len(), 3);
            assert_eq!(ranks.iter().product::<usize>(), size);
            assert!(ranks.iter().all(|r| *r >= 1));
        }
    }

    #[test]
    fn test_uniform_cube() {
        let ranks = DimPartitioner::Uniform
            .ranks_per_dimension(8, &[64, 64, 64])
            .unwrap();
        assert_eq!(ranks, vec![2, 2, 2]);
    }

    #[test]
    fn test_uniform_prefers_long_axis() {
        let ranks = DimPartitioner::Uniform
            .ranks_per_dimension(4, &[1000, 10])
            .unwrap();
        assert_eq!(ranks, vec![4, 1]);

        let ranks = DimPartitioner::Uniform
            .ranks_per_dimension(4, &[10, 1000])
            .unwrap();
        assert_eq!(ranks, vec![1, 4]);
    }

    #[test]
    fn test_uniform_balances_cells_per_rank() {
        let ranks = DimPartitioner::Uniform
            .ranks_per_dimension(8, &[200, 100, 100])
            .unwrap();
        assert_eq!(ranks, vec![4, 2, 1]);
    }

    #[test]
    fn test_uniform_ties_prefer_lower_axes() {
        let ranks = DimPartitioner::Uniform
            .ranks_per_dimension(2, &[10, 10])
            .unwrap();
        assert_eq!(ranks, vec![2, 1]);
    }

    #[test]
    fn test_uniform_prime() {
        let ranks = DimPartitioner::Uniform
            .ranks_per_dimension(7, &[20, 20, 20])
            .unwrap();
        assert_eq!(ranks, vec![7, 1, 1]);
    }

    #[test]
    fn test_uniform_unsatisfiable() {
        assert_eq!(
            DimPartitioner::Uniform.ranks_per_dimension(7, &[3, 3]),
            Err(PartitionError::Unsatisfiable {
                size: 7,
                cells: vec![3, 3]
            })
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            DimPartitioner::Uniform.ranks_per_dimension(0, &[3, 3]),
            Err(PartitionError::EmptyCollective)
        );
        assert_eq!(
            DimPartitioner::Uniform.ranks_per_dimension(2, &[3, 0]),
            Err(PartitionError::EmptyAxis(1))
        );
    }

    #[test]
    fn test_manual() {
        let p = DimPartitioner::Manual(vec![2, 3, 1]);
        assert_eq!(p.ranks_per_dimension(6, &[10, 10, 10]), Ok(vec![2, 3, 1]));
        assert_eq!(
            p.ranks_per_dimension(4, &[10, 10, 10]),
            Err(PartitionError::ProductMismatch {
                ranks: vec![2, 3, 1],
                product: 6,
                size: 4
            })
        );
        assert_eq!(
            p.ranks_per_dimension(6, &[10, 10]),
            Err(PartitionError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            DimPartitioner::Manual(vec![0, 6]).ranks_per_dimension(6, &[10, 10]),
            Err(PartitionError::ZeroRanks(0))
        );
    }

    #[test]
    fn test_factorizations() {
        let f = factorizations(12, &[12, 12]);
        assert_eq!(f.len(), 6);
        assert!(f.iter().all(|v| v.iter().product::<usize>() == 12));
        assert_eq!(factorizations(12, &[3, 3]).len(), 0);
    }
}
