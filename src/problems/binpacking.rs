//! One-dimensional bin packing, solved constructively.
//!
//! This adapter does not use the search engines: First Fit Decreasing builds
//! a solution and a pairwise bin-merge local search then tries to shrink it,
//! which is already near-optimal on the bundled instances.
//!
//! Instance format: bin capacity, item count, item sizes.

use std::path::Path;

use crate::error::{Result, ResultExt, SolverError};
use crate::report::{self, SolvedInstance};

/// Upper bound on merge rounds; the search stops earlier once no pair of
/// bins fits together.
pub const MAX_MERGE_ROUNDS: usize = 100;

/// One packing instance: a bin capacity and the item sizes.
#[derive(Debug, Clone)]
pub struct BinPackingInstance {
    pub capacity: i64,
    pub sizes: Vec<i64>,
}

/// Bins as lists of item indices.
pub type Packing = Vec<Vec<usize>>;

impl BinPackingInstance {
    pub fn new(capacity: i64, sizes: Vec<i64>) -> Result<Self> {
        if sizes.is_empty() {
            return Err(SolverError::Parse("no items in instance".to_string()));
        }
        if let Some(&size) = sizes.iter().find(|&&size| size > capacity) {
            return Err(SolverError::Parse(format!(
                "item of size {size} cannot fit any bin of capacity {capacity}"
            )));
        }
        Ok(Self { capacity, sizes })
    }

    /// Parses the capacity/count/sizes instance format.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let capacity = report::expect_line(lines, 0, "bin capacity")?
            .parse::<i64>()
            .context("bin capacity")?;
        let count = report::expect_line(lines, 1, "item count")?
            .parse::<usize>()
            .context("item count")?;
        let sizes = report::parse_ints(report::expect_line(lines, 2, "item sizes")?, "item sizes")?;
        if sizes.len() != count {
            return Err(SolverError::Parse(format!(
                "header announces {count} items but {} sizes follow",
                sizes.len()
            )));
        }
        Self::new(capacity, sizes)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&report::read_instance_lines(path)?)
    }

    /// Space consumed inside one bin.
    pub fn bin_load(&self, bin: &[usize]) -> i64 {
        bin.iter().map(|&item| self.sizes[item]).sum()
    }

    /// First Fit Decreasing: place each item, largest first, into the first
    /// bin with room, opening a new bin when none has.
    pub fn first_fit_decreasing(&self) -> Packing {
        let mut order: Vec<usize> = (0..self.sizes.len()).collect();
        order.sort_by_key(|&item| std::cmp::Reverse(self.sizes[item]));

        let mut bins: Packing = Vec::new();
        let mut remaining: Vec<i64> = Vec::new();

        for item in order {
            let size = self.sizes[item];
            match remaining.iter().position(|&room| room >= size) {
                Some(index) => {
                    bins[index].push(item);
                    remaining[index] -= size;
                }
                None => {
                    bins.push(vec![item]);
                    remaining.push(self.capacity - size);
                }
            }
        }
        bins
    }

    /// Local improvement: repeatedly merge any two bins whose combined load
    /// still fits one bin.
    pub fn merge_bins(&self, mut packing: Packing) -> Packing {
        for _ in 0..MAX_MERGE_ROUNDS {
            let mut merged = false;

            'outer: for first in 0..packing.len() {
                for second in (first + 1)..packing.len() {
                    let combined = self.bin_load(&packing[first]) + self.bin_load(&packing[second]);
                    if combined <= self.capacity {
                        let absorbed = packing.remove(second);
                        packing[first].extend(absorbed);
                        merged = true;
                        break 'outer;
                    }
                }
            }

            if !merged {
                break;
            }
        }
        packing
    }

    /// FFD construction followed by the merge improvement.
    pub fn solve(&self) -> Packing {
        self.merge_bins(self.first_fit_decreasing())
    }

    /// Every bin stays within capacity and every item appears exactly once.
    pub fn validate(&self, packing: &Packing) -> Result<()> {
        let mut seen = vec![false; self.sizes.len()];
        for bin in packing {
            if self.bin_load(bin) > self.capacity {
                return Err(SolverError::InvalidCandidate(format!(
                    "bin load {} exceeds capacity {}",
                    self.bin_load(bin),
                    self.capacity
                )));
            }
            for &item in bin {
                if item >= seen.len() || seen[item] {
                    return Err(SolverError::InvalidCandidate(format!(
                        "item {item} out of range or packed twice"
                    )));
                }
                seen[item] = true;
            }
        }
        if seen.iter().any(|&packed| !packed) {
            return Err(SolverError::InvalidCandidate(
                "some items were never packed".to_string(),
            ));
        }
        Ok(())
    }

    /// Output body: bin count, then each bin's items and used capacity.
    pub fn format_solution(&self, packing: &Packing) -> String {
        let mut body = format!("Número de recipientes utilizados: {}\n\n", packing.len());
        for (index, bin) in packing.iter().enumerate() {
            let items: Vec<String> = bin.iter().map(|item| item.to_string()).collect();
            body.push_str(&format!("Recipiente {}: itens [{}]\n", index + 1, items.join(", ")));
            body.push_str(&format!(
                "  Capacidade usada: {}/{}\n",
                self.bin_load(bin),
                self.capacity
            ));
        }
        body
    }
}

/// Solves one instance file.
pub fn solve_file(path: &Path) -> Result<SolvedInstance> {
    let instance = BinPackingInstance::load(path)?;
    let packing = instance.solve();

    let bins = packing.len();
    let id = report::instance_id(path);
    Ok(SolvedInstance {
        file_name: report::output_name(4, "peu", &id, bins),
        body: instance.format_solution(&packing),
        summary: format!("peu{id}: {bins} recipientes para {} itens", instance.sizes.len()),
    })
}
