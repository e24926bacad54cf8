use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GeneAlphabet, GeneSampler};

/// Dimensions of a crossword grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub height: usize,
    pub width: usize,
}

impl GridShape {
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of cells (chromosome length).
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.height * self.width
    }

    /// Length of the longest line, i.e. the longest word the grid can hold.
    #[must_use]
    pub const fn max_word_len(self) -> usize {
        if self.height > self.width {
            self.height
        } else {
            self.width
        }
    }

    /// Maps a position in column-major traversal order to its row-major index.
    ///
    /// Traversal index `i` visits row `i mod height` of column `i div height`.
    #[must_use]
    pub const fn column_major_index(self, i: usize) -> usize {
        (i * self.width) % self.cell_count() + i / self.height
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ChromosomeError {
    #[display("grid has no cells")]
    Empty,
    #[display("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("symbol '{symbol}' at row {row} is not in the alphabet")]
    UnknownSymbol { row: usize, symbol: char },
}

/// One candidate grid: `height * width` genes in row-major order.
///
/// Two chromosomes with the same genes are interchangeable; there is no other
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    shape: GridShape,
    genes: Vec<char>,
}

impl Chromosome {
    /// Builds a chromosome with every gene drawn from `sampler`.
    pub fn random<R>(shape: GridShape, sampler: &GeneSampler, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genes = (0..shape.cell_count())
            .map(|_| sampler.draw_gene(rng))
            .collect();
        Self { shape, genes }
    }

    /// Wraps raw genes.
    ///
    /// # Panics
    ///
    /// Panics if `genes.len()` does not match the shape.
    #[must_use]
    pub fn from_genes(shape: GridShape, genes: Vec<char>) -> Self {
        assert_eq!(genes.len(), shape.cell_count(), "gene count must match shape");
        Self { shape, genes }
    }

    /// Parses a grid given as one string per row.
    ///
    /// # Example
    ///
    /// ```
    /// use crossga_engine::{Chromosome, GeneAlphabet};
    ///
    /// let alphabet = GeneAlphabet::new('#', "acrt".chars(), None).unwrap();
    /// let grid = Chromosome::from_rows(&alphabet, &["ca", "rt"]).unwrap();
    /// assert_eq!(grid.columns().collect::<Vec<_>>(), ["cr", "at"]);
    /// ```
    pub fn from_rows<S>(alphabet: &GeneAlphabet, rows: &[S]) -> Result<Self, ChromosomeError>
    where
        S: AsRef<str>,
    {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let shape = GridShape::new(rows.len(), width);
        if shape.cell_count() == 0 {
            return Err(ChromosomeError::Empty);
        }
        let mut genes = Vec::with_capacity(shape.cell_count());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let count = line.chars().count();
            if count != width {
                return Err(ChromosomeError::RowWidth {
                    row,
                    expected: width,
                    actual: count,
                });
            }
            for symbol in line.chars() {
                if !alphabet.contains(symbol) {
                    return Err(ChromosomeError::UnknownSymbol { row, symbol });
                }
                genes.push(symbol);
            }
        }
        Ok(Self { shape, genes })
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[must_use]
    pub fn genes(&self) -> &[char] {
        &self.genes
    }

    /// Replaces the gene at `index`.
    pub fn set_gene(&mut self, index: usize, gene: char) {
        self.genes[index] = gene;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterates over the rows as strings (contiguous slices of `width` genes).
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.genes
            .chunks(self.shape.width.max(1))
            .map(|row| row.iter().collect())
    }

    /// Iterates over the columns as strings (genes strided by `width`).
    pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.shape.width).map(|col| {
            self.genes[col..]
                .iter()
                .step_by(self.shape.width)
                .collect()
        })
    }

    /// Every row followed by every column.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().chain(self.columns())
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}
