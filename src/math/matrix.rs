use rand::prelude::*;
use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// Row-major matrix of `f64` values backed by a single flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from nested rows. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in &rows {
            assert_eq!(row.len(), n_cols, "ragged rows: {} vs {}", row.len(), n_cols);
            data.extend_from_slice(row);
        }
        Matrix { rows: n_rows, cols: n_cols, data }
    }

    /// A 1 x n matrix holding one sample.
    pub fn row_vector(values: &[f64]) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both uniform draws are taken from (0, 1] so the log never sees zero.
    fn sample_standard_normal(rng: &mut ThreadRng) -> f64 {
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// He initialization: samples from N(0, sqrt(2 / fan_in)).
    ///
    /// Recommended before ReLU layers. The variance 2/fan_in accounts for
    /// ReLU zeroing half of its inputs on average. `rows` is the fan-in here
    /// since layers store weights as (input_size, size).
    pub fn he(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (2.0 / rows as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for v in res.data.iter_mut() {
            *v = Matrix::sample_standard_normal(&mut rng) * std_dev;
        }
        res
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / fan_in)).
    ///
    /// Recommended before Sigmoid/Tanh/Softmax/Identity layers. Keeps the
    /// variance of activations and gradients roughly equal across layers.
    pub fn xavier(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (1.0 / rows as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for v in res.data.iter_mut() {
            *v = Matrix::sample_standard_normal(&mut rng) * std_dev;
        }
        res
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Borrows one row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j * res.cols + i] = self.data[i * self.cols + j];
            }
        }
        res
    }

    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Element-wise (Hadamard) product with another matrix of the same shape.
    pub fn hadamard(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.rows, other.rows, "hadamard: row mismatch");
        assert_eq!(self.cols, other.cols, "hadamard: col mismatch");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a * b)
                .collect(),
        }
    }

    /// In-place `self += factor * other`. Used by the optimizer step.
    pub fn add_scaled(&mut self, other: &Matrix, factor: f64) {
        assert_eq!(self.rows, other.rows, "add_scaled: row mismatch");
        assert_eq!(self.cols, other.cols, "add_scaled: col mismatch");
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += factor * b;
        }
    }

    pub fn matmul(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, rhs.rows,
            "matmul: inner dimensions differ ({}x{} * {}x{})",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        let mut res = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    res.data[i * res.cols + j] += a * rhs.data[k * rhs.cols + j];
                }
            }
        }
        res
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "add: row mismatch");
        assert_eq!(self.cols, rhs.cols, "add: col mismatch");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "sub: row mismatch");
        assert_eq!(self.cols, rhs.cols, "sub: col mismatch");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        self.matmul(rhs)
    }
}
