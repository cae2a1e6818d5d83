/// Lazily enumerates the `k`-element combinations of the indices `0..n` in
/// lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            exhausted: k > n,
        }
    }

    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        // Rightmost position that has not reached its maximum value.
        let Some(pivot) = (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) else {
            return false;
        };
        self.indices[pivot] += 1;
        for i in (pivot + 1)..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        if self.advance() {
            Some(self.indices.clone())
        } else {
            self.exhausted = true;
            None
        }
    }
}

/// Binomial coefficient `C(n, k)`, saturating at `u128::MAX`.
pub fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut count: u128 = 1;
    for i in 1..=k {
        let factor = (n - k + i) as u128;
        count = match count.checked_mul(factor) {
            Some(product) => product / i as u128,
            None => return u128::MAX,
        };
    }
    count
}
