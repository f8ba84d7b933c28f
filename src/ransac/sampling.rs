use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Draws sets of distinct indices from `0..n` using a per-run RNG.
#[derive(Clone, Debug)]
pub struct IndexSampler {
    rng: StdRng,
}

impl IndexSampler {
    /// Seeded sampler; `None` pulls a seed from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Independent stream for worker `worker` of a parallel run.
    pub fn for_worker(seed: Option<u64>, worker: usize) -> Self {
        Self::new(seed.map(|s| s.wrapping_add(worker as u64)))
    }

    /// Fill `out` with `k` distinct indices drawn uniformly from `0..n`.
    ///
    /// Callers guarantee `k <= n`.
    pub fn draw_into(&mut self, n: usize, k: usize, out: &mut Vec<usize>) {
        debug_assert!(k <= n);
        out.clear();
        out.extend(index::sample(&mut self.rng, n, k).into_iter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_distinct_in_range() {
        let mut sampler = IndexSampler::new(Some(3));
        let mut out = Vec::new();
        for _ in 0..200 {
            sampler.draw_into(10, 4, &mut out);
            assert_eq!(out.len(), 4);
            let mut sorted = out.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 4);
            assert!(out.iter().all(|&i| i < 10));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = IndexSampler::new(Some(99));
        let mut b = IndexSampler::new(Some(99));
        let (mut xa, mut xb) = (Vec::new(), Vec::new());
        for _ in 0..20 {
            a.draw_into(50, 3, &mut xa);
            b.draw_into(50, 3, &mut xb);
            assert_eq!(xa, xb);
        }
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let mut sampler = IndexSampler::new(Some(0));
        let mut out = Vec::new();
        sampler.draw_into(5, 5, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }
}
