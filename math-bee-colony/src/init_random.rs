use ndarray::Array1;
use rand::Rng;

/// Draws one position uniformly inside `bounds`.
///
/// Degenerate bounds (`lower == upper`) yield the fixed value.
pub(crate) fn sample_uniform<R: Rng + ?Sized>(bounds: &[(f64, f64)], rng: &mut R) -> Array1<f64> {
    let mut x = Array1::<f64>::zeros(bounds.len());
    for (j, &(lower, upper)) in bounds.iter().enumerate() {
        if upper > lower {
            let u: f64 = rng.random::<f64>();
            x[j] = lower + u * (upper - lower);
        } else {
            x[j] = lower;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_uniform_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = [(0.0, 10.0), (-2.0, -1.0), (3.0, 3.0)];
        for _ in 0..200 {
            let x = sample_uniform(&bounds, &mut rng);
            assert_eq!(x.len(), 3);
            assert!((0.0..=10.0).contains(&x[0]));
            assert!((-2.0..=-1.0).contains(&x[1]));
            assert_eq!(x[2], 3.0);
        }
    }
}
