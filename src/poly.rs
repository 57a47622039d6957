//! Polynomial evaluation and Lagrange interpolation over any [`Field`]

use crate::error::Result;
use crate::field::Field;

/// Evaluates a polynomial at `x` using Horner's rule
///
/// `coefficients[i]` is the coefficient of `x^i`.
pub fn evaluate<F: Field>(field: &F, coefficients: &[F::Elem], x: F::Elem) -> F::Elem {
    coefficients
        .iter()
        .rev()
        .fold(field.zero(), |acc, &c| field.add(field.mul(acc, x), c))
}

/// Computes the Lagrange basis weights for evaluating at `target`
///
/// For distinct points `xs`, returns `w` such that for any polynomial `f`
/// of degree below `xs.len()`, `f(target) = sum(w[i] * f(xs[i]))`.
///
/// # Errors
/// Returns `DivisionByZero` if `xs` contains a repeated point
pub fn lagrange_weights<F: Field>(
    field: &F,
    xs: &[F::Elem],
    target: F::Elem,
) -> Result<Vec<F::Elem>> {
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let (numerator, denominator) = xs.iter().enumerate().filter(|&(j, _)| j != i).fold(
                (field.one(), field.one()),
                |(num, den), (_, &xj)| {
                    (
                        field.mul(num, field.sub(target, xj)),
                        field.mul(den, field.sub(xi, xj)),
                    )
                },
            );
            field.div(numerator, denominator)
        })
        .collect()
}

/// Applies precomputed weights to the values at the interpolation points
pub fn combine<F: Field>(field: &F, weights: &[F::Elem], ys: &[F::Elem]) -> F::Elem {
    weights
        .iter()
        .zip(ys)
        .fold(field.zero(), |acc, (&w, &y)| field.add(acc, field.mul(w, y)))
}

/// Evaluates at `target` the unique polynomial through `points`
///
/// # Errors
/// Returns `DivisionByZero` if two points share an x-coordinate
pub fn interpolate_at<F: Field>(
    field: &F,
    points: &[(F::Elem, F::Elem)],
    target: F::Elem,
) -> Result<F::Elem> {
    let (xs, ys): (Vec<_>, Vec<_>) = points.iter().copied().unzip();
    let weights = lagrange_weights(field, &xs, target)?;
    Ok(combine(field, &weights, &ys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::field::{Gf256, PrimeField};

    #[test]
    fn test_evaluate_prime_field() {
        let field = PrimeField::new(257).unwrap();
        // 42 + 5x + 3x^2
        let coefficients = [42, 5, 3];
        assert_eq!(evaluate(&field, &coefficients, 0), 42);
        assert_eq!(evaluate(&field, &coefficients, 1), 50);
        assert_eq!(evaluate(&field, &coefficients, 10), (42 + 50 + 300) % 257);
    }

    #[test]
    fn test_interpolation_recovers_constant_term() {
        let field = PrimeField::mersenne61();
        let coefficients = [1234, 99, 7, 1];
        let points: Vec<_> = (1..=4)
            .map(|x| (x, evaluate(&field, &coefficients, x)))
            .collect();
        assert_eq!(interpolate_at(&field, &points, 0).unwrap(), 1234);
        assert_eq!(
            interpolate_at(&field, &points, 9).unwrap(),
            evaluate(&field, &coefficients, 9)
        );
    }

    #[test]
    fn test_interpolation_gf256() {
        let coefficients = [0xab, 0x10, 0x77];
        let points: Vec<_> = [3u8, 7, 200]
            .iter()
            .map(|&x| (x, evaluate(&Gf256, &coefficients, x)))
            .collect();
        for target in [0u8, 1, 2, 255] {
            assert_eq!(
                interpolate_at(&Gf256, &points, target).unwrap(),
                evaluate(&Gf256, &coefficients, target)
            );
        }
    }

    #[test]
    fn test_repeated_points_fail() {
        let field = PrimeField::new(257).unwrap();
        let result = interpolate_at(&field, &[(1, 5), (1, 6)], 0);
        assert!(matches!(result, Err(Error::DivisionByZero)));
    }

    #[test]
    fn test_weight_at_interpolation_point_is_indicator() {
        let weights = lagrange_weights(&Gf256, &[0, 1, 2], 1).unwrap();
        assert_eq!(weights, vec![0, 1, 0]);
    }
}
