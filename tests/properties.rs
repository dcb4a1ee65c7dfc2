use lshmem::kernels::{projection, vector_ops};
use lshmem::memory::AssociativeMemory;
use lshmem::MemoryError;
use proptest::prelude::*;

fn vec_f32(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, len)
}

fn pow2_vec() -> impl Strategy<Value = Vec<f32>> {
    (0u32..8).prop_flat_map(|k| vec_f32(1 << k))
}

#[test]
fn fwht_is_self_inverse() {
    proptest!(|(v in pow2_vec())| {
        let mut w = v.clone();
        projection::fwht(&mut w).unwrap();
        projection::fwht(&mut w).unwrap();
        for (a, b) in w.iter().zip(v.iter()) {
            prop_assert!((a - b).abs() < 1e-2, "{} vs {}", a, b);
        }
    });
}

#[test]
fn random_projection_preserves_norm() {
    proptest!(|(v in pow2_vec(), seed in any::<u32>())| {
        let before = vector_ops::sum_of_squares(&v).sqrt();
        let mut w = v;
        projection::random_project(&mut w, seed).unwrap();
        let after = vector_ops::sum_of_squares(&w).sqrt();
        prop_assert!((before - after).abs() <= 1e-4 * before.max(1.0));
    });
}

#[test]
fn sign_pattern_is_reproducible() {
    proptest!(|(seed in any::<u32>(), n in 1usize..256)| {
        let a = projection::sign_pattern(seed, n);
        let b = projection::sign_pattern(seed, n);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.iter().all(|s| *s == 1.0 || *s == -1.0));

        let mut ones = vec![1.0f32; n];
        projection::sign_flip(&mut ones, seed);
        prop_assert_eq!(ones, a);
    });
}

#[test]
fn recall_matches_recall_lsh() {
    proptest!(ProptestConfig::with_cases(32), |(
        target in vec_f32(32),
        trained in vec_f32(32),
        probe in vec_f32(32),
        seed in any::<u32>(),
    )| {
        let mut am = AssociativeMemory::with_params(32, 4, seed).unwrap();
        am.train(&target, &trained).unwrap();

        let mut r1 = vec![0.0; 32];
        let mut r2 = vec![0.0; 32];
        am.recall(&mut r1, &probe).unwrap();
        am.recall_lsh(&mut r2, &probe).unwrap();
        prop_assert_eq!(r1, r2);
    });
}

#[test]
fn clear_forgets_everything() {
    proptest!(ProptestConfig::with_cases(32), |(
        target in vec_f32(16),
        trained in vec_f32(16),
        probe in vec_f32(16),
    )| {
        let mut am = AssociativeMemory::with_params(16, 3, 0).unwrap();
        am.train(&target, &trained).unwrap();
        am.clear();
        let mut r = vec![1.0; 16];
        am.recall(&mut r, &probe).unwrap();
        prop_assert!(r.iter().all(|v| *v == 0.0));
    });
}

#[test]
fn binary_ops_reject_mismatched_lengths() {
    proptest!(|(len1 in 1usize..64, len2 in 1usize..64)| {
        prop_assume!(len1 != len2);
        let x = vec![1.0f32; len1];
        let y = vec![1.0f32; len2];
        let mut r = vec![0.0f32; len1];
        let expected = MemoryError::DimensionMismatch { expected: len1, got: len2 };

        prop_assert_eq!(vector_ops::add(&mut r, &x, &y), Err(expected.clone()));
        prop_assert_eq!(vector_ops::subtract(&mut r, &x, &y), Err(expected.clone()));
        prop_assert_eq!(vector_ops::multiply(&mut r, &x, &y), Err(expected.clone()));
        prop_assert_eq!(vector_ops::multiply_add(&mut r, &x, &y), Err(expected.clone()));
        prop_assert_eq!(vector_ops::copy(&mut r, &y), Err(expected.clone()));
        prop_assert_eq!(vector_ops::scale(&mut r, &y, 2.0), Err(expected));
        prop_assert!(r.iter().all(|v| *v == 0.0));
    });
}

#[test]
fn non_power_of_two_rejected() {
    proptest!(|(vec_len in 1usize..5000, density in 1usize..8)| {
        prop_assume!(!vec_len.is_power_of_two());
        let err = AssociativeMemory::with_params(vec_len, density, 0).unwrap_err();
        prop_assert!(matches!(err, MemoryError::Configuration(_)));
    });
}
