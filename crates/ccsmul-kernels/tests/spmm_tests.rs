use ccsmul_core::{Ccs, CcsError, THRESHOLD};
use ccsmul_kernels::*;
use ccsmul_reference::{matmul_dense_f64, random_dense_f64};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f64 = 1e-6;

fn assert_close(got: &[f64], expected: &[f64]) {
    assert_eq!(got.len(), expected.len());
    for (k, (g, e)) in got.iter().zip(expected).enumerate() {
        assert!((g - e).abs() < EPS, "mismatch at {k}: {g} vs {e}");
    }
}

fn sparse_product(ra: usize, ca: usize, a: &[f64], rb: usize, cb: usize, b: &[f64]) -> Ccs<f64, i64> {
    let sa = dense_to_ccs_f64_i64(ra, ca, a);
    let sb = dense_to_ccs_f64_i64(rb, cb, b);
    spspmm_ccs_f64_i64(&sa, &sb)
}

#[test]
fn square_matrices() {
    let a = vec![1.0, 0.0, 2.0, 0.0, 7.0, 6.0, 0.0, 0.0, 3.0];
    let b = vec![0.0, 3.0, 10.0, 1.0, 0.0, 0.0, 4.0, 0.0, 0.0];
    let c = sparse_product(3, 3, &a, 3, 3, &b);
    assert_eq!(c.shape(), (3, 3));
    assert_eq!(c.nnz(), 5);
    assert_close(&ccs_to_dense_f64_i64(&c), &[8.0, 3.0, 10.0, 31.0, 0.0, 0.0, 12.0, 0.0, 0.0]);
}

#[test]
fn rectangular_matrices() {
    let a = vec![0.0, 1.0, 0.0, 6.0, 0.0, 0.0, 4.0, 3.0, 1.0, 0.0, 0.0, 2.0];
    let b = vec![0.5, 0.0, 1.5, 0.0, 0.0, 8.0, 3.0, 0.0, 0.0, 7.0, 0.0, 2.0];
    let c = sparse_product(3, 4, &a, 4, 3, &b);
    assert_eq!(c.shape(), (3, 3));
    assert_close(
        &ccs_to_dense_f64_i64(&c),
        &[42.0, 0.0, 20.0, 33.0, 0.0, 6.0, 14.5, 0.0, 5.5],
    );
}

#[test]
fn result_shape_is_rows_of_a_by_cols_of_b() {
    // (2x3) @ (3x4): A.rows != B.cols
    let a = vec![1.0, 0.0, 2.0, 0.0, -3.0, 0.0];
    let b = vec![
        1.0, 0.0, 0.0, 4.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.5,
    ];
    let c = sparse_product(2, 3, &a, 3, 4, &b);
    assert_eq!(c.shape(), (2, 4));
    assert_eq!(c.cumulative_counts().len(), 4);
    let expected = matmul_dense_f64(&a, 2, 3, &b, 3, 4).unwrap();
    assert_close(&ccs_to_dense_f64_i64(&c), &expected);
}

#[test]
fn tall_times_wide() {
    // (4x1) @ (1x2)
    let a = vec![1.0, 0.0, -2.0, 3.0];
    let b = vec![2.0, -1.0];
    let c = sparse_product(4, 1, &a, 1, 2, &b);
    assert_eq!(c.shape(), (4, 2));
    assert_close(
        &ccs_to_dense_f64_i64(&c),
        &[2.0, -1.0, 0.0, 0.0, -4.0, 2.0, 6.0, -3.0],
    );
}

#[test]
fn negative_products_kept() {
    let a = vec![-1.0, 0.0, 0.0, -1.0];
    let b = vec![2.0, 0.0, 0.0, 3.0];
    let c = sparse_product(2, 2, &a, 2, 2, &b);
    assert_eq!(c.values(), &[-2.0, -3.0]);
    assert_eq!(c.row_indices(), &[0i64, 1]);
}

#[test]
fn cancelling_sums_are_pruned() {
    // row [1, 1] . column [1, -1] == 0
    let a = vec![1.0, 1.0];
    let b = vec![1.0, -1.0];
    let c = sparse_product(1, 2, &a, 2, 1, &b);
    assert_eq!(c.nnz(), 0);
    assert_eq!(c.cumulative_counts(), &[0i64]);
    assert_eq!(ccs_to_dense_f64_i64(&c), vec![0.0]);
}

#[test]
fn empty_inputs() {
    let c = sparse_product(0, 0, &[], 0, 0, &[]);
    assert_eq!(c.shape(), (0, 0));
    assert!(c.is_empty());
    assert!(ccs_to_dense_f64_i64(&c).is_empty());

    // (2x0) @ (0x3) is a 2x3 zero matrix
    let z = sparse_product(2, 0, &[], 0, 3, &[]);
    assert_eq!(z.shape(), (2, 3));
    assert_eq!(z.nnz(), 0);
    assert_eq!(ccs_to_dense_f64_i64(&z), vec![0.0; 6]);
}

#[test]
fn random_square_matrices_match_reference() {
    let size = 50usize;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let a = random_dense_f64(size * size, &mut rng);
    let b = random_dense_f64(size * size, &mut rng);
    let expected = matmul_dense_f64(&a, size, size, &b, size, size).unwrap();
    let c = sparse_product(size, size, &a, size, size, &b);
    assert_close(&ccs_to_dense_f64_i64(&c), &expected);
    assert_eq!(c.nnz(), expected.iter().filter(|v| v.abs() > THRESHOLD).count());
}

#[test]
fn serial_and_parallel_agree_exactly() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = ccsmul_reference::random_sparse_dense_f64(37 * 53, 0.2, &mut rng);
    let b = ccsmul_reference::random_sparse_dense_f64(53 * 29, 0.2, &mut rng);
    let sa = dense_to_ccs_f64_i64(37, 53, &a);
    let sb = dense_to_ccs_f64_i64(53, 29, &b);

    let par = spspmm_ccs_f64_i64(&sa, &sb);
    let ser = spspmm_ccs_serial_f64_i64(&sa, &sb);
    assert_eq!(par, ser);

    for opts in [
        MultiplyOptions::serial(),
        MultiplyOptions::parallel(),
        MultiplyOptions::parallel().with_num_threads(3),
    ] {
        assert_eq!(spspmm_ccs_with(&sa, &sb, &opts).unwrap(), par);
    }
}

#[test]
fn result_rows_sorted_within_columns() {
    let mut rng = StdRng::seed_from_u64(9);
    let a = ccsmul_reference::random_sparse_dense_f64(20 * 20, 0.3, &mut rng);
    let sa = dense_to_ccs_f64_i64(20, 20, &a);
    let c = spspmm_ccs_f64_i64(&sa, &sa);
    let rebuilt = Ccs::from_parts(
        20,
        20,
        c.cumulative_counts().to_vec(),
        c.row_indices().to_vec(),
        c.values().to_vec(),
        true,
    );
    assert!(rebuilt.is_ok());
}

#[test]
fn with_options_reports_mismatch() {
    let a = Ccs::zeros(4, 3);
    let b = Ccs::zeros(4, 3);
    let err = spspmm_ccs_with(&a, &b, &MultiplyOptions::default()).unwrap_err();
    assert_eq!(
        err,
        CcsError::DimensionMismatch {
            rows_a: 4,
            cols_a: 3,
            rows_b: 4,
            cols_b: 3
        }
    );
}

#[test]
#[should_panic(expected = "as many columns as B has rows")]
fn plain_kernel_panics_on_mismatch() {
    let _ = spspmm_ccs_f64_i64(&Ccs::zeros(4, 3), &Ccs::zeros(4, 3));
}

fn row_of_ones() -> Ccs<f64, i64> {
    // A = [[1, 1]]
    Ccs::from_parts(1, 2, vec![1i64, 2], vec![0i64, 0], vec![1.0, 1.0], true).unwrap()
}

#[test]
#[should_panic(expected = "not strictly increasing")]
fn unsorted_right_operand_panics() {
    // B column rows [1, 0]: the true product is 5, a merge over unsorted rows gives 3
    let b = Ccs::from_parts_unchecked(2, 1, vec![2], vec![1, 0], vec![3.0, 2.0]);
    let _ = spspmm_ccs_f64_i64(&row_of_ones(), &b);
}

#[test]
#[should_panic(expected = "not strictly increasing")]
fn unsorted_right_operand_panics_serial() {
    let b = Ccs::from_parts_unchecked(2, 1, vec![2], vec![1, 0], vec![3.0, 2.0]);
    let _ = spspmm_ccs_serial_f64_i64(&row_of_ones(), &b);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn out_of_range_right_operand_row_panics() {
    // Row 7 in a 2-row B
    let b = Ccs::from_parts_unchecked(2, 1, vec![2], vec![0, 7], vec![3.0, 2.0]);
    let _ = spspmm_ccs_f64_i64(&row_of_ones(), &b);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn out_of_range_right_operand_row_panics_with_options() {
    let b = Ccs::from_parts_unchecked(2, 1, vec![2], vec![0, 7], vec![3.0, 2.0]);
    let _ = spspmm_ccs_with(&row_of_ones(), &b, &MultiplyOptions::serial());
}

#[test]
fn sorted_right_operand_gives_true_product() {
    let b = Ccs::from_parts(2, 1, vec![2i64], vec![0i64, 1], vec![2.0, 3.0], true).unwrap();
    let c = spspmm_ccs_f64_i64(&row_of_ones(), &b);
    assert_eq!(c.values(), &[5.0]);
}
