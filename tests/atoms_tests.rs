//! Sign, curvature, shape and error behaviour of the atom catalog.

use cvxexpr::prelude::*;

struct Fixture {
    a: Expr,
    x: Expr,
    y: Expr,
    big_a: Expr,
    big_b: Expr,
    big_c: Expr,
}

fn fixture() -> Fixture {
    Fixture {
        a: named_variable("a", ()),
        x: named_variable("x", 2),
        y: named_variable("y", 2),
        big_a: named_variable("A", (2, 2)),
        big_b: named_variable("B", (2, 2)),
        big_c: named_variable("C", (3, 2)),
    }
}

// ============================================================================
// Norms
// ============================================================================

#[test]
fn test_norm_of_affine_sum() {
    let f = fixture();
    let sum_xy = &f.x + &f.y;
    for p in [1.0, 2.0, f64::INFINITY] {
        let n = norm(&sum_xy, p);
        assert_eq!(n.shape(), Shape::scalar());
        assert_eq!(n.curvature(), Curvature::Convex);
        assert_eq!(n.sign(), Sign::Positive);
    }
    assert_eq!(norm_fro(&f.big_a).curvature(), Curvature::Convex);
}

#[test]
fn test_norm_of_norm_stays_convex() {
    let f = fixture();
    let inner = norm_inf(&(&f.x + &f.y));
    assert_eq!(norm1(&inner).curvature(), Curvature::Convex);
    assert_eq!(norm2(&inner).curvature(), Curvature::Convex);
    assert_eq!(norm_inf(&-&inner).curvature(), Curvature::Convex);
    assert_eq!(norm2(&-&inner).curvature(), Curvature::Convex);
}

#[test]
fn test_norm_invalid_order() {
    let f = fixture();
    let err = try_norm(&f.big_c, 3.0).unwrap_err();
    assert!(matches!(err, CvxError::DomainError(_)));
    assert_eq!(err.to_string(), "Invalid value 3 for p.");
    assert!(err.is_construction_error());
}

#[test]
fn test_norm_names() {
    let f = fixture();
    assert_eq!(norm1(&(&f.x + &f.y)).name(), "norm1(x + y)");
    assert_eq!(norm_inf(&f.x).name(), "norm_inf(x)");
}

// ============================================================================
// quad_over_lin
// ============================================================================

#[test]
fn test_quad_over_lin() {
    let f = fixture();
    let e = quad_over_lin(&square(&f.x), &f.a).unwrap();
    assert_eq!(e.curvature(), Curvature::Convex);

    let e = quad_over_lin(&-square(&f.x), &f.a).unwrap();
    assert_eq!(e.curvature(), Curvature::Convex);

    let e = quad_over_lin(&sqrt(&f.x), &f.a).unwrap();
    assert_eq!(e.curvature(), Curvature::Unknown);

    let err = quad_over_lin(&f.x, &f.x).unwrap_err();
    assert_eq!(
        err,
        CvxError::ShapeError("The second argument to quad_over_lin must be a scalar.".into())
    );
}

#[test]
fn test_quad_over_lin_arity() {
    let f = fixture();
    let err = Atom::QuadOverLin.apply(vec![f.x]).unwrap_err();
    assert_eq!(
        err,
        CvxError::ArityError("'quad_over_lin' takes 2 arguments but 1 were given.".into())
    );
}

// ============================================================================
// Elementwise maximum
// ============================================================================

#[test]
fn test_max_single_argument_sign() {
    assert_eq!(max!(1).unwrap().sign(), Sign::Positive);
    assert_eq!(max!(-2).unwrap().sign(), Sign::Negative);
    assert_eq!(max!(variable(())).unwrap().sign(), Sign::Unknown);
    assert_eq!(max!(0).unwrap().sign(), Sign::Zero);
}

#[test]
fn test_max_two_argument_sign() {
    assert_eq!(max!(1, 2).unwrap().sign(), Sign::Positive);
    assert_eq!(max!(1, variable(())).unwrap().sign(), Sign::Positive);
    assert_eq!(max!(1, -2).unwrap().sign(), Sign::Positive);
    assert_eq!(max!(1, 0).unwrap().sign(), Sign::Positive);

    assert_eq!(max!(variable(()), 0).unwrap().sign(), Sign::Positive);
    assert_eq!(max!(variable(()), variable(())).unwrap().sign(), Sign::Unknown);
    assert_eq!(max!(variable(()), -2).unwrap().sign(), Sign::Unknown);

    assert_eq!(max!(0, 0).unwrap().sign(), Sign::Zero);
    assert_eq!(max!(0, -2).unwrap().sign(), Sign::Zero);

    assert_eq!(max!(-3, -2).unwrap().sign(), Sign::Negative);
}

#[test]
fn test_max_many_arguments_sign() {
    let m = max!(-2, variable(()), 0, -1, variable(()), 1).unwrap();
    assert_eq!(m.sign(), Sign::Positive);
}

#[test]
fn test_max_curvature_and_shape() {
    let f = fixture();
    let m = max!(&f.x, 0).unwrap();
    assert_eq!(m.shape(), Shape::vector(2));
    assert_eq!(m.curvature(), Curvature::Convex);

    let m = max!(norm2(&f.x), square(&f.a)).unwrap();
    assert_eq!(m.curvature(), Curvature::Convex);

    let m = max!(sqrt(&f.a), &f.a).unwrap();
    assert_eq!(m.curvature(), Curvature::Unknown);

    let err = max!(&f.x, &f.big_c).unwrap_err();
    assert!(matches!(err, CvxError::ShapeError(_)));
}

// ============================================================================
// Elementwise minimum
// ============================================================================

#[test]
fn test_min_single_argument_sign() {
    assert_eq!(min!(1).unwrap().sign(), Sign::Positive);
    assert_eq!(min!(-2).unwrap().sign(), Sign::Negative);
    assert_eq!(min!(variable(())).unwrap().sign(), Sign::Unknown);
    assert_eq!(min!(0).unwrap().sign(), Sign::Zero);
}

#[test]
fn test_min_two_argument_sign() {
    assert_eq!(min!(1, 2).unwrap().sign(), Sign::Positive);
    assert_eq!(min!(1, variable(())).unwrap().sign(), Sign::Unknown);
    assert_eq!(min!(1, -2).unwrap().sign(), Sign::Negative);
    assert_eq!(min!(1, 0).unwrap().sign(), Sign::Zero);

    assert_eq!(min!(variable(()), 0).unwrap().sign(), Sign::Negative);
    assert_eq!(min!(variable(()), variable(())).unwrap().sign(), Sign::Unknown);
    assert_eq!(min!(variable(()), -2).unwrap().sign(), Sign::Negative);

    assert_eq!(min!(0, 0).unwrap().sign(), Sign::Zero);
    assert_eq!(min!(0, -2).unwrap().sign(), Sign::Negative);

    assert_eq!(min!(-3, -2).unwrap().sign(), Sign::Negative);
}

#[test]
fn test_min_many_arguments_sign() {
    let m = min!(-2, variable(()), 0, -1, variable(()), 1).unwrap();
    assert_eq!(m.sign(), Sign::Negative);
}

#[test]
fn test_min_curvature() {
    let f = fixture();
    assert_eq!(min!(&f.a, sqrt(&f.a)).unwrap().curvature(), Curvature::Concave);
    assert_eq!(min!(&f.a, square(&f.a)).unwrap().curvature(), Curvature::Unknown);
}

#[test]
fn test_empty_max_and_min() {
    assert_eq!(
        max!().unwrap_err().to_string(),
        "No arguments given to 'max'."
    );
    assert_eq!(
        min!().unwrap_err().to_string(),
        "No arguments given to 'min'."
    );
}

// ============================================================================
// Stacking
// ============================================================================

#[test]
fn test_vstack() {
    let f = fixture();
    let s = vstack!(&f.x, &f.y, &f.x).unwrap();
    assert_eq!(s.name(), "vstack(x, y, x)");
    assert_eq!(s.shape(), Shape::new(6, 1));

    let s = vstack!(&f.big_a, &f.big_c, &f.big_b).unwrap();
    assert_eq!(s.name(), "vstack(A, C, B)");
    assert_eq!(s.shape(), Shape::new(7, 2));

    let s = vstack(f.x.entries()).unwrap();
    assert_eq!(s.shape(), Shape::new(2, 1));
    assert_eq!(s.name(), "vstack(x[0,0], x[1,0])");
}

#[test]
fn test_vstack_errors() {
    let f = fixture();
    let err = vstack!(&f.big_c, 1).unwrap_err();
    assert_eq!(
        err,
        CvxError::ShapeError("All arguments to vstack must have the same number of columns.".into())
    );

    let err = vstack!().unwrap_err();
    assert_eq!(
        err,
        CvxError::ArityError("No arguments given to 'vstack'.".into())
    );
}

#[test]
fn test_vstack_curvature_and_sign() {
    let f = fixture();
    assert_eq!(vstack!(&f.x, &f.y).unwrap().curvature(), Curvature::Affine);
    assert_eq!(vstack!(1, 2).unwrap().curvature(), Curvature::Constant);
    assert_eq!(vstack!(1, 2).unwrap().sign(), Sign::Positive);
    assert_eq!(vstack!(1, -2).unwrap().sign(), Sign::Unknown);
    assert_eq!(
        vstack!(&f.a, square(&f.a)).unwrap().curvature(),
        Curvature::Unknown
    );
}

#[test]
fn test_hstack() {
    let f = fixture();
    let s = hstack!(&f.big_a, &f.x, &f.big_b).unwrap();
    assert_eq!(s.shape(), Shape::new(2, 5));
    assert_eq!(s.name(), "hstack(A, x, B)");

    let err = hstack!(&f.big_a, &f.big_c).unwrap_err();
    assert_eq!(
        err.to_string(),
        "All arguments to hstack must have the same number of rows."
    );
}

// ============================================================================
// Affine and elementwise building blocks
// ============================================================================

#[test]
fn test_matmul_with_constant() {
    let f = fixture();
    let m = constant_matrix(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
    let e = m.matmul(&f.x).unwrap();
    assert_eq!(e.shape(), Shape::vector(3));
    assert_eq!(e.sign(), Sign::Unknown);
    assert!(e.is_affine());

    // positive matrix times convex argument stays convex
    let e = m.matmul(&square(&f.x)).unwrap();
    assert_eq!(e.curvature(), Curvature::Convex);

    assert_eq!(f.big_a.matmul(&f.x).unwrap().curvature(), Curvature::Unknown);
}

#[test]
fn test_trace_and_diag() {
    let f = fixture();
    assert_eq!(trace(&f.big_a).unwrap().shape(), Shape::scalar());
    assert!(matches!(trace(&f.big_c), Err(CvxError::ShapeError(_))));
    assert_eq!(diag(&f.x).unwrap().shape(), Shape::new(2, 2));
    assert_eq!(diag(&f.big_a).unwrap().shape(), Shape::vector(2));
}

#[test]
fn test_power_dcp_rules() {
    let x = nonneg_variable(());
    assert!(power(&x, 2.0).is_convex());
    assert!(power(&x, 0.5).is_concave());
    assert!(power(&x, -1.0).is_convex());
    assert!(power(&x, 1.0).is_affine());
    assert!(matches!(try_power(&x, 0.0), Err(CvxError::DomainError(_))));
}

#[test]
fn test_exp_log_dcp_rules() {
    let x = variable(3);
    assert!(exp(&x).is_convex());
    assert!(log(&x).is_concave());
    assert!(entropy(&x).is_concave());
    assert!(!exp(&log(&x)).is_dcp());
    assert!(log(&-exp(&x)).is_concave());
}

#[test]
fn test_quad_form() {
    let f = fixture();
    let p = constant_matrix(vec![2.0, 1.0, 1.0, 2.0], 2, 2);
    let q = quad_form(&f.x, &p).unwrap();
    assert_eq!(q.curvature(), Curvature::Convex);
    assert_eq!(q.sign(), Sign::Positive);

    let q = quad_form(&f.x, &f.big_a).unwrap();
    assert_eq!(q.curvature(), Curvature::Unknown);
}

#[test]
fn test_sum_squares_of_affine() {
    let f = fixture();
    let r = &f.big_c.matmul(&f.x).unwrap() - &ones(3);
    assert_eq!(r.curvature(), Curvature::Unknown);

    let m = constant_matrix(vec![1.0; 6], 3, 2);
    let r = &m.matmul(&f.x).unwrap() - &ones(3);
    assert_eq!(sum_squares(&r).curvature(), Curvature::Convex);
}
