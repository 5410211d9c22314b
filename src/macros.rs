/// Assert that two floats agree to within `tol`, which defaults to `1e-9`
#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {
        $crate::assert_f64_approx!($l, $r, tol = 1e-9)
    };
    ($l:expr, $r:expr, tol = $tol:expr) => {
        assert!(
            ($l - $r).abs() < $tol,
            "assertion failed: {} !~ {}",
            $l,
            $r
        )
    };
    ($l:expr, $r:expr, $msg:expr) => {
        assert!(
            ($l - $r).abs() < 1e-9,
            "assertion failed: {} !~ {}: {}",
            $l,
            $r,
            $msg
        )
    };
}
