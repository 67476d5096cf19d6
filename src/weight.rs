/// Numeric type usable as an edge weight and vertex label.
///
/// `Bounded::max_value()` doubles as the "no finite slack" sentinel.
pub trait Weight:
    nalgebra::Scalar
    + Copy
    + PartialOrd
    + num_traits::Zero
    + num_traits::Bounded
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
{
    /// Largest slack that still counts as zero for weights within `lo..=hi`.
    fn tolerance(lo: Self, hi: Self) -> Self;

    /// Whether an edge with the given slack belongs to the equality subgraph.
    fn is_tight(slack: Self, tolerance: Self) -> bool;

    /// Twice the span `hi - lo`, the largest value slack arithmetic reaches
    /// for weights within `lo..=hi`. `None` if it is not representable.
    fn slack_bound(lo: Self, hi: Self) -> Option<Self>;
}

macro_rules! exact_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                #[inline]
                fn tolerance(_lo: Self, _hi: Self) -> Self {
                    0
                }

                #[inline]
                fn is_tight(slack: Self, _tolerance: Self) -> bool {
                    slack == 0
                }

                fn slack_bound(lo: Self, hi: Self) -> Option<Self> {
                    hi.checked_sub(lo)?.checked_mul(2)
                }
            }
        )*
    };
}

// Rounding error in `left - w + right` grows with the magnitude of the
// weights, so the tolerance is relative to the largest of them.
macro_rules! float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn tolerance(lo: Self, hi: Self) -> Self {
                    <$t>::EPSILON * 4096.0 * lo.abs().max(hi.abs()).max(1.0)
                }

                #[inline]
                fn is_tight(slack: Self, tolerance: Self) -> bool {
                    slack.abs() <= tolerance
                }

                fn slack_bound(lo: Self, hi: Self) -> Option<Self> {
                    let bound = (hi - lo) * 2.0;
                    bound.is_finite().then_some(bound)
                }
            }
        )*
    };
}

exact_weight!(i8, i16, i32, i64, i128, isize);
float_weight!(f32, f64);
