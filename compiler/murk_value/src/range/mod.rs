//! Numeric intervals and the `num-in-range` unknown.
//!
//! A missing bound is unbounded on that side. Interval arithmetic runs over
//! extended endpoints (finite numbers plus the two infinities). Infinite
//! endpoints are always exclusive.

use std::cmp::Ordering;
use std::fmt;

use num_rational::BigRational;
use num_traits::One;

use crate::errors::{division_by_zero, expected_number, invalid_range, EvalError};
use crate::numeric::{self, expect_numeric, Numeric};
use crate::ternary::Ternary;
use crate::type_set::TypeSet;
use crate::value::Value;


/// One finite end of an interval.
#[derive(Clone)]
pub struct Bound {
    value: Value,
    inclusive: bool,
}

impl Bound {
    /// A bound at a finite, non-NaN number.
    pub fn new(value: Value, inclusive: bool) -> Result<Self, EvalError> {
        match value.as_numeric() {
            Some(Numeric::Float(x)) if x.is_nan() => Err(invalid_range("bound is NaN")),
            Some(Numeric::Float(x)) if x.is_infinite() => Err(invalid_range(
                "bounds must be finite; use nil for an unbounded side",
            )),
            Some(_) => Ok(Bound { value, inclusive }),
            None => Err(expected_number(&value)),
        }
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.inclusive { "=" } else { "" };
        write!(f, "{marker}{}", self.value)
    }
}

// Bound values are validated as numbers on construction.
fn cmp_num(a: &Value, b: &Value) -> Ordering {
    match (a.as_numeric(), b.as_numeric()) {
        (Some(x), Some(y)) => numeric::compare(x, y),
        _ => Ordering::Equal,
    }
}

/// A non-empty numeric interval.
#[derive(Clone, Debug)]
pub struct NumRange {
    low: Option<Bound>,
    high: Option<Bound>,
}

impl NumRange {
    /// Build an interval, rejecting empty ones: `low > high`, or
    /// `low == high` unless both ends are inclusive.
    pub fn new(low: Option<Bound>, high: Option<Bound>) -> Result<Self, EvalError> {
        if let (Some(lo), Some(hi)) = (&low, &high) {
            match cmp_num(&lo.value, &hi.value) {
                Ordering::Greater => {
                    return Err(invalid_range(format!(
                        "lower bound {} exceeds upper bound {}",
                        lo.value, hi.value
                    )));
                }
                Ordering::Equal if !(lo.inclusive && hi.inclusive) => {
                    return Err(invalid_range(format!(
                        "bounds at {} are not both inclusive, so the range is empty",
                        lo.value
                    )));
                }
                _ => {}
            }
        }
        Ok(NumRange { low, high })
    }

    /// The whole number line.
    pub fn unbounded() -> Self {
        NumRange {
            low: None,
            high: None,
        }
    }

    /// The degenerate interval `[n, n]`.
    pub fn point(n: &Value) -> Result<Self, EvalError> {
        Ok(NumRange {
            low: Some(Bound::new(n.clone(), true)?),
            high: Some(Bound::new(n.clone(), true)?),
        })
    }

    #[inline]
    pub fn low(&self) -> Option<&Bound> {
        self.low.as_ref()
    }

    #[inline]
    pub fn high(&self) -> Option<&Bound> {
        self.high.as_ref()
    }

    /// The single member of a degenerate interval.
    pub fn as_point(&self) -> Option<&Value> {
        match (&self.low, &self.high) {
            (Some(lo), Some(hi))
                if lo.inclusive && hi.inclusive && cmp_num(&lo.value, &hi.value).is_eq() =>
            {
                Some(&lo.value)
            }
            _ => None,
        }
    }

    pub fn contains_numeric(&self, n: Numeric<'_>) -> bool {
        let above_low = self.low.as_ref().map_or(true, |lo| {
            let lo_num = lo.value.as_numeric().unwrap_or(n);
            match numeric::compare(n, lo_num) {
                Ordering::Greater => true,
                Ordering::Equal => lo.inclusive,
                Ordering::Less => false,
            }
        });
        let below_high = self.high.as_ref().map_or(true, |hi| {
            let hi_num = hi.value.as_numeric().unwrap_or(n);
            match numeric::compare(n, hi_num) {
                Ordering::Less => true,
                Ordering::Equal => hi.inclusive,
                Ordering::Greater => false,
            }
        });
        !n.is_nan() && above_low && below_high
    }

    /// Membership of a concrete value. Non-numbers are never members.
    pub fn contains(&self, value: &Value) -> bool {
        value.as_numeric().is_some_and(|n| self.contains_numeric(n))
    }

    /// Whether some integer lies in the interval.
    pub fn contains_integer(&self) -> bool {
        let exact = |b: &Bound| b.value.as_numeric().and_then(Numeric::to_ratio);
        let candidate = match (&self.low, &self.high) {
            (None, None) => return true,
            (Some(lo), _) => exact(lo).map(|r| {
                let up = r.ceil();
                // An exclusive bound sitting on an integer skips it.
                if up == r && !lo.inclusive {
                    up + BigRational::one()
                } else {
                    up
                }
            }),
            (None, Some(hi)) => exact(hi).map(|r| {
                let down = r.floor();
                if down == r && !hi.inclusive {
                    down - BigRational::one()
                } else {
                    down
                }
            }),
        };
        candidate.is_some_and(|c| self.contains(&numeric::normalize_ratio(c)))
    }

    pub fn contains_zero(&self) -> bool {
        self.contains_numeric(Numeric::Int(0))
    }

    /// The overlap of two intervals, or `None` when they are disjoint.
    pub fn intersection(&self, other: &NumRange) -> Option<NumRange> {
        let low = tighter(self.low.as_ref(), other.low.as_ref(), Ordering::Greater);
        let high = tighter(self.high.as_ref(), other.high.as_ref(), Ordering::Less);
        if let (Some(lo), Some(hi)) = (&low, &high) {
            match cmp_num(&lo.value, &hi.value) {
                Ordering::Greater => return None,
                Ordering::Equal if !(lo.inclusive && hi.inclusive) => return None,
                _ => {}
            }
        }
        Some(NumRange { low, high })
    }

    /// Whether every member of `self` is below every member of `other`
    /// (`True`), none is (`False`), or it depends (`Maybe`).
    pub fn less_than(&self, other: &NumRange) -> Ternary {
        if let (Some(hi), Some(lo)) = (&self.high, &other.low) {
            match cmp_num(&hi.value, &lo.value) {
                Ordering::Less => return Ternary::True,
                Ordering::Equal if !(hi.inclusive && lo.inclusive) => return Ternary::True,
                _ => {}
            }
        }
        if let (Some(lo), Some(hi)) = (&self.low, &other.high) {
            if cmp_num(&lo.value, &hi.value) != Ordering::Less {
                return Ternary::False;
            }
        }
        Ternary::Maybe
    }

    // Arithmetic

    /// Sum interval: bounds add, and each side is inclusive only if both
    /// contributing bounds are.
    pub fn add(&self, other: &NumRange) -> Result<NumRange, EvalError> {
        let (a_lo, a_hi) = self.edges();
        let (b_lo, b_hi) = other.edges();
        let low = Edge::new(
            add_points(&a_lo.point, &b_lo.point)?,
            a_lo.inclusive && b_lo.inclusive,
        );
        let high = Edge::new(
            add_points(&a_hi.point, &b_hi.point)?,
            a_hi.inclusive && b_hi.inclusive,
        );
        from_edges(low, high)
    }

    pub fn negate(&self) -> Result<NumRange, EvalError> {
        let (lo, hi) = self.edges();
        from_edges(
            Edge::new(negate_point(&hi.point)?, hi.inclusive),
            Edge::new(negate_point(&lo.point)?, lo.inclusive),
        )
    }

    pub fn sub(&self, other: &NumRange) -> Result<NumRange, EvalError> {
        self.add(&other.negate()?)
    }

    /// Product interval from the four corner products. When several corners
    /// reach the extremum, an inclusive one wins.
    pub fn mul(&self, other: &NumRange) -> Result<NumRange, EvalError> {
        let (a_lo, a_hi) = self.edges();
        let (b_lo, b_hi) = other.edges();
        let corners = [
            mul_edges(&a_lo, &b_lo)?,
            mul_edges(&a_lo, &b_hi)?,
            mul_edges(&a_hi, &b_lo)?,
            mul_edges(&a_hi, &b_hi)?,
        ];
        let low = extremum(corners.clone(), Ordering::Less);
        let high = extremum(corners, Ordering::Greater);
        from_edges(low, high)
    }

    /// Quotient interval. A divisor interval containing zero is an error.
    pub fn div(&self, other: &NumRange) -> Result<NumRange, EvalError> {
        if other.contains_zero() {
            return Err(division_by_zero());
        }
        self.mul(&other.reciprocal()?)
    }

    fn reciprocal(&self) -> Result<NumRange, EvalError> {
        let (lo, hi) = self.edges();
        from_edges(
            Edge::new(reciprocal_point(&hi.point, true)?, hi.inclusive),
            Edge::new(reciprocal_point(&lo.point, false)?, lo.inclusive),
        )
    }

    fn edges(&self) -> (Edge, Edge) {
        let low = self.low.as_ref().map_or(Edge::new(Point::NegInf, false), |b| {
            Edge::new(Point::Finite(b.value.clone()), b.inclusive)
        });
        let high = self.high.as_ref().map_or(Edge::new(Point::PosInf, false), |b| {
            Edge::new(Point::Finite(b.value.clone()), b.inclusive)
        });
        (low, high)
    }
}

fn tighter(a: Option<&Bound>, b: Option<&Bound>, prefer: Ordering) -> Option<Bound> {
    match (a, b) {
        (None, other) | (other, None) => other.cloned(),
        (Some(x), Some(y)) => match cmp_num(&x.value, &y.value) {
            Ordering::Equal => Some(Bound {
                value: x.value.clone(),
                inclusive: x.inclusive && y.inclusive,
            }),
            ord if ord == prefer => Some(x.clone()),
            _ => Some(y.clone()),
        },
    }
}

impl fmt::Display for NumRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.low {
            Some(b) if b.inclusive => write!(f, "[{}", b.value)?,
            Some(b) => write!(f, "({}", b.value)?,
            None => f.write_str("(-inf")?,
        }
        f.write_str(", ")?;
        match &self.high {
            Some(b) if b.inclusive => write!(f, "{}]", b.value),
            Some(b) => write!(f, "{})", b.value),
            None => f.write_str("+inf)"),
        }
    }
}

// Extended endpoints

#[derive(Clone)]
enum Point {
    NegInf,
    Finite(Value),
    PosInf,
}

#[derive(Clone)]
struct Edge {
    point: Point,
    inclusive: bool,
}

impl Edge {
    fn new(point: Point, inclusive: bool) -> Self {
        let inclusive = inclusive && matches!(point, Point::Finite(_));
        Edge { point, inclusive }
    }
}

fn from_edges(low: Edge, high: Edge) -> Result<NumRange, EvalError> {
    let low = match low.point {
        Point::NegInf => None,
        Point::Finite(v) => Some(Bound::new(v, low.inclusive)?),
        Point::PosInf => return Err(invalid_range("lower bound is positive infinity")),
    };
    let high = match high.point {
        Point::PosInf => None,
        Point::Finite(v) => Some(Bound::new(v, high.inclusive)?),
        Point::NegInf => return Err(invalid_range("upper bound is negative infinity")),
    };
    NumRange::new(low, high)
}

/// A computed endpoint; float results that overflowed become infinities.
fn finite_point(value: Value) -> Result<Point, EvalError> {
    match value.as_numeric() {
        Some(Numeric::Float(x)) if x.is_nan() => Err(invalid_range("bound is NaN")),
        Some(Numeric::Float(x)) if x == f64::INFINITY => Ok(Point::PosInf),
        Some(Numeric::Float(x)) if x == f64::NEG_INFINITY => Ok(Point::NegInf),
        _ => Ok(Point::Finite(value)),
    }
}

fn cmp_points(a: &Point, b: &Point) -> Ordering {
    match (a, b) {
        (Point::NegInf, Point::NegInf) | (Point::PosInf, Point::PosInf) => Ordering::Equal,
        (Point::NegInf, _) | (_, Point::PosInf) => Ordering::Less,
        (_, Point::NegInf) | (Point::PosInf, _) => Ordering::Greater,
        (Point::Finite(x), Point::Finite(y)) => cmp_num(x, y),
    }
}

fn point_sign(p: &Point) -> Ordering {
    match p {
        Point::NegInf => Ordering::Less,
        Point::PosInf => Ordering::Greater,
        Point::Finite(v) => v.as_numeric().map_or(Ordering::Equal, Numeric::signum),
    }
}

fn add_points(a: &Point, b: &Point) -> Result<Point, EvalError> {
    match (a, b) {
        (Point::Finite(x), Point::Finite(y)) => {
            finite_point(numeric::add(expect_numeric(x)?, expect_numeric(y)?))
        }
        (Point::NegInf, Point::PosInf) | (Point::PosInf, Point::NegInf) => {
            Err(invalid_range("indeterminate bound: infinity minus infinity"))
        }
        (Point::NegInf, _) | (_, Point::NegInf) => Ok(Point::NegInf),
        _ => Ok(Point::PosInf),
    }
}

fn negate_point(p: &Point) -> Result<Point, EvalError> {
    Ok(match p {
        Point::NegInf => Point::PosInf,
        Point::PosInf => Point::NegInf,
        Point::Finite(v) => Point::Finite(numeric::negate(expect_numeric(v)?)),
    })
}

fn mul_points(a: &Point, b: &Point) -> Result<Point, EvalError> {
    if let (Point::Finite(x), Point::Finite(y)) = (a, b) {
        return finite_point(numeric::mul(expect_numeric(x)?, expect_numeric(y)?));
    }
    // 0 × ∞ = 0
    Ok(match (point_sign(a), point_sign(b)) {
        (Ordering::Equal, _) | (_, Ordering::Equal) => Point::Finite(Value::int(0)),
        (x, y) if x == y => Point::PosInf,
        _ => Point::NegInf,
    })
}

fn mul_edges(a: &Edge, b: &Edge) -> Result<Edge, EvalError> {
    let point = mul_points(&a.point, &b.point)?;
    let inclusive = match (&a.point, &b.point) {
        (Point::Finite(_), Point::Finite(_)) => a.inclusive && b.inclusive,
        // A zero times an infinity keeps the zero's flag.
        (Point::Finite(_), _) => a.inclusive,
        _ => b.inclusive,
    };
    Ok(Edge::new(point, inclusive))
}

fn extremum(edges: [Edge; 4], want: Ordering) -> Edge {
    let [first, second, third, fourth] = edges;
    [second, third, fourth]
        .into_iter()
        .fold(first, |best, edge| match cmp_points(&edge.point, &best.point) {
            Ordering::Equal => Edge {
                inclusive: best.inclusive || edge.inclusive,
                ..best
            },
            ord if ord == want => edge,
            _ => best,
        })
}

/// `1/p`. A zero endpoint maps to the infinity on the side being produced.
fn reciprocal_point(p: &Point, producing_low: bool) -> Result<Point, EvalError> {
    match p {
        Point::NegInf | Point::PosInf => Ok(Point::Finite(Value::int(0))),
        Point::Finite(v) => {
            let n = expect_numeric(v)?;
            if n.is_zero() {
                Ok(if producing_low {
                    Point::NegInf
                } else {
                    Point::PosInf
                })
            } else {
                finite_point(numeric::reciprocal(n)?)
            }
        }
    }
}

/// A number known to lie in an interval, optionally restricted to some
/// numeric types.
#[derive(Clone, Debug)]
pub struct NumInRange {
    range: NumRange,
    types: Option<TypeSet>,
}

impl NumInRange {
    pub fn new(range: NumRange, types: Option<TypeSet>) -> Result<Self, EvalError> {
        if let Some(types) = &types {
            if types.is_empty() {
                return Err(invalid_range("restricted type set is empty"));
            }
            if !types.is_subset(&TypeSet::numeric()) {
                return Err(invalid_range(format!(
                    "restricted types `{types}` are not all numeric"
                )));
            }
        }
        Ok(NumInRange { range, types })
    }

    #[inline]
    pub fn range(&self) -> &NumRange {
        &self.range
    }

    #[inline]
    pub fn types(&self) -> Option<&TypeSet> {
        self.types.as_ref()
    }

    /// The types a member may have.
    pub fn possible_types(&self) -> TypeSet {
        self.types.clone().unwrap_or_else(TypeSet::numeric)
    }

    /// Whether a concrete value is a member.
    pub fn contains(&self, value: &Value) -> bool {
        let Some(n) = value.as_numeric() else {
            return false;
        };
        let type_ok = self.types.as_ref().map_or(true, |t| t.contains(n.type_name()));
        type_ok && self.range.contains_numeric(n)
    }

    /// Whether members are restricted to exact integers.
    fn integral_only(&self) -> bool {
        self.types
            .as_ref()
            .is_some_and(|t| t.is_subset(&TypeSet::integer()))
    }

    /// Whether some member could equal `value` numerically. Unlike
    /// [`contains`](Self::contains) this ignores representation: `1.0` may
    /// equal a member of an integer range.
    pub fn may_equal(&self, value: &Value) -> bool {
        let Some(n) = value.as_numeric() else {
            return false;
        };
        self.range.contains_numeric(n)
            && (!self.integral_only() || n.to_ratio().is_some_and(|r| r.is_integer()))
    }

    /// Whether the two ranges could hold numerically equal members.
    pub fn overlaps(&self, other: &NumInRange) -> bool {
        let Some(shared) = self.range.intersection(&other.range) else {
            return false;
        };
        if self.integral_only() || other.integral_only() {
            shared.contains_integer()
        } else {
            true
        }
    }

    /// The only possible member, when the interval is a point whose value
    /// has an allowed type.
    pub fn singleton(&self) -> Option<&Value> {
        self.range.as_point().filter(|v| self.contains(v))
    }
}

impl fmt::Display for NumInRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#num-in-range")?;
        if let Some(types) = &self.types {
            write!(f, "({types})")?;
        }
        write!(f, "{}", self.range)
    }
}
