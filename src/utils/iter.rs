//! Iterator utilities.
use std::cmp::{Ordering, PartialOrd};

/// The index of a maximal element in a collection, according to a comparison function.
///
/// # Example
/// Get the argmax of an iterator of floats:
///
/// ```
/// use graph_bandits::utils::iter::ArgMaxBy;
///
/// let v = vec![1.0, 2.5, -3.0, 2.5];
/// let argmax = v.into_iter().argmax_by(f64::total_cmp);
/// assert_eq!(argmax, Some(1));
/// ```
pub trait ArgMaxBy {
    type Item;

    /// The index of an element that gives the maximum value from the specified function.
    ///
    /// If several elements are equally maximum, the first index is returned.
    /// If the iterator is empty, None is returned.
    fn argmax_by<F>(self, compare: F) -> Option<usize>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering;
}

impl<I: Iterator> ArgMaxBy for I {
    type Item = <Self as Iterator>::Item;

    fn argmax_by<F>(self, mut compare: F) -> Option<usize>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.enumerate()
            .reduce(|best, item| {
                if compare(&item.1, &best.1) == Ordering::Greater {
                    item
                } else {
                    best
                }
            })
            .map(|(i, _)| i)
    }
}

/// The index of a maximal element of partially ordered items.
pub trait ArgMax {
    /// The index of the first maximal element.
    ///
    /// An element only replaces the running maximum if it compares strictly greater
    /// so incomparable elements (like NaN) are never selected after the first position.
    /// If the iterator is empty, None is returned.
    fn argmax(self) -> Option<usize>;
}

impl<T: PartialOrd, I: Iterator<Item = T>> ArgMax for I {
    fn argmax(self) -> Option<usize> {
        self.argmax_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Less))
    }
}

#[cfg(test)]
mod argmax {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![0.0, 3.2, -5.0], Some(1))]
    #[case(vec![1.0, 1.0, 1.0], Some(0))]
    #[case(vec![-2.0, 4.0, 4.0, 1.0], Some(1))]
    #[case(vec![f64::NEG_INFINITY, f64::INFINITY], Some(1))]
    #[case(vec![], None)]
    fn first_maximum(#[case] values: Vec<f64>, #[case] expected: Option<usize>) {
        assert_eq!(values.into_iter().argmax(), expected);
    }

    #[test]
    fn nan_never_replaces_max() {
        assert_eq!(vec![0.0, f64::NAN, 2.0, f64::NAN].into_iter().argmax(), Some(2));
    }

    #[test]
    fn argmax_by_reverse_is_first_min() {
        let v = vec![3, 1, 4, 1, 5];
        assert_eq!(v.into_iter().argmax_by(|a, b| b.cmp(a)), Some(1));
    }
}
