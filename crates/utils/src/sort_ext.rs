/// Extension trait for ordering slices by a float key
///
/// Floats are not `Ord`, so these use `total_cmp` to get an ordering in
/// accordance with the IEEE 754 totalOrder predicate.
pub trait SortExt<T> {
    /// Sort in-place by ascending key
    ///
    /// The sort is unstable, so the relative order of equal keys is not
    /// preserved.
    ///
    /// ```rust
    /// # use xstools_utils::SortExt;
    /// let mut points = vec![(0.7, 'c'), (0.1, 'a'), (0.4, 'b')];
    /// points.sort_by_float_key(|p| p.0);
    /// assert_eq!(points, vec![(0.1, 'a'), (0.4, 'b'), (0.7, 'c')]);
    /// ```
    fn sort_by_float_key<F>(&mut self, key: F)
    where
        F: Fn(&T) -> f64;

    /// Check the key never decreases along the slice
    ///
    /// ```rust
    /// # use xstools_utils::SortExt;
    /// assert!([0.1, 0.1, 0.4].is_sorted_by_float_key(|e| *e));
    /// assert!(![0.4, 0.1].is_sorted_by_float_key(|e| *e));
    /// ```
    fn is_sorted_by_float_key<F>(&self, key: F) -> bool
    where
        F: Fn(&T) -> f64;
}

impl<T> SortExt<T> for [T] {
    fn sort_by_float_key<F>(&mut self, key: F)
    where
        F: Fn(&T) -> f64,
    {
        self.sort_unstable_by(|a, b| key(a).total_cmp(&key(b)));
    }

    fn is_sorted_by_float_key<F>(&self, key: F) -> bool
    where
        F: Fn(&T) -> f64,
    {
        self.windows(2).all(|w| key(&w[0]) <= key(&w[1]))
    }
}
