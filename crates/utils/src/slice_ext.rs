/// Extends slices of grid points with bracketing searches
///
/// Grid points are anything with an energy, so every search takes a `key`
/// closure that pulls the value to compare against. Points must be sorted in
/// ascending order of that key.
///
/// Intervals are named by their lower index, so the interval `k` of a slice
/// is bounded by the points `k` and `k+1`.
pub trait SliceExt<T> {
    /// Find the interval containing `value` across the whole slice
    ///
    /// Returns the largest `k` such that `key(self[k]) <= value`, clamped to
    /// `[0, len-2]`. Values below the first point fall in interval 0 and values
    /// at or above the last point fall in the last interval.
    ///
    /// ```rust
    /// # use xstools_utils::SliceExt;
    /// let energies = vec![0.1, 0.4, 0.7, 0.9];
    ///
    /// assert_eq!(energies.find_interval_by(0.5, |e| *e), 1);
    /// assert_eq!(energies.find_interval_by(0.4, |e| *e), 1);
    ///
    /// // clamped at either end
    /// assert_eq!(energies.find_interval_by(0.0, |e| *e), 0);
    /// assert_eq!(energies.find_interval_by(0.9, |e| *e), 2);
    /// assert_eq!(energies.find_interval_by(5.0, |e| *e), 2);
    /// ```
    fn find_interval_by<F>(&self, value: f64, key: F) -> usize
    where
        F: Fn(&T) -> f64;

    /// Find the interval containing `value` between two known points
    ///
    /// Bisects the points `low..=high` only, returning a lower index in
    /// `[low, high-1]`. The caller is responsible for `value` being bracketed
    /// by the two points, otherwise the result is clamped to the nearest end.
    ///
    /// If `high <= low + 1` there is nothing to search and `low` is returned.
    ///
    /// ```rust
    /// # use xstools_utils::SliceExt;
    /// let energies = vec![0.1, 0.4, 0.7, 0.9, 1.3];
    ///
    /// assert_eq!(energies.find_interval_within_by(0.8, 1, 4, |e| *e), 2);
    /// assert_eq!(energies.find_interval_within_by(0.8, 2, 3, |e| *e), 2);
    /// ```
    fn find_interval_within_by<F>(&self, value: f64, low: usize, high: usize, key: F) -> usize
    where
        F: Fn(&T) -> f64;

    /// Find the last point at or below `value`
    ///
    /// Unlike the interval searches this is not clamped at the top, so a value
    /// above every point returns the last index. A value below every point
    /// returns 0.
    ///
    /// ```rust
    /// # use xstools_utils::SliceExt;
    /// let energies = vec![0.1, 0.4, 0.7, 0.9];
    ///
    /// assert_eq!(energies.find_floor_by(0.05, |e| *e), 0);
    /// assert_eq!(energies.find_floor_by(0.4, |e| *e), 1);
    /// assert_eq!(energies.find_floor_by(0.9, |e| *e), 3);
    /// ```
    fn find_floor_by<F>(&self, value: f64, key: F) -> usize
    where
        F: Fn(&T) -> f64;
}

impl<T> SliceExt<T> for [T] {
    fn find_interval_by<F>(&self, value: f64, key: F) -> usize
    where
        F: Fn(&T) -> f64,
    {
        self.find_interval_within_by(value, 0, self.len().saturating_sub(1), key)
    }

    fn find_interval_within_by<F>(&self, value: f64, low: usize, high: usize, key: F) -> usize
    where
        F: Fn(&T) -> f64,
    {
        let mut lower = low;
        let mut upper = high;

        // invariant: key(lower) <= value < key(upper), or an untouched end
        while upper > lower + 1 {
            let mid = lower + (upper - lower) / 2;
            if key(&self[mid]) > value {
                upper = mid;
            } else {
                lower = mid;
            }
        }

        lower
    }

    fn find_floor_by<F>(&self, value: f64, key: F) -> usize
    where
        F: Fn(&T) -> f64,
    {
        self.partition_point(|p| key(p) <= value).saturating_sub(1)
    }
}
