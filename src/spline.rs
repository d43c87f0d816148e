// src/spline.rs
//
// The smoother behind the trajectory planner's anchor-fitting step: it
// consumes local-frame anchor points and produces local-frame dense
// samples. A natural cubic spline over x (the anchors are already rotated
// so the reference pose points along +x, so x is monotone by construction)
// is the simplest fit that satisfies that contract.

/// A natural cubic spline fit through `(x, y)` points with strictly
/// increasing `x`.
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot, from the tridiagonal solve.
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural cubic spline (zero second derivative at both ends)
    /// through the given points. Requires at least 3 points with strictly
    /// increasing `x` values.
    pub fn fit(points: &[(f64, f64)]) -> Self {
        assert!(points.len() >= 3, "cubic spline fit needs at least 3 anchors");
        for pair in points.windows(2) {
            assert!(pair[1].0 > pair[0].0, "spline anchors must have strictly increasing x");
        }

        let n = points.len();
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();

        // Thomas algorithm for the natural-spline tridiagonal system.
        let mut h = vec![0.0; n - 1];
        for i in 0..n - 1 {
            h[i] = xs[i + 1] - xs[i];
        }

        let mut alpha = vec![0.0; n];
        for i in 1..n - 1 {
            alpha[i] = (3.0 / h[i]) * (ys[i + 1] - ys[i]) - (3.0 / h[i - 1]) * (ys[i] - ys[i - 1]);
        }

        let mut l = vec![1.0; n];
        let mut mu = vec![0.0; n];
        let mut z = vec![0.0; n];
        for i in 1..n - 1 {
            l[i] = 2.0 * (xs[i + 1] - xs[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        let mut m = vec![0.0; n];
        for i in (0..n - 1).rev() {
            m[i] = z[i] - mu[i] * m[i + 1];
        }

        Self { xs, ys, m }
    }

    /// Evaluate the spline at `x`. Clamps to the first/last segment outside
    /// the fitted range rather than extrapolating wildly.
    pub fn evaluate(&self, x: f64) -> f64 {
        let i = self.segment_index(x);
        let h = self.xs[i + 1] - self.xs[i];

        let a = self.ys[i];
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * self.m[i] + self.m[i + 1]) / 3.0;
        let c = self.m[i];
        let d = (self.m[i + 1] - self.m[i]) / (3.0 * h);

        let dx = x - self.xs[i];
        a + b * dx + c * dx * dx + d * dx * dx * dx
    }

    fn segment_index(&self, x: f64) -> usize {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return 0;
        }
        if x >= self.xs[n - 1] {
            return n - 2;
        }
        let mut i = 0;
        while i < n - 2 && x > self.xs[i + 1] {
            i += 1;
        }
        i
    }

    /// Densify the fitted curve into samples at fixed `step` intervals of `x`,
    /// starting just after the first anchor and stopping at or before the
    /// last anchor's `x`.
    pub fn densify(&self, step: f64) -> Vec<(f64, f64)> {
        assert!(step > 0.0, "densify step must be positive");
        let start = self.xs[0];
        let end = *self.xs.last().unwrap();
        let mut samples = Vec::new();
        let mut x = start + step;
        while x <= end {
            samples.push((x, self.evaluate(x)));
            x += step;
        }
        samples
    }
}
