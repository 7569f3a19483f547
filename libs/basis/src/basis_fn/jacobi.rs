/// Normalized Jacobi Polynomials `P_n^(α,β)` and their 1st derivatives evaluated at a set of points.
///
/// The polynomials are orthonormal over (-1.0, +1.0) with respect to the weight `(1-x)^α (1+x)^β`.
/// With `α = β = 0` these are the normalized Legendre Polynomials.
#[derive(Clone, Debug)]
pub struct JacobiPoly {
    pub alpha: u32,
    pub beta: u32,
    /// values[n][p]
    pub values: Vec<Vec<f64>>,
    /// d1[n][p]
    pub d1: Vec<Vec<f64>>,
}

impl JacobiPoly {
    pub fn with(max_n: usize, alpha: u32, beta: u32, points: &[f64]) -> Self {
        let per_point: Vec<Vec<f64>> = points
            .iter()
            .map(|x| normalized_jacobi(*x, alpha, beta, max_n))
            .collect();

        // d/dx P_n^(α,β) = sqrt(n (n + α + β + 1)) P_(n-1)^(α+1,β+1)
        let per_point_d1: Vec<Vec<f64>> = if max_n == 0 {
            vec![Vec::new(); points.len()]
        } else {
            points
                .iter()
                .map(|x| normalized_jacobi(*x, alpha + 1, beta + 1, max_n - 1))
                .collect()
        };

        let ab = (alpha + beta) as f64;
        let values = (0..=max_n)
            .map(|n| per_point.iter().map(|vals| vals[n]).collect())
            .collect();
        let d1 = (0..=max_n)
            .map(|n| match n {
                0 => vec![0.0; points.len()],
                _ => {
                    let n_ = n as f64;
                    let scale = (n_ * (n_ + ab + 1.0)).sqrt();
                    per_point_d1.iter().map(|vals| scale * vals[n - 1]).collect()
                }
            })
            .collect();

        Self {
            alpha,
            beta,
            values,
            d1,
        }
    }

    #[inline]
    pub fn value(&self, n: usize, p: usize) -> f64 {
        self.values[n][p]
    }

    #[inline]
    pub fn deriv(&self, n: usize, p: usize) -> f64 {
        self.d1[n][p]
    }

    pub fn max_order(&self) -> usize {
        self.values.len() - 1
    }
}

/// Values of the normalized Jacobi Polynomials of orders `0..=max_n` at a single point
pub fn normalized_jacobi(x: f64, alpha: u32, beta: u32, max_n: usize) -> Vec<f64> {
    let a = alpha as f64;
    let b = beta as f64;
    let mut pl = Vec::with_capacity(max_n + 1);

    let gamma0 = 2_f64.powi((alpha + beta + 1) as i32) / (a + b + 1.0) * factorial(alpha)
        * factorial(beta)
        / factorial(alpha + beta);
    pl.push(1.0 / gamma0.sqrt());
    if max_n == 0 {
        return pl;
    }

    let gamma1 = (a + 1.0) * (b + 1.0) / (a + b + 3.0) * gamma0;
    pl.push(((a + b + 2.0) * x / 2.0 + (a - b) / 2.0) / gamma1.sqrt());

    let mut a_old = 2.0 / (2.0 + a + b) * ((a + 1.0) * (b + 1.0) / (a + b + 3.0)).sqrt();
    for i in 1..max_n {
        let i_ = i as f64;
        let h1 = 2.0 * i_ + a + b;
        let a_new = 2.0 / (h1 + 2.0)
            * ((i_ + 1.0) * (i_ + 1.0 + a + b) * (i_ + 1.0 + a) * (i_ + 1.0 + b)
                / (h1 + 1.0)
                / (h1 + 3.0))
                .sqrt();
        let b_new = -(a * a - b * b) / h1 / (h1 + 2.0);

        let next = (-a_old * pl[i - 1] + (x - b_new) * pl[i]) / a_new;
        pl.push(next);
        a_old = a_new;
    }

    pl
}

fn factorial(n: u32) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}
