use nalgebra::{DMatrix, SymmetricEigen};

/// Number of Gauss-Legendre points needed to integrate a polynomial of degree `order` exactly
pub const fn n_points_for_order(order: usize) -> usize {
    order / 2 + 1
}

// https://en.wikipedia.org/wiki/Gaussian_quadrature#Gauss%E2%80%93Legendre_quadrature
// https://www.mathworks.com/matlabcentral/mlc-downloads/downloads/submissions/23972/versions/22/previews/chebfun/examples/quad/html/GaussQuad.html
/// Gauss-Legendre points and weights over (-1.0, +1.0) in ascending order (Golub-Welsch)
pub fn gauss_quadrature_points(n: usize) -> (Vec<f64>, Vec<f64>) {
    let betas: Vec<f64> = (1..n)
        .map(|i| 0.5 / (1.0 - (2.0 * i as f64).powi(-2)).sqrt())
        .collect();

    let jacobi_mat: DMatrix<f64> = DMatrix::from_fn(n, n, |r, c| {
        if r == c + 1 {
            betas[r - 1]
        } else if c == r + 1 {
            betas[c - 1]
        } else {
            0.0
        }
    });

    let eigen_decomp = SymmetricEigen::new(jacobi_mat);

    let mut xw: Vec<(f64, f64)> = eigen_decomp
        .eigenvalues
        .iter()
        .cloned()
        .zip(
            eigen_decomp
                .eigenvectors
                .row(0)
                .iter()
                .map(|weight| (*weight).powi(2) * 2.0),
        )
        .collect();

    xw.sort_by(|a, b| a.0.total_cmp(&b.0));

    // the rule is symmetric; enforce it exactly so mirrored points map to mirrored coordinates
    for i in 0..(n / 2) {
        let x = 0.5 * (xw[n - 1 - i].0 - xw[i].0);
        let w = 0.5 * (xw[n - 1 - i].1 + xw[i].1);
        xw[i] = (-x, w);
        xw[n - 1 - i] = (x, w);
    }
    if n % 2 == 1 {
        xw[n / 2].0 = 0.0;
    }

    xw.drain(0..).unzip()
}

/// Tensor-product Gauss-Legendre weights over the (-1.0, +1.0)^2 square. The first direction varies fastest.
pub fn tensor_weights(line_weights: &[f64]) -> Vec<f64> {
    line_weights
        .iter()
        .flat_map(|w_eta| line_weights.iter().map(move |w_xi| w_xi * w_eta))
        .collect()
}
