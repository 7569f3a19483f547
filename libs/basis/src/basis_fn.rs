mod glq;
mod jacobi;

use super::BasisTable;

pub use glq::{gauss_quadrature_points, n_points_for_order, tensor_weights};
pub use jacobi::{normalized_jacobi, JacobiPoly};

/// Tolerance used to detect the collapsed edge `s = 1` of the reference triangle
const COLLAPSE_TOL: f64 = 1e-14;

/// Number of DOFs of a full polynomial prism expansion of degree `n_poly`
pub const fn n_dofs_prism(n_poly: usize) -> usize {
    let n_1d = n_poly + 1;
    n_1d * n_1d * (n_1d + 1) / 2
}

/// Polynomial orders `[i, j, k]` of each prism DOF, in storage order.
///
/// `k` (the extrusion direction) varies slowest, then `i`, then `j` with `i + j <= n_poly`.
pub fn prism_dof_orders(n_poly: usize) -> Vec<[usize; 3]> {
    let mut orders = Vec::with_capacity(n_dofs_prism(n_poly));
    for k in 0..=n_poly {
        for i in 0..=n_poly {
            for j in 0..=(n_poly - i) {
                orders.push([i, j, k]);
            }
        }
    }
    orders
}

/// Orthonormal modal basis over the reference prism, evaluated at a set of points.
///
/// Each function is an orthonormal Dubiner function on the triangle (collapsed coordinates
/// `a = 2(1 + r)/(1 - s) - 1`, `b = s`) times a normalized Legendre Polynomial in `t`:
///
/// `ψ_ijk = 2^(i + 1/2) P_i(a) P_j^(2i+1, 0)(b) ((1 - b)/2)^i P_k(t)`
pub struct PrismBasis {
    n_poly: usize,
    orders: Vec<[usize; 3]>,
    a: Vec<f64>,
    b: Vec<f64>,
    leg_a: JacobiPoly,
    /// Jacobi Polynomials in `b` with `α = 2i + 1`, indexed by `i`
    jac_b: Vec<JacobiPoly>,
    leg_t: JacobiPoly,
}

impl PrismBasis {
    pub fn at_points(n_poly: usize, r: &[f64], s: &[f64], t: &[f64]) -> Self {
        assert!(
            r.len() == s.len() && s.len() == t.len(),
            "Coordinate vectors must have equal lengths; cannot sample prism basis!"
        );

        let a: Vec<f64> = r
            .iter()
            .zip(s.iter())
            .map(|(r, s)| {
                if (1.0 - s).abs() < COLLAPSE_TOL {
                    -1.0
                } else {
                    2.0 * (1.0 + r) / (1.0 - s) - 1.0
                }
            })
            .collect();
        let b = s.to_vec();

        let leg_a = JacobiPoly::with(n_poly, 0, 0, &a);
        let jac_b = (0..=n_poly)
            .map(|i| JacobiPoly::with(n_poly - i, 2 * i as u32 + 1, 0, &b))
            .collect();
        let leg_t = JacobiPoly::with(n_poly, 0, 0, t);

        Self {
            n_poly,
            orders: prism_dof_orders(n_poly),
            a,
            b,
            leg_a,
            jac_b,
            leg_t,
        }
    }

    pub fn n_poly(&self) -> usize {
        self.n_poly
    }

    pub fn n_dofs(&self) -> usize {
        self.orders.len()
    }

    pub fn n_points(&self) -> usize {
        self.b.len()
    }

    /// Value of the triangle factor of DOF `[i, j]` at point `p`
    fn tri(&self, i: usize, j: usize, p: usize) -> f64 {
        let scale = 2_f64.powf(i as f64 + 0.5);
        scale
            * self.leg_a.value(i, p)
            * self.jac_b[i].value(j, p)
            * (0.5 * (1.0 - self.b[p])).powi(i as i32)
    }

    /// `[d/dr, d/ds]` of the triangle factor of DOF `[i, j]` at point `p`
    fn tri_grad(&self, i: usize, j: usize, p: usize) -> [f64; 2] {
        let scale = 2_f64.powf(i as f64 + 0.5);
        let (a, b) = (self.a[p], self.b[p]);

        let fa = self.leg_a.value(i, p);
        let dfa = self.leg_a.deriv(i, p);
        let gb = self.jac_b[i].value(j, p);
        let dgb = self.jac_b[i].deriv(j, p);

        let half_1mb = 0.5 * (1.0 - b);
        let lower = if i > 0 {
            half_1mb.powi(i as i32 - 1)
        } else {
            1.0
        };

        let d_dr = dfa * gb * lower;

        let mut d_ds = dfa * gb * (0.5 * (1.0 + a)) * lower;
        let mut tmp = dgb * half_1mb.powi(i as i32);
        if i > 0 {
            tmp -= 0.5 * i as f64 * gb * lower;
        }
        d_ds += fa * tmp;

        [scale * d_dr, scale * d_ds]
    }

    pub fn value(&self, dof: usize, p: usize) -> f64 {
        let [i, j, k] = self.orders[dof];
        self.tri(i, j, p) * self.leg_t.value(k, p)
    }

    /// `[d/dr, d/ds, d/dt]` of DOF `dof` at point `p`
    pub fn gradient(&self, dof: usize, p: usize) -> [f64; 3] {
        let [i, j, k] = self.orders[dof];
        let [d_dr, d_ds] = self.tri_grad(i, j, p);
        let lt = self.leg_t.value(k, p);

        [
            d_dr * lt,
            d_ds * lt,
            self.tri(i, j, p) * self.leg_t.deriv(k, p),
        ]
    }
}

/// Fill `table` with the prism basis functions evaluated at the points `(r, s, t)`
pub fn vandermonde_prism(n_poly: usize, r: &[f64], s: &[f64], t: &[f64], table: &mut BasisTable) {
    let basis = PrismBasis::at_points(n_poly, r, s, t);
    assert_eq!(table.n_dofs(), basis.n_dofs(), "Table has the wrong number of DOFs for a degree {} prism!", n_poly);
    assert_eq!(table.n_points(), basis.n_points(), "Table has the wrong number of points!");

    table.fill_columns(|dof, column| {
        for (p, v) in column.iter_mut().enumerate() {
            *v = basis.value(dof, p);
        }
    });
}

/// Fill `dr`, `ds` and `dt` with the parametric derivatives of the prism basis functions
/// evaluated at the points `(r, s, t)`
pub fn grad_vandermonde_prism(
    n_poly: usize,
    r: &[f64],
    s: &[f64],
    t: &[f64],
    dr: &mut BasisTable,
    ds: &mut BasisTable,
    dt: &mut BasisTable,
) {
    let basis = PrismBasis::at_points(n_poly, r, s, t);

    for (dir, table) in [dr, ds, dt].into_iter().enumerate() {
        assert_eq!(table.n_dofs(), basis.n_dofs(), "Table has the wrong number of DOFs for a degree {} prism!", n_poly);
        assert_eq!(table.n_points(), basis.n_points(), "Table has the wrong number of points!");

        table.fill_columns(|dof, column| {
            for (p, v) in column.iter_mut().enumerate() {
                *v = basis.gradient(dof, p)[dir];
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collapsed-coordinate quadrature over the reference prism
    fn prism_quadrature(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let (x, w) = gauss_quadrature_points(n);
        let (mut r, mut s, mut t, mut weights) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());

        for (tk, wk) in x.iter().zip(w.iter()) {
            for (bj, wj) in x.iter().zip(w.iter()) {
                for (ai, wi) in x.iter().zip(w.iter()) {
                    r.push(0.5 * (1.0 + ai) * (1.0 - bj) - 1.0);
                    s.push(*bj);
                    t.push(*tk);
                    weights.push(wi * wj * wk * 0.5 * (1.0 - bj));
                }
            }
        }

        (r, s, t, weights)
    }

    #[test]
    fn dof_counts() {
        assert_eq!(n_dofs_prism(0), 1);
        assert_eq!(n_dofs_prism(1), 6);
        assert_eq!(n_dofs_prism(2), 18);
        assert_eq!(n_dofs_prism(3), 40);

        for n_poly in 0..5 {
            assert_eq!(prism_dof_orders(n_poly).len(), n_dofs_prism(n_poly));
        }
    }

    #[test]
    fn basis_is_orthonormal() {
        for n_poly in 0..=3 {
            let (r, s, t, w) = prism_quadrature(n_poly + 3);
            let basis = PrismBasis::at_points(n_poly, &r, &s, &t);

            for m in 0..basis.n_dofs() {
                for n in 0..basis.n_dofs() {
                    let inner: f64 = (0..w.len())
                        .map(|p| w[p] * basis.value(m, p) * basis.value(n, p))
                        .sum();
                    let expected = if m == n { 1.0 } else { 0.0 };
                    assert!(
                        (inner - expected).abs() < 1e-11,
                        "degree {}: <{}, {}> = {}",
                        n_poly,
                        m,
                        n,
                        inner
                    );
                }
            }
        }
    }

    #[test]
    fn constant_mode() {
        // 1 / sqrt(volume of the reference prism)
        let basis = PrismBasis::at_points(2, &[-0.5, 0.1], &[-0.3, -0.4], &[0.2, -0.9]);
        for p in 0..2 {
            assert!((basis.value(0, p) - 0.5).abs() < 1e-14);
            for d in basis.gradient(0, p) {
                assert!(d.abs() < 1e-14);
            }
        }
    }

    #[test]
    fn gradients_match_finite_differences() {
        let h = 1e-6;
        let points = [[-0.6, -0.2, 0.3], [0.1, -0.8, -0.7], [-0.9, 0.5, 0.95], [-0.3, -0.3, 0.0]];
        let n_poly = 3;

        for point in points.iter() {
            let basis = PrismBasis::at_points(n_poly, &[point[0]], &[point[1]], &[point[2]]);

            for dir in 0..3 {
                let mut up = *point;
                let mut down = *point;
                up[dir] += h;
                down[dir] -= h;

                let b_up = PrismBasis::at_points(n_poly, &[up[0]], &[up[1]], &[up[2]]);
                let b_down = PrismBasis::at_points(n_poly, &[down[0]], &[down[1]], &[down[2]]);

                for dof in 0..basis.n_dofs() {
                    let fd = (b_up.value(dof, 0) - b_down.value(dof, 0)) / (2.0 * h);
                    let exact = basis.gradient(dof, 0)[dir];
                    assert!(
                        (exact - fd).abs() < 1e-5 * (1.0 + fd.abs()),
                        "dof {} dir {} at {:?}: {} != {}",
                        dof,
                        dir,
                        point,
                        exact,
                        fd
                    );
                }
            }
        }
    }

    #[test]
    fn collapsed_edge_is_finite() {
        let basis = PrismBasis::at_points(3, &[-1.0], &[1.0], &[0.4]);
        for dof in 0..basis.n_dofs() {
            assert!(basis.value(dof, 0).is_finite());
            assert!(basis.gradient(dof, 0).iter().all(|d| d.is_finite()));
        }
    }

    #[test]
    fn tables_match_pointwise_evaluation() {
        let r = [-0.5, 0.2, -0.95];
        let s = [-0.5, -0.7, 0.9];
        let t = [0.0, 0.6, -0.3];
        let n_poly = 2;

        let mut values = BasisTable::zeros(3, n_dofs_prism(n_poly), 8);
        vandermonde_prism(n_poly, &r, &s, &t, &mut values);

        let mut dr = BasisTable::zeros(3, n_dofs_prism(n_poly), 8);
        let mut ds = dr.clone();
        let mut dt = dr.clone();
        grad_vandermonde_prism(n_poly, &r, &s, &t, &mut dr, &mut ds, &mut dt);

        let basis = PrismBasis::at_points(n_poly, &r, &s, &t);
        for dof in 0..basis.n_dofs() {
            for p in 0..3 {
                assert_eq!(values.get(p, dof), basis.value(dof, p));
                let grad = basis.gradient(dof, p);
                assert_eq!(dr.get(p, dof), grad[0]);
                assert_eq!(ds.get(p, dof), grad[1]);
                assert_eq!(dt.get(p, dof), grad[2]);
            }
            for p in 3..8 {
                assert_eq!(values.get(p, dof), 0.0);
                assert_eq!(dt.get(p, dof), 0.0);
            }
        }
    }
}
