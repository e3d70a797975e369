//! Sampling of eigenfunctions and polynomials over uniform coordinate grids
//! for plotting, along with grid-based diagnostics.
//!
//! ```
//! use hermfn::sample::{ Grid, Sampling };
//!
//! let grid = Grid::new_linspace((-4.0, 4.0, 1000)).unwrap();
//! let samp = Sampling::new(grid, 0..5).unwrap();
//! assert_eq!(samp.get_psi().dim(), (5, 1000));
//! assert_eq!(samp.get_density().dim(), (5, 1000));
//! ```

use ndarray as nd;
use crate::{
    HResult,
    DEF_MAXITERS,
    error::GridError,
    hermite::hermite_arr,
    order::{ IntoOrder, Order },
    psi::Eigenfunction,
    utils::{ wf_dot, wf_norm },
};

/// Uniform coordinate grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // grid spacing
    dx: f64,
}

impl Grid {
    /// Create a new `Grid` from "linspace-style" arguments (start, inclusive
    /// end, and an array length).
    pub fn new_linspace(xargs: (f64, f64, usize)) -> HResult<Self> {
        GridError::check_bounds(xargs.0, xargs.1)?;
        GridError::check_len(xargs.2)?;
        let x: nd::Array1<f64>
            = nd::Array1::linspace(xargs.0, xargs.1, xargs.2);
        let dx = x[1] - x[0];
        Ok(Self { x, dx })
    }

    /// Create a new `Grid` from "range-style" arguments (start, exclusive end,
    /// and a step size).
    pub fn new_range(xargs: (f64, f64, f64)) -> HResult<Self> {
        GridError::check_bounds(xargs.0, xargs.1)?;
        if !(xargs.2 > 0.0) { return Err(GridError::BadBounds(xargs.0, xargs.1).into()); }
        let x: nd::Array1<f64> = nd::Array1::range(xargs.0, xargs.1, xargs.2);
        GridError::check_len(x.len())?;
        Ok(Self { x, dx: xargs.2 })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the number of points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Get the first and last coordinates.
    pub fn bounds(&self) -> (f64, f64) { (self.x[0], self.x[self.x.len() - 1]) }
}

/// Eigenfunctions ψₙ and densities ψₙ² sampled over a [`Grid`] for a set of
/// orders.
///
/// Rows of [`Self::get_psi`] and [`Self::get_density`] follow the order in
/// which orders were given; columns follow the grid.
#[derive(Clone, Debug)]
pub struct Sampling {
    grid: Grid,
    orders: Vec<Order>,
    psi: nd::Array2<f64>,
    density: nd::Array2<f64>,
}

impl Sampling {
    /// Sample every order in `orders` over `grid`.
    pub fn new<I>(grid: Grid, orders: I) -> HResult<Self>
    where
        I: IntoIterator,
        I::Item: IntoOrder,
    {
        let funcs: Vec<Eigenfunction>
            = orders.into_iter()
            .map(Eigenfunction::new)
            .collect::<HResult<_>>()?;
        let mut psi: nd::Array2<f64> = nd::Array2::zeros((funcs.len(), grid.len()));
        psi.axis_iter_mut(nd::Axis(0)).zip(&funcs)
            .for_each(|(mut row, f)| { row.assign(&f.eval_arr(grid.get_x())); });
        let density = psi.mapv(|p| p * p);
        let orders = funcs.iter().map(|f| f.order()).collect();
        Ok(Self { grid, orders, psi, density })
    }

    /// Get a reference to the grid.
    pub fn get_grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { self.grid.get_x() }

    /// Get the sampled orders.
    pub fn get_orders(&self) -> &[Order] { &self.orders }

    /// Get the sampled eigenfunctions, one row per order.
    pub fn get_psi(&self) -> &nd::Array2<f64> { &self.psi }

    /// Get the sampled densities, one row per order.
    pub fn get_density(&self) -> &nd::Array2<f64> { &self.density }

    /// Get the samples of a single order, if present.
    pub fn curve<N>(&self, n: N) -> HResult<Option<nd::ArrayView1<'_, f64>>>
    where N: IntoOrder
    {
        let n = n.into_order()?;
        let row = self.orders.iter().position(|k| *k == n)
            .map(|i| self.psi.row(i));
        Ok(row)
    }

    /// Trapezoid-rule norms of every sampled curve.
    ///
    /// These approach 1 only when the grid covers the region where ψₙ is
    /// non-negligible; they are a sanity check on the grid, not a substitute
    /// for [`verify`][crate::verify].
    pub fn grid_norms(&self) -> nd::Array1<f64> {
        self.psi.axis_iter(nd::Axis(0))
            .map(|row| wf_norm(&row, self.grid.dx))
            .collect()
    }

    /// Trapezoid-rule overlap matrix of the sampled curves.
    pub fn grid_overlaps(&self) -> nd::Array2<f64> {
        let k = self.orders.len();
        nd::Array2::from_shape_fn((k, k), |(i, j)| {
            wf_dot(&self.psi.row(i), &self.psi.row(j), self.grid.dx)
        })
    }
}

/// Sample the Hermite polynomials *H*ₙ for every order in `orders` over
/// `grid`, one row per order.
pub fn hermite_curves<I>(grid: &Grid, orders: I) -> HResult<nd::Array2<f64>>
where
    I: IntoIterator,
    I::Item: IntoOrder,
{
    let rows: Vec<nd::Array1<f64>>
        = orders.into_iter()
        .map(|n| hermite_arr(n, grid.get_x()))
        .collect::<HResult<_>>()?;
    let mut h: nd::Array2<f64> = nd::Array2::zeros((rows.len(), grid.len()));
    h.axis_iter_mut(nd::Axis(0)).zip(&rows)
        .for_each(|(mut hk, row)| { hk.assign(row); });
    Ok(h)
}

// refine a bracketed sign change of `f` by bisection
fn bisect<F>(f: F, mut a: f64, mut b: f64) -> f64
where F: Fn(f64) -> f64
{
    let mut fa = f(a);
    for _ in 0..DEF_MAXITERS {
        let mid = 0.5 * (a + b);
        if mid <= a || mid >= b { break; }
        let fm = f(mid);
        if fm == 0.0 { return mid; }
        if fm.signum() == fa.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    0.5 * (a + b)
}

/// Locate the nodes (zeros) of ψₙ within `grid`.
///
/// Sign changes between adjacent grid points are refined by bisection on the
/// exact eigenfunction. Exact zeros on the grid count only when their two
/// neighbors are nonzero with opposite signs, so the underflowed tails of ψₙ
/// produce no spurious nodes. The grid must be fine enough to separate
/// neighboring nodes.
pub fn nodes<N>(n: N, grid: &Grid) -> HResult<Vec<f64>>
where N: IntoOrder
{
    let f = Eigenfunction::new(n)?;
    let x = grid.get_x();
    let y = f.eval_arr(x);
    let opposite = |a: f64, b: f64| {
        a != 0.0 && b != 0.0 && a.signum() != b.signum()
    };
    let mut found: Vec<f64> = Vec::new();
    for i in 1..y.len() {
        if y[i] == 0.0 {
            if i + 1 < y.len() && opposite(y[i - 1], y[i + 1]) {
                found.push(x[i]);
            }
        } else if opposite(y[i - 1], y[i]) {
            found.push(bisect(|xk| f.eval(xk), x[i - 1], x[i]));
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn grid_construction() {
        let g = Grid::new_linspace((-4.0, 4.0, 9)).unwrap();
        assert_eq!(g.len(), 9);
        assert_eq!(g.get_dx(), 1.0);
        assert_eq!(g.bounds(), (-4.0, 4.0));
        let r = Grid::new_range((0.0, 1.0, 0.25)).unwrap();
        assert_eq!(r.len(), 4);
        assert!(Grid::new_linspace((1.0, -1.0, 10)).is_err());
        assert!(Grid::new_linspace((0.0, 1.0, 1)).is_err());
        assert!(Grid::new_range((0.0, 1.0, 0.0)).is_err());
        assert!(Grid::new_linspace((-1e308, 1.7e308, 3)).is_err());
    }

    #[test]
    fn sampled_arrays_have_equal_lengths() {
        let grid = Grid::new_linspace((-4.0, 4.0, 500)).unwrap();
        let s = Sampling::new(grid, [0_usize, 1, 2, 3]).unwrap();
        assert_eq!(s.get_psi().dim(), (4, 500));
        assert_eq!(s.get_x().len(), s.get_psi().ncols());
        assert_eq!(s.get_orders(), &[Order(0), Order(1), Order(2), Order(3)]);
        let c = s.curve(2).unwrap().unwrap();
        assert_abs_diff_eq!(c[250], crate::psi::psi(2, s.get_x()[250]).unwrap());
        assert!(s.curve(7).unwrap().is_none());
    }

    #[test]
    fn invalid_order_aborts_sampling() {
        let grid = Grid::new_linspace((-1.0, 1.0, 10)).unwrap();
        assert!(Sampling::new(grid.clone(), [0.0, 2.5]).is_err());
        assert!(hermite_curves(&grid, [-1_i32]).is_err());
    }

    #[test]
    fn wide_grid_norms() {
        let grid = Grid::new_linspace((-10.0, 10.0, 2001)).unwrap();
        let s = Sampling::new(grid, 0..6).unwrap();
        s.grid_norms().iter()
            .for_each(|nk| assert_abs_diff_eq!(*nk, 1.0, epsilon = 1e-8));
        let eye: nd::Array2<f64> = nd::Array2::eye(6);
        s.grid_overlaps().iter().zip(&eye)
            .for_each(|(g, e)| assert_abs_diff_eq!(g, e, epsilon = 1e-8));
    }

    #[test]
    fn node_count_equals_order() {
        let grid = Grid::new_linspace((-8.0, 8.0, 1601)).unwrap();
        for n in 0..10_usize {
            let z = nodes(n, &grid).unwrap();
            assert_eq!(z.len(), n, "n = {n}: {z:?}");
            z.iter().for_each(|zk| {
                assert!(crate::psi::psi(n, *zk).unwrap().abs() < 1e-10);
            });
        }
    }

    #[test]
    fn no_spurious_nodes_in_tails() {
        let grid = Grid::new_linspace((-60.0, 60.0, 1201)).unwrap();
        assert_eq!(nodes(3, &grid).unwrap().len(), 3);
    }

    #[test]
    fn hermite_polynomial_curves() {
        let grid = Grid::new_linspace((-4.0, 4.0, 500)).unwrap();
        let h = hermite_curves(&grid, 0..4).unwrap();
        assert_eq!(h.dim(), (4, 500));
        assert!(h.row(0).iter().all(|hk| *hk == 1.0));
    }
}
