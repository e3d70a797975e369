use std::path::PathBuf;
use log::{ info, warn };
use ndarray as nd;
use hermfn::{
    quad::QuadConfig,
    sample::{ self, Grid, Sampling },
    spectral,
    verify,
};
use lib::{ init_logging, mkdir, write_npz };

// sample Hermite functions for plotting and check their orthonormality

// which orders go into one figure and the grid they are drawn on
struct PlotSet {
    orders: Vec<usize>,
    grid: (f64, f64, usize),
}

impl PlotSet {
    fn sample(&self) -> anyhow::Result<Sampling> {
        let grid = Grid::new_linspace(self.grid)?;
        Ok(Sampling::new(grid, self.orders.iter().copied())?)
    }

    fn orders_arr(&self) -> nd::Array1<i64> {
        self.orders.iter().map(|&n| n as i64).collect()
    }
}

const VERIFY_ORDERS: usize = 3; // n, m ∊ {0, 1, 2}

fn main() -> anyhow::Result<()> {
    init_logging();

    let basis = PlotSet { orders: (0..5).collect(), grid: (-4.0, 4.0, 1000) };
    let densities = PlotSet { orders: (0..4).collect(), grid: (-4.0, 4.0, 1000) };
    let excited = PlotSet { orders: vec![5, 10, 15, 20], grid: (-4.0, 4.0, 1000) };
    let polys = PlotSet { orders: (0..4).collect(), grid: (-4.0, 4.0, 500) };

    let psi = basis.sample()?;
    let dens = densities.sample()?;
    let high = excited.sample()?;
    let poly_grid = Grid::new_linspace(polys.grid)?;
    let hermite = sample::hermite_curves(&poly_grid, polys.orders.iter().copied())?;

    let outdir = PathBuf::from("output");
    mkdir(&outdir)?;
    write_npz!(
        outdir.join("hermite_functions.npz"),
        arrays: {
            "x" => psi.get_x(),
            "psi" => psi.get_psi(),
            "psi_n" => &basis.orders_arr(),
            "density" => dens.get_density(),
            "density_n" => &densities.orders_arr(),
            "psi_high" => high.get_psi(),
            "psi_high_n" => &excited.orders_arr(),
            "x_hermite" => poly_grid.get_x(),
            "hermite" => &hermite,
            "hermite_n" => &polys.orders_arr(),
        }
    )?;
    info!("wrote {}", outdir.join("hermite_functions.npz").display());

    let fft_grid = Grid::new_linspace((-12.0, 12.0, 1024))?;
    for &n in basis.orders.iter() {
        match spectral::fourier_residual(n, &fft_grid) {
            Ok(res) => info!("fourier residual for n = {}: {:.3e}", n, res),
            Err(err) => warn!("fourier residual for n = {}: {}", n, err),
        }
    }

    let cfg = QuadConfig::default();
    let rows = verify::sweep(0..VERIFY_ORDERS, &cfg);
    println!("Orthonormality Check:");
    println!("---------------------");
    println!("{}", verify::TABLE_HEADER);
    rows.iter().for_each(|row| println!("{}", row));
    let failed = rows.iter().filter(|row| !row.passed()).count();
    if failed > 0 {
        warn!("{} of {} overlaps did not match", failed, rows.len());
    } else {
        info!("all {} overlaps within {:.0e}", rows.len(), verify::OVERLAP_TOLERANCE);
    }
    Ok(())
}
