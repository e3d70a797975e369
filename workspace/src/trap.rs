use std::path::PathBuf;
use log::info;
use ndarray as nd;
use hermfn::units::{ self, Oscillator };
use lib::{ init_logging, mkdir, write_npz };

// eigenstates of a single ¹⁷¹Yb atom in a harmonic trap, in physical units

const MASS: f64 = 2.8384644058191703e-25; // ¹⁷¹Yb; kg
const TRAP_FREQ: f64 = 30e3; // Hz
const MAX_N: usize = 10;

fn main() -> anyhow::Result<()> {
    init_logging();

    let osc = Oscillator::from_frequency(MASS, TRAP_FREQ)?;
    info!("oscillator length: {:.3e} m", osc.a);
    info!("energy quantum: {:.3e} J ({:.3e} K)", osc.e, osc.temperature());
    info!("mass: {:.3} u", osc.m / units::mu);

    // coordinate and potential arrays, ±10 oscillator lengths
    let x: nd::Array1<f64>
        = nd::Array1::linspace(-10.0 * osc.a, 10.0 * osc.a, 3001);
    let v: nd::Array1<f64> = x.mapv(|xk| osc.potential(xk));

    let energies: nd::Array1<f64>
        = (0..=MAX_N)
        .map(|n| osc.energy(n))
        .collect::<Result<_, _>>()?;
    let states: Vec<nd::Array1<f64>>
        = (0..=MAX_N)
        .map(|n| osc.psi_arr(n, &x))
        .collect::<Result<_, _>>()?;
    let wfs: nd::Array2<f64>
        = nd::stack(
            nd::Axis(0),
            &states.iter().map(|wf| wf.view()).collect::<Vec<_>>(),
        )?;

    let outdir = PathBuf::from("output");
    mkdir(&outdir)?;
    write_npz!(
        outdir.join("trap.npz"),
        arrays: {
            "x" => &x,
            "v" => &v,
            "e" => &energies,
            "wf" => &wfs,
            "a" => &nd::array![osc.a],
            "period" => &nd::array![osc.period()],
        }
    )?;
    info!("wrote {}", outdir.join("trap.npz").display());
    Ok(())
}
