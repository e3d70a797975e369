//! Output and logging helpers shared by the driver binaries.

use std::{ fs, path::Path };

pub use ndarray_npy::NpzWriter;

/// Create a directory and any missing parents.
pub fn mkdir<P>(dir: P) -> std::io::Result<()>
where P: AsRef<Path>
{
    fs::create_dir_all(dir)
}

/// Install `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}

/// Write a set of named arrays to a `.npz` archive.
///
/// Must be used inside a function whose error type absorbs both
/// [`std::io::Error`] and [`ndarray_npy::WriteNpzError`] (e.g.
/// `anyhow::Result`).
#[macro_export]
macro_rules! write_npz {
    ( $path:expr, arrays: { $( $name:literal => $arr:expr ),* $(,)? } ) => {{
        let mut npz = $crate::NpzWriter::new(std::fs::File::create($path)?);
        $( npz.add_array($name, $arr)?; )*
        npz.finish().map(|_| ())
    }}
}
