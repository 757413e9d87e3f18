use std::path::Path;

use diffraction_spot::{Accumulation, FrameSynthesizer};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "diffraction-spot",
    about = "Synthetic noisy diffraction spot frames"
)]
struct Opt {
    /// Number of frames
    #[structopt(short, long, default_value = "10")]
    frames: usize,
    /// Standard deviation of the Gaussian noise
    #[structopt(short, long, default_value = "0.1")]
    noise_sigma: f64,
    /// Frame size in pixels
    #[structopt(short, long, default_value = "21")]
    array_size: usize,
    /// Random number generator seed
    #[structopt(short, long, default_value = "1")]
    seed: u64,
    /// Directory the frames are rendered into
    #[structopt(short, long)]
    path: Option<String>,
    /// Add the particle only once to the noise
    #[structopt(long)]
    single: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut synthesizer = FrameSynthesizer::new(opt.frames, opt.noise_sigma, opt.array_size)
        .seed(opt.seed);
    if let Some(path) = &opt.path {
        synthesizer = synthesizer.save_path(path);
    }
    if opt.single {
        synthesizer = synthesizer.accumulation(Accumulation::Single);
    }

    let frames = synthesizer.synthesize()?;
    println!(
        "{} frames of {}x{} pixels",
        frames.len(),
        opt.array_size,
        opt.array_size
    );
    if let Some((min, max)) = frames.extrema() {
        println!("intensity range: [{min:.4},{max:.4}]");
    }
    if let Some(path) = opt.path.filter(|path| Path::new(path).is_dir()) {
        println!("frames saved to {path}");
    }

    Ok(())
}
