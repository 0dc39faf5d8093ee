use clap::Parser;
use img_batch::config::{self, BatchConfig, ProcessingConfig};
use img_batch::imaging::{Mode, Quality, RunParams};
use img_batch::{output, process};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "img-batch")]
#[command(about = "Apply one image transformation to every image in a folder")]
#[command(long_about = "\
Apply one image transformation to every image in a folder

Every .jpg, .jpeg, .png, .bmp and .gif file directly inside the input folder
is decoded, transformed, and written to the output folder under the same name
and format. Unreadable files are reported and skipped.

Modes and their parameters:

  copy                 re-encode unchanged
  resize               --width and --height (both required)
  gray                 single-channel grayscale
  blur                 --ksize (default 5, even sizes round up)
  rotate               --angle in degrees, counter-clockwise (required)
  flip                 --flip-axis horizontal|vertical
  brightness_contrast  --alpha (gain) and --beta (offset)
  edge                 --threshold1 and --threshold2 (Canny)

Defaults can come from a TOML file given with --config; flags win.
Run 'img-batch --gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Folder to read images from
    #[arg(short, long, required_unless_present = "gen_config")]
    input: Option<PathBuf>,

    /// Folder to write results to (created if missing)
    #[arg(short, long, required_unless_present = "gen_config")]
    output: Option<PathBuf>,

    /// Transform to apply [default: copy]
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Target width for resize
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Target height for resize
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Kernel size for blur [default: 5]
    #[arg(long, allow_negative_numbers = true)]
    ksize: Option<i64>,

    /// Rotation in degrees, counter-clockwise
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f32>,

    /// Flip axis: horizontal or vertical [default: horizontal]
    #[arg(long)]
    flip_axis: Option<String>,

    /// Contrast gain for brightness_contrast [default: 1.0]
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f32>,

    /// Brightness offset for brightness_contrast [default: 0.0]
    #[arg(long, allow_negative_numbers = true)]
    beta: Option<f32>,

    /// Lower Canny threshold for edge [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    threshold1: Option<f32>,

    /// Upper Canny threshold for edge [default: 200]
    #[arg(long, allow_negative_numbers = true)]
    threshold2: Option<f32>,

    /// TOML file with defaults for any of the above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Files to process in parallel [default: 1]
    #[arg(short, long)]
    jobs: Option<usize>,

    /// JPEG quality, 1-100 [default: 95]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// Print a stock config file with all options documented
    #[arg(long)]
    gen_config: bool,
}

impl Cli {
    /// Layer flags over the config file's parameters.
    fn run_params(&self, base: RunParams) -> RunParams {
        RunParams {
            mode: self.mode.unwrap_or(base.mode),
            width: self.width.or(base.width),
            height: self.height.or(base.height),
            ksize: self.ksize.unwrap_or(base.ksize),
            angle: self.angle.or(base.angle),
            flip_axis: self.flip_axis.clone().unwrap_or(base.flip_axis),
            alpha: self.alpha.unwrap_or(base.alpha),
            beta: self.beta.unwrap_or(base.beta),
            threshold1: self.threshold1.unwrap_or(base.threshold1),
            threshold2: self.threshold2.unwrap_or(base.threshold2),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(e.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let (Some(input), Some(output_dir)) = (cli.input.clone(), cli.output.clone()) else {
        return Err("--input and --output are required".into());
    };

    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => BatchConfig::default(),
    };
    let params = cli.run_params(file_config.params);
    let quality = cli
        .quality
        .map(Quality::new)
        .unwrap_or_else(|| file_config.output.quality());
    let threads = config::effective_threads(&ProcessingConfig {
        max_processes: cli.jobs.or(file_config.processing.max_processes),
    });

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(&input, &output_dir, &params, quality, threads, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    let outcome = result?;
    output::print_summary(&outcome, &input);
    Ok(())
}
