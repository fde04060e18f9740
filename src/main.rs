use clap::Parser;
use ratio_resize::config;
use ratio_resize::imaging::{EnergyOperator, Quality, ResampleFilter, ResizeMethod, RustBackend};
use ratio_resize::output;
use ratio_resize::request::ResizeRequest;
use ratio_resize::resize::{self, ResizeError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ratio-resize")]
#[command(about = "Resize an image to a target width or height, preserving aspect ratio")]
#[command(long_about = "\
Resize an image to a target width or height, preserving aspect ratio

One edge is fixed to --pixels; the other is derived from the source aspect
ratio and truncated to a whole pixel:

  -m w   width  = pixels, height = floor(pixels * H / W)
  -m h   height = pixels, width  = floor(pixels * W / H)

The output format follows the output file extension (jpg, png, tiff, webp,
gif, bmp, avif). An existing output file is overwritten.

With --method seam the image is shrunk by removing its lowest-energy seams
instead of being resampled, which keeps high-contrast detail intact. Pick the
energy function with --energy; --energy-map writes it as a grayscale image.

Defaults can be kept in a TOML file passed with --config; flags given on the
command line win. Run 'ratio-resize --gen-config' for a documented template.")]
#[command(version)]
struct Cli {
    /// Source image
    #[arg(short, long, required_unless_present = "gen_config")]
    input: Option<PathBuf>,

    /// Destination image; format is taken from the extension
    #[arg(short, long, required_unless_present = "gen_config")]
    output: Option<PathBuf>,

    /// Fixed edge: "w" (width) or "h" (height) [default: w]
    #[arg(short, long)]
    mode: Option<String>,

    /// Size of the fixed edge in pixels [default: 500]
    #[arg(short, long)]
    pixels: Option<u32>,

    /// Resampling filter [default: lanczos3]
    #[arg(short, long, value_enum)]
    filter: Option<ResampleFilter>,

    /// Resample the whole image, or carve out low-energy seams [default: resample]
    #[arg(long, value_enum)]
    method: Option<ResizeMethod>,

    /// Energy function for seam carving and --energy-map [default: sobel]
    #[arg(short, long, value_enum)]
    energy: Option<EnergyOperator>,

    /// Also write a grayscale energy map of the result to this path
    #[arg(long)]
    energy_map: Option<PathBuf>,

    /// JPEG/AVIF quality, 1-100 [default: 90]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented, then exit
    #[arg(long)]
    gen_config: bool,

    /// Do not print the summary
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ResizeError> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        unreachable!("clap requires --input and --output without --gen-config");
    };
    let request = build_request(&cli, input, output)?;
    let summary = resize::run(&RustBackend::new(), &request)?;
    if !cli.quiet {
        output::print_resize_output(&summary);
    }
    Ok(())
}

/// Layer command-line flags over the config file over stock defaults.
fn build_request(cli: &Cli, input: &Path, output: &Path) -> Result<ResizeRequest, ResizeError> {
    let defaults = config::load_config(cli.config.as_deref())?;

    let mode = cli.mode.as_deref().unwrap_or(&defaults.resize.mode);
    let pixels = cli.pixels.unwrap_or(defaults.resize.pixels);
    let filter = cli.filter.unwrap_or(defaults.resize.filter);
    let quality = Quality::new(cli.quality.unwrap_or(defaults.output.quality));

    let request = ResizeRequest::new(input, output, mode, pixels, filter, quality)?
        .with_method(cli.method.unwrap_or(defaults.resize.method))
        .with_energy(cli.energy.unwrap_or(defaults.resize.energy));
    Ok(match &cli.energy_map {
        Some(path) => request.with_energy_map(path),
        None => request,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ratio_resize::imaging::ResizeMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ratio-resize").chain(args.iter().copied())).unwrap()
    }

    fn request_for(args: &[&str]) -> Result<ResizeRequest, ResizeError> {
        let cli = parse(args);
        let input = cli.input.clone().unwrap();
        let output = cli.output.clone().unwrap();
        build_request(&cli, &input, &output)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_width_500() {
        let req = request_for(&["-i", "a.jpg", "-o", "b.png"]).unwrap();
        assert_eq!(req.mode(), ResizeMode::ByWidth);
        assert_eq!(req.pixels(), 500);
        assert_eq!(req.scale().filter, ResampleFilter::Lanczos3);
        assert_eq!(req.scale().quality.value(), 90);
    }

    #[test]
    fn long_flags_parse() {
        let req = request_for(&[
            "--input", "a.jpg", "--output", "b.png", "--mode", "h", "--pixels", "64",
        ])
        .unwrap();
        assert_eq!(req.input(), Path::new("a.jpg"));
        assert_eq!(req.output(), Path::new("b.png"));
        assert_eq!(req.mode(), ResizeMode::ByHeight);
        assert_eq!(req.pixels(), 64);
    }

    #[test]
    fn invalid_mode_is_rejected_by_request() {
        let err = request_for(&["-i", "a", "-o", "b", "-m", "x"]).unwrap_err();
        assert!(matches!(err, ResizeError::Request(_)));
    }

    #[test]
    fn input_and_output_are_required() {
        assert!(Cli::try_parse_from(["ratio-resize", "-o", "b.png"]).is_err());
        assert!(Cli::try_parse_from(["ratio-resize", "-i", "a.png"]).is_err());
    }

    #[test]
    fn gen_config_needs_no_paths() {
        let cli = parse(&["--gen-config"]);
        assert!(cli.gen_config);
        assert!(cli.input.is_none() && cli.output.is_none());
        assert!(run(cli).is_ok());
    }

    #[test]
    fn seam_flags_parse() {
        let req = request_for(&[
            "-i",
            "a.png",
            "-o",
            "b.png",
            "--method",
            "seam",
            "-e",
            "scharr",
            "--energy-map",
            "e.png",
        ])
        .unwrap();
        assert_eq!(req.method(), ResizeMethod::Seam);
        assert_eq!(req.scale().energy, EnergyOperator::Scharr);
        assert_eq!(req.energy_map(), Some(Path::new("e.png")));
    }

    #[test]
    fn unknown_method_or_energy_is_a_usage_error() {
        assert!(
            Cli::try_parse_from(["ratio-resize", "-i", "a", "-o", "b", "--method", "crop"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["ratio-resize", "-i", "a", "-o", "b", "-e", "canny"]).is_err()
        );
    }

    #[test]
    fn quality_out_of_range_is_a_usage_error() {
        assert!(Cli::try_parse_from(["ratio-resize", "-i", "a", "-o", "b", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["ratio-resize", "-i", "a", "-o", "b", "-q", "101"]).is_err());
    }

    #[test]
    fn unknown_filter_is_a_usage_error() {
        assert!(
            Cli::try_parse_from(["ratio-resize", "-i", "a", "-o", "b", "-f", "bicubic"]).is_err()
        );
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("resize.toml");
        std::fs::write(&path, "[resize]\nmode = \"h\"\npixels = 64\nfilter = \"nearest\"\n").unwrap();
        let path = path.to_str().unwrap();

        let from_file = request_for(&["-i", "a", "-o", "b", "-c", path]).unwrap();
        assert_eq!(from_file.mode(), ResizeMode::ByHeight);
        assert_eq!(from_file.pixels(), 64);
        assert_eq!(from_file.scale().filter, ResampleFilter::Nearest);

        let overridden =
            request_for(&["-i", "a", "-o", "b", "-c", path, "-m", "w", "-p", "10"])
                .unwrap();
        assert_eq!(overridden.mode(), ResizeMode::ByWidth);
        assert_eq!(overridden.pixels(), 10);
        assert_eq!(overridden.scale().filter, ResampleFilter::Nearest);
    }

    #[test]
    fn method_flag_overrides_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("resize.toml");
        std::fs::write(&path, "[resize]\nmethod = \"seam\"\nenergy = \"roberts\"\n").unwrap();
        let path = path.to_str().unwrap();

        let from_file = request_for(&["-i", "a", "-o", "b", "-c", path]).unwrap();
        assert_eq!(from_file.method(), ResizeMethod::Seam);
        assert_eq!(from_file.scale().energy, EnergyOperator::Roberts);

        let overridden =
            request_for(&["-i", "a", "-o", "b", "-c", path, "--method", "resample"]).unwrap();
        assert_eq!(overridden.method(), ResizeMethod::Resample);
        assert_eq!(overridden.scale().energy, EnergyOperator::Roberts);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = request_for(&["-i", "a", "-o", "b", "-c", "/no/such/resize.toml"])
            .unwrap_err();
        assert!(matches!(err, ResizeError::Config(_)));
    }
}
