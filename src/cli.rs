// cli.rs
//! CLI argument parsing for smlgen.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use smlgen::program::{BatchSelector, ProgramComplexity};

/// Randomized Standard ML program generator.
///
/// Writes `count` syntactically valid SML programs to the output directory,
/// named `Program_<n>_<length>_<seed>.sml`, plus an `smlgen.json` manifest.
#[derive(Parser, Debug)]
#[command(name = "smlgen")]
#[command(version)]
#[command(about = "Randomized Standard ML program generator")]
pub struct Cli {
    /// Number of programs to generate
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Base seed (random from the clock when omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Output directory, created if missing
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Complexity tier, or `mixed` to cycle through all tiers
    #[arg(short, long, value_enum, default_value_t = ComplexityArg::Mixed)]
    pub complexity: ComplexityArg,

    /// Embedded profile name or path to a .toml profile
    #[arg(short, long, value_name = "NAME|PATH", default_value = "default")]
    pub profile: String,

    /// Do not write smlgen.json
    #[arg(long)]
    pub no_manifest: bool,
}

/// Tier selection on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ComplexityArg {
    Minimal,
    Simple,
    Medium,
    Complex,
    Extreme,
    /// Round-robin over all tiers
    #[default]
    Mixed,
}

impl ComplexityArg {
    pub fn selector(self) -> BatchSelector {
        let tier = match self {
            ComplexityArg::Mixed => return BatchSelector::Mixed,
            ComplexityArg::Minimal => ProgramComplexity::Minimal,
            ComplexityArg::Simple => ProgramComplexity::Simple,
            ComplexityArg::Medium => ProgramComplexity::Medium,
            ComplexityArg::Complex => ProgramComplexity::Complex,
            ComplexityArg::Extreme => ProgramComplexity::Extreme,
        };
        BatchSelector::Single(tier)
    }
}

/// Validate the CLI arguments. Returns an error message if invalid.
pub fn validate(cli: &Cli) -> Result<(), String> {
    if cli.count == 0 {
        return Err("--count must be greater than 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("smlgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.count, 10);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.output, PathBuf::from("."));
        assert_eq!(cli.complexity, ComplexityArg::Mixed);
        assert_eq!(cli.profile, "default");
        assert!(!cli.no_manifest);
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-n", "3", "-s", "-7", "-o", "out", "-c", "extreme", "-p", "tiny"]);
        assert_eq!(cli.count, 3);
        assert_eq!(cli.seed, Some(-7));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(
            cli.complexity.selector(),
            BatchSelector::Single(ProgramComplexity::Extreme)
        );
        assert_eq!(cli.profile, "tiny");
    }

    #[test]
    fn zero_count_is_invalid() {
        let cli = parse(&["--count", "0"]);
        let err = validate(&cli).unwrap_err();
        assert!(err.contains("--count"));
    }

    #[test]
    fn unknown_complexity_is_rejected() {
        let result = Cli::try_parse_from(["smlgen", "-c", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn mixed_selector() {
        assert_eq!(ComplexityArg::Mixed.selector(), BatchSelector::Mixed);
    }
}
