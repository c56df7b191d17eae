use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use spookyhash::{
    hash128,
    mixers::{long, short},
    stats::{
        compute_stats, generate_counting, generate_n_random_bits, generate_random,
        generate_single_1_bit,
    },
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Measures how well each stage of SpookyHash V2 diffuses its input.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Only analyse targets whose names contain one of these (case
    /// insensitive).
    filters: Vec<String>,

    /// Rounds per input pattern.
    #[arg(long, default_value_t = 1 << 12)]
    rounds: usize,

    /// Also measure the bit independence criterion.  Slow.
    #[arg(long)]
    bic: bool,

    /// Write an avalanche chart PNG per target and pattern into this
    /// directory.
    #[arg(long)]
    png_dir: Option<PathBuf>,
}

struct Target<'a> {
    name: &'a str,
    mix_function: &'a dyn Fn(&[u8], &mut [u8]),
    input_size: usize,  // In bytes.
    output_size: usize, // In bytes.
    digest_size: usize, // In bytes.
}

/// The full 128-bit digest of the input, with zero seeds.
fn digest128(in_bytes: &[u8], out_bytes: &mut [u8]) {
    let (hash1, hash2) = hash128(in_bytes, 0, 0);
    out_bytes[0..8].copy_from_slice(&hash1.to_le_bytes());
    out_bytes[8..16].copy_from_slice(&hash2.to_le_bytes());
}

const TARGETS: &[Target] = &[
    Target {
        name: "Long path block absorber",
        mix_function: &long::mix_input,
        input_size: long::IN_SIZE_BYTES,
        output_size: long::OUT_SIZE_BYTES,
        digest_size: long::DIGEST_SIZE_BYTES,
    },
    Target {
        name: "Short path chunk absorber",
        mix_function: &short::mix_input,
        input_size: short::IN_SIZE_BYTES,
        output_size: short::OUT_SIZE_BYTES,
        digest_size: short::DIGEST_SIZE_BYTES,
    },
    Target {
        name: "hash128, 16-byte messages",
        mix_function: &digest128,
        input_size: 16,
        output_size: 16,
        digest_size: 16,
    },
    Target {
        name: "hash128, 191-byte messages",
        mix_function: &digest128,
        input_size: 191,
        output_size: 16,
        digest_size: 16,
    },
    Target {
        name: "hash128, 200-byte messages",
        mix_function: &digest128,
        input_size: 200,
        output_size: 16,
        digest_size: 16,
    },
];

struct BitPattern<'a> {
    name: &'a str,
    gen_function: &'a dyn Fn(usize, &mut [u8]),

    /// Whether to run one round per input bit rather than the configured
    /// number of rounds.
    per_input_bit: bool,
}

const PATTERNS: &[BitPattern] = &[
    BitPattern {
        name: "random",
        gen_function: &generate_random,
        per_input_bit: false,
    },
    BitPattern {
        name: "counting",
        gen_function: &generate_counting,
        per_input_bit: false,
    },
    BitPattern {
        name: "8 random bits",
        gen_function: &|seed, bytes| generate_n_random_bits(seed, bytes, 8),
        per_input_bit: false,
    },
    BitPattern {
        name: "single-bit",
        gen_function: &generate_single_1_bit,

        // With so few samples even a perfect mixer will show some bias, so
        // read these results with that in mind.
        per_input_bit: true,
    },
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Arguments::parse();
    let filters: Vec<String> = args.filters.iter().map(|f| f.to_lowercase()).collect();

    if let Some(dir) = &args.png_dir {
        if let Err(err) = std::fs::create_dir_all(dir) {
            error!(dir = %dir.display(), %err, "cannot create chart directory");
            return ExitCode::FAILURE;
        }
    }

    for target in TARGETS.iter() {
        let lower_name = target.name.to_lowercase();
        if !filters.is_empty() && !filters.iter().any(|f| lower_name.contains(f)) {
            continue;
        }

        println!("\n================================");
        println!("{}", target.name);
        for pattern in PATTERNS.iter() {
            info!(name = target.name, pattern = pattern.name, "measuring");
            println!("\nInput bit pattern: {}", pattern.name);

            let stats = compute_stats(
                pattern.gen_function,
                target.mix_function,
                target.input_size,
                target.output_size,
                target.digest_size,
                if pattern.per_input_bit {
                    target.input_size * 8
                } else {
                    args.rounds
                },
                true,
                args.bic,
            );
            stats.print_report();

            if let Some(dir) = &args.png_dir {
                let path = dir.join(format!("{} - {}.png", target.name, pattern.name));
                if let Err(err) = stats.write_avalanche_png(&path) {
                    error!(path = %path.display(), %err, "cannot write chart");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
