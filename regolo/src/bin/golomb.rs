use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libgolo::{Error, Golomb, SignedMode};

#[derive(Parser)]
#[command(name = "golomb")]
#[command(version)]
#[command(about = "Standalone Golomb coder over human-readable bit strings", long_about = None)]
struct Cli {
    /// Golomb parameter m
    #[arg(short, default_value_t = 4)]
    m: u32,

    /// How negative numbers are mapped onto the unsigned code
    #[arg(long, value_enum, default_value_t = Mode::Interleaving)]
    mode: Mode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Interleave positive and negative values
    Interleaving,
    /// Use a separate sign bit
    SignMagnitude,
}

impl From<Mode> for SignedMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Interleaving => SignedMode::Interleaving,
            Mode::SignMagnitude => SignedMode::SignMagnitude,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one or more integers
    Encode {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<i32>,
    },
    /// Decode one or more bit strings (e.g. "10110")
    Decode {
        #[arg(required = true)]
        bits: Vec<String>,
    },
}

fn string_to_bits(text: &str) -> Result<Vec<u8>, Error> {
    text.chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(Error::BadBitString(other)),
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let golomb = Golomb::with_mode(cli.m, cli.mode.into())?;

    println!("Golomb coding configuration:");
    println!("  m = {}", cli.m);
    println!(
        "  mode = {}",
        match cli.mode {
            Mode::Interleaving => "interleaving",
            Mode::SignMagnitude => "sign-magnitude",
        }
    );
    println!();

    match cli.command {
        Commands::Encode { values } => {
            println!("Encoding integers:");
            println!("{}", "-".repeat(60));

            let mut stream = Vec::new();
            for value in &values {
                let bits = golomb.encode_bits(*value);
                println!(
                    "{:>8} -> {} ({} bits)",
                    value,
                    Golomb::bits_to_string(&bits),
                    bits.len()
                );
                stream.extend(bits);
            }

            if values.len() > 1 {
                println!("{}", "-".repeat(60));
                println!("Complete bit stream ({} bits):", stream.len());
                println!("{}", Golomb::bits_to_string(&stream));
            }
        }
        Commands::Decode { bits } => {
            println!("Decoding bit strings:");
            println!("{}", "-".repeat(60));

            for text in &bits {
                let parsed = string_to_bits(text)?;
                let (value, used) = golomb
                    .decode_bits(&parsed)
                    .with_context(|| format!("failed to decode {text:?}"))?;

                print!("{text} -> {value:>8}");
                if used < parsed.len() {
                    print!(
                        " (used {}/{} bits, {} remaining)",
                        used,
                        parsed.len(),
                        parsed.len() - used
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}
