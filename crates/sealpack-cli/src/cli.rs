//! Argument parsing and command dispatch for the `sealpack` binary.

use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use sealpack_codec::Key;
use sealpack_pipeline::{
    ChainOrder, CipherAlgorithm, CompressionAlgorithm, Operation, PipelineError, process_chained,
    process_directory, process_file,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, render_summary};

#[derive(Parser, Debug)]
#[command(
    name = "sealpack",
    version,
    about = "Compress, seal, and unseal files or whole directories",
    group = ArgGroup::new("operation").required(true).multiple(false)
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Compress the input.
    #[arg(short = 'c', long, group = "operation")]
    compress: bool,
    /// Decompress the input.
    #[arg(short = 'd', long, group = "operation")]
    decompress: bool,
    /// Encrypt the input.
    #[arg(short = 'e', long, group = "operation")]
    encrypt: bool,
    /// Decrypt the input.
    #[arg(short = 'u', long, group = "operation")]
    decrypt: bool,
    /// Run a fixed two-step chain through a transient file.
    #[arg(
        long,
        group = "operation",
        value_name = "ORDER",
        value_parser = parse_chain,
        help = "One of: compress-encrypt, decompress-encrypt, encrypt-compress, decrypt-decompress"
    )]
    chain: Option<ChainOrder>,
    /// Compression algorithm.
    #[arg(long = "comp-alg", value_name = "NAME", default_value = "rle")]
    comp_alg: String,
    /// Cipher algorithm.
    #[arg(long = "enc-alg", value_name = "NAME", default_value = "vigenere")]
    enc_alg: String,
    /// Input file or directory.
    #[arg(short = 'i', value_name = "PATH")]
    input: PathBuf,
    /// Output file or directory.
    #[arg(short = 'o', value_name = "PATH")]
    output: PathBuf,
    /// Cipher key, required for encrypt, decrypt, and every chain.
    #[arg(short = 'k', value_name = "KEY", env = "SEALPACK_KEY")]
    key: Option<String>,
    /// Maximum files processed concurrently; defaults to one worker per file.
    #[arg(long, value_name = "N")]
    jobs: Option<NonZeroUsize>,
    /// Summary output format for directory runs.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// Parses CLI arguments, executes the requested transform, and returns the
/// process exit code.
pub async fn run() -> i32 {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(&cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn dispatch(cli: &Cli) -> Result<()> {
    let meta = fs::metadata(&cli.input)
        .with_context(|| format!("cannot access input '{}'", cli.input.display()))?;

    debug!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        directory = meta.is_dir(),
        "dispatching invocation"
    );

    if let Some(order) = cli.chain {
        if meta.is_dir() {
            bail!("chained transforms operate on a single file, not a directory");
        }
        let compression: CompressionAlgorithm = cli.comp_alg.parse()?;
        let cipher: CipherAlgorithm = cli.enc_alg.parse()?;
        let key = chain_key(cli.key.as_deref())?;
        process_chained(&cli.input, &cli.output, order, compression, cipher, &key)
            .with_context(|| format!("chain '{}' failed", order.as_str()))?;
        return Ok(());
    }

    let operation = build_operation(cli)?;
    if meta.is_dir() {
        match process_directory(&cli.input, &cli.output, &operation, cli.jobs).await {
            Ok(summary) => render_summary(&summary, cli.format),
            Err(PipelineError::PartialFailure { summary }) => {
                render_summary(&summary, cli.format)?;
                Err(PipelineError::PartialFailure { summary }.into())
            }
            Err(err) => Err(err.into()),
        }
    } else {
        process_file(&cli.input, &cli.output, &operation)
            .with_context(|| format!("failed to {} '{}'", operation.label(), cli.input.display()))?;
        Ok(())
    }
}

fn build_operation(cli: &Cli) -> Result<Operation, PipelineError> {
    // The clap group guarantees exactly one operation flag is set.
    if cli.compress {
        Operation::compress(&cli.comp_alg)
    } else if cli.decompress {
        Operation::decompress(&cli.comp_alg)
    } else if cli.encrypt {
        Operation::encrypt(&cli.enc_alg, cli.key.as_deref())
    } else {
        Operation::decrypt(&cli.enc_alg, cli.key.as_deref())
    }
}

fn chain_key(raw: Option<&str>) -> Result<Key, PipelineError> {
    let raw = raw.ok_or(PipelineError::MissingKey)?;
    Key::new(raw).map_err(|source| PipelineError::InvalidKey { source })
}

fn parse_chain(value: &str) -> Result<ChainOrder, String> {
    value.parse::<ChainOrder>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sealpack").chain(args.iter().copied()))
    }

    fn path_arg(path: &Path) -> String {
        path.display().to_string()
    }

    #[test]
    fn exactly_one_operation_flag_is_required() {
        assert!(parse(&["-i", "in", "-o", "out"]).is_err());
        assert!(parse(&["-c", "-e", "-i", "in", "-o", "out", "-k", "sun"]).is_err());
        assert!(parse(&["-c", "-i", "in", "-o", "out"]).is_ok());
    }

    #[test]
    fn chain_flag_counts_as_the_operation() {
        let cli = parse(&["--chain", "compress-encrypt", "-i", "in", "-o", "out", "-k", "sun"])
            .expect("chain invocation should parse");
        assert_eq!(cli.chain, Some(ChainOrder::CompressThenEncrypt));

        assert!(
            parse(&[
                "--chain",
                "compress-encrypt",
                "-c",
                "-i",
                "in",
                "-o",
                "out"
            ])
            .is_err(),
            "chain conflicts with the single-operation flags"
        );
        assert!(parse(&["--chain", "bogus-order", "-i", "in", "-o", "out"]).is_err());
    }

    #[test]
    fn algorithm_and_jobs_flags_have_defaults() {
        let cli = parse(&["-c", "-i", "in", "-o", "out"]).expect("defaults should parse");
        assert_eq!(cli.comp_alg, "rle");
        assert_eq!(cli.enc_alg, "vigenere");
        assert_eq!(cli.jobs, None);

        let cli = parse(&["-c", "-i", "in", "-o", "out", "--jobs", "4"]).expect("jobs flag");
        assert_eq!(cli.jobs, NonZeroUsize::new(4));
        assert!(parse(&["-c", "-i", "in", "-o", "out", "--jobs", "0"]).is_err());
    }

    #[test]
    fn build_operation_honours_the_selected_flag() {
        let cli = parse(&["-e", "-i", "in", "-o", "out", "-k", "lemon"]).expect("encrypt flags");
        let operation = build_operation(&cli).expect("valid operation");
        assert_eq!(operation.label(), "encrypt");

        let cli = parse(&["-u", "-i", "in", "-o", "out"]).expect("decrypt without key parses");
        assert!(matches!(
            build_operation(&cli),
            Err(PipelineError::MissingKey)
        ));
    }

    #[tokio::test]
    async fn dispatch_compresses_a_single_file() -> Result<()> {
        let temp = TempDir::new()?;
        let input = temp.path().join("input.txt");
        let output = temp.path().join("output.rle");
        fs::write(&input, b"AAAABBBCC")?;

        let cli = parse(&["-c", "-i", &path_arg(&input), "-o", &path_arg(&output)])?;
        dispatch(&cli).await?;
        assert_eq!(fs::read(&output)?, [b'A', 0x04, b'B', 0x03, b'C', 0x02]);
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_fans_out_over_a_directory() -> Result<()> {
        let temp = TempDir::new()?;
        let input_dir = temp.path().join("in");
        let output_dir = temp.path().join("out");
        fs::create_dir(&input_dir)?;
        for name in ["a.txt", "b.txt"] {
            fs::write(input_dir.join(name), b"zzzz")?;
        }

        let cli = parse(&[
            "-c",
            "-i",
            &path_arg(&input_dir),
            "-o",
            &path_arg(&output_dir),
            "--jobs",
            "2",
        ])?;
        dispatch(&cli).await?;
        for name in ["a.txt", "b.txt"] {
            assert_eq!(fs::read(output_dir.join(name))?, [b'z', 0x04]);
        }
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_runs_a_chain_end_to_end() -> Result<()> {
        let temp = TempDir::new()?;
        let input = temp.path().join("plain.txt");
        let sealed = temp.path().join("sealed");
        let restored = temp.path().join("restored.txt");
        let payload = b"chained payload without runs";
        fs::write(&input, payload)?;

        let seal = parse(&[
            "--chain",
            "encrypt-compress",
            "-i",
            &path_arg(&input),
            "-o",
            &path_arg(&sealed),
            "-k",
            "lemon",
        ])?;
        dispatch(&seal).await?;

        let unseal = parse(&[
            "--chain",
            "decrypt-decompress",
            "-i",
            &path_arg(&sealed),
            "-o",
            &path_arg(&restored),
            "-k",
            "lemon",
        ])?;
        dispatch(&unseal).await?;

        assert_eq!(fs::read(&restored)?, payload);
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_rejects_chain_against_a_directory() -> Result<()> {
        let temp = TempDir::new()?;
        let input_dir = temp.path().join("in");
        fs::create_dir(&input_dir)?;

        let cli = parse(&[
            "--chain",
            "compress-encrypt",
            "-i",
            &path_arg(&input_dir),
            "-o",
            &path_arg(&temp.path().join("out")),
            "-k",
            "lemon",
        ])?;
        let err = dispatch(&cli).await.expect_err("directory input should be rejected");
        assert!(err.to_string().contains("single file"));
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_reports_missing_input() -> Result<()> {
        let temp = TempDir::new()?;
        let cli = parse(&[
            "-c",
            "-i",
            &path_arg(&temp.path().join("missing")),
            "-o",
            &path_arg(&temp.path().join("out")),
        ])?;
        let err = dispatch(&cli).await.expect_err("missing input should fail");
        assert!(err.to_string().contains("cannot access input"));
        Ok(())
    }
}
