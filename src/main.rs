use std::{fs, path::Path, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;

use zip_reader::{LocalFileEntry, ZipArchive};

mod cli;
mod log;

use cli::{Cli, Command};

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the tracing subscriber for logging based on user flags.
    log::set_up_logger(cli.verbose);

    tracing::debug!("command passed: {:?}", &cli.command);

    match &cli.command {
        Command::List { archive } => {
            let buffer = load_archive(archive)?;

            let mut zip = ZipArchive::new(&buffer);
            let failure = zip.read_entries().map(|_| ()).err();

            // Entries decoded before a failure are still worth showing.
            let entries = zip.entries();
            print_listing(entries);

            match failure {
                None => {
                    println!("\n{} entries found.", entries.len());
                }
                Some(err) => {
                    tracing::error!("decoding stopped after {} entries: {}", entries.len(), err);
                    return Err(err).context("could not decode every entry");
                }
            }
        }

        Command::Show { archive, name } => {
            let buffer = load_archive(archive)?;

            let entries = zip_reader::read_entries(&buffer)
                .with_context(|| format!("could not decode {}", archive.display()))?;

            // Names are raw bytes on disk; compare them as such.
            match entries.iter().find(|e| e.file_name == name.as_bytes()) {
                Some(entry) => print_entry(entry),
                None => println!("No entry named '{}' in the archive.", name),
            }
        }
    }

    Ok(())
}

fn load_archive(path: &Path) -> Result<Vec<u8>> {
    let buffer =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!("loaded {} bytes from {}", buffer.len(), path.display());
    Ok(buffer)
}

fn print_listing(entries: &[LocalFileEntry<'_>]) {
    for entry in entries {
        let (year, month, day) = entry.mod_date();
        let (hour, minute, _) = entry.mod_time();
        println!(
            "{:>10} {:>10}  {:<10}  {:04}-{:02}-{:02} {:02}:{:02}  {}",
            entry.compressed_size,
            entry.uncompressed_size,
            entry.method(),
            year,
            month,
            day,
            hour,
            minute,
            String::from_utf8_lossy(entry.file_name),
        );
    }
}

fn print_entry(entry: &LocalFileEntry<'_>) {
    let (year, month, day) = entry.mod_date();
    let (hour, minute, second) = entry.mod_time();

    println!("- Name: {}", String::from_utf8_lossy(entry.file_name));
    println!("  Method: {}", entry.method());
    println!("  Compressed size: {} bytes", entry.compressed_size);
    println!("  Uncompressed size: {} bytes", entry.uncompressed_size);
    println!("  CRC-32: {:08x}", entry.crc32);
    println!(
        "  Modified: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    );
    println!("  Version needed: {}", entry.version_needed);
    if !entry.extra.is_empty() {
        println!("  Extra field: {} bytes", entry.extra.len());
    }
    if entry.is_directory() {
        println!("  Directory entry");
    }
}

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
