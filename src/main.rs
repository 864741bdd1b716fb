//! Video Shelf CLI
//!
//! Scans video folders and edits the position/index prefixes of video files.

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use video_shelf::{config::DEFAULT_STORE_FILE, mutate, Library, MainFolder, ShelfConfig};

const ABOUT: &str = r#"
Video Shelf - browse local video folders, remember where you stopped

Examples:
  video_shelf scan /videos                     List a folder without saving it
  video_shelf open /videos                     Scan and remember a folder
  video_shelf load                             Rescan the remembered folder
  video_shelf position "/videos/s1/a.mp4" 95   Store 01:35 in the filename
  video_shelf index "/videos/s1/a.mp4" 3       Store ordering index 3
  video_shelf move "/videos/s1/a.mp4" s2       Move a video to sibling folder s2
"#;

/// Local video library browser
#[derive(Parser)]
#[command(name = "video_shelf")]
#[command(author, version, about = ABOUT, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Key-value store file
    #[arg(short = 's', long, global = true, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Video file extension
    #[arg(long, global = true, default_value = "mp4")]
    extension: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder one level deep
    Scan { root: PathBuf },
    /// Scan a folder and persist it as the main folder
    Open { root: PathBuf },
    /// Reconcile the persisted main folder with the filesystem
    Load,
    /// Encode a playback position (seconds) into a video filename
    Position { path: PathBuf, seconds: u64 },
    /// Encode an ordering index into a video filename
    Index { path: PathBuf, index: u32 },
    /// Move a video into a sibling subfolder
    Move { path: PathBuf, folder: String },
    /// Rewrite indices 1..N for the given videos, in argument order
    Reindex {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("{}", ABOUT);
        println!("Use 'video_shelf --help' for all options");
        return ExitCode::SUCCESS;
    };

    let config = ShelfConfig::builder()
        .video_extension(cli.extension)
        .store_path(cli.store)
        .build();

    match run(command, config, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: ShelfConfig, json: bool) -> video_shelf::Result<()> {
    match command {
        Commands::Scan { root } => {
            let folder = video_shelf::scan(&root, &config)?;
            print_folder(&folder, json)
        }
        Commands::Open { root } => {
            let mut library = Library::open(config)?;
            let folder = library.set_folder(&root)?;
            print_folder(&folder, json)
        }
        Commands::Load => {
            let mut library = Library::open(config)?;
            match library.load_config()? {
                Some(folder) => print_folder(&folder, json),
                None => {
                    info!("No main folder saved yet, use 'open' first");
                    Ok(())
                }
            }
        }
        Commands::Position { path, seconds } => {
            print_path(&mutate::rename_with_position(&path, seconds)?, json)
        }
        Commands::Index { path, index } => print_path(&mutate::update_index(&path, index)?, json),
        Commands::Move { path, folder } => {
            print_path(&mutate::move_between_folders(&path, &folder)?, json)
        }
        Commands::Reindex { paths } => {
            for path in mutate::reindex(&paths)? {
                print_path(&path, json)?;
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> video_shelf::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_path(path: &Path, json: bool) -> video_shelf::Result<()> {
    if json {
        return print_json(path);
    }
    println!("{}", path.display());
    Ok(())
}

fn print_folder(folder: &MainFolder, json: bool) -> video_shelf::Result<()> {
    if json {
        return print_json(folder);
    }

    println!("{}", folder.path.display());
    for video in &folder.videos_seq {
        println!("  {}", describe(video));
    }
    for subfolder in &folder.subfolders_with_videos {
        println!("  {}/", subfolder.name);
        for video in &subfolder.videos_seq {
            println!("    {}", describe(video));
        }
    }
    if folder.has_nested_subfolders() {
        for name in &folder.sub_subfolder_names {
            println!("  warning: {}/ has nested folders that are not scanned", name);
        }
    }
    Ok(())
}

fn describe(video: &video_shelf::Video) -> String {
    let mut line = video.name.clone();
    if let Some(position) = video.last_played_position {
        line.push_str(&format!(" [{}]", video_shelf::codec::encode_time(position)));
    }
    if video.subtitle_path.is_some() {
        line.push_str(" (subtitles)");
    }
    line
}
