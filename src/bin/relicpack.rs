use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use relicpack::{
    CategoryProfile, CompileItem, CompileOptions, DirectoryExtractor, Extractor, ProcessExtractor,
    compile_batch, open_bundle,
};

#[derive(Parser, Debug)]
#[command(name = "relicpack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile extracted items (or raw source files) into bundles.
    Compile(CompileArgs),
    /// Decode a bundle and print its contents.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input directory: one subdirectory per extracted item, or one source
    /// file per item when --tool is set.
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output directory for compiled bundles.
    #[arg(long)]
    out: PathBuf,

    /// Asset category profile (furniture, clothing, pets, effects).
    #[arg(long, default_value = "furniture")]
    category: String,

    /// External decompiler executable; when set, items are the files in the
    /// input directory and are decompiled before compilation.
    #[arg(long)]
    tool: Option<PathBuf>,

    /// Timeout in seconds for one external decompiler run.
    #[arg(long, default_value_t = 60)]
    tool_timeout: u64,

    /// Override worker thread count.
    #[arg(long)]
    threads: Option<usize>,

    /// Override the profile's atlas row count.
    #[arg(long)]
    num_rows: Option<u32>,

    /// Override the profile's maximum atlas width.
    #[arg(long)]
    max_width: Option<u32>,

    /// Override the profile's maximum atlas height.
    #[arg(long)]
    max_height: Option<u32>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Bundle file to decode.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let mut profile = CategoryProfile::by_name(&args.category)
        .with_context(|| format!("unknown category '{}'", args.category))?;
    if let Some(n) = args.num_rows {
        profile.num_rows = n;
    }
    if let Some(w) = args.max_width {
        profile.max_width = w;
    }
    if let Some(h) = args.max_height {
        profile.max_height = h;
    }

    let want_dirs = args.tool.is_none();
    let mut items = Vec::new();
    for entry in std::fs::read_dir(&args.in_dir)
        .with_context(|| format!("read input dir '{}'", args.in_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() != want_dirs {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        items.push(CompileItem {
            name: name.to_string(),
            source: path,
        });
    }
    items.sort_by(|a, b| a.name.cmp(&b.name));
    if items.is_empty() {
        anyhow::bail!("no items found in '{}'", args.in_dir.display());
    }

    let extractor: Box<dyn Extractor + Sync> = match args.tool {
        Some(program) => {
            let mut ex = ProcessExtractor::new(program);
            ex.timeout = Duration::from_secs(args.tool_timeout);
            Box::new(ex)
        }
        None => Box::new(DirectoryExtractor),
    };

    let opts = CompileOptions {
        out_dir: args.out,
        profile,
        threads: args.threads,
    };
    let stats = compile_batch(&items, extractor.as_ref(), &opts)?;

    eprintln!(
        "compiled {}/{} items ({} skipped, {} failed)",
        stats.items_compiled, stats.items_total, stats.items_skipped, stats.items_failed
    );
    if stats.items_failed > 0 {
        anyhow::bail!("{} item(s) failed", stats.items_failed);
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read bundle '{}'", args.in_path.display()))?;
    let contents = open_bundle(&bytes)?;

    match contents.descriptor {
        Some(descriptor) => {
            println!(
                "descriptor: name='{}' logicType='{}' visualizationType='{}'",
                descriptor.name, descriptor.logic_type, descriptor.visualization_type
            );
            println!(
                "assets: {} ({} aliases)",
                descriptor.assets.len(),
                descriptor
                    .assets
                    .values()
                    .filter(|a| a.source.is_some())
                    .count()
            );
            println!(
                "frames: {} on {}x{} atlas '{}'",
                descriptor.spritesheet.frames.len(),
                descriptor.spritesheet.meta.size.w,
                descriptor.spritesheet.meta.size.h,
                descriptor.spritesheet.meta.image
            );
        }
        None => println!("descriptor: none"),
    }
    match contents.atlas_image {
        Some(img) => println!(
            "image: '{}' {}x{} ({} bytes)",
            img.name,
            img.width,
            img.height,
            img.bytes.len()
        ),
        None => println!("image: none"),
    }
    Ok(())
}
