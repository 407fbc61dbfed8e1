use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "drinkmakr", version)]
struct Cli {
    /// Log pipeline stages at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a recipe into a PNG.
    Compose(ComposeArgs),
    /// Print the silhouette bounding box of a mask as JSON.
    Bbox(BboxArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input recipe JSON. Asset paths resolve relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the recipe's pipeline variant.
    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    /// Override the edge length every picture is stretched to.
    #[arg(long)]
    size: Option<u32>,

    /// Also write every intermediate stage as PNG into this directory.
    #[arg(long)]
    dump_stages: Option<PathBuf>,

    /// Print the SHA-256 of the result's RGBA bytes.
    #[arg(long)]
    print_digest: bool,
}

#[derive(Parser, Debug)]
struct BboxArgs {
    /// Mask picture; only its alpha channel is read.
    #[arg(long)]
    mask: PathBuf,

    /// Stretch the mask to this edge length first.
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Basic,
    Extended,
}

impl From<VariantChoice> for drinkmakr::Variant {
    fn from(v: VariantChoice) -> Self {
        match v {
            VariantChoice::Basic => drinkmakr::Variant::Basic,
            VariantChoice::Extended => drinkmakr::Variant::Extended,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Bbox(args) => cmd_bbox(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut recipe = drinkmakr::Recipe::from_path(&args.in_path)?;
    if let Some(v) = args.variant {
        recipe.pipeline.variant = v.into();
    }
    if let Some(size) = args.size {
        recipe.pipeline.size = Some(size);
    }
    recipe.validate()?;

    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let inputs = drinkmakr::AssetRoot::new(assets_root).load_inputs(&recipe)?;
    let pipeline = drinkmakr::Pipeline::new(recipe.pipeline.clone())?;

    let result = match &args.dump_stages {
        Some(dir) => {
            let trace = pipeline.run_traced(&inputs)?;
            dump_stages(dir, &trace)?;
            trace.result
        }
        None => pipeline.run(&inputs)?,
    };

    write_png(&args.out, &result)?;
    if args.print_digest {
        println!("{}", sha256_hex(result.as_bytes()));
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_bbox(args: BboxArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.mask)
        .with_context(|| format!("read mask '{}'", args.mask.display()))?;
    let mask = match args.size {
        Some(size) => drinkmakr::decode_image_sized(&bytes, size)?,
        None => drinkmakr::decode_image(&bytes)?,
    };
    let bbox = drinkmakr::locate_silhouette(&mask);
    println!("{}", serde_json::to_string(&bbox)?);
    Ok(())
}

fn dump_stages(dir: &Path, trace: &drinkmakr::PipelineTrace) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create stage dir '{}'", dir.display()))?;

    let mut stages = vec![("1_cropped", &trace.cropped), ("2_warped", &trace.warped)];
    if let Some(shaded) = &trace.shaded {
        stages.push(("3_shaded", shaded));
    }
    stages.push(("4_overlay", &trace.overlay));
    stages.push(("5_result", &trace.result));

    for (name, buf) in stages {
        write_png(&dir.join(format!("{name}.png")), buf)?;
    }
    let bbox_path = dir.join("bbox.json");
    std::fs::write(&bbox_path, serde_json::to_vec_pretty(&trace.bbox)?)
        .with_context(|| format!("write '{}'", bbox_path.display()))?;
    Ok(())
}

fn write_png(path: &Path, buf: &drinkmakr::ImageBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bytes = drinkmakr::encode_png(buf)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
