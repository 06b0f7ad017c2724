use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use texatlas::{Atlas, LoadOptions, Texture, Validation};

#[derive(Parser)]
#[command(name = "readmap", about = "Print the contents of a texture atlas map file")]
struct Cli {
    /// Path to the binary .map file.
    map: PathBuf,
    /// Print the frames of this texture instead of the atlas summary.
    texture: Option<String>,
    /// Also reject files whose declared section lengths disagree with their contents.
    #[arg(long)]
    strict: bool,
}

fn load_atlas(path: &Path, strict: bool) -> Result<Atlas> {
    let validation = if strict {
        Validation::Strict
    } else {
        Validation::Lenient
    };
    let options = LoadOptions::default().with_validation(validation);
    texatlas::load_with(path, &options)
        .with_context(|| format!("failed to load texture atlas map: {}", path.display()))
}

fn print_atlas_info(out: &mut impl Write, atlas: &Atlas) -> io::Result<()> {
    writeln!(
        out,
        "Atlas is {}x{} with {} texture(s).",
        atlas.width(),
        atlas.height(),
        atlas.num_textures()
    )
}

fn print_texture_info(out: &mut impl Write, texture: &Texture) -> io::Result<()> {
    writeln!(
        out,
        "Texture \"{}\" has {} frame(s).",
        texture.name(),
        texture.num_frames()
    )
}

fn print_texture_frame_info(out: &mut impl Write, texture: &Texture) -> io::Result<()> {
    for (i, frame) in texture.frames().iter().enumerate() {
        writeln!(
            out,
            "Frame {} is {}x{} at {}, {}.",
            i, frame.width, frame.height, frame.x, frame.y
        )?;
    }
    Ok(())
}

/// Atlas line followed by one line per texture.
fn write_summary(out: &mut impl Write, atlas: &Atlas) -> Result<()> {
    print_atlas_info(out, atlas)?;
    for texture in atlas {
        print_texture_info(out, texture)?;
    }
    Ok(())
}

/// Texture line followed by one line per frame.
fn write_texture(out: &mut impl Write, atlas: &Atlas, name: &str) -> Result<()> {
    let Some(texture) = atlas.lookup(name) else {
        bail!("texture not found: {name}");
    };
    print_texture_info(out, texture)?;
    print_texture_frame_info(out, texture)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    log::debug!("readmap {}", cli.map.display());
    let atlas = load_atlas(&cli.map, cli.strict)?;
    let mut out = io::stdout().lock();
    match &cli.texture {
        Some(name) => write_texture(&mut out, &atlas, name),
        None => write_summary(&mut out, &atlas),
    }
}
