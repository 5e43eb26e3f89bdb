use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use vignette_core::source::ImageSource;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = ImageSource::load(&args.file)?;

    println!("File:        {}", source.path().display());
    println!("Dimensions:  {}x{}", source.width(), source.height());
    println!("Color type:  {:?}", source.color_type());

    let decoded_kb = source.pixels().as_raw().len() as f64 / 1024.0;
    println!("Decoded:     {:.1} KB (RGBA8)", decoded_kb);

    Ok(())
}
