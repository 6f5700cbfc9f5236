//! Cuboid Model CLI
//!
//! Inspect, validate and normalize JSON block model files.

use clap::{Args, Parser, Subcommand};
use cuboid_model::{AtlasLayout, AtlasSize, Model, ParserConfig, TextureAtlas, TextureLookup, Vec2};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cuboid-model")]
#[command(author, version, about = "Inspect and validate JSON block models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print elements, rotations and faces with resolved UVs
    Inspect {
        /// Model JSON file
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,

        /// Pack every referenced texture as a 16x16 tile and resolve against that layout
        #[arg(long)]
        layout: bool,
    },

    /// Check that a model parses; exits non-zero on malformed input
    Validate {
        /// Model JSON file
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Rewrite a model in canonical form
    Normalize {
        /// Model JSON file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },
}

#[derive(Args)]
struct ParseArgs {
    /// Atlas width in pixels
    #[arg(long, default_value = "16")]
    atlas_width: u32,

    /// Atlas height in pixels
    #[arg(long, default_value = "16")]
    atlas_height: u32,

    /// Don't warn about non-standard element angles or face rotations
    #[arg(long)]
    quiet_rotations: bool,
}

impl ParseArgs {
    fn config(&self) -> cuboid_model::Result<ParserConfig> {
        Ok(ParserConfig::default()
            .with_atlas(AtlasSize::new(self.atlas_width, self.atlas_height)?)
            .with_rotation_warnings(!self.quiet_rotations))
    }

    fn load(&self, input: &PathBuf) -> cuboid_model::Result<Model> {
        let text = fs::read_to_string(input)?;
        cuboid_model::Parser::with_config(self.config()?).parse_str(&text)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            input,
            parse,
            layout,
        } => parse.load(&input).map(|model| inspect(&model, layout)),
        Commands::Validate { input, parse } => parse.load(&input).map(|model| {
            println!(
                "{}: ok ({} elements, {} faces)",
                input.display(),
                model.len(),
                model.face_count()
            );
        }),
        Commands::Normalize {
            input,
            output,
            parse,
        } => normalize(&input, output.as_ref(), &parse),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn normalize(
    input: &PathBuf,
    output: Option<&PathBuf>,
    parse: &ParseArgs,
) -> cuboid_model::Result<()> {
    let model = parse.load(input)?;
    let text = model.to_json_string()?;
    match output {
        Some(path) => {
            fs::write(path, text)?;
            log::info!("wrote {} elements to {:?}", model.len(), path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn inspect(model: &Model, layout: bool) {
    let atlas = layout.then(|| pack_textures(model));

    println!("Model: {} elements, {} faces", model.len(), model.face_count());
    match &atlas {
        Some(Ok(atlas)) => println!("  Atlas: {} (packed layout)", atlas.size()),
        Some(Err(e)) => println!("  Atlas: layout failed ({}), using {}", e, model.atlas()),
        None => println!("  Atlas: {}", model.atlas()),
    }
    if let Some(bounds) = model.bounds() {
        println!("  Bounds: {:?} -> {:?}", bounds.min.to_array(), bounds.max.to_array());
    }

    for (i, element) in model.elements().iter().enumerate() {
        println!();
        match &element.name {
            Some(name) => println!("[{}] {}", i, name),
            None => println!("[{}]", i),
        }
        println!("  from {:?} to {:?}", element.from.to_array(), element.to.to_array());
        if let Some(axis) = element.axis() {
            println!(
                "  rotate {} degrees around {} at {:?}",
                element.angle(),
                axis,
                element.origin().to_array()
            );
        }

        for (dir, face) in element.faces.iter() {
            let (uv_from, uv_to) = match &atlas {
                Some(Ok(atlas)) => model
                    .resolve_face(face, atlas)
                    .unwrap_or_else(|_| model.resolve_uv(face, Vec2::ZERO)),
                _ => model.resolve_uv(face, Vec2::ZERO),
            };
            let cull = face
                .cullface
                .map(|c| format!(" cull={}", c))
                .unwrap_or_default();
            println!(
                "  {:<5} {:<16} uv {:?} -> {:?}  atlas {:?} -> {:?} rot={}{}",
                dir.name(),
                face.texture,
                face.uv_from.to_array(),
                face.uv_to.to_array(),
                uv_from.to_array(),
                uv_to.to_array(),
                face.rotation,
                cull
            );
        }
    }
}

fn pack_textures(model: &Model) -> cuboid_model::Result<TextureAtlas> {
    let mut layout = AtlasLayout::new(4096, 0);
    for texture in model.textures() {
        layout.add_texture(texture, 16, 16);
    }
    layout.build()
}
