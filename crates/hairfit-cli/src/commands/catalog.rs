//! Catalog command - list hairstyles and per-shape recommendations.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use hairfit_core::{hairstyle, recommend, FaceShape, Hairstyle};
use serde::Serialize;

/// Arguments for the catalog command
#[derive(Args)]
pub struct CatalogArgs {
    /// Only list recommendations for this face shape
    #[arg(long, value_name = "NAME")]
    pub shape: Option<FaceShape>,
}

/// One output row: a face shape and its recommended hairstyles, best first.
#[derive(Serialize)]
struct CatalogEntry {
    face_shape: FaceShape,
    hairstyles: Vec<&'static Hairstyle>,
}

impl CatalogEntry {
    fn for_shape(shape: FaceShape) -> Self {
        Self {
            face_shape: shape,
            hairstyles: recommend(Some(shape))
                .iter()
                .filter_map(|&id| hairstyle(id))
                .collect(),
        }
    }
}

/// Run the catalog command, writing one JSON line per face shape.
pub fn run(args: &CatalogArgs) -> Result<()> {
    let shapes: Vec<FaceShape> = args
        .shape
        .map_or_else(|| FaceShape::ALL.to_vec(), |shape| vec![shape]);

    let mut stdout = io::stdout().lock();
    for shape in shapes {
        let line = serde_json::to_string(&CatalogEntry::for_shape(shape))?;
        writeln!(stdout, "{line}").context("Failed to write catalog")?;
    }
    stdout.flush()?;
    Ok(())
}
