//! Wavefront MTL support
//!
//! [`parse_mtl`] builds a [`MaterialLibrary`] from MTL source text, which may
//! be several library files joined by newlines. Each `newmtl` starts a fresh
//! descriptor initialized to the default material; property directives seen
//! before the first `newmtl` belong to no material and are dropped.
//! Keywords match case-insensitively.

use crate::tokenizer::{logical_lines, Directive};
use meshview_core::{Material, MaterialLibrary, Result, Rgb};
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// A material under construction
#[derive(Debug, Default)]
struct MaterialBuilder {
    material: Material,
    dissolve: Option<f32>,
    transparency: Option<f32>,
}

impl MaterialBuilder {
    /// `d` wins over `Tr` whichever comes first
    fn build(self) -> Material {
        let opacity = self
            .dissolve
            .or(self.transparency.map(|tr| 1.0 - tr))
            .unwrap_or(1.0);

        Material {
            opacity,
            ..self.material
        }
    }

    fn ambient(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.ambient = color(directive)?;
        Ok(())
    }

    fn diffuse(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.diffuse = color(directive)?;
        Ok(())
    }

    fn specular(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.specular = color(directive)?;
        Ok(())
    }

    fn emissive(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.emissive = color(directive)?;
        Ok(())
    }

    fn shininess(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.shininess = scalar(directive)?;
        Ok(())
    }

    fn optical_density(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.optical_density = scalar(directive)?;
        Ok(())
    }

    fn dissolve(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.dissolve = Some(scalar(directive)?);
        Ok(())
    }

    fn transparency(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.transparency = Some(scalar(directive)?);
        Ok(())
    }

    fn illumination(&mut self, directive: &Directive<'_>) -> Result<()> {
        directive.expect_args(1..=1)?;
        let model = directive.args[0]
            .parse::<u32>()
            .map_err(|_| directive.malformed())?;
        self.material.illumination = Some(model);
        Ok(())
    }

    fn diffuse_map(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.diffuse_map = Some(map_filename(directive)?);
        Ok(())
    }

    fn specular_map(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.specular_map = Some(map_filename(directive)?);
        Ok(())
    }

    fn normal_map(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.material.normal_map = Some(map_filename(directive)?);
        Ok(())
    }
}

/// `r g b`, or a single `r` standing for `r r r`
fn color(directive: &Directive<'_>) -> Result<Rgb> {
    match directive.floats()?.as_slice() {
        &[value] => Ok([value, value, value]),
        &[r, g, b] => Ok([r, g, b]),
        _ => Err(directive.malformed()),
    }
}

fn scalar(directive: &Directive<'_>) -> Result<f32> {
    directive.expect_args(1..=1)?;
    directive.float_at(0)
}

/// Texture maps may carry option flags before the filename; the filename is last
fn map_filename(directive: &Directive<'_>) -> Result<String> {
    directive
        .args
        .last()
        .map(|name| name.to_string())
        .ok_or_else(|| directive.malformed())
}

type Handler = fn(&mut MaterialBuilder, &Directive<'_>) -> Result<()>;

/// Keys are lowercase; lookups lowercase the keyword first
const HANDLERS: &[(&str, Handler)] = &[
    ("ka", MaterialBuilder::ambient),
    ("kd", MaterialBuilder::diffuse),
    ("ks", MaterialBuilder::specular),
    ("ke", MaterialBuilder::emissive),
    ("ns", MaterialBuilder::shininess),
    ("ni", MaterialBuilder::optical_density),
    ("d", MaterialBuilder::dissolve),
    ("tr", MaterialBuilder::transparency),
    ("illum", MaterialBuilder::illumination),
    ("map_kd", MaterialBuilder::diffuse_map),
    ("map_ns", MaterialBuilder::specular_map),
    ("map_bump", MaterialBuilder::normal_map),
    ("bump", MaterialBuilder::normal_map),
];

fn handler(keyword: &str) -> Option<Handler> {
    let keyword = keyword.to_ascii_lowercase();
    HANDLERS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, handler)| *handler)
}

/// Property keywords [`parse_mtl`] acts on, besides `newmtl`
pub fn supported_directives() -> impl Iterator<Item = &'static str> {
    HANDLERS.iter().map(|(name, _)| *name)
}

/// Parse MTL source text into a material library
///
/// A later `newmtl` with an already used name replaces the earlier block.
pub fn parse_mtl(text: &str) -> Result<MaterialLibrary> {
    let mut library = MaterialLibrary::new();
    let mut current: Option<(String, MaterialBuilder)> = None;
    let mut dropped = 0usize;
    let mut ignored = 0usize;

    for (line, logical) in logical_lines(text) {
        let Some(directive) = Directive::parse(line, &logical) else {
            continue;
        };

        if directive.keyword.eq_ignore_ascii_case("newmtl") {
            let name = directive.rest().ok_or_else(|| directive.malformed())?;
            if let Some((name, builder)) = current.replace((name, MaterialBuilder::default())) {
                library.insert(name, builder.build());
            }
            continue;
        }

        let Some(handler) = handler(directive.keyword) else {
            tracing::trace!(
                line = directive.line,
                keyword = directive.keyword,
                "ignoring unsupported MTL directive"
            );
            ignored += 1;
            continue;
        };

        match current.as_mut() {
            Some((_, builder)) => handler(builder, &directive)?,
            None => dropped += 1,
        }
    }

    if let Some((name, builder)) = current {
        library.insert(name, builder.build());
    }

    tracing::debug!(
        materials = library.len(),
        dropped,
        ignored,
        "parsed MTL"
    );

    Ok(library)
}

/// Read material libraries relative to `base_dir` and parse them as one
///
/// Duplicate names are read once. Files are read in parallel and joined in
/// the order given. Missing files are skipped with a warning when
/// `skip_missing` is set; any other read failure is returned.
pub fn read_material_libraries<S: AsRef<str> + Sync>(
    base_dir: &Path,
    names: &[S],
    skip_missing: bool,
) -> Result<MaterialLibrary> {
    let mut unique: Vec<&str> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if !unique.contains(&name) {
            unique.push(name);
        }
    }

    let sources = unique
        .par_iter()
        .map(|name| {
            let path = base_dir.join(name);
            match fs::read_to_string(&path) {
                Ok(text) => Ok(Some(text)),
                Err(err) if skip_missing && err.kind() == ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "material library not found, skipping");
                    Ok(None)
                }
                Err(err) => Err(err),
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let joined = sources.into_iter().flatten().collect::<Vec<_>>().join("\n");
    parse_mtl(&joined)
}
