//! Off-chain JSON metadata of a skin.
//!
//! Follows the Metaplex JSON standard and adds a `textures` object with the PBR maps the game
//! renders: albedo (`a`), roughness (`r`), normal (`n`), metallic (`m`) and ambient
//! occlusion (`ao`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, SKIN_IDENTIFIER};

pub const PNG: &str = "image/png";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} is {len} bytes long, at most {max} are allowed")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TextureSet {
    pub a: String,
    pub r: String,
    pub n: String,
    pub m: String,
    pub ao: String,
}

impl TextureSet {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &String)> {
        [
            ("a", &self.a),
            ("r", &self.r),
            ("n", &self.n),
            ("m", &self.m),
            ("ao", &self.ao),
        ]
        .into_iter()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct File {
    #[serde(rename = "type")]
    pub content_type: String,
    pub uri: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    pub files: Vec<File>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkinMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    pub identifier: String,
    pub attributes: Vec<Attribute>,
    pub properties: Properties,
    pub textures: TextureSet,
}

impl SkinMetadata {
    /// Builds the metadata document for a skin whose preview lives at `image`.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        image: impl Into<String>,
        textures: TextureSet,
    ) -> Result<Self, Error> {
        let image = image.into();
        let metadata = Self {
            name: name.into(),
            symbol: symbol.into(),
            description: String::new(),
            properties: Properties {
                files: vec![File {
                    content_type: PNG.to_owned(),
                    uri: image.clone(),
                }],
            },
            image,
            identifier: SKIN_IDENTIFIER.to_owned(),
            attributes: Vec::new(),
            textures,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            trait_type: trait_type.into(),
            value: value.into(),
        });
        self
    }

    pub fn is_skin(&self) -> bool {
        self.identifier == SKIN_IDENTIFIER
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_name(&self.name)?;
        check_symbol(&self.symbol)?;
        not_empty("image", &self.image)?;
        for (field, uri) in self.textures.iter() {
            not_empty(field, uri)?;
        }
        Ok(())
    }
}

pub fn check_name(name: &str) -> Result<(), Error> {
    not_empty("name", name)?;
    at_most("name", name, MAX_NAME_LENGTH)
}

pub fn check_symbol(symbol: &str) -> Result<(), Error> {
    at_most("symbol", symbol, MAX_SYMBOL_LENGTH)
}

pub(crate) fn not_empty(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Empty { field });
    }
    Ok(())
}

pub(crate) fn at_most(field: &'static str, value: &str, max: usize) -> Result<(), Error> {
    if value.len() > max {
        return Err(Error::TooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}
