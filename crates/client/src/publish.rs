//! Publishing skins: uploading their assets, creating the collection and minting the
//! master edition buyers print from.

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;
use tokio::fs;

use crate::{
    client::{self, Ledger},
    constants::MAX_URI_LENGTH,
    keys::random_keypair,
    metadata::{self, check_name, check_symbol, SkinMetadata, TextureSet, PNG},
    program_client::{accounts, create_collection_ix, create_nft_ix, instruction},
    uploader::{self, GenericFile, Uploader},
    Pubkey, Signature, Signer,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Metadata(#[from] metadata::Error),
    #[error(transparent)]
    Upload(#[from] uploader::Error),
    #[error(transparent)]
    Client(#[from] client::Error),
    #[error("no '{kind}' asset (*_{kind}.png) in {directory}")]
    MissingAsset { kind: &'static str, directory: String },
    #[error("cannot list {directory}: {source}")]
    Directory {
        directory: String,
        #[source]
        source: std::io::Error,
    },
}

/// A freshly minted token and the transaction that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minted {
    pub mint: Pubkey,
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub metadata_uri: String,
    pub collection: Minted,
    pub nft: Minted,
}

/// Image files of one skin: the preview `p` and the texture maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinAssets {
    pub preview: PathBuf,
    pub a: PathBuf,
    pub r: PathBuf,
    pub n: PathBuf,
    pub m: PathBuf,
    pub ao: PathBuf,
}

impl SkinAssets {
    /// Finds `<anything>_<kind>.png` (or `<kind>.png`) for every asset kind in `directory`.
    pub async fn discover(directory: impl AsRef<Path>) -> Result<Self, Error> {
        let directory = directory.as_ref();
        let listing_error = |source| Error::Directory {
            directory: directory.display().to_string(),
            source,
        };

        let mut entries = fs::read_dir(directory).await.map_err(listing_error)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(listing_error)? {
            files.push(entry.path());
        }

        let find = |kind: &'static str| {
            files
                .iter()
                .find(|path| is_asset(path, kind))
                .cloned()
                .ok_or_else(|| Error::MissingAsset {
                    kind,
                    directory: directory.display().to_string(),
                })
        };

        Ok(Self {
            preview: find("p")?,
            a: find("a")?,
            r: find("r")?,
            n: find("n")?,
            m: find("m")?,
            ao: find("ao")?,
        })
    }
}

fn is_asset(path: &Path, kind: &str) -> bool {
    let is_png = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("png"));
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return false;
    };
    is_png && (stem == kind || stem.ends_with(&format!("_{kind}")))
}

/// Uploads the preview and textures, then the metadata document referencing them.
/// Returns the metadata URI.
pub async fn upload_skin<U: Uploader>(
    uploader: &U,
    assets: &SkinAssets,
    name: &str,
    symbol: &str,
) -> Result<String, Error> {
    check_name(name)?;
    check_symbol(symbol)?;

    let preview = upload_asset(uploader, "p", &assets.preview).await?;
    let textures = TextureSet {
        a: upload_asset(uploader, "a", &assets.a).await?,
        r: upload_asset(uploader, "r", &assets.r).await?,
        n: upload_asset(uploader, "n", &assets.n).await?,
        m: upload_asset(uploader, "m", &assets.m).await?,
        ao: upload_asset(uploader, "ao", &assets.ao).await?,
    };

    let metadata = SkinMetadata::new(name, symbol, preview, textures)?;
    let uri = uploader.upload_json(&metadata).await?;
    info!("metadata of {name} uploaded to {uri}");
    Ok(uri)
}

async fn upload_asset<U: Uploader>(uploader: &U, kind: &str, path: &Path) -> Result<String, Error> {
    info!("uploading texture {kind} from {}", path.display());
    let file = GenericFile::read(path, PNG).await?;
    Ok(uploader.upload(file).await?)
}

/// Creates a collection NFT owned by the ledger's payer.
pub async fn create_collection<L: Ledger>(
    ledger: &L,
    program_id: Pubkey,
    name: &str,
    symbol: &str,
    skip_preflight: bool,
) -> Result<Minted, Error> {
    check_name(name)?;
    check_symbol(symbol)?;

    let creator = ledger.payer();
    let mint = random_keypair();
    info!("creating collection {name} ({symbol}) with mint {}", mint.pubkey());

    let ix = create_collection_ix(
        program_id,
        instruction::CreateCollection {
            name: name.to_owned(),
            symbol: symbol.to_owned(),
        },
        accounts::CreateCollection::new(&program_id, creator.pubkey(), mint.pubkey()),
    );
    let signature = ledger.submit(&[ix], &[&mint, creator], skip_preflight).await?;
    Ok(Minted {
        mint: mint.pubkey(),
        signature,
    })
}

/// Mints a master edition in `collection` that at most `max_supply` prints can be made of.
#[allow(clippy::too_many_arguments)]
pub async fn create_nft<L: Ledger>(
    ledger: &L,
    program_id: Pubkey,
    collection: Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
    max_supply: u64,
    skip_preflight: bool,
) -> Result<Minted, Error> {
    check_name(name)?;
    check_symbol(symbol)?;
    metadata::not_empty("uri", uri)?;
    metadata::at_most("uri", uri, MAX_URI_LENGTH)?;

    let creator = ledger.payer();
    let mint = random_keypair();
    info!(
        "creating {name} ({symbol}) in collection {collection} with mint {}",
        mint.pubkey()
    );

    let ix = create_nft_ix(
        program_id,
        instruction::CreateNft {
            name: name.to_owned(),
            symbol: symbol.to_owned(),
            metadata_uri: uri.to_owned(),
            supply: max_supply,
        },
        accounts::CreateNft::new(&program_id, creator.pubkey(), mint.pubkey(), collection),
    );
    let signature = ledger.submit(&[ix], &[&mint, creator], skip_preflight).await?;
    Ok(Minted {
        mint: mint.pubkey(),
        signature,
    })
}

/// Name and symbol of a token to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    pub symbol: String,
}

/// Uploads a skin, creates its collection and mints the master edition.
#[allow(clippy::too_many_arguments)]
pub async fn publish_skin<L: Ledger, U: Uploader>(
    ledger: &L,
    uploader: &U,
    program_id: Pubkey,
    assets: &SkinAssets,
    skin: &Listing,
    collection: &Listing,
    max_supply: u64,
    skip_preflight: bool,
) -> Result<Published, Error> {
    check_name(&collection.name)?;
    check_symbol(&collection.symbol)?;

    let metadata_uri = upload_skin(uploader, assets, &skin.name, &skin.symbol).await?;
    let collection = create_collection(
        ledger,
        program_id,
        &collection.name,
        &collection.symbol,
        skip_preflight,
    )
    .await?;
    let nft = create_nft(
        ledger,
        program_id,
        collection.mint,
        &skin.name,
        &skin.symbol,
        &metadata_uri,
        max_supply,
        skip_preflight,
    )
    .await?;
    info!("skin {} published as {}", skin.name, nft.mint);

    Ok(Published {
        metadata_uri,
        collection,
        nft,
    })
}
