use crate::tokens::types::UNKNOWN_NAME;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// DAS getAsset response shape (only the fields we read)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAsset {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub grouping: Vec<RawGrouping>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
    #[serde(default)]
    pub files: Vec<RawFile>,
    #[serde(default)]
    pub links: Option<RawLinks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAttribute {
    #[serde(default)]
    pub trait_type: Option<String>,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFile {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLinks {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGrouping {
    #[serde(default)]
    pub group_key: Option<String>,
    #[serde(default)]
    pub group_value: Option<String>,
}

// ============================================================================
// Normalized metadata
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub mint: String,
    /// "Unknown" when upstream has no name
    pub name: String,
    pub symbol: Option<String>,
    pub description: Option<String>,
    /// First content file URI, falling back to `content.links.image`
    pub image: Option<String>,
    /// Collection address from the `collection` grouping
    pub collection: Option<String>,
    pub attributes: Vec<NftAttribute>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn render_attribute_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl NftMetadata {
    pub fn from_raw(mint: &str, raw: RawAsset) -> Self {
        let content = raw.content.unwrap_or_default();
        let metadata = content.metadata.unwrap_or_default();

        let image = content
            .files
            .into_iter()
            .filter_map(|file| non_blank(file.uri))
            .next()
            .or_else(|| content.links.and_then(|links| non_blank(links.image)));

        let collection = raw
            .grouping
            .into_iter()
            .find(|group| group.group_key.as_deref() == Some("collection"))
            .and_then(|group| non_blank(group.group_value));

        let attributes = metadata
            .attributes
            .into_iter()
            .map(|attr| NftAttribute {
                trait_type: non_blank(attr.trait_type).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                value: render_attribute_value(attr.value),
            })
            .collect();

        Self {
            mint: non_blank(raw.id).unwrap_or_else(|| mint.to_string()),
            name: non_blank(metadata.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            symbol: non_blank(metadata.symbol),
            description: non_blank(metadata.description),
            image,
            collection,
            attributes,
        }
    }
}
