use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::model::{GraphStore, NodePrototype};

const DEFAULT_PROTOTYPE_COLOR: &str = "#800000";

#[derive(Clone, Debug, Deserialize)]
struct RawStoreFile {
    #[serde(default, rename = "rootConceptId")]
    root_concept_id: Option<String>,
    #[serde(default)]
    prototypes: Vec<RawPrototype>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawPrototype {
    id: String,
    name: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "hasThumbnail")]
    has_thumbnail: bool,
    #[serde(default, rename = "imageAspectRatio")]
    image_aspect_ratio: Option<f32>,
    #[serde(default, rename = "abstractionChains")]
    abstraction_chains: HashMap<String, Vec<String>>,
}

pub fn load_store(store_path: &str) -> Result<GraphStore> {
    let raw = fs::read_to_string(Path::new(store_path))
        .with_context(|| format!("failed to read knowledge store at {store_path}"))?;
    parse_store(&raw).with_context(|| format!("failed to parse knowledge store at {store_path}"))
}

pub(crate) fn parse_store(raw: &str) -> Result<GraphStore> {
    let file: RawStoreFile = serde_json::from_str(raw).context("invalid JSON in knowledge store")?;

    if file.prototypes.is_empty() {
        return Err(anyhow!("knowledge store contains no prototypes"));
    }

    let mut prototypes = HashMap::with_capacity(file.prototypes.len());
    for raw_prototype in file.prototypes {
        let id = raw_prototype.id.trim().to_owned();
        if id.is_empty() {
            continue;
        }

        let abstraction_chains = raw_prototype
            .abstraction_chains
            .into_iter()
            .map(|(dimension, chain)| (dimension, sanitize_chain(chain)))
            .filter(|(_, chain)| !chain.is_empty())
            .collect();

        prototypes.insert(
            id.clone(),
            NodePrototype {
                id,
                name: raw_prototype.name,
                color: raw_prototype
                    .color
                    .unwrap_or_else(|| DEFAULT_PROTOTYPE_COLOR.to_owned()),
                description: raw_prototype.description,
                has_thumbnail: raw_prototype.has_thumbnail,
                image_aspect_ratio: raw_prototype.image_aspect_ratio,
                abstraction_chains,
            },
        );
    }

    if prototypes.is_empty() {
        return Err(anyhow!("knowledge store contains no usable prototypes"));
    }

    let root_concept_id = file
        .root_concept_id
        .filter(|root_id| prototypes.contains_key(root_id));

    Ok(GraphStore::new(prototypes, root_concept_id))
}

fn sanitize_chain(chain: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    chain
        .into_iter()
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "rootConceptId": "thing",
        "prototypes": [
            {
                "id": "thing",
                "name": "Thing",
                "color": "#5c4d7d"
            },
            {
                "id": "hammer",
                "name": "Hammer",
                "color": "#8b0000",
                "abstractionChains": {
                    "Physical": ["tool", "hammer", "claw-hammer"]
                }
            },
            {
                "id": "tool",
                "name": "Tool"
            }
        ]
    }"##;

    #[test]
    fn parses_prototypes_and_root() {
        let store = parse_store(SAMPLE).expect("sample parses");
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.root_concept_id.as_deref(), Some("thing"));

        let hammer = store.get("hammer").expect("hammer exists");
        assert_eq!(hammer.name, "Hammer");
        assert_eq!(
            hammer.abstraction_chains["Physical"],
            ["tool", "hammer", "claw-hammer"]
        );
    }

    #[test]
    fn missing_color_falls_back_to_default() {
        let store = parse_store(SAMPLE).expect("sample parses");
        assert_eq!(store.get("tool").expect("tool exists").color, "#800000");
    }

    #[test]
    fn unknown_root_is_dropped() {
        let raw = r#"{
            "rootConceptId": "nowhere",
            "prototypes": [{ "id": "a", "name": "A" }]
        }"#;
        let store = parse_store(raw).expect("parses");
        assert_eq!(store.root_concept_id, None);
    }

    #[test]
    fn chains_are_sanitized() {
        let raw = r#"{
            "prototypes": [{
                "id": "a",
                "name": "A",
                "abstractionChains": {
                    "Physical": ["a", " ", "a", "b"],
                    "Empty": ["", "  "]
                }
            }]
        }"#;
        let store = parse_store(raw).expect("parses");
        let a = store.get("a").expect("a exists");
        assert_eq!(a.abstraction_chains["Physical"], ["a", "b"]);
        assert!(!a.abstraction_chains.contains_key("Empty"));
    }

    #[test]
    fn empty_store_is_an_error() {
        assert!(parse_store(r#"{ "prototypes": [] }"#).is_err());
        assert!(parse_store("not json").is_err());
    }
}
