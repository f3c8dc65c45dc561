use std::collections::{BTreeSet, HashMap};

/// `abstraction_chains` maps a dimension name to the generic-to-specific
/// id chain the prototype owns.
#[derive(Clone, Debug)]
pub struct NodePrototype {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    pub has_thumbnail: bool,
    pub image_aspect_ratio: Option<f32>,
    pub abstraction_chains: HashMap<String, Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct GraphStore {
    pub prototypes: HashMap<String, NodePrototype>,
    pub root_concept_id: Option<String>,
    sorted_ids: Vec<String>,
}

impl GraphStore {
    pub fn new(
        prototypes: HashMap<String, NodePrototype>,
        root_concept_id: Option<String>,
    ) -> Self {
        let mut sorted_ids = prototypes
            .values()
            .map(|prototype| prototype.id.clone())
            .collect::<Vec<_>>();
        sorted_ids.sort();

        Self {
            prototypes,
            root_concept_id,
            sorted_ids,
        }
    }

    pub fn node_count(&self) -> usize {
        self.prototypes.len()
    }

    pub fn get(&self, id: &str) -> Option<&NodePrototype> {
        self.prototypes.get(id)
    }

    pub fn sorted_ids(&self) -> &[String] {
        &self.sorted_ids
    }

    pub fn dimension_names(&self) -> Vec<String> {
        let names = self
            .prototypes
            .values()
            .flat_map(|prototype| prototype.abstraction_chains.keys().cloned())
            .collect::<BTreeSet<_>>();
        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prototype(id: &str, dimensions: &[&str]) -> NodePrototype {
        NodePrototype {
            id: id.to_owned(),
            name: id.to_owned(),
            color: "#800000".to_owned(),
            description: None,
            has_thumbnail: false,
            image_aspect_ratio: None,
            abstraction_chains: dimensions
                .iter()
                .map(|name| ((*name).to_owned(), vec![id.to_owned()]))
                .collect(),
        }
    }

    #[test]
    fn sorted_ids_are_stable() {
        let mut prototypes = HashMap::new();
        prototypes.insert("zebra".to_owned(), prototype("zebra", &[]));
        prototypes.insert("apple".to_owned(), prototype("apple", &[]));
        prototypes.insert("mango".to_owned(), prototype("mango", &[]));

        let store = GraphStore::new(prototypes, None);
        assert_eq!(store.sorted_ids(), ["apple", "mango", "zebra"]);
    }

    #[test]
    fn dimension_names_are_deduplicated_and_sorted() {
        let mut prototypes = HashMap::new();
        prototypes.insert(
            "a".to_owned(),
            prototype("a", &["Physical", "Conceptual"]),
        );
        prototypes.insert("b".to_owned(), prototype("b", &["Physical"]));

        let store = GraphStore::new(prototypes, None);
        assert_eq!(store.dimension_names(), ["Conceptual", "Physical"]);
    }
}
