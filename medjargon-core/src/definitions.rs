use std::{collections::HashMap, fs::File, io::BufReader, io::Read, path::Path};
use tracing::info;

use crate::lexicon::{LexiconError, LexiconResult, json_value_to_string, read_json_object};

/// Concept identifier to definition text, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    definitions: HashMap<String, String>,
}

impl DefinitionStore {
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> LexiconResult<Self> {
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(BufReader::new(file), path)?;
        info!("Loaded {} definitions from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> LexiconResult<Self> {
        let definitions = read_json_object(reader, origin)?
            .into_iter()
            .map(|(id, def)| (id, json_value_to_string(def)))
            .collect();
        Ok(Self { definitions })
    }

    pub fn definition(&self, concept_id: &str) -> Option<&str> {
        self.definitions.get(concept_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DefinitionStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            definitions: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
