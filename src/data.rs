// src/data.rs

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Catalog {
    pub grades: Vec<String>,
    pub subjects: Vec<String>,
}

/// Loads the grade and subject lists from the embedded YAML
pub fn read_catalog_embedded() -> Catalog {
    let file_content = include_str!("data/catalog.yaml");
    match serde_yaml::from_str(file_content) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("embedded catalog is malformed: {err}");
            Catalog::default()
        }
    }
}
