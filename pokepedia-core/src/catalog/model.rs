//! Catalog data model and PokeAPI wire shapes

use serde::{Deserialize, Serialize};

/// Lightweight pointer to a catalog entry whose detail is not fetched yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,

    /// Absolute URL of the detail record
    pub url: String,
}

/// Body of `GET <base>/pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub results: Vec<Reference>,
}

/// The subset of a `GET <detail url>` body we keep
#[derive(Debug, Clone, Deserialize)]
pub struct DetailBody {
    pub name: String,

    #[serde(default)]
    pub id: Option<u32>,

    pub sprites: Sprites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    /// PokeAPI sends `null` for records without artwork
    #[serde(default)]
    pub front_default: Option<String>,
}

/// A fully resolved catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    pub name: String,

    /// Thumbnail image URL
    pub image: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: Some(image.into()),
        }
    }

    /// Zero-padded display number, e.g. `#001`
    pub fn display_number(&self) -> Option<String> {
        self.id.map(|id| format!("#{id:03}"))
    }
}

impl From<DetailBody> for Entry {
    fn from(body: DetailBody) -> Self {
        Self {
            id: body.id,
            name: body.name,
            image: body.sprites.front_default,
        }
    }
}

/// The immutable, ordered collection of entries loaded at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl From<Vec<Entry>> for Catalog {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_page_parsing() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;

        let page: ListingPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].name, "ivysaur");
        assert_eq!(page.results[1].url, "https://pokeapi.co/api/v2/pokemon/2/");
    }

    #[test]
    fn test_listing_without_results_is_rejected() {
        let result: Result<ListingPage, _> = serde_json::from_str(r#"{"count": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_detail_body_to_entry() {
        let json = r#"{
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "sprites": {"front_default": "imgA", "back_default": "imgB"}
        }"#;

        let body: DetailBody = serde_json::from_str(json).unwrap();
        let entry = Entry::from(body);
        assert_eq!(entry.id, Some(1));
        assert_eq!(entry.name, "bulbasaur");
        assert_eq!(entry.image.as_deref(), Some("imgA"));
        assert_eq!(entry.display_number().as_deref(), Some("#001"));
    }

    #[test]
    fn test_detail_body_with_null_sprite() {
        let json = r#"{"name": "missingno", "sprites": {"front_default": null}}"#;
        let entry = Entry::from(serde_json::from_str::<DetailBody>(json).unwrap());
        assert_eq!(entry.image, None);
        assert_eq!(entry.display_number(), None);
    }

    #[test]
    fn test_detail_body_without_sprites_is_rejected() {
        let result = serde_json::from_str::<DetailBody>(r#"{"id": 1, "name": "bulbasaur"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_lookup_ignores_case() {
        let catalog = Catalog::new(vec![
            Entry::new("bulbasaur", "imgA"),
            Entry::new("ivysaur", "imgB"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("IvySaur").map(|e| e.name.as_str()), Some("ivysaur"));
        assert!(catalog.get("venusaur").is_none());
    }
}
