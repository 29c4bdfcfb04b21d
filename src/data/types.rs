//! The portfolio document.
//!
//! Mirrors the shape of `data.json`. Every top-level key is optional and an
//! absent list is the same as an empty one: the matching section is skipped.
//! Unknown keys are ignored so the document can carry extra data for other
//! tools. An explicit `null` reads the same as a missing key.

use serde::{Deserialize, Deserializer};

/// Root of `data.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub profile: Option<Profile>,
    pub about: Option<About>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "nullable")]
    pub publications: Vec<Publication>,
    #[serde(deserialize_with = "nullable")]
    pub misc: Vec<MiscCategory>,
    #[serde(deserialize_with = "nullable")]
    pub redirects: Vec<RedirectLink>,
    #[serde(deserialize_with = "nullable")]
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub tagline: String,
    /// Portrait URI, relative to the page or absolute.
    #[serde(deserialize_with = "nullable")]
    pub image: String,
}

impl Profile {
    /// First word of the name, used as the navbar brand.
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct About {
    pub title: Option<String>,
    /// HTML fragment. Trusted or escaped depending on `[build].trust_about_html`.
    #[serde(deserialize_with = "nullable")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Publication {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub venue: String,
    /// Accepts `2024` as well as `"2024"` or `"in press"`.
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MiscCategory {
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RedirectLink {
    #[serde(deserialize_with = "nullable")]
    pub label: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Social {
    /// Display label, e.g. "Email" or "GitHub".
    #[serde(deserialize_with = "nullable")]
    pub platform: String,
    /// Target URI; may use a non-HTTP scheme such as `mailto:`.
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Icon identifier in the lucide set.
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
}

/// `null` as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => s,
        Some(Raw::Num(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc: Portfolio = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Portfolio::default());
    }

    #[test]
    fn test_publication_year_number_or_string() {
        let doc: Portfolio = serde_json::from_str(
            r#"{"publications": [
                {"title": "A", "venue": "V", "year": 2023, "link": "a.pdf"},
                {"title": "B", "venue": "V", "year": "in press", "link": "b.pdf"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(doc.publications[0].year, "2023");
        assert_eq!(doc.publications[1].year, "in press");
    }

    #[test]
    fn test_null_reads_as_missing() {
        let doc: Portfolio = serde_json::from_str(
            r#"{
                "profile": {"name": "Ada", "title": null, "image": null},
                "about": {"title": null, "content": null},
                "projects": null,
                "publications": null,
                "misc": null,
                "redirects": null,
                "socials": null
            }"#,
        )
        .unwrap();

        let profile = doc.profile.as_ref().unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.image, "");
        assert_eq!(profile.title, "");
        assert_eq!(doc.about, Some(About::default()));
        assert!(doc.projects.is_empty());
        assert!(doc.publications.is_empty());
        assert!(doc.misc.is_empty());
        assert!(doc.redirects.is_empty());
        assert!(doc.socials.is_empty());
    }

    #[test]
    fn test_null_inside_list_items() {
        let doc: Portfolio = serde_json::from_str(
            r#"{
                "projects": [{"title": "Engine", "tags": null, "description": null}],
                "publications": [{"title": "Notes", "year": null}],
                "misc": [{"category": "Talks", "items": null}],
                "socials": [{"platform": "Email", "url": null, "icon": "mail"}]
            }"#,
        )
        .unwrap();

        assert!(doc.projects[0].tags.is_empty());
        assert_eq!(doc.publications[0].year, "");
        assert!(doc.misc[0].items.is_empty());
        assert_eq!(doc.socials[0].url, "");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let doc: Portfolio =
            serde_json::from_str(r#"{"profile": {"name": "Ada", "pronouns": "she/her"}, "theme": "dark"}"#)
                .unwrap();
        assert_eq!(doc.profile.unwrap().name, "Ada");
    }

    #[test]
    fn test_first_name() {
        let profile = Profile {
            name: "Ada King Lovelace".into(),
            ..Profile::default()
        };
        assert_eq!(profile.first_name(), "Ada");
        assert_eq!(Profile::default().first_name(), "");
    }
}
