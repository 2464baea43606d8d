//! Case studies shipped with the site, embedded from `assets/case_studies.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::results::{ChartDatum, ChartOptions, ChartSettings};

const CATALOG_JSON: &str = include_str!("../assets/case_studies.json");

pub const UNKNOWN_STUDY: &str = "Unknown Case Study";
pub const UNKNOWN_INDUSTRY: &str = "Unknown Industry";

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::parse(CATALOG_JSON).unwrap_or_else(|err| {
        tracing::warn!(%err, "case study catalogue failed to parse");
        Catalog::default()
    })
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub studies: Vec<CaseStudy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub slug: String,
    #[serde(default = "unknown_study")]
    pub name: String,
    #[serde(default = "unknown_industry")]
    pub industry: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cta: Option<CallToAction>,
    #[serde(default)]
    pub downloads: Vec<Download>,
    #[serde(default)]
    pub video: Option<StudyVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Download {
    pub label: String,
    pub href: String,
    /// Suggested file name, mirrored into the link's `download` attribute.
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyVideo {
    pub id: String,
    pub src: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub results: Vec<ChartDatum>,
    #[serde(default)]
    pub options: ChartOptions,
}

impl StudyVideo {
    pub fn settings(&self) -> ChartSettings {
        ChartSettings::from_options(&self.options)
    }
}

fn unknown_study() -> String {
    UNKNOWN_STUDY.to_string()
}

fn unknown_industry() -> String {
    UNKNOWN_INDUSTRY.to_string()
}

impl Catalog {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The embedded catalogue; empty if it failed to parse.
    pub fn embedded() -> &'static Catalog {
        &CATALOG
    }

    pub fn find(&self, slug: &str) -> Option<&CaseStudy> {
        self.studies.iter().find(|study| study.slug == slug)
    }
}
