//! Reading the fields resolution needs from a fetched descriptor.
//!
//! Only two things are taken from a POM: the project's packaging and its parent coordinate. The
//! rest of the document is the concern of whoever consumes the fetched files.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::coordinate::Coordinate;
use crate::error::Error;

const DEFAULT_PACKAGING: &str = "jar";

/// Sections which may hold their own `<packaging>` or `<parent>`-like elements.
const NESTED_SECTIONS: &[&str] = &[
    "parent",
    "profiles",
    "dependencyManagement",
    "dependencies",
    "build",
    "reporting",
    "distributionManagement",
];

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));
static PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<project[\s/>]").expect("project pattern is valid"));
static PARENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<parent(?:\s[^>]*)?>(.*?)</parent>").expect("parent pattern is valid")
});

fn element(name: &str) -> Regex {
    Regex::new(&format!(r"<{name}>\s*([^<]*?)\s*</{name}>")).expect("element pattern is valid")
}

fn section(name: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{name}(?:\s[^>]*)?>.*?</{name}>")).expect("section pattern is valid")
}

static PACKAGING: LazyLock<Regex> = LazyLock::new(|| element("packaging"));
static GROUP_ID: LazyLock<Regex> = LazyLock::new(|| element("groupId"));
static ARTIFACT_ID: LazyLock<Regex> = LazyLock::new(|| element("artifactId"));
static VERSION: LazyLock<Regex> = LazyLock::new(|| element("version"));
static SECTIONS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| NESTED_SECTIONS.iter().map(|name| section(name)).collect());

/// What resolution learns from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub packaging: String,
    pub parent: Option<Coordinate>,
}

/// Turns a fetched descriptor file into a [`Descriptor`].
pub trait DescriptorParser {
    fn parse(&self, path: &Path) -> Result<Descriptor, Error>;
}

/// Extracts packaging and parent from a POM without building a document model.
#[derive(Debug, Default, Clone, Copy)]
pub struct PomParser;

impl PomParser {
    /// Parse POM text. The error is a description of what is wrong with the document.
    pub fn parse_str(&self, pom: &str) -> Result<Descriptor, String> {
        let pom = COMMENT.replace_all(pom, "");
        if !PROJECT.is_match(&pom) {
            return Err("no <project> element".to_string());
        }
        let parent = match PARENT.captures(&pom) {
            Some(block) => Some(Self::parent(&block[1])?),
            None => None,
        };
        let top_level = SECTIONS
            .iter()
            .fold(pom.into_owned(), |text, section| {
                section.replace_all(&text, "").into_owned()
            });
        let packaging = PACKAGING
            .captures(&top_level)
            .map(|c| c[1].to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PACKAGING.to_string());
        Ok(Descriptor { packaging, parent })
    }

    fn parent(block: &str) -> Result<Coordinate, String> {
        let field = |pattern: &Regex, name: &str| {
            pattern
                .captures(block)
                .map(|c| c[1].to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| format!("<parent> has no <{name}>"))
        };
        Coordinate::try_new(
            field(&*GROUP_ID, "groupId")?,
            field(&*ARTIFACT_ID, "artifactId")?,
            field(&*VERSION, "version")?,
        )
        .map_err(|err| format!("<parent> is not a valid coordinate: {err}"))
    }
}

impl DescriptorParser for PomParser {
    fn parse(&self, path: &Path) -> Result<Descriptor, Error> {
        let pom = std::fs::read_to_string(path)?;
        self.parse_str(&pom).map_err(|message| Error::Descriptor {
            path: path.to_path_buf(),
            message,
        })
    }
}
