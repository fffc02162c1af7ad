//! Documentation outline
//!
//! A typed view of `.skald/outline.yml`. The outline is a tree of directory
//! names; a node's reserved `_docs` key lists the documents to generate in
//! that directory. Parsed once into `OutlineNode` rather than walked as an
//! untyped YAML graph.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Reserved key holding a node's document list
const DOCS_KEY: &str = "_docs";

/// Outline parse failure
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`_docs` under \"{path}\" must be a list")]
    DocsNotAList { path: String },

    #[error("invalid `_docs` entry under \"{path}\": {source}")]
    InvalidDocEntry {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("outline root must be a mapping")]
    RootNotAMapping,
}

/// One document to generate, as written in the outline
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocSpec {
    /// Output file name
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A directory in the outline tree
///
/// Children keep the insertion order of the parsed mapping; that order
/// drives batch ordering but carries no correctness weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineNode {
    pub docs: Vec<DocSpec>,
    pub children: Vec<(String, OutlineNode)>,
}

/// A flattened generation task: one per `DocSpec`, with its resolved
/// output location. Consumed once by the pipeline, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTask {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub output_path: PathBuf,
}

/// Parsed outline
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    root: OutlineNode,
}

impl Outline {
    /// Parse outline YAML into the typed tree
    ///
    /// Fails on malformed YAML, a non-list `_docs` value, or a `_docs`
    /// entry missing required fields. Scalar values under other keys are
    /// ignored, matching the permissive shape of hand-written outlines.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Ok(Self {
                root: OutlineNode::default(),
            });
        }

        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        let root = match value {
            serde_yaml::Value::Null => OutlineNode::default(),
            serde_yaml::Value::Mapping(_) => node_from_value(&value, "")?,
            _ => return Err(ParseError::RootNotAMapping),
        };
        Ok(Self { root })
    }

    /// Flatten into generation tasks via depth-first traversal
    ///
    /// At each node the `_docs` entries are emitted first, then children
    /// are visited in order. `output_path` is the join of the ancestor
    /// directory names and the entry's `name` under `output_root`.
    pub fn flatten(&self, output_root: &Path) -> Vec<DocTask> {
        let mut tasks = Vec::new();
        collect_tasks(&self.root, output_root, &mut tasks);
        tasks
    }
}

fn node_from_value(value: &serde_yaml::Value, path: &str) -> Result<OutlineNode, ParseError> {
    let serde_yaml::Value::Mapping(map) = value else {
        return Ok(OutlineNode::default());
    };

    let mut node = OutlineNode::default();

    for (key, child) in map {
        let serde_yaml::Value::String(key) = key else {
            continue;
        };

        if key == DOCS_KEY {
            let serde_yaml::Value::Sequence(entries) = child else {
                return Err(ParseError::DocsNotAList {
                    path: path.to_string(),
                });
            };

            for entry in entries {
                let spec: DocSpec = serde_yaml::from_value(entry.clone()).map_err(|source| {
                    ParseError::InvalidDocEntry {
                        path: path.to_string(),
                        source,
                    }
                })?;
                node.docs.push(spec);
            }
        } else if child.is_mapping() {
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}/{}", path, key)
            };
            node.children
                .push((key.clone(), node_from_value(child, &child_path)?));
        }
        // Scalar values under non-reserved keys contribute nothing.
    }

    Ok(node)
}

fn collect_tasks(node: &OutlineNode, dir: &Path, tasks: &mut Vec<DocTask>) {
    for spec in &node.docs {
        tasks.push(DocTask {
            name: spec.name.clone(),
            title: spec.title.clone(),
            description: spec.description.clone(),
            output_path: dir.join(&spec.name),
        });
    }

    for (name, child) in &node.children {
        collect_tasks(child, &dir.join(name), tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"
api:
  _docs:
    - name: authentication.md
      title: Authentication
      description: API authentication guide
  reference:
    _docs:
      - name: user.md
        title: User API
      - name: organization.md
        title: Organization API

features:
  _docs:
    - name: features.md
      title: Features Overview
"#;

    #[test]
    fn test_flatten_counts_and_paths() {
        let outline = Outline::parse(NESTED).unwrap();
        let tasks = outline.flatten(Path::new("/out"));

        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].output_path, PathBuf::from("/out/api/authentication.md"));
        assert_eq!(tasks[1].output_path, PathBuf::from("/out/api/reference/user.md"));
        assert_eq!(
            tasks[2].output_path,
            PathBuf::from("/out/api/reference/organization.md")
        );
        assert_eq!(tasks[3].output_path, PathBuf::from("/out/features/features.md"));
    }

    #[test]
    fn test_flatten_order_docs_before_children() {
        let outline = Outline::parse(NESTED).unwrap();
        let tasks = outline.flatten(Path::new(""));

        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Authentication",
                "User API",
                "Organization API",
                "Features Overview"
            ]
        );
    }

    #[test]
    fn test_flatten_empty_outline() {
        let outline = Outline::parse("api:\n  reference: {}\n").unwrap();
        assert!(outline.flatten(Path::new("/out")).is_empty());
    }

    #[test]
    fn test_parse_empty_file() {
        let outline = Outline::parse("").unwrap();
        assert!(outline.flatten(Path::new("/out")).is_empty());
    }

    #[test]
    fn test_parse_description_optional() {
        let outline = Outline::parse(
            "api:\n  _docs:\n    - name: a.md\n      title: A\n",
        )
        .unwrap();
        let tasks = outline.flatten(Path::new("/out"));
        assert_eq!(tasks[0].description, None);
    }

    #[test]
    fn test_parse_docs_not_a_list() {
        let err = Outline::parse("api:\n  _docs: nope\n").unwrap_err();
        assert!(matches!(err, ParseError::DocsNotAList { ref path } if path == "api"));
    }

    #[test]
    fn test_parse_doc_entry_missing_title() {
        let err = Outline::parse("api:\n  _docs:\n    - name: a.md\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidDocEntry { .. }));
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = Outline::parse("api: [unclosed\n").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_parse_scalar_root() {
        let err = Outline::parse("just a string").unwrap_err();
        assert!(matches!(err, ParseError::RootNotAMapping));
    }

    #[test]
    fn test_scalar_children_ignored() {
        let outline = Outline::parse(
            "api:\n  note: not a directory\n  _docs:\n    - name: a.md\n      title: A\n",
        )
        .unwrap();
        let tasks = outline.flatten(Path::new("out"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].output_path, PathBuf::from("out/api/a.md"));
    }

    #[test]
    fn test_deep_nesting() {
        let outline = Outline::parse(
            "a:\n  b:\n    c:\n      _docs:\n        - name: deep.md\n          title: Deep\n",
        )
        .unwrap();
        let tasks = outline.flatten(Path::new("/out"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].output_path, PathBuf::from("/out/a/b/c/deep.md"));
    }
}
