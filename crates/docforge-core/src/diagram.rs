//! # Diagram Definitions
//!
//! A section may carry one diagram, tagged on `kind`:
//!
//! - `mermaid` — source text in the Mermaid diagram language.
//! - `custom` — one of a closed set of data-structure visualizations with a
//!   free-form `data` payload.
//!
//! The `data` payload is opaque here. Its shape depends on the diagram
//! type and is interpreted by the renderer; the validator only checks that
//! it is present and is a mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A diagram attached to a documentation section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiagramDefinition {
    Mermaid(MermaidDiagram),
    Custom(CustomDiagram),
}

impl DiagramDefinition {
    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Mermaid(d) => d.caption.as_deref(),
            Self::Custom(d) => d.caption.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MermaidDiagram {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDiagram {
    #[serde(rename = "type")]
    pub diagram_type: CustomDiagramType,
    /// Renderer-specific payload. `Null` when the author omitted it.
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Visualizations the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomDiagramType {
    LinkedList,
    BinaryTree,
    HashMap,
    Stack,
    Queue,
    Array,
    MemoryLayout,
    Graph,
    Heap,
    AlgorithmSteps,
}

impl CustomDiagramType {
    /// Every diagram type, in declaration order.
    pub const ALL: [CustomDiagramType; 10] = [
        Self::LinkedList,
        Self::BinaryTree,
        Self::HashMap,
        Self::Stack,
        Self::Queue,
        Self::Array,
        Self::MemoryLayout,
        Self::Graph,
        Self::Heap,
        Self::AlgorithmSteps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinkedList => "linked-list",
            Self::BinaryTree => "binary-tree",
            Self::HashMap => "hash-map",
            Self::Stack => "stack",
            Self::Queue => "queue",
            Self::Array => "array",
            Self::MemoryLayout => "memory-layout",
            Self::Graph => "graph",
            Self::Heap => "heap",
            Self::AlgorithmSteps => "algorithm-steps",
        }
    }
}

impl std::fmt::Display for CustomDiagramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mermaid_tagged_on_kind() {
        let d: DiagramDefinition = serde_json::from_value(json!({
            "kind": "mermaid",
            "source": "graph TD; A-->B",
            "caption": "Flow"
        }))
        .unwrap();
        match &d {
            DiagramDefinition::Mermaid(m) => assert_eq!(m.source, "graph TD; A-->B"),
            other => panic!("expected mermaid, got {other:?}"),
        }
        assert_eq!(d.caption(), Some("Flow"));
    }

    #[test]
    fn custom_without_data_defaults_to_null() {
        let d: DiagramDefinition =
            serde_json::from_value(json!({"kind": "custom", "type": "binary-tree"})).unwrap();
        match d {
            DiagramDefinition::Custom(c) => {
                assert_eq!(c.diagram_type, CustomDiagramType::BinaryTree);
                assert!(c.data.is_null());
            }
            other => panic!("expected custom, got {other:?}"),
        }
    }

    #[test]
    fn wire_names_match_as_str() {
        for ty in CustomDiagramType::ALL {
            let wire = serde_json::to_value(ty).unwrap();
            assert_eq!(wire, json!(ty.as_str()));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<DiagramDefinition, _> =
            serde_json::from_value(json!({"kind": "plantuml", "source": "x"}));
        assert!(result.is_err());
    }
}
