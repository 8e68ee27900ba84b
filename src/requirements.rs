use serde::{Deserialize, Serialize};

use crate::{ElementRef, Graph, RequirementError};

/// Entry shown for optional requirements when nothing is chosen.
pub const NONE_OPTION: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementKind {
    Vertex,
    Edge,
    OptionalVertex,
    OptionalEdge,
}

impl RequirementKind {
    pub fn is_optional(self) -> bool {
        matches!(self, Self::OptionalVertex | Self::OptionalEdge)
    }
}

/// An element an algorithm needs before it can run, e.g. the source vertex of a
/// shortest path search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub name: String,
}

impl Requirement {
    pub fn new(kind: RequirementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// One requirement with the choices offered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementField {
    pub requirement: Requirement,
    /// Entries shown to the user, aligned with `elements`.
    pub options: Vec<String>,
    elements: Vec<Option<ElementRef>>,
}

impl RequirementField {
    /// Text shown next to the choice list.
    pub fn caption(&self) -> String {
        if self.requirement.kind.is_optional() {
            format!("{} (optional)", self.requirement.name)
        } else {
            self.requirement.name.clone()
        }
    }
}

/// Collects the elements an algorithm requires from the current graph.
///
/// Vertices are offered sorted by label, edges by id. Optional requirements start
/// with [`NONE_OPTION`], which resolves to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementForm {
    fields: Vec<RequirementField>,
}

impl RequirementForm {
    pub fn new(g: &Graph, requirements: Vec<Requirement>) -> Self {
        let mut vertices = g.vertices().collect::<Vec<_>>();
        vertices.sort_by(|a, b| a.cmp_by_label(b));
        let mut edges = g.edges().collect::<Vec<_>>();
        edges.sort_by(|a, b| a.cmp_by_id(b));

        let fields = requirements
            .into_iter()
            .map(|requirement| {
                let mut options = Vec::new();
                let mut elements = Vec::new();
                if requirement.kind.is_optional() {
                    options.push(NONE_OPTION.to_string());
                    elements.push(None);
                }
                match requirement.kind {
                    RequirementKind::Vertex | RequirementKind::OptionalVertex => {
                        for v in &vertices {
                            options.push(v.display_name());
                            elements.push(Some(ElementRef::Vertex(v.id())));
                        }
                    }
                    RequirementKind::Edge | RequirementKind::OptionalEdge => {
                        for e in &edges {
                            options.push(e.id().to_string());
                            elements.push(Some(ElementRef::Edge(e.id())));
                        }
                    }
                }
                RequirementField {
                    requirement,
                    options,
                    elements,
                }
            })
            .collect();

        Self { fields }
    }

    pub fn fields(&self) -> &[RequirementField] {
        &self.fields
    }

    /// Maps one chosen option index per requirement to the chosen element.
    ///
    /// # Errors
    ///
    /// Fails if the number of choices does not match the requirements or a choice is
    /// out of range. An empty required list makes every index out of range.
    pub fn resolve(&self, choices: &[usize]) -> Result<Vec<Option<ElementRef>>, RequirementError> {
        if choices.len() != self.fields.len() {
            return Err(RequirementError::ChoiceCount {
                expected: self.fields.len(),
                got: choices.len(),
            });
        }

        self.fields
            .iter()
            .zip(choices)
            .map(|(field, &choice)| {
                field
                    .elements
                    .get(choice)
                    .copied()
                    .ok_or_else(|| RequirementError::ChoiceOutOfRange {
                        name: field.requirement.name.clone(),
                        choice,
                        options: field.elements.len(),
                    })
            })
            .collect()
    }
}
