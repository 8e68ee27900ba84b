//! Table-driven mapping from element data to the visual attributes a renderer needs.

use egui::Color32;

use crate::{Edge, ElementState, SettingsStyle, Vertex};

/// Visual attributes of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Visuals {
    pub fill: Color32,
    pub label: String,
}

pub fn state_color(state: ElementState, style: &SettingsStyle) -> Color32 {
    style.state_color(state)
}

/// Picked colour, then override colour, then state colour. The label is the display
/// name with the label addition on a second line.
pub fn vertex_visuals(v: &Vertex, style: &SettingsStyle) -> Visuals {
    let fill = if v.picked() {
        style.picked
    } else {
        v.color()
            .unwrap_or_else(|| state_color(v.state(), style))
    };

    let mut label = v.display_name();
    if !v.label_addition().is_empty() {
        label.push('\n');
        label.push_str(v.label_addition());
    }

    Visuals { fill, label }
}

/// Override colour, then state colour. The label is the override label or the
/// enabled quantities, one per line.
pub fn edge_visuals(e: &Edge, style: &SettingsStyle) -> Visuals {
    let fill = e.color().unwrap_or_else(|| state_color(e.state(), style));

    let label = match e.label() {
        Some(label) => label.to_string(),
        None => {
            let mut lines = Vec::with_capacity(3);
            if style.edge_label_weight {
                lines.push(format!("w={}", format_number(e.weight())));
            }
            if style.edge_label_min_capacity {
                lines.push(format!("min C={}", format_number(e.min_capacity())));
            }
            if style.edge_label_max_capacity {
                lines.push(format!("max C={}", format_number(e.max_capacity())));
            }
            lines.join("\n")
        }
    };

    Visuals { fill, label }
}

/// Whole numbers without a decimal part, everything else as is.
fn format_number(n: f64) -> String {
    if n.fract() == 0. && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;
    use crate::{ElementRef, Graph};

    #[test]
    fn vertex_color_priority() {
        let style = SettingsStyle::default();
        let mut g = Graph::new();
        let id = g.add_vertex(Pos2::ZERO);
        g.set_state(ElementRef::Vertex(id), ElementState::Visited)
            .unwrap();

        let v = g.vertex_mut(id).unwrap();
        assert_eq!(vertex_visuals(v, &style).fill, style.visited);

        v.set_color(Some(Color32::BLUE));
        assert_eq!(vertex_visuals(v, &style).fill, Color32::BLUE);

        v.set_picked(true);
        assert_eq!(vertex_visuals(v, &style).fill, style.picked);
    }

    #[test]
    fn vertex_label_includes_addition() {
        let style = SettingsStyle::default();
        let mut g = Graph::new();
        let id = g.add_vertex_with_label(Pos2::ZERO, "s");
        let v = g.vertex_mut(id).unwrap();
        assert_eq!(vertex_visuals(v, &style).label, "s");

        v.set_label_addition("d=3");
        assert_eq!(vertex_visuals(v, &style).label, "s\nd=3");
    }

    #[test]
    fn edge_label_formats_quantities() {
        let style = SettingsStyle::default().with_edge_label(true, true, true);
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        let b = g.add_vertex(Pos2::ZERO);
        let id = g.add_edge(a, b, true).unwrap();
        let e = g.edge_mut(id).unwrap();
        e.set_weight(2.5);
        e.set_max_capacity(4.);

        assert_eq!(edge_visuals(e, &style).label, "w=2.5\nmin C=1\nmax C=4");

        e.set_label(Some("flow 3/4".to_string()));
        assert_eq!(edge_visuals(e, &style).label, "flow 3/4");
    }

    #[test]
    fn edge_uses_state_color_without_override() {
        let style = SettingsStyle::default();
        let mut g = Graph::new();
        let a = g.add_vertex(Pos2::ZERO);
        let b = g.add_vertex(Pos2::ZERO);
        let id = g.add_edge(a, b, false).unwrap();
        g.set_state(ElementRef::Edge(id), ElementState::FinishedAndRelevant)
            .unwrap();
        assert_eq!(
            edge_visuals(g.edge(id).unwrap(), &style).fill,
            style.finished_relevant
        );
    }
}
