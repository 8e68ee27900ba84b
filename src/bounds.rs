use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::{Graph, SettingsLayout};

/// Result of running the bounds corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// The viewport is unknown or too small for a non-empty clamp range, or the graph
    /// has no vertices. Positions are untouched.
    Skipped,
    /// Correction ran; `moved` vertices changed position.
    Applied { moved: usize },
}

/// Rectangle vertex centers must stay in for a viewport of `size`:
/// `[P+R, W-P-R] x [P+R, H-P-R]`. `None` if the range would be empty.
pub fn clamp_rect(size: Vec2, settings: &SettingsLayout) -> Option<Rect> {
    let inset = settings.inset();
    let min = Pos2::new(inset, inset);
    let max = Pos2::new(size.x - inset, size.y - inset);
    if !(min.x <= max.x && min.y <= max.y) {
        return None;
    }
    Some(Rect::from_min_max(min, max))
}

/// Clamps a single position into the viewport's clamp rectangle.
pub fn correct_location(location: Pos2, viewport: Vec2, settings: &SettingsLayout) -> Pos2 {
    match clamp_rect(viewport, settings) {
        Some(rect) => rect.clamp(location),
        None => location,
    }
}

/// Clamps every vertex of `g` into the viewport. Only positions change.
pub fn correct_graph(g: &mut Graph, viewport: Option<Vec2>, settings: &SettingsLayout) -> Correction {
    if g.is_empty() {
        return Correction::Skipped;
    }
    let Some(size) = viewport else {
        debug!("bounds correction skipped: viewport size not known yet");
        return Correction::Skipped;
    };
    let Some(rect) = clamp_rect(size, settings) else {
        debug!(
            "bounds correction skipped: viewport {}x{} leaves no room for vertices",
            size.x, size.y
        );
        return Correction::Skipped;
    };

    let mut moved = 0;
    for v in g.vertices_mut() {
        let corrected = rect.clamp(v.location());
        if corrected != v.location() {
            v.set_location(corrected);
            moved += 1;
        }
    }

    Correction::Applied { moved }
}

/// Bounding rectangle over all vertex positions, `None` for an empty graph.
pub fn graph_rect(g: &Graph) -> Option<Rect> {
    let mut vertices = g.vertices();
    let first = vertices.next()?.location();
    let rect = vertices.fold(Rect::from_min_max(first, first), |rect, v| {
        rect.union(Rect::from_min_max(v.location(), v.location()))
    });
    Some(rect)
}
