use egui::{Pos2, Vec2};
use egui_graph_lab::{
    graph_rect, ElementRef, ElementState, Gesture, Graph, Mode, Outcome, PointerEvent, Presenter,
    Renderer, SceneEdge, SceneVertex, EdgePreview, VertexId,
};
use rand::Rng;

fn construction_graph() -> Graph {
    let mut g = Graph::new();
    let v0 = g.add_vertex(Pos2::new(0., 0.));
    let v1 = g.add_vertex(Pos2::new(500., 500.));
    let e0 = g.add_edge(v0, v1, true).expect("edge v0->v1");
    g.edge_mut(e0).unwrap().set_weight(2.5);
    g
}

#[test]
fn result_playback_leaves_construction_untouched() {
    let mut p = Presenter::default();
    p.replace_construction(&construction_graph());

    let mut result = p.graph();
    result
        .set_state(ElementRef::Vertex(VertexId(0)), ElementState::Active)
        .unwrap();
    result.vertex_mut(VertexId(1)).unwrap().set_label_addition("d=2.5");
    p.install_result(&result);
    p.set_mode(Mode::Visualization);

    let shown = p.displayed_graph();
    assert_eq!(shown.vertex_count(), 2);
    assert_eq!(shown.edge_count(), 1);
    let e = shown.edges().next().unwrap();
    assert!(e.directed());
    assert_eq!(e.weight(), 2.5);
    assert_eq!(
        shown.vertex(VertexId(0)).unwrap().state(),
        ElementState::Active
    );

    let construction = p.graph();
    assert_eq!(construction.vertex_count(), 2);
    assert_eq!(construction.edge_count(), 1);
    assert_eq!(
        construction.vertex(VertexId(0)).unwrap().state(),
        ElementState::Unvisited
    );
    assert_eq!(construction.vertex(VertexId(1)).unwrap().label_addition(), "");
    assert_eq!(construction, construction_graph());
}

#[test]
fn viewport_shrink_clamps_exactly() {
    let mut p = Presenter::default();
    p.replace_construction(&construction_graph());
    p.on_viewport_resize(Vec2::new(800., 600.));
    assert_eq!(
        p.graph().vertex(VertexId(1)).unwrap().location(),
        Pos2::new(500., 500.)
    );

    p.on_viewport_resize(Vec2::new(200., 150.));
    assert_eq!(
        p.graph().vertex(VertexId(1)).unwrap().location(),
        Pos2::new(170., 120.)
    );
    assert_eq!(
        p.scene().vertex(VertexId(1)).unwrap().location,
        Pos2::new(170., 120.)
    );
}

#[test]
fn degenerate_viewport_skips_correction() {
    let mut p = Presenter::default();
    p.replace_construction(&construction_graph());
    p.on_viewport_resize(Vec2::new(0., -5.));
    assert_eq!(p.graph(), construction_graph());
}

#[test]
fn edge_drag_into_empty_space_creates_nothing() {
    let mut p = Presenter::default();
    let mut g = Graph::new();
    g.add_vertex(Pos2::new(100., 100.));
    p.replace_construction(&g);

    let out = p
        .handle_pointer(PointerEvent::Press {
            pos: Pos2::new(100., 100.),
            gesture: Gesture::DrawEdge { directed: true },
        })
        .unwrap();
    assert!(matches!(out, Outcome::EdgeStarted { .. }));
    p.handle_pointer(PointerEvent::Drag {
        pos: Pos2::new(400., 300.),
    })
    .unwrap();

    let mut painter = Recorder::default();
    p.render(&mut painter);
    assert_eq!(painter.previews, 1);

    let out = p
        .handle_pointer(PointerEvent::Release {
            pos: Pos2::new(400., 300.),
        })
        .unwrap();
    assert_eq!(out, Outcome::EdgeCancelled);
    assert_eq!(p.graph().edge_count(), 0);

    let mut painter = Recorder::default();
    p.render(&mut painter);
    assert_eq!(painter.previews, 0);
    assert_eq!(painter.vertices, 1);
    assert_eq!(painter.edges, 0);
}

#[test]
fn mode_switch_abandons_pending_edge() {
    let mut p = Presenter::default();
    let mut g = Graph::new();
    g.add_vertex(Pos2::new(100., 100.));
    g.add_vertex(Pos2::new(300., 100.));
    p.replace_construction(&g);

    p.handle_pointer(PointerEvent::Press {
        pos: Pos2::new(100., 100.),
        gesture: Gesture::DrawEdge { directed: false },
    })
    .unwrap();
    p.set_mode(Mode::Visualization);
    p.set_mode(Mode::Construction);

    let out = p
        .handle_pointer(PointerEvent::Release {
            pos: Pos2::new(300., 100.),
        })
        .unwrap();
    assert_eq!(out, Outcome::Nothing);
    assert_eq!(p.graph().edge_count(), 0);
}

#[test]
fn copy_of_copy_matches_copy() {
    let mut g = construction_graph();
    let v2 = g.add_vertex(Pos2::new(40., 40.));
    g.add_edge(VertexId(1), v2, false).unwrap();
    g.set_state(ElementRef::Vertex(v2), ElementState::FinishedAndNotRelevant)
        .unwrap();

    let once = g.copy();
    let twice = once.copy();
    assert_eq!(twice, once);

    let mut changed = twice.copy();
    changed.edge_mut(changed.edge_ids()[0]).unwrap().set_weight(9.);
    changed.remove_vertex(v2).unwrap();
    assert_eq!(twice, once);
    assert_eq!(once.vertex_count(), 3);
}

#[test]
fn parallel_edges_are_all_between() {
    let mut g = Graph::new();
    let a = g.add_vertex(Pos2::ZERO);
    let b = g.add_vertex(Pos2::new(1., 0.));
    let c = g.add_vertex(Pos2::new(2., 0.));
    g.add_edge(b, c, true).unwrap();
    let second = g.add_edge(a, b, true).unwrap();
    let first = g.add_edge(a, b, true).unwrap();

    let mut between = g.edges_between(a, b).iter().map(|e| e.id()).collect::<Vec<_>>();
    between.sort();
    let mut expected = vec![first, second];
    expected.sort();
    assert_eq!(between, expected);
}

#[test]
fn removing_vertex_decrements_neighbour_degrees() {
    let mut g = Graph::new();
    let hub = g.add_vertex(Pos2::ZERO);
    let a = g.add_vertex(Pos2::new(1., 0.));
    let b = g.add_vertex(Pos2::new(2., 0.));
    g.add_edge(hub, a, true).unwrap();
    g.add_edge(b, hub, true).unwrap();
    g.add_edge(a, b, true).unwrap();

    let before = (g.in_degree(a).unwrap(), g.out_degree(b).unwrap());
    let (_, removed) = g.remove_vertex(hub).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.in_degree(a).unwrap(), before.0 - 1);
    assert_eq!(g.out_degree(b).unwrap(), before.1 - 1);
}

#[test]
fn ids_stay_monotonic_under_random_edits() {
    let mut rng = rand::rng();
    let mut g = Graph::new();
    let mut last = None;

    for _ in 0..500 {
        if g.vertex_count() > 0 && rng.random_bool(0.3) {
            let ids = g.vertex_ids().to_vec();
            let victim = ids[rng.random_range(0..ids.len())];
            g.remove_vertex(victim).unwrap();
        } else {
            let id = g.add_vertex(Pos2::new(rng.random_range(0.0..500.0), 0.));
            if let Some(prev) = last {
                assert!(id > prev);
            }
            last = Some(id);
        }
    }

    g.clear();
    assert_eq!(g.add_vertex(Pos2::ZERO), VertexId(0));
    assert!(graph_rect(&g).is_some());
}

#[derive(Default)]
struct Recorder {
    vertices: usize,
    edges: usize,
    previews: usize,
}

impl Renderer for Recorder {
    fn edge(&mut self, _edge: &SceneEdge) {
        self.edges += 1;
    }

    fn vertex(&mut self, _vertex: &SceneVertex, radius: f32) {
        assert_eq!(radius, 20.);
        self.vertices += 1;
    }

    fn preview(&mut self, _preview: &EdgePreview) {
        self.previews += 1;
    }
}
