//! # Conversion Scenarios
//!
//! End-to-end conversions through the public API.

use glam::{DVec2, DVec3};
use shape_convert::mesh::tracer::{merge_fragments, Chain};
use shape_convert::mesh::{trace_boundaries, MeshTopology};
use shape_convert::{
    ConvertError, ConvertOptions, DrawMode, ExternalGeometry, FaceAdjacency, GeometrySource,
    IndexedMesh, Paint, PointSet, Polygon, Primitive, Registry, Rgba, Ring, Scene, Shape,
    ShapeBuilder, TextureRef, Winding,
};

fn convert(source: impl Into<GeometrySource>) -> Result<Shape, ConvertError> {
    Registry::with_defaults().convert(&source.into(), &ConvertOptions::default())
}

fn convert_with(source: impl Into<GeometrySource>, options: &ConvertOptions) -> Shape {
    Registry::with_defaults()
        .convert(&source.into(), options)
        .unwrap()
}

fn winding(points: &[DVec3]) -> Winding {
    Ring::new(points.to_vec()).winding()
}

fn unit_cube() -> IndexedMesh {
    let vertices = (0..8)
        .map(|i| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
        .collect();
    // Vertex i sits at (i & 1, (i >> 1) & 1, (i >> 2) & 1)
    IndexedMesh::new(
        vertices,
        vec![
            [0, 2, 3],
            [0, 3, 1],
            [4, 5, 7],
            [4, 7, 6],
            [0, 1, 5],
            [0, 5, 4],
            [2, 6, 7],
            [2, 7, 3],
            [0, 4, 6],
            [0, 6, 2],
            [1, 3, 7],
            [1, 7, 5],
        ],
    )
}

// =============================================================================
// POLYGONS
// =============================================================================

#[test]
fn polygon_with_one_hole() {
    let polygon = Polygon::with_holes(
        Ring::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
        vec![Ring::from_xy(&[[3.0, 3.0], [3.0, 7.0], [7.0, 7.0], [7.0, 3.0]])],
    );
    let shape = convert(polygon).unwrap();
    let primitive = shape.as_primitive().unwrap();

    assert_eq!(primitive.mode(), DrawMode::ClosedPath);
    assert_eq!(primitive.vertex_count(), 4);
    assert_eq!(winding(primitive.vertices()), Winding::CounterClockwise);
    assert_eq!(primitive.contours().len(), 1);
    assert_eq!(primitive.contours()[0].len(), 4);
    assert_eq!(winding(&primitive.contours()[0]), Winding::Clockwise);
}

#[test]
fn winding_is_normalized_for_both_input_orders() {
    let square = [[0.0, 0.0], [6.0, 0.0], [6.0, 6.0], [0.0, 6.0]];
    let hole = [[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0]];
    let reversed = |pts: &[[f64; 2]]| pts.iter().rev().copied().collect::<Vec<_>>();

    for exterior in [square.to_vec(), reversed(&square)] {
        for inner in [hole.to_vec(), reversed(&hole)] {
            let polygon =
                Polygon::with_holes(Ring::from_xy(&exterior), vec![Ring::from_xy(&inner)]);
            let shape = convert(polygon).unwrap();
            let primitive = shape.as_primitive().unwrap();
            assert_eq!(winding(primitive.vertices()), Winding::CounterClockwise);
            assert_eq!(winding(&primitive.contours()[0]), Winding::Clockwise);
        }
    }
}

#[test]
fn closed_ring_yields_distinct_vertices_only() {
    let ring = Ring::from_xy(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]);
    let shape = convert(Polygon::new(ring)).unwrap();
    assert_eq!(shape.vertex_count(), 4);
}

// =============================================================================
// MESHES
// =============================================================================

#[test]
fn unit_cube_traces_six_square_outlines() {
    let mesh = unit_cube();
    let topology = MeshTopology::build(&mesh);
    let boundaries = trace_boundaries(&mesh, &topology, 0.0);
    let chains: Vec<&Chain> = boundaries.iter().flat_map(|b| &b.chains).collect();
    assert_eq!(chains.len(), 6);
    assert!(chains.iter().all(|c| c.closed && c.len() == 4));

    let shape = convert(mesh).unwrap();
    let primitives = shape.primitives();
    assert_eq!(primitives[0].vertex_count(), 36);
    assert_eq!(primitives.len(), 7);
}

#[test]
fn fill_layer_vertex_count_is_independent_of_options() {
    let face_colors = vec![Rgba::new(10, 20, 30, 255); 12];
    let uvs = vec![DVec2::new(0.5, 0.5); 8];
    let meshes = [
        unit_cube(),
        unit_cube().with_face_colors(face_colors),
        unit_cube().with_uvs(uvs).with_texture(TextureRef::new("grid")),
    ];
    let option_sets = [
        ConvertOptions::default(),
        ConvertOptions::default().with_facet_edges(false),
        ConvertOptions::default().with_min_edge_angle(0.3),
    ];

    for mesh in &meshes {
        for options in &option_sets {
            let shape = convert_with(mesh.clone(), options);
            let fill: &Primitive = shape.primitives()[0];
            assert_eq!(fill.mode(), DrawMode::Triangles);
            assert_eq!(fill.vertex_count(), 3 * mesh.triangle_count());
        }
    }
}

#[test]
fn textured_mesh_flips_v_and_drops_stroke() {
    let mesh = IndexedMesh::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![[0, 1, 2]])
        .with_uvs(vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 0.25)])
        .with_texture(TextureRef::new("skin"));
    let options = ConvertOptions::default().with_facet_edges(false);
    let shape = convert_with(mesh, &options);
    let fill = shape.as_primitive().unwrap();
    assert_eq!(fill.texture(), Some(&TextureRef::new("skin")));
    assert_eq!(fill.uvs().unwrap()[2], DVec2::new(0.0, 0.75));
    assert_eq!(fill.stroke(), Paint::Disabled);
}

#[test]
fn sharp_threshold_splits_outline_into_open_chain() {
    // Two coplanar triangles that are kept as separate groups: the shared
    // diagonal is flatter than the threshold and disappears from both loops
    let mesh = IndexedMesh::new(
        vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .with_facets(vec![])
    .with_adjacency(vec![FaceAdjacency::new(0, 1, 0.0)]);

    let options = ConvertOptions::default().with_min_edge_angle(0.1);
    let shape = convert_with(mesh, &options);
    let outlines = &shape.primitives()[1..];
    assert_eq!(outlines.len(), 2);
    assert!(outlines.iter().all(|p| p.mode() == DrawMode::OpenPath));
    assert!(outlines.iter().all(|p| p.fill() == Paint::Disabled));
}

#[test]
fn split_rim_merges_back_into_one_loop() {
    let merged = merge_fragments(vec![Chain::open(vec![4, 5, 6]), Chain::open(vec![6, 7, 4])]);
    assert_eq!(merged.len(), 1);
    assert!(merged[0].closed);
    assert_eq!(merged[0].len(), 4);

    let apart = merge_fragments(vec![Chain::open(vec![4, 5]), Chain::open(vec![6, 7])]);
    assert_eq!(apart.len(), 2);
    assert!(apart.iter().all(|c| !c.closed));
}

// =============================================================================
// DEGENERATE INPUT
// =============================================================================

#[test]
fn degenerate_inputs_convert_without_error() {
    let empty_points = convert(PointSet::default()).unwrap();
    assert_eq!(empty_points.vertex_count(), 0);

    let two_point_ring = convert(Ring::from_xy(&[[0.0, 0.0], [1.0, 1.0]])).unwrap();
    assert_eq!(two_point_ring.vertex_count(), 0);

    let spike = Ring::from_xy(&[[0.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 0.0]]);
    assert_eq!(convert(Polygon::new(spike)).unwrap().vertex_count(), 0);

    let no_triangles = convert(IndexedMesh::new(vec![DVec3::ZERO], vec![])).unwrap();
    assert_eq!(no_triangles.vertex_count(), 0);
}

// =============================================================================
// DISPATCH AND SCENES
// =============================================================================

#[test]
fn unsupported_type_is_named() {
    #[derive(Debug)]
    struct Teapot;
    let error = convert(ExternalGeometry::new(Teapot)).unwrap_err();
    let ConvertError::UnsupportedGeometry { type_name } = &error else {
        panic!("unexpected error {error:?}");
    };
    assert!(type_name.ends_with("Teapot"));
    assert!(error.to_string().contains("Teapot"));
}

#[test]
fn scene_with_two_members() {
    let ring1 = Ring::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    let ring2 = Ring::from_xy(&[[5.0, 0.0], [6.0, 0.0], [6.0, 1.0]]);
    let scene: Scene = [("a", ring1), ("b", ring2)].into_iter().collect();

    let shape = convert(scene).unwrap();
    assert!(shape.is_group());
    assert_eq!(shape.children().len(), 2);
    assert_eq!(shape.children()[0].name(), Some("a"));
    assert_eq!(shape.children()[1].name(), Some("b"));
}

#[test]
fn options_load_from_json() {
    let options = ConvertOptions::from_json(r#"{ "facetEdges": false }"#).unwrap();
    let shape = convert_with(unit_cube(), &options);
    assert!(!shape.is_group());
}

// =============================================================================
// RENDERER REPLAY
// =============================================================================

/// Counts builder calls per kind.
#[derive(Default)]
struct Counter {
    primitives: usize,
    groups: usize,
    vertices: usize,
    contours: usize,
    names: Vec<String>,
}

impl ShapeBuilder for Counter {
    type Handle = ();

    fn create_primitive(&mut self, _mode: DrawMode) {
        self.primitives += 1;
    }
    fn add_vertex(&mut self, _shape: &mut (), _position: DVec3, _uv: Option<DVec2>) {
        self.vertices += 1;
    }
    fn begin_contour(&mut self, _shape: &mut ()) {
        self.contours += 1;
    }
    fn end_contour(&mut self, _shape: &mut ()) {}
    fn set_fill_color(&mut self, _shape: &mut (), _color: Rgba) {}
    fn set_stroke_color(&mut self, _shape: &mut (), _color: Rgba) {}
    fn disable_fill(&mut self, _shape: &mut ()) {}
    fn disable_stroke(&mut self, _shape: &mut ()) {}
    fn set_fill_colors(&mut self, _shape: &mut (), _colors: &[Rgba]) {}
    fn set_stroke_colors(&mut self, _shape: &mut (), _colors: &[Rgba]) {}
    fn set_texture(&mut self, _shape: &mut (), _texture: &TextureRef) {}
    fn create_group(&mut self) {
        self.groups += 1;
    }
    fn add_child(&mut self, _parent: &mut (), _child: ()) {}
    fn set_name(&mut self, _shape: &mut (), name: &str) {
        self.names.push(name.to_string());
    }
}

#[test]
fn replay_scene_into_builder() {
    let polygon = Polygon::with_holes(
        Ring::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
        vec![Ring::from_xy(&[[3.0, 3.0], [3.0, 7.0], [7.0, 7.0], [7.0, 3.0]])],
    );
    let mut scene = Scene::new();
    scene.insert("plate", polygon);
    scene.insert("cube", unit_cube());

    let shape = convert(scene).unwrap();
    let mut counter = Counter::default();
    shape.emit(&mut counter);

    // scene group + cube group
    assert_eq!(counter.groups, 2);
    // plate + cube fill + 6 outlines
    assert_eq!(counter.primitives, 8);
    assert_eq!(counter.vertices, 4 + 4 + 36 + 6 * 4);
    assert_eq!(counter.contours, 1);
    assert_eq!(counter.names, ["plate", "cube"]);
}
