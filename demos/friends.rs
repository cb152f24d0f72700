use nalgebra::DMatrix;
use netform::{
    compare::edges_equal,
    graph::{Scope, Selector, WEIGHT},
    matrix::MatrixMode,
    table::{build_from_tables, Table},
    build_from_edge_pairs, build_from_matrix,
};
use tracing_subscriber::EnvFilter;

const NODES: &str = include_str!("data/nodes.csv");
const EDGES: &str = include_str!("data/edges.csv");

fn main() -> netform::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let names = [
        "Kit", "Ty", "Viv", "Dee", "Chet", "Josh", "Ron", "Drew", "Quinn", "Lucy",
    ];
    let n = names.len();

    // 1. A ring of friends, written as adjacent pairs.
    let tokens: Vec<&str> = names
        .iter()
        .zip(names.iter().cycle().skip(1))
        .flat_map(|(a, b)| [*a, *b])
        .collect();
    let mut ring = build_from_edge_pairs(&tokens, false)?;
    println!(
        "Pairs: {} nodes, {} edges",
        ring.vertex_count(),
        ring.edge_count()
    );

    ring.set_attribute(
        Scope::Node,
        "age",
        &Selector::All,
        vec![22, 21, 25, 26, 24, 21, 17, 18, 22, 20],
    )?;
    if let Some(age) = ring.node_attribute("Viv", "age") {
        println!("Viv is {age}");
    }

    // 2. The same ring as an adjacency matrix. Fine at this size, but the matrix grows with the
    // square of the node count.
    let matrix = DMatrix::from_fn(n, n, |i, j| {
        if (i + 1) % n == j || (j + 1) % n == i {
            1.0
        } else {
            0.0
        }
    });
    let from_matrix = build_from_matrix(&matrix, Some(&names[..]), MatrixMode::Undirected)?;
    println!("Matrix graph equals pair graph: {}", edges_equal(&ring, &from_matrix));

    // 3. Node and edge tables, the way to go for larger networks.
    let nodes = Table::from_csv_reader(NODES.as_bytes())?;
    let mut edges = Table::from_csv_reader(EDGES.as_bytes())?;
    edges.categorize("type")?;

    let graph = build_from_tables(&nodes, &edges, false)?;
    println!(
        "Tables graph equals pair graph: {}, weighted: {}",
        edges_equal(&ring, &graph),
        graph.is_weighted()
    );

    // Length of relationship becomes the edge weight.
    edges.rename_column("lor", WEIGHT)?;
    let mut graph = build_from_tables(&nodes, &edges, false)?;
    println!("After renaming lor: weighted: {}", graph.is_weighted());
    println!("Weighted adjacency matrix: {}", graph.adjacency_matrix()?);

    graph.simplify();
    println!(
        "Density: {:.3}, degree of Kit: {:?}",
        graph.density(),
        graph.degree("Kit")
    );

    // Hand the finished graph to a rendering layer.
    match serde_json::to_string_pretty(&graph) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize graph: {e}"),
    }

    Ok(())
}
