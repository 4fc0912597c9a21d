/// Concurrent rendering tests
///
/// One graph shared by reference across threads, every writer rendering
/// at once, must produce the same files as a sequential run.

use jsonmodeler_model::{ClassGraph, ClassModel, PropertyType};
use jsonmodeler_writer::{Language, OutputFile, WriterRegistry, WritingOptions};
use std::thread;

fn shop_graph() -> ClassGraph {
    ClassGraph::builder()
        .class(
            ClassModel::builder("Shop")
                .property("name", PropertyType::String)
                .property("open", PropertyType::Boolean)
                .property("orders", PropertyType::array(PropertyType::class("Order")))
                .build()
                .unwrap(),
        )
        .class(
            ClassModel::builder("Order")
                .property("id", PropertyType::Integer)
                .property("total", PropertyType::Float)
                .property("note", PropertyType::optional(PropertyType::String))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn sequential(graph: &ClassGraph, registry: &WriterRegistry) -> Vec<(Language, Vec<OutputFile>)> {
    Language::ALL
        .iter()
        .map(|&language| {
            let files = registry
                .get(language)
                .unwrap()
                .render(graph, &WritingOptions::default_for(language))
                .expect("Failed to render");
            (language, files)
        })
        .collect()
}

#[test]
fn test_writers_render_one_graph_concurrently() {
    let graph = shop_graph();
    let registry = WriterRegistry::new();
    let expected = sequential(&graph, &registry);

    let results: Vec<(Language, Vec<OutputFile>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .flat_map(|_| Language::ALL)
            .map(|language| {
                let graph = &graph;
                let registry = &registry;
                scope.spawn(move || {
                    let files = registry
                        .get(language)
                        .unwrap()
                        .render(graph, &WritingOptions::default_for(language))
                        .expect("Failed to render");
                    (language, files)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("render thread panicked"))
            .collect()
    });

    assert_eq!(results.len(), 12);
    for (language, files) in results {
        let (_, reference) = expected.iter().find(|(l, _)| *l == language).unwrap();
        assert_eq!(&files, reference, "{} output differs under concurrency", language);
    }
}
