use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mock_llm::predicate::{contains, exact_equals};
use mock_llm::provider::{ChatCompletionRequest, OpenAiAdapter};
use mock_llm::{MatchMode, MockConfig, MockRegistry};
use serde_json::{json, Value};

fn create_mock(id: usize, mode: MatchMode) -> MockConfig {
    MockConfig::new(
        format!("mock-{id}"),
        mode,
        json!({"role": "user", "content": format!("question number {id}")}),
        json!({"id": format!("chatcmpl-{id}"), "choices": []}),
    )
}

fn registry(count: usize, mode: MatchMode) -> MockRegistry<OpenAiAdapter> {
    let mocks: Vec<MockConfig> = (0..count).map(|i| create_mock(i, mode)).collect();
    MockRegistry::new(OpenAiAdapter, &mocks)
}

fn request_for(content: &str) -> ChatCompletionRequest {
    serde_json::from_value(json!({
        "model": "gpt-4o",
        "messages": [
            {"role": "system", "content": "You are terse."},
            {"role": "user", "content": content}
        ]
    }))
    .unwrap()
}

fn nested_value(depth: usize) -> Value {
    (0..depth).fold(json!({"text": "leaf value", "n": 1}), |inner, i| {
        json!({
            "level": i,
            "tags": ["a", "b", "c"],
            "child": inner,
        })
    })
}

fn bench_structural(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural");

    for depth in [1, 4, 16].iter() {
        let actual = nested_value(*depth);
        let expected = actual.clone();

        group.bench_with_input(BenchmarkId::new("exact", depth), depth, |b, _| {
            b.iter(|| exact_equals(black_box(&expected), black_box(&actual)));
        });

        group.bench_with_input(BenchmarkId::new("contains_self", depth), depth, |b, _| {
            b.iter(|| contains(black_box(&expected), black_box(&actual)));
        });
    }

    let actual = json!({"role": "user", "content": "the quick brown fox jumps over the lazy dog"});
    let needle = json!({"content": "lazy dog"});
    group.bench_function("contains_substring", |b| {
        b.iter(|| contains(black_box(&needle), black_box(&actual)));
    });

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for mock_count in [10, 100, 1000].iter() {
        for mode in [MatchMode::Exact, MatchMode::Contains] {
            let registry = registry(*mock_count, mode);
            let first = request_for("question number 0");
            let last = request_for(&format!("question number {}", mock_count - 1));
            let none = request_for("something else entirely");

            group.throughput(Throughput::Elements(1));
            group.bench_with_input(
                BenchmarkId::new(format!("{mode}_first"), mock_count),
                mock_count,
                |b, _| b.iter(|| registry.dispatch(black_box(&first)).is_match()),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{mode}_last"), mock_count),
                mock_count,
                |b, _| b.iter(|| registry.dispatch(black_box(&last)).is_match()),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{mode}_none"), mock_count),
                mock_count,
                |b, _| b.iter(|| registry.dispatch(black_box(&none)).is_match()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_structural, bench_dispatch);
criterion_main!(benches);
