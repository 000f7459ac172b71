//! Decoding and field validation benchmarks. Run with: cargo bench --bench validation_bench
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonify_core::body::{BodyDecoder, DecodedBody};
use jsonify_core::validation::{FieldConstraint, FieldValidator};
use serde_json::json;
use std::time::Duration;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn user_body() -> DecodedBody {
    let value = json!({ "name": "Alice Example", "age": 34, "email": "alice@example.com", "newsletter": true });
    DecodedBody::try_from(value).unwrap()
}

fn wide_payload(fields: usize) -> Vec<u8> {
    let map: serde_json::Map<String, serde_json::Value> = (0..fields).map(|i| (format!("field_{i}"), json!({ "id": i, "label": format!("item-{i}"), "tags": ["a", "b", "c"] }))).collect();
    serde_json::to_vec(&map).unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("body_decode"); g.measurement_time(Duration::from_secs(5));
    g.bench_function("empty", |b| b.iter(|| black_box(BodyDecoder::decode(black_box(b"")))));
    g.bench_function("malformed", |b| b.iter(|| black_box(BodyDecoder::decode(black_box(br#"{"name": "#)))));
    g.bench_function("invalid_utf8", |b| b.iter(|| black_box(BodyDecoder::decode(black_box(&[b'{', 0xff, b'}'])))));
    for &n in &[10usize, 100, 1000] {
        let payload = wide_payload(n);
        g.throughput(Throughput::Bytes(payload.len() as u64));
        g.bench_with_input(BenchmarkId::new("object", n), &payload, |b, p| b.iter(|| black_box(BodyDecoder::decode(p))));
    }
    g.finish();
}

fn bench_single_field(c: &mut Criterion) {
    let mut g = c.benchmark_group("field_validation"); g.measurement_time(Duration::from_secs(5));
    let body = user_body();
    let validator = FieldValidator::new(&body);
    let unconstrained = FieldConstraint::new();
    let length = FieldConstraint::text().min_value(3).max_value(64);
    let range = FieldConstraint::integer().min_value(0).max_value(150);
    let email = FieldConstraint::text().try_pattern(EMAIL_PATTERN).unwrap();
    let defaulted = FieldConstraint::text().with_default("member");
    g.bench_function("unconstrained", |b| b.iter(|| black_box(validator.validate("name", &unconstrained))));
    g.bench_function("length_pass", |b| b.iter(|| black_box(validator.validate("name", &length))));
    g.bench_function("range_pass", |b| b.iter(|| black_box(validator.validate("age", &range))));
    g.bench_function("type_mismatch", |b| b.iter(|| black_box(validator.validate("age", &length))));
    g.bench_function("pattern_pass", |b| b.iter(|| black_box(validator.validate("email", &email))));
    g.bench_function("pattern_fail", |b| b.iter(|| black_box(validator.validate("name", &email))));
    g.bench_function("default_applied", |b| b.iter(|| black_box(validator.validate("role", &defaulted))));
    g.bench_function("missing_field", |b| b.iter(|| black_box(validator.validate("id", &unconstrained))));
    g.finish();
}

fn bench_decode_and_validate(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode_and_validate"); g.measurement_time(Duration::from_secs(5));
    let payload = serde_json::to_vec(&json!({ "name": "Alice Example", "age": 34, "email": "alice@example.com" })).unwrap();
    let name = FieldConstraint::text().min_value(3).max_value(64);
    let age = FieldConstraint::integer().min_value(0).max_value(150);
    let email = FieldConstraint::text().max_value(254).try_pattern(EMAIL_PATTERN).unwrap();
    g.bench_function("user", |b| b.iter(|| {
        let body = BodyDecoder::decode(&payload).unwrap();
        let v = FieldValidator::new(&body);
        black_box((v.validate("name", &name), v.validate("age", &age), v.validate("email", &email)))
    }));
    g.finish();
}

criterion_group!(benches, bench_decode, bench_single_field, bench_decode_and_validate);
criterion_main!(benches);
