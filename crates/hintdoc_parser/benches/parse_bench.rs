use std::sync::Arc;

use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hintdoc_parser::{AnnotationGrammar, Parser};

// A medium-size annotated source with the common statement and expression forms
const ANNOTATED_SOURCE: &str = r#"
/**
 * Keeps a running tally of visitors.
 */
var total: number = 0;
let label: string = "visitors";
const enabled: boolean = true;
var cache: object = {};
var pending: undefined;
var handle: null = null;
var anything: any = [1, 2, 3];

// Lookups
function lookup(key: string, fallback: any): any {
    if (key in cache) {
        return cache[key];
    }
    return fallback;
}

function record(name: string, count: number, ...tags: string): boolean {
    total += count;
    cache[name] = { count, tags, at: Date.now() };
    return true;
}

class Counter {
    constructor(start: number) {
        this.value = start;
    }

    increment(step: number): number {
        this.value += step;
        return this.value;
    }

    get current() {
        return this.value;
    }

    static create(): object {
        return new Counter(0);
    }
}

const format = (value: number, unit: string): string => `${value} ${unit}`;

async function load(url: string): object {
    const response = await fetch(url);
    return response.json();
}

for (var i: number = 0; i < 10; i++) {
    record("tick" + i, i * 2);
}

for (const key of Object.keys(cache)) {
    console.log(key, lookup(key, null));
}

switch (label) {
    case "visitors":
        total = total ** 2;
        break;
    default:
        total = 0;
}

try {
    load("/data").then((data) => console.log(data));
} catch (err) {
    console.error(err.message);
} finally {
    enabled && console.log(format(total, label));
}
"#;

fn bench_parse_annotated(c: &mut Criterion) {
    let grammar = Arc::new(AnnotationGrammar::standard());
    c.bench_function("parse_annotated_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parser = Parser::with_grammar(
                &arena,
                "bench.js",
                black_box(ANNOTATED_SOURCE),
                Arc::clone(&grammar),
            );
            let parsed = parser.parse_source_file();
            black_box(parsed.is_ok());
        });
    });
}

criterion_group!(benches, bench_parse_annotated);
criterion_main!(benches);
