use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uscheme::{parse, parse_expression};

fn parser_benchmark(c: &mut Criterion) {
    let program = r#"
        (define counter 0)
        (define bump
          (lambda (n)
            (set! counter n)
            (if (or (less n 10) false)
                "small"
                (let ((twice (times n 2)))
                  (begin (define unused 1) twice)))))
        (bump 10)
        (and counter (bump (plus counter 1)))
    "#;

    c.bench_function("parse small program", |b| {
        b.iter(|| parse(black_box(program)).unwrap())
    });

    let nested = format!("{}x{}", "(f ".repeat(100), ")".repeat(100));
    c.bench_function("parse nested applications", |b| {
        b.iter(|| parse_expression(black_box(&nested)).unwrap())
    });
}

criterion_group!(benches, parser_benchmark);
criterion_main!(benches);
