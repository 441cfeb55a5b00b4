//! Performance benchmarks for webarchive-extract.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic page (~1KB) for microbenchmarks
//! - Scaled pages to check that extraction stays linear
//! - Adversarial style blocks (huge quote runs, oversized CSS)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use webarchive_extract::url_utils::extract_css_urls;
use webarchive_extract::{extract_metadata, extract_metadata_with_options, Options};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta name="description" content="A sample page for benchmarking.">
    <link rel="stylesheet" href="/css/site.css">
    <script src="/js/app.js" type="text/javascript"></script>
    <style>body { background: url('/img/bg.png') } @import "print.css";</style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about?tab=team&amp;lang=en">About</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph. It links to <a href="/one">page one</a>
        and shows an <img src="/img/a.png" alt="image">.</p>
        <pre>  preformatted   text  </pre>
        <script>document.write("<b>not markup</b>");</script>
        <div data-href="https://example.com/embed" onclick="location.href='/clicked.html'">Click</div>
    </article>
    <footer>
        <p>Copyright &copy; 2024</p>
    </footer>
</body>
</html>
"#;

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract_metadata(black_box(SAMPLE_HTML)));
    });
}

fn bench_extract_with_options(c: &mut Criterion) {
    let options = Options {
        trim_data_urls: false,
        extract_html_lang: false,
        ..Options::default()
    };

    c.bench_function("extract_with_options", |b| {
        b.iter(|| extract_metadata_with_options(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

/// Throughput over repeated page bodies; time per byte should stay flat.
fn bench_scaled_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaled");

    for copies in [10usize, 100, 1000] {
        let html = SAMPLE_HTML.repeat(copies);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", copies), &html, |b, html| {
            b.iter(|| extract_metadata(black_box(html)));
        });
    }

    group.finish();
}

fn bench_pathological_css(c: &mut Criterion) {
    let options = Options::default();
    let mut group = c.benchmark_group("pathological_css");

    let truncated = format!("url({}foo.gif{}", "'".repeat(500_000), "'".repeat(499_000));
    group.bench_function("unclosed_quote_run", |b| {
        b.iter(|| extract_css_urls(black_box(&truncated), &options));
    });

    let closed = format!("url({}foos.gif{});", "'".repeat(20_000), "'".repeat(20_000));
    group.bench_function("closed_quote_run", |b| {
        b.iter(|| extract_css_urls(black_box(&closed), &options));
    });

    let huge = "a { background: url(x.png) }\n".repeat(100_000);
    group.bench_function("oversized_style_block", |b| {
        b.iter(|| extract_css_urls(black_box(&huge), &options));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_with_options,
    bench_scaled_pages,
    bench_pathological_css
);
criterion_main!(benches);
